use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use exif::{In, Reader, Tag, Value};
use log::{debug, warn};
use raylib::prelude::*;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .with_context(|| format!("Failed to read directory {}", dir_path.display()))?;

    for entry in entries {
        let path = entry.context("Failed to read directory entry")?.path();
        if path.is_file() && is_image(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        bail!("No image files found in directory: {}", dir_path.display());
    }
    Ok(paths)
}

fn is_image(path: &Path) -> bool {
    extension(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn extension(path: &Path) -> Option<String> {
    path.extension().and_then(|s| s.to_str()).map(str::to_lowercase)
}

/// EXIF orientation tag of a JPEG, if it carries one.
pub fn exif_orientation(file_bytes: &[u8]) -> Option<u16> {
    let exif = Reader::new().read_from_container(&mut Cursor::new(file_bytes)).ok()?;
    let field = exif.get_field(Tag::Orientation, In::PRIMARY)?;
    match &field.value {
        Value::Short(values) => values.first().copied(),
        _ => None,
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path)
        .with_context(|| format!("Failed to read file {}", image_path.display()))?;

    let extension = extension(image_path).unwrap_or_default();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        exif_orientation(&file_bytes).unwrap_or_else(|| {
            warn!("No EXIF orientation for {}, assuming upright", image_path.display());
            1
        })
    } else {
        1
    };

    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Failed to load image data for {}", image_path.display()))?;

    // 3 = 180 deg, 6 = 90 deg clockwise, 8 = 90 deg counter-clockwise.
    // Others involve flips, ignored here.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if matches!(orientation, 3 | 6 | 8) {
        debug!("Applied EXIF orientation {} to {}", orientation, image_path.display());
    }

    let texture = rl
        .load_texture_from_image(thread, &image)
        .map_err(|e| anyhow::anyhow!("{e}"))
        .with_context(|| format!("Failed to create texture for {}", image_path.display()))?;

    Ok(texture)
}
