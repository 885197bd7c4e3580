use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info, warn};
use raylib::prelude::*;
use strum::IntoEnumIterator;

use slide_rotator::config::{Border, Length, Placement, Rgb, load_options};
use slide_rotator::constants::FPS;
use slide_rotator::events::Listeners;
use slide_rotator::render;
use slide_rotator::slide::Slide;
use slide_rotator::stage::{Stage, window_size};
use slide_rotator::texture_loader::{load_sorted_image_paths, load_texture_with_exif_rotation};
use slide_rotator::{EventKind, FrameClock, RotationConfig, RotationEvent, RotationOptions, SignalQueue, TransitionKind, listener};

const DIGIT_KEYS: [KeyboardKey; 9] = [
    KeyboardKey::KEY_ONE,
    KeyboardKey::KEY_TWO,
    KeyboardKey::KEY_THREE,
    KeyboardKey::KEY_FOUR,
    KeyboardKey::KEY_FIVE,
    KeyboardKey::KEY_SIX,
    KeyboardKey::KEY_SEVEN,
    KeyboardKey::KEY_EIGHT,
    KeyboardKey::KEY_NINE,
];

/// Rotates the images of a directory inside a fixed-size container.
///
/// Space toggles auto-rotation, arrow keys step, 1-9 jump to a pane.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding the images to rotate
    dir: PathBuf,

    /// TOML options file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Container width, e.g. 300px
    #[arg(long)]
    width: Option<Length>,

    /// Container height, e.g. 80px
    #[arg(long)]
    height: Option<Length>,

    /// Container border, e.g. "1px solid #000000" or "none"
    #[arg(long)]
    border: Option<Border>,

    /// Background color, e.g. #ffffff
    #[arg(long)]
    background: Option<Rgb>,

    /// Milliseconds each pane stays on screen
    #[arg(long)]
    delay: Option<u64>,

    /// fade or slide
    #[arg(long)]
    transition: Option<TransitionKind>,

    /// Milliseconds a transition takes
    #[arg(long)]
    transition_speed: Option<u64>,

    /// Index of the first pane shown (after shuffling)
    #[arg(long)]
    start: Option<usize>,

    /// Shuffle the panes before starting
    #[arg(long)]
    shuffle: bool,

    /// left, right or none
    #[arg(long)]
    float: Option<Placement>,
}

impl Cli {
    fn options(&self) -> RotationOptions {
        RotationOptions {
            width: self.width,
            height: self.height,
            border: self.border,
            background_color: self.background,
            delay: self.delay,
            transition: self.transition,
            transition_speed: self.transition_speed,
            start: self.start,
            shuffle: self.shuffle.then_some(true),
            float: self.float,
            listeners: Listeners::default(),
        }
    }
}

fn logging_listeners() -> Listeners {
    let log_event = listener(|event, snapshot| {
        match event {
            RotationEvent::Load => info!("Loaded {} panes", snapshot.pane_count),
            RotationEvent::BeforePlay => info!("Playing"),
            RotationEvent::BeforeStop => info!("Stopping"),
            RotationEvent::BeforeRotate { prev, next } => debug!("Rotating {} -> {}", prev, next),
            RotationEvent::Rotate { prev, next } => debug!("Rotated {} -> {}", prev, next),
        }
        Ok(())
    });

    EventKind::iter().fold(Listeners::default(), |listeners, kind| listeners.with(kind, log_event.clone()))
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let file_options = match &cli.config {
        Some(path) => load_options(path).with_context(|| format!("Failed to load options from {}", path.display()))?,
        None => RotationOptions::default(),
    };
    let mut options = file_options.merge(cli.options());
    options.listeners = logging_listeners();
    let config = RotationConfig::resolve(&options)?;

    let image_paths = load_sorted_image_paths(&cli.dir)?;
    info!("Input path: {} ({} images)", cli.dir.display(), image_paths.len());

    let (width, height) = window_size(&config);
    let (mut rl, thread) = raylib::init()
        .size(width, height)
        .title("Slide Rotator")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(FPS);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    // --- Load Slides ---
    let background = render::color(config.background_color);
    let mut slides: Vec<Slide> = Vec::new();
    for path in image_paths {
        match load_texture_with_exif_rotation(&mut rl, &thread, &path) {
            Ok(texture) => slides.push(Slide::new(texture, config.width, config.height, background)),
            Err(e) => warn!("Skipping {}: {:#}", path.display(), e),
        }
    }

    let queue = SignalQueue::new();
    let mut stage: Stage<Slide, FrameClock> = Stage::new();
    stage.attach(options, slides, FrameClock::new(queue.clone()), queue.clone())?;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();

        if let Some(controller) = stage.controller_mut() {
            if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
                if controller.is_playing() {
                    controller.stop()?;
                } else {
                    controller.play()?;
                }
            }
            if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
                controller.show_next()?;
            }
            if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
                controller.show_prev()?;
            }
            for (index, key) in DIGIT_KEYS.iter().enumerate() {
                if rl.is_key_pressed(*key) {
                    controller.go_to(index)?;
                }
            }

            controller.scheduler_mut().tick(Duration::from_secs_f32(dt.max(0.0)));
            for slide in controller.panes_mut() {
                slide.update(dt);
            }
        }
        stage.drain(&queue)?;

        let screen_width = rl.get_screen_width();
        let screen_height = rl.get_screen_height();
        let layout = stage.layout(screen_width, screen_height);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        if let (Some(rect), Some(controller)) = (layout, stage.controller()) {
            render::draw_container(&mut d, rect, controller.config(), controller.panes());
        }
    }

    stage.detach();
    Ok(())
}
