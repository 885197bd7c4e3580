use std::fmt;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumString};

use crate::constants::*;
use crate::error::ConfigurationError;
use crate::events::Listeners;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, DeserializeFromStr, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum TransitionKind {
    #[strum(to_string = "fade", serialize = "crossfade")]
    CrossFade,
    #[strum(to_string = "slide", serialize = "slideover")]
    SlideOver,
}

/// Where the container sits in the host window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, DeserializeFromStr, EnumString, StrumDisplay)]
#[strum(ascii_case_insensitive)]
pub enum Placement {
    #[default]
    #[strum(to_string = "none", serialize = "inline")]
    Inline,
    #[strum(to_string = "left")]
    Left,
    #[strum(to_string = "right")]
    Right,
}

/// A pixel length, written `300px`, `300` or as a bare number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Length(pub f32);

impl FromStr for Length {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let number = trimmed.strip_suffix("px").unwrap_or(trimmed).trim();
        match number.parse::<f32>() {
            Ok(px) if px.is_finite() && px >= 0.0 => Ok(Length(px)),
            _ => Err(ConfigurationError::InvalidLength(s.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Length {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(px) => Length::from_str(&px.to_string()).map_err(serde::de::Error::custom),
            Raw::Text(text) => Length::from_str(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, DeserializeFromStr)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl FromStr for Rgb {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidColor(s.to_string());
        let value = s.trim().to_ascii_lowercase();

        if let Some(hex) = value.strip_prefix('#') {
            let digits: Vec<u8> = hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| d as u8))
                .collect::<Option<_>>()
                .ok_or_else(invalid)?;
            return match digits.as_slice() {
                [r, g, b] => Ok(Rgb::new(r * 17, g * 17, b * 17)),
                [r1, r2, g1, g2, b1, b2] => Ok(Rgb::new(r1 * 16 + r2, g1 * 16 + g2, b1 * 16 + b2)),
                _ => Err(invalid()),
            };
        }

        match value.as_str() {
            "white" => Ok(Rgb::new(255, 255, 255)),
            "black" => Ok(Rgb::new(0, 0, 0)),
            "red" => Ok(Rgb::new(255, 0, 0)),
            "green" => Ok(Rgb::new(0, 128, 0)),
            "blue" => Ok(Rgb::new(0, 0, 255)),
            "gray" | "grey" => Ok(Rgb::new(128, 128, 128)),
            "transparent" => Ok(Rgb { r: 0, g: 0, b: 0, a: 0 }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, StrumDisplay)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum BorderStyle {
    Solid,
    Dashed,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr)]
pub struct Border {
    pub width: Length,
    pub style: BorderStyle,
    pub color: Rgb,
}

impl Border {
    pub const NONE: Border = Border {
        width: Length(0.0),
        style: BorderStyle::None,
        color: Rgb::new(0, 0, 0),
    };

    pub fn is_visible(&self) -> bool {
        self.style != BorderStyle::None && self.width.0 > 0.0
    }
}

impl FromStr for Border {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigurationError::InvalidBorder(s.to_string());
        let parts: Vec<&str> = s.split_whitespace().collect();
        match parts.as_slice() {
            ["none"] | ["0"] => Ok(Border::NONE),
            [width, style, color] => Ok(Border {
                width: width.parse().map_err(|_| invalid())?,
                style: style.parse().map_err(|_| invalid())?,
                color: color.parse().map_err(|_| invalid())?,
            }),
            _ => Err(invalid()),
        }
    }
}

/// Caller-facing options. Every key is optional; unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RotationOptions {
    pub width: Option<Length>,
    pub height: Option<Length>,
    pub border: Option<Border>,
    #[serde(alias = "backgroundColor", alias = "backgroundcolor", alias = "bg_color")]
    pub background_color: Option<Rgb>,
    /// Milliseconds between rotations.
    pub delay: Option<u64>,
    pub transition: Option<TransitionKind>,
    /// Milliseconds a fade or slide takes.
    #[serde(alias = "transitionSpeed", alias = "transitionspeed")]
    pub transition_speed: Option<u64>,
    pub start: Option<usize>,
    pub shuffle: Option<bool>,
    pub float: Option<Placement>,
    #[serde(skip)]
    pub listeners: Listeners,
}

impl RotationOptions {
    /// Overlays `other` on top of `self`: every key present in `other` wins.
    /// Listeners accumulate, `self`'s first.
    pub fn merge(mut self, other: RotationOptions) -> RotationOptions {
        self.width = other.width.or(self.width);
        self.height = other.height.or(self.height);
        self.border = other.border.or(self.border);
        self.background_color = other.background_color.or(self.background_color);
        self.delay = other.delay.or(self.delay);
        self.transition = other.transition.or(self.transition);
        self.transition_speed = other.transition_speed.or(self.transition_speed);
        self.start = other.start.or(self.start);
        self.shuffle = other.shuffle.or(self.shuffle);
        self.float = other.float.or(self.float);
        self.listeners.0.extend(other.listeners.0);
        self
    }
}

/// Options file (TOML) layered with `ROTATOR_*` environment variables.
pub fn load_options(path: &Path) -> Result<RotationOptions, ConfigurationError> {
    let s = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("ROTATOR"))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Options with every default filled in. Fixed for the lifetime of a controller.
#[derive(Debug, Clone, PartialEq)]
pub struct RotationConfig {
    pub width: f32,
    pub height: f32,
    pub border: Border,
    pub background_color: Rgb,
    pub delay: Duration,
    pub transition: TransitionKind,
    pub transition_speed: Duration,
    pub start: usize,
    pub shuffle: bool,
    pub placement: Placement,
}

impl RotationConfig {
    pub fn resolve(options: &RotationOptions) -> Result<Self, ConfigurationError> {
        Ok(Self {
            width: options.width.map_or_else(|| DEFAULT_WIDTH.parse(), Ok)?.0,
            height: options.height.map_or_else(|| DEFAULT_HEIGHT.parse(), Ok)?.0,
            border: options.border.map_or_else(|| DEFAULT_BORDER.parse(), Ok)?,
            background_color: options.background_color.map_or_else(|| DEFAULT_BACKGROUND.parse(), Ok)?,
            delay: Duration::from_millis(options.delay.unwrap_or(DEFAULT_DELAY_MS)),
            transition: options.transition.unwrap_or(TransitionKind::CrossFade),
            transition_speed: Duration::from_millis(options.transition_speed.unwrap_or(DEFAULT_TRANSITION_SPEED_MS)),
            start: options.start.unwrap_or(DEFAULT_START),
            shuffle: options.shuffle.unwrap_or(false),
            placement: options.float.unwrap_or_default(),
        })
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 80.0,
            border: Border {
                width: Length(1.0),
                style: BorderStyle::Solid,
                color: Rgb::new(0, 0, 0),
            },
            background_color: Rgb::new(255, 255, 255),
            delay: Duration::from_millis(DEFAULT_DELAY_MS),
            transition: TransitionKind::CrossFade,
            transition_speed: Duration::from_millis(DEFAULT_TRANSITION_SPEED_MS),
            start: DEFAULT_START,
            shuffle: false,
            placement: Placement::Inline,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RotationConfig::resolve(&RotationOptions::default()).unwrap();
        assert_eq!(config, RotationConfig::default());
        assert_eq!(config.border.color.to_string(), "#000000");
    }

    #[test]
    fn test_transition_names() {
        let cases = vec![
            ("\"fade\"", TransitionKind::CrossFade),
            ("\"Fade\"", TransitionKind::CrossFade),
            ("\"crossfade\"", TransitionKind::CrossFade),
            ("\"slide\"", TransitionKind::SlideOver),
            ("\"SLIDEOVER\"", TransitionKind::SlideOver),
        ];

        for (json, expected) in cases {
            let deserialized: TransitionKind = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
        assert!(serde_json::from_str::<TransitionKind>("\"wipe\"").is_err());
        assert_eq!(TransitionKind::SlideOver.to_string(), "slide");
    }

    #[test]
    fn test_lengths() {
        assert_eq!("300px".parse::<Length>().unwrap(), Length(300.0));
        assert_eq!(" 80 ".parse::<Length>().unwrap(), Length(80.0));
        assert!("-4px".parse::<Length>().is_err());
        assert!("1em".parse::<Length>().is_err());

        let from_number: Length = serde_json::from_str("120").unwrap();
        assert_eq!(from_number, Length(120.0));
    }

    #[test]
    fn test_colors() {
        assert_eq!("#ffffff".parse::<Rgb>().unwrap(), Rgb::new(255, 255, 255));
        assert_eq!("#0a0".parse::<Rgb>().unwrap(), Rgb::new(0, 170, 0));
        assert_eq!("White".parse::<Rgb>().unwrap(), Rgb::new(255, 255, 255));
        assert_eq!("transparent".parse::<Rgb>().unwrap().a, 0);
        assert!("#12345".parse::<Rgb>().is_err());
        assert!("#gggggg".parse::<Rgb>().is_err());
        assert!("chartreuse".parse::<Rgb>().is_err());
    }

    #[test]
    fn test_borders() {
        let border: Border = "2px dashed #ff0000".parse().unwrap();
        assert_eq!(border.width, Length(2.0));
        assert_eq!(border.style, BorderStyle::Dashed);
        assert_eq!(border.color, Rgb::new(255, 0, 0));
        assert!(border.is_visible());

        assert!(!"none".parse::<Border>().unwrap().is_visible());
        assert!("1px".parse::<Border>().is_err());
        assert!("1px wavy #000".parse::<Border>().is_err());
    }

    #[test]
    fn test_options_keys_and_aliases() {
        let json = r##"{
            "width": "400px",
            "height": 120,
            "backgroundColor": "#eee",
            "transitionSpeed": 250,
            "transition": "slide",
            "delay": 3000,
            "start": 2,
            "shuffle": true,
            "float": "right",
            "unknown_key": "ignored"
        }"##;
        let options: RotationOptions = serde_json::from_str(json).unwrap();
        let config = RotationConfig::resolve(&options).unwrap();

        assert_eq!(config.width, 400.0);
        assert_eq!(config.height, 120.0);
        assert_eq!(config.background_color, Rgb::new(238, 238, 238));
        assert_eq!(config.transition_speed, Duration::from_millis(250));
        assert_eq!(config.transition, TransitionKind::SlideOver);
        assert_eq!(config.delay, Duration::from_secs(3));
        assert_eq!(config.start, 2);
        assert!(config.shuffle);
        assert_eq!(config.placement, Placement::Right);
        assert_eq!(config.border, RotationConfig::default().border);
    }

    #[test]
    fn test_merge_later_layer_wins() {
        let file = RotationOptions {
            delay: Some(1000),
            start: Some(1),
            ..Default::default()
        };
        let cli = RotationOptions {
            delay: Some(2000),
            shuffle: Some(true),
            ..Default::default()
        };

        let merged = file.merge(cli);

        assert_eq!(merged.delay, Some(2000));
        assert_eq!(merged.start, Some(1));
        assert_eq!(merged.shuffle, Some(true));
        assert_eq!(merged.transition, None);
    }

    #[test]
    fn test_missing_options_file_gives_defaults() {
        let options = load_options(Path::new("/nonexistent/rotator.toml")).unwrap();
        assert!(options.width.is_none());
        assert!(options.listeners.is_empty());
    }

    #[test]
    fn test_options_file_layered_with_environment() {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("rotator.toml");
        std::fs::write(
            &path,
            r##"
width = "300px"
height = 90
bg_color = "#102030"
transitionSpeed = 750
transition = "slide"
delay = 1000
"##,
        )
        .unwrap();

        // SAFETY: this is the only test that changes the environment.
        unsafe { std::env::set_var("ROTATOR_DELAY", "2500") };
        let loaded = load_options(&path);
        unsafe { std::env::remove_var("ROTATOR_DELAY") };

        let config = RotationConfig::resolve(&loaded.unwrap()).unwrap();
        assert_eq!(config.width, 300.0);
        assert_eq!(config.height, 90.0);
        assert_eq!(config.background_color, Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(config.transition_speed, Duration::from_millis(750));
        assert_eq!(config.transition, TransitionKind::SlideOver);
        assert_eq!(config.delay, Duration::from_millis(2500));
        assert_eq!(config.start, DEFAULT_START);
    }
}
