//! Game settings
//!
//! Read once at startup: from the canvas `data-config` attribute in the
//! browser, or from a JSON file named on the command line natively. Nothing
//! is written back.

use std::fmt;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::Direction;
use crate::tuning::Tuning;

/// How the player steers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum InputMode {
    /// Arrow keys and Space
    #[default]
    Keyboard,
    /// Large on-screen pad, well away from the corner
    TouchFar,
    /// Compact on-screen pad hugging the corner
    TouchNear,
}

impl InputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputMode::Keyboard => "keyboard",
            InputMode::TouchFar => "touch_far",
            InputMode::TouchNear => "touch_near",
        }
    }

    /// Pick a mode from a browser user agent string
    pub fn detect(user_agent: &str) -> Self {
        const MOBILE: [&str; 4] = ["iphone", "ipad", "ipod", "android"];
        let ua = user_agent.to_lowercase();
        if MOBILE.iter().any(|m| ua.contains(m)) {
            InputMode::TouchFar
        } else {
            InputMode::Keyboard
        }
    }

    pub fn is_touch(&self) -> bool {
        !matches!(self, InputMode::Keyboard)
    }

    /// On-screen pad geometry (None for keyboard play)
    pub fn control_layout(&self) -> Option<ControlLayout> {
        match self {
            InputMode::Keyboard => None,
            InputMode::TouchFar => Some(ControlLayout::FAR),
            InputMode::TouchNear => Some(ControlLayout::NEAR),
        }
    }

    /// What the player does to start or restart
    pub fn start_verb(&self) -> &'static str {
        match self {
            InputMode::Keyboard => "Press Space",
            InputMode::TouchFar | InputMode::TouchNear => "Tap",
        }
    }

    pub fn controls_hint(&self) -> &'static str {
        match self {
            InputMode::Keyboard => "Use the arrow keys to fly around",
            InputMode::TouchFar | InputMode::TouchNear => "Use the pad to fly around",
        }
    }
}

/// Four circular touch controls anchored to the bottom-right corner
///
/// Control centres sit on a plus shape: the outer arms are `near` and `far`
/// pixels from the corner, the cross bar is `mid` pixels from it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlLayout {
    pub near: f32,
    pub mid: f32,
    pub far: f32,
    /// Touches closer than this to a centre press that control
    pub hit_radius: f32,
    /// Drawn radius of each control
    pub pad_radius: f32,
}

impl ControlLayout {
    pub const FAR: Self = Self {
        near: 50.0,
        mid: 125.0,
        far: 200.0,
        hit_radius: 35.0,
        pad_radius: 50.0,
    };

    pub const NEAR: Self = Self {
        near: 40.0,
        mid: 100.0,
        far: 160.0,
        hit_radius: 35.0,
        pad_radius: 35.0,
    };

    /// Screen position of a control's centre
    pub fn center(&self, control: Direction, viewport: Viewport) -> Vec2 {
        let (w, h) = (viewport.width, viewport.height);
        match control {
            Direction::Right => Vec2::new(w - self.near, h - self.mid),
            Direction::Left => Vec2::new(w - self.far, h - self.mid),
            Direction::Down => Vec2::new(w - self.mid, h - self.near),
            Direction::Up => Vec2::new(w - self.mid, h - self.far),
        }
    }
}

/// Fixed drawing surface size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Number of whole pixel columns
    pub fn columns(&self) -> u32 {
        self.width.max(0.0) as u32
    }

    pub fn middle(&self) -> f32 {
        self.width / 2.0
    }

    pub fn quarter(&self) -> f32 {
        self.height / 4.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 720.0)
    }
}

/// How the ship's size is chosen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ShipSizing {
    /// Pixel size independent of the viewport
    Fixed { width: f32, height: f32 },
    /// Fractions of the viewport width and height
    ViewportFraction { width: f32, height: f32 },
}

impl Default for ShipSizing {
    fn default() -> Self {
        ShipSizing::Fixed {
            width: 50.0,
            height: 40.0,
        }
    }
}

/// Settings error
#[derive(Debug)]
pub enum SettingsError {
    /// Not valid JSON, or the wrong shape
    Parse(serde_json::Error),
    /// Parsed, but these fields hold unusable values
    Invalid(Vec<&'static str>),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "malformed settings: {e}"),
            SettingsError::Invalid(fields) => {
                write!(f, "invalid settings value(s): {}", fields.join(", "))
            }
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Startup configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// None: detect from the platform
    pub input_mode: Option<InputMode>,
    /// None: use the canvas size
    pub viewport: Option<Viewport>,
    pub ship: ShipSizing,
    pub tuning: Tuning,
}

impl Settings {
    /// Parse and validate settings JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut bad = self.tuning.invalid_fields();

        if let Some(viewport) = self.viewport {
            if !(viewport.width >= 1.0) || !(viewport.height >= 1.0) {
                bad.push("viewport");
            }
        }

        let (w, h) = match self.ship {
            ShipSizing::Fixed { width, height } => (width, height),
            ShipSizing::ViewportFraction { width, height } => (width, height),
        };
        if !(w > 0.0) || !(h > 0.0) {
            bad.push("ship");
        }

        if bad.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Invalid(bad))
        }
    }

    /// Configured viewport, else the given surface size
    pub fn viewport_or(&self, fallback: Viewport) -> Viewport {
        self.viewport.unwrap_or(fallback)
    }

    /// Configured input mode, else the given detection result
    pub fn input_mode_or(&self, detected: InputMode) -> InputMode {
        self.input_mode.unwrap_or(detected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_gives_defaults() {
        let settings = Settings::from_json("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_partial_tuning_override() {
        let settings = Settings::from_json(r#"{ "tuning": { "zoom": 150.0 } }"#).unwrap();
        assert_eq!(settings.tuning.zoom, 150.0);
        assert_eq!(settings.tuning.floor_y, 20.0);
    }

    #[test]
    fn test_input_mode_and_ship() {
        let json = r#"{
            "input_mode": "touch_near",
            "viewport": { "width": 800.0, "height": 600.0 },
            "ship": { "kind": "viewport_fraction", "width": 0.05, "height": 0.04 }
        }"#;
        let settings = Settings::from_json(json).unwrap();
        assert_eq!(settings.input_mode, Some(InputMode::TouchNear));
        assert_eq!(settings.viewport, Some(Viewport::new(800.0, 600.0)));
        assert!(matches!(settings.ship, ShipSizing::ViewportFraction { .. }));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = Settings::from_json(r#"{ "gravity": 9.8 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
        assert!(err.to_string().starts_with("malformed settings"));
    }

    #[test]
    fn test_invalid_values() {
        let json = r#"{
            "viewport": { "width": 0.0, "height": 600.0 },
            "ship": { "kind": "fixed", "width": -5.0, "height": 10.0 },
            "tuning": { "zoom": 0.0 }
        }"#;
        match Settings::from_json(json) {
            Err(SettingsError::Invalid(fields)) => {
                assert!(fields.contains(&"viewport"));
                assert!(fields.contains(&"ship"));
                assert!(fields.contains(&"zoom"));
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_json_round_trip_of_defaults() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_detect_input_mode() {
        let iphone = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X)";
        let android = "Mozilla/5.0 (Linux; Android 14; Pixel 8)";
        let desktop = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
        assert_eq!(InputMode::detect(iphone), InputMode::TouchFar);
        assert_eq!(InputMode::detect(android), InputMode::TouchFar);
        assert_eq!(InputMode::detect(desktop), InputMode::Keyboard);
    }

    #[test]
    fn test_input_mode_names_match_json() {
        for mode in [InputMode::Keyboard, InputMode::TouchFar, InputMode::TouchNear] {
            let json = format!(r#"{{ "input_mode": "{}" }}"#, mode.as_str());
            assert_eq!(Settings::from_json(&json).unwrap().input_mode, Some(mode));
        }
        assert!(Settings::from_json(r#"{ "input_mode": "gamepad" }"#).is_err());
    }

    #[test]
    fn test_far_layout_matches_corner_offsets() {
        let viewport = Viewport::new(1000.0, 800.0);
        let layout = ControlLayout::FAR;
        assert_eq!(layout.center(Direction::Right, viewport), Vec2::new(950.0, 675.0));
        assert_eq!(layout.center(Direction::Left, viewport), Vec2::new(800.0, 675.0));
        assert_eq!(layout.center(Direction::Down, viewport), Vec2::new(875.0, 750.0));
        assert_eq!(layout.center(Direction::Up, viewport), Vec2::new(875.0, 600.0));
    }
}
