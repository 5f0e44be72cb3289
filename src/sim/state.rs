//! Session state and core simulation types
//!
//! One `GameSession` holds everything a run needs. Restarting re-initialises
//! it in place; nothing is freed or persisted.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::settings::{InputMode, Settings, ShipSizing, Viewport};
use crate::tuning::Tuning;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Before the first run
    Title,
    /// Ship under player control
    Flying,
    /// Collision animation playing
    Exploding,
    /// Run ended, waiting for restart
    GameOver,
}

impl LifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleState::Title => "Title",
            LifecycleState::Flying => "Flying",
            LifecycleState::Exploding => "Exploding",
            LifecycleState::GameOver => "GameOver",
        }
    }

    /// Whether the terrain is visible in this state
    pub fn shows_terrain(&self) -> bool {
        matches!(self, LifecycleState::Flying | LifecycleState::Exploding)
    }
}

/// A steering direction (keyboard arrow or touch control)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];
}

/// Held state of the on-screen directional controls
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TouchFlags {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl TouchFlags {
    pub fn set(&mut self, direction: Direction, held: bool) {
        match direction {
            Direction::Left => self.left = held,
            Direction::Right => self.right = held,
            Direction::Up => self.up = held,
            Direction::Down => self.down = held,
        }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        match direction {
            Direction::Left => self.left,
            Direction::Right => self.right,
            Direction::Up => self.up,
            Direction::Down => self.down,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Held directions in a fixed order
    pub fn held(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(move |d| self.is_held(*d))
    }
}

/// Ship size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShipDimensions {
    pub width: f32,
    pub height: f32,
}

impl ShipDimensions {
    pub fn resolve(sizing: ShipSizing, viewport: Viewport) -> Self {
        match sizing {
            ShipSizing::Fixed { width, height } => Self { width, height },
            ShipSizing::ViewportFraction { width, height } => Self {
                width: (viewport.width * width).max(1.0),
                height: (viewport.height * height).max(1.0),
            },
        }
    }

    /// Pixel columns the ship touches, counting a partial last column
    pub fn columns(&self) -> u32 {
        self.width.max(0.0).ceil() as u32
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameSession {
    /// Scroll position in noise space
    pub world_offset: f64,
    /// Scroll speed (noise units per frame)
    pub x_speed: f64,
    /// Vertical speed (pixels per frame, positive is down)
    pub y_speed: f64,
    /// Ship's vertical position from the top of the viewport
    pub ship_y: f64,
    pub ship: ShipDimensions,
    pub state: LifecycleState,
    /// True until the first Start
    pub first_run: bool,
    pub explosion_timer: u32,
    /// Drives colour cycling only
    pub frame_count: u64,
    pub touch: TouchFlags,
    pub viewport: Viewport,
    pub input_mode: InputMode,
    pub tuning: Tuning,
    rng: Pcg32,
}

impl GameSession {
    /// Create a session on the title screen
    pub fn new(settings: &Settings, viewport: Viewport, input_mode: InputMode, seed: u64) -> Self {
        let tuning = settings.tuning.clone();
        let mut rng = Pcg32::seed_from_u64(seed);
        let world_offset = rng.random_range(0.0..tuning.world_offset_range);

        Self {
            world_offset,
            x_speed: tuning.initial_x_speed,
            y_speed: tuning.initial_y_speed,
            ship_y: tuning.start_y,
            ship: ShipDimensions::resolve(settings.ship, viewport),
            state: LifecycleState::Title,
            first_run: true,
            explosion_timer: 0,
            frame_count: 0,
            touch: TouchFlags::default(),
            viewport,
            input_mode,
            tuning,
            rng,
        }
    }

    /// Session with default settings
    pub fn with_defaults(viewport: Viewport, input_mode: InputMode, seed: u64) -> Self {
        Self::new(&Settings::default(), viewport, input_mode, seed)
    }

    /// Draw a fresh starting offset
    pub fn randomize_world_offset(&mut self) {
        self.world_offset = self.rng.random_range(0.0..self.tuning.world_offset_range);
    }

    /// Left edge of the ship, in viewport pixels
    pub fn ship_left(&self) -> f32 {
        self.viewport.middle() - self.ship.width / 2.0
    }

    /// Screen-space y of the ship's lower edge used for collision
    pub fn ship_bottom(&self) -> f64 {
        self.ship_y + self.ship.height as f64 / 2.0
    }

    /// Reset for a new run (Start/Restart)
    pub(crate) fn reset_run(&mut self) {
        self.state = LifecycleState::Flying;
        self.first_run = false;
        self.ship_y = self.tuning.start_y;
        self.x_speed = self.tuning.initial_x_speed;
        self.y_speed = self.tuning.initial_y_speed;
        self.explosion_timer = 0;
        self.randomize_world_offset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(seed: u64) -> GameSession {
        GameSession::with_defaults(Viewport::new(800.0, 600.0), InputMode::Keyboard, seed)
    }

    #[test]
    fn test_new_session_on_title() {
        let s = session(1);
        assert_eq!(s.state, LifecycleState::Title);
        assert!(s.first_run);
        assert_eq!(s.ship_y, 50.0);
        assert_eq!(s.x_speed, 0.02);
        assert_eq!(s.y_speed, 0.0);
        assert_eq!(s.explosion_timer, 0);
        assert!((0.0..10_000.0).contains(&s.world_offset));
    }

    #[test]
    fn test_seed_determines_offset() {
        assert_eq!(session(7).world_offset, session(7).world_offset);
        assert_ne!(session(7).world_offset, session(8).world_offset);
    }

    #[test]
    fn test_ship_sizing() {
        let viewport = Viewport::new(1000.0, 500.0);
        let fixed = ShipDimensions::resolve(ShipSizing::default(), viewport);
        assert_eq!((fixed.width, fixed.height), (50.0, 40.0));

        let scaled = ShipDimensions::resolve(
            ShipSizing::ViewportFraction {
                width: 0.04,
                height: 0.04,
            },
            viewport,
        );
        assert!((scaled.width - 40.0).abs() < 1e-4);
        assert!((scaled.height - 20.0).abs() < 1e-4);
    }

    #[test]
    fn test_fractional_width_counts_partial_column() {
        let ship = ShipDimensions {
            width: 40.5,
            height: 40.0,
        };
        assert_eq!(ship.columns(), 41);
    }

    #[test]
    fn test_ship_geometry() {
        let s = session(1);
        assert_eq!(s.ship_left(), 375.0);
        assert_eq!(s.ship_bottom(), 70.0);
        assert_eq!(s.ship.columns(), 50);
    }

    #[test]
    fn test_touch_flags() {
        let mut flags = TouchFlags::default();
        flags.set(Direction::Up, true);
        flags.set(Direction::Right, true);
        assert!(flags.is_held(Direction::Up));
        assert!(!flags.is_held(Direction::Down));
        assert_eq!(
            flags.held().collect::<Vec<_>>(),
            vec![Direction::Right, Direction::Up]
        );
        flags.clear();
        assert_eq!(flags.held().count(), 0);
    }

    #[test]
    fn test_reset_run() {
        let mut s = session(3);
        s.ship_y = 400.0;
        s.x_speed = 0.0;
        s.explosion_timer = 120;
        s.state = LifecycleState::GameOver;
        s.reset_run();
        assert_eq!(s.state, LifecycleState::Flying);
        assert!(!s.first_run);
        assert_eq!(s.ship_y, 50.0);
        assert_eq!(s.x_speed, 0.02);
        assert_eq!(s.explosion_timer, 0);
    }
}
