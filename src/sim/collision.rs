//! Ship/terrain collision
//!
//! The ship is tested one pixel column at a time across its silhouette. Each
//! column samples the ground exactly as the terrain renderer does, so what the
//! player sees touching is what collides.

use super::noise::HeightField;
use super::state::GameSession;
use super::terrain::{ground_y, world_x};

/// Result of a collision check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether any silhouette column touched the ground
    pub hit: bool,
    /// First touching column, as an offset from the ship's left edge
    pub column: Option<u32>,
    /// Highest ground point under the silhouette (smallest screen y)
    pub highest_ground: f64,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            column: None,
            highest_ground: f64::INFINITY,
        }
    }
}

/// Check the ship's silhouette against the terrain
///
/// Column `i` of the silhouette sits at screen x `ship_left + i`. A column
/// collides when the ground there is above the ship's lower edge
/// (`ship_y + height / 2`).
pub fn ship_terrain_collision<F: HeightField + ?Sized>(
    session: &GameSession,
    field: &F,
) -> CollisionResult {
    let zoom = session.tuning.zoom;
    let height = session.viewport.height as f64;
    let left = session.ship_left() as f64;
    let bottom = session.ship_bottom();

    let mut result = CollisionResult::miss();
    for i in 0..session.ship.columns() {
        let x = world_x(session.world_offset, left + i as f64, zoom);
        let ground = ground_y(field, x, height);
        result.highest_ground = result.highest_ground.min(ground);
        if ground < bottom && !result.hit {
            result.hit = true;
            result.column = Some(i);
        }
    }
    result
}

/// Clearance between the ship's lower edge and the terrain beneath it
///
/// Negative when the ship is in contact.
pub fn clearance<F: HeightField + ?Sized>(session: &GameSession, field: &F) -> f64 {
    ship_terrain_collision(session, field).highest_ground - session.ship_bottom()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{InputMode, Settings, ShipSizing, Viewport};

    const HEIGHT: f32 = 600.0;

    fn session() -> GameSession {
        GameSession::with_defaults(Viewport::new(800.0, HEIGHT), InputMode::Keyboard, 42)
    }

    /// Constant field whose ground sits at the given screen y
    fn ground_at(y: f64) -> impl Fn(f64) -> f64 {
        let h = HEIGHT as f64;
        move |_x| (h - y) / h
    }

    #[test]
    fn test_ground_just_above_ship_bottom_hits() {
        let s = session();
        let field = ground_at(s.ship_bottom() - 1.0);
        let result = ship_terrain_collision(&s, &field);
        assert!(result.hit);
        assert_eq!(result.column, Some(0));
    }

    #[test]
    fn test_ground_just_below_ship_bottom_misses() {
        let s = session();
        let field = ground_at(s.ship_bottom() + 1.0);
        assert!(!ship_terrain_collision(&s, &field).hit);
    }

    #[test]
    fn test_ground_exactly_at_ship_bottom_misses() {
        let mut s = session();
        // Ship bottom at 450; a 0.25 field puts the ground at exactly 450
        s.ship_y = 430.0;
        assert_eq!(s.ship_bottom(), 450.0);
        let field = |_x: f64| 0.25;
        assert_eq!(ground_y(&field, 0.0, HEIGHT as f64), 450.0);
        assert!(!ship_terrain_collision(&s, &field).hit);

        s.ship_y = 430.5;
        assert!(ship_terrain_collision(&s, &field).hit);
    }

    #[test]
    fn test_low_ground_misses() {
        let s = session();
        let field = ground_at(500.0);
        let result = ship_terrain_collision(&s, &field);
        assert!(!result.hit);
        assert!((result.highest_ground - 500.0).abs() < 1e-9);
        assert!((clearance(&s, &field) - 430.0).abs() < 1e-9);
    }

    #[test]
    fn test_single_peak_inside_silhouette_hits() {
        let s = session();
        let zoom = s.tuning.zoom;
        // Peak under the 10th silhouette column only
        let peak_x = world_x(s.world_offset, s.ship_left() as f64 + 10.0, zoom);
        let half_px = 0.5 / zoom;
        let field = move |x: f64| if (x - peak_x).abs() < half_px { 0.99 } else { 0.0 };
        let result = ship_terrain_collision(&s, &field);
        assert!(result.hit);
        assert_eq!(result.column, Some(10));
    }

    #[test]
    fn test_peak_under_partial_last_column_hits() {
        let settings = Settings {
            ship: ShipSizing::ViewportFraction {
                width: 0.0405,
                height: 0.04,
            },
            ..Settings::default()
        };
        let s = GameSession::new(&settings, Viewport::new(1000.0, HEIGHT), InputMode::Keyboard, 42);
        assert!((s.ship.width - 40.5).abs() < 1e-4);

        let zoom = s.tuning.zoom;
        let peak_x = world_x(s.world_offset, s.ship_left() as f64 + 40.0, zoom);
        let half_px = 0.5 / zoom;
        let field = move |x: f64| if (x - peak_x).abs() < half_px { 0.99 } else { 0.0 };
        let result = ship_terrain_collision(&s, &field);
        assert!(result.hit);
        assert_eq!(result.column, Some(40));
    }

    #[test]
    fn test_peak_outside_silhouette_misses() {
        let s = session();
        let zoom = s.tuning.zoom;
        let peak_x = world_x(s.world_offset, s.ship_left() as f64 + 60.0, zoom);
        let half_px = 0.5 / zoom;
        let field = move |x: f64| if (x - peak_x).abs() < half_px { 0.99 } else { 0.0 };
        assert!(!ship_terrain_collision(&s, &field).hit);
    }

    #[test]
    fn test_lower_ship_collides_sooner() {
        let mut s = session();
        let field = ground_at(200.0);
        assert!(!ship_terrain_collision(&s, &field).hit);
        s.ship_y = 181.0;
        assert!(ship_terrain_collision(&s, &field).hit);
    }
}
