//! Data-driven game balance
//!
//! Every physics and terrain constant the simulation uses. Values can be
//! overridden from the JSON configuration; omitted fields keep the defaults.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    /// Viewport pixels per noise unit (horizontal terrain feature scale)
    pub zoom: f64,

    /// Horizontal speed limit (noise units per frame)
    pub x_max_speed: f64,
    /// Vertical speed limit (pixels per frame)
    pub y_max_speed: f64,
    /// Horizontal speed change per nudge
    pub x_nudge: f64,
    /// Vertical speed change per nudge
    pub y_nudge: f64,
    /// Horizontal speed at session start and restart
    pub initial_x_speed: f64,
    /// Vertical speed at session start and restart
    pub initial_y_speed: f64,

    /// Ship vertical position at session start and restart
    pub start_y: f64,
    /// Lowest allowed ship vertical position (pixels from the top)
    pub floor_y: f64,

    /// Explosion timer increment per frame
    pub explosion_step: u32,
    /// Explosion circles are drawn while the timer is below this
    pub explosion_visible: u32,
    /// Timer value that ends the explosion
    pub explosion_duration: u32,

    /// World offsets are drawn uniformly from `[0, world_offset_range)`
    pub world_offset_range: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            zoom: 300.0,

            x_max_speed: 1.0,
            y_max_speed: 10.0,
            x_nudge: 0.005,
            y_nudge: 1.0,
            initial_x_speed: 0.02,
            initial_y_speed: 0.0,

            start_y: 50.0,
            floor_y: 20.0,

            explosion_step: 5,
            explosion_visible: 50,
            explosion_duration: 150,

            world_offset_range: 10_000.0,
        }
    }
}

impl Tuning {
    /// Names of fields whose values would break the simulation
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut bad = Vec::new();
        if !(self.zoom > 0.0) {
            bad.push("zoom");
        }
        if !(self.x_max_speed > 0.0) {
            bad.push("x_max_speed");
        }
        if !(self.y_max_speed > 0.0) {
            bad.push("y_max_speed");
        }
        if !(self.x_nudge >= 0.0) {
            bad.push("x_nudge");
        }
        if !(self.y_nudge >= 0.0) {
            bad.push("y_nudge");
        }
        if self.initial_x_speed.abs() > self.x_max_speed {
            bad.push("initial_x_speed");
        }
        if self.initial_y_speed.abs() > self.y_max_speed {
            bad.push("initial_y_speed");
        }
        if self.start_y < self.floor_y {
            bad.push("start_y");
        }
        if self.explosion_step == 0 {
            bad.push("explosion_step");
        }
        if !(self.world_offset_range > 0.0) {
            bad.push("world_offset_range");
        }
        bad
    }
}
