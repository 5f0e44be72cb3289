//! Terrain bands
//!
//! Each pixel column gets a ground height from the noise field plus three
//! thresholds (waterline, rockline, snowline). Bands are vertical strokes from
//! the ground point to each threshold the ground crosses; grass always runs
//! from the ground to the bottom of the viewport.

use glam::Vec2;

use super::draw::{DrawList, palette};
use super::noise::HeightField;
use crate::settings::Viewport;

/// Noise coordinate the snowline's nested lookup is seeded at
const SNOW_SEED: f64 = 1000.0;

/// Noise coordinate for a viewport column at the given scroll offset
#[inline]
pub fn world_x(world_offset: f64, column: f64, zoom: f64) -> f64 {
    world_offset + column / zoom
}

/// Ground surface y (0 = top of the viewport) at a noise coordinate
#[inline]
pub fn ground_y<F: HeightField + ?Sized>(field: &F, x: f64, viewport_height: f64) -> f64 {
    viewport_height - field.height_at(x) * viewport_height
}

/// Boundaries of one terrain column, in screen y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TerrainColumn {
    pub ground: f64,
    pub waterline: f64,
    pub rockline: f64,
    pub snowline: f64,
}

impl TerrainColumn {
    /// Sample the column at noise coordinate `x`
    pub fn sample<F: HeightField + ?Sized>(field: &F, x: f64, viewport_height: f64, zoom: f64) -> Self {
        let quarter = viewport_height / 4.0;
        let n = field.height_at(x);
        let ground = viewport_height - n * viewport_height;

        let snow_x = SNOW_SEED + n * (quarter / 2.0) / (zoom / 10.0);
        let snowline = quarter + quarter / 4.0 + field.height_at(snow_x) * quarter;

        Self {
            ground,
            waterline: quarter * 3.0,
            rockline: quarter * 2.0 + n * quarter,
            snowline,
        }
    }

    /// Ground sits below the waterline (flooded valley)
    pub fn is_flooded(&self) -> bool {
        self.ground > self.waterline
    }

    pub fn is_rocky(&self) -> bool {
        self.ground < self.rockline
    }

    pub fn is_snowy(&self) -> bool {
        self.ground < self.snowline
    }

    /// Emit this column's strokes at screen x `column`
    pub fn draw(&self, list: &mut DrawList, column: f32, viewport_height: f32) {
        let x = column;
        let ground = Vec2::new(x, self.ground as f32);

        list.line(ground, Vec2::new(x, viewport_height), palette::GRASS);

        if self.is_flooded() {
            list.line(ground, Vec2::new(x, self.waterline as f32), palette::WATER);
        }
        if self.is_rocky() {
            list.line(ground, Vec2::new(x, self.rockline as f32), palette::ROCK);
        }
        if self.is_snowy() {
            list.line(ground, Vec2::new(x, self.snowline as f32), palette::SNOW);
        }
    }
}

/// Emit the whole landscape, one column per viewport pixel
pub fn draw_terrain<F: HeightField + ?Sized>(
    list: &mut DrawList,
    field: &F,
    world_offset: f64,
    viewport: Viewport,
    zoom: f64,
) {
    let height = viewport.height as f64;
    for i in 0..viewport.columns() {
        let x = world_x(world_offset, i as f64, zoom);
        TerrainColumn::sample(field, x, height, zoom).draw(list, i as f32, viewport.height);
    }
}
