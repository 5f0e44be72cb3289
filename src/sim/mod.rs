//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One step per animation frame
//! - Seeded RNG only (world offset draws)
//! - Noise field with no hidden state
//! - No rendering or platform dependencies: steps emit a `DrawList`

pub mod collision;
pub mod draw;
pub mod noise;
pub mod scene;
pub mod state;
pub mod terrain;
pub mod tick;

pub use collision::{CollisionResult, clearance, ship_terrain_collision};
pub use draw::{Color, DrawCommand, DrawList};
pub use noise::{HeightField, PerlinNoise};
pub use state::{Direction, GameSession, LifecycleState, ShipDimensions, TouchFlags};
pub use terrain::{TerrainColumn, draw_terrain, ground_y, world_x};
pub use tick::{Action, FrameInput, apply_action, step};
