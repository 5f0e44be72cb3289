//! Poor Man's Sky - an endless side-scrolling flight over noise terrain
//!
//! Core modules:
//! - `sim`: Deterministic simulation (noise, terrain, physics, state machine)
//! - `renderer`: WebGPU rendering of draw lists
//! - `platform`: Key and touch mapping onto simulation actions
//! - `settings`: Startup configuration (input mode, viewport, ship size)
//! - `tuning`: Data-driven physics and terrain constants

pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use settings::{InputMode, Settings, SettingsError, Viewport};
pub use sim::{FrameInput, GameSession, LifecycleState, PerlinNoise, step};
pub use tuning::Tuning;
