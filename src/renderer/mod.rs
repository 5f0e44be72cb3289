//! WebGPU rendering module
//!
//! Draw lists from the simulation are tessellated into flat-coloured
//! triangles and drawn in a single pass. Text commands are left to the host.

pub mod color;
pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
