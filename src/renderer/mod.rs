//! WebGPU rendering module
//!
//! `scene` builds plain coloured triangles from the game state; `pipeline`
//! owns the GPU side and letterboxes the play area onto the canvas.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;
