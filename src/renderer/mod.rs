//! WebGPU rendering module
//!
//! `scene` builds a screen-space triangle list from the simulation state;
//! `pipeline` maps it to NDC and draws it with a flat-color shader.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use vertex::Vertex;
