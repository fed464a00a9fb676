//! flow-map
//!
//! Turns decoded vector map data (elevation cells, rivers threaded through the cells
//! and categorized markers) into a procedurally generated 3D scene, and resolves the
//! pointer to at most one highlighted entity per frame.
//!
//! High-level modules
//! - `config`: per-dataset constants (heights, colors, jitter, sizes)
//! - `data_structures`: map features, meshes and the `TerrainModel` aggregate
//! - `geometry`: the cell, river and marker mesh builders
//! - `camera`: view-projection for rendering and picking
//! - `pick`: ray casting and the hover state machine
//! - `animation`: spin of the hovered marker
//! - `render`: wgpu buffers for the generated meshes
//! - `flow`: per-frame driver tying pointer input, picking and animation together
//!

pub mod animation;
pub mod camera;
pub mod config;
pub mod data_structures;
pub mod error;
pub mod flow;
pub mod geometry;
pub mod pick;
pub mod render;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use winit::dpi::{PhysicalPosition, PhysicalSize};
pub use winit::event::WindowEvent;
