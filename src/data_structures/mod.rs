//! Scene data: decoded map features and everything generated from them.
//!
//! - `map` holds the input cells, rivers and markers plus the cell id index
//! - `color` is the RGB color type with gradient and jitter helpers
//! - `instance` holds translation/rotation/scale transforms
//! - `mesh` contains renderer-agnostic mesh descriptors, materials and pick layers
//! - `terrain` is the aggregate owning every generated mesh and the global transform

pub mod color;
pub mod instance;
pub mod map;
pub mod mesh;
pub mod terrain;
