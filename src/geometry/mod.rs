//! Geometry synthesis. Each builder runs once, synchronously, while the
//! [`TerrainModel`](crate::data_structures::terrain::TerrainModel) is constructed.
//!
//! - `terrain` extrudes cells into colored solids with outlines
//! - `river` threads ribbons through cell centroids
//! - `marker` places category props and stems above the terrain
//! - `primitives` holds the shared shape generators

pub mod marker;
pub mod primitives;
pub mod river;
pub mod terrain;
