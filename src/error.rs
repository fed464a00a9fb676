//! Error types for terrain construction.
//!
//! [`DataError`] is fatal: it aborts [`TerrainModel`](crate::data_structures::terrain::TerrainModel)
//! construction and always names the offending feature. [`GeometryError`] is local and
//! non-fatal: the affected piece of geometry is skipped, logged and recorded on the model.

use thiserror::Error;

use crate::data_structures::map::CellId;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataError {
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("cell {cell} has a degenerate ring with {points} distinct points (at least 3 required)")]
    DegenerateRing { cell: CellId, points: usize },

    #[error("cell {cell} has a ring that cannot be triangulated (zero area or self-intersecting)")]
    UntriangulableRing { cell: CellId },

    #[error("cell id {cell} is defined more than once")]
    DuplicateCell { cell: CellId },

    #[error("river {river} references unknown cell {cell}")]
    UnknownRiverCell { river: usize, cell: CellId },

    #[error("river {river} has width factor {width_factor} (must be a positive finite number)")]
    InvalidRiver { river: usize, width_factor: f32 },

    #[error("marker {marker} references unknown cell {cell}")]
    UnknownMarkerCell { marker: usize, cell: CellId },

    #[error("marker {marker} has unrecognized category {category:?}")]
    UnknownCategory { marker: usize, category: String },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Both ends of a river segment resolve to the same centroid.
    #[error("river {river} segment {segment} has zero length and was skipped")]
    ZeroLengthSegment { river: usize, segment: usize },
}
