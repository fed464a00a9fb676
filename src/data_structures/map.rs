//! Decoded map features: terrain cells, rivers threaded through cells, and markers.
//!
//! These are consumed as-is; reading them out of a file format happens elsewhere.

use std::{collections::HashMap, fmt, str::FromStr};

use cgmath::Vector2;
use serde::{Deserialize, Serialize};

use crate::error::DataError;

pub type CellId = u32;

/// A polygonal terrain region with an elevation. Negative heights are underwater.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub id: CellId,
    /// Boundary ring. May or may not repeat the first point at the end.
    pub ring: Vec<[f32; 2]>,
    pub height: f32,
}

impl Cell {
    pub fn new(id: CellId, ring: Vec<[f32; 2]>, height: f32) -> Self {
        Self { id, ring, height }
    }

    /// The ring without the duplicated closing point, if there is one.
    pub fn open_ring(&self) -> &[[f32; 2]] {
        match (self.ring.first(), self.ring.last()) {
            (Some(first), Some(last)) if self.ring.len() > 1 && first == last => {
                &self.ring[..self.ring.len() - 1]
            }
            _ => &self.ring,
        }
    }

    /// Mean of the ring vertices, excluding the closing duplicate.
    pub fn centroid(&self) -> Vector2<f32> {
        let points = self.open_ring();
        if points.is_empty() {
            return Vector2::new(0.0, 0.0);
        }
        let sum = points
            .iter()
            .fold(Vector2::new(0.0, 0.0), |acc, p| acc + Vector2::from(*p));
        sum / points.len() as f32
    }
}

/// A river given as the ordered cells it flows through.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct River {
    pub cells: Vec<CellId>,
    /// End width relative to the start width.
    pub width_factor: f32,
}

/// The closed set of marker categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MarkerCategory {
    City,
    Military,
    Capital,
}

impl MarkerCategory {
    pub const ALL: [MarkerCategory; 3] = [
        MarkerCategory::City,
        MarkerCategory::Military,
        MarkerCategory::Capital,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            MarkerCategory::City => "City",
            MarkerCategory::Military => "Military",
            MarkerCategory::Capital => "Capital",
        }
    }
}

impl fmt::Display for MarkerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error for a category string outside [`MarkerCategory`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownCategory(pub String);

impl FromStr for MarkerCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MarkerCategory::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// A point of interest attached to a cell. The category is kept as decoded and is
/// resolved against [`MarkerCategory`] by [`MapData::new`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub category: String,
    pub cell: CellId,
    pub position: [f32; 2],
    pub name: String,
    pub legend: String,
}

impl Marker {
    pub fn resolve_category(&self, index: usize) -> Result<MarkerCategory, DataError> {
        self.category
            .parse()
            .map_err(|UnknownCategory(category)| DataError::UnknownCategory {
                marker: index,
                category,
            })
    }
}

/**
 * The three decoded feature collections plus an id index over the cells.
 *
 * Validated once in [`MapData::new`] and read-only afterwards: every ring has at least
 * three distinct points, cell ids are unique and every marker category is resolved.
 */
#[derive(Clone, Debug, Default)]
pub struct MapData {
    cells: Vec<Cell>,
    rivers: Vec<River>,
    markers: Vec<Marker>,
    categories: Vec<MarkerCategory>,
    by_id: HashMap<CellId, usize>,
}

impl MapData {
    pub fn new(cells: Vec<Cell>, rivers: Vec<River>, markers: Vec<Marker>) -> Result<Self, DataError> {
        let mut by_id = HashMap::with_capacity(cells.len());
        for (idx, cell) in cells.iter().enumerate() {
            let points = distinct_points(cell.open_ring());
            if points < 3 {
                return Err(DataError::DegenerateRing {
                    cell: cell.id,
                    points,
                });
            }
            if by_id.insert(cell.id, idx).is_some() {
                return Err(DataError::DuplicateCell { cell: cell.id });
            }
        }
        let categories = markers
            .iter()
            .enumerate()
            .map(|(idx, marker)| marker.resolve_category(idx))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            cells,
            rivers,
            markers,
            categories,
            by_id,
        })
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rivers(&self) -> &[River] {
        &self.rivers
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Resolved category of the marker at `idx`.
    pub fn marker_category(&self, idx: usize) -> Option<MarkerCategory> {
        self.categories.get(idx).copied()
    }

    pub fn cell_index(&self, id: CellId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub fn cell_by_id(&self, id: CellId) -> Option<&Cell> {
        self.cell_index(id).and_then(|idx| self.cells.get(idx))
    }
}

fn distinct_points(ring: &[[f32; 2]]) -> usize {
    let mut seen: Vec<Vector2<f32>> = Vec::with_capacity(ring.len());
    for p in ring {
        let p = Vector2::from(*p);
        if !seen.contains(&p) {
            seen.push(p);
        }
    }
    seen.len()
}
