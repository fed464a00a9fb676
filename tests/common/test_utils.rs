#![allow(dead_code)]

use flow_map::{
    config::TerrainConfig,
    data_structures::{
        map::{Cell, CellId, MapData, Marker, River},
        terrain::TerrainModel,
    },
};

pub const WATER: usize = 0;
pub const VALLEY: usize = 1;
pub const PEAK: usize = 2;

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Closed square ring with its lower-left corner at `(x, y)`.
pub fn square(x: f32, y: f32, size: f32) -> Vec<[f32; 2]> {
    vec![
        [x, y],
        [x + size, y],
        [x + size, y + size],
        [x, y + size],
        [x, y],
    ]
}

pub fn cell(id: CellId, x: f32, y: f32, height: f32) -> Cell {
    Cell::new(id, square(x, y, 1.0), height)
}

pub fn marker(category: &str, cell: CellId, position: [f32; 2], name: &str) -> Marker {
    Marker {
        category: category.to_string(),
        cell,
        position,
        name: name.to_string(),
        legend: format!("{} legend", name),
    }
}

/// Three unit cells in a row with heights -5, 10 and 4000.
pub fn strip_cells() -> Vec<Cell> {
    vec![
        cell(1, 0.0, 0.0, -5.0),
        cell(2, 1.0, 0.0, 10.0),
        cell(3, 2.0, 0.0, 4000.0),
    ]
}

pub fn strip_markers() -> Vec<Marker> {
    vec![
        marker("City", 2, [1.5, 0.5], "Ashford"),
        marker("Military", 3, [2.5, 0.5], "Fort Dusk"),
        marker("Capital", 1, [0.5, 0.5], "Highmarch"),
    ]
}

pub fn strip_map() -> MapData {
    MapData::new(
        strip_cells(),
        vec![River {
            cells: vec![1, 2, 3],
            width_factor: 3.0,
        }],
        strip_markers(),
    )
    .expect("strip map is valid")
}

pub fn seeded_config() -> TerrainConfig {
    TerrainConfig {
        seed: Some(42),
        ..TerrainConfig::default()
    }
}

pub fn strip_model() -> TerrainModel {
    init_logger();
    TerrainModel::build(strip_map(), seeded_config()).expect("strip model builds")
}
