use flow_map::{
    data_structures::mesh::{MeshSource, Topology},
    render::{MeshUniform, MeshVertex, indices, primitive_topology, vertices},
};

use crate::common::test_utils::strip_model;

mod common;

#[test]
fn uniform_layout_is_gpu_aligned() {
    assert_eq!(std::mem::size_of::<MeshUniform>(), 96);
    assert_eq!(std::mem::size_of::<MeshVertex>(), 24);
    assert_eq!(MeshVertex::desc().array_stride, 24);
}

#[test]
fn outlines_upload_as_closed_strips() {
    let model = strip_model();
    let outline = model
        .meshes()
        .iter()
        .find(|m| matches!(m.source, MeshSource::CellOutline(_)))
        .unwrap();

    let index_data = indices(&outline.geometry, outline.topology);
    assert_eq!(index_data, vec![0, 1, 2, 3, 0]);
    assert_eq!(vertices(&outline.geometry).len(), 4);
    assert_eq!(primitive_topology(Topology::LineLoop), wgpu::PrimitiveTopology::LineStrip);
}

#[test]
fn triangle_indices_pass_through() {
    let model = strip_model();
    let solid = model.mesh(model.cell_mesh(0).unwrap()).unwrap();
    assert_eq!(indices(&solid.geometry, solid.topology), solid.geometry.indices);
    assert_eq!(vertices(&solid.geometry).len(), solid.geometry.positions.len());
}

#[test]
fn uniforms_follow_material_and_transform() {
    let mut model = strip_model();
    let outline_idx = model
        .meshes()
        .iter()
        .position(|m| matches!(m.source, MeshSource::CellOutline(_)))
        .unwrap();
    let uniform = MeshUniform::new(&model, outline_idx);
    assert_eq!(uniform.color[3], 0.2);
    assert_eq!(uniform.params[1], 1.0);

    let prop_idx = model.marker_mesh(0).unwrap();
    let before = MeshUniform::new(&model, prop_idx);
    assert_eq!(before.params, [15.0, 0.0, 0.0, 0.0]);

    model.set_marker_spin(0, 1.0);
    let after = MeshUniform::new(&model, prop_idx);
    assert_ne!(before.model, after.model);
    // spinning keeps the prop in place
    assert_eq!(before.model[3], after.model[3]);
}
