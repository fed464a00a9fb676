use flow_map::{
    PhysicalPosition, PhysicalSize, Point3, Vector2, Vector3,
    camera::Camera,
    config::TerrainConfig,
    data_structures::{color::Color, terrain::TerrainModel},
    flow::{MapFlow, pointer_to_ndc},
    geometry::marker::PropShape,
    pick::{HoverState, PickTarget, PickingController, Ray, Transition, raycast},
};
use instant::Duration;

use crate::common::test_utils::{seeded_config, strip_map, strip_model};

mod common;

fn highlight() -> Color {
    TerrainConfig::default().highlight_color
}

fn marker_color(model: &TerrainModel, marker: usize) -> Color {
    model.mesh_color(model.marker_mesh(marker).unwrap())
}

/// Straight-down camera 5 units above the given marker's prop, slightly off its axis so
/// the center ray does not graze the apex.
fn camera_above_marker(model: &TerrainModel, marker: usize) -> Camera {
    let idx = model.marker_mesh(marker).unwrap();
    let prop = model.world_transform(idx).transform_point(Point3::new(0.0, 0.0, 0.0));
    let target = Point3::new(prop.x + 0.05, prop.y, prop.z + 0.03);
    Camera {
        eye: Point3::new(target.x, target.y + 5.0, target.z),
        target,
        up: Vector3::unit_z(),
        aspect: 1.0,
        ..Camera::default()
    }
}

#[test]
fn only_the_latest_target_stays_highlighted() {
    let mut model = strip_model();
    let originals: Vec<Color> = (0..3).map(|m| marker_color(&model, m)).collect();
    let mut picker = PickingController::new(highlight());

    assert_eq!(picker.update(Some(PickTarget::Marker(0)), &mut model), Transition::Entered);
    assert_eq!(picker.update(Some(PickTarget::Marker(1)), &mut model), Transition::Switched);
    assert_eq!(picker.update(Some(PickTarget::Marker(2)), &mut model), Transition::Switched);

    assert_eq!(marker_color(&model, 0), originals[0]);
    assert_eq!(marker_color(&model, 1), originals[1]);
    assert_eq!(marker_color(&model, 2), highlight());
    let highlighted = (0..model.meshes().len())
        .filter(|&idx| model.mesh_color(idx) == highlight())
        .count();
    assert_eq!(highlighted, 1);
    assert_eq!(picker.hovered(), Some(PickTarget::Marker(2)));
}

#[test]
fn hovering_the_same_target_changes_nothing() {
    let mut model = strip_model();
    let mut picker = PickingController::new(highlight());
    picker.update(Some(PickTarget::Marker(1)), &mut model);
    let state = *picker.state();

    assert_eq!(picker.update(Some(PickTarget::Marker(1)), &mut model), Transition::Unchanged);
    assert_eq!(*picker.state(), state);
    assert_eq!(marker_color(&model, 1), highlight());
}

#[test]
fn leaving_restores_the_cached_color_and_clears_the_text() {
    let mut model = strip_model();
    let original = marker_color(&model, 0);
    let mut picker = PickingController::new(highlight());

    assert_eq!(picker.update(None, &mut model), Transition::Unchanged);
    picker.update(Some(PickTarget::Marker(0)), &mut model);
    assert_eq!(picker.info_text(), "Ashford Ashford legend");
    assert_eq!(
        *picker.state(),
        HoverState::Hovering {
            target: PickTarget::Marker(0),
            mesh: model.marker_mesh(0).unwrap(),
            original,
        }
    );

    assert_eq!(picker.update(None, &mut model), Transition::Cleared);
    assert_eq!(*picker.state(), HoverState::Idle);
    assert_eq!(picker.info_text(), "");
    assert_eq!(marker_color(&model, 0), original);
    assert_eq!(original, PropShape::of(flow_map::data_structures::map::MarkerCategory::City).color);
}

#[test]
fn cells_describe_their_id_and_scene_height() {
    let config = TerrainConfig {
        pick_cells: true,
        ..seeded_config()
    };
    let mut model = TerrainModel::build(strip_map(), config).unwrap();
    let jittered = model.mesh_color(model.cell_mesh(1).unwrap());
    let mut picker = PickingController::new(highlight());

    picker.update(Some(PickTarget::Cell(1)), &mut model);
    let expected = format!("Target cell: 2 height: {}", model.config().scene_depth(10.0));
    assert_eq!(picker.info_text(), expected);

    // switching to a marker puts the jittered cell color back untouched
    assert_eq!(picker.update(Some(PickTarget::Marker(2)), &mut model), Transition::Switched);
    assert_eq!(model.mesh_color(model.cell_mesh(1).unwrap()), jittered);
    assert_eq!(picker.info_text(), "Highmarch Highmarch legend");
}

#[test]
fn ray_through_the_screen_center_finds_the_marker_below() {
    let mut model = strip_model();
    let camera = camera_above_marker(&model, 0);
    let ray = Ray::from_ndc(Vector2::new(0.0, 0.0), &camera.view_proj()).unwrap();

    let hit = raycast(&model, &ray).expect("marker is under the cursor");
    assert_eq!(hit.mesh, model.marker_mesh(0).unwrap());
    assert!(hit.distance > 0.0 && hit.distance < 5.0);

    let mut picker = PickingController::new(highlight());
    assert_eq!(picker.pick(Some(&ray), &mut model), Transition::Entered);
    assert_eq!(picker.hovered(), Some(PickTarget::Marker(0)));

    let off = Ray::from_ndc(Vector2::new(0.99, 0.99), &camera.view_proj()).unwrap();
    assert_eq!(picker.pick(Some(&off), &mut model), Transition::Cleared);
    assert_eq!(picker.pick(None, &mut model), Transition::Unchanged);
}

#[test]
fn flow_picks_and_spins_the_marker_under_the_pointer() {
    common::test_utils::init_logger();
    let mut flow = MapFlow::new(strip_map(), seeded_config(), PhysicalSize::new(800, 800)).unwrap();
    let view_proj = camera_above_marker(flow.model(), 0).view_proj();

    flow.set_pointer(Some(Vector2::new(0.0, 0.0)));
    let transition = flow.on_update(&view_proj, Duration::from_millis(500));
    assert_eq!(transition, Transition::Entered);
    assert_eq!(flow.info_text(), "Ashford Ashford legend");
    let spin = flow.model().marker_spin(0).unwrap();
    assert!((spin - std::f32::consts::FRAC_PI_2).abs() < 1e-5);

    assert_eq!(flow.on_update(&view_proj, Duration::from_millis(500)), Transition::Unchanged);

    flow.set_pointer(None);
    assert_eq!(flow.on_update(&view_proj, Duration::from_millis(500)), Transition::Cleared);
    assert_eq!(flow.info_text(), "");
    let resting = flow.model().marker_spin(0).unwrap();
    assert!((resting - std::f32::consts::PI).abs() < 1e-5);
}

#[test]
fn pointer_maps_to_normalized_device_coordinates() {
    let size = PhysicalSize::new(800, 600);
    assert_eq!(
        pointer_to_ndc(PhysicalPosition::new(400.0, 300.0), size),
        Some(Vector2::new(0.0, 0.0))
    );
    assert_eq!(
        pointer_to_ndc(PhysicalPosition::new(0.0, 0.0), size),
        Some(Vector2::new(-1.0, 1.0))
    );
    assert_eq!(
        pointer_to_ndc(PhysicalPosition::new(800.0, 600.0), size),
        Some(Vector2::new(1.0, -1.0))
    );
    assert_eq!(pointer_to_ndc(PhysicalPosition::new(1.0, 1.0), PhysicalSize::new(0, 600)), None);
}
