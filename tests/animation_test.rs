use std::f32::consts::{PI, TAU};

use flow_map::{
    Quaternion, Rad, Rotation3,
    animation::AnimationTicker,
    data_structures::color::Color,
    pick::{HoverState, PickTarget},
};
use instant::Duration;

use crate::common::test_utils::strip_model;

mod common;

fn hovering_marker(model: &flow_map::data_structures::terrain::TerrainModel, marker: usize) -> HoverState {
    HoverState::Hovering {
        target: PickTarget::Marker(marker),
        mesh: model.marker_mesh(marker).unwrap(),
        original: Color::BLACK,
    }
}

#[test]
fn hovered_marker_turns_at_the_configured_rate() {
    let mut model = strip_model();
    let ticker = AnimationTicker::new(0.5);
    let hover = hovering_marker(&model, 1);

    assert_eq!(ticker.tick(Duration::from_secs(1), &hover, &mut model), Some(PI));
    assert_eq!(model.marker_spin(1), Some(PI));
    assert_eq!(model.marker_spin(0), Some(0.0));

    let prop = model.mesh(model.marker_mesh(1).unwrap()).unwrap();
    assert_eq!(prop.local.rotation, Quaternion::from_angle_z(Rad(PI)));
}

#[test]
fn angle_wraps_into_one_turn() {
    let mut model = strip_model();
    let ticker = AnimationTicker::new(0.5);
    let hover = hovering_marker(&model, 0);

    let mut last = 0.0;
    for _ in 0..50 {
        last = ticker
            .tick(Duration::from_millis(170), &hover, &mut model)
            .unwrap();
        assert!((0.0..TAU).contains(&last), "angle {last} outside one turn");
    }
    // 50 * 0.17s at half a turn per second is 4.25 turns
    assert!((last - 0.25 * TAU).abs() < 1e-3, "angle {last}");

    let full = ticker.tick(Duration::from_secs(2), &hover, &mut model).unwrap();
    assert!((full - last).abs() < 1e-3);
}

#[test]
fn idle_and_hovered_cells_do_not_spin() {
    let mut model = strip_model();
    let ticker = AnimationTicker::new(0.5);

    assert_eq!(ticker.tick(Duration::from_secs(1), &HoverState::Idle, &mut model), None);
    let cell_hover = HoverState::Hovering {
        target: PickTarget::Cell(0),
        mesh: model.cell_mesh(0).unwrap(),
        original: Color::BLACK,
    };
    assert_eq!(ticker.tick(Duration::from_secs(1), &cell_hover, &mut model), None);
    assert!((0..3).all(|m| model.marker_spin(m) == Some(0.0)));
}

#[test]
fn zero_elapsed_time_keeps_the_angle() {
    let mut model = strip_model();
    let ticker = AnimationTicker::new(0.5);
    let hover = hovering_marker(&model, 2);
    ticker.tick(Duration::from_millis(250), &hover, &mut model);
    let before = model.marker_spin(2).unwrap();
    assert_eq!(ticker.tick(Duration::ZERO, &hover, &mut model), Some(before));
}
