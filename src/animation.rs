//! Spins the hovered marker.

use std::f32::consts::TAU;

use instant::Duration;

use crate::{
    data_structures::terrain::TerrainModel,
    pick::{HoverState, PickTarget},
};

#[derive(Clone, Copy, Debug)]
pub struct AnimationTicker {
    radians_per_second: f32,
}

impl AnimationTicker {
    pub fn new(revolutions_per_second: f32) -> Self {
        Self {
            radians_per_second: revolutions_per_second * TAU,
        }
    }

    /**
     * Advances the spin of the hovered marker by `dt` and returns its new angle in
     * `[0, 2π)`. Only the single marker in the hover slot moves; hovered cells and an
     * idle slot leave everything untouched.
     */
    pub fn tick(&self, dt: Duration, hover: &HoverState, model: &mut TerrainModel) -> Option<f32> {
        let Some(PickTarget::Marker(marker)) = hover.target() else {
            return None;
        };
        let angle = model.marker_spin(marker)?;
        let mut next = (angle + self.radians_per_second * dt.as_secs_f32()).rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU
        if next >= TAU {
            next = 0.0;
        }
        model.set_marker_spin(marker, next);
        Some(next)
    }
}
