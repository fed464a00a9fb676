//! Per-frame driver.
//!
//! [`MapFlow`] owns the generated [`TerrainModel`] together with the hover state machine
//! and the animation ticker, and wires them to the host application's loop:
//!
//! 1. `on_window_events()` tracks the cursor and the surface size (winit events)
//! 2. `on_update()` runs once per frame: pointer → ray → picking, then animation
//! 3. the renderer reads `model()` and `info_text()` (see [`crate::render`])
//!
//! Everything runs on the render thread; there is no internal parallelism.

use cgmath::{Matrix4, Vector2};
use instant::{Duration, Instant};
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    event::WindowEvent,
};

use crate::{
    animation::AnimationTicker,
    config::TerrainConfig,
    data_structures::{map::MapData, terrain::TerrainModel},
    error::DataError,
    pick::{PickingController, Ray, Transition},
};

/// Cursor position in physical pixels to normalized device coordinates, y up.
/// `None` for an empty surface.
pub fn pointer_to_ndc(position: PhysicalPosition<f64>, size: PhysicalSize<u32>) -> Option<Vector2<f32>> {
    if size.width == 0 || size.height == 0 {
        return None;
    }
    Some(Vector2::new(
        (position.x / f64::from(size.width) * 2.0 - 1.0) as f32,
        (-(position.y / f64::from(size.height)) * 2.0 + 1.0) as f32,
    ))
}

#[derive(Debug)]
pub struct MapFlow {
    model: TerrainModel,
    picker: PickingController,
    ticker: AnimationTicker,
    pointer: Option<Vector2<f32>>,
    surface: PhysicalSize<u32>,
    last_frame: Option<Instant>,
}

impl MapFlow {
    /// Builds the whole scene up front; nothing is generated lazily afterwards.
    pub fn new(map: MapData, config: TerrainConfig, surface: PhysicalSize<u32>) -> Result<Self, DataError> {
        let picker = PickingController::new(config.highlight_color);
        let ticker = AnimationTicker::new(config.marker_spin_rps);
        let model = TerrainModel::build(map, config)?;
        Ok(Self {
            model,
            picker,
            ticker,
            pointer: None,
            surface,
            last_frame: None,
        })
    }

    pub fn model(&self) -> &TerrainModel {
        &self.model
    }

    pub fn picker(&self) -> &PickingController {
        &self.picker
    }

    pub fn info_text(&self) -> &str {
        self.picker.info_text()
    }

    pub fn pointer(&self) -> Option<Vector2<f32>> {
        self.pointer
    }

    /// Overrides the pointer directly, in normalized device coordinates.
    pub fn set_pointer(&mut self, ndc: Option<Vector2<f32>>) {
        self.pointer = ndc;
    }

    pub fn on_window_events(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                self.pointer = pointer_to_ndc(*position, self.surface);
            }
            WindowEvent::CursorLeft { .. } => self.pointer = None,
            WindowEvent::Resized(size) => self.surface = *size,
            _ => (),
        }
    }

    /// Picks with the current pointer, then advances the hovered marker's spin.
    pub fn on_update(&mut self, view_proj: &Matrix4<f32>, dt: Duration) -> Transition {
        let ray = self.pointer.and_then(|ndc| Ray::from_ndc(ndc, view_proj));
        let transition = self.picker.pick(ray.as_ref(), &mut self.model);
        self.ticker.tick(dt, self.picker.state(), &mut self.model);
        transition
    }

    /// [`on_update`](Self::on_update) with the time elapsed since the previous call.
    pub fn frame(&mut self, view_proj: &Matrix4<f32>) -> Transition {
        let now = Instant::now();
        let dt = self
            .last_frame
            .map_or(Duration::ZERO, |last| now.duration_since(last));
        self.last_frame = Some(now);
        self.on_update(view_proj, dt)
    }
}

/// Initializes logging once: env_logger natively, the browser console on wasm.
pub fn init_logging() {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            // only fails when a logger is already installed, so report through that one
            log::warn!("Could not initialize console logger: {}", e);
        }
    }
}
