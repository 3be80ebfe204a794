//! # Nimbus - weather-driven particle backdrop
//!
//! Renders a decorative point cloud whose look and motion follow the current
//! weather. Hand it a free-text condition such as `"light rain"` and it
//! switches to falling streaks; `"scattered clouds"` gives a slow drifting
//! band; `"clear sky"` a twinkling star field.
//!
//! ## Quick Start
//!
//! ```ignore
//! use nimbus::prelude::*;
//!
//! fn main() -> Result<(), RunError> {
//!     let config = VisualizerConfig::new().with_particle_count(400);
//!     nimbus::run(config, Some("light snow".into()), false)
//! }
//! ```
//!
//! ## Embedding
//!
//! [`WeatherVisualizer`] is generic over a [`RenderBackend`], so a host with
//! its own window and loop can drive it directly:
//!
//! ```ignore
//! let mut vis = WeatherVisualizer::new(config);
//! vis.init(|| pollster::block_on(GpuRenderer::new(window)))?;
//! vis.update_weather("drizzle");
//!
//! // once per display refresh
//! vis.frame(clock.tick())?;
//!
//! // on teardown
//! vis.destroy();
//! ```
//!
//! ## Weather Kinds
//!
//! | Label contains | Kind | Particles | Motion |
//! |----------------|------|-----------|--------|
//! | rain, drizzle | [`WeatherKind::Rain`] | N | fall, wrap at y = -10 |
//! | snow | [`WeatherKind::Snow`] | N | slow fall with sideways drift |
//! | cloud | [`WeatherKind::Cloud`] | N / 2 | drift along +x, wrap at x = 10 |
//! | clear | [`WeatherKind::Clear`] | 2N | still, shared twinkling opacity |
//! | anything else | [`WeatherKind::Unknown`] | 0 | - |
//!
//! The first matching row wins, so `"rain and clouds"` is rain. The whole
//! scene turns slowly about the vertical axis regardless of kind.

mod app;
pub mod backend;
pub mod camera;
pub mod config;
mod error;
pub mod field;
mod gpu;
pub mod time;
mod visualizer;
pub mod weather;

pub use app::{preset_for_key, run, AppEvent, KEY_PRESETS};
pub use backend::{Frame, PointsDraw, RenderBackend};
pub use camera::CameraRig;
pub use config::VisualizerConfig;
pub use error::{ConfigError, GpuError, RunError};
pub use field::ParticleField;
pub use glam::{Mat4, Vec3};
pub use gpu::{GpuField, GpuRenderer};
pub use time::FrameClock;
pub use visualizer::{VisualizerState, WeatherVisualizer, SCENE_ROTATION_STEP};
pub use weather::{CountScale, FieldStyle, SpawnVolume, WeatherKind};

/// Common imports.
pub mod prelude {
    pub use crate::{
        ConfigError, GpuError, GpuRenderer, ParticleField, RenderBackend, RunError, VisualizerConfig,
        WeatherKind, WeatherVisualizer,
    };
}
