//! The weather visualizer: lifecycle, weather switching, and the frame step.

use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::backend::{Frame, PointsDraw, RenderBackend};
use crate::camera::CameraRig;
use crate::config::VisualizerConfig;
use crate::field::ParticleField;
use crate::weather::WeatherKind;

/// Scene rotation about Y per frame, in radians.
pub const SCENE_ROTATION_STEP: f32 = 0.0005;

/// Lifecycle of a visualizer. There is no way back to `Uninitialized`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualizerState {
    Uninitialized,
    Running,
    Disposed,
}

struct LiveField<H> {
    field: ParticleField,
    handle: H,
}

struct Scene<B: RenderBackend> {
    backend: B,
    camera: CameraRig,
    live: Option<LiveField<B::FieldHandle>>,
    rotation: f32,
}

impl<B: RenderBackend> Scene<B> {
    fn clear_field(&mut self) {
        if let Some(live) = self.live.take() {
            log::debug!("Releasing {} field ({} particles)", live.field.kind().name(), live.field.len());
            self.backend.release_field(live.handle);
        }
    }
}

enum Lifecycle<B: RenderBackend> {
    Uninitialized,
    Running(Box<Scene<B>>),
    Disposed,
}

/// Particle backdrop whose look follows the current weather.
///
/// The host owns the visualizer, calls [`frame`](Self::frame) once per display
/// refresh, and forwards weather labels through
/// [`update_weather`](Self::update_weather). Every call is safe in every
/// state; calls that make no sense in the current state are ignored.
///
/// ```ignore
/// let mut vis = WeatherVisualizer::new(VisualizerConfig::new());
/// vis.init(|| pollster::block_on(GpuRenderer::new(window)))?;
/// vis.update_weather("light rain");
/// loop {
///     vis.frame(time.elapsed())?;
/// }
/// ```
pub struct WeatherVisualizer<B: RenderBackend> {
    config: VisualizerConfig,
    kind: WeatherKind,
    lifecycle: Lifecycle<B>,
    rng: SmallRng,
}

impl<B: RenderBackend> WeatherVisualizer<B> {
    /// Create an uninitialized visualizer.
    pub fn new(config: VisualizerConfig) -> Self {
        Self {
            config,
            kind: WeatherKind::Unknown,
            lifecycle: Lifecycle::Uninitialized,
            rng: SmallRng::from_entropy(),
        }
    }

    /// Create the renderer and start running.
    ///
    /// With the feature flag off this does nothing and `create` is never
    /// called. Calling it again after a successful init, or after
    /// [`destroy`](Self::destroy), is ignored.
    pub fn init<F, E>(&mut self, create: F) -> Result<(), E>
    where
        F: FnOnce() -> Result<B, E>,
    {
        if !self.config.enabled {
            log::info!("Weather background disabled, skipping renderer setup");
            return Ok(());
        }
        if !matches!(self.lifecycle, Lifecycle::Uninitialized) {
            log::warn!("init called on a visualizer that is already {:?}", self.state());
            return Ok(());
        }

        let backend = create()?;
        let (width, height) = backend.viewport();
        self.lifecycle = Lifecycle::Running(Box::new(Scene {
            backend,
            camera: CameraRig::new(width, height),
            live: None,
            rotation: 0.0,
        }));
        log::info!("Weather background running at {}x{}", width, height);
        Ok(())
    }

    /// Switch the backdrop to match a free-text weather condition.
    ///
    /// The previous field is always released before a new one is allocated,
    /// even when the kind does not change.
    pub fn update_weather(&mut self, label: &str) {
        let Lifecycle::Running(scene) = &mut self.lifecycle else {
            log::debug!("Ignoring weather update {:?}, background not running", label);
            return;
        };

        let kind = WeatherKind::classify(label);
        log::debug!("Weather {:?} classified as {}", label, kind.name());

        scene.clear_field();
        self.kind = kind;

        if let Some(mut field) = ParticleField::spawn(kind, self.config.particle_count, &mut self.rng) {
            let handle = scene.backend.create_field(&field);
            field.mark_clean();
            log::debug!("Allocated {} field ({} particles)", kind.name(), field.len());
            scene.live = Some(LiveField { field, handle });
        }
    }

    /// Advance particles, rotate the scene and draw once.
    ///
    /// `elapsed` is seconds since the host started its clock. Outside the
    /// running state this does nothing.
    pub fn frame(&mut self, elapsed: f32) -> Result<(), B::Error> {
        let Lifecycle::Running(scene) = &mut self.lifecycle else {
            return Ok(());
        };
        let Scene {
            backend,
            camera,
            live,
            rotation,
        } = &mut **scene;

        if let Some(live) = live.as_mut() {
            live.field.step(elapsed, self.config.animation_speed);
            if live.field.is_dirty() {
                backend.upload_positions(&live.handle, live.field.positions());
                live.field.mark_clean();
            }
        }

        *rotation += SCENE_ROTATION_STEP;

        let frame = Frame {
            view_proj: camera.view_proj(*rotation),
            aspect: camera.aspect(),
            points: live.as_ref().map(|live| PointsDraw {
                handle: &live.handle,
                count: live.field.len() as u32,
                point_size: live.field.style().point_size,
                color: live.field.style().color,
                opacity: live.field.opacity(),
            }),
        };
        backend.render(&frame)
    }

    /// Follow a viewport size change. Zero-sized viewports are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if let Lifecycle::Running(scene) = &mut self.lifecycle {
            scene.camera.set_viewport(width, height);
            scene.backend.resize(width, height);
        }
    }

    /// Stop, release the live field and the renderer. Idempotent.
    pub fn destroy(&mut self) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Disposed) {
            Lifecycle::Running(scene) => {
                let mut scene = *scene;
                scene.clear_field();
                scene.backend.dispose();
                log::info!("Weather background disposed");
            }
            Lifecycle::Uninitialized | Lifecycle::Disposed => {}
        }
    }

    pub fn state(&self) -> VisualizerState {
        match self.lifecycle {
            Lifecycle::Uninitialized => VisualizerState::Uninitialized,
            Lifecycle::Running(_) => VisualizerState::Running,
            Lifecycle::Disposed => VisualizerState::Disposed,
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Running(_))
    }

    #[inline]
    pub fn config(&self) -> &VisualizerConfig {
        &self.config
    }

    /// Kind chosen by the last accepted weather update.
    #[inline]
    pub fn kind(&self) -> WeatherKind {
        self.kind
    }

    /// The live particle field, if any.
    pub fn field(&self) -> Option<&ParticleField> {
        match &self.lifecycle {
            Lifecycle::Running(scene) => scene.live.as_ref().map(|live| &live.field),
            _ => None,
        }
    }

    /// Number of live particles. Zero when not running.
    pub fn particle_count(&self) -> usize {
        self.field().map_or(0, ParticleField::len)
    }

    /// Accumulated scene rotation about Y in radians.
    pub fn rotation(&self) -> f32 {
        match &self.lifecycle {
            Lifecycle::Running(scene) => scene.rotation,
            _ => 0.0,
        }
    }

    pub fn camera(&self) -> Option<&CameraRig> {
        match &self.lifecycle {
            Lifecycle::Running(scene) => Some(&scene.camera),
            _ => None,
        }
    }

    /// The renderer, while running.
    pub fn backend(&self) -> Option<&B> {
        match &self.lifecycle {
            Lifecycle::Running(scene) => Some(&scene.backend),
            _ => None,
        }
    }
}

impl<B: RenderBackend> Drop for WeatherVisualizer<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}
