//! Windowed host for the visualizer.
//!
//! Opens a window, drives one [`WeatherVisualizer::frame`] per redraw, and
//! feeds weather labels in from the keyboard, the command line, and
//! optionally stdin.

use std::io::BufRead;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop, EventLoopProxy},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::config::VisualizerConfig;
use crate::error::RunError;
use crate::gpu::GpuRenderer;
use crate::time::FrameClock;
use crate::visualizer::WeatherVisualizer;

/// Labels bound to the number keys 1-5.
pub const KEY_PRESETS: [&str; 5] = ["light rain", "snow", "scattered clouds", "clear sky", "thunderstorm"];

/// Events delivered to the loop from other threads.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A new weather condition label.
    Weather(String),
}

/// Open a window and run until it is closed.
///
/// `initial_label` is applied as soon as the renderer exists. With
/// `read_stdin`, every non-empty line on stdin becomes a weather update.
pub fn run(config: VisualizerConfig, initial_label: Option<String>, read_stdin: bool) -> Result<(), RunError> {
    let config = config.validate()?;

    if !config.enabled {
        log::info!("Weather background disabled, nothing to show");
        return Ok(());
    }

    let event_loop = EventLoop::<AppEvent>::with_user_event().build()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    if read_stdin {
        spawn_stdin_feeder(event_loop.create_proxy());
    }

    let mut app = App::new(config, initial_label);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Weather label for a number key, if bound.
pub fn preset_for_key(key: KeyCode) -> Option<&'static str> {
    let index = match key {
        KeyCode::Digit1 | KeyCode::Numpad1 => 0,
        KeyCode::Digit2 | KeyCode::Numpad2 => 1,
        KeyCode::Digit3 | KeyCode::Numpad3 => 2,
        KeyCode::Digit4 | KeyCode::Numpad4 => 3,
        KeyCode::Digit5 | KeyCode::Numpad5 => 4,
        _ => return None,
    };
    Some(KEY_PRESETS[index])
}

/// Turn a stdin line into a weather label. Blank lines are skipped.
fn parse_feed_line(line: &str) -> Option<String> {
    let label = line.trim();
    (!label.is_empty()).then(|| label.to_string())
}

fn spawn_stdin_feeder(proxy: EventLoopProxy<AppEvent>) {
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    log::warn!("Stopped reading stdin: {}", e);
                    break;
                }
            };
            if let Some(label) = parse_feed_line(&line) {
                if proxy.send_event(AppEvent::Weather(label)).is_err() {
                    break;
                }
            }
        }
        log::debug!("stdin feeder finished");
    });
}

struct App {
    window: Option<Arc<Window>>,
    visualizer: WeatherVisualizer<GpuRenderer>,
    clock: FrameClock,
    label: String,
    pending_label: Option<String>,
    error: Option<RunError>,
}

impl App {
    fn new(config: VisualizerConfig, initial_label: Option<String>) -> Self {
        Self {
            window: None,
            visualizer: WeatherVisualizer::new(config),
            clock: FrameClock::new(),
            label: String::new(),
            pending_label: initial_label,
            error: None,
        }
    }

    fn apply_weather(&mut self, label: String) {
        self.visualizer.update_weather(&label);
        log::info!("Weather now {:?} ({})", label, self.visualizer.kind().name());
        self.label = label;
        self.update_title();
    }

    fn update_title(&self) {
        if let Some(window) = &self.window {
            let label = if self.label.is_empty() { "-" } else { &self.label };
            window.set_title(&format!(
                "Nimbus - {} [{}] - {:.0} fps",
                label,
                self.visualizer.kind().name(),
                self.clock.fps()
            ));
        }
    }

    fn shutdown(&mut self, event_loop: &ActiveEventLoop) {
        self.visualizer.destroy();
        event_loop.exit();
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: RunError) {
        log::error!("{}", error);
        self.error = Some(error);
        self.shutdown(event_loop);
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let elapsed = self.clock.tick();

        match self.visualizer.frame(elapsed) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                if let Some(window) = &self.window {
                    let size = window.inner_size();
                    self.visualizer.resize(size.width, size.height);
                }
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, shutting down");
                self.shutdown(event_loop);
            }
            Err(e) => log::warn!("Render error: {:?}", e),
        }

        if self.clock.fps_refreshed() {
            self.update_title();
        }

        // Stop requesting frames once torn down
        if self.visualizer.is_running() {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }
}

impl ApplicationHandler<AppEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window_attrs = Window::default_attributes()
            .with_title("Nimbus")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                self.fail(event_loop, e.into());
                return;
            }
        };
        self.window = Some(window.clone());

        if let Err(e) = self
            .visualizer
            .init(|| pollster::block_on(GpuRenderer::new(window.clone())))
        {
            self.fail(event_loop, e.into());
            return;
        }

        if let Some(label) = self.pending_label.take() {
            self.apply_weather(label);
        } else {
            self.update_title();
        }
        window.request_redraw();
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: AppEvent) {
        match event {
            AppEvent::Weather(label) => {
                if self.visualizer.is_running() {
                    self.apply_weather(label);
                } else {
                    // Arrived before the window was ready
                    self.pending_label = Some(label);
                }
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.shutdown(event_loop),
            WindowEvent::Resized(size) => self.visualizer.resize(size.width, size.height),
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape {
                        self.shutdown(event_loop);
                    } else if let Some(label) = preset_for_key(code) {
                        self.apply_weather(label.to_string());
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.visualizer.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::weather::WeatherKind;

    #[test]
    fn test_presets_cover_every_kind() {
        let kinds: Vec<WeatherKind> = KEY_PRESETS.iter().map(|l| WeatherKind::classify(l)).collect();
        assert_eq!(
            kinds,
            vec![
                WeatherKind::Rain,
                WeatherKind::Snow,
                WeatherKind::Cloud,
                WeatherKind::Clear,
                WeatherKind::Unknown,
            ]
        );
    }

    #[test]
    fn test_preset_keys() {
        assert_eq!(preset_for_key(KeyCode::Digit1), Some("light rain"));
        assert_eq!(preset_for_key(KeyCode::Numpad3), Some("scattered clouds"));
        assert_eq!(preset_for_key(KeyCode::Digit5), Some("thunderstorm"));
        assert_eq!(preset_for_key(KeyCode::Digit6), None);
        assert_eq!(preset_for_key(KeyCode::KeyR), None);
    }

    #[test]
    fn test_run_rejects_oversized_field_before_opening_window() {
        let config = VisualizerConfig::new().with_particle_count(20_000_000);
        match run(config, None, false) {
            Err(RunError::Config(ConfigError::TooManyParticles(20_000_000))) => {}
            other => panic!("expected TooManyParticles, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_feed_line() {
        assert_eq!(parse_feed_line("  light rain \n"), Some("light rain".to_string()));
        assert_eq!(parse_feed_line("   "), None);
        assert_eq!(parse_feed_line(""), None);
    }
}
