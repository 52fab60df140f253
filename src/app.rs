//! Window, event loop and the glue between them.
//!
//! [`run`] loads the models, opens the window and hands every winit event to
//! the [`Interpreter`]. GPU setup waits for `resumed`, when the window exists.

use std::path::PathBuf;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::error::AppError;
use crate::geometry::load_model;
use crate::gpu::GpuContext;
use crate::input::InputEvent;
use crate::interpreter::{Interpreter, Outcome};
use crate::keymap::KeyMap;
use crate::render::PhongPass;
use crate::scene::SceneState;

/// Models shown when none are given on the command line.
pub const DEFAULT_MODELS: [&str; 5] = [
    "models/bunny5KN.obj",
    "models/dragon10KN.obj",
    "models/lucy25KN.obj",
    "models/teapot4KN.obj",
    "models/dolphinN.obj",
];

/// Configuration for the viewer window.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Window title.
    pub title: String,
    /// Initial inner width in physical pixels. Each viewport half gets half.
    pub width: u32,
    /// Initial inner height in physical pixels.
    pub height: u32,
    /// Model files in selection order. Unreadable files are skipped.
    pub models: Vec<PathBuf>,
    /// Background colour of both viewport halves.
    pub clear_color: wgpu::Color,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Shadelab".to_string(),
            width: 800,
            height: 600,
            models: DEFAULT_MODELS.iter().map(PathBuf::from).collect(),
            clear_color: wgpu::Color {
                r: 0.2,
                g: 0.2,
                b: 0.2,
                a: 1.0,
            },
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Replaces the model list. An empty list keeps the current one.
    pub fn models<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if !paths.is_empty() {
            self.models = paths;
        }
        self
    }

    pub fn clear_color(mut self, r: f64, g: f64, b: f64) -> Self {
        self.clear_color = wgpu::Color { r, g, b, a: 1.0 };
        self
    }
}

/// Loads every configured model, skipping the ones that fail.
///
/// Fails only if nothing could be loaded.
pub fn load_scene(config: &AppConfig) -> Result<SceneState, AppError> {
    let models: Vec<_> = config
        .models
        .iter()
        .filter_map(|path| match load_model(path) {
            Ok(model) => Some(model),
            Err(e) => {
                log::warn!("skipping {}: {e}", path.display());
                None
            }
        })
        .collect();

    if models.is_empty() {
        return Err(AppError::NoModels(config.models.len()));
    }

    let mut scene = SceneState::new(models);
    scene.resize(config.width, config.height);
    Ok(scene)
}

/// Loads the models and runs the viewer until the window closes.
pub fn run(config: AppConfig) -> Result<(), AppError> {
    let scene = load_scene(&config)?;
    log::info!("{} model(s) loaded", scene.model_count());

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = ViewerApp {
        state: ViewerState::Pending {
            config,
            scene: Some(scene),
        },
        error: None,
    };
    event_loop.run_app(&mut app)?;

    match app.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

struct ViewerApp {
    state: ViewerState,
    error: Option<AppError>,
}

enum ViewerState {
    Pending {
        config: AppConfig,
        scene: Option<SceneState>,
    },
    Running {
        window: Arc<Window>,
        gpu: GpuContext,
        pass: PhongPass,
        scene: SceneState,
        interpreter: Interpreter,
    },
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: AppError) {
        log::error!("{error}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn start(
        config: &AppConfig,
        mut scene: SceneState,
        event_loop: &ActiveEventLoop,
    ) -> Result<ViewerState, AppError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let gpu = GpuContext::new(window.clone())?;
        scene.resize(gpu.width(), gpu.height());

        let mut pass = PhongPass::new(&gpu, config.clear_color);
        pass.upload(&gpu, &scene);
        window.request_redraw();

        Ok(ViewerState::Running {
            window,
            gpu,
            pass,
            scene,
            interpreter: Interpreter::new(KeyMap::default()),
        })
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let ViewerState::Pending { config, scene } = &mut self.state else {
            return;
        };
        let Some(scene) = scene.take() else {
            return;
        };
        match Self::start(config, scene, event_loop) {
            Ok(running) => self.state = running,
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let ViewerState::Running {
            window,
            gpu,
            pass,
            scene,
            interpreter,
        } = &mut self.state
        else {
            return;
        };

        if let Some(input) = InputEvent::from_window_event(&event) {
            match interpreter.handle(input, scene) {
                Outcome::Quit => event_loop.exit(),
                Outcome::Redraw => window.request_redraw(),
                Outcome::Idle => {}
            }
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => {
                gpu.resize(size.width, size.height);
                scene.resize(size.width, size.height);
                window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                let frame = scene.render_frame();
                match pass.render(gpu, &frame) {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let (w, h) = (gpu.width(), gpu.height());
                        gpu.resize(w, h);
                        window.request_redraw();
                    }
                    Err(wgpu::SurfaceError::Timeout) => {
                        log::warn!("surface timed out, skipping frame");
                    }
                    Err(e) => self.fail(event_loop, e.into()),
                }
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_background_is_dark_grey() {
        let c = AppConfig::default().clear_color;
        assert_eq!((c.r, c.g, c.b, c.a), (0.2, 0.2, 0.2, 1.0));
        let c = AppConfig::new().clear_color(0.5, 0.0, 1.0).clear_color;
        assert_eq!((c.r, c.g, c.b, c.a), (0.5, 0.0, 1.0, 1.0));
    }

    #[test]
    fn empty_model_list_keeps_defaults() {
        let config = AppConfig::new().models(Vec::<PathBuf>::new());
        assert_eq!(config.models.len(), DEFAULT_MODELS.len());
        let config = config.models(["a.obj"]);
        assert_eq!(config.models, vec![PathBuf::from("a.obj")]);
    }

    #[test]
    fn load_scene_fails_without_any_model() {
        let config = AppConfig::new().models(["does/not/exist.obj", "nope.stl"]);
        assert!(matches!(load_scene(&config), Err(AppError::NoModels(2))));
    }
}
