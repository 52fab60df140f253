//! # Shadelab
//!
//! **An interactive transform and lighting playground.**
//!
//! Load a few meshes, then push them around with the mouse wheel and drags
//! while the window shows the same model twice: per-vertex (Gouraud) shading
//! on the left, per-pixel (Phong) shading on the right.
//!
//! The interesting parts are usable without a window:
//!
//! ```
//! use shadelab::{EditMode, InputEvent, Interpreter, Model, SceneState};
//!
//! let mut scene = SceneState::new(vec![Model::new("empty", Vec::new())]);
//! let mut interpreter = Interpreter::default();
//! assert_eq!(interpreter.mode(), EditMode::LightEdit);
//!
//! interpreter.handle(InputEvent::Key(shadelab::KeyCode::KeyT), &mut scene);
//! interpreter.handle(InputEvent::Scroll(1.0), &mut scene);
//! assert!((scene.current_model().unwrap().position.z - 0.1).abs() < 1e-6);
//! ```

mod app;
pub mod camera;
mod error;
mod geometry;
mod gpu;
mod input;
mod interpreter;
mod keymap;
pub mod light;
pub mod math;
mod mesh;
pub mod mode;
mod model;
pub mod projection;
mod render;
pub mod scene;
pub mod transform;

pub use app::{AppConfig, DEFAULT_MODELS, load_scene, run};
pub use camera::Camera;
pub use error::{AppError, GpuError};
pub use geometry::{GeometryError, GeometryLoader, RawGeometry, load_model, parse_obj, parse_stl};
pub use gpu::GpuContext;
pub use input::{DragTracker, InputEvent};
pub use interpreter::{Interpreter, Outcome};
pub use keymap::{Command, KeyMap};
pub use light::{Light, LightSlot, LightToggles, LightUniform, ShadingPath};
pub use mesh::{GpuMesh, Vertex3d};
pub use mode::EditMode;
pub use model::{DEFAULT_SHININESS, Model, PhongMaterial, Shape};
pub use projection::{ProjectionMode, ProjectionSettings};
pub use render::{DrawUniforms, PhongPass};
pub use scene::{RenderFrame, SceneState, ShapeDraw};

// Re-export glam math types for convenience
pub use glam::{Mat4, Vec2, Vec3, Vec4};

pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
