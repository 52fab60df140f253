//! Authoritative state of the viewer.
//!
//! [`SceneState`] is built once after the models are loaded and then owned by
//! the event loop. The input interpreter mutates it; the renderer pulls a
//! [`RenderFrame`] from it once per frame.

use std::fmt::Write as _;

use glam::Mat4;

use crate::camera::Camera;
use crate::light::{LIGHT_COUNT, Light, LightSlot, LightToggles, LightUniform, ShadingPath, default_lights};
use crate::math::to_column_major;
use crate::model::{DEFAULT_SHININESS, Model, PhongMaterial};
use crate::projection::{ProjectionMode, ProjectionSettings};

/// Shading path of the left and right viewport halves.
pub const VIEWPORT_PATHS: [ShadingPath; 2] = [ShadingPath::PerVertex, ShadingPath::PerPixel];

pub struct SceneState {
    models: Vec<Model>,
    selected: usize,
    /// Edited by the view modes. Call [`SceneState::recompute_view`] after
    /// changing it directly.
    pub camera: Camera,
    /// Clip volume and aspect. The active mode is kept separately.
    pub projection: ProjectionSettings,
    projection_mode: ProjectionMode,
    /// One light of each kind; slot `i` always holds kind `i`.
    pub lights: [Light; LIGHT_COUNT],
    /// The light that shades the scene and that light edit scrolls.
    pub light_slot: LightSlot,
    /// Which Phong terms reach the shader. Stored colours are untouched.
    pub toggles: LightToggles,
    view_matrix: Mat4,
    projection_matrix: Mat4,
}

impl SceneState {
    /// Assembles a scene with default camera, lights and projection.
    ///
    /// Every shape's shininess is reset to the viewer default.
    pub fn new(mut models: Vec<Model>) -> Self {
        for shape in models.iter_mut().flat_map(|m| m.shapes.iter_mut()) {
            shape.material.shininess = DEFAULT_SHININESS;
        }

        let camera = Camera::default();
        let projection = ProjectionSettings::default();
        let projection_mode = ProjectionMode::default();

        Self {
            models,
            selected: 0,
            camera,
            projection,
            projection_mode,
            lights: default_lights(),
            light_slot: LightSlot::default(),
            toggles: LightToggles::default(),
            view_matrix: camera.view_matrix(),
            projection_matrix: projection.matrix(projection_mode),
        }
    }

    pub fn models(&self) -> &[Model] {
        &self.models
    }

    pub fn models_mut(&mut self) -> &mut [Model] {
        &mut self.models
    }

    pub fn model_count(&self) -> usize {
        self.models.len()
    }

    pub fn current_index(&self) -> usize {
        self.selected
    }

    pub fn current_model(&self) -> Option<&Model> {
        self.models.get(self.selected)
    }

    pub fn current_model_mut(&mut self) -> Option<&mut Model> {
        self.models.get_mut(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.models.is_empty() {
            self.selected = (self.selected + 1) % self.models.len();
        }
    }

    pub fn select_previous(&mut self) {
        if !self.models.is_empty() {
            self.selected = (self.selected + self.models.len() - 1) % self.models.len();
        }
    }

    /// Rebuilds the cached view matrix from the camera.
    ///
    /// Not automatic: call it once after a batch of camera edits.
    pub fn recompute_view(&mut self) {
        self.view_matrix = self.camera.view_matrix();
    }

    pub fn set_projection_mode(&mut self, mode: ProjectionMode) {
        self.projection_mode = mode;
        self.projection_matrix = self.projection.matrix(mode);
    }

    pub fn projection_mode(&self) -> ProjectionMode {
        self.projection_mode
    }

    /// Tracks a framebuffer resize. Zero-sized framebuffers are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.projection.set_viewport(width, height) {
            self.projection_matrix = self.projection.matrix(self.projection_mode);
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection_matrix
    }

    /// Light uniforms as the shader sees them, after toggle masking.
    pub fn light_uniforms(&self) -> [LightUniform; LIGHT_COUNT] {
        self.lights.map(|light| self.toggles.mask(light.to_uniform()))
    }

    /// Snapshot of everything the renderer needs for the selected model.
    pub fn render_frame(&self) -> RenderFrame {
        let model = self.current_model();
        let model_matrix = model.map(Model::model_matrix).unwrap_or(Mat4::IDENTITY);
        let mvp = self.projection_matrix * self.view_matrix * model_matrix;

        let shapes = model
            .map(|m| {
                m.shapes
                    .iter()
                    .enumerate()
                    .map(|(shape_index, shape)| ShapeDraw {
                        shape_index,
                        material: shape.material,
                    })
                    .collect()
            })
            .unwrap_or_default();

        RenderFrame {
            model_index: self.selected,
            mvp: to_column_major(&mvp),
            view: to_column_major(&self.view_matrix),
            model: to_column_major(&model_matrix),
            lights: self.light_uniforms(),
            light_slot: self.light_slot,
            viewports: VIEWPORT_PATHS,
            shapes,
        }
    }

    /// Human-readable dump of the current transforms and lighting state.
    pub fn report(&self) -> String {
        let mut out = String::new();
        if let Some(model) = self.current_model() {
            let _ = writeln!(out, "Model: {} ({})", model.name, self.selected);
            write_matrix(&mut out, "Translation Matrix", &model.translation_matrix());
            write_matrix(&mut out, "Rotation Matrix", &model.rotation_matrix());
            write_matrix(&mut out, "Scaling Matrix", &model.scaling_matrix());
        }
        write_matrix(&mut out, "Viewing Matrix", &self.view_matrix);
        write_matrix(&mut out, "Projection Matrix", &self.projection_matrix);
        let _ = writeln!(
            out,
            "Light Mode: {} ({})",
            self.light_slot.index(),
            self.lights[self.light_slot.index()].kind_name()
        );
        if let Some(shape) = self.current_model().and_then(|m| m.shapes.first()) {
            let _ = writeln!(out, "shininess: {}", shape.material.shininess);
        }
        out
    }
}

fn write_matrix(out: &mut String, title: &str, m: &Mat4) {
    let _ = writeln!(out, "{title} :");
    for i in 0..4 {
        let r = m.row(i);
        let _ = writeln!(out, "[{:>9.4} {:>9.4} {:>9.4} {:>9.4}]", r.x, r.y, r.z, r.w);
    }
}

/// One shape of the selected model, ready to draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeDraw {
    pub shape_index: usize,
    pub material: PhongMaterial,
}

/// Per-frame data pulled by the renderer. Matrices are column-major.
#[derive(Clone, Debug)]
pub struct RenderFrame {
    pub model_index: usize,
    pub mvp: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub lights: [LightUniform; LIGHT_COUNT],
    pub light_slot: LightSlot,
    pub viewports: [ShadingPath; 2],
    pub shapes: Vec<ShapeDraw>,
}
