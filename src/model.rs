//! Loaded models, their shapes and Phong materials.

use glam::{Mat4, Vec3};

use crate::mesh::Vertex3d;
use crate::transform;

/// Shininess every shape starts with once a scene is assembled.
pub const DEFAULT_SHININESS: f32 = 64.0;

/// Phong reflectance coefficients of a shape.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhongMaterial {
    pub ka: Vec3,
    pub kd: Vec3,
    pub ks: Vec3,
    pub shininess: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            ka: Vec3::splat(0.2),
            kd: Vec3::splat(0.8),
            ks: Vec3::splat(0.5),
            shininess: DEFAULT_SHININESS,
        }
    }
}

/// A partition of a model drawn with a single material.
#[derive(Clone, Debug)]
pub struct Shape {
    pub vertices: Vec<Vertex3d>,
    pub material: PhongMaterial,
}

impl Shape {
    pub fn new(vertices: Vec<Vertex3d>, material: PhongMaterial) -> Self {
        Self { vertices, material }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}

/// A model with its own placement in the world.
#[derive(Clone, Debug)]
pub struct Model {
    pub name: String,
    pub position: Vec3,
    /// Euler angles in radians.
    pub rotation: Vec3,
    pub scale: Vec3,
    pub shapes: Vec<Shape>,
}

impl Model {
    pub fn new(name: impl Into<String>, shapes: Vec<Shape>) -> Self {
        Self {
            name: name.into(),
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
            shapes,
        }
    }

    pub fn translation_matrix(&self) -> Mat4 {
        transform::translation(self.position)
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        transform::rotation(self.rotation)
    }

    pub fn scaling_matrix(&self) -> Mat4 {
        transform::scaling(self.scale)
    }

    pub fn model_matrix(&self) -> Mat4 {
        transform::model_matrix(self.position, self.rotation, self.scale)
    }

    pub fn vertex_count(&self) -> usize {
        self.shapes.iter().map(Shape::vertex_count).sum()
    }
}
