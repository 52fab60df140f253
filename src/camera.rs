//! The look-at camera and its view matrix.

use glam::{Mat4, Vec3};

use crate::math::{mat4_from_rows, normalize};
use crate::transform::translation;

/// Look-at camera edited live by the view modes.
///
/// `center` is the point the camera looks at. `up_vector` is treated as a
/// *point* in world space, not a direction: the reference up direction used to
/// build the basis is `up_vector - position`. Moving the eye therefore tilts
/// the camera unless `up_vector` moves with it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub center: Vec3,
    /// Point whose direction from the eye gives the reference up.
    pub up_vector: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 2.0),
            center: Vec3::ZERO,
            up_vector: Vec3::Y,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.position = Vec3::new(x, y, z);
        self
    }

    pub fn looking_at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.center = Vec3::new(x, y, z);
        self
    }

    pub fn with_up(mut self, x: f32, y: f32, z: f32) -> Self {
        self.up_vector = Vec3::new(x, y, z);
        self
    }

    /// Unit vector from the eye towards `center`.
    pub fn forward(&self) -> Vec3 {
        normalize(self.center - self.position)
    }

    /// Unit reference up, measured from the eye to the `up_vector` point.
    pub fn reference_up(&self) -> Vec3 {
        normalize(self.up_vector - self.position)
    }

    pub fn right(&self) -> Vec3 {
        normalize(self.forward().cross(self.reference_up()))
    }

    /// Up vector re-orthogonalised against `forward` and `right`.
    pub fn orthogonal_up(&self) -> Vec3 {
        normalize(self.right().cross(self.forward()))
    }

    /// World-to-camera matrix `R * T`.
    ///
    /// Rows of `R` are `right`, `orthogonal_up` and `-forward`; `T` moves the
    /// eye to the origin. A degenerate configuration (`center == position`,
    /// `up_vector == position`, or the two directions parallel) yields NaN.
    pub fn view_matrix(&self) -> Mat4 {
        let forward = self.forward();
        let right = self.right();
        let up = self.orthogonal_up();

        let r = mat4_from_rows([
            [right.x, right.y, right.z, 0.0],
            [up.x, up.y, up.z, 0.0],
            [-forward.x, -forward.y, -forward.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);

        r * translation(-self.position)
    }
}
