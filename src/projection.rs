//! Projection settings and the two projection builders.

use glam::Mat4;

use crate::math::mat4_from_rows;

/// Which builder populates the cached projection matrix.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ProjectionMode {
    Orthographic,
    #[default]
    Perspective,
}

/// Clip planes, field of view and orthographic bounds.
///
/// Only `aspect` changes at runtime (on window resize).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectionSettings {
    pub near_clip: f32,
    pub far_clip: f32,
    /// Field-of-view angle handed to [`perspective`] as is, in radians.
    ///
    /// The default of 80 wraps around the circle; with the negated focal
    /// term it gives `f ~= 0.895`, an upright image about 96 degrees wide.
    pub fovy: f32,
    pub aspect: f32,
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Default for ProjectionSettings {
    fn default() -> Self {
        Self {
            near_clip: 0.001,
            far_clip: 100.0,
            fovy: 80.0,
            aspect: 800.0 / 600.0,
            left: -1.0,
            right: 1.0,
            top: 1.0,
            bottom: -1.0,
        }
    }
}

impl ProjectionSettings {
    /// Updates the aspect ratio from a framebuffer size.
    ///
    /// Returns `false` and leaves the aspect untouched for a zero-sized
    /// framebuffer (minimised window).
    pub fn set_viewport(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.aspect = width as f32 / height as f32;
        true
    }

    pub fn matrix(&self, mode: ProjectionMode) -> Mat4 {
        match mode {
            ProjectionMode::Orthographic => orthographic(self),
            ProjectionMode::Perspective => {
                perspective(self.fovy, self.aspect, self.near_clip, self.far_clip)
            }
        }
    }
}

/// OpenGL-convention orthographic projection onto the canonical clip cube.
pub fn orthographic(s: &ProjectionSettings) -> Mat4 {
    let (l, r, t, b) = (s.left, s.right, s.top, s.bottom);
    let (n, f) = (s.near_clip, s.far_clip);
    mat4_from_rows([
        [2.0 / (r - l), 0.0, 0.0, -((r + l) / (r - l))],
        [0.0, 2.0 / (t - b), 0.0, -((t + b) / (t - b))],
        [0.0, 0.0, -2.0 / (f - n), -((f + n) / (f - n))],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Perspective projection.
///
/// The focal term is `f = -cos(fovy/2) / sin(fovy/2)`, the negated cotangent.
/// For `fovy` in `(0, pi)` it is negative and the image is point-mirrored.
pub fn perspective(fovy: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let half = fovy / 2.0;
    let f = -half.cos() / half.sin();
    mat4_from_rows([
        [f / aspect, 0.0, 0.0, 0.0],
        [0.0, f, 0.0, 0.0],
        [
            0.0,
            0.0,
            (far + near) / (near - far),
            (2.0 * far * near) / (near - far),
        ],
        [0.0, 0.0, -1.0, 0.0],
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::approx_eq;
    use glam::Vec4;

    const EPS: f32 = 1e-4;

    #[test]
    fn orthographic_maps_box_to_clip_cube() {
        let s = ProjectionSettings {
            left: -2.0,
            right: 4.0,
            bottom: -1.0,
            top: 3.0,
            near_clip: 0.5,
            far_clip: 10.0,
            ..Default::default()
        };
        let m = orthographic(&s);
        let lo = m * Vec4::new(-2.0, -1.0, -0.5, 1.0);
        let hi = m * Vec4::new(4.0, 3.0, -10.0, 1.0);
        assert!((lo - Vec4::new(-1.0, -1.0, -1.0, 1.0)).length() < EPS);
        assert!((hi - Vec4::new(1.0, 1.0, 1.0, 1.0)).length() < EPS);
        assert_eq!(m.row(3), Vec4::new(0.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn perspective_focal_term_is_negative() {
        let fovy = 60f32.to_radians();
        let m = perspective(fovy, 2.0, 0.1, 50.0);
        let expected_f = -(fovy / 2.0).cos() / (fovy / 2.0).sin();
        assert!(expected_f < 0.0);
        assert!(approx_eq(m.row(1).y, expected_f, EPS));
        assert!(approx_eq(m.row(0).x, expected_f / 2.0, EPS));
        assert_eq!(m.row(3), Vec4::new(0.0, 0.0, -1.0, 0.0));
    }

    #[test]
    fn perspective_depth_row_maps_near_and_far() {
        let (n, f) = (0.5, 20.0);
        let m = perspective(1.0, 1.0, n, f);
        let near = m * Vec4::new(0.0, 0.0, -n, 1.0);
        let far = m * Vec4::new(0.0, 0.0, -f, 1.0);
        assert!(approx_eq(near.z / near.w, -1.0, EPS));
        assert!(approx_eq(far.z / far.w, 1.0, EPS));
    }

    #[test]
    fn zero_sized_viewport_keeps_aspect() {
        let mut s = ProjectionSettings::default();
        assert!(!s.set_viewport(0, 600));
        assert!(approx_eq(s.aspect, 800.0 / 600.0, EPS));
        assert!(s.set_viewport(1000, 500));
        assert!(approx_eq(s.aspect, 2.0, EPS));
    }

    #[test]
    fn mode_selects_builder() {
        let s = ProjectionSettings::default();
        assert_eq!(s.matrix(ProjectionMode::Orthographic), orthographic(&s));
        assert_eq!(
            s.matrix(ProjectionMode::Perspective),
            perspective(80.0, s.aspect, s.near_clip, s.far_clip)
        );
    }

    #[test]
    fn default_fovy_keeps_image_upright() {
        let m = ProjectionSettings::default().matrix(ProjectionMode::Perspective);
        assert!(approx_eq(m.row(1).y, 0.895, 1e-3));
    }
}
