//! Pure builders for the model transform.
//!
//! Each function maps parameters to a [`Mat4`] with no hidden state. The model
//! matrix of an object is always composed as `T * R * S`, and its rotation as
//! `Rx * Ry * Rz`, so the Z rotation is the first one applied to a vertex.

use glam::{Mat4, Vec3};

use crate::math::mat4_from_rows;

/// Identity with the translation column set to `v`.
pub fn translation(v: Vec3) -> Mat4 {
    mat4_from_rows([
        [1.0, 0.0, 0.0, v.x],
        [0.0, 1.0, 0.0, v.y],
        [0.0, 0.0, 1.0, v.z],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Diagonal scaling matrix `(v.x, v.y, v.z, 1)`.
pub fn scaling(v: Vec3) -> Mat4 {
    mat4_from_rows([
        [v.x, 0.0, 0.0, 0.0],
        [0.0, v.y, 0.0, 0.0],
        [0.0, 0.0, v.z, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotate_x(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    mat4_from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, c, -s, 0.0],
        [0.0, s, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotate_y(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    mat4_from_rows([
        [c, 0.0, s, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [-s, 0.0, c, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

pub fn rotate_z(angle: f32) -> Mat4 {
    let (s, c) = angle.sin_cos();
    mat4_from_rows([
        [c, -s, 0.0, 0.0],
        [s, c, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ])
}

/// Euler rotation `Rx(x) * Ry(y) * Rz(z)`, angles in radians.
pub fn rotation(euler: Vec3) -> Mat4 {
    rotate_x(euler.x) * rotate_y(euler.y) * rotate_z(euler.z)
}

/// Object-to-world transform `T * R * S`.
pub fn model_matrix(position: Vec3, euler: Vec3, scale: Vec3) -> Mat4 {
    translation(position) * rotation(euler) * scaling(scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::mat4_approx_eq;
    use glam::Vec4;
    use std::f32::consts::{FRAC_PI_2, PI};

    const EPS: f32 = 1e-5;

    #[test]
    fn translation_moves_origin_to_vector() {
        let v = Vec3::new(1.5, -2.0, 0.25);
        let m = translation(v);
        assert_eq!(m * Vec4::new(0.0, 0.0, 0.0, 1.0), v.extend(1.0));
        // Directions (w = 0) are untouched.
        assert_eq!(m * Vec4::X, Vec4::X);
        assert_eq!(m * Vec4::Y, Vec4::Y);
        assert_eq!(m * Vec4::Z, Vec4::Z);
    }

    #[test]
    fn scaling_inverse_is_reciprocal_scaling() {
        let v = Vec3::new(2.0, -4.0, 0.5);
        let inv = scaling(Vec3::new(1.0 / v.x, 1.0 / v.y, 1.0 / v.z));
        assert!(mat4_approx_eq(&(scaling(v) * inv), &Mat4::IDENTITY, EPS));
        assert!(mat4_approx_eq(&scaling(v).inverse(), &inv, EPS));
    }

    #[test]
    fn zero_euler_is_identity() {
        assert!(mat4_approx_eq(&rotation(Vec3::ZERO), &Mat4::IDENTITY, EPS));
    }

    #[test]
    fn rotation_order_is_x_then_y_then_z() {
        for euler in [
            Vec3::new(0.3, -1.2, 2.5),
            Vec3::new(-7.0, 9.5, -0.01),
            Vec3::new(2.0 * PI + 0.4, -3.0 * PI, 13.0),
        ] {
            let expected = rotate_x(euler.x) * rotate_y(euler.y) * rotate_z(euler.z);
            assert_eq!(rotation(euler), expected);
        }
    }

    #[test]
    fn axis_rotations_are_right_handed() {
        let y = rotate_x(FRAC_PI_2) * Vec4::Y;
        assert!((y - Vec4::Z).length() < EPS);
        let z = rotate_y(FRAC_PI_2) * Vec4::Z;
        assert!((z - Vec4::X).length() < EPS);
        let x = rotate_z(FRAC_PI_2) * Vec4::X;
        assert!((x - Vec4::Y).length() < EPS);
    }

    #[test]
    fn builders_are_affine() {
        let last = Vec4::new(0.0, 0.0, 0.0, 1.0);
        for m in [
            translation(Vec3::splat(3.0)),
            scaling(Vec3::new(1.0, 2.0, 3.0)),
            rotation(Vec3::new(0.1, 0.2, 0.3)),
        ] {
            assert_eq!(m.row(3), last);
        }
    }

    #[test]
    fn model_matrix_is_trs() {
        let (p, r, s) = (
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.5, -0.25, 1.0),
            Vec3::new(2.0, 1.0, 0.5),
        );
        let expected = translation(p) * rotation(r) * scaling(s);
        assert!(mat4_approx_eq(&model_matrix(p, r, s), &expected, EPS));
    }
}
