//! Linear algebra primitives shared by every builder in the crate.
//!
//! Vectors and matrices are plain [`glam`] value types. Matrices in this crate
//! are *written* row-major, the way they read on paper, through
//! [`mat4_from_rows`]; glam stores them column-major internally, which is also
//! what the GPU expects, so [`to_column_major`] is the explicit transpose at
//! the rendering boundary.
//!
//! # Degenerate input
//!
//! [`normalize`] divides by the vector length without checking it. A zero
//! vector produces NaN components that propagate into whatever matrix is
//! built from them. Callers building a camera basis must keep the camera
//! configuration non-degenerate.

use glam::{Mat4, Vec3, Vec4};

/// Builds a matrix from four rows given in reading order.
pub fn mat4_from_rows(rows: [[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols(
        Vec4::from(rows[0]),
        Vec4::from(rows[1]),
        Vec4::from(rows[2]),
        Vec4::from(rows[3]),
    )
    .transpose()
}

/// Flattens a matrix column by column, ready for a GPU uniform.
pub fn to_column_major(m: &Mat4) -> [[f32; 4]; 4] {
    m.to_cols_array_2d()
}

/// Scales `v` to unit length. Zero-length input yields NaN.
pub fn normalize(v: Vec3) -> Vec3 {
    v / v.length()
}

#[cfg(test)]
pub fn approx_eq(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

/// Element-wise approximate matrix equality.
#[cfg(test)]
pub fn mat4_approx_eq(a: &Mat4, b: &Mat4, eps: f32) -> bool {
    a.to_cols_array()
        .iter()
        .zip(b.to_cols_array().iter())
        .all(|(x, y)| approx_eq(*x, *y, eps))
}
