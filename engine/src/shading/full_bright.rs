//! Full-bright vertex stage
//!
//! Mirrors `vs_full_bright` in `phong.wgsl`.

use super::VertexInput;
use crate::error::ShadingError;
use glam::{Mat3, Mat4, Vec3, Vec4};

/// Transform uniforms of the Phong pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullBrightUniforms {
    /// Object to view space
    pub model_view: Mat4,
    /// View to clip space
    pub perspective: Mat4,
}

impl FullBrightUniforms {
    pub fn new(model_view: Mat4, perspective: Mat4) -> Self {
        Self {
            model_view,
            perspective,
        }
    }
}

/// Outputs of the full-bright vertex stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FullBrightOutput {
    /// `perspective · model_view · (position, 1)`
    pub clip_position: Vec4,
    /// View-space position after division by `w`
    pub view_position: Vec3,
    /// Normal in view space, not renormalized
    pub normal: Vec3,
    /// Input color, unchanged
    pub color: Vec3,
}

/// Matrix that carries object-space normals into view space
///
/// This is `inverse(transpose(mat3(model_view)))`, which stays correct under
/// non-uniform scale. A singular `model_view` yields non-finite entries.
pub fn normal_matrix(model_view: Mat4) -> Mat3 {
    Mat3::from_mat4(model_view).transpose().inverse()
}

/// Like [`normal_matrix`] but rejects a `model_view` whose linear part has no
/// finite inverse, including near-singular matrices whose inverse overflows
pub fn checked_normal_matrix(model_view: Mat4) -> Result<Mat3, ShadingError> {
    let linear = Mat3::from_mat4(model_view);
    let determinant = linear.determinant();
    if determinant == 0.0 || !determinant.is_finite() {
        return Err(ShadingError::SingularModelView { determinant });
    }
    let normals = linear.transpose().inverse();
    if !normals.is_finite() {
        return Err(ShadingError::SingularModelView { determinant });
    }
    Ok(normals)
}

/// Run the vertex stage for one vertex
pub fn full_bright_vertex(input: &VertexInput, uniforms: &FullBrightUniforms) -> FullBrightOutput {
    let view = uniforms.model_view * input.position.extend(1.0);
    FullBrightOutput {
        clip_position: uniforms.perspective * view,
        view_position: view.truncate() / view.w,
        normal: normal_matrix(uniforms.model_view) * input.normal,
        color: input.color,
    }
}
