//! Transform behaviour of the full-bright vertex stage

use glam::{EulerRot, Mat3, Mat4, Quat, Vec3, Vec4};
use voxel_engine::shading::{full_bright_vertex, normal_matrix, FullBrightUniforms, VertexInput};

#[test]
fn test_identity_model_view_passes_through() {
    let perspective = Mat4::perspective_rh(1.0, 1.5, 0.1, 100.0);
    let uniforms = FullBrightUniforms::new(Mat4::IDENTITY, perspective);
    let input = VertexInput::new(
        Vec3::new(1.5, -2.0, -7.0),
        Vec3::new(0.0, 2.0, 0.0),
        Vec3::new(0.1, 0.2, 0.3),
    );

    let out = full_bright_vertex(&input, &uniforms);

    assert_eq!(out.view_position, input.position);
    assert_eq!(out.normal, input.normal);
    assert_eq!(out.color, input.color);
    assert!(out
        .clip_position
        .abs_diff_eq(perspective * input.position.extend(1.0), 1e-6));
}

#[test]
fn test_clip_position_composes_perspective_and_model_view() {
    let model_view = Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0))
        * Mat4::from_rotation_y(0.7)
        * Mat4::from_scale(Vec3::new(1.0, 2.0, 0.5));
    let perspective =
        Mat4::perspective_rh(std::f32::consts::FRAC_PI_3, 16.0 / 9.0, 0.1, 1024.0);
    let uniforms = FullBrightUniforms::new(model_view, perspective);
    let input = VertexInput::new(Vec3::new(0.5, 0.25, 1.0), Vec3::X, Vec3::ONE);

    let out = full_bright_vertex(&input, &uniforms);

    let expected = perspective * model_view * Vec4::new(0.5, 0.25, 1.0, 1.0);
    assert!(out.clip_position.abs_diff_eq(expected, 1e-4));
    assert!(out
        .view_position
        .abs_diff_eq(model_view.transform_point3(input.position), 1e-5));
}

#[test]
fn test_rotation_normal_matrix_is_the_rotation() {
    let rotation = Quat::from_euler(EulerRot::YXZ, 0.4, -1.1, 2.3);
    let model_view = Mat4::from_quat(rotation);

    let normals = normal_matrix(model_view);
    assert!(normals.abs_diff_eq(Mat3::from_quat(rotation), 1e-5));

    for normal in [Vec3::X, Vec3::Y, Vec3::new(0.6, 0.0, -0.8)] {
        let transformed = normals * normal;
        assert!((transformed.length() - normal.length()).abs() < 1e-5);
        assert!(transformed.abs_diff_eq(rotation * normal, 1e-5));
    }
}

#[test]
fn test_translation_does_not_affect_normals() {
    let model_view = Mat4::from_translation(Vec3::new(10.0, -3.0, 5.0));
    let uniforms = FullBrightUniforms::new(model_view, Mat4::IDENTITY);
    let input = VertexInput::new(Vec3::ZERO, Vec3::Z, Vec3::ONE);

    let out = full_bright_vertex(&input, &uniforms);
    assert!(out.normal.abs_diff_eq(Vec3::Z, 1e-6));
    assert!(out.view_position.abs_diff_eq(Vec3::new(10.0, -3.0, 5.0), 1e-6));
}
