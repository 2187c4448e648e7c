//! Phong fragment stage
//!
//! Lambertian diffuse plus a Blinn-Phong highlight under a single point
//! light, with a flat ambient term. Mirrors `fs_phong` in `phong.wgsl`.

use super::{AMBIENT_STRENGTH, SHININESS, SPECULAR_COLOR};
use glam::{Vec3, Vec4};

/// Interpolated inputs of one fragment, all in view space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongFragmentInput {
    /// Interpolated normal, not necessarily unit length
    pub normal: Vec3,
    /// View-space position of the fragment
    pub position: Vec3,
    /// Base color
    pub color: Vec3,
}

/// Diffuse and specular factors for one fragment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LightTerms {
    pub diffuse: f32,
    pub specular: f32,
}

/// Compute the diffuse and specular factors for a fragment lit by `light`
///
/// The camera is assumed to sit at the view-space origin. When the light is
/// behind the surface both factors are exactly zero.
pub fn light_terms(normal: Vec3, position: Vec3, light: Vec3) -> LightTerms {
    let normal = normal.normalize();
    let light_dir = (light - position).normalize();
    let diffuse = normal.dot(light_dir).max(0.0);

    let specular = if diffuse > 0.0 {
        let camera_dir = (-position).normalize();
        let half_dir = (light_dir + camera_dir).normalize();
        diffuse * half_dir.dot(normal).max(0.0).powi(SHININESS)
    } else {
        0.0
    };

    LightTerms { diffuse, specular }
}

/// Shade one fragment
///
/// Returns `0.33·C + diffuse·C + specular·(0.7, 0.7, 0.7)` with alpha 1.
pub fn phong_fragment(input: &PhongFragmentInput, light: Vec3) -> Vec4 {
    let LightTerms { diffuse, specular } = light_terms(input.normal, input.position, light);
    let color =
        AMBIENT_STRENGTH * input.color + diffuse * input.color + specular * SPECULAR_COLOR;
    color.extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alpha_is_always_one() {
        let input = PhongFragmentInput {
            normal: Vec3::Z,
            position: Vec3::new(0.3, -0.2, -4.0),
            color: Vec3::new(0.2, 0.4, 0.6),
        };
        let out = phong_fragment(&input, Vec3::new(1.0, 2.0, 0.0));
        assert_eq!(out.w, 1.0);
    }

    #[test]
    fn test_unnormalized_normal_is_renormalized() {
        let position = Vec3::new(0.0, 0.0, -2.0);
        let light = Vec3::new(0.0, 3.0, 1.0);
        let unit = light_terms(Vec3::Y, position, light);
        let scaled = light_terms(Vec3::Y * 7.5, position, light);
        assert!((unit.diffuse - scaled.diffuse).abs() < 1e-6);
        assert!((unit.specular - scaled.specular).abs() < 1e-6);
    }

    #[test]
    fn test_zero_normal_is_not_guarded() {
        // normalize(0) is NaN; f32::max discards it, so the light contributes nothing
        let terms = light_terms(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        assert!(Vec3::ZERO.normalize().is_nan());
        assert_eq!(terms.diffuse, 0.0);
        assert_eq!(terms.specular, 0.0);
    }
}
