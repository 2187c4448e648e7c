//! Shader management
//!
//! Provides the WGSL sources and entry point names for both shading pipelines.

/// Full-bright vertex stage and Phong fragment stage
pub const PHONG_SHADER: &str = include_str!("phong.wgsl");

/// Normal visualization program (vertex-pulling line expansion)
pub const NORMALS_SHADER: &str = include_str!("normals.wgsl");

/// Entry points of [`PHONG_SHADER`]
pub mod phong {
    pub const VERTEX_ENTRY: &str = "vs_full_bright";
    pub const FRAGMENT_ENTRY: &str = "fs_phong";
}

/// Entry points of [`NORMALS_SHADER`]
pub mod normals {
    pub const VERTEX_ENTRY: &str = "vs_normals";
    pub const FRAGMENT_ENTRY: &str = "fs_line";
}
