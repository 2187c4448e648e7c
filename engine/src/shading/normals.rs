//! Normal-debug vertex and geometry stages
//!
//! The vertex stage passes object-space data through untransformed and paints
//! every vertex yellow. The geometry stage turns each input triangle into three
//! two-vertex line strips, one per corner, pointing along that corner's normal.
//!
//! On the GPU the same expansion happens in `vs_normals` (see `normals.wgsl`).

use super::{VertexInput, MAX_GEOMETRY_VERTICES, NORMAL_COLOR, NORMAL_LENGTH};
use crate::error::ShadingError;
use crate::graphics::Vertex;
use glam::{Mat4, Vec3, Vec4};

/// Transform uniforms of the normal-debug pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalsUniforms {
    pub model: Mat4,
    pub view: Mat4,
    pub perspective: Mat4,
}

impl NormalsUniforms {
    pub fn new(model: Mat4, view: Mat4, perspective: Mat4) -> Self {
        Self {
            model,
            view,
            perspective,
        }
    }

    /// `perspective · view · model`
    pub fn mvp(&self) -> Mat4 {
        self.perspective * self.view * self.model
    }
}

/// Output of the normal-debug vertex stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalsVertexOutput {
    /// Object-space position with `w = 1`; no transform is applied here
    pub position: Vec4,
    pub normal: Vec3,
    /// Always [`NORMAL_COLOR`]
    pub color: Vec3,
}

/// Normal-debug vertex stage
///
/// The input color is discarded on purpose.
pub fn normals_vertex(input: &VertexInput) -> NormalsVertexOutput {
    NormalsVertexOutput {
        position: input.position.extend(1.0),
        normal: input.normal,
        color: NORMAL_COLOR,
    }
}

/// A vertex emitted by the geometry stage
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineVertex {
    pub clip_position: Vec4,
    pub color: Vec3,
}

/// A completed line strip
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineStrip {
    pub vertices: Vec<LineVertex>,
}

/// Collects vertices for one geometry invocation
///
/// Mirrors the emit-vertex / end-primitive contract of a geometry stage: each
/// call to [`end_primitive`](Self::end_primitive) closes the current strip, and
/// no more than `max_vertices` can be emitted per invocation.
#[derive(Debug)]
pub struct GeometryEmitter {
    max_vertices: usize,
    emitted: usize,
    current: Vec<LineVertex>,
    strips: Vec<LineStrip>,
}

impl GeometryEmitter {
    pub fn new(max_vertices: usize) -> Self {
        Self {
            max_vertices,
            emitted: 0,
            current: Vec::new(),
            strips: Vec::new(),
        }
    }

    /// Append a vertex to the current strip
    pub fn emit_vertex(&mut self, vertex: LineVertex) -> Result<(), ShadingError> {
        if self.emitted >= self.max_vertices {
            return Err(ShadingError::EmissionLimit {
                max: self.max_vertices,
            });
        }
        self.emitted += 1;
        self.current.push(vertex);
        Ok(())
    }

    /// Close the current strip. Strips with fewer than two vertices are dropped.
    pub fn end_primitive(&mut self) {
        let vertices = std::mem::take(&mut self.current);
        if vertices.len() >= 2 {
            self.strips.push(LineStrip { vertices });
        }
    }

    /// Number of vertices emitted so far
    pub fn emitted(&self) -> usize {
        self.emitted
    }

    /// Finish the invocation, closing any open strip
    pub fn finish(mut self) -> Vec<LineStrip> {
        self.end_primitive();
        self.strips
    }
}

/// Normal-debug geometry stage for one triangle
///
/// For every corner `P` with normal `N` this emits the strip
/// `MVP·(P, 1)` → `MVP·(P + 0.5·N, 1)`.
pub fn normals_geometry(
    triangle: &[NormalsVertexOutput; 3],
    uniforms: &NormalsUniforms,
) -> Result<Vec<LineStrip>, ShadingError> {
    let mut emitter = GeometryEmitter::new(MAX_GEOMETRY_VERTICES);

    for corner in triangle {
        let mvp = uniforms.mvp();
        let base = corner.position.truncate();
        let tip = base + NORMAL_LENGTH * corner.normal;

        emitter.emit_vertex(LineVertex {
            clip_position: mvp * base.extend(1.0),
            color: corner.color,
        })?;
        emitter.emit_vertex(LineVertex {
            clip_position: mvp * tip.extend(1.0),
            color: corner.color,
        })?;
        emitter.end_primitive();
    }

    Ok(emitter.finish())
}

/// Run the whole normal-debug pipeline over a triangle list
///
/// Trailing vertices that do not form a full triangle are ignored, as the
/// primitive assembler would.
pub fn normal_debug_lines(
    vertices: &[Vertex],
    uniforms: &NormalsUniforms,
) -> Result<Vec<LineStrip>, ShadingError> {
    let mut strips = Vec::with_capacity(vertices.len());
    for triangle in vertices.chunks_exact(3) {
        let corners = [
            normals_vertex(&VertexInput::from(&triangle[0])),
            normals_vertex(&VertexInput::from(&triangle[1])),
            normals_vertex(&VertexInput::from(&triangle[2])),
        ];
        strips.extend(normals_geometry(&corners, uniforms)?);
    }
    Ok(strips)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(position: Vec3) -> LineVertex {
        LineVertex {
            clip_position: position.extend(1.0),
            color: NORMAL_COLOR,
        }
    }

    #[test]
    fn test_emitter_enforces_limit() {
        let mut emitter = GeometryEmitter::new(2);
        emitter.emit_vertex(point(Vec3::ZERO)).unwrap();
        emitter.emit_vertex(point(Vec3::X)).unwrap();
        let err = emitter.emit_vertex(point(Vec3::Z)).unwrap_err();
        assert_eq!(err, ShadingError::EmissionLimit { max: 2 });
        assert_eq!(emitter.emitted(), 2);
    }

    #[test]
    fn test_emitter_drops_degenerate_strips() {
        let mut emitter = GeometryEmitter::new(6);
        emitter.emit_vertex(point(Vec3::ZERO)).unwrap();
        emitter.end_primitive();
        emitter.emit_vertex(point(Vec3::X)).unwrap();
        emitter.emit_vertex(point(Vec3::Z)).unwrap();
        let strips = emitter.finish();
        assert_eq!(strips.len(), 1);
        assert_eq!(strips[0].vertices.len(), 2);
    }

    #[test]
    fn test_vertex_stage_applies_no_transform() {
        let input = VertexInput::new(Vec3::new(3.0, -2.0, 5.0), Vec3::X, Vec3::ZERO);
        let out = normals_vertex(&input);
        assert_eq!(out.position, Vec4::new(3.0, -2.0, 5.0, 1.0));
        assert_eq!(out.normal, Vec3::X);
    }

    #[test]
    fn test_incomplete_triangle_is_ignored() {
        let vertices = [
            Vertex::new([0.0; 3], [0.0, 1.0, 0.0], [1.0; 3]),
            Vertex::new([1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0; 3]),
        ];
        let uniforms = NormalsUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY);
        let strips = normal_debug_lines(&vertices, &uniforms).unwrap();
        assert!(strips.is_empty());
    }
}
