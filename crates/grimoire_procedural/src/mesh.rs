//! # Mesh Container
//!
//! Indexed triangle mesh shared by the primitive generators, the procedural
//! constructors and the modifier pipeline. Positions, normals and uvs are
//! kept in parallel arrays; `to_vertex_buffer` interleaves them for upload.

use bytemuck::{Pod, Zeroable};

use grimoire_shared::{Vec2, Vec3};

use crate::error::{GeometryError, GeometryResult};

/// Interleaved vertex as uploaded to a GPU buffer.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// Texture coordinate.
    pub uv: [f32; 2],
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Bounds {
    /// Extent along each axis.
    #[must_use]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions.
    pub positions: Vec<Vec3>,
    /// Vertex normals (same length as `positions`).
    pub normals: Vec<Vec3>,
    /// Texture coordinates (same length as `positions`).
    pub uvs: Vec<Vec2>,
    /// Triangle list, counter-clockwise when viewed from outside.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Creates an empty mesh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty mesh with reserved capacity.
    #[must_use]
    pub fn with_capacity(vertices: usize, indices: usize) -> Self {
        Self {
            positions: Vec::with_capacity(vertices),
            normals: Vec::with_capacity(vertices),
            uvs: Vec::with_capacity(vertices),
            indices: Vec::with_capacity(indices),
        }
    }

    /// Number of vertices.
    #[inline]
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    #[must_use]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// True when the mesh has no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Appends a vertex and returns its index.
    pub fn push_vertex(&mut self, position: Vec3, normal: Vec3, uv: Vec2) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        self.uvs.push(uv);
        index
    }

    /// Appends a triangle.
    pub fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.indices.extend_from_slice(&[a, b, c]);
    }

    /// Appends another mesh, rebasing its indices.
    pub fn merge(&mut self, other: &Mesh) {
        let base = self.positions.len() as u32;
        self.positions.extend_from_slice(&other.positions);
        self.normals.extend_from_slice(&other.normals);
        self.uvs.extend_from_slice(&other.uvs);
        self.indices.extend(other.indices.iter().map(|i| i + base));
    }

    /// Moves every vertex by `offset`.
    pub fn translate(&mut self, offset: Vec3) {
        for p in &mut self.positions {
            *p += offset;
        }
    }

    /// Scales every vertex component-wise.
    pub fn scale(&mut self, factor: Vec3) {
        for p in &mut self.positions {
            *p = p.mul_elements(factor);
        }
    }

    /// Reverses triangle winding and negates normals.
    pub fn flip_winding(&mut self) {
        for tri in self.indices.chunks_exact_mut(3) {
            tri.swap(1, 2);
        }
        for n in &mut self.normals {
            *n = -*n;
        }
    }

    /// Recomputes smooth vertex normals as area-weighted face normals.
    ///
    /// Vertices not referenced by any non-degenerate triangle get `+Y`.
    pub fn compute_normals(&mut self) {
        let mut accum = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            if a >= accum.len() || b >= accum.len() || c >= accum.len() {
                continue;
            }
            let pa = self.positions[a];
            // Cross product length is twice the area, so this is area-weighted.
            let face = (self.positions[b] - pa).cross(self.positions[c] - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }
        self.normals = accum
            .into_iter()
            .map(|n| {
                let n = n.normalize_or_zero();
                if n == Vec3::ZERO {
                    Vec3::Y
                } else {
                    n
                }
            })
            .collect();
    }

    /// Axis-aligned bounds, `None` for an empty mesh.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        let first = *self.positions.first()?;
        let mut bounds = Bounds { min: first, max: first };
        for p in &self.positions[1..] {
            bounds.min = Vec3::new(bounds.min.x.min(p.x), bounds.min.y.min(p.y), bounds.min.z.min(p.z));
            bounds.max = Vec3::new(bounds.max.x.max(p.x), bounds.max.y.max(p.y), bounds.max.z.max(p.z));
        }
        Some(bounds)
    }

    /// Largest distance of any vertex from the origin.
    #[must_use]
    pub fn max_radius(&self) -> f32 {
        self.positions.iter().map(|p| p.length()).fold(0.0, f32::max)
    }

    /// Signed enclosed volume; positive for a closed, outward-wound mesh.
    #[must_use]
    pub fn signed_volume(&self) -> f32 {
        self.indices
            .chunks_exact(3)
            .filter_map(|tri| {
                let a = *self.positions.get(tri[0] as usize)?;
                let b = *self.positions.get(tri[1] as usize)?;
                let c = *self.positions.get(tri[2] as usize)?;
                Some(a.dot(b.cross(c)))
            })
            .sum::<f32>()
            / 6.0
    }

    /// Structural check: parallel arrays, index range, finite data.
    ///
    /// # Errors
    ///
    /// [`GeometryError::MalformedMesh`] describing the first problem found.
    pub fn validate(&self) -> GeometryResult<()> {
        let n = self.positions.len();
        if self.normals.len() != n || self.uvs.len() != n {
            return Err(GeometryError::MalformedMesh(format!(
                "attribute length mismatch: {} positions, {} normals, {} uvs",
                n,
                self.normals.len(),
                self.uvs.len()
            )));
        }
        if self.indices.len() % 3 != 0 {
            return Err(GeometryError::MalformedMesh(format!(
                "index count {} is not a multiple of 3",
                self.indices.len()
            )));
        }
        if let Some(bad) = self.indices.iter().find(|&&i| i as usize >= n) {
            return Err(GeometryError::MalformedMesh(format!(
                "index {bad} out of range for {n} vertices"
            )));
        }
        if let Some(i) = self.positions.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::MalformedMesh(format!("non-finite position at vertex {i}")));
        }
        if let Some(i) = self.normals.iter().position(|p| !p.is_finite()) {
            return Err(GeometryError::MalformedMesh(format!("non-finite normal at vertex {i}")));
        }
        Ok(())
    }

    /// Interleaves attributes into an upload-ready buffer.
    #[must_use]
    pub fn to_vertex_buffer(&self) -> Vec<MeshVertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .zip(&self.uvs)
            .map(|((p, n), uv)| MeshVertex {
                position: p.to_array(),
                normal: n.to_array(),
                uv: uv.to_array(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> Mesh {
        let mut mesh = Mesh::new();
        let a = mesh.push_vertex(Vec3::ZERO, Vec3::ZERO, Vec2::ZERO);
        let b = mesh.push_vertex(Vec3::X, Vec3::ZERO, Vec2::new(1.0, 0.0));
        let c = mesh.push_vertex(Vec3::Y, Vec3::ZERO, Vec2::new(0.0, 1.0));
        mesh.push_triangle(a, b, c);
        mesh
    }

    #[test]
    fn test_compute_normals_ccw_faces_plus_z() {
        let mut mesh = triangle();
        mesh.compute_normals();
        for n in &mesh.normals {
            assert!((n.z - 1.0).abs() < 1e-6, "normal {n:?} should face +Z");
        }
    }

    #[test]
    fn test_flip_winding_reverses_normals() {
        let mut mesh = triangle();
        mesh.flip_winding();
        mesh.compute_normals();
        assert!(mesh.normals[0].z < 0.0);
    }

    #[test]
    fn test_merge_rebases_indices() {
        let mut mesh = triangle();
        mesh.merge(&triangle());
        assert_eq!(mesh.vertex_count(), 6);
        assert_eq!(&mesh.indices[3..], &[3, 4, 5]);
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_validate_catches_bad_index() {
        let mut mesh = triangle();
        mesh.push_triangle(0, 1, 9);
        assert!(matches!(mesh.validate(), Err(GeometryError::MalformedMesh(_))));
    }

    #[test]
    fn test_validate_catches_nan() {
        let mut mesh = triangle();
        mesh.positions[1].x = f32::NAN;
        assert!(mesh.validate().is_err());
    }

    #[test]
    fn test_vertex_buffer_is_pod() {
        let mesh = triangle();
        let buffer = mesh.to_vertex_buffer();
        let bytes: &[u8] = bytemuck::cast_slice(&buffer);
        assert_eq!(bytes.len(), 3 * 32);
    }

    #[test]
    fn test_bounds() {
        let bounds = triangle().bounds().expect("non-empty");
        assert_eq!(bounds.min, Vec3::ZERO);
        assert_eq!(bounds.max, Vec3::new(1.0, 1.0, 0.0));
        assert!(Mesh::new().bounds().is_none());
    }
}
