//! CPU-side vertex and index data for the overlay.

/// Vertex positions: 2D normalized Mercator for flat maps, 3D unit sphere
/// for the globe.
#[derive(Clone, Debug, PartialEq)]
pub enum MeshVertices {
    Planar(Vec<[f32; 2]>),
    Spherical(Vec<[f32; 3]>),
}

impl MeshVertices {
    pub fn len(&self) -> usize {
        match self {
            Self::Planar(v) => v.len(),
            Self::Spherical(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `f32` components per vertex.
    pub fn components(&self) -> usize {
        match self {
            Self::Planar(_) => 2,
            Self::Spherical(_) => 3,
        }
    }

    /// Raw bytes for upload to a vertex buffer.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Self::Planar(v) => bytemuck::cast_slice(v),
            Self::Spherical(v) => bytemuck::cast_slice(v),
        }
    }
}

/// A triangle list ready for upload.
#[derive(Clone, Debug, PartialEq)]
pub struct MeshBuffers {
    pub vertices: MeshVertices,
    pub indices: Vec<u32>,
}

impl MeshBuffers {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        self.vertices.as_bytes()
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_views_have_expected_lengths() {
        let mesh = MeshBuffers {
            vertices: MeshVertices::Spherical(vec![[0.0, 1.0, 0.0]; 4]),
            indices: vec![0, 1, 2, 2, 1, 3],
        };
        assert_eq!(mesh.vertex_bytes().len(), 4 * 3 * 4);
        assert_eq!(mesh.index_bytes().len(), 6 * 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.components(), 3);
    }

    #[test]
    fn test_planar_components() {
        let v = MeshVertices::Planar(vec![]);
        assert!(v.is_empty());
        assert_eq!(v.components(), 2);
    }
}
