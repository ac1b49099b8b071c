//! Quad geometry for flat (Mercator) maps.

use crate::buffers::{MeshBuffers, MeshVertices};

/// A quad covering `[xmin, xmax] × [0, 1]` in normalized Mercator space,
/// as two triangles over four shared corners.
///
/// `xmin == xmax` yields a zero-width quad, which draws nothing.
pub fn build_flat_quad(xmin: f64, xmax: f64) -> MeshBuffers {
    let (x0, x1) = (xmin as f32, xmax as f32);
    MeshBuffers {
        vertices: MeshVertices::Planar(vec![[x0, 0.0], [x1, 0.0], [x0, 1.0], [x1, 1.0]]),
        indices: vec![0, 1, 2, 2, 1, 3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quad_has_two_triangles_over_four_corners() {
        let quad = build_flat_quad(-1.0, 2.0);
        assert_eq!(quad.vertex_count(), 4);
        assert_eq!(quad.indices.len(), 6);
        assert_eq!(quad.triangle_count(), 2);
    }

    #[test]
    fn test_quad_spans_requested_bounds() {
        let quad = build_flat_quad(-1.0, 2.0);
        let MeshVertices::Planar(corners) = &quad.vertices else {
            panic!("flat quad must be planar");
        };
        let xs: Vec<f32> = corners.iter().map(|c| c[0]).collect();
        let ys: Vec<f32> = corners.iter().map(|c| c[1]).collect();
        assert_eq!(xs.iter().cloned().fold(f32::INFINITY, f32::min), -1.0);
        assert_eq!(xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 2.0);
        assert_eq!(ys.iter().cloned().fold(f32::INFINITY, f32::min), 0.0);
        assert_eq!(ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max), 1.0);
    }

    #[test]
    fn test_degenerate_quad_is_allowed() {
        let quad = build_flat_quad(1.0, 1.0);
        let MeshVertices::Planar(corners) = &quad.vertices else {
            panic!("flat quad must be planar");
        };
        assert!(corners.iter().all(|c| c[0] == 1.0));
        assert_eq!(quad.indices.len(), 6);
    }
}
