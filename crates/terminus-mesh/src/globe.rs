//! Sphere geometry for the globe projection.

use glam::{DVec3, Vec3};

use crate::buffers::{MeshBuffers, MeshVertices};

/// Subdivisions per axis used for the globe shell unless configured otherwise.
pub const DEFAULT_GLOBE_GRANULARITY: u32 = 100;

/// Northern limit of Web Mercator, in degrees. The shell spans ±this latitude
/// and the pole caps close the remainder.
pub const MAX_MERCATOR_LATITUDE: f64 = 85.051129;

/// Upper bound on globe subdivisions; larger requests are lowered to this.
pub const MAX_GLOBE_GRANULARITY: u32 = 4096;

const MIN_GRANULARITY: u32 = 3;

/// Position on the unit sphere for a longitude/latitude in degrees.
///
/// Y points to the north pole, (0°, 0°) lies on +Z and 90°E on +X.
pub fn lng_lat_to_unit_sphere(lng: f64, lat: f64) -> Vec3 {
    let (lng, lat) = (lng.to_radians(), lat.to_radians());
    DVec3::new(lat.cos() * lng.sin(), lat.sin(), lat.cos() * lng.cos()).as_vec3()
}

fn effective_granularity(requested: u32) -> u32 {
    requested.clamp(MIN_GRANULARITY, MAX_GLOBE_GRANULARITY)
}

/// Build a tessellated unit sphere.
///
/// The shell is a `granularity × granularity` longitude/latitude grid between
/// ±[`MAX_MERCATOR_LATITUDE`], with a seam column duplicated at ±180°.
/// Each pole is closed by a triangle fan around a single pole vertex.
/// Granularity is clamped to `3..=`[`MAX_GLOBE_GRANULARITY`].
pub fn build_globe_mesh(granularity: u32) -> MeshBuffers {
    let g = effective_granularity(granularity);
    let stride = g + 1;
    let (gs, strides) = (g as usize, stride as usize);

    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(strides * strides + 2);
    for row in 0..=g {
        let lat = MAX_MERCATOR_LATITUDE - 2.0 * MAX_MERCATOR_LATITUDE * row as f64 / g as f64;
        for col in 0..=g {
            let lng = -180.0 + 360.0 * col as f64 / g as f64;
            positions.push(lng_lat_to_unit_sphere(lng, lat).to_array());
        }
    }

    let north_pole = positions.len() as u32;
    positions.push([0.0, 1.0, 0.0]);
    let south_pole = positions.len() as u32;
    positions.push([0.0, -1.0, 0.0]);

    let mut indices: Vec<u32> = Vec::with_capacity(gs * gs * 6 + gs * 6);
    for row in 0..g {
        for col in 0..g {
            let top_left = row * stride + col;
            let top_right = top_left + 1;
            let bottom_left = top_left + stride;
            let bottom_right = bottom_left + 1;
            indices.extend_from_slice(&[top_left, bottom_left, top_right]);
            indices.extend_from_slice(&[top_right, bottom_left, bottom_right]);
        }
    }

    let last_row = g * stride;
    for col in 0..g {
        indices.extend_from_slice(&[north_pole, col, col + 1]);
        indices.extend_from_slice(&[south_pole, last_row + col + 1, last_row + col]);
    }

    MeshBuffers {
        vertices: MeshVertices::Spherical(positions),
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spherical(mesh: &MeshBuffers) -> &[[f32; 3]] {
        match &mesh.vertices {
            MeshVertices::Spherical(v) => v,
            MeshVertices::Planar(_) => panic!("globe mesh must be spherical"),
        }
    }

    #[test]
    fn test_vertices_on_unit_sphere() {
        let mesh = build_globe_mesh(24);
        for p in spherical(&mesh) {
            let len = Vec3::from_array(*p).length();
            assert!((len - 1.0).abs() < 1e-5, "vertex not on unit sphere: length = {len}");
        }
    }

    #[test]
    fn test_counts_for_reference_granularity() {
        let g = DEFAULT_GLOBE_GRANULARITY as usize;
        let mesh = build_globe_mesh(DEFAULT_GLOBE_GRANULARITY);
        assert_eq!(mesh.vertex_count(), (g + 1) * (g + 1) + 2);
        assert_eq!(mesh.triangle_count(), g * g * 2 + g * 2);
    }

    #[test]
    fn test_indices_valid() {
        let mesh = build_globe_mesh(16);
        let n = mesh.vertex_count() as u32;
        assert_eq!(mesh.indices.len() % 3, 0);
        for &idx in &mesh.indices {
            assert!(idx < n, "Index {idx} out of bounds (vertex count = {n})");
        }
    }

    #[test]
    fn test_pole_caps_reach_the_poles() {
        let mesh = build_globe_mesh(8);
        let verts = spherical(&mesh);
        let n = verts.len() as u32;
        let (north, south) = (n - 2, n - 1);
        assert_eq!(verts[north as usize], [0.0, 1.0, 0.0]);
        assert_eq!(verts[south as usize], [0.0, -1.0, 0.0]);
        assert_eq!(mesh.indices.iter().filter(|&&i| i == north).count(), 8);
        assert_eq!(mesh.indices.iter().filter(|&&i| i == south).count(), 8);
    }

    #[test]
    fn test_triangles_wind_outward() {
        let mesh = build_globe_mesh(12);
        let verts = spherical(&mesh);
        for tri in mesh.indices.chunks(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| Vec3::from_array(verts[i as usize]));
            let normal = (b - a).cross(c - a);
            if normal.length() < 1e-9 {
                continue;
            }
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid) > 0.0, "triangle {tri:?} faces inward");
        }
    }

    #[test]
    fn test_small_granularity_is_raised() {
        let mesh = build_globe_mesh(0);
        assert_eq!(mesh.vertex_count(), 4 * 4 + 2);
    }

    #[test]
    fn test_huge_granularity_is_capped() {
        assert_eq!(effective_granularity(70_000), MAX_GLOBE_GRANULARITY);
        assert_eq!(effective_granularity(u32::MAX), MAX_GLOBE_GRANULARITY);
        assert_eq!(effective_granularity(MAX_GLOBE_GRANULARITY), MAX_GLOBE_GRANULARITY);
        assert_eq!(effective_granularity(0), 3);
        // Vertex and index counts at the cap still fit u32 indices.
        let stride = MAX_GLOBE_GRANULARITY as u64 + 1;
        assert!(stride * stride + 2 < u32::MAX as u64);
    }

    #[test]
    fn test_axis_convention() {
        let origin = lng_lat_to_unit_sphere(0.0, 0.0);
        let east = lng_lat_to_unit_sphere(90.0, 0.0);
        let north = lng_lat_to_unit_sphere(0.0, 90.0);
        assert!((origin - Vec3::Z).length() < 1e-6);
        assert!((east - Vec3::X).length() < 1e-6);
        assert!((north - Vec3::Y).length() < 1e-6);
    }
}
