use std::collections::HashMap;

use bevy::prelude::Vec3;

pub fn triangles_per_vertex(indices: &[u32]) -> HashMap<u32, Vec<usize>> {
    let mut incidence: HashMap<u32, Vec<usize>> = HashMap::new();

    // A trailing group of fewer than three indices is not a triangle
    for (triangle, corners) in indices.chunks_exact(3).enumerate() {
        for &vertex in corners {
            incidence.entry(vertex).or_default().push(triangle);
        }
    }

    incidence
}

/// `(v2 - v1) x (v3 - v1)` for the triangle `(i1, i2, i3)`.
pub fn face_normal(vertices: &[Vec3], i1: u32, i2: u32, i3: u32) -> Vec3 {
    let v1 = vertices[i1 as usize];
    let v2 = vertices[i2 as usize];
    let v3 = vertices[i3 as usize];

    (v2 - v1).cross(v3 - v1)
}

pub fn face_normals(vertices: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    indices
        .chunks_exact(3)
        .map(|t| face_normal(vertices, t[0], t[1], t[2]))
        .collect()
}

/// One normal per vertex: the sum of the raw face normals of every incident
/// triangle, so larger faces weigh more. Not normalized; zero for a vertex no
/// triangle references.
pub fn estimate_smooth_normals(vertices: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let incidence = triangles_per_vertex(indices);
    let faces = face_normals(vertices, indices);

    (0..vertices.len())
        .map(|v| {
            incidence
                .get(&(v as u32))
                .map_or(Vec3::ZERO, |triangles| {
                    triangles
                        .iter()
                        .fold(Vec3::ZERO, |normal, &t| normal + faces[t])
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn quad() -> (Vec<Vec3>, Vec<u32>) {
        // Unit square in the xz plane with the grid's winding
        let vertices = vec![
            Vec3::new(0., 0., 0.),
            Vec3::new(1., 0., 0.),
            Vec3::new(0., 0., 1.),
            Vec3::new(1., 0., 1.),
        ];
        (vertices, vec![0, 2, 3, 0, 3, 1])
    }

    #[test]
    fn incidence_keeps_triangle_order() {
        let (_, indices) = quad();
        let incidence = triangles_per_vertex(&indices);

        assert_eq!(incidence[&0], vec![0, 1]);
        assert_eq!(incidence[&1], vec![1]);
        assert_eq!(incidence[&2], vec![0]);
        assert_eq!(incidence[&3], vec![0, 1]);
    }

    #[test]
    fn partial_triangle_is_ignored() {
        let incidence = triangles_per_vertex(&[0, 1, 2, 3, 4]);
        assert!(!incidence.contains_key(&3));
        assert!(!incidence.contains_key(&4));
    }

    #[test]
    fn face_normal_is_unnormalized_cross_product() {
        let vertices = [
            Vec3::new(0., 0., 0.),
            Vec3::new(2., 0., 0.),
            Vec3::new(0., 3., 0.),
        ];
        assert_eq!(face_normal(&vertices, 0, 1, 2), Vec3::new(0., 0., 6.));
        assert_eq!(face_normal(&vertices, 0, 2, 1), Vec3::new(0., 0., -6.));
    }

    #[test]
    fn flat_quad_points_up() {
        let (vertices, indices) = quad();
        let normals = estimate_smooth_normals(&vertices, &indices);

        assert_eq!(normals.len(), 4);
        // Shared corners collect both faces
        assert_relative_eq!(normals[0].y, 2.);
        assert_relative_eq!(normals[3].y, 2.);
        assert_relative_eq!(normals[1].y, 1.);
        assert_relative_eq!(normals[2].y, 1.);
        for n in &normals {
            assert_eq!(n.x, 0.);
            assert_eq!(n.z, 0.);
        }
    }

    #[test]
    fn isolated_vertex_gets_zero() {
        let (mut vertices, indices) = quad();
        vertices.push(Vec3::new(5., 5., 5.));

        let normals = estimate_smooth_normals(&vertices, &indices);
        assert_eq!(normals.len(), 5);
        assert_eq!(normals[4], Vec3::ZERO);
    }

    #[test]
    fn larger_faces_weigh_more() {
        let vertices = vec![
            Vec3::new(0., 0., 0.),
            Vec3::new(0., 0., 1.),
            Vec3::new(1., 0., 0.),
            // A big triangle tilted towards +x
            Vec3::new(0., 0., -4.),
            Vec3::new(-4., 4., 0.),
        ];
        let indices = vec![0, 1, 2, 0, 3, 4];
        let normals = estimate_smooth_normals(&vertices, &indices);

        let small = face_normal(&vertices, 0, 1, 2);
        let big = face_normal(&vertices, 0, 3, 4);
        assert!(big.length() > small.length());
        assert_eq!(normals[0], small + big);
    }

    #[test]
    fn degenerate_triangle_contributes_zero() {
        let vertices = vec![Vec3::new(1., 2., 3.), Vec3::new(4., 5., 6.)];
        let normals = estimate_smooth_normals(&vertices, &[0, 0, 1]);

        assert_eq!(normals, vec![Vec3::ZERO, Vec3::ZERO]);
    }

    #[test]
    fn empty_input() {
        assert!(estimate_smooth_normals(&[], &[]).is_empty());
    }
}
