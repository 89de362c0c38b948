use bevy::prelude::{Vec3, Vec4};

use super::{estimate_smooth_normals, generate_surface, GridConfig, NormalMode, SurfaceMesh};
use crate::generation::flat;

/// Flat unit plane centred on the origin in the xz plane, without normals.
///
/// Meant to be scaled up by the renderer's model transform.
pub fn plane(num_points_x: usize, num_points_y: usize) -> SurfaceMesh {
    generate_surface(
        &GridConfig::centered_rect(1., 1., num_points_x, num_points_y),
        &flat(),
        NormalMode::Omit,
    )
}

/// Cube spanning `[-1, 1]` on every axis, eight shared corners with smooth
/// normals and one colour per corner.
pub fn cube() -> SurfaceMesh {
    let vertices = vec![
        Vec3::new(-1., -1., -1.),
        Vec3::new(1., -1., -1.),
        Vec3::new(1., -1., 1.),
        Vec3::new(-1., -1., 1.),
        Vec3::new(-1., 1., -1.),
        Vec3::new(1., 1., -1.),
        Vec3::new(1., 1., 1.),
        Vec3::new(-1., 1., 1.),
    ];

    let colors = vec![
        Vec4::new(1.0, 0.0, 0.0, 1.0),
        Vec4::new(0.0, 1.0, 0.0, 1.0),
        Vec4::new(0.0, 0.0, 1.0, 1.0),
        Vec4::new(1.0, 1.0, 0.0, 1.0),
        Vec4::new(1.0, 0.0, 1.0, 1.0),
        Vec4::new(0.0, 1.0, 1.0, 1.0),
        Vec4::new(0.5, 0.0, 0.5, 1.0),
        Vec4::new(0.0, 0.5, 0.5, 1.0),
    ];

    #[rustfmt::skip]
    let indices = vec![
        0, 1, 2, // bottom
        0, 2, 3,
        0, 1, 5, // sides
        0, 5, 4,
        1, 2, 6,
        1, 6, 5,
        2, 3, 7,
        2, 7, 6,
        3, 0, 4,
        3, 4, 7,
        4, 5, 6, // top
        4, 6, 7,
    ];

    let normals = estimate_smooth_normals(&vertices, &indices);

    SurfaceMesh {
        vertices,
        normals: Some(normals),
        colors: Some(colors),
        indices,
    }
}
