use bevy::prelude::Vec3;

use super::Grid;
use crate::{HeightField, HeightMap};

pub struct SampledSurface {
    pub heights: HeightMap,
    pub vertices: Vec<Vec3>,
    /// Present only when the field has analytic derivatives.
    pub analytic_normals: Option<Vec<Vec3>>,
}

/// Evaluates `field` at every grid point.
///
/// Grid point `(x, y)` becomes vertex `(x, f(x, y), y)`: height goes on the
/// second axis and the grid's y axis maps to the vertex z axis. Analytic
/// normals are `(-df/dx, 1, -df/dy)` and are left unnormalized.
pub fn sample_surface(grid: &Grid, field: &HeightField) -> SampledSurface {
    let heights = HeightMap::sample(grid, field);

    let vertices = grid
        .points
        .iter()
        .zip(heights.0.iter())
        .map(|(p, &z)| Vec3 {
            x: p.x,
            y: z,
            z: p.y,
        })
        .collect();

    let analytic_normals = match field {
        HeightField::Analytic { dfdx, dfdy, .. } => Some(
            grid.points
                .iter()
                .map(|p| Vec3 {
                    x: -dfdx(p.x, p.y),
                    y: 1.,
                    z: -dfdy(p.x, p.y),
                })
                .collect(),
        ),
        HeightField::Numeric { .. } => None,
    };

    SampledSurface {
        heights,
        vertices,
        analytic_normals,
    }
}
