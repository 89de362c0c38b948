use bevy::prelude::{Vec2, Vec3};
use ndarray::Array2;

use crate::meshing::Grid;

/// Scalar function of the two parametric coordinates.
pub type ScalarFn = Box<dyn Fn(f32, f32) -> f32 + Send + Sync>;

/// A height function `f(x, y) -> z`, with or without its partial derivatives.
pub enum HeightField {
    Analytic {
        f: ScalarFn,
        dfdx: ScalarFn,
        dfdy: ScalarFn,
    },
    Numeric {
        f: ScalarFn,
    },
}

impl HeightField {
    pub fn analytic(
        f: impl Fn(f32, f32) -> f32 + Send + Sync + 'static,
        dfdx: impl Fn(f32, f32) -> f32 + Send + Sync + 'static,
        dfdy: impl Fn(f32, f32) -> f32 + Send + Sync + 'static,
    ) -> Self {
        Self::Analytic {
            f: Box::new(f),
            dfdx: Box::new(dfdx),
            dfdy: Box::new(dfdy),
        }
    }

    pub fn numeric(f: impl Fn(f32, f32) -> f32 + Send + Sync + 'static) -> Self {
        Self::Numeric { f: Box::new(f) }
    }

    pub fn height(&self, x: f32, y: f32) -> f32 {
        match self {
            Self::Analytic { f, .. } | Self::Numeric { f } => f(x, y),
        }
    }

    /// `(df/dx, df/dy)` at `(x, y)`, if the field knows its derivatives.
    pub fn gradient(&self, x: f32, y: f32) -> Option<Vec2> {
        match self {
            Self::Analytic { dfdx, dfdy, .. } => Some(Vec2::new(dfdx(x, y), dfdy(x, y))),
            Self::Numeric { .. } => None,
        }
    }

    /// Unnormalized surface normal `(-df/dx, 1, -df/dy)` in vertex space,
    /// where height is the second coordinate.
    pub fn normal_at(&self, x: f32, y: f32) -> Option<Vec3> {
        self.gradient(x, y).map(|g| Vec3 {
            x: -g.x,
            y: 1.,
            z: -g.y,
        })
    }

    pub fn has_derivatives(&self) -> bool {
        matches!(self, Self::Analytic { .. })
    }
}

/// Heights sampled over a grid, indexed `[[row, column]]`.
pub struct HeightMap(pub Array2<f32>);

impl HeightMap {
    pub fn sample(grid: &Grid, field: &HeightField) -> Self {
        let config = &grid.config;
        HeightMap(Array2::from_shape_fn(
            (config.num_points_y, config.num_points_x),
            |(i, j)| {
                let p = config.point_at(i, j);
                field.height(p.x, p.y)
            },
        ))
    }

    pub fn height_at(&self, i: usize, j: usize) -> f32 {
        self.0[[i, j]]
    }

    /// Lowest and highest sampled height, `None` for an empty map.
    pub fn range(&self) -> Option<(f32, f32)> {
        self.0.iter().fold(None, |range, &h| match range {
            None => Some((h, h)),
            Some((lo, hi)) => Some((lo.min(h), hi.max(h))),
        })
    }

    pub fn dim(&self) -> (usize, usize) {
        self.0.dim()
    }
}
