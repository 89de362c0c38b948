use bevy::prelude::Vec2;

/// Shape of a regular sampling grid over the parameter plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridConfig {
    pub origin_x: f32,
    pub origin_y: f32,
    pub num_points_x: usize,
    pub num_points_y: usize,
    pub step_x: f32,
    pub step_y: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::centered(100., 101)
    }
}

impl GridConfig {
    /// Square grid of `num_points` x `num_points` covering `[-size/2, size/2]` on both axes.
    pub fn centered(size: f32, num_points: usize) -> Self {
        Self::centered_rect(size, size, num_points, num_points)
    }

    pub fn centered_rect(width: f32, depth: f32, num_points_x: usize, num_points_y: usize) -> Self {
        // A single column still needs a finite step, otherwise the origin becomes NaN.
        let step = |size: f32, n: usize| size / (n.max(2) - 1) as f32;
        Self {
            origin_x: -width / 2.,
            origin_y: -depth / 2.,
            num_points_x,
            num_points_y,
            step_x: step(width, num_points_x),
            step_y: step(depth, num_points_y),
        }
    }

    pub fn num_points(&self) -> usize {
        self.num_points_x * self.num_points_y
    }

    pub fn num_cells(&self) -> usize {
        self.num_points_x.saturating_sub(1) * self.num_points_y.saturating_sub(1)
    }

    pub fn num_triangles(&self) -> usize {
        2 * self.num_cells()
    }

    /// Parametric coordinates of row `i`, column `j`.
    pub fn point_at(&self, i: usize, j: usize) -> Vec2 {
        Vec2 {
            x: self.origin_x + j as f32 * self.step_x,
            y: self.origin_y + i as f32 * self.step_y,
        }
    }

    pub fn index_of(&self, i: usize, j: usize) -> u32 {
        (i * self.num_points_x + j) as u32
    }
}

/// Sample points and triangle list of a [`GridConfig`].
#[derive(Clone, Debug, PartialEq)]
pub struct Grid {
    pub config: GridConfig,
    pub points: Vec<Vec2>,
    pub indices: Vec<u32>,
}

pub fn build_grid(config: &GridConfig) -> Grid {
    let mut points = Vec::with_capacity(config.num_points());

    for i in 0..config.num_points_y {
        for j in 0..config.num_points_x {
            points.push(config.point_at(i, j));
        }
    }

    let mut indices = Vec::with_capacity(3 * config.num_triangles());
    let idx = |i: usize, j: usize| config.index_of(i, j);

    for i in 0..config.num_points_y.saturating_sub(1) {
        for j in 0..config.num_points_x.saturating_sub(1) {
            // Winding keeps face normals pointing up (+y) for a rising step in both axes
            indices.extend([idx(i, j), idx(i + 1, j), idx(i + 1, j + 1)]);
            indices.extend([idx(i, j), idx(i + 1, j + 1), idx(i, j + 1)]);
        }
    }

    Grid {
        config: *config,
        points,
        indices,
    }
}
