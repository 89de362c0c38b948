mod grid;
mod normals;
pub mod primitives;
mod sampler;
pub mod state;

pub use grid::{build_grid, Grid, GridConfig};
pub use normals::{estimate_smooth_normals, face_normal, face_normals, triangles_per_vertex};
pub use sampler::{sample_surface, SampledSurface};
pub use state::MeshState;

use bevy::{
    log::debug,
    prelude::*,
    render::{mesh::Indices, render_resource::PrimitiveTopology},
};

use crate::{HeightField, MeshError, MeshResult};

/// How [`generate_surface`] fills in vertex normals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NormalMode {
    /// Use the field's derivatives, falling back to [`NormalMode::Smooth`]
    /// for fields that have none.
    #[default]
    Analytic,
    /// Sum the face normals around each vertex.
    Smooth,
    /// Leave the mesh without normals.
    Omit,
}

impl NormalMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Analytic => Self::Smooth,
            Self::Smooth => Self::Analytic,
            Self::Omit => Self::Omit,
        }
    }
}

/// Vertex, normal and index buffers ready to hand to a renderer.
///
/// Normals are never normalized here, whichever way they were produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Option<Vec<Vec3>>,
    /// Per-vertex RGBA, used as the vertex colour when present.
    pub colors: Option<Vec<Vec4>>,
    pub indices: Vec<u32>,
}

impl SurfaceMesh {
    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn flat_vertices(&self) -> Vec<f32> {
        flatten(&self.vertices)
    }

    pub fn flat_normals(&self) -> Option<Vec<f32>> {
        self.normals.as_deref().map(flatten)
    }

    /// Index buffer narrowed to 16 bits, as WebGL 1 style renderers expect.
    pub fn indices_u16(&self) -> MeshResult<Vec<u16>> {
        if self.vertices.len() > u16::MAX as usize + 1 {
            return Err(MeshError::IndexOverflow {
                vertex_count: self.vertices.len(),
            });
        }
        Ok(self.indices.iter().map(|&i| i as u16).collect())
    }

    /// Checks the buffer invariants: whole triangles, indices in range and
    /// one normal per vertex.
    pub fn validate(&self) -> MeshResult<()> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IncompleteTriangle {
                index_count: self.indices.len(),
            });
        }

        let vertex_count = self.vertices.len();
        if let Some(pos) = self.indices.iter().position(|&i| i as usize >= vertex_count) {
            return Err(MeshError::InvalidVertexIndex {
                triangle: pos / 3,
                index: self.indices[pos],
                vertex_count,
            });
        }

        if let Some(normals) = self.normals.as_ref().filter(|n| n.len() != vertex_count) {
            return Err(MeshError::NormalCountMismatch {
                normals: normals.len(),
                vertices: vertex_count,
            });
        }

        match &self.colors {
            Some(colors) if colors.len() != vertex_count => Err(MeshError::ColorCountMismatch {
                colors: colors.len(),
                vertices: vertex_count,
            }),
            _ => Ok(()),
        }
    }

    pub fn to_render_mesh(&self, color_by_normals: bool) -> Mesh {
        let mut mesh = Mesh::new(PrimitiveTopology::TriangleList);

        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.vertices.clone());

        if let Some(colors) = self.colors.as_ref().filter(|_| !color_by_normals) {
            mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors.clone());
        }

        if let Some(normals) = &self.normals {
            if color_by_normals {
                mesh.insert_attribute(
                    Mesh::ATTRIBUTE_COLOR,
                    normals
                        .iter()
                        .map(|v| v.normalize_or_zero())
                        .map(|v| Vec4::new(v.x, v.y, v.z, 1.))
                        .collect::<Vec<_>>(),
                );
            }
            mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals.clone());
        }

        let indices = match self.indices_u16() {
            Ok(indices) => Indices::U16(indices),
            Err(_) => Indices::U32(self.indices.clone()),
        };
        mesh.set_indices(Some(indices));

        mesh
    }
}

fn flatten(v: &[Vec3]) -> Vec<f32> {
    v.iter().flat_map(|v| v.to_array()).collect()
}

/// Builds the grid, samples `field` on it and attaches normals per `mode`.
pub fn generate_surface(config: &GridConfig, field: &HeightField, mode: NormalMode) -> SurfaceMesh {
    let grid = build_grid(config);
    let SampledSurface {
        heights,
        vertices,
        analytic_normals,
    } = sample_surface(&grid, field);

    let normals = match (mode, analytic_normals) {
        (NormalMode::Omit, _) => None,
        (NormalMode::Analytic, Some(normals)) => Some(normals),
        (NormalMode::Analytic, None) => {
            debug!("height field has no derivatives, estimating smooth normals");
            Some(estimate_smooth_normals(&vertices, &grid.indices))
        }
        (NormalMode::Smooth, _) => Some(estimate_smooth_normals(&vertices, &grid.indices)),
    };

    debug!(
        points_x = config.num_points_x,
        points_y = config.num_points_y,
        vertices = vertices.len(),
        triangles = grid.indices.len() / 3,
        height_range = ?heights.range(),
        ?mode,
        "generated surface mesh"
    );

    SurfaceMesh {
        vertices,
        normals,
        colors: None,
        indices: grid.indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{flat, paraboloid, perlin_field, NoiseSettings};

    fn small_grid() -> GridConfig {
        GridConfig::centered(4., 5)
    }

    #[test]
    fn analytic_mode_uses_derivatives() {
        let mesh = generate_surface(&small_grid(), &paraboloid(), NormalMode::Analytic);
        let normals = mesh.normals.unwrap();

        // First vertex sits at (-2, 8, -2)
        assert_eq!(mesh.vertices[0], Vec3::new(-2., 8., -2.));
        assert_eq!(normals[0], Vec3::new(4., 1., 4.));
    }

    #[test]
    fn analytic_mode_falls_back_for_numeric_fields() {
        let field = perlin_field(7, NoiseSettings::default());
        let analytic = generate_surface(&small_grid(), &field, NormalMode::Analytic);
        let smooth = generate_surface(&small_grid(), &field, NormalMode::Smooth);

        assert!(analytic.normals.is_some());
        assert_eq!(analytic, smooth);
    }

    #[test]
    fn omit_mode_has_no_normals() {
        let mesh = generate_surface(&small_grid(), &flat(), NormalMode::Omit);
        assert!(mesh.normals.is_none());
        assert!(mesh.flat_normals().is_none());
        assert_eq!(mesh.num_vertices(), 25);
        assert_eq!(mesh.num_triangles(), 32);
    }

    #[test]
    fn flat_buffers() {
        let mesh = generate_surface(
            &GridConfig {
                origin_x: -1.,
                origin_y: -1.,
                num_points_x: 2,
                num_points_y: 2,
                step_x: 2.,
                step_y: 2.,
            },
            &flat(),
            NormalMode::Analytic,
        );

        assert_eq!(
            mesh.flat_vertices(),
            vec![-1., 0., -1., 1., 0., -1., -1., 0., 1., 1., 0., 1.]
        );
        assert_eq!(mesh.flat_normals().unwrap(), [0., 1., 0.].repeat(4));
        assert_eq!(mesh.indices_u16().unwrap(), vec![0, 2, 3, 0, 3, 1]);
    }

    #[test]
    fn toggling() {
        assert_eq!(NormalMode::Analytic.toggled(), NormalMode::Smooth);
        assert_eq!(NormalMode::Smooth.toggled(), NormalMode::Analytic);
        assert_eq!(NormalMode::Omit.toggled(), NormalMode::Omit);
    }

    #[test]
    fn validate_accepts_generated_meshes() {
        let mesh = generate_surface(&small_grid(), &paraboloid(), NormalMode::Smooth);
        assert_eq!(mesh.validate(), Ok(()));
    }

    #[test]
    fn validate_reports_bad_buffers() {
        let mut mesh = SurfaceMesh {
            vertices: vec![Vec3::ZERO; 3],
            normals: None,
            colors: None,
            indices: vec![0, 1, 2, 2, 1, 3],
        };
        assert_eq!(
            mesh.validate(),
            Err(MeshError::InvalidVertexIndex {
                triangle: 1,
                index: 3,
                vertex_count: 3,
            })
        );

        mesh.indices = vec![0, 1];
        assert_eq!(
            mesh.validate(),
            Err(MeshError::IncompleteTriangle { index_count: 2 })
        );

        mesh.indices = vec![0, 1, 2];
        mesh.normals = Some(vec![Vec3::Y]);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::NormalCountMismatch {
                normals: 1,
                vertices: 3,
            })
        );

        mesh.normals = None;
        mesh.colors = Some(vec![Vec4::ONE; 4]);
        assert_eq!(
            mesh.validate(),
            Err(MeshError::ColorCountMismatch {
                colors: 4,
                vertices: 3,
            })
        );
    }

    #[test]
    fn vertex_colors_reach_the_render_mesh() {
        let mut mesh = generate_surface(&small_grid(), &flat(), NormalMode::Analytic);
        assert!(mesh.colors.is_none());
        assert!(mesh.to_render_mesh(false).attribute(Mesh::ATTRIBUTE_COLOR).is_none());

        mesh.colors = Some(vec![Vec4::new(1., 0., 0., 1.); mesh.num_vertices()]);
        let render = mesh.to_render_mesh(false);
        assert_eq!(
            render.attribute(Mesh::ATTRIBUTE_COLOR).map(|c| c.len()),
            Some(25)
        );
    }

    #[test]
    fn wide_meshes_do_not_fit_u16() {
        let mesh = generate_surface(&GridConfig::centered(1., 257), &flat(), NormalMode::Omit);
        assert_eq!(
            mesh.indices_u16(),
            Err(MeshError::IndexOverflow {
                vertex_count: 257 * 257,
            })
        );

        let mesh = generate_surface(&GridConfig::centered(1., 256), &flat(), NormalMode::Omit);
        assert!(mesh.indices_u16().is_ok());
    }
}
