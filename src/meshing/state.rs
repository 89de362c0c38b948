use bevy::log::trace;

use super::{generate_surface, GridConfig, NormalMode, SurfaceMesh};
use crate::HeightField;

/// Everything an animated surface carries from one regeneration to the next.
///
/// Each step consumes the state and hands back a new one, so callers decide
/// where it lives between frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshState {
    pub config: GridConfig,
    pub normal_mode: NormalMode,
    pub shift: f32,
    pub mesh: SurfaceMesh,
}

impl MeshState {
    pub fn new(config: GridConfig, normal_mode: NormalMode) -> Self {
        Self {
            config,
            normal_mode,
            shift: 0.,
            mesh: SurfaceMesh::default(),
        }
    }

    /// Rebuilds the mesh from the field produced for the current shift.
    pub fn regenerate(self, field: impl Fn(f32) -> HeightField) -> Self {
        let mesh = generate_surface(&self.config, &field(self.shift), self.normal_mode);
        Self { mesh, ..self }
    }

    /// Regenerates at the current shift, then moves the shift on by `step`.
    pub fn advance(self, field: impl Fn(f32) -> HeightField, step: f32) -> Self {
        let state = self.regenerate(field);
        trace!(shift = state.shift, step, "advanced surface");
        Self {
            shift: state.shift + step,
            ..state
        }
    }

    pub fn with_normal_mode(self, normal_mode: NormalMode) -> Self {
        Self {
            normal_mode,
            ..self
        }
    }

    pub fn with_config(self, config: GridConfig) -> Self {
        Self { config, ..self }
    }
}
