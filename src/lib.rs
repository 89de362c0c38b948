pub mod error;
pub mod generation;
pub mod heightmap;
pub mod meshing;

pub use error::{MeshError, MeshResult};
pub use heightmap::{HeightField, HeightMap};
