pub mod error;
pub mod sphere_mesh;

pub use error::{GeometryError, GeometryResult};
pub use sphere_mesh::SphereMesh;
