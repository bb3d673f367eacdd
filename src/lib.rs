pub mod cli;
pub mod context;
pub mod core;
pub mod error;
pub mod free_camera;
pub mod frustum;
pub mod math;
pub mod orbit;
pub mod replay;
pub mod traits;
pub mod types;

pub use context::SoftwareContext;
pub use error::ViewError;
pub use free_camera::{CameraMode, FreeCamera};
pub use frustum::{Frustum, FrustumCuller};
pub use orbit::{OrbitCamera, RotationSpeed};
