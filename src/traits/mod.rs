pub mod camera;
pub mod render_context;

pub use camera::*;
pub use render_context::*;
