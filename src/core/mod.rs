pub mod controller;
pub mod driver;
pub mod gesture;
pub mod viewport;

pub use controller::{Button, Controller, InputEvent, InputState};
pub use driver::{FreeCameraDriver, MovementState};
pub use gesture::{GestureState, OrbitGesture, OrbitSettings};
pub use viewport::Viewport;
