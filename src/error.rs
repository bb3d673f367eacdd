/// Numerical failures raised by the viewing core.
///
/// None of these are fatal: callers are expected to keep their previous valid
/// state and carry on rendering.
#[derive(Clone, Copy, Debug, PartialEq, thiserror::Error)]
pub enum ViewError {
    /// A transform could not be inverted.
    #[error("degenerate transform: matrix is singular (determinant {determinant})")]
    SingularMatrix { determinant: f32 },

    /// Perspective divide of a homogeneous point whose `w` is zero.
    #[error("homogeneous point has w = {w}, which is a direction rather than a point")]
    PointAtInfinity { w: f32 },

    /// Basis vectors that do not span a frame (zero or parallel axes).
    #[error("degenerate camera basis: axes are zero or parallel")]
    DegenerateBasis,

    /// A viewport or window with no area.
    #[error("viewport has no area ({width}x{height})")]
    InvalidViewport { width: f32, height: f32 },
}

pub type Result<T> = std::result::Result<T, ViewError>;
