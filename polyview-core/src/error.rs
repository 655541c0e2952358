/// Error type for degenerate geometry
use derive_more::{Display, From};

pub type Result<T> = core::result::Result<T, RenderError>;

/// Failure modes of the geometry pipeline. Every variant corresponds to a
/// division that would otherwise produce NaN or infinity: a zero-magnitude
/// vector being normalized, a zero-determinant basis being inverted, or a
/// projection ray running parallel to the target plane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, From)]
#[display("{self:?}")]
pub enum RenderError {
    ZeroLengthVector,
    SingularBasis,
    ParallelToPlane,
}

impl std::error::Error for RenderError {}
