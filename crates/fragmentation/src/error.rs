use bodies::BodyId;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// Unrecoverable resolution failures.
///
/// Every variant indicates a violated modeling precondition; the host must
/// stop the run rather than continue with physically meaningless bodies.
#[derive(Debug, Error)]
pub enum Error {
    /// The impact parameter came out non-finite, typically because the two
    /// centers coincide.
    #[error("degenerate encounter geometry: impact parameter is not finite")]
    DegenerateGeometry,

    /// The configured minimum fragment mass is not usable.
    #[error("minimum fragment mass must be positive, got {0}")]
    BadMinFragmentMass(f64),

    /// The configured bulk density is not usable.
    #[error("bulk density must be positive and finite, got {0}")]
    BadBulkDensity(f64),

    /// Fragment synthesis was asked to partition a non-positive mass.
    #[error("no residual mass to fragment: {0}")]
    NoResidualMass(f64),

    /// The fragment count fell outside the sane range, guarding against
    /// runaway allocation from malformed input.
    #[error("fragment count {count} outside the range (0, {max})")]
    FragmentCountOutOfRange { count: usize, max: usize },

    /// A collision event referenced a body the store does not hold.
    #[error("body {0:?} not found in the particle store")]
    BodyNotFound(BodyId),
}
