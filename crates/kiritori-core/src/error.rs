use thiserror::Error;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or zero-area input; the cycle cannot start.
    #[error("input image has zero area")]
    InvalidImage,
    /// One recognizer invocation failed. The attempt is skipped, the cycle
    /// continues with the remaining configured attempts.
    #[error("recognition engine unavailable: {0}")]
    EngineUnavailable(#[source] BoxError),
    /// Every attempt across both passes failed or produced nothing usable.
    #[error("no usable candidate from any recognition attempt")]
    NoUsableCandidate,
    /// The capture source produced no image.
    #[error("no image available")]
    NoImage,
}
