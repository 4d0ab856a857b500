use thiserror::Error;

/// Errors surfaced by the statistical model layer.
///
/// Both variants are recoverable defects: callers keep the previous
/// known-good model (or fall back to uniform sampling) and log a warning
/// rather than aborting a decision.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A posterior update produced a ~zero normalising constant: the prior
    /// had no mass left on any outcome consistent with the evidence.
    #[error("distribution update produced a degenerate normaliser ({0:e})")]
    InvalidDistribution(f64),

    /// Masking left no eligible opponent combination to sample.
    #[error("opponent range has no mass after masking visible cards")]
    EmptyRange,
}
