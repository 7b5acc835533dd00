use std::collections::TryReserveError;

/// Errors surfaced by a diff invocation.
///
/// The request to fall back to another algorithm is *not* an error: it is
/// an internal verdict consumed by the orchestrator and never reaches the
/// public API.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// Growing one of the engine's working buffers failed.
    #[error("out of memory while growing diff state: {0}")]
    OutOfMemory(#[from] TryReserveError),

    /// The diff was invoked with an inconsistent configuration or an
    /// algorithm produced a malformed chunk.
    #[error("invalid diff input: {0}")]
    InvalidInput(&'static str),
}
