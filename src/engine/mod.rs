//! The recursive, multi-algorithm diff engine.
//!
//! A diff invocation atomizes both input buffers into lines, then runs the
//! configured algorithm composition over them. Each pass either solves its
//! section pair outright, divides it into smaller solved and unsolved
//! chunks for the configured inner algorithm, or asks for its fallback.
//! The orchestrator (`crate::algo`) drives that tree and appends solved
//! chunks to the shared [`DiffResult`] in strict left-to-right order.

pub mod chunk;
pub mod config;
pub mod data;
pub mod error;
pub mod result;
pub(crate) mod state;

pub use chunk::{Chunk, ChunkKind};
pub use config::{Algorithm, AlgoConfig, AlgoId, DEFAULT_MAX_RECURSION_DEPTH, DiffConfig};
pub use data::{Atom, DiffData, Section, same_atom};
pub use error::DiffError;
pub use result::DiffResult;

use bytes::Bytes;

use crate::algo;
use crate::engine::state::DiffState;

/// Computes the line diff between `left` and `right` under `config`.
///
/// The returned result owns both inputs and their atoms; its chunk list
/// satisfies the coverage and maximal-equal-run invariants and is a pure
/// function of the inputs and the configuration.
pub fn diff(config: &DiffConfig, left: Bytes, right: Bytes) -> Result<DiffResult, DiffError> {
    if config.root.0 >= config.algos.len() {
        return Err(DiffError::InvalidInput("root algorithm id out of bounds"));
    }
    for algo_config in &config.algos {
        for edge in [algo_config.inner, algo_config.fallback].into_iter().flatten() {
            if edge.0 >= config.algos.len() {
                return Err(DiffError::InvalidInput("algorithm id out of bounds"));
            }
        }
    }

    let mut result = DiffResult {
        left: DiffData::new(left),
        right: DiffData::new(right),
        chunks: Vec::new(),
    };
    config.atomizer.atomize(&mut result.left, &mut result.right)?;

    let depth = if config.max_recursion_depth == 0 {
        DEFAULT_MAX_RECURSION_DEPTH
    } else {
        config.max_recursion_depth
    };

    let mut chunks = Vec::new();
    let mut state = DiffState {
        left: Section::whole(&result.left),
        right: Section::whole(&result.right),
        depth_left: depth,
        chunks: &mut chunks,
        temp: Vec::new(),
    };
    algo::run(config, Some(config.root), &mut state)?;

    result.chunks = chunks;
    Ok(result)
}
