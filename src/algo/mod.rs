//! The diff algorithms and the orchestrator that composes them.
//!
//! Every pass matches one contract: given the current section pair it
//! either covers the pair with chunks (solved ones, or a mixture of solved
//! and unsolved ones for the configured inner algorithm), or returns
//! [`Verdict::UseFallback`]. The orchestrator consumes fallback requests,
//! promotes staged solved chunks to the result, and recurses depth-first
//! into each unsolved chunk.

pub(crate) mod myers;
pub(crate) mod myers_divide;
pub(crate) mod none;
pub(crate) mod patience;

use tracing::{debug, trace};

use crate::engine::config::{AlgoId, Algorithm, DiffConfig};
use crate::engine::data::Section;
use crate::engine::error::DiffError;
use crate::engine::state::{DiffState, Verdict};

/// Runs the algorithm node `algo` on `state`, leaving only solved chunks
/// in the shared result.
///
/// An unset node and an exhausted recursion budget both resolve to the
/// trivial algorithm; the depth counter strictly decreases across nested
/// frames, so the recursion always terminates.
pub(crate) fn run(
    config: &DiffConfig,
    algo: Option<AlgoId>,
    state: &mut DiffState<'_, '_>,
) -> Result<(), DiffError> {
    state.temp.clear();

    let algo_config = match algo {
        Some(id) if state.depth_left > 0 => config.algos[id.0],
        _ => {
            trace!(
                depth_left = state.depth_left,
                "no algorithm to run, dumping remaining chunks"
            );
            none::solve(state)?;
            return Ok(());
        }
    };

    debug!(
        algorithm = ?algo_config.algorithm,
        left_atoms = state.left.len(),
        right_atoms = state.right.len(),
        "running diff pass"
    );

    let verdict = match algo_config.algorithm {
        Algorithm::None => none::solve(state)?,
        Algorithm::Myers => myers::solve(&algo_config, state)?,
        Algorithm::MyersDivide => myers_divide::solve(state)?,
        Algorithm::Patience => patience::solve(state)?,
    };

    if verdict == Verdict::UseFallback {
        trace!(algorithm = ?algo_config.algorithm, "pass requested fallback");
        return run(config, algo_config.fallback, state);
    }

    // Promote staged chunks in order; each unsolved one becomes a nested
    // frame solved by the inner algorithm, appending to the same result.
    let staged = std::mem::take(&mut state.temp);
    for chunk in staged {
        if chunk.solved {
            state.chunks.try_reserve(1)?;
            state.chunks.push(chunk);
            continue;
        }

        let mut inner_state = DiffState {
            left: Section::new(state.left.root(), chunk.left_start, chunk.left_count),
            right: Section::new(state.right.root(), chunk.right_start, chunk.right_count),
            depth_left: state.depth_left - 1,
            chunks: &mut *state.chunks,
            temp: Vec::new(),
        };
        run(config, algo_config.inner, &mut inner_state)?;
    }

    Ok(())
}
