use crate::engine::data::same_atom;
use crate::engine::error::DiffError;
use crate::engine::state::{DiffState, Verdict};

/// The trivial pass: emit the longest equal prefix, then remove every
/// remaining left atom and add every remaining right atom.
///
/// Serves as the terminal fallback and as the escape hatch when the
/// recursion budget runs out; it always succeeds.
pub(crate) fn solve(state: &mut DiffState<'_, '_>) -> Result<Verdict, DiffError> {
    let left = state.left;
    let right = state.right;

    let mut equal_atoms = 0;
    while equal_atoms < left.len()
        && equal_atoms < right.len()
        && same_atom(&left, equal_atoms, &right, equal_atoms)
    {
        equal_atoms += 1;
    }

    if equal_atoms > 0 {
        state.push_chunk(true, 0, equal_atoms, 0, equal_atoms)?;
    }
    if equal_atoms < left.len() {
        state.push_chunk(true, equal_atoms, left.len() - equal_atoms, equal_atoms, 0)?;
    }
    if equal_atoms < right.len() {
        state.push_chunk(true, left.len(), 0, equal_atoms, right.len() - equal_atoms)?;
    }

    Ok(Verdict::Done)
}
