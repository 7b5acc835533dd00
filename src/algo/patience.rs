//! Patience diff: divide the problem at an LCS of common-unique atoms.
//!
//! Atoms occurring exactly once on each side are matched up, their
//! longest common subsequence is found with a patience sort, and each
//! LCS anchor swallows the identical lines directly around it. The
//! leftover gaps between anchors are handed back as unsolved chunks for
//! the configured inner algorithm; if there are no common-unique atoms at
//! all, the whole section is left to the fallback.

use std::collections::HashMap;
use std::ops::Range;

use tracing::{debug, trace};

use crate::engine::data::same_atom;
use crate::engine::error::DiffError;
use crate::engine::state::{DiffState, Verdict};

/// Per-atom scratch for one patience invocation, indexed by the local
/// atom position. Allocated per frame, so nested frames can never step on
/// each other's state.
#[derive(Debug, Clone)]
struct PatienceSlot {
    /// The atom occurs exactly once on each side.
    unique_in_both: bool,
    /// Local index of the matching atom on the opposite side.
    pos_in_other: Option<usize>,
    /// Back-reference to the top of the next stack to the left, forming
    /// the LCS chain after the patience sort.
    prev_stack: Option<usize>,
    /// Identical lines swallowed around this anchor, local and half-open.
    identical_lines: Range<usize>,
}

impl Default for PatienceSlot {
    fn default() -> Self {
        PatienceSlot {
            unique_in_both: false,
            pos_in_other: None,
            prev_stack: None,
            identical_lines: 0..0,
        }
    }
}

#[derive(Debug, Default)]
struct Occurrences {
    left_count: u32,
    left_idx: usize,
    right_count: u32,
    right_idx: usize,
}

pub(crate) fn solve(state: &mut DiffState<'_, '_>) -> Result<Verdict, DiffError> {
    let left = state.left;
    let right = state.right;

    let mut left_slots = Vec::new();
    left_slots.try_reserve_exact(left.len())?;
    left_slots.resize(left.len(), PatienceSlot::default());
    let mut right_slots = Vec::new();
    right_slots.try_reserve_exact(right.len())?;
    right_slots.resize(right.len(), PatienceSlot::default());

    // Count occurrences per distinct atom content. An atom is
    // common-unique when its content appears exactly once on each side.
    let mut occurrences: HashMap<&[u8], Occurrences> =
        HashMap::with_capacity(left.len() + right.len());
    for i in 0..left.len() {
        let entry = occurrences.entry(left.atom_bytes(i)).or_default();
        entry.left_count += 1;
        entry.left_idx = i;
    }
    for j in 0..right.len() {
        let entry = occurrences.entry(right.atom_bytes(j)).or_default();
        entry.right_count += 1;
        entry.right_idx = j;
    }

    let mut unique_in_both_count: usize = 0;
    for occurrence in occurrences.values() {
        if occurrence.left_count == 1 && occurrence.right_count == 1 {
            left_slots[occurrence.left_idx].unique_in_both = true;
            left_slots[occurrence.left_idx].pos_in_other = Some(occurrence.right_idx);
            right_slots[occurrence.right_idx].unique_in_both = true;
            right_slots[occurrence.right_idx].pos_in_other = Some(occurrence.left_idx);
            unique_in_both_count += 1;
        }
    }
    debug!(unique_in_both_count, "patience cross-match done");

    if unique_in_both_count == 0 {
        trace!("no common-unique atoms");
        return Ok(Verdict::UseFallback);
    }

    // Each anchor swallows identical lines upwards and downwards, but
    // never across the reach of the previous anchor. Common-unique atoms
    // absorbed by a downward extension stop being anchors themselves.
    let mut left_min = 0;
    let mut right_min = 0;
    let mut left_idx = 0;
    while left_idx < left.len() {
        let mut next_left_idx = left_idx + 1;

        if left_slots[left_idx].unique_in_both
            && let Some(right_idx) = left_slots[left_idx].pos_in_other
        {
            let mut identical_left = left_idx..left_idx + 1;
            let mut identical_right = right_idx..right_idx + 1;

            while identical_left.start > left_min
                && identical_right.start > right_min
                && same_atom(&left, identical_left.start - 1, &right, identical_right.start - 1)
            {
                identical_left.start -= 1;
                identical_right.start -= 1;
            }

            while identical_left.end < left.len()
                && identical_right.end < right.len()
                && same_atom(&left, identical_left.end, &right, identical_right.end)
            {
                if left_slots[identical_left.end].unique_in_both {
                    left_slots[identical_left.end].unique_in_both = false;
                    right_slots[identical_right.end].unique_in_both = false;
                    unique_in_both_count -= 1;
                }
                identical_left.end += 1;
                identical_right.end += 1;
                next_left_idx += 1;
            }

            left_min = identical_left.end;
            right_min = identical_right.end;
            left_slots[left_idx].identical_lines = identical_left;
            right_slots[right_idx].identical_lines = identical_right;
        }

        left_idx = next_left_idx;
    }
    trace!(unique_in_both_count, "after swallowing identical neighbours");

    // Patience sort the surviving anchors by their position on the right:
    // each goes on the leftmost stack whose top sits at or past it, and
    // remembers the previous stack's top to chain the LCS.
    let mut uniques = Vec::new();
    uniques.try_reserve_exact(unique_in_both_count)?;
    for (i, slot) in left_slots.iter().enumerate() {
        if slot.unique_in_both {
            uniques.push(i);
        }
    }

    let mut stacks: Vec<usize> = Vec::new();
    stacks.try_reserve_exact(unique_in_both_count)?;
    for &unique in &uniques {
        let pos = left_slots[unique].pos_in_other;
        let target =
            stacks.partition_point(|&top| left_slots[top].pos_in_other < pos);
        left_slots[unique].prev_stack = if target > 0 {
            Some(stacks[target - 1])
        } else {
            None
        };
        if target == stacks.len() {
            stacks.push(unique);
        } else {
            stacks[target] = unique;
        }
    }

    // The chain through prev_stack from the rightmost stack's top is the
    // LCS, built back-to-front.
    let mut lcs = Vec::new();
    lcs.try_reserve_exact(stacks.len())?;
    let mut cursor = stacks.last().copied();
    while let Some(anchor) = cursor {
        if let Some(mate) = left_slots[anchor].pos_in_other {
            lcs.push((anchor, mate));
        }
        cursor = left_slots[anchor].prev_stack;
    }
    lcs.reverse();

    // Walk both sides along the LCS. Each iteration emits the gap before
    // the anchor, then the anchor's swallowed range as an equal chunk;
    // the final iteration sweeps up everything after the last anchor.
    let mut left_pos = 0;
    let mut right_pos = 0;
    for i in 0..=lcs.len() {
        let anchor = lcs.get(i).copied();
        let (left_idx, right_idx) = match anchor {
            Some((a, mate)) => (
                left_slots[a].identical_lines.start,
                right_slots[mate].identical_lines.start,
            ),
            None => (left.len(), right.len()),
        };

        let left_section = left_idx - left_pos;
        let right_section = right_idx - right_pos;
        if left_section > 0 && right_section > 0 {
            state.push_chunk(false, left_pos, left_section, right_pos, right_section)?;
        } else if left_section > 0 {
            state.push_chunk(true, left_pos, left_section, right_pos, 0)?;
        } else if right_section > 0 {
            state.push_chunk(true, left_pos, 0, right_pos, right_section)?;
        }

        if let Some((a, mate)) = anchor {
            let identical_left = left_slots[a].identical_lines.clone();
            let identical_right = right_slots[mate].identical_lines.clone();
            state.push_chunk(
                true,
                identical_left.start,
                identical_left.len(),
                identical_right.start,
                identical_right.len(),
            )?;
            left_pos = identical_left.end;
            right_pos = identical_right.end;
        }
    }

    Ok(Verdict::Done)
}
