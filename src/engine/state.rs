use crate::engine::chunk::Chunk;
use crate::engine::data::Section;
use crate::engine::error::DiffError;

/// Verdict of one algorithm pass over its section pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    /// The pass covered its sections with chunks (possibly unsolved ones).
    Done,
    /// The pass cannot or will not proceed; the orchestrator runs the
    /// configured fallback instead.
    UseFallback,
}

/// Per-frame engine state handed to each algorithm pass.
///
/// `left` and `right` are the (sub)sections being diffed, `chunks` the
/// shared final result, and `temp` the pass-local staging list for chunks
/// that may still contain unsolved subproblems.
pub(crate) struct DiffState<'r, 'c> {
    pub left: Section<'r>,
    pub right: Section<'r>,

    /// Remaining recursion budget; strictly decreases across nested frames.
    pub depth_left: u32,

    /// The final, ordered chunk list of the whole diff.
    pub chunks: &'c mut Vec<Chunk>,

    /// Chunks staged by the currently running pass, drained by the
    /// orchestrator after the pass returns.
    pub temp: Vec<Chunk>,
}

impl DiffState<'_, '_> {
    /// Records a chunk covering `left_count` atoms from local index
    /// `left_local` and `right_count` atoms from `right_local`.
    ///
    /// A solved chunk arriving while the staging list is empty is promoted
    /// straight into the final result, so a pass that only produces solved
    /// chunks streams into the result without a second copy. As soon as
    /// one staged chunk exists, everything else stages behind it to keep
    /// the output ordered.
    pub fn push_chunk(
        &mut self,
        solved: bool,
        left_local: usize,
        left_count: usize,
        right_local: usize,
        right_count: usize,
    ) -> Result<(), DiffError> {
        if !solved && (left_count == 0 || right_count == 0) {
            // A one-sided span needs no further diffing; staging it as
            // unsolved would re-enter the inner algorithm for nothing.
            return Err(DiffError::InvalidInput("unsolved chunk with empty side"));
        }

        let chunk = Chunk {
            solved,
            left_start: self.left.global(left_local),
            left_count,
            right_start: self.right.global(right_local),
            right_count,
        };

        let target = if solved && self.temp.is_empty() {
            &mut *self.chunks
        } else {
            &mut self.temp
        };
        target.try_reserve(1)?;
        target.push(chunk);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::data::DiffData;
    use bytes::Bytes;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use crate::atomize::{Atomize, LineAtomizer};

    fn atomized(text: &str) -> DiffData {
        let mut left = DiffData::new(Bytes::copy_from_slice(text.as_bytes()));
        let mut right = DiffData::new(Bytes::new());
        LineAtomizer
            .atomize(&mut left, &mut right)
            .expect("atomize");
        left
    }

    #[rstest]
    fn solved_chunk_with_empty_staging_promotes_to_result() {
        let left = atomized("a\nb\n");
        let right = atomized("a\nb\n");
        let mut chunks = Vec::new();
        let mut state = DiffState {
            left: Section::whole(&left),
            right: Section::whole(&right),
            depth_left: 1,
            chunks: &mut chunks,
            temp: Vec::new(),
        };

        state.push_chunk(true, 0, 2, 0, 2).expect("push");

        assert_eq!(state.temp.len(), 0);
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].solved);
    }

    #[rstest]
    fn chunks_stage_behind_a_pending_unsolved_chunk() {
        let left = atomized("a\nb\nc\n");
        let right = atomized("x\ny\nc\n");
        let mut chunks = Vec::new();
        let mut state = DiffState {
            left: Section::whole(&left),
            right: Section::whole(&right),
            depth_left: 1,
            chunks: &mut chunks,
            temp: Vec::new(),
        };

        state.push_chunk(false, 0, 2, 0, 2).expect("push unsolved");
        state.push_chunk(true, 2, 1, 2, 1).expect("push solved");

        assert_eq!(state.chunks.len(), 0);
        assert_eq!(state.temp.len(), 2);
        assert!(!state.temp[0].solved);
        assert!(state.temp[1].solved);
    }

    #[rstest]
    #[case(0, 2)]
    #[case(2, 0)]
    fn unsolved_chunk_with_empty_side_is_rejected(
        #[case] left_count: usize,
        #[case] right_count: usize,
    ) {
        let left = atomized("a\nb\n");
        let right = atomized("c\nd\n");
        let mut chunks = Vec::new();
        let mut state = DiffState {
            left: Section::whole(&left),
            right: Section::whole(&right),
            depth_left: 1,
            chunks: &mut chunks,
            temp: Vec::new(),
        };

        let result = state.push_chunk(false, 0, left_count, 0, right_count);

        assert!(matches!(result, Err(DiffError::InvalidInput(_))));
    }

    #[rstest]
    fn chunk_positions_are_global_indices() {
        let left = atomized("a\nb\nc\nd\n");
        let right = atomized("a\nb\nc\nd\n");
        let mut chunks = Vec::new();
        let mut state = DiffState {
            left: Section::new(&left, 2, 2),
            right: Section::new(&right, 1, 3),
            depth_left: 1,
            chunks: &mut chunks,
            temp: Vec::new(),
        };

        state.push_chunk(true, 1, 1, 2, 1).expect("push");

        assert_eq!(chunks[0].left_start, 3);
        assert_eq!(chunks[0].right_start, 3);
    }
}
