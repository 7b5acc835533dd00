use derive_new::new;

use crate::atomize::{Atomize, LineAtomizer};

/// Recursion depth used when the configuration leaves it at 0.
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 1024;

/// The diff passes the engine can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    /// Longest equal prefix, then remove all left, add all right.
    /// Terminal fallback and the bounded-depth escape hatch.
    None,
    /// Classical Myers edit-graph trace with quadratic state, bounded by
    /// `permitted_state_size`.
    Myers,
    /// Bidirectional linear-space Myers search for a mid-snake, splitting
    /// the problem in two.
    MyersDivide,
    /// Patience diff: LCS over common-unique atoms, delegating the gaps.
    Patience,
}

/// Handle of an [`AlgoConfig`] node inside a [`DiffConfig`]'s slab.
///
/// Inner and fallback edges are ids rather than references so the
/// reference composition can point an algorithm at itself (patience
/// subdivides into patience) without reference cycles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AlgoId(pub usize);

/// One node of the algorithm composition tree.
#[derive(Debug, Clone, Copy, new)]
pub struct AlgoConfig {
    pub algorithm: Algorithm,

    /// Fail the pass if it would allocate more than this many bytes of
    /// state, and run `fallback` instead. 0 means no limit. Only the full
    /// Myers pass consults this.
    pub permitted_state_size: usize,

    /// Algorithm run on the unsolved chunks this pass divides off.
    pub inner: Option<AlgoId>,

    /// Algorithm run instead when this pass cannot or will not proceed.
    /// `None` implies the trivial algorithm.
    pub fallback: Option<AlgoId>,
}

/// A full diff configuration: the atomizer, the algorithm composition,
/// and the recursion guard.
pub struct DiffConfig {
    /// Splits both input buffers into atoms. A single call receives both
    /// sides so future atomizers may use cross-side information.
    pub atomizer: Box<dyn Atomize>,

    /// Slab of algorithm nodes addressed by [`AlgoId`].
    pub algos: Vec<AlgoConfig>,

    /// Entry node of the composition.
    pub root: AlgoId,

    /// How deep to step into subdivisions before giving up and dumping
    /// the remainder through the trivial algorithm. 0 selects
    /// [`DEFAULT_MAX_RECURSION_DEPTH`].
    pub max_recursion_depth: u32,
}

impl DiffConfig {
    /// The reference composition:
    ///
    /// ```text
    /// myers  --(state too large)--> patience --(subdivide)--> patience
    ///                                   |--(no common-unique)--> myers_divide
    ///                                                              |--(inner)--> myers
    ///                                                              |--(no midpoint)--> none
    /// ```
    pub fn standard() -> Self {
        let myers = AlgoId(0);
        let patience = AlgoId(1);
        let myers_divide = AlgoId(2);

        let algos = vec![
            AlgoConfig::new(
                Algorithm::Myers,
                1024 * 1024 * size_of::<i32>(),
                None,
                Some(patience),
            ),
            AlgoConfig::new(Algorithm::Patience, 0, Some(patience), Some(myers_divide)),
            AlgoConfig::new(Algorithm::MyersDivide, 0, Some(myers), None),
        ];

        DiffConfig {
            atomizer: Box::new(LineAtomizer),
            algos,
            root: myers,
            max_recursion_depth: 0,
        }
    }
}

impl Default for DiffConfig {
    fn default() -> Self {
        DiffConfig::standard()
    }
}
