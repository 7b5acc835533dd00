use crate::engine::chunk::Chunk;
use crate::engine::data::DiffData;

/// The outcome of a diff: both root inputs and the ordered chunk list.
///
/// Every chunk in `chunks` is solved. Concatenating the chunks' left
/// spans walks the left atoms exactly once in order, and likewise on the
/// right. Formatters are the only consumers of the atom index to line
/// number mapping, which is simply the global atom index (0-based).
#[derive(Debug, Default)]
pub struct DiffResult {
    pub left: DiffData,
    pub right: DiffData,
    pub chunks: Vec<Chunk>,
}
