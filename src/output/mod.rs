//! Formatters turning a [`DiffResult`](crate::engine::DiffResult) into
//! text output.
//!
//! The formatters are the only consumers of the atom index to line number
//! mapping: a chunk's `left_start`/`right_start` are global atom indexes,
//! and line numbers are simply those indexes plus one.

pub mod context;
pub mod ed;
pub mod plain;
pub mod unidiff;

use std::io::{self, Write};
use std::ops::Range;

use derive_new::new;

use crate::engine::chunk::ChunkKind;
use crate::engine::data::DiffData;
use crate::engine::result::DiffResult;

/// The labels printed for the two sides in diff headers.
#[derive(Debug, Clone, Copy, new)]
pub struct FileInfo<'a> {
    pub left_path: &'a str,
    pub right_path: &'a str,
}

/// Writes `count` atoms starting at the global index `start`, one output
/// line per atom: the prefix, then the atom without its line terminator.
///
/// Bytes outside the printable ASCII range (other than tab) are escaped
/// as `\xNN` so control characters cannot corrupt the listing.
pub(crate) fn write_atom_lines(
    out: &mut dyn Write,
    prefix: &str,
    data: &DiffData,
    start: usize,
    count: usize,
) -> io::Result<()> {
    for index in start..start + count {
        let mut bytes = data.atom_bytes(index);
        if let Some(stripped) = bytes.strip_suffix(b"\n") {
            bytes = stripped;
            if let Some(stripped) = bytes.strip_suffix(b"\r") {
                bytes = stripped;
            }
        }

        write!(out, "{prefix}")?;
        for &byte in bytes {
            if (byte < 0x20 || byte >= 0x7f) && byte != b'\t' {
                write!(out, "\\x{byte:02x}")?;
            } else {
                out.write_all(&[byte])?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

/// Writes atoms verbatim (terminator stripped, no escaping); ed scripts
/// need the literal text.
pub(crate) fn write_raw_lines(
    out: &mut dyn Write,
    data: &DiffData,
    start: usize,
    count: usize,
) -> io::Result<()> {
    for index in start..start + count {
        let mut bytes = data.atom_bytes(index);
        if let Some(stripped) = bytes.strip_suffix(b"\n") {
            bytes = stripped;
            if let Some(stripped) = bytes.strip_suffix(b"\r") {
                bytes = stripped;
            }
        }
        out.write_all(bytes)?;
        writeln!(out)?;
    }
    Ok(())
}

fn ranges_touch(a: &Range<usize>, b: &Range<usize>) -> bool {
    a.end >= b.start && a.start <= b.end
}

fn ranges_merge(a: &mut Range<usize>, b: &Range<usize>) {
    *a = a.start.min(b.start)..a.end.max(b.end);
}

/// A run of interesting chunks plus the context lines around them, as
/// printed by the unified and context formats.
#[derive(Debug)]
pub(crate) struct ChunkGroup {
    /// Indexes into the result's chunk list.
    pub chunks: Range<usize>,
    /// Global left atom range covered, context included.
    pub left: Range<usize>,
    /// Global right atom range covered, context included.
    pub right: Range<usize>,
}

impl ChunkGroup {
    fn around(result: &DiffResult, chunk_idx: usize, context_lines: usize) -> Self {
        let chunk = &result.chunks[chunk_idx];
        ChunkGroup {
            chunks: chunk_idx..chunk_idx + 1,
            left: chunk.left_start.saturating_sub(context_lines)
                ..result
                    .left
                    .atoms()
                    .len()
                    .min(chunk.left_start + chunk.left_count + context_lines),
            right: chunk.right_start.saturating_sub(context_lines)
                ..result
                    .right
                    .atoms()
                    .len()
                    .min(chunk.right_start + chunk.right_count + context_lines),
        }
    }

    fn touches(&self, other: &ChunkGroup) -> bool {
        ranges_touch(&self.chunks, &other.chunks)
            || ranges_touch(&self.left, &other.left)
            || ranges_touch(&self.right, &other.right)
    }

    fn merge(&mut self, other: &ChunkGroup) {
        ranges_merge(&mut self.chunks, &other.chunks);
        ranges_merge(&mut self.left, &other.left);
        ranges_merge(&mut self.right, &other.right);
    }
}

/// Collects the minus/plus chunks into groups joined by touching or
/// overlapping context, in output order.
pub(crate) fn group_chunks(result: &DiffResult, context_lines: usize) -> Vec<ChunkGroup> {
    let mut groups: Vec<ChunkGroup> = Vec::new();
    let mut current: Option<ChunkGroup> = None;

    for (chunk_idx, chunk) in result.chunks.iter().enumerate() {
        if !matches!(chunk.kind(), ChunkKind::Minus | ChunkKind::Plus) {
            continue;
        }

        let next = ChunkGroup::around(result, chunk_idx, context_lines);
        if let Some(group) = current.as_mut()
            && group.touches(&next)
        {
            group.merge(&next);
        } else {
            if let Some(done) = current.take() {
                groups.push(done);
            }
            current = Some(next);
        }
    }
    if let Some(group) = current {
        groups.push(group);
    }
    groups
}
