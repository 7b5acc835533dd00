//! Unified diff output: changed chunks joined by shared context lines
//! into `@@`-headed hunks.

use std::io::{self, Write};

use crate::engine::chunk::ChunkKind;
use crate::engine::result::DiffResult;

use super::{ChunkGroup, FileInfo, group_chunks, write_atom_lines};

pub const DEFAULT_CONTEXT_LINES: usize = 3;

pub fn write(
    out: &mut dyn Write,
    info: &FileInfo<'_>,
    result: &DiffResult,
    context_lines: usize,
) -> io::Result<()> {
    let mut header_printed = false;
    for group in group_chunks(result, context_lines) {
        write_group(out, &mut header_printed, info, result, &group)?;
    }
    Ok(())
}

fn write_group(
    out: &mut dyn Write,
    header_printed: &mut bool,
    info: &FileInfo<'_>,
    result: &DiffResult,
    group: &ChunkGroup,
) -> io::Result<()> {
    if group.left.is_empty() && group.right.is_empty() {
        return Ok(());
    }

    if !*header_printed {
        writeln!(out, "--- {}", info.left_path)?;
        writeln!(out, "+++ {}", info.right_path)?;
        *header_printed = true;
    }

    writeln!(
        out,
        "@@ -{},{} +{},{} @@",
        group.left.start + 1,
        group.left.len(),
        group.right.start + 1,
        group.right.len()
    )?;

    // Context above the first interesting chunk. Context is by definition
    // identical on both sides, so reading the left side suffices.
    let first_chunk = &result.chunks[group.chunks.start];
    if group.left.start < first_chunk.left_start {
        write_atom_lines(
            out,
            " ",
            &result.left,
            group.left.start,
            first_chunk.left_start - group.left.start,
        )?;
    }

    for chunk in &result.chunks[group.chunks.clone()] {
        match chunk.kind() {
            ChunkKind::Equal => {
                write_atom_lines(out, " ", &result.left, chunk.left_start, chunk.left_count)?;
            }
            ChunkKind::Minus => {
                write_atom_lines(out, "-", &result.left, chunk.left_start, chunk.left_count)?;
            }
            ChunkKind::Plus => {
                write_atom_lines(out, "+", &result.right, chunk.right_start, chunk.right_count)?;
            }
            ChunkKind::Unresolved => {
                write_atom_lines(out, "?", &result.left, chunk.left_start, chunk.left_count)?;
            }
            ChunkKind::Empty => {}
        }
    }

    // Trailing context.
    let last_chunk = &result.chunks[group.chunks.end - 1];
    let chunk_end_line = last_chunk.left_start + last_chunk.left_count;
    if group.left.end > chunk_end_line {
        write_atom_lines(
            out,
            " ",
            &result.left,
            chunk_end_line,
            group.left.end - chunk_end_line,
        )?;
    }
    Ok(())
}
