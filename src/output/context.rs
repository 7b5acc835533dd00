//! Copied-context output (`-c`/`-C N`): each hunk lists the affected
//! region of both files in full, with `!` marking lines that changed in
//! place, `-` pure removals and `+` pure additions.

use std::io::{self, Write};
use std::ops::Range;

use crate::engine::chunk::ChunkKind;
use crate::engine::result::DiffResult;

use super::{ChunkGroup, FileInfo, group_chunks, write_atom_lines};

pub fn write(
    out: &mut dyn Write,
    info: &FileInfo<'_>,
    result: &DiffResult,
    context_lines: usize,
) -> io::Result<()> {
    let groups = group_chunks(result, context_lines);
    if groups.is_empty() {
        return Ok(());
    }

    writeln!(out, "*** {}", info.left_path)?;
    writeln!(out, "--- {}", info.right_path)?;

    for group in groups {
        write_group(out, result, &group)?;
    }
    Ok(())
}

/// 1-based inclusive line addresses; an empty range shows the line the
/// position follows.
fn addresses(range: &Range<usize>) -> String {
    if range.is_empty() {
        format!("{}", range.start)
    } else if range.len() == 1 {
        format!("{}", range.start + 1)
    } else {
        format!("{},{}", range.start + 1, range.end)
    }
}

fn write_group(out: &mut dyn Write, result: &DiffResult, group: &ChunkGroup) -> io::Result<()> {
    let chunks = &result.chunks[group.chunks.clone()];

    // A removal directly next to an addition is a changed region; both
    // sides then list it with "!" instead of "-"/"+".
    let kinds: Vec<ChunkKind> = chunks.iter().map(|c| c.kind()).collect();
    let changed: Vec<bool> = kinds
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let neighbour = match kind {
                ChunkKind::Minus => ChunkKind::Plus,
                ChunkKind::Plus => ChunkKind::Minus,
                _ => return false,
            };
            (i > 0 && kinds[i - 1] == neighbour) || (i + 1 < kinds.len() && kinds[i + 1] == neighbour)
        })
        .collect();

    writeln!(out, "***************")?;
    writeln!(out, "*** {} ****", addresses(&group.left))?;

    if kinds.contains(&ChunkKind::Minus) {
        let first = &chunks[0];
        if group.left.start < first.left_start {
            write_atom_lines(
                out,
                "  ",
                &result.left,
                group.left.start,
                first.left_start - group.left.start,
            )?;
        }
        for (chunk, &is_change) in chunks.iter().zip(&changed) {
            match chunk.kind() {
                ChunkKind::Equal => {
                    write_atom_lines(out, "  ", &result.left, chunk.left_start, chunk.left_count)?;
                }
                ChunkKind::Minus => {
                    let prefix = if is_change { "! " } else { "- " };
                    write_atom_lines(out, prefix, &result.left, chunk.left_start, chunk.left_count)?;
                }
                _ => {}
            }
        }
        let last = &chunks[chunks.len() - 1];
        let end_line = last.left_start + last.left_count;
        if group.left.end > end_line {
            write_atom_lines(out, "  ", &result.left, end_line, group.left.end - end_line)?;
        }
    }

    writeln!(out, "--- {} ----", addresses(&group.right))?;

    if kinds.contains(&ChunkKind::Plus) {
        let first = &chunks[0];
        if group.right.start < first.right_start {
            write_atom_lines(
                out,
                "  ",
                &result.right,
                group.right.start,
                first.right_start - group.right.start,
            )?;
        }
        for (chunk, &is_change) in chunks.iter().zip(&changed) {
            match chunk.kind() {
                ChunkKind::Equal => {
                    write_atom_lines(out, "  ", &result.right, chunk.right_start, chunk.right_count)?;
                }
                ChunkKind::Plus => {
                    let prefix = if is_change { "! " } else { "+ " };
                    write_atom_lines(out, prefix, &result.right, chunk.right_start, chunk.right_count)?;
                }
                _ => {}
            }
        }
        let last = &chunks[chunks.len() - 1];
        let end_line = last.right_start + last.right_count;
        if group.right.end > end_line {
            write_atom_lines(out, "  ", &result.right, end_line, group.right.end - end_line)?;
        }
    }

    Ok(())
}
