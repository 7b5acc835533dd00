//! Ed-style script output.
//!
//! The classic `-e` form emits `a`/`c`/`d` commands addressed on the left
//! file, bottom-up so earlier addresses stay valid while ed applies the
//! script. The `-f` form lists the same commands top-down with the letter
//! in front of the addresses; it is not consumable by ed.

use std::io::{self, Write};
use std::ops::Range;

use crate::engine::chunk::ChunkKind;
use crate::engine::result::DiffResult;

use super::write_raw_lines;

/// One edit: the left atoms removed and the right atoms inserted in
/// their place. Either side may be empty, not both.
#[derive(Debug, Clone)]
struct Edit {
    left: Range<usize>,
    right: Range<usize>,
}

/// Folds each run of adjacent minus/plus chunks into a single edit.
fn collect_edits(result: &DiffResult) -> Vec<Edit> {
    let mut edits: Vec<Edit> = Vec::new();
    let mut current: Option<Edit> = None;

    for chunk in &result.chunks {
        match chunk.kind() {
            ChunkKind::Minus | ChunkKind::Plus => {
                let edit = current.get_or_insert_with(|| Edit {
                    left: chunk.left_start..chunk.left_start,
                    right: chunk.right_start..chunk.right_start,
                });
                edit.left.end = chunk.left_start + chunk.left_count;
                edit.right.end = chunk.right_start + chunk.right_count;
            }
            ChunkKind::Empty => {}
            ChunkKind::Equal | ChunkKind::Unresolved => {
                if let Some(edit) = current.take() {
                    edits.push(edit);
                }
            }
        }
    }
    if let Some(edit) = current {
        edits.push(edit);
    }
    edits
}

/// `l1,l2` with 1-based inclusive addresses, collapsed for single lines.
fn left_addresses(edit: &Edit) -> String {
    let first = edit.left.start + 1;
    let last = edit.left.end;
    if first == last {
        format!("{first}")
    } else {
        format!("{first},{last}")
    }
}

pub fn write_ed(out: &mut dyn Write, result: &DiffResult) -> io::Result<()> {
    for edit in collect_edits(result).iter().rev() {
        if !edit.left.is_empty() && !edit.right.is_empty() {
            writeln!(out, "{}c", left_addresses(edit))?;
            write_raw_lines(out, &result.right, edit.right.start, edit.right.len())?;
            writeln!(out, ".")?;
        } else if !edit.left.is_empty() {
            writeln!(out, "{}d", left_addresses(edit))?;
        } else {
            // Append after the line preceding the insertion point; 0
            // addresses the top of the file.
            writeln!(out, "{}a", edit.left.start)?;
            write_raw_lines(out, &result.right, edit.right.start, edit.right.len())?;
            writeln!(out, ".")?;
        }
    }
    Ok(())
}

pub fn write_forward_ed(out: &mut dyn Write, result: &DiffResult) -> io::Result<()> {
    for edit in collect_edits(result) {
        if !edit.left.is_empty() && !edit.right.is_empty() {
            writeln!(out, "c{}", forward_addresses(&edit))?;
            write_raw_lines(out, &result.right, edit.right.start, edit.right.len())?;
            writeln!(out, ".")?;
        } else if !edit.left.is_empty() {
            writeln!(out, "d{}", forward_addresses(&edit))?;
        } else {
            writeln!(out, "a{}", edit.left.start)?;
            write_raw_lines(out, &result.right, edit.right.start, edit.right.len())?;
            writeln!(out, ".")?;
        }
    }
    Ok(())
}

fn forward_addresses(edit: &Edit) -> String {
    let first = edit.left.start + 1;
    let last = edit.left.end;
    if first == last {
        format!("{first}")
    } else {
        format!("{first} {last}")
    }
}
