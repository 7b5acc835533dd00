//! The default output: every line of both files, prefixed with ` `, `-`,
//! or `+`.

use std::io::{self, Write};

use crate::engine::chunk::ChunkKind;
use crate::engine::result::DiffResult;

use super::{FileInfo, write_atom_lines};

pub fn write(out: &mut dyn Write, info: &FileInfo<'_>, result: &DiffResult) -> io::Result<()> {
    writeln!(out, "--- {}", info.left_path)?;
    writeln!(out, "+++ {}", info.right_path)?;

    for chunk in &result.chunks {
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
    Ok(())
}
