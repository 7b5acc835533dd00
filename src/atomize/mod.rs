//! Splitting raw input bytes into diff atoms.
//!
//! The default strategy atomizes by line with a cheap rolling hash. The
//! trait hands both sides to a single call so that a future atomizer may
//! use cross-side information to decide split points.

use crate::engine::data::{Atom, DiffData};
use crate::engine::error::DiffError;

/// Strategy that splits both input buffers into atoms.
pub trait Atomize {
    fn atomize(&self, left: &mut DiffData, right: &mut DiffData) -> Result<(), DiffError>;
}

/// Line-by-line atomizer.
///
/// A line ends at the first `\n` or `\r`; a `\r\n` pair counts as a single
/// terminator belonging to the preceding line. A final unterminated tail
/// forms its own atom. The hash covers the bytes before the terminator:
/// `h := h * 23 + byte`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LineAtomizer;

impl Atomize for LineAtomizer {
    fn atomize(&self, left: &mut DiffData, right: &mut DiffData) -> Result<(), DiffError> {
        split_lines(left)?;
        split_lines(right)
    }
}

fn split_lines(side: &mut DiffData) -> Result<(), DiffError> {
    let data = side.share_data();
    let end = data.len();

    let mut atoms = Vec::new();
    atoms.try_reserve(end.div_ceil(50).next_power_of_two())?;

    let mut pos = 0;
    while pos < end {
        let mut line_end = pos;
        let mut hash: u32 = 0;
        while line_end < end && data[line_end] != b'\r' && data[line_end] != b'\n' {
            hash = hash.wrapping_mul(23).wrapping_add(u32::from(data[line_end]));
            line_end += 1;
        }

        // Pull in the terminator, and for "\r\n" both bytes of it.
        if line_end < end {
            let terminator = data[line_end];
            line_end += 1;
            if terminator == b'\r' && line_end < end && data[line_end] == b'\n' {
                line_end += 1;
            }
        }

        atoms.try_reserve(1)?;
        atoms.push(Atom {
            at: pos,
            len: line_end - pos,
            hash,
        });
        pos = line_end;
    }

    side.set_atoms(atoms);
    Ok(())
}
