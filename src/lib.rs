//! A line-oriented diff engine and the building blocks of the `rift`
//! command-line utility.
//!
//! The crate is split into:
//!
//! - `atomize`: splitting raw bytes into diff atoms (lines, by default)
//! - `engine`: the shared representation (atoms, sections, chunks) and
//!   the diff entry point
//! - `algo`: the diff passes (Myers full, Myers divide-and-conquer,
//!   Patience, trivial) and the orchestrator composing them
//! - `output`: formatters turning a diff result into plain, unified,
//!   context, or ed-script text

pub mod atomize;
pub mod engine;
pub mod output;

pub(crate) mod algo;

pub use engine::{DiffConfig, DiffError, DiffResult, diff};
