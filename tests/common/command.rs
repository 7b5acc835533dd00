use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

use crate::common::file::{FileSpec, write_file};

#[fixture]
pub fn work_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// A temp dir pre-seeded with the classic Myers example pair.
#[fixture]
pub fn classic_pair_dir(work_dir: TempDir) -> TempDir {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "A\nB\nC\nD\nE\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "X\nB\nC\nY\n".to_string(),
    ));
    work_dir
}

pub fn run_rift_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("rift").expect("Failed to find rift binary");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}
