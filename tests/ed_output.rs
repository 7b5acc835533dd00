use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{run_rift_command, work_dir};
use common::file::{FileSpec, write_file};

#[rstest]
fn ed_script_lists_edits_bottom_up(work_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "a\nb\nc\nd\ne\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "A\nb\nc\nd\nE\n".to_string(),
    ));

    let output = run_rift_command(work_dir.path(), &["-e", "old.txt", "new.txt"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(stdout, "5c\nE\n.\n1c\nA\n.\n");

    Ok(())
}

#[rstest]
fn ed_script_for_deletion_has_no_text_block(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "1\n2\n3\n4\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "1\n4\n".to_string(),
    ));

    run_rift_command(work_dir.path(), &["-e", "old.txt", "new.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("2,3d\n"));

    Ok(())
}

#[rstest]
fn forward_script_runs_top_down(work_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "a\nb\nc\nd\ne\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "A\nb\nc\nd\nE\n".to_string(),
    ));

    run_rift_command(work_dir.path(), &["-f", "old.txt", "new.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("c1\nA\n.\nc5\nE\n.\n"));

    Ok(())
}

#[rstest]
fn insertion_at_the_top_uses_address_zero(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "body\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "header\nbody\n".to_string(),
    ));

    run_rift_command(work_dir.path(), &["-e", "old.txt", "new.txt"])
        .assert()
        .success()
        .stdout(predicate::eq("0a\nheader\n.\n"));

    Ok(())
}
