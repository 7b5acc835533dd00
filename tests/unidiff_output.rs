use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

mod common;

use common::command::{run_rift_command, work_dir};
use common::file::{FileSpec, write_file};

#[rstest]
fn unified_diff_with_default_context(work_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "1\n2\n3\n4\n5\n6\n7\n8\n9\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "1\n2\n3\n4\nX\n6\n7\n8\n9\n".to_string(),
    ));

    let output = run_rift_command(work_dir.path(), &["-u", "old.txt", "new.txt"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    assert_eq!(
        stdout,
        "--- old.txt\n\
         +++ new.txt\n\
         @@ -2,7 +2,7 @@\n \
         2\n 3\n 4\n-5\n+X\n 6\n 7\n 8\n"
    );

    Ok(())
}

#[rstest]
fn narrow_context_splits_distant_changes_into_hunks(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "first\nb\nc\nd\ne\nf\ng\nh\nlast\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "FIRST\nb\nc\nd\ne\nf\ng\nh\nLAST\n".to_string(),
    ));

    let output = run_rift_command(work_dir.path(), &["-U", "1", "old.txt", "new.txt"])
        .assert()
        .success();
    let stdout = String::from_utf8(output.get_output().stdout.clone())?;

    let headers: Vec<&str> = stdout.lines().filter(|l| l.starts_with("@@")).collect();
    assert_eq!(headers, vec!["@@ -1,2 +1,2 @@", "@@ -8,2 +8,2 @@"]);
    assert!(stdout.contains("-first\n+FIRST\n"));
    assert!(stdout.contains("-last\n+LAST\n"));

    Ok(())
}

#[rstest]
fn appended_lines_show_as_plus_only_hunk(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(
        work_dir.path().join("old.txt"),
        "one\n".to_string(),
    ));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "one\ntwo\nthree\n".to_string(),
    ));

    run_rift_command(work_dir.path(), &["-u", "old.txt", "new.txt"])
        .assert()
        .success()
        .stdout(predicate::eq(
            "--- old.txt\n+++ new.txt\n@@ -1,1 +1,3 @@\n one\n+two\n+three\n",
        ));

    Ok(())
}

#[rstest]
fn empty_left_file_diffs_cleanly(work_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    write_file(FileSpec::new(work_dir.path().join("old.txt"), String::new()));
    write_file(FileSpec::new(
        work_dir.path().join("new.txt"),
        "fresh\n".to_string(),
    ));

    run_rift_command(work_dir.path(), &["-u", "old.txt", "new.txt"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@@ -1,0 +1,1 @@"))
        .stdout(predicate::str::contains("+fresh"));

    Ok(())
}
