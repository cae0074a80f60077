use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn write_lesson(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("lesson.md");
    fs::write(
        &path,
        "Both $a$ and $b$ are |vector: a magnitude with direction|.\n\n$$a+b$$\n",
    )
    .unwrap();
    path
}

#[test]
fn inspect_defaults_to_tree_json() {
    let dir = tempdir().unwrap();
    let path = write_lesson(dir.path());

    cargo_bin_cmd!("lesson")
        .arg("inspect")
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains(r#""type": "block_equation""#));
}

#[test]
fn inspect_counts_kinds() {
    let dir = tempdir().unwrap();
    let path = write_lesson(dir.path());

    let pred = predicate::str::contains("inline_equation\t2\n")
        .and(predicate::str::contains("vocabulary\t1\n"))
        .and(predicate::str::contains("block_equation\t1\n"))
        .and(predicate::str::contains("table").not());

    cargo_bin_cmd!("lesson")
        .arg("inspect")
        .arg(&path)
        .arg("kinds")
        .assert()
        .success()
        .stdout(pred);
}

#[test]
fn inspect_tokens_compact() {
    let dir = tempdir().unwrap();
    let path = write_lesson(dir.path());

    let output = cargo_bin_cmd!("lesson")
        .arg("inspect")
        .arg(&path)
        .arg("tokens-json")
        .arg("--extra-pretty")
        .arg("false")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let stdout = String::from_utf8(output).unwrap();
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.contains(r#""token":"#));
}

#[test]
fn inspect_rejects_unknown_transform() {
    let dir = tempdir().unwrap();
    let path = write_lesson(dir.path());

    cargo_bin_cmd!("lesson")
        .arg("inspect")
        .arg(&path)
        .arg("ast-tag")
        .assert()
        .failure();
}

#[test]
fn list_transforms_names_formats() {
    let pred = predicate::str::contains("tokens-json")
        .and(predicate::str::contains("kinds"))
        .and(predicate::str::contains("markdown"))
        .and(predicate::str::contains("tag"));

    cargo_bin_cmd!("lesson")
        .arg("--list-transforms")
        .assert()
        .success()
        .stdout(pred);
}
