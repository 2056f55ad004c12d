mod common;

use common::*;
use predicates::prelude::*;

#[test]
fn renames_fonts_and_writes_output() {
    let input = write_temp(&japanese_pdf());
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("fixed.pdf");

    cmd()
        .arg("normalize")
        .arg(input.path())
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 2 font(s)"));

    assert_eq!(
        type0_names(&output),
        vec![b"MS Gothic".to_vec(), b"MS PMincho".to_vec()]
    );

    cmd()
        .arg("check")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("No font names to normalize."));
}

#[test]
fn writes_output_even_without_renames() {
    let input = write_temp(&plain_pdf(2));
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("copy.pdf");

    cmd()
        .arg("normalize")
        .arg(input.path())
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Renamed 0 font(s)"));
    assert_eq!(content_stream_counts(&output), vec![1, 1]);
}

#[test]
fn verbose_logs_renames() {
    let input = write_temp(&japanese_pdf());
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("fixed.pdf");

    cmd()
        .arg("-v")
        .arg("normalize")
        .arg(input.path())
        .arg(&output)
        .env_remove("RUST_LOG")
        .assert()
        .success()
        .stderr(predicate::str::contains("renamed font"));
}
