use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_plain_rendering() {
    let mut temp_file = NamedTempFile::new().unwrap();
    writeln!(
        temp_file,
        r#"{{"ts":"2024-01-01T10:00:00Z","level":"info","msg":"Server started","port":8080}}"#
    )
    .unwrap();
    writeln!(
        temp_file,
        r#"{{"time":"2024-01-01T10:00:01Z","level":"error","error":"refused","message":"Connection failed"}}"#
    )
    .unwrap();

    Command::cargo_bin("fancylog")
        .unwrap()
        .arg("--color")
        .arg("never")
        .arg("--utc")
        .arg(temp_file.path())
        .assert()
        .success()
        .stdout(
            "2024-01-01T10:00:00.000 INFO | Server started port=8080\n\
             2024-01-01T10:00:01.000 ERROR| Connection failed error=refused\n",
        );
}

#[test]
fn test_color_forcing() {
    let output = Command::cargo_bin("fancylog")
        .unwrap()
        .arg("--color")
        .arg("always")
        .write_stdin("{\"level\":\"warn\",\"msg\":\"test\"}\n")
        .output()
        .expect("Failed to execute fancylog");

    let result = String::from_utf8(output.stdout).unwrap();
    assert!(result.contains("\x1b[33mWARN |\x1b[0m"));
    assert!(result.contains("\x1b[33mtest\x1b[0m"));
}

#[test]
fn test_piped_output_defaults_to_no_color() {
    Command::cargo_bin("fancylog")
        .unwrap()
        .write_stdin("{\"level\":\"error\",\"msg\":\"x\"}\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("\x1b[").not())
        .stdout(predicate::str::contains("ERROR| x"));
}

#[test]
fn test_exclude_option() {
    Command::cargo_bin("fancylog")
        .unwrap()
        .args(["--color", "never", "--exclude", "pid"])
        .write_stdin("{\"level\":\"info\",\"msg\":\"up\",\"pid\":42,\"host\":\"a\"}\n")
        .assert()
        .success()
        .stdout("INFO | up host=a\n");
}

#[test]
fn test_non_json_lines_pass_through() {
    Command::cargo_bin("fancylog")
        .unwrap()
        .args(["--color", "never"])
        .write_stdin("plain text line\n\n{\"level\":\"debug\",\"msg\":\"d\"}\n")
        .assert()
        .success()
        .stdout("plain text line\nDEBUG| d\n");
}

#[test]
fn test_fail_fast_rejects_non_json() {
    Command::cargo_bin("fancylog")
        .unwrap()
        .args(["--color", "never", "--fail-fast"])
        .write_stdin("{\"level\":\"info\"}\nnot json\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_output_file() {
    let output = NamedTempFile::new().unwrap();

    Command::cargo_bin("fancylog")
        .unwrap()
        .args(["--color", "always", "-o"])
        .arg(output.path())
        .write_stdin("{\"level\":\"info\",\"msg\":\"to file\"}\n")
        .assert()
        .success()
        .stdout("");

    let written = std::fs::read_to_string(output.path()).unwrap();
    assert!(written.contains("\x1b[32mto file\x1b[0m"));
}

#[test]
fn test_missing_input_file() {
    Command::cargo_bin("fancylog")
        .unwrap()
        .arg("/definitely/not/here.jsonl")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to open input file"));
}
