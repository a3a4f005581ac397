// Drives the compiled binary with piped stdin; no network access needed.

use assert_cmd::Command;
use std::fs;
use tempfile::tempdir;

fn tadak(config_dir: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("tadak").unwrap();
    cmd.arg("--config").arg(config_dir.join("config.json"));
    cmd.env_remove("RUST_LOG");
    cmd
}

#[test]
fn text_session_prints_summary() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = tadak(dir.path())
        .args(["--text", "hello world\nsecond line here"])
        .write_stdin("hello world\nsecond line there\n")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("[1/2 | done 0] hello world"));
    assert!(stdout.contains("[2/2 | done 0] second line here"));
    assert!(stdout.contains("[1/2 | done 2] hello world"));

    let json_start = stdout.find('{').expect("summary json");
    let summary: serde_json::Value = serde_json::from_str(&stdout[json_start..])?;
    assert_eq!(summary["total_words"], 5);
    assert_eq!(summary["correct_words"], 4);
    assert_eq!(summary["incorrect_words"], 1);
    assert_eq!(summary["accuracy"], 80.0);
    Ok(())
}

#[test]
fn file_window_session() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let file = dir.path().join("lines.txt");
    fs::write(&file, "zero line\nfirst line\n\nsecond line\nthird line\n")?;

    let output = tadak(dir.path())
        .arg("--file")
        .arg(&file)
        .args(["--start", "1", "--count", "2"])
        .write_stdin("first line\n")
        .output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("[1/2 | done 0] first line"));
    assert!(stdout.contains("[2/2 | done 0] second line"));
    assert!(!stdout.contains("third line"));
    Ok(())
}

#[test]
fn default_sentences_without_source() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = tadak(dir.path()).write_stdin("").output()?;

    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("[1/4 | done 0] 수고했어 오늘도 좋은 하루 보내세요"));
    Ok(())
}

#[test]
fn blank_text_warns() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let output = tadak(dir.path()).args(["--text", "   \n  "]).output()?;

    assert!(output.status.success());
    assert!(String::from_utf8(output.stderr)?.contains("no text to practise"));
    Ok(())
}

#[test]
fn rejects_non_http_url() {
    let dir = tempdir().unwrap();
    tadak(dir.path())
        .args(["--url", "ftp://example.com"])
        .assert()
        .failure();
}

#[test]
fn sources_are_mutually_exclusive() {
    let dir = tempdir().unwrap();
    tadak(dir.path())
        .args(["--text", "hello there", "--generate", "english"])
        .assert()
        .failure();
}
