use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

const HELLO: &str = "Hello
=====

:docid: 42
:date: 2012-01-01
:tags: foo,bar

Welcome to *lightbulb*.
";

/// Skips a title level, which is severe enough to fail a render
const INCONSISTENT_TITLES: &str = "A\n=====\n\nB\n-----\n\nC\n=====\n\nD\n~~~~~\n";

fn write(root: &Path, rel: &str, content: &str) -> std::io::Result<()> {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

fn lightbulb(dir: &Path) -> Result<Command, Box<dyn std::error::Error>> {
    #[allow(deprecated)]
    let mut cmd = Command::cargo_bin("lightbulb")?;
    cmd.current_dir(dir);
    Ok(cmd)
}

#[test]
fn build_writes_fragments() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "source/2012/hello.rst", HELLO)?;

    lightbulb(dir.path())?
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("2012/hello"));

    let html = fs::read_to_string(dir.path().join("build/2012/hello.html"))?;
    assert_eq!(html, "<p>Welcome to <em>lightbulb</em>.</p>\n\n");
    Ok(())
}

#[test]
fn build_reads_config_file() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "lightbulb.yml", "source_folder: posts\nbuild_folder: out\n")?;
    write(dir.path(), "posts/hello.rst", HELLO)?;

    lightbulb(dir.path())?.arg("build").assert().success();

    assert!(dir.path().join("out/hello.html").exists());
    assert!(!dir.path().join("build").exists());
    Ok(())
}

#[test]
fn build_with_project_flag() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let cwd = tempdir()?;
    write(dir.path(), "source/hello.rst", HELLO)?;

    lightbulb(cwd.path())?
        .arg("--project")
        .arg(dir.path())
        .arg("build")
        .assert()
        .success();

    assert!(dir.path().join("build/hello.html").exists());
    Ok(())
}

#[test]
fn build_failure_exits_non_zero_after_finishing_batch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "source/bad.rst", INCONSISTENT_TITLES)?;
    write(dir.path(), "source/hello.rst", HELLO)?;

    lightbulb(dir.path())?
        .arg("build")
        .assert()
        .failure()
        .stderr(predicate::str::contains("bad.rst"))
        .stderr(predicate::str::contains("Build failed for 1 document(s)"));

    assert!(dir.path().join("build/hello.html").exists());
    assert!(!dir.path().join("build/bad.html").exists());
    Ok(())
}

#[test]
fn unknown_directive_still_builds() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "source/odd.rst", "Text.\n\n.. bogus:: nope\n")?;

    lightbulb(dir.path())?
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("odd"));

    let fragment = fs::read_to_string(dir.path().join("build/odd.html"))?;
    assert!(fragment.contains("<div class=\"system-message\">"));
    Ok(())
}

#[test]
fn fail_fast_stops_before_later_documents() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "source/a-bad.rst", INCONSISTENT_TITLES)?;
    write(dir.path(), "source/hello.rst", HELLO)?;

    lightbulb(dir.path())?
        .args(["--fail-fast", "build"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Build aborted"));

    assert!(!dir.path().join("build/hello.html").exists());
    Ok(())
}

#[test]
fn load_reports_missing_metadata() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "source/plain.rst", "Plain\n=====\n\nNo docinfo here.\n")?;
    write(dir.path(), "source/hello.rst", HELLO)?;

    lightbulb(dir.path())?
        .arg("load")
        .assert()
        .failure()
        .stdout(predicate::str::contains("hello"))
        .stderr(predicate::str::contains("plain.rst"));

    let store = fs::read_to_string(dir.path().join(".lightbulb/store.json"))?;
    assert!(store.contains("Welcome to <em>lightbulb</em>."));
    assert!(!store.contains("No docinfo here."));
    Ok(())
}

#[test]
fn load_then_watermark_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "source/2012/hello.rst", HELLO)?;

    lightbulb(dir.path())?.arg("load").assert().success();

    lightbulb(dir.path())?
        .args(["watermark", "get"])
        .assert()
        .success()
        .stdout("");

    lightbulb(dir.path())?
        .args(["watermark", "set", "2012-06-01T10:00:00Z"])
        .assert()
        .success();

    lightbulb(dir.path())?
        .args(["watermark", "get"])
        .assert()
        .success()
        .stdout("2012-06-01T10:00:00+00:00\n");

    let store = fs::read_to_string(dir.path().join(".lightbulb/store.json"))?;
    assert!(store.contains("2012/hello"));
    assert!(store.contains("America/Chicago"));
    Ok(())
}

#[test]
fn watermark_rejects_bad_timestamp() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    lightbulb(dir.path())?
        .args(["watermark", "set", "yesterday"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid RFC 3339 timestamp"));
    Ok(())
}

#[test]
fn changes_outside_a_repository_fails() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    write(dir.path(), "source/hello.rst", HELLO)?;

    lightbulb(dir.path())?
        .arg("changes")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read change log"));
    Ok(())
}

#[test]
fn help_lists_commands() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    lightbulb(dir.path())?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("build"))
        .stdout(predicate::str::contains("watermark"));
    Ok(())
}
