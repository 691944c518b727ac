use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::Context;
use ntest::timeout;

fn calc(dir: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_currency_calc"));
    cmd.current_dir(dir).env_remove("CURRENCY_CALC_RATE");
    cmd
}

fn with_config(rate: &str) -> anyhow::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir().context("creating tmp dir")?;
    fs::write(dir.path().join("config.txt"), rate).context("writing config")?;
    Ok(dir)
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout[..]).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr[..]).into_owned()
}

#[test]
#[timeout(30000)]
fn demo_expression() -> anyhow::Result<()> {
    let dir = with_config("90.0\n")?;
    let out = calc(dir.path()).output().context("spawning calc")?;
    assert!(out.status.success(), "calc failed: {}", stderr(&out));
    assert_eq!(stdout(&out), "Result: $93.59\n");
    Ok(())
}

#[test]
#[timeout(30000)]
fn explicit_expression_and_rate() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = calc(dir.path())
        .args(["--rate", "100", "toDollars(250p) + $1"])
        .output()
        .context("spawning calc")?;
    assert!(out.status.success(), "calc failed: {}", stderr(&out));
    assert_eq!(stdout(&out), "Result: $3.50\n");
    Ok(())
}

#[test]
#[timeout(30000)]
fn rate_from_env() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = calc(dir.path())
        .env("CURRENCY_CALC_RATE", "2")
        .arg("toDollars(5)")
        .output()
        .context("spawning calc")?;
    assert!(out.status.success(), "calc failed: {}", stderr(&out));
    assert_eq!(stdout(&out), "Result: $2.50\n");
    Ok(())
}

#[test]
#[timeout(30000)]
fn invalid_config() -> anyhow::Result<()> {
    for rate in ["abc\n", "-1\n"] {
        let dir = with_config(rate)?;
        let out = calc(dir.path()).arg("toDollars(5").output().context("spawning calc")?;
        assert!(!out.status.success(), "calc accepted rate {:?}", rate);
        assert!(stdout(&out).is_empty());
        let err = stderr(&out);
        assert!(err.contains("not a valid exchange rate"), "unexpected stderr: {}", err);
        assert!(!err.contains("could not find"));
    }
    Ok(())
}

#[test]
#[timeout(30000)]
fn missing_config() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let out = calc(dir.path()).output().context("spawning calc")?;
    assert!(!out.status.success());
    assert!(stderr(&out).contains("could not read exchange rate"));
    Ok(())
}

#[test]
#[timeout(30000)]
fn malformed_expression() -> anyhow::Result<()> {
    let dir = with_config("90")?;
    let out = calc(dir.path()).arg("toDollars(5").output().context("spawning calc")?;
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
    assert!(stderr(&out).contains("could not find ')'"));
    Ok(())
}

#[test]
#[timeout(30000)]
fn interactive() -> anyhow::Result<()> {
    let dir = with_config("90")?;
    let mut child = calc(dir.path())
        .arg("-i")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .context("spawning calc")?;
    child
        .stdin
        .take()
        .context("no stdin")?
        .write_all(b"10-3-2\n2 * 3\ntoRubles($1)\n\nnever read\n")
        .context("writing expressions")?;
    let out = child.wait_with_output().context("waiting for calc")?;
    assert!(out.status.success(), "calc failed: {}", stderr(&out));
    assert_eq!(
        stdout(&out),
        "> $5.00\n> Error, invalid character, '*', encountered\n> $90.00\n> "
    );
    Ok(())
}

#[test]
#[timeout(30000)]
fn nesting_limit() -> anyhow::Result<()> {
    let dir = with_config("90")?;
    let out = calc(dir.path())
        .args(["--max-depth", "1", "toDollars(toRubles(1))"])
        .output()
        .context("spawning calc")?;
    assert!(!out.status.success());
    assert!(stderr(&out).contains("nested deeper than 1 levels"));
    Ok(())
}
