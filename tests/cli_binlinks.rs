use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_invalid() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("foobar");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("recognized"));

    Ok(())
}

#[test]
fn command_binlinks_help() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("binlinks").arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Bin link ends into density tracks"));

    Ok(())
}

#[test]
fn command_binlinks_source() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "\
chr1 0 99 150.0000
chr1 100 199 50.0000
chr2 0 99 1.0000
chr10 0 99 10.0000
chrA 100 199 100.0000
chrA 200 299 1.0000
"
    );
    // the last line has only three fields
    assert!(stderr.contains("warning: malformed record at line 9"));
    assert!(!stderr.contains("debug"));

    Ok(())
}

#[test]
fn command_binlinks_link_end_both() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("2")
        .write_stdin("L1 chrA 100 200 chrB 150 250\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(
        stdout,
        "\
chrA 100 199 100.0000
chrA 200 299 1.0000
chrB 100 199 50.0000
chrB 200 299 51.0000
"
    );

    Ok(())
}

#[test]
fn command_binlinks_target() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("1")
        .arg("--color-by-chr")
        .write_stdin("l1 chrA 100 200\nl1 chrB 150 250\nl2 chrC 1 1\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // the dangling half at the end is dropped
    assert_eq!(
        stdout,
        "\
chrB 100 199 50.0000 fill_color=chrA
chrB 200 299 51.0000 fill_color=chrA
"
    );

    Ok(())
}

#[test]
fn command_binlinks_num_removeintra() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("--links")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .arg("--num")
        .arg("--removeintra")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 6);
    assert!(stdout.contains("chr1 0 99 1.0000\n"));
    assert!(stdout.contains("chr1 100 199 0.0000\n"));
    assert!(stdout.contains("chrA 200 299 1.0000\n"));

    Ok(())
}

#[test]
fn command_binlinks_color_by_chr() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("--bin-size")
        .arg("1000")
        .arg("--link-end")
        .arg("0")
        .arg("--color-by-chr")
        .arg("--color-prefix")
        .arg("hs")
        .write_stdin("a chr1 0 29 chr2 0 0\nb chr1 100 169 chr3 0 0\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "chr1 0 999 100.0000 fill_color=hschr3\n");

    Ok(())
}

#[test]
fn command_binlinks_per_target() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .arg("--output-style")
        .arg("2")
        .arg("--normalize")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 7);
    assert_eq!(lines[0], "chr1 0 99 0.6667 fill_color=chr2");
    assert_eq!(lines[1], "chr1 0 99 0.3333 fill_color=chr1");
    assert_eq!(lines[2], "chr1 100 199 1.0000 fill_color=chr1");

    Ok(())
}

#[test]
fn command_binlinks_top_target() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .arg("--output-style")
        .arg("1")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[0], "chr1 0 99 100.0000 fill_color=chr2");

    Ok(())
}

#[test]
fn command_binlinks_stacked() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .arg("--output-style")
        .arg("3")
        .arg("--color-prefix")
        .arg("hs")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    let colors: Vec<&str> = stderr
        .lines()
        .filter(|l| l.starts_with("fill_color="))
        .collect();
    assert_eq!(colors, vec!["fill_color=hschr1,hschr2,hschrB,hschrX"]);
    assert!(!stdout.contains("fill_color"));

    assert_eq!(
        stdout,
        "\
chr1 0 99 50.0000,100.0000,0.0000,0.0000
chr1 100 199 50.0000,0.0000,0.0000,0.0000
chr2 0 99 0.0000,0.0000,0.0000,1.0000
chr10 0 99 0.0000,10.0000,0.0000,0.0000
chrA 100 199 0.0000,0.0000,100.0000,0.0000
chrA 200 299 0.0000,0.0000,1.0000,0.0000
"
    );

    Ok(())
}

#[test]
fn command_binlinks_log() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .arg("--log")
        .arg("--removeintra")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("chr1 0 99 2.0000\n"));
    assert!(stdout.contains("chr1 100 199 0.0000\n"));
    assert!(stdout.contains("chr10 0 99 1.0000\n"));
    assert!(stdout.contains("chr2 0 99 0.0000\n"));

    Ok(())
}

#[test]
fn command_binlinks_size_filter() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .arg("--min-link-size")
        .arg("10")
        .arg("--max-link-size")
        .arg("101")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // L1 has a 101 bp end and the chr2-chrX link 1 bp ends
    assert_eq!(
        stdout,
        "\
chr1 0 99 150.0000
chr1 100 199 50.0000
chr10 0 99 10.0000
"
    );

    Ok(())
}

#[test]
fn command_binlinks_gz_outfile() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let outfile = temp.path().join("density.txt");

    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("binlinks")
        .arg("tests/binlinks/links.txt.gz")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .arg("-o")
        .arg(&outfile);
    cmd.assert().success().stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&outfile)?;
    assert_eq!(content.lines().count(), 6);
    assert!(content.starts_with("chr1 0 99 150.0000\n"));

    Ok(())
}

#[test]
fn command_binlinks_debug() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let plain = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .output()?;

    let mut cmd = Command::cargo_bin("circkit")?;
    let debug = cmd
        .arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--debug")
        .output()?;

    assert_eq!(plain.stdout, debug.stdout);
    let stderr = String::from_utf8(debug.stderr)?;
    assert!(stderr.lines().any(|l| l.starts_with("debug ")));
    assert!(!String::from_utf8(debug.stdout)?.contains("debug"));

    Ok(())
}

#[test]
fn command_binlinks_bad_bin_size() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("0");
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("bin_size"));

    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("binlinks").arg("tests/binlinks/links.txt");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--bin-size"));

    Ok(())
}

#[test]
fn command_binlinks_bad_enum() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("3");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("link_end"));

    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("binlinks")
        .arg("tests/binlinks/links.txt")
        .arg("--bin-size")
        .arg("100")
        .arg("--output-style")
        .arg("4");
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("output_style"));

    Ok(())
}

#[test]
fn command_binlinks_missing_input() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    cmd.arg("binlinks")
        .arg("tests/binlinks/not_exist.txt")
        .arg("--bin-size")
        .arg("100");
    cmd.assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("could not open tests/binlinks/not_exist.txt"));

    Ok(())
}

#[test]
fn command_binlinks_large_coordinates() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .write_stdin("L1 chr1 2147483600 2147483647 chr2 0 0\nL2 chr1 3000000050 3000000149 chr2 0 0\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(
        stdout,
        "\
chr1 2147483600 2147483699 48.0000
chr1 3000000000 3000000099 50.0000
chr1 3000000100 3000000199 50.0000
"
    );

    Ok(())
}

#[test]
fn command_binlinks_sub_base_bins() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("--bin-size")
        .arg("0.5")
        .arg("--link-end")
        .arg("0")
        .write_stdin("L1 chr1 0 1 chr2 0 0\n")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // bins without an integer position are not printed
    assert_eq!(stdout, "chr1 0 0 1.0000\nchr1 1 1 1.0000\n");

    Ok(())
}

#[test]
fn command_binlinks_invalid_utf8() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("circkit")?;
    let output = cmd
        .arg("binlinks")
        .arg("--bin-size")
        .arg("100")
        .arg("--link-end")
        .arg("0")
        .write_stdin(b"L1 chrA 0 9 chrB 0 9\nL2 chr\xff 1 2 chrB 3 4\nL3 chrC 0 9 chrB 0 9\n".to_vec())
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert_eq!(stdout, "chrA 0 99 10.0000\nchrC 0 99 10.0000\n");
    assert!(stderr.contains("malformed record at line 2: invalid UTF-8"));

    Ok(())
}
