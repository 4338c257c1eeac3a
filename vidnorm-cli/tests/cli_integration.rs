// vidnorm-cli/tests/cli_integration.rs

use assert_cmd::Command;
use predicates::str::contains;
use std::error::Error;
use std::fs;
use tempfile::tempdir;

fn vidnorm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("vidnorm").expect("Failed to find vidnorm binary");
    // Keep the environment from leaking into the tests
    for var in [
        "VIDNORM_CONFIG",
        "VIDNORM_INPUT_DIR",
        "VIDNORM_OUTPUT_DIR",
        "VIDNORM_LOG_DIR",
        "VIDNORM_FFPROBE",
        "VIDNORM_FFMPEG",
        "VIDNORM_MAX_CONCURRENCY",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("NO_COLOR", "1");
    cmd
}

#[test]
fn test_help_lists_subcommands() {
    vidnorm_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("convert"))
        .stdout(contains("validate"))
        .stdout(contains("inspect"));
}

#[test]
fn test_missing_prober_is_fatal() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    let input = root.path().join("in");
    fs::create_dir(&input)?;
    fs::write(input.join("clip.mkv"), "dummy content")?;

    vidnorm_cmd()
        .current_dir(root.path())
        .args(["convert", "-i", "in", "-o", "out", "-l", "logs"])
        .args(["--ffprobe", "vidnorm-no-such-ffprobe", "--ffmpeg", "vidnorm-no-such-ffmpeg"])
        .assert()
        .failure()
        .stderr(contains("Required external tool not found"));

    assert!(!root.path().join("out").exists());
    assert!(root.path().join("logs").join("vidnorm.log").exists());
    Ok(())
}

#[test]
fn test_same_input_and_output_is_rejected() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    vidnorm_cmd()
        .current_dir(root.path())
        .args(["convert", "-i", "media", "-o", "media"])
        .assert()
        .failure()
        .stderr(contains("Invalid configuration"));
    Ok(())
}

#[test]
fn test_bad_config_file_is_reported() -> Result<(), Box<dyn Error>> {
    let root = tempdir()?;
    let config = root.path().join("vidnorm.toml");
    fs::write(&config, "max_concurrency = \"lots\"\n")?;

    vidnorm_cmd()
        .current_dir(root.path())
        .arg("--config")
        .arg(&config)
        .arg("validate")
        .assert()
        .failure()
        .stderr(contains("Could not load configuration"));
    Ok(())
}

#[test]
fn test_invalid_crf_is_a_usage_error() {
    vidnorm_cmd()
        .args(["convert", "--crf", "99"])
        .assert()
        .failure()
        .stderr(contains("--crf"));
}
