use std::{
    fs,
    path::PathBuf,
    process::{Command, Output},
};

use tempfile::TempDir;

fn box_pusher(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_box-pusher"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("failed to invoke box-pusher binary")
}

fn scratch_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).expect("scratch file written");
    path
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn built_in_level_replays_script() {
    let output = box_pusher(&["EEE"]);

    assert!(output.status.success(), "box-pusher should exit cleanly");
    let text = stdout(&output);
    assert!(text.starts_with("Welcome to Box Pusher."), "{text}");
    assert!(text.contains("moved A from Cell(1,4) to Cell(1,5)"), "{text}");
    assert!(text.contains("target a completed"), "{text}");
    assert!(text.contains("targets 1/2, moves 3"), "{text}");
}

#[test]
fn config_file_and_override_control_push_strength() {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let level = scratch_file(&dir, "pair.txt", "XXXXXX\nX@ABcX\nXXXXXX\n");
    let config = scratch_file(&dir, "strong.toml", "push_strength = 2\n");
    let level_arg = level.to_str().expect("utf-8 path");
    let config_arg = config.to_str().expect("utf-8 path");

    let strong = box_pusher(&["--level", level_arg, "--config", config_arg, "R"]);
    assert!(strong.status.success());
    let text = stdout(&strong);
    assert!(text.contains("target c completed"), "{text}");
    assert!(text.contains("level completed"), "{text}");
    assert!(text.contains("targets 1/1, moves 1, complete"), "{text}");

    let weak = box_pusher(&[
        "--level",
        level_arg,
        "--config",
        config_arg,
        "--push-strength",
        "1",
        "R",
    ]);
    assert!(weak.status.success());
    let text = stdout(&weak);
    assert!(text.contains("rejected move of @ to Cell(1,2)"), "{text}");
    assert!(text.contains("X@ABcX"), "{text}");
}

#[test]
fn invalid_script_fails() {
    let output = box_pusher(&["NQ"]);
    assert!(!output.status.success(), "unknown move letters must fail");
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid move script"));
}
