//! Tests for the pathbox binary.

mod common;

use std::process::{Command, Output};

use common::{s, Fixture};

/// Binary with a hermetic environment: no user config, no `PATHBOX_*`
/// overrides, cwd at the fixture root.
fn pathbox_cmd(fx: &Fixture) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pathbox"));
    cmd.current_dir(&fx.root)
        .env("PATHBOX_CONFIG", fx.root.join("no-config.toml"))
        .env("HOME", fx.home())
        .env_remove("PATHBOX_IMAGE")
        .env_remove("PATHBOX_VOLUME")
        .env_remove("PATHBOX_RUNTIME")
        .env_remove("PATHBOX_GIT_CONFIG")
        .env_remove("PATHBOX_LOG");
    cmd
}

fn dry_run(fx: &Fixture, args: &[&str]) -> serde_json::Value {
    let output = pathbox_cmd(fx)
        .args(["--image", "alpine:3", "--no-tty", "--dry-run"])
        .args(args)
        .output()
        .expect("Failed to execute command");
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    serde_json::from_slice(&output.stdout).expect("dry run prints JSON")
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_help_shows_wrapper_options() {
    let fx = Fixture::new();
    let output = pathbox_cmd(&fx)
        .arg("--help")
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success());
    assert!(stdout.contains("--image"));
    assert!(stdout.contains("--dry-run"));
    assert!(stdout.contains("--no-git-config"));
}

#[test]
fn test_missing_image_exits_with_error() {
    let fx = Fixture::new();
    let output = pathbox_cmd(&fx)
        .arg("ls")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Error: Config validation failed: no container image configured"));
}

#[test]
fn test_malformed_config_exits_with_error() {
    let fx = Fixture::new();
    let config = fx.root.join("bad.toml");
    std::fs::write(&config, "image = ").unwrap();

    let output = pathbox_cmd(&fx)
        .env("PATHBOX_CONFIG", &config)
        .arg("ls")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("Failed to parse config file"));
}

#[test]
fn test_dry_run_maps_file_argument() {
    let fx = Fixture::new();
    fx.file("docs/a.txt");

    let plan = dry_run(&fx, &["cat", "docs/a.txt", "-n"]);

    assert_eq!(plan["program"], "docker");
    assert_eq!(
        plan["mounts"],
        serde_json::json!([format!(
            "type=bind,source={},target=/workspace/docs",
            s(&fx.root.join("docs"))
        )])
    );
    assert_eq!(
        plan["container_args"],
        serde_json::json!(["cat", "/workspace/docs/a.txt", "-n"])
    );
}

#[test]
fn test_dry_run_mounts_git_config_from_home() {
    let fx = Fixture::new();
    let gitconfig = fx.file("home/.gitconfig");

    let plan = dry_run(&fx, &["git", "log"]);

    assert_eq!(
        plan["mounts"][0],
        format!("type=bind,source={},target=/home/user/.gitconfig,readonly", s(&gitconfig))
    );
}

#[test]
fn test_no_git_config_flag() {
    let fx = Fixture::new();
    fx.file("home/.gitconfig");

    let plan = dry_run(&fx, &["--no-git-config", "git", "log"]);

    assert_eq!(plan["mounts"], serde_json::json!([]));
}

#[test]
fn test_flags_after_command_belong_to_command() {
    let fx = Fixture::new();

    let plan = dry_run(&fx, &["echo", "--dry-run", "--image", "x"]);

    assert_eq!(
        plan["container_args"],
        serde_json::json!(["echo", "--dry-run", "--image", "x"])
    );
}

#[test]
fn test_nonexistent_path_warns_on_stderr() {
    let fx = Fixture::new();
    let output = pathbox_cmd(&fx)
        .args(["--image", "alpine:3", "--no-tty", "--dry-run", "cat", "./missing.txt"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success());
    assert!(stderr(&output).contains("./missing.txt"));
}

#[test]
fn test_missing_runtime_exits_127() {
    let fx = Fixture::new();
    let output = pathbox_cmd(&fx)
        .args(["--image", "alpine:3", "--no-tty", "--runtime", "pathbox-no-such-runtime", "true"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(127));
    assert!(stderr(&output).contains("container runtime 'pathbox-no-such-runtime' not found"));
}

#[cfg(unix)]
#[test]
fn test_runtime_exit_code_is_propagated() {
    let fx = Fixture::new();
    let runtime = fx.root.join("fake-runtime");
    std::fs::write(&runtime, "#!/bin/sh\nexit 42\n").unwrap();
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(&runtime, std::fs::Permissions::from_mode(0o755)).unwrap();
    }

    let output = pathbox_cmd(&fx)
        .args(["--image", "alpine:3", "--no-tty", "--runtime"])
        .arg(&runtime)
        .arg("true")
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(42));
}
