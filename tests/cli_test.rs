//! End-to-end tests for the skillkit binary.
//!
//! Each test gets a scratch HOME, a project directory and a fake toolkit
//! whose `install.sh` writes a deterministic manifest and logs its argv.

#![cfg(unix)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MANIFEST: &str = ".skillkit-manifest.json";

const FAKE_INSTALLER: &str = r#"#!/bin/sh
echo "$*" >> "$SKILLKIT_HOME/invocations.log"
skills='"nextjs-react", "cloudflare"'
agents='"reviewer"'
hooks=true
for arg in "$@"; do
  case "$arg" in
    --no-skills) skills='' ;;
    --no-agents) agents='' ;;
    --no-hooks) hooks=false ;;
    --dry-run) exit 0 ;;
    --fail) exit 3 ;;
  esac
done
base="$PWD/.claude"
mkdir -p "$base"
if [ -n "$skills" ]; then
  mkdir -p "$base/skills/nextjs-react" "$base/skills/cloudflare"
  echo x > "$base/skills/nextjs-react/SKILL.md"
  echo x > "$base/skills/cloudflare/SKILL.md"
fi
if [ -n "$agents" ]; then
  mkdir -p "$base/agents"
  echo x > "$base/agents/reviewer.md"
fi
scripts=''
if [ "$hooks" = true ]; then
  mkdir -p "$base/hooks/logs"
  echo x > "$base/hooks/pre-tool.sh"
  scripts='"pre-tool.sh"'
fi
cat > "$base/.skillkit-manifest.json" <<EOF
{
  "target": "claude-project",
  "target_path": "$base",
  "version": "0.3.0",
  "installed_at": "2026-01-01T00:00:00Z",
  "skills": [$skills],
  "agents": [$agents],
  "hooks": $hooks,
  "hook_scripts": [$scripts],
  "plugin_files": []
}
EOF
"#;

const FAKE_CLI: &str = r#"#!/bin/sh
echo "$SKILLKIT_HOME|$*" > "$PWD/delegated.log"
"#;

struct Sandbox {
    _tmp: TempDir,
    home: PathBuf,
    project: PathBuf,
    toolkit: PathBuf,
}

impl Sandbox {
    fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        let home = tmp.path().join("home");
        let project = tmp.path().join("project");
        let toolkit = tmp.path().join("toolkit");
        for dir in [&home, &project, &toolkit] {
            std::fs::create_dir_all(dir).unwrap();
        }
        write_script(&toolkit.join("install.sh"), FAKE_INSTALLER);
        Self {
            _tmp: tmp,
            home,
            project,
            toolkit,
        }
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("skillkit").unwrap();
        cmd.current_dir(&self.project)
            .env("HOME", &self.home)
            .env("SKILLKIT_CONFIG", self.home.join("no-config.toml"))
            .env("SKILLKIT_HOME", &self.toolkit)
            .env("NO_COLOR", "1")
            .env_remove("RUST_LOG");
        cmd
    }

    fn claude_dir(&self) -> PathBuf {
        self.project.join(".claude")
    }

    fn invocations(&self) -> Vec<String> {
        std::fs::read_to_string(self.toolkit.join("invocations.log"))
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    fn install(&self, args: &[&str]) {
        self.cmd().arg("install").args(args).assert().success();
    }
}

fn write_script(path: &Path, body: &str) {
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
    let mut perms = std::fs::metadata(path).unwrap().permissions();
    perms.set_mode(0o755);
    std::fs::set_permissions(path, perms).unwrap();
}

fn write_manifest(dir: &Path, target: &str) {
    std::fs::create_dir_all(dir).unwrap();
    let json = format!(
        r#"{{"target": "{}", "target_path": "{}", "skills": [], "agents": [], "hooks": false}}"#,
        target,
        dir.display()
    );
    std::fs::write(dir.join(MANIFEST), json).unwrap();
}

// =========================================================================
// Basics
// =========================================================================

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("skillkit").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("self-update"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("skillkit").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_doctor_without_installations() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .arg("doctor")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No skillkit manifest found"));
}

// =========================================================================
// Install / doctor
// =========================================================================

#[test]
fn test_install_then_doctor_passes() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);

    sandbox
        .cmd()
        .arg("doctor")
        .assert()
        .success()
        .stdout(predicate::str::contains("4 passed, 0 failed"));
}

#[test]
fn test_doctor_reports_drift() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);
    std::fs::remove_file(sandbox.claude_dir().join("skills/cloudflare/SKILL.md")).unwrap();

    sandbox
        .cmd()
        .arg("doctor")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("3 passed, 1 failed"))
        .stderr(predicate::str::contains("cloudflare"));
}

#[test]
fn test_installer_failure_exits_nonzero() {
    let sandbox = Sandbox::new();
    sandbox
        .cmd()
        .args(["install", "--claude", "--fail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Installer exited with"));
}

// =========================================================================
// Update
// =========================================================================

#[test]
fn test_update_reproduces_selection() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude", "--no-agents", "--no-hooks"]);

    sandbox.cmd().arg("update").assert().success();

    let calls = sandbox.invocations();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[1], "--claude --no-agents --no-hooks --force");
}

#[test]
fn test_update_is_idempotent() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);
    let manifest = sandbox.claude_dir().join(MANIFEST);

    sandbox.cmd().arg("update").assert().success();
    let first = std::fs::read_to_string(&manifest).unwrap();
    sandbox.cmd().arg("update").assert().success();
    let second = std::fs::read_to_string(&manifest).unwrap();

    assert_eq!(first, second);
    assert_eq!(sandbox.invocations()[1], sandbox.invocations()[2]);
}

#[test]
fn test_update_no_force_and_dry_run() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);

    sandbox
        .cmd()
        .args(["update", "--dry-run", "--no-force"])
        .assert()
        .success();

    assert_eq!(sandbox.invocations()[1], "--claude --dry-run --no-force");
}

#[test]
fn test_non_interactive_update_takes_first_candidate() {
    let sandbox = Sandbox::new();
    write_manifest(&sandbox.project.join(".claude"), "claude-project");
    write_manifest(&sandbox.project.join(".opencode"), "opencode-project");
    write_manifest(&sandbox.project.join(".codex"), "codex-project");

    sandbox
        .cmd()
        .args(["update", "--dry-run"])
        .assert()
        .success();

    let calls = sandbox.invocations();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("--claude "), "got {:?}", calls[0]);
}

#[test]
fn test_update_all_visits_every_manifest() {
    let sandbox = Sandbox::new();
    write_manifest(&sandbox.project.join(".claude"), "claude-project");
    write_manifest(&sandbox.project.join(".codex"), "codex-project");
    write_manifest(&sandbox.home.join(".codex"), "codex-global");

    sandbox
        .cmd()
        .args(["update", "--all", "--dry-run"])
        .assert()
        .success();

    let calls = sandbox.invocations();
    assert_eq!(calls.len(), 3);
    assert!(calls[0].starts_with("--claude "));
    assert!(calls[1].starts_with("--codex "));
    assert!(calls[2].starts_with("--codex-global "));
}

#[test]
fn test_update_all_continues_past_failed_manifest() {
    let sandbox = Sandbox::new();
    // discovered first: its install root is gone
    let claude = sandbox.project.join(".claude");
    std::fs::create_dir_all(&claude).unwrap();
    std::fs::write(
        claude.join(MANIFEST),
        r#"{"target": "claude-project", "target_path": "/nonexistent/skillkit-test/.claude"}"#,
    )
    .unwrap();
    write_manifest(&sandbox.project.join(".codex"), "codex-project");

    sandbox
        .cmd()
        .args(["update", "--all", "--dry-run"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("1 of 2 manifest(s) failed to update"));

    let calls = sandbox.invocations();
    assert_eq!(calls.len(), 1);
    assert!(calls[0].starts_with("--codex "), "got {:?}", calls[0]);
}

#[test]
fn test_update_without_manifest_reports_not_found_before_installer() {
    let sandbox = Sandbox::new();
    let empty_toolkit = sandbox.home.join("no-toolkit");
    std::fs::create_dir_all(&empty_toolkit).unwrap();

    for args in [&["update"][..], &["update", "--all"][..]] {
        sandbox
            .cmd()
            .env("SKILLKIT_HOME", &empty_toolkit)
            .args(args)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("No skillkit manifest found"))
            .stderr(predicate::str::contains("Installer not found").not());
    }
}

#[test]
fn test_doctor_counts_unsafe_identifier() {
    let sandbox = Sandbox::new();
    let claude = sandbox.claude_dir();
    std::fs::create_dir_all(claude.join("skills/cloudflare")).unwrap();
    std::fs::write(claude.join("skills/cloudflare/SKILL.md"), "x").unwrap();
    std::fs::write(
        claude.join(MANIFEST),
        r#"{"target": "claude-project", "skills": ["..", "cloudflare"]}"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .arg("doctor")
        .assert()
        .code(1)
        .stdout(predicate::str::contains("1 passed, 1 failed"));
}

#[test]
fn test_update_missing_workdir_fails() {
    let sandbox = Sandbox::new();
    let manifest = sandbox.home.join("elsewhere").join(MANIFEST);
    std::fs::create_dir_all(manifest.parent().unwrap()).unwrap();
    std::fs::write(
        &manifest,
        r#"{"target": "claude-project", "target_path": "/nonexistent/skillkit-test/.claude"}"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["update", "--path"])
        .arg(&manifest)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no longer exists"));
    assert!(sandbox.invocations().is_empty());
}

// =========================================================================
// Uninstall
// =========================================================================

#[test]
fn test_uninstall_removes_recorded_files() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);
    let base = sandbox.claude_dir();
    std::fs::write(base.join("settings.json"), "{}").unwrap();

    sandbox
        .cmd()
        .args(["uninstall", "--yes"])
        .assert()
        .success()
        .stderr(predicate::str::contains("settings.json"));

    assert!(!base.join(MANIFEST).exists());
    assert!(!base.join("skills").exists());
    assert!(!base.join("hooks").exists());
    assert!(base.join("settings.json").exists());
}

#[test]
fn test_uninstall_requires_confirmation_when_piped() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);

    sandbox.cmd().arg("uninstall").assert().failure();
    assert!(sandbox.claude_dir().join(MANIFEST).exists());
}

#[test]
fn test_uninstall_dry_run_keeps_everything() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);

    sandbox
        .cmd()
        .args(["uninstall", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("cloudflare"));
    assert!(sandbox.claude_dir().join("skills/cloudflare/SKILL.md").exists());
}

#[test]
fn test_uninstall_retry_after_manual_partial_removal() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude"]);
    std::fs::remove_dir_all(sandbox.claude_dir().join("skills")).unwrap();

    sandbox.cmd().args(["uninstall", "--force"]).assert().success();
    assert!(!sandbox.claude_dir().join(MANIFEST).exists());

    sandbox
        .cmd()
        .args(["uninstall", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No skillkit manifest found"));
}

#[test]
fn test_uninstall_keeps_manifest_on_unsafe_identifier() {
    let sandbox = Sandbox::new();
    let claude = sandbox.claude_dir();
    std::fs::create_dir_all(claude.join("skills/users-own")).unwrap();
    std::fs::write(claude.join("skills/users-own/SKILL.md"), "x").unwrap();
    std::fs::write(sandbox.project.join("main.rs"), "fn main() {}").unwrap();
    std::fs::write(
        claude.join(MANIFEST),
        r#"{"target": "claude-project", "skills": ["", "../.."]}"#,
    )
    .unwrap();

    sandbox
        .cmd()
        .args(["uninstall", "--yes"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Could not remove 2 path(s)"));

    assert!(claude.join("skills/users-own/SKILL.md").exists());
    assert!(sandbox.project.join("main.rs").exists());
    assert!(claude.join(MANIFEST).exists());
}

// =========================================================================
// List
// =========================================================================

#[test]
fn test_list_json() {
    let sandbox = Sandbox::new();
    sandbox.install(&["--claude", "--no-hooks"]);

    let output = sandbox.cmd().args(["list", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["target"], "claude-project");
    assert_eq!(json[0]["hooks"], Value::Bool(false));
}

// =========================================================================
// Self-update
// =========================================================================

#[test]
fn test_self_update_rejects_incomplete_source() {
    let sandbox = Sandbox::new();
    let source = sandbox.home.join("src");
    std::fs::create_dir_all(&source).unwrap();

    sandbox
        .cmd()
        .args(["self-update", "--yes", "--source"])
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a skillkit source"));
}

#[test]
fn test_self_update_delegates_to_source() {
    let sandbox = Sandbox::new();
    let source = sandbox.home.join("src");
    write_script(&source.join("install.sh"), FAKE_INSTALLER);
    write_script(&source.join("bin/skillkit"), FAKE_CLI);
    std::fs::write(source.join("VERSION"), "9.9.9\n").unwrap();

    sandbox
        .cmd()
        .args(["self-update", "--yes", "--all", "--dry-run", "--source"])
        .arg(&source)
        .assert()
        .success()
        .stdout(predicate::str::contains("9.9.9"));

    let log = std::fs::read_to_string(sandbox.project.join("delegated.log")).unwrap();
    assert_eq!(
        log.trim(),
        format!("{}|update --all --dry-run", source.display())
    );
    // a local source is never deleted
    assert!(source.join("bin/skillkit").exists());
}
