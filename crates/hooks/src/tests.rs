use std::fs;
use std::process::Command as StdCommand;

use sublime_git_tools::Repo;
use tempfile::TempDir;

use crate::executor::{configured_timeout, run_hook, HookStage};
use crate::inject::{install_pre_commit, remove_pre_commit, HookInjectionOutcome};

fn init_repo() -> (TempDir, Repo) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let status = StdCommand::new("git")
        .args(["init", "-q"])
        .current_dir(dir.path())
        .status()
        .expect("run git init");
    assert!(status.success());
    let repo = Repo::open(dir.path().to_str().expect("utf8 tempdir path")).expect("open repo");
    (dir, repo)
}

#[tokio::test]
async fn pre_hook_success_proceeds() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let outcome =
        run_hook("pre-commit", "true", &[], dir.path(), HookStage::Pre).await.expect("run hook");
    assert!(outcome.proceed);
    assert!(outcome.error.is_none());
}

#[tokio::test]
async fn pre_hook_failure_aborts() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let result = run_hook("pre-commit", "false", &[], dir.path(), HookStage::Pre).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn post_hook_failure_is_advisory() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let outcome =
        run_hook("post-publish", "false", &[], dir.path(), HookStage::Post).await.expect("run hook");
    assert!(outcome.proceed);
    assert!(outcome.error.is_some());
}

#[tokio::test]
async fn on_error_hook_failure_is_swallowed() {
    let dir = tempfile::tempdir().expect("create tempdir");
    let outcome =
        run_hook("on-error", "false", &[], dir.path(), HookStage::OnError).await.expect("run hook");
    assert!(outcome.proceed);
    assert!(outcome.error.is_some());
}

#[test]
fn configured_timeout_defaults_to_thirty_seconds() {
    std::env::remove_var("PKGLAB_HOOK_TIMEOUT_MS");
    assert_eq!(configured_timeout().as_millis(), 30_000);
}

#[test]
fn install_pre_commit_writes_husky_script() {
    let (dir, repo) = init_repo();
    fs::create_dir_all(dir.path().join(".husky")).expect("mkdir .husky");
    fs::write(dir.path().join(".husky").join("pre-commit"), "#!/usr/bin/env sh\n")
        .expect("seed husky hook");

    let outcome = install_pre_commit(&repo, "pkglab", "pkglab check").expect("install hook");
    let HookInjectionOutcome::Installed(path) = outcome else {
        panic!("expected Installed outcome for husky")
    };
    let content = fs::read_to_string(&path).expect("read hook");
    assert!(content.contains("# pkglab-start"));
    assert!(content.contains("pkglab check"));
    assert!(content.contains("# pkglab-end"));
}

#[test]
fn install_pre_commit_is_idempotent() {
    let (dir, repo) = init_repo();
    fs::create_dir_all(dir.path().join(".husky")).expect("mkdir .husky");
    fs::write(dir.path().join(".husky").join("pre-commit"), "#!/usr/bin/env sh\n")
        .expect("seed husky hook");

    install_pre_commit(&repo, "pkglab", "pkglab check").expect("first install");
    install_pre_commit(&repo, "pkglab", "pkglab check").expect("second install");

    let content =
        fs::read_to_string(dir.path().join(".husky").join("pre-commit")).expect("read hook");
    assert_eq!(content.matches("# pkglab-start").count(), 1);
}

#[test]
fn install_pre_commit_falls_back_to_raw_git_hooks() {
    let (_dir, repo) = init_repo();
    let outcome = install_pre_commit(&repo, "pkglab", "pkglab check").expect("install hook");
    let HookInjectionOutcome::Installed(path) = outcome else {
        panic!("expected Installed outcome for raw git hooks")
    };
    assert!(path.ends_with("hooks/pre-commit"));
}

#[test]
fn install_pre_commit_reports_lefthook_guidance() {
    let (dir, repo) = init_repo();
    fs::write(dir.path().join("lefthook.yml"), "pre-commit:\n  commands: {}\n")
        .expect("write lefthook config");

    let outcome = install_pre_commit(&repo, "pkglab", "pkglab check").expect("install hook");
    let HookInjectionOutcome::LefthookGuidance(path) = outcome else {
        panic!("expected LefthookGuidance outcome")
    };
    assert!(path.ends_with("lefthook.yml"));
}

#[test]
fn remove_pre_commit_strips_marker_block_only() {
    let (dir, repo) = init_repo();
    install_pre_commit(&repo, "pkglab", "pkglab check").expect("install hook");
    let hook_path = repo.hooks_dir().join("pre-commit");
    let mut content = fs::read_to_string(&hook_path).expect("read hook");
    content.push_str("echo custom-user-hook\n");
    fs::write(&hook_path, &content).expect("append user content");

    remove_pre_commit(&repo, "pkglab").expect("remove hook");

    let content = fs::read_to_string(&hook_path).expect("read hook");
    assert!(!content.contains("pkglab check"));
    assert!(content.contains("echo custom-user-hook"));
}
