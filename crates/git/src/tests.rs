use std::fs;
use std::process::Command;

use tempfile::TempDir;

use crate::{HookKind, Repo};

fn init_repo() -> (TempDir, Repo) {
    let dir = tempfile::tempdir().expect("create tempdir");
    let status = Command::new("git")
        .args(["init", "-q"])
        .current_dir(dir.path())
        .status()
        .expect("run git init");
    assert!(status.success());

    let repo = Repo::open(dir.path().to_str().expect("utf8 tempdir path")).expect("open repo");
    (dir, repo)
}

fn git(dir: &std::path::Path, args: &[&str]) {
    let status = Command::new("git").args(args).current_dir(dir).status().expect("run git");
    assert!(status.success(), "git {args:?} failed");
}

#[test]
fn open_reports_the_working_directory() {
    let (dir, repo) = init_repo();
    assert_eq!(repo.get_repo_path(), dir.path());
}

#[test]
fn untracked_file_is_not_tracked() {
    let (dir, repo) = init_repo();
    fs::write(dir.path().join(".npmrc"), "registry=http://127.0.0.1:4873\n").expect("write file");
    assert!(!repo.is_tracked(".npmrc").expect("is_tracked"));
}

#[test]
fn staged_file_becomes_tracked() {
    let (dir, repo) = init_repo();
    fs::write(dir.path().join(".npmrc"), "registry=http://127.0.0.1:4873\n").expect("write file");
    git(dir.path(), &["add", ".npmrc"]);
    assert!(repo.is_tracked(".npmrc").expect("is_tracked"));
}

#[test]
fn skip_worktree_round_trips() {
    let (dir, repo) = init_repo();
    fs::write(dir.path().join(".npmrc"), "registry=http://127.0.0.1:4873\n").expect("write file");
    git(dir.path(), &["add", ".npmrc"]);

    assert!(!repo.has_skip_worktree(".npmrc").expect("has_skip_worktree"));

    repo.set_skip_worktree(".npmrc", true).expect("set skip-worktree");
    assert!(repo.has_skip_worktree(".npmrc").expect("has_skip_worktree"));

    repo.set_skip_worktree(".npmrc", false).expect("clear skip-worktree");
    assert!(!repo.has_skip_worktree(".npmrc").expect("has_skip_worktree"));
}

#[test]
fn set_skip_worktree_on_untracked_path_fails() {
    let (dir, repo) = init_repo();
    fs::write(dir.path().join("untracked.txt"), "x").expect("write file");
    assert!(repo.set_skip_worktree("untracked.txt", true).is_err());
}

#[test]
fn detects_husky_hook() {
    let (dir, repo) = init_repo();
    fs::create_dir_all(dir.path().join(".husky")).expect("mkdir .husky");
    fs::write(dir.path().join(".husky").join("pre-commit"), "#!/bin/sh\n").expect("write hook");
    assert_eq!(repo.detect_hook_kind(), Some(HookKind::Husky));
}

#[test]
fn detects_lefthook_config() {
    let (dir, repo) = init_repo();
    fs::write(dir.path().join("lefthook.yml"), "pre-commit:\n  commands: {}\n")
        .expect("write lefthook config");
    assert_eq!(repo.detect_hook_kind(), Some(HookKind::Lefthook));
}

#[test]
fn falls_back_to_raw_git_hooks() {
    let (_dir, repo) = init_repo();
    assert_eq!(repo.detect_hook_kind(), Some(HookKind::Raw));
    assert!(repo.hooks_dir().ends_with("hooks"));
}

#[test]
fn husky_takes_priority_over_lefthook() {
    let (dir, repo) = init_repo();
    fs::create_dir_all(dir.path().join(".husky")).expect("mkdir .husky");
    fs::write(dir.path().join(".husky").join("pre-commit"), "#!/bin/sh\n").expect("write hook");
    fs::write(dir.path().join("lefthook.yml"), "pre-commit:\n  commands: {}\n")
        .expect("write lefthook config");
    assert_eq!(repo.detect_hook_kind(), Some(HookKind::Husky));
}
