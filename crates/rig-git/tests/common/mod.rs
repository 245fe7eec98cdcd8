//! Throwaway origins for mirror tests, driven through the git CLI.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// An empty origin on `main` inside its own temp directory.
///
/// The mirror under test is usually placed next to it in the same tempdir.
pub fn init_temp_repo() -> (tempfile::TempDir, PathBuf) {
    let scratch = tempfile::tempdir().unwrap();
    let origin = scratch.path().join("origin");
    fs::create_dir(&origin).unwrap();
    for args in [
        &["init", "--initial-branch=main"][..],
        &["config", "user.name", "Bench Origin"],
        &["config", "user.email", "origin@rig.dev"],
    ] {
        run_git(&origin, args);
    }
    (scratch, origin)
}

/// Write `file` under `origin` and record it as one commit.
pub fn commit_file(origin: &Path, file: &str, content: &str, message: &str) {
    let target = origin.join(file);
    fs::create_dir_all(target.parent().unwrap()).unwrap();
    fs::write(target, content).unwrap();
    run_git(origin, &["add", "--", file]);
    run_git(origin, &["commit", "--quiet", "-m", message]);
}

/// Run git in `dir`, panicking with its stderr on failure. Returns stdout.
pub fn run_git(dir: &Path, args: &[&str]) -> String {
    let out = Command::new("git").arg("-C").arg(dir).args(args).output().unwrap();
    if !out.status.success() {
        panic!(
            "`git {}` exited with {}: {}",
            args.join(" "),
            out.status,
            String::from_utf8_lossy(&out.stderr).trim()
        );
    }
    String::from_utf8(out.stdout).unwrap()
}
