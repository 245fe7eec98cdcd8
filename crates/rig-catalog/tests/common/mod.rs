//! Local git origins for sync tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use rig_config::{CatalogConfig, StorageConfig};
use rig_catalog::MirrorManager;

/// A temp origin repository on `main` with one committed script.
pub fn origin_with_script() -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::TempDir::new().unwrap();
    let origin = dir.path().join("origin");
    fs::create_dir_all(&origin).unwrap();
    git(&origin, &["init", "--initial-branch=main"]);
    git(&origin, &["config", "user.email", "test@rig.dev"]);
    git(&origin, &["config", "user.name", "Rig Test"]);
    commit(
        &origin,
        "checks/ping.py",
        "\"\"\"\nPing every host.\n\nfield Topology: star\n\"\"\"\n\ndef main():\n    \"\"\"Run it.\"\"\"\n",
    );
    (dir, origin)
}

pub fn commit(repo: &Path, file: &str, content: &str) {
    let path = repo.join(file);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    git(repo, &["add", file]);
    git(repo, &["commit", "-m", file]);
}

pub fn git(repo: &Path, args: &[&str]) -> String {
    let output = std::process::Command::new("git")
        .args(args)
        .current_dir(repo)
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "git {} failed: {}",
        args.join(" "),
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn manager(repos_base: &Path, stamp_after_scan: bool) -> MirrorManager {
    let storage = StorageConfig {
        repos_base_path: repos_base.to_path_buf(),
        current_repo: Some("lab".to_string()),
        ..StorageConfig::default()
    };
    let catalog = CatalogConfig {
        stamp_after_scan,
        ..CatalogConfig::default()
    };
    MirrorManager::new(&storage, &catalog)
}
