//! On-disk layout for mirrors and per-user suite areas.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

fn default_repos_base_path() -> PathBuf {
    PathBuf::from("./data/repos")
}

fn default_users_base_path() -> PathBuf {
    PathBuf::from("./data/users")
}

fn default_suite_dir_name() -> String {
    "suites".to_string()
}

fn default_runner_interpreter() -> String {
    "python3".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageConfig {
    /// Parent directory of every mirror (`<repos_base_path>/<name>`).
    #[serde(default = "default_repos_base_path")]
    pub repos_base_path: PathBuf,

    /// Parent directory of per-user working areas.
    #[serde(default = "default_users_base_path")]
    pub users_base_path: PathBuf,

    /// Reserved directory name for repository-local suites, hidden from listings.
    #[serde(default = "default_suite_dir_name")]
    pub suite_dir_name: String,

    /// Mirror targeted by the branch-checkout endpoint.
    #[serde(default)]
    pub current_repo: Option<String>,

    /// Interpreter used by generated runner scripts.
    #[serde(default = "default_runner_interpreter")]
    pub runner_interpreter: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            repos_base_path: default_repos_base_path(),
            users_base_path: default_users_base_path(),
            suite_dir_name: default_suite_dir_name(),
            current_repo: None,
            runner_interpreter: default_runner_interpreter(),
        }
    }
}

impl StorageConfig {
    /// Mirror directory for a repository name.
    #[must_use]
    pub fn mirror_path(&self, name: &str) -> PathBuf {
        self.repos_base_path.join(name)
    }

    #[must_use]
    pub fn repos_base(&self) -> &Path {
        &self.repos_base_path
    }
}
