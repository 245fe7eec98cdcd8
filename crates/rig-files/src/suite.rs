//! Suite manifests and their generated runners.
//!
//! Repository-scoped suites live in `<repos_base>/<repo>/<suite_dir>`;
//! user-scoped suites in `<users_base>/<subject>/suites/<repo>`. Each suite
//! is a `<name>.json` manifest plus a `<name>.robot` runner.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rig_config::StorageConfig;
use rig_core::entities::{SuiteManifest, SuiteSummary};
use rig_core::enums::SuiteScopeKind;
use rig_core::responses::{SuiteSaveResponse, SuiteScriptResponse};
use rig_core::validate;

use crate::browse::Mirrors;
use crate::confine::{relative_between, slash_path};
use crate::error::FilesError;
use crate::runner::{RunnerCase, render_runner};

/// Directory name under a user's area that holds their suites.
const USER_SUITES_DIR: &str = "suites";

/// Which storage area a request addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SuiteScope {
    Repository,
    User { subject: String },
}

impl SuiteScope {
    /// User scope when a subject is known, repository scope otherwise.
    #[must_use]
    pub fn from_subject(subject: Option<String>) -> Self {
        subject.map_or(Self::Repository, |subject| Self::User { subject })
    }

    #[must_use]
    pub const fn kind(&self) -> SuiteScopeKind {
        match self {
            Self::Repository => SuiteScopeKind::Repository,
            Self::User { .. } => SuiteScopeKind::User,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SuiteStore {
    mirrors: Mirrors,
    users_base: PathBuf,
    interpreter: String,
}

impl SuiteStore {
    #[must_use]
    pub fn new(mirrors: Mirrors, users_base: impl Into<PathBuf>, interpreter: impl Into<String>) -> Self {
        Self {
            mirrors,
            users_base: users_base.into(),
            interpreter: interpreter.into(),
        }
    }

    #[must_use]
    pub fn from_config(mirrors: Mirrors, storage: &StorageConfig) -> Self {
        Self::new(
            mirrors,
            storage.users_base_path.clone(),
            storage.runner_interpreter.clone(),
        )
    }

    #[must_use]
    pub const fn mirrors(&self) -> &Mirrors {
        &self.mirrors
    }

    /// Storage directory for `repo` in `scope` (not created).
    pub fn suite_dir(&self, scope: &SuiteScope, repo: &str) -> Result<PathBuf, FilesError> {
        let repo = validate::path_segment("repo", repo)?;
        Ok(match scope {
            SuiteScope::Repository => self
                .mirrors
                .base()
                .join(&repo)
                .join(self.mirrors.suite_dir_name()),
            SuiteScope::User { subject } => {
                let subject = validate::path_segment("subject", subject)?;
                self.users_base
                    .join(subject)
                    .join(USER_SUITES_DIR)
                    .join(repo)
            }
        })
    }

    /// Write the manifest and runner for suite `name`, replacing any previous one.
    ///
    /// # Errors
    ///
    /// - `FilesError::Validation` for a bad name, an empty file list, or a
    ///   path that is not a regular file.
    /// - `FilesError::AccessDenied` / `FilesError::NotFound` for paths that
    ///   escape the mirror or do not exist.
    pub fn save(
        &self,
        scope: &SuiteScope,
        repo: &str,
        name: &str,
        files: &[String],
    ) -> Result<SuiteSaveResponse, FilesError> {
        let name = validate::path_segment("name", name)?;
        if files.is_empty() {
            return Err(FilesError::Validation("files: must not be empty".to_string()));
        }
        let conf = self.mirrors.open(repo)?;

        let mut resolved = Vec::with_capacity(files.len());
        for file in files {
            let path = conf.resolve(file)?;
            if !path.is_file() {
                return Err(FilesError::Validation(format!(
                    "files: '{file}' is not a regular file"
                )));
            }
            resolved.push((conf.relative(&path), path));
        }

        let dir = self.suite_dir(scope, repo)?;
        std::fs::create_dir_all(&dir)?;
        let dir = std::fs::canonicalize(&dir)?;

        let manifest = SuiteManifest {
            name: name.clone(),
            repository: repo.to_string(),
            scope: scope.kind(),
            files: resolved.iter().map(|(rel, _)| rel.clone()).collect(),
            saved_at: Utc::now(),
        };
        let cases: Vec<RunnerCase> = resolved
            .iter()
            .map(|(rel, abs)| RunnerCase::new(rel, slash_path(&relative_between(&dir, abs))))
            .collect();

        let manifest_path = dir.join(format!("{name}.json"));
        let script_path = dir.join(format!("{name}.robot"));
        std::fs::write(&manifest_path, serde_json::to_string_pretty(&manifest)?)?;
        std::fs::write(&script_path, render_runner(&self.interpreter, &cases))?;
        tracing::info!(suite = %name, repo, scope = %scope.kind(), files = cases.len(), "suite saved");

        Ok(SuiteSaveResponse {
            name,
            scope: scope.kind(),
            manifest_path: manifest_path.to_string_lossy().into_owned(),
            script_path: script_path.to_string_lossy().into_owned(),
            files: manifest.files,
        })
    }

    /// Suites stored for `repo` in `scope`, sorted by name.
    ///
    /// Unreadable manifests are skipped with a warning.
    pub fn list(&self, scope: &SuiteScope, repo: &str) -> Result<Vec<SuiteSummary>, FilesError> {
        self.mirrors.open(repo)?;
        let dir = self.suite_dir(scope, repo)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut suites = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|e| e != "json") {
                continue;
            }
            match load_manifest(&path) {
                Ok(manifest) => suites.push(SuiteSummary::from(manifest)),
                Err(error) => {
                    tracing::warn!(path = %path.display(), %error, "skipping unreadable suite manifest");
                }
            }
        }
        suites.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(suites)
    }

    /// The manifest of suite `name`.
    pub fn load(&self, scope: &SuiteScope, repo: &str, name: &str) -> Result<SuiteManifest, FilesError> {
        let path = self.suite_file(scope, repo, name, "json")?;
        load_manifest(&path)
    }

    /// The generated runner of suite `name`.
    pub fn runner_script(
        &self,
        scope: &SuiteScope,
        repo: &str,
        name: &str,
    ) -> Result<SuiteScriptResponse, FilesError> {
        let path = self.suite_file(scope, repo, name, "robot")?;
        Ok(SuiteScriptResponse {
            name: name.to_string(),
            scope: scope.kind(),
            content: std::fs::read_to_string(path)?,
        })
    }

    fn suite_file(
        &self,
        scope: &SuiteScope,
        repo: &str,
        name: &str,
        extension: &str,
    ) -> Result<PathBuf, FilesError> {
        let name = validate::path_segment("name", name)?;
        let path = self
            .suite_dir(scope, repo)?
            .join(format!("{name}.{extension}"));
        if !path.is_file() {
            return Err(FilesError::NotFound(format!("suite '{name}'")));
        }
        Ok(path)
    }
}

fn load_manifest(path: &Path) -> Result<SuiteManifest, FilesError> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn store() -> (tempfile::TempDir, SuiteStore) {
        let dir = tempfile::tempdir().unwrap();
        let lab = dir.path().join("repos/lab");
        fs::create_dir_all(lab.join("checks")).unwrap();
        fs::write(lab.join("checks/ping.py"), "# ping\n").unwrap();
        fs::write(lab.join("reboot.py"), "# reboot\n").unwrap();
        let mirrors = Mirrors::new(dir.path().join("repos"), "suites", "py");
        let store = SuiteStore::new(mirrors, dir.path().join("users"), "python3");
        (dir, store)
    }

    fn files(paths: &[&str]) -> Vec<String> {
        paths.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn saving_twice_keeps_one_suite() {
        let (_dir, store) = store();
        let scope = SuiteScope::Repository;
        let list = files(&["checks/ping.py", "reboot.py"]);
        store.save(&scope, "lab", "smoke", &list).unwrap();
        store.save(&scope, "lab", "smoke", &list).unwrap();

        let suites = store.list(&scope, "lab").unwrap();
        assert_eq!(suites.len(), 1);
        assert_eq!(suites[0].name, "smoke");
        assert_eq!(suites[0].files, list);
    }

    #[test]
    fn repository_runner_reaches_files_from_suite_dir() {
        let (_dir, store) = store();
        let saved = store
            .save(&SuiteScope::Repository, "lab", "smoke", &files(&["./checks/ping.py"]))
            .unwrap();
        assert_eq!(saved.files, vec!["checks/ping.py"]);
        assert!(saved.manifest_path.ends_with("lab/suites/smoke.json"));

        let runner = store
            .runner_script(&SuiteScope::Repository, "lab", "smoke")
            .unwrap();
        assert!(runner.content.contains("${CURDIR}/../checks/ping.py"));
        assert!(runner.content.contains("\nchecks/ping\n"));
    }

    #[test]
    fn scopes_do_not_see_each_other() {
        let (_dir, store) = store();
        let alice = SuiteScope::User {
            subject: "alice".into(),
        };
        store
            .save(&alice, "lab", "mine", &files(&["reboot.py"]))
            .unwrap();
        store
            .save(&SuiteScope::Repository, "lab", "shared", &files(&["reboot.py"]))
            .unwrap();

        let names = |scope: SuiteScope| -> Vec<String> {
            store
                .list(&scope, "lab")
                .unwrap()
                .into_iter()
                .map(|s| s.name)
                .collect()
        };
        assert_eq!(names(alice.clone()), vec!["mine"]);
        assert_eq!(names(SuiteScope::Repository), vec!["shared"]);
        assert!(matches!(
            store.runner_script(&SuiteScope::Repository, "lab", "mine").unwrap_err(),
            FilesError::NotFound(_)
        ));
        assert_eq!(store.load(&alice, "lab", "mine").unwrap().scope, SuiteScopeKind::User);
    }

    #[test]
    fn user_runner_points_back_into_the_mirror() {
        let (dir, store) = store();
        let alice = SuiteScope::User {
            subject: "alice".into(),
        };
        store
            .save(&alice, "lab", "mine", &files(&["checks/ping.py"]))
            .unwrap();
        let runner = store.runner_script(&alice, "lab", "mine").unwrap();

        let suite_dir = fs::canonicalize(dir.path().join("users/alice/suites/lab")).unwrap();
        let line = runner
            .content
            .lines()
            .find(|l| l.contains("Run Process"))
            .unwrap();
        let rel = line
            .split("${CURDIR}/")
            .nth(1)
            .unwrap()
            .split_whitespace()
            .next()
            .unwrap();
        let target = fs::canonicalize(suite_dir.join(rel)).unwrap();
        assert!(target.ends_with("repos/lab/checks/ping.py"));
    }

    #[test]
    fn invalid_requests_are_rejected() {
        let (_dir, store) = store();
        let scope = SuiteScope::Repository;
        for name in ["", ".", "..", ".hidden", "a/b", "a\\b"] {
            assert!(
                matches!(
                    store.save(&scope, "lab", name, &files(&["reboot.py"])).unwrap_err(),
                    FilesError::Validation(_)
                ),
                "{name:?}"
            );
        }
        assert!(matches!(
            store.save(&scope, "lab", "x", &[]).unwrap_err(),
            FilesError::Validation(_)
        ));
        assert!(matches!(
            store.save(&scope, "lab", "x", &files(&["checks"])).unwrap_err(),
            FilesError::Validation(_)
        ));
        assert!(matches!(
            store.save(&scope, "lab", "x", &files(&["../../etc/passwd"])).unwrap_err(),
            FilesError::AccessDenied(_)
        ));
        assert!(matches!(
            store.save(&scope, "lab", "x", &files(&["missing.py"])).unwrap_err(),
            FilesError::NotFound(_)
        ));
    }

    #[test]
    fn missing_suite_is_not_found() {
        let (_dir, store) = store();
        assert!(store.list(&SuiteScope::Repository, "lab").unwrap().is_empty());
        assert!(matches!(
            store.runner_script(&SuiteScope::Repository, "lab", "nope").unwrap_err(),
            FilesError::NotFound(_)
        ));
    }
}
