//! Path confinement under a canonical root.
//!
//! A relative path is checked twice: lexically (no absolute paths, no `..`,
//! no dot-prefixed segments) and again after canonicalization, so symlinks
//! pointing outside the root or at hidden entries are caught. Violations are errors, never clamps.

use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use crate::error::FilesError;

#[derive(Debug, Clone)]
pub struct Confinement {
    root: PathBuf,
}

impl Confinement {
    /// Confine paths to `root`, which must exist.
    ///
    /// # Errors
    ///
    /// `FilesError::NotFound` if `root` does not exist.
    pub fn new(root: &Path) -> Result<Self, FilesError> {
        let root = canonicalize(root, &root.display().to_string())?;
        Ok(Self { root })
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve `rel` to a canonical path inside the root.
    ///
    /// # Errors
    ///
    /// - `FilesError::AccessDenied` for absolute paths, `..` segments,
    ///   hidden segments, or a target that resolves outside the root.
    /// - `FilesError::NotFound` if the target does not exist.
    pub fn resolve(&self, rel: &str) -> Result<PathBuf, FilesError> {
        check_lexical(rel)?;
        let canonical = canonicalize(&self.root.join(rel), rel)?;
        let Ok(inside) = canonical.strip_prefix(&self.root) else {
            return Err(FilesError::AccessDenied(format!("'{rel}' is outside the root")));
        };
        if inside
            .components()
            .any(|c| c.as_os_str().to_string_lossy().starts_with('.'))
        {
            return Err(FilesError::AccessDenied(format!(
                "'{rel}' resolves to a hidden entry"
            )));
        }
        Ok(canonical)
    }

    /// `/`-separated path of `abs` relative to the root; empty for the root.
    #[must_use]
    pub fn relative(&self, abs: &Path) -> String {
        abs.strip_prefix(&self.root)
            .map(slash_path)
            .unwrap_or_default()
    }
}

fn check_lexical(rel: &str) -> Result<(), FilesError> {
    let denied = || FilesError::AccessDenied(format!("'{rel}' is not a permitted path"));
    if rel.starts_with(['/', '\\']) {
        return Err(denied());
    }
    for component in Path::new(rel).components() {
        match component {
            Component::CurDir => {}
            Component::Normal(segment) => {
                if segment.to_string_lossy().starts_with('.') {
                    return Err(denied());
                }
            }
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(denied());
            }
        }
    }
    Ok(())
}

fn canonicalize(path: &Path, label: &str) -> Result<PathBuf, FilesError> {
    std::fs::canonicalize(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => FilesError::NotFound(format!("'{label}'")),
        _ => FilesError::Io(e),
    })
}

/// Join the components of `path` with `/`.
#[must_use]
pub fn slash_path(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Path from directory `from` to `to`, both absolute and canonical.
#[must_use]
pub fn relative_between(from: &Path, to: &Path) -> PathBuf {
    let from: Vec<_> = from.components().collect();
    let to: Vec<_> = to.components().collect();
    let common = from
        .iter()
        .zip(&to)
        .take_while(|(a, b)| a == b)
        .count();
    let mut out = PathBuf::new();
    for _ in common..from.len() {
        out.push("..");
    }
    for component in &to[common..] {
        out.push(component.as_os_str());
    }
    out
}
