//! Read-only browsing of mirrored repositories.

use std::path::{Path, PathBuf};

use rig_config::{CatalogConfig, StorageConfig};
use rig_core::responses::{DirEntry, FileContent, FileMetadata};
use rig_core::validate;

use crate::confine::Confinement;
use crate::error::FilesError;

/// The mirror base directory, as seen by browsing clients.
#[derive(Debug, Clone)]
pub struct Mirrors {
    base: PathBuf,
    suite_dir_name: String,
    tracked_extension: String,
}

impl Mirrors {
    #[must_use]
    pub fn new(
        base: impl Into<PathBuf>,
        suite_dir_name: impl Into<String>,
        tracked_extension: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            suite_dir_name: suite_dir_name.into(),
            tracked_extension: tracked_extension.into(),
        }
    }

    #[must_use]
    pub fn from_config(storage: &StorageConfig, catalog: &CatalogConfig) -> Self {
        Self::new(
            storage.repos_base_path.clone(),
            storage.suite_dir_name.clone(),
            catalog.tracked_extension.clone(),
        )
    }

    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    #[must_use]
    pub fn suite_dir_name(&self) -> &str {
        &self.suite_dir_name
    }

    /// Confinement rooted at the mirror of `repo`.
    ///
    /// # Errors
    ///
    /// `FilesError::Validation` for a name that is not a plain path segment,
    /// `FilesError::NotFound` when the mirror does not exist.
    pub fn open(&self, repo: &str) -> Result<Confinement, FilesError> {
        let repo = validate::path_segment("repo", repo)?;
        let root = self.base.join(&repo);
        if !root.is_dir() {
            return Err(FilesError::NotFound(format!("repository '{repo}'")));
        }
        Confinement::new(&root)
    }

    /// Names of the mirror directories, sorted. A missing base lists nothing.
    pub fn list_repos(&self) -> Result<Vec<String>, FilesError> {
        if !self.base.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.base)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with('.') && entry.file_type()?.is_dir() {
                names.push(name);
            }
        }
        names.sort();
        Ok(names)
    }

    /// Children of a directory, sorted by name.
    ///
    /// Hidden entries are skipped, and so is the suite directory at the
    /// mirror root.
    pub fn list_dir(&self, repo: &str, rel: &str) -> Result<Vec<DirEntry>, FilesError> {
        let conf = self.open(repo)?;
        let dir = conf.resolve(rel)?;
        if !dir.is_dir() {
            return Err(FilesError::NotFound(format!("directory '{rel}'")));
        }
        let at_root = dir == conf.root();

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') || (at_root && name == self.suite_dir_name) {
                continue;
            }
            let path = entry.path();
            entries.push(DirEntry {
                path: join_rel(&conf.relative(&dir), &name),
                is_dir: path.is_dir(),
                name,
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Content of a regular file, decoded as UTF-8.
    pub fn read_file(&self, repo: &str, rel: &str) -> Result<FileContent, FilesError> {
        let conf = self.open(repo)?;
        let path = regular_file(&conf, rel)?;
        let bytes = std::fs::read(&path)?;
        let content =
            String::from_utf8(bytes).map_err(|_| FilesError::Decode(format!("'{rel}'")))?;
        Ok(FileContent {
            path: conf.relative(&path),
            content,
        })
    }

    /// Read a cataloged file by absolute path, confined to its mirror root.
    pub fn read_absolute(&self, mirror_root: &Path, abs: &Path) -> Result<FileContent, FilesError> {
        let conf = Confinement::new(mirror_root)?;
        let rel = abs
            .strip_prefix(conf.root())
            .map_err(|_| FilesError::AccessDenied(format!("'{}' is outside the root", abs.display())))?;
        let rel = crate::confine::slash_path(rel);
        let path = regular_file(&conf, &rel)?;
        let bytes = std::fs::read(&path)?;
        let content =
            String::from_utf8(bytes).map_err(|_| FilesError::Decode(format!("'{rel}'")))?;
        Ok(FileContent { path: rel, content })
    }

    /// Live metadata for one file, straight from disk.
    pub fn file_metadata(&self, repo: &str, rel: &str) -> Result<FileMetadata, FilesError> {
        let conf = self.open(repo)?;
        let path = regular_file(&conf, rel)?;
        Ok(metadata_for(&conf, &path))
    }

    /// Live metadata for every tracked file directly inside a directory.
    pub fn dir_metadata(&self, repo: &str, rel: &str) -> Result<Vec<FileMetadata>, FilesError> {
        let conf = self.open(repo)?;
        let dir = conf.resolve(rel)?;
        if !dir.is_dir() {
            return Err(FilesError::NotFound(format!("directory '{rel}'")));
        }

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            let hidden = entry.file_name().to_string_lossy().starts_with('.');
            let tracked = path
                .extension()
                .is_some_and(|e| e.to_string_lossy() == self.tracked_extension);
            if !hidden && tracked && entry.file_type()?.is_file() {
                files.push(path);
            }
        }
        files.sort();
        Ok(files.iter().map(|path| metadata_for(&conf, path)).collect())
    }
}

fn regular_file(conf: &Confinement, rel: &str) -> Result<PathBuf, FilesError> {
    let path = conf.resolve(rel)?;
    if !path.is_file() {
        return Err(FilesError::NotFound(format!("file '{rel}'")));
    }
    Ok(path)
}

fn metadata_for(conf: &Confinement, path: &Path) -> FileMetadata {
    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    FileMetadata::new(
        conf.relative(path),
        filename,
        rig_parser::extract_file_metadata(path),
    )
}

fn join_rel(dir: &str, name: &str) -> String {
    if dir.is_empty() {
        name.to_string()
    } else {
        format!("{dir}/{name}")
    }
}
