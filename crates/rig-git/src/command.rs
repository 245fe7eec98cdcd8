use std::path::Path;
use std::process::Command;

use crate::error::GitError;

/// Run `git <args>` in `dir`, returning trimmed stdout.
///
/// Prompts are disabled so a credential request fails instead of blocking.
pub(crate) fn run_git(dir: &Path, args: &[&str]) -> Result<String, GitError> {
    tracing::debug!(dir = %dir.display(), args = ?args, "running git");
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .map_err(|e| GitError::Git(format!("run git {}: {e}", args.first().unwrap_or(&""))))?;
    if !output.status.success() {
        return Err(GitError::Git(
            String::from_utf8_lossy(&output.stderr).trim().to_string(),
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Reject values git would parse as options.
pub(crate) fn reject_option_like(kind: &str, value: &str) -> Result<(), GitError> {
    if value.is_empty() {
        return Err(GitError::InvalidArgument(format!("{kind} must not be empty")));
    }
    if value.starts_with('-') {
        return Err(GitError::InvalidArgument(format!(
            "{kind} must not start with '-': {value}"
        )));
    }
    Ok(())
}
