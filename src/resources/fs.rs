//! Directory and file helpers shared by the materializer and steps.
use std::io::Write as _;
use std::path::{Path, PathBuf};

use crate::error::PcmError;

/// Join `segments` under `base`, create every missing directory and return
/// the final path.
///
/// Calling it again with the same arguments is a no-op that returns the same
/// path.
///
/// # Errors
///
/// Returns [`PcmError::Filesystem`] if a directory cannot be created (for
/// example because a regular file is in the way).
pub fn ensure_dir<S: AsRef<Path>>(base: &Path, segments: &[S]) -> Result<PathBuf, PcmError> {
    let path = segments
        .iter()
        .fold(base.to_path_buf(), |acc, s| acc.join(s));
    std::fs::create_dir_all(&path).map_err(|e| PcmError::filesystem(&path, e))?;
    Ok(path)
}

/// Ensure the parent directory of `path` exists.
///
/// # Errors
///
/// Returns [`PcmError::Filesystem`] if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<(), PcmError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| PcmError::filesystem(parent, e))?;
    }
    Ok(())
}

/// Write `content` to `path` through a temporary file in the same directory
/// that is renamed over the target, so readers never see a partial file.
///
/// The parent directory must already exist. On Unix an existing target keeps
/// its permissions and a new file gets mode `0644`.
///
/// # Errors
///
/// Returns [`PcmError::Filesystem`] if the temporary file cannot be created,
/// written, or persisted.
pub fn write_atomic(path: &Path, content: &str) -> Result<(), PcmError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| PcmError::filesystem(dir, e))?;
    tmp.write_all(content.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|e| PcmError::filesystem(tmp.path(), e))?;
    #[cfg(unix)]
    tmp.as_file()
        .set_permissions(target_permissions(path))
        .map_err(|e| PcmError::filesystem(tmp.path(), e))?;
    tmp.persist(path)
        .map_err(|e| PcmError::filesystem(path, e.error))?;
    Ok(())
}

/// Permissions a rewrite of `path` should end up with.
#[cfg(unix)]
fn target_permissions(path: &Path) -> std::fs::Permissions {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path).map_or_else(
        |_| std::fs::Permissions::from_mode(NEW_FILE_MODE),
        |meta| meta.permissions(),
    )
}

/// Mode for files created by [`write_atomic`].
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Mark `path` executable (mode `0755`). No-op on non-Unix platforms.
///
/// # Errors
///
/// Returns [`PcmError::Filesystem`] if the permissions cannot be read or set.
pub fn set_executable(path: &Path) -> Result<(), PcmError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mut perms = std::fs::metadata(path)
            .map_err(|e| PcmError::filesystem(path, e))?
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(path, perms).map_err(|e| PcmError::filesystem(path, e))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}

/// Remove a directory tree if it exists.
///
/// # Errors
///
/// Returns [`PcmError::Filesystem`] if the tree exists but cannot be removed.
pub fn remove_tree(path: &Path) -> Result<(), PcmError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| PcmError::filesystem(path, e))?;
    }
    Ok(())
}
