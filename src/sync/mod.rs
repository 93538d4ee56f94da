//! Working-directory sync
//!
//! Walks, clears and repopulates a working directory from ZIP snapshots.
//! Every operation takes an exclusion predicate over paths relative to the
//! working directory root; [`is_descriptor_path`] is the one the commands use
//! so the hidden `.reporouge` folder is never listed, uploaded or deleted.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::{debug, warn};
use walkdir::WalkDir;
use zip::ZipArchive;

use crate::core::descriptor::DESCRIPTOR_DIR;

/// Errors that can occur while syncing a working directory
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Failed to update working directory")]
    Io(#[from] io::Error),

    #[error("Invalid snapshot archive")]
    Zip(#[from] zip::result::ZipError),
}

/// Whether a root-relative path lies inside the hidden descriptor folder
pub fn is_descriptor_path(relative: &Path) -> bool {
    matches!(
        relative.components().find(|c| !matches!(c, Component::CurDir)),
        Some(Component::Normal(name)) if name == DESCRIPTOR_DIR
    )
}

/// Render a relative path with `/` separators
pub fn to_slash(relative: &Path) -> String {
    relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// List every file below `root`, as paths relative to `root`, sorted.
///
/// Directories for which `exclude` returns true are not descended into.
/// Unreadable entries are skipped.
pub fn walk_files<F>(root: &Path, exclude: F) -> Vec<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match entry.path().strip_prefix(root) {
            Ok(relative) => !exclude(relative),
            Err(_) => false,
        });

    for entry in walker {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };

        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        match entry.path().strip_prefix(root) {
            Ok(relative) => files.push(relative.to_path_buf()),
            Err(_) => debug!(path = %entry.path().display(), "skipping path outside root"),
        }
    }

    files
}

/// Delete every top-level entry of `root` not matched by `keep`.
///
/// Returns the number of entries removed.
pub fn clear_dir<F>(root: &Path, keep: F) -> Result<usize, SyncError>
where
    F: Fn(&Path) -> bool,
{
    let mut removed = 0;
    for entry in fs::read_dir(root)? {
        let entry = entry?;
        let name = PathBuf::from(entry.file_name());
        if keep(&name) {
            continue;
        }

        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
        removed += 1;
    }
    debug!(root = %root.display(), removed, "working directory cleared");
    Ok(removed)
}

/// A downloaded snapshot whose archive has been opened and indexed.
///
/// Opening reads the central directory, so a body that is not a ZIP archive
/// (an HTML error page, a truncated download) fails here, before any local
/// content is touched.
pub struct Snapshot {
    archive: ZipArchive<File>,
    // Removed on drop
    _staged: NamedTempFile,
}

/// Stage snapshot bytes in a temporary file and open them as a ZIP archive.
pub fn open_snapshot(bytes: &[u8]) -> Result<Snapshot, SyncError> {
    let mut staged = NamedTempFile::new()?;
    staged.write_all(bytes)?;
    staged.flush()?;

    let archive = ZipArchive::new(File::open(staged.path())?)?;
    debug!(entries = archive.len(), size = bytes.len(), "snapshot opened");
    Ok(Snapshot {
        archive,
        _staged: staged,
    })
}

impl Snapshot {
    /// Extract into `dest`, skipping entries matched by `skip`.
    ///
    /// Entries whose names would escape `dest` are ignored. Returns the number
    /// of files written.
    pub fn extract_into<F>(mut self, dest: &Path, skip: F) -> Result<usize, SyncError>
    where
        F: Fn(&Path) -> bool,
    {
        fs::create_dir_all(dest)?;

        let mut written = 0;
        for i in 0..self.archive.len() {
            let mut entry = self.archive.by_index(i)?;
            let relative = match entry.enclosed_name() {
                Some(name) => name,
                None => {
                    warn!(entry = entry.name(), "skipping archive entry outside target directory");
                    continue;
                }
            };
            if skip(&relative) {
                continue;
            }

            let target = dest.join(&relative);
            if entry.is_dir() {
                fs::create_dir_all(&target)?;
                continue;
            }

            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut out = File::create(&target)?;
            io::copy(&mut entry, &mut out)?;

            #[cfg(unix)]
            {
                use std::os::unix::fs::PermissionsExt;
                if let Some(mode) = entry.unix_mode().map(|m| m & 0o777).filter(|m| *m != 0) {
                    fs::set_permissions(&target, fs::Permissions::from_mode(mode | 0o600))?;
                }
            }

            written += 1;
        }

        debug!(dest = %dest.display(), written, "snapshot extracted");
        Ok(written)
    }
}
