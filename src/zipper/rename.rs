/// Batch file renaming with full rollback
///
/// The one file operation with a safety net: the directory's contents are
/// backed up to a temporary location before anything is touched, and any
/// failure deletes the partially-written result and restores the backup.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

use crate::progress::Progress;

use super::sequencer;

#[derive(Debug, Error)]
pub enum RenameError {
    #[error("No directory specified, or path is invalid")]
    InvalidDirectory,
    /// The rename failed part-way through; the original directory was
    /// restored from the backup.
    #[error("Rename failed and the original files were restored: {0}")]
    RolledBack(io::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Rename every regular file in `path` to `prefix + zero-padded number +
/// original extension`, numbering from `start_number` in name order.
/// Subdirectories are copied through unmodified and do not consume a
/// number. On success the renamed directory replaces the original; on any
/// failure the original is restored from a backup.
pub fn rename_files(
    path: &Path,
    start_number: usize,
    prefix: &str,
    progress: &mut dyn Progress,
) -> Result<(), RenameError> {
    if !path.is_dir() {
        return Err(RenameError::InvalidDirectory);
    }

    let mut names: Vec<String> = fs::read_dir(path)?
        .collect::<io::Result<Vec<_>>>()?
        .into_iter()
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();

    progress.log("Creating backup");
    let backup = create_backup(&names, path)?;

    // Padding width comes from the final counter value so early names are
    // never under-padded.
    let width = sequencer::digit_count(start_number + names.len());

    let renamed_dir = sibling_with_suffix(path, "_renamed");

    let result = copy_renamed(
        &names,
        path,
        &renamed_dir,
        prefix,
        start_number,
        width,
        progress,
    )
    .and_then(|()| {
        // Swap the renamed directory into place
        fs::remove_dir_all(path)?;
        fs::rename(&renamed_dir, path)
    });

    match result {
        Ok(()) => {
            progress.log("Rename completed");
            Ok(())
        }
        Err(err) => {
            progress.log("Rename failed, restoring backup");
            let _ = fs::remove_dir_all(&renamed_dir);
            restore_backup(backup.path(), path)?;
            Err(RenameError::RolledBack(err))
        }
    }
}

/// Copy every entry of `path` into `renamed_dir` under its new name
fn copy_renamed(
    names: &[String],
    path: &Path,
    renamed_dir: &Path,
    prefix: &str,
    start_number: usize,
    width: usize,
    progress: &mut dyn Progress,
) -> io::Result<()> {
    if renamed_dir.exists() {
        fs::remove_dir_all(renamed_dir)?;
    }
    fs::create_dir(renamed_dir)?;

    progress.log("Copying files");

    let mut number = start_number;
    for name in names {
        let origin = path.join(name);

        if origin.is_file() {
            let extension = Path::new(name)
                .extension()
                .map(|ext| format!(".{}", ext.to_string_lossy()))
                .unwrap_or_default();
            let new_name = format!("{}{:0width$}{}", prefix, number, extension, width = width);

            fs::copy(&origin, renamed_dir.join(&new_name))?;
            number += 1;

            progress.advance();
            progress.log(&format!("Renamed {} as {}", origin.display(), new_name));
        } else {
            copy_dir_recursive(&origin, &renamed_dir.join(name))?;

            progress.advance();
            progress.log(&format!("Did not modify {}", origin.display()));
        }
    }

    Ok(())
}

/// Copy the listed entries of `path` into a temporary backup directory
fn create_backup(names: &[String], path: &Path) -> io::Result<TempDir> {
    let backup = TempDir::new()?;

    for name in names {
        let origin = path.join(name);
        let destination = backup.path().join(name);

        if origin.is_file() {
            fs::copy(&origin, &destination)?;
        } else {
            copy_dir_recursive(&origin, &destination)?;
        }
    }

    Ok(backup)
}

/// Replace `path` with the contents of `backup`
fn restore_backup(backup: &Path, path: &Path) -> io::Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)?;
    }
    copy_dir_recursive(backup, path)
}

fn copy_dir_recursive(from: &Path, to: &Path) -> io::Result<()> {
    fs::create_dir_all(to)?;

    for entry in fs::read_dir(from)? {
        let entry = entry?;
        let destination = to.join(entry.file_name());

        if entry.file_type()?.is_dir() {
            copy_dir_recursive(&entry.path(), &destination)?;
        } else {
            fs::copy(entry.path(), &destination)?;
        }
    }

    Ok(())
}

/// "/scans/pages" -> "/scans/pages_renamed"
fn sibling_with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(suffix);
    path.with_file_name(name)
}
