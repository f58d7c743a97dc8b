//! File system utilities for the release pipeline.
//!
//! Provides idempotent directory handling, file copying with automatic
//! directory creation, and artifact verification.

use crate::bundler::error::{Error, ErrorExt, Result};
use std::{io, path::Path};
use tokio::fs;

/// Creates all of the directories of the specified path, erasing it first if specified.
pub async fn create_dir_all(path: &Path, erase: bool) -> Result<()> {
    if erase {
        remove_dir_all(path).await?;
    }

    // create_dir_all is already idempotent - succeeds even if dir exists
    fs::create_dir_all(path)
        .await
        .fs_context("creating directory", path)
}

/// Removes the directory and its contents if it exists.
pub async fn remove_dir_all(path: &Path) -> Result<()> {
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()), // Idempotent
        Err(e) => Err(Error::Fs {
            context: "removing directory",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Removes a file if it exists.
pub async fn remove_file(path: &Path) -> Result<()> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::Fs {
            context: "removing file",
            path: path.to_path_buf(),
            error: e,
        }),
    }
}

/// Copies a regular file from one path to another, creating any parent
/// directories of the destination path as necessary.
///
/// Fails if the source path is a directory or doesn't exist.
pub async fn copy_file(from: &Path, to: &Path) -> Result<()> {
    if !from.exists() {
        return Err(Error::GenericError(format!("{from:?} does not exist")));
    }
    if !from.is_file() {
        return Err(Error::GenericError(format!("{from:?} is not a file")));
    }
    if let Some(dest_dir) = to.parent() {
        fs::create_dir_all(dest_dir)
            .await
            .fs_context("creating destination directory", dest_dir)?;
    }
    fs::copy(from, to).await.fs_context("copying file", from)?;
    Ok(())
}

/// Fails with [`Error::MissingInput`] unless `path` exists.
pub fn require_input(what: &'static str, path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(Error::MissingInput {
            what,
            path: path.to_path_buf(),
        })
    }
}

/// Checks that a step left a non-empty regular file behind.
///
/// Returns the file size.
pub async fn verify_artifact(what: &'static str, path: &Path) -> Result<u64> {
    let len = require_artifact(what, path).await?;
    if len == 0 {
        return Err(Error::MissingArtifact {
            what,
            path: path.to_path_buf(),
        });
    }
    Ok(len)
}

/// Checks that a step left a regular file behind. Empty files are accepted:
/// an empty readme renders to an empty HTML page.
///
/// Returns the file size.
pub async fn require_artifact(what: &'static str, path: &Path) -> Result<u64> {
    let missing = || Error::MissingArtifact {
        what,
        path: path.to_path_buf(),
    };

    let metadata = match fs::metadata(path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(missing()),
        Err(e) => {
            return Err(Error::Fs {
                context: "reading artifact metadata",
                path: path.to_path_buf(),
                error: e,
            });
        }
    };

    if !metadata.is_file() {
        return Err(missing());
    }

    Ok(metadata.len())
}
