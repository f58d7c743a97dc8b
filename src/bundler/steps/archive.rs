//! Release archive creation.
//!
//! Layout of the produced zip:
//!
//! ```text
//! class_form.bin          executable
//! config.json             copied config
//! README.html             rendered readme
//! src/...                 the whole source directory, minus excludes
//! ```
//!
//! Every directory of the source tree gets an explicit entry, empty ones
//! included. A directory is excluded when a pattern matches its entry name
//! (`src/__pycache__/`).
//!
//! Entries are written in a fixed order (artifacts, then the source tree
//! sorted by path) so two runs over the same inputs list identical entries.
//! The zip is written to `<archive>.partial` and renamed into place, so a
//! failed run never leaves a truncated archive at the final path.

use crate::bundler::{
    builder::checksum::calculate_sha256,
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use std::{
    collections::BTreeSet,
    io::{Seek, Write},
    path::{Path, PathBuf},
};
use zip::write::SimpleFileOptions;

/// A finished release archive.
#[derive(Debug, Clone)]
pub struct ArchiveArtifact {
    pub path: PathBuf,
    pub size: u64,
    /// Hex SHA-256 of the archive.
    pub checksum: String,
    /// Entry names in archive order.
    pub entries: Vec<String>,
}

/// One file scheduled for the archive.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    source: PathBuf,
    name: String,
    kind: EntryKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    File { executable: bool },
    Directory,
}

/// Build the release archive from the artifacts in the output directory and
/// the source tree.
pub async fn create_archive(settings: &Settings) -> Result<ArchiveArtifact> {
    let executable = settings.executable_path();
    let config = settings.config_output_path();
    let html = settings.html_path();

    fs::verify_artifact("executable", &executable).await?;
    fs::require_artifact("config copy", &config).await?;
    fs::require_artifact("HTML readme", &html).await?;
    fs::require_input("source directory", &settings.source_dir())?;

    let archive_path = settings.archive_path();
    let partial_path = partial_path(&archive_path);
    let mut entries = vec![
        Entry {
            source: executable,
            name: settings.executable_name().to_string(),
            kind: EntryKind::File { executable: true },
        },
        Entry {
            source: config,
            name: settings.config_name(),
            kind: EntryKind::File { executable: false },
        },
        Entry {
            source: html,
            name: settings.html_name().to_string(),
            kind: EntryKind::File { executable: false },
        },
    ];
    entries.extend(collect_source_entries(
        settings,
        &[archive_path.as_path(), partial_path.as_path()],
    )?);

    log::info!(
        "Archiving {} files into {}",
        entries.len(),
        archive_path.display()
    );

    if let Some(parent) = archive_path.parent() {
        fs::create_dir_all(parent, false).await?;
    }

    let method = settings.archive().compression.method();
    let names = {
        let partial_path = partial_path.clone();
        tokio::task::spawn_blocking(move || write_zip(&partial_path, &entries, method))
            .await
            .map_err(|e| Error::GenericError(format!("Archive task panicked: {}", e)))?
    };

    let names = match names {
        Ok(names) => names,
        Err(e) => {
            if let Err(cleanup) = fs::remove_file(&partial_path).await {
                log::warn!("Failed to remove partial archive: {}", cleanup);
            }
            return Err(e);
        }
    };

    tokio::fs::rename(&partial_path, &archive_path)
        .await
        .fs_context("moving archive into place", &archive_path)?;

    let size = fs::verify_artifact("archive", &archive_path).await?;
    let checksum = calculate_sha256(&archive_path).await?;
    log::info!("✓ Created {} ({} bytes)", archive_path.display(), size);
    log::debug!("SHA256: {}", checksum);

    Ok(ArchiveArtifact {
        path: archive_path,
        size,
        checksum,
        entries: names,
    })
}

fn partial_path(archive: &Path) -> PathBuf {
    let mut name = archive.as_os_str().to_os_string();
    name.push(".partial");
    PathBuf::from(name)
}

/// Files and directories of the source directory, named
/// `<source dir name>/<relative path>` with `/` separators (directories end
/// in `/`), sorted, with exclude patterns applied to those names.
///
/// The output directory and the archive itself are never included, even
/// when they live inside the source directory.
fn collect_source_entries(settings: &Settings, skip: &[&Path]) -> Result<Vec<Entry>> {
    let source_dir = settings.source_dir();
    let output_dir = settings.output_dir();
    let prefix = source_dir
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| settings.product_name().to_string());

    let patterns = settings
        .archive()
        .exclude
        .iter()
        .map(|p| glob::Pattern::new(p))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut entries = Vec::new();
    let walker = walkdir::WalkDir::new(&source_dir)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() != output_dir);

    for entry in walker {
        let entry = entry?;
        let file_type = entry.file_type();
        if file_type.is_symlink() {
            log::debug!("Skipping symlink {}", entry.path().display());
            continue;
        }
        if skip.contains(&entry.path()) {
            continue;
        }

        let relative = entry.path().strip_prefix(&source_dir)?;
        let mut name = std::iter::once(prefix.clone())
            .chain(
                relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned()),
            )
            .collect::<Vec<_>>()
            .join("/");

        let kind = if file_type.is_dir() {
            name.push('/');
            EntryKind::Directory
        } else if file_type.is_file() {
            EntryKind::File { executable: false }
        } else {
            continue;
        };

        if patterns.iter().any(|p| p.matches(&name)) {
            log::debug!("Excluding {}", name);
            continue;
        }

        entries.push(Entry {
            source: entry.path().to_path_buf(),
            name,
            kind,
        });
    }

    Ok(entries)
}

/// Blocking zip writer. Directories get explicit entries the first time
/// they or anything below them is written.
fn write_zip(path: &Path, entries: &[Entry], method: zip::CompressionMethod) -> Result<Vec<String>> {
    let file = std::fs::File::create(path).fs_context("creating archive", path)?;
    let mut zip = zip::ZipWriter::new(file);
    let mut names = Vec::with_capacity(entries.len());
    let mut directories = BTreeSet::new();

    for entry in entries {
        // A directory name ends in `/`, so this also adds the directory itself.
        add_parent_directories(&mut zip, &entry.name, &mut directories, &mut names)?;

        let EntryKind::File { executable } = entry.kind else {
            continue;
        };

        let mut source =
            std::fs::File::open(&entry.source).fs_context("opening file for archive", &entry.source)?;
        let len = source
            .metadata()
            .fs_context("reading file metadata", &entry.source)?
            .len();

        let options = SimpleFileOptions::default()
            .compression_method(method)
            .unix_permissions(if executable { 0o755 } else { 0o644 })
            .large_file(len >= u64::from(u32::MAX));

        zip.start_file(entry.name.as_str(), options)?;
        std::io::copy(&mut source, &mut zip).fs_context("writing archive entry", &entry.source)?;
        names.push(entry.name.clone());
    }

    let file = zip.finish()?;
    file.sync_all().fs_context("flushing archive", path)?;
    Ok(names)
}

fn add_parent_directories<W: Write + Seek>(
    zip: &mut zip::ZipWriter<W>,
    name: &str,
    seen: &mut BTreeSet<String>,
    names: &mut Vec<String>,
) -> Result<()> {
    let mut dir = String::new();
    let parents: Vec<&str> = name.split('/').collect();
    for part in &parents[..parents.len().saturating_sub(1)] {
        dir.push_str(part);
        dir.push('/');
        if seen.insert(dir.clone()) {
            let options = SimpleFileOptions::default().unix_permissions(0o755);
            zip.add_directory(dir.as_str(), options)?;
            names.push(dir.clone());
        }
    }
    Ok(())
}
