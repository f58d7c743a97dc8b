//! Artifact checksum calculation.
//!
//! SHA256 of the release archive, plus the `sha256sum`-compatible sidecar
//! file published next to it.

use crate::bundler::{Result, error::ErrorExt};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

/// Calculates the SHA256 checksum of a file.
///
/// Reads the file in 8KB chunks to handle large executables efficiently.
///
/// # Returns
///
/// * `Ok(String)` - Hex-encoded SHA-256 hash (64 characters)
/// * `Err` - If the file cannot be read
pub async fn calculate_sha256(file_path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(file_path)
        .await
        .fs_context("opening file for hashing", file_path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", file_path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Writes `<hash>  <file name>\n` to `sidecar`, the format `sha256sum -c`
/// accepts when run from the archive's directory.
pub async fn write_checksum_file(artifact: &Path, checksum: &str, sidecar: &Path) -> Result<PathBuf> {
    let name = artifact
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let line = format!("{checksum}  {name}\n");

    tokio::fs::write(sidecar, line)
        .await
        .fs_context("writing checksum file", sidecar)?;

    Ok(sidecar.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hashes_known_content() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hello.txt");
        std::fs::write(&file, b"hello").unwrap();

        let hash = calculate_sha256(&file).await.unwrap();
        assert_eq!(
            hash,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[tokio::test]
    async fn hashes_files_larger_than_one_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big.bin");
        std::fs::write(&file, vec![0u8; 20_000]).unwrap();

        let streamed = calculate_sha256(&file).await.unwrap();
        let direct = format!("{:x}", Sha256::digest(vec![0u8; 20_000]));
        assert_eq!(streamed, direct);
    }

    #[tokio::test]
    async fn sidecar_uses_sha256sum_format() {
        let dir = tempfile::tempdir().unwrap();
        let archive = dir.path().join("class_form.zip");
        let sidecar = dir.path().join("class_form.zip.sha256");

        write_checksum_file(&archive, "abc123", &sidecar).await.unwrap();
        assert_eq!(
            std::fs::read_to_string(&sidecar).unwrap(),
            "abc123  class_form.zip\n"
        );
    }

    #[tokio::test]
    async fn missing_file_reports_path() {
        let err = calculate_sha256(Path::new("/no/such/archive.zip"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("/no/such/archive.zip"));
    }
}
