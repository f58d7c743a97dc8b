//! Application config validation and copy.

use crate::bundler::{
    error::{Error, ErrorExt, Result},
    settings::Settings,
    utils::fs,
};
use std::path::{Path, PathBuf};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Validate the config file and copy it, byte for byte, into the output
/// directory under the same name.
pub async fn copy_config(settings: &Settings) -> Result<PathBuf> {
    let source = settings.config_file();
    let target = settings.config_output_path();

    let bytes = tokio::fs::read(&source)
        .await
        .fs_context("reading config file", &source)?;
    validate(&source, &bytes)?;

    fs::copy_file(&source, &target).await?;
    log::info!("✓ Copied {} -> {}", source.display(), target.display());

    Ok(target)
}

/// The widget loads its config with a strict UTF-8 JSON reader and expects a
/// top-level object.
pub fn validate(path: &Path, bytes: &[u8]) -> Result<()> {
    let invalid = |reason: String| Error::InvalidConfig {
        path: path.to_path_buf(),
        reason,
    };

    if bytes.starts_with(UTF8_BOM) {
        return Err(invalid(
            "file starts with a UTF-8 byte order mark; save it as plain UTF-8".into(),
        ));
    }

    let value: serde_json::Value =
        serde_json::from_slice(bytes).map_err(|e| invalid(e.to_string()))?;

    if !value.is_object() {
        return Err(invalid("top-level value must be a JSON object".into()));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::settings::SettingsBuilder;

    fn check(bytes: &[u8]) -> Result<()> {
        validate(Path::new("config.json"), bytes)
    }

    #[test]
    fn accepts_objects() {
        check("{\"透明度\": 0.8, \"字体\": {\"名称\": \"微软雅黑\", \"大小\": 14}}".as_bytes()).unwrap();
    }

    #[test]
    fn rejects_bom_arrays_and_garbage() {
        let mut with_bom = UTF8_BOM.to_vec();
        with_bom.extend_from_slice(b"{}");
        assert!(check(&with_bom).unwrap_err().to_string().contains("byte order mark"));

        assert!(check(b"[1, 2]").unwrap_err().to_string().contains("JSON object"));
        assert!(matches!(check(b"{\"a\":").unwrap_err(), Error::InvalidConfig { .. }));
    }

    #[tokio::test]
    async fn copies_bytes_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let original = "{\n  \"预备铃\": 2\n}\n";
        std::fs::write(dir.path().join("config.json"), original).unwrap();

        let settings = SettingsBuilder::new(dir.path()).build().unwrap();
        let copied = copy_config(&settings).await.unwrap();

        assert_eq!(copied, dir.path().join("dist/config.json"));
        assert_eq!(std::fs::read_to_string(copied).unwrap(), original);
    }

    #[tokio::test]
    async fn invalid_config_is_not_copied() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("config.json"), "not json").unwrap();

        let settings = SettingsBuilder::new(dir.path()).build().unwrap();
        assert!(copy_config(&settings).await.is_err());
        assert!(!dir.path().join("dist/config.json").exists());
    }
}
