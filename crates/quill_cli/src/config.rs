//! `quill.toml` handling
//!
//! The CLI reads engine settings from a `quill.toml` in the working
//! directory (or a file given with `--config`). A missing file means
//! defaults.

use anyhow::{Context, Result};
use quill_ink::InkConfig;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "quill.toml";

/// Load and validate a configuration file
pub fn load_file(path: &Path) -> Result<InkConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    InkConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Load `quill.toml` from a directory, falling back to defaults
pub fn load_from_dir(dir: &Path) -> Result<InkConfig> {
    let config_path = dir.join(CONFIG_FILE);

    if !config_path.exists() {
        tracing::debug!("No {} in {}, using defaults", CONFIG_FILE, dir.display());
        return Ok(InkConfig::default());
    }

    load_file(&config_path)
}

/// Write a default `quill.toml` into `dir`
pub fn write_default(dir: &Path, force: bool) -> Result<PathBuf> {
    let config_path = dir.join(CONFIG_FILE);

    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    let content = InkConfig::default()
        .to_toml()
        .context("Failed to serialize default config")?;
    let content = format!("# Quill ink settings\n\n{}", content);

    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_ink::Style;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = TempDir::new().unwrap();

        let config = load_from_dir(dir.path()).unwrap();
        assert_eq!(config, InkConfig::default());
    }

    #[test]
    fn test_write_then_load() {
        let dir = TempDir::new().unwrap();
        let path = write_default(dir.path(), false).unwrap();

        assert!(path.ends_with(CONFIG_FILE));
        assert_eq!(load_from_dir(dir.path()).unwrap(), InkConfig::default());
    }

    #[test]
    fn test_write_refuses_to_overwrite() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(CONFIG_FILE), "default_style = \"basic\"\n").unwrap();

        assert!(write_default(dir.path(), false).is_err());
        assert_eq!(
            load_from_dir(dir.path()).unwrap().default_style,
            Style::Basic
        );

        write_default(dir.path(), true).unwrap();
        assert_eq!(
            load_from_dir(dir.path()).unwrap().default_style,
            Style::Fountain
        );
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.toml");
        fs::write(&path, "line_width = -3.0\n").unwrap();

        let err = load_file(&path).unwrap_err();
        assert!(format!("{err:#}").contains("broken.toml"));
    }
}
