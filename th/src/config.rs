//! Configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::renamer::{ConflictPolicy, RenameOptions};

/// Name of the project-local config file
pub const LOCAL_CONFIG: &str = ".tmplhtml.yml";

/// Persistent defaults for a run; CLI flags override these
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Collision handling when the target `.html` exists
    #[serde(rename = "on-conflict")]
    pub on_conflict: ConflictPolicy,

    /// Log and continue past filesystem errors
    #[serde(rename = "keep-going")]
    pub keep_going: bool,

    /// Follow symbolic links while walking
    #[serde(rename = "follow-links")]
    pub follow_links: bool,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // An explicit path must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        let candidates = [
            Some(PathBuf::from(LOCAL_CONFIG)),
            dirs::config_dir().map(|dir| dir.join("tmplhtml").join("tmplhtml.yml")),
        ];

        for path in candidates.iter().flatten() {
            if path.exists() {
                match Self::load_from_file(path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {:#}", path.display(), e);
                    }
                }
            }
        }

        log::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        // An empty file deserializes to unit, not a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::debug!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Build run options from this config
    pub fn rename_options(&self) -> RenameOptions {
        RenameOptions {
            on_conflict: self.on_conflict,
            keep_going: self.keep_going,
            follow_links: self.follow_links,
            dry_run: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.on_conflict, ConflictPolicy::Overwrite);
        assert!(!config.keep_going);
        assert!(!config.follow_links);
    }

    #[test]
    fn test_parse_kebab_case_keys() {
        let yaml = r#"
on-conflict: skip
keep-going: true
"#;
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.on_conflict, ConflictPolicy::Skip);
        assert!(config.keep_going);
        assert!(!config.follow_links);
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("th.yml");
        fs::write(&path, "on-conflict: error\nfollow-links: true\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.on_conflict, ConflictPolicy::Error);
        assert!(config.follow_links);

        let options = config.rename_options();
        assert_eq!(options.on_conflict, ConflictPolicy::Error);
        assert!(options.follow_links);
        assert!(!options.dry_run);
    }

    #[test]
    fn test_load_empty_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("th.yml");
        fs::write(&path, "").unwrap();

        assert_eq!(Config::load(Some(&path)).unwrap(), Config::default());
    }

    #[test]
    fn test_load_explicit_missing_path_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("missing.yml");

        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("missing.yml"));
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("th.yml");
        fs::write(&path, "on-conflict: clobber\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_config_roundtrip_uses_kebab_keys() {
        let config = Config {
            on_conflict: ConflictPolicy::Skip,
            keep_going: true,
            follow_links: false,
        };
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("on-conflict: skip"));
        assert!(yaml.contains("keep-going: true"));
    }
}
