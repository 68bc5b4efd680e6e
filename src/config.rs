use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::engine::ClassifierConfig;

pub const DEFAULT_GROUP_TABLE: &str = "group_data.csv";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

/// Run settings: where the data files live, how CAS numbers are resolved
/// and how ring systems merge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub group_table: PathBuf,
    pub aliases: Option<PathBuf>,
    /// Ask the online structure resolver for CAS numbers the alias table
    /// does not know.
    pub online: bool,
    pub include_spiro: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            group_table: PathBuf::from(DEFAULT_GROUP_TABLE),
            aliases: None,
            online: false,
            include_spiro: false,
        }
    }
}

/// Values that may or may not be given; unset fields keep what is already
/// there when layered onto [`Settings`].
#[derive(Deserialize, Debug, Default, Clone, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PartialSettings {
    pub group_table: Option<PathBuf>,
    pub aliases: Option<PathBuf>,
    pub online: Option<bool>,
    pub include_spiro: Option<bool>,
}

impl PartialSettings {
    pub fn from_toml_str(content: &str, label: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Toml {
            path: label.to_string(),
            source: e,
        })
    }

    /// Reads a settings file. Relative paths inside it are taken relative
    /// to the file's own directory.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let label = path.to_string_lossy().to_string();
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: label.clone(),
            source: e,
        })?;
        let mut partial = Self::from_toml_str(&content, &label)?;
        if let Some(base) = path.parent() {
            partial.group_table = partial.group_table.map(|p| base.join(p));
            partial.aliases = partial.aliases.map(|p| base.join(p));
        }
        debug!(path = %label, ?partial, "settings file read");
        Ok(partial)
    }
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        Ok(Self::default().merge(PartialSettings::from_path(path)?))
    }

    pub fn merge(mut self, partial: PartialSettings) -> Self {
        if let Some(table) = partial.group_table {
            self.group_table = table;
        }
        if partial.aliases.is_some() {
            self.aliases = partial.aliases;
        }
        if let Some(online) = partial.online {
            self.online = online;
        }
        if let Some(spiro) = partial.include_spiro {
            self.include_spiro = spiro;
        }
        self
    }

    pub fn classifier_config(&self) -> ClassifierConfig {
        ClassifierConfig {
            include_spiro: self.include_spiro,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert_eq!(s.group_table, PathBuf::from("group_data.csv"));
        assert_eq!(s.aliases, None);
        assert!(!s.online);
        assert!(!s.include_spiro);
    }

    #[test]
    fn partial_file_overrides_only_what_it_sets() {
        let p = PartialSettings::from_toml_str("include_spiro = true\n", "inline").unwrap();
        let s = Settings::default().merge(p);
        assert!(s.include_spiro);
        assert_eq!(s.group_table, PathBuf::from(DEFAULT_GROUP_TABLE));
    }

    #[test]
    fn later_layers_win() {
        let file = PartialSettings {
            group_table: Some("a.csv".into()),
            include_spiro: Some(true),
            ..Default::default()
        };
        let flags = PartialSettings {
            group_table: Some("b.csv".into()),
            ..Default::default()
        };
        let s = Settings::default().merge(file).merge(flags);
        assert_eq!(s.group_table, PathBuf::from("b.csv"));
        assert!(s.include_spiro);
    }

    #[test]
    fn file_paths_are_relative_to_the_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("viscogroups.toml");
        let content = "group_table = \"data/groups.csv\"\naliases = \"cas.csv\"\nonline = true\n";
        fs::write(&path, content).unwrap();
        let s = Settings::from_path(&path).unwrap();
        assert!(s.online);
        assert_eq!(s.group_table, dir.path().join("data/groups.csv"));
        assert_eq!(s.aliases, Some(dir.path().join("cas.csv")));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result = PartialSettings::from_toml_str("colour = \"blue\"\n", "inline");
        assert!(matches!(result, Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let result = Settings::from_path(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
