//! Settings configuration
//!
//! Manages user-configurable settings for list generation.
//! Default values are defined in `config/default.toml`.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use cdice_engine::{ListFormat, Marking, Scheme, SubstitutionTable, ToneStyle, Transliterator};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Default configuration TOML embedded from config/default.toml
const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

/// Configuration settings for cdice
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Output settings
    pub output: OutputSettings,
    /// Which schemes to generate
    pub schemes: SchemeSettings,
}

/// How word lists are written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Directory lists are written to
    pub dir: PathBuf,
    /// File format
    #[serde(default)]
    pub format: ListFormat,
    /// Tone spelling
    #[serde(default)]
    pub tones: ToneStyle,
    /// Bracket non-native spellings
    pub mark_non_native: bool,
}

/// Scheme selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemeSettings {
    /// Built-in schemes, in output order
    pub enabled: Vec<Scheme>,
    /// Paths to custom substitution tables
    #[serde(default)]
    pub tables: Vec<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("embedded default.toml must be valid")
    }
}

/// Recursively merge `overlay` TOML values on top of `base`.
fn merge_toml(base: &mut toml::Value, overlay: &toml::Value) {
    match (base, overlay) {
        (toml::Value::Table(base_table), toml::Value::Table(overlay_table)) => {
            for (key, value) in overlay_table {
                if let Some(base_value) = base_table.get_mut(key) {
                    merge_toml(base_value, value);
                } else {
                    base_table.insert(key.clone(), value.clone());
                }
            }
        }
        (base, _) => {
            *base = overlay.clone();
        }
    }
}

/// Parse user TOML content merged on top of default.toml.
fn parse_with_defaults(user_content: &str) -> Result<Settings> {
    let mut base: toml::Value = toml::from_str(DEFAULT_CONFIG_TOML)?;
    let user: toml::Value = toml::from_str(user_content)?;
    merge_toml(&mut base, &user);
    let settings: Settings = base.try_into()?;
    Ok(settings)
}

/// Get the project directories for cdice.
fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("org", "cdice", "cdice")
}

impl Settings {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load settings from the default configuration file.
    /// Falls back to embedded default.toml if the config file does not exist.
    pub fn load() -> Result<Self> {
        let Some(config_file) = Self::config_file() else {
            warn!("Could not determine config directory, using defaults");
            return Ok(Self::default());
        };

        if !config_file.exists() {
            debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", config_file);
        let content = fs::read_to_string(&config_file)?;
        parse_with_defaults(&content)
            .with_context(|| format!("invalid config file {:?}", config_file))
    }

    /// Load settings from a specific file, merged on top of defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("failed to read {:?}", path))?;
        parse_with_defaults(&content)
    }

    /// Save settings to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Marking implied by `mark_non_native`
    pub fn marking(&self) -> Marking {
        if self.output.mark_non_native {
            Marking::Bracketed
        } else {
            Marking::Plain
        }
    }

    /// Transliterators for every enabled scheme, built-ins first, then
    /// custom tables in the order listed.
    pub fn transliterators(&self) -> Result<Vec<Transliterator>> {
        let mut tables: Vec<SubstitutionTable> =
            self.schemes.enabled.iter().map(|s| s.table()).collect();
        for path in &self.schemes.tables {
            let table = SubstitutionTable::load(path)
                .with_context(|| format!("failed to load table {:?}", path))?;
            tables.push(table);
        }

        // Each list is saved under its table's name
        let mut names = HashSet::new();
        for table in &tables {
            if !names.insert(table.name()) {
                bail!("more than one enabled table is named '{}'", table.name());
            }
        }

        Ok(tables
            .into_iter()
            .map(|table| {
                Transliterator::new(table)
                    .with_tone_style(self.output.tones)
                    .with_marking(self.marking())
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.output.dir, PathBuf::from("."));
        assert_eq!(settings.output.format, ListFormat::Diceware);
        assert_eq!(settings.output.tones, ToneStyle::Canonical);
        assert!(!settings.output.mark_non_native);
        assert_eq!(settings.schemes.enabled, Scheme::ALL.to_vec());
        assert!(settings.schemes.tables.is_empty());
    }

    #[test]
    fn test_serialize_deserialize() {
        let settings = Settings::default();
        let toml_str = toml::to_string(&settings).unwrap();
        let loaded: Settings = toml::from_str(&toml_str).unwrap();
        assert_eq!(loaded.schemes.enabled, settings.schemes.enabled);
        assert_eq!(loaded.output.tones, settings.output.tones);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[output]
tones = "conventional"
mark_non_native = true
format = "plain"
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.output.tones, ToneStyle::Conventional);
        assert_eq!(settings.output.format, ListFormat::Plain);
        assert_eq!(settings.marking(), Marking::Bracketed);
    }

    #[test]
    fn test_partial_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[schemes]
enabled = ["sidney_lau"]
"#
        )
        .unwrap();

        let settings = Settings::load_from(file.path()).unwrap();
        assert_eq!(settings.schemes.enabled, vec![Scheme::SidneyLau]);
        // Should use default for unspecified values
        assert_eq!(settings.output.format, ListFormat::Diceware);
        assert!(!settings.output.mark_non_native);
    }

    #[test]
    fn test_unknown_scheme_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[schemes]
enabled = ["yale"]
"#
        )
        .unwrap();

        assert!(Settings::load_from(file.path()).is_err());
    }

    #[test]
    fn test_transliterators_include_custom_tables() {
        let mut table_file = NamedTempFile::new().unwrap();
        writeln!(
            table_file,
            r#"
name = "custom"
base = "jyutping"
"#
        )
        .unwrap();

        let mut settings = Settings::default();
        settings.schemes.enabled = vec![Scheme::Conway];
        settings.schemes.tables = vec![table_file.path().to_path_buf()];

        let names: Vec<String> = settings
            .transliterators()
            .unwrap()
            .iter()
            .map(|t| t.table().name().to_string())
            .collect();
        assert_eq!(names, vec!["conway", "custom"]);
    }

    #[test]
    fn test_table_named_like_enabled_scheme_is_an_error() {
        let mut table_file = NamedTempFile::new().unwrap();
        writeln!(
            table_file,
            r#"
name = "jyutping"
base = "sidney_lau"
"#
        )
        .unwrap();

        let mut settings = Settings::default();
        settings.schemes.tables = vec![table_file.path().to_path_buf()];
        let err = settings.transliterators().unwrap_err();
        assert!(err.to_string().contains("jyutping"), "{err}");

        // Fine once the built-in is not enabled
        settings.schemes.enabled = vec![Scheme::Conway];
        assert_eq!(settings.transliterators().unwrap().len(), 2);
    }

    #[test]
    fn test_scheme_enabled_twice_is_an_error() {
        let mut settings = Settings::default();
        settings.schemes.enabled = vec![Scheme::Conway, Scheme::Conway];
        assert!(settings.transliterators().is_err());
    }

    #[test]
    fn test_missing_table_file_is_an_error() {
        let mut settings = Settings::default();
        settings.schemes.tables = vec![PathBuf::from("/nonexistent/table.toml")];
        assert!(settings.transliterators().is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.output.mark_non_native = true;
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(&path).unwrap();
        assert!(loaded.output.mark_non_native);
    }
}
