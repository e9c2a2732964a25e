use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storeseed_generate::SeedOptions;

use crate::error::CliError;

/// Contents of the optional `storeseed.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub database_url: Option<String>,
    pub chunk_size: Option<usize>,
    pub relation_batch_size: Option<usize>,
    pub max_products_per_order: Option<usize>,
    pub seed: Option<u64>,
    pub log_file: Option<PathBuf>,
    pub report: Option<PathBuf>,
}

impl Settings {
    /// Read settings from `path`; a missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|source| CliError::SettingsIo {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| CliError::Settings {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Fill every option still unset after the flags from this file, then
    /// from the defaults.
    pub fn seed_options(&self, overrides: &SeedOverrides) -> SeedOptions {
        let defaults = SeedOptions::default();
        SeedOptions {
            chunk_size: overrides
                .chunk_size
                .or(self.chunk_size)
                .unwrap_or(defaults.chunk_size),
            relation_batch_size: overrides
                .relation_batch_size
                .or(self.relation_batch_size)
                .unwrap_or(defaults.relation_batch_size),
            max_products_per_order: overrides
                .max_products_per_order
                .or(self.max_products_per_order)
                .unwrap_or(defaults.max_products_per_order),
            seed: overrides.seed.or(self.seed),
        }
    }
}

/// Seed options given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SeedOverrides {
    pub chunk_size: Option<usize>,
    pub relation_batch_size: Option<usize>,
    pub max_products_per_order: Option<usize>,
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings(content: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("storeseed_settings_{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).expect("create temp dir");
        let path = dir.join("storeseed.toml");
        std::fs::write(&path, content).expect("write settings");
        path
    }

    #[test]
    fn missing_file_means_defaults() {
        let path = std::env::temp_dir().join(format!("absent_{}.toml", uuid::Uuid::new_v4()));
        let settings = Settings::load(&path).expect("load");
        assert_eq!(settings, Settings::default());
        assert_eq!(
            settings.seed_options(&SeedOverrides::default()),
            SeedOptions::default()
        );
    }

    #[test]
    fn flags_win_over_file_values() {
        let path = temp_settings(
            "database_url = \"memory://\"\nchunk_size = 250\nseed = 9\nmax_products_per_order = 3\n",
        );
        let settings = Settings::load(&path).expect("load");
        assert_eq!(settings.database_url.as_deref(), Some("memory://"));

        let options = settings.seed_options(&SeedOverrides {
            chunk_size: Some(50),
            ..SeedOverrides::default()
        });
        assert_eq!(options.chunk_size, 50);
        assert_eq!(options.seed, Some(9));
        assert_eq!(options.max_products_per_order, 3);
        assert_eq!(options.relation_batch_size, 100);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let path = temp_settings("chunk = 10\n");
        assert!(matches!(
            Settings::load(&path),
            Err(CliError::Settings { .. })
        ));
    }
}
