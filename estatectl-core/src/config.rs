use serde::{Deserialize, Serialize};
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::error::{EstateError, Result};
use crate::stats::DEFAULT_PRICE_THRESHOLD;

/// Environment variables that override the config file.
pub const ENV_DATABASE_URL: &str = "DATABASE_URL";
pub const ENV_BIND: &str = "ESTATECTL_BIND";
pub const ENV_PRICE_THRESHOLD: &str = "ESTATECTL_PRICE_THRESHOLD";
pub const ENV_DATA_DIR: &str = "ESTATECTL_DATA_DIR";

/// Centralized configuration for estatectl
///
/// Every section is optional in the TOML file; missing values take defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EstateConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub stats: StatsSection,
    pub data: DataSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    pub bind: SocketAddr,
    pub cors_permissive: bool,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
    pub max_connections: u32,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsSection {
    /// Listings priced strictly above this count as high-value
    pub price_threshold: f64,
}

impl Default for StatsSection {
    fn default() -> Self {
        Self {
            price_threshold: DEFAULT_PRICE_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSection {
    /// Seed directory holding agents.json, listings.json, views.json
    pub dir: Option<PathBuf>,
}

impl EstateConfig {
    /// Load config and apply environment overrides.
    ///
    /// An explicit path must exist. Without one, ~/.estatectl/config.toml is
    /// used if present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = Self::config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    tracing::debug!("No config at {:?}, using defaults", path);
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(EstateError::path_not_found(path));
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| {
            EstateError::config(format!("invalid TOML in {}: {}", path.display(), e))
        })
    }

    /// Get config file path: ~/.estatectl/config.toml
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".estatectl/config.toml")
    }

    /// Apply overrides from a key lookup (the process environment in practice).
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_DATABASE_URL) {
            self.database.url = Some(url);
        }

        if let Some(bind) = lookup(ENV_BIND) {
            self.server.bind = bind
                .parse()
                .map_err(|_| EstateError::config(format!("{ENV_BIND}: invalid address '{bind}'")))?;
        }

        if let Some(threshold) = lookup(ENV_PRICE_THRESHOLD) {
            self.stats.price_threshold = threshold.parse().map_err(|_| {
                EstateError::config(format!("{ENV_PRICE_THRESHOLD}: invalid number '{threshold}'"))
            })?;
        }

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            self.data.dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Reject values the engine cannot use.
    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.stats.price_threshold)?;

        if self.database.max_connections == 0 {
            return Err(EstateError::config("database.max_connections must be at least 1"));
        }

        Ok(())
    }
}

/// A usable price threshold is finite and non-negative.
pub fn validate_threshold(threshold: f64) -> Result<f64> {
    if threshold.is_finite() && threshold >= 0.0 {
        Ok(threshold)
    } else {
        Err(EstateError::config(format!(
            "price threshold must be a finite, non-negative number (got {threshold})"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_service_defaults() {
        let config = EstateConfig::default();
        assert_eq!(config.server.bind.port(), 3000);
        assert_eq!(config.stats.price_threshold, 300_000.0);
        assert_eq!(config.database.max_connections, 5);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
            [stats]
            price_threshold = 500000.0

            [data]
            dir = "/srv/estate/seed"
            "#,
        )
        .unwrap();

        let config = EstateConfig::from_file(&path).unwrap();
        assert_eq!(config.stats.price_threshold, 500_000.0);
        assert_eq!(config.data.dir, Some(PathBuf::from("/srv/estate/seed")));
        assert_eq!(config.server.bind.port(), 3000);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[stats\nprice_threshold = ").unwrap();

        let err = EstateConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, EstateError::Config { .. }));
    }

    #[test]
    fn explicit_missing_path_fails() {
        let err = EstateConfig::load(Some(Path::new("/nope/estatectl.toml"))).unwrap_err();
        assert!(matches!(err, EstateError::PathNotFound { .. }));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let env: HashMap<&str, &str> = HashMap::from([
            (ENV_DATABASE_URL, "postgres://localhost/realestate"),
            (ENV_BIND, "0.0.0.0:8080"),
            (ENV_PRICE_THRESHOLD, "125000"),
            (ENV_DATA_DIR, "./data"),
        ]);

        let mut config = EstateConfig::default();
        config
            .apply_overrides(|key| env.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.database.url.as_deref(), Some("postgres://localhost/realestate"));
        assert_eq!(config.server.bind.port(), 8080);
        assert_eq!(config.stats.price_threshold, 125_000.0);
        assert_eq!(config.data.dir, Some(PathBuf::from("./data")));
    }

    #[test]
    fn bad_override_is_rejected() {
        let mut config = EstateConfig::default();
        let err = config
            .apply_overrides(|key| (key == ENV_PRICE_THRESHOLD).then(|| "lots".to_string()))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_PRICE_THRESHOLD));
    }

    #[test]
    fn thresholds_must_be_finite_and_non_negative() {
        assert!(validate_threshold(0.0).is_ok());
        assert!(validate_threshold(-1.0).is_err());
        assert!(validate_threshold(f64::NAN).is_err());
        assert!(validate_threshold(f64::INFINITY).is_err());
    }
}
