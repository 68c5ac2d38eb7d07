use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

const DEFAULT_CONFIG_FILE: &str = "rota.toml";

/// Configuration loaded from TOML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotaConfig {
    /// Where the roster snapshot lives
    #[serde(default = "default_data_file")]
    pub data_file: PathBuf,

    /// Workers per duty
    #[serde(default = "default_crew_size")]
    pub crew_size: usize,

    /// Names used by `rota init` when none are given
    #[serde(default)]
    pub seed_workers: Vec<String>,
}

fn default_data_file() -> PathBuf {
    PathBuf::from("rota.json")
}

fn default_crew_size() -> usize {
    rota_core::RotationPolicy::DEFAULT_CREW_SIZE
}

impl Default for RotaConfig {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            crew_size: default_crew_size(),
            seed_workers: Vec::new(),
        }
    }
}

impl RotaConfig {
    /// Load from `path`, or from `./rota.toml` if it exists, or defaults.
    ///
    /// An explicit path that does not exist is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.exists() {
                    debug!("no config file, using defaults");
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: RotaConfig = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    /// CLI flags win over file values.
    pub fn with_overrides(mut self, data: Option<PathBuf>, crew_size: Option<usize>) -> Self {
        if let Some(data) = data {
            self.data_file = data;
        }
        if let Some(crew_size) = crew_size {
            self.crew_size = crew_size;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config: RotaConfig = toml::from_str("").unwrap();
        assert_eq!(config.data_file, PathBuf::from("rota.json"));
        assert_eq!(config.crew_size, 2);
        assert!(config.seed_workers.is_empty());
    }

    #[test]
    fn file_values_are_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rota.toml");
        std::fs::write(
            &path,
            "data_file = \"/var/lib/rota/roster.json\"\ncrew_size = 3\nseed_workers = [\"Kim\", \"Lee\"]\n",
        )
        .unwrap();

        let config = RotaConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.data_file, PathBuf::from("/var/lib/rota/roster.json"));
        assert_eq!(config.crew_size, 3);
        assert_eq!(config.seed_workers, vec!["Kim", "Lee"]);
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(RotaConfig::load(Some(dir.path().join("nope.toml").as_path())).is_err());
    }

    #[test]
    fn overrides_win() {
        let config = RotaConfig::default().with_overrides(Some(PathBuf::from("other.json")), Some(4));
        assert_eq!(config.data_file, PathBuf::from("other.json"));
        assert_eq!(config.crew_size, 4);

        let config = RotaConfig::default().with_overrides(None, None);
        assert_eq!(config.crew_size, 2);
    }
}
