use learnpath_store::OwnerId;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CONFIG_NAME: &str = "learnpath.config.json";
pub const OWNER_ENV: &str = "LEARNPATH_OWNER";

/// Learnpath configuration file format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one JSON file per owner
    #[serde(default = "default_data_dir")]
    pub data_dir: String,

    /// Owner used when neither `--owner` nor the environment names one
    #[serde(default = "default_owner")]
    pub owner: String,
}

fn default_data_dir() -> String {
    ".learnpath".to_string()
}

fn default_owner() -> String {
    "local".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Get absolute path to the data directory
    pub fn get_data_dir(&self, cwd: &str) -> PathBuf {
        PathBuf::from(cwd).join(&self.data_dir)
    }

    /// Owner precedence: flag, then environment, then config file
    pub fn resolve_owner(&self, flag: Option<&str>, env: Option<&str>) -> OwnerId {
        flag.or(env)
            .filter(|owner| !owner.is_empty())
            .map(OwnerId::from)
            .unwrap_or_else(|| OwnerId::from(self.owner.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            owner: default_owner(),
        }
    }
}
