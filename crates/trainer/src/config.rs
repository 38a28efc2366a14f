//! Trainer configuration

use serde::Deserialize;
use std::path::Path;

/// Session configuration, loadable from a TOML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Number of games per session
    pub games: u32,
    /// Seed for reproducible sessions (absent = fresh entropy)
    pub seed: Option<u64>,
    /// Directory weight tables are persisted under
    pub weights_dir: String,
    /// Log every game's outcome
    pub verbose: bool,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            games: 100,
            seed: None,
            weights_dir: "weights".to_string(),
            verbose: false,
        }
    }
}

impl TrainerConfig {
    /// Loads configuration from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, String> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Ok(Self::default()),
        };
        toml::from_str(&contents)
            .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
    }
}
