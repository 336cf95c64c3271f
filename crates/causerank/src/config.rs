//! Application configuration

use crate::pool::PoolConfig;
use serde::{Deserialize, Serialize};

/// Causerank configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CauserankConfig {
    /// Corpus file (one `title \t text` page per line)
    pub corpus_path: String,

    /// Training log file
    pub train_log_path: String,

    /// Worker pool settings
    pub pool: PoolConfig,
}

impl Default for CauserankConfig {
    fn default() -> Self {
        Self {
            corpus_path: "corpus.tsv".to_string(),
            train_log_path: "log_training.txt".to_string(),
            pool: PoolConfig::default(),
        }
    }
}

impl CauserankConfig {
    /// Load from configuration file
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }
}
