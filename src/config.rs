use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

const MAX_NGRAMS: usize = 8;
const MAX_LENGTH: usize = 10_000;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_ngrams")]
    pub ngrams: usize,
    #[serde(default = "default_length")]
    pub length: usize,
    #[serde(default = "default_corpus_path")]
    pub corpus_path: String,
    #[serde(default = "default_gutenberg_book")]
    pub gutenberg_book: u32,
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_ngrams() -> usize {
    2
}
fn default_length() -> usize {
    20
}
fn default_corpus_path() -> String {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("markov-text")
        .join("corpus.txt")
        .to_string_lossy()
        .to_string()
}
fn default_gutenberg_book() -> u32 {
    // The Great Gatsby
    64317
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ngrams: default_ngrams(),
            length: default_length(),
            corpus_path: default_corpus_path(),
            gutenberg_book: default_gutenberg_book(),
            seed: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let mut config: Config = toml::from_str(&content)?;
            config.validate();
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("markov-text")
            .join("config.toml")
    }

    pub fn corpus_path(&self) -> PathBuf {
        PathBuf::from(&self.corpus_path)
    }

    /// Clamp values loaded from a hand-edited file into usable ranges.
    pub fn validate(&mut self) {
        self.ngrams = self.ngrams.clamp(1, MAX_NGRAMS);
        self.length = self.length.min(MAX_LENGTH);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_serde_defaults_from_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.ngrams, 2);
        assert_eq!(config.length, 20);
        assert_eq!(config.gutenberg_book, 64317);
        assert_eq!(config.seed, None);
        assert!(config.corpus_path.ends_with("corpus.txt"));
    }

    #[test]
    fn test_config_partial_file() {
        let toml_str = r#"
ngrams = 3
seed = 42
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.ngrams, 3);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.length, 20);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let mut config = Config::default();
        config.seed = Some(7);
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(config.ngrams, deserialized.ngrams);
        assert_eq!(config.corpus_path, deserialized.corpus_path);
        assert_eq!(config.seed, deserialized.seed);
    }

    #[test]
    fn test_validate_clamps_values() {
        let mut config = Config::default();
        config.ngrams = 0;
        config.length = 1_000_000;
        config.validate();
        assert_eq!(config.ngrams, 1);
        assert_eq!(config.length, 10_000);

        config.ngrams = 99;
        config.validate();
        assert_eq!(config.ngrams, 8);
    }
}
