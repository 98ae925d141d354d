//! Token corpora for the n-gram model.
//!
//! A corpus file is a flat, whitespace-separated list of lowercase
//! alphabetic tokens. [`clean`] turns raw book text into that shape;
//! [`fetch_gutenberg`] downloads a Project Gutenberg book and caches it cleaned.

pub mod cache;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rust_embed::RustEmbed;
use tracing::debug;

use crate::corpus::cache::{BookCache, fetch_url};
use crate::error::ModelError;

const STRIP_CHARS: &[char] = &[
    '(', ')', '-', '.', ',', ';', '\'', '"', '“', '”', '‘', '’', ':', '?', '!',
];

#[derive(RustEmbed)]
#[folder = "assets/"]
struct Assets;

/// Reduces raw text to lowercase alphabetic tokens.
///
/// Each whitespace-separated word loses its punctuation and is lowercased;
/// words that are then empty or still contain non-alphabetic characters
/// (digits, stray symbols) are dropped entirely.
pub fn clean(raw: &str) -> Vec<String> {
    raw.split_whitespace()
        .map(|word| {
            word.chars()
                .filter(|c| !STRIP_CHARS.contains(c))
                .collect::<String>()
                .to_lowercase()
        })
        .filter(|word| !word.is_empty() && word.chars().all(char::is_alphabetic))
        .collect()
}

/// An ordered token sequence together with its vocabulary.
#[derive(Clone, Debug, Default)]
pub struct Corpus {
    tokens: Vec<String>,
    vocabulary: HashSet<String>,
}

impl Corpus {
    pub fn new(tokens: Vec<String>) -> Self {
        let vocabulary = tokens.iter().cloned().collect();
        Self { tokens, vocabulary }
    }

    /// Splits already-clean text on whitespace.
    pub fn from_text(text: &str) -> Self {
        Self::new(text.split_whitespace().map(str::to_string).collect())
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading corpus {}", path.display()))?;
        let corpus = Self::from_text(&text);
        debug!(path = %path.display(), tokens = corpus.len(), "loaded corpus");
        Ok(corpus)
    }

    /// The sample corpus compiled into the binary.
    pub fn embedded() -> Self {
        let text = Assets::get("sample.txt")
            .map(|file| String::from_utf8_lossy(&file.data).into_owned())
            .unwrap_or_default();
        Self::from_text(&text)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.tokens.join(" "))
            .with_context(|| format!("writing corpus {}", path.display()))?;
        Ok(())
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn contains(&self, word: &str) -> bool {
        self.vocabulary.contains(word)
    }

    /// Fails with [`ModelError::UnknownVocabulary`] if `word` never occurs.
    pub fn check_word(&self, word: &str) -> crate::error::Result<()> {
        if self.contains(word) {
            Ok(())
        } else {
            Err(ModelError::UnknownVocabulary {
                word: word.to_string(),
            })
        }
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

/// Downloads Project Gutenberg book `book_id` and returns its cleaned
/// tokens. The cleaned corpus is cached after the first successful fetch.
///
/// Fails when the book is neither cached nor fetchable (offline, or built
/// without the `network` feature).
pub fn fetch_gutenberg(book_id: u32) -> Result<Corpus> {
    let cache = BookCache::open();
    if let Some(corpus) = cache.as_ref().and_then(|c| c.load(book_id)) {
        return Ok(corpus);
    }

    let url = format!("https://www.gutenberg.org/cache/epub/{book_id}/pg{book_id}.txt");
    let corpus = Corpus::new(clean(&fetch_url(&url)?));
    if let Some(cache) = &cache {
        cache.store(book_id, &corpus);
    }
    Ok(corpus)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_punctuation_and_lowercases() {
        let raw = "“Whenever you feel like criticizing anyone,” he told me, \
                   “just remember that all the people in this world haven’t had the advantages.”";
        let tokens = clean(raw);
        assert_eq!(tokens[0], "whenever");
        assert!(tokens.contains(&"anyone".to_string()));
        assert!(tokens.contains(&"havent".to_string()));
        assert_eq!(tokens.last().map(String::as_str), Some("advantages"));
    }

    #[test]
    fn clean_drops_non_alphabetic_words() {
        let tokens = clean("Chapter 1 -- the year 1922 was__odd; e-mail ok");
        assert_eq!(tokens, vec!["chapter", "the", "year", "email", "ok"]);
    }

    #[test]
    fn corpus_vocabulary() {
        let corpus = Corpus::from_text("a b a c a b");
        assert_eq!(corpus.len(), 6);
        assert_eq!(corpus.vocabulary_size(), 3);
        assert!(corpus.contains("c"));
        assert!(!corpus.contains("d"));
        assert_eq!(
            corpus.check_word("d").unwrap_err(),
            ModelError::UnknownVocabulary { word: "d".into() }
        );
    }

    #[test]
    fn embedded_corpus_is_clean_and_nonempty() {
        let corpus = Corpus::embedded();
        assert!(corpus.len() > 100);
        assert!(corpus.contains("the"));
        assert!(
            corpus
                .tokens()
                .iter()
                .all(|t| t.chars().all(|c| c.is_alphabetic() && !c.is_uppercase()))
        );
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("corpus.txt");
        let corpus = Corpus::new(clean("The quick brown fox, the lazy dog."));
        corpus.save(&path).unwrap();
        let loaded = Corpus::load(&path).unwrap();
        assert_eq!(loaded.tokens(), corpus.tokens());
    }
}
