use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::Corpus;

/// Cleaned Gutenberg corpora on disk, one `pg<id>.txt` file per book.
///
/// Entries hold tokens already passed through [`super::clean`], so a cache
/// hit skips both the download and the cleaning pass.
pub struct BookCache {
    dir: PathBuf,
}

impl BookCache {
    /// The cache under the user's data directory, if one exists.
    pub fn open() -> Option<Self> {
        let dir = dirs::data_dir()?.join("markov-text").join("books");
        Self::at(dir).ok()
    }

    pub fn at(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .with_context(|| format!("creating book cache {}", dir.display()))?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry(&self, book_id: u32) -> PathBuf {
        self.dir.join(format!("pg{book_id}.txt"))
    }

    /// A cached corpus, or `None` when the book was never stored or the
    /// entry holds no tokens.
    pub fn load(&self, book_id: u32) -> Option<Corpus> {
        let path = self.entry(book_id);
        if !path.exists() {
            return None;
        }
        match Corpus::load(&path) {
            Ok(corpus) if !corpus.is_empty() => {
                debug!(book_id, tokens = corpus.len(), "book cache hit");
                Some(corpus)
            }
            Ok(_) => None,
            Err(err) => {
                warn!(book_id, error = %err, "unreadable book cache entry");
                None
            }
        }
    }

    /// Stores `corpus`; a failed write is logged and otherwise ignored.
    pub fn store(&self, book_id: u32, corpus: &Corpus) {
        if let Err(err) = corpus.save(&self.entry(book_id)) {
            warn!(book_id, error = %err, "failed to write book cache entry");
        }
    }
}

#[cfg(feature = "network")]
pub fn fetch_url(url: &str) -> Result<String> {
    debug!(url, "fetching");
    let client = reqwest::blocking::Client::builder()
        .timeout(std::time::Duration::from_secs(30))
        .build()?;
    let text = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .and_then(|response| response.text())
        .with_context(|| format!("fetching {url}"))?;
    Ok(text)
}

#[cfg(not(feature = "network"))]
pub fn fetch_url(url: &str) -> Result<String> {
    anyhow::bail!("cannot fetch {url}: built without the network feature")
}
