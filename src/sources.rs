use std::{
    path::PathBuf,
    time::{Duration, Instant},
};

use anyhow::Context;
use tracing::{debug, info};

use crate::index::PrefixIndex;

/// The dictionary loaded on every run unless `--no-seed` is given.
pub const SEED_WORDS: [&str; 49] = [
    "apple", "app", "apply", "apricot", "apartment", "appetite", "banana", "bat", "ball", "battle",
    "badge", "balance", "cat", "caterpillar", "cattle", "camera", "castle", "canvas", "dog", "dove",
    "doll", "dragon", "dance", "danger", "elephant", "egg", "eagle", "earth", "energy", "fish",
    "frog", "falcon", "forest", "fortune", "goat", "grape", "giraffe", "galaxy", "garden", "hat",
    "home", "horse", "harbor", "harmony", "ice", "igloo", "island", "iron", "imagine",
];

/// Somewhere raw words can be read from before they are indexed.
#[async_trait::async_trait]
pub trait WordSource: Send + Sync {
    /// Human readable description, used in logs.
    fn name(&self) -> String;

    async fn load(&self) -> anyhow::Result<Vec<String>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SeedWords;

#[async_trait::async_trait]
impl WordSource for SeedWords {
    fn name(&self) -> String {
        "built-in seed words".to_string()
    }

    async fn load(&self) -> anyhow::Result<Vec<String>> {
        Ok(SEED_WORDS.iter().map(|w| w.to_string()).collect())
    }
}

/// Whitespace separated words read from a file.
#[derive(Debug, Clone)]
pub struct FileWords {
    pub path: PathBuf,
}

#[async_trait::async_trait]
impl WordSource for FileWords {
    fn name(&self) -> String {
        format!("word file {}", self.path.display())
    }

    async fn load(&self) -> anyhow::Result<Vec<String>> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("failed to read word file {}", self.path.display()))?;
        Ok(split_words(&text))
    }
}

/// Whitespace separated words already held in memory, e.g. piped on stdin.
#[derive(Debug, Clone)]
pub struct TextWords {
    pub text: String,
}

#[async_trait::async_trait]
impl WordSource for TextWords {
    fn name(&self) -> String {
        "piped input".to_string()
    }

    async fn load(&self) -> anyhow::Result<Vec<String>> {
        Ok(split_words(&self.text))
    }
}

fn split_words(text: &str) -> Vec<String> {
    text.split_whitespace().map(String::from).collect()
}

#[derive(Debug)]
pub struct LoadReport {
    pub index: PrefixIndex,
    /// Raw words read across all sources, duplicates and rejects included.
    pub words_read: usize,
    pub elapsed: Duration,
}

/// Reads every source in order and indexes all of their words.
pub async fn load_index(sources: &[Box<dyn WordSource>]) -> anyhow::Result<LoadReport> {
    let start = Instant::now();
    let mut index = PrefixIndex::new();
    let mut words_read = 0;

    for source in sources {
        let words = source.load().await?;
        debug!("Read {} words from {}", words.len(), source.name());
        words_read += words.len();
        index.extend(&words);
    }

    let elapsed = start.elapsed();
    info!(
        "Indexed {} distinct words ({} read) in {} us",
        index.count(),
        words_read,
        elapsed.as_micros()
    );

    Ok(LoadReport {
        index,
        words_read,
        elapsed,
    })
}
