use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use kdam::{tqdm, BarExt};
use serde::Deserialize;
use thiserror::Error;

use crate::lexicon::{LexiconStore, StoreError};

const ACCEPTED_PARTS_OF_SPEECH: &[&str] =
    &["noun", "pron", "verb", "adj", "adv", "prep", "conj", "intj"];

/// An initialism/acronym is flagged by two or more consecutive uppercase letters
/// anywhere in the word, independent of part of speech or gloss text.
const INITIALISM_RUN: usize = 2;

#[derive(Deserialize)]
struct Sense {
    #[serde(default)]
    glosses: Vec<String>,
}

#[derive(Deserialize)]
struct WiktionEntry {
    word: String,
    #[serde(default)]
    lang_code: String,
    #[serde(default)]
    pos: String,
    #[serde(default)]
    senses: Vec<Sense>,
}

impl WiktionEntry {
    /// Returns the gloss to store if this entry survives the filter, `None` otherwise.
    fn first_gloss_if_valid(&self) -> Option<&str> {
        if self.lang_code != "en" {
            return None;
        }
        if !ACCEPTED_PARTS_OF_SPEECH.contains(&self.pos.as_str()) {
            return None;
        }
        let gloss = self.senses.first()?.glosses.first()?;
        if !is_ascii_alpha_only(&self.word) {
            return None;
        }
        if has_initialism(&self.word) {
            return None;
        }
        let lower_gloss = gloss.to_lowercase();
        if lower_gloss.contains("initialism") || lower_gloss.contains("acronym") {
            return None;
        }
        Some(gloss)
    }
}

fn is_ascii_alpha_only(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphabetic())
}

fn has_initialism(s: &str) -> bool {
    let mut run = 0;
    for c in s.chars() {
        if c.is_ascii_uppercase() {
            run += 1;
            if run >= INITIALISM_RUN {
                return true;
            }
        } else {
            run = 0;
        }
    }
    false
}

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IngestStats {
    pub added: usize,
    pub filtered: usize,
    pub duplicates: usize,
    pub malformed: usize,
}

/// Decompresses `gz_path` line-by-line, parses each line as a Wiktionary JSON-lines
/// entry, filters it, and writes surviving `(word, pos, gloss)` triples to `store`.
/// Lines that don't parse as JSON are logged and skipped, not treated as fatal.
pub fn ingest_gzip_dump<P: AsRef<Path>>(
    gz_path: P,
    store: &impl LexiconStore,
) -> Result<IngestStats, IngestError> {
    let file = File::open(gz_path)?;
    let decoder = GzDecoder::new(file);
    // Wiktionary lines can run well past typical default buffer sizes.
    let reader = BufReader::with_capacity(1 << 20, decoder);

    let mut stats = IngestStats::default();
    let mut pbar = tqdm!(desc = "ingesting definitions");

    for line in reader.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let entry: WiktionEntry = match serde_json::from_str(&line) {
            Ok(entry) => entry,
            Err(e) => {
                log::warn!("skipping malformed dictionary line: {e}");
                stats.malformed += 1;
                let _ = pbar.update(1);
                continue;
            }
        };

        match entry.first_gloss_if_valid() {
            Some(gloss) => {
                let word = entry.word.to_lowercase();
                let word_id = store.upsert_word(&word)?;
                let pos_id = store.upsert_part_of_speech(&entry.pos)?;
                if store.add_definition(word_id, pos_id, gloss)? {
                    stats.added += 1;
                } else {
                    stats.duplicates += 1;
                }
            }
            None => stats.filtered += 1,
        }
        let _ = pbar.update(1);
    }
    eprintln!();
    log::info!(
        "ingest complete: {} added, {} filtered, {} duplicates, {} malformed",
        stats.added,
        stats.filtered,
        stats.duplicates,
        stats.malformed
    );
    Ok(stats)
}
