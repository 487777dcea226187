//! The pipeline that turns a raw Wiktionary dump into rows in the [`LexiconStore`](crate::lexicon::LexiconStore).
//! Everything here is a streaming filter: the DAWG builder consumes nothing from this
//! module beyond the words that end up in the store.

pub mod download;
pub mod wiktionary;

pub use download::{download_to_file, DownloadError};
pub use wiktionary::{ingest_gzip_dump, IngestError, IngestStats};
