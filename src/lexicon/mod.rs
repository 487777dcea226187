//! The relational store of words, parts of speech, and definitions that the ingestion
//! pipeline populates and that feeds the DAWG builder its ordered word stream.

pub mod store;

pub use store::{LexiconStore, SqliteLexiconStore, StoreError};
