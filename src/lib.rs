extern crate anyhow;
extern crate bincode;
extern crate clap;
extern crate flate2;
extern crate rusqlite;
extern crate serde;
extern crate serde_json;
extern crate thiserror;

pub mod config;
pub mod dawg;
pub mod ingest;
pub mod lexicon;
