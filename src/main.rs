extern crate anyhow;
extern crate clap;
extern crate env_logger;
extern crate kdam;
extern crate lexdawg;
extern crate log;

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, ensure, Context, Result};
use clap::{Parser, Subcommand};
use kdam::{tqdm, BarExt};

use lexdawg::config::Config;
use lexdawg::dawg::{codec, Builder};
use lexdawg::ingest::{download_to_file, ingest_gzip_dump};
use lexdawg::lexicon::{LexiconStore, SqliteLexiconStore};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Builds compact word-game lexicons from a Wiktionary dump."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List raw dictionary dumps found in the configured directory.
    ListRaws,
    /// List built DAWG files found in the configured directory.
    ListDawgs,
    /// Extract and filter words/definitions from a gzip Wiktionary dump into the store.
    Ingest { path: PathBuf },
    /// Download a dictionary dump over HTTP into the raw-dictionary directory.
    Download { url: String, dest_file_name: String },
    /// Build a DAWG from words with length in [min_len, max_len] and save it.
    BuildDawg {
        min_len: usize,
        max_len: usize,
        save_file_name: String,
    },
    /// Load a .dawg file and report whether a word is contained / a valid prefix.
    Lookup { dawg_path: PathBuf, word: String },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = Config::load_or_init().context("loading config")?;
    config.ensure_directories()?;

    match cli.command {
        Command::ListRaws => list_dir(&config.raw_dict_dir),
        Command::ListDawgs => list_dir(&config.dawg_save_dir),
        Command::Ingest { path } => command_ingest(&config, &path),
        Command::Download {
            url,
            dest_file_name,
        } => command_download(&config, &url, &dest_file_name),
        Command::BuildDawg {
            min_len,
            max_len,
            save_file_name,
        } => command_build_dawg(&config, min_len, max_len, &save_file_name),
        Command::Lookup { dawg_path, word } => command_lookup(&dawg_path, &word),
    }
}

fn list_dir(dir: &std::path::Path) -> Result<()> {
    let entries = fs::read_dir(dir).with_context(|| format!("reading {}", dir.display()))?;
    let mut found = false;
    for entry in entries {
        let entry = entry?;
        println!("  {}", entry.file_name().to_string_lossy());
        found = true;
    }
    if !found {
        println!("No files found in '{}'", dir.display());
    }
    Ok(())
}

fn command_ingest(config: &Config, path: &std::path::Path) -> Result<()> {
    let store = SqliteLexiconStore::open(&config.db_path)
        .with_context(|| format!("opening lexicon store at {}", config.db_path.display()))?;
    let stats = ingest_gzip_dump(path, &store)?;
    println!(
        "Ingested {} from '{}' ({} filtered, {} duplicates, {} malformed)",
        stats.added,
        path.display(),
        stats.filtered,
        stats.duplicates,
        stats.malformed
    );
    Ok(())
}

fn command_download(config: &Config, url: &str, dest_file_name: &str) -> Result<()> {
    let dest = config.raw_dict_dir.join(dest_file_name);
    download_to_file(url, &dest)?;
    println!("Downloaded '{url}' to '{}'", dest.display());
    Ok(())
}

fn command_build_dawg(
    config: &Config,
    min_len: usize,
    max_len: usize,
    save_file_name: &str,
) -> Result<()> {
    ensure!(min_len < max_len, "min_len must be less than max_len");

    let save_path = config.dawg_save_dir.join(format!("{save_file_name}.dawg"));
    if save_path.exists() {
        bail!("file '{}' already exists", save_path.display());
    }

    let store = SqliteLexiconStore::open(&config.db_path)
        .with_context(|| format!("opening lexicon store at {}", config.db_path.display()))?;
    print!("Getting words from the lexicon store... ");
    let words = store.words_in_length_range(min_len, max_len)?;
    println!("found {} words.", words.len());

    let mut builder = Builder::new();
    let mut pbar = tqdm!(total = words.len(), desc = "building DAWG");
    for word in &words {
        builder.insert(word).with_context(|| format!("inserting '{word}'"))?;
        let _ = pbar.update(1);
    }
    eprintln!();
    let dawg = builder.finish()?;
    println!(
        "Built DAWG with {} nodes from {} words.",
        dawg.node_count(),
        words.len()
    );

    codec::save(&dawg, &save_path)?;
    println!("Saved DAWG to '{}'", save_path.display());
    Ok(())
}

fn command_lookup(dawg_path: &std::path::Path, word: &str) -> Result<()> {
    let dawg = codec::load(dawg_path)
        .with_context(|| format!("loading DAWG from {}", dawg_path.display()))?;
    println!("contains({word:?}) = {}", dawg.contains(word));
    println!("starts_with({word:?}) = {}", dawg.starts_with(word));
    Ok(())
}
