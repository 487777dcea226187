use std::path::Path;

use rusqlite::{params, Connection};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("lexicon store error: {0}")]
    Sql(#[from] rusqlite::Error),
}

const SCHEMA_SQL: &str = "
    CREATE TABLE IF NOT EXISTS words (
        id   INTEGER PRIMARY KEY,
        text TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS parts_of_speech (
        id   INTEGER PRIMARY KEY,
        name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS definitions (
        word_id INTEGER NOT NULL REFERENCES words(id),
        pos_id  INTEGER NOT NULL REFERENCES parts_of_speech(id),
        gloss   TEXT NOT NULL,
        PRIMARY KEY (word_id, pos_id)
    );
";

/// The collaborator the DAWG builder is agnostic to: anything that can hand back an
/// ordered word stream. `lexdawg` only ever needs [`words_in_length_range`](Self::words_in_length_range);
/// the rest of the trait exists so the ingestion pipeline has somewhere to write.
pub trait LexiconStore {
    fn upsert_word(&self, text: &str) -> Result<i64, StoreError>;
    fn upsert_part_of_speech(&self, name: &str) -> Result<i64, StoreError>;

    /// Inserts a definition for `(word_id, pos_id)`. Returns `false` without error if a
    /// definition for that pair already exists — the first gloss wins, it is not
    /// overwritten.
    fn add_definition(&self, word_id: i64, pos_id: i64, gloss: &str) -> Result<bool, StoreError>;

    /// Every distinct word whose character length lies in `[min_len, max_len]`,
    /// ascending lexicographically. The only read the DAWG builder's caller needs.
    fn words_in_length_range(
        &self,
        min_len: usize,
        max_len: usize,
    ) -> Result<Vec<String>, StoreError>;
}

/// SQLite-backed [`LexiconStore`]. Bundled via `rusqlite`'s `bundled` feature so the
/// tool runs with no external database service.
pub struct SqliteLexiconStore {
    conn: Connection,
}

impl SqliteLexiconStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path)?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(SqliteLexiconStore { conn })
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(SqliteLexiconStore { conn })
    }
}

impl LexiconStore for SqliteLexiconStore {
    fn upsert_word(&self, text: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO words (text) VALUES (?1) ON CONFLICT(text) DO NOTHING",
            params![text],
        )?;
        Ok(self
            .conn
            .query_row("SELECT id FROM words WHERE text = ?1", params![text], |row| {
                row.get(0)
            })?)
    }

    fn upsert_part_of_speech(&self, name: &str) -> Result<i64, StoreError> {
        self.conn.execute(
            "INSERT INTO parts_of_speech (name) VALUES (?1) ON CONFLICT(name) DO NOTHING",
            params![name],
        )?;
        Ok(self.conn.query_row(
            "SELECT id FROM parts_of_speech WHERE name = ?1",
            params![name],
            |row| row.get(0),
        )?)
    }

    fn add_definition(&self, word_id: i64, pos_id: i64, gloss: &str) -> Result<bool, StoreError> {
        let rows_changed = self.conn.execute(
            "INSERT INTO definitions (word_id, pos_id, gloss) VALUES (?1, ?2, ?3)
             ON CONFLICT(word_id, pos_id) DO NOTHING",
            params![word_id, pos_id, gloss],
        )?;
        Ok(rows_changed == 1)
    }

    fn words_in_length_range(
        &self,
        min_len: usize,
        max_len: usize,
    ) -> Result<Vec<String>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT text FROM words
             WHERE length(text) BETWEEN ?1 AND ?2
             ORDER BY text ASC",
        )?;
        let rows = stmt.query_map(params![min_len as i64, max_len as i64], |row| {
            row.get::<_, String>(0)
        })?;
        let mut words = Vec::new();
        for row in rows {
            words.push(row?);
        }
        Ok(words)
    }
}
