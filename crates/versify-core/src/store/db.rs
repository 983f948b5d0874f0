use std::path::Path;

use rusqlite::{Connection, OptionalExtension};

use crate::error::Result;
use crate::model::Discography;

/// Cap on songs fetched per artist. Inherited from the embedding
/// provider's free-tier rate limit (100 requests per minute), not a
/// correctness constraint.
pub const MAX_SONGS_PER_ARTIST: usize = 100;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS artists (
    name TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS songs (
    artist TEXT NOT NULL,
    title  TEXT NOT NULL,
    lyrics TEXT NOT NULL,
    views  INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (artist, title)
);

CREATE TABLE IF NOT EXISTS discography_cache (
    artist     TEXT PRIMARY KEY,
    graph      TEXT NOT NULL,
    cached_at  TEXT NOT NULL DEFAULT (datetime('now'))
);
";

/// A song row as stored in the lyrics database, before embedding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SongRow {
    pub title: String,
    pub lyrics: String,
}

/// A connection to the lyrics database.
///
/// Holds artist and song rows (typically imported from a lyrics
/// dataset) plus a cache of previously built discography graphs,
/// serialized as opaque JSON artifacts.
#[derive(Debug)]
pub struct LyricStore {
    conn: Connection,
}

impl LyricStore {
    /// Open (or create) the database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let store = Self { conn };
        store.bootstrap()?;
        Ok(store)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.bootstrap()?;
        Ok(store)
    }

    fn bootstrap(&self) -> Result<()> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Whether the artist exists, ignoring capitalization.
    pub fn artist_exists(&self, artist_name: &str) -> Result<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT name FROM artists WHERE name = ?1 COLLATE NOCASE",
                [artist_name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    /// The artist's songs, most viewed first, capped at
    /// [`MAX_SONGS_PER_ARTIST`]. Artist matching ignores
    /// capitalization.
    pub fn songs_for_artist(&self, artist_name: &str) -> Result<Vec<SongRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT title, lyrics FROM songs
             WHERE artist = ?1 COLLATE NOCASE
             ORDER BY views DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map(
                rusqlite::params![artist_name, MAX_SONGS_PER_ARTIST as i64],
                |row| {
                    Ok(SongRow {
                        title: row.get(0)?,
                        lyrics: row.get(1)?,
                    })
                },
            )?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Insert an artist, ignoring duplicates.
    pub fn insert_artist(&self, name: &str) -> Result<()> {
        self.conn
            .execute("INSERT OR IGNORE INTO artists (name) VALUES (?1)", [name])?;
        Ok(())
    }

    /// Insert or replace a song row.
    pub fn insert_song(&self, artist: &str, title: &str, lyrics: &str, views: u32) -> Result<()> {
        self.conn.execute(
            "INSERT OR REPLACE INTO songs (artist, title, lyrics, views)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![artist, title, lyrics, views],
        )?;
        Ok(())
    }

    /// Cache a built discography, replacing any previous graph for the
    /// same artist.
    pub fn cache_discography(&self, discography: &Discography) -> Result<()> {
        let graph = serde_json::to_string(discography)?;
        self.conn.execute(
            "INSERT OR REPLACE INTO discography_cache (artist, graph) VALUES (?1, ?2)",
            rusqlite::params![discography.artist_name(), graph],
        )?;
        log::debug!("cached discography graph for {}", discography.artist_name());
        Ok(())
    }

    /// Load a previously cached discography, if one exists. Artist
    /// matching ignores capitalization.
    pub fn cached_discography(&self, artist_name: &str) -> Result<Option<Discography>> {
        let graph: Option<String> = self
            .conn
            .query_row(
                "SELECT graph FROM discography_cache WHERE artist = ?1 COLLATE NOCASE",
                [artist_name],
                |row| row.get(0),
            )
            .optional()?;
        match graph {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }
}
