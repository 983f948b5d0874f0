//! SQLite-backed lyric store and discography cache.

pub mod db;

pub use db::{LyricStore, SongRow, MAX_SONGS_PER_ARTIST};
