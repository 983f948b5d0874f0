use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A single song: title, full lyric text, and the embedding of the
/// lyrics.
///
/// The embedding is produced by an external provider and treated as
/// opaque except for cosine-similarity comparison. Songs carry no
/// neighbor data of their own; similarity edges live on the
/// [`Discography`](crate::model::Discography) graph.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Song {
    pub title: String,
    pub lyrics: String,
    pub embedding: Vec<f32>,
}

impl Song {
    /// Create a song, rejecting empty titles, lyrics, or embeddings.
    pub(crate) fn new(
        title: impl Into<String>,
        lyrics: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Result<Self> {
        let title = title.into();
        let lyrics = lyrics.into();
        if title.is_empty() {
            return Err(Error::Precondition("song title must not be empty".into()));
        }
        if lyrics.is_empty() {
            return Err(Error::Precondition(format!(
                "song '{title}' has empty lyrics"
            )));
        }
        if embedding.is_empty() {
            return Err(Error::Precondition(format!(
                "song '{title}' has an empty embedding"
            )));
        }
        Ok(Self {
            title,
            lyrics,
            embedding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_new() {
        let song = Song::new("Fake Love", "la la la", vec![0.1, 0.2]).unwrap();
        assert_eq!(song.title, "Fake Love");
        assert_eq!(song.embedding.len(), 2);
    }

    #[test]
    fn test_song_rejects_empty_fields() {
        assert!(Song::new("", "lyrics", vec![0.1]).is_err());
        assert!(Song::new("Title", "", vec![0.1]).is_err());
        assert!(Song::new("Title", "lyrics", vec![]).is_err());
    }
}
