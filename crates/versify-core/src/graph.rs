//! Similarity-graph construction.
//!
//! One O(n²) pass over all unordered song pairs, inserting a symmetric
//! edge whenever the cosine similarity of the two embeddings exceeds
//! the configured threshold.

use crate::error::{Error, Result};
use crate::model::Discography;

/// Discographies at or below this size skip graph construction: the
/// selection step would use every song anyway, so there is no point
/// ranking them by degree.
pub const SMALL_GRAPH_LIMIT: usize = 5;

/// Default similarity threshold. Tunable via configuration; observed
/// useful values range roughly 0.6--0.8 depending on the embedding
/// model.
pub const DEFAULT_SIMILARITY_THRESHOLD: f32 = 0.75;

/// Builds the similarity graph over a discography's songs.
#[derive(Debug, Clone, Copy)]
pub struct GraphBuilder {
    threshold: f32,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl GraphBuilder {
    /// Create a builder with the given similarity threshold.
    ///
    /// Cosine similarity lies in [-1, 1], so the threshold must too.
    pub fn new(threshold: f32) -> Result<Self> {
        if !threshold.is_finite() || !(-1.0..=1.0).contains(&threshold) {
            return Err(Error::Precondition(format!(
                "similarity threshold must lie in [-1, 1], got {threshold}"
            )));
        }
        Ok(Self { threshold })
    }

    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Compute all similarity edges, returning the number inserted.
    ///
    /// Skips construction entirely for discographies of at most
    /// [`SMALL_GRAPH_LIMIT`] songs. Every song must already carry an
    /// embedding of consistent dimensionality (enforced at
    /// [`Discography::add_song`]).
    pub fn build(&self, discography: &mut Discography) -> Result<usize> {
        if discography.len() <= SMALL_GRAPH_LIMIT {
            log::debug!(
                "discography for {} has {} songs; skipping graph construction",
                discography.artist_name(),
                discography.len()
            );
            return Ok(0);
        }

        let ids = discography.node_ids();
        let mut inserted = 0;
        for (i, &a) in ids.iter().enumerate() {
            for &b in &ids[i + 1..] {
                let score = cosine_similarity(
                    &discography.song_at(a).embedding,
                    &discography.song_at(b).embedding,
                )?;
                if score > self.threshold && discography.add_similarity_edge(a, b, score) {
                    inserted += 1;
                }
            }
        }

        log::debug!(
            "built similarity graph for {}: {} songs, {} edges at threshold {}",
            discography.artist_name(),
            discography.len(),
            inserted,
            self.threshold
        );
        Ok(inserted)
    }
}

/// Cosine similarity: dot product over the product of Euclidean norms.
///
/// Fails fast on empty or length-mismatched vectors and on
/// zero-magnitude vectors, rather than producing a NaN score.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.is_empty() || b.is_empty() {
        return Err(Error::Precondition(
            "cannot compare empty embedding vectors".into(),
        ));
    }
    if a.len() != b.len() {
        return Err(Error::Precondition(format!(
            "embedding length mismatch: {} vs {}",
            a.len(),
            b.len()
        )));
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return Err(Error::Precondition(
            "cannot compare zero-magnitude embedding vectors".into(),
        ));
    }
    Ok(dot / (norm_a * norm_b))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Six songs with two-dimensional embeddings: three near the x
    /// axis, two near the y axis, one diagonal.
    fn six_songs() -> Discography {
        let mut discography = Discography::new("Test Artist").unwrap();
        let embeddings = [
            ("One", vec![1.0, 0.0]),
            ("Two", vec![0.9, 0.1]),
            ("Three", vec![0.8, 0.2]),
            ("Four", vec![0.0, 1.0]),
            ("Five", vec![0.1, 0.9]),
            ("Six", vec![0.7, 0.7]),
        ];
        for (title, embedding) in embeddings {
            discography.add_song(title, "some lyrics", embedding).unwrap();
        }
        discography
    }

    #[test]
    fn test_cosine_similarity_identical() {
        let sim = cosine_similarity(&[1.0, 2.0], &[1.0, 2.0]).unwrap();
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_orthogonal() {
        let sim = cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).unwrap();
        assert!(sim.abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_opposite() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_similarity_rejects_mismatched_lengths() {
        assert!(cosine_similarity(&[1.0], &[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_cosine_similarity_rejects_zero_vector() {
        assert!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).is_err());
    }

    #[test]
    fn test_builder_rejects_out_of_range_threshold() {
        assert!(GraphBuilder::new(1.5).is_err());
        assert!(GraphBuilder::new(f32::NAN).is_err());
        assert!(GraphBuilder::new(-1.0).is_ok());
    }

    #[test]
    fn test_small_discography_skips_construction() {
        let mut discography = Discography::new("Small").unwrap();
        for title in ["A", "B", "C", "D", "E"] {
            discography
                .add_song(title, "lyrics", vec![1.0, 0.0])
                .unwrap();
        }
        let inserted = GraphBuilder::default().build(&mut discography).unwrap();
        assert_eq!(inserted, 0);
        assert_eq!(discography.edge_count(), 0);
    }

    #[test]
    fn test_build_inserts_symmetric_edges_above_threshold() {
        let mut discography = six_songs();
        let inserted = GraphBuilder::new(0.9).unwrap().build(&mut discography).unwrap();
        assert!(inserted > 0);
        assert_eq!(discography.edge_count(), inserted);

        // Symmetry: every neighbor relation holds in both directions.
        for song in discography.songs() {
            for neighbor in discography.neighbors(&song.title).unwrap() {
                assert!(discography
                    .neighbors(neighbor)
                    .unwrap()
                    .contains(&song.title.as_str()));
            }
        }
    }

    #[test]
    fn test_no_self_loops() {
        let mut discography = six_songs();
        GraphBuilder::new(0.5).unwrap().build(&mut discography).unwrap();
        for song in discography.songs() {
            assert!(!discography
                .neighbors(&song.title)
                .unwrap()
                .contains(&song.title.as_str()));
        }
    }

    #[test]
    fn test_raising_threshold_never_adds_edges() {
        let mut loose = six_songs();
        GraphBuilder::new(0.5).unwrap().build(&mut loose).unwrap();

        let mut strict = six_songs();
        GraphBuilder::new(0.9).unwrap().build(&mut strict).unwrap();

        assert!(strict.edge_count() <= loose.edge_count());
    }
}
