//! Degree-based song selection.

use petgraph::graph::NodeIndex;

use crate::error::{Error, Result};
use crate::model::{Discography, Song};

/// Number of songs selected for the generation prompt.
pub const TOP_K: usize = 5;

/// Select the `k` songs with the most similarity edges, most connected
/// first.
///
/// A discography of at most `k` songs is returned whole, in insertion
/// order — this mirrors the graph builder's size gate, which computes
/// no edges for such discographies. Ties on degree are broken by the
/// earliest remaining insertion order; the scan keeps the first
/// maximum it sees, so selection is deterministic.
pub fn select_top_k(discography: &Discography, k: usize) -> Result<Vec<&Song>> {
    if k == 0 {
        return Err(Error::Precondition("k must be positive".into()));
    }
    if discography.is_empty() {
        return Err(Error::EmptyDiscography {
            artist: discography.artist_name().to_string(),
        });
    }
    if discography.len() <= k {
        return Ok(discography.songs().collect());
    }

    let mut candidates: Vec<NodeIndex> = discography.node_ids();
    let mut degrees: Vec<usize> = candidates
        .iter()
        .map(|&ix| discography.degree_of(ix))
        .collect();

    let mut selected = Vec::with_capacity(k);
    while selected.len() < k && !candidates.is_empty() {
        // First-match-wins max scan: strict comparison keeps the
        // earliest-inserted song on ties.
        let mut best = 0;
        for (i, &degree) in degrees.iter().enumerate() {
            if degree > degrees[best] {
                best = i;
            }
        }
        degrees.remove(best);
        selected.push(discography.song_at(candidates.remove(best)));
    }
    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphBuilder;

    fn titles(songs: &[&Song]) -> Vec<String> {
        songs.iter().map(|s| s.title.clone()).collect()
    }

    #[test]
    fn test_empty_discography_is_an_error() {
        let discography = Discography::new("Nobody").unwrap();
        assert!(matches!(
            select_top_k(&discography, TOP_K),
            Err(Error::EmptyDiscography { artist }) if artist == "Nobody"
        ));
    }

    #[test]
    fn test_zero_k_is_an_error() {
        let mut discography = Discography::new("Artist").unwrap();
        discography.add_song("A", "lyrics", vec![1.0]).unwrap();
        assert!(matches!(
            select_top_k(&discography, 0),
            Err(Error::Precondition(_))
        ));
    }

    #[test]
    fn test_small_discography_returns_all_in_insertion_order() {
        let mut discography = Discography::new("Artist").unwrap();
        for title in ["C", "A", "B"] {
            discography
                .add_song(title, "lyrics", vec![1.0, 0.0])
                .unwrap();
        }
        let selected = select_top_k(&discography, TOP_K).unwrap();
        assert_eq!(titles(&selected), vec!["C", "A", "B"]);
    }

    /// The worked scenario: embeddings [1,0], [1,0], [0,1] at threshold
    /// 0.6 give A-B an edge and leave C isolated, so top-2 is [A, B]
    /// with the tie broken by insertion order.
    #[test]
    fn test_degree_ranking_with_insertion_order_tie_break() {
        let mut discography = Discography::new("Artist").unwrap();
        discography.add_song("A", "lyrics a", vec![1.0, 0.0]).unwrap();
        discography.add_song("B", "lyrics b", vec![1.0, 0.0]).unwrap();
        discography.add_song("C", "lyrics c", vec![0.0, 1.0]).unwrap();
        let ids = discography.node_ids();
        discography.add_similarity_edge(ids[0], ids[1], 1.0);

        let selected = select_top_k(&discography, 2).unwrap();
        assert_eq!(titles(&selected), vec!["A", "B"]);
    }

    #[test]
    fn test_selection_is_deterministic() {
        let mut discography = Discography::new("Artist").unwrap();
        let embeddings = [
            ("One", vec![1.0, 0.0]),
            ("Two", vec![0.9, 0.1]),
            ("Three", vec![0.8, 0.2]),
            ("Four", vec![0.0, 1.0]),
            ("Five", vec![0.1, 0.9]),
            ("Six", vec![0.7, 0.7]),
        ];
        for (title, embedding) in embeddings {
            discography.add_song(title, "lyrics", embedding).unwrap();
        }
        GraphBuilder::new(0.8).unwrap().build(&mut discography).unwrap();

        let first = titles(&select_top_k(&discography, TOP_K).unwrap());
        let second = titles(&select_top_k(&discography, TOP_K).unwrap());
        assert_eq!(first, second);

        // Most connected first, and only TOP_K of the six survive.
        assert_eq!(first.len(), TOP_K);
        let degrees: Vec<usize> = first
            .iter()
            .map(|t| discography.degree(t).unwrap())
            .collect();
        assert!(degrees.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_all_degrees_zero_falls_back_to_insertion_order() {
        let mut discography = Discography::new("Artist").unwrap();
        for title in ["F", "E", "D", "C", "B", "A"] {
            discography
                .add_song(title, "lyrics", vec![1.0, 0.0])
                .unwrap();
        }
        // No edges built: every degree is zero, so the first-match
        // scan walks the insertion order.
        let selected = select_top_k(&discography, 3).unwrap();
        assert_eq!(titles(&selected), vec!["F", "E", "D"]);
    }
}
