use std::collections::HashMap;

use petgraph::graph::{NodeIndex, UnGraph};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::Song;

/// The lyrical-similarity graph for one artist's songs.
///
/// Songs are stored in a petgraph arena in insertion order; similarity
/// edges are undirected and carry the cosine-similarity score that
/// produced them. The discography exclusively owns its songs — it is
/// populated through [`add_song`](Self::add_song), wired up once by
/// [`GraphBuilder`](crate::graph::GraphBuilder), and read-only after
/// that. There is no deletion; a discography is rebuilt fresh per
/// artist query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "GraphRepr", into = "GraphRepr")]
pub struct Discography {
    artist_name: String,
    graph: UnGraph<Song, f32>,
    titles: HashMap<String, NodeIndex>,
}

/// Serialized form: the title index is derivable from the graph, so
/// only the graph itself is persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct GraphRepr {
    artist_name: String,
    graph: UnGraph<Song, f32>,
}

impl From<Discography> for GraphRepr {
    fn from(discography: Discography) -> Self {
        Self {
            artist_name: discography.artist_name,
            graph: discography.graph,
        }
    }
}

impl From<GraphRepr> for Discography {
    fn from(repr: GraphRepr) -> Self {
        let titles = repr
            .graph
            .node_indices()
            .map(|ix| (repr.graph[ix].title.clone(), ix))
            .collect();
        Self {
            artist_name: repr.artist_name,
            graph: repr.graph,
            titles,
        }
    }
}

impl Discography {
    /// Create an empty discography for the given artist.
    pub fn new(artist_name: impl Into<String>) -> Result<Self> {
        let artist_name = artist_name.into();
        if artist_name.is_empty() {
            return Err(Error::Precondition("artist name must not be empty".into()));
        }
        Ok(Self {
            artist_name,
            graph: UnGraph::new_undirected(),
            titles: HashMap::new(),
        })
    }

    pub fn artist_name(&self) -> &str {
        &self.artist_name
    }

    /// Number of songs in the discography.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of similarity edges in the graph.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Add a song with a precomputed embedding.
    ///
    /// Fails fast on empty fields, duplicate titles, and embeddings
    /// whose dimensionality differs from songs already present.
    pub fn add_song(
        &mut self,
        title: impl Into<String>,
        lyrics: impl Into<String>,
        embedding: Vec<f32>,
    ) -> Result<NodeIndex> {
        let song = Song::new(title, lyrics, embedding)?;
        if self.titles.contains_key(&song.title) {
            return Err(Error::DuplicateTitle(song.title));
        }
        if let Some(expected) = self.embedding_dim() {
            if song.embedding.len() != expected {
                return Err(Error::DimensionMismatch {
                    title: song.title,
                    expected,
                    actual: song.embedding.len(),
                });
            }
        }
        let title = song.title.clone();
        let ix = self.graph.add_node(song);
        self.titles.insert(title, ix);
        Ok(ix)
    }

    /// Dimensionality of the embeddings, or `None` while empty.
    pub fn embedding_dim(&self) -> Option<usize> {
        self.graph
            .node_indices()
            .next()
            .map(|ix| self.graph[ix].embedding.len())
    }

    /// Look up a song by title.
    pub fn song(&self, title: &str) -> Option<&Song> {
        self.titles.get(title).map(|&ix| &self.graph[ix])
    }

    /// Songs in insertion order.
    pub fn songs(&self) -> impl Iterator<Item = &Song> {
        self.graph.node_indices().map(|ix| &self.graph[ix])
    }

    /// Titles of the songs sharing a similarity edge with `title`.
    pub fn neighbors(&self, title: &str) -> Option<Vec<&str>> {
        let &ix = self.titles.get(title)?;
        Some(
            self.graph
                .neighbors(ix)
                .map(|n| self.graph[n].title.as_str())
                .collect(),
        )
    }

    /// Number of similarity edges incident to `title`.
    pub fn degree(&self, title: &str) -> Option<usize> {
        self.titles.get(title).map(|&ix| self.degree_of(ix))
    }

    pub(crate) fn degree_of(&self, ix: NodeIndex) -> usize {
        self.graph.neighbors(ix).count()
    }

    /// Node ids in insertion order.
    pub(crate) fn node_ids(&self) -> Vec<NodeIndex> {
        self.graph.node_indices().collect()
    }

    pub(crate) fn song_at(&self, ix: NodeIndex) -> &Song {
        &self.graph[ix]
    }

    /// Insert a symmetric similarity edge. Self-pairs and existing
    /// edges are skipped; returns whether an edge was added.
    pub(crate) fn add_similarity_edge(
        &mut self,
        a: NodeIndex,
        b: NodeIndex,
        score: f32,
    ) -> bool {
        if a == b || self.graph.find_edge(a, b).is_some() {
            return false;
        }
        self.graph.add_edge(a, b, score);
        true
    }
}
