use serde::{Deserialize, Serialize};

/// One row of the movie catalog.
///
/// The item's position in the catalog array doubles as its row/column index
/// into the similarity matrix; it is assigned at load time and never changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogItem {
    /// Stable caller-facing TMDB identifier
    pub tmdb_id: i64,
    /// Display title of the movie
    pub title: String,
}

/// A single ranked recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// TMDB id of the recommended movie, transmitted as text
    pub tmdb_id: String,
    pub title: String,
    pub similarity_score: f64,
}
