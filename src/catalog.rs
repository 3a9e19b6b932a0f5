use std::collections::HashMap;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

use crate::models::CatalogItem;

/// Errors raised while loading the catalog artifacts
///
/// All variants are fatal: the process must not serve requests over a
/// partially loaded or dimension-mismatched catalog.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to parse movie catalog: {0}")]
    CatalogParse(#[source] serde_json::Error),

    #[error("failed to parse similarity matrix: {0}")]
    SimilarityParse(#[source] serde_json::Error),

    #[error("similarity matrix has {matrix_rows} rows but the catalog has {catalog_rows} items")]
    DimensionMismatch {
        matrix_rows: usize,
        catalog_rows: usize,
    },

    #[error("similarity matrix row {row} has {len} columns, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },
}

/// Errors raised while resolving an external identifier
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LookupError {
    /// The supplied identifier is not parseable as a TMDB id
    #[error("invalid TMDB id {0:?}: not an integer")]
    InvalidId(String),

    /// The identifier is well-formed but absent from the catalog
    #[error("TMDB id {0} not found in catalog")]
    NotFound(i64),
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    tmdb_id: i64,
    title: String,
}

/// Immutable store of the movie table and the precomputed similarity matrix.
///
/// Loaded once at startup and read-only thereafter, so handlers may share it
/// behind an `Arc` without any locking. Row/column `i` of the matrix
/// corresponds to the item at position `i` in the catalog.
pub struct CatalogStore {
    items: Vec<CatalogItem>,
    /// TMDB id -> position of its first occurrence in catalog order
    index: HashMap<i64, usize>,
    similarity: Vec<Vec<f64>>,
}

impl CatalogStore {
    /// Deserializes both artifacts and validates that their dimensions agree.
    ///
    /// The catalog is a JSON array of `{"tmdb_id", "title"}` objects whose
    /// array order defines each item's position; the similarity artifact is
    /// an NxN JSON array of arrays keyed by the same positions.
    pub fn load(catalog_bytes: &[u8], similarity_bytes: &[u8]) -> Result<Self, LoadError> {
        let rows: Vec<CatalogRow> =
            serde_json::from_slice(catalog_bytes).map_err(LoadError::CatalogParse)?;
        let similarity: Vec<Vec<f64>> =
            serde_json::from_slice(similarity_bytes).map_err(LoadError::SimilarityParse)?;

        Self::from_parts(
            rows.into_iter()
                .map(|r| CatalogItem {
                    tmdb_id: r.tmdb_id,
                    title: r.title,
                })
                .collect(),
            similarity,
        )
    }

    /// Builds a store from already-deserialized parts, validating dimensions.
    pub fn from_parts(
        items: Vec<CatalogItem>,
        similarity: Vec<Vec<f64>>,
    ) -> Result<Self, LoadError> {
        if similarity.len() != items.len() {
            return Err(LoadError::DimensionMismatch {
                matrix_rows: similarity.len(),
                catalog_rows: items.len(),
            });
        }
        for (row, scores) in similarity.iter().enumerate() {
            if scores.len() != items.len() {
                return Err(LoadError::RaggedRow {
                    row,
                    len: scores.len(),
                    expected: items.len(),
                });
            }
        }

        // First occurrence wins, so duplicate ids resolve deterministically.
        let mut index = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            index.entry(item.tmdb_id).or_insert(position);
        }

        info!(items = items.len(), "catalog loaded");

        Ok(Self {
            items,
            index,
            similarity,
        })
    }

    /// Resolves a caller-supplied textual TMDB id to a catalog position.
    pub fn resolve(&self, raw_id: &str) -> Result<usize, LookupError> {
        let tmdb_id: i64 = raw_id
            .trim()
            .parse()
            .map_err(|_| LookupError::InvalidId(raw_id.to_string()))?;

        self.index
            .get(&tmdb_id)
            .copied()
            .ok_or(LookupError::NotFound(tmdb_id))
    }

    /// Returns the similarity scores of `position` against every catalog
    /// position, including itself.
    ///
    /// Precondition: `position` came from a successful [`resolve`](Self::resolve).
    pub fn similarity_row(&self, position: usize) -> &[f64] {
        &self.similarity[position]
    }

    /// Returns the catalog item at `position`.
    pub fn item(&self, position: usize) -> &CatalogItem {
        &self.items[position]
    }

    /// Number of items in the catalog
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
