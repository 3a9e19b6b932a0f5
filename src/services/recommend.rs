use tracing::debug;

use crate::catalog::{CatalogStore, LookupError};
use crate::models::Recommendation;

/// Returns the top-`k` movies most similar to the one identified by `raw_id`.
///
/// Candidates are every catalog position scored by the query's similarity
/// row, sorted descending; ties keep ascending-position order (stable sort
/// over enumeration order). The top-ranked entry is dropped positionally
/// rather than filtered by identity: with well-formed data that entry is the
/// query movie itself, whose self-similarity is maximal. The remaining `k`
/// entries are joined back to the catalog to produce the result.
///
/// Returns at most `k` records, fewer when the catalog has fewer than `k + 1`
/// movies, and an empty list for a single-movie catalog. Stateless and pure:
/// repeated calls with the same id yield identical output.
pub fn recommend_by_id(
    catalog: &CatalogStore,
    raw_id: &str,
    k: usize,
) -> Result<Vec<Recommendation>, LookupError> {
    let position = catalog.resolve(raw_id)?;
    let row = catalog.similarity_row(position);

    let mut ranked: Vec<(usize, f64)> = row.iter().copied().enumerate().collect();
    // Stable descending sort; total_cmp gives a total order over f64.
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    let recommendations: Vec<Recommendation> = ranked
        .into_iter()
        .skip(1)
        .take(k)
        .map(|(candidate, score)| {
            let item = catalog.item(candidate);
            Recommendation {
                tmdb_id: item.tmdb_id.to_string(),
                title: item.title.clone(),
                similarity_score: score,
            }
        })
        .collect();

    debug!(
        query = %raw_id,
        position,
        count = recommendations.len(),
        "generated recommendations"
    );

    Ok(recommendations)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogItem;

    fn store(items: &[(i64, &str)], similarity: Vec<Vec<f64>>) -> CatalogStore {
        let items = items
            .iter()
            .map(|(tmdb_id, title)| CatalogItem {
                tmdb_id: *tmdb_id,
                title: title.to_string(),
            })
            .collect();
        CatalogStore::from_parts(items, similarity).unwrap()
    }

    #[test]
    fn test_three_item_catalog_returns_neighbors_in_order() {
        let catalog = store(
            &[(1, "A"), (2, "B"), (3, "C")],
            vec![
                vec![1.0, 0.8, 0.3],
                vec![0.8, 1.0, 0.5],
                vec![0.3, 0.5, 1.0],
            ],
        );

        // Only 2 results since N - 1 = 2 < k = 5.
        let recs = recommend_by_id(&catalog, "1", 5).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].title, "B");
        assert_eq!(recs[0].similarity_score, 0.8);
        assert_eq!(recs[1].title, "C");
        assert_eq!(recs[1].similarity_score, 0.3);
    }

    #[test]
    fn test_scores_are_non_increasing() {
        let catalog = store(
            &[(1, "A"), (2, "B"), (3, "C"), (4, "D"), (5, "E")],
            vec![
                vec![1.0, 0.2, 0.9, 0.4, 0.7],
                vec![0.2, 1.0, 0.1, 0.3, 0.6],
                vec![0.9, 0.1, 1.0, 0.8, 0.5],
                vec![0.4, 0.3, 0.8, 1.0, 0.2],
                vec![0.7, 0.6, 0.5, 0.2, 1.0],
            ],
        );

        let recs = recommend_by_id(&catalog, "3", 4).unwrap();
        assert_eq!(recs.len(), 4);
        for pair in recs.windows(2) {
            assert!(pair[0].similarity_score >= pair[1].similarity_score);
        }
        assert!(recs.iter().all(|r| r.tmdb_id != "3"));
    }

    #[test]
    fn test_ties_keep_ascending_position_order() {
        let catalog = store(
            &[(10, "A"), (20, "B"), (30, "C"), (40, "D")],
            vec![
                vec![1.0, 0.5, 0.5, 0.5],
                vec![0.5, 1.0, 0.0, 0.0],
                vec![0.5, 0.0, 1.0, 0.0],
                vec![0.5, 0.0, 0.0, 1.0],
            ],
        );

        let recs = recommend_by_id(&catalog, "10", 3).unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["B", "C", "D"]);
    }

    #[test]
    fn test_idempotent() {
        let catalog = store(
            &[(1, "A"), (2, "B"), (3, "C")],
            vec![
                vec![1.0, 0.8, 0.3],
                vec![0.8, 1.0, 0.5],
                vec![0.3, 0.5, 1.0],
            ],
        );

        let first = recommend_by_id(&catalog, "2", 5).unwrap();
        let second = recommend_by_id(&catalog, "2", 5).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_id_fails_with_not_found() {
        let catalog = store(&[(1, "A")], vec![vec![1.0]]);
        assert_eq!(
            recommend_by_id(&catalog, "42", 5),
            Err(LookupError::NotFound(42))
        );
    }

    #[test]
    fn test_unparseable_id_fails_with_invalid_id() {
        let catalog = store(&[(1, "A")], vec![vec![1.0]]);
        assert_eq!(
            recommend_by_id(&catalog, "abc", 5),
            Err(LookupError::InvalidId("abc".to_string()))
        );
    }

    #[test]
    fn test_single_item_catalog_returns_empty() {
        let catalog = store(&[(1, "A")], vec![vec![1.0]]);
        let recs = recommend_by_id(&catalog, "1", 5).unwrap();
        assert!(recs.is_empty());
    }

    #[test]
    fn test_rank_zero_drop_is_positional_not_identity() {
        // Malformed data where the query's self-similarity is NOT maximal:
        // the top-ranked entry (B, 0.9) gets dropped and the query movie
        // itself (0.5) stays in the result. Intended behavior would exclude
        // the query; the engine deliberately drops rank 0 instead.
        let catalog = store(
            &[(1, "A"), (2, "B"), (3, "C")],
            vec![
                vec![0.5, 0.9, 0.1],
                vec![0.9, 1.0, 0.2],
                vec![0.1, 0.2, 1.0],
            ],
        );

        let recs = recommend_by_id(&catalog, "1", 5).unwrap();
        let titles: Vec<&str> = recs.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, ["A", "C"]);
    }
}
