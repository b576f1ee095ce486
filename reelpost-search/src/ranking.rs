//! Candidate filtering and ordering.

use reelpost_core::metadata::SearchHit;

use crate::types::SearchCandidate;

/// Most candidates ever offered for one search.
pub const MAX_CANDIDATES: usize = 10;

/// Ranks raw search hits.
///
/// Keeps movies and series only. With a year, candidates dated in that year
/// are preferred; when none are, the unfiltered set is used. Sorted by
/// popularity, then vote count, both descending, and capped at
/// [`MAX_CANDIDATES`].
pub fn rank(hits: Vec<SearchHit>, year: Option<u16>) -> Vec<SearchCandidate> {
    let mut hits: Vec<SearchHit> = hits
        .into_iter()
        .filter(|hit| matches!(hit.media_type.as_str(), "movie" | "tv"))
        .collect();

    if let Some(year) = year {
        let prefix = format!("{year}-");
        let in_year: Vec<SearchHit> = hits
            .iter()
            .filter(|hit| hit.date().is_some_and(|date| date.starts_with(&prefix)))
            .cloned()
            .collect();
        if !in_year.is_empty() {
            hits = in_year;
        }
    }

    let mut candidates: Vec<SearchCandidate> =
        hits.into_iter().filter_map(SearchCandidate::from_hit).collect();

    candidates.sort_by(|a, b| {
        b.popularity
            .total_cmp(&a.popularity)
            .then_with(|| b.vote_count.cmp(&a.vote_count))
    });
    candidates.truncate(MAX_CANDIDATES);
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn hit(id: u64, media_type: &str, date: Option<&str>, popularity: f64, votes: u64) -> SearchHit {
        SearchHit {
            id,
            media_type: media_type.to_string(),
            title: Some(format!("Title {id}")),
            release_date: date.map(str::to_string),
            popularity: Some(popularity),
            vote_count: Some(votes),
            ..SearchHit::default()
        }
    }

    fn ids(candidates: &[SearchCandidate]) -> Vec<u64> {
        candidates.iter().map(|c| c.id).collect()
    }

    #[test]
    fn test_sorted_by_popularity_then_votes() {
        let ranked = rank(
            vec![
                hit(1, "movie", None, 10.0, 5),
                hit(2, "tv", None, 50.0, 1),
                hit(3, "movie", None, 10.0, 90),
                hit(4, "person", None, 99.0, 99),
            ],
            None,
        );
        assert_eq!(ids(&ranked), vec![2, 3, 1]);
    }

    #[test]
    fn test_year_filter_prefers_matching_dates() {
        let hits = vec![
            hit(1, "movie", Some("1999-10-15"), 5.0, 1),
            hit(2, "movie", Some("2011-01-01"), 80.0, 1),
        ];
        assert_eq!(ids(&rank(hits, Some(1999))), vec![1]);
    }

    #[test]
    fn test_year_filter_falls_back_when_nothing_matches() {
        let hits = vec![
            hit(1, "movie", Some("1999-10-15"), 5.0, 1),
            hit(2, "movie", None, 80.0, 1),
        ];
        assert_eq!(ids(&rank(hits, Some(1984))), vec![2, 1]);
    }

    #[test]
    fn test_capped_at_ten() {
        let hits = (0..25).map(|i| hit(i, "movie", None, i as f64, 0)).collect();
        let ranked = rank(hits, None);
        assert_eq!(ranked.len(), MAX_CANDIDATES);
        assert_eq!(ranked[0].id, 24);
    }

    fn arb_hit() -> impl Strategy<Value = SearchHit> {
        (
            1u64..10_000,
            prop::sample::select(vec!["movie", "tv", "person"]),
            prop::option::of(1990u16..2000),
            0.0f64..1000.0,
            0u64..50_000,
        )
            .prop_map(|(id, media_type, year, popularity, votes)| {
                let date = year.map(|y| format!("{y}-06-01"));
                hit(id, media_type, date.as_deref(), popularity, votes)
            })
    }

    proptest! {
        #[test]
        fn prop_ranking_invariants(
            hits in prop::collection::vec(arb_hit(), 0..40),
            year in prop::option::of(1990u16..2000),
        ) {
            let ranked = rank(hits.clone(), year);

            prop_assert!(ranked.len() <= MAX_CANDIDATES);
            for pair in ranked.windows(2) {
                prop_assert!(pair[0].popularity >= pair[1].popularity);
                if pair[0].popularity == pair[1].popularity {
                    prop_assert!(pair[0].vote_count >= pair[1].vote_count);
                }
            }

            if let Some(year) = year {
                let prefix = format!("{year}-");
                let any_in_year = hits.iter().any(|h| {
                    h.media_type != "person" && h.date().is_some_and(|d| d.starts_with(&prefix))
                });
                if any_in_year {
                    prop_assert!(ranked.iter().all(|c| c.year.as_deref() == Some(&prefix[..4])));
                }
            }

            let eligible = hits.iter().filter(|h| h.media_type != "person").count();
            prop_assert!(eligible == 0 || !ranked.is_empty());
        }
    }
}
