//! Leaderboard Builder - competition ranking
//!
//! Scores are ranked descending. Equal scores share the rank of the first
//! score in their group, and the next lower score takes its 1-based
//! position, leaving gaps after ties: `0.9, 0.9, 0.8 -> 1, 1, 3`.
//! Ties are decided on the full-precision score, never on the rounded text.

use graph_challenge_domain::LeaderboardRow;

/// Rank combined scores. Output rows carry no team identity.
pub fn build_ranking(scores: &[f64]) -> Vec<LeaderboardRow> {
    let mut sorted = scores.to_vec();
    // Stable, so exact ties keep their input order
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut rows: Vec<LeaderboardRow> = Vec::with_capacity(sorted.len());
    for (index, score) in sorted.into_iter().enumerate() {
        let position = index as u32 + 1;
        let rank = match rows.last() {
            Some(previous) if previous.score == score => previous.rank,
            _ => position,
        };
        rows.push(LeaderboardRow { rank, score });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ranks(scores: &[f64]) -> Vec<u32> {
        build_ranking(scores).iter().map(|row| row.rank).collect()
    }

    #[test]
    fn test_competition_ranking_with_gaps() {
        assert_eq!(ranks(&[0.9, 0.9, 0.8, 0.7]), vec![1, 1, 3, 4]);
        assert_eq!(ranks(&[0.5, 0.7, 0.7, 0.9, 0.5, 0.1]), vec![1, 2, 2, 4, 4, 6]);
    }

    #[test]
    fn test_rows_sorted_descending() {
        let rows = build_ranking(&[0.2, 0.8, 0.5]);
        let scores: Vec<f64> = rows.iter().map(|row| row.score).collect();
        assert_eq!(scores, vec![0.8, 0.5, 0.2]);
    }

    #[test]
    fn test_near_ties_are_not_ties() {
        // Identical after rounding to 8 digits, distinct at full precision
        assert_eq!(ranks(&[0.123456781, 0.123456784]), vec![1, 2]);
    }

    #[test]
    fn test_empty_input() {
        assert!(build_ranking(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_ranking_law(scores in prop::collection::vec(0u8..=10, 0..40)) {
            let scores: Vec<f64> = scores.into_iter().map(|s| f64::from(s) / 10.0).collect();
            let rows = build_ranking(&scores);

            prop_assert_eq!(rows.len(), scores.len());
            for (index, row) in rows.iter().enumerate() {
                let position = index as u32 + 1;
                match index.checked_sub(1).map(|i| rows[i]) {
                    Some(previous) if previous.score == row.score => {
                        prop_assert_eq!(row.rank, previous.rank);
                    }
                    Some(previous) => {
                        prop_assert!(previous.score > row.score);
                        prop_assert_eq!(row.rank, position);
                    }
                    None => prop_assert_eq!(row.rank, 1),
                }
            }
        }

        #[test]
        fn prop_ranking_ignores_input_order(scores in prop::collection::vec(0u8..=10, 0..40)) {
            let scores: Vec<f64> = scores.into_iter().map(|s| f64::from(s) / 10.0).collect();
            let mut reversed = scores.clone();
            reversed.reverse();
            prop_assert_eq!(build_ranking(&scores), build_ranking(&reversed));
        }
    }
}
