//! Classification metrics

use graph_challenge_domain::ClassLabel;
use std::collections::BTreeMap;

#[derive(Debug, Default, Clone, Copy)]
struct ClassCounts {
    true_positives: u64,
    false_positives: u64,
    false_negatives: u64,
}

impl ClassCounts {
    /// One-vs-rest F1, or 0.0 when the class has no true or predicted members
    fn f1(&self) -> f64 {
        let denominator = 2 * self.true_positives + self.false_positives + self.false_negatives;
        if denominator == 0 {
            0.0
        } else {
            (2 * self.true_positives) as f64 / denominator as f64
        }
    }
}

/// Macro-averaged F1 over `(true, predicted)` pairs.
///
/// The label space is every class seen on either side. Each class gets a
/// one-vs-rest F1 (zero when undefined) and the classes are averaged
/// unweighted, so a model that only gets the majority class right is
/// penalised. Classes are summed in label order, which makes the result
/// independent of pair order. An empty input scores 0.0.
pub fn macro_f1<I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (ClassLabel, ClassLabel)>,
{
    let mut counts: BTreeMap<ClassLabel, ClassCounts> = BTreeMap::new();

    for (truth, predicted) in pairs {
        if truth == predicted {
            counts.entry(truth).or_default().true_positives += 1;
        } else {
            counts.entry(truth).or_default().false_negatives += 1;
            counts.entry(predicted).or_default().false_positives += 1;
        }
    }

    if counts.is_empty() {
        return 0.0;
    }

    let total: f64 = counts.values().map(ClassCounts::f1).sum();
    total / counts.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn pairs(raw: &[(i64, i64)]) -> Vec<(ClassLabel, ClassLabel)> {
        raw.iter()
            .map(|(t, p)| (ClassLabel::new(*t), ClassLabel::new(*p)))
            .collect()
    }

    #[test]
    fn test_perfect_predictions_score_one() {
        assert_eq!(macro_f1(pairs(&[(0, 0), (1, 1)])), 1.0);
    }

    #[test]
    fn test_one_class_never_predicted() {
        // Class 0: P=1/2, R=1 -> F1=2/3. Class 1: F1=0.
        let score = macro_f1(pairs(&[(0, 0), (1, 0)]));
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_predicted_only_class_counts_in_label_space() {
        // Class 2 never appears in the truth but is predicted once
        let score = macro_f1(pairs(&[(0, 0), (0, 2)]));
        // Class 0: tp=1, fn=1 -> 2/3. Class 2: fp=1 -> 0.
        assert!((score - 1.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_majority_class_only_is_penalised() {
        let score = macro_f1(pairs(&[(0, 0), (0, 0), (0, 0), (1, 0)]));
        // Accuracy would be 0.75; macro F1 averages 6/7 and 0
        assert!((score - 3.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn test_empty_input_scores_zero() {
        assert_eq!(macro_f1(Vec::new()), 0.0);
    }

    proptest! {
        #[test]
        fn prop_score_is_bounded(raw in prop::collection::vec((0i64..4, 0i64..4), 0..64)) {
            let score = macro_f1(pairs(&raw));
            prop_assert!((0.0..=1.0).contains(&score));
        }

        #[test]
        fn prop_score_ignores_pair_order(raw in prop::collection::vec((0i64..4, 0i64..4), 1..64)) {
            let forward = macro_f1(pairs(&raw));
            let mut reversed = raw.clone();
            reversed.reverse();
            prop_assert_eq!(forward, macro_f1(pairs(&reversed)));
        }
    }
}
