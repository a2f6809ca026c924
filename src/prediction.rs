//! Outcome of one inference: per-feature probabilities, class scores and the winner.

use std::collections::BTreeMap;

use serde::Serialize;

/// Select the entry with the strictly greatest value.
///
/// Keys are scanned in ascending order and only a strictly greater value
/// replaces the current best, so ties go to the lexicographically smallest
/// key. Returns `None` for an empty map.
#[must_use]
pub fn arg_max(scores: &BTreeMap<String, f64>) -> Option<(&str, f64)> {
    let mut iter = scores.iter();
    let (first_key, &first_value) = iter.next()?;
    let best = iter.fold((first_key.as_str(), first_value), |best, (key, &value)| {
        if value > best.1 {
            (key.as_str(), value)
        } else {
            best
        }
    });
    Some(best)
}

/// Result of classifying one observation against a target feature.
///
/// Only the conditional probabilities and raw scores are supplied; the
/// normalized distribution and the classification are derived from them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    probabilities: BTreeMap<String, BTreeMap<String, f64>>,
    scores: BTreeMap<String, f64>,
    normalized: BTreeMap<String, f64>,
    classification: Option<String>,
}

impl Prediction {
    /// Assemble a prediction from `target value → feature → P(value | target value)`
    /// and `target value → score`.
    ///
    /// `normalized` is left empty when the scores do not sum to a positive
    /// finite number.
    #[must_use]
    pub fn new(
        probabilities: BTreeMap<String, BTreeMap<String, f64>>,
        scores: BTreeMap<String, f64>,
    ) -> Self {
        let total: f64 = scores.values().sum();
        let normalized = if total > 0.0 && total.is_finite() {
            scores
                .iter()
                .map(|(class, score)| (class.clone(), score / total))
                .collect()
        } else {
            BTreeMap::new()
        };
        let classification = arg_max(&scores).map(|(class, _)| class.to_string());

        Self {
            probabilities,
            scores,
            normalized,
            classification,
        }
    }

    /// A prediction with no classes, used when the target has no values.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(BTreeMap::new(), BTreeMap::new())
    }

    /// `target value → feature → P(observed value | target value)`.
    #[must_use]
    pub fn probabilities(&self) -> &BTreeMap<String, BTreeMap<String, f64>> {
        &self.probabilities
    }

    /// Unnormalized class scores (likelihood times prior).
    #[must_use]
    pub fn scores(&self) -> &BTreeMap<String, f64> {
        &self.scores
    }

    /// Scores divided by their sum.
    #[must_use]
    pub fn normalized(&self) -> &BTreeMap<String, f64> {
        &self.normalized
    }

    /// Class with the greatest score, or `None` if there are no classes.
    #[must_use]
    pub fn classification(&self) -> Option<&str> {
        self.classification.as_deref()
    }

    #[must_use]
    pub fn score(&self, class: &str) -> Option<f64> {
        self.scores.get(class).copied()
    }

    #[must_use]
    pub fn normalized_probability(&self, class: &str) -> Option<f64> {
        self.normalized.get(class).copied()
    }

    /// True when the target had no values to score.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}
