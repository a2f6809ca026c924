//! Naive Bayes inference over a [`Dataset`].

use std::collections::BTreeMap;

use crate::correlation::{build_correlations, CorrelationTable};
use crate::dataset::Dataset;
use crate::estimate::estimate;
use crate::prediction::Prediction;
use crate::BayesError;

/// Observed value for every feature other than the target.
pub type Observation = BTreeMap<String, String>;

/// Categorical Naive Bayes classifier backed by a borrowed dataset.
///
/// Holds no state beyond the dataset reference; every call rebuilds the
/// correlation table it needs, so repeated calls with the same inputs
/// give identical results.
#[derive(Debug, Clone, Copy)]
pub struct NaiveBayes<'a> {
    dataset: &'a Dataset,
}

impl<'a> NaiveBayes<'a> {
    #[must_use]
    pub fn new(dataset: &'a Dataset) -> Self {
        Self { dataset }
    }

    #[must_use]
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Joint occurrence counts for `target`. See [`build_correlations`].
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::UnknownFeature`] if `target` is not a column.
    pub fn correlations(&self, target: &str) -> Result<CorrelationTable, BayesError> {
        build_correlations(self.dataset, target)
    }

    /// Smoothed `P(feature = value | target = target_value)`. See [`estimate`].
    ///
    /// # Errors
    ///
    /// Same as [`estimate`].
    pub fn estimate(
        &self,
        correlations: &CorrelationTable,
        feature: &str,
        value: &str,
        target: &str,
        target_value: &str,
    ) -> Result<f64, BayesError> {
        estimate(self.dataset, correlations, feature, value, target, target_value)
    }

    /// Score every value of `target` given `observation` and pick the best.
    ///
    /// For each target value the score is the product of the smoothed
    /// per-feature probabilities times the prior `count / n_rows`.
    /// An empty dataset yields an empty [`Prediction`].
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`BayesError::UnknownFeature`] | `target` is not a column |
    /// | [`BayesError::InvalidObservation`] | `observation` size is not `headers - 1` |
    /// | [`BayesError::MissingObservedFeature`] | a non-target column has no observed value |
    pub fn infer(&self, observation: &Observation, target: &str) -> Result<Prediction, BayesError> {
        let target_index = self.dataset.column_index(target)?;
        let features = self.observed_features(observation, target_index)?;

        let correlations = self.correlations(target)?;
        let n_rows = self.dataset.n_rows();
        let target_counts = self.dataset.value_counts(target)?;

        let mut probabilities = BTreeMap::new();
        let mut scores = BTreeMap::new();

        for (target_value, &count) in target_counts {
            let mut per_feature = BTreeMap::new();
            let mut likelihood = 1.0;
            for &(feature, value) in &features {
                let p = self.estimate(&correlations, feature, value, target, target_value)?;
                likelihood *= p;
                per_feature.insert(feature.to_string(), p);
            }

            let prior = count as f64 / n_rows as f64;
            scores.insert(target_value.clone(), likelihood * prior);
            probabilities.insert(target_value.clone(), per_feature);
        }

        Ok(Prediction::new(probabilities, scores))
    }

    /// Pair every non-target header with its observed value, in header order.
    fn observed_features<'o>(
        &self,
        observation: &'o Observation,
        target_index: usize,
    ) -> Result<Vec<(&'a str, &'o str)>, BayesError> {
        let dataset = self.dataset;
        let expected = dataset.headers().len().saturating_sub(1);
        if observation.len() != expected {
            return Err(BayesError::InvalidObservation {
                expected,
                got: observation.len(),
            });
        }

        dataset
            .headers()
            .iter()
            .enumerate()
            .filter(|&(i, _)| i != target_index)
            .map(|(_, feature)| {
                observation
                    .get(feature)
                    .map(|value| (feature.as_str(), value.as_str()))
                    .ok_or_else(|| BayesError::MissingObservedFeature {
                        feature: feature.clone(),
                    })
            })
            .collect()
    }
}
