//! Joint occurrence counts of every feature value against every target value.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::dataset::{Dataset, ValueCounts};
use crate::BayesError;

/// Occurrence counts keyed by `target value → feature → feature value`.
///
/// For every target value `v` and non-target feature `f`, the counts under
/// `table[v][f]` sum to the number of rows whose target column equals `v`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrelationTable {
    target: String,
    #[serde(skip)]
    features: Vec<String>,
    table: BTreeMap<String, BTreeMap<String, ValueCounts>>,
}

impl CorrelationTable {
    /// Feature the table is conditioned on.
    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Non-target features in header order.
    #[must_use]
    pub fn features(&self) -> &[String] {
        &self.features
    }

    /// Distinct target values, in ascending order.
    pub fn target_values(&self) -> impl Iterator<Item = &str> {
        self.table.keys().map(String::as_str)
    }

    /// Value counts of `feature` among rows where the target equals `target_value`.
    #[must_use]
    pub fn counts(&self, target_value: &str, feature: &str) -> Option<&ValueCounts> {
        self.table.get(target_value)?.get(feature)
    }

    /// Rows where `feature == value` and the target equals `target_value`.
    ///
    /// Pairs never seen together count as zero.
    #[must_use]
    pub fn occurrences(&self, target_value: &str, feature: &str, value: &str) -> usize {
        self.counts(target_value, feature)
            .and_then(|counts| counts.get(value))
            .copied()
            .unwrap_or(0)
    }
}

/// Count how often each feature value co-occurs with each value of `target`.
///
/// One pass over the rows. The table is built fresh on every call.
///
/// # Errors
///
/// Returns [`BayesError::UnknownFeature`] if `target` is not a column.
pub fn build_correlations(dataset: &Dataset, target: &str) -> Result<CorrelationTable, BayesError> {
    let target_index = dataset.column_index(target)?;

    let features: Vec<String> = dataset
        .headers()
        .iter()
        .enumerate()
        .filter(|&(i, _)| i != target_index)
        .map(|(_, name)| name.clone())
        .collect();

    // Every target value gets an entry for every feature, even if empty.
    let mut table: BTreeMap<String, BTreeMap<String, ValueCounts>> = dataset
        .value_counts(target)?
        .keys()
        .map(|value| {
            let per_feature = features
                .iter()
                .map(|f| (f.clone(), ValueCounts::new()))
                .collect();
            (value.clone(), per_feature)
        })
        .collect();

    for row in dataset.rows() {
        let target_value = &row[target_index];
        let Some(per_feature) = table.get_mut(target_value) else {
            continue;
        };
        for (i, (name, value)) in dataset.headers().iter().zip(row).enumerate() {
            if i == target_index {
                continue;
            }
            if let Some(counts) = per_feature.get_mut(name) {
                *counts.entry(value.clone()).or_insert(0) += 1;
            }
        }
    }

    Ok(CorrelationTable {
        target: target.to_string(),
        features,
        table,
    })
}
