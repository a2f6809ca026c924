//! Laplace-corrected conditional probability of one feature value.

use crate::correlation::CorrelationTable;
use crate::dataset::Dataset;
use crate::BayesError;

/// `P(feature = value | target = target_value)` with add-one smoothing:
///
/// ```text
/// (occurrences + 1) / (count(target_value) + distinct(feature))
/// ```
///
/// A value never seen alongside `target_value`, or never seen at all, still
/// gets a numerator of one. The denominator counts only the values observed
/// in training, so an unseen value does not widen it.
///
/// # Errors
///
/// | Variant | Condition |
/// |---|---|
/// | [`BayesError::UnknownFeature`] | `feature` or `target` is not a column |
/// | [`BayesError::TargetAsFeature`] | `feature == target` |
/// | [`BayesError::CorrelationTargetMismatch`] | `correlations` was built for another target |
/// | [`BayesError::UnknownTargetValue`] | `target_value` never occurs in `target` |
pub fn estimate(
    dataset: &Dataset,
    correlations: &CorrelationTable,
    feature: &str,
    value: &str,
    target: &str,
    target_value: &str,
) -> Result<f64, BayesError> {
    let distinct = dataset.value_counts(feature)?.len();
    let target_counts = dataset.value_counts(target)?;

    if feature == target {
        return Err(BayesError::TargetAsFeature {
            feature: feature.to_string(),
        });
    }
    if correlations.target() != target {
        return Err(BayesError::CorrelationTargetMismatch {
            built_for: correlations.target().to_string(),
            requested: target.to_string(),
        });
    }

    let target_count = *target_counts
        .get(target_value)
        .ok_or_else(|| BayesError::UnknownTargetValue {
            target: target.to_string(),
            value: target_value.to_string(),
        })?;

    let occurrences = correlations.occurrences(target_value, feature, value);
    Ok((occurrences + 1) as f64 / (target_count + distinct) as f64)
}
