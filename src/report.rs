//! Console and JSON rendering of a [`Prediction`].

use std::fmt;

use serde::Serialize;

use crate::prediction::Prediction;

/// A prediction labeled with the target it was made for.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Report<'a> {
    target: &'a str,
    #[serde(flatten)]
    prediction: &'a Prediction,
}

impl<'a> Report<'a> {
    #[must_use]
    pub fn new(target: &'a str, prediction: &'a Prediction) -> Self {
        Self { target, prediction }
    }

    /// Pretty-printed JSON with the target, probabilities, scores,
    /// normalized distribution and classification.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(class) = self.prediction.classification() else {
            return writeln!(f, "Prediction Result ({}): <none>", self.target);
        };

        let score = self.prediction.score(class).unwrap_or(0.0);
        let share = self.prediction.normalized_probability(class).unwrap_or(0.0);
        writeln!(
            f,
            "Prediction Result ({}): {} ({:.4}) [{:.2}%]",
            self.target,
            class,
            score,
            share * 100.0
        )?;

        for (value, score) in self.prediction.scores() {
            let share = self.prediction.normalized_probability(value);
            match share {
                Some(share) => writeln!(f, "  {value:<16} score {score:.6}  p {share:.4}")?,
                None => writeln!(f, "  {value:<16} score {score:.6}")?,
            }
            if let Some(per_feature) = self.prediction.probabilities().get(value) {
                for (feature, p) in per_feature {
                    writeln!(f, "    P({feature} | {value}) = {p:.4}")?;
                }
            }
        }
        Ok(())
    }
}
