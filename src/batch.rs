//! Classify every row of an observation file and write the predictions as CSV.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, instrument};

use crate::engine::{NaiveBayes, Observation};
use crate::reader::DatasetReader;

/// One classified row of the observation file.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRow {
    pub id: usize,
    pub classification: Option<String>,
    pub probability: Option<f64>,
}

/// Classify every row read by `input` against `target`.
///
/// The observation file's header must name exactly the non-target features,
/// in any order. Rows are numbered from 1.
#[instrument(skip_all, fields(input = %input.path().display(), target_feature = %target))]
pub fn classify(nb: &NaiveBayes<'_>, target: &str, input: &DatasetReader) -> Result<Vec<BatchRow>> {
    let observations = input.read().context("failed to read observation file")?;

    let mut results = Vec::with_capacity(observations.n_rows());
    for (i, row) in observations.rows().iter().enumerate() {
        let observation: Observation = observations
            .headers()
            .iter()
            .cloned()
            .zip(row.iter().cloned())
            .collect();

        let prediction = nb
            .infer(&observation, target)
            .with_context(|| format!("failed to classify row {}", i + 1))?;

        let classification = prediction.classification().map(str::to_string);
        let probability = classification
            .as_deref()
            .and_then(|class| prediction.normalized_probability(class));
        results.push(BatchRow {
            id: i + 1,
            classification,
            probability,
        });
    }

    info!(n_rows = results.len(), "observations classified");
    Ok(results)
}

/// Write `ID,<target>,probability` rows to `outpath`.
pub fn write_predictions(outpath: &Path, target: &str, rows: &[BatchRow]) -> Result<()> {
    let mut writer = csv::Writer::from_path(outpath)
        .with_context(|| format!("failed to create {}", outpath.display()))?;

    writer.write_record(["ID", target, "probability"])?;
    for row in rows {
        writer.write_record([
            row.id.to_string(),
            row.classification.clone().unwrap_or_default(),
            row.probability.map(|p| p.to_string()).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;

    info!(path = %outpath.display(), n_rows = rows.len(), "predictions written");
    Ok(())
}
