//! In-memory table of categorical rows with per-feature value frequencies.

use std::collections::BTreeMap;

use crate::BayesError;

/// Occurrence count of every value observed in one column.
pub type ValueCounts = BTreeMap<String, usize>;

/// An ordered table of string-valued rows.
///
/// `metadata[i]` holds the value frequencies of column `headers[i]`, so the
/// counts of every column sum to the number of rows. Built once through
/// [`DatasetBuilder`] and read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    metadata: Vec<ValueCounts>,
}

impl Dataset {
    /// Start building a dataset with the given column names.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::DuplicateFeature`] if a name appears twice.
    pub fn builder<I, S>(headers: I) -> Result<DatasetBuilder, BayesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        DatasetBuilder::new(headers)
    }

    /// Build a dataset from headers and rows in one go.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::DuplicateFeature`] or [`BayesError::RowLength`].
    pub fn from_rows<H, S, R, V>(headers: H, rows: R) -> Result<Self, BayesError>
    where
        H: IntoIterator<Item = S>,
        S: Into<String>,
        R: IntoIterator<Item = V>,
        V: IntoIterator,
        V::Item: Into<String>,
    {
        let mut builder = DatasetBuilder::new(headers)?;
        for row in rows {
            builder.push_row(row)?;
        }
        Ok(builder.build())
    }

    /// Column names in source order.
    #[must_use]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Rows in insertion order.
    #[must_use]
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    /// Per-feature value frequencies, in header order.
    pub fn metadata(&self) -> impl Iterator<Item = (&str, &ValueCounts)> {
        self.headers
            .iter()
            .map(String::as_str)
            .zip(self.metadata.iter())
    }

    /// Position of `feature` among the headers.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::UnknownFeature`] if `feature` is not a column.
    pub fn column_index(&self, feature: &str) -> Result<usize, BayesError> {
        self.headers
            .iter()
            .position(|h| h == feature)
            .ok_or_else(|| BayesError::UnknownFeature {
                feature: feature.to_string(),
            })
    }

    /// Value frequencies of one column.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::UnknownFeature`] if `feature` is not a column.
    pub fn value_counts(&self, feature: &str) -> Result<&ValueCounts, BayesError> {
        let index = self.column_index(feature)?;
        Ok(&self.metadata[index])
    }

    /// Number of rows where `feature` equals `value`; zero if never seen.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::UnknownFeature`] if `feature` is not a column.
    pub fn value_count(&self, feature: &str, value: &str) -> Result<usize, BayesError> {
        Ok(self
            .value_counts(feature)?
            .get(value)
            .copied()
            .unwrap_or(0))
    }

    /// Distinct values of one column, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::UnknownFeature`] if `feature` is not a column.
    pub fn distinct_values(&self, feature: &str) -> Result<impl Iterator<Item = &str>, BayesError> {
        Ok(self.value_counts(feature)?.keys().map(String::as_str))
    }
}

/// Appends rows and keeps value frequencies current as they arrive.
#[derive(Debug)]
pub struct DatasetBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    metadata: Vec<ValueCounts>,
}

impl DatasetBuilder {
    /// Create a builder for the given column names.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::DuplicateFeature`] if a name appears twice.
    pub fn new<I, S>(headers: I) -> Result<Self, BayesError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = Vec::new();
        for name in headers {
            let name = name.into();
            if names.contains(&name) {
                return Err(BayesError::DuplicateFeature { name });
            }
            names.push(name);
        }
        let metadata = vec![ValueCounts::new(); names.len()];
        Ok(Self {
            headers: names,
            rows: Vec::new(),
            metadata,
        })
    }

    /// Number of columns every row must have.
    #[must_use]
    pub fn n_columns(&self) -> usize {
        self.headers.len()
    }

    /// Append one row and count its values.
    ///
    /// # Errors
    ///
    /// Returns [`BayesError::RowLength`] if the row is not as wide as the header.
    /// The builder is left unchanged in that case.
    pub fn push_row<I>(&mut self, row: I) -> Result<(), BayesError>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let row: Vec<String> = row.into_iter().map(Into::into).collect();
        if row.len() != self.headers.len() {
            return Err(BayesError::RowLength {
                row_index: self.rows.len(),
                expected: self.headers.len(),
                got: row.len(),
            });
        }

        for (counts, value) in self.metadata.iter_mut().zip(&row) {
            *counts.entry(value.clone()).or_insert(0) += 1;
        }
        self.rows.push(row);
        Ok(())
    }

    /// Freeze the table.
    #[must_use]
    pub fn build(self) -> Dataset {
        Dataset {
            headers: self.headers,
            rows: self.rows,
            metadata: self.metadata,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        Dataset::from_rows(
            ["outlook", "windy", "play"],
            [
                ["sunny", "false", "no"],
                ["sunny", "true", "no"],
                ["overcast", "false", "yes"],
                ["rainy", "false", "yes"],
                ["rainy", "true", "no"],
            ],
        )
        .unwrap()
    }

    #[test]
    fn counts_sum_to_row_count() {
        let ds = weather();
        for (feature, counts) in ds.metadata() {
            let total: usize = counts.values().sum();
            assert_eq!(total, ds.n_rows(), "feature {feature}");
        }
    }

    #[test]
    fn metadata_follows_header_order() {
        let ds = weather();
        let names: Vec<&str> = ds.metadata().map(|(name, _)| name).collect();
        assert_eq!(names, ["outlook", "windy", "play"]);
    }

    #[test]
    fn value_sets_match_columns() {
        let ds = weather();
        let outlook: Vec<&str> = ds.distinct_values("outlook").unwrap().collect();
        assert_eq!(outlook, ["overcast", "rainy", "sunny"]);
        assert_eq!(ds.value_count("play", "no").unwrap(), 3);
        assert_eq!(ds.value_count("play", "maybe").unwrap(), 0);
    }

    #[test]
    fn unknown_feature_rejected() {
        let ds = weather();
        assert_eq!(
            ds.value_counts("humidity").unwrap_err(),
            BayesError::UnknownFeature {
                feature: "humidity".into()
            }
        );
    }

    #[test]
    fn duplicate_header_rejected() {
        let err = DatasetBuilder::new(["a", "b", "a"]).unwrap_err();
        assert_eq!(err, BayesError::DuplicateFeature { name: "a".into() });
    }

    #[test]
    fn ragged_row_rejected_without_side_effects() {
        let mut builder = DatasetBuilder::new(["a", "b"]).unwrap();
        builder.push_row(["x", "y"]).unwrap();
        let err = builder.push_row(["x"]).unwrap_err();
        assert_eq!(
            err,
            BayesError::RowLength {
                row_index: 1,
                expected: 2,
                got: 1
            }
        );
        let ds = builder.build();
        assert_eq!(ds.n_rows(), 1);
        assert_eq!(ds.value_count("a", "x").unwrap(), 1);
    }

    #[test]
    fn empty_dataset_has_empty_counts() {
        let ds = DatasetBuilder::new(["a", "b"]).unwrap().build();
        assert_eq!(ds.n_rows(), 0);
        assert!(ds.value_counts("a").unwrap().is_empty());
    }
}
