//! Categorical Naive Bayes over small in-memory tables.
//!
//! A [`Dataset`] holds string-valued rows and per-feature value counts.
//! [`NaiveBayes::infer`] scores every value of a target feature for a
//! complete observation of the other features, using Laplace-corrected
//! conditional probabilities, and returns a [`Prediction`].
//!
//! [`DatasetReader`], [`Report`] and the [`batch`] module are the I/O
//! around that core: reading delimited text, rendering results, and
//! classifying whole files.

pub mod batch;
mod correlation;
mod dataset;
mod engine;
mod error;
mod estimate;
mod prediction;
mod reader;
mod report;

pub use correlation::{build_correlations, CorrelationTable};
pub use dataset::{Dataset, DatasetBuilder, ValueCounts};
pub use engine::{NaiveBayes, Observation};
pub use error::{BayesError, ReadError};
pub use estimate::estimate;
pub use prediction::{arg_max, Prediction};
pub use reader::{DatasetReader, DEFAULT_DELIMITER};
pub use report::Report;
