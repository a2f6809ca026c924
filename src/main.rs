use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use nbayes::{batch, DatasetReader, NaiveBayes, Observation, Report};

#[derive(Parser)]
#[command(name = "nbayes")]
#[command(about = "Categorical Naive Bayes classification with Laplace correction")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, global = true)]
    verbose: bool,

    /// Suppress all output except errors
    #[arg(long, global = true)]
    quiet: bool,
}

/// Where the training table lives and how it is laid out.
#[derive(Args, Debug, Clone)]
struct DataArgs {
    /// Path to the delimited training table
    #[arg(long)]
    data: PathBuf,

    /// Feature to predict
    #[arg(long)]
    target: String,

    /// Field separator (single byte)
    #[arg(long, default_value_t = ';')]
    delimiter: char,

    /// The first line is data, not feature names; columns are numbered from 0
    #[arg(long, default_value_t = false)]
    no_header: bool,
}

impl DataArgs {
    fn reader(&self, path: &std::path::Path) -> Result<DatasetReader> {
        let delimiter = u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .with_context(|| format!("delimiter must be a single ASCII byte, got {:?}", self.delimiter))?;
        Ok(DatasetReader::new(path)
            .with_delimiter(delimiter)
            .with_headers(!self.no_header))
    }
}

#[derive(Subcommand)]
enum Command {
    /// Classify one observation given on the command line
    Predict {
        #[command(flatten)]
        data: DataArgs,

        /// Observed value as feature=value (repeat for every non-target feature)
        #[arg(long = "observe", value_name = "FEATURE=VALUE", value_parser = parse_observation)]
        observe: Vec<(String, String)>,

        /// Print the result as JSON instead of a text summary
        #[arg(long, default_value_t = false)]
        json: bool,
    },

    /// Classify every row of an observation file and write a CSV of predictions
    Classify {
        #[command(flatten)]
        data: DataArgs,

        /// Observation file (same delimiter and header convention as --data)
        #[arg(long)]
        input: PathBuf,

        /// Output CSV path
        #[arg(long)]
        output: PathBuf,
    },

    /// Dump the joint occurrence counts for the target as JSON
    Correlations {
        #[command(flatten)]
        data: DataArgs,
    },
}

fn parse_observation(s: &str) -> Result<(String, String)> {
    let (feature, value) = s
        .split_once('=')
        .with_context(|| format!("expected FEATURE=VALUE, got {s:?}"))?;
    if feature.is_empty() {
        anyhow::bail!("empty feature name in {s:?}");
    }
    Ok((feature.to_string(), value.to_string()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match (cli.verbose, cli.quiet) {
        (true, _) => "debug",
        (_, true) => "error",
        _ => "info",
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Command::Predict { data, observe, json } => {
            let dataset = data
                .reader(&data.data)?
                .read()
                .context("failed to read training data")?;

            let observation: Observation = observe.into_iter().collect();
            let prediction = NaiveBayes::new(&dataset)
                .infer(&observation, &data.target)
                .context("inference failed")?;
            info!(
                classification = prediction.classification().unwrap_or(""),
                "prediction complete"
            );

            let report = Report::new(&data.target, &prediction);
            if json {
                println!("{}", report.to_json()?);
            } else {
                print!("{report}");
            }
        }

        Command::Classify {
            data,
            input,
            output,
        } => {
            let dataset = data
                .reader(&data.data)?
                .read()
                .context("failed to read training data")?;

            let nb = NaiveBayes::new(&dataset);
            let rows = batch::classify(&nb, &data.target, &data.reader(&input)?)?;
            batch::write_predictions(&output, &data.target, &rows)?;
        }

        Command::Correlations { data } => {
            let dataset = data
                .reader(&data.data)?
                .read()
                .context("failed to read training data")?;

            let table = NaiveBayes::new(&dataset)
                .correlations(&data.target)
                .context("failed to build correlations")?;
            println!("{}", serde_json::to_string_pretty(&table)?);
        }
    }

    Ok(())
}
