// Copyright 2025 SciNLI (https://github.com/scinli)
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! `scinli`: build, inspect and evaluate the template-recommendation NLI
//! dataset from a fetched corpus.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use scinli_core::{extend_path, extract_premises, read_json, write_json, Corpus, SplitSubsets};
use scinli_dataset::analysis::analyze;
use scinli_dataset::pipeline::run_split_pipeline;
use scinli_dataset::split::{SplitConfig, DEFAULT_SEED};
use scinli_dataset::stats::DatasetStatistics;
use scinli_models::baseline::{BaselineModel, BaselineVariant};
use scinli_models::evaluate::{evaluate, EvaluatedTestSet};
use std::path::{Path, PathBuf};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
#[command(name = "scinli", version, about = "Template-recommendation NLI dataset builder")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Split a corpus into training, test and validation sets
    Split {
        /// Corpus JSON with templates and neutral papers
        #[arg(long)]
        dataset: PathBuf,
        /// Directory the split artifacts are written to
        #[arg(long)]
        out_dir: PathBuf,
        /// Seed for the sampling RNG
        #[arg(long, default_value_t = DEFAULT_SEED)]
        seed: u64,
    },
    /// Write the research-field groupings of a corpus
    Analyze {
        #[arg(long)]
        dataset: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Extract standalone template premises
    Premises {
        #[arg(long)]
        dataset: PathBuf,
        /// Output JSON path
        #[arg(long)]
        out: PathBuf,
    },
    /// Build a recommendation model from a template list
    Train {
        #[arg(long)]
        approach: Approach,
        /// JSON document with a templates list
        #[arg(long)]
        templates: PathBuf,
        #[arg(long)]
        models_dir: PathBuf,
    },
    /// Query a trained model by research-field id
    Predict {
        #[arg(long)]
        approach: Approach,
        /// Research-field id to look up
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 20)]
        n_results: usize,
        #[arg(long)]
        models_dir: PathBuf,
    },
    /// Score a trained model against a test set
    Evaluate {
        #[arg(long)]
        approach: Approach,
        #[arg(long)]
        test_set: PathBuf,
        #[arg(long)]
        models_dir: PathBuf,
    },
    /// Print corpus statistics
    Stats {
        #[arg(long)]
        dataset: PathBuf,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Approach {
    Baseline,
    BaselineFull,
}

impl Approach {
    fn variant(self) -> BaselineVariant {
        match self {
            Approach::Baseline => BaselineVariant::Standard,
            Approach::BaselineFull => BaselineVariant::Full,
        }
    }

    fn result_suffix(self) -> &'static str {
        match self {
            Approach::Baseline => "_baseline_evaluated",
            Approach::BaselineFull => "_baseline_full_evaluated",
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();

    match Cli::parse().command {
        Command::Split {
            dataset,
            out_dir,
            seed,
        } => run_split(&dataset, &out_dir, seed),
        Command::Analyze { dataset, out_dir } => run_analyze(&dataset, &out_dir),
        Command::Premises { dataset, out } => run_premises(&dataset, &out),
        Command::Train {
            approach,
            templates,
            models_dir,
        } => run_train(approach, &templates, &models_dir),
        Command::Predict {
            approach,
            query,
            n_results,
            models_dir,
        } => run_predict(approach, &query, n_results, &models_dir),
        Command::Evaluate {
            approach,
            test_set,
            models_dir,
        } => run_evaluate(approach, &test_set, &models_dir),
        Command::Stats { dataset } => run_stats(&dataset),
    }
}

fn load_corpus(path: &Path) -> Result<Corpus> {
    read_json(path).with_context(|| format!("failed to read corpus from {}", path.display()))
}

fn run_split(dataset: &Path, out_dir: &Path, seed: u64) -> Result<()> {
    let corpus = load_corpus(dataset)?;
    let config = SplitConfig {
        seed,
        ..SplitConfig::default()
    };

    let output = run_split_pipeline(&corpus, &config, out_dir)
        .with_context(|| format!("split pipeline failed for {}", dataset.display()))?;

    println!("{}", serde_json::to_string_pretty(&output.statistics)?);
    Ok(())
}

fn run_analyze(dataset: &Path, out_dir: &Path) -> Result<()> {
    let corpus = load_corpus(dataset)?;
    let analysis = analyze(&corpus);
    let out = out_dir.join("dataset_analyzed.json");
    write_json(&analysis, &out)?;
    println!("analysis written to {}", out.display());
    Ok(())
}

fn run_premises(dataset: &Path, out: &Path) -> Result<()> {
    let corpus = load_corpus(dataset)?;
    let premises = extract_premises(&corpus.templates);
    write_json(&serde_json::json!({ "templates": premises }), out)?;
    println!("{} premises written to {}", premises.len(), out.display());
    Ok(())
}

fn run_train(approach: Approach, templates: &Path, models_dir: &Path) -> Result<()> {
    let corpus = load_corpus(templates)?;
    let model = BaselineModel::build(&corpus.templates);
    model.save(models_dir, approach.variant())?;

    let info = model.info(&corpus.templates);
    println!("{}", serde_json::to_string_pretty(&info)?);
    Ok(())
}

fn run_predict(approach: Approach, query: &str, n_results: usize, models_dir: &Path) -> Result<()> {
    let model = BaselineModel::load(models_dir, approach.variant())
        .with_context(|| format!("no {:?} model under {}", approach, models_dir.display()))?;

    let recommendations = model.recommend_field(query, n_results);
    println!("{}", serde_json::to_string_pretty(&recommendations)?);
    Ok(())
}

fn run_evaluate(approach: Approach, test_set: &Path, models_dir: &Path) -> Result<()> {
    let subsets: SplitSubsets = read_json(test_set)
        .with_context(|| format!("failed to read test set from {}", test_set.display()))?;
    let model = BaselineModel::load(models_dir, approach.variant())
        .with_context(|| format!("no {:?} model under {}", approach, models_dir.display()))?;

    let evaluation = evaluate(&subsets, &model);
    let out = extend_path(test_set, approach.result_suffix());
    write_json(
        &EvaluatedTestSet {
            subsets: &subsets,
            results: &evaluation.results,
            metrics: &evaluation.metrics,
        },
        &out,
    )?;

    println!("{}", serde_json::to_string_pretty(&evaluation.metrics)?);
    println!("evaluated test set written to {}", out.display());
    Ok(())
}

fn run_stats(dataset: &Path) -> Result<()> {
    let corpus = load_corpus(dataset)?;
    let statistics = DatasetStatistics::from_corpus(&corpus);
    println!("{}", serde_json::to_string_pretty(&statistics)?);
    Ok(())
}
