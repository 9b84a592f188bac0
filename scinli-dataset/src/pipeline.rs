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

//! End-to-end split pipeline.
//!
//! Splits the corpus, then writes in two phases: the raw splits as built, an
//! index-ready normalized training set, and finally the carved, reduced and
//! normalized subsets that training and evaluation consume. The intermediate
//! files stay on disk so a run can be inspected mid-way.

use crate::carve::carve_validation_set;
use crate::postprocess::{post_process, reduce_test_set};
use crate::split::{split_dataset, SplitConfig, SplitError, SplitOutcome, SplitReport};
use crate::stats::{DatasetStatistics, SubsetStatistics};
use rand::rngs::StdRng;
use rand::SeedableRng;
use scinli_core::{write_json, Corpus, SplitSubsets, StoreError, TextNormalizer};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;

pub const TRAINING_SET_FILE: &str = "training_set.json";
pub const TEST_SET_FILE: &str = "test_set.json";
pub const VALIDATION_SET_FILE: &str = "validation_set.json";
/// Normalized training set before the validation carve, the shape an external
/// index ingests.
pub const INDEX_TRAINING_SET_FILE: &str = "es_training_set.json";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Split(#[from] SplitError),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineStatistics {
    pub dataset: DatasetStatistics,
    pub training: SubsetStatistics,
    pub test: SubsetStatistics,
    pub validation: SubsetStatistics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineOutput {
    pub training: SplitSubsets,
    pub test: SplitSubsets,
    pub validation: SplitSubsets,
    pub report: SplitReport,
    pub statistics: PipelineStatistics,
}

/// Run split, carve, reduction and post-processing, persisting every phase
/// under `out_dir`.
pub fn run_split_pipeline(
    corpus: &Corpus,
    config: &SplitConfig,
    out_dir: &Path,
) -> Result<PipelineOutput, PipelineError> {
    let mut rng = StdRng::seed_from_u64(config.seed);

    let SplitOutcome {
        mut training,
        test,
        report,
    } = split_dataset(corpus, config, &mut rng)?;

    // Phase one: the splits exactly as built, before any text cleanup.
    write_json(&training, &out_dir.join(TRAINING_SET_FILE))?;
    write_json(&test, &out_dir.join(TEST_SET_FILE))?;

    let normalizer = TextNormalizer::new();
    post_process(&mut training, &normalizer);
    write_json(&training, &out_dir.join(INDEX_TRAINING_SET_FILE))?;

    let mut validation = carve_validation_set(&mut training, config, &mut rng);
    let mut test = reduce_test_set(test);

    let statistics = PipelineStatistics {
        dataset: DatasetStatistics::from_corpus(corpus),
        training: SubsetStatistics::of(&training),
        test: SubsetStatistics::of(&test),
        validation: SubsetStatistics::of(&validation),
    };
    statistics.dataset.log();
    statistics.training.log("training");
    statistics.test.log("test");
    statistics.validation.log("validation");

    // Phase two: final subsets. Training and validation are already
    // normalized; running them through again changes nothing.
    post_process(&mut training, &normalizer);
    post_process(&mut test, &normalizer);
    post_process(&mut validation, &normalizer);

    write_json(&training, &out_dir.join(TRAINING_SET_FILE))?;
    write_json(&test, &out_dir.join(TEST_SET_FILE))?;
    write_json(&validation, &out_dir.join(VALIDATION_SET_FILE))?;

    info!(out_dir = %out_dir.display(), "split pipeline finished");

    Ok(PipelineOutput {
        training,
        test,
        validation,
        report,
        statistics,
    })
}
