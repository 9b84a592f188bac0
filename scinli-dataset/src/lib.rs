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

//! SciNLI Dataset
//!
//! Builds the NLI dataset out of a corpus: the constrained-random splitter,
//! the validation carver, text post-processing, and the research-field
//! aggregations used for corpus analysis.

pub mod analysis;
pub mod carve;
pub mod pipeline;
pub mod postprocess;
pub mod split;
pub mod stats;

pub use analysis::{analyze, DatasetAnalysis, FieldPapers, FieldTemplates};
pub use carve::carve_validation_set;
pub use pipeline::{
    run_split_pipeline, PipelineError, PipelineOutput, PipelineStatistics,
    INDEX_TRAINING_SET_FILE, TEST_SET_FILE, TRAINING_SET_FILE, VALIDATION_SET_FILE,
};
pub use postprocess::{post_process, reduce_test_set};
pub use split::{
    split_dataset, SplitConfig, SplitError, SplitOutcome, SplitReport, DEFAULT_SEED,
};
pub use stats::{DatasetStatistics, SubsetStatistics};
