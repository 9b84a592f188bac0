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

//! SciNLI Models
//!
//! Template-recommendation models buildable from the dataset alone, the
//! recommender trait external services plug into, and the shared evaluation
//! protocol.

pub mod baseline;
pub mod evaluate;
pub mod recommend;

pub use baseline::{BaselineInfo, BaselineModel, BaselineVariant, ModelError};
pub use evaluate::{evaluate, EvaluatedTestSet, Evaluation, FieldMetrics, InstanceOutcome, Metrics};
pub use recommend::{Recommendation, TemplateRecommender, DEFAULT_TOP_K};
