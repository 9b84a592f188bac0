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

//! The recommendation seam.
//!
//! Everything that can rank templates for a paper sits behind
//! [`TemplateRecommender`]: the in-repo research-field baseline, or external
//! services (text index, fine-tuned classifier) adapted from outside.

use scinli_core::Instance;
use serde::{Deserialize, Serialize};

/// Default number of candidates requested from a recommender.
pub const DEFAULT_TOP_K: usize = 20;

/// One ranked candidate. `template_id` is `None` when a recommender wants to
/// state "no template fits" explicitly, which the evaluation scores as a hit
/// on neutral instances.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl Recommendation {
    pub fn new(template_id: impl Into<String>) -> Self {
        Self {
            template_id: Some(template_id.into()),
            score: None,
        }
    }

    /// The explicit no-template candidate.
    pub fn none() -> Self {
        Self {
            template_id: None,
            score: None,
        }
    }
}

/// A model that ranks templates for an NLI instance.
pub trait TemplateRecommender {
    fn recommend(&self, instance: &Instance, top_k: usize) -> Vec<Recommendation>;
}
