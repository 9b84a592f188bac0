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

//! Static research-field baseline.
//!
//! The simplest possible recommender: a lookup from a paper's research field
//! to every template declared for that field. Built once from a template
//! list, persisted as a plain JSON map, and queried by field id. The `full`
//! variant is the same model built from the complete template inventory
//! instead of the split templates.

use crate::recommend::{Recommendation, TemplateRecommender};
use scinli_core::{read_json, write_json, Instance, StoreError, Template};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Which template list the baseline was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BaselineVariant {
    /// Templates that carry papers in the dataset.
    Standard,
    /// The complete template inventory, papers or not.
    Full,
}

impl BaselineVariant {
    pub fn file_name(&self) -> &'static str {
        match self {
            BaselineVariant::Standard => "baseline.json",
            BaselineVariant::Full => "baseline_full.json",
        }
    }
}

/// Summary returned by a build, mirroring what gets logged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineInfo {
    pub n_research_fields: usize,
    pub n_templates: usize,
}

/// Research-field id to template ids, in template declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BaselineModel {
    map: BTreeMap<String, Vec<String>>,
}

impl BaselineModel {
    /// Build the lookup from template-level research fields. Fields without
    /// an id contribute nothing.
    pub fn build(templates: &[Template]) -> Self {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();

        for template in templates {
            for research_field in &template.research_fields {
                if research_field.id.is_empty() {
                    continue;
                }
                map.entry(research_field.id.clone())
                    .or_default()
                    .push(template.id.clone());
            }
        }

        Self { map }
    }

    pub fn info(&self, templates: &[Template]) -> BaselineInfo {
        BaselineInfo {
            n_research_fields: self.map.len(),
            n_templates: templates.len(),
        }
    }

    pub fn save(&self, models_dir: &Path, variant: BaselineVariant) -> Result<(), ModelError> {
        let path = models_dir.join(variant.file_name());
        write_json(self, &path)?;
        info!(path = %path.display(), "baseline model stored");
        Ok(())
    }

    pub fn load(models_dir: &Path, variant: BaselineVariant) -> Result<Self, ModelError> {
        Ok(read_json(&models_dir.join(variant.file_name()))?)
    }

    /// Templates stored for a research field. An unknown field yields the
    /// single no-template candidate so callers always see at least one
    /// recommendation to score against.
    pub fn recommend_field(&self, field_id: &str, top_k: usize) -> Vec<Recommendation> {
        match self.map.get(field_id) {
            Some(template_ids) => template_ids
                .iter()
                .take(top_k)
                .map(|id| Recommendation::new(id.as_str()))
                .collect(),
            None => vec![Recommendation::none()],
        }
    }
}

impl TemplateRecommender for BaselineModel {
    fn recommend(&self, instance: &Instance, top_k: usize) -> Vec<Recommendation> {
        self.recommend_field(&instance.research_field.id, top_k)
    }
}
