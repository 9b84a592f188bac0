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

//! Standalone premise records, persisted alongside the corpus so downstream
//! indexing services can ingest template text without the paper payload.

use crate::builder::premise_text;
use crate::corpus::Template;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatePremise {
    pub id: String,
    pub label: String,
    pub premise: String,
}

pub fn extract_premises(templates: &[Template]) -> Vec<TemplatePremise> {
    templates
        .iter()
        .map(|template| TemplatePremise {
            id: template.id.clone(),
            label: template.label.clone(),
            premise: premise_text(template),
        })
        .collect()
}
