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

//! Corpus model
//!
//! In-memory representation of the fetched knowledge-graph data: templates
//! with their nested papers, plus the pool of neutral papers that use no
//! template. The fetch stage itself lives outside this repository; a corpus
//! arrives as a single JSON document with `templates` and `neutral_papers`.
//!
//! Types are permissive on input: optional fields default, a template with an
//! empty paper list deserializes fine and simply contributes nothing.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A categorical research-field tag attached to papers and templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchField {
    pub id: String,
    pub label: String,
}

/// A paper that instantiates at least one template.
///
/// A paper may appear under multiple templates (one per contribution), but a
/// (template, paper) pair is unique within the corpus.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub doi: Option<String>,
    pub research_field: ResearchField,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
}

/// A contribution template together with the papers that use it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub research_fields: Vec<ResearchField>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub papers: Vec<Paper>,
}

/// A paper with no template attached; sampled separately so the dataset
/// contains paper text with the `neutral` label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeutralPaper {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub doi: Option<String>,
    pub research_field: ResearchField,
    #[serde(rename = "abstract", default)]
    pub abstract_text: String,
}

/// The full corpus produced by the fetch stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Corpus {
    #[serde(default)]
    pub templates: Vec<Template>,
    #[serde(default)]
    pub neutral_papers: Vec<NeutralPaper>,
}

impl Corpus {
    /// Number of (template, paper) pairs, with multiplicity. This is the
    /// denominator for every training-size target.
    pub fn templated_paper_count(&self) -> usize {
        self.templates.iter().map(|t| t.papers.len()).sum()
    }

    pub fn template_by_id(&self, template_id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == template_id)
    }

    /// Distinct research fields across all templated papers.
    pub fn templated_research_field_count(&self) -> usize {
        self.templates
            .iter()
            .flat_map(|t| t.papers.iter())
            .map(|p| p.research_field.id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    /// Distinct research fields across the neutral pool.
    pub fn neutral_research_field_count(&self) -> usize {
        self.neutral_papers
            .iter()
            .map(|p| p.research_field.id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(id: &str) -> ResearchField {
        ResearchField {
            id: id.to_string(),
            label: format!("field {id}"),
        }
    }

    fn paper(id: &str, field_id: &str) -> Paper {
        Paper {
            id: id.to_string(),
            label: format!("paper {id}"),
            doi: None,
            research_field: field(field_id),
            abstract_text: "an abstract".to_string(),
        }
    }

    #[test]
    fn templated_paper_count_includes_multiplicity() {
        let corpus = Corpus {
            templates: vec![
                Template {
                    id: "T1".into(),
                    label: "t1".into(),
                    research_fields: vec![],
                    properties: vec![],
                    papers: vec![paper("P1", "F1"), paper("P2", "F1")],
                },
                Template {
                    id: "T2".into(),
                    label: "t2".into(),
                    research_fields: vec![],
                    properties: vec![],
                    // P1 contributes to both templates and is counted twice
                    papers: vec![paper("P1", "F1")],
                },
            ],
            neutral_papers: vec![],
        };

        assert_eq!(corpus.templated_paper_count(), 3);
        assert_eq!(corpus.templated_research_field_count(), 1);
    }

    #[test]
    fn permissive_deserialization() {
        // No properties, no papers, no doi, no neutral pool.
        let json = r#"{
            "templates": [
                {
                    "id": "T1",
                    "label": "measurement",
                    "research_fields": [{"id": "F1", "label": "CS"}]
                }
            ]
        }"#;

        let corpus: Corpus = serde_json::from_str(json).unwrap();
        assert_eq!(corpus.templates.len(), 1);
        assert!(corpus.templates[0].papers.is_empty());
        assert!(corpus.templates[0].properties.is_empty());
        assert_eq!(corpus.templated_paper_count(), 0);
        assert!(corpus.neutral_papers.is_empty());
    }

    #[test]
    fn abstract_round_trips_under_wire_name() {
        let p = paper("P1", "F1");
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["abstract"], "an abstract");
        let back: Paper = serde_json::from_value(json).unwrap();
        assert_eq!(back, p);
    }

    #[test]
    fn template_lookup() {
        let corpus = Corpus {
            templates: vec![Template {
                id: "T9".into(),
                label: "t9".into(),
                research_fields: vec![],
                properties: vec![],
                papers: vec![],
            }],
            neutral_papers: vec![],
        };

        assert!(corpus.template_by_id("T9").is_some());
        assert!(corpus.template_by_id("T10").is_none());
    }
}
