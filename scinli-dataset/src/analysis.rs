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

//! Research-field groupings of the corpus.
//!
//! Aggregates templates and papers per research field, the raw material for
//! coverage plots and per-field evaluation. Maps are ordered by field id so
//! the persisted artifact is stable across runs.

use scinli_core::{uri_to_id, Corpus};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A template's papers split into the ones inside a given research field and
/// the rest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePaperPartition {
    pub template_id: String,
    pub papers: Vec<String>,
    pub other_papers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTemplates {
    pub label: String,
    pub templates: Vec<TemplatePaperPartition>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPapers {
    pub label: String,
    pub papers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplatePapers {
    pub id: String,
    pub papers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldTemplatePapers {
    pub label: String,
    pub templates: Vec<TemplatePapers>,
}

/// All research-field groupings, persisted as one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetAnalysis {
    pub templates_research_fields: BTreeMap<String, FieldTemplates>,
    pub papers_research_fields: BTreeMap<String, FieldPapers>,
    pub papers_research_fields_and_their_templates: BTreeMap<String, FieldTemplatePapers>,
    pub neutral_papers_research_fields: BTreeMap<String, FieldPapers>,
    pub all_papers_research_fields: BTreeMap<String, FieldPapers>,
}

pub fn analyze(corpus: &Corpus) -> DatasetAnalysis {
    let papers_research_fields = papers_by_research_field(corpus);
    let neutral_papers_research_fields = neutral_papers_by_research_field(corpus);

    DatasetAnalysis {
        templates_research_fields: templates_by_research_field(corpus),
        papers_research_fields_and_their_templates: papers_by_field_and_template(
            corpus,
            &papers_research_fields,
        ),
        all_papers_research_fields: merge_all_papers(
            &papers_research_fields,
            &neutral_papers_research_fields,
        ),
        papers_research_fields,
        neutral_papers_research_fields,
    }
}

/// Template-level research fields: every template appears under every field,
/// with its papers partitioned into in-field and out-of-field ids. Fields
/// without an id are dropped.
fn templates_by_research_field(corpus: &Corpus) -> BTreeMap<String, FieldTemplates> {
    let mut fields: BTreeMap<String, FieldTemplates> = BTreeMap::new();

    for template in &corpus.templates {
        for research_field in &template.research_fields {
            if research_field.id.is_empty() {
                continue;
            }
            fields.entry(research_field.id.clone()).or_insert_with(|| FieldTemplates {
                label: research_field.label.clone(),
                templates: Vec::new(),
            });
        }
    }

    for (field_id, entry) in fields.iter_mut() {
        for template in &corpus.templates {
            let belongs = template.research_fields.iter().any(|f| f.id == *field_id);
            let partition = if belongs {
                let mut papers = Vec::new();
                let mut other_papers = Vec::new();
                for paper in &template.papers {
                    if paper.research_field.id == uri_to_id(field_id) {
                        papers.push(paper.id.clone());
                    } else {
                        other_papers.push(paper.id.clone());
                    }
                }
                TemplatePaperPartition {
                    template_id: template.id.clone(),
                    papers,
                    other_papers,
                }
            } else {
                TemplatePaperPartition {
                    template_id: template.id.clone(),
                    papers: Vec::new(),
                    other_papers: Vec::new(),
                }
            };
            entry.templates.push(partition);
        }
    }

    fields
}

fn papers_by_research_field(corpus: &Corpus) -> BTreeMap<String, FieldPapers> {
    let mut fields: BTreeMap<String, FieldPapers> = BTreeMap::new();

    for template in &corpus.templates {
        for paper in &template.papers {
            let entry = fields
                .entry(paper.research_field.id.clone())
                .or_insert_with(|| FieldPapers {
                    label: String::new(),
                    papers: Vec::new(),
                });
            entry.label = paper.research_field.label.clone();
            entry.papers.push(paper.id.clone());
        }
    }

    fields
}

fn neutral_papers_by_research_field(corpus: &Corpus) -> BTreeMap<String, FieldPapers> {
    let mut fields: BTreeMap<String, FieldPapers> = BTreeMap::new();

    for paper in &corpus.neutral_papers {
        let entry = fields
            .entry(paper.research_field.id.clone())
            .or_insert_with(|| FieldPapers {
                label: String::new(),
                papers: Vec::new(),
            });
        entry.label = paper.research_field.label.clone();
        entry.papers.push(paper.id.clone());
    }

    fields
}

/// Per field, every template with the papers it holds in that field.
fn papers_by_field_and_template(
    corpus: &Corpus,
    papers_research_fields: &BTreeMap<String, FieldPapers>,
) -> BTreeMap<String, FieldTemplatePapers> {
    let mut fields: BTreeMap<String, FieldTemplatePapers> = BTreeMap::new();

    for (field_id, field) in papers_research_fields {
        let templates = corpus
            .templates
            .iter()
            .map(|template| TemplatePapers {
                id: template.id.clone(),
                papers: template
                    .papers
                    .iter()
                    .filter(|p| p.research_field.id == *field_id)
                    .map(|p| p.id.clone())
                    .collect(),
            })
            .collect();

        fields.insert(
            field_id.clone(),
            FieldTemplatePapers {
                label: field.label.clone(),
                templates,
            },
        );
    }

    fields
}

/// Union of templated and neutral groupings, keyed by the fields the neutral
/// pool covers; templated papers come first within a shared field.
fn merge_all_papers(
    papers: &BTreeMap<String, FieldPapers>,
    neutral_papers: &BTreeMap<String, FieldPapers>,
) -> BTreeMap<String, FieldPapers> {
    let mut fields: BTreeMap<String, FieldPapers> = BTreeMap::new();

    for (field_id, neutral_field) in neutral_papers {
        let mut merged = Vec::new();
        if let Some(templated) = papers.get(field_id) {
            merged.extend(templated.papers.iter().cloned());
        }
        merged.extend(neutral_field.papers.iter().cloned());

        fields.insert(
            field_id.clone(),
            FieldPapers {
                label: neutral_field.label.clone(),
                papers: merged,
            },
        );
    }

    fields
}
