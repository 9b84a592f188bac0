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

//! Corpus and split bookkeeping counts, logged by the pipeline and exposed
//! to the CLI.

use scinli_core::{Corpus, SplitSubsets};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetStatistics {
    pub templates: usize,
    pub templated_papers: usize,
    pub neutral_papers: usize,
    pub templated_research_fields: usize,
    pub neutral_research_fields: usize,
}

impl DatasetStatistics {
    pub fn from_corpus(corpus: &Corpus) -> Self {
        Self {
            templates: corpus.templates.len(),
            templated_papers: corpus.templated_paper_count(),
            neutral_papers: corpus.neutral_papers.len(),
            templated_research_fields: corpus.templated_research_field_count(),
            neutral_research_fields: corpus.neutral_research_field_count(),
        }
    }

    pub fn log(&self) {
        info!(
            templates = self.templates,
            templated_papers = self.templated_papers,
            neutral_papers = self.neutral_papers,
            templated_research_fields = self.templated_research_fields,
            neutral_research_fields = self.neutral_research_fields,
            "dataset"
        );
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsetStatistics {
    pub entailments: usize,
    pub contradictions: usize,
    pub neutrals: usize,
    pub total: usize,
}

impl SubsetStatistics {
    pub fn of(subsets: &SplitSubsets) -> Self {
        Self {
            entailments: subsets.entailments.len(),
            contradictions: subsets.contradictions.len(),
            neutrals: subsets.neutrals.len(),
            total: subsets.len(),
        }
    }

    pub fn log(&self, name: &str) {
        info!(
            set = name,
            entailments = self.entailments,
            contradictions = self.contradictions,
            neutrals = self.neutrals,
            total = self.total,
            "instances"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scinli_core::{NeutralPaper, Paper, ResearchField, Template};

    #[test]
    fn counts_distinct_research_fields() {
        let field = |id: &str| ResearchField {
            id: id.into(),
            label: id.into(),
        };
        let paper = |id: &str, f: &str| Paper {
            id: id.into(),
            label: id.into(),
            doi: None,
            research_field: field(f),
            abstract_text: "a".into(),
        };

        let corpus = Corpus {
            templates: vec![Template {
                id: "T1".into(),
                label: "t".into(),
                research_fields: vec![],
                properties: vec![],
                papers: vec![paper("P1", "F1"), paper("P2", "F1"), paper("P3", "F2")],
            }],
            neutral_papers: vec![NeutralPaper {
                id: "N1".into(),
                label: "n".into(),
                doi: None,
                research_field: field("F3"),
                abstract_text: "a".into(),
            }],
        };

        let stats = DatasetStatistics::from_corpus(&corpus);
        assert_eq!(stats.templates, 1);
        assert_eq!(stats.templated_papers, 3);
        assert_eq!(stats.neutral_papers, 1);
        assert_eq!(stats.templated_research_fields, 2);
        assert_eq!(stats.neutral_research_fields, 1);
    }
}
