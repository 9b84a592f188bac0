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

//! Labeled NLI instances and the per-split containers they live in.

use crate::builder::{hypothesis_text, premise_hypothesis, premise_text};
use crate::corpus::{NeutralPaper, Paper, ResearchField, Template};
use crate::text::sequence_of;
use serde::{Deserialize, Serialize};

/// Instance label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
    Entailment,
    Contradiction,
    Neutral,
}

impl Target {
    /// All targets, in the order subsets are built and persisted.
    pub const ALL: [Target; 3] = [Target::Entailment, Target::Contradiction, Target::Neutral];

    pub fn as_str(&self) -> &'static str {
        match self {
            Target::Entailment => "entailment",
            Target::Contradiction => "contradiction",
            Target::Neutral => "neutral",
        }
    }
}

/// Composite key for a (template, paper) pairing.
pub fn pair_instance_id(template_id: &str, paper_id: &str) -> String {
    format!("{template_id}x{paper_id}")
}

/// The unit produced for training and evaluation.
///
/// `template_id` is the template whose premise is paired with the hypothesis;
/// it is absent on neutral instances. `correct_template_id` exists only on
/// contradictions and records the paper's true template, distinguishing the
/// deliberately wrong pairing from the true label; it stays absent for
/// contradictions synthesized from neutral papers, which have no true
/// template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub instance_id: String,
    pub template_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_template_id: Option<String>,
    pub paper_id: String,
    pub premise: Option<String>,
    pub hypothesis: String,
    pub sequence: String,
    pub target: Target,
    pub research_field: ResearchField,
}

impl Instance {
    /// A (template, paper) pair where the paper is known to use the template.
    pub fn entailment(template: &Template, paper: &Paper) -> Self {
        let (premise, hypothesis) = premise_hypothesis(template, paper);
        let sequence = sequence_of(Some(&premise), &hypothesis);

        Self {
            instance_id: pair_instance_id(&template.id, &paper.id),
            template_id: Some(template.id.clone()),
            correct_template_id: None,
            paper_id: paper.id.clone(),
            premise: Some(premise),
            hypothesis,
            sequence,
            target: Target::Entailment,
            research_field: paper.research_field.clone(),
        }
    }

    /// A paper with no template pairing; the sequence is the hypothesis alone.
    pub fn neutral(paper: &NeutralPaper) -> Self {
        let hypothesis = hypothesis_text(&paper.label, &paper.abstract_text);
        let sequence = sequence_of(None, &hypothesis);

        Self {
            instance_id: paper.id.clone(),
            template_id: None,
            correct_template_id: None,
            paper_id: paper.id.clone(),
            premise: None,
            hypothesis,
            sequence,
            target: Target::Neutral,
            research_field: paper.research_field.clone(),
        }
    }

    /// A deliberately mismatched pairing: `premise_template`'s premise against
    /// a paper whose true template is `correct_template_id`.
    pub fn contradiction_from_paper(
        premise_template: &Template,
        paper: &Paper,
        correct_template_id: &str,
    ) -> Self {
        let (premise, hypothesis) = premise_hypothesis(premise_template, paper);
        let sequence = sequence_of(Some(&premise), &hypothesis);

        Self {
            instance_id: pair_instance_id(&premise_template.id, &paper.id),
            template_id: Some(premise_template.id.clone()),
            correct_template_id: Some(correct_template_id.to_string()),
            paper_id: paper.id.clone(),
            premise: Some(premise),
            hypothesis,
            sequence,
            target: Target::Contradiction,
            research_field: paper.research_field.clone(),
        }
    }

    /// A mismatched pairing whose hypothesis side is taken from an already
    /// built instance (a neutral, or a test entailment). The source's own
    /// template, if any, becomes the recorded correct template.
    pub fn contradiction_from_instance(premise_template: &Template, source: &Instance) -> Self {
        let premise = premise_text(premise_template);
        let sequence = sequence_of(Some(&premise), &source.hypothesis);

        Self {
            instance_id: pair_instance_id(&premise_template.id, &source.paper_id),
            template_id: Some(premise_template.id.clone()),
            correct_template_id: source.template_id.clone(),
            paper_id: source.paper_id.clone(),
            premise: Some(premise),
            hypothesis: source.hypothesis.clone(),
            sequence,
            target: Target::Contradiction,
            research_field: source.research_field.clone(),
        }
    }
}

/// One split of the dataset: the three ordered instance sequences that are
/// built by the splitter and persisted as a single JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SplitSubsets {
    #[serde(default)]
    pub entailments: Vec<Instance>,
    #[serde(default)]
    pub contradictions: Vec<Instance>,
    #[serde(default)]
    pub neutrals: Vec<Instance>,
}

impl SplitSubsets {
    pub fn get(&self, target: Target) -> &Vec<Instance> {
        match target {
            Target::Entailment => &self.entailments,
            Target::Contradiction => &self.contradictions,
            Target::Neutral => &self.neutrals,
        }
    }

    pub fn get_mut(&mut self, target: Target) -> &mut Vec<Instance> {
        match target {
            Target::Entailment => &mut self.entailments,
            Target::Contradiction => &mut self.contradictions,
            Target::Neutral => &mut self.neutrals,
        }
    }

    pub fn len(&self) -> usize {
        self.entailments.len() + self.contradictions.len() + self.neutrals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All instances in persisted order: entailments, contradictions, neutrals.
    pub fn iter(&self) -> impl Iterator<Item = &Instance> {
        self.entailments
            .iter()
            .chain(self.contradictions.iter())
            .chain(self.neutrals.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Instance> {
        self.entailments
            .iter_mut()
            .chain(self.contradictions.iter_mut())
            .chain(self.neutrals.iter_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field() -> ResearchField {
        ResearchField {
            id: "F1".into(),
            label: "CS".into(),
        }
    }

    fn template() -> Template {
        Template {
            id: "T1".into(),
            label: "evaluation".into(),
            research_fields: vec![field()],
            properties: vec!["metric".into()],
            papers: vec![],
        }
    }

    fn paper(id: &str) -> Paper {
        Paper {
            id: id.to_string(),
            label: "A study".into(),
            doi: None,
            research_field: field(),
            abstract_text: "we measure".into(),
        }
    }

    #[test]
    fn entailment_instance_shape() {
        let inst = Instance::entailment(&template(), &paper("P1"));

        assert_eq!(inst.instance_id, "T1xP1");
        assert_eq!(inst.template_id.as_deref(), Some("T1"));
        assert!(inst.correct_template_id.is_none());
        assert_eq!(inst.premise.as_deref(), Some("evaluation metric"));
        assert_eq!(inst.sequence, "evaluation metric A study we measure");
        assert_eq!(inst.target, Target::Entailment);
    }

    #[test]
    fn neutral_instance_uses_paper_id_and_no_premise() {
        let np = NeutralPaper {
            id: "N1".into(),
            label: "A survey".into(),
            doi: None,
            research_field: field(),
            abstract_text: "broad overview".into(),
        };
        let inst = Instance::neutral(&np);

        assert_eq!(inst.instance_id, "N1");
        assert_eq!(inst.paper_id, "N1");
        assert!(inst.template_id.is_none());
        assert!(inst.premise.is_none());
        assert_eq!(inst.sequence, inst.hypothesis);
        assert_eq!(inst.target, Target::Neutral);
    }

    #[test]
    fn contradiction_from_instance_inherits_hypothesis_and_template() {
        let entailment = Instance::entailment(&template(), &paper("P1"));
        let other = Template {
            id: "T2".into(),
            label: "survey".into(),
            research_fields: vec![],
            properties: vec![],
            papers: vec![],
        };

        let contradiction = Instance::contradiction_from_instance(&other, &entailment);
        assert_eq!(contradiction.instance_id, "T2xP1");
        assert_eq!(contradiction.template_id.as_deref(), Some("T2"));
        assert_eq!(contradiction.correct_template_id.as_deref(), Some("T1"));
        assert_eq!(contradiction.hypothesis, entailment.hypothesis);
        assert_eq!(contradiction.target, Target::Contradiction);
    }

    #[test]
    fn correct_template_id_absent_on_the_wire_when_missing() {
        let inst = Instance::entailment(&template(), &paper("P1"));
        let json = serde_json::to_value(&inst).unwrap();
        assert!(json.get("correct_template_id").is_none());
        // Neutral-side fields serialize as explicit nulls, not omissions.
        let neutral = Instance::neutral(&NeutralPaper {
            id: "N1".into(),
            label: "x".into(),
            doi: None,
            research_field: field(),
            abstract_text: String::new(),
        });
        let json = serde_json::to_value(&neutral).unwrap();
        assert!(json["template_id"].is_null());
        assert!(json["premise"].is_null());
    }

    #[test]
    fn subsets_iterate_in_persisted_order() {
        let mut subsets = SplitSubsets::default();
        subsets.entailments.push(Instance::entailment(&template(), &paper("P1")));
        subsets.neutrals.push(Instance::neutral(&NeutralPaper {
            id: "N1".into(),
            label: "x".into(),
            doi: None,
            research_field: field(),
            abstract_text: String::new(),
        }));

        let ids: Vec<_> = subsets.iter().map(|i| i.instance_id.as_str()).collect();
        assert_eq!(ids, vec!["T1xP1", "N1"]);
        assert_eq!(subsets.len(), 2);
        assert!(!subsets.is_empty());
    }
}
