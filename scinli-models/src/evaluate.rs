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

//! Evaluation of a recommender against a test set.
//!
//! Every instance (entailments, contradictions, neutrals) is scored by its
//! top recommendation: a hit when the recommended template equals the
//! instance's paired template. A recommender that answers "no template" hits
//! on neutral instances and misses everywhere else. Accuracy additionally
//! credits how much of the template space an answer rules out. All ratios
//! with a zero denominator are defined as 0.0.

use crate::recommend::{Recommendation, TemplateRecommender, DEFAULT_TOP_K};
use scinli_core::{Instance, SplitSubsets};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMetrics {
    pub label: String,
    pub tp: usize,
    pub fp: usize,
    pub n_instances: usize,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub accuracy: f64,
    pub precision: f64,
    pub recall: f64,
    pub f1: f64,
    pub research_fields: BTreeMap<String, FieldMetrics>,
}

/// Per-instance outcome, kept so an evaluated test set can be inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceOutcome {
    pub instance_id: String,
    pub recommendations: Vec<Recommendation>,
    pub hit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub metrics: Metrics,
    pub results: Vec<InstanceOutcome>,
}

/// The artifact written next to an evaluated test set.
#[derive(Debug, Serialize)]
pub struct EvaluatedTestSet<'a> {
    #[serde(flatten)]
    pub subsets: &'a SplitSubsets,
    pub results: &'a [InstanceOutcome],
    pub metrics: &'a Metrics,
}

/// Score `recommender` on every instance of the test set.
pub fn evaluate(test: &SplitSubsets, recommender: &dyn TemplateRecommender) -> Evaluation {
    // The template space includes the implicit neutral class.
    let n_templates = test
        .entailments
        .iter()
        .filter_map(|i| i.template_id.as_deref())
        .collect::<HashSet<_>>()
        .len()
        + 1;

    let n_instances = test.len();
    let mut accuracy_credit = 0usize;
    let mut tp = 0usize;
    let mut fp = 0usize;
    let mut fields: BTreeMap<String, FieldCounts> = BTreeMap::new();
    let mut results = Vec::with_capacity(n_instances);

    for instance in test.iter() {
        let recommendations = recommender.recommend(instance, DEFAULT_TOP_K);
        let considered = &recommendations[..recommendations.len().min(1)];
        let hit = considered
            .iter()
            .any(|r| r.template_id == instance.template_id);

        let field = fields
            .entry(instance.research_field.id.clone())
            .or_insert_with(|| FieldCounts {
                label: instance.research_field.label.clone(),
                tp: 0,
                fp: 0,
                n_instances: 0,
            });
        field.n_instances += 1;

        if hit {
            accuracy_credit += n_templates - considered.len() + 1;
            tp += 1;
            fp += considered.len() - 1;
            field.tp += 1;
            field.fp += considered.len() - 1;
        } else {
            accuracy_credit += n_templates - considered.len();
            fp += considered.len();
            field.fp += considered.len();
        }

        debug!(
            instance_id = instance.instance_id.as_str(),
            hit, "instance evaluated"
        );
        results.push(InstanceOutcome {
            instance_id: instance.instance_id.clone(),
            recommendations,
            hit,
        });
    }

    let research_fields = fields
        .into_iter()
        .map(|(id, counts)| {
            let precision = ratio(counts.tp, counts.tp + counts.fp);
            let recall = ratio(counts.tp, counts.n_instances);
            (
                id,
                FieldMetrics {
                    label: counts.label,
                    tp: counts.tp,
                    fp: counts.fp,
                    n_instances: counts.n_instances,
                    precision,
                    recall,
                    f1: f_measure(precision, recall),
                },
            )
        })
        .collect();

    let precision = ratio(tp, tp + fp);
    let recall = ratio(tp, n_instances);

    Evaluation {
        metrics: Metrics {
            accuracy: ratio(accuracy_credit, n_instances * n_templates),
            precision,
            recall,
            f1: f_measure(precision, recall),
            research_fields,
        },
        results,
    }
}

struct FieldCounts {
    label: String,
    tp: usize,
    fp: usize,
    n_instances: usize,
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

fn f_measure(precision: f64, recall: f64) -> f64 {
    if precision + recall == 0.0 {
        0.0
    } else {
        (2.0 * precision * recall) / (precision + recall)
    }
}
