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

//! Dataset splitter.
//!
//! Partitions templated papers, neutral papers, and synthesized contradictions
//! into disjoint training and test sets by constrained random sampling with
//! rejection. The stages run in a fixed order; each one consumes and extends
//! the exclusion sets built by the stages before it, so the order is
//! load-bearing:
//!
//! 1. training entailments (random, with a per-template reserve)
//! 2. test entailments (deterministic pass over everything left)
//! 3. training neutrals, then test neutrals (deterministic pool walks)
//! 4. training contradictions (random wrong pairings, entailment quota)
//! 5. neutral-based training contradictions (random wrong pairings)
//! 6. test contradictions (deterministic cross product against test templates)
//!
//! Uniqueness inside a split is enforced by checking an exclusion set and
//! rejecting the draw, never by deduplicating after insertion. Every random
//! loop is bounded: too many consecutive rejections fail the split with
//! [`SplitError::QuotaUnreachable`] instead of spinning forever.
//!
//! Sampling draws from a caller-supplied RNG in stage order, so the same
//! corpus and the same seed reproduce the same split byte for byte.

use rand::seq::SliceRandom;
use rand::Rng;
use scinli_core::{pair_instance_id, Corpus, Instance, SplitSubsets, Target};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 10;

/// Sampling thresholds and bounds for one split run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Training entailments target, as a fraction of all templated papers.
    pub training_entailments_ratio: f64,
    /// Training neutrals target, as a fraction of all templated papers
    /// (the same denominator as entailments, not the neutral-pool size).
    pub training_neutrals_ratio: f64,
    /// Contradictions per template, as a fraction of its training entailments.
    pub contradictions_per_entailment: f64,
    /// Pairing attempts per training neutral.
    pub contradictions_per_neutral: usize,
    /// Fraction of each training category carved out for validation.
    pub validation_ratio: f64,
    /// Papers a template keeps out of training so the test pass can still
    /// reach it.
    pub reserved_papers_per_template: usize,
    /// Consecutive rejections tolerated in any sampling loop before the
    /// split fails.
    pub max_rejections: usize,
    pub seed: u64,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            training_entailments_ratio: 0.8,
            training_neutrals_ratio: 0.8,
            contradictions_per_entailment: 0.4,
            contradictions_per_neutral: 4,
            validation_ratio: 0.1,
            reserved_papers_per_template: 1,
            max_rejections: 10_000,
            seed: DEFAULT_SEED,
        }
    }
}

#[derive(Debug, Error)]
pub enum SplitError {
    #[error(
        "{stage}: quota unreachable after {rejections} consecutive rejections \
         ({placed} placed, {needed} needed)"
    )]
    QuotaUnreachable {
        stage: &'static str,
        rejections: usize,
        placed: usize,
        needed: usize,
    },
}

/// Post-hoc invariant checks, recomputed strictly from the built instances.
///
/// `training_papers_unique` is informational: a paper anchoring several
/// templates legitimately appears in several training entailments. The other
/// checks must hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SplitReport {
    pub training_ids_unique: bool,
    pub test_ids_unique: bool,
    pub ids_disjoint: bool,
    pub entailment_papers_disjoint: bool,
    pub training_papers_unique: bool,
    pub test_papers_unique: bool,
}

impl SplitReport {
    pub fn is_consistent(&self) -> bool {
        self.training_ids_unique
            && self.test_ids_unique
            && self.ids_disjoint
            && self.entailment_papers_disjoint
            && self.test_papers_unique
    }

    fn log(&self) {
        info!(
            training_ids_unique = self.training_ids_unique,
            test_ids_unique = self.test_ids_unique,
            ids_disjoint = self.ids_disjoint,
            entailment_papers_disjoint = self.entailment_papers_disjoint,
            training_papers_unique = self.training_papers_unique,
            test_papers_unique = self.test_papers_unique,
            "split verification"
        );
        if !self.is_consistent() {
            warn!("split verification failed, sets are inconsistent");
        }
    }
}

/// The two splits plus their verification report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitOutcome {
    pub training: SplitSubsets,
    pub test: SplitSubsets,
    pub report: SplitReport,
}

/// Build the training and test splits from a corpus.
pub fn split_dataset<R: Rng>(
    corpus: &Corpus,
    config: &SplitConfig,
    rng: &mut R,
) -> Result<SplitOutcome, SplitError> {
    let n_papers = corpus.templated_paper_count();
    let mut training = SplitSubsets::default();
    let mut test = SplitSubsets::default();
    let mut training_ids: HashSet<String> = HashSet::new();
    let mut test_ids: HashSet<String> = HashSet::new();

    training_entailments(corpus, config, rng, &mut training, &mut training_ids, n_papers)?;
    let training_paper_ids: HashSet<String> = training
        .entailments
        .iter()
        .map(|i| i.paper_id.clone())
        .collect();
    test_entailments(corpus, &mut test, &mut test_ids, &training_ids, &training_paper_ids);

    training_neutrals(corpus, config, &mut training, &mut training_ids, n_papers);
    test_neutrals(corpus, &mut test, &mut test_ids, &training_ids);

    let test_paper_ids: HashSet<String> = test
        .entailments
        .iter()
        .map(|i| i.paper_id.clone())
        .collect();
    training_contradictions(corpus, config, rng, &mut training, &mut training_ids, &test_paper_ids)?;
    neutral_training_contradictions(
        corpus,
        config,
        rng,
        &mut training,
        &mut training_ids,
        &test_paper_ids,
    );

    test_contradictions(
        corpus,
        &mut test,
        &mut test_ids,
        &training_ids,
        &training_paper_ids,
        Target::Entailment,
    );
    test_contradictions(
        corpus,
        &mut test,
        &mut test_ids,
        &training_ids,
        &training_paper_ids,
        Target::Neutral,
    );

    let report = verify(&training, &test);
    report.log();

    Ok(SplitOutcome {
        training,
        test,
        report,
    })
}

/// Random (template, paper) draws until the training entailment target is hit.
///
/// A template already drawn at least once is skipped whenever accepting one
/// more of its papers would leave it with `reserved_papers_per_template` or
/// fewer unused papers, so the test pass always finds something left.
fn training_entailments<R: Rng>(
    corpus: &Corpus,
    config: &SplitConfig,
    rng: &mut R,
    training: &mut SplitSubsets,
    training_ids: &mut HashSet<String>,
    n_papers: usize,
) -> Result<(), SplitError> {
    let target = config.training_entailments_ratio * n_papers as f64;
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    let mut rejections = 0usize;

    while (training.entailments.len() as f64) < target {
        if rejections >= config.max_rejections {
            return Err(SplitError::QuotaUnreachable {
                stage: "training entailments",
                rejections,
                placed: training.entailments.len(),
                needed: target.ceil() as usize,
            });
        }

        let Some(template) = corpus.templates.choose(rng) else {
            rejections += 1;
            continue;
        };

        if let Some(&count) = occurrences.get(&template.id) {
            if template.papers.len().saturating_sub(count) <= config.reserved_papers_per_template {
                rejections += 1;
                continue;
            }
        }

        let Some(paper) = template.papers.choose(rng) else {
            // zero-paper template, contributes nothing
            rejections += 1;
            continue;
        };

        let instance_id = pair_instance_id(&template.id, &paper.id);
        if training_ids.contains(&instance_id) {
            rejections += 1;
            continue;
        }

        rejections = 0;
        training_ids.insert(instance_id);
        *occurrences.entry(template.id.clone()).or_insert(0) += 1;
        training.entailments.push(Instance::entailment(template, paper));
    }

    debug!(
        placed = training.entailments.len(),
        templates_used = occurrences.len(),
        "training entailments placed"
    );
    Ok(())
}

/// Deterministic pass over every (template, paper) pair in corpus order.
///
/// A pair enters the test set unless its instance was already drawn for
/// training, its paper was drawn for training, or its paper is already in the
/// test set from an earlier pair. Paper-level dedup applies only within the
/// test set.
fn test_entailments(
    corpus: &Corpus,
    test: &mut SplitSubsets,
    test_ids: &mut HashSet<String>,
    training_ids: &HashSet<String>,
    training_paper_ids: &HashSet<String>,
) {
    let mut test_paper_ids: HashSet<&str> = HashSet::new();

    for template in &corpus.templates {
        for paper in &template.papers {
            let instance_id = pair_instance_id(&template.id, &paper.id);

            if training_ids.contains(&instance_id)
                || training_paper_ids.contains(paper.id.as_str())
                || test_paper_ids.contains(paper.id.as_str())
            {
                continue;
            }

            test_ids.insert(instance_id);
            test_paper_ids.insert(&paper.id);
            test.entailments.push(Instance::entailment(template, paper));
        }
    }
}

/// Walk the neutral pool in corpus order until the training target is hit or
/// the pool runs out.
fn training_neutrals(
    corpus: &Corpus,
    config: &SplitConfig,
    training: &mut SplitSubsets,
    training_ids: &mut HashSet<String>,
    n_papers: usize,
) {
    let target = config.training_neutrals_ratio * n_papers as f64;

    for paper in &corpus.neutral_papers {
        if training.neutrals.len() as f64 >= target {
            break;
        }
        if training_ids.contains(&paper.id) {
            continue;
        }

        training_ids.insert(paper.id.clone());
        training.neutrals.push(Instance::neutral(paper));
    }
}

/// Every neutral paper not claimed by either split so far goes to test.
fn test_neutrals(
    corpus: &Corpus,
    test: &mut SplitSubsets,
    test_ids: &mut HashSet<String>,
    training_ids: &HashSet<String>,
) {
    for paper in &corpus.neutral_papers {
        if test_ids.contains(&paper.id) || training_ids.contains(&paper.id) {
            continue;
        }

        test_ids.insert(paper.id.clone());
        test.neutrals.push(Instance::neutral(paper));
    }
}

/// Synthesize wrong pairings for each template used in training entailments.
///
/// The per-template quota is proportional to how often the template occurs;
/// templates are processed in first-use order so a fixed seed replays the
/// same draws. The hypothesis paper must come from another template and must
/// not be reserved for the test entailment set.
fn training_contradictions<R: Rng>(
    corpus: &Corpus,
    config: &SplitConfig,
    rng: &mut R,
    training: &mut SplitSubsets,
    training_ids: &mut HashSet<String>,
    test_paper_ids: &HashSet<String>,
) -> Result<(), SplitError> {
    let mut order: Vec<String> = Vec::new();
    let mut occurrences: HashMap<String, usize> = HashMap::new();
    for instance in &training.entailments {
        if let Some(template_id) = instance.template_id.as_deref() {
            if !occurrences.contains_key(template_id) {
                order.push(template_id.to_string());
            }
            *occurrences.entry(template_id.to_string()).or_insert(0) += 1;
        }
    }

    for template_id in &order {
        let occurrence = occurrences[template_id.as_str()];
        let mut remaining =
            (occurrence as f64 * config.contradictions_per_entailment).ceil() as usize;

        let Some(premise_template) = corpus.template_by_id(template_id) else {
            debug!(template_id, "template missing from corpus, skipping its quota");
            continue;
        };

        let mut rejections = 0usize;
        while remaining > 0 {
            if rejections >= config.max_rejections {
                return Err(SplitError::QuotaUnreachable {
                    stage: "training contradictions",
                    rejections,
                    placed: training.contradictions.len(),
                    needed: remaining,
                });
            }

            let Some(source_template) = corpus.templates.choose(rng) else {
                rejections += 1;
                continue;
            };
            if source_template.id == *template_id {
                rejections += 1;
                continue;
            }
            let Some(paper) = source_template.papers.choose(rng) else {
                rejections += 1;
                continue;
            };

            let instance_id = pair_instance_id(template_id, &paper.id);
            if training_ids.contains(&instance_id) || test_paper_ids.contains(paper.id.as_str()) {
                rejections += 1;
                continue;
            }

            rejections = 0;
            training_ids.insert(instance_id);
            training.contradictions.push(Instance::contradiction_from_paper(
                premise_template,
                paper,
                &source_template.id,
            ));
            remaining -= 1;
        }
    }

    Ok(())
}

/// A fixed number of random template pairings per training neutral. A failed
/// attempt is consumed, not retried, so the loop is bounded by construction.
fn neutral_training_contradictions<R: Rng>(
    corpus: &Corpus,
    config: &SplitConfig,
    rng: &mut R,
    training: &mut SplitSubsets,
    training_ids: &mut HashSet<String>,
    test_paper_ids: &HashSet<String>,
) {
    let neutrals = &training.neutrals;
    let contradictions = &mut training.contradictions;

    for source in neutrals {
        for _ in 0..config.contradictions_per_neutral {
            let Some(template) = corpus.templates.choose(rng) else {
                continue;
            };

            let instance_id = pair_instance_id(&template.id, &source.paper_id);
            if training_ids.contains(&instance_id)
                || test_paper_ids.contains(source.paper_id.as_str())
            {
                continue;
            }

            training_ids.insert(instance_id);
            contradictions.push(Instance::contradiction_from_instance(template, source));
        }
    }
}

/// Cross every already-placed test instance of `source_target` with every
/// template the test entailments use. Deterministic, no sampling.
fn test_contradictions(
    corpus: &Corpus,
    test: &mut SplitSubsets,
    test_ids: &mut HashSet<String>,
    training_ids: &HashSet<String>,
    training_paper_ids: &HashSet<String>,
    source_target: Target,
) {
    let test_templates: HashSet<String> = test
        .entailments
        .iter()
        .filter_map(|i| i.template_id.clone())
        .collect();
    let sources: Vec<Instance> = test.get(source_target).to_vec();

    for source in &sources {
        for template in &corpus.templates {
            if source_target == Target::Neutral
                && source.template_id.as_deref() == Some(template.id.as_str())
            {
                continue;
            }
            if !test_templates.contains(template.id.as_str()) {
                continue;
            }

            let instance_id = pair_instance_id(&template.id, &source.paper_id);
            if test_ids.contains(&instance_id)
                || training_ids.contains(&instance_id)
                || training_paper_ids.contains(source.paper_id.as_str())
            {
                continue;
            }

            test_ids.insert(instance_id);
            test.contradictions
                .push(Instance::contradiction_from_instance(template, source));
        }
    }
}

fn verify(training: &SplitSubsets, test: &SplitSubsets) -> SplitReport {
    let training_ids: Vec<&str> = training.iter().map(|i| i.instance_id.as_str()).collect();
    let test_ids: Vec<&str> = test.iter().map(|i| i.instance_id.as_str()).collect();
    let training_id_set: HashSet<&str> = training_ids.iter().copied().collect();
    let test_id_set: HashSet<&str> = test_ids.iter().copied().collect();

    let training_papers: Vec<&str> = training
        .entailments
        .iter()
        .map(|i| i.paper_id.as_str())
        .collect();
    let test_papers: Vec<&str> = test
        .entailments
        .iter()
        .map(|i| i.paper_id.as_str())
        .collect();
    let training_paper_set: HashSet<&str> = training_papers.iter().copied().collect();
    let test_paper_set: HashSet<&str> = test_papers.iter().copied().collect();

    SplitReport {
        training_ids_unique: training_ids.len() == training_id_set.len(),
        test_ids_unique: test_ids.len() == test_id_set.len(),
        ids_disjoint: training_id_set.is_disjoint(&test_id_set),
        entailment_papers_disjoint: training_paper_set.is_disjoint(&test_paper_set),
        training_papers_unique: training_papers.len() == training_paper_set.len(),
        test_papers_unique: test_papers.len() == test_paper_set.len(),
    }
}
