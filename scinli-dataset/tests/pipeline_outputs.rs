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

//! End-to-end checks of the split pipeline's on-disk behavior.

use scinli_core::{read_json, Corpus, NeutralPaper, Paper, ResearchField, SplitSubsets, Target, TextNormalizer};
use scinli_dataset::pipeline::{
    run_split_pipeline, INDEX_TRAINING_SET_FILE, TEST_SET_FILE, TRAINING_SET_FILE,
    VALIDATION_SET_FILE,
};
use scinli_dataset::split::SplitConfig;
use std::collections::HashSet;

fn field(id: &str) -> ResearchField {
    ResearchField {
        id: id.to_string(),
        label: format!("field {id}"),
    }
}

fn corpus() -> Corpus {
    let template = |id: &str, papers: Vec<Paper>| scinli_core::Template {
        id: id.to_string(),
        label: format!("Template {id}"),
        research_fields: vec![field("F1")],
        properties: vec!["Property One".into(), "Property Two".into()],
        papers,
    };
    let paper = |id: &str| Paper {
        id: id.to_string(),
        label: format!("Paper {id}"),
        doi: None,
        research_field: field("F1"),
        abstract_text: format!("The Abstract of {id}."),
    };

    Corpus {
        templates: vec![
            template("TA", (1..=10).map(|i| paper(&format!("P{i}"))).collect()),
            template("TB", (11..=20).map(|i| paper(&format!("P{i}"))).collect()),
        ],
        neutral_papers: (1..=20)
            .map(|i| NeutralPaper {
                id: format!("N{i}"),
                label: format!("Neutral {i}"),
                doi: None,
                research_field: field("F2"),
                abstract_text: "A Broad Overview.".into(),
            })
            .collect(),
    }
}

#[test]
fn pipeline_writes_all_artifacts_in_two_phases() {
    let dir = tempfile::tempdir().unwrap();
    let config = SplitConfig::default();

    let output = run_split_pipeline(&corpus(), &config, dir.path()).unwrap();
    assert!(output.report.is_consistent());

    // The index-ready training set holds the pre-carve sizes.
    let indexed: SplitSubsets = read_json(&dir.path().join(INDEX_TRAINING_SET_FILE)).unwrap();
    let training: SplitSubsets = read_json(&dir.path().join(TRAINING_SET_FILE)).unwrap();
    let validation: SplitSubsets = read_json(&dir.path().join(VALIDATION_SET_FILE)).unwrap();
    let test: SplitSubsets = read_json(&dir.path().join(TEST_SET_FILE)).unwrap();

    for target in Target::ALL {
        let carved = (indexed.get(target).len() as f64 * config.validation_ratio).ceil() as usize;
        assert_eq!(validation.get(target).len(), carved);
        assert_eq!(
            training.get(target).len(),
            indexed.get(target).len() - carved
        );
    }

    // The persisted test set is reduced for evaluation.
    assert!(test.contradictions.is_empty());
    assert!(!test.entailments.is_empty());
    assert!(!test.neutrals.is_empty());

    assert_eq!(output.training, training);
    assert_eq!(output.validation, validation);
    assert_eq!(output.test, test);
}

#[test]
fn final_artifacts_are_normalized() {
    let dir = tempfile::tempdir().unwrap();
    let config = SplitConfig::default();

    run_split_pipeline(&corpus(), &config, dir.path()).unwrap();

    let normalizer = TextNormalizer::new();
    for file in [TRAINING_SET_FILE, TEST_SET_FILE, VALIDATION_SET_FILE] {
        let subsets: SplitSubsets = read_json(&dir.path().join(file)).unwrap();
        for instance in subsets.iter() {
            assert_eq!(normalizer.normalize(&instance.hypothesis), instance.hypothesis);
            if let Some(premise) = instance.premise.as_deref() {
                assert_eq!(normalizer.normalize(premise), premise);
            }
        }
    }
}

#[test]
fn validation_and_training_stay_disjoint_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let config = SplitConfig::default();

    run_split_pipeline(&corpus(), &config, dir.path()).unwrap();

    let training: SplitSubsets = read_json(&dir.path().join(TRAINING_SET_FILE)).unwrap();
    let validation: SplitSubsets = read_json(&dir.path().join(VALIDATION_SET_FILE)).unwrap();

    let training_ids: HashSet<&str> = training.iter().map(|i| i.instance_id.as_str()).collect();
    let validation_ids: HashSet<&str> =
        validation.iter().map(|i| i.instance_id.as_str()).collect();

    assert!(!validation_ids.is_empty());
    assert!(training_ids.is_disjoint(&validation_ids));
}

#[test]
fn reruns_with_the_same_seed_are_identical() {
    let config = SplitConfig::default();

    let first_dir = tempfile::tempdir().unwrap();
    let first = run_split_pipeline(&corpus(), &config, first_dir.path()).unwrap();

    let second_dir = tempfile::tempdir().unwrap();
    let second = run_split_pipeline(&corpus(), &config, second_dir.path()).unwrap();

    assert_eq!(first, second);

    let first_bytes = std::fs::read(first_dir.path().join(TRAINING_SET_FILE)).unwrap();
    let second_bytes = std::fs::read(second_dir.path().join(TRAINING_SET_FILE)).unwrap();
    assert_eq!(first_bytes, second_bytes);
}
