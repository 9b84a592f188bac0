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

//! Final text pass over a built subset: normalize premise and hypothesis,
//! recompute the sequence. Normalization is idempotent, so subsets that went
//! through this step already come out unchanged.

use scinli_core::{sequence_of, SplitSubsets, TextNormalizer};

/// Normalize every instance's text fields in place.
pub fn post_process(subsets: &mut SplitSubsets, normalizer: &TextNormalizer) {
    for instance in subsets.iter_mut() {
        instance.premise = instance
            .premise
            .as_deref()
            .map(|premise| normalizer.normalize(premise));
        instance.hypothesis = normalizer.normalize(&instance.hypothesis);
        instance.sequence = sequence_of(instance.premise.as_deref(), &instance.hypothesis);
    }
}

/// The evaluation-time shape of the test set: entailments and neutrals only.
/// Synthesized contradictions exist to train with, not to score against.
pub fn reduce_test_set(test: SplitSubsets) -> SplitSubsets {
    SplitSubsets {
        entailments: test.entailments,
        contradictions: Vec::new(),
        neutrals: test.neutrals,
    }
}
