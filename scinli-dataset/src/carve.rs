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

//! Validation-set carver.
//!
//! Moves a fixed fraction of each training category into a validation set:
//! uniform sampling without replacement, implemented as index-based removal
//! from the shrinking working vector. Entries are moved, never duplicated.

use crate::split::SplitConfig;
use rand::Rng;
use scinli_core::{SplitSubsets, Target};
use tracing::debug;

/// Carve `ceil(len * validation_ratio)` instances out of every training
/// category. The training set keeps the survivors in their original order;
/// the validation set receives instances in draw order.
pub fn carve_validation_set<R: Rng>(
    training: &mut SplitSubsets,
    config: &SplitConfig,
    rng: &mut R,
) -> SplitSubsets {
    let mut validation = SplitSubsets::default();

    for target in Target::ALL {
        let working = training.get_mut(target);
        let carve = (working.len() as f64 * config.validation_ratio).ceil() as usize;

        for _ in 0..carve {
            let index = rng.gen_range(0..working.len());
            validation.get_mut(target).push(working.remove(index));
        }

        debug!(
            target = target.as_str(),
            moved = carve,
            remaining = working.len(),
            "validation carve"
        );
    }

    validation
}
