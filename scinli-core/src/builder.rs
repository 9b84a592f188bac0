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

//! Premise / hypothesis construction.
//!
//! Pure functions from corpus entities to the raw text fields of an instance.
//! Empty properties or abstracts render as empty strings; the single joining
//! space is kept as-is and only removed later by text normalization.

use crate::corpus::{Paper, Template};

/// Template-derived descriptive text: label followed by the property labels.
pub fn premise_text(template: &Template) -> String {
    format!("{} {}", template.label, template.properties.join(" "))
}

/// Paper-derived descriptive text: title followed by the abstract.
pub fn hypothesis_text(label: &str, abstract_text: &str) -> String {
    format!("{label} {abstract_text}")
}

/// Both sides of a (template, paper) pairing.
pub fn premise_hypothesis(template: &Template, paper: &Paper) -> (String, String) {
    (
        premise_text(template),
        hypothesis_text(&paper.label, &paper.abstract_text),
    )
}
