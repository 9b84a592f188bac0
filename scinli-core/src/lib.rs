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

//! SciNLI Core
//!
//! Corpus and instance types shared across the dataset builder: templates and
//! their papers as fetched from the knowledge graph, the labeled NLI instances
//! derived from them, and the text helpers that turn one into the other.

pub mod builder;
pub mod corpus;
pub mod instance;
pub mod premises;
pub mod store;
pub mod text;

pub use builder::{hypothesis_text, premise_hypothesis, premise_text};
pub use corpus::{Corpus, NeutralPaper, Paper, ResearchField, Template};
pub use instance::{pair_instance_id, Instance, SplitSubsets, Target};
pub use premises::{extract_premises, TemplatePremise};
pub use store::{read_json, write_json, StoreError};
pub use text::{extend_path, sequence_of, uri_to_id, TextNormalizer};
