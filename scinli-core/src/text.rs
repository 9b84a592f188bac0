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

//! Text utilities: normalization applied by the post-processing step, the
//! sequence join, and small id/path helpers shared across the pipeline.

use regex::Regex;
use std::path::{Path, PathBuf};

/// Idempotent text cleanup: case-fold, strip punctuation, collapse whitespace.
///
/// Holds its compiled patterns; construct once and reuse.
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    punctuation: Regex,
    whitespace: Regex,
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self {
            punctuation: Regex::new(r"[^\w\s]").expect("invalid punctuation pattern"),
            whitespace: Regex::new(r"\s+").expect("invalid whitespace pattern"),
        }
    }
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        let stripped = self.punctuation.replace_all(&lowered, "");
        let collapsed = self.whitespace.replace_all(&stripped, " ");
        collapsed.trim().to_string()
    }
}

/// Sequence builder: premise and hypothesis joined by a single space, or the
/// hypothesis alone when there is no premise text.
pub fn sequence_of(premise: Option<&str>, hypothesis: &str) -> String {
    match premise {
        Some(p) if !p.is_empty() => format!("{p} {hypothesis}"),
        _ => hypothesis.to_string(),
    }
}

/// Last path segment of a resource URI.
pub fn uri_to_id(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Insert a suffix between a file's stem and its extension:
/// `test_set.json` + `_evaluated` becomes `test_set_evaluated.json`.
pub fn extend_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let name = match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{stem}{suffix}.{ext}"),
        None => format!("{stem}{suffix}"),
    };
    path.with_file_name(name)
}
