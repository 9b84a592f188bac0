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

//! JSON persistence for every artifact the pipeline reads or writes.

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Pretty-printed JSON; parent directories are created as needed.
pub fn write_json<T: Serialize>(value: &T, path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(value)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: usize,
    }

    #[test]
    fn round_trip_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/sample.json");
        let sample = Sample {
            name: "x".into(),
            count: 3,
        };

        write_json(&sample, &path).unwrap();
        let back: Sample = read_json(&path).unwrap();
        assert_eq!(back, sample);
    }

    #[test]
    fn read_missing_file_is_an_io_error() {
        let err = read_json::<Sample>(Path::new("does/not/exist.json")).unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
