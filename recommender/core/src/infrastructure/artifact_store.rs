// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! Artifact Store
//!
//! File-backed [`ModelStore`]. The artifact is a single document with three
//! named fields, encoded as JSON or bincode:
//!
//! ```json
//! {
//!   "similarity": [[1.0, 0.9], [0.9, 1.0]],
//!   "course_indices": {"Intro to Rust": 0, "Async Rust": 1},
//!   "course_titles": ["Intro to Rust", "Async Rust"]
//! }
//! ```
//!
//! # Architecture
//!
//! - **Layer:** Infrastructure
//! - **Purpose:** Read the whole artifact into memory and validate it once
//! - **Pattern:** Adapter for the domain `ModelStore` contract

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::catalog::ModelArtifact;
use crate::domain::model_store::{ArtifactFormat, LoadError, ModelStore};
use crate::domain::service_config::ModelConfig;

/// Serialized form of the artifact. Every field is optional here so that an
/// absent field surfaces as `LoadError::MissingField` rather than a decode error.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ArtifactDocument {
    #[serde(default)]
    similarity: Option<Vec<Vec<f64>>>,
    #[serde(default)]
    course_indices: Option<HashMap<String, usize>>,
    #[serde(default)]
    course_titles: Option<Vec<String>>,
}

impl ArtifactDocument {
    fn into_artifact(self) -> Result<ModelArtifact, LoadError> {
        let similarity = self.similarity.ok_or(LoadError::MissingField("similarity"))?;
        let course_indices = self
            .course_indices
            .ok_or(LoadError::MissingField("course_indices"))?;
        let course_titles = self
            .course_titles
            .ok_or(LoadError::MissingField("course_titles"))?;

        ModelArtifact::from_parts(similarity, course_indices, course_titles)
    }
}

impl From<&ModelArtifact> for ArtifactDocument {
    fn from(artifact: &ModelArtifact) -> Self {
        Self {
            similarity: Some(artifact.similarity().rows().to_vec()),
            course_indices: Some(artifact.index().positions().clone()),
            course_titles: Some(artifact.titles().as_slice().to_vec()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    path: PathBuf,
    format: Option<ArtifactFormat>,
}

impl ArtifactStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: None,
        }
    }

    pub fn from_config(config: &ModelConfig) -> Self {
        let store = Self::new(&config.path);
        match config.format {
            Some(format) => store.with_format(format),
            None => store,
        }
    }

    /// Use an explicit encoding instead of inferring it from the extension.
    pub fn with_format(mut self, format: ArtifactFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn format(&self) -> Result<ArtifactFormat, LoadError> {
        match self.format {
            Some(format) => Ok(format),
            None => ArtifactFormat::from_path(&self.path),
        }
    }

    /// Decode an artifact already read into memory.
    pub fn decode(bytes: &[u8], format: ArtifactFormat) -> Result<ModelArtifact, LoadError> {
        let document: ArtifactDocument = match format {
            ArtifactFormat::Json => {
                serde_json::from_slice(bytes).map_err(|e| LoadError::Corrupt(e.to_string()))?
            }
            ArtifactFormat::Bincode => {
                bincode::deserialize(bytes).map_err(|e| LoadError::Corrupt(e.to_string()))?
            }
        };
        document.into_artifact()
    }

    /// Write `artifact` to this store's path. Only offline tooling writes artifacts.
    pub fn save(&self, artifact: &ModelArtifact) -> anyhow::Result<()> {
        let format = self.format()?;
        let document = ArtifactDocument::from(artifact);

        let bytes = match format {
            ArtifactFormat::Json => {
                serde_json::to_vec(&document).context("Failed to encode artifact as JSON")?
            }
            ArtifactFormat::Bincode => {
                bincode::serialize(&document).context("Failed to encode artifact as bincode")?
            }
        };

        std::fs::write(&self.path, bytes)
            .with_context(|| format!("Failed to write artifact to {:?}", self.path))?;
        tracing::info!("Wrote {} artifact to {:?}", format, self.path);

        Ok(())
    }
}

impl ModelStore for ArtifactStore {
    fn load(&self) -> Result<ModelArtifact, LoadError> {
        let format = self.format()?;

        let bytes = std::fs::read(&self.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(self.path.clone()),
            _ => LoadError::Io {
                path: self.path.clone(),
                source: e,
            },
        })?;

        let artifact = Self::decode(&bytes, format)?;
        tracing::info!(
            "Model loaded successfully from {:?} ({} bytes, {})",
            self.path,
            bytes.len(),
            format
        );

        Ok(artifact)
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = r#"{
        "similarity": [[1.0, 0.25], [0.25, 1.0]],
        "course_indices": {"Rust": 0, "Go": 1},
        "course_titles": ["Rust", "Go"]
    }"#;

    #[test]
    fn test_decode_json() {
        let artifact = ArtifactStore::decode(VALID.as_bytes(), ArtifactFormat::Json).unwrap();
        assert_eq!(artifact.course_count(), 2);
        assert_eq!(artifact.index().position("Go"), Some(1));
    }

    #[test]
    fn test_missing_field() {
        let json = r#"{"similarity": [[1.0]], "course_titles": ["Rust"]}"#;
        let err = ArtifactStore::decode(json.as_bytes(), ArtifactFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::MissingField("course_indices")));
    }

    #[test]
    fn test_mistyped_field_is_corrupt() {
        let json = r#"{"similarity": "oops", "course_indices": {}, "course_titles": []}"#;
        let err = ArtifactStore::decode(json.as_bytes(), ArtifactFormat::Json).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt(_)));
    }

    #[test]
    fn test_truncated_bincode_is_corrupt() {
        let err = ArtifactStore::decode(&[1, 2, 3], ArtifactFormat::Bincode).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt(_)));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("absent.json"));
        assert!(matches!(store.load(), Err(LoadError::NotFound(_))));
    }

    #[test]
    fn test_bincode_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = ArtifactStore::decode(VALID.as_bytes(), ArtifactFormat::Json).unwrap();

        let store = ArtifactStore::new(dir.path().join("model.bin"));
        store.save(&artifact).unwrap();

        assert_eq!(store.load().unwrap(), artifact);
    }

    #[test]
    fn test_explicit_format_overrides_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.dat");
        std::fs::write(&path, VALID).unwrap();

        assert!(matches!(
            ArtifactStore::new(&path).load(),
            Err(LoadError::UnsupportedFormat(_))
        ));
        let store = ArtifactStore::new(&path).with_format(ArtifactFormat::Json);
        assert_eq!(store.load().unwrap().course_count(), 2);
    }
}
