// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0
//! # Model Store Contract
//!
//! The model artifact is built offline and shipped as a single file. A
//! [`ModelStore`] reads it exactly once at startup; any failure is a
//! [`LoadError`] and leaves the service without a model for its lifetime.
//! Implementations live in `crate::infrastructure`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::domain::catalog::ModelArtifact;

/// On-disk encoding of the model artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    Json,
    Bincode,
}

impl ArtifactFormat {
    /// Infer the encoding from the file extension (`.json`, `.bin`, `.bincode`).
    pub fn from_path(path: &Path) -> Result<Self, LoadError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("bin") | Some("bincode") => Ok(Self::Bincode),
            Some(other) => Err(LoadError::UnsupportedFormat(format!(".{}", other))),
            None => Err(LoadError::UnsupportedFormat(format!(
                "no file extension on {}",
                path.display()
            ))),
        }
    }
}

impl fmt::Display for ArtifactFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Bincode => write!(f, "bincode"),
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Model artifact not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to read model artifact {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unsupported model artifact format: {0}")]
    UnsupportedFormat(String),
    #[error("Corrupt model artifact: {0}")]
    Corrupt(String),
    #[error("Model artifact is missing required field '{0}'")]
    MissingField(&'static str),
    #[error("Malformed model artifact: {0}")]
    Malformed(String),
}

/// Source of the read-only model artifact.
pub trait ModelStore: Send + Sync {
    /// Read and validate the whole artifact. No partial artifact is ever returned.
    fn load(&self) -> Result<ModelArtifact, LoadError>;

    /// Human-readable location of the artifact, for logs.
    fn location(&self) -> String;
}
