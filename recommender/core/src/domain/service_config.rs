// Copyright (c) 2026 100monkeys.ai
// SPDX-License-Identifier: AGPL-3.0

// Service Configuration Types
//
// Defines the configuration schema for the coursewise service:
// - Kubernetes-style manifest format (apiVersion/kind/metadata/spec)
// - Model artifact location and encoding
// - HTTP bind address and port
// - Recommendation count limits
// - Logging and metrics settings

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::domain::recommendation::DEFAULT_RECOMMENDATION_COUNT;
use crate::domain::model_store::ArtifactFormat;

pub const API_VERSION: &str = "coursewise/v1";
pub const KIND: &str = "ServiceConfig";
pub const CONFIG_PATH_ENV: &str = "COURSEWISE_CONFIG_PATH";

/// Top-level Kubernetes-style service configuration manifest
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfigManifest {
    /// API version (must be "coursewise/v1")
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Resource kind (must be "ServiceConfig")
    pub kind: String,

    pub metadata: ManifestMetadata,

    pub spec: ServiceConfigSpec,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ManifestMetadata {
    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfigSpec {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub recommendations: RecommendationLimits,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub observability: Option<ObservabilityConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Path to the serialized model artifact
    #[serde(default = "default_model_path")]
    pub path: PathBuf,

    /// Artifact encoding; inferred from the file extension when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<ArtifactFormat>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            path: default_model_path(),
            format: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Network bind address (e.g. "0.0.0.0" or "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// HTTP API port
    #[serde(default = "default_api_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_api_port(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationLimits {
    /// Number of recommendations returned when the caller does not ask for a count
    #[serde(default = "default_count")]
    pub default_count: usize,

    /// Largest count a caller may ask for
    #[serde(default = "default_max_count")]
    pub max_count: usize,
}

impl Default for RecommendationLimits {
    fn default() -> Self {
        Self {
            default_count: default_count(),
            max_count: default_max_count(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logging: Option<LoggingConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricsConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (e.g., "info", "debug", "trace")
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format ("json" or "text")
    #[serde(default = "default_log_format")]
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsConfig {
    /// Enable the Prometheus exporter
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Exporter listen port
    #[serde(default = "default_metrics_port")]
    pub port: u16,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_model_path() -> PathBuf {
    PathBuf::from("./recommendation_model.json")
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    5000
}

fn default_count() -> usize {
    DEFAULT_RECOMMENDATION_COUNT
}

fn default_max_count() -> usize {
    50
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_metrics_port() -> u16 {
    9090
}

impl Default for ServiceConfigManifest {
    fn default() -> Self {
        Self {
            api_version: API_VERSION.to_string(),
            kind: KIND.to_string(),
            metadata: ManifestMetadata {
                name: "coursewise".to_string(),
                version: Some("1.0.0".to_string()),
                labels: None,
            },
            spec: ServiceConfigSpec::default(),
        }
    }
}

impl ServiceConfigManifest {
    /// Load configuration from YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to YAML file
    pub fn to_yaml_file(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    pub fn from_yaml_str(yaml: &str) -> anyhow::Result<Self> {
        let config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Discover configuration file using precedence order
    /// 1. COURSEWISE_CONFIG_PATH environment variable
    /// 2. ./coursewise-config.yaml (working directory)
    /// 3. ~/.coursewise/config.yaml (user home)
    /// 4. /etc/coursewise/config.yaml (system, Unix) or C:\ProgramData\Coursewise\config.yaml (Windows)
    pub fn discover_config() -> Option<PathBuf> {
        Self::candidate_paths().into_iter().find(|path| path.exists())
    }

    /// Every location `discover_config` checks, in order.
    pub fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            paths.push(PathBuf::from(path));
        }

        paths.push(PathBuf::from("./coursewise-config.yaml"));

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(".coursewise").join("config.yaml"));
        }

        #[cfg(unix)]
        paths.push(PathBuf::from("/etc/coursewise/config.yaml"));
        #[cfg(windows)]
        paths.push(PathBuf::from("C:\\ProgramData\\Coursewise\\config.yaml"));

        paths
    }

    /// Load configuration with discovery, fallback to default
    pub fn load_or_default(cli_path: Option<PathBuf>) -> anyhow::Result<Self> {
        // Explicit CLI path fails if missing or invalid
        if let Some(path) = cli_path {
            tracing::info!("Loading configuration from explicit path: {:?}", path);
            let mut config = Self::from_yaml_file(&path).map_err(|e| {
                anyhow::anyhow!("Failed to load config at {:?}: {}", path, e)
            })?;
            config.apply_env_overrides();
            return Ok(config);
        }

        if let Some(config_path) = Self::discover_config() {
            tracing::info!("Loading configuration from discovered path: {:?}", config_path);
            let mut config = Self::from_yaml_file(config_path)?;
            config.apply_env_overrides();
            Ok(config)
        } else {
            tracing::warn!("No configuration file found in standard locations. Using defaults.");
            let mut config = Self::default();
            config.apply_env_overrides();
            Ok(config)
        }
    }

    /// Apply environment variable overrides to configuration
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(path) = lookup("COURSEWISE_MODEL_PATH") {
            tracing::info!("Environment override: COURSEWISE_MODEL_PATH={}", path);
            self.spec.model.path = PathBuf::from(path);
        }

        if let Some(address) = lookup("COURSEWISE_BIND_ADDRESS") {
            tracing::info!("Environment override: COURSEWISE_BIND_ADDRESS={}", address);
            self.spec.server.bind_address = address;
        }

        if let Some(val) = lookup("COURSEWISE_PORT") {
            match val.parse::<u16>() {
                Ok(port) => {
                    tracing::info!("Environment override: COURSEWISE_PORT={}", port);
                    self.spec.server.port = port;
                }
                Err(_) => {
                    tracing::warn!(
                        "Invalid value for COURSEWISE_PORT: '{}'. Expected a port number. Ignoring.",
                        val
                    );
                }
            }
        }

        if let Some(val) = lookup("COURSEWISE_METRICS_ENABLED") {
            let enabled = match val.to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => Some(true),
                "false" | "0" | "no" | "off" => Some(false),
                _ => {
                    tracing::warn!(
                        "Invalid value for COURSEWISE_METRICS_ENABLED: '{}'. Expected true/false. Ignoring.",
                        val
                    );
                    None
                }
            };
            if let Some(enabled) = enabled {
                tracing::info!("Environment override: COURSEWISE_METRICS_ENABLED={}", enabled);
                let observability = self.spec.observability.get_or_insert_with(Default::default);
                let metrics = observability.metrics.get_or_insert_with(|| MetricsConfig {
                    enabled,
                    port: default_metrics_port(),
                });
                metrics.enabled = enabled;
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.api_version != API_VERSION {
            anyhow::bail!(
                "Invalid apiVersion: '{}'. Must be '{}'",
                self.api_version,
                API_VERSION
            );
        }

        if self.kind != KIND {
            anyhow::bail!("Invalid kind: '{}'. Must be '{}'", self.kind, KIND);
        }

        if self.metadata.name.is_empty() {
            anyhow::bail!("metadata.name cannot be empty");
        }

        if self.spec.model.path.as_os_str().is_empty() {
            anyhow::bail!("spec.model.path cannot be empty");
        }

        let limits = &self.spec.recommendations;
        if limits.max_count == 0 {
            anyhow::bail!("spec.recommendations.max_count must be greater than 0");
        }
        if limits.default_count > limits.max_count {
            anyhow::bail!(
                "spec.recommendations.default_count ({}) exceeds max_count ({})",
                limits.default_count,
                limits.max_count
            );
        }

        if let Some(logging) = self.logging() {
            if logging.format != "json" && logging.format != "text" {
                anyhow::bail!(
                    "Invalid logging format: '{}'. Must be 'json' or 'text'",
                    logging.format
                );
            }
        }

        Ok(())
    }

    pub fn logging(&self) -> Option<&LoggingConfig> {
        self.spec.observability.as_ref()?.logging.as_ref()
    }

    /// Metrics settings, only when the exporter is enabled.
    pub fn metrics(&self) -> Option<&MetricsConfig> {
        self.spec
            .observability
            .as_ref()?
            .metrics
            .as_ref()
            .filter(|m| m.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_manifest() {
        let manifest = ServiceConfigManifest::default();
        assert_eq!(manifest.api_version, API_VERSION);
        assert_eq!(manifest.kind, KIND);
        assert_eq!(manifest.spec.recommendations.default_count, 3);
        assert_eq!(manifest.spec.server.port, 5000);
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = r#"
apiVersion: coursewise/v1
kind: ServiceConfig
metadata:
  name: catalog-prod
spec:
  model:
    path: /srv/models/courses.bin
    format: bincode
  server:
    port: 8080
  recommendations:
    default_count: 5
  observability:
    logging:
      level: debug
      format: json
"#;
        let manifest = ServiceConfigManifest::from_yaml_str(yaml).unwrap();

        assert_eq!(manifest.metadata.name, "catalog-prod");
        assert_eq!(manifest.spec.model.path, PathBuf::from("/srv/models/courses.bin"));
        assert_eq!(manifest.spec.model.format, Some(ArtifactFormat::Bincode));
        assert_eq!(manifest.spec.server.port, 8080);
        assert_eq!(manifest.spec.server.bind_address, "0.0.0.0");
        assert_eq!(manifest.spec.recommendations.default_count, 5);
        assert_eq!(manifest.spec.recommendations.max_count, 50);
        assert_eq!(manifest.logging().unwrap().format, "json");
        assert!(manifest.metrics().is_none());
        assert!(manifest.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut manifest = ServiceConfigManifest::default();

        manifest.api_version = "wrong/v1".to_string();
        assert!(manifest.validate().is_err());
        manifest.api_version = API_VERSION.to_string();

        manifest.kind = "NodeConfig".to_string();
        assert!(manifest.validate().is_err());
        manifest.kind = KIND.to_string();

        manifest.metadata.name = "".to_string();
        assert!(manifest.validate().is_err());
        manifest.metadata.name = "coursewise".to_string();

        manifest.spec.recommendations.default_count = 60;
        assert!(manifest.validate().is_err());
        manifest.spec.recommendations.default_count = 3;

        manifest.spec.recommendations.max_count = 0;
        assert!(manifest.validate().is_err());
        manifest.spec.recommendations.max_count = 50;

        manifest.spec.observability = Some(ObservabilityConfig {
            logging: Some(LoggingConfig {
                level: "info".to_string(),
                format: "xml".to_string(),
            }),
            metrics: None,
        });
        assert!(manifest.validate().is_err());
    }

    #[test]
    fn test_overrides() {
        let mut manifest = ServiceConfigManifest::default();
        let env: HashMap<&str, &str> = HashMap::from([
            ("COURSEWISE_MODEL_PATH", "/tmp/model.bin"),
            ("COURSEWISE_PORT", "not-a-port"),
            ("COURSEWISE_METRICS_ENABLED", "yes"),
        ]);

        manifest.apply_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(manifest.spec.model.path, PathBuf::from("/tmp/model.bin"));
        assert_eq!(manifest.spec.server.port, 5000);
        assert_eq!(manifest.metrics().map(|m| m.port), Some(9090));
    }

    #[test]
    fn test_yaml_roundtrip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("coursewise-config.yaml");

        let mut manifest = ServiceConfigManifest::default();
        manifest.spec.model.path = PathBuf::from("model.json");
        manifest.to_yaml_file(&path).unwrap();

        let loaded = ServiceConfigManifest::load_or_default(Some(path)).unwrap();
        assert_eq!(loaded.metadata.name, "coursewise");
        assert_eq!(loaded.spec.recommendations, RecommendationLimits::default());
    }
}
