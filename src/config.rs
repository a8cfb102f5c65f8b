// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. built-in defaults (see [`crate::constants`])
//! 2. a YAML or JSON config file (`--config`, or `CERTMANAGER_PROVIDER_CONFIG`)
//! 3. environment variables
//!
//! # Example
//!
//! ```yaml
//! kubeconfig: /home/me/.kube/config
//! context: kind-dev
//! field_manager: platform-terraform
//! deletion_timeout_secs: 600
//! ```

use crate::constants::{
    DEFAULT_DELETION_POLL_MILLIS, DEFAULT_DELETION_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS,
    DEFAULT_RETRY_MAX_ELAPSED_SECS, ENV_CONFIG, ENV_CONTEXT, ENV_FIELD_MANAGER, ENV_KUBECONFIG,
    ENV_KUBECONFIG_FALLBACK,
};
use crate::schema::{Attribute, AttributeType, Schema, SCHEMA_VERSION};
use kube::config::{KubeConfigOptions, Kubeconfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Errors raised while loading configuration or building the Kubernetes client.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The config file could not be read
    #[error("Failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid YAML/JSON or has unknown settings
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A setting has an unusable value
    #[error("Invalid provider setting '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },

    /// The kubeconfig file or context could not be loaded
    #[error("Failed to load kubeconfig: {0}")]
    Kubeconfig(#[from] kube::config::KubeconfigError),

    /// Neither in-cluster nor kubeconfig configuration was found
    #[error("Failed to infer Kubernetes configuration: {0}")]
    Infer(#[from] kube::config::InferConfigError),

    /// The client could not be built from the configuration
    #[error("Failed to create Kubernetes client: {0}")]
    Client(#[from] kube::Error),
}

/// Provider-level settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderConfig {
    /// Path to a kubeconfig file. Unset means in-cluster or default kubeconfig discovery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,

    /// Kubeconfig context to use instead of the current context.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,

    /// Default field manager for server-side apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Retry budget for transient API errors. `0` disables retries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry_max_elapsed_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_timeout_secs: Option<u64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_poll_millis: Option<u64>,
}

impl ProviderConfig {
    /// Read a config file. YAML and JSON are both accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        debug!(path = %path.display(), "Loaded provider config file");
        Ok(config)
    }

    /// Load configuration from an optional file plus the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or a setting is invalid.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |name| std::env::var(name).ok())
    }

    /// Like [`ProviderConfig::load`], with an injectable environment lookup.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be loaded or a setting is invalid.
    pub fn load_with<F>(path: Option<&Path>, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env_path = lookup(ENV_CONFIG).filter(|value| !value.is_empty()).map(PathBuf::from);
        let config = match path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides. Empty variables are ignored.
    ///
    /// `KUBECONFIG` is only used as a fallback when it names a single file; a
    /// path list is left to kube's own kubeconfig discovery, which merges it.
    #[must_use]
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|value| !value.is_empty());

        if let Some(path) = get(ENV_KUBECONFIG) {
            self.kubeconfig = Some(PathBuf::from(path));
        } else if self.kubeconfig.is_none() {
            if let Some(path) = get(ENV_KUBECONFIG_FALLBACK) {
                if std::env::split_paths(&path).count() == 1 {
                    self.kubeconfig = Some(PathBuf::from(path));
                }
            }
        }
        if let Some(context) = get(ENV_CONTEXT) {
            self.context = Some(context);
        }
        if let Some(field_manager) = get(ENV_FIELD_MANAGER) {
            self.field_manager = Some(field_manager);
        }
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for the first unusable setting.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.field_manager.as_deref().is_some_and(|fm| fm.trim().is_empty()) {
            return Err(ConfigError::Invalid {
                field: "field_manager",
                reason: "must not be empty".to_string(),
            });
        }
        for (field, value) in [
            ("request_timeout_secs", self.request_timeout_secs),
            ("deletion_timeout_secs", self.deletion_timeout_secs),
            ("deletion_poll_millis", self.deletion_poll_millis),
        ] {
            if value == Some(0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: "must be greater than zero".to_string(),
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn retry_budget(&self) -> Duration {
        Duration::from_secs(
            self.retry_max_elapsed_secs
                .unwrap_or(DEFAULT_RETRY_MAX_ELAPSED_SECS),
        )
    }

    #[must_use]
    pub fn deletion_timeout(&self) -> Duration {
        Duration::from_secs(self.deletion_timeout_secs.unwrap_or(DEFAULT_DELETION_TIMEOUT_SECS))
    }

    #[must_use]
    pub fn deletion_poll_interval(&self) -> Duration {
        Duration::from_millis(self.deletion_poll_millis.unwrap_or(DEFAULT_DELETION_POLL_MILLIS))
    }

    /// Build the kube client configuration.
    ///
    /// - `kubeconfig` set: that file, with `context` if set
    /// - only `context` set: default kubeconfig discovery, with that context
    /// - neither: in-cluster configuration, then default kubeconfig discovery
    ///
    /// # Errors
    ///
    /// Returns an error if the kubeconfig cannot be read or has no usable context.
    pub async fn kube_config(&self) -> Result<kube::Config, ConfigError> {
        let options = KubeConfigOptions {
            context: self.context.clone(),
            ..Default::default()
        };

        let mut config = match (&self.kubeconfig, &self.context) {
            (Some(path), _) => {
                let kubeconfig = Kubeconfig::read_from(path)?;
                kube::Config::from_custom_kubeconfig(kubeconfig, &options).await?
            }
            (None, Some(_)) => kube::Config::from_kubeconfig(&options).await?,
            (None, None) => kube::Config::infer().await?,
        };

        config.connect_timeout = Some(self.request_timeout());
        config.read_timeout = Some(self.request_timeout());
        debug!(
            cluster_url = %config.cluster_url,
            context = ?self.context,
            "Built Kubernetes client configuration"
        );
        Ok(config)
    }

    /// Schema of the provider configuration block.
    #[must_use]
    pub fn schema() -> Schema {
        let attributes = BTreeMap::from([
            (
                "kubeconfig".to_string(),
                Attribute::optional(AttributeType::String, "Path to the kubeconfig file."),
            ),
            (
                "context".to_string(),
                Attribute::optional(AttributeType::String, "Kubeconfig context to use."),
            ),
            (
                "field_manager".to_string(),
                Attribute::optional(
                    AttributeType::String,
                    "Default field manager for server-side apply.",
                ),
            ),
            (
                "request_timeout_secs".to_string(),
                Attribute::optional(AttributeType::Int64, "Timeout of a single API request."),
            ),
            (
                "retry_max_elapsed_secs".to_string(),
                Attribute::optional(
                    AttributeType::Int64,
                    "Total time spent retrying transient API errors. 0 disables retries.",
                ),
            ),
            (
                "deletion_timeout_secs".to_string(),
                Attribute::optional(
                    AttributeType::Int64,
                    "How long delete waits for an object to disappear.",
                ),
            ),
            (
                "deletion_poll_millis".to_string(),
                Attribute::optional(
                    AttributeType::Int64,
                    "Interval between checks while waiting for deletion.",
                ),
            ),
        ]);

        Schema {
            version: SCHEMA_VERSION,
            description: "Connection and default settings for cert-manager resources.".to_string(),
            attributes,
        }
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod config_tests;
