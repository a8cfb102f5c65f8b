// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Error types for provider operations.
//!
//! This module provides specialized error types for:
//! - State document validation (names, labels, typed spec conformance)
//! - Import identifier parsing
//! - Kubernetes API failures surfaced through the dynamic client
//!
//! [`ProviderError`] is what every resource and data source operation returns.
//! Validation problems are collected as a list of [`ValidationError`] so a single
//! plan reports every problem at once.

use thiserror::Error;

/// A single problem found while validating a state document.
///
/// `path` is the dotted attribute path inside the state document, e.g.
/// `metadata.name` or `spec.issuerRef.kind`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required attribute is missing or empty
    #[error("Missing required attribute '{path}'")]
    MissingAttribute {
        /// Attribute path
        path: String,
    },

    /// An attribute is set where it is not allowed (e.g. a namespace on a cluster-scoped kind)
    #[error("Attribute '{path}' is not allowed: {reason}")]
    UnexpectedAttribute {
        /// Attribute path
        path: String,
        /// Why the attribute is rejected
        reason: String,
    },

    /// The attribute is not part of the typed schema
    #[error("Unsupported attribute '{path}': not defined in the schema")]
    UnknownAttribute {
        /// Attribute path
        path: String,
    },

    /// The attribute has a value that does not satisfy its constraints
    #[error("Invalid value for '{path}': {reason}")]
    InvalidValue {
        /// Attribute path
        path: String,
        /// Explanation of what is invalid
        reason: String,
    },
}

impl ValidationError {
    /// Attribute path the error refers to.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::MissingAttribute { path }
            | Self::UnexpectedAttribute { path, .. }
            | Self::UnknownAttribute { path }
            | Self::InvalidValue { path, .. } => path,
        }
    }
}

/// Errors returned by resource and data source operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    /// The import identifier does not have the expected shape
    ///
    /// Namespaced kinds expect `namespace/name`, cluster-scoped kinds expect `name`.
    #[error("Invalid import identifier '{id}': expected format '{expected}'")]
    InvalidImportId {
        /// The identifier that failed to parse
        id: String,
        /// Expected format
        expected: &'static str,
    },

    /// No resource or data source is registered under this type name
    #[error("Unknown type '{type_name}'")]
    UnknownResourceType {
        /// Requested type name
        type_name: String,
    },

    /// The state document failed validation
    #[error("Invalid configuration for {type_name}: {}", format_validation_errors(.errors))]
    Validation {
        /// Type name of the resource being validated
        type_name: String,
        /// Every problem found
        errors: Vec<ValidationError>,
    },

    /// The object does not exist in the cluster
    #[error("{kind} '{id}' not found")]
    NotFound {
        /// Kubernetes kind
        kind: String,
        /// Object identifier (`namespace/name` or `name`)
        id: String,
    },

    /// The object was still present after the deletion timeout
    #[error("Timed out after {timeout_secs}s waiting for {kind} '{id}' to be deleted")]
    DeletionTimeout {
        /// Kubernetes kind
        kind: String,
        /// Object identifier
        id: String,
        /// Timeout that elapsed
        timeout_secs: u64,
    },

    /// The state document could not be converted to or from JSON
    #[error("Failed to convert {context}: {source}")]
    Serialization {
        /// What was being converted
        context: String,
        /// Underlying serde error
        #[source]
        source: serde_json::Error,
    },

    /// Rendering a manifest as YAML failed
    #[error("Failed to render manifest: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The Kubernetes API returned an error
    #[error("Kubernetes API call '{operation}' failed: {source}")]
    Kube {
        /// Operation that failed, e.g. `apply default/example`
        operation: String,
        /// Underlying client error
        #[source]
        source: kube::Error,
    },

    /// The provider has not been configured with a Kubernetes client
    #[error("Provider is not configured: {0}")]
    NotConfigured(String),

    /// Transient errors kept failing until the retry budget ran out
    #[error("Gave up on '{operation}' after {attempts} attempts: {source}")]
    RetriesExhausted {
        /// Operation that failed
        operation: String,
        /// Number of attempts made
        attempts: u32,
        /// Last error seen
        #[source]
        source: kube::Error,
    },
}

impl ProviderError {
    /// Build a [`ProviderError::Serialization`] with context.
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Whether the error means the object is absent from the cluster.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Kube {
                source: kube::Error::Api(response),
                ..
            } => response.code == 404,
            _ => false,
        }
    }
}

fn format_validation_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result alias used across the crate.
pub type Result<T, E = ProviderError> = std::result::Result<T, E>;
