// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Object identifiers used as resource `id` and import identifiers.
//!
//! Namespaced kinds are identified by `namespace/name`, cluster-scoped kinds by
//! `name` alone. The same format is written to the `id` attribute of every
//! resource, so an `id` can always be fed back into import.
//!
//! # Example
//!
//! ```rust
//! use certmanager_provider::import_id::{ObjectId, Scope};
//!
//! let id = ObjectId::parse("cert-manager/letsencrypt", Scope::Namespaced).unwrap();
//! assert_eq!(id.namespace.as_deref(), Some("cert-manager"));
//! assert_eq!(id.name, "letsencrypt");
//! assert_eq!(id.to_string(), "cert-manager/letsencrypt");
//! ```

use crate::errors::ProviderError;
use std::fmt;

/// Expected identifier format for namespaced kinds
pub const NAMESPACED_FORMAT: &str = "namespace/name";

/// Expected identifier format for cluster-scoped kinds
pub const CLUSTER_FORMAT: &str = "name";

/// Whether a kind lives inside a namespace.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scope {
    Namespaced,
    Cluster,
}

impl Scope {
    /// Identifier format accepted for this scope.
    #[must_use]
    pub fn id_format(self) -> &'static str {
        match self {
            Scope::Namespaced => NAMESPACED_FORMAT,
            Scope::Cluster => CLUSTER_FORMAT,
        }
    }
}

/// Location of a single object in the cluster.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObjectId {
    pub namespace: Option<String>,
    pub name: String,
}

impl ObjectId {
    /// Identifier of a namespaced object.
    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Identifier of a cluster-scoped object.
    pub fn cluster(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    /// Parse an import identifier for a kind with the given scope.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::InvalidImportId`] when:
    /// - a namespaced identifier does not split into exactly two non-empty parts on `/`
    /// - a cluster-scoped identifier is empty or contains `/`
    pub fn parse(raw: &str, scope: Scope) -> Result<Self, ProviderError> {
        let invalid = || ProviderError::InvalidImportId {
            id: raw.to_string(),
            expected: scope.id_format(),
        };

        match scope {
            Scope::Namespaced => {
                let parts: Vec<&str> = raw.split('/').collect();
                match parts.as_slice() {
                    [namespace, name] if !namespace.is_empty() && !name.is_empty() => {
                        Ok(Self::namespaced(*namespace, *name))
                    }
                    _ => Err(invalid()),
                }
            }
            Scope::Cluster => {
                if raw.is_empty() || raw.contains('/') {
                    Err(invalid())
                } else {
                    Ok(Self::cluster(raw))
                }
            }
        }
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}/{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
#[path = "import_id_tests.rs"]
mod import_id_tests;
