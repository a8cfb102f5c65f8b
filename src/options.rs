// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Server-side apply and delete option resolution.
//!
//! Every resource carries `field_manager`, `force_conflicts` and
//! `deletion_propagation` attributes. This module turns those (possibly unset)
//! attributes into concrete [`PatchParams`] and [`DeleteParams`].

use crate::constants::{DEFAULT_FIELD_MANAGER, DEFAULT_FORCE_CONFLICTS};
use crate::errors::ValidationError;
use kube::api::{DeleteParams, PatchParams};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Resolved options for a server-side apply request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyOptions {
    /// Field manager recorded in `managedFields`
    pub field_manager: String,
    /// Take ownership of fields owned by other managers
    pub force: bool,
}

impl ApplyOptions {
    /// Resolve apply options from resource attributes.
    ///
    /// An empty or missing `field_manager` falls back to `provider_default`, and an
    /// empty or missing provider default falls back to [`DEFAULT_FIELD_MANAGER`].
    /// A missing `force_conflicts` means [`DEFAULT_FORCE_CONFLICTS`].
    #[must_use]
    pub fn resolve(
        field_manager: Option<&str>,
        force_conflicts: Option<bool>,
        provider_default: Option<&str>,
    ) -> Self {
        let field_manager = [field_manager, provider_default]
            .into_iter()
            .flatten()
            .map(str::trim)
            .find(|candidate| !candidate.is_empty())
            .unwrap_or(DEFAULT_FIELD_MANAGER)
            .to_string();

        Self {
            field_manager,
            force: force_conflicts.unwrap_or(DEFAULT_FORCE_CONFLICTS),
        }
    }

    /// Server-side apply parameters for these options.
    #[must_use]
    pub fn patch_params(&self) -> PatchParams {
        let params = PatchParams::apply(&self.field_manager);
        if self.force {
            params.force()
        } else {
            params
        }
    }
}

/// Garbage collection policy for dependents of a deleted object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeletionPropagation {
    Orphan,
    Background,
    Foreground,
}

impl DeletionPropagation {
    /// Accepted attribute values, in Kubernetes spelling.
    pub const VALUES: [&'static str; 3] = ["Orphan", "Background", "Foreground"];

    /// Delete parameters for this policy.
    #[must_use]
    pub fn delete_params(self) -> DeleteParams {
        match self {
            Self::Orphan => DeleteParams::orphan(),
            Self::Background => DeleteParams::background(),
            Self::Foreground => DeleteParams::foreground(),
        }
    }
}

impl FromStr for DeletionPropagation {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Orphan" => Ok(Self::Orphan),
            "Background" => Ok(Self::Background),
            "Foreground" => Ok(Self::Foreground),
            other => Err(ValidationError::InvalidValue {
                path: crate::constants::ATTR_DELETION_PROPAGATION.to_string(),
                reason: format!(
                    "'{other}' is not one of {}",
                    Self::VALUES.join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for DeletionPropagation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Self::Orphan => "Orphan",
            Self::Background => "Background",
            Self::Foreground => "Foreground",
        };
        f.write_str(value)
    }
}

/// Delete parameters for an optional propagation attribute.
///
/// Unset means the API server default for the kind.
#[must_use]
pub fn delete_params(propagation: Option<DeletionPropagation>) -> DeleteParams {
    propagation.map_or_else(DeleteParams::default, DeletionPropagation::delete_params)
}

#[cfg(test)]
#[path = "options_tests.rs"]
mod options_tests;
