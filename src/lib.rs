// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! # certmanager-provider - cert-manager resources as declarative provider types
//!
//! Exposes the cert-manager custom resources (`cert-manager.io/v1` and
//! `acme.cert-manager.io/v1`) as provider *resources* and *data sources*: typed
//! schemas generated from the CRDs, and create/read/update/delete/import
//! operations that map state documents onto Kubernetes API calls.
//!
//! ## Modules
//!
//! - [`crd`] - Typed CRDs for every supported kind
//! - [`kinds`] - Per-kind binding: type name, scope and validation rules
//! - [`model`] - Provider state documents and their mapping to API objects
//! - [`validation`] - Offline validation of state documents
//! - [`schema`] - Provider schema generated from the CRD OpenAPI
//! - [`client`] - Dynamic Kubernetes client with retries
//! - [`resource`] - Resource lifecycle handlers
//! - [`data_source`] - Object lookup and manifest rendering data sources
//! - [`provider`] - Type registry and shared context
//! - [`config`] - Provider configuration from file and environment
//!
//! ## Example
//!
//! ```rust,no_run
//! use certmanager_provider::provider::{Provider, ProviderContext};
//! use serde_json::json;
//!
//! let provider = Provider::new(ProviderContext::offline(None));
//! let resource = provider.resource("k8s_cert_manager_io_certificate_v1")?;
//! let plan = resource.plan(
//!     provider.context(),
//!     None,
//!     &json!({
//!         "metadata": { "name": "example-com", "namespace": "default" },
//!         "spec": {
//!             "secretName": "example-com-tls",
//!             "issuerRef": { "name": "letsencrypt", "kind": "ClusterIssuer" },
//!             "dnsNames": ["example.com"]
//!         }
//!     }),
//! )?;
//! assert_eq!(plan.planned_state["id"], "default/example-com");
//! # Ok::<(), certmanager_provider::errors::ProviderError>(())
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod crd;
pub mod data_source;
pub mod errors;
pub mod import_id;
pub mod kinds;
pub mod model;
pub mod options;
pub mod provider;
pub mod resource;
pub mod retry;
pub mod schema;
pub mod validation;

#[cfg(test)]
mod crd_tests;
#[cfg(test)]
mod errors_tests;
