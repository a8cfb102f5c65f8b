// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Global constants for the cert-manager provider.
//!
//! This module contains all numeric and string constants used throughout the codebase.
//! Constants are organized by category for easy maintenance.

// ============================================================================
// API Constants
// ============================================================================

/// API group for the core cert-manager CRDs
pub const API_GROUP_CERT_MANAGER: &str = "cert-manager.io";

/// API group for the ACME CRDs (challenges and orders)
pub const API_GROUP_ACME: &str = "acme.cert-manager.io";

/// API version shared by every supported CRD
pub const API_VERSION_V1: &str = "v1";

/// Kind name for `Certificate` resource
pub const KIND_CERTIFICATE: &str = "Certificate";

/// Kind name for `CertificateRequest` resource
pub const KIND_CERTIFICATE_REQUEST: &str = "CertificateRequest";

/// Kind name for `Issuer` resource
pub const KIND_ISSUER: &str = "Issuer";

/// Kind name for `ClusterIssuer` resource
pub const KIND_CLUSTER_ISSUER: &str = "ClusterIssuer";

/// Kind name for `Challenge` resource
pub const KIND_CHALLENGE: &str = "Challenge";

/// Kind name for `Order` resource
pub const KIND_ORDER: &str = "Order";

// ============================================================================
// Provider Constants
// ============================================================================

/// Prefix of every resource and data source type name
pub const TYPE_NAME_PREFIX: &str = "k8s";

/// Suffix appended to a type name for its manifest data source
pub const MANIFEST_SUFFIX: &str = "_manifest";

/// Field manager used for server-side apply when none is configured
pub const DEFAULT_FIELD_MANAGER: &str = "certmanager-provider";

/// Default for the `force_conflicts` attribute
pub const DEFAULT_FORCE_CONFLICTS: bool = false;

/// Default for the `wait_for_deletion` attribute
pub const DEFAULT_WAIT_FOR_DELETION: bool = false;

// ============================================================================
// State Attribute Names
// ============================================================================

pub const ATTR_ID: &str = "id";
pub const ATTR_FIELD_MANAGER: &str = "field_manager";
pub const ATTR_FORCE_CONFLICTS: &str = "force_conflicts";
pub const ATTR_DELETION_PROPAGATION: &str = "deletion_propagation";
pub const ATTR_WAIT_FOR_DELETION: &str = "wait_for_deletion";
pub const ATTR_API_VERSION: &str = "api_version";
pub const ATTR_KIND: &str = "kind";
pub const ATTR_METADATA: &str = "metadata";
pub const ATTR_SPEC: &str = "spec";
pub const ATTR_YAML: &str = "yaml";

// ============================================================================
// Timing Constants
// ============================================================================

/// Default time to wait for an object to disappear after DELETE (5 minutes)
pub const DEFAULT_DELETION_TIMEOUT_SECS: u64 = 300;

/// Default interval between existence checks while waiting for deletion
pub const DEFAULT_DELETION_POLL_MILLIS: u64 = 1000;

/// Default per-request timeout against the Kubernetes API server
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Default maximum total time spent retrying a transient API error (2 minutes)
pub const DEFAULT_RETRY_MAX_ELAPSED_SECS: u64 = 120;

// ============================================================================
// Kubernetes Name Limits
// ============================================================================

/// Maximum length of a DNS-1123 subdomain (object names, label key prefixes)
pub const MAX_DNS1123_SUBDOMAIN_LENGTH: usize = 253;

/// Maximum length of a DNS-1123 label (namespaces)
pub const MAX_DNS1123_LABEL_LENGTH: usize = 63;

/// Maximum length of a label value or the name part of a label key
pub const MAX_LABEL_NAME_LENGTH: usize = 63;

// ============================================================================
// Environment Variables
// ============================================================================

/// Path to the provider configuration file
pub const ENV_CONFIG: &str = "CERTMANAGER_PROVIDER_CONFIG";

/// Kubeconfig path override
pub const ENV_KUBECONFIG: &str = "CERTMANAGER_PROVIDER_KUBECONFIG";

/// Standard kubeconfig variable used as a fallback
pub const ENV_KUBECONFIG_FALLBACK: &str = "KUBECONFIG";

/// Kubeconfig context override
pub const ENV_CONTEXT: &str = "CERTMANAGER_PROVIDER_CONTEXT";

/// Field manager override
pub const ENV_FIELD_MANAGER: &str = "CERTMANAGER_PROVIDER_FIELD_MANAGER";
