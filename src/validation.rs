// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Validation of state documents before they reach the API server.
//!
//! Validation collects every problem in a document instead of stopping at the
//! first one, so a single plan reports all of them. It covers:
//!
//! - object names, namespaces, label and annotation keys (Kubernetes naming rules)
//! - conformance of `spec` to the typed CRD schema, including attributes the
//!   schema does not know about
//! - kind-specific rules that the CRD expresses in its admission webhook
//!   (e.g. an issuer must configure exactly one issuer type)

use crate::constants::{
    API_GROUP_CERT_MANAGER, ATTR_API_VERSION, ATTR_DELETION_PROPAGATION, ATTR_FIELD_MANAGER,
    ATTR_FORCE_CONFLICTS, ATTR_ID, ATTR_KIND, ATTR_METADATA, ATTR_SPEC, ATTR_WAIT_FOR_DELETION,
    ATTR_YAML, KIND_CLUSTER_ISSUER, KIND_ISSUER, MAX_DNS1123_LABEL_LENGTH,
    MAX_DNS1123_SUBDOMAIN_LENGTH, MAX_LABEL_NAME_LENGTH,
};
use crate::crd::{
    CertificateRequestSpec, CertificateSpec, ChallengeSpec, IssuerConfig, IssuerReference,
    OrderSpec, PrivateKeyAlgorithm,
};
use crate::errors::{ProviderError, Result, ValidationError};
use crate::import_id::Scope;
use crate::kinds::ManagedKind;
use crate::model::{ManifestModel, ObjectMetadataModel, ResourceModel};
use crate::options::DeletionPropagation;
use base64::Engine;
use regex::Regex;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::net::IpAddr;
use std::sync::LazyLock;

static DNS1123_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$").expect("valid regex"));

static DNS1123_SUBDOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?(\.[a-z0-9]([-a-z0-9]*[a-z0-9])?)*$")
        .expect("valid regex")
});

static QUALIFIED_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Za-z0-9][-A-Za-z0-9_.]*)?[A-Za-z0-9]$").expect("valid regex")
});

static GO_DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-+]?(0|(([0-9]+(\.[0-9]*)?|\.[0-9]+)(ns|us|µs|μs|ms|s|m|h))+)$")
        .expect("valid regex")
});

/// Top-level attributes of a resource document
pub const RESOURCE_ATTRIBUTES: [&str; 9] = [
    ATTR_ID,
    ATTR_FIELD_MANAGER,
    ATTR_FORCE_CONFLICTS,
    ATTR_DELETION_PROPAGATION,
    ATTR_WAIT_FOR_DELETION,
    ATTR_API_VERSION,
    ATTR_KIND,
    ATTR_METADATA,
    ATTR_SPEC,
];

/// Top-level attributes of a data source document
pub const DATA_SOURCE_ATTRIBUTES: [&str; 5] =
    [ATTR_ID, ATTR_API_VERSION, ATTR_KIND, ATTR_METADATA, ATTR_SPEC];

/// Top-level attributes of a manifest document
pub const MANIFEST_ATTRIBUTES: [&str; 4] = [ATTR_ID, ATTR_METADATA, ATTR_SPEC, ATTR_YAML];

const METADATA_ATTRIBUTES: [&str; 7] = [
    "name",
    "namespace",
    "labels",
    "annotations",
    "uid",
    "resource_version",
    "generation",
];

// ============================================================================
// Documents
// ============================================================================

/// Validate a resource document and return its typed model.
///
/// # Errors
///
/// Returns [`ProviderError::Validation`] listing every problem found.
pub fn resource_model<K: ManagedKind>(document: &Value) -> Result<ResourceModel<K::Spec>> {
    let fields = document_fields::<K>(document)?;
    let mut errors = Vec::new();

    check_unknown_keys(fields, &RESOURCE_ATTRIBUTES, "", &mut errors);
    check_metadata(fields.get(ATTR_METADATA), K::SCOPE, &mut errors);
    check_spec::<K>(fields.get(ATTR_SPEC), &mut errors);
    check_string(fields, ATTR_FIELD_MANAGER, &mut errors);
    check_bool(fields, ATTR_FORCE_CONFLICTS, &mut errors);
    check_bool(fields, ATTR_WAIT_FOR_DELETION, &mut errors);
    match fields.get(ATTR_DELETION_PROPAGATION) {
        None | Some(Value::Null) => {}
        Some(Value::String(value)) => {
            if let Err(e) = value.parse::<DeletionPropagation>() {
                errors.push(e);
            }
        }
        Some(_) => errors.push(invalid(ATTR_DELETION_PROPAGATION, "expected a string")),
    }

    finish::<K, _>(document, errors, "resource state")
}

/// Validate a manifest document and return its typed model.
///
/// # Errors
///
/// Returns [`ProviderError::Validation`] listing every problem found.
pub fn manifest_model<K: ManagedKind>(document: &Value) -> Result<ManifestModel<K::Spec>> {
    let fields = document_fields::<K>(document)?;
    let mut errors = Vec::new();

    check_unknown_keys(fields, &MANIFEST_ATTRIBUTES, "", &mut errors);
    check_metadata(fields.get(ATTR_METADATA), K::SCOPE, &mut errors);
    check_spec::<K>(fields.get(ATTR_SPEC), &mut errors);

    finish::<K, _>(document, errors, "manifest state")
}

/// Validate the lookup metadata of a data source document.
///
/// Only `metadata.name` (and `metadata.namespace` for namespaced kinds) matter;
/// everything else is computed.
///
/// # Errors
///
/// Returns [`ProviderError::Validation`] listing every problem found.
pub fn lookup_metadata<K: ManagedKind>(document: &Value) -> Result<ObjectMetadataModel> {
    let fields = document_fields::<K>(document)?;
    let mut errors = Vec::new();

    check_unknown_keys(fields, &DATA_SOURCE_ATTRIBUTES, "", &mut errors);
    let metadata = check_metadata(fields.get(ATTR_METADATA), K::SCOPE, &mut errors);

    match metadata {
        Some(metadata) if errors.is_empty() => Ok(metadata.configured_only()),
        _ => Err(ProviderError::Validation {
            type_name: K::TYPE_NAME.to_string(),
            errors,
        }),
    }
}

fn document_fields<K: ManagedKind>(document: &Value) -> Result<&Map<String, Value>> {
    document.as_object().ok_or_else(|| ProviderError::Validation {
        type_name: K::TYPE_NAME.to_string(),
        errors: vec![invalid("", "expected an object")],
    })
}

fn finish<K: ManagedKind, T: DeserializeOwned>(
    document: &Value,
    errors: Vec<ValidationError>,
    context: &str,
) -> Result<T> {
    if !errors.is_empty() {
        return Err(ProviderError::Validation {
            type_name: K::TYPE_NAME.to_string(),
            errors,
        });
    }
    serde_json::from_value(document.clone()).map_err(|e| ProviderError::serialization(context, e))
}

fn check_unknown_keys(
    fields: &Map<String, Value>,
    allowed: &[&str],
    prefix: &str,
    errors: &mut Vec<ValidationError>,
) {
    for key in fields.keys() {
        if !allowed.contains(&key.as_str()) {
            errors.push(ValidationError::UnknownAttribute {
                path: join_path(prefix, key),
            });
        }
    }
}

fn check_string(fields: &Map<String, Value>, key: &str, errors: &mut Vec<ValidationError>) {
    if let Some(value) = fields.get(key) {
        if !value.is_null() && !value.is_string() {
            errors.push(invalid(key, "expected a string"));
        }
    }
}

fn check_bool(fields: &Map<String, Value>, key: &str, errors: &mut Vec<ValidationError>) {
    if let Some(value) = fields.get(key) {
        if !value.is_null() && !value.is_boolean() {
            errors.push(invalid(key, "expected a boolean"));
        }
    }
}

fn check_metadata(
    value: Option<&Value>,
    scope: Scope,
    errors: &mut Vec<ValidationError>,
) -> Option<ObjectMetadataModel> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        errors.push(missing(ATTR_METADATA));
        return None;
    };
    let Some(fields) = value.as_object() else {
        errors.push(invalid(ATTR_METADATA, "expected an object"));
        return None;
    };
    check_unknown_keys(fields, &METADATA_ATTRIBUTES, ATTR_METADATA, errors);

    match serde_json::from_value::<ObjectMetadataModel>(value.clone()) {
        Ok(metadata) => {
            errors.extend(validate_metadata(&metadata, scope));
            Some(metadata)
        }
        Err(e) => {
            errors.push(invalid(ATTR_METADATA, e.to_string()));
            None
        }
    }
}

fn check_spec<K: ManagedKind>(value: Option<&Value>, errors: &mut Vec<ValidationError>) {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        errors.push(missing(ATTR_SPEC));
        return;
    };
    match serde_json::from_value::<K::Spec>(value.clone()) {
        Ok(spec) => {
            if let Ok(normalized) = serde_json::to_value(&spec) {
                unknown_fields(value, &normalized, ATTR_SPEC, errors);
            }
            errors.extend(K::validate_spec(&spec));
        }
        Err(e) => errors.push(invalid(ATTR_SPEC, e.to_string())),
    }
}

/// Report attributes present in `original` but dropped by the typed round trip.
///
/// `normalized` is `original` after deserializing into the typed spec and
/// serializing back; anything it lacks is unknown to the schema. Null values are
/// ignored since they are equivalent to an unset attribute.
pub fn unknown_fields(
    original: &Value,
    normalized: &Value,
    path: &str,
    errors: &mut Vec<ValidationError>,
) {
    match (original, normalized) {
        (Value::Object(original), Value::Object(normalized)) => {
            for (key, value) in original {
                if value.is_null() {
                    continue;
                }
                let child_path = join_path(path, key);
                match normalized.get(key) {
                    Some(normalized_value) => {
                        unknown_fields(value, normalized_value, &child_path, errors);
                    }
                    None => errors.push(ValidationError::UnknownAttribute { path: child_path }),
                }
            }
        }
        (Value::Array(original), Value::Array(normalized)) => {
            for (index, (value, normalized_value)) in original.iter().zip(normalized).enumerate() {
                unknown_fields(value, normalized_value, &format!("{path}[{index}]"), errors);
            }
        }
        _ => {}
    }
}

// ============================================================================
// Metadata
// ============================================================================

/// Validate object metadata for a kind of the given scope.
#[must_use]
pub fn validate_metadata(metadata: &ObjectMetadataModel, scope: Scope) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if metadata.name.is_empty() {
        errors.push(missing("metadata.name"));
    } else if let Some(error) = validate_dns1123_subdomain(&metadata.name, "metadata.name") {
        errors.push(error);
    }

    match (scope, metadata.namespace.as_deref()) {
        (Scope::Namespaced, None | Some("")) => errors.push(missing("metadata.namespace")),
        (Scope::Namespaced, Some(namespace)) => {
            if let Some(error) = validate_dns1123_label(namespace, "metadata.namespace") {
                errors.push(error);
            }
        }
        (Scope::Cluster, Some(_)) => errors.push(ValidationError::UnexpectedAttribute {
            path: "metadata.namespace".to_string(),
            reason: "the kind is cluster-scoped".to_string(),
        }),
        (Scope::Cluster, None) => {}
    }

    if let Some(labels) = &metadata.labels {
        for (key, value) in labels {
            let path = format!("metadata.labels[{key}]");
            if let Some(error) = validate_qualified_key(key, &path) {
                errors.push(error);
            }
            if let Some(error) = validate_label_value(value, &path) {
                errors.push(error);
            }
        }
    }

    if let Some(annotations) = &metadata.annotations {
        for key in annotations.keys() {
            let path = format!("metadata.annotations[{key}]");
            if let Some(error) = validate_qualified_key(key, &path) {
                errors.push(error);
            }
        }
    }

    errors
}

/// Check a DNS-1123 subdomain (object names, key prefixes).
#[must_use]
pub fn validate_dns1123_subdomain(value: &str, path: &str) -> Option<ValidationError> {
    if value.len() > MAX_DNS1123_SUBDOMAIN_LENGTH {
        return Some(invalid(
            path,
            format!("must be no more than {MAX_DNS1123_SUBDOMAIN_LENGTH} characters"),
        ));
    }
    if !DNS1123_SUBDOMAIN.is_match(value) {
        return Some(invalid(
            path,
            format!("'{value}' must consist of lower case alphanumeric characters, '-' or '.', and must start and end with an alphanumeric character"),
        ));
    }
    None
}

/// Check a DNS-1123 label (namespaces).
#[must_use]
pub fn validate_dns1123_label(value: &str, path: &str) -> Option<ValidationError> {
    if value.len() > MAX_DNS1123_LABEL_LENGTH {
        return Some(invalid(
            path,
            format!("must be no more than {MAX_DNS1123_LABEL_LENGTH} characters"),
        ));
    }
    if !DNS1123_LABEL.is_match(value) {
        return Some(invalid(
            path,
            format!("'{value}' must consist of lower case alphanumeric characters or '-', and must start and end with an alphanumeric character"),
        ));
    }
    None
}

/// Check a label or annotation key: an optional DNS subdomain prefix and `/`,
/// followed by a qualified name.
#[must_use]
pub fn validate_qualified_key(key: &str, path: &str) -> Option<ValidationError> {
    let (prefix, name) = match key.split_once('/') {
        Some((prefix, name)) => (Some(prefix), name),
        None => (None, key),
    };

    if let Some(prefix) = prefix {
        if prefix.is_empty() {
            return Some(invalid(path, "prefix part must be non-empty"));
        }
        if let Some(error) = validate_dns1123_subdomain(prefix, path) {
            return Some(error);
        }
    }

    if name.is_empty() || name.len() > MAX_LABEL_NAME_LENGTH {
        return Some(invalid(
            path,
            format!("name part must be between 1 and {MAX_LABEL_NAME_LENGTH} characters"),
        ));
    }
    if !QUALIFIED_NAME.is_match(name) {
        return Some(invalid(
            path,
            format!("'{name}' must consist of alphanumeric characters, '-', '_' or '.', and must start and end with an alphanumeric character"),
        ));
    }
    None
}

/// Check a label value. Empty values are allowed.
#[must_use]
pub fn validate_label_value(value: &str, path: &str) -> Option<ValidationError> {
    if value.is_empty() {
        return None;
    }
    if value.len() > MAX_LABEL_NAME_LENGTH || !QUALIFIED_NAME.is_match(value) {
        return Some(invalid(
            path,
            format!("label value '{value}' must be at most {MAX_LABEL_NAME_LENGTH} alphanumeric characters, '-', '_' or '.', starting and ending with an alphanumeric character"),
        ));
    }
    None
}

// ============================================================================
// Kind-specific rules
// ============================================================================

/// Rules for `Certificate` specs.
#[must_use]
pub fn validate_certificate_spec(spec: &CertificateSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if spec.secret_name.is_empty() {
        errors.push(missing("spec.secretName"));
    } else if let Some(error) = validate_dns1123_subdomain(&spec.secret_name, "spec.secretName") {
        errors.push(error);
    }
    errors.extend(validate_issuer_ref(&spec.issuer_ref, "spec.issuerRef"));

    let has_common_name = spec.common_name.as_deref().is_some_and(|cn| !cn.is_empty());
    let has_literal_subject = spec
        .literal_subject
        .as_deref()
        .is_some_and(|subject| !subject.is_empty());
    let has_identity = has_common_name
        || non_empty(&spec.dns_names)
        || non_empty(&spec.ip_addresses)
        || non_empty(&spec.uris)
        || non_empty(&spec.email_addresses)
        || spec.other_names.as_ref().is_some_and(|names| !names.is_empty())
        || has_literal_subject;
    if !has_identity {
        errors.push(invalid(
            ATTR_SPEC,
            "at least one of commonName, dnsNames, uris, emailAddresses, ipAddresses, otherNames or literalSubject must be set",
        ));
    }

    if has_literal_subject && (has_common_name || spec.subject.is_some()) {
        errors.push(invalid(
            "spec.literalSubject",
            "cannot be combined with commonName or subject",
        ));
    }

    for (index, address) in spec.ip_addresses.iter().flatten().enumerate() {
        if address.parse::<IpAddr>().is_err() {
            errors.push(invalid(
                &format!("spec.ipAddresses[{index}]"),
                format!("'{address}' is not a valid IP address"),
            ));
        }
    }

    for (index, uri) in spec.uris.iter().flatten().enumerate() {
        if let Some(error) = validate_url(uri, &format!("spec.uris[{index}]")) {
            errors.push(error);
        }
    }

    errors.extend(validate_duration(spec.duration.as_deref(), "spec.duration"));
    errors.extend(validate_duration(spec.renew_before.as_deref(), "spec.renewBefore"));

    if let Some(percentage) = spec.renew_before_percentage {
        if !(1..=99).contains(&percentage) {
            errors.push(invalid(
                "spec.renewBeforePercentage",
                "must be between 0 and 100 (exclusive)",
            ));
        }
    }

    if let Some(private_key) = &spec.private_key {
        // Zero selects the algorithm default.
        if let Some(size) = private_key.size.filter(|size| *size > 0) {
            let valid = match private_key.algorithm {
                None | Some(PrivateKeyAlgorithm::Rsa) => (2048..=8192).contains(&size),
                Some(PrivateKeyAlgorithm::Ecdsa) => matches!(size, 256 | 384 | 521),
                Some(PrivateKeyAlgorithm::Ed25519) => true,
            };
            if !valid {
                errors.push(invalid(
                    "spec.privateKey.size",
                    format!("{size} is not a valid key size for the selected algorithm"),
                ));
            }
        }
    }

    errors
}

/// Rules for `CertificateRequest` specs.
#[must_use]
pub fn validate_certificate_request_spec(spec: &CertificateRequestSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(validate_base64(&spec.request, "spec.request"));
    errors.extend(validate_issuer_ref(&spec.issuer_ref, "spec.issuerRef"));
    errors.extend(validate_duration(spec.duration.as_deref(), "spec.duration"));
    errors
}

/// Rules shared by `Issuer` and `ClusterIssuer` specs.
#[must_use]
pub fn validate_issuer_config<T: IssuerConfig>(spec: &T) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    let configured = spec.configured_types();
    match configured.len() {
        0 => errors.push(invalid(
            ATTR_SPEC,
            "exactly one of acme, ca, selfSigned, vault or venafi must be set",
        )),
        1 => {}
        _ => errors.push(invalid(
            ATTR_SPEC,
            format!(
                "exactly one issuer type may be set, found {}",
                configured.join(", ")
            ),
        )),
    }

    if let Some(acme) = spec.acme() {
        errors.extend(validate_url(&acme.server, "spec.acme.server"));
        if acme.private_key_secret_ref.name.is_empty() {
            errors.push(missing("spec.acme.privateKeySecretRef.name"));
        }
    }

    if let Some(vault) = spec.vault() {
        errors.extend(validate_url(&vault.server, "spec.vault.server"));
        if vault.path.is_empty() {
            errors.push(missing("spec.vault.path"));
        }
    }

    errors
}

/// Rules for `Challenge` specs.
#[must_use]
pub fn validate_challenge_spec(spec: &ChallengeSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(validate_url(&spec.authorization_url, "spec.authorizationURL"));
    errors.extend(validate_url(&spec.url, "spec.url"));
    for (value, path) in [
        (&spec.dns_name, "spec.dnsName"),
        (&spec.key, "spec.key"),
        (&spec.token, "spec.token"),
    ] {
        if value.is_empty() {
            errors.push(missing(path));
        }
    }
    errors.extend(validate_issuer_ref(&spec.issuer_ref, "spec.issuerRef"));
    errors
}

/// Rules for `Order` specs.
#[must_use]
pub fn validate_order_spec(spec: &OrderSpec) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    errors.extend(validate_base64(&spec.request, "spec.request"));
    errors.extend(validate_issuer_ref(&spec.issuer_ref, "spec.issuerRef"));
    for (index, address) in spec.ip_addresses.iter().flatten().enumerate() {
        if address.parse::<IpAddr>().is_err() {
            errors.push(invalid(
                &format!("spec.ipAddresses[{index}]"),
                format!("'{address}' is not a valid IP address"),
            ));
        }
    }
    errors.extend(validate_duration(spec.duration.as_deref(), "spec.duration"));
    errors
}

fn validate_issuer_ref(issuer_ref: &IssuerReference, path: &str) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    if issuer_ref.name.is_empty() {
        errors.push(missing(&format!("{path}.name")));
    }
    let external = issuer_ref
        .group
        .as_deref()
        .is_some_and(|group| !group.is_empty() && group != API_GROUP_CERT_MANAGER);
    if let Some(kind) = issuer_ref.kind.as_deref() {
        if !external && !kind.is_empty() && kind != KIND_ISSUER && kind != KIND_CLUSTER_ISSUER {
            errors.push(invalid(
                &format!("{path}.kind"),
                format!("'{kind}' must be Issuer or ClusterIssuer for cert-manager.io issuers"),
            ));
        }
    }
    errors
}

fn validate_url(value: &str, path: &str) -> Option<ValidationError> {
    if value.is_empty() {
        return Some(missing(path));
    }
    url::Url::parse(value)
        .err()
        .map(|e| invalid(path, format!("'{value}' is not a valid URL: {e}")))
}

fn validate_base64(value: &str, path: &str) -> Option<ValidationError> {
    if value.is_empty() {
        return Some(missing(path));
    }
    base64::engine::general_purpose::STANDARD
        .decode(value)
        .err()
        .map(|e| invalid(path, format!("must be base64 encoded: {e}")))
}

fn validate_duration(value: Option<&str>, path: &str) -> Option<ValidationError> {
    let value = value?;
    if GO_DURATION.is_match(value) {
        None
    } else {
        Some(invalid(
            path,
            format!("'{value}' is not a valid duration (e.g. 2160h, 90m, 1h30m)"),
        ))
    }
}

fn non_empty(values: &Option<Vec<String>>) -> bool {
    values.as_ref().is_some_and(|values| !values.is_empty())
}

fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

fn missing(path: &str) -> ValidationError {
    ValidationError::MissingAttribute {
        path: path.to_string(),
    }
}

fn invalid(path: &str, reason: impl Into<String>) -> ValidationError {
    ValidationError::InvalidValue {
        path: path.to_string(),
        reason: reason.into(),
    }
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod validation_tests;
