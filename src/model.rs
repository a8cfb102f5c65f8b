// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider state documents.
//!
//! A state document is the JSON shape a resource or data source reads and writes.
//! Provider attributes (`id`, `field_manager`, `force_conflicts`, ...) are
//! snake_case; everything under `spec` keeps the CRD's own camelCase so that label
//! and annotation keys inside the spec are never rewritten.
//!
//! # Example
//!
//! ```json
//! {
//!   "id": "default/example-com",
//!   "field_manager": "certmanager-provider",
//!   "force_conflicts": false,
//!   "api_version": "cert-manager.io/v1",
//!   "kind": "Certificate",
//!   "metadata": { "name": "example-com", "namespace": "default" },
//!   "spec": {
//!     "secretName": "example-com-tls",
//!     "issuerRef": { "name": "letsencrypt", "kind": "ClusterIssuer" },
//!     "dnsNames": ["example.com"]
//!   }
//! }
//! ```

use crate::constants::{DEFAULT_FORCE_CONFLICTS, DEFAULT_WAIT_FOR_DELETION};
use crate::errors::{ProviderError, Result};
use crate::import_id::ObjectId;
use crate::kinds::ManagedKind;
use crate::options::{ApplyOptions, DeletionPropagation};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

/// The `metadata` block of every state document.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ObjectMetadataModel {
    /// Object name.
    #[serde(default)]
    pub name: String,

    /// Object namespace. Unset for cluster-scoped kinds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,

    /// Computed: UID assigned by the API server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Computed: resource version of the last observed object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_version: Option<String>,

    /// Computed: generation of the last observed object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generation: Option<i64>,
}

impl ObjectMetadataModel {
    /// Identifier of the object this metadata names.
    #[must_use]
    pub fn object_id(&self) -> ObjectId {
        ObjectId {
            namespace: self.namespace.clone(),
            name: self.name.clone(),
        }
    }

    /// Metadata sent to the API server. Computed fields are never sent: a
    /// `resourceVersion` in an apply body turns it into a conditional update.
    #[must_use]
    pub fn to_object_meta(&self) -> ObjectMeta {
        ObjectMeta {
            name: Some(self.name.clone()),
            namespace: self.namespace.clone(),
            labels: self.labels.clone(),
            annotations: self.annotations.clone(),
            ..Default::default()
        }
    }

    /// Metadata as observed on an API object.
    #[must_use]
    pub fn from_object_meta(meta: ObjectMeta) -> Self {
        Self {
            name: meta.name.unwrap_or_default(),
            namespace: meta.namespace,
            labels: meta.labels.filter(|labels| !labels.is_empty()),
            annotations: meta.annotations.filter(|annotations| !annotations.is_empty()),
            uid: meta.uid,
            resource_version: meta.resource_version,
            generation: meta.generation,
        }
    }

    /// Drop computed fields, keeping only what a user configures.
    #[must_use]
    pub fn configured_only(&self) -> Self {
        Self {
            name: self.name.clone(),
            namespace: self.namespace.clone(),
            labels: self.labels.clone(),
            annotations: self.annotations.clone(),
            ..Default::default()
        }
    }
}

/// State document of a managed resource.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ResourceModel<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_manager: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub force_conflicts: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deletion_propagation: Option<DeletionPropagation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wait_for_deletion: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub metadata: ObjectMetadataModel,

    pub spec: S,
}

impl<S> ResourceModel<S>
where
    S: Serialize + DeserializeOwned,
{
    /// Fill computed and defaulted attributes.
    ///
    /// `api_version` and `kind` are always overwritten with the constants of `K`,
    /// whatever the document said. `id` is derived from `metadata`.
    pub fn apply_defaults<K>(&mut self, provider_field_manager: Option<&str>)
    where
        K: ManagedKind<Spec = S>,
    {
        let options = ApplyOptions::resolve(
            self.field_manager.as_deref(),
            self.force_conflicts,
            provider_field_manager,
        );
        self.field_manager = Some(options.field_manager);
        self.force_conflicts = Some(options.force);
        self.wait_for_deletion = Some(self.wait_for_deletion.unwrap_or(DEFAULT_WAIT_FOR_DELETION));
        self.api_version = Some(K::api_version(&()).into_owned());
        self.kind = Some(K::kind(&()).into_owned());
        self.id = Some(self.metadata.object_id().to_string());
    }

    /// Options for the server-side apply request of this document.
    #[must_use]
    pub fn apply_options(&self, provider_field_manager: Option<&str>) -> ApplyOptions {
        ApplyOptions::resolve(
            self.field_manager.as_deref(),
            self.force_conflicts,
            provider_field_manager,
        )
    }

    /// Kubernetes object body for this document.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec cannot be serialized.
    pub fn to_object<K>(&self) -> Result<Value>
    where
        K: ManagedKind<Spec = S>,
    {
        build_object::<K>(&self.metadata, &self.spec)
    }

    /// Copy `metadata` and `spec` from an API object into this document.
    ///
    /// Provider options, `id`, `api_version` and `kind` are left untouched. An
    /// object without a `spec` keeps the current spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the object's metadata or spec does not match the typed schema.
    pub fn merge_object(&mut self, object: &Value) -> Result<()> {
        self.metadata = metadata_from_object(object)?;
        if let Some(spec) = spec_from_object::<S>(object)? {
            self.spec = spec;
        }
        Ok(())
    }

    /// Build a complete document from an API object, with provider defaults.
    ///
    /// Used by import, where nothing but the object itself is known.
    ///
    /// # Errors
    ///
    /// Returns an error if the object has no spec or does not match the typed schema.
    pub fn from_object<K>(object: &Value, provider_field_manager: Option<&str>) -> Result<Self>
    where
        K: ManagedKind<Spec = S>,
    {
        let spec = spec_from_object::<S>(object)?.ok_or_else(|| {
            ProviderError::serialization(
                format!("{} object", K::kind(&())),
                serde::de::Error::missing_field("spec"),
            )
        })?;
        let mut model = Self {
            id: None,
            field_manager: None,
            force_conflicts: Some(DEFAULT_FORCE_CONFLICTS),
            deletion_propagation: None,
            wait_for_deletion: None,
            api_version: None,
            kind: None,
            metadata: metadata_from_object(object)?,
            spec,
        };
        model.apply_defaults::<K>(provider_field_manager);
        Ok(model)
    }

    /// Serialize this document.
    ///
    /// # Errors
    ///
    /// Returns an error if the spec cannot be serialized.
    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| ProviderError::serialization("resource state", e))
    }
}

/// State document of a data source that reads an existing object.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct DataSourceModel<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    pub metadata: ObjectMetadataModel,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spec: Option<S>,
}

impl<S> DataSourceModel<S>
where
    S: Serialize + DeserializeOwned,
{
    /// Build the data source result from an API object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object does not match the typed schema.
    pub fn from_object<K>(object: &Value) -> Result<Self>
    where
        K: ManagedKind<Spec = S>,
    {
        let metadata = metadata_from_object(object)?;
        Ok(Self {
            id: Some(metadata.object_id().to_string()),
            api_version: Some(K::api_version(&()).into_owned()),
            kind: Some(K::kind(&()).into_owned()),
            metadata,
            spec: spec_from_object::<S>(object)?,
        })
    }
}

/// State document of a manifest data source.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ManifestModel<S> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub metadata: ObjectMetadataModel,

    pub spec: S,

    /// Computed: rendered YAML manifest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml: Option<String>,
}

impl<S> ManifestModel<S>
where
    S: Serialize + DeserializeOwned,
{
    /// Render the manifest and fill `id` and `yaml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the object cannot be serialized to YAML.
    pub fn render<K>(&mut self) -> Result<()>
    where
        K: ManagedKind<Spec = S>,
    {
        let object = build_object::<K>(&self.metadata.configured_only(), &self.spec)?;
        self.yaml = Some(serde_yaml::to_string(&object)?);
        self.id = Some(self.metadata.object_id().to_string());
        Ok(())
    }
}

/// Kubernetes object body (`apiVersion`, `kind`, `metadata`, `spec`).
///
/// # Errors
///
/// Returns an error if the metadata or spec cannot be serialized.
pub fn build_object<K>(metadata: &ObjectMetadataModel, spec: &K::Spec) -> Result<Value>
where
    K: ManagedKind,
{
    let metadata = serde_json::to_value(metadata.to_object_meta())
        .map_err(|e| ProviderError::serialization("object metadata", e))?;
    let spec = serde_json::to_value(spec)
        .map_err(|e| ProviderError::serialization(format!("{} spec", K::kind(&())), e))?;

    Ok(json!({
        "apiVersion": K::api_version(&()),
        "kind": K::kind(&()),
        "metadata": metadata,
        "spec": spec,
    }))
}

/// Metadata of an API object.
///
/// # Errors
///
/// Returns an error if `metadata` does not deserialize as `ObjectMeta`.
pub fn metadata_from_object(object: &Value) -> Result<ObjectMetadataModel> {
    let meta = match object.get("metadata") {
        Some(metadata) => serde_json::from_value::<ObjectMeta>(metadata.clone())
            .map_err(|e| ProviderError::serialization("object metadata", e))?,
        None => ObjectMeta::default(),
    };
    Ok(ObjectMetadataModel::from_object_meta(meta))
}

/// Typed spec of an API object, `None` when the object has no spec.
///
/// # Errors
///
/// Returns an error if `spec` does not deserialize into `S`.
pub fn spec_from_object<S: DeserializeOwned>(object: &Value) -> Result<Option<S>> {
    match object.get("spec") {
        None | Some(Value::Null) => Ok(None),
        Some(spec) => serde_json::from_value(spec.clone())
            .map(Some)
            .map_err(|e| ProviderError::serialization("object spec", e)),
    }
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod model_tests;
