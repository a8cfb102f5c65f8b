// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider schemas derived from the generated CRD OpenAPI.
//!
//! The attribute tree under `spec` is never written by hand: it is walked out of
//! `K::crd()` so it always matches the typed spec in [`crate::crd`]. The common
//! provider attributes (`id`, `field_manager`, `metadata`, ...) are wrapped around
//! it here.

use crate::constants::{
    ATTR_API_VERSION, ATTR_DELETION_PROPAGATION, ATTR_FIELD_MANAGER, ATTR_FORCE_CONFLICTS,
    ATTR_ID, ATTR_KIND, ATTR_METADATA, ATTR_SPEC, ATTR_WAIT_FOR_DELETION, ATTR_YAML,
};
use crate::import_id::Scope;
use crate::kinds::ManagedKind;
use crate::options::DeletionPropagation;
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::{
    JSONSchemaProps, JSONSchemaPropsOrArray, JSONSchemaPropsOrBool,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// Current schema version of every resource.
pub const SCHEMA_VERSION: i64 = 1;

/// Value type of an attribute.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Int64,
    Float64,
    Bool,
    /// Arbitrary JSON (preserve-unknown-fields blobs, int-or-string)
    Dynamic,
    List(Box<AttributeType>),
    Map(Box<AttributeType>),
    Object(BTreeMap<String, Attribute>),
}

/// A single attribute of a schema.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Attribute {
    #[serde(rename = "type")]
    pub attribute_type: AttributeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    /// A change of this attribute destroys and recreates the object
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub requires_replace: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<String>>,
}

impl Attribute {
    fn new(attribute_type: AttributeType, description: &str) -> Self {
        Self {
            attribute_type,
            description: (!description.is_empty()).then(|| description.to_string()),
            required: false,
            optional: false,
            computed: false,
            sensitive: false,
            requires_replace: false,
            enum_values: None,
        }
    }

    /// A required attribute.
    #[must_use]
    pub fn required(attribute_type: AttributeType, description: &str) -> Self {
        Self {
            required: true,
            ..Self::new(attribute_type, description)
        }
    }

    /// An optional attribute.
    #[must_use]
    pub fn optional(attribute_type: AttributeType, description: &str) -> Self {
        Self {
            optional: true,
            ..Self::new(attribute_type, description)
        }
    }

    /// An attribute only ever set by the provider.
    #[must_use]
    pub fn computed(attribute_type: AttributeType, description: &str) -> Self {
        Self {
            computed: true,
            ..Self::new(attribute_type, description)
        }
    }

    /// An optional attribute the provider fills when unset.
    #[must_use]
    pub fn optional_computed(attribute_type: AttributeType, description: &str) -> Self {
        Self {
            optional: true,
            computed: true,
            ..Self::new(attribute_type, description)
        }
    }

    #[must_use]
    fn replacing(mut self) -> Self {
        self.requires_replace = true;
        self
    }

    /// Same attribute, and every nested attribute, as computed only.
    #[must_use]
    pub fn into_computed(mut self) -> Self {
        self.required = false;
        self.optional = false;
        self.computed = true;
        self.requires_replace = false;
        if let AttributeType::Object(attributes) = self.attribute_type {
            self.attribute_type = AttributeType::Object(
                attributes
                    .into_iter()
                    .map(|(name, attribute)| (name, attribute.into_computed()))
                    .collect(),
            );
        }
        self
    }
}

/// Schema of one resource or data source.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Schema {
    pub version: i64,
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    /// Look up an attribute by dotted path, e.g. `metadata.name`.
    #[must_use]
    pub fn attribute(&self, path: &str) -> Option<&Attribute> {
        let mut segments = path.split('.');
        let mut current = self.attributes.get(segments.next()?)?;
        for segment in segments {
            match &current.attribute_type {
                AttributeType::Object(attributes) => current = attributes.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }
}

/// Every schema the provider serves.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ProviderSchema {
    pub provider: Option<Schema>,
    pub resources: BTreeMap<String, Schema>,
    pub data_sources: BTreeMap<String, Schema>,
}

// ============================================================================
// Per-kind schemas
// ============================================================================

/// Schema of the managed resource for `K`.
#[must_use]
pub fn resource_schema<K: ManagedKind>() -> Schema {
    let mut attributes = BTreeMap::new();

    attributes.insert(
        ATTR_ID.to_string(),
        Attribute::computed(
            AttributeType::String,
            "Object identifier: `namespace/name`, or `name` for cluster-scoped kinds.",
        ),
    );
    attributes.insert(
        ATTR_FIELD_MANAGER.to_string(),
        Attribute::optional_computed(
            AttributeType::String,
            "Field manager used for server-side apply. Defaults to the provider setting.",
        ),
    );
    attributes.insert(
        ATTR_FORCE_CONFLICTS.to_string(),
        Attribute::optional_computed(
            AttributeType::Bool,
            "Take ownership of fields managed by other field managers.",
        ),
    );
    attributes.insert(
        ATTR_DELETION_PROPAGATION.to_string(),
        Attribute {
            enum_values: Some(
                DeletionPropagation::VALUES
                    .iter()
                    .map(ToString::to_string)
                    .collect(),
            ),
            ..Attribute::optional(
                AttributeType::String,
                "Garbage collection policy for dependents when the object is deleted.",
            )
        },
    );
    attributes.insert(
        ATTR_WAIT_FOR_DELETION.to_string(),
        Attribute::optional_computed(
            AttributeType::Bool,
            "Wait until the object is gone from the cluster before completing delete.",
        ),
    );
    insert_type_attributes(&mut attributes);
    attributes.insert(
        ATTR_METADATA.to_string(),
        Attribute::required(metadata_type(K::SCOPE, true), "Standard object metadata."),
    );
    attributes.insert(
        ATTR_SPEC.to_string(),
        spec_attribute::<K>(),
    );

    Schema {
        version: SCHEMA_VERSION,
        description: K::DESCRIPTION.to_string(),
        attributes,
    }
}

/// Schema of the data source that reads an existing `K` object.
#[must_use]
pub fn data_source_schema<K: ManagedKind>() -> Schema {
    let mut attributes = BTreeMap::new();

    attributes.insert(
        ATTR_ID.to_string(),
        Attribute::computed(AttributeType::String, "Object identifier."),
    );
    insert_type_attributes(&mut attributes);

    let mut metadata = BTreeMap::new();
    metadata.insert(
        "name".to_string(),
        Attribute::required(AttributeType::String, "Name of the object to read."),
    );
    if K::SCOPE == Scope::Namespaced {
        metadata.insert(
            "namespace".to_string(),
            Attribute::required(AttributeType::String, "Namespace of the object to read."),
        );
    }
    for (name, attribute) in metadata_attributes(false) {
        metadata
            .entry(name)
            .or_insert_with(|| attribute.into_computed());
    }
    attributes.insert(
        ATTR_METADATA.to_string(),
        Attribute::required(AttributeType::Object(metadata), "Standard object metadata."),
    );
    attributes.insert(ATTR_SPEC.to_string(), spec_attribute::<K>().into_computed());

    Schema {
        version: SCHEMA_VERSION,
        description: format!("Reads an existing object. {}", K::DESCRIPTION),
        attributes,
    }
}

/// Schema of the `_manifest` data source for `K`.
#[must_use]
pub fn manifest_schema<K: ManagedKind>() -> Schema {
    let mut attributes = BTreeMap::new();

    attributes.insert(
        ATTR_ID.to_string(),
        Attribute::computed(AttributeType::String, "Object identifier."),
    );
    let metadata = metadata_attributes(false)
        .into_iter()
        .filter(|(_, attribute)| !attribute.computed)
        .filter(|(name, _)| K::SCOPE == Scope::Namespaced || name != "namespace")
        .collect();
    attributes.insert(
        ATTR_METADATA.to_string(),
        Attribute::required(AttributeType::Object(metadata), "Standard object metadata."),
    );
    attributes.insert(ATTR_SPEC.to_string(), spec_attribute::<K>());
    attributes.insert(
        ATTR_YAML.to_string(),
        Attribute::computed(AttributeType::String, "The rendered manifest as YAML."),
    );

    Schema {
        version: SCHEMA_VERSION,
        description: format!(
            "Renders a manifest without contacting the cluster. {}",
            K::DESCRIPTION
        ),
        attributes,
    }
}

fn insert_type_attributes(attributes: &mut BTreeMap<String, Attribute>) {
    attributes.insert(
        ATTR_API_VERSION.to_string(),
        Attribute::computed(AttributeType::String, "API group and version of the object."),
    );
    attributes.insert(
        ATTR_KIND.to_string(),
        Attribute::computed(AttributeType::String, "Kind of the object."),
    );
}

fn spec_attribute<K: ManagedKind>() -> Attribute {
    let spec = K::crd()
        .spec
        .versions
        .first()
        .and_then(|version| version.schema.as_ref())
        .and_then(|schema| schema.open_api_v3_schema.as_ref())
        .and_then(|schema| schema.properties.as_ref())
        .and_then(|properties| properties.get(ATTR_SPEC))
        .cloned();

    match spec {
        Some(spec) => Attribute::required(
            attribute_type(&spec),
            spec.description.as_deref().unwrap_or_default(),
        ),
        None => Attribute::required(AttributeType::Dynamic, ""),
    }
}

fn metadata_type(scope: Scope, replace_on_identity_change: bool) -> AttributeType {
    let mut attributes: BTreeMap<String, Attribute> =
        metadata_attributes(replace_on_identity_change);
    if scope == Scope::Cluster {
        attributes.remove("namespace");
    }
    AttributeType::Object(attributes)
}

fn metadata_attributes(replace_on_identity_change: bool) -> BTreeMap<String, Attribute> {
    let string_map = || AttributeType::Map(Box::new(AttributeType::String));
    let mut name = Attribute::required(
        AttributeType::String,
        "Name of the object, unique within its namespace.",
    );
    let mut namespace = Attribute::required(AttributeType::String, "Namespace of the object.");
    if replace_on_identity_change {
        name = name.replacing();
        namespace = namespace.replacing();
    }

    BTreeMap::from([
        ("name".to_string(), name),
        ("namespace".to_string(), namespace),
        (
            "labels".to_string(),
            Attribute::optional(
                string_map(),
                "Map of string keys and values used to organize and select objects.",
            ),
        ),
        (
            "annotations".to_string(),
            Attribute::optional(
                string_map(),
                "Unstructured key value map stored with the object.",
            ),
        ),
        (
            "uid".to_string(),
            Attribute::computed(
                AttributeType::String,
                "Unique identifier assigned by the API server.",
            ),
        ),
        (
            "resource_version".to_string(),
            Attribute::computed(
                AttributeType::String,
                "Resource version of the last observed object.",
            ),
        ),
        (
            "generation".to_string(),
            Attribute::computed(AttributeType::Int64, "Generation of the desired state."),
        ),
    ])
}

// ============================================================================
// OpenAPI walking
// ============================================================================

/// Attribute type of an OpenAPI schema node.
#[must_use]
pub fn attribute_type(props: &JSONSchemaProps) -> AttributeType {
    if props.x_kubernetes_int_or_string == Some(true) {
        return AttributeType::Dynamic;
    }
    if props.x_kubernetes_preserve_unknown_fields == Some(true) && props.properties.is_none() {
        return AttributeType::Dynamic;
    }

    match props.type_.as_deref() {
        Some("string") => AttributeType::String,
        Some("integer") => AttributeType::Int64,
        Some("number") => AttributeType::Float64,
        Some("boolean") => AttributeType::Bool,
        Some("array") => {
            let element = match &props.items {
                Some(JSONSchemaPropsOrArray::Schema(items)) => attribute_type(items),
                Some(JSONSchemaPropsOrArray::Schemas(items)) => items
                    .first()
                    .map_or(AttributeType::Dynamic, attribute_type),
                None => AttributeType::Dynamic,
            };
            AttributeType::List(Box::new(element))
        }
        Some("object") => object_type(props),
        Some(_) => AttributeType::Dynamic,
        None if props.properties.is_some() => object_type(props),
        None if props.enum_.is_some() => AttributeType::String,
        None => props
            .one_of
            .iter()
            .chain(props.any_of.iter())
            .flatten()
            .find(|candidate| candidate.type_.is_some() || candidate.enum_.is_some())
            .map_or(AttributeType::Dynamic, attribute_type),
    }
}

fn object_type(props: &JSONSchemaProps) -> AttributeType {
    if let Some(properties) = &props.properties {
        let required = props.required.as_deref().unwrap_or_default();
        let attributes = properties
            .iter()
            .map(|(name, child)| (name.clone(), child_attribute(child, required.contains(name))))
            .collect();
        return AttributeType::Object(attributes);
    }

    match &props.additional_properties {
        Some(JSONSchemaPropsOrBool::Schema(values)) => {
            AttributeType::Map(Box::new(attribute_type(values)))
        }
        Some(JSONSchemaPropsOrBool::Bool(true)) => {
            AttributeType::Map(Box::new(AttributeType::Dynamic))
        }
        _ => AttributeType::Dynamic,
    }
}

fn child_attribute(props: &JSONSchemaProps, required: bool) -> Attribute {
    let description = props.description.as_deref().unwrap_or_default();
    let mut attribute = if required {
        Attribute::required(attribute_type(props), description)
    } else {
        Attribute::optional(attribute_type(props), description)
    };

    let enum_values: Vec<String> = props
        .enum_
        .iter()
        .flatten()
        .filter_map(|value| value.0.as_str().map(ToString::to_string))
        .collect();
    if !enum_values.is_empty() {
        attribute.enum_values = Some(enum_values);
    }
    attribute
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod schema_tests;
