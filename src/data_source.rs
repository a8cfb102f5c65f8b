// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Data sources: read an existing object, or render a manifest offline.

use crate::constants::MANIFEST_SUFFIX;
use crate::errors::{ProviderError, Result};
use crate::kinds::ManagedKind;
use crate::model::DataSourceModel;
use crate::provider::ProviderContext;
use crate::schema::{data_source_schema, manifest_schema, Schema};
use crate::validation;
use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::debug;

/// Operations of a data source type.
#[async_trait]
pub trait DataSourceHandler: Send + Sync {
    /// Provider type name.
    fn type_name(&self) -> String;

    /// Schema of the data source.
    fn schema(&self) -> Schema;

    /// Validate a configuration document without contacting the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Validation`] listing every problem found.
    fn validate(&self, config: &Value) -> Result<()>;

    /// Compute the data source result for `config`.
    async fn read(&self, ctx: &ProviderContext, config: &Value) -> Result<Value>;
}

/// Data source that reads a `K` object from the cluster.
pub struct KindDataSource<K> {
    kind: PhantomData<fn() -> K>,
}

impl<K> KindDataSource<K> {
    #[must_use]
    pub fn new() -> Self {
        Self { kind: PhantomData }
    }
}

impl<K> Default for KindDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<K: ManagedKind> DataSourceHandler for KindDataSource<K> {
    fn type_name(&self) -> String {
        K::TYPE_NAME.to_string()
    }

    fn schema(&self) -> Schema {
        data_source_schema::<K>()
    }

    fn validate(&self, config: &Value) -> Result<()> {
        validation::lookup_metadata::<K>(config).map(|_| ())
    }

    async fn read(&self, ctx: &ProviderContext, config: &Value) -> Result<Value> {
        let client = ctx.client()?;
        let metadata = validation::lookup_metadata::<K>(config)?;
        let id = metadata.object_id();

        let object = client
            .get::<K>(&id)
            .await?
            .ok_or_else(|| ProviderError::NotFound {
                kind: K::kind(&()).into_owned(),
                id: id.to_string(),
            })?;

        debug!(type_name = K::TYPE_NAME, id = %id, "Read data source");
        let model = DataSourceModel::<K::Spec>::from_object::<K>(&object)?;
        serde_json::to_value(model)
            .map_err(|e| ProviderError::serialization("data source state", e))
    }
}

/// Data source that renders a `K` manifest as YAML without cluster access.
pub struct ManifestDataSource<K> {
    kind: PhantomData<fn() -> K>,
}

impl<K> ManifestDataSource<K> {
    #[must_use]
    pub fn new() -> Self {
        Self { kind: PhantomData }
    }
}

impl<K> Default for ManifestDataSource<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ManagedKind> ManifestDataSource<K> {
    /// Render the manifest state for `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` is invalid or cannot be rendered.
    pub fn render(config: &Value) -> Result<Value> {
        let mut model = validation::manifest_model::<K>(config)?;
        model.render::<K>()?;
        serde_json::to_value(model).map_err(|e| ProviderError::serialization("manifest state", e))
    }
}

#[async_trait]
impl<K: ManagedKind> DataSourceHandler for ManifestDataSource<K> {
    fn type_name(&self) -> String {
        format!("{}{MANIFEST_SUFFIX}", K::TYPE_NAME)
    }

    fn schema(&self) -> Schema {
        manifest_schema::<K>()
    }

    fn validate(&self, config: &Value) -> Result<()> {
        validation::manifest_model::<K>(config).map(|_| ())
    }

    async fn read(&self, _ctx: &ProviderContext, config: &Value) -> Result<Value> {
        Self::render(config)
    }
}

#[cfg(test)]
#[path = "data_source_tests.rs"]
mod data_source_tests;
