// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Provider registry and shared context.
//!
//! [`Provider`] knows every resource and data source type and dispatches to them
//! by type name. [`ProviderContext`] carries what the handlers share: the
//! Kubernetes client (absent until the provider is configured) and the default
//! field manager.

use crate::config::{ConfigError, ProviderConfig};
use crate::client::DynamicClient;
use crate::crd::{Certificate, CertificateRequest, Challenge, ClusterIssuer, Issuer, Order};
use crate::data_source::{DataSourceHandler, KindDataSource, ManifestDataSource};
use crate::errors::{ProviderError, Result};
use crate::kinds::ManagedKind;
use crate::resource::{KindResource, ResourceHandler};
use crate::schema::ProviderSchema;
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::info;

/// State shared by every handler call.
#[derive(Clone, Default)]
pub struct ProviderContext {
    client: Option<DynamicClient>,
    field_manager: Option<String>,
}

impl ProviderContext {
    /// Context with a connected client.
    #[must_use]
    pub fn new(client: DynamicClient, field_manager: Option<String>) -> Self {
        Self {
            client: Some(client),
            field_manager,
        }
    }

    /// Context without cluster access. Offline operations (validate, plan,
    /// manifests) work; anything touching the API fails with
    /// [`ProviderError::NotConfigured`].
    #[must_use]
    pub fn offline(field_manager: Option<String>) -> Self {
        Self {
            client: None,
            field_manager,
        }
    }

    /// Connect to the cluster described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the kube configuration cannot be loaded or the client
    /// cannot be built.
    pub async fn connect(config: &ProviderConfig) -> std::result::Result<Self, ConfigError> {
        let kube_config = config.kube_config().await?;
        let client = kube::Client::try_from(kube_config)?;
        let client = DynamicClient::new(client)
            .with_retry_budget(config.retry_budget())
            .with_deletion_timing(config.deletion_timeout(), config.deletion_poll_interval());
        Ok(Self::new(client, config.field_manager.clone()))
    }

    /// The Kubernetes client.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::NotConfigured`] if the provider has no client.
    pub fn client(&self) -> Result<&DynamicClient> {
        self.client.as_ref().ok_or_else(|| {
            ProviderError::NotConfigured(
                "no Kubernetes client; configure the provider before calling the API".to_string(),
            )
        })
    }

    /// Provider-wide default field manager.
    #[must_use]
    pub fn field_manager(&self) -> Option<&str> {
        self.field_manager.as_deref()
    }
}

/// Registry of every resource and data source type.
pub struct Provider {
    context: ProviderContext,
    resources: BTreeMap<&'static str, Box<dyn ResourceHandler>>,
    data_sources: BTreeMap<String, Box<dyn DataSourceHandler>>,
}

impl Provider {
    /// Provider with every supported kind registered.
    #[must_use]
    pub fn new(context: ProviderContext) -> Self {
        let mut provider = Self {
            context,
            resources: BTreeMap::new(),
            data_sources: BTreeMap::new(),
        };
        provider.register::<Certificate>();
        provider.register::<CertificateRequest>();
        provider.register::<Issuer>();
        provider.register::<ClusterIssuer>();
        provider.register::<Challenge>();
        provider.register::<Order>();
        provider
    }

    /// Build a provider connected to the cluster described by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the Kubernetes client cannot be built.
    pub async fn configure(config: &ProviderConfig) -> std::result::Result<Self, ConfigError> {
        let provider = Self::new(ProviderContext::connect(config).await?);
        info!(
            resources = provider.resources.len(),
            data_sources = provider.data_sources.len(),
            field_manager = ?config.field_manager,
            "Provider configured"
        );
        Ok(provider)
    }

    /// Register the resource, data source and manifest data source of `K`.
    fn register<K: ManagedKind>(&mut self) {
        let data_source = KindDataSource::<K>::new();
        let manifest = ManifestDataSource::<K>::new();
        self.resources
            .insert(K::TYPE_NAME, Box::new(KindResource::<K>::new()));
        self.data_sources
            .insert(data_source.type_name(), Box::new(data_source));
        self.data_sources
            .insert(manifest.type_name(), Box::new(manifest));
    }

    #[must_use]
    pub fn context(&self) -> &ProviderContext {
        &self.context
    }

    /// Resource handler for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownResourceType`] if no resource has that name.
    pub fn resource(&self, type_name: &str) -> Result<&dyn ResourceHandler> {
        self.resources
            .get(type_name)
            .map(|handler| handler.as_ref())
            .ok_or_else(|| ProviderError::UnknownResourceType {
                type_name: type_name.to_string(),
            })
    }

    /// Data source handler for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownResourceType`] if no data source has that name.
    pub fn data_source(&self, type_name: &str) -> Result<&dyn DataSourceHandler> {
        self.data_sources
            .get(type_name)
            .map(|handler| handler.as_ref())
            .ok_or_else(|| ProviderError::UnknownResourceType {
                type_name: type_name.to_string(),
            })
    }

    /// Validate `config` against the resource or data source named `type_name`.
    ///
    /// Lookup data sources share their type name with a resource; the resource
    /// wins unless `data_source` is set. Names with no resource, such as the
    /// `_manifest` types, go to the data source.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::UnknownResourceType`] for an unregistered name and
    /// [`ProviderError::Validation`] when the configuration is invalid.
    pub fn validate(&self, type_name: &str, config: &Value, data_source: bool) -> Result<()> {
        if !data_source {
            if let Some(handler) = self.resources.get(type_name) {
                return handler.validate(config);
            }
        }
        self.data_source(type_name)?.validate(config)
    }

    /// Resource type names, sorted.
    pub fn resource_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.resources.keys().copied()
    }

    /// Data source type names, sorted.
    pub fn data_source_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.data_sources.keys().map(String::as_str)
    }

    /// Every schema the provider serves.
    #[must_use]
    pub fn schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: Some(ProviderConfig::schema()),
            resources: self
                .resources
                .iter()
                .map(|(name, handler)| ((*name).to_string(), handler.schema()))
                .collect(),
            data_sources: self
                .data_sources
                .iter()
                .map(|(name, handler)| (name.clone(), handler.schema()))
                .collect(),
        }
    }
}

#[cfg(test)]
#[path = "provider_tests.rs"]
mod provider_tests;
