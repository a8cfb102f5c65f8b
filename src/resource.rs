// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Managed resource lifecycle.
//!
//! [`ResourceHandler`] is the object-safe interface the provider dispatches to;
//! [`KindResource`] implements it once, generically, for every [`ManagedKind`].
//!
//! # Lifecycle
//!
//! 1. `plan` validates the proposed document, fills defaults and reports the
//!    attributes whose change forces a replacement
//! 2. `create` / `update` server-side apply the object and merge the response
//! 3. `read` refreshes state; an object deleted out of band yields `None`
//! 4. `delete` removes the object, optionally waiting for finalizers to finish
//! 5. `import` adopts an existing object from its `namespace/name` identifier

use crate::errors::{ProviderError, Result};
use crate::import_id::ObjectId;
use crate::kinds::ManagedKind;
use crate::model::ResourceModel;
use crate::options::delete_params;
use crate::provider::ProviderContext;
use crate::schema::{resource_schema, Schema};
use crate::validation;
use async_trait::async_trait;
use serde_json::Value;
use std::marker::PhantomData;
use tracing::{debug, info, warn};

/// Paths whose change forces destroy-and-recreate.
pub const REPLACE_ON_CHANGE: [&str; 2] = ["metadata.name", "metadata.namespace"];

/// Result of planning a change.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanResult {
    /// Proposed state with defaults and computed attributes filled
    pub planned_state: Value,
    /// Attribute paths whose change requires replacing the object
    pub requires_replace: Vec<String>,
}

/// Operations of a managed resource type.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    /// Provider type name.
    fn type_name(&self) -> &'static str;

    /// Schema of the resource.
    fn schema(&self) -> Schema;

    /// Validate a configuration document without contacting the cluster.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Validation`] listing every problem found.
    fn validate(&self, config: &Value) -> Result<()>;

    /// Compute the planned state for `proposed`, given the `prior` state if the
    /// resource already exists.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Validation`] if `proposed` is invalid.
    fn plan(
        &self,
        ctx: &ProviderContext,
        prior: Option<&Value>,
        proposed: &Value,
    ) -> Result<PlanResult>;

    /// Create the object and return the new state.
    async fn create(&self, ctx: &ProviderContext, planned: &Value) -> Result<Value>;

    /// Refresh state from the cluster. `None` means the object is gone.
    async fn read(&self, ctx: &ProviderContext, current: &Value) -> Result<Option<Value>>;

    /// Update the object in place and return the new state.
    async fn update(&self, ctx: &ProviderContext, prior: &Value, planned: &Value)
        -> Result<Value>;

    /// Delete the object.
    async fn delete(&self, ctx: &ProviderContext, current: &Value) -> Result<()>;

    /// Adopt an existing object identified by `id`.
    async fn import(&self, ctx: &ProviderContext, id: &str) -> Result<Value>;
}

/// [`ResourceHandler`] for a single kind.
pub struct KindResource<K> {
    kind: PhantomData<fn() -> K>,
}

impl<K> KindResource<K> {
    #[must_use]
    pub fn new() -> Self {
        Self { kind: PhantomData }
    }
}

impl<K> Default for KindResource<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ManagedKind> KindResource<K> {
    /// Parse state previously written by this provider.
    ///
    /// Stored state is trusted: it is only checked for shape, not revalidated.
    fn stored_model(state: &Value) -> Result<ResourceModel<K::Spec>> {
        serde_json::from_value(state.clone())
            .map_err(|e| ProviderError::serialization(format!("{} state", K::TYPE_NAME), e))
    }

    async fn apply(&self, ctx: &ProviderContext, planned: &Value) -> Result<Value> {
        let client = ctx.client()?;
        let mut model = validation::resource_model::<K>(planned)?;
        model.apply_defaults::<K>(ctx.field_manager());

        let id = model.metadata.object_id();
        let body = model.to_object::<K>()?;
        let params = model.apply_options(ctx.field_manager()).patch_params();

        let object = client.apply::<K>(&id, &body, &params).await?;
        model.merge_object(&object)?;
        model.to_value()
    }
}

#[async_trait]
impl<K: ManagedKind> ResourceHandler for KindResource<K> {
    fn type_name(&self) -> &'static str {
        K::TYPE_NAME
    }

    fn schema(&self) -> Schema {
        resource_schema::<K>()
    }

    fn validate(&self, config: &Value) -> Result<()> {
        validation::resource_model::<K>(config).map(|_| ())
    }

    fn plan(
        &self,
        ctx: &ProviderContext,
        prior: Option<&Value>,
        proposed: &Value,
    ) -> Result<PlanResult> {
        let mut model = validation::resource_model::<K>(proposed)?;
        model.apply_defaults::<K>(ctx.field_manager());

        let mut requires_replace = Vec::new();
        if let Some(prior) = prior {
            let prior = Self::stored_model(prior)?;

            if prior.metadata.name != model.metadata.name {
                requires_replace.push(REPLACE_ON_CHANGE[0].to_string());
            }
            if prior.metadata.namespace != model.metadata.namespace {
                requires_replace.push(REPLACE_ON_CHANGE[1].to_string());
            }

            if requires_replace.is_empty() {
                model.metadata.uid = prior.metadata.uid;
                model.metadata.resource_version = prior.metadata.resource_version;
                model.metadata.generation = prior.metadata.generation;
            }
        }

        debug!(
            type_name = K::TYPE_NAME,
            id = ?model.id,
            requires_replace = ?requires_replace,
            "Planned resource"
        );

        Ok(PlanResult {
            planned_state: model.to_value()?,
            requires_replace,
        })
    }

    async fn create(&self, ctx: &ProviderContext, planned: &Value) -> Result<Value> {
        let state = self.apply(ctx, planned).await?;
        info!(type_name = K::TYPE_NAME, id = ?state.get("id"), "Created resource");
        Ok(state)
    }

    async fn read(&self, ctx: &ProviderContext, current: &Value) -> Result<Option<Value>> {
        let client = ctx.client()?;
        let mut model = Self::stored_model(current)?;
        let id = model.metadata.object_id();

        match client.get::<K>(&id).await? {
            Some(object) => {
                model.merge_object(&object)?;
                model.apply_defaults::<K>(ctx.field_manager());
                model.to_value().map(Some)
            }
            None => {
                warn!(
                    type_name = K::TYPE_NAME,
                    id = %id,
                    "Resource no longer exists, removing from state"
                );
                Ok(None)
            }
        }
    }

    async fn update(
        &self,
        ctx: &ProviderContext,
        prior: &Value,
        planned: &Value,
    ) -> Result<Value> {
        let prior_id = Self::stored_model(prior)?.metadata.object_id();
        let state = self.apply(ctx, planned).await?;
        info!(
            type_name = K::TYPE_NAME,
            prior_id = %prior_id,
            id = ?state.get("id"),
            "Updated resource"
        );
        Ok(state)
    }

    async fn delete(&self, ctx: &ProviderContext, current: &Value) -> Result<()> {
        let client = ctx.client()?;
        let model = Self::stored_model(current)?;
        let id = model.metadata.object_id();

        let deleted = client
            .delete::<K>(&id, &delete_params(model.deletion_propagation))
            .await?;

        if deleted && model.wait_for_deletion.unwrap_or_default() {
            client.wait_until_gone::<K>(&id).await?;
        }

        info!(type_name = K::TYPE_NAME, id = %id, "Deleted resource");
        Ok(())
    }

    async fn import(&self, ctx: &ProviderContext, id: &str) -> Result<Value> {
        let client = ctx.client()?;
        let object_id = ObjectId::parse(id, K::SCOPE)?;

        let object = client
            .get::<K>(&object_id)
            .await?
            .ok_or_else(|| ProviderError::NotFound {
                kind: K::kind(&()).into_owned(),
                id: object_id.to_string(),
            })?;

        let model = ResourceModel::<K::Spec>::from_object::<K>(&object, ctx.field_manager())?;
        info!(type_name = K::TYPE_NAME, id = %object_id, "Imported resource");
        model.to_value()
    }
}

#[cfg(test)]
#[path = "resource_tests.rs"]
mod resource_tests;
