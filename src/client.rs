// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Dynamic Kubernetes client for the managed kinds.
//!
//! Every call goes through [`kube::Api<DynamicObject>`] addressed by the kind's
//! [`ApiResource`](kube::core::ApiResource), so one client serves all kinds. Calls
//! are wrapped in [`retry_api_call`] and objects are returned as plain JSON for the
//! state model to consume.

use crate::constants::{
    DEFAULT_DELETION_POLL_MILLIS, DEFAULT_DELETION_TIMEOUT_SECS, DEFAULT_RETRY_MAX_ELAPSED_SECS,
};
use crate::errors::{ProviderError, Result};
use crate::import_id::ObjectId;
use crate::kinds::ManagedKind;
use crate::retry::{backoff_with_budget, retry_api_call, ExponentialBackoff};
use kube::api::{ApiResource, DeleteParams, DynamicObject, Patch, PatchParams};
use kube::{Api, Client};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Kubernetes client shared by every resource and data source.
#[derive(Clone)]
pub struct DynamicClient {
    client: Client,
    retry_budget: Duration,
    deletion_timeout: Duration,
    deletion_poll_interval: Duration,
}

impl DynamicClient {
    /// Wrap a kube client with default retry and deletion timing.
    #[must_use]
    pub fn new(client: Client) -> Self {
        Self {
            client,
            retry_budget: Duration::from_secs(DEFAULT_RETRY_MAX_ELAPSED_SECS),
            deletion_timeout: Duration::from_secs(DEFAULT_DELETION_TIMEOUT_SECS),
            deletion_poll_interval: Duration::from_millis(DEFAULT_DELETION_POLL_MILLIS),
        }
    }

    /// Total time spent retrying transient errors per call. Zero disables retries.
    #[must_use]
    pub fn with_retry_budget(mut self, budget: Duration) -> Self {
        self.retry_budget = budget;
        self
    }

    /// How long [`DynamicClient::wait_until_gone`] waits, and how often it polls.
    #[must_use]
    pub fn with_deletion_timing(mut self, timeout: Duration, poll_interval: Duration) -> Self {
        self.deletion_timeout = timeout;
        self.deletion_poll_interval = poll_interval;
        self
    }

    fn backoff(&self) -> ExponentialBackoff {
        backoff_with_budget(Some(self.retry_budget))
    }

    fn api<K: ManagedKind>(&self, id: &ObjectId) -> Api<DynamicObject> {
        let resource = ApiResource::erase::<K>(&());
        match id.namespace.as_deref() {
            Some(namespace) => Api::namespaced_with(self.client.clone(), namespace, &resource),
            None => Api::all_with(self.client.clone(), &resource),
        }
    }

    /// Server-side apply `body` and return the object as stored by the API server.
    ///
    /// # Errors
    ///
    /// Returns an error if the API server rejects the apply (conflicts, invalid
    /// objects, missing CRDs) or transient errors outlast the retry budget.
    pub async fn apply<K: ManagedKind>(
        &self,
        id: &ObjectId,
        body: &Value,
        params: &PatchParams,
    ) -> Result<Value> {
        let api = self.api::<K>(id);
        let operation = format!("apply {} {id}", K::kind(&()));
        let patch = Patch::Apply(body);

        debug!(
            kind = %K::kind(&()),
            id = %id,
            field_manager = ?params.field_manager,
            force = params.force,
            "Applying object"
        );

        let object = retry_api_call(
            || api.patch(&id.name, params, &patch),
            &operation,
            self.backoff(),
        )
        .await?;

        info!(kind = %K::kind(&()), id = %id, "Applied object");
        to_json(&object)
    }

    /// Fetch an object, `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error for any API failure other than 404.
    pub async fn get<K: ManagedKind>(&self, id: &ObjectId) -> Result<Option<Value>> {
        let api = self.api::<K>(id);
        let operation = format!("get {} {id}", K::kind(&()));

        let object = retry_api_call(|| api.get_opt(&id.name), &operation, self.backoff()).await?;

        match object {
            Some(object) => to_json(&object).map(Some),
            None => {
                debug!(kind = %K::kind(&()), id = %id, "Object not found");
                Ok(None)
            }
        }
    }

    /// Delete an object.
    ///
    /// Returns `false` when the object was already gone.
    ///
    /// # Errors
    ///
    /// Returns an error for any API failure other than 404.
    pub async fn delete<K: ManagedKind>(
        &self,
        id: &ObjectId,
        params: &DeleteParams,
    ) -> Result<bool> {
        let api = self.api::<K>(id);
        let operation = format!("delete {} {id}", K::kind(&()));

        match retry_api_call(|| api.delete(&id.name, params), &operation, self.backoff()).await {
            Ok(_) => {
                info!(kind = %K::kind(&()), id = %id, "Deleted object");
                Ok(true)
            }
            Err(e) if e.is_not_found() => {
                debug!(kind = %K::kind(&()), id = %id, "Object already deleted");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Poll until the object no longer exists.
    ///
    /// Finalizers can keep an object around after deletion was accepted.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::DeletionTimeout`] if the object still exists after
    /// the deletion timeout.
    pub async fn wait_until_gone<K: ManagedKind>(&self, id: &ObjectId) -> Result<()> {
        let started = Instant::now();
        loop {
            if self.get::<K>(id).await?.is_none() {
                debug!(
                    kind = %K::kind(&()),
                    id = %id,
                    elapsed = ?started.elapsed(),
                    "Object is gone"
                );
                return Ok(());
            }
            if started.elapsed() >= self.deletion_timeout {
                return Err(ProviderError::DeletionTimeout {
                    kind: K::kind(&()).into_owned(),
                    id: id.to_string(),
                    timeout_secs: self.deletion_timeout.as_secs(),
                });
            }
            debug!(kind = %K::kind(&()), id = %id, "Waiting for object to be deleted");
            tokio::time::sleep(self.deletion_poll_interval).await;
        }
    }
}

fn to_json(object: &DynamicObject) -> Result<Value> {
    serde_json::to_value(object).map_err(|e| ProviderError::serialization("API object", e))
}
