// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Binding of each cert-manager CRD to a provider type name.
//!
//! Every supported Kind implements [`ManagedKind`]. The generic resource, data
//! source and schema code is written once against this trait; adding a Kind means
//! adding a CRD type in [`crate::crd`] and one impl here.

use crate::crd::{
    Certificate, CertificateRequest, CertificateRequestSpec, CertificateSpec, Challenge,
    ChallengeSpec, ClusterIssuer, ClusterIssuerSpec, Issuer, IssuerSpec, Order, OrderSpec,
};
use crate::errors::ValidationError;
use crate::import_id::Scope;
use crate::validation;
use kube::core::Resource;
use kube::CustomResourceExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt::Debug;

/// A CRD kind exposed as a resource and data source.
pub trait ManagedKind: Resource<DynamicType = ()> + CustomResourceExt + Send + Sync + 'static {
    /// Typed spec of the kind
    type Spec: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static;

    /// Provider type name, e.g. `k8s_cert_manager_io_certificate_v1`
    const TYPE_NAME: &'static str;

    /// Whether objects of this kind live in a namespace
    const SCOPE: Scope;

    /// One-line description used in schemas and docs
    const DESCRIPTION: &'static str;

    /// Kind-specific checks beyond the typed schema.
    fn validate_spec(_spec: &Self::Spec) -> Vec<ValidationError> {
        Vec::new()
    }
}

impl ManagedKind for Certificate {
    type Spec = CertificateSpec;
    const TYPE_NAME: &'static str = "k8s_cert_manager_io_certificate_v1";
    const SCOPE: Scope = Scope::Namespaced;
    const DESCRIPTION: &'static str = "A Certificate resource should be created to ensure an up to date and signed X.509 certificate is stored in the Kubernetes Secret resource named in spec.secretName.";

    fn validate_spec(spec: &Self::Spec) -> Vec<ValidationError> {
        validation::validate_certificate_spec(spec)
    }
}

impl ManagedKind for CertificateRequest {
    type Spec = CertificateRequestSpec;
    const TYPE_NAME: &'static str = "k8s_cert_manager_io_certificate_request_v1";
    const SCOPE: Scope = Scope::Namespaced;
    const DESCRIPTION: &'static str = "A CertificateRequest is used to request a signed certificate from one of the configured issuers.";

    fn validate_spec(spec: &Self::Spec) -> Vec<ValidationError> {
        validation::validate_certificate_request_spec(spec)
    }
}

impl ManagedKind for Issuer {
    type Spec = IssuerSpec;
    const TYPE_NAME: &'static str = "k8s_cert_manager_io_issuer_v1";
    const SCOPE: Scope = Scope::Namespaced;
    const DESCRIPTION: &'static str = "An Issuer represents a certificate issuing authority which can be referenced as part of issuerRef fields. It is scoped to a single namespace.";

    fn validate_spec(spec: &Self::Spec) -> Vec<ValidationError> {
        validation::validate_issuer_config(spec)
    }
}

impl ManagedKind for ClusterIssuer {
    type Spec = ClusterIssuerSpec;
    const TYPE_NAME: &'static str = "k8s_cert_manager_io_cluster_issuer_v1";
    const SCOPE: Scope = Scope::Cluster;
    const DESCRIPTION: &'static str = "A ClusterIssuer represents a certificate issuing authority which can be referenced as part of issuerRef fields. It is similar to an Issuer, however it is cluster-scoped.";

    fn validate_spec(spec: &Self::Spec) -> Vec<ValidationError> {
        validation::validate_issuer_config(spec)
    }
}

impl ManagedKind for Challenge {
    type Spec = ChallengeSpec;
    const TYPE_NAME: &'static str = "k8s_acme_cert_manager_io_challenge_v1";
    const SCOPE: Scope = Scope::Namespaced;
    const DESCRIPTION: &'static str =
        "Challenge is a type to represent a Challenge request with an ACME server";

    fn validate_spec(spec: &Self::Spec) -> Vec<ValidationError> {
        validation::validate_challenge_spec(spec)
    }
}

impl ManagedKind for Order {
    type Spec = OrderSpec;
    const TYPE_NAME: &'static str = "k8s_acme_cert_manager_io_order_v1";
    const SCOPE: Scope = Scope::Namespaced;
    const DESCRIPTION: &'static str = "Order is a type to represent an Order with an ACME server";

    fn validate_spec(spec: &Self::Spec) -> Vec<ValidationError> {
        validation::validate_order_spec(spec)
    }
}

#[cfg(test)]
#[path = "kinds_tests.rs"]
mod kinds_tests;
