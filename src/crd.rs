// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Typed Custom Resource Definitions for cert-manager.
//!
//! These types mirror the OpenAPI shape of the upstream cert-manager CRDs. They are
//! the single source of truth for the provider: the provider schema is generated
//! from them, state documents are validated against them, and every apply body is
//! normalized by a round trip through them.
//!
//! # Resource Types
//!
//! ## cert-manager.io/v1
//!
//! - [`Certificate`] - Desired X.509 certificate, kept up to date in a Secret
//! - [`CertificateRequest`] - One-shot request of a certificate from an issuer
//! - [`Issuer`] - Namespaced certificate authority configuration
//! - [`ClusterIssuer`] - Cluster-wide certificate authority configuration
//!
//! ## acme.cert-manager.io/v1
//!
//! - [`Challenge`] - A single ACME challenge for one DNS name
//! - [`Order`] - An ACME order for a set of identifiers
//!
//! # Example
//!
//! ```rust,no_run
//! use certmanager_provider::crd::{CertificateSpec, IssuerReference};
//!
//! let spec = CertificateSpec {
//!     secret_name: "example-com-tls".to_string(),
//!     issuer_ref: IssuerReference {
//!         name: "letsencrypt".to_string(),
//!         kind: Some("ClusterIssuer".to_string()),
//!         group: None,
//!     },
//!     dns_names: Some(vec!["example.com".to_string(), "www.example.com".to_string()]),
//!     ..Default::default()
//! };
//! ```

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Schema for opaque objects whose structure is owned by another API (pod templates,
/// webhook solver configuration, ...).
fn preserve_unknown_fields(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "object",
        "x-kubernetes-preserve-unknown-fields": true
    })
}

/// Schema for lists of opaque objects.
fn preserve_unknown_fields_list(_: &mut schemars::SchemaGenerator) -> schemars::Schema {
    schemars::json_schema!({
        "type": "array",
        "items": {
            "type": "object",
            "x-kubernetes-preserve-unknown-fields": true
        }
    })
}

// ============================================================================
// Shared reference types
// ============================================================================

/// Reference to the issuer responsible for a certificate.
///
/// If `kind` is omitted the issuer is assumed to be a namespaced `Issuer`. `group`
/// defaults to `cert-manager.io` and only needs to be set for external issuers.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IssuerReference {
    /// Name of the issuer being referred to.
    pub name: String,

    /// Kind of the issuer being referred to (`Issuer` or `ClusterIssuer`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// Group of the issuer being referred to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

/// Reference to an object in the same namespace by name.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LocalObjectReference {
    /// Name of the resource being referred to.
    pub name: String,
}

/// Reference to a specific key of a Secret in the same namespace.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SecretKeySelector {
    /// Name of the Secret being referred to.
    pub name: String,

    /// Key of the entry in the Secret's `data` field. Some issuers provide a
    /// default when this is omitted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

/// Service account used to request a bound token.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAccountRef {
    /// Name of the ServiceAccount used to request a token.
    pub name: String,

    /// Additional audiences added to the requested token.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audiences: Option<Vec<String>>,
}

// ============================================================================
// Certificate
// ============================================================================

/// Key usages requested for an issued certificate.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum KeyUsage {
    #[serde(rename = "signing")]
    Signing,
    #[serde(rename = "digital signature")]
    DigitalSignature,
    #[serde(rename = "content commitment")]
    ContentCommitment,
    #[serde(rename = "key encipherment")]
    KeyEncipherment,
    #[serde(rename = "key agreement")]
    KeyAgreement,
    #[serde(rename = "data encipherment")]
    DataEncipherment,
    #[serde(rename = "cert sign")]
    CertSign,
    #[serde(rename = "crl sign")]
    CrlSign,
    #[serde(rename = "encipher only")]
    EncipherOnly,
    #[serde(rename = "decipher only")]
    DecipherOnly,
    #[serde(rename = "any")]
    Any,
    #[serde(rename = "server auth")]
    ServerAuth,
    #[serde(rename = "client auth")]
    ClientAuth,
    #[serde(rename = "code signing")]
    CodeSigning,
    #[serde(rename = "email protection")]
    EmailProtection,
    #[serde(rename = "s/mime")]
    Smime,
    #[serde(rename = "ipsec end system")]
    IpsecEndSystem,
    #[serde(rename = "ipsec tunnel")]
    IpsecTunnel,
    #[serde(rename = "ipsec user")]
    IpsecUser,
    #[serde(rename = "timestamping")]
    Timestamping,
    #[serde(rename = "ocsp signing")]
    OcspSigning,
    #[serde(rename = "microsoft sgc")]
    MicrosoftSgc,
    #[serde(rename = "netscape sgc")]
    NetscapeSgc,
}

/// Private key algorithm.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum PrivateKeyAlgorithm {
    #[serde(rename = "RSA")]
    Rsa,
    #[serde(rename = "ECDSA")]
    Ecdsa,
    Ed25519,
}

/// Private key encoding written to the Secret.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum PrivateKeyEncoding {
    #[serde(rename = "PKCS1")]
    Pkcs1,
    #[serde(rename = "PKCS8")]
    Pkcs8,
}

/// Whether the private key is regenerated on every re-issuance.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum PrivateKeyRotationPolicy {
    Never,
    Always,
}

/// Options controlling the private key stored in the certificate Secret.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificatePrivateKey {
    /// Private key algorithm. Defaults to `RSA`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<PrivateKeyAlgorithm>,

    /// Private key encoding. Defaults to `PKCS1`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<PrivateKeyEncoding>,

    /// Rotation policy applied on re-issuance. Defaults to `Always`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation_policy: Option<PrivateKeyRotationPolicy>,

    /// Key bit size (RSA) or curve size (ECDSA). Ignored for Ed25519.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<i32>,
}

/// X.509 subject fields.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct X509Subject {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizations: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub countries: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizational_units: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub localities: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provinces: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street_addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_codes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serial_number: Option<String>,
}

/// Labels and annotations copied onto the generated certificate Secret.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSecretTemplate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub annotations: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,
}

/// JKS keystore written alongside the PEM data.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct JksKeystore {
    /// Whether the keystore is created.
    pub create: bool,

    /// Secret key holding the keystore password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_secret_ref: Option<SecretKeySelector>,

    /// Alias of the private key entry. Defaults to `certificate`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

/// PKCS12 encryption profile.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum Pkcs12Profile {
    #[serde(rename = "LegacyRC2")]
    LegacyRc2,
    #[serde(rename = "LegacyDES")]
    LegacyDes,
    Modern2023,
}

/// PKCS12 keystore written alongside the PEM data.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pkcs12Keystore {
    /// Whether the keystore is created.
    pub create: bool,

    /// Secret key holding the keystore password.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_secret_ref: Option<SecretKeySelector>,

    /// Encryption profile. Defaults to `LegacyRC2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<Pkcs12Profile>,
}

/// Additional keystore formats.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateKeystores {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jks: Option<JksKeystore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkcs12: Option<Pkcs12Keystore>,
}

/// Extra output format written to the certificate Secret.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum OutputFormatType {
    #[serde(rename = "DER")]
    Der,
    #[serde(rename = "CombinedPEM")]
    CombinedPem,
}

#[derive(Clone, Debug, Serialize, Deserialize, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateAdditionalOutputFormat {
    /// Output format to write.
    pub r#type: OutputFormatType,
}

/// Subject alternative name of type `otherName`.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OtherName {
    /// Object identifier of the name type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub oid: Option<String>,

    /// UTF-8 value of the name.
    #[serde(rename = "utf8Value", skip_serializing_if = "Option::is_none")]
    pub utf8_value: Option<String>,
}

/// One side (permitted or excluded) of an X.509 name constraint.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NameConstraintItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_domains: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_ranges: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uri_domains: Option<Vec<String>>,
}

/// X.509 name constraints for CA certificates.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NameConstraints {
    /// Whether the extension is marked critical.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub critical: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub permitted: Option<NameConstraintItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded: Option<NameConstraintItem>,
}

/// `Certificate` is the desired state of an X.509 certificate.
///
/// cert-manager keeps the certificate and its private key up to date in the Secret
/// named by `secretName`, obtaining it from the referenced issuer.
///
/// # Example
///
/// ```yaml
/// apiVersion: cert-manager.io/v1
/// kind: Certificate
/// metadata:
///   name: example-com
///   namespace: default
/// spec:
///   secretName: example-com-tls
///   dnsNames:
///     - example.com
///   issuerRef:
///     name: letsencrypt
///     kind: ClusterIssuer
/// ```
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "cert-manager.io",
    version = "v1",
    kind = "Certificate",
    plural = "certificates",
    shortname = "cert",
    namespaced,
    doc = "A Certificate resource should be created to ensure an up to date and signed X.509 certificate is stored in the Kubernetes Secret resource named in spec.secretName."
)]
#[serde(rename_all = "camelCase")]
pub struct CertificateSpec {
    /// Name of the Secret that will be populated with the signed certificate.
    pub secret_name: String,

    /// Issuer used to obtain the certificate.
    pub issuer_ref: IssuerReference,

    /// Common name to be used on the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    /// DNS subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_names: Option<Vec<String>>,

    /// IP address subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<Vec<String>>,

    /// URI subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uris: Option<Vec<String>>,

    /// Email subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_addresses: Option<Vec<String>>,

    /// `otherName` subject alternative names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub other_names: Option<Vec<OtherName>>,

    /// Requested lifetime of the certificate, as a Go duration string (e.g. `2160h`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// How long before expiry the certificate is renewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_before: Option<String>,

    /// Renewal point expressed as a percentage of the certificate lifetime.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub renew_before_percentage: Option<i32>,

    /// Whether the certificate is a CA certificate.
    #[serde(rename = "isCA", skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,

    /// Requested key usages and extended key usages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usages: Option<Vec<KeyUsage>>,

    /// Private key options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_key: Option<CertificatePrivateKey>,

    /// Full X.509 subject.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<X509Subject>,

    /// Subject as an RFC 4514 string. Mutually exclusive with `subject` and `commonName`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub literal_subject: Option<String>,

    /// Labels and annotations for the generated Secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_template: Option<CertificateSecretTemplate>,

    /// Additional keystores written to the Secret.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keystores: Option<CertificateKeystores>,

    /// Number of CertificateRequest revisions kept in history.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revision_history_limit: Option<i32>,

    /// Extra output formats for the private key and certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_output_formats: Option<Vec<CertificateAdditionalOutputFormat>>,

    /// Name constraints (CA certificates only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_constraints: Option<NameConstraints>,

    /// Whether key usages are encoded into the CSR.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encode_usages_in_request: Option<bool>,
}

// ============================================================================
// CertificateRequest
// ============================================================================

/// `CertificateRequest` asks an issuer to sign a PEM-encoded CSR.
///
/// Unlike [`Certificate`], a request is one-shot: it is fulfilled once and never
/// renewed. `username`, `uid`, `groups` and `extra` are populated by the cert-manager
/// admission webhook and are normally left unset.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "cert-manager.io",
    version = "v1",
    kind = "CertificateRequest",
    plural = "certificaterequests",
    shortname = "cr",
    namespaced,
    doc = "A CertificateRequest is used to request a signed certificate from one of the configured issuers."
)]
#[serde(rename_all = "camelCase")]
pub struct CertificateRequestSpec {
    /// Base64-encoded PEM certificate signing request.
    pub request: String,

    /// Issuer that should sign the request.
    pub issuer_ref: IssuerReference,

    /// Requested lifetime of the certificate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    /// Whether the certificate is a CA certificate.
    #[serde(rename = "isCA", skip_serializing_if = "Option::is_none")]
    pub is_ca: Option<bool>,

    /// Requested key usages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usages: Option<Vec<KeyUsage>>,

    /// Name of the user that created the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// UID of the user that created the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,

    /// Group memberships of the user that created the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<String>>,

    /// Extra attributes of the user that created the request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<BTreeMap<String, Vec<String>>>,
}

// ============================================================================
// Issuer / ClusterIssuer
// ============================================================================

/// Selects which certificates an ACME solver applies to.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CertificateDnsNameSelector {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub match_labels: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_names: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_zones: Option<Vec<String>>,
}

/// HTTP-01 solver backed by an Ingress.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeChallengeSolverHttp01Ingress {
    /// Ingress class annotation value for the solver Ingress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    /// `spec.ingressClassName` of the solver Ingress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress_class_name: Option<String>,

    /// Existing Ingress to edit instead of creating a new one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Service type of the solver Service. Defaults to `NodePort`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    /// Overrides for the solver Pod.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "preserve_unknown_fields")]
    pub pod_template: Option<serde_json::Value>,

    /// Overrides for the solver Ingress.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "preserve_unknown_fields")]
    pub ingress_template: Option<serde_json::Value>,
}

/// HTTP-01 solver backed by a Gateway API HTTPRoute.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeChallengeSolverHttp01GatewayHttpRoute {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<BTreeMap<String, String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_type: Option<String>,

    /// Gateways the HTTPRoute attaches to.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "preserve_unknown_fields_list")]
    pub parent_refs: Option<serde_json::Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "preserve_unknown_fields")]
    pub pod_template: Option<serde_json::Value>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeChallengeSolverHttp01 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingress: Option<AcmeChallengeSolverHttp01Ingress>,

    #[serde(rename = "gatewayHTTPRoute", skip_serializing_if = "Option::is_none")]
    pub gateway_http_route: Option<AcmeChallengeSolverHttp01GatewayHttpRoute>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderAcmeDns {
    pub host: String,
    pub account_secret_ref: SecretKeySelector,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderAkamai {
    pub service_consumer_domain: String,
    pub client_token_secret_ref: SecretKeySelector,
    pub client_secret_secret_ref: SecretKeySelector,
    pub access_token_secret_ref: SecretKeySelector,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AzureManagedIdentity {
    #[serde(rename = "clientID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(rename = "resourceID", skip_serializing_if = "Option::is_none")]
    pub resource_id: Option<String>,
    #[serde(rename = "tenantID", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderAzureDns {
    #[serde(rename = "subscriptionID")]
    pub subscription_id: String,
    pub resource_group_name: String,
    #[serde(rename = "clientID", skip_serializing_if = "Option::is_none")]
    pub client_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_secret_secret_ref: Option<SecretKeySelector>,
    #[serde(rename = "tenantID", skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_zone_name: Option<String>,
    /// Azure cloud environment, e.g. `AzurePublicCloud`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub environment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_identity: Option<AzureManagedIdentity>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderCloudDns {
    pub project: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_zone_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderCloudflare {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_token_secret_ref: Option<SecretKeySelector>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderDigitalOcean {
    pub token_secret_ref: SecretKeySelector,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderRfc2136 {
    /// Nameserver address (`host` or `host:port`).
    pub nameserver: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsig_key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsig_algorithm: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tsig_secret_secret_ref: Option<SecretKeySelector>,
    /// `TCP` or `UDP`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protocol: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route53KubernetesAuth {
    pub service_account_ref: ServiceAccountRef,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Route53Auth {
    pub kubernetes: Route53KubernetesAuth,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderRoute53 {
    #[serde(rename = "accessKeyID", skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(rename = "accessKeyIDSecretRef", skip_serializing_if = "Option::is_none")]
    pub access_key_id_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "hostedZoneID", skip_serializing_if = "Option::is_none")]
    pub hosted_zone_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<Route53Auth>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuerDns01ProviderWebhook {
    /// API group of the webhook solver.
    pub group_name: String,
    /// Name of the solver within the webhook.
    pub solver_name: String,
    /// Solver-specific configuration passed through verbatim.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schemars(schema_with = "preserve_unknown_fields")]
    pub config: Option<serde_json::Value>,
}

/// CNAME handling for DNS-01 challenges.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub enum CnameStrategy {
    None,
    Follow,
}

/// DNS-01 solver configuration. Exactly one provider should be set.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeChallengeSolverDns01 {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cname_strategy: Option<CnameStrategy>,
    #[serde(rename = "acmeDNS", skip_serializing_if = "Option::is_none")]
    pub acme_dns: Option<AcmeIssuerDns01ProviderAcmeDns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub akamai: Option<AcmeIssuerDns01ProviderAkamai>,
    #[serde(rename = "azureDNS", skip_serializing_if = "Option::is_none")]
    pub azure_dns: Option<AcmeIssuerDns01ProviderAzureDns>,
    #[serde(rename = "cloudDNS", skip_serializing_if = "Option::is_none")]
    pub cloud_dns: Option<AcmeIssuerDns01ProviderCloudDns>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloudflare: Option<AcmeIssuerDns01ProviderCloudflare>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digitalocean: Option<AcmeIssuerDns01ProviderDigitalOcean>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rfc2136: Option<AcmeIssuerDns01ProviderRfc2136>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route53: Option<AcmeIssuerDns01ProviderRoute53>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webhook: Option<AcmeIssuerDns01ProviderWebhook>,
}

/// A challenge solver and the certificates it applies to.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeChallengeSolver {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selector: Option<CertificateDnsNameSelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http01: Option<AcmeChallengeSolverHttp01>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns01: Option<AcmeChallengeSolverDns01>,
}

/// ACME external account binding credentials.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeExternalAccountBinding {
    #[serde(rename = "keyID")]
    pub key_id: String,
    pub key_secret_ref: SecretKeySelector,
    /// Deprecated; the algorithm is taken from the key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_algorithm: Option<String>,
}

/// ACME issuer configuration.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AcmeIssuer {
    /// ACME directory URL (e.g. `https://acme-v02.api.letsencrypt.org/directory`).
    pub server: String,

    /// Secret storing the ACME account private key.
    pub private_key_secret_ref: SecretKeySelector,

    /// Email address registered with the ACME account.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Challenge solvers, evaluated in order of selector specificity.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solvers: Option<Vec<AcmeChallengeSolver>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_account_binding: Option<AcmeExternalAccountBinding>,

    /// Skip TLS verification of the ACME server. Testing only.
    #[serde(rename = "skipTLSVerify", skip_serializing_if = "Option::is_none")]
    pub skip_tls_verify: Option<bool>,

    /// Base64 PEM CA bundle used to verify the ACME server.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub disable_account_key_generation: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_duration_feature: Option<bool>,

    /// Preferred certificate chain, by issuer common name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_chain: Option<String>,

    /// ACME certificate profile name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

/// Issuer that signs with a CA key pair stored in a Secret.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaIssuer {
    /// Secret holding `tls.crt` and `tls.key` of the signing CA.
    pub secret_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crl_distribution_points: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ocsp_servers: Option<Vec<String>>,
    #[serde(rename = "issuingCertificateURLs", skip_serializing_if = "Option::is_none")]
    pub issuing_certificate_urls: Option<Vec<String>>,
}

/// Issuer that self-signs every certificate with its own private key.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SelfSignedIssuer {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crl_distribution_points: Option<Vec<String>>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaultAppRole {
    pub path: String,
    pub role_id: String,
    pub secret_ref: SecretKeySelector,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaultKubernetesAuth {
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_ref: Option<ServiceAccountRef>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaultClientCertificateAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mount_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_name: Option<String>,
}

/// Vault authentication. Exactly one method should be set.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaultAuth {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_role: Option<VaultAppRole>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kubernetes: Option<VaultKubernetesAuth>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_certificate: Option<VaultClientCertificateAuth>,
}

/// Issuer backed by a HashiCorp Vault PKI mount.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VaultIssuer {
    /// Vault server URL.
    pub server: String,
    /// Path of the PKI signing endpoint, e.g. `pki/sign/example-dot-com`.
    pub path: String,
    pub auth: VaultAuth,
    /// Vault Enterprise namespace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_cert_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_key_secret_ref: Option<SecretKeySelector>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server_name: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VenafiTpp {
    pub url: String,
    pub credentials_ref: LocalObjectReference,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_bundle_secret_ref: Option<SecretKeySelector>,
}

#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VenafiCloud {
    pub api_token_secret_ref: SecretKeySelector,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Issuer backed by Venafi TPP or Venafi Cloud.
#[derive(Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VenafiIssuer {
    /// Venafi policy zone.
    pub zone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tpp: Option<VenafiTpp>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cloud: Option<VenafiCloud>,
}

/// `Issuer` represents a certificate authority scoped to a single namespace.
///
/// Exactly one of `acme`, `ca`, `selfSigned`, `vault` or `venafi` must be set.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "cert-manager.io",
    version = "v1",
    kind = "Issuer",
    plural = "issuers",
    namespaced,
    doc = "An Issuer represents a certificate issuing authority which can be referenced as part of issuerRef fields. It is scoped to a single namespace."
)]
#[serde(rename_all = "camelCase")]
pub struct IssuerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acme: Option<AcmeIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<CaIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_signed: Option<SelfSignedIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<VaultIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venafi: Option<VenafiIssuer>,
}

/// `ClusterIssuer` is the cluster-scoped counterpart of [`Issuer`].
///
/// Secrets referenced by a ClusterIssuer are read from the cert-manager cluster
/// resource namespace.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "cert-manager.io",
    version = "v1",
    kind = "ClusterIssuer",
    plural = "clusterissuers",
    doc = "A ClusterIssuer represents a certificate issuing authority which can be referenced as part of issuerRef fields. It is similar to an Issuer, however it is cluster-scoped."
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterIssuerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acme: Option<AcmeIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca: Option<CaIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub self_signed: Option<SelfSignedIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vault: Option<VaultIssuer>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venafi: Option<VenafiIssuer>,
}

/// Common view over [`IssuerSpec`] and [`ClusterIssuerSpec`].
pub trait IssuerConfig {
    /// Names of the issuer types configured on this spec, in CRD field order.
    fn configured_types(&self) -> Vec<&'static str>;

    /// ACME configuration, if any.
    fn acme(&self) -> Option<&AcmeIssuer>;

    /// Vault configuration, if any.
    fn vault(&self) -> Option<&VaultIssuer>;
}

macro_rules! impl_issuer_config {
    ($spec:ty) => {
        impl IssuerConfig for $spec {
            fn configured_types(&self) -> Vec<&'static str> {
                let mut types = Vec::new();
                if self.acme.is_some() {
                    types.push("acme");
                }
                if self.ca.is_some() {
                    types.push("ca");
                }
                if self.self_signed.is_some() {
                    types.push("selfSigned");
                }
                if self.vault.is_some() {
                    types.push("vault");
                }
                if self.venafi.is_some() {
                    types.push("venafi");
                }
                types
            }

            fn acme(&self) -> Option<&AcmeIssuer> {
                self.acme.as_ref()
            }

            fn vault(&self) -> Option<&VaultIssuer> {
                self.vault.as_ref()
            }
        }
    };
}

impl_issuer_config!(IssuerSpec);
impl_issuer_config!(ClusterIssuerSpec);

// ============================================================================
// acme.cert-manager.io
// ============================================================================

/// ACME challenge type.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
pub enum AcmeChallengeType {
    #[default]
    #[serde(rename = "HTTP-01")]
    Http01,
    #[serde(rename = "DNS-01")]
    Dns01,
}

/// `Challenge` is a single ACME challenge for one identifier of an [`Order`].
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "acme.cert-manager.io",
    version = "v1",
    kind = "Challenge",
    plural = "challenges",
    namespaced,
    doc = "Challenge is a type to represent a Challenge request with an ACME server"
)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeSpec {
    /// URL of the ACME authorization this challenge belongs to.
    #[serde(rename = "authorizationURL")]
    pub authorization_url: String,

    /// Identifier being validated, without any `*.` wildcard prefix.
    pub dns_name: String,

    pub issuer_ref: IssuerReference,

    /// ACME challenge key (HTTP-01 response body or DNS-01 record value).
    pub key: String,

    pub solver: AcmeChallengeSolver,

    /// ACME challenge token.
    pub token: String,

    pub r#type: AcmeChallengeType,

    /// URL of the challenge on the ACME server.
    pub url: String,

    /// Whether the authorization is for a wildcard name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wildcard: Option<bool>,
}

/// `Order` is an ACME order for the identifiers of a CSR.
#[derive(CustomResource, Clone, Debug, Serialize, Deserialize, Default, JsonSchema, PartialEq)]
#[kube(
    group = "acme.cert-manager.io",
    version = "v1",
    kind = "Order",
    plural = "orders",
    namespaced,
    doc = "Order is a type to represent an Order with an ACME server"
)]
#[serde(rename_all = "camelCase")]
pub struct OrderSpec {
    /// Base64 DER CSR submitted once the order is ready.
    pub request: String,

    pub issuer_ref: IssuerReference,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub dns_names: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_addresses: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}
