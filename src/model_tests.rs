// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `model.rs`

#[cfg(test)]
mod tests {
    use super::super::{
        build_object, DataSourceModel, ManifestModel, ObjectMetadataModel, ResourceModel,
    };
    use crate::crd::{
        Certificate, CertificateSpec, ClusterIssuer, ClusterIssuerSpec, IssuerReference,
        SelfSignedIssuer,
    };
    use crate::options::DeletionPropagation;
    use serde_json::json;
    use std::collections::BTreeMap;

    fn certificate_model() -> ResourceModel<CertificateSpec> {
        serde_json::from_value(json!({
            "metadata": { "name": "example-com", "namespace": "default" },
            "spec": {
                "secretName": "example-com-tls",
                "issuerRef": { "name": "letsencrypt", "kind": "ClusterIssuer" },
                "dnsNames": ["example.com"]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_apply_defaults_fills_computed_attributes() {
        let mut model = certificate_model();
        model.apply_defaults::<Certificate>(None);

        assert_eq!(model.id.as_deref(), Some("default/example-com"));
        assert_eq!(model.api_version.as_deref(), Some("cert-manager.io/v1"));
        assert_eq!(model.kind.as_deref(), Some("Certificate"));
        assert_eq!(model.field_manager.as_deref(), Some("certmanager-provider"));
        assert_eq!(model.force_conflicts, Some(false));
        assert_eq!(model.wait_for_deletion, Some(false));
        assert_eq!(model.deletion_propagation, None);
    }

    #[test]
    fn test_apply_defaults_overwrites_api_version_and_kind() {
        let mut model = certificate_model();
        model.api_version = Some("cert-manager.io/v1alpha2".to_string());
        model.kind = Some("Secret".to_string());
        model.field_manager = Some("team-a".to_string());
        model.apply_defaults::<Certificate>(Some("provider-wide"));

        assert_eq!(model.api_version.as_deref(), Some("cert-manager.io/v1"));
        assert_eq!(model.kind.as_deref(), Some("Certificate"));
        assert_eq!(model.field_manager.as_deref(), Some("team-a"));
    }

    #[test]
    fn test_to_object_omits_computed_metadata() {
        let mut model = certificate_model();
        model.metadata.uid = Some("1234".to_string());
        model.metadata.resource_version = Some("42".to_string());

        let object = model.to_object::<Certificate>().unwrap();
        assert_eq!(object["apiVersion"], "cert-manager.io/v1");
        assert_eq!(object["kind"], "Certificate");
        assert_eq!(object["metadata"]["name"], "example-com");
        assert!(object["metadata"].get("uid").is_none());
        assert!(object["metadata"].get("resourceVersion").is_none());
        assert_eq!(object["spec"]["secretName"], "example-com-tls");
        assert_eq!(object["spec"]["dnsNames"], json!(["example.com"]));
    }

    #[test]
    fn test_merge_object_keeps_provider_attributes() {
        let mut model = certificate_model();
        model.apply_defaults::<Certificate>(None);
        model.deletion_propagation = Some(DeletionPropagation::Foreground);

        let observed = json!({
            "apiVersion": "cert-manager.io/v1",
            "kind": "Certificate",
            "metadata": {
                "name": "example-com",
                "namespace": "default",
                "uid": "abc-123",
                "resourceVersion": "7",
                "generation": 2,
                "labels": { "team": "web" }
            },
            "spec": {
                "secretName": "example-com-tls",
                "issuerRef": { "name": "letsencrypt", "kind": "ClusterIssuer" },
                "dnsNames": ["example.com", "www.example.com"]
            },
            "status": { "conditions": [] }
        });
        model.merge_object(&observed).unwrap();

        assert_eq!(model.metadata.uid.as_deref(), Some("abc-123"));
        assert_eq!(model.metadata.resource_version.as_deref(), Some("7"));
        assert_eq!(model.metadata.generation, Some(2));
        assert_eq!(
            model.spec.dns_names,
            Some(vec!["example.com".to_string(), "www.example.com".to_string()])
        );
        assert_eq!(model.deletion_propagation, Some(DeletionPropagation::Foreground));
        assert_eq!(model.id.as_deref(), Some("default/example-com"));
    }

    #[test]
    fn test_from_object_builds_import_state() {
        let observed = json!({
            "metadata": { "name": "selfsigned" },
            "spec": { "selfSigned": {} }
        });
        let model =
            ResourceModel::<ClusterIssuerSpec>::from_object::<ClusterIssuer>(&observed, None)
                .unwrap();

        assert_eq!(model.id.as_deref(), Some("selfsigned"));
        assert_eq!(model.kind.as_deref(), Some("ClusterIssuer"));
        assert_eq!(model.force_conflicts, Some(false));
        assert!(model.spec.self_signed.is_some());
        assert!(model.metadata.namespace.is_none());
    }

    #[test]
    fn test_from_object_requires_spec() {
        let observed = json!({ "metadata": { "name": "selfsigned" } });
        let result =
            ResourceModel::<ClusterIssuerSpec>::from_object::<ClusterIssuer>(&observed, None);
        assert!(result.is_err());
    }

    #[test]
    fn test_to_value_uses_snake_case_attributes_and_camel_case_spec() {
        let mut model = certificate_model();
        model.apply_defaults::<Certificate>(None);
        let value = model.to_value().unwrap();

        assert!(value.get("field_manager").is_some());
        assert!(value.get("force_conflicts").is_some());
        assert!(value.get("api_version").is_some());
        assert!(value["spec"].get("secretName").is_some());
        assert!(value["spec"].get("secret_name").is_none());
    }

    #[test]
    fn test_from_object_meta_drops_empty_maps() {
        let metadata: ObjectMetadataModel = ObjectMetadataModel::from_object_meta(
            k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta {
                name: Some("example".to_string()),
                labels: Some(BTreeMap::new()),
                ..Default::default()
            },
        );
        assert!(metadata.labels.is_none());
        assert!(metadata.annotations.is_none());
    }

    #[test]
    fn test_data_source_from_object() {
        let observed = json!({
            "metadata": { "name": "selfsigned", "uid": "u-1" },
            "spec": { "selfSigned": {} }
        });
        let model =
            DataSourceModel::<ClusterIssuerSpec>::from_object::<ClusterIssuer>(&observed).unwrap();

        assert_eq!(model.id.as_deref(), Some("selfsigned"));
        assert_eq!(model.api_version.as_deref(), Some("cert-manager.io/v1"));
        assert_eq!(model.metadata.uid.as_deref(), Some("u-1"));
        assert_eq!(
            model.spec,
            Some(ClusterIssuerSpec {
                self_signed: Some(SelfSignedIssuer::default()),
                ..Default::default()
            })
        );
    }

    #[test]
    fn test_manifest_render() {
        let mut manifest = ManifestModel {
            id: None,
            metadata: ObjectMetadataModel {
                name: "example-com".to_string(),
                namespace: Some("default".to_string()),
                uid: Some("ignored".to_string()),
                ..Default::default()
            },
            spec: CertificateSpec {
                secret_name: "example-com-tls".to_string(),
                issuer_ref: IssuerReference {
                    name: "letsencrypt".to_string(),
                    kind: None,
                    group: None,
                },
                dns_names: Some(vec!["example.com".to_string()]),
                ..Default::default()
            },
            yaml: None,
        };
        manifest.render::<Certificate>().unwrap();

        let yaml = manifest.yaml.as_deref().unwrap();
        assert!(yaml.contains("apiVersion: cert-manager.io/v1"));
        assert!(yaml.contains("kind: Certificate"));
        assert!(yaml.contains("secretName: example-com-tls"));
        assert!(!yaml.contains("uid"));
        assert_eq!(manifest.id.as_deref(), Some("default/example-com"));
    }

    #[test]
    fn test_build_object_for_cluster_scope() {
        let metadata = ObjectMetadataModel {
            name: "selfsigned".to_string(),
            ..Default::default()
        };
        let object = build_object::<ClusterIssuer>(
            &metadata,
            &ClusterIssuerSpec {
                self_signed: Some(SelfSignedIssuer::default()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(object["metadata"].get("namespace").is_none());
        assert_eq!(object["spec"], json!({ "selfSigned": {} }));
    }
}
