// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

#[cfg(test)]
mod tests {
    use crate::crd::*;
    use kube::{CustomResourceExt, Resource};
    use serde_json::json;

    #[test]
    fn test_issuer_reference_optional_fields_omitted() {
        let issuer_ref = IssuerReference {
            name: "letsencrypt".into(),
            kind: None,
            group: None,
        };
        assert_eq!(
            serde_json::to_value(&issuer_ref).unwrap(),
            json!({ "name": "letsencrypt" })
        );
    }

    #[test]
    fn test_certificate_spec_camel_case() {
        let spec = CertificateSpec {
            secret_name: "example-com-tls".into(),
            issuer_ref: IssuerReference {
                name: "ca".into(),
                kind: Some("Issuer".into()),
                group: None,
            },
            dns_names: Some(vec!["example.com".into()]),
            is_ca: Some(true),
            renew_before_percentage: Some(50),
            ..Default::default()
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["secretName"], "example-com-tls");
        assert_eq!(value["issuerRef"]["kind"], "Issuer");
        assert_eq!(value["dnsNames"], json!(["example.com"]));
        assert_eq!(value["isCA"], true);
        assert_eq!(value["renewBeforePercentage"], 50);
        assert!(value.get("commonName").is_none());
    }

    #[test]
    fn test_key_usage_wire_names() {
        let usages = vec![
            KeyUsage::DigitalSignature,
            KeyUsage::KeyEncipherment,
            KeyUsage::ServerAuth,
            KeyUsage::Smime,
        ];
        assert_eq!(
            serde_json::to_value(&usages).unwrap(),
            json!(["digital signature", "key encipherment", "server auth", "s/mime"])
        );

        let parsed: KeyUsage = serde_json::from_value(json!("client auth")).unwrap();
        assert_eq!(parsed, KeyUsage::ClientAuth);
        assert!(serde_json::from_value::<KeyUsage>(json!("ClientAuth")).is_err());
    }

    #[test]
    fn test_private_key_enums() {
        let key: CertificatePrivateKey = serde_json::from_value(json!({
            "algorithm": "ECDSA",
            "encoding": "PKCS8",
            "rotationPolicy": "Always",
            "size": 384
        }))
        .unwrap();
        assert_eq!(key.algorithm, Some(PrivateKeyAlgorithm::Ecdsa));
        assert_eq!(key.encoding, Some(PrivateKeyEncoding::Pkcs8));
        assert_eq!(key.rotation_policy, Some(PrivateKeyRotationPolicy::Always));
        assert_eq!(key.size, Some(384));

        let ed: CertificatePrivateKey =
            serde_json::from_value(json!({ "algorithm": "Ed25519" })).unwrap();
        assert_eq!(ed.algorithm, Some(PrivateKeyAlgorithm::Ed25519));
    }

    #[test]
    fn test_acme_issuer_renames() {
        let spec: ClusterIssuerSpec = serde_json::from_value(json!({
            "acme": {
                "server": "https://acme-staging-v02.api.letsencrypt.org/directory",
                "privateKeySecretRef": { "name": "letsencrypt-staging" },
                "skipTLSVerify": true,
                "solvers": [
                    { "http01": { "gatewayHTTPRoute": { "serviceType": "ClusterIP" } } },
                    { "dns01": { "cloudDNS": { "project": "dns-project" } } }
                ]
            }
        }))
        .unwrap();

        let acme = spec.acme.as_ref().unwrap();
        assert_eq!(acme.skip_tls_verify, Some(true));
        let solvers = acme.solvers.as_ref().unwrap();
        assert_eq!(solvers.len(), 2);
        assert!(solvers[0]
            .http01
            .as_ref()
            .unwrap()
            .gateway_http_route
            .is_some());
        assert!(solvers[1].dns01.as_ref().unwrap().cloud_dns.is_some());
    }

    #[test]
    fn test_issuer_configured_types_in_field_order() {
        let spec = IssuerSpec {
            vault: Some(VaultIssuer::default()),
            acme: Some(AcmeIssuer::default()),
            ..Default::default()
        };
        assert_eq!(spec.configured_types(), vec!["acme", "vault"]);
        assert!(IssuerSpec::default().configured_types().is_empty());

        let cluster = ClusterIssuerSpec {
            self_signed: Some(SelfSignedIssuer::default()),
            ..Default::default()
        };
        assert_eq!(cluster.configured_types(), vec!["selfSigned"]);
        assert!(cluster.acme().is_none());
    }

    #[test]
    fn test_challenge_type_and_url_renames() {
        let spec: ChallengeSpec = serde_json::from_value(json!({
            "authorizationURL": "https://acme.example/authz/1",
            "dnsName": "example.com",
            "issuerRef": { "name": "letsencrypt", "kind": "ClusterIssuer" },
            "key": "key",
            "solver": { "dns01": { "cloudflare": { "email": "ops@example.com" } } },
            "token": "token",
            "type": "DNS-01",
            "url": "https://acme.example/chall/1"
        }))
        .unwrap();
        assert_eq!(spec.r#type, AcmeChallengeType::Dns01);
        assert_eq!(spec.authorization_url, "https://acme.example/authz/1");

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["type"], "DNS-01");
        assert!(value.get("wildcard").is_none());
    }

    #[test]
    fn test_crd_names_and_scope() {
        let certificate = Certificate::crd();
        assert_eq!(
            certificate.metadata.name.as_deref(),
            Some("certificates.cert-manager.io")
        );
        assert_eq!(certificate.spec.scope, "Namespaced");
        assert_eq!(
            certificate.spec.names.short_names,
            Some(vec!["cert".to_string()])
        );

        let cluster_issuer = ClusterIssuer::crd();
        assert_eq!(cluster_issuer.spec.scope, "Cluster");

        let order = Order::crd();
        assert_eq!(order.spec.group, "acme.cert-manager.io");
        assert_eq!(Order::api_version(&()), "acme.cert-manager.io/v1");
        assert_eq!(Challenge::plural(&()), "challenges");
    }

    #[test]
    fn test_crd_schema_carries_required_fields() {
        let crd = CertificateRequest::crd();
        let schema = crd.spec.versions[0]
            .schema
            .as_ref()
            .and_then(|validation| validation.open_api_v3_schema.as_ref())
            .unwrap();
        let spec = &schema.properties.as_ref().unwrap()["spec"];
        let required = spec.required.clone().unwrap_or_default();
        assert!(required.contains(&"request".to_string()));
        assert!(required.contains(&"issuerRef".to_string()));
    }
}
