// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `import_id.rs`

#[cfg(test)]
mod tests {
    use super::super::{ObjectId, Scope};
    use crate::errors::ProviderError;

    #[test]
    fn test_parse_namespaced_id() {
        let id = ObjectId::parse("cert-manager/selfsigned", Scope::Namespaced).unwrap();
        assert_eq!(id.namespace.as_deref(), Some("cert-manager"));
        assert_eq!(id.name, "selfsigned");
    }

    #[test]
    fn test_parse_cluster_id() {
        let id = ObjectId::parse("letsencrypt-prod", Scope::Cluster).unwrap();
        assert!(id.namespace.is_none());
        assert_eq!(id.name, "letsencrypt-prod");
    }

    #[test]
    fn test_namespaced_id_requires_two_parts() {
        for raw in ["just-a-name", "a/b/c", "", "/"] {
            let err = ObjectId::parse(raw, Scope::Namespaced).unwrap_err();
            assert!(
                matches!(
                    err,
                    ProviderError::InvalidImportId {
                        expected: "namespace/name",
                        ..
                    }
                ),
                "'{raw}' should be rejected"
            );
        }
    }

    #[test]
    fn test_namespaced_id_rejects_empty_parts() {
        assert!(ObjectId::parse("/name", Scope::Namespaced).is_err());
        assert!(ObjectId::parse("namespace/", Scope::Namespaced).is_err());
    }

    #[test]
    fn test_cluster_id_rejects_slash_and_empty() {
        let err = ObjectId::parse("default/issuer", Scope::Cluster).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid import identifier 'default/issuer': expected format 'name'"
        );
        assert!(ObjectId::parse("", Scope::Cluster).is_err());
    }

    #[test]
    fn test_display_round_trips() {
        let namespaced = ObjectId::namespaced("default", "example-com");
        assert_eq!(namespaced.to_string(), "default/example-com");
        assert_eq!(
            ObjectId::parse(&namespaced.to_string(), Scope::Namespaced).unwrap(),
            namespaced
        );

        let cluster = ObjectId::cluster("selfsigned");
        assert_eq!(cluster.to_string(), "selfsigned");
    }

    #[test]
    fn test_invalid_import_error_message() {
        let err = ObjectId::parse("oops", Scope::Namespaced).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid import identifier 'oops': expected format 'namespace/name'"
        );
    }
}
