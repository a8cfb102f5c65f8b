// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for provider error types.

#[cfg(test)]
mod tests {
    use crate::errors::*;
    use kube::core::Status;

    fn api_error(code: u16) -> kube::Error {
        kube::Error::Api(Status::failure("boom", "Test").with_code(code).boxed())
    }

    #[test]
    fn test_validation_error_paths() {
        let errors = [
            ValidationError::MissingAttribute {
                path: "metadata.name".to_string(),
            },
            ValidationError::UnexpectedAttribute {
                path: "metadata.namespace".to_string(),
                reason: "ClusterIssuer is cluster-scoped".to_string(),
            },
            ValidationError::UnknownAttribute {
                path: "spec.dnsName".to_string(),
            },
            ValidationError::InvalidValue {
                path: "spec.duration".to_string(),
                reason: "not a duration".to_string(),
            },
        ];
        let paths: Vec<&str> = errors.iter().map(ValidationError::path).collect();
        assert_eq!(
            paths,
            vec![
                "metadata.name",
                "metadata.namespace",
                "spec.dnsName",
                "spec.duration"
            ]
        );
    }

    #[test]
    fn test_validation_message_lists_every_error() {
        let error = ProviderError::Validation {
            type_name: "k8s_cert_manager_io_certificate_v1".to_string(),
            errors: vec![
                ValidationError::MissingAttribute {
                    path: "spec.secretName".to_string(),
                },
                ValidationError::UnknownAttribute {
                    path: "spec.dnsName".to_string(),
                },
            ],
        };
        assert_eq!(
            error.to_string(),
            "Invalid configuration for k8s_cert_manager_io_certificate_v1: \
             Missing required attribute 'spec.secretName'; \
             Unsupported attribute 'spec.dnsName': not defined in the schema"
        );
    }

    #[test]
    fn test_invalid_import_id_message() {
        let error = ProviderError::InvalidImportId {
            id: "a/b/c".to_string(),
            expected: "namespace/name",
        };
        assert_eq!(
            error.to_string(),
            "Invalid import identifier 'a/b/c': expected format 'namespace/name'"
        );
    }

    #[test]
    fn test_is_not_found() {
        assert!(ProviderError::NotFound {
            kind: "Issuer".to_string(),
            id: "default/ca".to_string(),
        }
        .is_not_found());
        assert!(ProviderError::Kube {
            operation: "get default/ca".to_string(),
            source: api_error(404),
        }
        .is_not_found());
        assert!(!ProviderError::Kube {
            operation: "get default/ca".to_string(),
            source: api_error(403),
        }
        .is_not_found());
        assert!(!ProviderError::NotConfigured("no client".to_string()).is_not_found());
    }

    #[test]
    fn test_deletion_timeout_message() {
        let error = ProviderError::DeletionTimeout {
            kind: "Certificate".to_string(),
            id: "default/example-com".to_string(),
            timeout_secs: 300,
        };
        assert_eq!(
            error.to_string(),
            "Timed out after 300s waiting for Certificate 'default/example-com' to be deleted"
        );
    }
}
