// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `options.rs`

#[cfg(test)]
mod tests {
    use super::super::{delete_params, ApplyOptions, DeletionPropagation};
    use kube::api::PropagationPolicy;

    #[test]
    fn test_resolve_uses_explicit_field_manager() {
        let options = ApplyOptions::resolve(Some("platform-team"), Some(true), Some("ignored"));
        assert_eq!(options.field_manager, "platform-team");
        assert!(options.force);
    }

    #[test]
    fn test_resolve_falls_back_to_provider_default() {
        let options = ApplyOptions::resolve(None, None, Some("ci-pipeline"));
        assert_eq!(options.field_manager, "ci-pipeline");
        assert!(!options.force, "force_conflicts should default to false");
    }

    #[test]
    fn test_resolve_treats_empty_as_unset() {
        let options = ApplyOptions::resolve(Some(""), None, Some("  "));
        assert_eq!(options.field_manager, "certmanager-provider");
    }

    #[test]
    fn test_resolve_without_any_manager() {
        let options = ApplyOptions::resolve(None, Some(false), None);
        assert_eq!(options.field_manager, "certmanager-provider");
        assert!(!options.force);
    }

    #[test]
    fn test_patch_params_carry_manager_and_force() {
        let forced = ApplyOptions::resolve(Some("tf"), Some(true), None).patch_params();
        assert_eq!(forced.field_manager.as_deref(), Some("tf"));
        assert!(forced.force);

        let polite = ApplyOptions::resolve(Some("tf"), Some(false), None).patch_params();
        assert!(!polite.force);
    }

    #[test]
    fn test_deletion_propagation_parse() {
        assert_eq!(
            "Foreground".parse::<DeletionPropagation>().unwrap(),
            DeletionPropagation::Foreground
        );
        assert_eq!(
            "Orphan".parse::<DeletionPropagation>().unwrap(),
            DeletionPropagation::Orphan
        );
        let err = "foreground".parse::<DeletionPropagation>().unwrap_err();
        assert_eq!(err.path(), "deletion_propagation");
    }

    #[test]
    fn test_deletion_propagation_display_matches_parse() {
        for value in DeletionPropagation::VALUES {
            let parsed: DeletionPropagation = value.parse().unwrap();
            assert_eq!(parsed.to_string(), value);
        }
    }

    #[test]
    fn test_delete_params_policy() {
        let params = delete_params(Some(DeletionPropagation::Background));
        assert!(matches!(
            params.propagation_policy,
            Some(PropagationPolicy::Background)
        ));

        let default = delete_params(None);
        assert!(default.propagation_policy.is_none());
    }
}
