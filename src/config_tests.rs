// Copyright (c) 2025 Erick Bourgeois, firestoned
// SPDX-License-Identifier: MIT

//! Unit tests for `config.rs`

#[cfg(test)]
mod tests {
    use super::super::{ConfigError, ProviderConfig};
    use std::collections::HashMap;
    use std::io::Write;
    use std::path::PathBuf;
    use std::time::Duration;
    use tempfile::NamedTempFile;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::load_with(None, env(&[])).unwrap();
        assert_eq!(config, ProviderConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_budget(), Duration::from_secs(120));
        assert_eq!(config.deletion_timeout(), Duration::from_secs(300));
        assert_eq!(config.deletion_poll_interval(), Duration::from_millis(1000));
    }

    #[test]
    fn test_yaml_file() {
        let file = config_file(
            "kubeconfig: /etc/kube/config\ncontext: kind-dev\nfield_manager: platform\ndeletion_timeout_secs: 60\n",
        );
        let config = ProviderConfig::from_file(file.path()).unwrap();

        assert_eq!(config.kubeconfig, Some(PathBuf::from("/etc/kube/config")));
        assert_eq!(config.context.as_deref(), Some("kind-dev"));
        assert_eq!(config.field_manager.as_deref(), Some("platform"));
        assert_eq!(config.deletion_timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_json_file() {
        let file = config_file(r#"{ "retry_max_elapsed_secs": 0, "deletion_poll_millis": 250 }"#);
        let config = ProviderConfig::from_file(file.path()).unwrap();
        assert_eq!(config.retry_budget(), Duration::ZERO);
        assert_eq!(config.deletion_poll_interval(), Duration::from_millis(250));
    }

    #[test]
    fn test_empty_file_is_default() {
        let file = config_file("  \n");
        assert_eq!(
            ProviderConfig::from_file(file.path()).unwrap(),
            ProviderConfig::default()
        );
    }

    #[test]
    fn test_unknown_setting_is_rejected() {
        let file = config_file("kube_config: /tmp/config\n");
        let err = ProviderConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = ProviderConfig::from_file(std::path::Path::new("/nonexistent/provider.yaml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_zero_timeouts_are_rejected() {
        let file = config_file("deletion_poll_millis: 0\n");
        match ProviderConfig::from_file(file.path()).unwrap_err() {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "deletion_poll_millis"),
            other => panic!("expected Invalid, got {other:?}"),
        }
    }

    #[test]
    fn test_env_overrides_file() {
        let file = config_file("context: from-file\nfield_manager: from-file\n");
        let config = ProviderConfig::load_with(
            Some(file.path()),
            env(&[
                ("CERTMANAGER_PROVIDER_CONTEXT", "from-env"),
                ("CERTMANAGER_PROVIDER_FIELD_MANAGER", ""),
            ]),
        )
        .unwrap();

        assert_eq!(config.context.as_deref(), Some("from-env"));
        assert_eq!(config.field_manager.as_deref(), Some("from-file"));
    }

    #[test]
    fn test_config_path_from_env() {
        let file = config_file("field_manager: via-env-path\n");
        let path = file.path().to_string_lossy().to_string();
        let config =
            ProviderConfig::load_with(None, env(&[("CERTMANAGER_PROVIDER_CONFIG", path.as_str())])).unwrap();
        assert_eq!(config.field_manager.as_deref(), Some("via-env-path"));
    }

    #[test]
    fn test_kubeconfig_fallback() {
        let config = ProviderConfig::default().with_env_overrides(env(&[(
            "KUBECONFIG",
            "/home/me/.kube/config",
        )]));
        assert_eq!(config.kubeconfig, Some(PathBuf::from("/home/me/.kube/config")));

        let explicit = ProviderConfig::default().with_env_overrides(env(&[
            ("KUBECONFIG", "/home/me/.kube/config"),
            ("CERTMANAGER_PROVIDER_KUBECONFIG", "/etc/provider/kubeconfig"),
        ]));
        assert_eq!(explicit.kubeconfig, Some(PathBuf::from("/etc/provider/kubeconfig")));

        let list = ProviderConfig::default()
            .with_env_overrides(env(&[("KUBECONFIG", "/a/config:/b/config")]));
        assert_eq!(list.kubeconfig, None);
    }

    #[tokio::test]
    async fn test_kube_config_from_file_uses_context_and_timeouts() {
        let kubeconfig = config_file(
            r"apiVersion: v1
kind: Config
clusters:
  - name: dev
    cluster:
      server: https://dev.example:6443
  - name: prod
    cluster:
      server: https://prod.example:6443
users:
  - name: admin
    user:
      token: abc
contexts:
  - name: dev
    context: { cluster: dev, user: admin }
  - name: prod
    context: { cluster: prod, user: admin }
current-context: dev
",
        );
        let config = ProviderConfig {
            kubeconfig: Some(kubeconfig.path().to_path_buf()),
            context: Some("prod".to_string()),
            request_timeout_secs: Some(5),
            ..Default::default()
        };

        let kube_config = config.kube_config().await.unwrap();
        assert_eq!(kube_config.cluster_url.host(), Some("prod.example"));
        assert_eq!(kube_config.read_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_schema_lists_every_setting() {
        let schema = ProviderConfig::schema();
        for name in [
            "kubeconfig",
            "context",
            "field_manager",
            "request_timeout_secs",
            "retry_max_elapsed_secs",
            "deletion_timeout_secs",
            "deletion_poll_millis",
        ] {
            assert!(schema.attributes[name].optional, "{name} should be optional");
        }
    }
}
