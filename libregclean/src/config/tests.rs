use super::*;
use std::io::Write;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert_eq!(config.registry.host, "localhost");
    assert_eq!(config.registry.port, 5000);
    assert!(config.registry.username.is_none());
    assert!(config.registry.password.is_none());
    assert!(!config.registry.dry_run);
    assert_eq!(config.registry.timeout, 30);

    assert!(config.policy.older_than_given_date.is_none());
    assert!(config.policy.keep_last.is_none());
}

#[test]
fn test_from_str_empty_yaml() {
    let config = Config::from_yaml_str("").unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_from_str_partial_yaml() {
    let yaml = r#"
registry:
  host: registry.internal
  dry_run: true
policy:
  older_than_given_date:
    date: "01.01.2022"
"#;
    let config = Config::from_yaml_str(yaml).unwrap();

    assert_eq!(config.registry.host, "registry.internal");
    assert!(config.registry.dry_run);
    assert_eq!(
        config.policy.older_than_given_date,
        Some(OlderThanGivenDateRule {
            date: "01.01.2022".to_string()
        })
    );

    // Untouched values keep their defaults
    assert_eq!(config.registry.port, 5000);
    assert_eq!(config.registry.timeout, 30);
}

#[test]
fn test_from_str_invalid_yaml() {
    let result = Config::from_yaml_str("registry: [unclosed");
    assert!(matches!(result, Err(CleanError::Config { .. })));
}

#[test]
fn test_from_str_wrong_type() {
    let result = Config::from_yaml_str("registry:\n  port: not-a-number\n");
    assert!(result.is_err());
}

#[test]
fn test_load_from_file() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(
        file,
        "registry:\n  host: files.example\n  port: 5443\n  username: admin\n  password: secret\npolicy:\n  older_than_given_date:\n    date: \"01.06.2021 12:00\""
    )
    .unwrap();

    let config = Config::load(Some(file.path())).unwrap();

    assert_eq!(config.registry.host, "files.example");
    assert_eq!(config.registry.port, 5443);
    assert_eq!(config.registry.username.as_deref(), Some("admin"));
    assert_eq!(
        config.policy.older_than_given_date.map(|r| r.date),
        Some("01.06.2021 12:00".to_string())
    );
}

#[test]
fn test_load_missing_explicit_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.yaml");

    match Config::load(Some(&missing)) {
        Err(CleanError::Config { path, .. }) => {
            assert_eq!(path, Some(missing.display().to_string()));
        }
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_load_reads_environment_overrides() {
    // SAFETY: no other test reads or writes this variable, and no other
    // load() test asserts on keep_last.
    unsafe {
        std::env::set_var("REGCLEAN_POLICY__KEEP_LAST__COUNT", "7");
    }

    let config = Config::load(None).unwrap();

    unsafe {
        std::env::remove_var("REGCLEAN_POLICY__KEEP_LAST__COUNT");
    }
    assert_eq!(config.policy.keep_last, Some(KeepLastRule { count: 7 }));
}

#[test]
fn test_to_registry_carries_credentials() {
    let mut config = Config::default();
    config.registry.username = Some("admin".to_string());
    config.registry.password = Some("secret".to_string());
    config.registry.timeout = 12;
    config.registry.dry_run = true;

    let registry = config.to_registry();

    assert_eq!(registry.credentials(), &Credentials::basic("admin", "secret"));
    assert_eq!(registry.timeout_seconds(), 12);
    assert!(registry.dry_run());
    assert_eq!(registry.base_url(), "http://localhost:5000");
}

#[test]
fn test_to_policy_prefers_date_rule() {
    let mut config = Config::default();
    config.policy.keep_last = Some(KeepLastRule { count: 2 });
    config.policy.older_than_given_date = Some(OlderThanGivenDateRule {
        date: "01.01.2022".to_string(),
    });

    let policy = config.to_policy().unwrap();
    assert_eq!(policy.describe(), "older than 01.01.2022");
}

#[test]
fn test_to_policy_keep_last() {
    let mut config = Config::default();
    config.policy.keep_last = Some(KeepLastRule { count: 2 });

    assert_eq!(config.to_policy().unwrap().describe(), "keep last 2");
}

#[test]
fn test_to_policy_without_rules_fails() {
    let result = Config::default().to_policy();
    assert!(matches!(result, Err(CleanError::Config { .. })));
}

#[test]
fn test_zero_timeout_is_rejected_by_registry_validation() {
    let config = Config::from_yaml_str("registry:\n  timeout: 0\n").unwrap();

    let result = config.to_registry().validate();
    assert!(matches!(result, Err(CleanError::Validation { .. })));
}
