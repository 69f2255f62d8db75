use super::*;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.busy_timeout_ms, 5_000);
    assert_eq!(config.metadata_dir_name, "database_description");
    assert_eq!(config.workers, None);
    assert_eq!(config.profile.hard_cap, 100_000);
    assert_eq!(config.profile.sample_size, 6);
    assert_eq!(config.profile.truncate_len, 30);
    assert_eq!(config.profile.category_threshold, 6);
    assert_eq!(config.profile.word_top_k, 10);
}

#[test]
fn test_parse_partial_yaml() {
    let yaml = "busy_timeout_ms: 250\nprofile:\n  hard_cap: 500\n";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(config.busy_timeout_ms, 250);
    assert_eq!(config.profile.hard_cap, 500);
    // Untouched fields keep their defaults
    assert_eq!(config.profile.sample_size, 6);
}

#[test]
fn test_reject_zero_hard_cap() {
    let yaml = "profile:\n  hard_cap: 0\n";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_reject_zero_workers() {
    let yaml = "workers: 0\n";
    let config: Config = serde_yaml::from_str(yaml).unwrap();
    assert!(matches!(
        config.validate(),
        Err(CoreError::ConfigInvalid { .. })
    ));
}

#[test]
fn test_load_missing_file() {
    let result = Config::load(Path::new("/nonexistent/schemaflow.yml"));
    assert!(matches!(result, Err(CoreError::ConfigNotFound { .. })));
}

#[test]
fn test_load_from_dir_without_config_uses_defaults() {
    let config = Config::load_from_dir(Path::new("/nonexistent")).unwrap();
    assert_eq!(config.profile.hard_cap, 100_000);
}
