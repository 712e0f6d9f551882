use cmdsense_model::config::loader::ConfigLoader;
use cmdsense_model::{DuplicateTriggerPolicy, ModelVersion};
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
data_dir: /srv/cmdsense/Data
commands_version: "5.2.0"
duplicate_triggers: merge
    "#
    )
    .unwrap();

    let config = ConfigLoader::load_from(file.path())
        .await
        .expect("Failed to load config from file");

    assert_eq!(config.data_dir, Some(PathBuf::from("/srv/cmdsense/Data")));
    assert_eq!(config.commands_version, ModelVersion::new(5, 2, 0));
    assert_eq!(config.predictions_version, ModelVersion::new(5, 1, 0));
    assert_eq!(config.duplicate_triggers, DuplicateTriggerPolicy::Merge);
}

#[tokio::test]
async fn test_load_from_empty_file_uses_defaults() {
    let file = NamedTempFile::new().unwrap();
    let config = ConfigLoader::load_from(file.path()).await.unwrap();
    assert_eq!(config.commands_version, ModelVersion::new(5, 1, 0));
    assert_eq!(config.duplicate_triggers, DuplicateTriggerPolicy::Reject);
}

#[tokio::test]
async fn test_load_from_nonexistent_file() {
    let result =
        ConfigLoader::load_from(std::path::Path::new("/nonexistent/path/cmdsense.yaml")).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_load_from_invalid_yaml() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{{invalid yaml: [unclosed").unwrap();

    let result = ConfigLoader::load_from(file.path()).await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_load_from_unknown_policy() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "duplicate_triggers: sometimes").unwrap();

    let result = ConfigLoader::load_from(file.path()).await;
    assert!(result.is_err());
}
