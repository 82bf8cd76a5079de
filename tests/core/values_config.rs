//! rdfvalue.toml loading

use crate::common::*;
use tempfile::TempDir;

#[test]
fn test_defaults_written_then_used() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    ValuesConfig::write_default_if_missing(&path).unwrap();

    let config = ValuesConfig::from_file(&path).unwrap();
    let id = SessionId::from_config(&config.session, Some("ABCD")).unwrap();
    assert_eq!(id.to_string(), "aff4:/flows/F:ABCD");
}

#[test]
fn test_custom_namespace() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[session]\nbase = \"aff4:/hunts\"\nqueue = \"H\"\n").unwrap();

    let config = ValuesConfig::from_file(&path).unwrap();
    let id = SessionId::from_config(&config.session, Some("1")).unwrap();
    assert_eq!(id.queue(), Urn::new("aff4:/H"));
    assert_eq!(id.path(), "/hunts/H:1");
}

#[test]
fn test_invalid_file_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join(CONFIG_FILE_NAME);
    std::fs::write(&path, "[session]\nqueue = \"has space\"\n").unwrap();
    assert!(matches!(ValuesConfig::from_file(&path), Err(Error::Config(_))));
}
