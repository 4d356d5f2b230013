//! Configuration and batch file loading from disk

use appraisal_cli::commands::batch::load_items;
use appraisal_cli::config::OutputFormat;
use appraisal_cli::{AppConfig, CliError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_load_explicit_config() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        r#"
        [extractor]
        require_currency_symbol = false

        [engine]
        fallback_value = 10.0
        item_timeout_secs = 90

        [narrator]
        enabled = true
        model = "llava:13b"

        [output]
        color = false
        "#,
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).unwrap();
    assert!(!config.extractor.require_currency_symbol);
    assert_eq!(config.engine.fallback_value, 10.0);
    assert_eq!(config.engine.item_timeout_secs, 90);
    assert_eq!(config.engine.high_confidence_above, 10);
    assert!(config.narrator.enabled);
    assert_eq!(config.narrator.model, "llava:13b");
    assert!(!config.output.color);
    assert_eq!(config.output.format, OutputFormat::Table);
}

#[test]
fn test_invalid_config_rejected() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[engine]\nhigh_confidence_above = 3\nmedium_confidence_above = 8\n").unwrap();

    match AppConfig::load(Some(&path)) {
        Err(CliError::Config(message)) => assert!(message.starts_with("[engine]")),
        other => panic!("expected a config error, got {:?}", other),
    }
}

#[test]
fn test_missing_explicit_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(CliError::Io(_))));
}

#[test]
fn test_save_and_reload() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = AppConfig::default();
    config.engine.max_concurrent_items = 5;
    config.output.format = OutputFormat::Json;
    config.save_to(&path).unwrap();

    assert_eq!(AppConfig::load(Some(&path)).unwrap(), config);
}

#[test]
fn test_load_batch_items() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("items.json");
    fs::write(
        &path,
        r#"[
            { "title": "Fenton Hobnail lamp", "current_price": "$45.00 (2 bids)" },
            { "title": "Pyrex bowl", "description": "Butterprint 403", "images": ["a.jpg"] }
        ]"#,
    )
    .unwrap();

    let items = load_items(&path).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[1].images, vec!["a.jpg".to_string()]);

    fs::write(&path, "[]").unwrap();
    assert!(matches!(load_items(&path), Err(CliError::InvalidInput(_))));

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(load_items(&path), Err(CliError::Serialization(_))));
}
