use serial_test::serial;
use std::env;
use std::path::PathBuf;

use daybook::config::Config;
use daybook::errors::AppError;

#[test]
#[serial]
fn test_load_reads_daybook_dir() {
    env::set_var("DAYBOOK_DIR", "/tmp/daybook-test-journal");

    let config = Config::load().expect("Failed to load config");
    assert_eq!(config.journal_dir, PathBuf::from("/tmp/daybook-test-journal"));
    assert_eq!(
        config.entries_dir(),
        PathBuf::from("/tmp/daybook-test-journal/entries")
    );
    assert_eq!(
        config.index_path(),
        PathBuf::from("/tmp/daybook-test-journal/index.json")
    );

    env::remove_var("DAYBOOK_DIR");
}

#[test]
#[serial]
fn test_load_defaults_under_home() {
    env::remove_var("DAYBOOK_DIR");
    env::set_var("HOME", "/home/integration");

    let config = Config::load().expect("Failed to load config");
    assert_eq!(
        config.journal_dir,
        PathBuf::from("/home/integration/Documents/daybook")
    );
}

#[test]
#[serial]
fn test_validate_relative_dir_is_config_error() {
    env::set_var("DAYBOOK_DIR", "relative/dir");

    let config = Config::load().expect("Failed to load config");
    match config.validate() {
        Err(AppError::Config(msg)) => assert!(msg.contains("absolute")),
        other => panic!("Expected Config error, got {:?}", other),
    }

    env::remove_var("DAYBOOK_DIR");
}
