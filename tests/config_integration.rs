//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use std::fs;
use std::path::PathBuf;

use iterscope::config::AppConfig;
use serial_test::serial;

/// Create a scratch config directory under the target temp dir
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("iterscope_config_tests").join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("ISC_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("ISC_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_defaults_without_files() {
    std::env::remove_var("ISC_WINDOW__TITLE");
    let dir = scratch_dir("empty");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.title, "iterscope");
    assert_eq!(config.schema.settings_type, "isd:RefCFDSettings");
    assert_eq!(config.probe.viscosity, 0.05);
}

#[test]
#[serial]
fn test_file_layering() {
    std::env::remove_var("ISC_WINDOW__TITLE");
    let dir = scratch_dir("layering");
    fs::write(
        dir.join("default.toml"),
        "[window]\ntitle = \"from default\"\nwidth = 800\nheight = 600\n",
    )
    .unwrap();
    fs::write(dir.join("user.toml"), "[window]\ntitle = \"from user\"\n").unwrap();

    let config = AppConfig::load_from(&dir).unwrap();
    // user.toml overrides default.toml where set, default.toml fills the rest
    assert_eq!(config.window.title, "from user");
    assert_eq!(config.window.width, 800);
    assert_eq!(config.window.height, 600);
    // Untouched sections fall back to built-in defaults
    assert_eq!(config.schema.resource, "cfd");
}

#[test]
#[serial]
fn test_full_config_round_trip() {
    std::env::remove_var("ISC_WINDOW__TITLE");
    let dir = scratch_dir("round_trip");

    let mut written = AppConfig::default();
    written.window.title = "round trip".to_string();
    written.probe.iterations = 50;
    fs::write(dir.join("default.toml"), toml::to_string(&written).unwrap()).unwrap();

    let loaded = AppConfig::load_from(&dir).unwrap();
    assert_eq!(loaded.window.title, "round trip");
    assert_eq!(loaded.probe.iterations, 50);
    assert_eq!(loaded.schema.settings_type, written.schema.settings_type);
}
