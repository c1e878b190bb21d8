//! Tests for config and secrets loading from disk.

use std::fs;
use std::io::Write;

use tempfile::{NamedTempFile, TempDir};

use venice::config::{Config, Secrets};
use venice::{Mode, VeniceError, WebSearchMode};

fn write_temp(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

#[test]
fn load_explicit_config_file() {
    let file = write_temp(
        r#"
        [venice]
        max_tokens = 1000

        [venice.plan]
        model_id = "qwen3-4b"
        web_search = "off"
        "#,
    );

    let config = Config::load(Some(file.path())).unwrap();
    let options = config.options(Mode::Plan, &Secrets::default());
    assert_eq!(options.model_id.as_deref(), Some("qwen3-4b"));
    assert_eq!(options.web_search, Some(WebSearchMode::Off));
    assert_eq!(options.max_tokens, Some(1000));
}

#[test]
fn malformed_config_is_a_configuration_error() {
    let file = write_temp("[venice\nmax_tokens = ");
    let err = Config::load(Some(file.path())).unwrap_err();
    assert!(matches!(err, VeniceError::Configuration(msg) if msg.contains("parse")));
}

#[test]
fn missing_explicit_config_is_an_error_even_with_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.toml");
    assert!(Config::load_or_default(Some(&path)).is_err());
}

#[test]
fn retry_section_maps_to_retry_config() {
    let file = write_temp(
        r#"
        [retry]
        max_attempts = 4
        initial_delay_ms = 100
        max_delay_ms = 2000
        "#,
    );
    let retry = Config::load(Some(file.path()))
        .unwrap()
        .retry
        .to_retry_config();
    assert_eq!(retry.max_attempts, 4);
    assert_eq!(retry.initial_delay.as_millis(), 100);
    assert_eq!(retry.max_delay.as_millis(), 2000);
}

#[cfg(unix)]
#[test]
fn secrets_with_private_permissions_load() {
    use std::os::unix::fs::PermissionsExt;

    let file = write_temp("[venice]\napi_key = \"vn-secret\"\n");
    fs::set_permissions(file.path(), fs::Permissions::from_mode(0o600)).unwrap();

    let secrets = Secrets::load_from_file(file.path()).unwrap();
    assert_eq!(secrets.venice.unwrap().api_key, "vn-secret");
}

#[cfg(unix)]
#[test]
fn world_readable_secrets_are_rejected() {
    use std::os::unix::fs::PermissionsExt;

    let file = write_temp("[venice]\napi_key = \"vn-secret\"\n");
    fs::set_permissions(file.path(), fs::Permissions::from_mode(0o644)).unwrap();

    let err = Secrets::load_from_file(file.path()).unwrap_err();
    assert!(err.to_string().contains("insecure permissions"));
}
