use adapter_core::ServicesConfig;
use adapter_core::error::ConfigError;

use std::fs;

use serial_test::serial;
use tempfile::TempDir;

const SERVICES_TOML: &str = r#"
[[services]]
name = "media"
base_url = "https://api.media.example/v1/"
api_key_env = "MEDIA_ACCESS_TOKEN"

[[services]]
name = "billing"
base_url = "https://billing.example"
content_type = "text/xml"
api_key_env = "BILLING_API_KEY"
timeout_secs = 10
"#;

fn write_services(contents: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("services.toml"), contents).unwrap();
    dir
}

/// **VALUE**: Verifies a well-formed file loads with defaults applied.
///
/// **BUG THIS CATCHES**: Would catch `#[serde(default)]` functions not being wired,
/// leaving empty content types or zero timeouts.
#[test]
fn given_services_file_when_loaded_then_entries_and_defaults_present() {
    let dir = write_services(SERVICES_TOML);

    let config = ServicesConfig::load(dir.path()).unwrap();

    let media = config.service("media").unwrap();
    assert_eq!(media.content_type, "application/json");
    assert_eq!(media.timeout_secs, 30);

    let billing = config.service("billing").unwrap();
    assert_eq!(billing.content_type, "text/xml");
    assert_eq!(billing.timeout().as_secs(), 10);
}

#[test]
fn given_missing_file_when_loaded_then_returns_empty_default() {
    let dir = tempfile::tempdir().unwrap();

    let config = ServicesConfig::load(dir.path()).unwrap();

    assert!(config.services.is_empty());
}

/// **VALUE**: Verifies a corrupt file is an error, not silently empty.
///
/// **WHY THIS MATTERS**: Falling back to "no services" on a typo would surface
/// much later as a confusing UnknownService error.
#[test]
fn given_corrupt_file_when_loaded_then_returns_parse_error() {
    let dir = write_services("[[services]\nname = ");

    let result = ServicesConfig::load(dir.path());

    assert!(matches!(result, Err(ConfigError::ParseError { .. })));
}

/// **VALUE**: Verifies validation rejects bad URLs, timeouts and duplicates.
#[test]
fn given_invalid_entries_when_loaded_then_returns_validation_error() {
    let cases = [
        "[[services]]\nname = \"a\"\nbase_url = \"ftp://nope\"\n",
        "[[services]]\nname = \"\"\nbase_url = \"https://ok\"\n",
        "[[services]]\nname = \"a\"\nbase_url = \"https://ok\"\ntimeout_secs = 0\n",
        "[[services]]\nname = \"a\"\nbase_url = \"https://ok\"\ntimeout_secs = 301\n",
        "[[services]]\nname = \"a\"\nbase_url = \"https://ok\"\n[[services]]\nname = \"a\"\nbase_url = \"https://ok2\"\n",
    ];

    for contents in cases {
        let dir = write_services(contents);
        let result = ServicesConfig::load(dir.path());
        assert!(
            matches!(result, Err(ConfigError::ValidationError { .. })),
            "expected validation error for:\n{contents}"
        );
    }
}

/// **VALUE**: Verifies credentials come from the named environment variable and
/// stay redacted.
///
/// **BUG THIS CATCHES**: Would catch reading the variable name itself as the key,
/// or a blank variable being accepted.
#[test]
#[serial]
fn given_env_var_when_credential_resolved_then_returns_redacted_key() {
    let dir = write_services(SERVICES_TOML);
    let config = ServicesConfig::load(dir.path()).unwrap();
    let media = config.service("media").unwrap();

    // SAFETY: serialized with every other test touching the environment.
    unsafe { std::env::set_var("MEDIA_ACCESS_TOKEN", "  tok-123  ") };
    let key = media.credential().unwrap();
    assert_eq!(key.as_str(), "tok-123");
    assert!(!format!("{key:?}").contains("tok-123"));

    unsafe { std::env::set_var("MEDIA_ACCESS_TOKEN", "   ") };
    assert!(matches!(
        media.credential(),
        Err(ConfigError::MissingCredential { .. })
    ));

    unsafe { std::env::remove_var("MEDIA_ACCESS_TOKEN") };
    match media.credential() {
        Err(ConfigError::MissingCredential { service, env_var, .. }) => {
            assert_eq!(service, "media");
            assert_eq!(env_var, "MEDIA_ACCESS_TOKEN");
        }
        other => panic!("expected missing credential, got {other:?}"),
    }
}

#[test]
fn given_unknown_name_when_service_looked_up_then_returns_unknown_service() {
    let config = ServicesConfig::default();

    assert!(matches!(
        config.service("nope"),
        Err(ConfigError::UnknownService { .. })
    ));
}
