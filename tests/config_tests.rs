use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use lotwatch::error::{ConfigError, Error};
use lotwatch::infrastructure::config::settings::Config;
use tempfile::TempDir;

fn write_temp_config(dir: &TempDir, contents: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    path
}

#[test]
fn full_config_round_trips_every_section() {
    let dir = tempfile::tempdir().unwrap();
    let toml = r#"
dry_run = true

[source]
search_url = "https://www.avito.ru/moskva?q=valve+index"
domain = "https://www.avito.ru"
user_agents = ["test-agent/1.0"]

[source.http]
timeout_ms = 2000
retry_max_attempts = 2

[filter]
min_price = 30000
max_price = 90000
keywords = ["Valve", "INDEX"]

[store]
path = "data/seen.json"
lock_stale_secs = 60

[delivery]
batch_size = 5
pause_secs = 3
send_timeout_secs = 15

[telegram]
chat_id = "@vr_deals"

[logging]
level = "debug"
format = "json"
file = false
"#;
    let config = Config::load(write_temp_config(&dir, toml)).unwrap();

    assert!(config.dry_run);
    assert_eq!(config.source.user_agents, vec!["test-agent/1.0"]);
    assert_eq!(config.source.http.timeout_ms, 2000);
    assert_eq!(config.source.http.retry_max_attempts, 2);

    let criteria = config.filter.criteria();
    assert!(criteria.matches_name("valve index headset"));
    assert!(criteria.price_in_range(30_000));
    assert!(!criteria.price_in_range(90_001));

    assert_eq!(config.store.lock_path(), PathBuf::from("data/seen.json.lock"));
    assert_eq!(config.store.lock_stale_after(), Duration::from_secs(60));
    assert_eq!(config.delivery.send_timeout(), Some(Duration::from_secs(15)));
    assert_eq!(config.delivery.pacer().pauses(), 0);
    assert_eq!(config.logging.format, "json");
    assert!(!config.logging.file);
}

#[test]
fn config_rejects_zero_send_timeout() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[delivery]\nsend_timeout_secs = 0\n");

    let err = Config::load(path).expect_err("zero timeout should be rejected");
    match err {
        Error::Config(ConfigError::InvalidValue { field, .. }) => {
            assert_eq!(field, "send_timeout_secs");
        }
        other => panic!("Expected InvalidValue for send_timeout_secs, got {other:?}"),
    }
}

#[test]
fn config_rejects_relative_search_url() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[source]\nsearch_url = \"/rossiya?q=index\"\n");

    let err = Config::load(path).expect_err("relative search url should be rejected");
    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "search_url",
            ..
        })
    ));
}

#[test]
fn config_rejects_unknown_types() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_temp_config(&dir, "[filter]\nmin_price = \"cheap\"\n");

    let err = Config::load(path).expect_err("string price should be rejected");
    assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
}

#[test]
fn missing_token_is_a_missing_field() {
    let config = Config::default();
    let err = config.require_bot_token().expect_err("no token configured");
    assert!(matches!(
        err,
        Error::Config(ConfigError::MissingField { field: "BOT_TOKEN" })
    ));
}
