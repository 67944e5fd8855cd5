use super::{normalize_database_url, prepare_database_url, settings_from_sources, Settings};

use std::{
    collections::HashMap,
    env, fs,
    time::{SystemTime, UNIX_EPOCH},
};

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = settings_from_sources(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn file_values_override_defaults() {
    let raw = r#"
        bind_addr = "0.0.0.0:9000"
        database_url = "sqlite://./book.db"
        max_body_bytes = 1024
    "#;
    let settings = settings_from_sources(Some(raw), env_from(&[]));
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.database_url, "sqlite://./book.db");
    assert_eq!(settings.max_body_bytes, 1024);
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let settings = settings_from_sources(Some("bind_addr = [oops"), env_from(&[]));
    assert_eq!(settings, Settings::default());
}

#[test]
fn env_overrides_file_and_app_prefix_wins() {
    let raw = r#"bind_addr = "0.0.0.0:9000""#;
    let settings = settings_from_sources(
        Some(raw),
        env_from(&[
            ("PORT", "7000"),
            ("SERVER_BIND", "127.0.0.1:7100"),
            ("APP__BIND_ADDR", "127.0.0.1:7200"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]),
    );
    assert_eq!(settings.server_bind, "127.0.0.1:7200");
    assert_eq!(settings.database_url, "sqlite::memory:");
}

#[test]
fn port_env_binds_all_interfaces() {
    let settings = settings_from_sources(None, env_from(&[("PORT", "5050")]));
    assert_eq!(settings.server_bind, "0.0.0.0:5050");
}

#[test]
fn unparsable_body_limit_is_ignored() {
    let settings = settings_from_sources(None, env_from(&[("APP__MAX_BODY_BYTES", "lots")]));
    assert_eq!(settings.max_body_bytes, Settings::default().max_body_bytes);
}

#[test]
fn normalizes_plain_file_path_to_sqlite_url() {
    assert_eq!(
        normalize_database_url("./data/test.db"),
        "sqlite://./data/test.db"
    );
    assert_eq!(
        normalize_database_url("sqlite:data\\test.db"),
        "sqlite://data/test.db"
    );
    assert_eq!(normalize_database_url("  "), Settings::default().database_url);
}

#[test]
fn creates_parent_dir_for_sqlite_url() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();

    let temp_root = env::temp_dir().join(format!("address_book_server_test_{suffix}"));
    let db_path = temp_root.join("data").join("test.db");

    prepare_database_url(db_path.to_string_lossy().as_ref()).expect("prepare db url");
    assert!(temp_root.join("data").exists());

    fs::remove_dir_all(temp_root).expect("cleanup");
}
