use super::*;

use std::{
    collections::HashMap,
    env,
    time::{SystemTime, UNIX_EPOCH},
};

fn temp_settings_path(tag: &str) -> std::path::PathBuf {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    env::temp_dir().join(format!("produtos_settings_{tag}_{suffix}.toml"))
}

fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |name| vars.get(name).cloned()
}

#[test]
fn defaults_point_at_local_backend() {
    let settings = ClientSettings::default();
    assert_eq!(settings.api_url, "http://localhost:5000/produtos");
    assert_eq!(settings.request_timeout(), None);
}

#[test]
fn missing_file_yields_defaults() {
    let path = temp_settings_path("missing");
    assert_eq!(read_settings_file(&path), None);
}

#[test]
fn reads_partial_toml_file() {
    let path = temp_settings_path("partial");
    fs::write(&path, "request_timeout_secs = 10\n").expect("write settings");

    let settings = read_settings_file(&path).expect("settings");

    assert_eq!(settings.api_url, DEFAULT_API_URL);
    assert_eq!(settings.request_timeout(), Some(Duration::from_secs(10)));
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn malformed_file_is_ignored() {
    let path = temp_settings_path("malformed");
    fs::write(&path, "api_url = [not toml").expect("write settings");

    assert_eq!(read_settings_file(&path), None);
    fs::remove_file(path).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let mut settings = ClientSettings {
        api_url: "http://from-file:5000/produtos".to_string(),
        request_timeout_secs: None,
    };

    apply_env_overrides(
        &mut settings,
        lookup_from(&[
            ("PRODUTOS_API_URL", "http://plain:5000/produtos"),
            ("APP__API_URL", "http://prefixed:5000/produtos"),
            ("APP__REQUEST_TIMEOUT_SECS", " 3 "),
        ]),
    );

    assert_eq!(settings.api_url, "http://prefixed:5000/produtos");
    assert_eq!(settings.request_timeout_secs, Some(3));
}

#[test]
fn non_numeric_timeout_is_ignored_and_zero_disables_timeout() {
    let mut settings = ClientSettings::default();
    apply_env_overrides(
        &mut settings,
        lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "soon")]),
    );
    assert_eq!(settings.request_timeout_secs, None);

    apply_env_overrides(
        &mut settings,
        lookup_from(&[("APP__REQUEST_TIMEOUT_SECS", "0")]),
    );
    assert_eq!(settings.request_timeout_secs, Some(0));
    assert_eq!(settings.request_timeout(), None);
}
