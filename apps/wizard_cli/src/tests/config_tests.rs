use super::{load_settings_from, Settings};

use std::{
    collections::HashMap,
    env, fs,
    path::Path,
    time::{SystemTime, UNIX_EPOCH},
};

fn no_env(_key: &str) -> Option<String> {
    None
}

#[test]
fn missing_file_yields_defaults() {
    let settings = load_settings_from(Path::new("does/not/exist.toml"), no_env);
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.redirect_delay().as_secs(), 5);
}

#[test]
fn file_values_override_defaults() {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("wizard_cli_config_test_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("wizard.toml");
    fs::write(
        &path,
        "api_base_url = \"https://crm.example.cl/api/\"\nredirect_delay_secs = \"2\"\n",
    )
    .expect("write settings");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.api_base_url, "https://crm.example.cl/api/");
    assert_eq!(settings.redirect_delay_secs, 2);
    assert_eq!(settings.redirect_url, Settings::default().redirect_url);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

fn write_settings(tag: &str, contents: &str) -> (std::path::PathBuf, std::path::PathBuf) {
    let suffix = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock")
        .as_nanos();
    let temp_root = env::temp_dir().join(format!("wizard_cli_{tag}_{suffix}"));
    fs::create_dir_all(&temp_root).expect("temp root");
    let path = temp_root.join("wizard.toml");
    fs::write(&path, contents).expect("write settings");
    (temp_root, path)
}

#[test]
fn numeric_values_do_not_discard_other_keys() {
    let (temp_root, path) = write_settings(
        "numeric",
        "api_base_url = \"https://crm.example.cl/api/\"\nredirect_delay_secs = 7\n",
    );

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings.api_base_url, "https://crm.example.cl/api/");
    assert_eq!(settings.redirect_delay_secs, 7);

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn malformed_file_falls_back_to_defaults() {
    let (temp_root, path) = write_settings("malformed", "api_base_url = [unterminated\n");

    let settings = load_settings_from(&path, no_env);
    assert_eq!(settings, Settings::default());

    fs::remove_dir_all(temp_root).expect("cleanup");
}

#[test]
fn app_prefixed_env_wins_over_plain_env() {
    let vars: HashMap<&str, &str> = HashMap::from([
        ("WIZARD_API_BASE_URL", "http://plain/api/"),
        ("APP__API_BASE_URL", "http://prefixed/api/"),
        ("APP__REDIRECT_DELAY_SECS", "0"),
        ("RUST_LOG", "debug"),
    ]);
    let settings = load_settings_from(Path::new("does/not/exist.toml"), |key| {
        vars.get(key).map(|v| v.to_string())
    });

    assert_eq!(settings.api_base_url, "http://prefixed/api/");
    assert_eq!(settings.redirect_delay_secs, 0);
    assert_eq!(settings.log_filter, "debug");
}

#[test]
fn unparseable_delay_is_ignored() {
    let settings = load_settings_from(Path::new("does/not/exist.toml"), |key| {
        (key == "APP__REDIRECT_DELAY_SECS").then(|| "soon".to_string())
    });
    assert_eq!(settings.redirect_delay_secs, 5);
}
