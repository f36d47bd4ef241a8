//! End-to-end tests for `smartplanner theme` and `smartplanner config` commands.

use serde_json::Value;
use std::fs;
use tempfile::TempDir;

mod fixtures;
use fixtures::run_cli;

fn json_stdout(output: &std::process::Output) -> Value {
    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be JSON")
}

#[test]
fn test_theme_show_defaults() {
    let config_dir = TempDir::new().unwrap();
    let prefs = json_stdout(&run_cli(&["theme", "show", "--json"], &config_dir));
    assert_eq!(prefs["primaryColor"], "blue");
    assert_eq!(prefs["fontFamily"], "font-sans");
    assert_eq!(prefs["fontSize"], "text-base");
    assert_eq!(prefs["animations"], true);
}

#[test]
fn test_theme_set_persists_and_derives_tokens() {
    let config_dir = TempDir::new().unwrap();

    let set = run_cli(
        &["theme", "set", "--color", "red", "--size", "text-lg", "--animations", "off"],
        &config_dir,
    );
    assert_eq!(
        set.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&set.stderr)
    );

    let saved = fs::read_to_string(config_dir.path().join("config.toml")).unwrap();
    assert!(saved.contains("primaryColor = \"red\""));

    let tokens = json_stdout(&run_cli(&["theme", "tokens", "--json"], &config_dir));
    assert_eq!(tokens["primaryText"], "text-red-600");
    assert_eq!(tokens["primaryButton"], "bg-red-600 hover:bg-red-700 text-white");
    assert_eq!(tokens["fontSize"], "text-lg");
    assert_eq!(tokens["animations"], false);
}

#[test]
fn test_theme_reset() {
    let config_dir = TempDir::new().unwrap();
    assert_eq!(
        run_cli(&["theme", "set", "--color", "teal", "--font", "mono"], &config_dir)
            .status
            .code(),
        Some(0)
    );

    assert_eq!(run_cli(&["theme", "reset"], &config_dir).status.code(), Some(0));

    let prefs = json_stdout(&run_cli(&["theme", "show", "--json"], &config_dir));
    assert_eq!(prefs["primaryColor"], "blue");
    assert_eq!(prefs["fontFamily"], "font-sans");
}

#[test]
fn test_theme_set_rejects_unknown_color() {
    let config_dir = TempDir::new().unwrap();
    let output = run_cli(&["theme", "set", "--color", "chartreuse"], &config_dir);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown color 'chartreuse'"));
    assert!(!config_dir.path().join("config.toml").exists());
}

#[test]
fn test_theme_set_requires_an_option() {
    let config_dir = TempDir::new().unwrap();
    let output = run_cli(&["theme", "set"], &config_dir);
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_theme_set_with_sync_disabled_does_not_save() {
    let config_dir = TempDir::new().unwrap();
    fs::write(
        config_dir.path().join("config.toml"),
        "[theme]\nsync_enabled = false\n",
    )
    .unwrap();

    let output = run_cli(&["theme", "set", "--color", "green"], &config_dir);
    assert_eq!(output.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&output.stderr).contains("sync is disabled"));

    let prefs = json_stdout(&run_cli(&["theme", "show", "--json"], &config_dir));
    assert_eq!(prefs["primaryColor"], "blue");
}

#[test]
fn test_theme_options_lists_every_choice() {
    let config_dir = TempDir::new().unwrap();
    let options = json_stdout(&run_cli(&["theme", "options", "--json"], &config_dir));
    assert_eq!(options["colors"].as_array().unwrap().len(), 10);
    assert_eq!(options["font_families"][2], "font-mono");
    assert_eq!(options["font_sizes"][0], "text-sm");
}

#[test]
fn test_config_show_json() {
    let config_dir = TempDir::new().unwrap();
    let config = json_stdout(&run_cli(&["config", "show", "--json"], &config_dir));
    assert_eq!(config["exists"], false);
    assert_eq!(config["board"]["settle_delay_ms"], 300);
    assert_eq!(config["board"]["columns"][1]["key"], "doing");
}

#[test]
fn test_config_invalid_file_is_reported() {
    let config_dir = TempDir::new().unwrap();
    fs::write(
        config_dir.path().join("config.toml"),
        "[board]\nsettle_delay_ms = 999999\n",
    )
    .unwrap();
    let output = run_cli(&["config", "show"], &config_dir);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("settle_delay_ms"));
}

#[test]
fn test_theme_show_clamps_loose_saved_preferences() {
    let config_dir = TempDir::new().unwrap();
    fs::write(
        config_dir.path().join("config.toml"),
        "[theme.preferences]\nprimaryColor = \"mauve\"\nfontSize = \"text-xl\"\n",
    )
    .unwrap();

    let prefs = json_stdout(&run_cli(&["theme", "show", "--json"], &config_dir));
    assert_eq!(prefs["primaryColor"], "blue");
    assert_eq!(prefs["fontSize"], "text-xl");
    assert_eq!(prefs["fontFamily"], "font-sans");
}
