//! Theme preference CLI commands.
//!
//! The configuration file plays the part of the user session: it is the
//! source the store hydrates from and the target it syncs to.

use std::sync::{Arc, Mutex};

use clap::{Args, Subcommand};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::cli::common::{CliError, CliResult};
use crate::config::Config;
use crate::theme::{
    ColorKey, FontFamily, FontSize, IgnoreAuthErrors, PreferenceSync, SessionSource,
    StoredPreferences, SyncError, SyncFuture, ThemePreferences, ThemeStateStore, ThemeTokens,
};

/// Session source backed by the preferences saved in the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigSession {
    saved: Option<StoredPreferences>,
}

impl ConfigSession {
    /// Captures the saved preferences from `config`.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            saved: config.theme.preferences.clone(),
        }
    }
}

impl SessionSource for ConfigSession {
    fn current_preferences(&self) -> Option<StoredPreferences> {
        self.saved.clone()
    }
}

/// Preference sync that writes into the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigFileSync {
    last_error: Arc<Mutex<Option<SyncError>>>,
}

impl ConfigFileSync {
    /// Creates a sync target for the current config file.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the error of the most recent failed write, if any.
    pub fn take_error(&self) -> Option<SyncError> {
        self.last_error.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn write_preferences(prefs: ThemePreferences) -> Result<(), SyncError> {
    let mut config = Config::load().map_err(|e| SyncError::Transport(format!("{e:#}")))?;
    config.theme.preferences = Some(StoredPreferences::from(prefs));
    config
        .save()
        .map_err(|e| SyncError::Transport(format!("{e:#}")))
}

impl PreferenceSync for ConfigFileSync {
    fn push(&self, prefs: ThemePreferences) -> SyncFuture {
        let last_error = Arc::clone(&self.last_error);
        Box::pin(async move {
            let result = tokio::task::spawn_blocking(move || write_preferences(prefs))
                .await
                .unwrap_or_else(|e| Err(SyncError::Transport(e.to_string())));
            if let Err(err) = &result {
                if let Ok(mut slot) = last_error.lock() {
                    *slot = Some(err.clone());
                }
            }
            result
        })
    }
}

/// Theme preference commands
#[derive(Args, Debug)]
pub struct ThemeArgs {
    #[command(subcommand)]
    command: ThemeCommand,
}

#[derive(Subcommand, Debug)]
enum ThemeCommand {
    /// Show the current preferences
    Show(OutputArgs),
    /// Show the derived class tokens
    Tokens(OutputArgs),
    /// List the accepted colors, font families and font sizes
    Options(OutputArgs),
    /// Change one or more preferences
    Set(ThemeSetArgs),
    /// Restore the default preferences
    Reset,
}

/// Output format flags
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Change one or more preferences
#[derive(Args, Debug)]
pub struct ThemeSetArgs {
    /// Primary color (e.g. blue, red, teal)
    #[arg(long, value_name = "COLOR")]
    color: Option<String>,

    /// Font family (font-sans, font-serif, font-mono)
    #[arg(long, value_name = "FAMILY")]
    font: Option<String>,

    /// Font size (text-sm, text-base, text-lg, text-xl)
    #[arg(long, value_name = "SIZE")]
    size: Option<String>,

    /// Animations (on or off)
    #[arg(long, value_name = "on|off")]
    animations: Option<String>,
}

#[derive(Serialize, Debug)]
struct OptionsOutput {
    colors: Vec<&'static str>,
    font_families: Vec<&'static str>,
    font_sizes: Vec<&'static str>,
}

impl ThemeArgs {
    /// Execute theme subcommand
    pub async fn execute(&self) -> CliResult<()> {
        match &self.command {
            ThemeCommand::Show(output) => {
                let (store, _) = open_store()?;
                print_preferences(&store.preferences(), output.json)
            }
            ThemeCommand::Tokens(output) => {
                let (store, _) = open_store()?;
                print_tokens(&store.tokens(), output.json)
            }
            ThemeCommand::Options(output) => print_options(output.json),
            ThemeCommand::Set(args) => args.execute().await,
            ThemeCommand::Reset => {
                let (mut store, sync) = open_store()?;
                store.reset_to_default();
                finish_sync(&mut store, sync.as_ref()).await?;
                println!("Theme preferences reset to defaults.");
                Ok(())
            }
        }
    }
}

impl ThemeSetArgs {
    /// Execute set command
    pub async fn execute(&self) -> CliResult<()> {
        if self.color.is_none()
            && self.font.is_none()
            && self.size.is_none()
            && self.animations.is_none()
        {
            return Err(CliError::validation(
                "At least one preference must be specified: --color, --font, --size, or --animations",
            ));
        }

        let (mut store, sync) = open_store()?;
        let mut prefs = store.preferences();

        if let Some(color) = &self.color {
            prefs.primary_color = color
                .parse::<ColorKey>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }
        if let Some(font) = &self.font {
            prefs.font_family = font
                .parse::<FontFamily>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }
        if let Some(size) = &self.size {
            prefs.font_size = size
                .parse::<FontSize>()
                .map_err(|e| CliError::validation(e.to_string()))?;
        }
        if let Some(animations) = &self.animations {
            prefs.animations_enabled = parse_switch(animations)?;
        }

        store.apply(prefs);
        finish_sync(&mut store, sync.as_ref()).await?;

        println!("Theme preferences updated.");
        Ok(())
    }
}

fn parse_switch(value: &str) -> CliResult<bool> {
    match value.to_lowercase().as_str() {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(CliError::validation(format!(
            "Invalid animations value '{value}'. Must be 'on' or 'off'"
        ))),
    }
}

/// Builds a store hydrated from the config file, with sync when enabled.
fn open_store() -> CliResult<(ThemeStateStore, Option<ConfigFileSync>)> {
    let config = Config::load()
        .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

    let store = ThemeStateStore::new(Arc::new(ConfigSession::new(&config)));
    if !config.theme.sync_enabled {
        return Ok((store, None));
    }

    let sync = ConfigFileSync::new();
    let store = store.with_sync(Arc::new(sync.clone()), Arc::new(IgnoreAuthErrors));
    Ok((store, Some(sync)))
}

/// Waits for pending writes. A failed write is reported but never fails the
/// command: the change already took effect locally.
async fn finish_sync(store: &mut ThemeStateStore, sync: Option<&ConfigFileSync>) -> CliResult<()> {
    store.flush_sync().await;
    match sync {
        Some(sync) => {
            if let Some(err) = sync.take_error() {
                tracing::warn!("Failed to save theme preferences: {err}");
                eprintln!("Note: theme preferences could not be saved ({err}).");
            }
        }
        None => {
            eprintln!("Note: theme sync is disabled in the configuration; change not saved.");
        }
    }
    Ok(())
}

fn print_preferences(prefs: &ThemePreferences, json: bool) -> CliResult<()> {
    if json {
        return print_json(prefs);
    }
    println!("Primary color: {}", prefs.primary_color);
    println!("Font family:   {}", prefs.font_family);
    println!("Font size:     {}", prefs.font_size);
    println!(
        "Animations:    {}",
        if prefs.animations_enabled { "on" } else { "off" }
    );
    Ok(())
}

fn print_tokens(tokens: &ThemeTokens, json: bool) -> CliResult<()> {
    if json {
        let mut map = Map::new();
        for (name, class) in tokens.iter() {
            map.insert(name.key().to_string(), Value::from(class));
        }
        map.insert("fontFamily".to_string(), Value::from(tokens.font_family));
        map.insert("fontSize".to_string(), Value::from(tokens.font_size));
        map.insert("animations".to_string(), Value::from(tokens.animations));
        return print_json(&map);
    }
    for (name, class) in tokens.iter() {
        println!("{:<18} {}", name.key(), class);
    }
    println!("{:<18} {}", "fontFamily", tokens.font_family);
    println!("{:<18} {}", "fontSize", tokens.font_size);
    println!("{:<18} {}", "animations", tokens.animations);
    Ok(())
}

fn print_options(json: bool) -> CliResult<()> {
    let output = OptionsOutput {
        colors: ColorKey::ALL.iter().map(|c| c.as_str()).collect(),
        font_families: FontFamily::ALL.iter().map(|f| f.as_str()).collect(),
        font_sizes: FontSize::ALL.iter().map(|s| s.as_str()).collect(),
    };
    if json {
        return print_json(&output);
    }
    println!("Colors:        {}", output.colors.join(", "));
    println!("Font families: {}", output.font_families.join(", "));
    println!("Font sizes:    {}", output.font_sizes.join(", "));
    Ok(())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{json}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_switch() {
        assert!(parse_switch("on").unwrap());
        assert!(parse_switch("TRUE").unwrap());
        assert!(!parse_switch("off").unwrap());
        assert!(parse_switch("maybe").is_err());
    }

    #[test]
    fn test_config_session_without_saved_preferences() {
        let session = ConfigSession::new(&Config::new());
        assert!(session.current_preferences().is_none());
    }

    #[test]
    fn test_config_session_with_saved_preferences() {
        let mut config = Config::new();
        config.theme.preferences = Some(StoredPreferences::from(ThemePreferences {
            primary_color: ColorKey::Pink,
            ..ThemePreferences::DEFAULT
        }));
        let stored = ConfigSession::new(&config).current_preferences().unwrap();
        assert_eq!(stored.primary_color.as_deref(), Some("pink"));
        assert_eq!(stored.resolve().primary_color, ColorKey::Pink);
    }

    #[test]
    fn test_config_session_passes_unknown_keys_to_resolve() {
        let mut config = Config::new();
        config.theme.preferences = Some(StoredPreferences {
            primary_color: Some("mauve".to_string()),
            ..StoredPreferences::default()
        });
        let stored = ConfigSession::new(&config).current_preferences().unwrap();
        assert_eq!(stored.primary_color.as_deref(), Some("mauve"));
        assert_eq!(stored.resolve(), ThemePreferences::DEFAULT);
    }

    #[tokio::test]
    async fn test_failed_write_does_not_fail_command() {
        let sync = ConfigFileSync::new();
        *sync.last_error.lock().unwrap() = Some(SyncError::Transport("disk full".to_string()));
        let mut store = ThemeStateStore::new(Arc::new(ConfigSession::default()));
        store.set_primary_color(ColorKey::Red);

        assert!(finish_sync(&mut store, Some(&sync)).await.is_ok());
        assert!(sync.take_error().is_none());
        assert_eq!(store.preferences().primary_color, ColorKey::Red);
    }
}
