use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::KeyCode;
use serde::Deserialize;

use crate::feed::{DEFAULT_ENDPOINT, FeedSettings};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub connection: ConnectionConfig,
    pub colors: ColorsConfig,
    pub keybinds: KeybindsConfig,
    pub logging: LoggingConfig,
}

impl Config {
    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            endpoint: self.general.endpoint.clone(),
            reconnect: self.connection.reconnect,
            initial_backoff: Duration::from_millis(self.connection.initial_backoff_ms),
            max_backoff: Duration::from_millis(self.connection.max_backoff_ms),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    pub endpoint: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        GeneralConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ConnectionConfig {
    pub reconnect: bool,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        ConnectionConfig {
            reconnect: false,
            initial_backoff_ms: 500,
            max_backoff_ms: 30_000,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ColorsConfig {
    pub theme: String,
    pub color_support: String,
    pub heat_low: String,
    pub heat_mid: String,
    pub heat_high: String,
}

impl Default for ColorsConfig {
    fn default() -> Self {
        ColorsConfig {
            theme: "dark".to_string(),
            color_support: "auto".to_string(),
            heat_low: "#10b981".to_string(),
            heat_mid: "#f97316".to_string(),
            heat_high: "#ef4444".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct KeybindsConfig {
    pub quit: String,
    pub help: String,
    pub cycle_theme: String,
}

impl Default for KeybindsConfig {
    fn default() -> Self {
        KeybindsConfig {
            quit: "q".to_string(),
            help: "?".to_string(),
            cycle_theme: "t".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
            file: None,
        }
    }
}

/// Parses a keybind name such as `q`, `Enter` or `Esc`.
pub fn parse_key(s: &str) -> Option<KeyCode> {
    match s {
        "Enter" | "enter" => Some(KeyCode::Enter),
        "Esc" | "Escape" | "esc" => Some(KeyCode::Esc),
        "Tab" | "tab" => Some(KeyCode::Tab),
        "Space" | "space" => Some(KeyCode::Char(' ')),
        "Backspace" => Some(KeyCode::Backspace),
        "Delete" => Some(KeyCode::Delete),
        _ => {
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(KeyCode::Char(c)),
                _ => None,
            }
        }
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sysboard").join("config.toml"))
}

pub fn load_config() -> Config {
    match config_path() {
        Some(path) if path.exists() => load_config_from_path(&path),
        _ => Config::default(),
    }
}

pub fn load_config_from_path(path: &Path) -> Config {
    match std::fs::read_to_string(path) {
        Ok(contents) => toml::from_str(&contents).unwrap_or_default(),
        Err(_) => Config::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert_eq!(config.general.endpoint, "ws://127.0.0.1:9000/ws");
        assert!(!config.connection.reconnect);
        assert_eq!(config.connection.initial_backoff_ms, 500);
        assert_eq!(config.colors.theme, "dark");
        assert_eq!(config.keybinds.quit, "q");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.file.is_none());
    }

    #[test]
    fn parse_partial_toml() {
        let toml_str = r#"
[general]
endpoint = "ws://10.0.0.7:9000/ws"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.endpoint, "ws://10.0.0.7:9000/ws");
        // Other fields should be defaults
        assert_eq!(config.connection.max_backoff_ms, 30_000);
        assert_eq!(config.colors.color_support, "auto");
    }

    #[test]
    fn parse_full_toml() {
        let toml_str = r#"
[general]
endpoint = "ws://monitor.lan:9000/ws"

[connection]
reconnect = true
initial_backoff_ms = 250
max_backoff_ms = 4000

[colors]
theme = "light"
color_support = "256"

[keybinds]
quit = "x"
help = "h"

[logging]
level = "debug"
file = "/tmp/sysboard.log"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.connection.reconnect);
        assert_eq!(config.colors.theme, "light");
        assert_eq!(config.colors.color_support, "256");
        assert_eq!(config.keybinds.quit, "x");
        assert_eq!(config.keybinds.help, "h");
        assert_eq!(config.keybinds.cycle_theme, "t");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("/tmp/sysboard.log")));

        let feed = config.feed_settings();
        assert_eq!(feed.endpoint, "ws://monitor.lan:9000/ws");
        assert!(feed.reconnect);
        assert_eq!(feed.initial_backoff, Duration::from_millis(250));
        assert_eq!(feed.max_backoff, Duration::from_millis(4000));
    }

    #[test]
    fn parse_key_names() {
        assert_eq!(parse_key("q"), Some(KeyCode::Char('q')));
        assert_eq!(parse_key("?"), Some(KeyCode::Char('?')));
        assert_eq!(parse_key("Escape"), Some(KeyCode::Esc));
        assert_eq!(parse_key("Space"), Some(KeyCode::Char(' ')));
        assert_eq!(parse_key("ctrl-q"), None);
        assert_eq!(parse_key(""), None);
    }

    #[test]
    fn missing_file_returns_default() {
        let config = load_config_from_path(Path::new("/nonexistent/path/config.toml"));
        assert_eq!(config.general.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn invalid_toml_returns_default() {
        let temp = std::env::temp_dir().join("sysboard_test_invalid.toml");
        std::fs::write(&temp, "this is not valid toml {{{{").unwrap();
        let config = load_config_from_path(&temp);
        assert_eq!(config.general.endpoint, DEFAULT_ENDPOINT);
        let _ = std::fs::remove_file(&temp);
    }
}
