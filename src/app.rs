use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::{Config, KeybindsConfig, parse_key};
use crate::feed::FeedEvent;
use crate::ui::theme::{ColorSupport, HeatOverrides, Theme, resolve_color_support};
use crate::view::MetricsView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Help,
}

#[derive(Debug, Clone)]
pub struct ResolvedKeybinds {
    pub quit: KeyCode,
    pub help: KeyCode,
    pub cycle_theme: KeyCode,
}

impl ResolvedKeybinds {
    pub fn from_config(kb: &KeybindsConfig) -> Self {
        Self {
            quit: parse_key(&kb.quit).unwrap_or(KeyCode::Char('q')),
            help: parse_key(&kb.help).unwrap_or(KeyCode::Char('?')),
            cycle_theme: parse_key(&kb.cycle_theme).unwrap_or(KeyCode::Char('t')),
        }
    }

    /// Returns (key_label, description) pairs for all configurable keybinds.
    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        vec![
            (key_label(self.quit), "Quit"),
            (key_label(self.help), "Toggle help"),
            (key_label(self.cycle_theme), "Cycle theme"),
            ("Ctrl+C".to_string(), "Quit (always)"),
        ]
    }
}

pub fn key_label(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Backspace => "Bksp".to_string(),
        KeyCode::Delete => "Del".to_string(),
        _ => "?".to_string(),
    }
}

pub struct App {
    pub running: bool,
    pub view: MetricsView,
    pub input_mode: InputMode,
    pub theme: Theme,
    pub color_support: ColorSupport,
    pub keybinds: ResolvedKeybinds,
    heat_overrides: HeatOverrides,
}

impl App {
    pub fn new(config: &Config) -> Self {
        let color_support = resolve_color_support(&config.colors.color_support);
        let heat_overrides = HeatOverrides::from_config(&config.colors);
        let theme = Theme::from_config(&config.colors.theme, &heat_overrides, color_support);

        App {
            running: true,
            view: MetricsView::new(config.feed_settings()),
            input_mode: InputMode::Normal,
            theme,
            color_support,
            keybinds: ResolvedKeybinds::from_config(&config.keybinds),
            heat_overrides,
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits (hardwired safety)
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        match self.input_mode {
            InputMode::Normal => self.map_key_normal(key),
            InputMode::Help => self.map_key_help(key),
        }
    }

    fn map_key_normal(&self, key: KeyEvent) -> Action {
        let code = key.code;
        let kb = &self.keybinds;

        if code == kb.quit {
            return Action::Quit;
        }
        if code == kb.help {
            return Action::ToggleHelp;
        }
        if code == kb.cycle_theme {
            return Action::CycleTheme;
        }
        Action::None
    }

    fn map_key_help(&self, key: KeyEvent) -> Action {
        let code = key.code;
        // In help mode, only the help key and Esc dismiss, everything else is ignored
        if code == self.keybinds.help || code == KeyCode::Esc {
            return Action::ToggleHelp;
        }
        Action::None
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::ToggleHelp => {
                self.input_mode = if self.input_mode == InputMode::Help {
                    InputMode::Normal
                } else {
                    InputMode::Help
                };
            }
            Action::CycleTheme => {
                self.theme = self.theme.next(&self.heat_overrides, self.color_support);
            }
            Action::None => {}
        }
    }

    /// Returns whether the event changed what is on screen.
    pub fn on_feed(&mut self, event: FeedEvent) -> bool {
        self.view.handle_feed_event(event)
    }

    pub fn quit(&mut self) {
        self.running = false;
        self.view.unmount();
    }

    pub fn show_help(&self) -> bool {
        self.input_mode == InputMode::Help
    }

    pub fn help_entries(&self) -> Vec<(String, &'static str)> {
        self.keybinds.help_entries()
    }

    /// Name/value pairs describing the feed, for the help overlay.
    pub fn feed_summary(&self) -> Vec<(&'static str, String)> {
        let settings = self.view.settings();
        let reconnect = if settings.reconnect {
            format!(
                "on ({}ms..{}ms)",
                settings.initial_backoff.as_millis(),
                settings.max_backoff.as_millis()
            )
        } else {
            "off".to_string()
        };
        vec![
            ("Endpoint", settings.endpoint.clone()),
            ("Reconnect", reconnect),
            ("Snapshots", self.view.applied_count().to_string()),
        ]
    }
}
