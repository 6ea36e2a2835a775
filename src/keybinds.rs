//! Key-binding configuration for the explorer.
//!
//! Bindings load from a JSON file mapping action names to key specs:
//!
//! ```json
//! { "move_left": ["h", "Left"], "save": ["ctrl+s"] }
//! ```
//!
//! Specs take optional `ctrl+` / `alt+` / `shift+` prefixes. Entries that
//! fail to parse are reported and skipped so one bad line never takes the
//! whole file down; a missing file falls back to the defaults.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crossterm::event::{KeyCode, KeyModifiers};

/// Everything a key press can do in the explorer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    Save,
    ToggleHelp,
    Quit,
}

impl Action {
    fn from_name(name: &str) -> Option<Action> {
        match name {
            "move_left" => Some(Action::MoveLeft),
            "move_right" => Some(Action::MoveRight),
            "move_up" => Some(Action::MoveUp),
            "move_down" => Some(Action::MoveDown),
            "save" => Some(Action::Save),
            "toggle_help" => Some(Action::ToggleHelp),
            "quit" => Some(Action::Quit),
            _ => None,
        }
    }
}

/// Resolved key-to-action table.
pub struct KeyBindings {
    bindings: HashMap<(KeyModifiers, KeyCode), Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let defaults = [
            ("Left", Action::MoveLeft),
            ("h", Action::MoveLeft),
            ("Right", Action::MoveRight),
            ("l", Action::MoveRight),
            ("Up", Action::MoveUp),
            ("k", Action::MoveUp),
            ("Down", Action::MoveDown),
            ("j", Action::MoveDown),
            ("s", Action::Save),
            ("?", Action::ToggleHelp),
            ("q", Action::Quit),
            ("Esc", Action::Quit),
        ];
        let mut binds = KeyBindings {
            bindings: HashMap::new(),
        };
        for (spec, action) in defaults {
            if let Some((modifiers, code)) = parse_spec(spec) {
                binds.bindings.insert((modifiers, code), action);
            }
        }
        binds
    }
}

impl KeyBindings {
    /// Load bindings from a JSON file. A missing file yields the defaults;
    /// an unreadable file is reported and also yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return KeyBindings::default(),
        };

        let entries: HashMap<String, Vec<String>> = match serde_json::from_str(&text) {
            Ok(entries) => entries,
            Err(e) => {
                eprintln!("Warning: failed to parse {}: {}", path.display(), e);
                return KeyBindings::default();
            }
        };

        let mut binds = KeyBindings {
            bindings: HashMap::new(),
        };
        for (name, specs) in entries {
            let action = match Action::from_name(&name) {
                Some(action) => action,
                None => {
                    eprintln!("Warning: unknown action '{}' in {}", name, path.display());
                    continue;
                }
            };
            for spec in specs {
                match parse_spec(&spec) {
                    Some((modifiers, code)) => {
                        binds.bindings.insert((modifiers, code), action);
                    }
                    None => {
                        eprintln!(
                            "Warning: unreadable key spec '{}' for '{}' in {}",
                            spec,
                            name,
                            path.display()
                        );
                    }
                }
            }
        }
        binds
    }

    /// Action bound to a key press, if any.
    pub fn lookup(&self, modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
        self.bindings.get(&(modifiers, code)).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Parse a key spec like `"h"`, `"Left"` or `"ctrl+shift+s"`.
fn parse_spec(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    let mut modifiers = KeyModifiers::NONE;
    let mut rest = spec.trim();

    loop {
        let lower = rest.to_ascii_lowercase();
        if let Some(tail) = lower.strip_prefix("ctrl+") {
            modifiers |= KeyModifiers::CONTROL;
            rest = &rest[rest.len() - tail.len()..];
        } else if let Some(tail) = lower.strip_prefix("alt+") {
            modifiers |= KeyModifiers::ALT;
            rest = &rest[rest.len() - tail.len()..];
        } else if let Some(tail) = lower.strip_prefix("shift+") {
            modifiers |= KeyModifiers::SHIFT;
            rest = &rest[rest.len() - tail.len()..];
        } else {
            break;
        }
    }

    let code = match rest {
        "Left" | "left" => KeyCode::Left,
        "Right" | "right" => KeyCode::Right,
        "Up" | "up" => KeyCode::Up,
        "Down" | "down" => KeyCode::Down,
        "Esc" | "esc" => KeyCode::Esc,
        "Enter" | "enter" => KeyCode::Enter,
        "Tab" | "tab" => KeyCode::Tab,
        "Space" | "space" => KeyCode::Char(' '),
        "Backspace" | "backspace" => KeyCode::Backspace,
        "PageUp" | "pageup" => KeyCode::PageUp,
        "PageDown" | "pagedown" => KeyCode::PageDown,
        "Home" | "home" => KeyCode::Home,
        "End" | "end" => KeyCode::End,
        other => {
            let mut chars = other.chars();
            let c = chars.next()?;
            if chars.next().is_some() {
                return None;
            }
            KeyCode::Char(c)
        }
    };

    Some((modifiers, code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_plain_and_named_keys() {
        assert_eq!(parse_spec("h"), Some((KeyModifiers::NONE, KeyCode::Char('h'))));
        assert_eq!(parse_spec("Left"), Some((KeyModifiers::NONE, KeyCode::Left)));
        assert_eq!(parse_spec("space"), Some((KeyModifiers::NONE, KeyCode::Char(' '))));
    }

    #[test]
    fn test_parse_modifier_prefixes() {
        assert_eq!(
            parse_spec("ctrl+s"),
            Some((KeyModifiers::CONTROL, KeyCode::Char('s')))
        );
        assert_eq!(
            parse_spec("ctrl+shift+Left"),
            Some((KeyModifiers::CONTROL | KeyModifiers::SHIFT, KeyCode::Left))
        );
        assert_eq!(
            parse_spec("alt+q"),
            Some((KeyModifiers::ALT, KeyCode::Char('q')))
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_spec("notakey"), None);
        assert_eq!(parse_spec(""), None);
    }

    #[test]
    fn test_defaults_cover_movement() {
        let binds = KeyBindings::default();
        assert_eq!(
            binds.lookup(KeyModifiers::NONE, KeyCode::Left),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            binds.lookup(KeyModifiers::NONE, KeyCode::Char('j')),
            Some(Action::MoveDown)
        );
        assert_eq!(
            binds.lookup(KeyModifiers::NONE, KeyCode::Char('q')),
            Some(Action::Quit)
        );
        assert!(binds
            .lookup(KeyModifiers::NONE, KeyCode::Char('z'))
            .is_none());
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let binds = KeyBindings::load("/nonexistent/keybinds.json");
        assert!(!binds.is_empty());
        assert_eq!(
            binds.lookup(KeyModifiers::NONE, KeyCode::Char('q')),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_file_overrides_and_bad_entries_are_skipped() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "move_left": ["a", "bogus_key_name"],
                "not_an_action": ["x"],
                "quit": ["ctrl+c"]
            }}"#
        )
        .unwrap();

        let binds = KeyBindings::load(file.path());
        assert_eq!(
            binds.lookup(KeyModifiers::NONE, KeyCode::Char('a')),
            Some(Action::MoveLeft)
        );
        assert_eq!(
            binds.lookup(KeyModifiers::CONTROL, KeyCode::Char('c')),
            Some(Action::Quit)
        );
        // The file is authoritative: defaults are not merged in
        assert!(binds.lookup(KeyModifiers::NONE, KeyCode::Left).is_none());
        assert!(binds.lookup(KeyModifiers::NONE, KeyCode::Char('x')).is_none());
        assert_eq!(binds.len(), 2);
    }

    #[test]
    fn test_unparseable_json_falls_back_to_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "this is not json").unwrap();

        let binds = KeyBindings::load(file.path());
        assert_eq!(
            binds.lookup(KeyModifiers::NONE, KeyCode::Char('q')),
            Some(Action::Quit)
        );
    }
}
