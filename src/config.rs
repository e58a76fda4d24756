use std::{collections::HashMap, path::PathBuf};

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use derive_deref::{Deref, DerefMut};
use serde::{
    de::{self, Deserializer},
    Deserialize,
};

use crate::{
    action::Action,
    utils::get_config_dir,
};

const CONFIG: &str = include_str!("../.config/config.yaml");

#[derive(Clone, Debug, Deserialize, Default)]
pub struct AppConfig {
    // Root that site-absolute image references are resolved against
    #[serde(default)]
    pub assets_dir: PathBuf,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default, flatten)]
    pub config: AppConfig,
    #[serde(default)]
    pub keybindings: KeyBindings,
}

impl Config {
    pub fn new() -> Result<Self> {
        let default_config: Config = serde_yaml::from_str(CONFIG)?;
        let config_dir = get_config_dir();
        let mut builder = config::Config::builder().set_default("assets_dir", "public")?;

        let config_files = [("config.yaml", config::FileFormat::Yaml), ("config.json5", config::FileFormat::Json5)];
        let mut found_config = false;
        for (file, format) in &config_files {
            builder = builder.add_source(config::File::from(config_dir.join(file)).format(*format).required(false));
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            log::info!("No configuration file found in {}, using defaults", config_dir.display());
        }

        let mut cfg: Self = builder.build()?.try_deserialize()?;
        for (key, action) in default_config.keybindings.iter() {
            cfg.keybindings.entry(*key).or_insert_with(|| action.clone());
        }

        Ok(cfg)
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
struct RawKeyBindings {
    pub click: Option<HashMap<String, String>>,
}

#[derive(Clone, Debug, Default, Deref, DerefMut)]
pub struct KeyBindings(pub HashMap<KeyEvent, Action>);

impl<'de> Deserialize<'de> for KeyBindings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = RawKeyBindings::deserialize(deserializer)?;
        let bindings = raw
            .click
            .unwrap_or_default()
            .iter()
            .map(|(key_str, action_str)| {
                let key = parse_key_event(key_str).map_err(<D::Error as de::Error>::custom)?;
                let action: Action = serde_yaml::from_str(action_str).map_err(<D::Error as de::Error>::custom)?;
                Ok((key, action))
            })
            .collect::<Result<HashMap<_, _>, D::Error>>()?;

        Ok(KeyBindings(bindings))
    }
}

/// Parses `<ctrl-alt-x>` style key strings. Angle brackets are optional, case is ignored.
fn parse_key_event(raw: &str) -> Result<KeyEvent, String> {
    if raw.matches('<').count() != raw.matches('>').count() {
        return Err(format!("Unable to parse `{raw}`"));
    }
    let lower = raw.trim_start_matches('<').trim_end_matches('>').to_ascii_lowercase();
    let (remaining, modifiers) = extract_modifiers(&lower);
    parse_key_code(remaining, modifiers)
}

fn extract_modifiers(raw: &str) -> (&str, KeyModifiers) {
    const PREFIXES: [(&str, KeyModifiers); 3] =
        [("ctrl-", KeyModifiers::CONTROL), ("alt-", KeyModifiers::ALT), ("shift-", KeyModifiers::SHIFT)];

    let mut modifiers = KeyModifiers::empty();
    let mut current = raw;
    while let Some((rest, modifier)) =
        PREFIXES.iter().find_map(|(prefix, modifier)| current.strip_prefix(prefix).map(|rest| (rest, *modifier)))
    {
        modifiers.insert(modifier);
        current = rest;
    }

    (current, modifiers)
}

fn parse_key_code(raw: &str, mut modifiers: KeyModifiers) -> Result<KeyEvent, String> {
    let code = match raw {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        "backtab" => {
            modifiers.insert(KeyModifiers::SHIFT);
            KeyCode::BackTab
        },
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "insert" => KeyCode::Insert,
        "space" => KeyCode::Char(' '),
        "hyphen" | "minus" => KeyCode::Char('-'),
        "tab" => KeyCode::Tab,
        f if f.len() > 1 && f.starts_with('f') => match f[1..].parse::<u8>() {
            Ok(n @ 1..=12) => KeyCode::F(n),
            _ => return Err(format!("Unable to parse {raw}")),
        },
        c => {
            let mut chars = c.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) if modifiers.contains(KeyModifiers::SHIFT) => KeyCode::Char(c.to_ascii_uppercase()),
                (Some(c), None) => KeyCode::Char(c),
                _ => return Err(format!("Unable to parse {raw}")),
            }
        },
    };
    Ok(KeyEvent::new(code, modifiers))
}

/// Human readable form of a key event, e.g. `Ctrl-Alt-a`.
pub fn key_event_to_string(key_event: &KeyEvent) -> String {
    let code = match key_event.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::F(n) => format!("F({n})"),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::PageUp => "PageUp".to_string(),
        KeyCode::PageDown => "PageDown".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::BackTab => "BackTab".to_string(),
        KeyCode::Delete => "Delete".to_string(),
        KeyCode::Insert => "Insert".to_string(),
        KeyCode::Esc => "Esc".to_string(),
        _ => String::new(),
    };

    let modifiers = [(KeyModifiers::CONTROL, "Ctrl"), (KeyModifiers::SHIFT, "Shift"), (KeyModifiers::ALT, "Alt")];
    modifiers
        .into_iter()
        .filter(|(modifier, _)| key_event.modifiers.intersects(*modifier))
        .map(|(_, name)| name.to_string())
        .chain(std::iter::once(code))
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_keybindings() -> Result<()> {
        let c: Config = serde_yaml::from_str(CONFIG)?;
        let quit = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        let reload = KeyEvent::new(KeyCode::Char('r'), KeyModifiers::empty());
        let suspend = KeyEvent::new(KeyCode::Char('z'), KeyModifiers::CONTROL);

        assert_eq!(c.keybindings.get(&quit), Some(&Action::Quit));
        assert_eq!(c.keybindings.get(&reload), Some(&Action::Reload));
        assert_eq!(c.keybindings.get(&suspend), Some(&Action::Suspend));
        Ok(())
    }

    #[test]
    fn test_config() -> Result<()> {
        let c = Config::new()?;
        let help = KeyEvent::new(KeyCode::Char('h'), KeyModifiers::empty());
        assert_eq!(c.keybindings.get(&help), Some(&Action::ToggleShowHelp));
        assert!(!c.config.assets_dir.as_os_str().is_empty());
        Ok(())
    }

    #[test]
    fn test_app_config_is_assets_dir_only() -> Result<()> {
        let c: AppConfig = serde_yaml::from_str("assets_dir: /srv/site\n")?;
        assert_eq!(c.assets_dir, PathBuf::from("/srv/site"));

        let c: AppConfig = serde_yaml::from_str("{}")?;
        assert_eq!(c.assets_dir, PathBuf::new());
        Ok(())
    }

    #[test]
    fn test_invalid_binding_is_an_error() {
        let raw = "keybindings:\n  click:\n    \"<nope-key>\": Quit\n";
        assert!(serde_yaml::from_str::<Config>(raw).is_err());

        let raw = "keybindings:\n  click:\n    \"<q>\": Fly\n";
        assert!(serde_yaml::from_str::<Config>(raw).is_err());
    }

    #[test]
    fn test_simple_keys() {
        assert_eq!(parse_key_event("a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::empty()));

        assert_eq!(parse_key_event("enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::empty()));

        assert_eq!(parse_key_event("<esc>").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::empty()));
    }

    #[test]
    fn test_with_modifiers() {
        assert_eq!(parse_key_event("ctrl-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("alt-enter").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));

        assert_eq!(parse_key_event("shift-esc").unwrap(), KeyEvent::new(KeyCode::Esc, KeyModifiers::SHIFT));
    }

    #[test]
    fn test_multiple_modifiers() {
        assert_eq!(
            parse_key_event("ctrl-alt-a").unwrap(),
            KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)
        );

        assert_eq!(
            parse_key_event("ctrl-shift-enter").unwrap(),
            KeyEvent::new(KeyCode::Enter, KeyModifiers::CONTROL | KeyModifiers::SHIFT)
        );
    }

    #[test]
    fn test_key_event_to_string() {
        assert_eq!(
            key_event_to_string(&KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL | KeyModifiers::ALT)),
            "Ctrl-Alt-a".to_string()
        );
        assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::Char(' '), KeyModifiers::empty())), "Space");
        assert_eq!(key_event_to_string(&KeyEvent::new(KeyCode::F(5), KeyModifiers::SHIFT)), "Shift-F(5)");
    }

    #[test]
    fn test_invalid_keys() {
        assert!(parse_key_event("invalid-key").is_err());
        assert!(parse_key_event("ctrl-invalid-key").is_err());
        assert!(parse_key_event("<ctrl-a").is_err());
    }

    #[test]
    fn test_case_insensitivity() {
        assert_eq!(parse_key_event("CTRL-a").unwrap(), KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL));

        assert_eq!(parse_key_event("AlT-eNtEr").unwrap(), KeyEvent::new(KeyCode::Enter, KeyModifiers::ALT));
    }
}
