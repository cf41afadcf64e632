//! Hotkey configuration.
//!
//! Key bindings for the host's actions, grouped by input mode and
//! serializable into the configuration file.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;

/// Represents all possible actions that can be bound to hotkeys.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HotkeyAction {
    // Page mode actions
    FocusNext,
    FocusPrev,
    Activate,
    ActivateNewContext,
    ToggleSidebar,
    Cancel,
    ScrollDown,
    ScrollUp,
    Quit,

    // Logout confirmation actions
    ConfirmYes,
    ConfirmNo,
}

/// Input modes that carry their own bindings.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Page,
    Confirm,
}

/// Represents a key combination (KeyCode + modifiers).
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Hotkey {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl Hotkey {
    fn key(code: KeyCode) -> Self {
        Hotkey {
            code,
            modifiers: KeyModifiers::empty(),
        }
    }
}

impl Serialize for Hotkey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeStruct;
        let code = KeyCodeSerde::try_from(self.code).map_err(serde::ser::Error::custom)?;
        let mut state = serializer.serialize_struct("Hotkey", 3)?;
        state.serialize_field("code", &code)?;
        match self.code {
            KeyCode::Char(c) => state.serialize_field("char", &c)?,
            KeyCode::F(number) => state.serialize_field("number", &number)?,
            _ => {}
        }
        state.serialize_field("modifiers", &KeyModifiersSerde::from(self.modifiers))?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Hotkey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct HotkeyHelper {
            code: KeyCodeSerde,
            #[serde(default)]
            char: Option<char>,
            #[serde(default)]
            number: Option<u8>,
            #[serde(default)]
            modifiers: KeyModifiersSerde,
        }

        let helper = HotkeyHelper::deserialize(deserializer)?;
        let code = match helper.code {
            KeyCodeSerde::Char => match helper.char {
                Some(c) => KeyCode::Char(c),
                None => {
                    return Err(serde::de::Error::custom(
                        "Char key code requires 'char' field",
                    ))
                }
            },
            KeyCodeSerde::F => match helper.number {
                Some(number) => KeyCode::F(number),
                None => {
                    return Err(serde::de::Error::custom(
                        "F key code requires 'number' field",
                    ))
                }
            },
            KeyCodeSerde::Esc => KeyCode::Esc,
            KeyCodeSerde::Backspace => KeyCode::Backspace,
            KeyCodeSerde::Delete => KeyCode::Delete,
            KeyCodeSerde::Insert => KeyCode::Insert,
            KeyCodeSerde::Home => KeyCode::Home,
            KeyCodeSerde::End => KeyCode::End,
            KeyCodeSerde::BackTab => KeyCode::BackTab,
            KeyCodeSerde::Enter => KeyCode::Enter,
            KeyCodeSerde::Tab => KeyCode::Tab,
            KeyCodeSerde::Up => KeyCode::Up,
            KeyCodeSerde::Down => KeyCode::Down,
            KeyCodeSerde::Left => KeyCode::Left,
            KeyCodeSerde::Right => KeyCode::Right,
            KeyCodeSerde::PageUp => KeyCode::PageUp,
            KeyCodeSerde::PageDown => KeyCode::PageDown,
        };
        Ok(Hotkey {
            code,
            modifiers: helper.modifiers.into(),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
enum KeyCodeSerde {
    Char,
    F,
    Esc,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    BackTab,
    Enter,
    Tab,
    Up,
    Down,
    Left,
    Right,
    PageUp,
    PageDown,
}

impl TryFrom<KeyCode> for KeyCodeSerde {
    type Error = String;

    fn try_from(code: KeyCode) -> Result<Self, Self::Error> {
        let code = match code {
            KeyCode::Char(_) => KeyCodeSerde::Char,
            KeyCode::F(_) => KeyCodeSerde::F,
            KeyCode::Esc => KeyCodeSerde::Esc,
            KeyCode::Backspace => KeyCodeSerde::Backspace,
            KeyCode::Delete => KeyCodeSerde::Delete,
            KeyCode::Insert => KeyCodeSerde::Insert,
            KeyCode::Home => KeyCodeSerde::Home,
            KeyCode::End => KeyCodeSerde::End,
            KeyCode::BackTab => KeyCodeSerde::BackTab,
            KeyCode::Enter => KeyCodeSerde::Enter,
            KeyCode::Tab => KeyCodeSerde::Tab,
            KeyCode::Up => KeyCodeSerde::Up,
            KeyCode::Down => KeyCodeSerde::Down,
            KeyCode::Left => KeyCodeSerde::Left,
            KeyCode::Right => KeyCodeSerde::Right,
            KeyCode::PageUp => KeyCodeSerde::PageUp,
            KeyCode::PageDown => KeyCodeSerde::PageDown,
            other => return Err(format!("Key {:?} cannot be bound", other)),
        };
        Ok(code)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct KeyModifiersSerde {
    #[serde(default)]
    control: bool,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    alt: bool,
}

impl From<KeyModifiers> for KeyModifiersSerde {
    fn from(modifiers: KeyModifiers) -> Self {
        KeyModifiersSerde {
            control: modifiers.contains(KeyModifiers::CONTROL),
            shift: modifiers.contains(KeyModifiers::SHIFT),
            alt: modifiers.contains(KeyModifiers::ALT),
        }
    }
}

impl From<KeyModifiersSerde> for KeyModifiers {
    fn from(serde: KeyModifiersSerde) -> Self {
        let mut result = KeyModifiers::empty();
        if serde.control {
            result |= KeyModifiers::CONTROL;
        }
        if serde.shift {
            result |= KeyModifiers::SHIFT;
        }
        if serde.alt {
            result |= KeyModifiers::ALT;
        }
        result
    }
}

/// Maps hotkey actions to their key bindings for each input mode.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeHotkeys {
    pub page: HashMap<HotkeyAction, Hotkey>,
    pub confirm: HashMap<HotkeyAction, Hotkey>,
}

impl Default for ModeHotkeys {
    fn default() -> Self {
        default_hotkeys()
    }
}

impl ModeHotkeys {
    pub fn for_mode(&self, mode: InputMode) -> &HashMap<HotkeyAction, Hotkey> {
        match mode {
            InputMode::Page => &self.page,
            InputMode::Confirm => &self.confirm,
        }
    }
}

/// Returns default hotkey mappings for all modes.
///
pub fn default_hotkeys() -> ModeHotkeys {
    let page = [
        (HotkeyAction::FocusNext, Hotkey::key(KeyCode::Down)),
        (HotkeyAction::FocusPrev, Hotkey::key(KeyCode::Up)),
        (HotkeyAction::Activate, Hotkey::key(KeyCode::Enter)),
        (HotkeyAction::ActivateNewContext, Hotkey::key(KeyCode::Char('o'))),
        (HotkeyAction::ToggleSidebar, Hotkey::key(KeyCode::Char('m'))),
        (HotkeyAction::Cancel, Hotkey::key(KeyCode::Esc)),
        (HotkeyAction::ScrollDown, Hotkey::key(KeyCode::PageDown)),
        (HotkeyAction::ScrollUp, Hotkey::key(KeyCode::PageUp)),
        (HotkeyAction::Quit, Hotkey::key(KeyCode::Char('q'))),
    ];
    let confirm = [
        (HotkeyAction::ConfirmYes, Hotkey::key(KeyCode::Char('y'))),
        (HotkeyAction::ConfirmNo, Hotkey::key(KeyCode::Char('n'))),
        (HotkeyAction::Cancel, Hotkey::key(KeyCode::Esc)),
    ];
    ModeHotkeys {
        page: page.into_iter().collect(),
        confirm: confirm.into_iter().collect(),
    }
}

/// Checks if a KeyEvent matches a Hotkey.
///
pub fn matches_hotkey(event: &KeyEvent, hotkey: &Hotkey) -> bool {
    event.code == hotkey.code && event.modifiers == hotkey.modifiers
}

/// Gets the action for a KeyEvent in a specific mode.
///
pub fn get_action_for_event(
    event: &KeyEvent,
    mode: InputMode,
    hotkeys: &ModeHotkeys,
) -> Option<HotkeyAction> {
    hotkeys
        .for_mode(mode)
        .iter()
        .find(|(_, hotkey)| matches_hotkey(event, hotkey))
        .map(|(action, _)| *action)
}

/// Builds a footer text string from hotkey configurations.
///
pub fn build_footer_text(
    hotkeys: &HashMap<HotkeyAction, Hotkey>,
    actions: &[(HotkeyAction, &str)],
) -> String {
    actions
        .iter()
        .filter_map(|(action, description)| {
            hotkeys
                .get(action)
                .map(|hotkey| format!(" {}: {}", format_hotkey_display(hotkey), description))
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats a hotkey for display in the footer.
///
pub fn format_hotkey_display(hotkey: &Hotkey) -> String {
    let mut parts = Vec::new();
    if hotkey.modifiers.contains(KeyModifiers::CONTROL) {
        parts.push("Ctrl");
    }
    if hotkey.modifiers.contains(KeyModifiers::SHIFT) {
        parts.push("Shift");
    }
    if hotkey.modifiers.contains(KeyModifiers::ALT) {
        parts.push("Alt");
    }

    let key_str = match &hotkey.code {
        KeyCode::Char(' ') => "Space".to_string(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Esc => "Esc".to_string(),
        KeyCode::Enter => "Enter".to_string(),
        KeyCode::Tab => "Tab".to_string(),
        KeyCode::Up => "Up".to_string(),
        KeyCode::Down => "Down".to_string(),
        KeyCode::Left => "Left".to_string(),
        KeyCode::Right => "Right".to_string(),
        KeyCode::PageUp => "PgUp".to_string(),
        KeyCode::PageDown => "PgDn".to_string(),
        KeyCode::F(number) => format!("F{}", number),
        KeyCode::Backspace => "Backspace".to_string(),
        KeyCode::Delete => "Del".to_string(),
        KeyCode::Insert => "Ins".to_string(),
        KeyCode::Home => "Home".to_string(),
        KeyCode::End => "End".to_string(),
        KeyCode::BackTab => "Shift+Tab".to_string(),
        _ => "Unknown".to_string(),
    };

    if parts.is_empty() {
        key_str
    } else {
        format!("{}+{}", parts.join("+"), key_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEventKind, KeyEventState};

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn test_matches_hotkey() {
        let hotkey = Hotkey::key(KeyCode::Char('o'));
        assert!(matches_hotkey(&press(KeyCode::Char('o'), KeyModifiers::empty()), &hotkey));
        assert!(!matches_hotkey(&press(KeyCode::Char('o'), KeyModifiers::CONTROL), &hotkey));
        assert!(!matches_hotkey(&press(KeyCode::Char('p'), KeyModifiers::empty()), &hotkey));
    }

    #[test]
    fn test_get_action_for_event() {
        let hotkeys = default_hotkeys();
        let esc = press(KeyCode::Esc, KeyModifiers::empty());
        assert_eq!(
            get_action_for_event(&esc, InputMode::Page, &hotkeys),
            Some(HotkeyAction::Cancel)
        );
        let yes = press(KeyCode::Char('y'), KeyModifiers::empty());
        assert_eq!(
            get_action_for_event(&yes, InputMode::Confirm, &hotkeys),
            Some(HotkeyAction::ConfirmYes)
        );
        assert_eq!(get_action_for_event(&yes, InputMode::Page, &hotkeys), None);
    }

    #[test]
    fn test_default_hotkeys() {
        let hotkeys = default_hotkeys();
        assert_eq!(hotkeys.page.len(), 9);
        assert!(hotkeys.confirm.contains_key(&HotkeyAction::ConfirmNo));
    }

    #[test]
    fn test_hotkey_serialization() {
        let hotkey = Hotkey {
            code: KeyCode::Char('m'),
            modifiers: KeyModifiers::CONTROL,
        };
        let serialized = serde_yaml::to_string(&hotkey).unwrap();
        assert!(serialized.contains("m"));
        let deserialized: Hotkey = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(hotkey, deserialized);

        let hotkeys = default_hotkeys();
        let serialized = serde_yaml::to_string(&hotkeys).unwrap();
        let deserialized: ModeHotkeys = serde_yaml::from_str(&serialized).unwrap();
        assert_eq!(hotkeys, deserialized);
    }

    #[test]
    fn test_char_code_requires_char() {
        let result: Result<Hotkey, _> = serde_yaml::from_str("code: Char\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_named_keys_survive_serialization() {
        for code in [
            KeyCode::F(5),
            KeyCode::Backspace,
            KeyCode::Delete,
            KeyCode::Home,
            KeyCode::End,
            KeyCode::BackTab,
        ] {
            let hotkey = Hotkey::key(code);
            let yaml = serde_yaml::to_string(&hotkey).unwrap();
            let parsed: Hotkey = serde_yaml::from_str(&yaml).unwrap();
            assert_eq!(parsed, hotkey, "{}", yaml);
        }
    }

    #[test]
    fn test_unbindable_key_is_rejected() {
        let result = serde_yaml::to_string(&Hotkey::key(KeyCode::CapsLock));
        assert!(result.is_err());
        let result: Result<Hotkey, _> = serde_yaml::from_str("code: F\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_footer_text() {
        let hotkeys = default_hotkeys();
        let text = build_footer_text(
            &hotkeys.page,
            &[(HotkeyAction::Activate, "open"), (HotkeyAction::Quit, "quit")],
        );
        assert_eq!(text, " Enter: open, q: quit");
        assert_eq!(
            format_hotkey_display(&Hotkey {
                code: KeyCode::PageDown,
                modifiers: KeyModifiers::CONTROL | KeyModifiers::SHIFT,
            }),
            "Ctrl+Shift+PgDn"
        );
        assert_eq!(format_hotkey_display(&Hotkey::key(KeyCode::F(5))), "F5");
    }
}
