//! Keyboard keys and modifier combinations.
//!
//! A key binding is written as zero or more modifiers followed by a key name, joined with `+`,
//! for example `F1`, `SHIFT+A` or `CTRL+ALT+KP_ENTER`. Parsing is strict: names are upper
//! case, each modifier appears at most once and modifiers appear in the canonical order
//! `SHIFT`, `CTRL`, `ALT`, `SUPER`. Every string accepted by [`KeyWithModifier::parse`] is
//! therefore reproduced exactly by its `Display` implementation.

use std::fmt;
use std::str::FromStr;

/// Errors that can occur when parsing a key binding string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeyError {
    /// The input was empty or had an empty `+`-separated component
    #[error("key binding '{0}' has an empty component")]
    Empty(String),

    /// The final component is not a known key name
    #[error("unknown key '{key}' in key binding '{input}'")]
    UnknownKey { input: String, key: String },

    /// A leading component is not a known modifier name
    #[error("unknown modifier '{modifier}' in key binding '{input}'")]
    UnknownModifier { input: String, modifier: String },

    /// A modifier was repeated or appeared out of canonical order
    #[error("modifiers in key binding '{0}' must be unique and ordered SHIFT, CTRL, ALT, SUPER")]
    ModifierOrder(String),
}

macro_rules! define_keys {
    ($($variant:ident => $name:literal),+ $(,)?) => {
        /// A single keyboard key.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Key {
            $($variant),+
        }

        impl Key {
            /// Every key, in declaration order.
            pub const ALL: &'static [Key] = &[$(Key::$variant),+];

            /// The canonical name of this key.
            pub fn name(self) -> &'static str {
                match self {
                    $(Key::$variant => $name),+
                }
            }
        }
    };
}

define_keys! {
    Space => "SPACE",
    Apostrophe => "APOSTROPHE",
    Comma => "COMMA",
    Minus => "MINUS",
    Period => "PERIOD",
    Slash => "SLASH",
    Num0 => "0",
    Num1 => "1",
    Num2 => "2",
    Num3 => "3",
    Num4 => "4",
    Num5 => "5",
    Num6 => "6",
    Num7 => "7",
    Num8 => "8",
    Num9 => "9",
    Semicolon => "SEMICOLON",
    Equal => "EQUAL",
    A => "A",
    B => "B",
    C => "C",
    D => "D",
    E => "E",
    F => "F",
    G => "G",
    H => "H",
    I => "I",
    J => "J",
    K => "K",
    L => "L",
    M => "M",
    N => "N",
    O => "O",
    P => "P",
    Q => "Q",
    R => "R",
    S => "S",
    T => "T",
    U => "U",
    V => "V",
    W => "W",
    X => "X",
    Y => "Y",
    Z => "Z",
    LeftBracket => "LEFTBRACKET",
    Backslash => "BACKSLASH",
    RightBracket => "RIGHTBRACKET",
    GraveAccent => "GRAVEACCENT",
    World1 => "WORLD1",
    World2 => "WORLD2",
    Escape => "ESC",
    Enter => "ENTER",
    Tab => "TAB",
    Backspace => "BACKSPACE",
    Insert => "INSERT",
    Delete => "DELETE",
    Right => "RIGHT",
    Left => "LEFT",
    Down => "DOWN",
    Up => "UP",
    PageUp => "PAGEUP",
    PageDown => "PAGEDOWN",
    Home => "HOME",
    End => "END",
    CapsLock => "CAPSLOCK",
    ScrollLock => "SCROLLLOCK",
    NumLock => "NUMLOCK",
    PrintScreen => "PRINTSCREEN",
    Pause => "PAUSE",
    F1 => "F1",
    F2 => "F2",
    F3 => "F3",
    F4 => "F4",
    F5 => "F5",
    F6 => "F6",
    F7 => "F7",
    F8 => "F8",
    F9 => "F9",
    F10 => "F10",
    F11 => "F11",
    F12 => "F12",
    F13 => "F13",
    F14 => "F14",
    F15 => "F15",
    F16 => "F16",
    F17 => "F17",
    F18 => "F18",
    F19 => "F19",
    F20 => "F20",
    F21 => "F21",
    F22 => "F22",
    F23 => "F23",
    F24 => "F24",
    F25 => "F25",
    Keypad0 => "KP_0",
    Keypad1 => "KP_1",
    Keypad2 => "KP_2",
    Keypad3 => "KP_3",
    Keypad4 => "KP_4",
    Keypad5 => "KP_5",
    Keypad6 => "KP_6",
    Keypad7 => "KP_7",
    Keypad8 => "KP_8",
    Keypad9 => "KP_9",
    KeypadDecimal => "KP_DECIMAL",
    KeypadDivide => "KP_DIVIDE",
    KeypadMultiply => "KP_MULTIPLY",
    KeypadSubtract => "KP_SUBTRACT",
    KeypadAdd => "KP_ADD",
    KeypadEnter => "KP_ENTER",
    KeypadEqual => "KP_EQUAL",
    LeftShift => "LEFTSHIFT",
    LeftControl => "LEFTCONTROL",
    LeftAlt => "LEFTALT",
    LeftSuper => "LEFTSUPER",
    RightShift => "RIGHTSHIFT",
    RightControl => "RIGHTCONTROL",
    RightAlt => "RIGHTALT",
    RightSuper => "RIGHTSUPER",
    Menu => "MENU",
}

impl FromStr for Key {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::ALL.iter().copied().find(|k| k.name() == s).ok_or(())
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The set of modifier keys held together with a [`Key`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct KeyModifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl KeyModifiers {
    /// No modifier held.
    pub const NONE: KeyModifiers = KeyModifiers {
        shift: false,
        control: false,
        alt: false,
        super_key: false,
    };

    // Canonical order for both parsing and printing.
    const NAMES: [&'static str; 4] = ["SHIFT", "CTRL", "ALT", "SUPER"];

    pub fn is_empty(&self) -> bool {
        *self == Self::NONE
    }

    fn flags(&self) -> [bool; 4] {
        [self.shift, self.control, self.alt, self.super_key]
    }

    fn set(&mut self, index: usize) {
        match index {
            0 => self.shift = true,
            1 => self.control = true,
            2 => self.alt = true,
            _ => self.super_key = true,
        }
    }
}

/// A key together with the modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyWithModifier {
    pub key: Key,
    pub modifiers: KeyModifiers,
}

impl KeyWithModifier {
    /// Parses a key binding string such as `CTRL+ALT+F5`.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] if any component is empty or unknown, or if the modifiers are
    /// repeated or not in canonical order.
    pub fn parse(input: &str) -> Result<Self, KeyError> {
        let mut parts: Vec<&str> = input.split('+').collect();
        if parts.iter().any(|p| p.is_empty()) {
            return Err(KeyError::Empty(input.to_owned()));
        }

        // `split` always yields at least one element.
        let key_name = parts.pop().unwrap_or_default();
        let key = key_name.parse::<Key>().map_err(|_| KeyError::UnknownKey {
            input: input.to_owned(),
            key: key_name.to_owned(),
        })?;

        let mut modifiers = KeyModifiers::NONE;
        let mut last_index: Option<usize> = None;
        for part in parts {
            let index = KeyModifiers::NAMES
                .iter()
                .position(|name| *name == part)
                .ok_or_else(|| KeyError::UnknownModifier {
                    input: input.to_owned(),
                    modifier: part.to_owned(),
                })?;
            if last_index.is_some_and(|last| index <= last) {
                return Err(KeyError::ModifierOrder(input.to_owned()));
            }
            modifiers.set(index);
            last_index = Some(index);
        }

        Ok(Self { key, modifiers })
    }
}

impl FromStr for KeyWithModifier {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for KeyWithModifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, held) in KeyModifiers::NAMES.iter().zip(self.modifiers.flags()) {
            if held {
                write!(f, "{name}+")?;
            }
        }
        f.write_str(self.key.name())
    }
}

impl serde::Serialize for KeyWithModifier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for KeyWithModifier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        KeyWithModifier::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_key() {
        let key = KeyWithModifier::parse("F1").expect("F1 should parse");
        assert_eq!(key.key, Key::F1);
        assert!(key.modifiers.is_empty());
    }

    #[test]
    fn parses_modifiers_in_canonical_order() {
        let key = KeyWithModifier::parse("SHIFT+CTRL+ALT+SUPER+KP_ENTER").expect("should parse");
        assert_eq!(key.key, Key::KeypadEnter);
        assert!(key.modifiers.shift);
        assert!(key.modifiers.control);
        assert!(key.modifiers.alt);
        assert!(key.modifiers.super_key);
    }

    #[test]
    fn accepted_strings_print_back_unchanged() {
        for input in ["A", "SHIFT+A", "CTRL+ESC", "ALT+SUPER+9", "SHIFT+ALT+F25", "KP_ADD"] {
            let key = KeyWithModifier::parse(input).expect("should parse");
            assert_eq!(key.to_string(), input);
        }
    }

    #[test]
    fn every_key_name_is_distinct_and_parses() {
        for key in Key::ALL {
            assert_eq!(key.name().parse::<Key>(), Ok(*key));
        }
    }

    #[test]
    fn rejects_unknown_key() {
        let err = KeyWithModifier::parse("SHIFT+F99").expect_err("should reject F99");
        assert!(matches!(err, KeyError::UnknownKey { key, .. } if key == "F99"));
    }

    #[test]
    fn rejects_lowercase_names() {
        assert!(matches!(
            KeyWithModifier::parse("a"),
            Err(KeyError::UnknownKey { .. })
        ));
        assert!(matches!(
            KeyWithModifier::parse("shift+A"),
            Err(KeyError::UnknownModifier { .. })
        ));
    }

    #[test]
    fn rejects_out_of_order_or_repeated_modifiers() {
        assert!(matches!(
            KeyWithModifier::parse("CTRL+SHIFT+A"),
            Err(KeyError::ModifierOrder(_))
        ));
        assert!(matches!(
            KeyWithModifier::parse("ALT+ALT+A"),
            Err(KeyError::ModifierOrder(_))
        ));
    }

    #[test]
    fn rejects_empty_components() {
        assert!(matches!(KeyWithModifier::parse(""), Err(KeyError::Empty(_))));
        assert!(matches!(
            KeyWithModifier::parse("SHIFT+"),
            Err(KeyError::Empty(_))
        ));
    }

    #[test]
    fn serde_uses_the_text_form() {
        let key = KeyWithModifier::parse("CTRL+S").expect("should parse");
        let json = serde_json::to_string(&key).expect("serialize");
        assert_eq!(json, "\"CTRL+S\"");
        let back: KeyWithModifier = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, key);
    }
}
