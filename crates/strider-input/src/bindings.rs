//! Logical action bindings: maps key codes to the actions the controller
//! understands, with RON persistence so players can rebind keys.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;
use winit::keyboard::KeyCode;

use crate::keyboard::KeyboardState;

/// Serialize [`KeyCode`] as its debug string (e.g., `"KeyW"`).
mod keycode_serde {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use winit::keyboard::KeyCode;

    pub fn serialize<S: Serializer>(code: &KeyCode, s: S) -> Result<S::Ok, S::Error> {
        format!("{code:?}").serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<KeyCode, D::Error> {
        let name = String::deserialize(d)?;
        string_to_keycode(&name)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown key: {name}")))
    }

    fn string_to_keycode(s: &str) -> Option<KeyCode> {
        // Match the Debug output of KeyCode variants
        Some(match s {
            "KeyA" => KeyCode::KeyA,
            "KeyB" => KeyCode::KeyB,
            "KeyC" => KeyCode::KeyC,
            "KeyD" => KeyCode::KeyD,
            "KeyE" => KeyCode::KeyE,
            "KeyF" => KeyCode::KeyF,
            "KeyG" => KeyCode::KeyG,
            "KeyH" => KeyCode::KeyH,
            "KeyI" => KeyCode::KeyI,
            "KeyJ" => KeyCode::KeyJ,
            "KeyK" => KeyCode::KeyK,
            "KeyL" => KeyCode::KeyL,
            "KeyM" => KeyCode::KeyM,
            "KeyN" => KeyCode::KeyN,
            "KeyO" => KeyCode::KeyO,
            "KeyP" => KeyCode::KeyP,
            "KeyQ" => KeyCode::KeyQ,
            "KeyR" => KeyCode::KeyR,
            "KeyS" => KeyCode::KeyS,
            "KeyT" => KeyCode::KeyT,
            "KeyU" => KeyCode::KeyU,
            "KeyV" => KeyCode::KeyV,
            "KeyW" => KeyCode::KeyW,
            "KeyX" => KeyCode::KeyX,
            "KeyY" => KeyCode::KeyY,
            "KeyZ" => KeyCode::KeyZ,
            "Digit0" => KeyCode::Digit0,
            "Digit1" => KeyCode::Digit1,
            "Digit2" => KeyCode::Digit2,
            "Digit3" => KeyCode::Digit3,
            "Digit4" => KeyCode::Digit4,
            "Digit5" => KeyCode::Digit5,
            "Digit6" => KeyCode::Digit6,
            "Digit7" => KeyCode::Digit7,
            "Digit8" => KeyCode::Digit8,
            "Digit9" => KeyCode::Digit9,
            "Space" => KeyCode::Space,
            "Escape" => KeyCode::Escape,
            "Tab" => KeyCode::Tab,
            "Enter" => KeyCode::Enter,
            "ShiftLeft" => KeyCode::ShiftLeft,
            "ShiftRight" => KeyCode::ShiftRight,
            "ControlLeft" => KeyCode::ControlLeft,
            "ControlRight" => KeyCode::ControlRight,
            "AltLeft" => KeyCode::AltLeft,
            "AltRight" => KeyCode::AltRight,
            "ArrowUp" => KeyCode::ArrowUp,
            "ArrowDown" => KeyCode::ArrowDown,
            "ArrowLeft" => KeyCode::ArrowLeft,
            "ArrowRight" => KeyCode::ArrowRight,
            _ => return None,
        })
    }
}

/// Logical actions the character controller understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Walk along local -Z.
    MoveForward,
    /// Walk along local +Z.
    MoveBack,
    /// Strafe along local -X.
    MoveLeft,
    /// Strafe along local +X.
    MoveRight,
    /// Jump when grounded.
    Jump,
    /// Toggle the pause state (handled by the host).
    Pause,
    /// Toggle mouse-look capture (handled by the host).
    ToggleLook,
}

/// Maps each [`Action`] to a physical key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Bindings {
    #[serde(with = "keycode_serde")]
    pub forward: KeyCode,
    #[serde(with = "keycode_serde")]
    pub back: KeyCode,
    #[serde(with = "keycode_serde")]
    pub left: KeyCode,
    #[serde(with = "keycode_serde")]
    pub right: KeyCode,
    #[serde(with = "keycode_serde")]
    pub jump: KeyCode,
    #[serde(with = "keycode_serde")]
    pub pause: KeyCode,
    #[serde(with = "keycode_serde")]
    pub toggle_look: KeyCode,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            pause: KeyCode::Escape,
            toggle_look: KeyCode::Tab,
        }
    }
}

impl Bindings {
    /// Returns the key code bound to the given action.
    #[must_use]
    pub fn key_for(&self, action: Action) -> KeyCode {
        match action {
            Action::MoveForward => self.forward,
            Action::MoveBack => self.back,
            Action::MoveLeft => self.left,
            Action::MoveRight => self.right,
            Action::Jump => self.jump,
            Action::Pause => self.pause,
            Action::ToggleLook => self.toggle_look,
        }
    }

    /// Returns `true` while the key bound to `action` is held.
    #[must_use]
    pub fn is_active(&self, action: Action, keyboard: &KeyboardState) -> bool {
        keyboard.is_pressed(self.key_for(action))
    }

    /// Returns `true` only during the tick the bound key was pressed.
    #[must_use]
    pub fn just_activated(&self, action: Action, keyboard: &KeyboardState) -> bool {
        keyboard.just_pressed(self.key_for(action))
    }

    /// Serialize to a pretty RON string.
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_ron(&self) -> Result<String, ron::Error> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
    }

    /// Deserialize from RON string.
    ///
    /// # Errors
    /// Returns an error if the RON string is malformed.
    pub fn from_ron(s: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(s)
    }

    /// Save bindings to the given path as RON.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Load bindings from the given path.
    ///
    /// Falls back to [`Bindings::default`] if the file is missing or
    /// malformed, logging a warning for malformed files.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match Self::from_ron(&contents) {
                Ok(bindings) => bindings,
                Err(e) => {
                    warn!(
                        "Malformed bindings file {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }

    /// Returns the platform config path for `bindings.ron`.
    #[must_use]
    pub fn default_config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|d| d.join("strider").join("bindings.ron"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::event::ElementState;

    use crate::keyboard::RawKeyEvent;

    fn pressed(code: KeyCode) -> RawKeyEvent {
        RawKeyEvent {
            code,
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    #[test]
    fn test_default_bindings_are_wasd_space() {
        let b = Bindings::default();
        assert_eq!(b.key_for(Action::MoveForward), KeyCode::KeyW);
        assert_eq!(b.key_for(Action::MoveBack), KeyCode::KeyS);
        assert_eq!(b.key_for(Action::MoveLeft), KeyCode::KeyA);
        assert_eq!(b.key_for(Action::MoveRight), KeyCode::KeyD);
        assert_eq!(b.key_for(Action::Jump), KeyCode::Space);
    }

    #[test]
    fn test_is_active_reads_keyboard() {
        let b = Bindings::default();
        let mut kb = KeyboardState::new();
        assert!(!b.is_active(Action::MoveForward, &kb));
        kb.process_raw(pressed(KeyCode::KeyW));
        assert!(b.is_active(Action::MoveForward, &kb));
        assert!(!b.is_active(Action::MoveBack, &kb));
    }

    #[test]
    fn test_just_activated_is_transient() {
        let b = Bindings::default();
        let mut kb = KeyboardState::new();
        kb.process_raw(pressed(KeyCode::Escape));
        assert!(b.just_activated(Action::Pause, &kb));
        kb.clear_transients();
        assert!(!b.just_activated(Action::Pause, &kb));
        assert!(b.is_active(Action::Pause, &kb));
    }

    #[test]
    fn test_ron_roundtrip() {
        let mut b = Bindings::default();
        b.jump = KeyCode::KeyJ;
        let ron_str = b.to_ron().unwrap();
        assert!(ron_str.contains("\"KeyJ\""));
        let parsed = Bindings::from_ron(&ron_str).unwrap();
        assert_eq!(parsed, b);
    }

    #[test]
    fn test_missing_field_uses_default_binding() {
        let parsed = Bindings::from_ron("(forward: \"ArrowUp\")").unwrap();
        assert_eq!(parsed.forward, KeyCode::ArrowUp);
        assert_eq!(parsed.jump, KeyCode::Space);
    }

    #[test]
    fn test_unknown_key_name_is_an_error() {
        let result = Bindings::from_ron("(jump: \"NotAKey\")");
        assert!(result.is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let loaded = Bindings::load(Path::new("/nonexistent/strider/bindings.ron"));
        assert_eq!(loaded, Bindings::default());
    }
}
