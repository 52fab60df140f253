//! Key bindings.
//!
//! Keys are matched by physical position ([`KeyCode`]), so the bindings stay
//! put on non-QWERTY layouts. Each bound key maps to one [`Command`].

use std::collections::HashMap;

use winit::keyboard::KeyCode;

use crate::mode::EditMode;
use crate::projection::ProjectionMode;

/// Discrete actions a key press can trigger.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    SetMode(EditMode),
    CycleLight,
    ToggleAmbient,
    ToggleDiffuse,
    ToggleSpecular,
    PreviousModel,
    NextModel,
    SetProjection(ProjectionMode),
    Report,
    Quit,
}

/// Key bindings, looked up by physical key code.
#[derive(Clone, Debug)]
pub struct KeyMap {
    bindings: HashMap<KeyCode, Command>,
}

impl Default for KeyMap {
    fn default() -> Self {
        use Command::*;
        use KeyCode::*;

        let bindings = [
            (KeyT, SetMode(EditMode::GeoTranslation)),
            (KeyR, SetMode(EditMode::GeoRotation)),
            (KeyS, SetMode(EditMode::GeoScaling)),
            (KeyE, SetMode(EditMode::ViewEye)),
            (KeyC, SetMode(EditMode::ViewCenter)),
            (KeyU, SetMode(EditMode::ViewUp)),
            (KeyK, SetMode(EditMode::LightEdit)),
            (KeyJ, SetMode(EditMode::Shine)),
            (KeyL, CycleLight),
            (KeyA, ToggleAmbient),
            (KeyD, ToggleDiffuse),
            (KeyF, ToggleSpecular),
            (KeyZ, PreviousModel),
            (KeyX, NextModel),
            (KeyO, SetProjection(ProjectionMode::Orthographic)),
            (KeyP, SetProjection(ProjectionMode::Perspective)),
            (KeyI, Report),
            (Escape, Quit),
        ];

        Self {
            bindings: bindings.into_iter().collect(),
        }
    }
}

impl KeyMap {
    pub fn lookup(&self, key: KeyCode) -> Option<Command> {
        self.bindings.get(&key).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_a_key() {
        let map = KeyMap::default();
        for mode in EditMode::ALL {
            assert!(
                map.bindings.values().any(|c| *c == Command::SetMode(mode)),
                "{mode} unbound"
            );
        }
    }

    #[test]
    fn specular_does_not_collide_with_scaling() {
        let map = KeyMap::default();
        assert_eq!(map.lookup(KeyCode::KeyS), Some(Command::SetMode(EditMode::GeoScaling)));
        assert_eq!(map.lookup(KeyCode::KeyF), Some(Command::ToggleSpecular));
    }

    #[test]
    fn unbound_keys_have_no_command() {
        let map = KeyMap::default();
        assert_eq!(map.lookup(KeyCode::KeyQ), None);
        assert_eq!(map.lookup(KeyCode::Escape), Some(Command::Quit));
    }
}
