//! Applies user input to a [`SceneState`].
//!
//! Key presses go through the [`KeyMap`] and become [`Command`]s. Scroll ticks
//! and pointer drags are routed to the handler of the active [`EditMode`].

use crate::input::{DragTracker, InputEvent};
use crate::keymap::{Command, KeyMap};
use crate::mode::EditMode;
use crate::scene::SceneState;

/// What the event loop should do after an event was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing visible changed.
    Idle,
    /// The scene changed and the window should be redrawn.
    Redraw,
    Quit,
}

#[derive(Debug, Default)]
pub struct Interpreter {
    mode: EditMode,
    keymap: KeyMap,
    drag: DragTracker,
}

impl Interpreter {
    pub fn new(keymap: KeyMap) -> Self {
        Self {
            keymap,
            ..Default::default()
        }
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn handle(&mut self, event: InputEvent, scene: &mut SceneState) -> Outcome {
        match event {
            InputEvent::Key(key) => match self.keymap.lookup(key) {
                Some(command) => self.apply(command, scene),
                None => Outcome::Idle,
            },
            InputEvent::Scroll(lines) => self.scroll(lines, scene),
            InputEvent::ButtonPressed(button) => {
                self.drag.press(button);
                Outcome::Idle
            }
            InputEvent::ButtonReleased(button) => {
                self.drag.release(button);
                Outcome::Idle
            }
            InputEvent::PointerMoved(position) => match self.drag.moved(position) {
                Some(delta) => {
                    (self.mode.handler().drag)(scene, delta);
                    Outcome::Redraw
                }
                None => Outcome::Idle,
            },
        }
    }

    /// One handler call per scroll event; only the sign of `lines` matters.
    fn scroll(&mut self, lines: f32, scene: &mut SceneState) -> Outcome {
        if lines == 0.0 || lines.is_nan() {
            return Outcome::Idle;
        }
        (self.mode.handler().scroll)(scene, lines.signum());
        Outcome::Redraw
    }

    pub fn apply(&mut self, command: Command, scene: &mut SceneState) -> Outcome {
        match command {
            Command::SetMode(mode) => self.set_mode(mode),
            Command::CycleLight => {
                scene.light_slot = scene.light_slot.next();
                let slot = scene.light_slot.index();
                log::info!("light slot {slot} ({})", scene.lights[slot].kind_name());
            }
            Command::ToggleAmbient => {
                scene.toggles.ambient = !scene.toggles.ambient;
                log::info!("ambient {}", on_off(scene.toggles.ambient));
                self.set_mode(EditMode::LightEdit);
            }
            Command::ToggleDiffuse => {
                scene.toggles.diffuse = !scene.toggles.diffuse;
                log::info!("diffuse {}", on_off(scene.toggles.diffuse));
                self.set_mode(EditMode::LightEdit);
            }
            Command::ToggleSpecular => {
                scene.toggles.specular = !scene.toggles.specular;
                log::info!("specular {}", on_off(scene.toggles.specular));
                self.set_mode(EditMode::LightEdit);
            }
            Command::PreviousModel => {
                scene.select_previous();
                log_selection(scene);
            }
            Command::NextModel => {
                scene.select_next();
                log_selection(scene);
            }
            Command::SetProjection(mode) => {
                scene.set_projection_mode(mode);
                log::info!("projection {mode:?}");
            }
            Command::Report => {
                log::info!("\n{}", scene.report());
                return Outcome::Idle;
            }
            Command::Quit => return Outcome::Quit,
        }
        Outcome::Redraw
    }

    fn set_mode(&mut self, mode: EditMode) {
        if self.mode != mode {
            log::info!("mode: {mode}");
        }
        self.mode = mode;
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

fn log_selection(scene: &SceneState) {
    if let Some(model) = scene.current_model() {
        log::info!("model {} ({})", scene.current_index(), model.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3};
    use winit::event::MouseButton;
    use winit::keyboard::KeyCode;

    use crate::model::{Model, PhongMaterial, Shape};
    use crate::projection::ProjectionMode;

    fn scene() -> SceneState {
        let models = ["a", "b"]
            .into_iter()
            .map(|n| Model::new(n, vec![Shape::new(Vec::new(), PhongMaterial::default())]))
            .collect();
        SceneState::new(models)
    }

    #[test]
    fn starts_in_light_edit() {
        assert_eq!(Interpreter::default().mode(), EditMode::LightEdit);
    }

    #[test]
    fn toggles_force_light_edit() {
        let mut s = scene();
        let mut it = Interpreter::default();
        it.handle(InputEvent::Key(KeyCode::KeyT), &mut s);
        assert_eq!(it.mode(), EditMode::GeoTranslation);
        it.handle(InputEvent::Key(KeyCode::KeyF), &mut s);
        assert_eq!(it.mode(), EditMode::LightEdit);
        assert!(!s.toggles.specular);
    }

    #[test]
    fn unbound_key_is_idle() {
        let mut s = scene();
        let mut it = Interpreter::default();
        assert_eq!(it.handle(InputEvent::Key(KeyCode::KeyQ), &mut s), Outcome::Idle);
        assert_eq!(it.mode(), EditMode::LightEdit);
    }

    #[test]
    fn escape_quits() {
        let mut s = scene();
        let mut it = Interpreter::default();
        assert_eq!(it.handle(InputEvent::Key(KeyCode::Escape), &mut s), Outcome::Quit);
    }

    #[test]
    fn scroll_uses_sign_only() {
        let mut s = scene();
        let mut it = Interpreter::default();
        it.handle(InputEvent::Key(KeyCode::KeyT), &mut s);
        it.handle(InputEvent::Scroll(3.0), &mut s);
        it.handle(InputEvent::Scroll(0.0), &mut s);
        let z = s.current_model().map(|m| m.position.z).unwrap_or_default();
        assert!((z - 0.1).abs() < 1e-6);
    }

    #[test]
    fn drag_needs_held_button() {
        let mut s = scene();
        let mut it = Interpreter::default();
        it.handle(InputEvent::Key(KeyCode::KeyT), &mut s);
        it.handle(InputEvent::PointerMoved(Vec2::ZERO), &mut s);
        it.handle(InputEvent::PointerMoved(Vec2::new(40.0, 0.0)), &mut s);
        assert_eq!(s.current_model().map(|m| m.position), Some(Vec3::ZERO));

        it.handle(InputEvent::ButtonPressed(MouseButton::Left), &mut s);
        let out = it.handle(InputEvent::PointerMoved(Vec2::new(80.0, 40.0)), &mut s);
        assert_eq!(out, Outcome::Redraw);
        let p = s.current_model().map(|m| m.position).unwrap_or_default();
        assert!((p - Vec3::new(0.1, -0.1, 0.0)).length() < 1e-6);
    }

    #[test]
    fn projection_and_selection_keys() {
        let mut s = scene();
        let mut it = Interpreter::default();
        it.handle(InputEvent::Key(KeyCode::KeyO), &mut s);
        assert_eq!(s.projection_mode(), ProjectionMode::Orthographic);
        it.handle(InputEvent::Key(KeyCode::KeyZ), &mut s);
        assert_eq!(s.current_index(), 1);
        it.handle(InputEvent::Key(KeyCode::KeyX), &mut s);
        assert_eq!(s.current_index(), 0);
    }

    #[test]
    fn light_slot_cycles() {
        let mut s = scene();
        let mut it = Interpreter::default();
        for expected in [1, 2, 0] {
            it.handle(InputEvent::Key(KeyCode::KeyL), &mut s);
            assert_eq!(s.light_slot.index(), expected);
        }
    }
}
