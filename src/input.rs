//! Input plumbing between winit and the interpreter.
//!
//! [`InputEvent::from_window_event`] strips a winit [`WindowEvent`] down to the
//! handful of things the viewer reacts to: key presses, wheel ticks, mouse
//! buttons and pointer motion. [`DragTracker`] turns the absolute pointer
//! positions into per-move deltas while the left or right button is held.

use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A window event reduced to what the viewer reacts to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A key went down. Repeats from holding the key are dropped.
    Key(KeyCode),
    /// Vertical wheel movement in lines, positive away from the user.
    Scroll(f32),
    /// A mouse button went down.
    ButtonPressed(MouseButton),
    /// A mouse button came back up.
    ButtonReleased(MouseButton),
    /// Pointer position in window pixels.
    PointerMoved(Vec2),
}

impl InputEvent {
    /// Converts a winit event, or returns `None` for events the viewer ignores.
    pub fn from_window_event(event: &WindowEvent) -> Option<Self> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return None;
                }
                match event.physical_key {
                    PhysicalKey::Code(key) => Some(InputEvent::Key(key)),
                    PhysicalKey::Unidentified(_) => None,
                }
            }
            WindowEvent::MouseInput { state, button, .. } => Some(match state {
                ElementState::Pressed => InputEvent::ButtonPressed(*button),
                ElementState::Released => InputEvent::ButtonReleased(*button),
            }),
            WindowEvent::CursorMoved { position, .. } => Some(InputEvent::PointerMoved(Vec2::new(
                position.x as f32,
                position.y as f32,
            ))),
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 120.0,
                };
                Some(InputEvent::Scroll(lines))
            }
            _ => None,
        }
    }
}

/// Turns absolute pointer samples into drag deltas.
///
/// A drag is active while the left or the right button is down; other buttons
/// are ignored. The last sample is updated on every move, held button or not,
/// so a drag never jumps by the distance travelled while the buttons were up.
#[derive(Clone, Copy, Debug, Default)]
pub struct DragTracker {
    last: Option<Vec2>,
    left: bool,
    right: bool,
}

impl DragTracker {
    fn held(&self) -> bool {
        self.left || self.right
    }

    /// Marks `button` as down. The next move is measured from the current sample.
    pub fn press(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.left = true,
            MouseButton::Right => self.right = true,
            _ => {}
        }
    }

    pub fn release(&mut self, button: MouseButton) {
        match button {
            MouseButton::Left => self.left = false,
            MouseButton::Right => self.right = false,
            _ => {}
        }
    }

    /// Records a sample and returns the delta to apply, if a drag is active.
    pub fn moved(&mut self, position: Vec2) -> Option<Vec2> {
        let delta = self.last.map(|last| position - last);
        self.last = Some(position);
        if self.held() { delta } else { None }
    }
}
