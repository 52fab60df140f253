//! Edit modes and what scroll and drag do in each of them.
//!
//! Dispatch goes through a static table: every [`EditMode`] owns a
//! [`ModeHandler`] with one function for a scroll tick and one for a pointer
//! drag. Handlers touching the camera rebuild the view matrix before they
//! return.

use std::f32::consts::PI;
use std::fmt;

use glam::Vec2;

use crate::scene::SceneState;

/// Scroll step of each mode, applied once per tick. Scroll down negates it.
pub mod step {
    /// Camera eye moves *towards* -Z on scroll up.
    pub const EYE_Z: f32 = -0.025;
    pub const CENTER_Z: f32 = 0.1;
    pub const UP_Z: f32 = 0.33;
    pub const TRANSLATE_Z: f32 = 0.1;
    /// Added to `scale.z`, not multiplied: repeated scroll down goes negative.
    pub const SCALE_Z: f32 = 1.025;
    pub const ROTATE_Z_DEGREES: f32 = 3.0;
    pub const LIGHT_DIFFUSE: f32 = 0.05;
    pub const SPOT_CUTOFF: f32 = 0.005;
    pub const SHININESS: f32 = 5.0;
}

/// Pixel-to-world factors for pointer drags.
pub mod drag {
    pub const CAMERA_POSITION: f32 = 0.0025;
    pub const CAMERA_CENTER: f32 = 0.0025;
    pub const CAMERA_UP: f32 = 0.1;
    pub const TRANSLATE: f32 = 0.0025;
    pub const SCALE: f32 = 0.025;
    /// Degrees of rotation per pixel.
    pub const ROTATE_DEGREES: f32 = 0.125;
    pub const LIGHT_POSITION: f32 = 0.0025;
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum EditMode {
    GeoTranslation,
    GeoRotation,
    GeoScaling,
    ViewCenter,
    ViewEye,
    ViewUp,
    #[default]
    LightEdit,
    Shine,
}

impl EditMode {
    pub const ALL: [EditMode; 8] = [
        EditMode::GeoTranslation,
        EditMode::GeoRotation,
        EditMode::GeoScaling,
        EditMode::ViewCenter,
        EditMode::ViewEye,
        EditMode::ViewUp,
        EditMode::LightEdit,
        EditMode::Shine,
    ];

    pub fn handler(self) -> &'static ModeHandler {
        &HANDLERS[self as usize]
    }
}

impl fmt::Display for EditMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EditMode::GeoTranslation => "geometry translation",
            EditMode::GeoRotation => "geometry rotation",
            EditMode::GeoScaling => "geometry scaling",
            EditMode::ViewCenter => "view center",
            EditMode::ViewEye => "view eye",
            EditMode::ViewUp => "view up",
            EditMode::LightEdit => "light edit",
            EditMode::Shine => "shininess",
        };
        f.write_str(name)
    }
}

/// `direction` is `+1.0` for a scroll-up tick and `-1.0` for scroll-down.
pub type ScrollFn = fn(&mut SceneState, direction: f32);
/// `delta` is the pointer movement in pixels, screen Y pointing down.
pub type DragFn = fn(&mut SceneState, delta: Vec2);

pub struct ModeHandler {
    pub scroll: ScrollFn,
    pub drag: DragFn,
}

// Indexed by `EditMode as usize`.
static HANDLERS: [ModeHandler; 8] = [
    ModeHandler {
        scroll: translate_scroll,
        drag: translate_drag,
    },
    ModeHandler {
        scroll: rotate_scroll,
        drag: rotate_drag,
    },
    ModeHandler {
        scroll: scale_scroll,
        drag: scale_drag,
    },
    ModeHandler {
        scroll: center_scroll,
        drag: center_drag,
    },
    ModeHandler {
        scroll: eye_scroll,
        drag: eye_drag,
    },
    ModeHandler {
        scroll: up_scroll,
        drag: up_drag,
    },
    ModeHandler {
        scroll: light_scroll,
        drag: light_drag,
    },
    ModeHandler {
        scroll: shine_scroll,
        drag: ignore_drag,
    },
];

fn translate_scroll(scene: &mut SceneState, dir: f32) {
    if let Some(m) = scene.current_model_mut() {
        m.position.z += dir * step::TRANSLATE_Z;
    }
}

fn translate_drag(scene: &mut SceneState, d: Vec2) {
    if let Some(m) = scene.current_model_mut() {
        m.position.x += d.x * drag::TRANSLATE;
        // Screen Y grows downwards, world Y upwards.
        m.position.y -= d.y * drag::TRANSLATE;
    }
}

fn rotate_scroll(scene: &mut SceneState, dir: f32) {
    if let Some(m) = scene.current_model_mut() {
        m.rotation.z += dir * (PI / 180.0) * step::ROTATE_Z_DEGREES;
    }
}

// Horizontal motion spins around Y, vertical motion around X.
fn rotate_drag(scene: &mut SceneState, d: Vec2) {
    if let Some(m) = scene.current_model_mut() {
        m.rotation.x += PI / 180.0 * d.y * drag::ROTATE_DEGREES;
        m.rotation.y += PI / 180.0 * d.x * drag::ROTATE_DEGREES;
    }
}

fn scale_scroll(scene: &mut SceneState, dir: f32) {
    if let Some(m) = scene.current_model_mut() {
        m.scale.z += dir * step::SCALE_Z;
    }
}

fn scale_drag(scene: &mut SceneState, d: Vec2) {
    if let Some(m) = scene.current_model_mut() {
        m.scale.x += d.x * drag::SCALE;
        m.scale.y += d.y * drag::SCALE;
    }
}

fn center_scroll(scene: &mut SceneState, dir: f32) {
    scene.camera.center.z += dir * step::CENTER_Z;
    scene.recompute_view();
    log::debug!("camera center = {}", scene.camera.center);
}

fn center_drag(scene: &mut SceneState, d: Vec2) {
    scene.camera.center.x += d.x * drag::CAMERA_CENTER;
    scene.camera.center.y += d.y * drag::CAMERA_CENTER;
    scene.recompute_view();
    log::debug!("camera center = {}", scene.camera.center);
}

fn eye_scroll(scene: &mut SceneState, dir: f32) {
    scene.camera.position.z += dir * step::EYE_Z;
    scene.recompute_view();
    log::debug!("camera position = {}", scene.camera.position);
}

fn eye_drag(scene: &mut SceneState, d: Vec2) {
    scene.camera.position.x += d.x * drag::CAMERA_POSITION;
    scene.camera.position.y += d.y * drag::CAMERA_POSITION;
    scene.recompute_view();
    log::debug!("camera position = {}", scene.camera.position);
}

fn up_scroll(scene: &mut SceneState, dir: f32) {
    scene.camera.up_vector.z += dir * step::UP_Z;
    scene.recompute_view();
    log::debug!("camera up vector = {}", scene.camera.up_vector);
}

fn up_drag(scene: &mut SceneState, d: Vec2) {
    scene.camera.up_vector.x += d.x * drag::CAMERA_UP;
    scene.camera.up_vector.y += d.y * drag::CAMERA_UP;
    scene.recompute_view();
    log::debug!("camera up vector = {}", scene.camera.up_vector);
}

// Slots 0 and 1 brighten/dim the diffuse colour, slot 2 widens/narrows the cone.
fn light_scroll(scene: &mut SceneState, dir: f32) {
    let light = &mut scene.lights[scene.light_slot.index()];
    match light.cutoff_mut() {
        Some(cutoff) => *cutoff += dir * step::SPOT_CUTOFF,
        None => light.color_mut().diffuse += dir * step::LIGHT_DIFFUSE,
    }
}

// Moves every light, whichever slot is selected.
fn light_drag(scene: &mut SceneState, d: Vec2) {
    for light in scene.lights.iter_mut() {
        let p = light.position_mut();
        p.x += d.x * drag::LIGHT_POSITION;
        p.y -= d.y * drag::LIGHT_POSITION;
    }
}

// Applies to every shape of every model, not just the selection.
fn shine_scroll(scene: &mut SceneState, dir: f32) {
    for shape in scene.models_mut().iter_mut().flat_map(|m| m.shapes.iter_mut()) {
        shape.material.shininess += dir * step::SHININESS;
    }
}

fn ignore_drag(_: &mut SceneState, _: Vec2) {}
