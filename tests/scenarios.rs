//! End-to-end interaction scenarios driven through the public API.

use std::f32::consts::PI;

use shadelab::transform::{rotate_x, rotate_y, rotate_z, rotation, scaling, translation};
use shadelab::{
    Camera, EditMode, InputEvent, Interpreter, KeyCode, Mat4, Model, MouseButton, PhongMaterial,
    SceneState, Shape, Vec2, Vec3, Vec4,
};

const EPS: f32 = 1e-5;

fn five_models() -> SceneState {
    let models = ["bunny", "dragon", "lucy", "teapot", "dolphin"]
        .into_iter()
        .map(|name| {
            Model::new(
                name,
                vec![
                    Shape::new(Vec::new(), PhongMaterial::default()),
                    Shape::new(Vec::new(), PhongMaterial::default()),
                ],
            )
        })
        .collect();
    SceneState::new(models)
}

fn key(it: &mut Interpreter, scene: &mut SceneState, code: KeyCode) {
    it.handle(InputEvent::Key(code), scene);
}

fn drag(it: &mut Interpreter, scene: &mut SceneState, from: Vec2, to: Vec2) {
    it.handle(InputEvent::PointerMoved(from), scene);
    it.handle(InputEvent::ButtonPressed(MouseButton::Left), scene);
    it.handle(InputEvent::PointerMoved(to), scene);
    it.handle(InputEvent::ButtonReleased(MouseButton::Left), scene);
}

#[test]
fn translation_moves_origin_and_keeps_directions() {
    for v in [Vec3::new(1.0, -2.0, 3.5), Vec3::ZERO, Vec3::splat(-0.25)] {
        let t = translation(v);
        assert_eq!(t * Vec4::new(0.0, 0.0, 0.0, 1.0), v.extend(1.0));
        for axis in [Vec4::X, Vec4::Y, Vec4::Z] {
            assert_eq!(t * axis, axis);
        }
    }
}

#[test]
fn scaling_inverse_is_reciprocal_scaling() {
    let v = Vec3::new(2.0, -0.5, 4.0);
    let product = scaling(v) * scaling(Vec3::ONE / v);
    assert!(product.abs_diff_eq(Mat4::IDENTITY, EPS));
}

#[test]
fn euler_rotation_order_is_x_then_y_then_z() {
    assert_eq!(rotation(Vec3::ZERO), Mat4::IDENTITY);
    for e in [
        Vec3::new(0.3, -1.2, 2.0),
        Vec3::new(-7.0, 9.5, 0.01),
        Vec3::new(3.0 * PI, -2.5 * PI, 0.0),
    ] {
        assert_eq!(rotation(e), rotate_x(e.x) * rotate_y(e.y) * rotate_z(e.z));
    }
}

#[test]
fn view_rotation_block_is_orthonormal() {
    let cameras = [
        Camera::default(),
        Camera::new().at(1.0, 2.0, 3.0).looking_at(0.0, 0.5, 0.0).with_up(1.0, 4.0, 3.0),
        Camera::new().at(-2.0, 0.0, -1.0).looking_at(1.0, 1.0, 1.0).with_up(-2.0, 1.0, -1.0),
    ];
    for camera in cameras {
        let view = camera.view_matrix();
        let rows: Vec<Vec3> = (0..3).map(|i| view.row(i).truncate()).collect();
        for (i, a) in rows.iter().enumerate() {
            assert!((a.length() - 1.0).abs() < EPS);
            for b in &rows[i + 1..] {
                assert!(a.dot(*b).abs() < EPS);
            }
        }
    }
}

#[test]
fn selection_wraps_over_five_models() {
    let mut scene = five_models();
    let mut it = Interpreter::default();
    key(&mut it, &mut scene, KeyCode::KeyZ);
    assert_eq!(scene.current_index(), 4);
    key(&mut it, &mut scene, KeyCode::KeyX);
    assert_eq!(scene.current_index(), 0);
}

#[test]
fn light_slot_cycle_has_length_three() {
    let mut scene = five_models();
    let mut it = Interpreter::default();
    let mut seen = Vec::new();
    for _ in 0..4 {
        key(&mut it, &mut scene, KeyCode::KeyL);
        seen.push(scene.light_slot.index());
    }
    assert_eq!(seen, [1, 2, 0, 1]);
}

#[test]
fn translation_scroll_round_trips() {
    let mut scene = five_models();
    let mut it = Interpreter::default();
    key(&mut it, &mut scene, KeyCode::KeyT);
    assert_eq!(it.mode(), EditMode::GeoTranslation);

    let z0 = scene.current_model().map(|m| m.position.z).unwrap_or(f32::NAN);
    it.handle(InputEvent::Scroll(1.0), &mut scene);
    let z1 = scene.current_model().map(|m| m.position.z).unwrap_or(f32::NAN);
    assert!((z1 - z0 - 0.1).abs() < EPS);
    it.handle(InputEvent::Scroll(-1.0), &mut scene);
    let z2 = scene.current_model().map(|m| m.position.z).unwrap_or(f32::NAN);
    assert!((z2 - z0).abs() < EPS);
}

#[test]
fn shine_scroll_reaches_every_shape_of_every_model() {
    let mut scene = five_models();
    let mut it = Interpreter::default();
    key(&mut it, &mut scene, KeyCode::KeyJ);
    it.handle(InputEvent::Scroll(1.0), &mut scene);

    assert_eq!(scene.model_count(), 5);
    for model in scene.models() {
        for shape in &model.shapes {
            assert_eq!(shape.material.shininess, 69.0);
        }
    }
}

#[test]
fn rotation_drag_swaps_axes() {
    let mut scene = five_models();
    let mut it = Interpreter::default();
    key(&mut it, &mut scene, KeyCode::KeyR);
    drag(&mut it, &mut scene, Vec2::new(100.0, 100.0), Vec2::new(110.0, 96.0));

    let rot = scene.current_model().map(|m| m.rotation).unwrap_or(Vec3::NAN);
    assert!((rot.x - PI / 180.0 * -4.0 * 0.125).abs() < EPS);
    assert!((rot.y - PI / 180.0 * 10.0 * 0.125).abs() < EPS);
    assert_eq!(rot.z, 0.0);
}

#[test]
fn diffuse_toggle_masks_uniforms_only() {
    let mut scene = five_models();
    let mut it = Interpreter::default();
    key(&mut it, &mut scene, KeyCode::KeyT);
    let stored: Vec<Vec3> = scene.lights.iter().map(|l| l.color().diffuse).collect();

    key(&mut it, &mut scene, KeyCode::KeyD);
    assert_eq!(it.mode(), EditMode::LightEdit);
    for u in scene.render_frame().lights {
        assert_eq!(u.diffuse, [0.0; 3]);
    }
    let still: Vec<Vec3> = scene.lights.iter().map(|l| l.color().diffuse).collect();
    assert_eq!(still, stored);

    key(&mut it, &mut scene, KeyCode::KeyD);
    for (u, d) in scene.render_frame().lights.iter().zip(&stored) {
        assert_eq!(u.diffuse, d.to_array());
    }
}

#[test]
fn eye_edit_updates_rendered_view() {
    let mut scene = five_models();
    let mut it = Interpreter::default();
    key(&mut it, &mut scene, KeyCode::KeyE);
    it.handle(InputEvent::Scroll(-1.0), &mut scene);
    drag(&mut it, &mut scene, Vec2::ZERO, Vec2::new(40.0, 0.0));

    assert!((scene.camera.position - Vec3::new(0.1, 0.0, 2.025)).length() < EPS);
    let frame = scene.render_frame();
    assert_eq!(Mat4::from_cols_array_2d(&frame.view), scene.camera.view_matrix());
}
