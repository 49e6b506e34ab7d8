use raylib::prelude::*;

use crate::constants::{RENDER_HEIGHT, RENDER_WIDTH};

/// Keys the decks respond to.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Key {
    ArrowLeft,
    ArrowUp,
    ArrowRight,
    ArrowDown,
    Space,
    Home,
    End,
}

impl Key {
    fn from_raylib(key: KeyboardKey) -> Option<Self> {
        match key {
            KeyboardKey::KEY_LEFT => Some(Key::ArrowLeft),
            KeyboardKey::KEY_UP => Some(Key::ArrowUp),
            KeyboardKey::KEY_RIGHT => Some(Key::ArrowRight),
            KeyboardKey::KEY_DOWN => Some(Key::ArrowDown),
            KeyboardKey::KEY_SPACE => Some(Key::Space),
            KeyboardKey::KEY_HOME => Some(Key::Home),
            KeyboardKey::KEY_END => Some(Key::End),
            _ => None,
        }
    }
}

/// Primary pointer transitions, in render-texture coordinates.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Pointer {
    Pressed(Vector2),
    Released(Vector2),
}

/// Everything the user did since the previous frame.
#[derive(Debug, Default)]
pub struct InputFrame {
    pub keys: Vec<Key>,
    pub pointer: Vec<Pointer>,
}

/// Drains this frame's key presses and mouse button transitions.
/// Mouse positions are mapped from window space to render space.
pub fn poll(rl: &mut RaylibHandle) -> InputFrame {
    let mut frame = InputFrame::default();
    while let Some(key) = rl.get_key_pressed() {
        if let Some(key) = Key::from_raylib(key) {
            frame.keys.push(key);
        }
    }

    let scale = Vector2::new(
        RENDER_WIDTH as f32 / rl.get_screen_width().max(1) as f32,
        RENDER_HEIGHT as f32 / rl.get_screen_height().max(1) as f32,
    );
    let mouse = rl.get_mouse_position();
    let position = Vector2::new(mouse.x * scale.x, mouse.y * scale.y);
    if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
        frame.pointer.push(Pointer::Pressed(position));
    }
    if rl.is_mouse_button_released(MouseButton::MOUSE_BUTTON_LEFT) {
        frame.pointer.push(Pointer::Released(position));
    }
    frame
}

