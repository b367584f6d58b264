use std::collections::HashSet;

use winit::{
    event::{ElementState, KeyEvent},
    keyboard::{KeyCode, ModifiersState, PhysicalKey},
};

#[derive(Debug, Default)]
pub struct Keys {
    held: HashSet<KeyCode>,
    just_pressed: HashSet<KeyCode>,
}

impl Keys {
    /// True only on the frame the key went down. A key held across many
    /// frames (including OS key repeat) reports this exactly once.
    pub fn just_pressed(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    fn key_down(&mut self, key: KeyCode) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    fn key_up(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }
}

#[derive(Debug, Default)]
pub struct Input {
    pub keys: Keys,
    modifiers: ModifiersState,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_modifiers(&mut self, modifiers: ModifiersState) {
        self.modifiers = modifiers;
    }

    pub fn modifiers(&self) -> ModifiersState {
        self.modifiers
    }

    /// Clears per-frame edge state. Call once at the end of every frame.
    pub fn update(&mut self) {
        self.keys.just_pressed.clear();
    }
}

pub fn handle_keyboard_input_event(input: &mut Input, event: KeyEvent) {
    let PhysicalKey::Code(code) = event.physical_key else {
        return;
    };

    match event.state {
        ElementState::Pressed => input.keys.key_down(code),
        ElementState::Released => input.keys.key_up(code),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_key_is_just_pressed_exactly_once() {
        let mut input = Input::new();

        // Frame 1: key goes down.
        input.keys.key_down(KeyCode::Equal);
        assert!(input.keys.just_pressed(KeyCode::Equal));
        input.update();

        // Frames 2..: still held, OS repeats keep delivering Pressed.
        for _ in 0..5 {
            input.keys.key_down(KeyCode::Equal);
            assert!(!input.keys.just_pressed(KeyCode::Equal));
            assert!(input.keys.held.contains(&KeyCode::Equal));
            input.update();
        }
    }

    #[test]
    fn release_rearms_the_edge() {
        let mut input = Input::new();

        input.keys.key_down(KeyCode::Equal);
        input.update();
        input.keys.key_up(KeyCode::Equal);
        input.update();

        input.keys.key_down(KeyCode::Equal);
        assert!(input.keys.just_pressed(KeyCode::Equal));
    }
}
