//=========================================================================
// Input Configuration
//=========================================================================
//
// Which input sources are active and which physical keys drive each
// logical key.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashMap;

//=== Internal Dependencies ===============================================

use super::event::KeyCode;
use super::input_state::InputKey;

//=== InputBindings =======================================================

/// Physical keys bound to each logical key.
///
/// A logical key is down while any of its bound keys is held, so arrows
/// and WASD work side by side with the default bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBindings {
    bindings: HashMap<InputKey, Vec<KeyCode>>,
}

impl InputBindings {
    /// Bindings with nothing bound.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Adds `code` as a trigger for `key`. Binding the same code twice is a no-op.
    pub fn bind(&mut self, key: InputKey, code: KeyCode) -> &mut Self {
        let codes = self.bindings.entry(key).or_default();
        if !codes.contains(&code) {
            codes.push(code);
        }
        self
    }

    /// Removes every binding for `key`.
    pub fn unbind_all(&mut self, key: InputKey) -> &mut Self {
        self.bindings.remove(&key);
        self
    }

    /// Keys bound to `key`, in binding order.
    pub fn codes(&self, key: InputKey) -> &[KeyCode] {
        self.bindings.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl Default for InputBindings {
    fn default() -> Self {
        let mut bindings = Self::empty();
        bindings
            .bind(InputKey::Left, KeyCode::ArrowLeft)
            .bind(InputKey::Left, KeyCode::KeyA)
            .bind(InputKey::Right, KeyCode::ArrowRight)
            .bind(InputKey::Right, KeyCode::KeyD)
            .bind(InputKey::Up, KeyCode::ArrowUp)
            .bind(InputKey::Up, KeyCode::KeyW)
            .bind(InputKey::Down, KeyCode::ArrowDown)
            .bind(InputKey::Down, KeyCode::KeyS)
            .bind(InputKey::Space, KeyCode::Space)
            .bind(InputKey::Shift, KeyCode::ShiftLeft)
            .bind(InputKey::Shift, KeyCode::ShiftRight);
        bindings
    }
}

//=== InputConfig =========================================================

/// Input sources the system listens to.
///
/// Default: keyboard and pointer enabled, gamepad disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    pub enable_keyboard: bool,
    pub enable_pointer: bool,
    pub enable_gamepad: bool,
    pub bindings: InputBindings,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            enable_keyboard: true,
            enable_pointer: true,
            enable_gamepad: false,
            bindings: InputBindings::default(),
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
