//=========================================================================
// Input State
//=========================================================================
//
// Logical view of player input: the handful of named keys gameplay code
// asks about, plus the pointer.
//
//=========================================================================

//=== External Dependencies ===============================================

use strum::{Display, EnumIter, IntoStaticStr};

//=== InputKey ============================================================

/// Logical input tracked by the input system.
///
/// Declaration order is the order `keyChanged` events are emitted in
/// within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "camelCase")]
pub enum InputKey {
    Left,
    Right,
    Up,
    Down,
    Space,
    Shift,
    PointerDown,
}

impl InputKey {
    /// Name carried in `keyChanged` payloads (e.g. `"pointerDown"`).
    pub fn name(self) -> &'static str {
        self.into()
    }
}

//=== KeyChange ===========================================================

/// Payload of `keyChanged`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyChange {
    pub key: InputKey,
    pub is_down: bool,
    pub is_up: bool,
}

impl KeyChange {
    pub fn new(key: InputKey, is_down: bool) -> Self {
        Self {
            key,
            is_down,
            is_up: !is_down,
        }
    }
}

//=== InputState ==========================================================

/// Snapshot of every logical key and the pointer.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub space: bool,
    pub shift: bool,
    pub mouse_x: f32,
    pub mouse_y: f32,
    pub pointer_down: bool,
}

impl InputState {
    pub fn get(&self, key: InputKey) -> bool {
        match key {
            InputKey::Left => self.left,
            InputKey::Right => self.right,
            InputKey::Up => self.up,
            InputKey::Down => self.down,
            InputKey::Space => self.space,
            InputKey::Shift => self.shift,
            InputKey::PointerDown => self.pointer_down,
        }
    }

    pub(super) fn set(&mut self, key: InputKey, value: bool) {
        match key {
            InputKey::Left => self.left = value,
            InputKey::Right => self.right = value,
            InputKey::Up => self.up = value,
            InputKey::Down => self.down = value,
            InputKey::Space => self.space = value,
            InputKey::Shift => self.shift = value,
            InputKey::PointerDown => self.pointer_down = value,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
