//=========================================================================
// Input System
//
// Translates the engine's raw input into the logical input state used by
// gameplay code and republishes every change on the EventBus.
//
// Responsibilities:
// - Track which physical keys are held
// - Resolve logical keys (left, right, up, ...) through InputBindings once
//   per frame and emit `keyChanged` for each one that flipped
// - Forward pointer and gamepad transitions as they arrive
// - Answer pressed / just-pressed / just-released queries
//
// Frame lifecycle: handle()* → update() → query
//
//=========================================================================

//=== Submodules ==========================================================

mod config;
pub mod event;
mod input_state;

//=== External Dependencies ===============================================

use std::collections::HashSet;
use std::rc::Rc;

use log::{debug, trace};
use strum::IntoEnumIterator;

//=== Internal Imports ====================================================

use crate::core::event_bus::{EventBus, GameEvent, GamepadButton, PointerPosition};

pub use config::{InputBindings, InputConfig};
pub use event::{KeyCode, RawInputEvent};
pub use input_state::{InputKey, InputState, KeyChange};

//=== InputSystem =========================================================

/// Logical input tracker for one scene.
pub struct InputSystem {
    bus: Rc<EventBus>,
    config: InputConfig,
    keys_down: HashSet<KeyCode>,
    /// Live state; pointer fields change as events arrive.
    state: InputState,
    /// State as of the end of the last update().
    published: InputState,
    /// State as of the end of the update() before that.
    previous: InputState,
    enabled: bool,
}

impl InputSystem {
    //--- Construction -----------------------------------------------------

    pub fn new(bus: Rc<EventBus>, config: InputConfig) -> Self {
        debug!(
            "Input system created (keyboard: {}, pointer: {}, gamepad: {})",
            config.enable_keyboard, config.enable_pointer, config.enable_gamepad
        );
        Self {
            bus,
            config,
            keys_down: HashSet::new(),
            state: InputState::default(),
            published: InputState::default(),
            previous: InputState::default(),
            enabled: true,
        }
    }

    //--- handle() ---------------------------------------------------------
    //
    // Consumes one raw event. Key events only update the held set; they
    // become visible at the next update(). Pointer and gamepad events are
    // published immediately, matching the engine's callback timing.
    //
    pub fn handle(&mut self, event: RawInputEvent) {
        match event {
            RawInputEvent::KeyDown(code) if self.config.enable_keyboard => {
                self.keys_down.insert(code);
            }
            RawInputEvent::KeyUp(code) if self.config.enable_keyboard => {
                self.keys_down.remove(&code);
            }

            RawInputEvent::PointerDown { x, y } if self.config.enable_pointer => {
                self.move_pointer(x, y);
                self.state.pointer_down = true;
                self.bus.emit(GameEvent::PointerDown(PointerPosition { x, y }));
            }
            RawInputEvent::PointerUp { x, y } if self.config.enable_pointer => {
                self.move_pointer(x, y);
                self.state.pointer_down = false;
                self.bus.emit(GameEvent::PointerUp(PointerPosition { x, y }));
            }
            RawInputEvent::PointerMoved { x, y } if self.config.enable_pointer => {
                self.move_pointer(x, y);
                self.bus.emit(GameEvent::PointerMove(PointerPosition { x, y }));
            }

            RawInputEvent::GamepadDown { pad, button } if self.config.enable_gamepad => {
                self.bus.emit(GameEvent::GamepadDown(GamepadButton { pad, button }));
            }
            RawInputEvent::GamepadUp { pad, button } if self.config.enable_gamepad => {
                self.bus.emit(GameEvent::GamepadUp(GamepadButton { pad, button }));
            }

            ignored => trace!("Input source disabled, ignoring {:?}", ignored),
        }
    }

    //--- update() ---------------------------------------------------------
    //
    // Resolves logical keys for this frame and emits `keyChanged` for each
    // key that differs from the previous frame, in InputKey order.
    //
    pub fn update(&mut self) {
        if !self.enabled {
            return;
        }

        let before = self.published;
        if self.config.enable_keyboard {
            self.resolve_keys();
        }

        for key in InputKey::iter() {
            let now = self.state.get(key);
            if now != before.get(key) {
                self.bus.emit(GameEvent::KeyChanged(KeyChange::new(key, now)));
            }
        }

        self.previous = before;
        self.published = self.state;
    }

    fn resolve_keys(&mut self) {
        for key in InputKey::iter() {
            let codes = self.config.bindings.codes(key);
            if codes.is_empty() {
                continue;
            }
            let down = codes.iter().any(|code| self.keys_down.contains(code));
            self.state.set(key, down);
        }
    }

    fn move_pointer(&mut self, x: f32, y: f32) {
        self.state.mouse_x = x;
        self.state.mouse_y = y;
    }

    //--- Control ----------------------------------------------------------

    /// Enables or disables frame updates. Held keys keep being tracked.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    //--- Query Methods ----------------------------------------------------

    /// Copy of the current logical state.
    pub fn state(&self) -> InputState {
        self.state
    }

    pub fn is_pressed(&self, key: InputKey) -> bool {
        self.state.get(key)
    }

    /// Down this frame, up the frame before.
    pub fn just_pressed(&self, key: InputKey) -> bool {
        self.state.get(key) && !self.previous.get(key)
    }

    /// Up this frame, down the frame before.
    pub fn just_released(&self, key: InputKey) -> bool {
        !self.state.get(key) && self.previous.get(key)
    }

    pub fn is_moving_left(&self) -> bool {
        self.state.left
    }

    pub fn is_moving_right(&self) -> bool {
        self.state.right
    }

    pub fn is_moving_up(&self) -> bool {
        self.state.up
    }

    pub fn is_moving_down(&self) -> bool {
        self.state.down
    }

    /// Jump starts on the frame up or space goes down.
    pub fn is_jumping(&self) -> bool {
        self.just_pressed(InputKey::Up) || self.just_pressed(InputKey::Space)
    }

    pub fn mouse_position(&self) -> (f32, f32) {
        (self.state.mouse_x, self.state.mouse_y)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
