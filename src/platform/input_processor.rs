//=========================================================================
// Input Processor
//=========================================================================
//
// Converts winit window events into core RawInputEvents.
//
// Architecture:
//   WindowEvent → InputProcessor → RawInputEvent → EngineEvent::Input
//
// Stateful cursor tracking: winit reports mouse buttons without a
// position, so the last CursorMoved position is cached and attached to
// PointerDown/PointerUp. Only the primary (left) button drives the
// pointer. Unmapped keys are filtered (returns None).
//
//=========================================================================

//=== External Dependencies ===============================================

use winit::{
    event::{ElementState, KeyEvent, MouseButton as WinitMouseButton, WindowEvent},
    keyboard::{KeyCode as WinitKeyCode, PhysicalKey},
};

//=== Internal Dependencies ===============================================

use crate::core::input::{KeyCode, RawInputEvent};

//=== InputProcessor ======================================================

/// Converts winit events to [`RawInputEvent`]s, tracking the cursor.
#[derive(Debug, Default)]
pub struct InputProcessor {
    cursor: (f32, f32),
}

impl InputProcessor {
    //--- Construction -----------------------------------------------------

    pub fn new() -> Self {
        Self::default()
    }

    /// Last cursor position seen, in physical pixels.
    pub fn cursor(&self) -> (f32, f32) {
        self.cursor
    }

    //--- Event Processing -------------------------------------------------

    /// Converts a window event, or returns None if the core has no use for it.
    pub fn process(&mut self, event: &WindowEvent) -> Option<RawInputEvent> {
        match event {
            WindowEvent::KeyboardInput { event, .. } => Self::process_key_event(event),
            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(*button, *state)
            }
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.process_mouse_move(position.x as f32, position.y as f32))
            }
            _ => None,
        }
    }

    /// Converts a key event (filters unmapped keys and auto-repeat).
    pub fn process_key_event(key_event: &KeyEvent) -> Option<RawInputEvent> {
        if key_event.repeat {
            return None;
        }
        match key_event.physical_key {
            PhysicalKey::Code(code) => Self::key_transition(KeyCode::from(code), key_event.state),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Converts a mouse button transition at the cached cursor position.
    pub fn process_mouse_button(
        &self,
        button: WinitMouseButton,
        state: ElementState,
    ) -> Option<RawInputEvent> {
        if button != WinitMouseButton::Left {
            return None;
        }
        let (x, y) = self.cursor;
        Some(match state {
            ElementState::Pressed => RawInputEvent::PointerDown { x, y },
            ElementState::Released => RawInputEvent::PointerUp { x, y },
        })
    }

    /// Records the cursor and produces a pointer move.
    pub fn process_mouse_move(&mut self, x: f32, y: f32) -> RawInputEvent {
        self.cursor = (x, y);
        RawInputEvent::PointerMoved { x, y }
    }

    //--- Internal Helpers -------------------------------------------------

    fn key_transition(key: KeyCode, state: ElementState) -> Option<RawInputEvent> {
        if key == KeyCode::Unidentified {
            return None;
        }
        Some(match state {
            ElementState::Pressed => RawInputEvent::KeyDown(key),
            ElementState::Released => RawInputEvent::KeyUp(key),
        })
    }
}

//=========================================================================
// Winit Conversions
//=========================================================================

impl From<WinitKeyCode> for KeyCode {
    fn from(code: WinitKeyCode) -> Self {
        use WinitKeyCode::*;
        match code {
            //--- Alphabetic keys --------------------------------------------------
            KeyA => KeyCode::KeyA, KeyB => KeyCode::KeyB, KeyC => KeyCode::KeyC,
            KeyD => KeyCode::KeyD, KeyE => KeyCode::KeyE, KeyF => KeyCode::KeyF,
            KeyG => KeyCode::KeyG, KeyH => KeyCode::KeyH, KeyI => KeyCode::KeyI,
            KeyJ => KeyCode::KeyJ, KeyK => KeyCode::KeyK, KeyL => KeyCode::KeyL,
            KeyM => KeyCode::KeyM, KeyN => KeyCode::KeyN, KeyO => KeyCode::KeyO,
            KeyP => KeyCode::KeyP, KeyQ => KeyCode::KeyQ, KeyR => KeyCode::KeyR,
            KeyS => KeyCode::KeyS, KeyT => KeyCode::KeyT, KeyU => KeyCode::KeyU,
            KeyV => KeyCode::KeyV, KeyW => KeyCode::KeyW, KeyX => KeyCode::KeyX,
            KeyY => KeyCode::KeyY, KeyZ => KeyCode::KeyZ,

            //--- Arrow keys -------------------------------------------------------
            ArrowDown => KeyCode::ArrowDown, ArrowLeft => KeyCode::ArrowLeft,
            ArrowRight => KeyCode::ArrowRight, ArrowUp => KeyCode::ArrowUp,

            //--- Special keys -----------------------------------------------------
            Space => KeyCode::Space,
            ShiftLeft => KeyCode::ShiftLeft,
            ShiftRight => KeyCode::ShiftRight,
            Enter => KeyCode::Enter,
            Escape => KeyCode::Escape,

            //--- Fallback ---------------------------------------------------------
            _ => KeyCode::Unidentified,
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
