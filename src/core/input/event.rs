//=========================================================================
// Raw Input Events
//=========================================================================
//
// Engine-neutral representation of the input the engine forwards to the
// core each frame.
//
// Event Flow:
// ```text
// Engine / winit
//         ↓
//    RawInputEvent (this module)
//         ↓
//    InputSystem (logical keys, pointer state)
//         ↓
//    EventBus (keyChanged, pointerDown, ...)
// ```
//
//=========================================================================

//=== KeyCode =============================================================

/// Physical keyboard key identifier.
///
/// Represents the physical key location, not the character produced, so
/// `KeyA` is the same key on QWERTY and AZERTY layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    //--- Alphabetic Keys --------------------------------------------------

    /// Letter keys: A-Z (physical location, not character)
    KeyA, KeyB, KeyC, KeyD, KeyE, KeyF, KeyG, KeyH, KeyI,
    KeyJ, KeyK, KeyL, KeyM, KeyN, KeyO, KeyP, KeyQ, KeyR,
    KeyS, KeyT, KeyU, KeyV, KeyW, KeyX, KeyY, KeyZ,

    //--- Arrow Keys -------------------------------------------------------

    ArrowDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,

    //--- Special Keys -----------------------------------------------------

    Space,
    ShiftLeft,
    ShiftRight,
    Enter,
    Escape,

    /// Fallback for keys the core has no use for.
    Unidentified,
}

//=== RawInputEvent =======================================================

/// Low-level input forwarded by the engine.
///
/// Keys are level-triggered: the input system reads which keys are held
/// when it updates. Pointer and gamepad events are edge-triggered and are
/// republished on the bus as soon as they arrive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawInputEvent {
    KeyDown(KeyCode),
    KeyUp(KeyCode),

    /// Primary pointer pressed at screen coordinates.
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMoved { x: f32, y: f32 },

    GamepadDown { pad: u32, button: u32 },
    GamepadUp { pad: u32, button: u32 },
}
