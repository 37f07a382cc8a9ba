//=========================================================================
// Platform Adapters
//
// Maps OS-level input (winit) into the core's RawInputEvent type.
//
// The engine owns the window and event loop; hosts that drive that loop
// with winit feed each WindowEvent through InputProcessor and forward the
// result over the engine bridge:
//
// ```text
//  Engine thread                         Game thread
//  ┌─────────────────────────┐          ┌─────────────────┐
//  │ winit WindowEvent       │          │ Game::tick()    │
//  │   ↓                     │          │   ↓             │
//  │ InputProcessor          │          │ InputSystem     │
//  │   ↓                     │          │   ↓             │
//  │ EngineHandle::send ─────┼─────────→│ EventBus        │
//  └─────────────────────────┘          └─────────────────┘
// ```
//
//=========================================================================

//=== Submodules ==========================================================

mod input_processor;

//=== Public API ==========================================================

pub use input_processor::InputProcessor;
