//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types.
//
// Usage:
//   use platformer_core::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Game facade
pub use crate::{Game, GameBuilder};

// Event bus
pub use crate::core::event_bus::{handler, EventBus, EventKind, GameEvent, Handler};

// State
pub use crate::core::state::{GameState, GameStateStore, Position};

// Systems
pub use crate::core::assets::{AssetLoader, AssetManifest};
pub use crate::core::input::{InputKey, InputSystem, KeyCode, RawInputEvent};
pub use crate::core::physics::PhysicsSystem;

// Engine bridge
pub use crate::core::platform_bridge::{Body, BodyKind, EngineEvent, EngineHandle, TickControl};
