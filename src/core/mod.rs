//=========================================================================
// Game Core
//
// Everything that runs on the game thread: the event bus, the state
// store, and the systems that feed them.
//
// Responsibilities:
// - Carry every cross-component notification (event_bus)
// - Own gameplay counters and announce their changes (state)
// - Translate engine input, physics and asset reports (input, physics,
//   assets)
// - Define the engine → game contract (platform_bridge)
//
// Notes:
// Nothing here is global. A `Game` builds one `EventBus` and hands an
// `Rc` of it to each system at construction.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod assets;
pub mod event_bus;
pub mod input;
pub mod physics;
pub mod platform_bridge;
pub mod state;

//=== Public API ==========================================================

pub use event_bus::{handler, Dispatch, EventBus, EventKind, GameEvent, Handler};
pub use state::{GameState, GameStateStore, Position};
