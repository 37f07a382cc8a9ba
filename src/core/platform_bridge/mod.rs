//=========================================================================
// Engine Bridge
//=========================================================================
//
// Bridges the rendering/physics engine with the game core.
//
// The engine never touches game state directly: it reports frames,
// input, overlaps and asset results through an [`EngineHandle`], and the
// game applies them on its own thread during `Game::tick`.
//
// Components:
// - `interface`: Event types, handle and error definitions (the contract)
// - `event_collector`: Game-side bounded draining
//
//=========================================================================

//=== Module Declarations =================================================

mod event_collector;
mod interface;

//=== Public API ==========================================================

pub use event_collector::TickControl;
pub use interface::{Body, BodyKind, BridgeError, EngineEvent, EngineHandle};

//=== Internal API ========================================================

pub(crate) use event_collector::EventCollector;
