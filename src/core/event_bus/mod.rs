//=========================================================================
// Event Bus
//=========================================================================
//
// Decouples producers of game events (state store, input, physics,
// assets) from consumers (HUD, scene logic) without either knowing the
// other.
//
//   event:        closed GameEvent set and EventKind channel names
//   bus:          EventBus registry and synchronous dispatch
//   handler_list: per-kind ordered handler storage
//
//=========================================================================

//=== Module Declarations =================================================

mod bus;
mod event;
mod handler_list;

//=== Public API ==========================================================

pub use bus::{handler, Dispatch, EventBus, Handler};
pub use event::{CoinCollected, EventKind, GameEvent, GamepadButton, PointerPosition};
