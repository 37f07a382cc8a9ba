//=========================================================================
// Game State
//=========================================================================
//
// Gameplay counters and the store that owns them.
//
//   game_state: GameState record, Position, CollectedItems
//   store:      GameStateStore (mutate → emit)
//
//=========================================================================

//=== Module Declarations =================================================

mod game_state;
mod store;

//=== Public API ==========================================================

pub use game_state::{CollectedItems, GameState, Position};
pub use store::GameStateStore;
