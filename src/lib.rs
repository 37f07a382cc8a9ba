//=========================================================================
// Platformer Core: Library Root
//
// Game state and a synchronous event bus for a 2D platformer, plus the
// systems that connect them to an external engine.
//
// Responsibilities:
// - Expose the `Game` facade and its builder
// - Expose `core` for direct use of the bus, store and systems
// - Map winit input onto core input events (`platform`)
//
// Typical usage:
// ```no_run
// use platformer_core::GameBuilder;
//
// let (game, engine) = GameBuilder::new().build();
// // move `engine` to the engine thread, then:
// game.run();
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` holds the bus, the store and every game-thread system. It is
// public so UI code can subscribe to the bus and query the store.
//
// `platform` converts winit window events for engines built on winit.
//
pub mod core;
pub mod platform;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `game` wires the systems together and drives them from the bridge.
//
mod game;

//--- Public Exports ------------------------------------------------------

pub use game::{Game, GameBuilder};
