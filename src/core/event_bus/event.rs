//=========================================================================
// Game Events
//=========================================================================
//
// Closed set of named events carried by the EventBus.
//
// Every event has:
// - an `EventKind`: the channel name listeners subscribe to
// - a typed payload (or none) fixed per kind
//
// ```text
// GameEvent::ScoreChanged(42)  ──kind()──>  EventKind::ScoreChanged
//                                                 │
//                                  name() ───> "scoreChanged"
// ```
//
// Names are the camelCase strings the game's UI layer matches on, so
// `EventKind` round-trips through `&str` via strum.
//
//=========================================================================

//=== External Dependencies ===============================================

use strum::{Display, EnumIter, EnumString, IntoStaticStr};

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetLoadFailure, AssetLoadingProgress, AssetUnloaded};
use crate::core::input::KeyChange;
use crate::core::physics::{Gravity, PhysicsStats, WorldBounds};
use crate::core::state::Position;

//=== EventKind ===========================================================

/// Name of an event channel on the bus.
///
/// Listeners register against a kind; emitters produce a [`GameEvent`]
/// whose [`GameEvent::kind`] selects the channel.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "camelCase")]
pub enum EventKind {
    //--- Game state -------------------------------------------------------
    ScoreChanged,
    LivesChanged,
    GameOver,
    LevelChanged,
    GamePaused,
    GameResumed,
    PlayerPositionChanged,
    ItemCollected,
    GameTimeChanged,
    GameReset,

    //--- Gameplay ---------------------------------------------------------
    CoinCollected,

    //--- Input ------------------------------------------------------------
    PointerDown,
    PointerUp,
    PointerMove,
    GamepadDown,
    GamepadUp,
    KeyChanged,

    //--- Physics ----------------------------------------------------------
    PhysicsUpdate,
    PhysicsPaused,
    PhysicsResumed,
    GravityChanged,
    WorldBoundsChanged,

    //--- Assets -----------------------------------------------------------
    AssetLoadingProgress,
    AssetsLoaded,
    AssetLoadingError,
    AssetUnloaded,
}

impl EventKind {
    /// Returns the wire name of this kind (e.g. `"scoreChanged"`).
    pub fn name(self) -> &'static str {
        self.into()
    }
}

//=== Payloads ============================================================

/// Position and value of a collected coin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoinCollected {
    pub x: f32,
    pub y: f32,
    pub value: i64,
}

/// Screen-space pointer coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerPosition {
    pub x: f32,
    pub y: f32,
}

/// Gamepad button transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GamepadButton {
    /// Index of the pad as reported by the engine.
    pub pad: u32,
    /// Button index on that pad.
    pub button: u32,
}

//=== GameEvent ===========================================================

/// An event emitted through the [`EventBus`](super::EventBus).
///
/// The variant determines both the channel ([`EventKind`]) and the payload
/// shape. Listeners match on the variant they subscribed for:
///
/// ```
/// use platformer_core::prelude::*;
///
/// let bus = EventBus::new();
/// bus.on(EventKind::ScoreChanged, handler(|event| {
///     if let GameEvent::ScoreChanged(score) = event {
///         println!("score: {score}");
///     }
/// }));
/// bus.emit(GameEvent::ScoreChanged(10));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    //--- Game state -------------------------------------------------------
    ScoreChanged(i64),
    LivesChanged(u32),
    GameOver,
    LevelChanged(u32),
    GamePaused,
    GameResumed,
    PlayerPositionChanged(Position),
    ItemCollected(String),
    GameTimeChanged(f64),
    GameReset,

    //--- Gameplay ---------------------------------------------------------
    CoinCollected(CoinCollected),

    //--- Input ------------------------------------------------------------
    PointerDown(PointerPosition),
    PointerUp(PointerPosition),
    PointerMove(PointerPosition),
    GamepadDown(GamepadButton),
    GamepadUp(GamepadButton),
    KeyChanged(KeyChange),

    //--- Physics ----------------------------------------------------------
    PhysicsUpdate(PhysicsStats),
    PhysicsPaused,
    PhysicsResumed,
    GravityChanged(Gravity),
    WorldBoundsChanged(WorldBounds),

    //--- Assets -----------------------------------------------------------
    AssetLoadingProgress(AssetLoadingProgress),
    AssetsLoaded,
    AssetLoadingError(AssetLoadFailure),
    AssetUnloaded(AssetUnloaded),
}

impl GameEvent {
    /// Returns the channel this event is delivered on.
    pub fn kind(&self) -> EventKind {
        match self {
            Self::ScoreChanged(_) => EventKind::ScoreChanged,
            Self::LivesChanged(_) => EventKind::LivesChanged,
            Self::GameOver => EventKind::GameOver,
            Self::LevelChanged(_) => EventKind::LevelChanged,
            Self::GamePaused => EventKind::GamePaused,
            Self::GameResumed => EventKind::GameResumed,
            Self::PlayerPositionChanged(_) => EventKind::PlayerPositionChanged,
            Self::ItemCollected(_) => EventKind::ItemCollected,
            Self::GameTimeChanged(_) => EventKind::GameTimeChanged,
            Self::GameReset => EventKind::GameReset,
            Self::CoinCollected(_) => EventKind::CoinCollected,
            Self::PointerDown(_) => EventKind::PointerDown,
            Self::PointerUp(_) => EventKind::PointerUp,
            Self::PointerMove(_) => EventKind::PointerMove,
            Self::GamepadDown(_) => EventKind::GamepadDown,
            Self::GamepadUp(_) => EventKind::GamepadUp,
            Self::KeyChanged(_) => EventKind::KeyChanged,
            Self::PhysicsUpdate(_) => EventKind::PhysicsUpdate,
            Self::PhysicsPaused => EventKind::PhysicsPaused,
            Self::PhysicsResumed => EventKind::PhysicsResumed,
            Self::GravityChanged(_) => EventKind::GravityChanged,
            Self::WorldBoundsChanged(_) => EventKind::WorldBoundsChanged,
            Self::AssetLoadingProgress(_) => EventKind::AssetLoadingProgress,
            Self::AssetsLoaded => EventKind::AssetsLoaded,
            Self::AssetLoadingError(_) => EventKind::AssetLoadingError,
            Self::AssetUnloaded(_) => EventKind::AssetUnloaded,
        }
    }

    /// Shorthand for `self.kind().name()`.
    pub fn name(&self) -> &'static str {
        self.kind().name()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
