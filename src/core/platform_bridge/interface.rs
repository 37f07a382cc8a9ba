//=========================================================================
// Engine Bridge Interface
//=========================================================================
//
// Engine-to-core interface types (events, handle and errors).
//
// Defines the contract between the engine thread, which owns rendering
// and physics simulation, and the game thread, which owns all game state.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Sender;
use thiserror::Error;

//=== Internal Dependencies ===============================================

use crate::core::assets::AssetFile;
use crate::core::input::RawInputEvent;

//=== Bodies ==============================================================

/// Gameplay role of a physics body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyKind {
    Player,
    Coin,
    Enemy,
    Platform,
}

/// Physics body involved in an overlap.
///
/// `id` is stable for the lifetime of the body; coins use it as their
/// collected-item id.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub kind: BodyKind,
    pub id: String,
    pub x: f32,
    pub y: f32,
}

impl Body {
    pub fn new(kind: BodyKind, id: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            kind,
            id: id.into(),
            x,
            y,
        }
    }
}

//=== EngineEvent =========================================================

/// Events sent from the engine to the core via MPSC.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// One rendered frame elapsed.
    Frame { delta_ms: f64 },

    Input(RawInputEvent),

    /// Player body position after the physics step.
    PlayerMoved { x: f32, y: f32 },

    /// Two bodies started overlapping. Order of `a` and `b` is arbitrary.
    Overlap { a: Body, b: Body },

    /// Live body count after the physics step.
    BodyCount(usize),

    AssetLoaded(String),
    AssetsComplete,
    AssetFailed(AssetFile),

    /// Engine is closing.
    Shutdown,
}

//=== BridgeError =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BridgeError {
    /// The game side has been dropped.
    #[error("game is no longer receiving engine events")]
    Disconnected,
}

//=== EngineHandle ========================================================

/// Engine-side sending half of the bridge.
///
/// Cheap to clone and `Send`, so it can move to the engine thread.
#[derive(Debug, Clone)]
pub struct EngineHandle {
    sender: Sender<EngineEvent>,
}

impl EngineHandle {
    pub(crate) fn new(sender: Sender<EngineEvent>) -> Self {
        Self { sender }
    }

    /// Queues an event for the next tick, blocking while the channel is full.
    ///
    /// # Errors
    ///
    /// [`BridgeError::Disconnected`] once the game has been dropped.
    pub fn send(&self, event: EngineEvent) -> Result<(), BridgeError> {
        self.sender
            .send(event)
            .map_err(|_| BridgeError::Disconnected)
    }

    /// Sends `Frame { delta_ms }`.
    pub fn frame(&self, delta_ms: f64) -> Result<(), BridgeError> {
        self.send(EngineEvent::Frame { delta_ms })
    }

    pub fn input(&self, event: RawInputEvent) -> Result<(), BridgeError> {
        self.send(EngineEvent::Input(event))
    }

    pub fn shutdown(&self) -> Result<(), BridgeError> {
        self.send(EngineEvent::Shutdown)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
