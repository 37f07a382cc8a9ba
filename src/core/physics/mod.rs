//=========================================================================
// Physics System
//=========================================================================
//
// Core-side view of the engine's physics world: the flags and settings
// game logic reads or changes, each change announced on the EventBus.
//
// The simulation itself (bodies, collision resolution) stays in the
// engine. This system only records what the engine reports (body count)
// and what the game requests (gravity, world bounds, pause).
//
// Pause wiring:
//   gamePaused  ──attach()──> pause()  ──> physicsPaused
//   gameResumed ──attach()──> resume() ──> physicsResumed
//
// Both reactions run nested inside the store's emit (depth-first).
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

use log::debug;

//=== Internal Dependencies ===============================================

use crate::core::event_bus::{handler, EventBus, EventKind, GameEvent};

//=== Payloads ============================================================

/// World gravity, in pixels per second squared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gravity {
    pub x: f32,
    pub y: f32,
}

/// Rectangle bodies are confined to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Payload of `physicsUpdate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhysicsStats {
    pub bodies: usize,
}

//=== PhysicsConfig =======================================================

/// Initial physics settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    pub gravity: Gravity,
    pub world_bounds: WorldBounds,
    pub debug: bool,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Gravity { x: 0.0, y: 300.0 },
            world_bounds: WorldBounds {
                x: 0.0,
                y: 0.0,
                width: 400.0,
                height: 600.0,
            },
            debug: false,
        }
    }
}

//=== PhysicsSystem =======================================================

/// Physics flags shared between the engine bridge and bus listeners.
///
/// State lives in `Cell`s so the system can be shared via `Rc` and
/// mutated from inside bus handlers.
pub struct PhysicsSystem {
    bus: Rc<EventBus>,
    gravity: Cell<Gravity>,
    world_bounds: Cell<WorldBounds>,
    debug: Cell<bool>,
    enabled: Cell<bool>,
    bodies: Cell<usize>,
}

impl PhysicsSystem {
    pub fn new(bus: Rc<EventBus>, config: PhysicsConfig) -> Self {
        Self {
            bus,
            gravity: Cell::new(config.gravity),
            world_bounds: Cell::new(config.world_bounds),
            debug: Cell::new(config.debug),
            enabled: Cell::new(true),
            bodies: Cell::new(0),
        }
    }

    /// Subscribes `physics` to the game's pause and resume events.
    ///
    /// Must be called again after the bus is cleared.
    pub fn attach(physics: &Rc<Self>) {
        let on_pause = Rc::clone(physics);
        physics
            .bus
            .on(EventKind::GamePaused, handler(move |_| on_pause.pause()));

        let on_resume = Rc::clone(physics);
        physics
            .bus
            .on(EventKind::GameResumed, handler(move |_| on_resume.resume()));
    }

    //--- Frame ------------------------------------------------------------

    /// Publishes `physicsUpdate` for this frame; skipped while paused.
    pub fn update(&self) {
        if !self.enabled.get() {
            return;
        }
        self.bus.emit(GameEvent::PhysicsUpdate(PhysicsStats {
            bodies: self.bodies.get(),
        }));
    }

    /// Records the number of live bodies the engine reports.
    pub fn set_body_count(&self, bodies: usize) {
        self.bodies.set(bodies);
    }

    pub fn body_count(&self) -> usize {
        self.bodies.get()
    }

    //--- Gravity ----------------------------------------------------------

    /// Sets gravity; `y` keeps its current value when `None`.
    pub fn set_gravity(&self, x: f32, y: Option<f32>) {
        let y = y.unwrap_or(self.gravity.get().y);
        let gravity = Gravity { x, y };
        self.gravity.set(gravity);
        self.bus.emit(GameEvent::GravityChanged(gravity));
    }

    pub fn gravity(&self) -> Gravity {
        self.gravity.get()
    }

    //--- Pause ------------------------------------------------------------

    pub fn pause(&self) {
        self.enabled.set(false);
        debug!("Physics paused");
        self.bus.emit(GameEvent::PhysicsPaused);
    }

    pub fn resume(&self) {
        self.enabled.set(true);
        debug!("Physics resumed");
        self.bus.emit(GameEvent::PhysicsResumed);
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.get()
    }

    //--- World bounds -----------------------------------------------------

    pub fn set_world_bounds(&self, bounds: WorldBounds) {
        self.world_bounds.set(bounds);
        self.bus.emit(GameEvent::WorldBoundsChanged(bounds));
    }

    pub fn world_bounds(&self) -> WorldBounds {
        self.world_bounds.get()
    }

    //--- Debug ------------------------------------------------------------

    /// Toggles the engine's collider overlay flag.
    pub fn enable_debug(&self, enabled: bool) {
        self.debug.set(enabled);
    }

    pub fn is_debug(&self) -> bool {
        self.debug.get()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
