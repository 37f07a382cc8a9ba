//=========================================================================
// Game State Store
//=========================================================================
//
// Single source of truth for gameplay counters.
//
// Every mutation follows the same shape:
//
//   borrow_mut → update → copy payload → release borrow → emit
//
// The borrow is always released before emitting, so listeners may read
// the store (or mutate it again) from inside their handlers.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::{GameState, Position};
use crate::core::event_bus::{EventBus, GameEvent};

//=== GameStateStore ======================================================

/// Owns the [`GameState`] and announces each change on the [`EventBus`].
///
/// The bus is injected at construction, so no mutation can happen before
/// there is somewhere to publish it.
///
/// # Example
///
/// ```
/// use std::rc::Rc;
/// use platformer_core::prelude::*;
///
/// let bus = Rc::new(EventBus::new());
/// let store = GameStateStore::new(Rc::clone(&bus));
///
/// store.add_score(10);
/// store.lose_life();
/// assert_eq!(store.score(), 10);
/// assert_eq!(store.lives(), 2);
/// ```
pub struct GameStateStore {
    state: RefCell<GameState>,
    defaults: GameState,
    bus: Rc<EventBus>,
}

impl GameStateStore {
    //--- Construction -----------------------------------------------------

    /// Creates a store with the standard new-run defaults.
    pub fn new(bus: Rc<EventBus>) -> Self {
        Self::with_defaults(bus, GameState::default())
    }

    /// Creates a store whose initial state (and reset target) is `defaults`.
    pub fn with_defaults(bus: Rc<EventBus>, defaults: GameState) -> Self {
        Self {
            state: RefCell::new(defaults.clone()),
            defaults,
            bus,
        }
    }

    /// The bus this store publishes on.
    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    //--- Score ------------------------------------------------------------

    pub fn score(&self) -> i64 {
        self.state.borrow().score
    }

    /// Adds `points` (any sign) and emits `scoreChanged`.
    ///
    /// The score saturates at the `i64` bounds.
    pub fn add_score(&self, points: i64) {
        let score = {
            let mut state = self.state.borrow_mut();
            state.score = state.score.saturating_add(points);
            state.score
        };
        self.bus.emit(GameEvent::ScoreChanged(score));
    }

    /// Replaces the score and emits `scoreChanged`.
    pub fn set_score(&self, score: i64) {
        self.state.borrow_mut().score = score;
        self.bus.emit(GameEvent::ScoreChanged(score));
    }

    //--- Lives ------------------------------------------------------------

    pub fn lives(&self) -> u32 {
        self.state.borrow().lives
    }

    /// Removes a life (never below zero) and emits `livesChanged`.
    ///
    /// When lives are still zero once `livesChanged` listeners have run,
    /// `gameOver` follows. This repeats on every call at zero; the store
    /// does not reset itself.
    pub fn lose_life(&self) {
        let lives = {
            let mut state = self.state.borrow_mut();
            state.lives = state.lives.saturating_sub(1);
            state.lives
        };
        self.bus.emit(GameEvent::LivesChanged(lives));

        // A livesChanged listener may have granted a life back.
        if self.lives() == 0 {
            info!("Out of lives, game over");
            self.bus.emit(GameEvent::GameOver);
        }
    }

    /// Grants a life and emits `livesChanged`.
    pub fn add_life(&self) {
        let lives = {
            let mut state = self.state.borrow_mut();
            state.lives = state.lives.saturating_add(1);
            state.lives
        };
        self.bus.emit(GameEvent::LivesChanged(lives));
    }

    /// True once lives have reached zero.
    pub fn is_game_over(&self) -> bool {
        self.lives() == 0
    }

    //--- Level ------------------------------------------------------------

    pub fn level(&self) -> u32 {
        self.state.borrow().level
    }

    pub fn next_level(&self) {
        let level = {
            let mut state = self.state.borrow_mut();
            state.level = state.level.saturating_add(1);
            state.level
        };
        debug!("Advancing to level {}", level);
        self.bus.emit(GameEvent::LevelChanged(level));
    }

    pub fn set_level(&self, level: u32) {
        self.state.borrow_mut().level = level;
        self.bus.emit(GameEvent::LevelChanged(level));
    }

    //--- Pause ------------------------------------------------------------

    pub fn is_paused(&self) -> bool {
        self.state.borrow().is_paused
    }

    /// Sets paused and emits `gamePaused`, even if already paused.
    pub fn pause(&self) {
        self.state.borrow_mut().is_paused = true;
        self.bus.emit(GameEvent::GamePaused);
    }

    /// Clears paused and emits `gameResumed`, even if already running.
    pub fn resume(&self) {
        self.state.borrow_mut().is_paused = false;
        self.bus.emit(GameEvent::GameResumed);
    }

    /// Flips the pause flag and emits the event matching the new value.
    pub fn toggle_pause(&self) {
        let paused = {
            let mut state = self.state.borrow_mut();
            state.is_paused = !state.is_paused;
            state.is_paused
        };
        self.bus.emit(if paused {
            GameEvent::GamePaused
        } else {
            GameEvent::GameResumed
        });
    }

    //--- Player position --------------------------------------------------

    pub fn player_position(&self) -> Position {
        self.state.borrow().player_position
    }

    pub fn set_player_position(&self, x: f32, y: f32) {
        let position = Position::new(x, y);
        self.state.borrow_mut().player_position = position;
        self.bus.emit(GameEvent::PlayerPositionChanged(position));
    }

    //--- Collected items --------------------------------------------------

    /// Collected item ids, in the order they were collected.
    pub fn collected_items(&self) -> Vec<String> {
        self.state.borrow().collected_items.to_vec()
    }

    pub fn has_collected(&self, id: &str) -> bool {
        self.state.borrow().collected_items.contains(id)
    }

    /// Records `id` as collected.
    ///
    /// Emits `itemCollected` and returns true only when the id was new;
    /// repeated collection is silent.
    pub fn collect_item(&self, id: &str) -> bool {
        let inserted = self.state.borrow_mut().collected_items.insert(id);
        if inserted {
            self.bus.emit(GameEvent::ItemCollected(id.to_owned()));
        }
        inserted
    }

    //--- Game time --------------------------------------------------------

    pub fn game_time(&self) -> f64 {
        self.state.borrow().game_time
    }

    pub fn set_game_time(&self, time: f64) {
        self.state.borrow_mut().game_time = time;
        self.bus.emit(GameEvent::GameTimeChanged(time));
    }

    //--- Reset ------------------------------------------------------------

    /// Restores the configured defaults and emits a single `gameReset`.
    ///
    /// No per-field events are emitted.
    pub fn reset_game(&self) {
        *self.state.borrow_mut() = self.defaults.clone();
        info!("Game state reset");
        self.bus.emit(GameEvent::GameReset);
    }

    //--- Snapshot ---------------------------------------------------------

    /// Deep copy of the whole state.
    pub fn full_state(&self) -> GameState {
        self.state.borrow().clone()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
