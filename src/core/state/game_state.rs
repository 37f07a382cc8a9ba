//=========================================================================
// Game State Record
//=========================================================================
//
// Plain data owned by the GameStateStore.
//
// Values handed out by the store are copies of this record; the only
// mutation path for callers is through the store's operations.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Position ============================================================

/// World-space position of the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

impl Position {
    /// Spawn point used when no other start position is configured.
    pub const START: Position = Position { x: 100.0, y: 440.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

//=== CollectedItems ======================================================

/// Insertion-ordered set of collected item ids.
///
/// Read access is public; insertion is reserved to the store so that
/// every addition is paired with its `itemCollected` event.
#[derive(Debug, Clone, Default)]
pub struct CollectedItems {
    order: Vec<String>,
    index: HashSet<String>,
}

impl CollectedItems {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `id` if absent. Returns true if it was inserted.
    pub(crate) fn insert(&mut self, id: &str) -> bool {
        if self.index.contains(id) {
            return false;
        }
        self.index.insert(id.to_owned());
        self.order.push(id.to_owned());
        true
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates ids in the order they were collected.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Copies the ids into a vector, in collection order.
    pub fn to_vec(&self) -> Vec<String> {
        self.order.clone()
    }
}

impl PartialEq for CollectedItems {
    fn eq(&self, other: &Self) -> bool {
        // Order is part of the observable state.
        self.order == other.order
    }
}

//=== GameState ===========================================================

/// Snapshot of every gameplay counter and flag.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Accumulated score. Deltas are applied as given, so it may go negative.
    pub score: i64,

    /// Remaining lives; never below zero.
    pub lives: u32,

    pub level: u32,

    pub is_paused: bool,

    pub player_position: Position,

    pub collected_items: CollectedItems,

    /// Elapsed play time in milliseconds.
    pub game_time: f64,
}

impl GameState {
    /// Lives at the start of a run.
    pub const DEFAULT_LIVES: u32 = 3;

    /// Level at the start of a run.
    pub const FIRST_LEVEL: u32 = 1;

    /// Fresh state with the given starting lives and spawn point.
    pub fn with_start(lives: u32, player_position: Position) -> Self {
        Self {
            score: 0,
            lives,
            level: Self::FIRST_LEVEL,
            is_paused: false,
            player_position,
            collected_items: CollectedItems::new(),
            game_time: 0.0,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::with_start(Self::DEFAULT_LIVES, Position::START)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
