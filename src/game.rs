//=========================================================================
// Game
//
// Lifecycle owner for one running game: builds the EventBus, the state
// store and every system, wires them together, and applies engine events
// tick by tick.
//
// Architecture:
// ```text
//     GameBuilder  ──build()──>  (Game, EngineHandle)
//         │                        │        │
//         ├─ with_starting_lives() │        └─ moved to the engine thread
//         ├─ with_coin_value()     │
//         └─ with_channel_capacity()└─ tick() / run() on the game thread
// ```
//
// Per-tick pipeline, for each collected EngineEvent in arrival order:
//   Frame       → game time (unless paused) → input.update() → physics.update()
//   Input       → input.handle()
//   PlayerMoved → store.set_player_position()
//   Overlap     → collision rules (coin / enemy)
//   Asset*      → asset loader
//
//=========================================================================

//=== External Dependencies ===============================================

use std::rc::Rc;

use crossbeam_channel::bounded;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use crate::core::assets::{AssetError, AssetLoader, AssetManifest, AssetRequest};
use crate::core::event_bus::{CoinCollected, EventBus, GameEvent};
use crate::core::input::{InputConfig, InputSystem};
use crate::core::physics::{PhysicsConfig, PhysicsSystem};
use crate::core::platform_bridge::{
    Body, BodyKind, EngineEvent, EngineHandle, EventCollector, TickControl,
};
use crate::core::state::{GameState, GameStateStore, Position};

//=== GameBuilder =========================================================

/// Builder for configuring and constructing a [`Game`].
///
/// # Default Values
///
/// - **Starting lives**: 3
/// - **Start position**: (100, 440)
/// - **Coin value**: 1 point
/// - **Channel capacity**: 128 events
/// - **Max events per tick**: 100
///
/// # Examples
///
/// ```
/// use platformer_core::prelude::*;
///
/// let (mut game, engine) = GameBuilder::new()
///     .with_starting_lives(5)
///     .with_coin_value(10)
///     .build();
///
/// engine.frame(16.0).unwrap();
/// assert_eq!(game.tick(), TickControl::Continue);
/// assert_eq!(game.store().lives(), 5);
/// assert_eq!(game.store().game_time(), 16.0);
/// ```
pub struct GameBuilder {
    starting_lives: u32,
    start_position: Position,
    coin_value: i64,
    physics: PhysicsConfig,
    input: InputConfig,
    channel_capacity: usize,
    max_events_per_tick: usize,
}

impl GameBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            starting_lives: GameState::DEFAULT_LIVES,
            start_position: Position::START,
            coin_value: 1,
            physics: PhysicsConfig::default(),
            input: InputConfig::default(),
            channel_capacity: 128,
            max_events_per_tick: 100,
        }
    }

    /// Sets the lives a new run (and every reset) starts with.
    ///
    /// # Panics
    ///
    /// Panics if `lives == 0`.
    pub fn with_starting_lives(mut self, lives: u32) -> Self {
        assert!(lives > 0, "Starting lives must be positive");
        self.starting_lives = lives;
        self
    }

    /// Sets where the player spawns on start and reset.
    pub fn with_start_position(mut self, x: f32, y: f32) -> Self {
        self.start_position = Position::new(x, y);
        self
    }

    /// Sets the points awarded per coin.
    ///
    /// # Panics
    ///
    /// Panics if `value <= 0`.
    pub fn with_coin_value(mut self, value: i64) -> Self {
        assert!(value > 0, "Coin value must be positive, got {}", value);
        self.coin_value = value;
        self
    }

    pub fn with_physics(mut self, config: PhysicsConfig) -> Self {
        self.physics = config;
        self
    }

    pub fn with_input(mut self, config: InputConfig) -> Self {
        self.input = config;
        self
    }

    /// Sets the channel capacity for engine → game communication.
    ///
    /// When the channel is full, [`EngineHandle::send`] blocks the engine
    /// until the game catches up.
    ///
    /// Default: 128
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Channel capacity must be positive");
        self.channel_capacity = capacity;
        self
    }

    /// Caps how many engine events one [`Game::tick`] applies.
    ///
    /// # Panics
    ///
    /// Panics if `max == 0`.
    pub fn with_max_events_per_tick(mut self, max: usize) -> Self {
        assert!(max > 0, "Max events per tick must be positive");
        self.max_events_per_tick = max;
        self
    }

    /// Builds the game and the engine's handle to it.
    pub fn build(self) -> (Game, EngineHandle) {
        info!(
            "Building game (lives: {}, channel: {}, max events/tick: {})",
            self.starting_lives, self.channel_capacity, self.max_events_per_tick
        );

        let (tx, rx) = bounded(self.channel_capacity);
        let bus = Rc::new(EventBus::new());
        let defaults = GameState::with_start(self.starting_lives, self.start_position);

        let game = Game {
            store: Rc::new(GameStateStore::with_defaults(Rc::clone(&bus), defaults)),
            input: InputSystem::new(Rc::clone(&bus), self.input),
            physics: Rc::new(PhysicsSystem::new(Rc::clone(&bus), self.physics)),
            assets: AssetLoader::new(Rc::clone(&bus)),
            collector: EventCollector::new(rx, self.max_events_per_tick),
            coin_value: self.coin_value,
            bus,
        };
        game.attach_listeners();

        (game, EngineHandle::new(tx))
    }
}

impl Default for GameBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Game ================================================================

/// One running game.
///
/// Everything here lives on a single thread; the engine reaches it only
/// through the [`EngineHandle`] returned by [`GameBuilder::build`].
pub struct Game {
    bus: Rc<EventBus>,
    store: Rc<GameStateStore>,
    input: InputSystem,
    physics: Rc<PhysicsSystem>,
    assets: AssetLoader,
    collector: EventCollector,
    coin_value: i64,
}

impl Game {
    //--- Accessors --------------------------------------------------------

    pub fn bus(&self) -> &Rc<EventBus> {
        &self.bus
    }

    pub fn store(&self) -> &Rc<GameStateStore> {
        &self.store
    }

    pub fn input(&self) -> &InputSystem {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputSystem {
        &mut self.input
    }

    pub fn physics(&self) -> &Rc<PhysicsSystem> {
        &self.physics
    }

    pub fn assets(&self) -> &AssetLoader {
        &self.assets
    }

    pub fn assets_mut(&mut self) -> &mut AssetLoader {
        &mut self.assets
    }

    //--- Assets -----------------------------------------------------------

    /// Starts loading `manifest`; the engine reports results through the bridge.
    pub fn load_assets(&mut self, manifest: &AssetManifest) -> Result<Vec<AssetRequest>, AssetError> {
        self.assets.begin(manifest)
    }

    //--- Scene ------------------------------------------------------------

    /// Drops every bus listener, then re-attaches the game's own.
    ///
    /// State is kept; call [`GameStateStore::reset_game`] to start over.
    pub fn restart_scene(&self) {
        info!("Restarting scene");
        self.bus.clear();
        self.attach_listeners();
    }

    //--- Execution --------------------------------------------------------

    /// Applies the engine events queued so far without blocking.
    ///
    /// Returns [`TickControl::Exit`] once the engine sent `Shutdown` or
    /// every [`EngineHandle`] was dropped. Events queued before the
    /// shutdown are still applied.
    pub fn tick(&mut self) -> TickControl {
        let control = self.collector.collect();
        self.apply_collected();
        control
    }

    /// Blocks on the bridge, applying events until the engine shuts down.
    pub fn run(mut self) {
        info!("Game loop started");
        loop {
            let control = self.collector.collect_blocking();
            self.apply_collected();
            if control == TickControl::Exit {
                break;
            }
        }
        info!("Game loop exited");
    }

    //--- Internal Helpers -------------------------------------------------

    fn attach_listeners(&self) {
        PhysicsSystem::attach(&self.physics);
    }

    fn apply_collected(&mut self) {
        for event in self.collector.take_events() {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Frame { delta_ms } => self.frame(delta_ms),
            EngineEvent::Input(raw) => self.input.handle(raw),
            EngineEvent::PlayerMoved { x, y } => self.store.set_player_position(x, y),
            EngineEvent::Overlap { a, b } => self.overlap(a, b),
            EngineEvent::BodyCount(bodies) => self.physics.set_body_count(bodies),
            EngineEvent::AssetLoaded(key) => self.assets.file_loaded(&key),
            EngineEvent::AssetsComplete => self.assets.complete(),
            EngineEvent::AssetFailed(file) => {
                self.assets.failed(file);
            }
            EngineEvent::Shutdown => {}
        }
    }

    fn frame(&mut self, delta_ms: f64) {
        if !self.store.is_paused() {
            self.store.set_game_time(self.store.game_time() + delta_ms);
        }
        self.input.update();
        self.physics.update();
    }

    //--- Collision rules --------------------------------------------------

    fn overlap(&self, a: Body, b: Body) {
        let other = match (a.kind, b.kind) {
            (BodyKind::Player, _) => b,
            (_, BodyKind::Player) => a,
            _ => return,
        };

        match other.kind {
            BodyKind::Coin => self.collect_coin(&other),
            BodyKind::Enemy => {
                debug!("Player hit enemy {}", other.id);
                self.store.lose_life();
            }
            BodyKind::Player | BodyKind::Platform => {}
        }
    }

    fn collect_coin(&self, coin: &Body) {
        if !self.store.collect_item(&coin.id) {
            return;
        }
        self.store.add_score(self.coin_value);
        self.bus.emit(GameEvent::CoinCollected(CoinCollected {
            x: coin.x,
            y: coin.y,
            value: self.coin_value,
        }));
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::AssetFile;
    use crate::core::event_bus::{handler, EventKind};
    use crate::core::input::{InputKey, KeyCode, RawInputEvent};
    use std::cell::RefCell;

    fn record(bus: &EventBus, kinds: &[EventKind]) -> Rc<RefCell<Vec<GameEvent>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for &kind in kinds {
            let sink = Rc::clone(&log);
            bus.on(kind, handler(move |e| sink.borrow_mut().push(e.clone())));
        }
        log
    }

    fn player() -> Body {
        Body::new(BodyKind::Player, "player", 100.0, 440.0)
    }

    //=====================================================================
    // GameBuilder Tests
    //=====================================================================

    #[test]
    fn builder_defaults() {
        let builder = GameBuilder::new();
        assert_eq!(builder.starting_lives, 3);
        assert_eq!(builder.coin_value, 1);
        assert_eq!(builder.channel_capacity, 128);
        assert_eq!(builder.max_events_per_tick, 100);
    }

    #[test]
    #[should_panic(expected = "Starting lives must be positive")]
    fn builder_rejects_zero_lives() {
        GameBuilder::new().with_starting_lives(0);
    }

    #[test]
    #[should_panic(expected = "Coin value must be positive")]
    fn builder_rejects_negative_coin_value() {
        GameBuilder::new().with_coin_value(-5);
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn builder_rejects_zero_capacity() {
        GameBuilder::new().with_channel_capacity(0);
    }

    #[test]
    fn build_applies_start_config() {
        let (game, _engine) = GameBuilder::new()
            .with_starting_lives(5)
            .with_start_position(10.0, 20.0)
            .build();

        assert_eq!(game.store().lives(), 5);
        assert_eq!(game.store().player_position(), Position::new(10.0, 20.0));

        game.store().lose_life();
        game.store().reset_game();
        assert_eq!(game.store().lives(), 5);
    }

    //=====================================================================
    // Tick Tests
    //=====================================================================

    #[test]
    fn frame_advances_time_and_updates_systems() {
        let (mut game, engine) = GameBuilder::new().build();
        let log = record(
            game.bus(),
            &[EventKind::GameTimeChanged, EventKind::PhysicsUpdate],
        );

        engine.frame(16.0).unwrap();
        engine.frame(17.0).unwrap();
        assert_eq!(game.tick(), TickControl::Continue);

        assert_eq!(game.store().game_time(), 33.0);
        assert_eq!(log.borrow().len(), 4);
    }

    #[test]
    fn paused_game_does_not_advance_time() {
        let (mut game, engine) = GameBuilder::new().build();
        game.store().pause();

        engine.frame(16.0).unwrap();
        game.tick();

        assert_eq!(game.store().game_time(), 0.0);
        assert!(!game.physics().is_enabled());
    }

    #[test]
    fn input_is_resolved_on_frame() {
        let (mut game, engine) = GameBuilder::new().build();
        let log = record(game.bus(), &[EventKind::KeyChanged]);

        engine.input(RawInputEvent::KeyDown(KeyCode::KeyA)).unwrap();
        engine.frame(16.0).unwrap();
        game.tick();

        assert!(game.input().is_pressed(InputKey::Left));
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn player_moved_updates_store() {
        let (mut game, engine) = GameBuilder::new().build();
        engine
            .send(EngineEvent::PlayerMoved { x: 150.0, y: 300.0 })
            .unwrap();
        game.tick();
        assert_eq!(game.store().player_position(), Position::new(150.0, 300.0));
    }

    #[test]
    fn body_count_reaches_physics() {
        let (mut game, engine) = GameBuilder::new().build();
        engine.send(EngineEvent::BodyCount(12)).unwrap();
        game.tick();
        assert_eq!(game.physics().body_count(), 12);
    }

    #[test]
    fn shutdown_exits_tick() {
        let (mut game, engine) = GameBuilder::new().build();
        engine.frame(16.0).unwrap();
        engine.shutdown().unwrap();

        assert_eq!(game.tick(), TickControl::Exit);
        assert_eq!(game.store().game_time(), 16.0);
    }

    #[test]
    fn dropped_handle_exits_tick() {
        let (mut game, engine) = GameBuilder::new().build();
        drop(engine);
        assert_eq!(game.tick(), TickControl::Exit);
    }

    #[test]
    fn run_returns_on_shutdown() {
        let (game, engine) = GameBuilder::new().build();
        engine.frame(16.0).unwrap();
        engine.shutdown().unwrap();
        game.run();
    }

    #[test]
    fn handle_errors_after_game_dropped() {
        let (game, engine) = GameBuilder::new().build();
        drop(game);
        assert!(engine.frame(16.0).is_err());
    }

    #[test]
    fn tick_is_bounded() {
        let (mut game, engine) = GameBuilder::new().with_max_events_per_tick(1).build();
        engine.frame(10.0).unwrap();
        engine.frame(10.0).unwrap();

        game.tick();
        assert_eq!(game.store().game_time(), 10.0);
        game.tick();
        assert_eq!(game.store().game_time(), 20.0);
    }

    //=====================================================================
    // Collision Tests
    //=====================================================================

    #[test]
    fn coin_overlap_scores_once() {
        let (mut game, engine) = GameBuilder::new().with_coin_value(10).build();
        let log = record(game.bus(), &[EventKind::CoinCollected]);

        let coin = Body::new(BodyKind::Coin, "coin-1", 200.0, 400.0);
        for _ in 0..2 {
            engine
                .send(EngineEvent::Overlap {
                    a: player(),
                    b: coin.clone(),
                })
                .unwrap();
        }
        game.tick();

        assert_eq!(game.store().score(), 10);
        assert_eq!(game.store().collected_items(), vec!["coin-1"]);
        assert_eq!(
            *log.borrow(),
            vec![GameEvent::CoinCollected(CoinCollected {
                x: 200.0,
                y: 400.0,
                value: 10
            })]
        );
    }

    #[test]
    fn overlap_order_does_not_matter() {
        let (mut game, engine) = GameBuilder::new().build();
        engine
            .send(EngineEvent::Overlap {
                a: Body::new(BodyKind::Coin, "coin-2", 0.0, 0.0),
                b: player(),
            })
            .unwrap();
        game.tick();
        assert_eq!(game.store().score(), 1);
    }

    #[test]
    fn enemy_overlap_loses_life() {
        let (mut game, engine) = GameBuilder::new().with_starting_lives(1).build();
        let log = record(game.bus(), &[EventKind::GameOver]);

        engine
            .send(EngineEvent::Overlap {
                a: player(),
                b: Body::new(BodyKind::Enemy, "enemy-1", 0.0, 0.0),
            })
            .unwrap();
        game.tick();

        assert_eq!(game.store().lives(), 0);
        assert_eq!(*log.borrow(), vec![GameEvent::GameOver]);
    }

    #[test]
    fn overlaps_without_player_are_ignored() {
        let (mut game, engine) = GameBuilder::new().build();
        engine
            .send(EngineEvent::Overlap {
                a: Body::new(BodyKind::Enemy, "enemy-1", 0.0, 0.0),
                b: Body::new(BodyKind::Coin, "coin-1", 0.0, 0.0),
            })
            .unwrap();
        engine
            .send(EngineEvent::Overlap {
                a: player(),
                b: Body::new(BodyKind::Platform, "ground", 0.0, 0.0),
            })
            .unwrap();
        game.tick();

        assert_eq!(game.store().score(), 0);
        assert_eq!(game.store().lives(), 3);
        assert!(game.store().collected_items().is_empty());
    }

    //=====================================================================
    // Asset Tests
    //=====================================================================

    #[test]
    fn asset_events_drive_loader() {
        let (mut game, engine) = GameBuilder::new().build();
        let log = record(game.bus(), &[EventKind::AssetsLoaded]);

        let requests = game.load_assets(&AssetManifest::game_assets()).unwrap();
        for request in &requests {
            engine
                .send(EngineEvent::AssetLoaded(request.key.clone()))
                .unwrap();
        }
        engine.send(EngineEvent::AssetsComplete).unwrap();
        game.tick();

        assert!(game.assets().is_loaded("dude"));
        assert_eq!(game.assets().progress().percentage, 100);
        assert_eq!(*log.borrow(), vec![GameEvent::AssetsLoaded]);
    }

    #[test]
    fn asset_failure_is_published() {
        let (mut game, engine) = GameBuilder::new().build();
        let log = record(game.bus(), &[EventKind::AssetLoadingError]);

        game.load_assets(&AssetManifest::game_assets()).unwrap();
        engine
            .send(EngineEvent::AssetFailed(AssetFile {
                key: "logo".into(),
                url: "assets/logo.png".into(),
            }))
            .unwrap();
        game.tick();

        assert_eq!(log.borrow().len(), 1);
        assert!(!game.assets().is_loading());
    }

    //=====================================================================
    // Scene Tests
    //=====================================================================

    #[test]
    fn pause_reaches_physics_within_dispatch() {
        let (game, _engine) = GameBuilder::new().build();
        let order = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&order);
        game.bus().on(
            EventKind::PhysicsPaused,
            handler(move |_| sink.borrow_mut().push("physicsPaused")),
        );
        let sink = Rc::clone(&order);
        game.bus().on(
            EventKind::GamePaused,
            handler(move |_| sink.borrow_mut().push("gamePaused")),
        );

        game.store().pause();

        // Physics registered first, so its nested emit runs before the
        // later gamePaused listener.
        assert_eq!(*order.borrow(), vec!["physicsPaused", "gamePaused"]);
    }

    #[test]
    fn restart_scene_drops_user_listeners_but_keeps_physics() {
        let (game, _engine) = GameBuilder::new().build();
        let log = record(game.bus(), &[EventKind::ScoreChanged]);

        game.restart_scene();
        game.store().add_score(5);
        assert!(log.borrow().is_empty());

        game.store().pause();
        assert!(!game.physics().is_enabled());
        game.store().resume();
        assert!(game.physics().is_enabled());
    }
}
