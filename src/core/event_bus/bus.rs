//=========================================================================
// Event Bus
//=========================================================================
//
// Named-channel publish/subscribe registry for game events.
//
// Architecture:
//   Listeners → on(kind, handler) → HashMap<EventKind, HandlerList>
//                                          ↓
//   Producers → emit(event) ─────→ snapshot → handler(&event) (in order)
//
// Dispatch is synchronous and depth-first: a handler that emits runs the
// nested dispatch to completion before the outer dispatch resumes. Each
// emit iterates a snapshot taken when it started, so `on`/`off`/`clear`
// called from inside a handler apply from the next emit onwards.
//
// Panicking handlers are caught and logged; the remaining handlers still
// receive the event.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::rc::Rc;

use crossbeam_channel::{bounded, Receiver, TrySendError};
use log::{debug, error, trace};

//=== Internal Dependencies ===============================================

use super::handler_list::HandlerList;
use super::{EventKind, GameEvent};

//=== Public API ==========================================================

/// Shared handle to an event listener.
///
/// Identity is the `Rc` allocation: clone the handle to register the same
/// listener twice or to unregister it later with [`EventBus::off`].
pub type Handler = Rc<dyn Fn(&GameEvent)>;

/// Wraps a closure into a [`Handler`].
pub fn handler<F>(f: F) -> Handler
where
    F: Fn(&GameEvent) + 'static,
{
    Rc::new(f)
}

/// Outcome of a single [`EventBus::emit`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dispatch {
    /// Handlers that returned normally.
    pub invoked: usize,
    /// Handlers that panicked and were skipped over.
    pub panicked: usize,
}

impl Dispatch {
    /// Total handlers the event was delivered to.
    pub fn delivered(&self) -> usize {
        self.invoked + self.panicked
    }
}

//=========================================================================

/// Synchronous publish/subscribe registry keyed by [`EventKind`].
///
/// All operations take `&self` so the bus can be shared through an `Rc`
/// and used from inside its own handlers.
pub struct EventBus {
    registry: RefCell<HashMap<EventKind, HandlerList>>,
}

impl EventBus {
    /// Creates a bus with no registered events.
    pub fn new() -> Self {
        Self {
            registry: RefCell::new(HashMap::new()),
        }
    }

    //--- Subscription -----------------------------------------------------

    /// Registers `handler` for `kind`, after any existing handlers.
    ///
    /// Registering the same handler twice delivers each event to it twice.
    pub fn on(&self, kind: EventKind, handler: Handler) {
        self.registry
            .borrow_mut()
            .entry(kind)
            .or_insert_with(HandlerList::new)
            .push(handler);
        trace!("Listener added for '{}'", kind);
    }

    /// Removes the first registration of `handler` for `kind`.
    ///
    /// Returns false (and does nothing) if the kind is unknown or the
    /// handler is not registered for it.
    pub fn off(&self, kind: EventKind, handler: &Handler) -> bool {
        let removed = self
            .registry
            .borrow_mut()
            .get_mut(&kind)
            .map(|list| list.remove_first(handler))
            .unwrap_or(false);

        if removed {
            trace!("Listener removed from '{}'", kind);
        }
        removed
    }

    /// Subscribes a forwarding listener that sends every `kind` event into
    /// a channel.
    ///
    /// Lets consumers outside the game thread (HUD, audio) drain events at
    /// their own pace. The channel holds at most `capacity` undrained
    /// events; further events are dropped until the receiver catches up, so
    /// emit never blocks. The returned handler can be passed to
    /// [`EventBus::off`] to stop forwarding; sends to a dropped receiver are
    /// ignored.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn subscribe_channel(
        &self,
        kind: EventKind,
        capacity: usize,
    ) -> (Handler, Receiver<GameEvent>) {
        assert!(capacity > 0, "Channel capacity must be positive");
        let (tx, rx) = bounded(capacity);
        let forward = handler(move |event: &GameEvent| match tx.try_send(event.clone()) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                trace!("Channel for '{}' full, dropping event", event.name());
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!("Channel receiver for '{}' dropped", event.name());
            }
        });
        self.on(kind, forward.clone());
        (forward, rx)
    }

    //--- Dispatch ---------------------------------------------------------

    /// Delivers `event` to every handler registered for its kind.
    ///
    /// Handlers run synchronously in registration order. A handler that
    /// panics is logged and skipped; delivery continues with the next one.
    /// Emitting an event nobody listens to is a no-op.
    ///
    /// # Re-entrancy
    ///
    /// Handlers may call back into the bus. A nested `emit` is delivered
    /// immediately and completely before this call moves on to its next
    /// handler.
    pub fn emit(&self, event: GameEvent) -> Dispatch {
        let kind = event.kind();

        let snapshot = {
            let registry = self.registry.borrow();
            match registry.get(&kind) {
                Some(list) if !list.is_empty() => list.snapshot(),
                _ => {
                    trace!("No listeners for '{}'", kind);
                    return Dispatch::default();
                }
            }
        };

        let mut dispatch = Dispatch::default();
        for handler in snapshot {
            match panic::catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                Ok(()) => dispatch.invoked += 1,
                Err(payload) => {
                    error!(
                        "Listener for '{}' panicked: {}",
                        kind,
                        panic_message(payload.as_ref())
                    );
                    dispatch.panicked += 1;
                }
            }
        }

        dispatch
    }

    //--- Query API --------------------------------------------------------

    /// Returns true if at least one handler is registered for `kind`.
    pub fn has_listeners(&self, kind: EventKind) -> bool {
        self.listener_count(kind) > 0
    }

    /// Number of registrations for `kind` (duplicates counted).
    pub fn listener_count(&self, kind: EventKind) -> usize {
        self.registry
            .borrow()
            .get(&kind)
            .map(HandlerList::len)
            .unwrap_or(0)
    }

    //--- Teardown ---------------------------------------------------------

    /// Removes every event and handler.
    ///
    /// Used at scene teardown so listeners from a finished scene do not
    /// accumulate across restarts.
    pub fn clear(&self) {
        let mut registry = self.registry.borrow_mut();
        debug!("Clearing event bus ({} event kinds)", registry.len());
        registry.clear();
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}

//=========================================================================
// Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    /// Handler that appends `tag` to a shared log on every delivery.
    fn recorder(log: &Rc<RefCell<Vec<&'static str>>>, tag: &'static str) -> Handler {
        let log = Rc::clone(log);
        handler(move |_| log.borrow_mut().push(tag))
    }

    #[test]
    fn new_bus_has_no_listeners() {
        let bus = EventBus::new();
        assert!(!bus.has_listeners(EventKind::ScoreChanged));
        assert_eq!(bus.listener_count(EventKind::ScoreChanged), 0);
    }

    #[test]
    fn emit_without_listeners_is_noop() {
        let bus = EventBus::new();
        assert_eq!(bus.emit(GameEvent::GameOver), Dispatch::default());
    }

    #[test]
    fn emit_delivers_payload() {
        let bus = EventBus::new();
        let seen = Rc::new(Cell::new(0));
        let sink = Rc::clone(&seen);
        bus.on(
            EventKind::ScoreChanged,
            handler(move |event| {
                if let GameEvent::ScoreChanged(score) = event {
                    sink.set(*score);
                }
            }),
        );

        bus.emit(GameEvent::ScoreChanged(42));
        assert_eq!(seen.get(), 42);
    }

    #[test]
    fn emit_only_reaches_matching_kind() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.on(EventKind::GamePaused, recorder(&log, "paused"));
        bus.on(EventKind::GameResumed, recorder(&log, "resumed"));

        bus.emit(GameEvent::GamePaused);
        assert_eq!(*log.borrow(), vec!["paused"]);
    }

    #[test]
    fn handlers_run_in_registration_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.on(EventKind::GameOver, recorder(&log, "a"));
        bus.on(EventKind::GameOver, recorder(&log, "b"));
        bus.on(EventKind::GameOver, recorder(&log, "c"));

        bus.emit(GameEvent::GameOver);
        assert_eq!(*log.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn duplicate_registration_is_invoked_twice_in_order() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let h = recorder(&log, "h");
        bus.on(EventKind::GameOver, h.clone());
        bus.on(EventKind::GameOver, recorder(&log, "other"));
        bus.on(EventKind::GameOver, h.clone());

        let dispatch = bus.emit(GameEvent::GameOver);
        assert_eq!(dispatch.invoked, 3);
        assert_eq!(*log.borrow(), vec!["h", "other", "h"]);
    }

    #[test]
    fn off_removes_single_registration() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        let h = handler(move |_| sink.set(sink.get() + 1));
        bus.on(EventKind::GameOver, h.clone());
        bus.on(EventKind::GameOver, h.clone());

        assert!(bus.off(EventKind::GameOver, &h));
        bus.emit(GameEvent::GameOver);
        assert_eq!(count.get(), 1);
        assert!(bus.has_listeners(EventKind::GameOver));
    }

    #[test]
    fn off_unknown_is_noop() {
        let bus = EventBus::new();
        let h = handler(|_| {});
        assert!(!bus.off(EventKind::GameOver, &h));

        bus.on(EventKind::GameOver, handler(|_| {}));
        assert!(!bus.off(EventKind::GameOver, &h));
        assert_eq!(bus.listener_count(EventKind::GameOver), 1);
    }

    #[test]
    fn kind_with_all_listeners_removed_has_no_listeners() {
        let bus = EventBus::new();
        let h = handler(|_| {});
        bus.on(EventKind::GameReset, h.clone());
        bus.off(EventKind::GameReset, &h);

        assert!(!bus.has_listeners(EventKind::GameReset));
        assert_eq!(bus.emit(GameEvent::GameReset).delivered(), 0);
    }

    #[test]
    fn clear_removes_everything() {
        let bus = EventBus::new();
        let count = Rc::new(Cell::new(0));
        let sink = Rc::clone(&count);
        bus.on(EventKind::GameOver, handler(move |_| sink.set(sink.get() + 1)));
        bus.on(EventKind::GamePaused, handler(|_| {}));

        bus.clear();
        bus.emit(GameEvent::GameOver);

        assert_eq!(count.get(), 0);
        assert!(!bus.has_listeners(EventKind::GameOver));
        assert!(!bus.has_listeners(EventKind::GamePaused));
    }

    #[test]
    fn panicking_handler_does_not_block_later_handlers() {
        let bus = EventBus::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        bus.on(EventKind::GameOver, recorder(&log, "before"));
        bus.on(EventKind::GameOver, handler(|_| panic!("listener failure")));
        bus.on(EventKind::GameOver, recorder(&log, "after"));

        let dispatch = bus.emit(GameEvent::GameOver);
        assert_eq!(dispatch, Dispatch { invoked: 2, panicked: 1 });
        assert_eq!(*log.borrow(), vec!["before", "after"]);
    }

    #[test]
    fn nested_emit_runs_depth_first() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let inner_bus = Rc::clone(&bus);
        let outer_log = Rc::clone(&log);
        bus.on(
            EventKind::GamePaused,
            handler(move |_| {
                outer_log.borrow_mut().push("outer-start");
                inner_bus.emit(GameEvent::PhysicsPaused);
                outer_log.borrow_mut().push("outer-end");
            }),
        );
        bus.on(EventKind::GamePaused, recorder(&log, "second"));
        bus.on(EventKind::PhysicsPaused, recorder(&log, "nested"));

        bus.emit(GameEvent::GamePaused);
        assert_eq!(
            *log.borrow(),
            vec!["outer-start", "nested", "outer-end", "second"]
        );
    }

    #[test]
    fn handler_registered_during_emit_fires_next_time() {
        let bus = Rc::new(EventBus::new());
        let count = Rc::new(Cell::new(0));

        let registering_bus = Rc::clone(&bus);
        let sink = Rc::clone(&count);
        bus.on(
            EventKind::GameOver,
            handler(move |_| {
                let sink = Rc::clone(&sink);
                registering_bus.on(
                    EventKind::GameOver,
                    handler(move |_| sink.set(sink.get() + 1)),
                );
            }),
        );

        bus.emit(GameEvent::GameOver);
        assert_eq!(count.get(), 0);

        bus.emit(GameEvent::GameOver);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn clear_during_emit_finishes_current_dispatch() {
        let bus = Rc::new(EventBus::new());
        let log = Rc::new(RefCell::new(Vec::new()));

        let clearing_bus = Rc::clone(&bus);
        bus.on(EventKind::GameOver, handler(move |_| clearing_bus.clear()));
        bus.on(EventKind::GameOver, recorder(&log, "still-delivered"));

        bus.emit(GameEvent::GameOver);
        assert_eq!(*log.borrow(), vec!["still-delivered"]);
        assert!(!bus.has_listeners(EventKind::GameOver));
    }

    #[test]
    fn subscribe_channel_forwards_events() {
        let bus = EventBus::new();
        let (forward, rx) = bus.subscribe_channel(EventKind::LivesChanged, 8);

        bus.emit(GameEvent::LivesChanged(2));
        bus.emit(GameEvent::LivesChanged(1));
        assert_eq!(rx.try_recv(), Ok(GameEvent::LivesChanged(2)));
        assert_eq!(rx.try_recv(), Ok(GameEvent::LivesChanged(1)));

        bus.off(EventKind::LivesChanged, &forward);
        bus.emit(GameEvent::LivesChanged(0));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn subscribe_channel_survives_dropped_receiver() {
        let bus = EventBus::new();
        let (_forward, rx) = bus.subscribe_channel(EventKind::GameOver, 8);
        drop(rx);

        assert_eq!(bus.emit(GameEvent::GameOver).panicked, 0);
    }

    #[test]
    fn subscribe_channel_drops_events_past_capacity() {
        let bus = EventBus::new();
        let (_forward, rx) = bus.subscribe_channel(EventKind::ScoreChanged, 2);

        for score in 1..=5 {
            assert_eq!(bus.emit(GameEvent::ScoreChanged(score)).panicked, 0);
        }
        assert_eq!(rx.len(), 2);
        assert_eq!(rx.try_recv(), Ok(GameEvent::ScoreChanged(1)));
        assert_eq!(rx.try_recv(), Ok(GameEvent::ScoreChanged(2)));
        assert!(rx.try_recv().is_err());

        // Draining frees room for later events.
        bus.emit(GameEvent::ScoreChanged(6));
        assert_eq!(rx.try_recv(), Ok(GameEvent::ScoreChanged(6)));
    }

    #[test]
    #[should_panic(expected = "Channel capacity must be positive")]
    fn subscribe_channel_rejects_zero_capacity() {
        EventBus::new().subscribe_channel(EventKind::GameOver, 0);
    }
}
