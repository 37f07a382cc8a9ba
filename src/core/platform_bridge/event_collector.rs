//=========================================================================
// Event Collector
//=========================================================================
//
// Game-side drain of the engine bridge with bounded polling and shutdown
// detection.
//
// Architecture:
//   Receiver<EngineEvent> → collect() → events → TickControl
//
// Bounded draining keeps one tick from starving the caller when the
// engine floods the channel; leftovers are picked up next tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{Receiver, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::EngineEvent;

//=== TickControl =========================================================

/// Update loop control signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickControl {
    Continue,
    Exit,
}

//=== EventCollector ======================================================

/// Collects engine events for one tick.
pub(crate) struct EventCollector {
    receiver: Receiver<EngineEvent>,
    max_events: usize,
    events: Vec<EngineEvent>,
}

impl EventCollector {
    pub(crate) fn new(receiver: Receiver<EngineEvent>, max_events: usize) -> Self {
        Self {
            receiver,
            max_events,
            events: Vec::with_capacity(max_events.min(64)),
        }
    }

    /// Drains pending events without blocking.
    ///
    /// Returns `Exit` on `Shutdown` or when every sender is gone. Events
    /// received before the shutdown stay collected.
    pub(crate) fn collect(&mut self) -> TickControl {
        self.events.clear();
        self.drain()
    }

    /// Blocks for the first event, then drains like [`collect`](Self::collect).
    pub(crate) fn collect_blocking(&mut self) -> TickControl {
        self.events.clear();
        match self.receiver.recv() {
            Ok(event) => {
                if self.push(event) == TickControl::Exit {
                    return TickControl::Exit;
                }
                self.drain()
            }
            Err(_) => TickControl::Exit,
        }
    }

    /// Takes the collected events, leaving an empty buffer.
    pub(crate) fn take_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.events)
    }

    //--- Internal Helpers -------------------------------------------------

    fn drain(&mut self) -> TickControl {
        while self.events.len() < self.max_events {
            match self.receiver.try_recv() {
                Ok(event) => {
                    if self.push(event) == TickControl::Exit {
                        return TickControl::Exit;
                    }
                }
                Err(TryRecvError::Disconnected) => return TickControl::Exit,
                Err(TryRecvError::Empty) => return TickControl::Continue,
            }
        }

        warn!(
            "Engine event backlog: drained {} events this tick",
            self.events.len()
        );
        TickControl::Continue
    }

    fn push(&mut self, event: EngineEvent) -> TickControl {
        match event {
            EngineEvent::Shutdown => TickControl::Exit,
            event => {
                self.events.push(event);
                TickControl::Continue
            }
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn collect_handles_empty_queue() {
        let (_tx, rx) = unbounded::<EngineEvent>();
        let mut collector = EventCollector::new(rx, 8);

        assert_eq!(collector.collect(), TickControl::Continue);
        assert!(collector.take_events().is_empty());
    }

    #[test]
    fn collect_preserves_order() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 8);

        tx.send(EngineEvent::BodyCount(3)).unwrap();
        tx.send(EngineEvent::Frame { delta_ms: 16.0 }).unwrap();

        assert_eq!(collector.collect(), TickControl::Continue);
        assert_eq!(
            collector.take_events(),
            vec![
                EngineEvent::BodyCount(3),
                EngineEvent::Frame { delta_ms: 16.0 }
            ]
        );
    }

    #[test]
    fn collect_is_bounded() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 2);

        for n in 0..5 {
            tx.send(EngineEvent::BodyCount(n)).unwrap();
        }

        collector.collect();
        assert_eq!(collector.take_events().len(), 2);
        collector.collect();
        assert_eq!(
            collector.take_events(),
            vec![EngineEvent::BodyCount(2), EngineEvent::BodyCount(3)]
        );
    }

    #[test]
    fn shutdown_exits_and_keeps_prior_events() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 8);

        tx.send(EngineEvent::AssetsComplete).unwrap();
        tx.send(EngineEvent::Shutdown).unwrap();

        assert_eq!(collector.collect(), TickControl::Exit);
        assert_eq!(collector.take_events(), vec![EngineEvent::AssetsComplete]);
    }

    #[test]
    fn collect_returns_exit_on_disconnect() {
        let (tx, rx) = unbounded::<EngineEvent>();
        let mut collector = EventCollector::new(rx, 8);
        drop(tx);

        assert_eq!(collector.collect(), TickControl::Exit);
    }

    #[test]
    fn collect_blocking_exits_on_disconnect() {
        let (tx, rx) = unbounded::<EngineEvent>();
        let mut collector = EventCollector::new(rx, 8);
        drop(tx);

        assert_eq!(collector.collect_blocking(), TickControl::Exit);
    }

    #[test]
    fn collect_blocking_drains_after_first_event() {
        let (tx, rx) = unbounded();
        let mut collector = EventCollector::new(rx, 8);

        tx.send(EngineEvent::BodyCount(1)).unwrap();
        tx.send(EngineEvent::BodyCount(2)).unwrap();

        assert_eq!(collector.collect_blocking(), TickControl::Continue);
        assert_eq!(collector.take_events().len(), 2);
    }
}
