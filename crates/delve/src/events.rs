//! # DELVE Event System
//!
//! Session-to-presentation notifications.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌──────────────┐
//! │ GameSession │─────>│   Event     │─────>│ Presentation │
//! │  (tick)     │      │   Channel   │      │ (sound, fx)  │
//! └─────────────┘      └─────────────┘      └──────────────┘
//! ```
//!
//! Events flow one way, FROM the simulation TO whatever draws or plays
//! sounds. The channel is bounded; a tick never blocks on a slow consumer,
//! it drops the event instead.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use delve_world::{Tile, TileCoord, TileKind};
use tracing::warn;

/// Default number of events in flight.
pub const DEFAULT_EVENT_CAPACITY: usize = 1024;

/// Things the presentation layer may want to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// The player dug a tile out.
    TileDug {
        /// Grid position.
        coord: TileCoord,
        /// What was removed.
        tile: Tile,
    },

    /// The player placed a tile.
    TilePlaced {
        /// Grid position.
        coord: TileCoord,
        /// What was placed.
        kind: TileKind,
    },

    /// Fly mode was switched.
    FlyModeToggled {
        /// New state.
        enabled: bool,
    },
}

/// Bounded channel pairing one producer side with one consumer side.
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
}

impl EventBus {
    /// Creates a new event bus.
    ///
    /// # Arguments
    ///
    /// * `capacity` - Maximum events in flight before new ones are dropped.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity.max(1));
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> EventReceiver {
        EventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a sender and receiver over a fresh channel.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (EventSender, EventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_EVENT_CAPACITY)
    }
}

/// Handle for sending events.
#[derive(Clone)]
pub struct EventSender {
    sender: Sender<GameEvent>,
}

impl EventSender {
    /// Sends an event without blocking.
    ///
    /// Returns `false` if the event was dropped because the channel is full
    /// or every receiver is gone.
    #[inline]
    pub fn send(&self, event: GameEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(?event, "event channel full, dropping event");
                false
            }
            Err(TrySendError::Disconnected(_)) => false,
        }
    }
}

/// Handle for receiving events.
#[derive(Clone)]
pub struct EventReceiver {
    receiver: Receiver<GameEvent>,
}

impl EventReceiver {
    /// Receives all pending events without blocking.
    #[inline]
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event, if any is pending.
    #[inline]
    pub fn try_recv(&self) -> Option<GameEvent> {
        self.receiver.try_recv().ok()
    }

    /// Number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Whether any event is pending.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
