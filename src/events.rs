//! Interrupt-driven event queue.
//!
//! Events are produced by:
//! - the periodic `esp_timer` callback (one [`ControlEvent::Tick`] per period)
//! - the UART receive task (one [`ControlEvent::ByteReceived`] per byte)
//!
//! Events are consumed by the foreground loop, which hands them to the
//! [`ControlService`](crate::app::service::ControlService) one at a time.
//! Handlers therefore never interleave their read-modify-write on the
//! controller state.
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │ Timer cb    │────▶│  EventQueue  │────▶│  Main Loop   │
//! │ UART RX     │────▶│  (bounded)   │     │  (consumer)  │
//! └─────────────┘     └──────────────┘     └──────────────┘
//! ```

use core::sync::atomic::{AtomicU32, Ordering};

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;

/// Maximum number of pending events.
/// The UART task waits for room rather than dropping bytes, so only timer
/// ticks are ever counted as dropped.
pub const EVENT_QUEUE_CAP: usize = 32;

/// Events delivered to the control task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Periodic sampling timer fired.
    Tick,
    /// One byte arrived on the operator serial link.
    ByteReceived(u8),
}

/// Bounded multi-producer, single-consumer queue.
///
/// Producers call [`push`](Self::push) from timer or ISR context; it never
/// blocks. The single consumer is the foreground loop.
pub struct EventQueue {
    channel: Channel<CriticalSectionRawMutex, ControlEvent, EVENT_QUEUE_CAP>,
    dropped: AtomicU32,
}

impl EventQueue {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
            dropped: AtomicU32::new(0),
        }
    }

    /// Push an event into the queue.
    /// Safe to call from ISR context.
    /// Returns `false` if the queue is full (event dropped).
    pub fn push(&self, event: ControlEvent) -> bool {
        if self.try_push(event).is_ok() {
            true
        } else {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            false
        }
    }

    /// Push without counting a drop. A full queue hands the event back so
    /// the producer can wait and retry.
    pub fn try_push(&self, event: ControlEvent) -> Result<(), ControlEvent> {
        self.channel.try_send(event).map_err(|e| match e {
            embassy_sync::channel::TrySendError::Full(event) => event,
        })
    }

    /// Pop the next event. Returns `None` if the queue is empty.
    pub fn pop(&self) -> Option<ControlEvent> {
        self.channel.try_receive().ok()
    }

    /// Drain all pending events into a callback, in FIFO order.
    pub fn drain(&self, mut handler: impl FnMut(ControlEvent)) {
        while let Some(event) = self.pop() {
            handler(event);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.channel.len()
    }

    /// Events dropped because the queue was full, since boot.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// The queue shared by the timer callback, the UART task and `main`.
pub static EVENTS: EventQueue = EventQueue::new();
