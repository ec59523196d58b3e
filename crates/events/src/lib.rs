#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Event system for async communication in haul
//!
//! Transfers and queues report their primary outcome through typed event
//! streams owned by `haul-download`. This crate carries everything else: a
//! diagnostic side channel (lifecycle notices, cleanup failures, debug
//! messages) that is mirrored into `tracing`, and the sampling primitives
//! used to turn raw byte counts into throttled progress with a speed.

pub mod events;
pub mod progress;

pub use events::{AppEvent, GeneralEvent, QueueLifecycle, TransferLifecycle};
pub use progress::{ProgressThrottle, QueueProgress, SpeedWindow, TransferProgress};

use tokio::sync::mpsc::UnboundedSender;

/// Sender half of the diagnostic channel
pub type EventSender = UnboundedSender<AppEvent>;

/// Receiver half of the diagnostic channel
pub type EventReceiver = tokio::sync::mpsc::UnboundedReceiver<AppEvent>;

/// Create a new diagnostic event channel
#[must_use]
pub fn channel() -> (EventSender, EventReceiver) {
    tokio::sync::mpsc::unbounded_channel()
}

/// The unified trait for emitting diagnostic events
///
/// Implemented for the raw `EventSender` and for anything that may or may
/// not hold one. Every emitted event is logged through `tracing` first, so a
/// missing or dropped receiver never loses the information entirely.
pub trait EventEmitter {
    /// Get the event sender for this emitter
    fn event_sender(&self) -> Option<&EventSender>;

    /// Emit an event through this emitter
    fn emit(&self, event: AppEvent) {
        event.trace();
        if let Some(sender) = self.event_sender() {
            // Ignore send errors - if receiver is dropped, we just continue
            let _ = sender.send(event);
        }
    }

    /// Emit a debug log event
    fn emit_debug(&self, message: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::debug(message)));
    }

    /// Emit a warning event with context
    fn emit_warning_with_context(&self, message: impl Into<String>, context: impl Into<String>) {
        self.emit(AppEvent::General(GeneralEvent::warning_with_context(
            message, context,
        )));
    }
}

impl EventEmitter for EventSender {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(self)
    }
}

impl EventEmitter for Option<EventSender> {
    fn event_sender(&self) -> Option<&EventSender> {
        self.as_ref()
    }
}
