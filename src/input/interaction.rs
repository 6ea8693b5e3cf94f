//! Channel carrying user-interaction signals from the renderer's camera
//! controls to the camera tour.
//!
//! Renderer callbacks hold an [`InteractionSender`] (cheap to clone, usable
//! from any thread). The session drains the [`InteractionReceiver`] once
//! per frame on the frame thread, so the tour state machine only ever sees
//! interactions between frames.

use std::sync::mpsc;

use web_time::Instant;

/// The user moved the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionEvent {
    /// When the interaction happened.
    pub at: Instant,
}

/// Sending half, handed to whatever reports camera-control changes.
#[derive(Debug, Clone)]
pub struct InteractionSender {
    tx: mpsc::Sender<InteractionEvent>,
}

impl InteractionSender {
    /// Report a user interaction at `at`. Returns `false` once the session
    /// is gone.
    pub fn notify(&self, at: Instant) -> bool {
        self.tx.send(InteractionEvent { at }).is_ok()
    }
}

/// Receiving half, owned by the session.
#[derive(Debug)]
pub struct InteractionReceiver {
    rx: mpsc::Receiver<InteractionEvent>,
}

impl InteractionReceiver {
    /// Everything queued so far, oldest first (non-blocking).
    pub fn drain(&self) -> impl Iterator<Item = InteractionEvent> + '_ {
        self.rx.try_iter()
    }

    /// Discard everything queued so far. Returns how many were dropped.
    pub fn discard_pending(&self) -> usize {
        self.rx.try_iter().count()
    }
}

/// New connected sender/receiver pair.
#[must_use]
pub fn channel() -> (InteractionSender, InteractionReceiver) {
    let (tx, rx) = mpsc::channel();
    (InteractionSender { tx }, InteractionReceiver { rx })
}

#[cfg(test)]
mod tests {
    use web_time::Duration;

    use super::*;

    #[test]
    fn events_arrive_in_order() {
        let (tx, rx) = channel();
        let t0 = Instant::now();
        let other = tx.clone();
        assert!(tx.notify(t0));
        assert!(other.notify(t0 + Duration::from_millis(5)));
        let events: Vec<_> = rx.drain().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].at, t0);
        assert!(rx.drain().next().is_none());
    }

    #[test]
    fn discard_pending_empties_queue() {
        let (tx, rx) = channel();
        let now = Instant::now();
        assert!(tx.notify(now));
        assert!(tx.notify(now));
        assert_eq!(rx.discard_pending(), 2);
        assert_eq!(rx.drain().count(), 0);
    }

    #[test]
    fn notify_fails_after_receiver_dropped() {
        let (tx, rx) = channel();
        drop(rx);
        assert!(!tx.notify(Instant::now()));
    }
}
