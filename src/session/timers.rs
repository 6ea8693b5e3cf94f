//! Periodic timers polled with the frame clock.
//!
//! Nothing here runs on its own: the session calls [`Timers::poll`] once
//! per frame with the frame's `now`, and gets back whichever timers came
//! due since the last poll. A timer that missed several periods (a stalled
//! frame, a suspended tab) fires once, not once per missed period.

use web_time::{Duration, Instant};

/// What a timer is for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Pick the next featured track.
    FeaturedSelection,
    /// See whether the user has gone idle.
    InactivityCheck,
}

/// One timer firing, stamped with the epoch it was scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFire {
    /// Which timer fired.
    pub kind: TimerKind,
    /// Dataset epoch the timer belongs to.
    pub epoch: u64,
    /// When it was due.
    pub due: Instant,
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    kind: TimerKind,
    period: Duration,
    /// `None` when the next deadline lies past the clock's range.
    next_due: Option<Instant>,
}

/// Set of periodic timers sharing one epoch.
#[derive(Debug, Clone, Default)]
pub struct Timers {
    timers: Vec<Timer>,
    epoch: u64,
}

impl Timers {
    /// No timers, epoch 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` every `period`, first at `now + period`. Replaces an
    /// existing timer of the same kind. A period too long for the clock
    /// never fires.
    pub fn schedule(&mut self, kind: TimerKind, period: Duration, now: Instant) {
        let timer = Timer {
            kind,
            period,
            next_due: now.checked_add(period),
        };
        match self.timers.iter_mut().find(|t| t.kind == kind) {
            Some(existing) => *existing = timer,
            None => self.timers.push(timer),
        }
    }

    /// Stop firing `kind`.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.timers.retain(|t| t.kind != kind);
    }

    /// Cancel everything and start a new epoch. Fires handed out before
    /// this call are stale from now on.
    pub fn cancel_all(&mut self) -> u64 {
        self.timers.clear();
        self.epoch += 1;
        self.epoch
    }

    /// Current epoch.
    #[must_use]
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether `fire` belongs to the current epoch.
    #[must_use]
    pub fn is_current(&self, fire: &TimerFire) -> bool {
        fire.epoch == self.epoch
    }

    /// Whether a timer of this kind is scheduled.
    #[must_use]
    pub fn is_scheduled(&self, kind: TimerKind) -> bool {
        self.timers.iter().any(|t| t.kind == kind)
    }

    /// Timers due at `now`, earliest first. Each due timer fires once and
    /// is rescheduled on its original cadence past `now`.
    pub fn poll(&mut self, now: Instant) -> Vec<TimerFire> {
        let mut fires = Vec::new();
        for timer in &mut self.timers {
            let Some(due) = timer.next_due.filter(|&due| due <= now) else {
                continue;
            };
            fires.push(TimerFire {
                kind: timer.kind,
                epoch: self.epoch,
                due,
            });
            timer.next_due = next_after(due, timer.period, now);
        }
        fires.sort_by_key(|f| f.due);
        fires
    }
}

/// First instant on the `due + k * period` grid strictly after `now`.
fn next_after(due: Instant, period: Duration, now: Instant) -> Option<Instant> {
    let period_nanos = period.as_nanos();
    if period_nanos == 0 {
        return Some(now);
    }
    let behind = now.saturating_duration_since(due).as_nanos();
    let steps = behind / period_nanos + 1;
    u64::try_from(steps * period_nanos)
        .ok()
        .and_then(|nanos| due.checked_add(Duration::from_nanos(nanos)))
        .or_else(|| now.checked_add(period))
}
