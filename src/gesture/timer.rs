//! Deferred callbacks for the long-press threshold.
//!
//! A card never sleeps itself. It asks a [`TimerScheduler`] for a timer and
//! is later told, through [`TaskCard::on_timer`](crate::card::TaskCard::on_timer),
//! that the timer fired. Ids a card no longer waits for are ignored, so a
//! timer that races a release can never cause a stale transition.

use std::time::Duration;

#[cfg(feature = "tokio-timers")]
use std::collections::HashMap;
#[cfg(feature = "tokio-timers")]
use tokio::{sync::mpsc, task::JoinHandle};

/// Handle to a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn as_raw(&self) -> u64 {
        self.0
    }
}

/// Schedules one-shot timers on behalf of cards
pub trait TimerScheduler {
    /// Arms a timer that fires once after `delay`
    fn schedule(&mut self, delay: Duration) -> TimerId;

    /// Disarms a timer. Unknown or already-fired ids are ignored.
    fn cancel(&mut self, id: TimerId);
}

/// Deterministic scheduler driven by an explicit virtual clock.
///
/// Hosts that already run a frame loop can call [`advance`](Self::advance)
/// once per frame and forward the returned ids to their cards.
#[derive(Debug, Default)]
pub struct ManualTimers {
    now: Duration,
    next_id: u64,
    pending: Vec<(Duration, TimerId)>,
}

impl ManualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|(_, pending)| *pending == id)
    }

    /// Moves the clock forward and returns every timer that came due, earliest first
    pub fn advance(&mut self, by: Duration) -> Vec<TimerId> {
        self.now += by;
        let now = self.now;

        let mut due: Vec<(Duration, TimerId)> = Vec::new();
        self.pending.retain(|entry| {
            if entry.0 <= now {
                due.push(*entry);
                false
            } else {
                true
            }
        });
        due.sort();
        due.into_iter().map(|(_, id)| id).collect()
    }
}

impl TimerScheduler for ManualTimers {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        self.pending.push((self.now + delay, id));
        id
    }

    fn cancel(&mut self, id: TimerId) {
        self.pending.retain(|(_, pending)| *pending != id);
    }
}

/// Scheduler backed by tokio's timer wheel.
///
/// Each timer is a spawned sleep that reports its id on the channel returned
/// by [`TokioTimers::new`]. Must be used from within a tokio runtime.
#[cfg(feature = "tokio-timers")]
pub struct TokioTimers {
    next_id: u64,
    tx: mpsc::UnboundedSender<TimerId>,
    handles: HashMap<TimerId, JoinHandle<()>>,
}

#[cfg(feature = "tokio-timers")]
impl TokioTimers {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TimerId>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let timers = Self {
            next_id: 0,
            tx,
            handles: HashMap::new(),
        };
        (timers, rx)
    }

    /// Number of timers that have been scheduled and not cancelled
    pub fn outstanding(&self) -> usize {
        self.handles.values().filter(|h| !h.is_finished()).count()
    }
}

#[cfg(feature = "tokio-timers")]
impl TimerScheduler for TokioTimers {
    fn schedule(&mut self, delay: Duration) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let tx = self.tx.clone();

        // Finished timers are only pruned here; cancel() of a fired id is a no-op abort
        self.handles.retain(|_, handle| !handle.is_finished());

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if tx.send(id).is_err() {
                tracing::trace!(timer = id.0, "Timer receiver dropped before delivery");
            }
        });
        self.handles.insert(id, handle);
        id
    }

    fn cancel(&mut self, id: TimerId) {
        if let Some(handle) = self.handles.remove(&id) {
            handle.abort();
        }
    }
}

#[cfg(feature = "tokio-timers")]
impl Drop for TokioTimers {
    fn drop(&mut self) {
        for (_, handle) in self.handles.drain() {
            handle.abort();
        }
    }
}
