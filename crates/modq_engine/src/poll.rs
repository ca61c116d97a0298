//! Shared polling timer.
//!
//! Any number of subscribers share one interval timer. The timer starts with
//! the first subscription and is torn down when the last subscriber leaves;
//! the next subscription starts a fresh one.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use modq_logging::{modq_debug, modq_trace};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

pub type PollCallback = Arc<dyn Fn() + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(u64);

#[derive(Default)]
struct MonitorInner {
    subscribers: BTreeMap<SubscriptionId, PollCallback>,
    next_id: u64,
    timer: Option<CancellationToken>,
}

impl MonitorInner {
    fn stop_timer(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.cancel();
            modq_debug!("Poll timer stopped");
        }
    }
}

/// Injectable polling service; clone it to share the same timer.
#[derive(Clone)]
pub struct PollMonitor {
    inner: Arc<Mutex<MonitorInner>>,
    interval: Duration,
}

impl PollMonitor {
    /// Must be used from within a Tokio runtime; the timer is a spawned task.
    pub fn new(interval: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MonitorInner::default())),
            interval: interval.max(Duration::from_millis(1)),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Adds a callback fired on every tick. The first tick comes one full
    /// interval after the timer starts.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn() + Send + Sync + 'static,
    {
        let mut inner = self.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.subscribers.insert(id, Arc::new(callback));
        if inner.timer.is_none() {
            inner.timer = Some(spawn_timer(Arc::downgrade(&self.inner), self.interval));
        }
        id
    }

    /// Removes a subscriber; unknown ids are ignored. Stops the timer with the last one.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut inner = self.lock();
        let removed = inner.subscribers.remove(&id).is_some();
        if inner.subscribers.is_empty() {
            inner.stop_timer();
        }
        removed
    }

    /// Drops every subscriber and the timer.
    pub fn dispose(&self) {
        let mut inner = self.lock();
        inner.subscribers.clear();
        inner.stop_timer();
    }

    pub fn is_running(&self) -> bool {
        self.lock().timer.is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.lock().subscribers.len()
    }

    fn lock(&self) -> MutexGuard<'_, MonitorInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn spawn_timer(inner: Weak<Mutex<MonitorInner>>, period: Duration) -> CancellationToken {
    let token = CancellationToken::new();
    let stop = token.clone();
    modq_debug!("Poll timer started, interval {:?}", period);

    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            tokio::select! {
                biased;
                _ = stop.cancelled() => break,
                _ = ticker.tick() => {
                    let Some(inner) = inner.upgrade() else {
                        break;
                    };
                    let callbacks: Vec<PollCallback> = {
                        let guard = inner.lock().unwrap_or_else(PoisonError::into_inner);
                        // Stopped while this tick was pending; the map may belong to a newer timer.
                        if stop.is_cancelled() {
                            break;
                        }
                        guard.subscribers.values().cloned().collect()
                    };
                    modq_trace!("Poll tick for {} subscribers", callbacks.len());
                    for callback in callbacks {
                        callback();
                    }
                }
            }
        }
    });

    token
}
