//! Named, cancelable in-flight requests.
//!
//! Registering a key cancels whatever was registered under it before, so a
//! newer request always supersedes an older one without comparing completion
//! order.

use std::collections::HashMap;
use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use modq_logging::modq_debug;
use tokio_util::sync::CancellationToken;

use crate::{RequestKey, TransportError};

/// Handle for one registered request.
#[derive(Debug, Clone)]
pub struct RequestTicket {
    key: RequestKey,
    generation: u64,
    token: CancellationToken,
}

impl RequestTicket {
    pub fn key(&self) -> RequestKey {
        self.key
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

struct Pending {
    generation: u64,
    token: CancellationToken,
}

#[derive(Default)]
struct RegistryInner {
    pending: HashMap<RequestKey, Pending>,
    next_generation: u64,
}

#[derive(Default)]
pub struct RequestRegistry {
    inner: Mutex<RegistryInner>,
}

impl RequestRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the request currently registered under `key` and registers a new one.
    pub fn register(&self, key: RequestKey) -> RequestTicket {
        let mut inner = self.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;
        let token = CancellationToken::new();
        let previous = inner.pending.insert(
            key,
            Pending {
                generation,
                token: token.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.token.cancel();
            modq_debug!("Superseded in-flight {} request", key);
        }
        RequestTicket {
            key,
            generation,
            token,
        }
    }

    /// Cancels the request under `key`. Returns `false` if none was registered.
    pub fn cancel(&self, key: RequestKey) -> bool {
        match self.lock().pending.remove(&key) {
            Some(pending) => {
                pending.token.cancel();
                modq_debug!("Cancelled {} request", key);
                true
            }
            None => false,
        }
    }

    /// Cancels every registered request and returns how many there were.
    pub fn cancel_all(&self) -> usize {
        let drained: Vec<_> = self.lock().pending.drain().collect();
        for (_, pending) in &drained {
            pending.token.cancel();
        }
        if !drained.is_empty() {
            modq_debug!("Cancelled {} in-flight requests", drained.len());
        }
        drained.len()
    }

    pub fn is_pending(&self, key: RequestKey) -> bool {
        self.lock().pending.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.lock().pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drives `request` until it settles or its ticket is cancelled.
    ///
    /// A result that loses the race against cancellation is discarded and
    /// reported as `FailureKind::Cancelled`.
    pub async fn run<T, F>(&self, ticket: RequestTicket, request: F) -> Result<T, TransportError>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        let outcome = tokio::select! {
            biased;
            _ = ticket.token.cancelled() => Err(TransportError::cancelled(ticket.key)),
            result = request => result,
        };
        self.release(&ticket);
        if ticket.token.is_cancelled() {
            return Err(TransportError::cancelled(ticket.key));
        }
        outcome
    }

    fn release(&self, ticket: &RequestTicket) {
        let mut inner = self.lock();
        let owned = inner
            .pending
            .get(&ticket.key)
            .is_some_and(|pending| pending.generation == ticket.generation);
        if owned {
            inner.pending.remove(&ticket.key);
        }
    }

    fn lock(&self) -> MutexGuard<'_, RegistryInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
