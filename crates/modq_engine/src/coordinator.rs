//! Runtime shell around the pure list state machine.
//!
//! A [`Coordinator`] owns the [`ListState`], feeds it messages through
//! [`update`] and executes the returned effects: URL syncing through the
//! [`Navigator`], list fetches through the [`TransportFacade`] and bulk
//! moderation batches. Views are published on a `watch` channel whenever
//! the state reports itself dirty.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use modq_core::{
    poll_filter, update, BulkReport, Effect, EntityId, FilterPatch, FilterState, ListState,
    ListViewModel, ModerationAction, Msg, SortField,
};
use modq_logging::{modq_debug, modq_info, modq_warn};
use tokio::sync::watch;

use crate::bulk::run_bulk;
use crate::debounce::Debouncer;
use crate::poll::{PollMonitor, SubscriptionId};
use crate::transport::TransportFacade;
use crate::RequestKey;

/// Receives the query string that should replace the current location's.
///
/// Called while the coordinator holds its state lock; implementations must
/// not dispatch back into the coordinator.
pub trait Navigator: Send + Sync {
    fn replace_query(&self, query: &str);
}

struct Inner {
    state: Mutex<ListState>,
    facade: TransportFacade,
    navigator: Arc<dyn Navigator>,
    views: watch::Sender<ListViewModel>,
    monitor: PollMonitor,
    poll_subscription: Mutex<Option<SubscriptionId>>,
    debouncer: Debouncer,
    unmounted: AtomicBool,
}

/// Cheap to clone; every clone drives the same list.
#[derive(Clone)]
pub struct Coordinator {
    inner: Arc<Inner>,
}

impl Coordinator {
    pub fn new(
        facade: TransportFacade,
        navigator: Arc<dyn Navigator>,
        monitor: PollMonitor,
        search_debounce: Duration,
    ) -> Self {
        let state = ListState::new();
        let (views, _) = watch::channel(state.view());
        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(state),
                facade,
                navigator,
                views,
                monitor,
                poll_subscription: Mutex::new(None),
                debouncer: Debouncer::new(search_debounce),
                unmounted: AtomicBool::new(false),
            }),
        }
    }

    pub fn facade(&self) -> &TransportFacade {
        &self.inner.facade
    }

    /// Restores the filter from `query` and loads the first page.
    pub fn mount(&self, query: &str) {
        modq_info!("Mounting list with query '{}'", query);
        self.inner.unmounted.store(false, Ordering::SeqCst);
        self.dispatch(Msg::Mounted {
            query: query.to_string(),
        });
    }

    /// Cancels everything in flight and stops polling. Pending list loads
    /// settle as cancelled, so the view leaves its loading state. A bulk batch
    /// still settles, but no longer triggers a refresh.
    pub fn unmount(&self) {
        self.inner.unmounted.store(true, Ordering::SeqCst);
        self.stop_polling();
        self.inner.debouncer.cancel();
        let cancelled = self.inner.facade.cancel_all();
        modq_info!("Unmounted list, cancelled {} requests", cancelled);
    }

    pub fn is_mounted(&self) -> bool {
        !self.inner.unmounted.load(Ordering::SeqCst)
    }

    pub fn dispatch(&self, msg: Msg) {
        let mut guard = self.lock_state();
        let mut queue = VecDeque::from([msg]);
        while let Some(msg) = queue.pop_front() {
            let state = std::mem::take(&mut *guard);
            let (mut state, effects) = update(state, msg);
            if state.consume_dirty() {
                self.inner.views.send_replace(state.view());
            }
            *guard = state;

            // Effects run under the lock so fetches register in dispatch order.
            for effect in effects {
                if let Some(follow_up) = self.run_effect(effect) {
                    queue.push_back(follow_up);
                }
            }
        }
    }

    pub fn set_filter(&self, patch: FilterPatch) {
        self.dispatch(Msg::FilterChanged(patch));
    }

    /// Debounced search: only the last text of a typing burst is applied.
    pub fn set_search(&self, text: impl Into<String>) {
        let text = text.into();
        let this = self.clone();
        self.inner
            .debouncer
            .call(move || this.set_filter(FilterPatch::default().search(text)));
    }

    pub fn toggle_sort(&self, field: SortField) {
        self.dispatch(Msg::SortClicked(field));
    }

    pub fn go_to_page(&self, page: u32) {
        self.dispatch(Msg::PageRequested(page));
    }

    pub fn reset_filters(&self) {
        self.dispatch(Msg::ResetFilters);
    }

    pub fn apply_preset(&self, filter: FilterState) {
        self.dispatch(Msg::PresetApplied(filter));
    }

    pub fn refresh(&self) {
        self.dispatch(Msg::RefreshRequested);
    }

    pub fn toggle(&self, id: EntityId) {
        self.dispatch(Msg::ToggleSelected(id));
    }

    pub fn select_all(&self) {
        self.dispatch(Msg::SelectAll);
    }

    pub fn toggle_all(&self) {
        self.dispatch(Msg::ToggleAll);
    }

    pub fn clear_selection(&self) {
        self.dispatch(Msg::ClearSelection);
    }

    /// Applies `action` to the current selection. Ignored while a batch runs
    /// or when nothing is selected.
    pub fn run_bulk(&self, action: ModerationAction) {
        self.dispatch(Msg::BulkRequested(action));
    }

    pub fn view(&self) -> ListViewModel {
        self.lock_state().view()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListViewModel> {
        self.inner.views.subscribe()
    }

    /// Waits until no list fetch and no bulk batch is running.
    pub async fn wait_until_idle(&self) -> ListViewModel {
        let mut views = self.subscribe();
        let idle = views
            .wait_for(|view| !view.loading && !view.bulk_in_progress)
            .await
            .map(|view| view.clone());
        match idle {
            Ok(view) => view,
            Err(_) => self.view(),
        }
    }

    /// Subscribes this list to the shared poll timer. Returns `false` if it
    /// already was.
    pub fn start_polling(&self) -> bool {
        let mut subscription = self.lock_subscription();
        if subscription.is_some() {
            return false;
        }
        let weak = Arc::downgrade(&self.inner);
        let id = self.inner.monitor.subscribe(move || {
            if let Some(inner) = weak.upgrade() {
                Coordinator { inner }.poll_now();
            }
        });
        *subscription = Some(id);
        modq_debug!("List polling started");
        true
    }

    pub fn stop_polling(&self) -> bool {
        let Some(id) = self.lock_subscription().take() else {
            return false;
        };
        self.inner.monitor.unsubscribe(id);
        self.inner.facade.cancel(RequestKey::Poll);
        modq_debug!("List polling stopped");
        true
    }

    pub fn is_polling(&self) -> bool {
        self.lock_subscription().is_some()
    }

    /// Checks for entities that arrived since the shown page was loaded.
    /// Failures are logged and otherwise ignored.
    pub fn poll_now(&self) {
        if !self.is_mounted() {
            return;
        }
        let request = self.inner.facade.list(RequestKey::Poll, poll_filter());
        let this = self.clone();
        tokio::spawn(async move {
            match request.await {
                Ok(page) => this.dispatch(Msg::PollCompleted { ids: page.ids() }),
                Err(err) if err.is_cancelled() => {}
                Err(err) => modq_debug!("Poll for new items failed: {}", err),
            }
        });
    }

    /// Executes one effect. After unmount nothing new is started; the
    /// returned message settles the state as if the work had been cancelled.
    fn run_effect(&self, effect: Effect) -> Option<Msg> {
        if !self.is_mounted() {
            return match effect {
                Effect::SyncUrl { .. } => None,
                Effect::FetchList { request, .. } => {
                    modq_debug!("Dropping list fetch requested after unmount");
                    Some(Msg::ListCancelled { request })
                }
                Effect::RunBulk { .. } => Some(Msg::BulkFinished(BulkReport::default())),
            };
        }
        match effect {
            Effect::SyncUrl { query } => self.inner.navigator.replace_query(&query),
            Effect::FetchList { request, filter } => {
                let fetch = self.inner.facade.list(RequestKey::List, filter);
                let this = self.clone();
                tokio::spawn(async move {
                    let msg = match fetch.await {
                        Ok(page) => Msg::ListLoaded {
                            request,
                            result: Ok(page),
                        },
                        Err(err) if err.is_cancelled() => Msg::ListCancelled { request },
                        Err(err) => {
                            modq_warn!("List fetch failed: {}", err);
                            Msg::ListLoaded {
                                request,
                                result: Err(err.to_string()),
                            }
                        }
                    };
                    this.dispatch(msg);
                });
            }
            Effect::RunBulk { action, ids } => {
                modq_info!("Running bulk {} on {} ads", action, ids.len());
                let this = self.clone();
                tokio::spawn(async move {
                    let report = run_bulk(&this.inner.facade, &action, ids).await;
                    this.dispatch(Msg::BulkFinished(report));
                });
            }
        }
        None
    }

    fn lock_state(&self) -> MutexGuard<'_, ListState> {
        self.inner.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_subscription(&self) -> MutexGuard<'_, Option<SubscriptionId>> {
        self.inner
            .poll_subscription
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
