#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, Once};
use std::time::Duration;

use modq_core::{
    ActivityPoint, AdStatus, Advertisement, CategoryCounts, DecisionShare, EntityId, FilterState,
    ListViewModel, ModerationAction, Moderator, Priority, ResultPage, StatsFilter, StatsSummary,
    PAGE_SIZE,
};
use modq_engine::{
    Coordinator, FailureKind, Navigator, PollMonitor, Transport, TransportError, TransportFacade,
};
use tokio::sync::watch;

pub fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(modq_logging::initialize_for_tests);
}

pub fn ad(id: EntityId) -> Advertisement {
    Advertisement {
        id,
        title: format!("Ad #{id}"),
        description: String::new(),
        price: 500.0 * id as f64,
        category: "Транспорт".to_string(),
        category_id: Some(1),
        status: AdStatus::Pending,
        priority: Priority::Normal,
        created_at: "2026-10-02T08:30:00Z".to_string(),
        updated_at: "2026-10-02T08:30:00Z".to_string(),
        images: Vec::new(),
    }
}

pub fn page_of(ids: &[EntityId]) -> ResultPage {
    ResultPage {
        entities: ids.iter().copied().map(ad).collect(),
        current_page: 1,
        total_pages: 1,
        total_items: ids.len() as u64,
        page_size: PAGE_SIZE,
    }
}

/// In-memory backend. List responses are keyed by the search text; searches
/// can be stalled forever or made to fail. Mutations wait on a gate.
/// Statistics are canned; the category chart can be stalled or made to fail.
pub struct FakeTransport {
    list_calls: Mutex<Vec<FilterState>>,
    default_ids: Mutex<Vec<EntityId>>,
    pages: Mutex<HashMap<String, Vec<EntityId>>>,
    stalled: Mutex<HashSet<String>>,
    failing_searches: Mutex<HashSet<String>>,
    mutations: Mutex<Vec<(EntityId, ModerationAction)>>,
    failing_ids: Mutex<HashSet<EntityId>>,
    in_flight: AtomicUsize,
    gate: watch::Sender<bool>,
    stats_filters: Mutex<Vec<StatsFilter>>,
    stall_categories: AtomicBool,
    fail_categories: AtomicBool,
}

impl FakeTransport {
    pub fn new(default_ids: &[EntityId]) -> Arc<Self> {
        let (gate, _) = watch::channel(true);
        Arc::new(Self {
            list_calls: Mutex::new(Vec::new()),
            default_ids: Mutex::new(default_ids.to_vec()),
            pages: Mutex::new(HashMap::new()),
            stalled: Mutex::new(HashSet::new()),
            failing_searches: Mutex::new(HashSet::new()),
            mutations: Mutex::new(Vec::new()),
            failing_ids: Mutex::new(HashSet::new()),
            in_flight: AtomicUsize::new(0),
            gate,
            stats_filters: Mutex::new(Vec::new()),
            stall_categories: AtomicBool::new(false),
            fail_categories: AtomicBool::new(false),
        })
    }

    pub fn set_default_ids(&self, ids: &[EntityId]) {
        *self.default_ids.lock().unwrap() = ids.to_vec();
    }

    pub fn respond_to(&self, search: &str, ids: &[EntityId]) {
        self.pages
            .lock()
            .unwrap()
            .insert(search.to_string(), ids.to_vec());
    }

    pub fn stall(&self, search: &str) {
        self.stalled.lock().unwrap().insert(search.to_string());
    }

    pub fn fail_search(&self, search: &str) {
        self.failing_searches
            .lock()
            .unwrap()
            .insert(search.to_string());
    }

    pub fn fail_mutation(&self, id: EntityId) {
        self.failing_ids.lock().unwrap().insert(id);
    }

    pub fn close_gate(&self) {
        self.gate.send_replace(false);
    }

    pub fn open_gate(&self) {
        self.gate.send_replace(true);
    }

    pub fn list_calls(&self) -> Vec<FilterState> {
        self.list_calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<(EntityId, ModerationAction)> {
        self.mutations.lock().unwrap().clone()
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn stall_categories(&self) {
        self.stall_categories.store(true, Ordering::SeqCst);
    }

    pub fn fail_categories(&self) {
        self.fail_categories.store(true, Ordering::SeqCst);
    }

    /// Filters seen by the summary endpoint.
    pub fn stats_filters(&self) -> Vec<StatsFilter> {
        self.stats_filters.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl Transport for FakeTransport {
    async fn list(&self, filter: &FilterState) -> Result<ResultPage, TransportError> {
        self.list_calls.lock().unwrap().push(filter.clone());
        let stalled = self.stalled.lock().unwrap().contains(&filter.search);
        if stalled {
            std::future::pending::<()>().await;
        }
        if self.failing_searches.lock().unwrap().contains(&filter.search) {
            return Err(TransportError::new(FailureKind::HttpStatus(500), "boom"));
        }
        let ids = self
            .pages
            .lock()
            .unwrap()
            .get(&filter.search)
            .cloned()
            .unwrap_or_else(|| self.default_ids.lock().unwrap().clone());
        let mut page = page_of(&ids);
        page.current_page = filter.page;
        Ok(page)
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Advertisement, TransportError> {
        Ok(ad(id))
    }

    async fn mutate(
        &self,
        id: EntityId,
        action: &ModerationAction,
    ) -> Result<Advertisement, TransportError> {
        self.mutations.lock().unwrap().push((id, action.clone()));
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let mut gate = self.gate.subscribe();
        let _ = gate.wait_for(|open| *open).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        if self.failing_ids.lock().unwrap().contains(&id) {
            return Err(TransportError::new(FailureKind::HttpStatus(500), "boom"));
        }
        Ok(ad(id))
    }

    async fn stats_summary(&self, filter: &StatsFilter) -> Result<StatsSummary, TransportError> {
        self.stats_filters.lock().unwrap().push(filter.clone());
        Ok(StatsSummary {
            total_reviewed: 120,
            total_reviewed_today: 8,
            approved_percentage: 75.0,
            rejected_percentage: 25.0,
            average_review_time: 95.0,
            ..StatsSummary::default()
        })
    }

    async fn activity_chart(
        &self,
        _filter: &StatsFilter,
    ) -> Result<Vec<ActivityPoint>, TransportError> {
        Ok(vec![ActivityPoint {
            date: "2026-10-01".to_string(),
            approved: 6,
            rejected: 2,
            request_changes: 0,
        }])
    }

    async fn decisions_chart(&self, _filter: &StatsFilter) -> Result<DecisionShare, TransportError> {
        Ok(DecisionShare {
            approved: 75.0,
            rejected: 25.0,
            request_changes: 0.0,
        })
    }

    async fn categories_chart(
        &self,
        _filter: &StatsFilter,
    ) -> Result<CategoryCounts, TransportError> {
        if self.stall_categories.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_categories.load(Ordering::SeqCst) {
            return Err(TransportError::new(FailureKind::HttpStatus(500), "boom"));
        }
        Ok(CategoryCounts::from([
            ("Транспорт".to_string(), 70),
            ("Электроника".to_string(), 50),
        ]))
    }

    async fn current_moderator(&self) -> Result<Moderator, TransportError> {
        Ok(Moderator {
            id: 1,
            name: "Алексей Петров".to_string(),
            email: "a.petrov@example.com".to_string(),
            role: "moderator".to_string(),
        })
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn history(&self) -> Vec<String> {
        self.history.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn replace_query(&self, query: &str) {
        self.history.lock().unwrap().push(query.to_string());
    }
}

pub struct Harness {
    pub coordinator: Coordinator,
    pub transport: Arc<FakeTransport>,
    pub navigator: Arc<RecordingNavigator>,
    pub monitor: PollMonitor,
}

pub fn harness(default_ids: &[EntityId]) -> Harness {
    init_logging();
    let transport = FakeTransport::new(default_ids);
    let navigator = Arc::new(RecordingNavigator::default());
    let monitor = PollMonitor::new(Duration::from_secs(30));
    let coordinator = Coordinator::new(
        TransportFacade::new(transport.clone()),
        navigator.clone(),
        monitor.clone(),
        Duration::from_millis(300),
    );
    Harness {
        coordinator,
        transport,
        navigator,
        monitor,
    }
}

pub async fn idle(coordinator: &Coordinator) -> ListViewModel {
    tokio::time::timeout(Duration::from_secs(5), coordinator.wait_until_idle())
        .await
        .expect("coordinator settles")
}

/// Polls `condition` until it holds, yielding to spawned tasks in between.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..500 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition never held");
}
