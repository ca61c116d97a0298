use std::future::Future;
use std::sync::Arc;

use futures_util::future::try_join4;
use modq_core::{
    ActivityPoint, Advertisement, CategoryCounts, DecisionShare, EntityId, FilterState,
    ModerationAction, Moderator, ResultPage, StatsFilter, StatsReport, StatsSummary,
};
use modq_logging::modq_debug;

use crate::registry::RequestRegistry;
use crate::{RequestKey, TransportError};

/// Raw calls against the moderation backend.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn list(&self, filter: &FilterState) -> Result<ResultPage, TransportError>;

    async fn get_by_id(&self, id: EntityId) -> Result<Advertisement, TransportError>;

    async fn mutate(
        &self,
        id: EntityId,
        action: &ModerationAction,
    ) -> Result<Advertisement, TransportError>;

    async fn stats_summary(&self, filter: &StatsFilter) -> Result<StatsSummary, TransportError>;

    async fn activity_chart(
        &self,
        filter: &StatsFilter,
    ) -> Result<Vec<ActivityPoint>, TransportError>;

    async fn decisions_chart(&self, filter: &StatsFilter) -> Result<DecisionShare, TransportError>;

    async fn categories_chart(
        &self,
        filter: &StatsFilter,
    ) -> Result<CategoryCounts, TransportError>;

    async fn current_moderator(&self) -> Result<Moderator, TransportError>;
}

/// A [`Transport`] plus named cancellation.
///
/// Reads are registered under a [`RequestKey`] when the call is made, not
/// when the returned future is first polled, so the order of calls decides
/// which request supersedes which.
#[derive(Clone)]
pub struct TransportFacade {
    transport: Arc<dyn Transport>,
    registry: Arc<RequestRegistry>,
}

impl TransportFacade {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            registry: Arc::new(RequestRegistry::new()),
        }
    }

    pub fn registry(&self) -> &RequestRegistry {
        &self.registry
    }

    pub fn list(
        &self,
        key: RequestKey,
        filter: FilterState,
    ) -> impl Future<Output = Result<ResultPage, TransportError>> + Send + 'static {
        let ticket = self.registry.register(key);
        let transport = Arc::clone(&self.transport);
        let registry = Arc::clone(&self.registry);
        modq_debug!("Starting {} fetch page={}", key, filter.page);
        async move {
            let request = transport.list(&filter);
            registry.run(ticket, request).await
        }
    }

    pub fn get_by_id(
        &self,
        id: EntityId,
    ) -> impl Future<Output = Result<Advertisement, TransportError>> + Send + 'static {
        let ticket = self.registry.register(RequestKey::Detail(id));
        let transport = Arc::clone(&self.transport);
        let registry = Arc::clone(&self.registry);
        async move {
            let request = transport.get_by_id(id);
            registry.run(ticket, request).await
        }
    }

    /// Fetches the summary and all three charts as one registered request.
    /// The report fails as a whole if any part fails.
    pub fn stats_report(
        &self,
        filter: StatsFilter,
    ) -> impl Future<Output = Result<StatsReport, TransportError>> + Send + 'static {
        let ticket = self.registry.register(RequestKey::Stats);
        let transport = Arc::clone(&self.transport);
        let registry = Arc::clone(&self.registry);
        modq_debug!("Starting stats fetch {:?}", filter.period);
        async move {
            let request = async {
                let (summary, activity, decisions, categories) = try_join4(
                    transport.stats_summary(&filter),
                    transport.activity_chart(&filter),
                    transport.decisions_chart(&filter),
                    transport.categories_chart(&filter),
                )
                .await?;
                Ok::<_, TransportError>(StatsReport {
                    summary,
                    activity,
                    decisions,
                    categories,
                })
            };
            registry.run(ticket, request).await
        }
    }

    pub fn current_moderator(
        &self,
    ) -> impl Future<Output = Result<Moderator, TransportError>> + Send + 'static {
        let ticket = self.registry.register(RequestKey::Moderator);
        let transport = Arc::clone(&self.transport);
        let registry = Arc::clone(&self.registry);
        async move { registry.run(ticket, transport.current_moderator()).await }
    }

    /// Moderation calls always run to completion; they are never registered.
    pub async fn mutate(
        &self,
        id: EntityId,
        action: &ModerationAction,
    ) -> Result<Advertisement, TransportError> {
        self.transport.mutate(id, action).await
    }

    pub fn cancel(&self, key: RequestKey) -> bool {
        self.registry.cancel(key)
    }

    pub fn cancel_all(&self) -> usize {
        self.registry.cancel_all()
    }
}
