use modq_core::codec::api_query;
use modq_core::{
    ActivityPoint, Advertisement, CategoryCounts, DecisionShare, EntityId, FilterState,
    ModerationAction, Moderator, ResultPage, StatsFilter, StatsSummary, PAGE_SIZE,
};
use modq_logging::modq_debug;
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use url::Url;

use crate::transport::Transport;
use crate::{EngineSettings, FailureKind, TransportError};

#[derive(Debug, Deserialize)]
struct AdsResponse {
    #[serde(alias = "adds")]
    ads: Vec<Advertisement>,
    #[serde(default)]
    pagination: PaginationDto,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PaginationDto {
    current_page: u32,
    total_pages: u32,
    total_items: u64,
    items_per_page: u32,
}

#[derive(Debug, Deserialize)]
struct MutationResponse {
    #[serde(default)]
    message: String,
    ad: Advertisement,
}

impl AdsResponse {
    fn into_page(self, requested_page: u32) -> ResultPage {
        let pagination = self.pagination;
        ResultPage {
            total_items: if pagination.total_items == 0 {
                self.ads.len() as u64
            } else {
                pagination.total_items
            },
            entities: self.ads,
            current_page: if pagination.current_page == 0 {
                requested_page
            } else {
                pagination.current_page
            },
            total_pages: pagination.total_pages.max(1),
            page_size: if pagination.items_per_page == 0 {
                PAGE_SIZE
            } else {
                pagination.items_per_page
            },
        }
    }
}

/// JSON-over-HTTP binding of the moderation backend.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    base: Url,
}

impl ReqwestTransport {
    pub fn new(settings: &EngineSettings) -> Result<Self, TransportError> {
        let base = parse_base_url(&settings.base_url)?;
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .timeout(settings.request_timeout)
            .build()
            .map_err(|err| TransportError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client, base })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransportError> {
        self.base
            .join(path)
            .map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, TransportError> {
        let response = request.send().await.map_err(map_reqwest_error)?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }
        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice(&body)
            .map_err(|err| TransportError::new(FailureKind::Decode, err.to_string()))
    }

    async fn get_stats<T: DeserializeOwned>(
        &self,
        path: &str,
        filter: &StatsFilter,
    ) -> Result<T, TransportError> {
        let mut url = self.endpoint(path)?;
        let pairs = filter.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        modq_debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }
}

#[async_trait::async_trait]
impl Transport for ReqwestTransport {
    async fn list(&self, filter: &FilterState) -> Result<ResultPage, TransportError> {
        let mut url = self.endpoint("ads")?;
        url.query_pairs_mut().extend_pairs(api_query(filter));
        modq_debug!("GET {}", url);
        let response: AdsResponse = self.send_json(self.client.get(url)).await?;
        Ok(response.into_page(filter.page))
    }

    async fn get_by_id(&self, id: EntityId) -> Result<Advertisement, TransportError> {
        let url = self.endpoint(&format!("ads/{id}"))?;
        modq_debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }

    async fn mutate(
        &self,
        id: EntityId,
        action: &ModerationAction,
    ) -> Result<Advertisement, TransportError> {
        let url = self.endpoint(&format!("ads/{id}/{}", action.endpoint()))?;
        modq_debug!("POST {}", url);
        let mut request = self.client.post(url);
        if let Some(verdict) = action.verdict() {
            let body = serde_json::to_vec(verdict)
                .map_err(|err| TransportError::new(FailureKind::Decode, err.to_string()))?;
            request = request.header(CONTENT_TYPE, "application/json").body(body);
        }
        let response: MutationResponse = self.send_json(request).await?;
        modq_debug!("Ad {} {}: {}", id, action, response.message);
        Ok(response.ad)
    }

    async fn stats_summary(&self, filter: &StatsFilter) -> Result<StatsSummary, TransportError> {
        self.get_stats("stats/summary", filter).await
    }

    async fn activity_chart(
        &self,
        filter: &StatsFilter,
    ) -> Result<Vec<ActivityPoint>, TransportError> {
        self.get_stats("stats/chart/activity", filter).await
    }

    async fn decisions_chart(
        &self,
        filter: &StatsFilter,
    ) -> Result<DecisionShare, TransportError> {
        self.get_stats("stats/chart/decisions", filter).await
    }

    async fn categories_chart(
        &self,
        filter: &StatsFilter,
    ) -> Result<CategoryCounts, TransportError> {
        self.get_stats("stats/chart/categories", filter).await
    }

    async fn current_moderator(&self) -> Result<Moderator, TransportError> {
        let url = self.endpoint("moderators/me")?;
        modq_debug!("GET {}", url);
        self.send_json(self.client.get(url)).await
    }
}

/// Parses the API root, making sure relative joins stay below it.
fn parse_base_url(raw: &str) -> Result<Url, TransportError> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }
    Url::parse(&raw).map_err(|err| TransportError::new(FailureKind::InvalidUrl, err.to_string()))
}

fn map_reqwest_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        return TransportError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() {
        return TransportError::new(FailureKind::Decode, err.to_string());
    }
    TransportError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::parse_base_url;

    #[test]
    fn base_url_gains_trailing_slash() {
        let base = parse_base_url("http://localhost:3001/api/v1").expect("valid");
        assert_eq!(base.join("ads").expect("join").path(), "/api/v1/ads");
    }

    #[test]
    fn malformed_base_url_is_rejected() {
        assert!(parse_base_url("not a url").is_err());
    }
}
