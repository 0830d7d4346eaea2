use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{StatusCode, Url};
use rutpoint_api_types::{ApiResponse, DEFAULT_API_PREFIX, RankQuery, TAXI_RANKS_PATH};
use rutpoint_transit::{Connection, Coordinate, MapBounds, Rank, RankIdentifier};
use serde::de::DeserializeOwned;

use crate::client::{FetchResult, RankClient};
use crate::error::ClientConfigError;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Service root including the API prefix, e.g. `https://host/api/v1`
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: format!("http://localhost:3000{DEFAULT_API_PREFIX}"),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Talks to the rank service over HTTP.
#[derive(Debug, Clone)]
pub struct HttpRankClient {
    http: reqwest::Client,
    base: Url,
}

impl HttpRankClient {
    pub fn new(config: &HttpClientConfig) -> Result<Self, ClientConfigError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ClientConfigError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base.cannot_be_a_base() {
            return Err(ClientConfigError::InvalidBaseUrl(config.base_url.clone()));
        }

        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, base })
    }

    pub async fn all_ranks(&self) -> FetchResult<Vec<Arc<Rank>>> {
        self.query(&RankQuery::All).await
    }

    pub async fn ranks_by_destination(&self, text: &str) -> FetchResult<Vec<Arc<Rank>>> {
        self.query(&RankQuery::Destination(text.to_owned())).await
    }

    /// `None` when the service does not know the id.
    pub async fn rank(&self, id: &RankIdentifier) -> FetchResult<Option<Arc<Rank>>> {
        let url = self.endpoint(&[id.as_str()]);
        tracing::debug!(%url, "fetching rank");

        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        let body: ApiResponse<Arc<Rank>> = response.error_for_status()?.json().await?;
        Ok(Some(body.data))
    }

    pub async fn connections(&self, id: &RankIdentifier) -> FetchResult<Vec<Connection>> {
        self.get_data(self.endpoint(&[id.as_str(), "connections"]))
            .await
    }

    async fn query(&self, query: &RankQuery) -> FetchResult<Vec<Arc<Rank>>> {
        let mut url = self.endpoint(&[]);
        let pairs = query.to_params();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        self.get_data(url).await
    }

    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> FetchResult<T> {
        tracing::debug!(%url, "fetching");
        let response = self.http.get(url).send().await?.error_for_status()?;
        let body: ApiResponse<T> = response.json().await?;
        Ok(body.data)
    }

    /// Collection path plus `segments`, under the configured base.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty()
                .push(TAXI_RANKS_PATH.trim_start_matches('/'))
                .extend(segments);
        }
        url
    }
}

impl RankClient for HttpRankClient {
    fn ranks_within_bounds<'a>(
        &'a self,
        bounds: &'a MapBounds,
    ) -> Pin<Box<dyn Future<Output = FetchResult<Vec<Arc<Rank>>>> + Send + 'a>> {
        Box::pin(self.query_owned(RankQuery::Bounds(*bounds)))
    }

    fn ranks_near<'a>(
        &'a self,
        center: Coordinate,
        radius_m: f64,
    ) -> Pin<Box<dyn Future<Output = FetchResult<Vec<Arc<Rank>>>> + Send + 'a>> {
        Box::pin(self.query_owned(RankQuery::Nearby { center, radius_m }))
    }
}

impl HttpRankClient {
    async fn query_owned(&self, query: RankQuery) -> FetchResult<Vec<Arc<Rank>>> {
        self.query(&query).await
    }
}
