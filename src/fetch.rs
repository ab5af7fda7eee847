use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::domain::EntityKind;
use crate::error::HolocronError;
use crate::model::{Record, normalize_refs};
use crate::store::Store;

pub const ROOT_DATASET: &str = "root";

/// Where a collection came from during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchSource {
    Cache,
    Network,
}

impl FetchSource {
    pub fn as_str(self) -> &'static str {
        match self {
            FetchSource::Cache => "cache",
            FetchSource::Network => "network",
        }
    }
}

/// One page of the API's pagination envelope.
#[derive(Debug, serde::Deserialize)]
pub struct Page<T> {
    pub count: u64,
    pub next: Option<String>,
    // present in the envelope, never followed
    pub previous: Option<String>,
    pub results: Vec<T>,
}

pub trait ApiClient {
    fn get(&self, url: &str) -> Result<String, HolocronError>;
}

pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new() -> Result<Self, HolocronError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("holocron/{}", env!("CARGO_PKG_VERSION")))
                .map_err(|err| HolocronError::Http(err.to_string()))?,
        );
        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|err| HolocronError::Http(err.to_string()))?;
        Ok(Self { client })
    }

    fn handle_status(
        response: reqwest::blocking::Response,
    ) -> Result<reqwest::blocking::Response, HolocronError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let message = response
            .text()
            .unwrap_or_else(|_| "request failed".to_string());
        Err(HolocronError::Status { status, message })
    }
}

impl ApiClient for HttpClient {
    fn get(&self, url: &str) -> Result<String, HolocronError> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| HolocronError::Http(err.to_string()))?;
        let response = Self::handle_status(response)?;
        response
            .text()
            .map_err(|err| HolocronError::Http(err.to_string()))
    }
}

/// Fetches the API root map (collection name to start URL), or loads it from
/// cache when present.
pub fn fetch_root<C>(
    client: &C,
    store: &Store,
    api_root: &str,
) -> Result<(BTreeMap<String, String>, FetchSource), HolocronError>
where
    C: ApiClient + ?Sized,
{
    if let Some(map) = store.load::<BTreeMap<String, String>>(ROOT_DATASET)? {
        if !map.is_empty() {
            tracing::info!(entries = map.len(), "loaded root map from cache");
            return Ok((map, FetchSource::Cache));
        }
    }

    let url = format!("{api_root}?format=json");
    tracing::info!(url = %url, "fetching API root");
    let body = client.get(&url)?;
    let map: BTreeMap<String, String> =
        serde_json::from_str(&body).map_err(|err| HolocronError::Decode(err.to_string()))?;

    store.save(ROOT_DATASET, &map)?;
    Ok((map, FetchSource::Network))
}

/// Fetches one entity collection: cache fast path, then follow-the-next-link
/// pagination with cross-reference normalization, then a single cache write of
/// the complete collection. A partially fetched collection is never persisted.
pub fn fetch_collection<T, C>(
    client: &C,
    store: &Store,
    kind: EntityKind,
    start_url: &str,
) -> Result<(Vec<T>, FetchSource), HolocronError>
where
    T: Record + Serialize + DeserializeOwned,
    C: ApiClient + ?Sized,
{
    if start_url.is_empty() {
        return Err(HolocronError::MissingStartUrl(kind.to_string()));
    }

    if let Some(cached) = store.load::<Vec<T>>(kind.as_str())? {
        if !cached.is_empty() {
            tracing::info!(kind = %kind, records = cached.len(), "loaded collection from cache");
            return Ok((cached, FetchSource::Cache));
        }
    }

    let mut records: Vec<T> = Vec::new();
    let mut next = start_url.to_string();
    while !next.is_empty() {
        tracing::info!(kind = %kind, url = %next, "fetching page");
        let body = client.get(&next)?;
        let page: Page<T> =
            serde_json::from_str(&body).map_err(|err| HolocronError::Decode(err.to_string()))?;
        tracing::debug!(kind = %kind, count = page.count, results = page.results.len(), "decoded page");

        let mut results = page.results;
        for record in &mut results {
            normalize_refs(record)?;
        }
        records.append(&mut results);

        next = page.next.unwrap_or_default();
    }

    store.save(kind.as_str(), &records)?;
    Ok((records, FetchSource::Network))
}
