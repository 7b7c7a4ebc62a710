use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use log::info;
use serde::de::DeserializeOwned;

use crate::match_response::{ApiResponse, MatchData};
use crate::versus_response::VersusMatch;

pub const DEFAULT_API_URL: &str = "https://mcsrranked.com/api";

#[async_trait]
pub trait RankedApi: Send + Sync {
    async fn match_detail(&self, match_id: &str) -> Result<MatchData>;

    async fn versus_matches(&self, uuid1: &str, uuid2: &str) -> Result<Vec<VersusMatch>>;
}

pub struct RankedClient {
    http: reqwest::Client,
    base_url: String,
}

impl RankedClient {
    pub fn new(base_url: &str) -> RankedClient {
        RankedClient {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.url(path);
        info!("GET {}", url);

        let body = self
            .http
            .get(&url)
            .send()
            .await
            .with_context(|| format!("request to {} failed", url))?
            .text()
            .await
            .with_context(|| format!("reading body of {} failed", url))?;

        decode(&body).with_context(|| format!("bad response from {}", url))
    }
}

#[async_trait]
impl RankedApi for RankedClient {
    async fn match_detail(&self, match_id: &str) -> Result<MatchData> {
        self.get(&match_path(match_id)).await
    }

    async fn versus_matches(&self, uuid1: &str, uuid2: &str) -> Result<Vec<VersusMatch>> {
        self.get(&versus_path(uuid1, uuid2)).await
    }
}

pub fn match_path(match_id: &str) -> String {
    format!("/matches/{}", match_id)
}

pub fn versus_path(uuid1: &str, uuid2: &str) -> String {
    format!("/users/{}/versus/{}/matches", uuid1, uuid2)
}

/// Unwraps the status envelope around every ranked response body.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    let response: ApiResponse<T> = serde_json::from_str(body).context("malformed json")?;

    match response {
        ApiResponse::Success(data) => Ok(data),
        ApiResponse::Error(message) => Err(anyhow!(
            "api error: {}",
            message.as_deref().unwrap_or("no message")
        )),
    }
}
