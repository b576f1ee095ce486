//! TMDB REST client.

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::models::{RawDetails, SearchPage, VideoList};
use super::{
    ContentDetails, ExternalIds, ImageSet, Lookup, MediaType, MetadataProvider, SearchHit,
    TmdbError, Video,
};
use crate::config::TmdbConfig;

/// Metadata provider backed by the TMDB v3 API.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    client: reqwest::Client,
    config: TmdbConfig,
}

impl TmdbClient {
    /// Create a client sharing an already configured `reqwest::Client`.
    pub fn new(client: reqwest::Client, config: TmdbConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_base_url, path)
    }

    async fn get(&self, path: &str, extra: &[(&str, &str)]) -> Result<reqwest::Response, TmdbError> {
        let url = self.url(path);
        debug!(%url, "TMDB request");

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", self.config.api_key.as_str())])
            .query(extra)
            .send()
            .await?;

        Ok(response)
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, TmdbError> {
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(TmdbError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }

        serde_json::from_str(&body).map_err(|e| TmdbError::Parse {
            reason: e.to_string(),
        })
    }
}

#[async_trait]
impl MetadataProvider for TmdbClient {
    async fn search_multi(&self, query: &str) -> Result<Vec<SearchHit>, TmdbError> {
        let response = self
            .get(
                "/search/multi",
                &[("query", query), ("include_adult", "false")],
            )
            .await?;

        let page: SearchPage = self.handle_response(response).await?;
        Ok(page.results)
    }

    async fn details(
        &self,
        media_type: MediaType,
        id: u64,
    ) -> Result<Lookup<ContentDetails>, TmdbError> {
        let path = format!("/{media_type}/{id}");
        let response = self
            .get(&path, &[("language", self.config.language.as_str())])
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            debug!(%media_type, id, "TMDB reports unknown id");
            return Ok(Lookup::NotFound);
        }

        let raw: RawDetails = self.handle_response(response).await?;
        Ok(Lookup::Found(ContentDetails::from_raw(media_type, raw)))
    }

    async fn external_ids(&self, media_type: MediaType, id: u64) -> Result<ExternalIds, TmdbError> {
        let response = self
            .get(&format!("/{media_type}/{id}/external_ids"), &[])
            .await?;
        self.handle_response(response).await
    }

    async fn videos(&self, media_type: MediaType, id: u64) -> Result<Vec<Video>, TmdbError> {
        let response = self.get(&format!("/{media_type}/{id}/videos"), &[]).await?;
        let list: VideoList = self.handle_response(response).await?;
        Ok(list.results)
    }

    async fn images(&self, media_type: MediaType, id: u64) -> Result<ImageSet, TmdbError> {
        let response = self.get(&format!("/{media_type}/{id}/images"), &[]).await?;
        self.handle_response(response).await
    }
}
