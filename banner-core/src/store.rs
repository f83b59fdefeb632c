//! Thin client for the hosted settings store.
//!
//! Banners are plain settings entries under the `GlobalMessageBanners`
//! namespace; the store owns persistence, precedence and display. This client
//! only moves encoded entries across the wire with bearer-token auth. It is
//! explicitly constructed and carries no process-wide state, so callers can
//! hold as many instances as they like.

use reqwest::{Client, StatusCode};
use tracing::debug;

use crate::banner::{Banner, NAMESPACE};
use crate::codec::{self, BannerBatch, DecodedBatch};
use crate::error::StoreError;

/// Connection parameters for a settings store.
#[derive(Debug, Clone)]
pub struct StoreOptions {
    /// Service root, e.g. `https://example.visualstudio.com/`.
    pub base_url: String,
    /// Bearer token presented on every request.
    pub access_token: String,
    /// Settings API version, e.g. `3.2-preview`.
    pub api_version: String,
}

/// Client for the settings entries endpoint.
#[derive(Debug, Clone)]
pub struct StoreClient {
    http: Client,
    options: StoreOptions,
}

impl StoreClient {
    pub fn new(options: StoreOptions) -> Self {
        StoreClient {
            http: Client::new(),
            options,
        }
    }

    /// Fetch every banner in the namespace, decoding per entry.
    pub async fn fetch_all(&self) -> Result<DecodedBatch, StoreError> {
        let url = self.entries_url(NAMESPACE);
        debug!(%url, "fetching banner batch");

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.options.access_token)
            .send()
            .await?;
        check_status(response.status())?;

        let batch: BannerBatch = response.json().await?;
        Ok(codec::decode_all(Some(batch))?)
    }

    /// Create or replace the store row for a banner.
    ///
    /// The row is addressed by the banner's current storage key. If the
    /// priority changed since the banner was fetched this writes a new row;
    /// deleting the old key is the caller's job.
    pub async fn upsert(&self, banner: &Banner) -> Result<(), StoreError> {
        let entry = codec::encode(banner);
        let url = self.entries_url("");
        debug!(key = %banner.storage_key(), "saving banner");

        let response = self
            .http
            .patch(&url)
            .bearer_auth(&self.options.access_token)
            .json(&entry)
            .send()
            .await?;
        check_status(response.status())
    }

    /// Delete a single row by its composite key.
    pub async fn delete_by_key(&self, key: &str) -> Result<(), StoreError> {
        let url = self.entries_url(key);
        debug!(%key, "deleting banner");

        let response = self
            .http
            .delete(&url)
            .bearer_auth(&self.options.access_token)
            .send()
            .await?;
        check_status(response.status())
    }

    /// Delete the row occupied by a banner's current field values.
    pub async fn delete(&self, banner: &Banner) -> Result<(), StoreError> {
        self.delete_by_key(&banner.storage_key()).await
    }

    /// Delete the whole namespace, removing every banner at once.
    pub async fn delete_all(&self) -> Result<(), StoreError> {
        self.delete_by_key(NAMESPACE).await
    }

    /// Build an entries endpoint URL. An empty suffix addresses the
    /// collection itself (used by upsert).
    fn entries_url(&self, suffix: &str) -> String {
        let base = self.options.base_url.trim_end_matches('/');
        let version = &self.options.api_version;
        if suffix.is_empty() {
            format!("{base}/_apis/settings/entries/host?api-version={version}")
        } else {
            format!("{base}/_apis/settings/entries/host/{suffix}?api-version={version}")
        }
    }
}

/// The store's success window, matching the original client: redirects are
/// tolerated, anything at or above 400 is a failure.
fn check_status(status: StatusCode) -> Result<(), StoreError> {
    if status.as_u16() < 200 || status.as_u16() >= 400 {
        return Err(StoreError::Status(status));
    }
    Ok(())
}
