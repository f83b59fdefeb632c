//! Translation between [`Banner`] entities and the settings-store wire shape.
//!
//! The store keeps banners as a flat map from composite key to entity body:
//!
//! ```text
//! "GlobalMessageBanners/p2-1692388123456" -> { level, message, expirationDate? }
//! ```
//!
//! Priority and message id live only in the key; the body carries the level
//! name, the message in the HTML subset dialect and an optional ISO-8601
//! expiration instant. `expirationDate` is omitted entirely (not null) when a
//! banner is shown indefinitely.

use std::collections::BTreeMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::banner::{Banner, Level, Priority, NAMESPACE};
use crate::dialects;
use crate::error::DecodeError;

/// Entity body as stored by the settings service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WebBanner {
    pub level: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
}

/// Batch container returned by a namespace fetch.
#[derive(Debug, Clone, Deserialize)]
pub struct BannerBatch {
    pub count: u64,
    #[serde(default)]
    pub value: Option<BTreeMap<String, WebBanner>>,
}

/// Result of decoding a batch with per-entry error isolation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DecodedBatch {
    /// Banners that decoded cleanly, in key order.
    pub banners: Vec<Banner>,
    /// Entries that failed to decode, keyed by their composite key.
    pub rejected: Vec<(String, DecodeError)>,
}

/// Encode a banner as a single-entry map ready to be PATCHed into the store.
///
/// The key is derived from the banner's current priority and message id, so
/// re-encoding after a priority change produces a different row.
pub fn encode(banner: &Banner) -> BTreeMap<String, WebBanner> {
    let body = WebBanner {
        level: banner.level.wire_name().to_string(),
        message: dialects::to_html(&banner.message),
        expiration_date: banner
            .expiration_date
            .map(|date| date.to_rfc3339_opts(SecondsFormat::Millis, true)),
    };

    let mut entry = BTreeMap::new();
    entry.insert(banner.storage_key(), body);
    entry
}

/// Split a composite key into its priority and message id.
///
/// The `GlobalMessageBanners/` namespace prefix is optional: batch fetches
/// return bare keys while [`encode`] emits namespaced ones. Message ids are
/// opaque and may themselves contain `-`, so the split happens at the first
/// separator only.
pub fn parse_storage_key(key: &str) -> Result<(Priority, String), DecodeError> {
    let bare = key
        .strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(key);

    let (prefix, message_id) = bare
        .split_once('-')
        .ok_or_else(|| DecodeError::MalformedKey(key.to_string()))?;

    let priority = Priority::from_wire_name(prefix)
        .ok_or_else(|| DecodeError::MalformedKey(key.to_string()))?;

    Ok((priority, message_id.to_string()))
}

/// Decode a single stored entry into a [`Banner`].
pub fn decode_entry(key: &str, body: &WebBanner) -> Result<Banner, DecodeError> {
    let (priority, message_id) = parse_storage_key(key)?;

    let level = Level::from_wire_name(&body.level)
        .ok_or_else(|| DecodeError::UnknownLevel(body.level.clone()))?;

    let expiration_date = match &body.expiration_date {
        Some(raw) => Some(
            DateTime::parse_from_rfc3339(raw)
                .map(|date| date.with_timezone(&Utc))
                .map_err(|_| DecodeError::InvalidDate(raw.clone()))?,
        ),
        None => None,
    };

    Ok(Banner {
        priority,
        level,
        message_id,
        message: dialects::to_markdown(&body.message),
        expiration_date,
    })
}

/// Decode a fetched batch into banners, isolating failures per entry.
///
/// An absent batch and a batch without a value map are equivalent: both fail
/// with [`DecodeError::MissingBatch`]. A malformed entry lands in
/// `rejected` instead of aborting the whole batch, so one bad row cannot hide
/// every other banner.
pub fn decode_all(batch: Option<BannerBatch>) -> Result<DecodedBatch, DecodeError> {
    let value = batch
        .and_then(|batch| batch.value)
        .ok_or(DecodeError::MissingBatch)?;

    let mut decoded = DecodedBatch::default();
    for (key, body) in &value {
        match decode_entry(key, body) {
            Ok(banner) => decoded.banners.push(banner),
            Err(err) => decoded.rejected.push((key.clone(), err)),
        }
    }

    Ok(decoded)
}
