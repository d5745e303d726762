use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Accumulated ISBN-13 → thumbnail-URL mapping. Ordered so the persisted
/// file stays stable and diffable between writes.
pub type ThumbnailMap = BTreeMap<String, String>;

// ── Upstream envelope ────────────────────────────────────────────

/// Raw shape of a Google Books volumes response, restricted to the fields
/// the service requests. Every level defaults so partial payloads parse.
#[derive(Debug, Default, Deserialize)]
pub struct ApiEnvelope {
    #[serde(default)]
    pub items: Vec<VolumeItem>,
}

impl ApiEnvelope {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeItem {
    #[serde(default)]
    pub volume_info: VolumeInfo,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    #[serde(default)]
    pub industry_identifiers: Vec<IndustryIdentifier>,
    pub image_links: Option<ImageLinks>,
}

#[derive(Debug, Deserialize)]
pub struct IndustryIdentifier {
    #[serde(rename = "type")]
    pub id_type: String,
    pub identifier: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

// ── Stats ────────────────────────────────────────────────────────

/// Snapshot served by GET /stats. Counters are process-lifetime and reset
/// on restart.
#[derive(Debug, Serialize)]
pub struct ServiceStats {
    pub api_hits: u64,
    pub cache_hits: u64,
    pub error_count: u64,
    pub service_start_time: String,
    pub uptime: String,
    pub cache_countdown: String,
}
