//! Represents an object (artifact) stored in a bucket.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single object (binary blob) within a bucket, addressed by its key.
///
/// Holds metadata only, never the content bytes. In list responses the
/// server may omit `lastModified`; the field then defaults to the current
/// instant, matching the service's documented behavior.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    /// Object key (path-like identifier within the bucket).
    pub key: String,

    /// Size in bytes.
    #[serde(default)]
    pub size: u64,

    /// Timestamp when the object was last modified.
    #[serde(default = "Utc::now")]
    pub last_modified: DateTime<Utc>,

    /// Server-assigned opaque version/content identifier, without quotes.
    #[serde(default)]
    pub etag: String,

    /// Content type (MIME type).
    #[serde(default)]
    pub content_type: String,

    /// Custom metadata (`x-amz-meta-*` entries with the prefix stripped).
    #[serde(default)]
    pub metadata: HashMap<String, String>,
}

/// Result of listing objects in a bucket.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListObjectsResult {
    /// Objects in server order.
    #[serde(rename = "contents", default)]
    pub objects: Vec<Object>,

    /// The prefix filter this listing was produced under.
    #[serde(default)]
    pub prefix: String,

    /// Maximum number of keys the server considered for this page.
    #[serde(default = "default_max_keys")]
    pub max_keys: usize,

    /// Whether the listing was truncated at `max_keys`.
    #[serde(default)]
    pub is_truncated: bool,

    /// Common prefixes rolled up by the `delimiter` parameter, if any.
    #[serde(default)]
    pub common_prefixes: Vec<String>,
}

fn default_max_keys() -> usize {
    1000
}
