//! Represents a logical bucket, a top-level container for artifacts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named bucket in the artifact store.
///
/// Buckets act as namespaces for objects. The server reports the creation
/// timestamp as an ISO-8601 instant.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Bucket {
    /// Globally unique bucket name.
    pub name: String,

    /// When this bucket was created.
    pub creation_date: DateTime<Utc>,
}

/// Result of listing all buckets.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ListBucketsResult {
    /// Buckets in server order.
    #[serde(default)]
    pub buckets: Vec<Bucket>,
}
