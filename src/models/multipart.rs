//! Represents multipart upload sessions and completed parts.

use serde::{Deserialize, Serialize};

/// A multipart upload session, created by the initiate call.
///
/// The upload id is assigned by the server and opaque to the client; all
/// sequencing guarantees are server-side.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MultipartUpload {
    /// Server-assigned upload id, passed back to every part call.
    pub upload_id: String,

    /// Bucket being uploaded into.
    pub bucket: String,

    /// Object key being uploaded.
    pub key: String,
}

/// A single uploaded part, collected by the caller for the completion call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompletedPart {
    /// Part number (1-based).
    pub part_number: u32,

    /// ETag returned by the part upload, without quotes.
    pub etag: String,
}
