//! Data models for the artifact store client.
//!
//! These are immutable value objects constructed from server responses.
//! They serialize naturally as JSON via `serde` using the service's
//! camelCase field names; the client never persists or mutates them.

pub mod bucket;
pub mod multipart;
pub mod object;
pub mod supplychain;

pub use bucket::{Bucket, ListBucketsResult};
pub use multipart::{CompletedPart, MultipartUpload};
pub use object::{ListObjectsResult, Object};
pub use supplychain::{Attestation, Sbom, Signature, VerificationResult};
