//! Client SDK for the artifact store HTTP API.
//!
//! Wraps bucket/object CRUD, multipart uploads, and supply-chain security
//! operations (signing, SBOMs, attestations) behind a typed interface.
//! Every method maps to exactly one HTTP request; the server owns all
//! sequencing and consistency guarantees. Uploads and downloads stream
//! without buffering whole objects, and both can report transfer progress
//! through a callback.
//!
//! ```no_run
//! use astore_client::{Client, Config, UploadOptions};
//!
//! # async fn demo() -> Result<(), astore_client::Error> {
//! let client = Client::new(
//!     Config::new("https://artifacts.example.com").with_token("api-token"),
//! )?;
//!
//! client.create_bucket("releases").await?;
//! let data: &[u8] = b"artifact bytes";
//! client
//!     .upload("releases", "app-1.0.0.tar.gz", data, data.len() as u64, UploadOptions::default())
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod errors;
pub mod models;
mod operations;
mod progress;
mod transport;

pub use client::Client;
pub use config::Config;
pub use errors::{Error, Result};
pub use models::{
    Attestation, Bucket, CompletedPart, ListBucketsResult, ListObjectsResult, MultipartUpload,
    Object, Sbom, Signature, VerificationResult,
};
pub use operations::objects::{ByteRange, DownloadOptions, ListOptions, UploadOptions};
pub use progress::{ProgressCallback, ProgressReader, ProgressWriter};
