//! The client facade.
//!
//! [`Client`] owns one shared transport and delegates to the operation
//! modules. It is `Send + Sync`; concurrent calls share the underlying
//! connection pool.

use std::collections::HashMap;

use serde_json::Value;
use tokio::io::{AsyncRead, AsyncWrite};

use crate::config::Config;
use crate::errors::Result;
use crate::models::{
    Attestation, CompletedPart, ListBucketsResult, ListObjectsResult, MultipartUpload, Object,
    Sbom, Signature, VerificationResult,
};
use crate::operations::objects::{DownloadOptions, ListOptions, UploadOptions};
use crate::operations::{multipart, objects, supplychain};
use crate::transport::Transport;

/// Artifact store client.
///
/// Every method issues exactly one HTTP request; there is no internal
/// retry, caching, or parallelism. Errors are mapped per status code, see
/// [`Error`](crate::Error).
pub struct Client {
    transport: Transport,
}

impl Client {
    /// Create a client from the given configuration.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) when the base URL
    /// is empty or does not use the http/https scheme.
    pub fn new(config: Config) -> Result<Self> {
        Ok(Self {
            transport: Transport::new(config)?,
        })
    }

    /// Replace the bearer token used for subsequent requests.
    pub fn set_token(&self, token: impl Into<String>) {
        self.transport.set_token(token);
    }

    // Bucket operations

    /// Create a new bucket. Fails with `Conflict` if it already exists.
    pub async fn create_bucket(&self, bucket: &str) -> Result<()> {
        objects::create_bucket(&self.transport, bucket).await
    }

    /// Delete a bucket. Fails with `NotFound` if it does not exist.
    pub async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        objects::delete_bucket(&self.transport, bucket).await
    }

    /// List all buckets.
    pub async fn list_buckets(&self) -> Result<ListBucketsResult> {
        objects::list_buckets(&self.transport).await
    }

    // Object operations

    /// Upload an artifact, streaming `data` as the request body.
    ///
    /// `size` is sent as `Content-Length` when non-zero. Each metadata
    /// entry becomes an `X-Amz-Meta-{key}` header. If a progress callback
    /// is set it is invoked with cumulative bytes read from `data`.
    pub async fn upload<R>(
        &self,
        bucket: &str,
        key: &str,
        data: R,
        size: u64,
        opts: UploadOptions,
    ) -> Result<()>
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        objects::upload(&self.transport, bucket, key, data, size, opts).await
    }

    /// Download an artifact into `writer`.
    ///
    /// The body is transferred in 8192-byte chunks; if a progress callback
    /// is set it is invoked with cumulative bytes after each chunk. Set
    /// [`DownloadOptions::range`] to fetch part of the object.
    pub async fn download<W>(
        &self,
        bucket: &str,
        key: &str,
        writer: &mut W,
        opts: DownloadOptions,
    ) -> Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        objects::download(&self.transport, bucket, key, writer, opts).await
    }

    /// Download an artifact into a freshly allocated buffer.
    pub async fn download_to_vec(
        &self,
        bucket: &str,
        key: &str,
        opts: DownloadOptions,
    ) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.download(bucket, key, &mut buf, opts).await?;
        Ok(buf)
    }

    /// Fetch object metadata via a HEAD request, without the body.
    pub async fn get_object_metadata(&self, bucket: &str, key: &str) -> Result<Object> {
        objects::get_object_metadata(&self.transport, bucket, key).await
    }

    /// Delete an object.
    pub async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        objects::delete_object(&self.transport, bucket, key).await
    }

    /// List objects in a bucket, optionally filtered by prefix.
    pub async fn list_objects(&self, bucket: &str, opts: ListOptions) -> Result<ListObjectsResult> {
        objects::list_objects(&self.transport, bucket, opts).await
    }

    /// Copy an object server-side.
    pub async fn copy_object(
        &self,
        source_bucket: &str,
        source_key: &str,
        dest_bucket: &str,
        dest_key: &str,
    ) -> Result<()> {
        objects::copy_object(&self.transport, source_bucket, source_key, dest_bucket, dest_key)
            .await
    }

    // Multipart upload operations

    /// Start a multipart upload session.
    ///
    /// Content type and metadata are taken from `opts`; its progress
    /// callback is unused here.
    pub async fn initiate_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        opts: UploadOptions,
    ) -> Result<MultipartUpload> {
        multipart::initiate(&self.transport, bucket, key, opts).await
    }

    /// Upload one part (1-based `part_number`) and return its ETag.
    ///
    /// Collect the returned ETags into [`CompletedPart`]s for
    /// [`complete_multipart_upload`](Self::complete_multipart_upload).
    pub async fn upload_part<R>(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        part_number: u32,
        data: R,
        size: u64,
    ) -> Result<String>
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        multipart::upload_part(&self.transport, bucket, key, upload_id, part_number, data, size)
            .await
    }

    /// Complete a multipart upload. Parts are sent in the order supplied;
    /// the server validates numbering and contiguity.
    pub async fn complete_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
        parts: &[CompletedPart],
    ) -> Result<()> {
        multipart::complete(&self.transport, bucket, key, upload_id, parts).await
    }

    /// Abort a multipart upload, discarding uploaded parts.
    pub async fn abort_multipart_upload(
        &self,
        bucket: &str,
        key: &str,
        upload_id: &str,
    ) -> Result<()> {
        multipart::abort(&self.transport, bucket, key, upload_id).await
    }

    // Supply chain operations

    /// Sign an artifact with a PEM-encoded private key.
    pub async fn sign_artifact(
        &self,
        bucket: &str,
        key: &str,
        private_key: &str,
    ) -> Result<Signature> {
        supplychain::sign_artifact(&self.transport, bucket, key, private_key).await
    }

    /// Fetch all signatures recorded for an artifact.
    pub async fn get_signatures(&self, bucket: &str, key: &str) -> Result<Vec<Signature>> {
        supplychain::get_signatures(&self.transport, bucket, key).await
    }

    /// Verify an artifact's signatures against PEM-encoded public keys.
    pub async fn verify_signatures(
        &self,
        bucket: &str,
        key: &str,
        public_keys: &[String],
    ) -> Result<VerificationResult> {
        supplychain::verify_signatures(&self.transport, bucket, key, public_keys).await
    }

    /// Attach an SBOM (e.g. format "spdx" or "cyclonedx") to an artifact.
    pub async fn attach_sbom(
        &self,
        bucket: &str,
        key: &str,
        format: &str,
        content: &str,
    ) -> Result<Sbom> {
        supplychain::attach_sbom(&self.transport, bucket, key, format, content).await
    }

    /// Fetch an artifact's SBOM. Fails with `NotFound` if none is attached.
    pub async fn get_sbom(&self, bucket: &str, key: &str) -> Result<Sbom> {
        supplychain::get_sbom(&self.transport, bucket, key).await
    }

    /// Record an attestation (e.g. type "build", "test", "scan") for an
    /// artifact.
    pub async fn add_attestation(
        &self,
        bucket: &str,
        key: &str,
        attestation_type: &str,
        data: &HashMap<String, Value>,
    ) -> Result<Attestation> {
        supplychain::add_attestation(&self.transport, bucket, key, attestation_type, data).await
    }

    /// Fetch all attestations recorded for an artifact.
    pub async fn get_attestations(&self, bucket: &str, key: &str) -> Result<Vec<Attestation>> {
        supplychain::get_attestations(&self.transport, bucket, key).await
    }
}
