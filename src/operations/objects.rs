//! Bucket and object operations against the `/s3` namespace.
//!
//! Uploads stream the caller's reader as the request body and downloads
//! write to the caller's sink chunk by chunk, so neither path buffers a
//! whole object in memory.

use std::collections::HashMap;
use std::fmt;
use std::io;

use chrono::{DateTime, Utc};
use futures::StreamExt;
use reqwest::header;
use reqwest::{Body, Method};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio_util::io::{ReaderStream, StreamReader};
use tracing::{debug, warn};

use crate::errors::Result;
use crate::models::{ListBucketsResult, ListObjectsResult, Object};
use crate::progress::{ProgressCallback, ProgressReader, ProgressWriter};
use crate::transport::Transport;

/// Download chunk size; each chunk written to the sink triggers one
/// progress callback.
const DOWNLOAD_CHUNK_SIZE: usize = 8192;

const META_HEADER_PREFIX: &str = "x-amz-meta-";

/// A single byte range for the `Range` request header.
///
/// Renders in the `bytes=` form, e.g. `bytes=0-1023`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ByteRange {
    /// All bytes between start and end inclusive (`bytes=x-y`).
    Inclusive(u64, u64),
    /// All bytes starting from the given offset (`bytes=x-`).
    StartingAt(u64),
    /// The last n bytes (`bytes=-n`).
    Last(u64),
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            ByteRange::Inclusive(start, end) => write!(f, "bytes={start}-{end}"),
            ByteRange::StartingAt(start) => write!(f, "bytes={start}-"),
            ByteRange::Last(n) => write!(f, "bytes=-{n}"),
        }
    }
}

/// Options for uploads and for initiating multipart uploads.
pub struct UploadOptions {
    /// MIME type of the artifact.
    pub content_type: String,

    /// Custom metadata, sent as one `X-Amz-Meta-{key}` header per entry.
    pub metadata: HashMap<String, String>,

    /// Invoked with cumulative bytes read from the source. Unused by the
    /// multipart initiate call.
    pub progress: Option<ProgressCallback>,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            content_type: "application/octet-stream".to_string(),
            metadata: HashMap::new(),
            progress: None,
        }
    }
}

/// Options for downloads.
#[derive(Default)]
pub struct DownloadOptions {
    /// Byte range to request instead of the whole object.
    pub range: Option<ByteRange>,

    /// Invoked with cumulative bytes written to the sink.
    pub progress: Option<ProgressCallback>,
}

/// Options for listing objects.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Key prefix filter; omitted from the request when empty.
    pub prefix: Option<String>,

    /// Maximum number of keys to return; omitted when zero.
    pub max_keys: Option<usize>,

    /// Delimiter for hierarchical listing; rolled-up prefixes come back in
    /// `common_prefixes`.
    pub delimiter: Option<String>,
}

pub(crate) async fn create_bucket(transport: &Transport, bucket: &str) -> Result<()> {
    debug!(bucket, "creating bucket");
    transport
        .send(transport.request(Method::PUT, &format!("/s3/{bucket}")))
        .await?;
    Ok(())
}

pub(crate) async fn delete_bucket(transport: &Transport, bucket: &str) -> Result<()> {
    debug!(bucket, "deleting bucket");
    transport
        .send(transport.request(Method::DELETE, &format!("/s3/{bucket}")))
        .await?;
    Ok(())
}

pub(crate) async fn list_buckets(transport: &Transport) -> Result<ListBucketsResult> {
    transport
        .send_json(transport.request(Method::GET, "/s3"))
        .await
}

pub(crate) async fn upload<R>(
    transport: &Transport,
    bucket: &str,
    key: &str,
    data: R,
    size: u64,
    opts: UploadOptions,
) -> Result<()>
where
    R: AsyncRead + Send + Unpin + 'static,
{
    debug!(bucket, key, size, "uploading object");
    let mut req = transport
        .request(Method::PUT, &format!("/s3/{bucket}/{key}"))
        .header(header::CONTENT_TYPE, opts.content_type.as_str());
    if size > 0 {
        req = req.header(header::CONTENT_LENGTH, size);
    }
    for (name, value) in &opts.metadata {
        req = req.header(format!("X-Amz-Meta-{name}"), value.as_str());
    }

    let reader = ProgressReader::new(data, opts.progress);
    let body = Body::wrap_stream(ReaderStream::new(reader));
    transport.send(req.body(body)).await?;
    Ok(())
}

pub(crate) async fn download<W>(
    transport: &Transport,
    bucket: &str,
    key: &str,
    writer: &mut W,
    opts: DownloadOptions,
) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    debug!(bucket, key, "downloading object");
    let mut req = transport.request(Method::GET, &format!("/s3/{bucket}/{key}"));
    if let Some(range) = &opts.range {
        req = req.header(header::RANGE, range.to_string());
    }
    let resp = transport.send(req).await?;

    let stream = resp
        .bytes_stream()
        .map(|chunk| chunk.map_err(|err| io::Error::new(io::ErrorKind::Other, err)));
    let mut reader = StreamReader::new(stream);
    let mut sink = ProgressWriter::new(writer, opts.progress);
    let mut buf = [0u8; DOWNLOAD_CHUNK_SIZE];
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        sink.write_all(&buf[..n]).await?;
    }
    sink.flush().await?;
    Ok(())
}

pub(crate) async fn get_object_metadata(
    transport: &Transport,
    bucket: &str,
    key: &str,
) -> Result<Object> {
    let resp = transport
        .send(transport.request(Method::HEAD, &format!("/s3/{bucket}/{key}")))
        .await?;
    let headers = resp.headers();

    let size = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    let etag = headers
        .get(header::ETAG)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .trim_matches('"')
        .to_string();
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    let last_modified = headers
        .get(header::LAST_MODIFIED)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| DateTime::parse_from_rfc2822(v).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| {
            warn!(bucket, key, "missing or unparseable Last-Modified header, using current time");
            Utc::now()
        });

    // Header names arrive lowercased, so the prefix match is
    // case-insensitive by construction.
    let mut metadata = HashMap::new();
    for (name, value) in headers {
        if let Some(meta_key) = name.as_str().strip_prefix(META_HEADER_PREFIX) {
            if let Ok(v) = value.to_str() {
                metadata.insert(meta_key.to_string(), v.to_string());
            }
        }
    }

    Ok(Object {
        key: key.to_string(),
        size,
        last_modified,
        etag,
        content_type,
        metadata,
    })
}

pub(crate) async fn delete_object(transport: &Transport, bucket: &str, key: &str) -> Result<()> {
    debug!(bucket, key, "deleting object");
    transport
        .send(transport.request(Method::DELETE, &format!("/s3/{bucket}/{key}")))
        .await?;
    Ok(())
}

pub(crate) async fn list_objects(
    transport: &Transport,
    bucket: &str,
    opts: ListOptions,
) -> Result<ListObjectsResult> {
    let mut req = transport.request(Method::GET, &format!("/s3/{bucket}"));
    if let Some(prefix) = opts.prefix.as_deref().filter(|p| !p.is_empty()) {
        req = req.query(&[("prefix", prefix)]);
    }
    if let Some(max_keys) = opts.max_keys.filter(|&n| n > 0) {
        req = req.query(&[("max-keys", max_keys)]);
    }
    if let Some(delimiter) = opts.delimiter.as_deref().filter(|d| !d.is_empty()) {
        req = req.query(&[("delimiter", delimiter)]);
    }
    transport.send_json(req).await
}

pub(crate) async fn copy_object(
    transport: &Transport,
    source_bucket: &str,
    source_key: &str,
    dest_bucket: &str,
    dest_key: &str,
) -> Result<()> {
    debug!(source_bucket, source_key, dest_bucket, dest_key, "copying object");
    let req = transport
        .request(Method::PUT, &format!("/s3/{dest_bucket}/{dest_key}"))
        .header(
            "X-Amz-Copy-Source",
            format!("/{source_bucket}/{source_key}"),
        );
    transport.send(req).await?;
    Ok(())
}
