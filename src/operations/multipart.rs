//! Multipart upload operations.
//!
//! A strict four-call protocol: initiate, upload parts, then complete or
//! abort. Every call is an independent, stateless HTTP request; part
//! ordering and contiguity are validated server-side, never here.

use reqwest::header;
use reqwest::{Body, Method};
use serde::{Deserialize, Serialize};
use tokio::io::AsyncRead;
use tokio_util::io::ReaderStream;
use tracing::debug;

use crate::errors::Result;
use crate::models::{CompletedPart, MultipartUpload};
use crate::operations::objects::UploadOptions;
use crate::transport::Transport;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct InitiateResponse {
    upload_id: String,
}

#[derive(Serialize)]
struct CompleteRequest<'a> {
    parts: &'a [CompletedPart],
}

pub(crate) async fn initiate(
    transport: &Transport,
    bucket: &str,
    key: &str,
    opts: UploadOptions,
) -> Result<MultipartUpload> {
    debug!(bucket, key, "initiating multipart upload");
    let mut req = transport
        .request(Method::POST, &format!("/s3/{bucket}/{key}"))
        .query(&[("uploads", "")])
        .header(header::CONTENT_TYPE, opts.content_type.as_str());
    for (name, value) in &opts.metadata {
        req = req.header(format!("X-Amz-Meta-{name}"), value.as_str());
    }

    let resp: InitiateResponse = transport.send_json(req).await?;
    Ok(MultipartUpload {
        upload_id: resp.upload_id,
        bucket: bucket.to_string(),
        key: key.to_string(),
    })
}

/// Upload one part and return its quote-stripped ETag, which the caller
/// collects into a [`CompletedPart`] for the completion call.
pub(crate) async fn upload_part<R>(
    transport: &Transport,
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
    debug!(bucket, key, upload_id, part_number, "uploading part");
    let mut req = transport
        .request(Method::PUT, &format!("/s3/{bucket}/{key}"))
        .query(&[("uploadId", upload_id)])
        .query(&[("partNumber", part_number)]);
    if size > 0 {
        req = req.header(header::CONTENT_LENGTH, size);
    }

    let body = Body::wrap_stream(ReaderStream::new(data));
    let resp = transport.send(req.body(body)).await?;
    let etag = resp
        .headers()
        .get(header::ETAG)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .trim_matches('"')
        .to_string();
    Ok(etag)
}

/// Complete the upload with the parts in exactly the order supplied.
pub(crate) async fn complete(
    transport: &Transport,
    bucket: &str,
    key: &str,
    upload_id: &str,
    parts: &[CompletedPart],
) -> Result<()> {
    debug!(bucket, key, upload_id, parts = parts.len(), "completing multipart upload");
    let req = transport
        .request(Method::POST, &format!("/s3/{bucket}/{key}"))
        .query(&[("uploadId", upload_id)])
        .json(&CompleteRequest { parts });
    transport.send(req).await?;
    Ok(())
}

pub(crate) async fn abort(
    transport: &Transport,
    bucket: &str,
    key: &str,
    upload_id: &str,
) -> Result<()> {
    debug!(bucket, key, upload_id, "aborting multipart upload");
    let req = transport
        .request(Method::DELETE, &format!("/s3/{bucket}/{key}"))
        .query(&[("uploadId", upload_id)]);
    transport.send(req).await?;
    Ok(())
}
