//! Supply-chain security operations against the `/supplychain` namespace.

use std::collections::HashMap;

use reqwest::Method;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::errors::Result;
use crate::models::{Attestation, Sbom, Signature, VerificationResult};
use crate::transport::Transport;

#[derive(Deserialize)]
struct SignaturesResponse {
    #[serde(default)]
    signatures: Vec<Signature>,
}

#[derive(Deserialize)]
struct AttestationsResponse {
    #[serde(default)]
    attestations: Vec<Attestation>,
}

pub(crate) async fn sign_artifact(
    transport: &Transport,
    bucket: &str,
    key: &str,
    private_key: &str,
) -> Result<Signature> {
    debug!(bucket, key, "signing artifact");
    let req = transport
        .request(Method::POST, &format!("/supplychain/sign/{bucket}/{key}"))
        .json(&json!({ "privateKey": private_key }));
    transport.send_json(req).await
}

pub(crate) async fn get_signatures(
    transport: &Transport,
    bucket: &str,
    key: &str,
) -> Result<Vec<Signature>> {
    let req = transport.request(
        Method::GET,
        &format!("/supplychain/signatures/{bucket}/{key}"),
    );
    let resp: SignaturesResponse = transport.send_json(req).await?;
    Ok(resp.signatures)
}

pub(crate) async fn verify_signatures(
    transport: &Transport,
    bucket: &str,
    key: &str,
    public_keys: &[String],
) -> Result<VerificationResult> {
    debug!(bucket, key, keys = public_keys.len(), "verifying signatures");
    let req = transport
        .request(Method::POST, &format!("/supplychain/verify/{bucket}/{key}"))
        .json(&json!({ "publicKeys": public_keys }));
    transport.send_json(req).await
}

pub(crate) async fn attach_sbom(
    transport: &Transport,
    bucket: &str,
    key: &str,
    format: &str,
    content: &str,
) -> Result<Sbom> {
    debug!(bucket, key, format, "attaching SBOM");
    let req = transport
        .request(Method::POST, &format!("/supplychain/sbom/{bucket}/{key}"))
        .json(&json!({ "format": format, "content": content }));
    transport.send_json(req).await
}

pub(crate) async fn get_sbom(transport: &Transport, bucket: &str, key: &str) -> Result<Sbom> {
    let req = transport.request(Method::GET, &format!("/supplychain/sbom/{bucket}/{key}"));
    transport.send_json(req).await
}

pub(crate) async fn add_attestation(
    transport: &Transport,
    bucket: &str,
    key: &str,
    attestation_type: &str,
    data: &HashMap<String, Value>,
) -> Result<Attestation> {
    debug!(bucket, key, attestation_type, "adding attestation");
    let req = transport
        .request(
            Method::POST,
            &format!("/supplychain/attestations/{bucket}/{key}"),
        )
        .json(&json!({ "type": attestation_type, "data": data }));
    transport.send_json(req).await
}

pub(crate) async fn get_attestations(
    transport: &Transport,
    bucket: &str,
    key: &str,
) -> Result<Vec<Attestation>> {
    let req = transport.request(
        Method::GET,
        &format!("/supplychain/attestations/{bucket}/{key}"),
    );
    let resp: AttestationsResponse = transport.send_json(req).await?;
    Ok(resp.attestations)
}
