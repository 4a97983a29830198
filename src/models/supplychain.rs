//! Supply-chain security records: signatures, SBOMs, and attestations.
//!
//! Unlike the object listing paths, timestamps here are required; a
//! response missing one fails to decode.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A cryptographic signature recorded for an artifact.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Signature {
    /// Server-assigned signature id.
    pub id: String,

    /// Content digest of the signed artifact, `alg:hex`.
    pub artifact_digest: String,

    /// The signature value.
    pub signature: String,

    /// Signing algorithm (e.g. "RSA", "ECDSA").
    pub algorithm: String,

    /// Identity that produced the signature.
    pub signed_by: String,

    /// When the signature was recorded.
    pub timestamp: DateTime<Utc>,
}

/// A Software Bill of Materials attached to an artifact.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sbom {
    /// Server-assigned SBOM id.
    pub id: String,

    /// Content digest of the described artifact, `alg:hex`.
    pub artifact_digest: String,

    /// Format tag (e.g. "spdx", "cyclonedx").
    pub format: String,

    /// The SBOM document, opaque to the client.
    pub content: String,

    /// When the SBOM was attached.
    pub timestamp: DateTime<Utc>,
}

/// A structured claim (build, test, scan provenance) about an artifact.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Attestation {
    /// Server-assigned attestation id.
    pub id: String,

    /// Content digest of the attested artifact, `alg:hex`.
    pub artifact_digest: String,

    /// Attestation type tag (e.g. "build", "test", "scan").
    #[serde(rename = "type")]
    pub attestation_type: String,

    /// Attestation-specific structured data.
    pub data: HashMap<String, Value>,

    /// When the attestation was recorded.
    pub timestamp: DateTime<Utc>,
}

/// Result of verifying an artifact's signatures against public keys.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct VerificationResult {
    /// Whether verification succeeded.
    pub valid: bool,

    /// Human-readable verification summary.
    pub message: String,

    /// The signatures that were checked, in server order.
    #[serde(default)]
    pub signatures: Vec<Signature>,
}
