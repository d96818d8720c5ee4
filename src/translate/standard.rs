use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::platform::{LegacyCredential, LegacySignature};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialDescriptor {
    #[serde(rename = "type")]
    pub type_: String,
    pub id:    String,
}

impl CredentialDescriptor {
    pub fn new(type_: impl Into<String>, id: impl Into<String>) -> Self {
        Self { type_: type_.into(), id: id.into() }
    }
}

// ---- create ----

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialCreationOptions {
    #[serde(default)]
    pub public_key: Option<PublicKeyCreationOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyCreationOptions {
    #[serde(default)]
    pub rp:         RelyingParty,
    #[serde(default)]
    pub user:       UserEntity,
    #[serde(default)]
    pub parameters: Vec<CredentialParameters>,
    /// Accepted and ignored; the legacy platform has no timeout.
    #[serde(default)]
    pub timeout:    Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelyingParty {
    #[serde(default)]
    pub id:   Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserEntity {
    #[serde(default)]
    pub id:           Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub name:         Option<String>,
    #[serde(default)]
    pub icon:         Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CredentialParameters {
    #[serde(rename = "type")]
    pub type_:     String,
    pub algorithm: String,
}

// ---- get ----

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialRequestOptions {
    #[serde(default)]
    pub public_key: Option<PublicKeyRequestOptions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicKeyRequestOptions {
    /// Not forwarded: the legacy call takes the adapter's ambient challenge.
    #[serde(default)]
    pub challenge:  Option<Vec<u8>>,
    /// Accepted and ignored.
    #[serde(default)]
    pub timeout:    Option<u32>,
    #[serde(default)]
    pub rp_id:      Option<String>,
    #[serde(default)]
    pub allow_list: Option<Vec<CredentialDescriptor>>,
}

// ---- results ----

/// Standardized registration result. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult {
    credential:  CredentialDescriptor,
    public_key:  serde_json::Value,
    attestation: Vec<u8>,
}

impl RegistrationResult {
    pub(crate) fn new(
        credential: CredentialDescriptor,
        public_key: serde_json::Value,
        attestation: Vec<u8>,
    ) -> Self {
        Self { credential, public_key, attestation }
    }

    pub fn credential(&self) -> &CredentialDescriptor { &self.credential }
    pub fn public_key(&self) -> &serde_json::Value { &self.public_key }
    pub fn attestation(&self) -> &[u8] { &self.attestation }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResponse {
    client_data_json:   Vec<u8>,
    authenticator_data: Vec<u8>,
    signature:          Vec<u8>,
}

impl AssertionResponse {
    pub fn client_data_json(&self) -> &[u8] { &self.client_data_json }
    pub fn authenticator_data(&self) -> &[u8] { &self.authenticator_data }
    pub fn signature(&self) -> &[u8] { &self.signature }
}

/// Standardized assertion result. Fields are read-only once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssertionResult {
    raw_id:   String,
    response: AssertionResponse,
}

impl AssertionResult {
    pub(crate) fn new(
        raw_id: String,
        client_data_json: Vec<u8>,
        authenticator_data: Vec<u8>,
        signature: Vec<u8>,
    ) -> Self {
        Self {
            raw_id,
            response: AssertionResponse { client_data_json, authenticator_data, signature },
        }
    }

    pub fn raw_id(&self) -> &str { &self.raw_id }
    pub fn response(&self) -> &AssertionResponse { &self.response }
}

/// Outcome of `create`. A legacy response with an unrecognized type tag is
/// handed back untouched.
#[derive(Debug, Clone, PartialEq)]
pub enum Registration {
    Standard(Arc<RegistrationResult>),
    Legacy(LegacyCredential),
}

/// Outcome of `get`; same passthrough rule as [`Registration`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Assertion {
    Standard(Arc<AssertionResult>),
    Legacy(LegacySignature),
}

impl Registration {
    pub fn standard(&self) -> Option<&RegistrationResult> {
        match self {
            Self::Standard(result) => Some(result.as_ref()),
            Self::Legacy(_) => None,
        }
    }
}

impl Assertion {
    pub fn standard(&self) -> Option<&AssertionResult> {
        match self {
            Self::Standard(result) => Some(result.as_ref()),
            Self::Legacy(_) => None,
        }
    }
}
