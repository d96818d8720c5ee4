use serde::{Deserialize, Serialize};

use crate::translate::CredentialDescriptor;

/// Account object handed to the legacy `makeCredential`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyAccount {
    pub rp_display_name:   String,
    pub user_display_name: String,
    pub user_id:           String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_name:      Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_image_uri: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyParameter {
    #[serde(rename = "type")]
    pub type_:     String,
    pub algorithm: String,
}

/// What the legacy `makeCredential` resolves with. `public_key` is the
/// serialized JWK.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyCredential {
    #[serde(rename = "type")]
    pub type_:       String,
    pub id:          String,
    pub public_key:  String,
    pub attestation: Vec<u8>,
}

/// Acceptance filter for the legacy `getAssertion`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacyFilter {
    pub accept: Vec<CredentialDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegacySignature {
    #[serde(rename = "type")]
    pub type_:     String,
    pub id:        String,
    pub signature: LegacySignatureData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacySignatureData {
    pub client_data: Vec<u8>,
    pub authnr_data: Vec<u8>,
    pub signature:   Vec<u8>,
}
