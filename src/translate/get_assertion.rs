use std::sync::Arc;

use crate::config::LEGACY_TYPE;
use crate::ledger::IdentityLedger;
use crate::platform::{LegacyFilter, LegacyPlatform, LegacySignature};
use super::standard::{Assertion, AssertionResult, CredentialDescriptor, CredentialRequestOptions};
use super::{TranslateError, descriptor_to_legacy};

pub(crate) async fn handle_get_assertion(
    options: &CredentialRequestOptions,
    challenge: Vec<u8>,
    platform: &dyn LegacyPlatform,
    ledger: &IdentityLedger,
) -> Result<Assertion, TranslateError> {
    let pk = options
        .public_key
        .as_ref()
        .ok_or(TranslateError::MissingParameter("publicKey"))?;

    // Candidate credentials
    let accept: Vec<CredentialDescriptor> = match &pk.allow_list {
        Some(list) => list.iter().map(descriptor_to_legacy).collect(),
        None => known_credentials(ledger).await,
    };
    tracing::debug!(candidates = accept.len(), "Requesting assertion");

    let sig = platform
        .get_assertion(challenge, LegacyFilter { accept })
        .await?;

    if sig.type_ != LEGACY_TYPE {
        tracing::debug!(type_ = %sig.type_, "Passing legacy signature through");
        return Ok(Assertion::Legacy(sig));
    }
    tracing::info!(cred_id = %sig.id, "Assertion produced");
    Ok(Assertion::Standard(Arc::new(reshape_signature(sig))))
}

/// Legacy-typed descriptors for every identity in the ledger. A ledger
/// failure yields an empty list so the ceremony can still run.
pub(crate) async fn known_credentials(ledger: &IdentityLedger) -> Vec<CredentialDescriptor> {
    match ledger.get_all().await {
        Ok(entries) => entries
            .into_iter()
            .map(|entry| CredentialDescriptor::new(LEGACY_TYPE, entry.id))
            .collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Identity ledger unreadable, using empty candidate list");
            Vec::new()
        }
    }
}

pub(crate) fn reshape_signature(sig: LegacySignature) -> AssertionResult {
    AssertionResult::new(
        sig.id,
        sig.signature.client_data,
        sig.signature.authnr_data,
        sig.signature.signature,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::IdentityRecord;
    use crate::platform::LegacySignatureData;

    #[test]
    fn test_reshape_signature_maps_fields() {
        let sig = LegacySignature {
            type_: "FIDO_2_0".into(),
            id: "cred-9".into(),
            signature: LegacySignatureData {
                client_data: b"{\"challenge\":\"x\"}".to_vec(),
                authnr_data: vec![0xaa; 37],
                signature: vec![0x30, 0x45],
            },
        };
        let result = reshape_signature(sig);
        assert_eq!(result.raw_id(), "cred-9");
        assert_eq!(result.response().client_data_json(), b"{\"challenge\":\"x\"}");
        assert_eq!(result.response().authenticator_data(), vec![0xaa; 37].as_slice());
        assert_eq!(result.response().signature(), &[0x30, 0x45]);
    }

    #[tokio::test]
    async fn test_known_credentials_from_ledger() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = IdentityLedger::new(dir.path().join("ledger.db"));
        for id in ["b", "a"] {
            let record = IdentityRecord {
                credential_id: id.into(),
                rp_display_name: "Example".into(),
                user_display_name: "Alice".into(),
                user_id: "u1".into(),
                account_name: None,
                account_image_uri: None,
            };
            ledger.store(id, record).await.unwrap();
        }

        let list = known_credentials(&ledger).await;
        assert_eq!(
            list,
            vec![
                CredentialDescriptor::new("FIDO_2_0", "a"),
                CredentialDescriptor::new("FIDO_2_0", "b"),
            ]
        );
    }

    #[tokio::test]
    async fn test_known_credentials_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let ledger = IdentityLedger::new(dir.path().join("missing").join("ledger.db"));
        assert!(known_credentials(&ledger).await.is_empty());
    }
}
