use std::sync::Arc;

use crate::config::LEGACY_TYPE;
use crate::ledger::{IdentityLedger, IdentityRecord};
use crate::platform::{LegacyAccount, LegacyCredential, LegacyParameter, LegacyPlatform};
use super::standard::{
    CredentialCreationOptions, CredentialDescriptor, Registration, RegistrationResult,
};
use super::{
    TranslateError, legacy_type_to_standard, standard_algorithm_to_legacy, standard_type_to_legacy,
};

pub(crate) async fn handle_make_credential(
    options: &CredentialCreationOptions,
    platform: &dyn LegacyPlatform,
    ledger: &IdentityLedger,
) -> Result<Registration, TranslateError> {
    // 1. Legacy request
    let (account, parameters) = build_request(options)?;

    // 2. Platform ceremony
    let cred = platform.make_credential(account.clone(), parameters).await?;

    // 3. Reshape; unknown type tags go back untouched
    if cred.type_ != LEGACY_TYPE {
        tracing::debug!(type_ = %cred.type_, "Passing legacy credential through");
        return Ok(Registration::Legacy(cred));
    }
    let result = Arc::new(reshape_credential(cred)?);

    // 4. Remember the identity
    let cred_id = result.credential().id.clone();
    ledger.store(&cred_id, identity_record(&cred_id, account)).await?;
    tracing::info!(cred_id, "Credential registered");

    Ok(Registration::Standard(result))
}

pub(crate) fn build_request(
    options: &CredentialCreationOptions,
) -> Result<(LegacyAccount, Vec<LegacyParameter>), TranslateError> {
    let pk = options
        .public_key
        .as_ref()
        .ok_or(TranslateError::MissingParameter("publicKey"))?;

    let account = LegacyAccount {
        rp_display_name: pk.rp.name.clone().ok_or(TranslateError::MissingParameter("rp.name"))?,
        user_display_name: pk
            .user
            .display_name
            .clone()
            .ok_or(TranslateError::MissingParameter("user.displayName"))?,
        user_id: pk.user.id.clone().ok_or(TranslateError::MissingParameter("user.id"))?,
        account_name: pk.user.name.clone(),
        account_image_uri: pk.user.icon.clone(),
    };

    let parameters = pk
        .parameters
        .iter()
        .map(|p| LegacyParameter {
            type_: standard_type_to_legacy(&p.type_).to_string(),
            algorithm: standard_algorithm_to_legacy(&p.algorithm).to_string(),
        })
        .collect();

    Ok((account, parameters))
}

pub(crate) fn reshape_credential(cred: LegacyCredential) -> Result<RegistrationResult, TranslateError> {
    let public_key: serde_json::Value = serde_json::from_str(&cred.public_key)
        .map_err(|e| TranslateError::PublicKey(e.to_string()))?;
    Ok(RegistrationResult::new(
        CredentialDescriptor::new(legacy_type_to_standard(&cred.type_), cred.id),
        public_key,
        cred.attestation,
    ))
}

fn identity_record(cred_id: &str, account: LegacyAccount) -> IdentityRecord {
    IdentityRecord {
        credential_id: cred_id.to_string(),
        rp_display_name: account.rp_display_name,
        user_display_name: account.user_display_name,
        user_id: account.user_id,
        account_name: account.account_name,
        account_image_uri: account.account_image_uri,
    }
}
