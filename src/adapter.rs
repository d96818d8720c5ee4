use std::sync::{Arc, Mutex, PoisonError};

use crate::error::{Error, Result};
use crate::ledger::IdentityLedger;
use crate::platform::LegacyPlatform;
use crate::translate::{
    Assertion, CredentialCreationOptions, CredentialRequestOptions, Registration, TranslateError,
    get_assertion::handle_get_assertion, make_credential::handle_make_credential,
};

/// Standard `create`/`get` on top of a [`LegacyPlatform`].
pub struct Adapter {
    platform:  Arc<dyn LegacyPlatform>,
    ledger:    IdentityLedger,
    challenge: Mutex<Vec<u8>>,
}

impl Adapter {
    pub fn new(platform: Arc<dyn LegacyPlatform>, ledger: IdentityLedger) -> Self {
        Self {
            platform,
            ledger,
            challenge: Mutex::new(Vec::new()),
        }
    }

    pub fn ledger(&self) -> &IdentityLedger {
        &self.ledger
    }

    /// Set the challenge handed to the next `get`. The per-call
    /// `publicKey.challenge` is not consulted, so concurrent `get` calls
    /// share whatever value is set here.
    pub fn set_challenge(&self, challenge: impl Into<Vec<u8>>) {
        *self.challenge.lock().unwrap_or_else(PoisonError::into_inner) = challenge.into();
    }

    /// Register a new credential.
    pub async fn create(&self, options: &CredentialCreationOptions) -> Result<Registration> {
        handle_make_credential(options, self.platform.as_ref(), &self.ledger)
            .await
            .map_err(|e| not_allowed("create", e))
    }

    /// Produce an assertion for a previously registered credential.
    pub async fn get(&self, options: &CredentialRequestOptions) -> Result<Assertion> {
        let challenge = self
            .challenge
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        handle_get_assertion(options, challenge, self.platform.as_ref(), &self.ledger)
            .await
            .map_err(|e| not_allowed("get", e))
    }
}

fn not_allowed(op: &'static str, cause: TranslateError) -> Error {
    tracing::warn!(op, error = %cause, "Operation failed");
    Error::NotAllowed
}
