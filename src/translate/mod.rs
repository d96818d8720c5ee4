pub(crate) mod get_assertion;
pub(crate) mod make_credential;
pub mod standard;

pub use standard::{
    Assertion, AssertionResponse, AssertionResult, CredentialCreationOptions,
    CredentialDescriptor, CredentialParameters, CredentialRequestOptions,
    PublicKeyCreationOptions, PublicKeyRequestOptions, Registration, RegistrationResult,
    RelyingParty, UserEntity,
};

use crate::config::{LEGACY_RS256, LEGACY_TYPE, STANDARD_RS256, STANDARD_TYPE};

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("missing parameter: {0}")]       MissingParameter(&'static str),
    #[error("malformed public key: {0}")]    PublicKey(String),
    #[error("platform: {0}")]                Platform(#[from] crate::platform::PlatformError),
    #[error("ledger: {0}")]                  Ledger(#[from] crate::ledger::LedgerError),
}

/// `"public-key"` becomes the legacy tag; any other tag is kept as is.
pub fn standard_type_to_legacy(type_: &str) -> &str {
    if type_ == STANDARD_TYPE { LEGACY_TYPE } else { type_ }
}

pub fn legacy_type_to_standard(type_: &str) -> &str {
    if type_ == LEGACY_TYPE { STANDARD_TYPE } else { type_ }
}

/// `"RS256"` becomes the legacy suite name; any other algorithm is kept.
pub fn standard_algorithm_to_legacy(algorithm: &str) -> &str {
    if algorithm == STANDARD_RS256 { LEGACY_RS256 } else { algorithm }
}

pub fn descriptor_to_legacy(descriptor: &CredentialDescriptor) -> CredentialDescriptor {
    CredentialDescriptor::new(standard_type_to_legacy(&descriptor.type_), descriptor.id.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rs256_maps_to_legacy_suite() {
        assert_eq!(standard_algorithm_to_legacy("RS256"), "RSASSA-PKCS1-v1_5");
        assert_eq!(standard_algorithm_to_legacy("RS256"), standard_algorithm_to_legacy("RS256"));
    }

    #[test]
    fn test_other_algorithms_pass_through() {
        for alg in ["ES256", "PS256", "rs256", "", "RSASSA-PKCS1-v1_5"] {
            assert_eq!(standard_algorithm_to_legacy(alg), alg);
        }
    }

    #[test]
    fn test_type_tag_round_trip() {
        assert_eq!(standard_type_to_legacy("public-key"), "FIDO_2_0");
        assert_eq!(legacy_type_to_standard(standard_type_to_legacy("public-key")), "public-key");
        assert_eq!(standard_type_to_legacy("future-type"), "future-type");
        assert_eq!(legacy_type_to_standard("future-type"), "future-type");
    }

    #[test]
    fn test_descriptor_round_trip_keeps_id() {
        let original = CredentialDescriptor::new("public-key", "AAECAw");
        let legacy = descriptor_to_legacy(&original);
        assert_eq!(legacy, CredentialDescriptor::new("FIDO_2_0", "AAECAw"));
        assert_eq!(legacy_type_to_standard(&legacy.type_), original.type_);
        assert_eq!(legacy.id, original.id);
    }
}
