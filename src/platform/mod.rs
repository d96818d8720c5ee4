pub mod types;

pub use types::{
    LegacyAccount, LegacyCredential, LegacyFilter, LegacyParameter, LegacySignature,
    LegacySignatureData,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    #[error("rejected: {0}")]
    Rejected(String),
    #[error("unavailable: {0}")]
    Unavailable(String),
}

/// The legacy credential primitives the adapter drives. The platform owns
/// key generation, signing and any consent UI; this crate only reshapes
/// what goes in and comes out.
#[async_trait::async_trait]
pub trait LegacyPlatform: Send + Sync {
    async fn make_credential(
        &self,
        account: LegacyAccount,
        parameters: Vec<LegacyParameter>,
    ) -> Result<LegacyCredential, PlatformError>;

    async fn get_assertion(
        &self,
        challenge: Vec<u8>,
        filter: LegacyFilter,
    ) -> Result<LegacySignature, PlatformError>;
}
