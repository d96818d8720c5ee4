/// The only failure callers of [`crate::Adapter`] ever see. Causes are
/// logged, never returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("NotAllowedError: the operation is not allowed")]
    NotAllowed,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
