use crate::types::ItemId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MenuError {
    /// Network or server failure surfaced by the remote client. The message is
    /// forwarded verbatim into store state and diagnostics.
    #[error("Remote call failed: {0}")]
    Remote(String),

    /// A write's confirmation query matched zero rows and the store was configured
    /// to treat that as a failure.
    #[error("No row matched id {0}")]
    NotFound(ItemId),

    #[error("Config error: {0}")]
    Config(String),

    /// A store context lookup on a context that was never provided a store.
    #[error("Store context accessed outside a provider")]
    MissingStoreContext,
}

pub type Result<T> = std::result::Result<T, MenuError>;
