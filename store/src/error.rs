use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend itself failed (for the memory store: a poisoned lock).
    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("value codec error: {0}")]
    Serialization(String),

    /// A stored key does not have the layout its keeper expects.
    #[error("corrupted entry: {0}")]
    Corruption(String),
}
