/// Errors raised by the relational extraction, document and vector stores.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("{store} unavailable: {reason}")]
    Unavailable { store: String, reason: String },

    #[error("{store} query failed: {reason}")]
    QueryFailed { store: String, reason: String },

    #[error("{store} returned a malformed record: {details}")]
    MalformedRecord { store: String, details: String },
}
