/// Graph store errors.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("graph connection failed: {reason}")]
    Connection { reason: String },

    #[error("graph query failed: {reason}")]
    QueryFailed { reason: String },

    #[error("malformed graph record: field `{field}`: {reason}")]
    MalformedRecord { field: String, reason: String },

    #[error("unsupported query shape: {0}")]
    UnsupportedQuery(String),
}
