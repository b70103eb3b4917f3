use serde_json::Value;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("response is missing the {key:?} key")]
    MissingKey { key: &'static str },

    #[error("unexpected shape under {key:?}: expected {expected}")]
    UnexpectedShape {
        key: &'static str,
        expected: &'static str,
    },
}

/// Take the value the API wraps under `key` (e.g. `{"user": {...}}`).
pub fn unwrap_key(mut body: Value, key: &'static str) -> Result<Value, TransportError> {
    body.get_mut(key)
        .map(Value::take)
        .ok_or(TransportError::MissingKey { key })
}

/// Take the list the API wraps under `key` (e.g. `{"users": [...]}`).
pub fn unwrap_list(body: Value, key: &'static str) -> Result<Vec<Value>, TransportError> {
    match unwrap_key(body, key)? {
        Value::Array(items) => Ok(items),
        _ => Err(TransportError::UnexpectedShape {
            key,
            expected: "an array",
        }),
    }
}
