use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReiError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Arithmetic overflow in {context}")]
    ArithmeticOverflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ReiError {
    fn from(e: serde_json::Error) -> Self {
        ReiError::SerializationError(e.to_string())
    }
}
