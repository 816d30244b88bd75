use thiserror::Error;

#[derive(Debug, Error)]
pub enum CalcInvestError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Decimal overflow in {context}")]
    Overflow { context: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl CalcInvestError {
    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        CalcInvestError::Overflow {
            context: context.into(),
        }
    }
}

impl From<serde_json::Error> for CalcInvestError {
    fn from(e: serde_json::Error) -> Self {
        CalcInvestError::SerializationError(e.to_string())
    }
}
