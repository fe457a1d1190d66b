use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum PricingError {
    /// A required feature was absent. The caller must fix its input.
    #[error("missing required field: {0}")]
    MissingField(&'static str),

    #[error("invalid value for {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    /// The prediction service could not be used for this call.
    #[error("prediction service unavailable (stage={stage}): {detail}")]
    ServiceUnavailable { stage: &'static str, detail: String },

    /// The prediction service failed and the rule-based fallback is disabled.
    #[error("price prediction unavailable: {0}")]
    PredictionUnavailable(String),
}

impl PricingError {
    pub(crate) fn unavailable(stage: &'static str, detail: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            stage,
            detail: detail.into(),
        }
    }

    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            reason: reason.into(),
        }
    }

    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Self::ServiceUnavailable { .. })
    }
}
