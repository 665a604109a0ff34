/// Construction-time failures: rule specifications, model artifacts.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid rule for {field}: {reason}")]
    InvalidRule { field: String, reason: String },

    #[error("Duplicate rule for field {0}")]
    DuplicateField(String),

    #[error("Invalid model artifact: {0}")]
    Artifact(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Input data violates a field rule. Always a caller-input defect.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("No value provided for {field}")]
    MissingField { field: String },

    #[error("{field} does not allow missing values (row {row})")]
    NullNotAllowed { field: String, row: usize },

    #[error("{field} is outside the valid range [{min}, {max}]: got {value} (row {row})")]
    OutOfRange {
        field: String,
        row: usize,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("{field} is not one of the valid categories: got {value} (row {row})")]
    UnknownCategory { field: String, row: usize, value: f64 },

    #[error("{field} must be a whole number: got {value} (row {row})")]
    NotInteger { field: String, row: usize, value: f64 },

    #[error("{field} must be numeric or null (row {row})")]
    NonNumeric { field: String, row: usize },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &str {
        match self {
            Self::MissingField { field }
            | Self::NullNotAllowed { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::UnknownCategory { field, .. }
            | Self::NotInteger { field, .. }
            | Self::NonNumeric { field, .. } => field,
        }
    }

    /// Stable snake_case name of the violation kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingField { .. } => "missing_field",
            Self::NullNotAllowed { .. } => "null_not_allowed",
            Self::OutOfRange { .. } => "out_of_range",
            Self::UnknownCategory { .. } => "unknown_category",
            Self::NotInteger { .. } => "not_integer",
            Self::NonNumeric { .. } => "non_numeric",
        }
    }
}

/// The wrapped model rejected structurally valid input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ModelError {
    #[error("Model feature {0} is not present in the batch")]
    MissingFeature(String),

    #[error("Model has no imputation for missing {feature} (row {row})")]
    MissingValue { feature: String, row: usize },

    #[error("Model returned {got} predictions for {expected} rows")]
    LengthMismatch { expected: usize, got: usize },

    #[error("Model rejected input: {0}")]
    Rejected(String),
}

/// Failure of a validate-then-predict call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PredictError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Model(#[from] ModelError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_exposes_field_and_kind() {
        let err = ValidationError::UnknownCategory {
            field: "SEX".to_string(),
            row: 0,
            value: 2.0,
        };
        assert_eq!(err.field(), "SEX");
        assert_eq!(err.kind(), "unknown_category");
        assert!(err.to_string().contains("SEX"));
    }

    #[test]
    fn predict_error_is_transparent() {
        let err: PredictError = ValidationError::MissingField {
            field: "PREMIUM".to_string(),
        }
        .into();
        assert_eq!(err.to_string(), "No value provided for PREMIUM");
    }
}
