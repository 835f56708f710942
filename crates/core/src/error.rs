use crate::validation::ValidationErrors;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Malformed JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("Validation failed for {schema}: {errors}")]
    Validation {
        schema: &'static str,
        errors: ValidationErrors,
    },

    #[error("Unknown measure key: '{0}'")]
    UnknownMeasure(String),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}
