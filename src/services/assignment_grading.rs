use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub(crate) enum MarksError {
    #[error("Marks are required")]
    Missing,
    #[error("Marks must be a number")]
    NotANumber,
    #[error("Marks cannot be negative")]
    Negative,
}

/// Marks arrive as raw JSON so that `"10"` is rejected as not-a-number
/// rather than as a malformed body.
pub(crate) fn validate_marks(raw: Option<&serde_json::Value>) -> Result<f64, MarksError> {
    let value = match raw {
        None | Some(serde_json::Value::Null) => return Err(MarksError::Missing),
        Some(value) => value,
    };

    let marks = value.as_f64().ok_or(MarksError::NotANumber)?;
    if marks < 0.0 {
        return Err(MarksError::Negative);
    }

    Ok(marks)
}

/// Empty feedback leaves the stored feedback untouched.
pub(crate) fn normalize_feedback(feedback: Option<&str>) -> Option<&str> {
    feedback.filter(|value| !value.is_empty())
}
