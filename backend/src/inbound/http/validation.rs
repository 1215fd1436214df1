//! Shared validation helpers for inbound HTTP adapters.
//!
//! Domain validation errors carry the user-facing message; these helpers add
//! the offending field and a machine-readable code as `details`.

use serde_json::json;

use crate::domain::{AnalyzeRequestValidationError, Error};

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValidationCode {
    MissingField,
    TooShort,
    UnknownValue,
}

impl ValidationCode {
    fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::TooShort => "too_short",
            Self::UnknownValue => "unknown_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

const CLINICAL_TEXT: FieldName = FieldName::new("clinical_text");
const TASK: FieldName = FieldName::new("task");

fn field_error(field: FieldName, code: ValidationCode, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

/// Map a rejected analysis request onto a 400 envelope.
pub(crate) fn analyze_validation_error(err: AnalyzeRequestValidationError) -> Error {
    let message = err.to_string();
    match err {
        AnalyzeRequestValidationError::MissingClinicalText => {
            field_error(CLINICAL_TEXT, ValidationCode::MissingField, message)
        }
        AnalyzeRequestValidationError::ClinicalTextTooShort => {
            field_error(CLINICAL_TEXT, ValidationCode::TooShort, message)
        }
        AnalyzeRequestValidationError::UnknownTask { value } => Error::invalid_request(message)
            .with_details(json!({
                "field": TASK.as_str(),
                "value": value,
                "code": ValidationCode::UnknownValue.as_str(),
            })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case::missing(
        AnalyzeRequestValidationError::MissingClinicalText,
        "missing required field: clinical_text",
        "missing_field"
    )]
    #[case::short(
        AnalyzeRequestValidationError::ClinicalTextTooShort,
        "Clinical text must be at least 5 characters",
        "too_short"
    )]
    fn clinical_text_errors_name_the_field(
        #[case] err: AnalyzeRequestValidationError,
        #[case] message: &str,
        #[case] code: &str,
    ) {
        let mapped = analyze_validation_error(err);
        assert_eq!(mapped.code(), ErrorCode::InvalidRequest);
        assert_eq!(mapped.message(), message);
        let details = mapped.details().expect("details");
        assert_eq!(details["field"], "clinical_text");
        assert_eq!(details["code"], code);
    }

    #[rstest]
    fn unknown_task_echoes_value() {
        let mapped = analyze_validation_error(AnalyzeRequestValidationError::UnknownTask {
            value: "surgery".to_owned(),
        });
        let details = mapped.details().expect("details");
        assert_eq!(details["field"], "task");
        assert_eq!(details["value"], "surgery");
    }
}
