//! Shared validation helpers for inbound HTTP handlers.

use serde_json::json;

use crate::domain::Error;

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}"))
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

/// Extract a required textual field, treating absence and the empty string
/// alike. Whitespace-only values pass here and are rejected by the
/// domain's trimming validation.
pub(crate) fn require_text(value: Option<String>, field: FieldName) -> Result<String, Error> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(missing_field_error(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(String::new()))]
    fn absent_and_empty_values_are_missing(#[case] value: Option<String>) {
        let err = require_text(value, FieldName::new("author")).expect_err("missing field");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
        let details = err
            .details()
            .and_then(|value| value.as_object())
            .expect("details");
        assert_eq!(details.get("field").and_then(|v| v.as_str()), Some("author"));
        assert_eq!(
            details.get("code").and_then(|v| v.as_str()),
            Some("missing_field")
        );
    }

    #[rstest]
    fn whitespace_only_values_pass_through_for_domain_validation() {
        let text = require_text(Some("   ".to_owned()), FieldName::new("content"))
            .expect("present field");
        assert_eq!(text, "   ");
    }
}
