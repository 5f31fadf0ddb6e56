//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejected field produces the same details shape,
//! `{ "field": ..., "code": ... }`, so a client can render the message
//! inline next to the offending input.

use serde_json::json;

use crate::domain::record::RecordValidationError;
use crate::domain::{Error, LoginValidationError};

/// Build an invalid-request error annotated with the offending field.
pub(crate) fn field_error(field: &str, code: &str, message: impl Into<String>) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

/// Map a login payload failure onto its form field.
pub(crate) fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyId => {
            field_error("id", "empty_id", "login id must not be empty")
        }
        LoginValidationError::EmptyPassword => {
            field_error("password", "empty_password", "password must not be empty")
        }
    }
}

/// Map a record payload failure onto its form field.
pub(crate) fn map_record_validation_error(err: RecordValidationError) -> Error {
    let message = err.to_string();
    match err {
        RecordValidationError::EmptyId => field_error("id", "empty_id", message),
        RecordValidationError::EmptyFullName => {
            field_error("fullName", "empty_full_name", message)
        }
        RecordValidationError::MobileNumberFormat => {
            field_error("mobileNumber", "invalid_mobile", message)
        }
        RecordValidationError::UnknownGender { .. } => {
            field_error("gender", "unknown_gender", message)
        }
        RecordValidationError::UnknownDistrict { .. } => {
            field_error("district", "unknown_district", message)
        }
        RecordValidationError::UnknownStatus { .. } => {
            field_error("status", "unknown_status", message)
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;
    use serde_json::Value;

    fn detail<'a>(error: &'a Error, key: &str) -> Option<&'a str> {
        error
            .details()
            .and_then(|details| details.get(key))
            .and_then(Value::as_str)
    }

    #[rstest]
    #[case(RecordValidationError::MobileNumberFormat, "mobileNumber", "invalid_mobile")]
    #[case(RecordValidationError::EmptyFullName, "fullName", "empty_full_name")]
    #[case(
        RecordValidationError::UnknownDistrict { label: "Atlantis".to_owned() },
        "district",
        "unknown_district"
    )]
    fn record_failures_name_their_field(
        #[case] err: RecordValidationError,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let error = map_record_validation_error(err);
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        assert_eq!(detail(&error, "field"), Some(field));
        assert_eq!(detail(&error, "code"), Some(code));
    }

    #[rstest]
    fn login_failures_name_their_field() {
        let error = map_login_validation_error(LoginValidationError::EmptyPassword);
        assert_eq!(detail(&error, "field"), Some("password"));
        assert_eq!(detail(&error, "code"), Some("empty_password"));
    }
}
