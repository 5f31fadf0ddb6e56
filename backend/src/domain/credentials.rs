//! Credential rules: deterministic password derivation and login inputs.
//!
//! Passwords are derived, never chosen: a two-letter designation prefix
//! followed by the final three digits of the mobile number. They are stored
//! and displayed in plain text for parity with the system being replaced;
//! that weakness is deliberate and documented, not an oversight to patch
//! quietly.

use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use zeroize::Zeroizing;

use crate::domain::record::{Designation, FullName, MobileNumber, RecordId};

impl Designation {
    /// Two-letter prefix used when deriving a password.
    ///
    /// Roles outside the known set fall through to `"US"`; extending the
    /// known set means adding an arm here, otherwise the new role silently
    /// takes the default prefix.
    ///
    /// # Examples
    /// ```
    /// use spectrum_backend::domain::Designation;
    ///
    /// assert_eq!(Designation::Counsellor.abbreviation(), "CO");
    /// assert_eq!(Designation::from("Auditor").abbreviation(), "US");
    /// ```
    #[must_use]
    pub const fn abbreviation(&self) -> &'static str {
        match self {
            Self::NationalAdmin => "NA",
            Self::HubManager => "HM",
            Self::Counsellor => "CO",
            Self::Doctor => "DO",
            Self::Other(_) => "US",
        }
    }
}

/// Derived account password.
///
/// Deterministic: the same designation and mobile number always produce the
/// same password string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Password(String);

impl Password {
    /// Derive the password for a designation and mobile number.
    ///
    /// # Examples
    /// ```
    /// use spectrum_backend::domain::{Designation, MobileNumber, Password};
    ///
    /// let mobile = MobileNumber::new("9876543210").unwrap();
    /// let password = Password::derive(&Designation::Counsellor, &mobile);
    /// assert_eq!(password.as_ref(), "CO210");
    /// ```
    #[must_use]
    pub fn derive(designation: &Designation, mobile_number: &MobileNumber) -> Self {
        Self(format!(
            "{}{}",
            designation.abbreviation(),
            mobile_number.last_three()
        ))
    }
}

impl AsRef<str> for Password {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<String> for Password {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Password {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<Password> for String {
    fn from(value: Password) -> Self {
        value.0
    }
}

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Login id was missing or blank once trimmed.
    EmptyId,
    /// Password was blank once trimmed.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "login id must not be empty"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by authentication services.
///
/// ## Invariants
/// - `id` and `password` are both trimmed and non-empty; the original login
///   form trimmed both before comparison, so the same normalisation happens
///   here.
///
/// # Examples
/// ```
/// use spectrum_backend::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts(" admin ", "password123").unwrap();
/// assert_eq!(creds.id(), "admin");
/// assert_eq!(creds.password(), "password123");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    id: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw id/password inputs.
    pub fn try_from_parts(id: &str, password: &str) -> Result<Self, LoginValidationError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(LoginValidationError::EmptyId);
        }

        let password = password.trim();
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }

        Ok(Self {
            id: id.to_owned(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Login id used for record lookups.
    #[must_use]
    pub fn id(&self) -> &str {
        self.id.as_str()
    }

    /// Password string provided by the caller.
    #[must_use]
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// The authenticated identity yielded by a successful login.
///
/// A deliberate subset of the record: enough to greet the operator and drive
/// session restore, nothing more.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Identity {
    /// Record identifier of the authenticated person.
    #[schema(value_type = String, example = "admin")]
    pub identifier: RecordId,
    /// Display name of the authenticated person.
    #[schema(value_type = String, example = "System Administrator")]
    pub full_name: FullName,
    /// Role of the authenticated person.
    #[schema(value_type = String, example = "National Admin")]
    pub designation: Designation,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Designation::NationalAdmin, "NA")]
    #[case(Designation::HubManager, "HM")]
    #[case(Designation::Counsellor, "CO")]
    #[case(Designation::Doctor, "DO")]
    #[case(Designation::Other("Auditor".to_owned()), "US")]
    #[case(Designation::Other(String::new()), "US")]
    fn abbreviations_cover_known_roles_and_default(
        #[case] designation: Designation,
        #[case] expected: &str,
    ) {
        assert_eq!(designation.abbreviation(), expected);
    }

    #[rstest]
    #[case(Designation::Counsellor, "9876543210", "CO210")]
    #[case(Designation::NationalAdmin, "0000000000", "NA000")]
    #[case(Designation::Doctor, "1112223456", "DO456")]
    #[case(Designation::Other("Auditor".to_owned()), "5550104321", "US321")]
    fn derivation_is_prefix_plus_final_three_digits(
        #[case] designation: Designation,
        #[case] mobile: &str,
        #[case] expected: &str,
    ) {
        let mobile = MobileNumber::new(mobile).expect("ten digits");
        assert_eq!(Password::derive(&designation, &mobile).as_ref(), expected);
    }

    #[rstest]
    fn derivation_is_deterministic() {
        let mobile = MobileNumber::new("9876543210").expect("ten digits");
        let first = Password::derive(&Designation::HubManager, &mobile);
        let second = Password::derive(&Designation::HubManager, &mobile);
        assert_eq!(first, second);
    }

    #[rstest]
    #[case("", "pw", LoginValidationError::EmptyId)]
    #[case("   ", "pw", LoginValidationError::EmptyId)]
    #[case("admin", "", LoginValidationError::EmptyPassword)]
    #[case("admin", "   ", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] id: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err =
            LoginCredentials::try_from_parts(id, password).expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    #[case("  admin  ", "  password123  ")]
    #[case("pQ7sK2m9Xb", "CO210")]
    fn valid_credentials_trim_both_parts(#[case] id: &str, #[case] password: &str) {
        let creds =
            LoginCredentials::try_from_parts(id, password).expect("valid inputs should succeed");
        assert_eq!(creds.id(), id.trim());
        assert_eq!(creds.password(), password.trim());
    }

    #[rstest]
    fn identity_serialises_camel_case() {
        let identity = Identity {
            identifier: RecordId::new("admin").expect("id"),
            full_name: FullName::new("System Administrator").expect("name"),
            designation: Designation::NationalAdmin,
        };
        let value = serde_json::to_value(&identity).expect("serialise identity");
        assert_eq!(
            value.get("fullName").and_then(|v| v.as_str()),
            Some("System Administrator")
        );
        assert_eq!(
            value.get("designation").and_then(|v| v.as_str()),
            Some("National Admin")
        );
    }
}
