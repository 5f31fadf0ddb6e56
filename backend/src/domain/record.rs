//! Personnel record data model.
//!
//! The registry has a single entity: one person's profile. Field values
//! arrive as strings at the adapter boundary and are parsed into validated
//! newtypes and labelled enums here, so the rest of the domain never sees an
//! unchecked value.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::credentials::Password;

/// Validation errors returned by record component constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    /// Record identifier was missing or blank.
    EmptyId,
    /// Full name was missing or blank once trimmed.
    EmptyFullName,
    /// Mobile number was not exactly ten decimal digits.
    MobileNumberFormat,
    /// Gender label was not one of the known values.
    UnknownGender {
        /// The rejected label.
        label: String,
    },
    /// District label was not one of the known locations.
    UnknownDistrict {
        /// The rejected label.
        label: String,
    },
    /// Status label was not one of the known values.
    UnknownStatus {
        /// The rejected label.
        label: String,
    },
}

impl fmt::Display for RecordValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyId => write!(f, "record identifier must not be empty"),
            Self::EmptyFullName => write!(f, "full name must not be empty"),
            Self::MobileNumberFormat => {
                write!(f, "mobile number must be exactly 10 digits")
            }
            Self::UnknownGender { label } => write!(f, "unknown gender: {label}"),
            Self::UnknownDistrict { label } => write!(f, "unknown district: {label}"),
            Self::UnknownStatus { label } => write!(f, "unknown status: {label}"),
        }
    }
}

impl std::error::Error for RecordValidationError {}

/// Opaque, stable record identifier.
///
/// The backing store assigns identifiers at creation time; the only
/// identifier minted locally is the sentinel super-user's constant. Phone
/// numbers are never identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecordId(String);

impl RecordId {
    /// Validate and construct a [`RecordId`] from borrowed input.
    pub fn new(id: impl Into<String>) -> Result<Self, RecordValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(RecordValidationError::EmptyId);
        }
        Ok(Self(id))
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<RecordId> for String {
    fn from(value: RecordId) -> Self {
        value.0
    }
}

impl TryFrom<String> for RecordId {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// A person's full name as captured from their identity document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FullName(String);

impl FullName {
    /// Validate and construct a [`FullName`], trimming surrounding whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, RecordValidationError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(RecordValidationError::EmptyFullName);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for FullName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for FullName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<FullName> for String {
    fn from(value: FullName) -> Self {
        value.0
    }
}

impl TryFrom<String> for FullName {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Ten-digit mobile number, unique across the record set.
///
/// ## Invariants
/// - Exactly ten ASCII decimal digits; no separators, no country prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MobileNumber(String);

impl MobileNumber {
    /// Validate and construct a [`MobileNumber`].
    pub fn new(number: impl Into<String>) -> Result<Self, RecordValidationError> {
        let number = number.into();
        if number.chars().count() != 10 || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(RecordValidationError::MobileNumberFormat);
        }
        Ok(Self(number))
    }

    /// Final three digits, used as the derived password suffix.
    #[must_use]
    pub fn last_three(&self) -> String {
        // The ten-digit invariant makes skip(7) exact.
        self.0.chars().skip(7).collect()
    }
}

impl AsRef<str> for MobileNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for MobileNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<MobileNumber> for String {
    fn from(value: MobileNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for MobileNumber {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Gender as recorded on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Gender {
    /// "Male".
    Male,
    /// "Female".
    Female,
    /// "Other".
    Other,
}

impl Gender {
    /// The display label stored on the wire.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Male => "Male",
            Self::Female => "Female",
            Self::Other => "Other",
        }
    }

    fn parse_label(label: &str) -> Result<Self, RecordValidationError> {
        match label {
            "Male" => Ok(Self::Male),
            "Female" => Ok(Self::Female),
            "Other" => Ok(Self::Other),
            other => Err(RecordValidationError::UnknownGender {
                label: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<Gender> for String {
    fn from(value: Gender) -> Self {
        value.label().to_owned()
    }
}

impl TryFrom<String> for Gender {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_label(&value)
    }
}

/// A person's role. Drives the derived password prefix.
///
/// The four named roles are the known set; any other label round-trips
/// through [`Designation::Other`], which is the documented open-extension
/// branch. Promoting a new role out of `Other` means adding a variant here
/// and a prefix in [`Designation::abbreviation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Designation {
    /// "National Admin".
    NationalAdmin,
    /// "Hub Manager".
    HubManager,
    /// "Counsellor".
    Counsellor,
    /// "Doctor".
    Doctor,
    /// Any role outside the known set, carrying its original label.
    Other(String),
}

impl Designation {
    /// The display label stored on the wire.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::NationalAdmin => "National Admin",
            Self::HubManager => "Hub Manager",
            Self::Counsellor => "Counsellor",
            Self::Doctor => "Doctor",
            Self::Other(label) => label.as_str(),
        }
    }
}

impl fmt::Display for Designation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for Designation {
    fn from(value: String) -> Self {
        match value.as_str() {
            "National Admin" => Self::NationalAdmin,
            "Hub Manager" => Self::HubManager,
            "Counsellor" => Self::Counsellor,
            "Doctor" => Self::Doctor,
            _ => Self::Other(value),
        }
    }
}

impl From<&str> for Designation {
    fn from(value: &str) -> Self {
        Self::from(value.to_owned())
    }
}

impl From<Designation> for String {
    fn from(value: Designation) -> Self {
        match value {
            Designation::Other(label) => label,
            known => known.label().to_owned(),
        }
    }
}

/// Fixed set of labelled operating locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum District {
    /// "Amritsar, Punjab".
    Amritsar,
    /// "Bengaluru, Karnataka".
    Bengaluru,
    /// "Chennai, Tamil Nadu".
    Chennai,
    /// "Imphal, Manipur".
    Imphal,
    /// "West Delhi, Delhi NCR".
    WestDelhi,
}

impl District {
    /// The display label stored on the wire.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Amritsar => "Amritsar, Punjab",
            Self::Bengaluru => "Bengaluru, Karnataka",
            Self::Chennai => "Chennai, Tamil Nadu",
            Self::Imphal => "Imphal, Manipur",
            Self::WestDelhi => "West Delhi, Delhi NCR",
        }
    }

    fn parse_label(label: &str) -> Result<Self, RecordValidationError> {
        match label {
            "Amritsar, Punjab" => Ok(Self::Amritsar),
            "Bengaluru, Karnataka" => Ok(Self::Bengaluru),
            "Chennai, Tamil Nadu" => Ok(Self::Chennai),
            "Imphal, Manipur" => Ok(Self::Imphal),
            "West Delhi, Delhi NCR" => Ok(Self::WestDelhi),
            other => Err(RecordValidationError::UnknownDistrict {
                label: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for District {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<District> for String {
    fn from(value: District) -> Self {
        value.label().to_owned()
    }
}

impl TryFrom<String> for District {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_label(&value)
    }
}

/// Whether the person is currently operating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum RecordStatus {
    /// "Active".
    Active,
    /// "Inactive".
    Inactive,
    /// "Pending".
    Pending,
}

impl RecordStatus {
    /// The display label stored on the wire.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
            Self::Pending => "Pending",
        }
    }

    fn parse_label(label: &str) -> Result<Self, RecordValidationError> {
        match label {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            "Pending" => Ok(Self::Pending),
            other => Err(RecordValidationError::UnknownStatus {
                label: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for RecordStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl From<RecordStatus> for String {
    fn from(value: RecordStatus) -> Self {
        value.label().to_owned()
    }
}

impl TryFrom<String> for RecordStatus {
    type Error = RecordValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_label(&value)
    }
}

/// The editable fields of a record, as submitted by the registration and
/// edit forms. Identifier, password, and creation stamp are never part of a
/// draft: the first two are assigned by the system and the last is set once
/// by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDraft {
    /// Person's full name.
    pub full_name: FullName,
    /// Recorded gender.
    pub gender: Gender,
    /// Unique ten-digit mobile number.
    pub mobile_number: MobileNumber,
    /// Role, driving the password prefix.
    pub designation: Designation,
    /// Operating location.
    pub district: District,
    /// Operating status.
    pub status: RecordStatus,
    /// Free-text background, may be empty.
    pub bio: String,
}

/// A draft plus its derived password, ready for persistence.
///
/// The store stamps the creation time itself, so no caller-supplied
/// timestamp exists to override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRecord {
    /// Editable field values.
    pub draft: RecordDraft,
    /// Derived password stored alongside the profile.
    pub password: Password,
}

/// Field-merge payload for updating a stored record.
///
/// Carries every editable field; the password is included only when a save
/// re-derived it. The creation stamp is immutable and never part of a patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordPatch {
    /// Editable field values to merge into the document.
    pub draft: RecordDraft,
    /// Re-derived password, when the mobile number or designation changed.
    pub password: Option<Password>,
}

impl RecordPatch {
    /// Build a patch that leaves the stored password untouched.
    #[must_use]
    pub const fn from_draft(draft: RecordDraft) -> Self {
        Self {
            draft,
            password: None,
        }
    }

    /// Attach a re-derived password to the patch.
    #[must_use]
    pub fn with_password(mut self, password: Password) -> Self {
        self.password = Some(password);
        self
    }
}

/// One person's profile entry: the registry's sole domain entity.
///
/// ## Invariants
/// - `id` is immutable for the record's lifetime.
/// - `mobile_number` is unique across the record set (enforced at write
///   time by the registry, not by a storage constraint).
/// - `created_at` is set once at creation and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
#[serde(try_from = "RecordDto", into = "RecordDto")]
pub struct Record {
    #[schema(value_type = String, example = "pQ7sK2m9XbArT4cW1dYe")]
    id: RecordId,
    #[schema(value_type = String, example = "Asha Verma")]
    full_name: FullName,
    #[schema(value_type = String, example = "Female")]
    gender: Gender,
    #[schema(value_type = String, example = "9876543210")]
    mobile_number: MobileNumber,
    #[schema(value_type = String, example = "Counsellor")]
    designation: Designation,
    #[schema(value_type = String, example = "Chennai, Tamil Nadu")]
    district: District,
    #[schema(value_type = String, example = "Active")]
    status: RecordStatus,
    #[schema(value_type = String, example = "Counsellor for the southern hub.")]
    bio: String,
    #[schema(value_type = String, example = "CO210")]
    password: Password,
    created_at: DateTime<Utc>,
}

impl Record {
    /// Assemble a record from its identifier, draft fields, password, and
    /// creation stamp.
    #[must_use]
    pub fn new(
        id: RecordId,
        draft: RecordDraft,
        password: Password,
        created_at: DateTime<Utc>,
    ) -> Self {
        let RecordDraft {
            full_name,
            gender,
            mobile_number,
            designation,
            district,
            status,
            bio,
        } = draft;
        Self {
            id,
            full_name,
            gender,
            mobile_number,
            designation,
            district,
            status,
            bio,
            password,
            created_at,
        }
    }

    /// Stable record identifier.
    #[must_use]
    pub const fn id(&self) -> &RecordId {
        &self.id
    }

    /// Person's full name.
    #[must_use]
    pub const fn full_name(&self) -> &FullName {
        &self.full_name
    }

    /// Recorded gender.
    #[must_use]
    pub const fn gender(&self) -> Gender {
        self.gender
    }

    /// Unique ten-digit mobile number.
    #[must_use]
    pub const fn mobile_number(&self) -> &MobileNumber {
        &self.mobile_number
    }

    /// Role, driving the password prefix.
    #[must_use]
    pub const fn designation(&self) -> &Designation {
        &self.designation
    }

    /// Operating location.
    #[must_use]
    pub const fn district(&self) -> District {
        self.district
    }

    /// Operating status.
    #[must_use]
    pub const fn status(&self) -> RecordStatus {
        self.status
    }

    /// Free-text background.
    #[must_use]
    pub fn bio(&self) -> &str {
        self.bio.as_str()
    }

    /// Derived password, stored in plain text for parity with the original
    /// registry. A known weakness, kept observable rather than hidden.
    #[must_use]
    pub const fn password(&self) -> &Password {
        &self.password
    }

    /// Creation stamp assigned by the store.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Copy of the editable fields, e.g. to seed an edit form.
    #[must_use]
    pub fn draft(&self) -> RecordDraft {
        RecordDraft {
            full_name: self.full_name.clone(),
            gender: self.gender,
            mobile_number: self.mobile_number.clone(),
            designation: self.designation.clone(),
            district: self.district,
            status: self.status,
            bio: self.bio.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RecordDto {
    id: String,
    full_name: String,
    gender: String,
    mobile_number: String,
    designation: String,
    district: String,
    status: String,
    bio: String,
    password: String,
    created_at: DateTime<Utc>,
}

impl From<Record> for RecordDto {
    fn from(value: Record) -> Self {
        let Record {
            id,
            full_name,
            gender,
            mobile_number,
            designation,
            district,
            status,
            bio,
            password,
            created_at,
        } = value;
        Self {
            id: id.into(),
            full_name: full_name.into(),
            gender: gender.into(),
            mobile_number: mobile_number.into(),
            designation: designation.into(),
            district: district.into(),
            status: status.into(),
            bio,
            password: password.into(),
            created_at,
        }
    }
}

impl TryFrom<RecordDto> for Record {
    type Error = RecordValidationError;

    fn try_from(value: RecordDto) -> Result<Self, Self::Error> {
        let RecordDto {
            id,
            full_name,
            gender,
            mobile_number,
            designation,
            district,
            status,
            bio,
            password,
            created_at,
        } = value;
        Ok(Self {
            id: RecordId::new(id)?,
            full_name: FullName::new(full_name)?,
            gender: Gender::try_from(gender)?,
            mobile_number: MobileNumber::new(mobile_number)?,
            designation: Designation::from(designation),
            district: District::try_from(district)?,
            status: RecordStatus::try_from(status)?,
            bio,
            password: Password::from(password),
            created_at,
        })
    }
}

#[cfg(test)]
mod tests;
