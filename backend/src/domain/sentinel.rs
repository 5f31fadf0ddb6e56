//! The fixed super-user: the one identity that exists without the store.
//!
//! The sentinel record is prepended to every working set, never persisted
//! to the backing store, and can never be deleted. Its credentials are the
//! hardcoded login bypass.

use chrono::{DateTime, Utc};

use crate::domain::credentials::{Identity, Password};
use crate::domain::record::{
    Designation, District, FullName, Gender, MobileNumber, Record, RecordId, RecordStatus,
    RecordValidationError,
};

/// Identifier reserved for the sentinel super-user.
pub const SENTINEL_ID: &str = "admin";

/// Password reserved for the sentinel super-user.
pub const SENTINEL_PASSWORD: &str = "password123";

/// Mobile number reserved for the sentinel super-user.
pub const SENTINEL_MOBILE: &str = "0000000000";

const SENTINEL_FULL_NAME: &str = "System Administrator";
const SENTINEL_BIO: &str = "Primary system administrator with global operational oversight.";

/// Whether an identifier names the sentinel super-user.
///
/// Identifier comparison is exact here; the case-insensitive match applies
/// only to the login bypass.
#[must_use]
pub fn is_sentinel(id: &RecordId) -> bool {
    id.as_ref() == SENTINEL_ID
}

fn build_record() -> Result<Record, RecordValidationError> {
    let id = RecordId::new(SENTINEL_ID)?;
    let full_name = FullName::new(SENTINEL_FULL_NAME)?;
    let mobile_number = MobileNumber::new(SENTINEL_MOBILE)?;
    Ok(Record::new(
        id,
        crate::domain::record::RecordDraft {
            full_name,
            gender: Gender::Other,
            mobile_number,
            designation: Designation::NationalAdmin,
            district: District::WestDelhi,
            status: RecordStatus::Active,
            bio: SENTINEL_BIO.to_owned(),
        },
        Password::from(SENTINEL_PASSWORD),
        DateTime::<Utc>::UNIX_EPOCH,
    ))
}

/// The sentinel super-user record.
///
/// # Panics
///
/// Never in practice: the sentinel field values are compile-time constants
/// that satisfy every record invariant, and a test pins that down.
#[must_use]
pub fn sentinel_record() -> Record {
    match build_record() {
        Ok(record) => record,
        Err(err) => panic!("sentinel constants must satisfy record validation: {err}"),
    }
}

/// The identity yielded when the sentinel login bypass matches.
#[must_use]
pub fn sentinel_identity() -> Identity {
    let record = sentinel_record();
    Identity {
        identifier: record.id().clone(),
        full_name: record.full_name().clone(),
        designation: record.designation().clone(),
    }
}
