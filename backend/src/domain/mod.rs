//! Domain primitives, ports, and services.
//!
//! Purpose: define the strongly typed registry entities, the credential
//! rules, and the service owning the working set, independent of any
//! transport or storage technology. Adapters on either side of the
//! hexagonal boundary depend on this module, never the other way round.

pub mod credentials;
pub mod error;
pub mod ports;
pub mod record;
pub mod registry;
pub mod sentinel;

pub use self::credentials::{Identity, LoginCredentials, LoginValidationError, Password};
pub use self::error::{Error, ErrorCode};
pub use self::record::{
    Designation, District, FullName, Gender, MobileNumber, NewRecord, Record, RecordDraft,
    RecordId, RecordPatch, RecordStatus, RecordValidationError,
};
pub use self::registry::RegistryService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use spectrum_backend::domain::{ApiResult, Error};
///
/// fn refuse() -> ApiResult<()> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
