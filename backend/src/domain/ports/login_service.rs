//! Driving port for login/authentication use-cases.
//!
//! In hexagonal terms this is a *driving* port: inbound adapters call it to
//! authenticate credentials without knowing (or importing) the backing
//! working set. HTTP handler tests substitute a test double instead of
//! wiring the registry service.

use async_trait::async_trait;

use crate::domain::credentials::{Identity, LoginCredentials};
use crate::domain::Error;

/// Domain use-case port for authentication.
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the authenticated identity.
    ///
    /// Two tiers: the hardcoded super-user bypass (identifier matched
    /// case-insensitively) always wins, then an exact identifier/password
    /// scan of the working set.
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Identity, Error>;
}
