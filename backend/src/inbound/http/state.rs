//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{LoginService, RegistryCommand, RegistryQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// Authentication use-case.
    pub login: Arc<dyn LoginService>,
    /// Working-set read use-cases.
    pub registry: Arc<dyn RegistryQuery>,
    /// Working-set mutation use-cases.
    pub registry_command: Arc<dyn RegistryCommand>,
}

impl HttpState {
    /// Bundle the three driving ports for handler injection.
    ///
    /// One service usually implements all three; the split keeps handler
    /// tests free to substitute each concern independently.
    #[must_use]
    pub fn new(
        login: Arc<dyn LoginService>,
        registry: Arc<dyn RegistryQuery>,
        registry_command: Arc<dyn RegistryCommand>,
    ) -> Self {
        Self {
            login,
            registry,
            registry_command,
        }
    }
}
