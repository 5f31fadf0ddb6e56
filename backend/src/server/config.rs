//! Application settings and HTTP server configuration.

use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use actix_web::cookie::{Key, SameSite};
use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_STORE_ENDPOINT: &str = "http://127.0.0.1:8431/";
const DEFAULT_STORE_COLLECTION: &str = "records";
const DEFAULT_STORE_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PAGE_SIZE: u32 = 12;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, 8080))
}

fn default_cache_path() -> PathBuf {
    PathBuf::from("cache").join("registry-snapshot.json")
}

/// Configuration values loaded from CLI flags, environment (`SPECTRUM_*`),
/// and configuration files via OrthoConfig.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "SPECTRUM")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// Root URL of the remote document store.
    pub store_endpoint: Option<String>,
    /// Collection name holding the records.
    pub store_collection: Option<String>,
    /// Request timeout against the store, in seconds.
    pub store_timeout_secs: Option<u64>,
    /// Default registry page size.
    pub page_size: Option<u32>,
    /// Path of the fallback snapshot file.
    pub cache_path: Option<PathBuf>,
    /// Path of the session cookie key file.
    pub session_key_file: Option<PathBuf>,
    /// Whether session cookies require HTTPS.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Allow a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_session_key: bool,
}

impl AppSettings {
    /// Bind address, falling back to all interfaces on port 8080.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or_else(default_bind_addr)
    }

    /// Store endpoint, falling back to a local development store.
    #[must_use]
    pub fn store_endpoint(&self) -> &str {
        self.store_endpoint
            .as_deref()
            .unwrap_or(DEFAULT_STORE_ENDPOINT)
    }

    /// Record collection name.
    #[must_use]
    pub fn store_collection(&self) -> &str {
        self.store_collection
            .as_deref()
            .unwrap_or(DEFAULT_STORE_COLLECTION)
    }

    /// Store request timeout.
    #[must_use]
    pub fn store_timeout(&self) -> Duration {
        Duration::from_secs(
            self.store_timeout_secs
                .unwrap_or(DEFAULT_STORE_TIMEOUT_SECS)
                .max(1),
        )
    }

    /// Default page size for registry listings.
    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(DEFAULT_PAGE_SIZE).max(1)
    }

    /// Fallback snapshot path.
    #[must_use]
    pub fn cache_path(&self) -> PathBuf {
        self.cache_path.clone().unwrap_or_else(default_cache_path)
    }

    /// Session key file path.
    #[must_use]
    pub fn session_key_file(&self) -> PathBuf {
        self.session_key_file
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_KEY_FILE))
    }
}

/// Builder-style configuration for creating the HTTP server.
pub struct ServerConfig {
    pub(crate) key: Key,
    pub(crate) cookie_secure: bool,
    pub(crate) same_site: SameSite,
    pub(crate) bind_addr: SocketAddr,
}

impl ServerConfig {
    /// Construct a server configuration from application settings.
    #[must_use]
    pub fn new(key: Key, cookie_secure: bool, same_site: SameSite, bind_addr: SocketAddr) -> Self {
        Self {
            key,
            cookie_secure,
            same_site,
            bind_addr,
        }
    }

    /// Return the socket address the server will bind to.
    #[must_use]
    pub const fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
    }
}
