//! Backend entry-point: wires the registry service, store and cache
//! adapters, REST endpoints, and OpenAPI docs.

use std::sync::Arc;

use actix_web::cookie::{Key, SameSite};
use actix_web::web;
use color_eyre::eyre::{eyre, WrapErr};
use ortho_config::OrthoConfig;
use url::Url;
use tracing::{info, warn};
use tracing_subscriber::{fmt, EnvFilter};

use spectrum_backend::domain::ports::RegistryCommand;
use spectrum_backend::domain::RegistryService;
use spectrum_backend::inbound::http::health::HealthState;
use spectrum_backend::inbound::http::state::HttpState;
use spectrum_backend::outbound::cache::SnapshotFileCache;
use spectrum_backend::outbound::docstore::HttpRecordStore;
use spectrum_backend::server::{create_server, AppSettings, ServerConfig};

fn load_session_key(settings: &AppSettings) -> color_eyre::Result<Key> {
    let key_path = settings.session_key_file();
    match std::fs::read(&key_path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) => {
            if cfg!(debug_assertions) || settings.allow_ephemeral_session_key {
                warn!(
                    path = %key_path.display(),
                    error = %error,
                    "using temporary session key (dev only)"
                );
                Ok(Key::generate())
            } else {
                Err(eyre!(
                    "failed to read session key at {}: {error}",
                    key_path.display()
                ))
            }
        }
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(error) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %error, "tracing init failed");
    }

    let settings = AppSettings::load().wrap_err("failed to load settings")?;
    let key = load_session_key(&settings)?;

    let endpoint = Url::parse(settings.store_endpoint())
        .wrap_err_with(|| format!("invalid store endpoint {}", settings.store_endpoint()))?;
    let store = HttpRecordStore::new(
        endpoint,
        settings.store_collection(),
        settings.store_timeout(),
    )
    .wrap_err("failed to build the record store client")?;
    let cache = SnapshotFileCache::open(&settings.cache_path())
        .wrap_err("failed to open the fallback snapshot cache")?;

    let registry = Arc::new(RegistryService::new(
        Arc::new(store),
        Arc::new(cache),
        settings.page_size(),
    ));
    let outcome = registry.refresh().await?;
    if outcome.degraded {
        warn!(
            total = outcome.total,
            "record store unreachable at startup; serving the fallback snapshot"
        );
    } else {
        info!(total = outcome.total, "registry loaded from the record store");
    }

    let http_state = web::Data::new(HttpState::new(
        registry.clone(),
        registry.clone(),
        registry,
    ));
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(
        key,
        settings.cookie_secure,
        SameSite::Lax,
        settings.bind_addr(),
    );

    info!(addr = %config.bind_addr(), "starting HTTP server");
    create_server(health_state, http_state, config)?
        .await
        .wrap_err("HTTP server terminated abnormally")
}
