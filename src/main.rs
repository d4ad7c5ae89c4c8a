//! portal-session - inspect or clear the persisted portal session.

use std::sync::Arc;

use clap::Parser;

use portal_core::adapters::auth::HttpAuthApi;
use portal_core::adapters::http::HttpApiClient;
use portal_core::adapters::notifications::TracingNotifier;
use portal_core::adapters::roles::HttpRoleLookup;
use portal_core::adapters::storage::FileKeyValueStore;
use portal_core::application::{RoleResolver, SessionStore};
use portal_core::config::AppConfig;
use portal_core::telemetry::init_tracing;

/// Restores the persisted session and reports who is signed in
#[derive(Parser, Debug)]
#[command(name = "portal-session")]
#[command(version)]
struct Args {
    /// Clear the persisted session instead of reporting it
    #[arg(long)]
    logout: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let args = Args::parse();

    let config = AppConfig::load()?;
    init_tracing(&config.telemetry)?;
    config.validate()?;

    tracing::debug!(environment = %config.environment, "Configuration loaded");

    let api_client = Arc::new(HttpApiClient::new(
        config.api.base_url.clone(),
        config.api.timeout(),
    )?);
    let storage = Arc::new(FileKeyValueStore::open(&config.storage.path)?);

    let store = SessionStore::with_keys(
        Arc::new(HttpAuthApi::new(api_client.clone())),
        api_client,
        storage,
        Arc::new(TracingNotifier::new()),
        config.storage.keys(),
    );

    let status = store.hydrate();

    if args.logout {
        store.logout();
        return Ok(());
    }

    match store.user() {
        Some(user) => {
            tracing::info!(status = %status, user_id = %user.id, name = %user.full_name(), "Signed in");

            if let Some(lookup_config) = config.roles.lookup_config() {
                let lookup = HttpRoleLookup::new(lookup_config.with_timeout(config.api.timeout()))?;
                let resolver = RoleResolver::new(Arc::new(lookup));
                let roles = resolver.refresh(Some(&user)).await;
                let tags: Vec<&str> = roles.iter().map(|role| role.as_tag()).collect();
                tracing::info!(roles = ?tags, staff = roles.is_staff(), "Roles resolved");
            }
        }
        None => tracing::info!(status = %status, "No active session"),
    }

    Ok(())
}
