use anyhow::{Context, Result};
use chrono::Duration;
use scout_admin::api::{create_routes, AppState};
use scout_admin::auth::{build_authenticator, AuthService, JwtService};
use scout_admin::config::{AppConfig, AuthProviderConfig, DemoSeeder, StoreBackend, StoreConfig};
use scout_admin::store::{FirestoreStore, MemoryStore, SharedStore};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let store_config = StoreConfig::from_env()?;
    let store = build_store(&store_config).await?;

    let authenticator = build_authenticator(&AuthProviderConfig::from_env()?)?;
    let jwt_service = JwtService::with_ttl(
        &config.jwt_secret,
        Duration::hours(config.session_ttl_hours),
    );
    let auth_service = AuthService::new(Arc::from(authenticator), jwt_service);

    let app = create_routes(AppState::new(store, auth_service));

    let address = config.server_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Fitness Scout admin server starting on http://{}", address);
    info!("Health check available at http://{}/health", address);

    axum::serve(listener, app).await?;

    Ok(())
}

async fn build_store(config: &StoreConfig) -> Result<SharedStore> {
    match config.backend {
        StoreBackend::Memory => {
            let store = MemoryStore::new();
            if config.seed_demo_data {
                DemoSeeder::new(store.clone()).seed_all().await?;
            }
            info!("Using in-memory document store");
            Ok(Arc::new(store))
        }
        StoreBackend::Firestore => {
            let firestore = config
                .firestore
                .as_ref()
                .context("Firestore settings missing")?;
            info!("Using hosted document store for project {}", firestore.project_id);
            Ok(Arc::new(FirestoreStore::new(firestore)?))
        }
    }
}
