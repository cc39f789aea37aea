//! assistant-core HTTP server.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use assistant_core::adapters::http::{api_router, CaptureHandlers, ResponseHandlers};
use assistant_core::adapters::{FileTenantLoader, InMemorySessionStore};
use assistant_core::application::{
    AssembleResponseHandler, CaptureTurnHandler, ClearSessionHandler, GetCaptureStateHandler,
    SessionLocks,
};
use assistant_core::config::AppConfig;
use assistant_core::domain::tenant::ComponentRegistry;
use assistant_core::ports::{SessionStore, TenantProfileSource};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);

    let default_segmentation = config.segmentation.to_config()?;
    let mut loader = FileTenantLoader::load_dir(&config.tenants.directory, default_segmentation).await?;
    loader.ensure_tenant(
        config.tenants.default_tenant_id()?,
        config.tenants.default_template,
        default_segmentation,
    )?;
    info!(tenants = ?loader.tenant_ids(), "Tenants ready");

    let tenants: Arc<dyn TenantProfileSource> = Arc::new(loader);
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let locks = Arc::new(SessionLocks::new());
    let registry = Arc::new(ComponentRegistry::with_builtin_formatters(
        config.features.enable_whatsapp_formatting,
    ));

    let capture = CaptureHandlers::new(
        Arc::new(CaptureTurnHandler::new(tenants.clone(), store.clone(), locks.clone())),
        Arc::new(GetCaptureStateHandler::new(tenants.clone(), store.clone())),
        Arc::new(ClearSessionHandler::new(tenants.clone(), store, locks)),
    );
    let responses = ResponseHandlers::new(Arc::new(AssembleResponseHandler::new(tenants, registry)));

    let app = api_router(capture, responses, &config);

    let addr = config.server.socket_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, environment = ?config.server.environment, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level));

    if config.server.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer())
            .init();
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
