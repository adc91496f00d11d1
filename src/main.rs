//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run console.
//! No business logic here.

use dispatch_admin::adapters::backend::{HttpAdminBackend, InMemoryBackend};
use dispatch_admin::adapters::catalog::{TableCatalog, builtin_catalog};
use dispatch_admin::adapters::logging::TracingAttemptSink;
use dispatch_admin::adapters::ui::ConsoleInputPort;
use dispatch_admin::ports::{AdminBackend, AttemptSink, InputPort, MessageCatalog};
use dispatch_admin::shared::config::AppConfig;
use dispatch_admin::usecases::{AdminPanel, AdminService, Classifier, ResilientInvoker};
use dotenv::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    let cfg = AppConfig::load().map_err(|e| anyhow::anyhow!("config: {}", e))?;

    // --- Backend: HTTP when configured, otherwise the seeded in-memory one ---
    let backend: Arc<dyn AdminBackend> = match cfg.backend_url.as_deref() {
        Some(url) if cfg.is_backend_configured() => {
            info!(
                url,
                timeout_secs = cfg.request_timeout().as_secs(),
                "using HTTP admin backend"
            );
            Arc::new(
                HttpAdminBackend::new(url, cfg.api_token.clone(), cfg.request_timeout())
                    .map_err(|e| anyhow::anyhow!("{}", e))?,
            )
        }
        _ => {
            warn!("DISPATCH_ADMIN_BACKEND_URL not set, using in-memory demo backend");
            Arc::new(InMemoryBackend::seeded().with_delay(300))
        }
    };

    // --- Message catalog: JSON table overrides the built-in locale ---
    let catalog: Arc<dyn MessageCatalog> = match cfg.catalog_path.as_deref() {
        Some(path) => Arc::new(
            TableCatalog::load(cfg.locale_or_default(), path)
                .await
                .map_err(|e| anyhow::anyhow!("{}", e))?,
        ),
        None => builtin_catalog(cfg.locale_or_default()).map_err(|e| anyhow::anyhow!("{}", e))?,
    };
    info!(locale = catalog.locale(), "message catalog ready");

    // --- Retry loop ---
    let policy = cfg.retry_policy();
    let extra_codes = cfg.extra_transient_codes();
    if !extra_codes.is_empty() {
        info!(codes = ?extra_codes, "extending transient allow-list");
    }
    let classifier = Arc::new(Classifier::new().with_transient_codes(extra_codes));
    let sink: Arc<dyn AttemptSink> = Arc::new(TracingAttemptSink);
    info!(
        max_attempts = policy.max_attempts,
        base_delay_ms = policy.base_delay_ms,
        max_delay_ms = policy.max_delay_ms,
        "retry policy"
    );
    let invoker = ResilientInvoker::new(policy, classifier, sink);

    // --- Services ---
    let service = Arc::new(AdminService::new(backend, invoker));
    let panel = Arc::new(AdminPanel::new(service));

    let input_port: Arc<dyn InputPort> = Arc::new(ConsoleInputPort::new(panel, catalog));
    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
