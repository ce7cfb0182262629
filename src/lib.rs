pub mod config;
pub mod models;
pub mod pipeline;
pub mod vault;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for the embedding application.
///
/// Honors `RUST_LOG` when set, otherwise falls back to the crate default.
/// Call at most once per process.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("MediLink core v{}", config::APP_VERSION);
}
