// =============================================================================
// Logging initialisation
// =============================================================================

use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber with an env-based filter
/// (`RUST_LOG`), falling back to `info`.
///
/// Uses `try_init` so that repeated calls (e.g. from multiple tests) are
/// harmless no-ops after the first.
pub fn init() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();
}
