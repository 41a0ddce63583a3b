use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debugging.
///
/// Call this at the start of `main` to enable tracing output. Uses the
/// `RUST_LOG` environment variable for filtering, for example
/// `RUST_LOG=quadra=debug` or `RUST_LOG=quadra::interpreter::evaluator=trace`.
///
/// Safe to call more than once; only the first call has any effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry().with(fmt::layer().with_target(true)
                                                            .with_level(true)
                                                            .with_writer(std::io::stderr))
                                          .with(EnvFilter::from_default_env())
                                          .init();
        }
    });
}
