//! Process-wide logging initialization.

use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Initialize the process-wide tracing subscriber.
///
/// Safe to call from any component at any time: the subscriber is installed
/// on the first call and never reset; later calls are no-ops. An embedding
/// application that already installed its own subscriber keeps it. The
/// filter is taken from `RUST_LOG` when set.
pub fn init() {
    INIT.call_once(|| {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "info,backoffice=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer())
            .try_init()
            .ok();
    });
}
