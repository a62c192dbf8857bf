use std::env;

use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{
    EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError,
};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` overrides `default_filter`. With `APP_ENV=production` events are
/// written as bunyan JSON lines to stdout, otherwise in the human-readable format.
///
/// This runs before the environment is validated, so it reads `APP_ENV` directly.
pub fn init_subscriber(name: &str, default_filter: &str) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let production = env::var("APP_ENV")
        .map(|v| v.eq_ignore_ascii_case("production"))
        .unwrap_or(false);

    let registry = Registry::default().with(env_filter);

    if production {
        registry
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(name.to_owned(), std::io::stdout))
            .try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    }
}
