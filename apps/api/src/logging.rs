use std::io;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;

/// Where log lines go. The invoke adapter keeps stdout for its response event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    Stdout,
    Stderr,
}

/// Initializes structured logging. `RUST_LOG` wins over the configured level.
pub fn init(config: &Config, target: LogTarget) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = &config.rust_log;
        EnvFilter::new(format!(
            "warn,{}={level},placement_invoke={level},tower_http={level}",
            env!("CARGO_CRATE_NAME"),
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    match target {
        LogTarget::Stdout => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogTarget::Stderr => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}
