// ABOUTME: Structured logging initialization built on tracing-subscriber
// ABOUTME: Honors RUST_LOG with an info-level default and tolerates repeated init in tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Production logging and structured output

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize the global tracing subscriber.
///
/// Reads `RUST_LOG` for filtering and falls back to `info`. Safe to call
/// more than once; subsequent calls are no-ops (tests initialize eagerly).
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true))
        .try_init();
}
