//! Logging Infrastructure
//!
//! `RUST_LOG` wins when set; otherwise the crate, the shared layer and
//! tower-http log at info. Production output is JSON.

use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "users_cloud=info,shared=info,tower_http=info";

/// Initialize the global subscriber
pub fn init_logger(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
