//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system with a fallback filter
///
/// `default_filter` is used only when `RUST_LOG` is not set, e.g. `"info"` or
/// `"scene_engine=debug"`. Calling this more than once is harmless.
pub fn init_with_level(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    // Later calls leave the first logger in place
    let _ = env_logger::Builder::from_env(env).try_init();
}
