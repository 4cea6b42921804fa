//! Logging utilities
//!
//! The engine logs through the `log` facade: `trace!` for per-frame detail,
//! `debug!` for scene mutation, `info!` for lifecycle events and `warn!` for
//! requests that are ignored.

pub use log::{debug, info, warn, error, trace};

/// Initialize the logging system from `RUST_LOG`
pub fn init() {
    env_logger::init();
}

/// Initialize the logging system with a default level
///
/// `RUST_LOG` still takes precedence when it is set. Calling this more than
/// once is harmless; later calls are ignored.
///
/// # Arguments
/// * `level` - Filter string such as `"info"` or `"gaka_engine=debug"`
pub fn init_with_level(level: &str) {
    let env = env_logger::Env::default().default_filter_or(level);
    // A logger may already be installed by the host application or a test
    let _ = env_logger::Builder::from_env(env).try_init();
}
