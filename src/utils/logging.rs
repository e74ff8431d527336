use std::sync::atomic::{AtomicBool, Ordering};
use std::env;
use thiserror::Error;

static ENABLE_LOGGING: AtomicBool = AtomicBool::new(false);

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("DENOVONEAR_LOGGING must be 'true' or 'false', got '{0}'")]
    InvalidValue(String),
}

/// Initializes logging based on the DENOVONEAR_LOGGING environment variable.
/// - If DENOVONEAR_LOGGING=true, logging is enabled and a tracing subscriber is installed.
/// - If DENOVONEAR_LOGGING=false or not set, logging is disabled.
/// - To enable logging in tests, run: DENOVONEAR_LOGGING=true cargo test -- --nocapture
pub fn init_logging() -> Result<(), LoggingError> {
    match env::var("DENOVONEAR_LOGGING") {
        Ok(value) => match value.as_str() {
            "true" => enable_logging(),
            "false" => ENABLE_LOGGING.store(false, Ordering::SeqCst),
            other => return Err(LoggingError::InvalidValue(other.to_string())),
        },
        Err(_) => ENABLE_LOGGING.store(false, Ordering::SeqCst),
    }
    Ok(())
}

/// Turns logging on regardless of the environment.
pub fn enable_logging() {
    // a subscriber may already be installed by the host
    let _ = tracing_subscriber::fmt().with_target(false).try_init();
    ENABLE_LOGGING.store(true, Ordering::SeqCst);
}

pub fn is_enabled() -> bool {
    ENABLE_LOGGING.load(Ordering::SeqCst)
}

pub fn log(prefix: &str, message: &str) {
    if is_enabled() {
        tracing::info!("  [{}]   {}", prefix, message);
    }
}
