//! Process-wide log setup shared by faultline binaries.

/// Tracing subscriber installation.
pub mod subscriber;

pub use subscriber::LogFormat;

/// Initialize tracing/logging from the environment.
///
/// Safe to call multiple times; subsequent calls are no-ops.
pub fn init() {
    subscriber::init(LogFormat::from_env());
}
