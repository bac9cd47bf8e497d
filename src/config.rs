use std::env;

/// Application-level constants
pub const APP_NAME: &str = "Acuity";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Remote calls give up quickly so the local fallback stays responsive.
pub const DEFAULT_REMOTE_TIMEOUT_SECS: u64 = 3;

const DEFAULT_ML_URL: &str = "http://localhost:5001";
const DEFAULT_ADVANCED_URL: &str = "http://localhost:5002";

/// Base URL of the ML risk scorer (`ACUITY_ML_URL`).
pub fn ml_service_url() -> String {
    env::var("ACUITY_ML_URL").unwrap_or_else(|_| DEFAULT_ML_URL.to_string())
}

/// Base URL of the advanced assessment service (`ACUITY_ADVANCED_URL`).
pub fn advanced_service_url() -> String {
    env::var("ACUITY_ADVANCED_URL").unwrap_or_else(|_| DEFAULT_ADVANCED_URL.to_string())
}

/// Per-request timeout for both remote services
/// (`ACUITY_REMOTE_TIMEOUT_SECS`, whole seconds).
pub fn remote_timeout_secs() -> u64 {
    env::var("ACUITY_REMOTE_TIMEOUT_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_REMOTE_TIMEOUT_SECS)
}

/// Default tracing filter when `RUST_LOG` is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}
