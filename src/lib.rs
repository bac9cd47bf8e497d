//! Acuity: a deterministic triage risk assessment engine.
//!
//! Two local assessment paths (structured vitals scoring and free-text
//! condition matching) plus optional remote ML and advanced-report services,
//! each with a transparent local fallback.

pub mod config;
pub mod engine;
pub mod remote;

use tracing_subscriber::EnvFilter;

pub use engine::types::{
    Department, Gender, Guidance, PatientContext, RankedCondition, RiskTier, TextAssessment,
    ValidationError, Vitals, VitalsAssessment,
};
pub use engine::TriageEngine;

/// Initialize tracing for binaries and integration tests. `RUST_LOG` wins
/// when set.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();

    tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
}
