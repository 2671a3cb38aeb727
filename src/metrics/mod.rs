use metrics::{counter, describe_counter};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::config::AppConfig;

static PROMETHEUS_HANDLE: OnceLock<Option<PrometheusHandle>> = OnceLock::new();

/// Counters for the password lifetime policy
///
/// Recording goes through the `metrics` facade, so it is a no-op until some
/// recorder is installed. [`AuthMetrics::prometheus`] installs the process-wide
/// Prometheus recorder and keeps a handle for rendering.
#[derive(Clone, Default)]
pub struct AuthMetrics {
    prometheus_handle: Option<Arc<PrometheusHandle>>,
}

impl AuthMetrics {
    /// Record into whatever recorder the host process installed
    pub fn new() -> Self {
        Self { prometheus_handle: None }
    }

    /// Install (once) and use the Prometheus recorder
    pub fn prometheus() -> Self {
        Self::with_config(None)
    }

    pub fn with_config(config: Option<&AppConfig>) -> Self {
        let handle = PROMETHEUS_HANDLE.get_or_init(|| {
            let builder = PrometheusBuilder::new();

            let builder = if let Some(cfg) = config {
                builder
                    .add_global_label("service", cfg.app.name.clone())
                    .add_global_label("version", cfg.app.version.clone())
                    .add_global_label("environment", cfg.app.environment.clone())
            } else {
                builder
            };

            Self::describe_metrics();

            match builder.install_recorder() {
                Ok(handle) => Some(handle),
                Err(e) => {
                    ::tracing::error!(error = %e, "Failed to install Prometheus recorder");
                    None
                }
            }
        });

        Self {
            prometheus_handle: handle.clone().map(Arc::new),
        }
    }

    fn describe_metrics() {
        describe_counter!(
            "auth_attempts_total",
            "Total number of limited password requests by outcome"
        );
        describe_counter!(
            "auth_limited_passwords_issued_total",
            "Total number of limited passwords handed out by issuance mode"
        );
        describe_counter!(
            "auth_limited_passwords_expired_total",
            "Total number of limited passwords detected past their expiration"
        );
        describe_counter!(
            "auth_verifications_total",
            "Total number of limited password verifications by outcome"
        );
        describe_counter!(
            "auth_grid_configuration_fallbacks_total",
            "Total number of malformed or missing grid values replaced by defaults"
        );
    }

    pub fn record_attempt(&self, outcome: &'static str) {
        counter!("auth_attempts_total", "outcome" => outcome).increment(1);
    }

    pub fn record_issued(&self, mode: &'static str) {
        counter!("auth_limited_passwords_issued_total", "mode" => mode).increment(1);
    }

    pub fn record_expired(&self) {
        counter!("auth_limited_passwords_expired_total").increment(1);
    }

    pub fn record_verification(&self, outcome: &'static str) {
        counter!("auth_verifications_total", "outcome" => outcome).increment(1);
    }

    pub fn record_grid_fallback(&self, option: &'static str) {
        counter!("auth_grid_configuration_fallbacks_total", "option" => option).increment(1);
    }

    // Prometheus export, empty without an installed exporter
    pub fn render(&self) -> String {
        self.prometheus_handle
            .as_ref()
            .map(|handle| handle.render())
            .unwrap_or_default()
    }
}

impl fmt::Debug for AuthMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthMetrics")
            .field("prometheus", &self.prometheus_handle.is_some())
            .finish()
    }
}
