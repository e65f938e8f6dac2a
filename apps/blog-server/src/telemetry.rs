//! Tracing subscriber setup.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::env_or;
use crate::observability::{AlertConfig, AlertLayer};

const DEFAULT_FILTER: &str = "info,blog_server=debug,blog_infra=debug";

#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// JSON lines instead of pretty output.
    pub json_logs: bool,
    pub service_name: String,
    pub alerts_enabled: bool,
    /// Chat webhook for alerts; stderr when unset.
    pub alert_webhook_url: Option<String>,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            json_logs: false,
            service_name: "blog".to_string(),
            alerts_enabled: true,
            alert_webhook_url: None,
        }
    }
}

impl TelemetryConfig {
    pub fn from_env() -> Self {
        Self {
            json_logs: env_or("LOG_FORMAT", String::from("pretty")).eq_ignore_ascii_case("json"),
            service_name: env_or("SERVICE_NAME", String::from("blog")),
            alerts_enabled: !matches!(env_or("ALERTS_ENABLED", String::from("true")).as_str(), "false" | "0"),
            alert_webhook_url: std::env::var("ALERT_WEBHOOK_URL").ok().filter(|u| !u.is_empty()),
        }
    }

    fn alert_layer(&self) -> Option<AlertLayer> {
        if !self.alerts_enabled {
            return None;
        }
        let config = AlertConfig {
            service: self.service_name.clone(),
            ..Default::default()
        };
        Some(match &self.alert_webhook_url {
            Some(url) => AlertLayer::webhook(config, url.clone()),
            None => AlertLayer::console(config),
        })
    }
}

/// Install the global subscriber. Call once, inside the runtime.
pub fn init_telemetry(config: &TelemetryConfig) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let alert_layer = config.alert_layer();

    if config.json_logs {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .with(alert_layer)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .with(alert_layer)
            .init();
    }

    tracing::info!(
        service = %config.service_name,
        json_logs = config.json_logs,
        alerts_enabled = config.alerts_enabled,
        "Telemetry initialized"
    );
}
