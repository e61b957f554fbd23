//! Configuration for logging/telemetry

use serde::{Deserialize, Serialize};

const DEFAULT_SERVICE_NAME: &str = "slidescript";

fn default_service_name() -> String {
    DEFAULT_SERVICE_NAME.to_string()
}

/// Observability configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    /// Service name attached to exported traces
    #[serde(default = "default_service_name")]
    pub service_name: String,

    /// Service version (optional)
    pub service_version: Option<String>,

    /// OTLP endpoint for trace export (e.g., "http://localhost:4317")
    pub otlp_endpoint: Option<String>,

    /// Write formatted log lines to stderr
    #[serde(default)]
    pub enable_console: bool,

    /// Log level filter (e.g., "info", "slidescript_core=debug").
    /// Falls back to `RUST_LOG`, then "info".
    pub log_level: Option<String>,

    /// Additional resource attributes (key-value pairs)
    #[serde(default)]
    pub resource_attributes: Vec<(String, String)>,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            service_version: None,
            otlp_endpoint: None,
            enable_console: true,
            log_level: None,
            resource_attributes: Vec::new(),
        }
    }
}

impl ObservabilityConfig {
    /// Create a new configuration with service name
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
            ..Default::default()
        }
    }

    /// Set service version
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.service_version = Some(version.into());
        self
    }

    /// Set OTLP endpoint
    pub fn with_otlp_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.otlp_endpoint = Some(endpoint.into());
        self
    }

    /// Enable or disable console output
    pub fn with_console(mut self, enable: bool) -> Self {
        self.enable_console = enable;
        self
    }

    /// Set log level
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = Some(level.into());
        self
    }

    /// Add resource attribute
    pub fn with_resource_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.resource_attributes.push((key.into(), value.into()));
        self
    }

    /// Build from process environment variables. See [`Self::from_lookup`].
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from a variable lookup
    ///
    /// Reads:
    /// - `OTEL_SERVICE_NAME` or `SERVICE_NAME` → service_name
    /// - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` → service_version
    /// - `OTEL_EXPORTER_OTLP_ENDPOINT` → otlp_endpoint
    /// - `OTEL_LOG_LEVEL` or `RUST_LOG` → log_level
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |keys: &[&str]| keys.iter().find_map(|k| lookup(*k));

        let service_name =
            first(&["OTEL_SERVICE_NAME", "SERVICE_NAME"]).unwrap_or_else(default_service_name);
        let service_version = first(&["OTEL_SERVICE_VERSION", "SERVICE_VERSION"]);
        // Only enable OTLP when explicitly set; otherwise console-only.
        let otlp_endpoint = first(&["OTEL_EXPORTER_OTLP_ENDPOINT"]);
        let log_level = first(&["OTEL_LOG_LEVEL", "RUST_LOG"]);

        Self {
            service_name,
            service_version,
            otlp_endpoint,
            enable_console: true,
            log_level,
            resource_attributes: Vec::new(),
        }
    }
}
