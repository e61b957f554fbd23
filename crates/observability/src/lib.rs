//! slidescript observability - tracing setup shared by the CLI and the pipeline
//!
//! # Features
//!
//! - Console logging through `tracing-subscriber` with an `EnvFilter`
//! - Optional OpenTelemetry export over OTLP when an endpoint is configured
//! - Span macros for the pipeline stages and small recording helpers
//!
//! # Quick Start
//!
//! ```no_run
//! use slidescript_observability::{ObservabilityConfig, init};
//!
//! let config = ObservabilityConfig::new("slidescript")
//!     .with_log_level("info");
//!
//! init(config)?;
//!
//! tracing::info!("Service started");
//! # Ok::<(), slidescript_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `OTEL_SERVICE_NAME` or `SERVICE_NAME` - Service name
//! - `OTEL_SERVICE_VERSION` or `SERVICE_VERSION` - Service version
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP endpoint
//! - `OTEL_LOG_LEVEL` or `RUST_LOG` - Log level filter

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use crate::tracing::{record_duration, record_error};
