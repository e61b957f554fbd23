//! Subscriber initialization: console logging plus optional OTLP export
//!
//! Uses the OpenTelemetry Rust 0.31 builder API for the exporter.

use once_cell::sync::OnceCell;
use opentelemetry::{KeyValue, global, trace::TracerProvider};
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::ObservabilityConfig;
use crate::error::ObservabilityError;

// Kept for flushing spans on shutdown
static TRACER_PROVIDER: OnceCell<SdkTracerProvider> = OnceCell::new();

/// Install the global tracing subscriber described by `config`.
///
/// Console output goes to stderr so that stdout stays free for command output.
/// A failing OTLP exporter downgrades to console-only rather than failing startup.
pub fn init(config: ObservabilityConfig) -> Result<(), ObservabilityError> {
    let env_filter = config
        .log_level
        .as_ref()
        .map(|level| tracing_subscriber::EnvFilter::new(level.as_str()))
        .unwrap_or_else(|| {
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
        });

    let mut attributes = vec![KeyValue::new("service.name", config.service_name.clone())];

    if let Some(version) = &config.service_version {
        attributes.push(KeyValue::new("service.version", version.clone()));
    }

    for (key, value) in &config.resource_attributes {
        attributes.push(KeyValue::new(key.clone(), value.clone()));
    }

    // In 0.31, Resource constructors are private; ResourceBuilder is the public API
    let resource = Resource::builder().with_attributes(attributes).build();

    let fmt_layer = config.enable_console.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
    });

    let mut otlp_status: Option<Result<String, String>> = None;
    let otel_layer = if let Some(endpoint) = &config.otlp_endpoint {
        match build_otlp_tracer_provider(&config.service_name, endpoint, resource) {
            Ok((tracer, provider)) => {
                // Set as global provider before creating the layer
                global::set_tracer_provider(provider.clone());
                let _ = TRACER_PROVIDER.set(provider);
                otlp_status = Some(Ok(endpoint.clone()));
                Some(OpenTelemetryLayer::new(tracer))
            }
            Err(e) => {
                otlp_status = Some(Err(e.to_string()));
                None
            }
        }
    } else {
        None
    };

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .try_init()
        .map_err(|e| ObservabilityError::AlreadyInitialized(e.to_string()))?;

    // Logged after the subscriber exists so the messages are not dropped.
    match otlp_status {
        Some(Ok(endpoint)) => tracing::debug!(
            service.name = %config.service_name,
            otlp.endpoint = %endpoint,
            "OTLP tracing enabled"
        ),
        Some(Err(error)) => tracing::warn!(
            service.name = %config.service_name,
            error = %error,
            "Failed to initialize OTLP export, falling back to console-only tracing"
        ),
        None => tracing::debug!(
            service.name = %config.service_name,
            "Tracing initialized (console only, no OTLP endpoint configured)"
        ),
    }

    Ok(())
}

/// Build OTLP tracer provider (SpanExporter::builder() + SdkTracerProvider::builder()).
fn build_otlp_tracer_provider(
    service_name: &str,
    endpoint: &str,
    resource: Resource,
) -> Result<(opentelemetry_sdk::trace::SdkTracer, SdkTracerProvider), ObservabilityError> {
    let span_exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint.to_string())
        .build()
        .map_err(|e| ObservabilityError::InitFailed(e.to_string()))?;

    let provider = SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource)
        .build();

    let tracer = provider.tracer(service_name.to_string());

    Ok((tracer, provider))
}

/// Flush and shut down the OTLP tracer provider, if one was installed.
pub fn shutdown() {
    if let Some(provider) = TRACER_PROVIDER.get() {
        let _ = provider.shutdown();
        tracing::debug!("OpenTelemetry tracer provider shut down");
    }
}
