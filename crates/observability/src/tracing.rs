//! Span macros and recording helpers for the script pipeline

/// Span around one pipeline stage (`"extract"`, `"aggregate"`, `"generate"`).
///
/// Declares `duration_ms` and `error` so [`record_duration`] and [`record_error`]
/// can fill them in later.
///
/// # Example
///
/// ```rust
/// use slidescript_observability::stage_span;
///
/// let span = stage_span!("aggregate");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! stage_span {
    ($stage:expr) => {
        tracing::info_span!(
            "pipeline.stage",
            stage = $stage,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Span around a single backend call.
///
/// # Example
///
/// ```rust
/// use slidescript_observability::backend_span;
///
/// let span = backend_span!("groq", "llama-3.3-70b-versatile");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! backend_span {
    ($provider:expr, $model:expr) => {
        tracing::info_span!(
            "backend.generate",
            backend.provider = $provider,
            backend.model = $model,
            duration_ms = tracing::field::Empty,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
        )
    };
}

/// Record an error on the current span and log it.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string().as_str());
    tracing::error!(error = %error, "Operation failed");
}

/// Record a duration in milliseconds under `key` on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
