//! Span constructors and recording helpers.
//!
//! The spans declare `error`, `error.message` and `duration_ms` up front so that
//! [`record_error`] and [`record_duration`] have a field to write into.

/// Span around a batch pipeline stage (`build`, `prepare`, ...).
///
/// ```rust
/// let span = mimic_observability::pipeline_span!("build", "chats");
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! pipeline_span {
    ($stage:expr, $input:expr) => {
        tracing::info_span!(
            "pipeline",
            pipeline.stage = $stage,
            pipeline.input = %$input,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Span around one reply generation.
///
/// ```rust
/// let span = mimic_observability::generation_span!("my-dialogpt", 0.7_f32, 2usize);
/// let _guard = span.enter();
/// ```
#[macro_export]
macro_rules! generation_span {
    ($model:expr, $temperature:expr, $context_len:expr) => {
        tracing::info_span!(
            "generation",
            model = %$model,
            temperature = $temperature as f64,
            context.len = $context_len as u64,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Span around an external fine-tuning run.
#[macro_export]
macro_rules! training_span {
    ($command:expr, $output_dir:expr) => {
        tracing::info_span!(
            "training",
            training.command = %$command,
            training.output = %$output_dir,
            error = tracing::field::Empty,
            error.message = tracing::field::Empty,
            duration_ms = tracing::field::Empty,
        )
    };
}

/// Mark the current span as failed and emit a warning.
///
/// Failures recorded here are recoverable by the caller; fatal ones are
/// reported by the CLI.
pub fn record_error<E: std::error::Error>(error: &E) {
    let span = tracing::Span::current();
    span.record("error", true);
    span.record("error.message", error.to_string());
    tracing::warn!(error = %error, "Operation failed");
}

/// Record `duration` in milliseconds under `key` on the current span.
pub fn record_duration(key: &str, duration: std::time::Duration) {
    let span = tracing::Span::current();
    span.record(key, duration.as_millis() as u64);
}
