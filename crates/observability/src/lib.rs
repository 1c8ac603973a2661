//! mimic-observability: tracing setup shared by the mimic binaries.
//!
//! Console logs go to stderr so that `--output json` on stdout stays parseable.
//! Spans are additionally exported over OTLP when an endpoint is configured.
//!
//! ```no_run
//! use mimic_observability::{init, ObservabilityConfig};
//!
//! let config = ObservabilityConfig::from_env().with_log_level("debug");
//! init(config)?;
//!
//! let span = mimic_observability::pipeline_span!("build", "chats");
//! let _guard = span.enter();
//! tracing::info!("Dataset build started");
//! # Ok::<(), mimic_observability::ObservabilityError>(())
//! ```
//!
//! # Environment Variables
//!
//! - `MIMIC_LOG` or `RUST_LOG` - log filter directives
//! - `OTEL_EXPORTER_OTLP_ENDPOINT` - OTLP gRPC endpoint, export is off when unset
//! - `OTEL_SERVICE_NAME` - service name, defaults to `mimic`

pub mod config;
pub mod error;
pub mod telemetry;
pub mod tracing;

pub use config::ObservabilityConfig;
pub use error::ObservabilityError;
pub use telemetry::{init, shutdown};
pub use tracing::{record_duration, record_error};
