//! # GA Dashboard
//!
//! Google Analytics Dashboard API - a small HTTP service that runs fixed
//! GA4 Data API reports and reshapes their rows into JSON.
//!
//! ## Features
//!
//! - **Declarative reports**: every endpoint is one entry in a catalog
//! - **Row projection**: positional dimension/metric values renamed into
//!   public field names, with per-field fallbacks
//! - **Generated docs**: OpenAPI document and Swagger UI built from the catalog
//! - **Service accounts**: GA4 access via a service-account key file
//!
//! ## Modules
//!
//! - [`report`]: Report specs, catalog and projection rules
//! - [`ga`]: GA4 Data API client
//! - [`api`]: REST API server with Axum
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ga_dashboard::ga::{GaClientConfig, GaDataClient};
//! use ga_dashboard::report::{self, DateRange};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = GaDataClient::with_credentials(
//!         GaClientConfig::default(),
//!         Some(Path::new("service-account.json")),
//!     )
//!     .await?;
//!
//!     let users = report::find("users-by-city").expect("known report");
//!     let body = report::run(&client, users, "501552511", &DateRange::default()).await?;
//!
//!     println!("{}", serde_json::to_string_pretty(&body)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod ga;
pub mod logging;
pub mod report;

// Re-export top-level types for convenience
pub use api::{build_router, serve, ApiError, AppState};

pub use config::{AnalyticsConfig, Config, ConfigError, LoggingConfig, ServerConfig};

pub use ga::{GaClientConfig, GaDataClient, ReportingClient, ReportingError};

pub use report::{
    DateRange, ProjectedRecord, Projection, ReportBody, ReportDefinition, ReportError,
    ReportResponse, ReportRow, ReportSpec, REPORTS,
};
