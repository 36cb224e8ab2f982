//! Google Analytics Integration
//!
//! The reporting service behind every `/analytics` endpoint.
//!
//! - **ReportingClient**: trait seam the HTTP layer depends on
//! - **GaDataClient**: GA4 Data API implementation over HTTPS, authenticated
//!   with a service-account key via `gcp_auth`

mod client;
mod types;

pub use client::{
    GaClientConfig, GaDataClient, ReportingClient, ReportingError, ANALYTICS_READONLY_SCOPE,
};
pub use types::{ErrorEnvelope, RunReportRequest, RunReportResponse};
