//! Data Transfer Objects
//!
//! Response types shared by the API endpoints. Report bodies themselves are
//! [`crate::report::ReportBody`], shaped by the catalog.

use serde::Serialize;
use utoipa::ToSchema;

/// Error body of every failed report request
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Endpoint-specific message
    pub error: String,
}

/// Full health status
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall status: "healthy"
    pub status: String,
    /// GA4 property the reports target
    pub property_id: String,
    /// Number of report endpoints served
    pub reports: usize,
    /// Server uptime in seconds
    pub uptime_seconds: u64,
    /// Server version
    pub version: String,
}
