//! Application State
//!
//! Shared state accessible by all API handlers.
//! Wrapped in Arc for thread-safe sharing across async tasks.

use std::sync::Arc;
use std::time::Instant;

use crate::config::{AnalyticsConfig, ServerConfig};
use crate::ga::ReportingClient;
use crate::report::DateRange;

/// Shared application state for all handlers
#[derive(Clone)]
pub struct AppState {
    /// Reporting client, built once at start-up
    pub reports: Arc<dyn ReportingClient>,
    /// GA4 property every report targets
    pub property_id: String,
    /// Date range for dated reports
    pub date_range: DateRange,
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        reports: Arc<dyn ReportingClient>,
        analytics: &AnalyticsConfig,
        config: ServerConfig,
    ) -> Self {
        Self {
            reports,
            property_id: analytics.property_id.clone(),
            date_range: analytics.date_range(),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
