//! Analytics Routes
//!
//! One generic handler serves every report in the catalog.
//!
//! - GET /analytics/{slug} - Run the report and return its projected body

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::report::{self, ReportBody, ReportDefinition};

/// GET /analytics/{slug}
///
/// Run `definition` against the configured property. Any upstream or shape
/// failure becomes a 500 carrying the report's error message.
pub async fn run_report(
    State(state): State<Arc<AppState>>,
    definition: &'static ReportDefinition,
) -> ApiResult<Json<ReportBody>> {
    let body = report::run(
        state.reports.as_ref(),
        definition,
        &state.property_id,
        &state.date_range,
    )
    .await
    .map_err(|e| ApiError::upstream(definition.error_message, e))?;

    Ok(Json(body))
}
