//! Reports
//!
//! Declarative report definitions and the rules that turn a tabular report
//! result into an endpoint's JSON body.
//!
//! ## Flow
//!
//! 1. [`catalog`] builds a [`ReportSpec`] for the requested endpoint
//! 2. A [`crate::ga::ReportingClient`] executes it and returns rows
//! 3. [`projection`] renames the rows into a [`ReportBody`]

pub mod catalog;
pub mod projection;
pub mod row;
pub mod spec;

pub use catalog::{find, ReportDefinition, REPORTS};
pub use projection::{
    Fallback, Field, ProjectedRecord, Projection, ProjectionError, ReportBody, Source,
};
pub use row::{ReportResponse, ReportRow};
pub use spec::{DateRange, DimensionFilter, ReportSpec};

use crate::ga::{ReportingClient, ReportingError};
use thiserror::Error;

/// Failure of a single report request
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Reporting query failed: {0}")]
    Reporting(#[from] ReportingError),

    #[error("Unexpected report shape: {0}")]
    Projection(#[from] ProjectionError),
}

/// Run `report` through `client` and project the result
pub async fn run(
    client: &dyn ReportingClient,
    report: &ReportDefinition,
    property_id: &str,
    dates: &DateRange,
) -> Result<ReportBody, ReportError> {
    let spec = report.spec(property_id, dates);
    let response = client.run_report(&spec).await?;
    Ok(report.projection.project(response)?)
}
