//! GA4 Data API wire types
//!
//! JSON bodies of `properties/{id}:runReport`, restricted to the fields
//! this service sends and reads.

use serde::{Deserialize, Serialize};

use crate::report::{ReportResponse, ReportRow, ReportSpec};

// ============================================
// Request
// ============================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportRequest<'a> {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub date_ranges: Vec<DateRangeBody<'a>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimensions: Vec<NamedField<'a>>,
    pub metrics: Vec<NamedField<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dimension_filter: Option<FilterExpression<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRangeBody<'a> {
    pub start_date: &'a str,
    pub end_date: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NamedField<'a> {
    pub name: &'a str,
}

#[derive(Debug, Serialize)]
pub struct FilterExpression<'a> {
    pub filter: Filter<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter<'a> {
    pub field_name: &'a str,
    pub string_filter: StringFilter<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StringFilter<'a> {
    pub match_type: &'static str,
    pub value: &'a str,
}

impl<'a> From<&'a ReportSpec> for RunReportRequest<'a> {
    fn from(spec: &'a ReportSpec) -> Self {
        let named = |names: &'a [String]| {
            names
                .iter()
                .map(|name| NamedField { name })
                .collect::<Vec<_>>()
        };

        Self {
            date_ranges: spec
                .dates()
                .map(|range| DateRangeBody {
                    start_date: &range.start,
                    end_date: &range.end,
                })
                .into_iter()
                .collect(),
            dimensions: named(spec.dimensions()),
            metrics: named(spec.metrics()),
            dimension_filter: spec.dimension_filter().map(|filter| FilterExpression {
                filter: Filter {
                    field_name: &filter.dimension,
                    string_filter: StringFilter {
                        match_type: "EXACT",
                        value: &filter.value,
                    },
                },
            }),
        }
    }
}

// ============================================
// Response
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReportResponse {
    #[serde(default)]
    pub rows: Option<Vec<Row>>,
    #[serde(default)]
    pub row_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    #[serde(default)]
    pub dimension_values: Option<Vec<Cell>>,
    #[serde(default)]
    pub metric_values: Option<Vec<Cell>>,
}

/// Dimension or metric value. An omitted `value` is the empty string.
#[derive(Debug, Deserialize)]
pub struct Cell {
    #[serde(default)]
    pub value: String,
}

impl From<RunReportResponse> for ReportResponse {
    fn from(response: RunReportResponse) -> Self {
        let cells = |cells: Option<Vec<Cell>>| -> Option<Vec<String>> {
            cells.map(|cells| cells.into_iter().map(|cell| cell.value).collect())
        };

        Self {
            rows: response.rows.map(|rows| {
                rows.into_iter()
                    .map(|row| ReportRow {
                        dimension_values: cells(row.dimension_values),
                        metric_values: cells(row.metric_values),
                    })
                    .collect()
            }),
            row_count: response.row_count,
        }
    }
}

/// Google API error envelope: `{"error": {"code", "message", "status"}}`
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ErrorDetail {
    #[serde(default)]
    pub code: u16,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}
