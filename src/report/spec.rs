//! Report Specifications
//!
//! Vendor-neutral description of a single report query: which property,
//! which date range, which dimensions and metrics, and an optional
//! exact-match dimension filter.

use serde::Serialize;

/// Inclusive date range, bounds passed to the reporting service verbatim.
///
/// Each bound is either a `YYYY-MM-DD` date or one of the service keywords
/// (`today`, `yesterday`, `NdaysAgo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

impl DateRange {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::new("2024-08-01", "today")
    }
}

/// Exact-match filter on one dimension
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionFilter {
    pub dimension: String,
    pub value: String,
}

impl DimensionFilter {
    pub fn exact(dimension: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            dimension: dimension.into(),
            value: value.into(),
        }
    }
}

/// A single report query.
///
/// Dimension and metric order is significant: row values come back
/// positionally aligned with these lists. A spec always carries at least
/// one metric, the constructor takes the first one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSpec {
    property_id: String,
    date_range: Option<DateRange>,
    dimensions: Vec<String>,
    metrics: Vec<String>,
    filter: Option<DimensionFilter>,
}

impl ReportSpec {
    /// Create a spec for `property_id` with its first metric
    pub fn new(property_id: impl Into<String>, metric: impl Into<String>) -> Self {
        Self {
            property_id: property_id.into(),
            date_range: None,
            dimensions: Vec::new(),
            metrics: vec![metric.into()],
            filter: None,
        }
    }

    /// Set the date range
    pub fn date_range(mut self, range: DateRange) -> Self {
        self.date_range = Some(range);
        self
    }

    /// Append a dimension
    pub fn dimension(mut self, name: impl Into<String>) -> Self {
        self.dimensions.push(name.into());
        self
    }

    /// Append a metric
    pub fn metric(mut self, name: impl Into<String>) -> Self {
        self.metrics.push(name.into());
        self
    }

    /// Restrict rows to those where `filter.dimension` equals `filter.value`
    pub fn filter(mut self, filter: DimensionFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn property_id(&self) -> &str {
        &self.property_id
    }

    pub fn dates(&self) -> Option<&DateRange> {
        self.date_range.as_ref()
    }

    pub fn dimensions(&self) -> &[String] {
        &self.dimensions
    }

    /// Never empty
    pub fn metrics(&self) -> &[String] {
        &self.metrics
    }

    pub fn dimension_filter(&self) -> Option<&DimensionFilter> {
        self.filter.as_ref()
    }
}
