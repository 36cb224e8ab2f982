//! Report Rows
//!
//! Tabular result of a report, independent of the wire format it came in.

/// One result row.
///
/// Values are positionally aligned with the spec's dimensions and metrics.
/// A sequence is `None` when the service omitted it entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportRow {
    pub dimension_values: Option<Vec<String>>,
    pub metric_values: Option<Vec<String>>,
}

impl ReportRow {
    pub fn new<D, M>(dimensions: D, metrics: M) -> Self
    where
        D: IntoIterator,
        D::Item: Into<String>,
        M: IntoIterator,
        M::Item: Into<String>,
    {
        Self {
            dimension_values: Some(dimensions.into_iter().map(Into::into).collect()),
            metric_values: Some(metrics.into_iter().map(Into::into).collect()),
        }
    }

    /// Dimension cell at `index`, if present
    pub fn dimension(&self, index: usize) -> Option<&str> {
        self.dimension_values
            .as_ref()
            .and_then(|values| values.get(index))
            .map(String::as_str)
    }

    /// Metric cell at `index`, if present
    pub fn metric(&self, index: usize) -> Option<&str> {
        self.metric_values
            .as_ref()
            .and_then(|values| values.get(index))
            .map(String::as_str)
    }
}

/// Result of one report query.
///
/// `rows: None` means the service returned no rows property at all, which
/// projects differently from an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportResponse {
    pub rows: Option<Vec<ReportRow>>,
    pub row_count: Option<u64>,
}

impl ReportResponse {
    pub fn with_rows(rows: Vec<ReportRow>) -> Self {
        Self {
            row_count: Some(rows.len() as u64),
            rows: Some(rows),
        }
    }

    /// A response without a rows property
    pub fn without_rows() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_access() {
        let row = ReportRow::new(["/home", "click"], ["12"]);
        assert_eq!(row.dimension(0), Some("/home"));
        assert_eq!(row.dimension(1), Some("click"));
        assert_eq!(row.dimension(2), None);
        assert_eq!(row.metric(0), Some("12"));
    }

    #[test]
    fn test_missing_sequences() {
        let row = ReportRow::default();
        assert_eq!(row.dimension(0), None);
        assert_eq!(row.metric(0), None);
    }
}
