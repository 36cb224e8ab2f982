//! Report Catalog
//!
//! The fixed set of reports served under `/analytics`. Each entry pairs a
//! query shape with the projection that renames its rows, so the HTTP layer
//! and the OpenAPI document are both driven from this one table.

use super::projection::{Field, Projection, Source};
use super::spec::{DateRange, DimensionFilter, ReportSpec};

/// Message returned by reports that do not define their own
const GENERIC_ERROR: &str = "Failed to fetch GA data";

/// Static filter: `(dimension, exact value)`
pub type StaticFilter = (&'static str, &'static str);

/// One catalog entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportDefinition {
    /// Route path
    pub path: &'static str,
    /// One-line summary for API docs
    pub summary: &'static str,
    /// Response description for API docs
    pub description: &'static str,
    pub dimensions: &'static [&'static str],
    /// First entry is the spec's mandatory metric
    pub metrics: &'static [&'static str],
    pub filter: Option<StaticFilter>,
    /// Whether the configured default date range applies
    pub dated: bool,
    pub projection: Projection,
    /// Body of the 500 response
    pub error_message: &'static str,
}

impl ReportDefinition {
    /// Last path segment, e.g. `bounce-rate`
    pub fn slug(&self) -> &'static str {
        self.path.rsplit('/').next().unwrap_or(self.path)
    }

    /// Build the report spec for `property_id`
    pub fn spec(&self, property_id: &str, dates: &DateRange) -> ReportSpec {
        let mut metrics = self.metrics.iter();
        let first = metrics.next().copied().unwrap_or_default();

        let mut spec = ReportSpec::new(property_id, first);
        for metric in metrics {
            spec = spec.metric(*metric);
        }
        for dimension in self.dimensions {
            spec = spec.dimension(*dimension);
        }
        if let Some((dimension, value)) = self.filter {
            spec = spec.filter(DimensionFilter::exact(dimension, value));
        }
        if self.dated {
            spec = spec.date_range(dates.clone());
        }
        spec
    }
}

const fn scalar(
    path: &'static str,
    summary: &'static str,
    description: &'static str,
    metrics: &'static [&'static str],
    key: &'static str,
    error_message: &'static str,
) -> ReportDefinition {
    ReportDefinition {
        path,
        summary,
        description,
        dimensions: &[],
        metrics,
        filter: None,
        dated: true,
        projection: Projection::Scalar { key },
        error_message,
    }
}

/// Single-dimension, single-metric list report without fallbacks
const fn breakdown(
    path: &'static str,
    summary: &'static str,
    description: &'static str,
    dimensions: &'static [&'static str],
    metrics: &'static [&'static str],
    fields: &'static [Field],
) -> ReportDefinition {
    ReportDefinition {
        path,
        summary,
        description,
        dimensions,
        metrics,
        filter: None,
        dated: true,
        projection: Projection::List { fields },
        error_message: GENERIC_ERROR,
    }
}

const fn pair(dimension: &'static str, metric: &'static str) -> [Field; 2] {
    [
        Field::required(dimension, Source::Dimension(0)),
        Field::required(metric, Source::Metric(0)),
    ]
}

const CITY_FIELDS: [Field; 2] = pair("city", "activeUsers");
const PAGE_VIEW_FIELDS: [Field; 2] = pair("pagePath", "pageViews");
const COUNTRY_FIELDS: [Field; 2] = pair("country", "activeUsers");
const NEW_VS_RETURNING_FIELDS: [Field; 2] = pair("type", "users");
const BROWSER_FIELDS: [Field; 2] = pair("browser", "users");
const DEVICE_FIELDS: [Field; 2] = pair("device", "users");
const TRAFFIC_FIELDS: [Field; 2] = pair("sourceMedium", "sessions");

/// Every report, in route registration order
pub static REPORTS: &[ReportDefinition] = &[
    ReportDefinition {
        path: "/analytics/events",
        summary: "Get user events and click counts",
        description: "List of events with counts",
        dimensions: &["eventName"],
        metrics: &["eventCount"],
        filter: None,
        dated: true,
        projection: Projection::List {
            fields: &[
                Field::or("event", Source::Dimension(0), "N/A"),
                Field::or("count", Source::Metric(0), "0"),
            ],
        },
        error_message: "Failed to fetch event data",
    },
    ReportDefinition {
        path: "/analytics/clicks-per-page",
        summary: "Get click counts per page",
        description: "List of pages with click counts",
        dimensions: &["pagePath", "eventName"],
        metrics: &["eventCount"],
        filter: Some(("eventName", "click")),
        dated: false,
        projection: Projection::List {
            fields: &[
                Field::or("page", Source::Dimension(0), "N/A"),
                Field::or("event", Source::Dimension(1), "click"),
                Field::or("count", Source::Metric(0), "0"),
            ],
        },
        error_message: "Failed to fetch click event data",
    },
    scalar(
        "/analytics/session-duration",
        "Get average session duration",
        "Average time spent in sessions",
        &["averageSessionDuration"],
        "averageSessionDuration",
        "Failed to fetch session duration",
    ),
    scalar(
        "/analytics/engaged-sessions",
        "Get engaged sessions count",
        "Engaged sessions (sessions longer than 10s or with conversion)",
        &["engagedSessions"],
        "engagedSessions",
        "Failed to fetch engaged sessions",
    ),
    scalar(
        "/analytics/bounce-rate",
        "Get bounce rate",
        "Bounce rate percentage",
        &["bounceRate"],
        "bounceRate",
        "Failed to fetch bounce rate",
    ),
    scalar(
        "/analytics/views-per-session",
        "Get average screen/page views per session",
        "Screen views per session",
        &["screenPageViewsPerSession"],
        "viewsPerSession",
        "Failed to fetch views per session",
    ),
    breakdown(
        "/analytics/users-by-city",
        "Get active users grouped by city",
        "List of active users per city",
        &["city"],
        &["activeUsers"],
        &CITY_FIELDS,
    ),
    breakdown(
        "/analytics/page-views",
        "Get page views by path",
        "List of page views per page path",
        &["pagePath"],
        &["screenPageViews"],
        &PAGE_VIEW_FIELDS,
    ),
    breakdown(
        "/analytics/users-by-country",
        "Get active users grouped by country",
        "List of active users per country",
        &["country"],
        &["activeUsers"],
        &COUNTRY_FIELDS,
    ),
    breakdown(
        "/analytics/new-vs-returning",
        "Get new vs returning users",
        "Breakdown of users by new vs returning",
        &["newVsReturning"],
        &["activeUsers"],
        &NEW_VS_RETURNING_FIELDS,
    ),
    breakdown(
        "/analytics/top-browsers",
        "Get top browsers used by users",
        "List of browsers and user counts",
        &["browser"],
        &["activeUsers"],
        &BROWSER_FIELDS,
    ),
    breakdown(
        "/analytics/device-category",
        "Get users by device category",
        "Breakdown of users by device category (desktop/mobile/tablet)",
        &["deviceCategory"],
        &["activeUsers"],
        &DEVICE_FIELDS,
    ),
    breakdown(
        "/analytics/traffic-sources",
        "Get traffic sources (session source/medium)",
        "List of traffic sources",
        &["sessionSourceMedium"],
        &["sessions"],
        &TRAFFIC_FIELDS,
    ),
];

/// Look up a report by full path (`/analytics/bounce-rate`) or slug (`bounce-rate`)
pub fn find(name: &str) -> Option<&'static ReportDefinition> {
    REPORTS
        .iter()
        .find(|report| report.path == name || report.slug() == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_thirteen_unique_routes() {
        assert_eq!(REPORTS.len(), 13);
        let paths: HashSet<_> = REPORTS.iter().map(|r| r.path).collect();
        assert_eq!(paths.len(), REPORTS.len());
        assert!(REPORTS.iter().all(|r| r.path.starts_with("/analytics/")));
    }

    #[test]
    fn test_every_report_has_a_metric() {
        for report in REPORTS {
            assert!(!report.metrics.is_empty(), "{} has no metric", report.path);
        }
    }

    #[test]
    fn test_projection_positions_fit_the_query() {
        for report in REPORTS {
            if let Projection::List { fields } = report.projection {
                for field in fields {
                    match field.source {
                        Source::Dimension(i) => assert!(i < report.dimensions.len(), "{}", report.path),
                        Source::Metric(i) => assert!(i < report.metrics.len(), "{}", report.path),
                    }
                }
            } else {
                assert!(report.dimensions.is_empty(), "{}", report.path);
            }
        }
    }

    #[test]
    fn test_find_by_path_or_slug() {
        let by_path = find("/analytics/bounce-rate").unwrap();
        let by_slug = find("bounce-rate").unwrap();
        assert_eq!(by_path, by_slug);
        assert_eq!(by_slug.slug(), "bounce-rate");
        assert!(find("nope").is_none());
    }

    #[test]
    fn test_events_spec() {
        let spec = find("events").unwrap().spec("501552511", &DateRange::default());
        assert_eq!(spec.property_id(), "501552511");
        assert_eq!(spec.dimensions(), ["eventName"]);
        assert_eq!(spec.metrics(), ["eventCount"]);
        assert_eq!(spec.dates(), Some(&DateRange::new("2024-08-01", "today")));
        assert!(spec.dimension_filter().is_none());
    }

    #[test]
    fn test_clicks_per_page_spec_is_filtered_and_undated() {
        let spec = find("clicks-per-page").unwrap().spec("1", &DateRange::default());
        assert_eq!(spec.dimensions(), ["pagePath", "eventName"]);
        assert_eq!(spec.metrics(), ["eventCount"]);
        assert_eq!(
            spec.dimension_filter(),
            Some(&DimensionFilter::exact("eventName", "click"))
        );
        assert!(spec.dates().is_none());
    }

    #[test]
    fn test_scalar_specs_have_no_dimensions() {
        let cases = [
            ("session-duration", "averageSessionDuration"),
            ("engaged-sessions", "engagedSessions"),
            ("bounce-rate", "bounceRate"),
            ("views-per-session", "screenPageViewsPerSession"),
        ];
        for (slug, metric) in cases {
            let spec = find(slug).unwrap().spec("1", &DateRange::default());
            assert!(spec.dimensions().is_empty());
            assert_eq!(spec.metrics(), [metric]);
            assert!(spec.dates().is_some());
        }
    }

    #[test]
    fn test_breakdown_shapes() {
        let cases = [
            ("users-by-city", "city", "activeUsers", ["city", "activeUsers"]),
            ("page-views", "pagePath", "screenPageViews", ["pagePath", "pageViews"]),
            ("users-by-country", "country", "activeUsers", ["country", "activeUsers"]),
            ("new-vs-returning", "newVsReturning", "activeUsers", ["type", "users"]),
            ("top-browsers", "browser", "activeUsers", ["browser", "users"]),
            ("device-category", "deviceCategory", "activeUsers", ["device", "users"]),
            ("traffic-sources", "sessionSourceMedium", "sessions", ["sourceMedium", "sessions"]),
        ];
        for (slug, dimension, metric, fields) in cases {
            let report = find(slug).unwrap();
            let spec = report.spec("1", &DateRange::default());
            assert_eq!(spec.dimensions(), [dimension], "{}", slug);
            assert_eq!(spec.metrics(), [metric], "{}", slug);
            assert_eq!(report.projection.field_names(), fields, "{}", slug);
            assert_eq!(report.error_message, "Failed to fetch GA data");
        }
    }

    #[test]
    fn test_custom_date_range_is_used() {
        let dates = DateRange::new("30daysAgo", "yesterday");
        let spec = find("users-by-city").unwrap().spec("1", &dates);
        assert_eq!(spec.dates(), Some(&dates));
    }
}
