//! OpenAPI specification
//!
//! Health routes are annotated inline; report routes are generated from
//! the report catalog so the document always matches what is served.

use utoipa::openapi::content::ContentBuilder;
use utoipa::openapi::path::{HttpMethod, OperationBuilder, PathItem};
use utoipa::openapi::response::{Response, ResponseBuilder};
use utoipa::openapi::schema::{Array, ObjectBuilder, Ref, Schema, Type};
use utoipa::openapi::RefOr;
use utoipa::OpenApi;

use crate::api::dto::{ErrorResponse, HealthResponse};
use crate::api::routes::health;
use crate::report::{Projection, ReportDefinition, REPORTS};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Google Analytics Dashboard API",
        version = env!("CARGO_PKG_VERSION"),
        description = "API for fetching GA4 analytics data"
    ),
    tags(
        (name = "analytics", description = "GA4 reports"),
        (name = "health", description = "Health checks")
    ),
    paths(health::liveness, health::full_health),
    components(schemas(ErrorResponse, HealthResponse))
)]
pub struct ApiDoc;

/// Full document: annotated routes plus one path per catalog report
pub fn document() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    for report in REPORTS {
        doc.paths
            .paths
            .insert(report.path.to_string(), report_path(report));
    }
    doc
}

fn report_path(report: &ReportDefinition) -> PathItem {
    let operation = OperationBuilder::new()
        .operation_id(Some(report.slug().replace('-', "_")))
        .summary(Some(report.summary))
        .tag("analytics")
        .response("200", json_response(report.description, body_schema(&report.projection)))
        .response(
            "500",
            json_response(
                report.error_message,
                RefOr::Ref(Ref::from_schema_name("ErrorResponse")),
            ),
        )
        .build();

    PathItem::new(HttpMethod::Get, operation)
}

fn json_response(description: &str, schema: RefOr<Schema>) -> Response {
    ResponseBuilder::new()
        .description(description)
        .content(
            "application/json",
            ContentBuilder::new().schema(Some(schema)).build(),
        )
        .build()
}

fn string_schema() -> RefOr<Schema> {
    RefOr::T(Schema::Object(
        ObjectBuilder::new().schema_type(Type::String).build(),
    ))
}

/// Response schema of a projection: all values are strings
fn body_schema(projection: &Projection) -> RefOr<Schema> {
    let object = match projection {
        Projection::Scalar { key } => ObjectBuilder::new()
            .property(*key, string_schema())
            .required(*key),
        Projection::List { fields } => {
            let record = fields.iter().fold(ObjectBuilder::new(), |builder, field| {
                builder.property(field.name, string_schema()).required(field.name)
            });
            let rows = Array::new(RefOr::T(Schema::Object(record.build())));
            ObjectBuilder::new().property("data", RefOr::T(Schema::Array(rows)))
        }
    };

    RefOr::T(Schema::Object(object.build()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_lists_every_report() {
        let doc = document();
        for report in REPORTS {
            let item = doc.paths.paths.get(report.path).unwrap();
            assert!(item.get.is_some(), "{} has no GET", report.path);
        }
        assert!(doc.paths.paths.contains_key("/health"));
        assert!(doc.paths.paths.contains_key("/health/live"));
    }

    #[test]
    fn test_document_json_shape() {
        let json = serde_json::to_value(document()).unwrap();
        assert_eq!(json["info"]["title"], "Google Analytics Dashboard API");

        let city = &json["paths"]["/analytics/users-by-city"]["get"];
        assert_eq!(city["summary"], "Get active users grouped by city");
        assert_eq!(city["operationId"], "users_by_city");

        let schema = &city["responses"]["200"]["content"]["application/json"]["schema"];
        let record = &schema["properties"]["data"]["items"];
        assert_eq!(record["properties"]["city"]["type"], "string");
        assert_eq!(record["properties"]["activeUsers"]["type"], "string");

        let error = &city["responses"]["500"];
        assert_eq!(error["description"], "Failed to fetch GA data");
        assert_eq!(
            error["content"]["application/json"]["schema"]["$ref"],
            "#/components/schemas/ErrorResponse"
        );
    }

    #[test]
    fn test_scalar_schema_requires_key() {
        let json = serde_json::to_value(document()).unwrap();
        let schema = &json["paths"]["/analytics/bounce-rate"]["get"]["responses"]["200"]["content"]
            ["application/json"]["schema"];
        assert_eq!(schema["properties"]["bounceRate"]["type"], "string");
        assert_eq!(schema["required"][0], "bounceRate");
    }
}
