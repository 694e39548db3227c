//! OpenAPI documentation configuration.
//!
//! Only the JSON availability check is a machine-facing API; the booking pages
//! are documented by their templates. The generated document backs Swagger UI
//! in debug builds.

use utoipa::OpenApi;

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::availability::{AvailabilityForm, AvailabilityResponse};

/// OpenAPI document for the availability API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bungalow booking API",
        description = "Availability checks for the bungalow booking site."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(crate::inbound::http::availability::check_availability),
    components(schemas(AvailabilityForm, AvailabilityResponse, Error, ErrorCode)),
    tags(
        (name = "availability", description = "Bungalow availability checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn assert_object_schema_has_field(schema: &RefOr<Schema>, field: &str) {
        match schema {
            RefOr::T(Schema::Object(obj)) => {
                assert!(
                    obj.properties.contains_key(field),
                    "schema should have field '{field}'"
                );
            }
            _ => panic!("expected Object schema"),
        }
    }

    #[test]
    fn documents_the_availability_path() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/search-availability-json"));
    }

    #[test]
    fn availability_response_uses_camel_case_fields() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let response = schemas
            .get("AvailabilityResponse")
            .expect("AvailabilityResponse schema");

        for field in ["ok", "message", "unitId", "startDate", "endDate"] {
            assert_object_schema_has_field(response, field);
        }
    }

    #[test]
    fn error_schema_has_code_and_message() {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let error = schemas.get("Error").expect("Error schema");

        assert_object_schema_has_field(error, "code");
        assert_object_schema_has_field(error, "message");
    }
}
