//! Availability check for a single bungalow.
//!
//! Answers whether one bungalow is free for a date range as JSON, for use from
//! a unit's own page. It never reads or writes the visitor's session.

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{AvailabilityService, StayPeriod, UnitId};
use crate::inbound::http::state::HttpState;

pub const INVALID_PARAMETERS_MESSAGE: &str = "Invalid request parameters";
pub const QUERY_FAILED_MESSAGE: &str = "Error querying availability";

/// Form body for the availability check.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct AvailabilityForm {
    #[schema(example = "2036-04-01")]
    pub start: String,
    #[schema(example = "2036-04-03")]
    pub end: String,
    #[schema(example = "1")]
    pub unit_id: String,
}

/// Availability answer. `ok` is true only when the bungalow is free; the
/// request fields are echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub ok: bool,
    pub message: String,
    pub unit_id: String,
    pub start_date: String,
    pub end_date: String,
}

impl AvailabilityResponse {
    fn for_form(form: &AvailabilityForm, ok: bool, message: &str) -> Self {
        Self {
            ok,
            message: message.to_owned(),
            unit_id: form.unit_id.clone(),
            start_date: form.start.clone(),
            end_date: form.end.clone(),
        }
    }
}

/// Check whether a bungalow is free for the given stay.
#[utoipa::path(
    post,
    path = "/search-availability-json",
    request_body(content = AvailabilityForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Availability answer", body = AvailabilityResponse)
    ),
    tags = ["availability"],
    operation_id = "checkAvailability"
)]
#[post("/search-availability-json")]
pub async fn check_availability(
    state: web::Data<HttpState>,
    form: web::Form<AvailabilityForm>,
) -> web::Json<AvailabilityResponse> {
    let form = form.into_inner();
    let parsed = StayPeriod::parse(&form.start, &form.end)
        .ok()
        .zip(form.unit_id.trim().parse::<UnitId>().ok());
    let Some((stay, unit_id)) = parsed else {
        debug!(unit_id = %form.unit_id, "rejecting malformed availability check");
        return web::Json(AvailabilityResponse::for_form(
            &form,
            false,
            INVALID_PARAMETERS_MESSAGE,
        ));
    };

    let service = AvailabilityService::new(state.bookings.as_ref());
    let response = match service.is_unit_available(unit_id, &stay).await {
        Ok(available) => AvailabilityResponse::for_form(&form, available, ""),
        Err(_) => AvailabilityResponse::for_form(&form, false, QUERY_FAILED_MESSAGE),
    };
    web::Json(response)
}
