//! Turn workflow outcomes into HTTP responses.
//!
//! Pages go out as JSON for the external renderer. Redirects use
//! `303 See Other` so a browser follows a form POST with a GET.

use actix_web::HttpResponse;
use actix_web::http::header;

use crate::domain::{Page, Route, StepOutcome};

/// Cache policy for responses carrying session state.
pub const PRIVATE_NO_CACHE: &str = "private, no-cache, must-revalidate";

/// Response for a workflow step.
pub fn respond(outcome: StepOutcome) -> HttpResponse {
    match outcome {
        StepOutcome::Render(page) => render(&page),
        StepOutcome::Redirect(route) => redirect(route),
    }
}

/// Page payload for the renderer. Pages carry session data, so they are
/// never cached by shared caches.
pub fn render(page: &Page) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::CACHE_CONTROL, PRIVATE_NO_CACHE))
        .json(page)
}

pub fn redirect(route: Route) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, route.path()))
        .finish()
}
