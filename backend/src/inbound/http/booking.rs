//! Booking flow handlers.
//!
//! ```text
//! GET  /                         home page
//! GET  /about, /contact          static pages
//! GET  /bungalows/{id}           a bungalow's own page
//! GET  /search-availability      search form
//! POST /search-availability      start=YYYY-MM-DD&end=YYYY-MM-DD
//! GET  /choose-unit/{id}         pick a bungalow from the results
//! GET  /book-unit?s=&e=&id=      quick booking from a bungalow's page
//! GET  /make-reservation         guest details form
//! POST /make-reservation         full_name=&email=&phone=
//! GET  /reservation-summary      committed reservation, shown once
//! ```
//!
//! Handlers only decode the request and build a workflow; every decision is
//! made in [`crate::domain::BookingWorkflow`].

use actix_web::{HttpResponse, get, post, web};
use serde::Deserialize;

use crate::domain::GuestDetails;
use crate::inbound::http::ApiResult;
use crate::inbound::http::pages::{render, respond};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Search form body. Missing fields decode as empty strings and are
/// rejected by date parsing.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub start: String,
    pub end: String,
}

/// Quick booking query string.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BookUnitQuery {
    pub s: String,
    pub e: String,
    pub id: String,
}

/// Guest details form body.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DetailsForm {
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl From<DetailsForm> for GuestDetails {
    fn from(form: DetailsForm) -> Self {
        Self {
            full_name: form.full_name,
            email: form.email,
            phone: form.phone,
        }
    }
}

#[get("/")]
pub async fn home(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    render(&state.workflow(&session).home())
}

#[get("/about")]
pub async fn about(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    render(&state.workflow(&session).about())
}

#[get("/contact")]
pub async fn contact(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    render(&state.workflow(&session).contact())
}

#[get("/bungalows/{id}")]
pub async fn bungalow_page(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let outcome = state.workflow(&session).bungalow_page(&path).await?;
    Ok(respond(outcome))
}

#[get("/search-availability")]
pub async fn search_page(state: web::Data<HttpState>, session: SessionContext) -> HttpResponse {
    render(&state.workflow(&session).search_page())
}

#[post("/search-availability")]
pub async fn search(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<SearchForm>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .workflow(&session)
        .search(&form.start, &form.end)
        .await?;
    Ok(respond(outcome))
}

#[get("/choose-unit/{id}")]
pub async fn choose_unit(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let outcome = state.workflow(&session).choose_unit(&path)?;
    Ok(respond(outcome))
}

#[get("/book-unit")]
pub async fn book_unit(
    state: web::Data<HttpState>,
    session: SessionContext,
    query: web::Query<BookUnitQuery>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .workflow(&session)
        .book_unit(&query.s, &query.e, &query.id)
        .await?;
    Ok(respond(outcome))
}

#[get("/make-reservation")]
pub async fn show_details(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let outcome = state.workflow(&session).show_details().await?;
    Ok(respond(outcome))
}

#[post("/make-reservation")]
pub async fn submit_details(
    state: web::Data<HttpState>,
    session: SessionContext,
    form: web::Form<DetailsForm>,
) -> ApiResult<HttpResponse> {
    let outcome = state
        .workflow(&session)
        .submit_details(form.into_inner().into())
        .await?;
    Ok(respond(outcome))
}

#[get("/reservation-summary")]
pub async fn summary(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let outcome = state.workflow(&session).summary().await?;
    Ok(respond(outcome))
}

#[cfg(test)]
#[path = "booking_tests.rs"]
mod tests;
