//! End-to-end booking flow over the HTTP adapter.
//!
//! Drives the real handlers through cookie sessions against the in-memory
//! booking store, following a guest from search to the summary page.

use std::sync::Arc;

use actix_session::SessionMiddleware;
use actix_session::storage::CookieSessionStore;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use bungalow::Trace;
use bungalow::domain::ports::FixtureBookingRepository;
use bungalow::domain::{DetailsRules, RestrictionKind, UnitId};
use bungalow::inbound::http::configure;
use bungalow::inbound::http::state::HttpState;
use rstest::{fixture, rstest};
use serde_json::Value;

const SESSION_COOKIE: &str = "session";

#[fixture]
fn repo() -> FixtureBookingRepository {
    FixtureBookingRepository::new()
}

async fn booking_app(
    repo: &FixtureBookingRepository,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    let state = HttpState::new(Arc::new(repo.clone()), DetailsRules::default());
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(
                SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
                    .cookie_name(SESSION_COOKIE.to_owned())
                    .cookie_secure(false)
                    .build(),
            )
            .wrap(Trace)
            .configure(configure),
    )
    .await
}

/// Browser-like cookie jar holding the single session cookie.
#[derive(Default)]
struct Jar(Option<Cookie<'static>>);

impl Jar {
    fn absorb(&mut self, response: &ServiceResponse) {
        if let Some(cookie) = response
            .response()
            .cookies()
            .find(|cookie| cookie.name() == SESSION_COOKIE)
        {
            self.0 = Some(cookie.into_owned());
        }
    }

    fn attach(&self, request: test::TestRequest) -> test::TestRequest {
        match &self.0 {
            Some(cookie) => request.cookie(cookie.clone()),
            None => request,
        }
    }
}

fn location(response: &ServiceResponse) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    jar: &mut Jar,
    request: test::TestRequest,
) -> ServiceResponse {
    let response = test::call_service(app, jar.attach(request).to_request()).await;
    jar.absorb(&response);
    response
}

#[rstest]
#[actix_web::test]
async fn guest_books_a_bungalow_from_search_to_summary(repo: FixtureBookingRepository) {
    let app = booking_app(&repo).await;
    let mut jar = Jar::default();

    let search = send(
        &app,
        &mut jar,
        test::TestRequest::post()
            .uri("/search-availability")
            .set_form(vec![("start", "2036-04-01"), ("end", "2036-04-03")]),
    )
    .await;
    assert_eq!(search.status(), StatusCode::OK);
    let page: Value = test::read_body_json(search).await;
    assert_eq!(page["template"], "choose-unit");

    let chosen = send(&app, &mut jar, test::TestRequest::get().uri("/choose-unit/1")).await;
    assert_eq!(chosen.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&chosen), Some("/make-reservation"));

    let form = send(&app, &mut jar, test::TestRequest::get().uri("/make-reservation")).await;
    let page: Value = test::read_body_json(form).await;
    assert_eq!(page["template"], "make-reservation");
    assert_eq!(page["data"]["reservation"]["unitName"], "Eremite's Hideaway");

    let submitted = send(
        &app,
        &mut jar,
        test::TestRequest::post().uri("/make-reservation").set_form(vec![
            ("full_name", "Peter Griffin"),
            ("email", "peter@griffin.family"),
            ("phone", "+1 401 555 0100"),
        ]),
    )
    .await;
    assert_eq!(submitted.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&submitted), Some("/reservation-summary"));

    let summary = send(&app, &mut jar, test::TestRequest::get().uri("/reservation-summary")).await;
    assert_eq!(summary.status(), StatusCode::OK);
    let page: Value = test::read_body_json(summary).await;
    assert_eq!(page["template"], "reservation-summary");
    assert_eq!(page["flash"]["success"], "Reservation submitted!");
    assert_eq!(page["data"]["reservation"]["fullName"], "Peter Griffin");

    let again = send(&app, &mut jar, test::TestRequest::get().uri("/reservation-summary")).await;
    assert_eq!(again.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&again), Some("/search-availability"));

    let reservations = repo.reservations();
    assert_eq!(reservations.len(), 1);
    let reservation = reservations.first().expect("one reservation");
    assert_eq!(reservation.unit_id, UnitId::new(1));
    assert!(repo.restrictions().iter().any(|restriction| {
        restriction.kind == RestrictionKind::Reservation
            && restriction.reservation_id == Some(reservation.id)
    }));
}

#[rstest]
#[actix_web::test]
async fn booked_dates_are_no_longer_available(repo: FixtureBookingRepository) {
    let app = booking_app(&repo).await;
    let mut jar = Jar::default();

    let booked = send(
        &app,
        &mut jar,
        test::TestRequest::get().uri("/book-unit?s=2036-05-10&e=2036-05-12&id=2"),
    )
    .await;
    assert_eq!(location(&booked), Some("/make-reservation"));
    let submitted = send(
        &app,
        &mut jar,
        test::TestRequest::post().uri("/make-reservation").set_form(vec![
            ("full_name", "Lois Griffin"),
            ("email", "lois@griffin.family"),
        ]),
    )
    .await;
    assert_eq!(location(&submitted), Some("/reservation-summary"));

    let check = test::TestRequest::post()
        .uri("/search-availability-json")
        .set_form(vec![
            ("start", "2036-05-11"),
            ("end", "2036-05-13"),
            ("unit_id", "2"),
        ])
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, check).await;
    assert_eq!(body["ok"], false);
    assert_eq!(body["message"], "");

    let mut other_guest = Jar::default();
    let search = send(
        &app,
        &mut other_guest,
        test::TestRequest::post()
            .uri("/search-availability")
            .set_form(vec![("start", "2036-05-11"), ("end", "2036-05-12")]),
    )
    .await;
    let page: Value = test::read_body_json(search).await;
    let ids: Vec<i64> = page["data"]["units"]
        .as_array()
        .expect("unit list")
        .iter()
        .filter_map(|unit| unit["id"].as_i64())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}
