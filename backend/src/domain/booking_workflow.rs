//! Booking workflow: search, choose a bungalow, enter guest details, commit,
//! show the summary.
//!
//! Each step is a method on [`BookingWorkflow`], built per request from the
//! booking store, the visitor's session scope and the details rules. Steps
//! return a [`StepOutcome`]; recoverable problems become a redirect with a
//! flash message, and only session write failures surface as [`Error`].
//!
//! The draft moves through these states:
//!
//! ```text
//! SearchEntered -> UnitsListed -> UnitChosen -> DetailsEntered -> Committed
//!        \______________\_____________\_____________\____________> Aborted
//! ```
//!
//! A step that needs a draft and finds none (or finds one missing the fields
//! it depends on) aborts: it records an error flash and redirects to the
//! search page.

use tracing::{error, info, warn};

use super::availability::AvailabilityService;
use super::booking_outcome::{Page, PageData, Route, StepOutcome, Template};
use super::draft_session::{DraftSession, FlashKind, Lookup};
use super::ports::{BookingRepository, SessionScope, SessionScopeError};
use super::{
    Error, FormValidator, GuestDetails, NewRestriction, ReservationDraft, StayPeriod, Unit,
    UnitId, ValidationErrors,
};

pub const MISSING_DRAFT_MESSAGE: &str = "No reservation data in this session available.";
pub const INVALID_DATES_MESSAGE: &str = "Please enter a valid arrival and departure date.";
pub const INVALID_UNIT_MESSAGE: &str = "Please choose a valid bungalow.";
pub const NO_AVAILABILITY_MESSAGE: &str = "No availability";
pub const SEARCH_FAILED_MESSAGE: &str = "Can't search availability right now.";
pub const UNIT_LOOKUP_FAILED_MESSAGE: &str = "Can't get bungalow from database.";
pub const RESERVATION_FAILED_MESSAGE: &str = "Can't insert reservation into database.";
pub const RESTRICTION_FAILED_MESSAGE: &str = "Can't insert restriction into database.";
pub const SUBMITTED_MESSAGE: &str = "Reservation submitted!";

/// Rules applied to submitted guest details.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailsRules {
    /// Minimum length of the trimmed full name, in characters.
    pub min_full_name_len: usize,
}

impl Default for DetailsRules {
    fn default() -> Self {
        Self {
            min_full_name_len: 2,
        }
    }
}

impl DetailsRules {
    /// Validate guest details, collecting every failure.
    pub fn validate(&self, details: &GuestDetails) -> ValidationErrors {
        let mut form = FormValidator::new(details);
        form.required(&[GuestDetails::FULL_NAME, GuestDetails::EMAIL]);
        form.min_length(GuestDetails::FULL_NAME, self.min_full_name_len);
        form.is_email(GuestDetails::EMAIL);
        form.into_errors()
    }
}

fn session_failure(err: &SessionScopeError) -> Error {
    error!(error = %err, "booking session write failed");
    Error::internal("could not update the booking session")
}

/// One visitor's pass through the booking flow.
pub struct BookingWorkflow<'a, S: SessionScope + ?Sized> {
    repository: &'a dyn BookingRepository,
    session: DraftSession<'a, S>,
    rules: DetailsRules,
}

impl<'a, S: SessionScope + ?Sized> BookingWorkflow<'a, S> {
    pub fn new(repository: &'a dyn BookingRepository, scope: &'a S, rules: DetailsRules) -> Self {
        Self {
            repository,
            session: DraftSession::new(scope),
            rules,
        }
    }

    /// Landing page.
    pub fn home(&self) -> Page {
        self.page(Template::Home, PageData::Empty)
    }

    pub fn about(&self) -> Page {
        self.page(Template::About, PageData::Empty)
    }

    pub fn contact(&self) -> Page {
        self.page(Template::Contact, PageData::Empty)
    }

    /// A bungalow's own page, the starting point for quick booking.
    pub async fn bungalow_page(&self, raw_unit_id: &str) -> Result<StepOutcome, Error> {
        let Ok(unit_id) = raw_unit_id.parse::<UnitId>() else {
            warn!(raw_unit_id, "rejected bungalow page request");
            return self.redirect_with(INVALID_UNIT_MESSAGE, Route::SearchAvailability);
        };
        let Some(unit) = self.find_unit(unit_id).await else {
            return self.redirect_with(UNIT_LOOKUP_FAILED_MESSAGE, Route::SearchAvailability);
        };
        Ok(StepOutcome::Render(
            self.page(Template::Bungalow, PageData::Unit { unit }),
        ))
    }

    /// Empty search form.
    pub fn search_page(&self) -> Page {
        self.page(Template::SearchAvailability, PageData::Empty)
    }

    /// List bungalows free for the submitted dates and start a fresh draft.
    pub async fn search(&self, start: &str, end: &str) -> Result<StepOutcome, Error> {
        let stay = match StayPeriod::parse(start, end) {
            Ok(stay) => stay,
            Err(err) => {
                warn!(error = %err, "rejected availability search");
                return self.redirect_with(INVALID_DATES_MESSAGE, Route::SearchAvailability);
            }
        };

        let units = match AvailabilityService::new(self.repository)
            .available_units(&stay)
            .await
        {
            Ok(units) => units,
            Err(_) => return self.redirect_with(SEARCH_FAILED_MESSAGE, Route::SearchAvailability),
        };
        if units.is_empty() {
            return self.redirect_with(NO_AVAILABILITY_MESSAGE, Route::SearchAvailability);
        }

        self.session
            .store_draft(&ReservationDraft::for_stay(stay))
            .map_err(|err| session_failure(&err))?;
        Ok(StepOutcome::Render(
            self.page(Template::ChooseUnit, PageData::Units { stay, units }),
        ))
    }

    /// Select a bungalow from the search results.
    pub fn choose_unit(&self, raw_unit_id: &str) -> Result<StepOutcome, Error> {
        let Ok(unit_id) = raw_unit_id.parse::<UnitId>() else {
            warn!(raw_unit_id, "rejected bungalow selection");
            return self.redirect_with(INVALID_UNIT_MESSAGE, Route::SearchAvailability);
        };
        let Lookup::Found(mut draft) = self.session.draft() else {
            return self.abort("choose unit");
        };
        if draft.require_stay().is_err() {
            return self.abort("choose unit");
        }

        draft.choose_unit(unit_id);
        self.session
            .store_draft(&draft)
            .map_err(|err| session_failure(&err))?;
        Ok(StepOutcome::Redirect(Route::MakeReservation))
    }

    /// Start a draft for one bungalow straight from its own page.
    pub async fn book_unit(
        &self,
        start: &str,
        end: &str,
        raw_unit_id: &str,
    ) -> Result<StepOutcome, Error> {
        let Ok(stay) = StayPeriod::parse(start, end) else {
            warn!(start, end, "rejected quick booking dates");
            return self.redirect_with(INVALID_DATES_MESSAGE, Route::SearchAvailability);
        };
        let Ok(unit_id) = raw_unit_id.parse::<UnitId>() else {
            warn!(raw_unit_id, "rejected quick booking bungalow");
            return self.redirect_with(INVALID_UNIT_MESSAGE, Route::SearchAvailability);
        };
        let Some(unit) = self.find_unit(unit_id).await else {
            return self.redirect_with(UNIT_LOOKUP_FAILED_MESSAGE, Route::SearchAvailability);
        };

        let mut draft = ReservationDraft::for_stay(stay);
        draft.choose_unit(unit_id);
        draft.unit_name = Some(unit.name().to_owned());
        self.session
            .store_draft(&draft)
            .map_err(|err| session_failure(&err))?;
        Ok(StepOutcome::Redirect(Route::MakeReservation))
    }

    /// Guest details form, pre-filled from the draft.
    pub async fn show_details(&self) -> Result<StepOutcome, Error> {
        let Some(mut draft) = self.draft_with_selection("show details") else {
            return self.abort("show details");
        };
        let Some(unit) = self.find_unit_for(&draft).await else {
            return self.redirect_with(UNIT_LOOKUP_FAILED_MESSAGE, Route::SearchAvailability);
        };

        draft.unit_name = Some(unit.name().to_owned());
        self.session
            .store_draft(&draft)
            .map_err(|err| session_failure(&err))?;
        Ok(StepOutcome::Render(self.page(
            Template::MakeReservation,
            PageData::Reservation { reservation: draft },
        )))
    }

    /// Validate submitted details and commit the reservation.
    ///
    /// The commit inserts the reservation, then the restriction that blocks
    /// the bungalow. The two inserts are not atomic: when the second fails
    /// the reservation row stays behind and the visitor sees an ordinary
    /// storage error. On any storage failure the session draft is left as it
    /// was before the submission.
    pub async fn submit_details(&self, details: GuestDetails) -> Result<StepOutcome, Error> {
        let Some(mut draft) = self.draft_with_selection("submit details") else {
            return self.abort("submit details");
        };
        if let Ok(reservation_id) = draft.require_committed() {
            info!(%reservation_id, "ignoring resubmission of a committed draft");
            return Ok(StepOutcome::Redirect(Route::ReservationSummary));
        }

        let errors = self.rules.validate(&details);
        draft.apply_details(details);
        if !errors.is_empty() {
            self.session
                .store_draft(&draft)
                .map_err(|err| session_failure(&err))?;
            let page = self
                .page(
                    Template::MakeReservation,
                    PageData::Reservation { reservation: draft },
                )
                .with_form_errors(errors);
            return Ok(StepOutcome::Render(page));
        }

        let Ok(reservation) = draft.to_new_reservation() else {
            return self.abort("submit details");
        };
        let reservation_id = match self.repository.insert_reservation(&reservation).await {
            Ok(id) => id,
            Err(err) => {
                error!(error = %err, unit_id = reservation.unit_id.get(), "reservation insert failed");
                return self.redirect_with(RESERVATION_FAILED_MESSAGE, Route::SearchAvailability);
            }
        };
        let restriction = NewRestriction::for_reservation(reservation_id, &reservation);
        if let Err(err) = self.repository.insert_restriction(&restriction).await {
            error!(
                error = %err,
                %reservation_id,
                unit_id = reservation.unit_id.get(),
                "restriction insert failed; reservation row kept"
            );
            return self.redirect_with(RESTRICTION_FAILED_MESSAGE, Route::SearchAvailability);
        }

        draft.mark_committed(reservation_id);
        self.session
            .store_draft(&draft)
            .map_err(|err| session_failure(&err))?;
        self.session
            .flash(FlashKind::Success, SUBMITTED_MESSAGE)
            .map_err(|err| session_failure(&err))?;
        info!(
            %reservation_id,
            unit_id = reservation.unit_id.get(),
            stay = %reservation.stay,
            "reservation committed"
        );
        Ok(StepOutcome::Redirect(Route::ReservationSummary))
    }

    /// Show the committed reservation once, consuming it.
    pub async fn summary(&self) -> Result<StepOutcome, Error> {
        let Lookup::Found(mut draft) = self.session.draft() else {
            return self.abort("summary");
        };
        if draft.require_committed().is_err() {
            return self.abort("summary");
        }

        self.session.clear_draft();
        let Some(unit) = self.find_unit_for(&draft).await else {
            return self.redirect_with(UNIT_LOOKUP_FAILED_MESSAGE, Route::SearchAvailability);
        };
        draft.unit_name = Some(unit.name().to_owned());
        Ok(StepOutcome::Render(self.page(
            Template::ReservationSummary,
            PageData::Reservation { reservation: draft },
        )))
    }

    fn page(&self, template: Template, data: PageData) -> Page {
        let mut page = Page::new(template, data);
        page.flash = self.session.take_flashes();
        page.is_authenticated = self.session.is_authenticated();
        page
    }

    fn redirect_with(&self, message: &str, route: Route) -> Result<StepOutcome, Error> {
        self.session
            .flash(FlashKind::Error, message)
            .map_err(|err| session_failure(&err))?;
        Ok(StepOutcome::Redirect(route))
    }

    fn abort(&self, step: &'static str) -> Result<StepOutcome, Error> {
        warn!(step, "booking step aborted: no usable draft in session");
        self.redirect_with(MISSING_DRAFT_MESSAGE, Route::SearchAvailability)
    }

    /// Draft carrying both dates and a bungalow.
    fn draft_with_selection(&self, step: &'static str) -> Option<ReservationDraft> {
        let draft = self.session.draft().found()?;
        if let Err(err) = draft.require_stay().and(draft.require_unit()) {
            warn!(step, error = %err, "draft is missing a required field");
            return None;
        }
        Some(draft)
    }

    async fn find_unit_for(&self, draft: &ReservationDraft) -> Option<Unit> {
        self.find_unit(draft.require_unit().ok()?).await
    }

    async fn find_unit(&self, unit_id: UnitId) -> Option<Unit> {
        match self.repository.find_unit_by_id(unit_id).await {
            Ok(unit) => Some(unit),
            Err(err) => {
                error!(error = %err, unit_id = unit_id.get(), "bungalow lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
#[path = "booking_workflow_tests.rs"]
mod tests;
