//! What a booking workflow step hands back to the inbound adapter: either a
//! page to render or a redirect.

use serde::Serialize;

use super::{Flashes, ReservationDraft, StayPeriod, Unit, ValidationErrors};

/// Page identifiers understood by the external renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Template {
    Home,
    About,
    Contact,
    Bungalow,
    SearchAvailability,
    ChooseUnit,
    MakeReservation,
    ReservationSummary,
}

/// Redirect targets inside the booking flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    SearchAvailability,
    MakeReservation,
    ReservationSummary,
}

impl Route {
    pub const fn path(self) -> &'static str {
        match self {
            Self::SearchAvailability => "/search-availability",
            Self::MakeReservation => "/make-reservation",
            Self::ReservationSummary => "/reservation-summary",
        }
    }
}

/// Named values passed to a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PageData {
    Empty,
    Unit { unit: Unit },
    Units { stay: StayPeriod, units: Vec<Unit> },
    Reservation { reservation: ReservationDraft },
}

/// A page ready for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    pub template: Template,
    pub flash: Flashes,
    pub form_errors: ValidationErrors,
    pub data: PageData,
    pub is_authenticated: bool,
}

impl Page {
    pub fn new(template: Template, data: PageData) -> Self {
        Self {
            template,
            flash: Flashes::default(),
            form_errors: ValidationErrors::default(),
            data,
            is_authenticated: false,
        }
    }

    #[must_use]
    pub fn with_form_errors(mut self, form_errors: ValidationErrors) -> Self {
        self.form_errors = form_errors;
        self
    }

    /// Draft shown by the details and summary pages.
    pub fn reservation(&self) -> Option<&ReservationDraft> {
        match &self.data {
            PageData::Reservation { reservation } => Some(reservation),
            PageData::Empty | PageData::Unit { .. } | PageData::Units { .. } => None,
        }
    }
}

/// Result of a workflow step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StepOutcome {
    Render(Page),
    Redirect(Route),
}
