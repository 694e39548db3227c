//! Form validation: field presence, length and email checks that accumulate
//! messages per field.
//!
//! Every rule runs independently. A field may collect several messages in a
//! single pass, and the form is valid only when no rule recorded anything.
//!
//! # Examples
//! ```
//! use std::collections::HashMap;
//!
//! use bungalow::domain::FormValidator;
//!
//! let fields = HashMap::from([
//!     ("full_name".to_owned(), "P".to_owned()),
//!     ("email".to_owned(), "peter@griffin.family".to_owned()),
//! ]);
//! let mut form = FormValidator::new(&fields);
//! form.required(&["full_name", "email"]);
//! form.min_length("full_name", 3);
//! form.is_email("email");
//!
//! assert!(!form.valid());
//! assert_eq!(form.errors().messages("full_name").len(), 1);
//! assert!(form.errors().messages("email").is_empty());
//! ```

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

const REQUIRED_MESSAGE: &str = "This field cannot be empty.";
const INVALID_EMAIL_MESSAGE: &str = "Invalid email address.";

/// Field name to ordered list of messages. Valid iff empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    /// Append a message to a field.
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// First message recorded for a field, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0
            .get(field)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// All messages recorded for a field, in insertion order.
    pub fn messages(&self, field: &str) -> &[String] {
        self.0.get(field).map_or(&[], Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fields with at least one message.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }
}

/// Read access to submitted form values.
pub trait FieldSource {
    /// Raw value of a field, if submitted.
    fn field(&self, name: &str) -> Option<&str>;
}

impl<S: std::hash::BuildHasher> FieldSource for HashMap<String, String, S> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Runs rules against a [`FieldSource`] and collects [`ValidationErrors`].
pub struct FormValidator<'a, F: FieldSource + ?Sized> {
    fields: &'a F,
    errors: ValidationErrors,
}

impl<'a, F: FieldSource + ?Sized> FormValidator<'a, F> {
    pub fn new(fields: &'a F) -> Self {
        Self {
            fields,
            errors: ValidationErrors::default(),
        }
    }

    fn trimmed(&self, field: &str) -> &'a str {
        self.fields.field(field).unwrap_or_default().trim()
    }

    /// True when the field was submitted with a non-empty value.
    pub fn has(&self, field: &str) -> bool {
        self.fields.field(field).is_some_and(|value| !value.is_empty())
    }

    /// Every listed field must be non-blank.
    pub fn required(&mut self, fields: &[&str]) {
        for field in fields {
            if self.trimmed(field).is_empty() {
                self.errors.add(*field, REQUIRED_MESSAGE);
            }
        }
    }

    /// The trimmed value must have at least `length` characters.
    pub fn min_length(&mut self, field: &str, length: usize) {
        if self.trimmed(field).chars().count() < length {
            self.errors.add(
                field,
                format!("This field must be at least {length} characters long."),
            );
        }
    }

    /// The value must be a syntactically valid email address.
    pub fn is_email(&mut self, field: &str) {
        if !self.trimmed(field).validate_email() {
            self.errors.add(field, INVALID_EMAIL_MESSAGE);
        }
    }

    pub fn valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn into_errors(self) -> ValidationErrors {
        self.errors
    }
}
