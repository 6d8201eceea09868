//! Contact form domain types.
//!
//! The form session owns a [`FormInput`] draft, the [`ValidationErrors`] from the
//! last submit attempt, and a single [`SubmissionStatus`]. The relay wire format
//! is [`ContactPayload`].

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::NonEmptyString;

/// One editable field of the contact form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Message,
}

impl FormField {
    /// Fields in tab order.
    pub const ALL: [FormField; 3] = [FormField::Name, FormField::Email, FormField::Message];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Message => "message",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::Email => "Email",
            FormField::Message => "Message",
        }
    }

    #[must_use]
    pub const fn placeholder(self) -> &'static str {
        match self {
            FormField::Name => "Your name",
            FormField::Email => "your@email.com",
            FormField::Message => "Tell me about your project...",
        }
    }

    #[must_use]
    pub const fn is_multiline(self) -> bool {
        matches!(self, FormField::Message)
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's draft. Values are kept exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub message: String,
}

impl FormInput {
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::Name => &self.name,
            FormField::Email => &self.email,
            FormField::Message => &self.message,
        }
    }

    pub fn get_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Name => &mut self.name,
            FormField::Email => &mut self.email,
            FormField::Message => &mut self.message,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }
}

/// Per-field error messages from the last validation pass.
///
/// An empty map means the last validated input was valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<FormField, &'static str>);

impl ValidationErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }

    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Remove one field's entry, leaving the others untouched.
    pub fn clear_field(&mut self, field: FormField) -> Option<&'static str> {
        self.0.remove(&field)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn contains(&self, field: FormField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    /// First field in tab order that carries an error.
    #[must_use]
    pub fn first_field(&self) -> Option<FormField> {
        self.0.keys().next().copied()
    }
}

/// Submission lifecycle of a contact form.
///
/// `Loading` is held exactly while a relay request is in flight.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success(NonEmptyString),
    Error(NonEmptyString),
}

impl SubmissionStatus {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionStatus::Loading)
    }

    /// Banner text for terminal states.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Success(msg) | SubmissionStatus::Error(msg) => Some(msg.as_str()),
            SubmissionStatus::Idle | SubmissionStatus::Loading => None,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            SubmissionStatus::Idle => "idle",
            SubmissionStatus::Loading => "loading",
            SubmissionStatus::Success(_) => "success",
            SubmissionStatus::Error(_) => "error",
        }
    }
}

/// JSON body accepted by Formspree-style relays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactPayload {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(rename = "_subject")]
    pub subject: String,
    #[serde(rename = "_replyto")]
    pub reply_to: String,
}

impl ContactPayload {
    /// Build the relay body from a validated draft.
    ///
    /// `subject_template` may contain `{name}`, which is replaced with the
    /// sender's trimmed name.
    #[must_use]
    pub fn from_input(input: &FormInput, subject_template: &str) -> Self {
        let name = input.name.trim().to_string();
        let email = input.email.trim().to_string();
        Self {
            subject: subject_template.replace("{name}", &name),
            reply_to: email.clone(),
            message: input.message.trim().to_string(),
            name,
            email,
        }
    }
}
