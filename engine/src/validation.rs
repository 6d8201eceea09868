//! Contact form validation.

use std::sync::LazyLock;

use regex::Regex;

use folio_types::{FormField, FormInput, ValidationErrors};

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_REQUIRED: &str = "Email is required";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const MESSAGE_REQUIRED: &str = "Message is required";
pub const MESSAGE_TOO_SHORT: &str = "Message must be at least 10 characters";

pub const MIN_MESSAGE_CHARS: usize = 10;

// Applied to the raw value, so surrounding whitespace makes an address invalid.
static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("static regex"));

/// Validate a draft. An empty result means the input may be submitted.
#[must_use]
pub fn validate(input: &FormInput) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if input.name.trim().is_empty() {
        errors.insert(FormField::Name, NAME_REQUIRED);
    }

    if input.email.trim().is_empty() {
        errors.insert(FormField::Email, EMAIL_REQUIRED);
    } else if !EMAIL_PATTERN.is_match(&input.email) {
        errors.insert(FormField::Email, EMAIL_INVALID);
    }

    let message = input.message.trim();
    if message.is_empty() {
        errors.insert(FormField::Message, MESSAGE_REQUIRED);
    } else if message.chars().count() < MIN_MESSAGE_CHARS {
        errors.insert(FormField::Message, MESSAGE_TOO_SHORT);
    }

    errors
}
