//! Contact form session: draft, validation errors, and the submission lifecycle.
//!
//! ```text
//! Idle --submit (invalid)--> Idle           errors stored, no request
//! Idle --submit (valid)----> Loading        exactly one relay request
//! Loading --delivered------> Success        draft cleared, reset scheduled
//! Loading --failed---------> Error          draft kept
//! Success --5s-------------> Idle
//! ```
//!
//! The relay request and the reset timer run as spawned tasks that report back
//! over a channel. [`ContactForm::process_events`] drains that channel on the
//! UI thread, so every state write happens there. Both tasks are abortable and
//! a generation counter discards results that arrive after they were voided.

use std::sync::Arc;
use std::time::Duration;

use futures_util::future::{AbortHandle, Abortable};
use tokio::sync::mpsc;

use folio_relay::{FormRelay, RelayError};
use folio_types::{
    ContactPayload, FormField, FormInput, NonEmptyStaticStr, NonEmptyString, SubmissionStatus,
    ValidationErrors,
};

use crate::validation::validate;

pub const SUCCESS_MESSAGE: &str = "Thank you for your message! I will get back to you soon.";
const SUCCESS: NonEmptyStaticStr = NonEmptyStaticStr::new(SUCCESS_MESSAGE);
const FALLBACK_ERROR: NonEmptyStaticStr =
    NonEmptyStaticStr::new("Sorry, your message could not be sent.");

/// How long the success banner stays before the form returns to idle.
pub const RESET_DELAY: Duration = Duration::from_secs(5);

/// Result of a submit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation passed and a request was dispatched.
    Sent,
    /// Validation failed; errors are available via [`ContactForm::errors`].
    Invalid,
    /// A request is already in flight. Nothing happened.
    AlreadySending,
    /// The form was torn down.
    Closed,
}

#[derive(Debug)]
enum FormEvent {
    Delivered {
        generation: u64,
        result: Result<(), RelayError>,
    },
    ResetDue {
        generation: u64,
    },
}

pub struct ContactForm {
    relay: Arc<dyn FormRelay>,
    subject_template: String,
    error_message: NonEmptyString,
    input: FormInput,
    errors: ValidationErrors,
    status: SubmissionStatus,
    generation: u64,
    in_flight: Option<AbortHandle>,
    reset_timer: Option<AbortHandle>,
    torn_down: bool,
    tx: mpsc::UnboundedSender<FormEvent>,
    rx: mpsc::UnboundedReceiver<FormEvent>,
}

impl std::fmt::Debug for ContactForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactForm")
            .field("relay", &self.relay.name())
            .field("status", &self.status)
            .field("errors", &self.errors)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

/// Apology shown when a submission fails.
#[must_use]
pub fn error_message_for(fallback_email: &str) -> String {
    let email = fallback_email.trim();
    if email.is_empty() {
        "Sorry, your message could not be sent. Please try again later.".to_string()
    } else {
        format!("Sorry, your message could not be sent. Please email me directly at {email}.")
    }
}

impl ContactForm {
    pub fn new(
        relay: Arc<dyn FormRelay>,
        subject_template: impl Into<String>,
        fallback_email: &str,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let error_message = NonEmptyString::new(error_message_for(fallback_email))
            .unwrap_or_else(|_| NonEmptyString::from(FALLBACK_ERROR));
        Self {
            relay,
            subject_template: subject_template.into(),
            error_message,
            input: FormInput::default(),
            errors: ValidationErrors::new(),
            status: SubmissionStatus::Idle,
            generation: 0,
            in_flight: None,
            reset_timer: None,
            torn_down: false,
            tx,
            rx,
        }
    }

    #[must_use]
    pub fn input(&self) -> &FormInput {
        &self.input
    }

    #[must_use]
    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    #[must_use]
    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.status.is_loading()
    }

    #[must_use]
    pub fn relay_name(&self) -> &'static str {
        self.relay.name()
    }

    // ------------------------------------------------------------------------
    // Editing. Every edit clears that field's validation entry.
    // ------------------------------------------------------------------------

    pub fn set_field(&mut self, field: FormField, value: impl Into<String>) {
        *self.input.get_mut(field) = value.into();
        self.errors.clear_field(field);
    }

    pub fn insert_char(&mut self, field: FormField, c: char) {
        if c == '\n' && !field.is_multiline() {
            return;
        }
        self.input.get_mut(field).push(c);
        self.errors.clear_field(field);
    }

    pub fn insert_str(&mut self, field: FormField, text: &str) {
        let value = self.input.get_mut(field);
        if field.is_multiline() {
            value.push_str(text);
        } else {
            value.extend(text.chars().filter(|c| *c != '\n' && *c != '\r'));
        }
        self.errors.clear_field(field);
    }

    pub fn backspace(&mut self, field: FormField) {
        self.input.get_mut(field).pop();
        self.errors.clear_field(field);
    }

    // ------------------------------------------------------------------------
    // Submission
    // ------------------------------------------------------------------------

    /// Validate and, when valid, dispatch the relay request.
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self) -> SubmitOutcome {
        if self.torn_down {
            return SubmitOutcome::Closed;
        }
        if self.status.is_loading() {
            tracing::debug!("Submit ignored: request already in flight");
            return SubmitOutcome::AlreadySending;
        }

        self.cancel_reset();

        let errors = validate(&self.input);
        if !errors.is_empty() {
            tracing::info!(fields = errors.len(), "Submit rejected by validation");
            self.errors = errors;
            self.status = SubmissionStatus::Idle;
            return SubmitOutcome::Invalid;
        }

        self.errors.clear();
        self.generation = self.generation.wrapping_add(1);
        let generation = self.generation;
        let payload = ContactPayload::from_input(&self.input, &self.subject_template);
        let relay = Arc::clone(&self.relay);
        let tx = self.tx.clone();
        let (abort_handle, abort_registration) = AbortHandle::new_pair();

        tokio::spawn(async move {
            let request = async move { relay.submit(&payload).await };
            if let Ok(result) = Abortable::new(request, abort_registration).await {
                let _ = tx.send(FormEvent::Delivered { generation, result });
            }
        });

        tracing::info!(relay = self.relay.name(), "Relay request dispatched");
        self.in_flight = Some(abort_handle);
        self.status = SubmissionStatus::Loading;
        SubmitOutcome::Sent
    }

    /// Apply any results delivered by background tasks. Never blocks.
    ///
    /// Returns `true` when the form state changed.
    pub fn process_events(&mut self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.rx.try_recv() {
            changed |= self.apply_event(event);
        }
        changed
    }

    /// Wait for the next background event and apply it.
    pub async fn next_event(&mut self) -> bool {
        match self.rx.recv().await {
            Some(event) => self.apply_event(event),
            None => false,
        }
    }

    /// Void the in-flight request and the reset timer. Nothing writes to the
    /// form afterwards.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        if let Some(handle) = self.in_flight.take() {
            tracing::debug!("Aborting in-flight relay request");
            handle.abort();
        }
        self.cancel_reset();
        self.generation = self.generation.wrapping_add(1);
        while self.rx.try_recv().is_ok() {}
    }

    fn apply_event(&mut self, event: FormEvent) -> bool {
        if self.torn_down {
            return false;
        }
        match event {
            FormEvent::Delivered { generation, result } => {
                if generation != self.generation || !self.status.is_loading() {
                    tracing::debug!(generation, "Discarding stale relay result");
                    return false;
                }
                self.in_flight = None;
                match result {
                    Ok(()) => {
                        tracing::info!("Contact message delivered");
                        self.input.clear();
                        self.errors.clear();
                        self.status = SubmissionStatus::Success(NonEmptyString::from(SUCCESS));
                        self.schedule_reset();
                    }
                    Err(err) => {
                        tracing::warn!(status = ?err.status(), "Contact submission failed: {err}");
                        self.status = SubmissionStatus::Error(self.error_message.clone());
                    }
                }
                true
            }
            FormEvent::ResetDue { generation } => {
                if generation != self.generation
                    || !matches!(self.status, SubmissionStatus::Success(_))
                {
                    return false;
                }
                self.reset_timer = None;
                self.status = SubmissionStatus::Idle;
                true
            }
        }
    }

    fn schedule_reset(&mut self) {
        self.cancel_reset();
        let generation = self.generation;
        let tx = self.tx.clone();
        let (abort_handle, abort_registration) = AbortHandle::new_pair();
        tokio::spawn(async move {
            let sleep = tokio::time::sleep(RESET_DELAY);
            if Abortable::new(sleep, abort_registration).await.is_ok() {
                let _ = tx.send(FormEvent::ResetDue { generation });
            }
        });
        self.reset_timer = Some(abort_handle);
    }

    fn cancel_reset(&mut self) {
        if let Some(handle) = self.reset_timer.take() {
            handle.abort();
        }
    }
}

impl Drop for ContactForm {
    fn drop(&mut self) {
        self.teardown();
    }
}
