//! Core engine for Folio - state machine and page model.
//!
//! This crate contains the App state without TUI dependencies. The TUI reads
//! the laid-out [`Page`], reveal poses, and form state, and drives the App
//! through the input methods below plus [`App::tick`] once per frame.

mod contact;
mod content;
mod nav;
mod page;
mod reveal;
mod typing;
mod validation;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

pub use contact::{ContactForm, RESET_DELAY, SUCCESS_MESSAGE, SubmitOutcome, error_message_for};
pub use content::{
    About, ContactInfo, ContentError, EducationEntry, Footer, Interest, Interests, Portfolio,
    Profile, Project, Service, SkillGroup, SocialLink, Works, current_year,
};
pub use nav::{SMOOTH_SCROLL_DURATION, ScrollView};
pub use page::{
    Block, BlockKind, CONTACT_FORM_HEIGHT, MAX_CONTENT_WIDTH, Page, SectionSpan, Segment,
    TextLine, TextRole,
};
pub use reveal::{
    Ease, Pose, RevealKey, RevealPhase, RevealTrigger, Reveals, TriggerAnchor, catalog, keys,
};
pub use typing::Typewriter;
pub use validation::validate;

pub use folio_config::{self, FolioConfig};
pub use folio_relay::{self, FormRelay, FormspreeRelay, RelayError, UnconfiguredRelay};
pub use folio_types::{
    self, ContactPayload, FormField, FormInput, NonEmptyString, SectionId, SubmissionStatus,
    ValidationErrors,
    ui::{ThemeMode, UiOptions},
};

/// Rows kept above the contact form when jumping to it.
const FORM_SCROLL_MARGIN: u16 = 2;

const DEFAULT_WIDTH: u16 = 80;
const DEFAULT_VIEWPORT: u16 = 24;

// ============================================================================
// Focus
// ============================================================================

/// Focusable controls inside the contact form, in tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    Field(FormField),
    Send,
}

impl FormFocus {
    const ORDER: [FormFocus; 4] = [
        FormFocus::Field(FormField::Name),
        FormFocus::Field(FormField::Email),
        FormFocus::Field(FormField::Message),
        FormFocus::Send,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    #[must_use]
    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    #[must_use]
    pub fn prev(self) -> Self {
        let len = Self::ORDER.len();
        Self::ORDER[(self.position() + len - 1) % len]
    }

    #[must_use]
    pub fn field(self) -> Option<FormField> {
        match self {
            FormFocus::Field(field) => Some(field),
            FormFocus::Send => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// Scrolling the page.
    #[default]
    Browse,
    /// Editing the contact form.
    Form(FormFocus),
}

// ============================================================================
// App
// ============================================================================

/// Everything the App needs from the outside world.
pub struct AppInit {
    pub portfolio: Portfolio,
    pub options: UiOptions,
    pub relay: Arc<dyn FormRelay>,
    pub subject_template: String,
    /// Address named in the submission apology. Defaults to the portfolio's
    /// contact email.
    pub fallback_email: Option<String>,
    /// Where the theme toggle is persisted. `None` keeps it in memory.
    pub config_path: Option<PathBuf>,
    pub year: i32,
}

impl AppInit {
    /// Wire an App from loaded configuration.
    #[must_use]
    pub fn from_config(
        config: Option<&FolioConfig>,
        portfolio: Portfolio,
        relay: Arc<dyn FormRelay>,
    ) -> Self {
        Self {
            options: config.map(FolioConfig::ui_options).unwrap_or_default(),
            subject_template: config.map_or_else(
                || folio_config::DEFAULT_SUBJECT_TEMPLATE.to_string(),
                FolioConfig::subject_template,
            ),
            fallback_email: config.and_then(FolioConfig::fallback_email),
            config_path: FolioConfig::path(),
            year: current_year(),
            portfolio,
            relay,
        }
    }
}

pub struct App {
    portfolio: Portfolio,
    year: i32,
    page: Page,
    scroll: ScrollView,
    reveals: Reveals,
    typewriter: Typewriter,
    form: ContactForm,
    focus: Focus,
    options: UiOptions,
    config_path: Option<PathBuf>,
    notice: Option<String>,
    should_quit: bool,
    last_frame: Instant,
    /// Total animation time fed through [`App::tick`].
    clock: Duration,
}

impl App {
    #[must_use]
    pub fn new(init: AppInit) -> Self {
        let AppInit {
            portfolio,
            options,
            relay,
            subject_template,
            fallback_email,
            config_path,
            year,
        } = init;

        let fallback_email = fallback_email
            .or_else(|| portfolio.contact_email().map(str::to_string))
            .unwrap_or_default();
        let form = ContactForm::new(relay, subject_template, &fallback_email);
        let page = Page::build(&portfolio, DEFAULT_WIDTH, year);
        let scroll = ScrollView::new(DEFAULT_VIEWPORT, page.height());
        let mut reveals = Reveals::new(catalog(), options.reduced_motion);
        reveals.bind(&page);
        reveals.update_scroll(scroll.offset(), scroll.viewport());
        let typewriter = Typewriter::new(&portfolio.profile.roles);

        tracing::info!(
            relay = form.relay_name(),
            rows = page.height(),
            "Portfolio ready"
        );

        Self {
            portfolio,
            year,
            page,
            scroll,
            reveals,
            typewriter,
            form,
            focus: Focus::Browse,
            options,
            config_path,
            notice: None,
            should_quit: false,
            last_frame: Instant::now(),
            clock: Duration::ZERO,
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    #[must_use]
    pub fn portfolio(&self) -> &Portfolio {
        &self.portfolio
    }

    #[must_use]
    pub fn page(&self) -> &Page {
        &self.page
    }

    #[must_use]
    pub fn scroll(&self) -> &ScrollView {
        &self.scroll
    }

    #[must_use]
    pub fn reveals(&self) -> &Reveals {
        &self.reveals
    }

    #[must_use]
    pub fn typewriter(&self) -> &Typewriter {
        &self.typewriter
    }

    #[must_use]
    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    #[must_use]
    pub fn ui_options(&self) -> UiOptions {
        self.options
    }

    #[must_use]
    pub fn active_section(&self) -> SectionId {
        self.scroll.active_section(&self.page)
    }

    #[must_use]
    pub fn scroll_progress(&self) -> f32 {
        self.scroll.progress()
    }

    /// One-line message for the status bar.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.form.is_sending()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scroll.is_animating() || self.reveals.is_animating()
    }

    /// Animation time since startup. Drives spinners and cursor blink.
    #[must_use]
    pub fn clock(&self) -> Duration {
        self.clock
    }

    #[must_use]
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn request_quit(&mut self) {
        self.should_quit = true;
    }

    // ------------------------------------------------------------------------
    // Frame loop
    // ------------------------------------------------------------------------

    /// Lay the page out for a new terminal size. `width` is the content
    /// column, `height` the rows available to the page.
    pub fn set_viewport(&mut self, width: u16, height: u16) {
        let width = width.clamp(16, MAX_CONTENT_WIDTH);
        if width != self.page.width() {
            self.page = Page::build(&self.portfolio, width, self.year);
            self.reveals.bind(&self.page);
            tracing::debug!(width, rows = self.page.height(), "Page relaid");
        }
        if height != self.scroll.viewport() || self.page.height() != self.scroll.content() {
            self.scroll.resize(height, self.page.height());
        }
        self.reveals
            .update_scroll(self.scroll.offset(), self.scroll.viewport());
    }

    pub fn frame_elapsed(&mut self) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;
        elapsed
    }

    /// Advance animations by `delta` and apply background results.
    pub fn tick(&mut self, delta: Duration) {
        self.clock = self.clock.saturating_add(delta);
        self.form.process_events();
        self.scroll.advance(delta);
        self.reveals
            .update_scroll(self.scroll.offset(), self.scroll.viewport());
        self.reveals.advance(delta);
        self.typewriter.advance(delta);
    }

    /// Void pending form work before the view goes away.
    pub fn shutdown(&mut self) {
        self.form.teardown();
    }

    // ------------------------------------------------------------------------
    // Browse mode
    // ------------------------------------------------------------------------

    pub fn scroll_lines(&mut self, delta: i32) {
        self.scroll.scroll_by(delta);
    }

    pub fn page_down(&mut self) {
        self.scroll.page_down();
    }

    pub fn page_up(&mut self) {
        self.scroll.page_up();
    }

    pub fn go_to(&mut self, section: SectionId) {
        let Some(top) = self.page.section_top(section) else {
            tracing::debug!(%section, "Section not on page");
            return;
        };
        self.scroll.scroll_to(top, !self.options.reduced_motion);
    }

    pub fn go_home(&mut self) {
        self.scroll.scroll_to(0, !self.options.reduced_motion);
    }

    pub fn focus_form(&mut self) {
        self.focus = Focus::Form(FormFocus::Field(FormField::Name));
        self.scroll_form_into_view();
    }

    fn scroll_form_into_view(&mut self) {
        let Some(form) = self.page.contact_form() else {
            return;
        };
        let top = form.top.saturating_sub(FORM_SCROLL_MARGIN);
        let offset = self.scroll.target();
        let visible = offset <= form.top && form.bottom() <= offset + self.scroll.viewport();
        if !visible {
            self.scroll.scroll_to(top, !self.options.reduced_motion);
        }
    }

    pub fn toggle_theme(&mut self) {
        let theme = self.options.theme.toggled();
        self.options.theme = theme;
        tracing::info!(theme = theme.as_str(), "Theme toggled");
        let Some(path) = self.config_path.as_deref() else {
            return;
        };
        match folio_config::persist_theme_at(path, theme) {
            Ok(()) => self.notice = None,
            Err(err) => {
                tracing::warn!("Failed to persist theme: {err}");
                self.notice = Some("Theme not saved".to_string());
            }
        }
    }

    // ------------------------------------------------------------------------
    // Form mode
    // ------------------------------------------------------------------------

    pub fn leave_form(&mut self) {
        self.focus = Focus::Browse;
    }

    pub fn focus_next(&mut self) {
        if let Focus::Form(current) = self.focus {
            self.focus = Focus::Form(current.next());
        }
    }

    pub fn focus_prev(&mut self) {
        if let Focus::Form(current) = self.focus {
            self.focus = Focus::Form(current.prev());
        }
    }

    fn focused_field(&self) -> Option<FormField> {
        match self.focus {
            Focus::Form(focus) => focus.field(),
            Focus::Browse => None,
        }
    }

    pub fn type_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            self.form.insert_char(field, c);
        }
    }

    pub fn type_text(&mut self, text: &str) {
        if let Some(field) = self.focused_field() {
            self.form.insert_str(field, text);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            self.form.backspace(field);
        }
    }

    /// Enter: newline in the message, submit on Send, next control otherwise.
    pub fn enter(&mut self) -> Option<SubmitOutcome> {
        match self.focus {
            Focus::Browse => None,
            Focus::Form(FormFocus::Send) => Some(self.submit()),
            Focus::Form(FormFocus::Field(field)) if field.is_multiline() => {
                self.form.insert_char(field, '\n');
                None
            }
            Focus::Form(_) => {
                self.focus_next();
                None
            }
        }
    }

    /// Submit the form. On validation failure focus moves to the first
    /// flagged field.
    pub fn submit(&mut self) -> SubmitOutcome {
        let outcome = self.form.submit();
        if outcome == SubmitOutcome::Invalid
            && let Some(field) = self.form.errors().first_field()
        {
            self.focus = Focus::Form(FormFocus::Field(field));
        }
        outcome
    }

    /// Wait for the next background form event. Used by tests and the
    /// headless runner.
    pub async fn next_form_event(&mut self) -> bool {
        self.form.next_event().await
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests;
