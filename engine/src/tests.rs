//! Unit tests for the engine crate.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use folio_relay::RelayFut;
use tempfile::tempdir;

use super::*;

struct CountingRelay {
    calls: AtomicUsize,
    succeed: bool,
}

impl FormRelay for CountingRelay {
    fn submit<'a>(&'a self, _payload: &'a ContactPayload) -> RelayFut<'a> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let succeed = self.succeed;
        Box::pin(async move {
            if succeed {
                Ok(())
            } else {
                Err(RelayError::Status {
                    status: 503,
                    body: String::new(),
                })
            }
        })
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

fn init_with(relay: Arc<dyn FormRelay>, options: UiOptions) -> AppInit {
    AppInit {
        portfolio: Portfolio::bundled().expect("bundled portfolio"),
        options,
        relay,
        subject_template: "New portfolio message from {name}".to_string(),
        fallback_email: None,
        config_path: None,
        year: 2026,
    }
}

fn test_app() -> App {
    let relay = Arc::new(CountingRelay {
        calls: AtomicUsize::new(0),
        succeed: true,
    });
    let mut app = App::new(init_with(relay, UiOptions::default()));
    app.set_viewport(60, 30);
    app
}

fn reduced_motion_app() -> App {
    let options = UiOptions {
        reduced_motion: true,
        ..UiOptions::default()
    };
    let relay: Arc<dyn FormRelay> = Arc::new(UnconfiguredRelay);
    let mut app = App::new(init_with(relay, options));
    app.set_viewport(60, 30);
    app
}

#[test]
fn form_focus_cycles_through_send() {
    let mut focus = FormFocus::Field(FormField::Name);
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(focus);
        focus = focus.next();
    }
    assert_eq!(focus, FormFocus::Field(FormField::Name));
    assert_eq!(seen[3], FormFocus::Send);
    assert_eq!(FormFocus::Field(FormField::Name).prev(), FormFocus::Send);
}

#[test]
fn nav_jumps_animate_to_section_top() {
    let mut app = test_app();
    let about = app.page().section_top(SectionId::About).unwrap();

    app.go_to(SectionId::About);
    assert!(app.scroll().is_animating());
    app.tick(SMOOTH_SCROLL_DURATION);
    assert_eq!(app.scroll().offset(), about);
    assert_eq!(app.active_section(), SectionId::About);

    app.go_home();
    app.tick(SMOOTH_SCROLL_DURATION);
    assert_eq!(app.scroll().offset(), 0);
    assert_eq!(app.active_section(), SectionId::Hero);
}

#[test]
fn reduced_motion_jumps_and_snaps_reveals() {
    let mut app = reduced_motion_app();
    assert!(app.reveals().pose(keys::HERO_LABEL, 0).is_visible());

    let services = app.page().section_top(SectionId::Services).unwrap();
    app.go_to(SectionId::Services);
    assert!(!app.scroll().is_animating());
    assert_eq!(app.scroll().offset(), services);

    app.tick(Duration::ZERO);
    assert_eq!(
        app.reveals().phase(keys::SERVICES_TITLE),
        Some(RevealPhase::Shown)
    );
    assert!(!app.is_animating());
}

#[test]
fn scrolling_into_a_section_plays_its_reveal() {
    let mut app = test_app();
    assert_eq!(
        app.reveals().phase(keys::WORKS_TITLE),
        Some(RevealPhase::Hidden)
    );

    app.go_to(SectionId::Works);
    app.tick(SMOOTH_SCROLL_DURATION);
    app.tick(Duration::from_secs(2));
    assert_eq!(
        app.reveals().phase(keys::WORKS_TITLE),
        Some(RevealPhase::Shown)
    );

    app.go_home();
    app.tick(SMOOTH_SCROLL_DURATION);
    app.tick(Duration::from_secs(2));
    assert_eq!(
        app.reveals().phase(keys::WORKS_TITLE),
        Some(RevealPhase::Hidden)
    );
}

#[test]
fn hero_timeline_plays_on_startup() {
    let mut app = test_app();
    assert!(app.reveals().pose(keys::HERO_LABEL, 0).opacity < 0.01);
    app.tick(Duration::from_secs(3));
    assert!(app.reveals().pose(keys::HERO_LABEL, 0).is_visible());
    assert!(app.reveals().pose(keys::HERO_SOCIALS, 2).is_visible());
}

#[test]
fn typewriter_advances_with_ticks() {
    let mut app = test_app();
    assert_eq!(app.typewriter().text(), "");
    app.tick(Duration::from_millis(300));
    assert_eq!(app.typewriter().text(), "Sof");
}

#[test]
fn resize_relays_page_and_keeps_offset_in_range() {
    let mut app = test_app();
    app.scroll_lines(10_000);
    let narrow_height = app.page().height();
    assert_eq!(app.scroll().offset(), app.scroll().max_offset());

    app.set_viewport(88, 30);
    assert!(app.page().height() < narrow_height);
    assert!(app.scroll().offset() <= app.scroll().max_offset());
}

#[test]
fn focusing_form_scrolls_it_into_view() {
    let mut app = reduced_motion_app();
    app.focus_form();
    assert_eq!(app.focus(), Focus::Form(FormFocus::Field(FormField::Name)));
    let form = app.page().contact_form().unwrap();
    let offset = app.scroll().offset();
    assert!(offset <= form.top);
    assert!(form.bottom() <= offset + app.scroll().viewport());
}

#[test]
fn typing_targets_focused_field() {
    let mut app = test_app();
    app.type_char('x');
    assert!(app.form().input().is_empty(), "browse mode ignores typing");

    app.focus_form();
    app.type_text("Ada");
    app.enter();
    assert_eq!(app.focus(), Focus::Form(FormFocus::Field(FormField::Email)));
    app.type_text("ada@example.com");
    app.focus_next();
    app.type_text("Hello");
    app.enter();
    app.type_text("there, Folio");
    app.backspace();

    let input = app.form().input();
    assert_eq!(input.name, "Ada");
    assert_eq!(input.email, "ada@example.com");
    assert_eq!(input.message, "Hello\nthere, Foli");

    app.focus_next();
    app.type_char('z');
    assert_eq!(app.form().input().message, "Hello\nthere, Foli");
}

#[tokio::test(start_paused = true)]
async fn invalid_submit_focuses_first_error() {
    let mut app = test_app();
    app.focus_form();
    app.type_text("Ada");
    app.focus_prev();
    assert_eq!(app.focus(), Focus::Form(FormFocus::Send));

    assert_eq!(app.enter(), Some(SubmitOutcome::Invalid));
    assert_eq!(app.focus(), Focus::Form(FormFocus::Field(FormField::Email)));
}

#[tokio::test(start_paused = true)]
async fn send_is_disabled_while_loading() {
    let relay = Arc::new(CountingRelay {
        calls: AtomicUsize::new(0),
        succeed: false,
    });
    let dyn_relay: Arc<dyn FormRelay> = relay.clone();
    let mut app = App::new(init_with(dyn_relay, UiOptions::default()));
    app.focus_form();
    app.type_text("Ada");
    app.focus_next();
    app.type_text("ada@example.com");
    app.focus_next();
    app.type_text("A message that is long enough");

    assert_eq!(app.submit(), SubmitOutcome::Sent);
    assert!(!app.can_submit());
    assert_eq!(app.submit(), SubmitOutcome::AlreadySending);

    assert!(app.next_form_event().await);
    assert!(app.can_submit());
    assert_eq!(relay.calls.load(Ordering::SeqCst), 1);
    match app.form().status() {
        SubmissionStatus::Error(message) => {
            assert!(message.as_str().contains("mahabubranasaikat@gmail.com"));
        }
        other => panic!("expected error, got {other:?}"),
    }
    assert_eq!(app.form().input().name, "Ada");
}

#[test]
fn theme_toggle_persists_to_config() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "# keep me\n[app]\nascii_only = true\n").unwrap();

    let relay: Arc<dyn FormRelay> = Arc::new(UnconfiguredRelay);
    let mut init = init_with(relay, UiOptions::default());
    init.config_path = Some(path.clone());
    let mut app = App::new(init);

    app.toggle_theme();
    assert_eq!(app.ui_options().theme, ThemeMode::Light);
    assert_eq!(app.notice(), None);

    let written = std::fs::read_to_string(&path).unwrap();
    assert!(written.contains("# keep me"));
    assert!(written.contains("ascii_only = true"));
    assert!(written.contains("theme = \"light\""));
}

#[test]
fn theme_toggle_survives_persist_failure() {
    let dir = tempdir().unwrap();
    // A directory where the file should be makes the write fail.
    let path = dir.path().join("config.toml");
    std::fs::create_dir(&path).unwrap();

    let relay: Arc<dyn FormRelay> = Arc::new(UnconfiguredRelay);
    let mut init = init_with(relay, UiOptions::default());
    init.config_path = Some(path);
    let mut app = App::new(init);

    app.toggle_theme();
    assert_eq!(app.ui_options().theme, ThemeMode::Light);
    assert_eq!(app.notice(), Some("Theme not saved"));
}

#[test]
fn quit_flag() {
    let mut app = test_app();
    assert!(!app.should_quit());
    app.request_quit();
    assert!(app.should_quit());
}
