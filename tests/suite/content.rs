//! Portfolio content overrides

use std::sync::Arc;

use tempfile::tempdir;

use folio_engine::{
    App, AppInit, BlockKind, ContentError, Portfolio, SectionId, UiOptions, UnconfiguredRelay,
};

const CUSTOM: &str = r#"
[profile]
name = "Grace Hopper"
headline = "COMPILER PIONEER"
roles = ["Rear Admiral"]

[contact]
email = "grace@example.com"

[footer]
copyright = "(c) {year} Grace Hopper"
"#;

fn app_for(portfolio: Portfolio) -> App {
    let mut app = App::new(AppInit {
        portfolio,
        options: UiOptions {
            reduced_motion: true,
            ..UiOptions::default()
        },
        relay: Arc::new(UnconfiguredRelay),
        subject_template: "New portfolio message from {name}".to_string(),
        fallback_email: None,
        config_path: None,
        year: 1952,
    });
    app.set_viewport(72, 30);
    app
}

fn page_text(app: &App) -> String {
    app.page()
        .blocks()
        .iter()
        .filter_map(|block| match &block.kind {
            BlockKind::Text(lines) => Some(
                lines
                    .iter()
                    .map(|line| line.plain())
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[test]
fn custom_portfolio_replaces_bundled_content() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("me.toml");
    std::fs::write(&path, CUSTOM).unwrap();

    let portfolio = Portfolio::load(Some(&path)).unwrap();
    assert_eq!(portfolio.profile.name, "Grace Hopper");
    assert_eq!(portfolio.contact_email(), Some("grace@example.com"));

    let app = app_for(portfolio);
    let text = page_text(&app);
    assert!(text.contains("Grace Hopper"));
    assert!(text.contains("COMPILER"));
    assert!(text.contains("(c) 1952 Grace Hopper"));
    assert!(app.page().contact_form().is_some());
    assert!(app.page().section_top(SectionId::Contact).is_some());
}

#[test]
fn broken_override_falls_back_to_bundled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[profile\nname = ").unwrap();

    assert!(matches!(
        Portfolio::load_from(&path),
        Err(ContentError::Parse { .. })
    ));
    let portfolio = Portfolio::load(Some(&path)).unwrap();
    assert_eq!(portfolio, Portfolio::bundled().unwrap());
}

#[test]
fn missing_override_falls_back_to_bundled() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        Portfolio::load_from(&path),
        Err(ContentError::Read { .. })
    ));
    let portfolio = Portfolio::load(Some(&path)).unwrap();
    assert_eq!(portfolio.profile.name, "Md Mahabub Rana Saikat");
}

#[test]
fn apology_names_portfolio_email_without_configured_fallback() {
    let mut app = app_for(Portfolio::bundled().unwrap());
    let email = app.portfolio().contact_email().unwrap_or_default();
    let apology = folio_engine::error_message_for(email);
    assert!(apology.contains("mahabubranasaikat@gmail.com"));

    app.focus_form();
    assert_eq!(app.submit(), folio_engine::SubmitOutcome::Invalid);
}
