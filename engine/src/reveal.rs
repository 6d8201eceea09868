//! Scroll-triggered reveal timelines.
//!
//! Each animated element names a [`RevealKey`]. A [`RevealTrigger`] describes
//! how that element enters: the scroll threshold, timing, easing, and the
//! hidden [`Pose`] it animates from. [`Reveals`] owns the runtime state.
//!
//! Toggle semantics follow "play none none reverse": crossing the threshold
//! downward plays the timeline, scrolling back above it reverses from wherever
//! the timeline currently is. Triggers whose element is not on the page are
//! inert and report the visible pose.

use std::f32::consts::TAU;
use std::time::Duration;

use folio_types::SectionId;
use folio_types::ui::normalized_progress;

use crate::page::Page;

/// Easing curves, named after their GSAP counterparts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    Linear,
    /// `power2.out` (cubic).
    Power2Out,
    /// `expo.out`.
    ExpoOut,
    /// `back.out` with the standard 1.70158 overshoot.
    BackOut,
    /// `elastic.out(amplitude, period)`.
    ElasticOut { amplitude: f32, period: f32 },
}

impl Ease {
    #[must_use]
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f32.powf(-10.0 * t)
                }
            }
            Ease::BackOut => {
                const C1: f32 = 1.701_58;
                const C3: f32 = C1 + 1.0;
                let u = t - 1.0;
                1.0 + C3 * u.powi(3) + C1 * u.powi(2)
            }
            Ease::ElasticOut { amplitude, period } => {
                if t <= 0.0 {
                    return 0.0;
                }
                if t >= 1.0 {
                    return 1.0;
                }
                let amp = amplitude.max(1.0);
                let period = period / amplitude.min(1.0).max(f32::EPSILON);
                let shift = period / TAU * (1.0 / amp).asin();
                amp * 2f32.powf(-10.0 * t) * ((t - shift) * TAU / period).sin() + 1.0
            }
        }
    }
}

/// Visual offset of an element relative to its resting layout.
///
/// `dx`/`dy` are in terminal cells. `scale` shrinks the element's width
/// around its centre.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub opacity: f32,
    pub dx: f32,
    pub dy: f32,
    pub scale: f32,
}

impl Pose {
    pub const VISIBLE: Pose = Pose {
        opacity: 1.0,
        dx: 0.0,
        dy: 0.0,
        scale: 1.0,
    };

    /// Fully transparent, otherwise in place.
    #[must_use]
    pub const fn faded() -> Self {
        Pose {
            opacity: 0.0,
            ..Pose::VISIBLE
        }
    }

    /// Transparent and pushed down by `rows`.
    #[must_use]
    pub const fn below(rows: f32) -> Self {
        Pose {
            opacity: 0.0,
            dy: rows,
            ..Pose::VISIBLE
        }
    }

    /// Transparent and pushed right by `cols`.
    #[must_use]
    pub const fn right_of(cols: f32) -> Self {
        Pose {
            opacity: 0.0,
            dx: cols,
            ..Pose::VISIBLE
        }
    }

    /// Collapsed to zero width; `scaleX: 0` accent lines stay opaque.
    #[must_use]
    pub const fn collapsed(opacity: f32) -> Self {
        Pose {
            opacity,
            scale: 0.0,
            ..Pose::VISIBLE
        }
    }

    #[must_use]
    pub const fn with_scale(self, scale: f32) -> Self {
        Pose { scale, ..self }
    }

    /// Interpolate toward `to`. `t` may overshoot for elastic curves; opacity
    /// is clamped and scale never goes negative.
    #[must_use]
    pub fn lerp(self, to: Pose, t: f32) -> Pose {
        let mix = |a: f32, b: f32| a + (b - a) * t;
        Pose {
            opacity: mix(self.opacity, to.opacity).clamp(0.0, 1.0),
            dx: mix(self.dx, to.dx),
            dy: mix(self.dy, to.dy),
            scale: mix(self.scale, to.scale).max(0.0),
        }
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        *self == Pose::VISIBLE
    }
}

/// Identifies one animated element (or a staggered group of them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RevealKey(&'static str);

impl RevealKey {
    #[must_use]
    pub const fn new(name: &'static str) -> Self {
        Self(name)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.0
    }
}

/// What the scroll threshold is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerAnchor {
    /// Top of the element's section.
    Section,
    /// Top of the first element carrying the key.
    Element,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RevealTrigger {
    pub key: RevealKey,
    pub section: SectionId,
    /// Viewport fraction the anchor's top must reach (`top 70%` = 0.70).
    /// `None` plays once on startup.
    pub start: Option<f32>,
    pub anchor: TriggerAnchor,
    pub delay: Duration,
    pub duration: Duration,
    /// Offset between consecutive elements sharing the key.
    pub stagger: Duration,
    pub ease: Ease,
    pub hidden: Pose,
}

impl RevealTrigger {
    /// Scroll-triggered reveal anchored to the section top.
    #[must_use]
    pub const fn on_scroll(key: RevealKey, section: SectionId, start: f32) -> Self {
        Self {
            key,
            section,
            start: Some(start),
            anchor: TriggerAnchor::Section,
            delay: Duration::ZERO,
            duration: Duration::from_millis(600),
            stagger: Duration::ZERO,
            ease: Ease::ExpoOut,
            hidden: Pose::faded(),
        }
    }

    /// Startup reveal with no scroll trigger.
    #[must_use]
    pub const fn on_startup(key: RevealKey, section: SectionId, delay_ms: u64) -> Self {
        Self {
            key,
            section,
            start: None,
            anchor: TriggerAnchor::Section,
            delay: Duration::from_millis(delay_ms),
            duration: Duration::from_millis(600),
            stagger: Duration::ZERO,
            ease: Ease::ExpoOut,
            hidden: Pose::faded(),
        }
    }

    #[must_use]
    pub const fn element_anchored(mut self) -> Self {
        self.anchor = TriggerAnchor::Element;
        self
    }

    #[must_use]
    pub const fn duration_ms(mut self, ms: u64) -> Self {
        self.duration = Duration::from_millis(ms);
        self
    }

    #[must_use]
    pub const fn stagger_ms(mut self, ms: u64) -> Self {
        self.stagger = Duration::from_millis(ms);
        self
    }

    #[must_use]
    pub const fn ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    #[must_use]
    pub const fn starting_from(mut self, hidden: Pose) -> Self {
        self.hidden = hidden;
        self
    }

    /// Timeline length for `count` staggered elements.
    #[must_use]
    pub fn total(&self, count: usize) -> Duration {
        let extra = u32::try_from(count.saturating_sub(1)).unwrap_or(u32::MAX);
        self.delay + self.duration + self.stagger.saturating_mul(extra)
    }

    /// Pose of element `index` at timeline `position`.
    #[must_use]
    pub fn pose_at(&self, position: Duration, index: usize) -> Pose {
        let offset = self.delay
            + self
                .stagger
                .saturating_mul(u32::try_from(index).unwrap_or(u32::MAX));
        let local = position.saturating_sub(offset);
        let t = if position < offset {
            0.0
        } else {
            normalized_progress(local, self.duration)
        };
        self.hidden.lerp(Pose::VISIBLE, self.ease.apply(t))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Hidden,
    Playing,
    Shown,
    Reversing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
    Paused,
}

#[derive(Debug, Clone)]
struct RevealEntry {
    trigger: RevealTrigger,
    anchor_row: Option<u16>,
    count: usize,
    position: Duration,
    direction: Direction,
}

impl RevealEntry {
    fn total(&self) -> Duration {
        self.trigger.total(self.count)
    }

    fn phase(&self) -> RevealPhase {
        match self.direction {
            Direction::Forward => RevealPhase::Playing,
            Direction::Backward => RevealPhase::Reversing,
            Direction::Paused if self.position.is_zero() => RevealPhase::Hidden,
            Direction::Paused => RevealPhase::Shown,
        }
    }

    fn play(&mut self, reduced_motion: bool) {
        if reduced_motion {
            self.position = self.total();
            self.direction = Direction::Paused;
        } else if self.position < self.total() {
            self.direction = Direction::Forward;
        }
    }

    fn reverse(&mut self, reduced_motion: bool) {
        if reduced_motion {
            self.position = Duration::ZERO;
            self.direction = Direction::Paused;
        } else if !self.position.is_zero() || self.direction == Direction::Forward {
            self.direction = Direction::Backward;
        }
    }
}

/// Runtime state for every registered reveal.
#[derive(Debug, Clone)]
pub struct Reveals {
    entries: Vec<RevealEntry>,
    reduced_motion: bool,
}

impl Reveals {
    #[must_use]
    pub fn new(triggers: Vec<RevealTrigger>, reduced_motion: bool) -> Self {
        let entries = triggers
            .into_iter()
            .map(|trigger| RevealEntry {
                direction: if trigger.start.is_none() {
                    Direction::Forward
                } else {
                    Direction::Paused
                },
                trigger,
                anchor_row: None,
                count: 0,
                position: Duration::ZERO,
            })
            .collect();
        Self {
            entries,
            reduced_motion,
        }
    }

    /// Resolve anchors against a freshly laid-out page. Timeline positions are
    /// kept, so a resize does not replay anything.
    pub fn bind(&mut self, page: &Page) {
        for entry in &mut self.entries {
            let key = entry.trigger.key;
            entry.count = page.element_count(key);
            entry.anchor_row = if entry.count == 0 {
                None
            } else {
                match entry.trigger.anchor {
                    TriggerAnchor::Section => page.section_top(entry.trigger.section),
                    TriggerAnchor::Element => page.element_top(key),
                }
            };
            if entry.trigger.start.is_none() && self.reduced_motion {
                entry.play(true);
            }
            entry.position = entry.position.min(entry.total());
        }
    }

    /// Fire play/reverse for thresholds crossed at this scroll position.
    pub fn update_scroll(&mut self, offset: u16, viewport_height: u16) {
        let reduced = self.reduced_motion;
        for entry in &mut self.entries {
            let (Some(start), Some(row)) = (entry.trigger.start, entry.anchor_row) else {
                continue;
            };
            let top_in_view = f32::from(row) - f32::from(offset);
            let threshold = start * f32::from(viewport_height);
            if top_in_view <= threshold {
                entry.play(reduced);
            } else {
                entry.reverse(reduced);
            }
        }
    }

    pub fn advance(&mut self, delta: Duration) {
        for entry in &mut self.entries {
            if entry.anchor_row.is_none() {
                continue;
            }
            match entry.direction {
                Direction::Forward => {
                    let total = entry.total();
                    entry.position = entry.position.saturating_add(delta).min(total);
                    if entry.position >= total {
                        entry.direction = Direction::Paused;
                    }
                }
                Direction::Backward => {
                    entry.position = entry.position.saturating_sub(delta);
                    if entry.position.is_zero() {
                        entry.direction = Direction::Paused;
                    }
                }
                Direction::Paused => {}
            }
        }
    }

    /// Current pose of element `index` under `key`. Unknown keys are visible.
    #[must_use]
    pub fn pose(&self, key: RevealKey, index: usize) -> Pose {
        self.entry(key)
            .filter(|entry| entry.anchor_row.is_some())
            .map_or(Pose::VISIBLE, |entry| {
                entry.trigger.pose_at(entry.position, index)
            })
    }

    #[must_use]
    pub fn phase(&self, key: RevealKey) -> Option<RevealPhase> {
        self.entry(key)
            .filter(|entry| entry.anchor_row.is_some())
            .map(RevealEntry::phase)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.entries.iter().any(|entry| {
            entry.anchor_row.is_some() && entry.direction != Direction::Paused
        })
    }

    fn entry(&self, key: RevealKey) -> Option<&RevealEntry> {
        self.entries.iter().find(|entry| entry.trigger.key == key)
    }
}

/// Keys for every animated element on the page.
pub mod keys {
    use super::RevealKey;

    pub const HERO_LABEL: RevealKey = RevealKey::new("hero.label");
    pub const HERO_HEADLINE: RevealKey = RevealKey::new("hero.headline");
    pub const HERO_ROLES: RevealKey = RevealKey::new("hero.roles");
    pub const HERO_SUBTITLE: RevealKey = RevealKey::new("hero.subtitle");
    pub const HERO_CTA: RevealKey = RevealKey::new("hero.cta");
    pub const HERO_SOCIALS: RevealKey = RevealKey::new("hero.socials");

    pub const ABOUT_TITLE: RevealKey = RevealKey::new("about.title");
    pub const ABOUT_BIO: RevealKey = RevealKey::new("about.bio");
    pub const ABOUT_SKILLS: RevealKey = RevealKey::new("about.skills");

    pub const EDUCATION_TITLE: RevealKey = RevealKey::new("education.title");
    pub const EDUCATION_ACCENT: RevealKey = RevealKey::new("education.accent");
    pub const EDUCATION_ITEMS: RevealKey = RevealKey::new("education.items");
    pub const EDUCATION_DETAILS: RevealKey = RevealKey::new("education.details");

    pub const SERVICES_TITLE: RevealKey = RevealKey::new("services.title");
    pub const SERVICES_ACCENT: RevealKey = RevealKey::new("services.accent");
    pub const SERVICES_ICONS: RevealKey = RevealKey::new("services.icons");
    pub const SERVICES_CARDS: RevealKey = RevealKey::new("services.cards");

    pub const WORKS_TITLE: RevealKey = RevealKey::new("works.title");
    pub const WORKS_ACCENT: RevealKey = RevealKey::new("works.accent");
    pub const WORKS_PROJECTS: RevealKey = RevealKey::new("works.projects");
    pub const WORKS_TAGS: RevealKey = RevealKey::new("works.tags");
    pub const WORKS_STATS: RevealKey = RevealKey::new("works.stats");

    pub const INTERESTS_TITLE: RevealKey = RevealKey::new("interests.title");
    pub const INTERESTS_ACCENT: RevealKey = RevealKey::new("interests.accent");
    pub const INTERESTS_ITEMS: RevealKey = RevealKey::new("interests.items");
    pub const INTERESTS_TAGS: RevealKey = RevealKey::new("interests.tags");

    pub const CONTACT_HEADLINE: RevealKey = RevealKey::new("contact.headline");
    pub const CONTACT_ACCENT: RevealKey = RevealKey::new("contact.accent");
    pub const CONTACT_SUBTEXT: RevealKey = RevealKey::new("contact.subtext");
    pub const CONTACT_EMAIL: RevealKey = RevealKey::new("contact.email");
    pub const CONTACT_ITEMS: RevealKey = RevealKey::new("contact.items");
    pub const CONTACT_FORM: RevealKey = RevealKey::new("contact.form");

    pub const FOOTER_BRAND: RevealKey = RevealKey::new("footer.brand");
    pub const FOOTER_LINKS: RevealKey = RevealKey::new("footer.links");
}

/// Every reveal on the page.
#[must_use]
#[allow(clippy::wildcard_imports)]
pub fn catalog() -> Vec<RevealTrigger> {
    use SectionId::{About, Contact, Education, Footer, Hero, Interests, Services, Works};
    use keys::*;

    vec![
        // Hero entrance timeline, overlapping steps.
        RevealTrigger::on_startup(HERO_LABEL, Hero, 300)
            .duration_ms(500)
            .starting_from(Pose::below(1.0)),
        RevealTrigger::on_startup(HERO_HEADLINE, Hero, 300)
            .stagger_ms(60)
            .starting_from(Pose::below(5.0)),
        RevealTrigger::on_startup(HERO_ROLES, Hero, 600)
            .duration_ms(500)
            .ease(Ease::Power2Out),
        RevealTrigger::on_startup(HERO_SUBTITLE, Hero, 700)
            .duration_ms(500)
            .ease(Ease::Power2Out),
        RevealTrigger::on_startup(HERO_CTA, Hero, 1000)
            .duration_ms(400)
            .ease(Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            })
            .starting_from(Pose::collapsed(0.0)),
        RevealTrigger::on_startup(HERO_SOCIALS, Hero, 1100)
            .duration_ms(400)
            .stagger_ms(100)
            .starting_from(Pose::below(2.0)),
        // About
        RevealTrigger::on_scroll(ABOUT_TITLE, About, 0.80)
            .duration_ms(800)
            .starting_from(Pose::below(4.0)),
        RevealTrigger::on_scroll(ABOUT_BIO, About, 0.75)
            .duration_ms(800)
            .starting_from(Pose::below(2.0)),
        RevealTrigger::on_scroll(ABOUT_SKILLS, About, 0.85)
            .element_anchored()
            .stagger_ms(50)
            .ease(Ease::Power2Out)
            .starting_from(Pose::below(1.0)),
        // Education
        RevealTrigger::on_scroll(EDUCATION_TITLE, Education, 0.70).starting_from(Pose::below(2.0)),
        RevealTrigger::on_scroll(EDUCATION_ACCENT, Education, 0.65)
            .duration_ms(500)
            .starting_from(Pose::collapsed(1.0)),
        RevealTrigger::on_scroll(EDUCATION_ITEMS, Education, 0.65)
            .element_anchored()
            .duration_ms(1000)
            .stagger_ms(250)
            .starting_from(Pose::right_of(-8.0)),
        RevealTrigger::on_scroll(EDUCATION_DETAILS, Education, 0.60)
            .element_anchored()
            .stagger_ms(200)
            .starting_from(Pose::below(1.0)),
        // Services
        RevealTrigger::on_scroll(SERVICES_TITLE, Services, 0.70).starting_from(Pose::below(2.0)),
        RevealTrigger::on_scroll(SERVICES_ACCENT, Services, 0.65)
            .duration_ms(500)
            .starting_from(Pose::collapsed(1.0)),
        RevealTrigger::on_scroll(SERVICES_ICONS, Services, 0.75)
            .element_anchored()
            .duration_ms(700)
            .stagger_ms(150)
            .ease(Ease::BackOut)
            .starting_from(Pose::collapsed(1.0)),
        RevealTrigger::on_scroll(SERVICES_CARDS, Services, 0.75)
            .element_anchored()
            .duration_ms(800)
            .stagger_ms(150)
            .starting_from(Pose::below(2.0).with_scale(0.9)),
        // Works
        RevealTrigger::on_scroll(WORKS_TITLE, Works, 0.70)
            .duration_ms(800)
            .starting_from(Pose::below(4.0)),
        RevealTrigger::on_scroll(WORKS_ACCENT, Works, 0.65)
            .duration_ms(500)
            .starting_from(Pose::collapsed(1.0)),
        RevealTrigger::on_scroll(WORKS_PROJECTS, Works, 0.85)
            .element_anchored()
            .duration_ms(800)
            .stagger_ms(120)
            .starting_from(Pose::below(3.0)),
        RevealTrigger::on_scroll(WORKS_TAGS, Works, 0.70)
            .element_anchored()
            .duration_ms(500)
            .stagger_ms(100)
            .ease(Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            })
            .starting_from(Pose::collapsed(0.0)),
        RevealTrigger::on_scroll(WORKS_STATS, Works, 0.80)
            .element_anchored()
            .starting_from(Pose::below(2.0)),
        // Interests
        RevealTrigger::on_scroll(INTERESTS_TITLE, Interests, 0.70).starting_from(Pose::below(2.0)),
        RevealTrigger::on_scroll(INTERESTS_ACCENT, Interests, 0.65)
            .duration_ms(500)
            .starting_from(Pose::collapsed(1.0)),
        RevealTrigger::on_scroll(INTERESTS_ITEMS, Interests, 0.75)
            .element_anchored()
            .duration_ms(800)
            .stagger_ms(120)
            .starting_from(Pose::below(2.0)),
        RevealTrigger::on_scroll(INTERESTS_TAGS, Interests, 0.70)
            .element_anchored()
            .duration_ms(500)
            .stagger_ms(100)
            .ease(Ease::ElasticOut {
                amplitude: 1.2,
                period: 0.6,
            })
            .starting_from(Pose::collapsed(0.0)),
        // Contact
        RevealTrigger::on_scroll(CONTACT_HEADLINE, Contact, 0.70)
            .duration_ms(800)
            .stagger_ms(100)
            .starting_from(Pose::below(4.0)),
        RevealTrigger::on_scroll(CONTACT_ACCENT, Contact, 0.65)
            .duration_ms(800)
            .starting_from(Pose::collapsed(1.0)),
        RevealTrigger::on_scroll(CONTACT_SUBTEXT, Contact, 0.60)
            .ease(Ease::Power2Out)
            .starting_from(Pose::below(2.0)),
        RevealTrigger::on_scroll(CONTACT_EMAIL, Contact, 0.55)
            .duration_ms(800)
            .ease(Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            })
            .starting_from(Pose::collapsed(0.0)),
        RevealTrigger::on_scroll(CONTACT_ITEMS, Contact, 0.70)
            .element_anchored()
            .duration_ms(500)
            .stagger_ms(100)
            .ease(Ease::Power2Out)
            .starting_from(Pose::right_of(-4.0)),
        RevealTrigger::on_scroll(CONTACT_FORM, Contact, 0.60)
            .element_anchored()
            .duration_ms(800)
            .starting_from(Pose::right_of(8.0)),
        // Footer
        RevealTrigger::on_scroll(FOOTER_BRAND, Footer, 0.95)
            .duration_ms(800)
            .starting_from(Pose::below(2.0)),
        RevealTrigger::on_scroll(FOOTER_LINKS, Footer, 0.90)
            .duration_ms(500)
            .stagger_ms(50)
            .ease(Ease::Power2Out)
            .starting_from(Pose::below(1.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::PageBuilder;

    const EPS: f32 = 1e-4;

    fn single_page(anchor_row: u16) -> Page {
        let mut builder = PageBuilder::new(40);
        builder.section(SectionId::Hero);
        builder.blank(anchor_row);
        builder.section(SectionId::About);
        builder.plain("About", Some((keys::ABOUT_TITLE, 0)));
        builder.blank(100);
        builder.finish()
    }

    fn title_trigger() -> RevealTrigger {
        RevealTrigger::on_scroll(keys::ABOUT_TITLE, SectionId::About, 0.5)
            .duration_ms(400)
            .ease(Ease::Linear)
            .starting_from(Pose::below(4.0))
    }

    #[test]
    fn eases_hit_endpoints() {
        let eases = [
            Ease::Linear,
            Ease::Power2Out,
            Ease::ExpoOut,
            Ease::BackOut,
            Ease::ElasticOut {
                amplitude: 1.0,
                period: 0.5,
            },
            Ease::ElasticOut {
                amplitude: 1.3,
                period: 0.7,
            },
        ];
        for ease in eases {
            assert!(ease.apply(0.0).abs() < EPS, "{ease:?} at 0");
            assert!((ease.apply(1.0) - 1.0).abs() < EPS, "{ease:?} at 1");
        }
    }

    #[test]
    fn out_eases_lead_linear() {
        assert!(Ease::ExpoOut.apply(0.3) > 0.3);
        assert!(Ease::Power2Out.apply(0.3) > 0.3);
        assert!(Ease::BackOut.apply(0.8) > 1.0);
    }

    #[test]
    fn pose_lerp_clamps_opacity_and_scale() {
        let hidden = Pose::collapsed(0.0);
        let overshoot = hidden.lerp(Pose::VISIBLE, 1.2);
        assert!((overshoot.opacity - 1.0).abs() < EPS);
        assert!(overshoot.scale > 1.0);
        let undershoot = hidden.lerp(Pose::VISIBLE, -0.5);
        assert!(undershoot.scale.abs() < EPS);
        assert!(undershoot.opacity.abs() < EPS);
    }

    #[test]
    fn stagger_delays_later_elements() {
        let trigger = title_trigger().stagger_ms(100);
        let early = trigger.pose_at(Duration::from_millis(100), 0);
        let late = trigger.pose_at(Duration::from_millis(100), 1);
        assert!(early.opacity > late.opacity);
        assert!(late.opacity.abs() < EPS);
        assert_eq!(trigger.total(3), Duration::from_millis(600));
    }

    #[test]
    fn crossing_threshold_plays_and_scrolling_back_reverses() {
        let page = single_page(30);
        let mut reveals = Reveals::new(vec![title_trigger()], false);
        reveals.bind(&page);

        // Section top at row 30, threshold at 10 rows in a 20-row viewport.
        reveals.update_scroll(0, 20);
        assert_eq!(reveals.phase(keys::ABOUT_TITLE), Some(RevealPhase::Hidden));
        assert!(reveals.pose(keys::ABOUT_TITLE, 0).opacity.abs() < EPS);

        reveals.update_scroll(20, 20);
        assert_eq!(reveals.phase(keys::ABOUT_TITLE), Some(RevealPhase::Playing));
        reveals.advance(Duration::from_millis(200));
        let mid = reveals.pose(keys::ABOUT_TITLE, 0);
        assert!((mid.opacity - 0.5).abs() < 0.01);
        assert!((mid.dy - 2.0).abs() < 0.01);

        reveals.advance(Duration::from_millis(400));
        assert_eq!(reveals.phase(keys::ABOUT_TITLE), Some(RevealPhase::Shown));
        assert!(reveals.pose(keys::ABOUT_TITLE, 0).is_visible());
        assert!(!reveals.is_animating());

        reveals.update_scroll(0, 20);
        assert_eq!(reveals.phase(keys::ABOUT_TITLE), Some(RevealPhase::Reversing));
        reveals.advance(Duration::from_millis(100));
        assert!((reveals.pose(keys::ABOUT_TITLE, 0).opacity - 0.75).abs() < 0.01);
        reveals.advance(Duration::from_secs(1));
        assert_eq!(reveals.phase(keys::ABOUT_TITLE), Some(RevealPhase::Hidden));
    }

    #[test]
    fn reversal_starts_from_current_progress() {
        let page = single_page(30);
        let mut reveals = Reveals::new(vec![title_trigger()], false);
        reveals.bind(&page);

        reveals.update_scroll(20, 20);
        reveals.advance(Duration::from_millis(100));
        reveals.update_scroll(0, 20);
        reveals.advance(Duration::from_millis(50));
        assert!((reveals.pose(keys::ABOUT_TITLE, 0).opacity - 0.125).abs() < 0.01);
    }

    #[test]
    fn reduced_motion_snaps() {
        let page = single_page(30);
        let mut reveals = Reveals::new(vec![title_trigger()], true);
        reveals.bind(&page);

        reveals.update_scroll(20, 20);
        assert_eq!(reveals.phase(keys::ABOUT_TITLE), Some(RevealPhase::Shown));
        assert!(reveals.pose(keys::ABOUT_TITLE, 0).is_visible());
        assert!(!reveals.is_animating());

        reveals.update_scroll(0, 20);
        assert_eq!(reveals.phase(keys::ABOUT_TITLE), Some(RevealPhase::Hidden));
    }

    #[test]
    fn absent_elements_are_inert_and_visible() {
        let page = single_page(30);
        let trigger = RevealTrigger::on_scroll(keys::WORKS_TITLE, SectionId::Works, 0.7);
        let mut reveals = Reveals::new(vec![trigger], false);
        reveals.bind(&page);
        reveals.update_scroll(50, 20);
        reveals.advance(Duration::from_secs(1));

        assert_eq!(reveals.phase(keys::WORKS_TITLE), None);
        assert!(reveals.pose(keys::WORKS_TITLE, 0).is_visible());
        assert!(!reveals.is_animating());
    }

    #[test]
    fn startup_triggers_play_without_scrolling() {
        let mut builder = PageBuilder::new(40);
        builder.section(SectionId::Hero);
        builder.plain("Developer", Some((keys::HERO_LABEL, 0)));
        let page = builder.finish();

        let trigger = RevealTrigger::on_startup(keys::HERO_LABEL, SectionId::Hero, 300)
            .duration_ms(500);
        let mut reveals = Reveals::new(vec![trigger], false);
        reveals.bind(&page);
        assert_eq!(reveals.phase(keys::HERO_LABEL), Some(RevealPhase::Playing));

        reveals.advance(Duration::from_millis(200));
        assert!(reveals.pose(keys::HERO_LABEL, 0).opacity.abs() < EPS);
        reveals.advance(Duration::from_millis(700));
        assert_eq!(reveals.phase(keys::HERO_LABEL), Some(RevealPhase::Shown));

        // Scrolling never reverses startup reveals.
        reveals.update_scroll(500, 20);
        assert_eq!(reveals.phase(keys::HERO_LABEL), Some(RevealPhase::Shown));
    }

    #[test]
    fn catalog_keys_are_unique() {
        let triggers = catalog();
        for (i, a) in triggers.iter().enumerate() {
            for b in &triggers[i + 1..] {
                assert_ne!(a.key, b.key);
            }
        }
    }
}
