//! Page layout: portfolio content flattened into positioned blocks.
//!
//! The layout is computed once per content width. Rows are absolute from the
//! top of the page; the renderer subtracts the scroll offset. Reveal anchors
//! and active-section tracking read the same rows the renderer draws, so
//! triggers fire exactly where the element appears.

use folio_types::{SectionId, wrap_words};

use crate::content::Portfolio;
use crate::reveal::{RevealKey, keys};

/// Rows reserved for the interactive contact form.
pub const CONTACT_FORM_HEIGHT: u16 = 22;

/// Widest column the page is laid out at.
pub const MAX_CONTENT_WIDTH: u16 = 88;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    /// Oversized headline words.
    Display,
    /// Section titles.
    Title,
    Heading,
    Body,
    Muted,
    Accent,
    Number,
    Tag,
    Link,
    /// A single bullet cell; the renderer picks the glyph.
    Bullet,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub text: String,
    pub role: TextRole,
}

impl Segment {
    #[must_use]
    pub fn new(text: impl Into<String>, role: TextRole) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }

    #[must_use]
    pub fn bullet() -> Self {
        Self::new("•", TextRole::Bullet)
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.text.chars().count()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextLine {
    pub segments: Vec<Segment>,
}

impl TextLine {
    #[must_use]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    #[must_use]
    pub fn single(text: impl Into<String>, role: TextRole) -> Self {
        Self::new(vec![Segment::new(text, role)])
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.segments.iter().map(Segment::width).sum()
    }

    /// Truncate to `width` cells, ending the cut segment with `...`.
    #[must_use]
    pub fn fit(mut self, width: usize) -> Self {
        if self.width() <= width {
            return self;
        }
        let mut remaining = width;
        let mut kept = Vec::with_capacity(self.segments.len());
        for mut segment in self.segments.drain(..) {
            let seg_width = segment.width();
            if seg_width <= remaining {
                remaining -= seg_width;
                kept.push(segment);
                continue;
            }
            segment.text = if remaining > 3 {
                let head: String = segment.text.chars().take(remaining - 3).collect();
                format!("{head}...")
            } else {
                segment.text.chars().take(remaining).collect()
            };
            if !segment.text.is_empty() {
                kept.push(segment);
            }
            break;
        }
        self.segments = kept;
        self
    }

    /// Concatenated text, for tests and logging.
    #[must_use]
    pub fn plain(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockKind {
    Text(Vec<TextLine>),
    /// Horizontal accent line.
    Rule,
    /// The cycling role line in the hero.
    Typewriter,
    ContactForm,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub section: SectionId,
    pub top: u16,
    pub height: u16,
    pub kind: BlockKind,
    pub reveal: Option<(RevealKey, usize)>,
}

impl Block {
    #[must_use]
    pub fn bottom(&self) -> u16 {
        self.top.saturating_add(self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: SectionId,
    pub top: u16,
    pub height: u16,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    width: u16,
    height: u16,
    blocks: Vec<Block>,
    sections: Vec<SectionSpan>,
}

impl Page {
    /// Lay out `portfolio` at `width` columns.
    #[must_use]
    pub fn build(portfolio: &Portfolio, width: u16, year: i32) -> Self {
        let width = width.clamp(16, MAX_CONTENT_WIDTH);
        let mut builder = PageBuilder::new(width);
        hero(&mut builder, portfolio);
        about(&mut builder, portfolio);
        education(&mut builder, portfolio);
        services(&mut builder, portfolio);
        works(&mut builder, portfolio);
        interests(&mut builder, portfolio);
        contact(&mut builder, portfolio);
        footer(&mut builder, portfolio, year);
        builder.finish()
    }

    #[must_use]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u16 {
        self.height
    }

    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    #[must_use]
    pub fn sections(&self) -> &[SectionSpan] {
        &self.sections
    }

    #[must_use]
    pub fn section_top(&self, id: SectionId) -> Option<u16> {
        self.sections.iter().find(|s| s.id == id).map(|s| s.top)
    }

    #[must_use]
    pub fn element_top(&self, key: RevealKey) -> Option<u16> {
        self.blocks
            .iter()
            .filter(|b| b.reveal.is_some_and(|(k, _)| k == key))
            .map(|b| b.top)
            .min()
    }

    /// Number of staggered elements carrying `key`.
    #[must_use]
    pub fn element_count(&self, key: RevealKey) -> usize {
        self.blocks
            .iter()
            .filter_map(|b| b.reveal.filter(|(k, _)| *k == key).map(|(_, i)| i + 1))
            .max()
            .unwrap_or(0)
    }

    /// Blocks overlapping rows `[offset, offset + rows)`.
    pub fn visible_blocks(&self, offset: u16, rows: u16) -> impl Iterator<Item = &Block> {
        let end = offset.saturating_add(rows);
        self.blocks
            .iter()
            .filter(move |b| b.bottom() > offset && b.top < end)
    }

    #[must_use]
    pub fn contact_form(&self) -> Option<&Block> {
        self.blocks
            .iter()
            .find(|b| matches!(b.kind, BlockKind::ContactForm))
    }
}

/// Sequential block layout.
#[derive(Debug)]
pub(crate) struct PageBuilder {
    width: u16,
    cursor: u16,
    blocks: Vec<Block>,
    sections: Vec<SectionSpan>,
    current: SectionId,
}

impl PageBuilder {
    pub(crate) fn new(width: u16) -> Self {
        Self {
            width,
            cursor: 0,
            blocks: Vec::new(),
            sections: Vec::new(),
            current: SectionId::Hero,
        }
    }

    fn close_section(&mut self) {
        if let Some(last) = self.sections.last_mut() {
            last.height = self.cursor.saturating_sub(last.top);
        }
    }

    pub(crate) fn section(&mut self, id: SectionId) {
        self.close_section();
        self.current = id;
        self.sections.push(SectionSpan {
            id,
            top: self.cursor,
            height: 0,
        });
    }

    fn push(&mut self, kind: BlockKind, height: u16, reveal: Option<(RevealKey, usize)>) {
        if height == 0 {
            return;
        }
        self.blocks.push(Block {
            section: self.current,
            top: self.cursor,
            height,
            kind,
            reveal,
        });
        self.cursor = self.cursor.saturating_add(height);
    }

    pub(crate) fn blank(&mut self, rows: u16) {
        self.push(BlockKind::Blank, rows, None);
    }

    pub(crate) fn lines(&mut self, lines: Vec<TextLine>, reveal: Option<(RevealKey, usize)>) {
        let width = usize::from(self.width);
        let lines: Vec<TextLine> = lines.into_iter().map(|line| line.fit(width)).collect();
        let height = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        self.push(BlockKind::Text(lines), height, reveal);
    }

    pub(crate) fn paragraph(
        &mut self,
        text: &str,
        role: TextRole,
        reveal: Option<(RevealKey, usize)>,
    ) {
        if text.trim().is_empty() {
            return;
        }
        let lines = self.wrap(text, role);
        self.lines(lines, reveal);
    }

    pub(crate) fn plain(&mut self, text: &str, reveal: Option<(RevealKey, usize)>) {
        self.paragraph(text, TextRole::Body, reveal);
    }

    fn rule(&mut self, reveal: Option<(RevealKey, usize)>) {
        self.push(BlockKind::Rule, 1, reveal);
    }

    fn wrap(&self, text: &str, role: TextRole) -> Vec<TextLine> {
        wrap_words(text, usize::from(self.width))
            .into_iter()
            .map(|line| TextLine::single(line, role))
            .collect()
    }

    fn title(&mut self, number: &str, title: &str, reveal: RevealKey) {
        self.lines(
            vec![TextLine::new(vec![
                Segment::new(number, TextRole::Number),
                Segment::new(" / ", TextRole::Muted),
                Segment::new(title, TextRole::Title),
            ])],
            Some((reveal, 0)),
        );
    }

    pub(crate) fn finish(mut self) -> Page {
        self.close_section();
        Page {
            width: self.width,
            height: self.cursor,
            blocks: self.blocks,
            sections: self.sections,
        }
    }
}

/// Pack tags greedily into lines no wider than `width`.
fn tag_lines(tags: &[String], width: u16) -> Vec<TextLine> {
    let width = usize::from(width);
    let mut lines = Vec::new();
    let mut current = TextLine::default();
    for tag in tags {
        let tag_width = tag.chars().count() + 2;
        let needed = if current.segments.is_empty() {
            tag_width
        } else {
            current.width() + 1 + tag_width
        };
        if needed > width && !current.segments.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.segments.is_empty() {
            current.segments.push(Segment::new(" ", TextRole::Body));
        }
        current
            .segments
            .push(Segment::new(format!("[{tag}]"), TextRole::Tag));
    }
    if !current.segments.is_empty() {
        lines.push(current);
    }
    lines
}

fn display_url(url: &str) -> &str {
    let url = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    url.strip_prefix("www.").unwrap_or(url)
}

fn hero(b: &mut PageBuilder, portfolio: &Portfolio) {
    let profile = &portfolio.profile;
    b.section(SectionId::Hero);
    b.blank(1);

    let mut label = vec![Segment::new("</> ", TextRole::Accent)];
    if !profile.label.trim().is_empty() {
        label.push(Segment::new(profile.label.trim(), TextRole::Muted));
        label.push(Segment::new(" · ", TextRole::Muted));
    }
    label.push(Segment::new(profile.name.trim(), TextRole::Heading));
    b.lines(vec![TextLine::new(label)], Some((keys::HERO_LABEL, 0)));
    b.blank(1);

    for (i, word) in profile.headline.split_whitespace().enumerate() {
        b.lines(
            vec![TextLine::single(word, TextRole::Display)],
            Some((keys::HERO_HEADLINE, i)),
        );
    }

    if !profile.roles.is_empty() {
        b.blank(1);
        b.push(BlockKind::Typewriter, 1, Some((keys::HERO_ROLES, 0)));
    }
    b.blank(1);
    b.paragraph(&profile.subtitle, TextRole::Body, Some((keys::HERO_SUBTITLE, 0)));

    if !profile.cta.trim().is_empty() {
        b.blank(1);
        b.lines(
            vec![TextLine::new(vec![
                Segment::new(format!("[ {} ]", profile.cta.trim()), TextRole::Link),
                Segment::new("  press c", TextRole::Muted),
            ])],
            Some((keys::HERO_CTA, 0)),
        );
    }

    if !portfolio.socials.is_empty() {
        b.blank(1);
        for (i, social) in portfolio.socials.iter().enumerate() {
            b.lines(
                vec![TextLine::new(vec![
                    Segment::new(format!("{:<10}", social.name), TextRole::Muted),
                    Segment::new(display_url(&social.url), TextRole::Link),
                ])],
                Some((keys::HERO_SOCIALS, i)),
            );
        }
    }
    b.blank(2);
}

fn about(b: &mut PageBuilder, portfolio: &Portfolio) {
    let about = &portfolio.about;
    if about.bio.trim().is_empty() && about.skills.is_empty() {
        return;
    }
    b.section(SectionId::About);
    b.blank(1);
    b.title("01", "ABOUT ME", keys::ABOUT_TITLE);
    b.blank(1);
    b.paragraph(&about.bio, TextRole::Body, Some((keys::ABOUT_BIO, 0)));

    for (i, group) in about.skills.iter().enumerate() {
        b.blank(1);
        let mut lines = vec![TextLine::single(&group.category, TextRole::Heading)];
        lines.extend(tag_lines(&group.items, b.width));
        b.lines(lines, Some((keys::ABOUT_SKILLS, i)));
    }
    b.blank(2);
}

fn education(b: &mut PageBuilder, portfolio: &Portfolio) {
    if portfolio.education.is_empty() {
        return;
    }
    b.section(SectionId::Education);
    b.blank(1);
    b.title("02", "EDUCATION", keys::EDUCATION_TITLE);
    b.rule(Some((keys::EDUCATION_ACCENT, 0)));
    b.blank(1);

    for (i, entry) in portfolio.education.iter().enumerate() {
        let mut lines = vec![TextLine::new(vec![
            Segment::bullet(),
            Segment::new(" ", TextRole::Body),
            Segment::new(entry.degree.trim(), TextRole::Heading),
        ])];
        let mut place = entry.institution.trim().to_string();
        if !entry.location.trim().is_empty() {
            place.push_str(", ");
            place.push_str(entry.location.trim());
        }
        lines.extend(
            wrap_words(&place, usize::from(b.width.saturating_sub(2)))
                .into_iter()
                .map(|line| {
                    TextLine::new(vec![
                        Segment::new("  ", TextRole::Body),
                        Segment::new(line, TextRole::Body),
                    ])
                }),
        );
        if !entry.period.trim().is_empty() {
            lines.push(TextLine::new(vec![
                Segment::new("  ", TextRole::Body),
                Segment::new(entry.period.trim(), TextRole::Muted),
            ]));
        }
        b.lines(lines, Some((keys::EDUCATION_ITEMS, i)));
        if !entry.detail.trim().is_empty() {
            b.lines(
                vec![TextLine::new(vec![
                    Segment::new("  ", TextRole::Body),
                    Segment::new(entry.detail.trim(), TextRole::Accent),
                ])],
                Some((keys::EDUCATION_DETAILS, i)),
            );
        }
        b.blank(1);
    }
    b.blank(1);
}

fn services(b: &mut PageBuilder, portfolio: &Portfolio) {
    if portfolio.services.is_empty() {
        return;
    }
    b.section(SectionId::Services);
    b.blank(1);
    b.title("03", "SERVICES", keys::SERVICES_TITLE);
    b.rule(Some((keys::SERVICES_ACCENT, 0)));
    b.blank(1);

    for (i, service) in portfolio.services.iter().enumerate() {
        b.lines(
            vec![TextLine::new(vec![
                Segment::new(service.number.trim(), TextRole::Number),
                Segment::new("  ", TextRole::Body),
                Segment::new(service.title.trim(), TextRole::Heading),
            ])],
            Some((keys::SERVICES_ICONS, i)),
        );
        let lines = b.wrap(&service.description, TextRole::Body);
        b.lines(lines, Some((keys::SERVICES_CARDS, i)));
        b.blank(1);
    }
    b.blank(1);
}

fn works(b: &mut PageBuilder, portfolio: &Portfolio) {
    let works = &portfolio.works;
    if works.projects.is_empty() {
        return;
    }
    b.section(SectionId::Works);
    b.blank(1);
    b.title("04", "SELECTED WORKS", keys::WORKS_TITLE);
    b.rule(Some((keys::WORKS_ACCENT, 0)));
    b.blank(1);

    if !works.total.trim().is_empty() || !works.domains.is_empty() {
        let mut stats = Vec::new();
        if !works.total.trim().is_empty() {
            stats.push(TextLine::new(vec![
                Segment::new(works.total.trim(), TextRole::Number),
                Segment::new(" projects", TextRole::Muted),
            ]));
        }
        stats.extend(
            wrap_words(&works.domains.join(" · "), usize::from(b.width))
                .into_iter()
                .map(|line| TextLine::single(line, TextRole::Muted)),
        );
        b.lines(stats, Some((keys::WORKS_STATS, 0)));
        b.blank(1);
    }

    for (i, project) in works.projects.iter().enumerate() {
        let mut lines = vec![TextLine::new(vec![
            Segment::new(format!("{:02}", i + 1), TextRole::Number),
            Segment::new("  ", TextRole::Body),
            Segment::new(project.title.trim(), TextRole::Heading),
        ])];
        if !project.category.trim().is_empty() {
            lines.push(TextLine::single(project.category.trim(), TextRole::Accent));
        }
        lines.extend(b.wrap(&project.description, TextRole::Body));
        if let Some(link) = project.link.as_deref().filter(|l| !l.trim().is_empty()) {
            lines.push(TextLine::new(vec![
                Segment::new("↗ ", TextRole::Muted),
                Segment::new(display_url(link.trim()), TextRole::Link),
            ]));
        }
        b.lines(lines, Some((keys::WORKS_PROJECTS, i)));
        b.lines(tag_lines(&project.tech, b.width), Some((keys::WORKS_TAGS, i)));
        b.blank(1);
    }
    b.blank(1);
}

fn interests(b: &mut PageBuilder, portfolio: &Portfolio) {
    let interests = &portfolio.interests;
    if interests.items.is_empty() && interests.areas.is_empty() {
        return;
    }
    b.section(SectionId::Interests);
    b.blank(1);
    b.title("05", "INTERESTS", keys::INTERESTS_TITLE);
    b.rule(Some((keys::INTERESTS_ACCENT, 0)));
    b.blank(1);

    for (i, item) in interests.items.iter().enumerate() {
        let mut lines = vec![TextLine::new(vec![
            Segment::bullet(),
            Segment::new(" ", TextRole::Body),
            Segment::new(item.title.trim(), TextRole::Heading),
        ])];
        lines.extend(
            wrap_words(&item.description, usize::from(b.width.saturating_sub(2)))
                .into_iter()
                .filter(|line| !line.is_empty())
                .map(|line| {
                    TextLine::new(vec![
                        Segment::new("  ", TextRole::Body),
                        Segment::new(line, TextRole::Body),
                    ])
                }),
        );
        b.lines(lines, Some((keys::INTERESTS_ITEMS, i)));
        b.blank(1);
    }

    if !interests.areas.is_empty() {
        b.lines(
            tag_lines(&interests.areas, b.width),
            Some((keys::INTERESTS_TAGS, 0)),
        );
        b.blank(1);
    }
    b.blank(1);
}

fn contact(b: &mut PageBuilder, portfolio: &Portfolio) {
    let contact = &portfolio.contact;
    b.section(SectionId::Contact);
    b.blank(1);

    for (i, word) in contact.headline.split_whitespace().enumerate() {
        b.lines(
            vec![TextLine::single(word, TextRole::Display)],
            Some((keys::CONTACT_HEADLINE, i)),
        );
    }
    b.rule(Some((keys::CONTACT_ACCENT, 0)));
    b.blank(1);
    b.paragraph(&contact.subtext, TextRole::Body, Some((keys::CONTACT_SUBTEXT, 0)));

    if let Some(email) = portfolio.contact_email() {
        b.blank(1);
        b.lines(
            vec![TextLine::new(vec![
                Segment::new("✉ ", TextRole::Accent),
                Segment::new(email, TextRole::Link),
            ])],
            Some((keys::CONTACT_EMAIL, 0)),
        );
    }

    let items = [
        ("Location", contact.location.trim()),
        ("Phone", contact.phone.trim()),
        ("Status", contact.availability.trim()),
    ];
    let mut index = 0;
    for (label, value) in items {
        if value.is_empty() {
            continue;
        }
        if index == 0 {
            b.blank(1);
        }
        b.lines(
            vec![TextLine::new(vec![
                Segment::new(format!("{label:<10}"), TextRole::Muted),
                Segment::new(value, TextRole::Body),
            ])],
            Some((keys::CONTACT_ITEMS, index)),
        );
        index += 1;
    }

    b.blank(1);
    b.push(
        BlockKind::ContactForm,
        CONTACT_FORM_HEIGHT,
        Some((keys::CONTACT_FORM, 0)),
    );
    b.blank(2);
}

fn footer(b: &mut PageBuilder, portfolio: &Portfolio, year: i32) {
    b.section(SectionId::Footer);
    b.rule(None);
    b.blank(1);
    b.lines(
        vec![TextLine::single(portfolio.profile.name.trim(), TextRole::Heading)],
        Some((keys::FOOTER_BRAND, 0)),
    );
    b.blank(1);

    let mut links: Vec<TextLine> = portfolio
        .socials
        .iter()
        .map(|social| TextLine::single(social.name.trim(), TextRole::Link))
        .collect();
    let back_to_top = portfolio.footer.back_to_top.trim();
    if !back_to_top.is_empty() {
        links.push(TextLine::new(vec![
            Segment::new("↑ ", TextRole::Accent),
            Segment::new(back_to_top, TextRole::Accent),
        ]));
    }
    for (i, line) in links.into_iter().enumerate() {
        b.lines(vec![line], Some((keys::FOOTER_LINKS, i)));
    }

    let copyright = portfolio.copyright(year);
    if !copyright.trim().is_empty() {
        b.blank(1);
        b.paragraph(&copyright, TextRole::Muted, None);
    }
    b.blank(1);
}
