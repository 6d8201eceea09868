//! Scroll position, smooth scrolling, and active-section tracking.

use std::time::Duration;

use folio_types::SectionId;
use folio_types::ui::EffectTimer;

use crate::page::Page;
use crate::reveal::Ease;

pub const SMOOTH_SCROLL_DURATION: Duration = Duration::from_millis(400);

#[derive(Debug, Clone)]
struct ScrollAnimation {
    from: u16,
    to: u16,
    timer: EffectTimer,
}

/// Viewport over the laid-out page.
#[derive(Debug, Clone, Default)]
pub struct ScrollView {
    offset: u16,
    viewport: u16,
    content: u16,
    animation: Option<ScrollAnimation>,
}

impl ScrollView {
    #[must_use]
    pub fn new(viewport: u16, content: u16) -> Self {
        Self {
            offset: 0,
            viewport,
            content,
            animation: None,
        }
    }

    #[must_use]
    pub fn offset(&self) -> u16 {
        self.offset
    }

    #[must_use]
    pub fn viewport(&self) -> u16 {
        self.viewport
    }

    /// Total page rows.
    #[must_use]
    pub fn content(&self) -> u16 {
        self.content
    }

    #[must_use]
    pub fn max_offset(&self) -> u16 {
        self.content.saturating_sub(self.viewport)
    }

    /// Scroll target once any smooth scroll completes.
    #[must_use]
    pub fn target(&self) -> u16 {
        self.animation.as_ref().map_or(self.offset, |a| a.to)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Fraction of the page scrolled past, 0 when everything fits.
    #[must_use]
    pub fn progress(&self) -> f32 {
        let max = self.max_offset();
        if max == 0 {
            return 0.0;
        }
        (f32::from(self.offset) / f32::from(max)).clamp(0.0, 1.0)
    }

    pub fn resize(&mut self, viewport: u16, content: u16) {
        self.viewport = viewport;
        self.content = content;
        let max = self.max_offset();
        self.offset = self.offset.min(max);
        if let Some(animation) = self.animation.as_mut() {
            animation.to = animation.to.min(max);
        }
    }

    /// Relative scroll. Cancels any smooth scroll in progress.
    pub fn scroll_by(&mut self, delta: i32) {
        self.animation = None;
        let next = i32::from(self.offset).saturating_add(delta);
        self.offset = u16::try_from(next.max(0))
            .unwrap_or(u16::MAX)
            .min(self.max_offset());
    }

    pub fn page_down(&mut self) {
        self.scroll_by(i32::from(self.viewport.saturating_sub(1).max(1)));
    }

    pub fn page_up(&mut self) {
        self.scroll_by(-i32::from(self.viewport.saturating_sub(1).max(1)));
    }

    /// Move to `row`, animated unless `smooth` is false.
    pub fn scroll_to(&mut self, row: u16, smooth: bool) {
        let to = row.min(self.max_offset());
        if !smooth || to == self.offset {
            self.animation = None;
            self.offset = to;
            return;
        }
        self.animation = Some(ScrollAnimation {
            from: self.offset,
            to,
            timer: EffectTimer::new(SMOOTH_SCROLL_DURATION),
        });
    }

    pub fn advance(&mut self, delta: Duration) {
        let Some(animation) = self.animation.as_mut() else {
            return;
        };
        animation.timer.advance(delta);
        let t = Ease::Power2Out.apply(animation.timer.progress());
        let from = f32::from(animation.from);
        let to = f32::from(animation.to);
        self.offset = (from + (to - from) * t).round() as u16;
        if animation.timer.is_finished() {
            self.offset = animation.to;
            self.animation = None;
        }
    }

    /// Last section whose top is at or above the viewport's top-third line.
    #[must_use]
    pub fn active_section(&self, page: &Page) -> SectionId {
        let line = self.offset.saturating_add(self.viewport / 3);
        page.sections()
            .iter()
            .take_while(|span| span.top <= line)
            .last()
            .map_or(SectionId::Hero, |span| span.id)
    }
}
