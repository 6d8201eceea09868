use std::fmt;

/// Page sections in scroll order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SectionId {
    Hero,
    About,
    Education,
    Services,
    Works,
    Interests,
    Contact,
    Footer,
}

impl SectionId {
    pub const ALL: [SectionId; 8] = [
        SectionId::Hero,
        SectionId::About,
        SectionId::Education,
        SectionId::Services,
        SectionId::Works,
        SectionId::Interests,
        SectionId::Contact,
        SectionId::Footer,
    ];

    /// Sections linked from the navigation bar, with their shortcut digits.
    pub const NAV: [(char, SectionId); 5] = [
        ('1', SectionId::About),
        ('2', SectionId::Education),
        ('3', SectionId::Services),
        ('4', SectionId::Works),
        ('5', SectionId::Contact),
    ];

    #[must_use]
    pub const fn anchor(self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::About => "about",
            SectionId::Education => "education",
            SectionId::Services => "services",
            SectionId::Works => "works",
            SectionId::Interests => "interests",
            SectionId::Contact => "contact",
            SectionId::Footer => "footer",
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            SectionId::Hero => "Home",
            SectionId::About => "About",
            SectionId::Education => "Education",
            SectionId::Services => "Services",
            SectionId::Works => "Works",
            SectionId::Interests => "Interests",
            SectionId::Contact => "Contact",
            SectionId::Footer => "Footer",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_nav_key(key: char) -> Option<Self> {
        Self::NAV
            .iter()
            .find_map(|(digit, section)| (*digit == key).then_some(*section))
    }

    #[must_use]
    pub fn from_anchor(anchor: &str) -> Option<Self> {
        let anchor = anchor.trim_start_matches('#');
        Self::ALL.into_iter().find(|s| s.anchor() == anchor)
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.anchor())
    }
}
