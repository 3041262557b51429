//! Display font scaling

/// Font size applied to the display for a given text length
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayScale {
    /// Up to 10 characters; the stylesheet default applies
    Default,
    /// 11 to 15 characters
    Xxl,
    /// More than 15 characters
    Xl,
}

impl DisplayScale {
    /// Picks the scale for a display string (counted in characters)
    #[must_use]
    pub fn for_text(text: &str) -> Self {
        match text.chars().count() {
            0..=10 => Self::Default,
            11..=15 => Self::Xxl,
            _ => Self::Xl,
        }
    }

    /// Inline `font-size` value, `None` for the stylesheet default
    #[must_use]
    pub const fn font_size(&self) -> Option<&'static str> {
        match self {
            Self::Default => None,
            Self::Xxl => Some("var(--font-size-xxl)"),
            Self::Xl => Some("var(--font-size-xl)"),
        }
    }
}
