//! Mobile navigation toggle.

/// Button that opens and closes the nav.
pub const TOGGLE_SELECTOR: &str = ".nav-toggle";

/// The collapsible nav itself.
pub const NAV_SELECTOR: &str = ".nav";

/// Display value of the collapsible nav.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavDisplay {
    Flex,
    None,
}

impl NavDisplay {
    /// Reads an inline `style.display` value. Anything but `flex` counts as
    /// closed, including the empty string of an unstyled element.
    pub fn from_css(value: &str) -> Self {
        if value.trim() == "flex" {
            NavDisplay::Flex
        } else {
            NavDisplay::None
        }
    }

    pub fn as_css(self) -> &'static str {
        match self {
            NavDisplay::Flex => "flex",
            NavDisplay::None => "none",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            NavDisplay::Flex => NavDisplay::None,
            NavDisplay::None => NavDisplay::Flex,
        }
    }
}

/// The `display` value to set after a click, given the current one.
pub fn toggle_display(current: &str) -> &'static str {
    NavDisplay::from_css(current).toggled().as_css()
}
