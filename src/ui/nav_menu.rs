//! Collapsible navigation menu state.

/// Where a click landed relative to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    /// The hamburger button.
    Hamburger,
    /// A link inside the menu.
    MenuLink,
    /// Inside the menu but not on a link.
    MenuBody,
    /// Anywhere else on the page.
    Outside,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NavMenu {
    open: bool,
}

impl NavMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    /// Applies a click. The hamburger toggles; a link or an outside click
    /// closes; a click on the menu body leaves the state alone.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Hamburger => {
                self.toggle();
            }
            ClickTarget::MenuLink | ClickTarget::Outside => self.open = false,
            ClickTarget::MenuBody => {}
        }
        self.open
    }
}
