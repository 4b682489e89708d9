//! Navigation Shell
//!
//! Persistent header: a fixed set of links, plus the open/closed state of
//! the mobile menu. The menu closes whenever a link is followed or the
//! backdrop behind it is clicked.

use serde::Serialize;

/// A header link target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEntry {
    pub name: &'static str,
    pub href: &'static str,
}

/// Header links, in display order
pub const NAV_ENTRIES: [NavEntry; 3] = [
    NavEntry {
        name: "Dashboard",
        href: "/",
    },
    NavEntry {
        name: "Case Studies",
        href: "/#case-studies",
    },
    NavEntry {
        name: "GTM Frameworks",
        href: "/frameworks",
    },
];

/// Static highlight badges shown next to the links
pub const NAV_BADGES: [&str; 2] = ["94.2% Success Rate", "$150M+ Revenue Impact"];

/// A header link with its highlight state
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub name: &'static str,
    pub href: &'static str,
    pub current: bool,
}

#[derive(Debug, Default)]
pub struct NavShell {
    menu_open: bool,
}

impl NavShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) {
        self.menu_open = !self.menu_open;
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Follow a link: closes the menu and yields the target path
    pub fn activate(&mut self, entry: &NavEntry) -> &'static str {
        self.close_menu();
        entry.href
    }

    /// Backdrop click; returns whether it closed the menu
    pub fn backdrop_clicked(&mut self) -> bool {
        let was_open = self.menu_open;
        self.close_menu();
        was_open
    }

    /// Links with `current` set where the href equals `current_path`
    pub fn items(&self, current_path: &str) -> Vec<NavItem> {
        NAV_ENTRIES
            .iter()
            .map(|entry| NavItem {
                name: entry.name,
                href: entry.href,
                current: entry.href == current_path,
            })
            .collect()
    }
}
