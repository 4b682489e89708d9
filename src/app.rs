//! App Root
//!
//! Client-side routing over the three pages, with the navigation shell
//! kept across page switches.
//!
//! | Path               | Page              |
//! |--------------------|-------------------|
//! | `/`                | [`DashboardPage`] |
//! | `/case-study/:id`  | [`CaseStudyPage`] |
//! | `/frameworks`      | [`FrameworksPage`]|

use serde::Serialize;
use std::fmt;

use crate::api::GtmApi;
use crate::nav::{NavEntry, NavItem, NavShell};
use crate::pages::{CaseStudyPage, DashboardPage, FrameworksPage, LoadState, PageError};

/// A client-side route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum Route {
    Dashboard,
    CaseStudy(String),
    Frameworks,
}

impl Route {
    /// Match a path against the route table
    ///
    /// Query strings and fragments are ignored, as is a trailing slash.
    pub fn parse(path: &str) -> Option<Route> {
        let path = path.split(|c: char| c == '?' || c == '#').next().unwrap_or("");
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };

        match path {
            "" | "/" => Some(Route::Dashboard),
            "/frameworks" => Some(Route::Frameworks),
            _ => {
                let raw = path.strip_prefix("/case-study/")?;
                if raw.is_empty() || raw.contains('/') {
                    return None;
                }
                let id = urlencoding::decode(raw).ok()?;
                Some(Route::CaseStudy(id.into_owned()))
            }
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Dashboard => "/".to_string(),
            Route::CaseStudy(id) => format!("/case-study/{}", urlencoding::encode(id)),
            Route::Frameworks => "/frameworks".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

impl From<Route> for String {
    fn from(route: Route) -> Self {
        route.path()
    }
}

/// App-level errors
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("No page matches {0}")]
    UnknownRoute(String),
}

/// The active page
#[derive(Debug)]
pub enum Page {
    Dashboard(DashboardPage),
    CaseStudy(CaseStudyPage),
    Frameworks(FrameworksPage),
}

impl Page {
    fn for_route(route: &Route) -> Self {
        match route {
            Route::Dashboard => Page::Dashboard(DashboardPage::new()),
            Route::CaseStudy(id) => Page::CaseStudy(CaseStudyPage::new(id.clone())),
            Route::Frameworks => Page::Frameworks(FrameworksPage::new()),
        }
    }

    fn is_idle(&self) -> bool {
        match self {
            Page::Dashboard(p) => matches!(p.state(), LoadState::Idle),
            Page::CaseStudy(p) => matches!(p.state(), LoadState::Idle),
            Page::Frameworks(p) => matches!(p.state(), LoadState::Idle),
        }
    }

    /// The page's failure, if its last load ended in error
    pub fn error(&self) -> Option<&PageError> {
        match self {
            Page::Dashboard(p) => p.state().error(),
            Page::CaseStudy(p) => p.state().error(),
            Page::Frameworks(p) => p.state().error(),
        }
    }
}

/// Router plus navigation shell
#[derive(Debug)]
pub struct App {
    nav: NavShell,
    route: Route,
    page: Page,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    /// Start on the dashboard, nothing loaded yet
    pub fn new() -> Self {
        Self {
            nav: NavShell::new(),
            route: Route::Dashboard,
            page: Page::Dashboard(DashboardPage::new()),
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    pub fn nav(&self) -> &NavShell {
        &self.nav
    }

    pub fn nav_mut(&mut self) -> &mut NavShell {
        &mut self.nav
    }

    /// Header links highlighted for the current route
    pub fn nav_items(&self) -> Vec<NavItem> {
        self.nav.items(&self.route.path())
    }

    /// Switch to the page for `path`
    ///
    /// Closes the mobile menu. Staying on the same route keeps the page
    /// state; moving between case studies reuses the detail page with the
    /// new id. Returns whether the active page now needs a load.
    pub fn navigate(&mut self, path: &str) -> Result<bool, AppError> {
        let route =
            Route::parse(path).ok_or_else(|| AppError::UnknownRoute(path.to_string()))?;
        self.nav.close_menu();

        tracing::debug!(from = %self.route, to = %route, "Navigating");

        let keeps_page = route == self.route
            || matches!(
                (&self.page, &route),
                (Page::CaseStudy(_), Route::CaseStudy(_))
            );

        let needs_load = if !keeps_page {
            self.page = Page::for_route(&route);
            true
        } else if let (Page::CaseStudy(page), Route::CaseStudy(id)) = (&mut self.page, &route) {
            page.set_id(id.clone())
        } else {
            false
        };
        self.route = route;

        Ok(needs_load || self.page.is_idle())
    }

    /// Follow a header link
    pub fn follow(&mut self, entry: &NavEntry) -> Result<bool, AppError> {
        let href = self.nav.activate(entry);
        self.navigate(href)
    }

    /// Run the active page's load
    pub async fn load<A: GtmApi + ?Sized>(&mut self, api: &A) {
        match &mut self.page {
            Page::Dashboard(page) => page.load(api).await,
            Page::CaseStudy(page) => page.load(api).await,
            Page::Frameworks(page) => page.load(api).await,
        }
    }

    /// Retry the active page; the detail page offers a back link instead
    pub async fn retry<A: GtmApi + ?Sized>(&mut self, api: &A) -> bool {
        match &mut self.page {
            Page::Dashboard(page) => page.retry(api).await,
            Page::Frameworks(page) => page.retry(api).await,
            Page::CaseStudy(_) => false,
        }
    }

    /// Navigate to `path` and load the page if it needs it
    pub async fn open<A: GtmApi + ?Sized>(&mut self, path: &str, api: &A) -> Result<(), AppError> {
        if self.navigate(path)? {
            self.load(api).await;
        }
        Ok(())
    }
}
