//! # GTM Portfolio
//!
//! Typed client and page view-models for a go-to-market strategy portfolio:
//! case studies with their metrics, charts and timelines, plus a catalog of
//! GTM frameworks.
//!
//! ## Modules
//!
//! - [`format`]: Display formatting for currency, percentages and style tokens
//! - [`model`]: Documents returned by the backend
//! - [`api`]: REST client for the backend with reqwest
//! - [`pages`]: Dashboard, case-study and framework view-models
//! - [`nav`]: Navigation header and mobile menu state
//! - [`app`]: Routing and page composition
//! - [`render`]: Text and JSON output for terminals
//! - [`config`]: TOML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gtm_portfolio::{render, App, GtmClient};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = GtmClient::new("http://localhost:8001")?;
//!     let mut app = App::new();
//!
//!     app.open("/", &client).await?;
//!     println!("{}", render::render_app(&app)?);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod app;
pub mod config;
pub mod format;
pub mod model;
pub mod nav;
pub mod pages;
pub mod render;

#[cfg(test)]
mod testing;

pub use api::{ApiError, GtmApi, GtmClient, DEFAULT_BASE_URL, REQUEST_TIMEOUT};
pub use app::{App, AppError, Page, Route};
pub use config::{Config, ConfigError};
pub use nav::{NavEntry, NavItem, NavShell, NAV_ENTRIES};
pub use pages::{
    CaseStudyData, CaseStudyPage, DashboardData, DashboardPage, FrameworksData, FrameworksPage,
    LoadState, LoadTicket, PageError,
};
