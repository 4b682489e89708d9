//! Terminal rendering
//!
//! Text and JSON views of the navigation shell and the active page. Charts
//! come out as labelled `#` bars scaled to the largest value in the series.

use serde_json::{json, Value};
use std::fmt::{self, Write};

use crate::app::{App, Page};
use crate::nav::{NavItem, NAV_BADGES};
use crate::pages::{CaseStudyData, DashboardData, FrameworksData, LoadState, PageError, StatTile};

const BAR_WIDTH: usize = 30;

/// `#` bar for `value` relative to `max`
fn bar(value: f64, max: f64) -> String {
    if value.is_nan() || max.is_nan() || value <= 0.0 || max <= 0.0 {
        return String::new();
    }
    let len = ((value / max) * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.clamp(1, BAR_WIDTH))
}

fn render_tiles<W: Write>(out: &mut W, tiles: &[StatTile]) -> fmt::Result {
    for tile in tiles {
        match &tile.subtitle {
            Some(sub) => writeln!(out, "  {:<28} {:>12}  ({})", tile.title, tile.value, sub)?,
            None => writeln!(out, "  {:<28} {:>12}", tile.title, tile.value)?,
        }
    }
    Ok(())
}

fn render_state<W, T, F>(out: &mut W, state: &LoadState<T>, ready: F) -> fmt::Result
where
    W: Write,
    F: FnOnce(&mut W, &T) -> fmt::Result,
{
    match state {
        LoadState::Idle | LoadState::Loading => writeln!(out, "Loading..."),
        LoadState::Error(err) => render_error(out, err),
        LoadState::Ready(data) => ready(out, data),
    }
}

/// Error message followed by the way out the page offers
pub fn render_error<W: Write>(out: &mut W, err: &PageError) -> fmt::Result {
    writeln!(out, "Error: {}", err.message)?;
    if err.retryable {
        writeln!(out, "Retry to reload this page.")?;
    }
    if let Some(route) = &err.back_link {
        writeln!(out, "Back to {}", route)?;
    }
    Ok(())
}

pub fn render_nav<W: Write>(out: &mut W, items: &[NavItem]) -> fmt::Result {
    write!(out, "GTM Portfolio |")?;
    for item in items {
        if item.current {
            write!(out, " [{}]", item.name)?;
        } else {
            write!(out, " {}", item.name)?;
        }
    }
    writeln!(out, " | {}", NAV_BADGES.join(" | "))
}

pub fn render_dashboard<W: Write>(out: &mut W, data: &DashboardData) -> fmt::Result {
    writeln!(out, "GTM Strategy Dashboard")?;
    writeln!(out)?;
    render_tiles(out, &data.stat_tiles())?;

    writeln!(out)?;
    writeln!(out, "Case Studies")?;
    for card in data.cards() {
        writeln!(out)?;
        writeln!(
            out,
            "  {} [{}] {}",
            card.company_name, card.company_type, card.industry
        )?;
        writeln!(
            out,
            "    Success rate {} ({})  Revenue impact {}",
            card.success_rate,
            card.success_tier.label(),
            card.revenue_impact
        )?;
        writeln!(out, "    {}", card.challenge)?;
        writeln!(
            out,
            "    CAC {}  MRR {}  Churn {}",
            card.customer_acquisition_cost, card.monthly_recurring_revenue, card.churn_rate
        )?;
        writeln!(out, "    -> {}", card.link)?;
    }

    let summary = data.revenue_summary();
    if !summary.excluded.is_empty() {
        writeln!(out)?;
        writeln!(
            out,
            "Not counted in revenue impact: {}",
            summary.excluded.join(", ")
        )?;
    }
    Ok(())
}

pub fn render_case_study<W: Write>(out: &mut W, data: &CaseStudyData) -> fmt::Result {
    let study = &data.case_study;

    writeln!(
        out,
        "{} [{}]",
        study.company_name,
        study.company_type.as_str().to_uppercase()
    )?;
    writeln!(out, "{} | {}", study.industry, study.product_category)?;
    writeln!(
        out,
        "Success rate {:.1}%  Revenue impact {}",
        study.success_rate, study.revenue_impact
    )?;
    writeln!(out)?;
    writeln!(out, "Challenge: {}", study.challenge)?;
    writeln!(out, "Solution: {}", study.solution_overview)?;

    writeln!(out)?;
    writeln!(out, "Key Metrics")?;
    render_tiles(out, &data.key_metric_tiles())?;

    let market = data.market_research_chart();
    let max = market.iter().map(|p| p.value).fold(0.0, f64::max);
    writeln!(out)?;
    writeln!(out, "Market Size ($B)")?;
    for point in &market {
        writeln!(
            out,
            "  {:<8} {:>8.1} {}",
            point.name,
            point.value,
            bar(point.value, max)
        )?;
    }
    for insight in &study.market_research.key_insights {
        writeln!(out, "  * {}", insight)?;
    }

    let channels = data.channel_chart();
    let max = channels.iter().map(|c| c.value as f64).fold(0.0, f64::max);
    writeln!(out)?;
    writeln!(out, "Channel Mix")?;
    for slice in &channels {
        writeln!(
            out,
            "  {:<18} {:>3}% {}  {}",
            slice.name,
            slice.value,
            bar(slice.value as f64, max),
            slice.focus
        )?;
    }
    if let Some(method) = &study.channel_strategy.sales_methodology {
        writeln!(out, "  Sales methodology: {}", method)?;
    }
    if let Some(cycle) = &study.channel_strategy.average_sales_cycle {
        writeln!(out, "  Average sales cycle: {}", cycle)?;
    }

    let competitors = data.competitor_chart();
    let max = competitors.iter().map(|c| c.share).fold(0.0, f64::max);
    writeln!(out)?;
    writeln!(
        out,
        "Competitive Landscape ({})",
        study.competitive_analysis.positioning
    )?;
    for comp in &competitors {
        writeln!(
            out,
            "  {:<18} {:>5.1}% {}  {}",
            comp.name,
            comp.share,
            bar(comp.share, max),
            comp.weakness
        )?;
    }
    if let Some(advantage) = &study.competitive_analysis.competitive_advantage {
        writeln!(out, "  Advantage: {}", advantage)?;
    }

    writeln!(out)?;
    writeln!(out, "Execution Timeline")?;
    for step in data.timeline() {
        writeln!(
            out,
            "  {}. {} ({}, {} activities)",
            step.order, step.phase, step.duration, step.activity_count
        )?;
        for activity in &step.activities {
            writeln!(out, "     - {}", activity)?;
        }
    }

    let pricing = &study.pricing_strategy;
    writeln!(out)?;
    writeln!(out, "Pricing: {}", pricing.model)?;
    for tier in &pricing.pricing_tiers {
        writeln!(out, "  {:<22} {:<18} {}", tier.name, tier.price, tier.target)?;
    }
    if !pricing.pricing_psychology.is_empty() {
        writeln!(out, "  {}", pricing.pricing_psychology)?;
    }
    if let Some(discounts) = &pricing.discount_strategy {
        writeln!(out, "  Discounts: {}", discounts)?;
    }

    let metrics = data.typed_metrics();
    if !metrics.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recorded Metrics")?;
        for m in metrics {
            writeln!(
                out,
                "  {:<30} {} {} ({})",
                m.metric_name, m.metric_value, m.metric_unit, m.time_period
            )?;
        }
    }
    Ok(())
}

pub fn render_frameworks<W: Write>(out: &mut W, data: &FrameworksData) -> fmt::Result {
    writeln!(out, "GTM Frameworks")?;
    writeln!(out)?;

    if data.frameworks.is_empty() {
        return writeln!(out, "No frameworks available.");
    }

    for (i, framework) in data.frameworks.iter().enumerate() {
        let marker = if data.selected_index() == Some(i) { ">" } else { " " };
        writeln!(
            out,
            "{} {}. {} ({:.1}% success)",
            marker,
            i + 1,
            framework.name,
            framework.success_rate
        )?;
    }

    let Some(selected) = data.selected() else {
        return Ok(());
    };

    writeln!(out)?;
    writeln!(out, "{}", selected.name)?;
    writeln!(out, "{}", selected.description)?;
    if !selected.use_cases.is_empty() {
        writeln!(out, "Use cases: {}", selected.use_cases.join(", "))?;
    }

    for card in data.phase_cards() {
        writeln!(out)?;
        writeln!(
            out,
            "  Phase {}: {} ({}) [{}]",
            card.number, card.name, card.duration, card.accent
        )?;
        for (label, list) in [
            ("Activities", &card.activities),
            ("Deliverables", &card.key_deliverables),
            ("Success metrics", &card.success_metrics),
        ] {
            if !list.is_empty() {
                writeln!(out, "    {}: {}", label, list.join("; "))?;
            }
        }
        if card.has_next {
            writeln!(out, "    |")?;
        }
    }
    Ok(())
}

pub fn render_page<W: Write>(out: &mut W, page: &Page) -> fmt::Result {
    match page {
        Page::Dashboard(p) => render_state(out, p.state(), |out, d| render_dashboard(out, d)),
        Page::CaseStudy(p) => render_state(out, p.state(), |out, d| render_case_study(out, d)),
        Page::Frameworks(p) => render_state(out, p.state(), |out, d| render_frameworks(out, d)),
    }
}

/// Navigation header followed by the active page
pub fn render_app(app: &App) -> Result<String, fmt::Error> {
    let mut out = String::new();
    render_nav(&mut out, &app.nav_items())?;
    writeln!(out)?;
    render_page(&mut out, app.page())?;
    Ok(out)
}

fn state_json<T, F>(state: &LoadState<T>, ready: F) -> Value
where
    F: FnOnce(&T) -> Value,
{
    match state {
        LoadState::Idle => json!({ "state": "idle" }),
        LoadState::Loading => json!({ "state": "loading" }),
        LoadState::Error(err) => json!({ "state": "error", "error": err }),
        LoadState::Ready(data) => json!({ "state": "ready", "data": ready(data) }),
    }
}

pub fn dashboard_json(data: &DashboardData) -> Value {
    json!({
        "stats": data.stats,
        "tiles": data.stat_tiles(),
        "revenue": data.revenue_summary(),
        "cards": data.cards(),
    })
}

pub fn case_study_json(data: &CaseStudyData) -> Value {
    json!({
        "case_study": data.case_study,
        "key_metrics": data.key_metric_tiles(),
        "market_research": data.market_research_chart(),
        "channels": data.channel_chart(),
        "competitors": data.competitor_chart(),
        "timeline": data.timeline(),
        "metrics": data.metrics.metrics,
    })
}

pub fn frameworks_json(data: &FrameworksData) -> Value {
    json!({
        "frameworks": data.frameworks,
        "selected": data.selected_index(),
        "phases": data.phase_cards(),
    })
}

/// Derived view data of the active page
pub fn page_json(page: &Page) -> Value {
    match page {
        Page::Dashboard(p) => state_json(p.state(), dashboard_json),
        Page::CaseStudy(p) => state_json(p.state(), case_study_json),
        Page::Frameworks(p) => state_json(p.state(), frameworks_json),
    }
}

pub fn app_json(app: &App) -> Value {
    json!({
        "route": app.route(),
        "nav": app.nav_items(),
        "page": page_json(app.page()),
    })
}
