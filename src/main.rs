//! GTM Portfolio CLI
//!
//! Terminal front end for the portfolio backend:
//! - Dashboard overview
//! - Case-study deep dives
//! - GTM framework catalog
//! - Navigation and config helpers

use anyhow::{bail, Context};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use gtm_portfolio::config::{generate_default_config, ConfigError, LoggingConfig};
use gtm_portfolio::format::generate_insight;
use gtm_portfolio::{render, App, Config, GtmClient, Page, Route};

#[derive(Parser)]
#[command(name = "gtm-portfolio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Go-to-market strategy portfolio in the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Backend URL (overrides config and environment)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Config file (default: platform config dir, then ./gtm-portfolio.toml)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Portfolio overview with stats and case-study cards
    Dashboard,

    /// Deep dive into one case study
    CaseStudy {
        /// Case study id
        id: String,
    },

    /// GTM framework catalog
    Frameworks {
        /// Framework number to show (as listed, starting at 1)
        #[arg(short, long)]
        select: Option<usize>,
    },

    /// Open any client route, e.g. /case-study/abc
    Open {
        /// Route path
        path: String,
    },

    /// Show navigation links
    Nav {
        /// Path used for highlighting the current link
        #[arg(short, long, default_value = "/")]
        path: String,
    },

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("gtm_portfolio={}", config.level)));
    let registry = tracing_subscriber::registry().with(filter);

    if config.is_json() {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Config plus default-path files that failed to load
fn load_config(cli: &Cli) -> anyhow::Result<(Config, Vec<ConfigError>)> {
    let (mut config, skipped) = match &cli.config {
        Some(path) => {
            let config = Config::load_with_env(path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            (config, Vec::new())
        }
        None => Config::load_default(),
    };

    if let Some(url) = &cli.api_url {
        config.api.base_url = url.clone();
    }
    Ok((config, skipped))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let (config, skipped) = load_config(&cli)?;
    init_logging(&config.logging);
    for err in &skipped {
        tracing::warn!("Ignoring config: {}", err);
    }

    let path = match &cli.command {
        Commands::Config { output } => {
            let content = generate_default_config();
            match output {
                Some(path) => {
                    std::fs::write(path, content)
                        .with_context(|| format!("writing config to {}", path.display()))?;
                    println!("Config written to {}", path.display());
                }
                None => print!("{}", content),
            }
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Nav { path } => {
            let mut app = App::new();
            app.navigate(path)?;
            print_nav(&app, cli.format)?;
            return Ok(ExitCode::SUCCESS);
        }
        Commands::Dashboard => Route::Dashboard.path(),
        Commands::CaseStudy { id } => Route::CaseStudy(id.clone()).path(),
        Commands::Frameworks { .. } => Route::Frameworks.path(),
        Commands::Open { path } => path.clone(),
    };

    tracing::info!("Using backend {}", config.api.base_url);
    let client = GtmClient::new(config.api.base_url.as_str())?;

    let mut app = App::new();
    app.open(&path, &client).await?;

    if let Some(err) = app.page().error() {
        let mut message = String::new();
        render::render_error(&mut message, err)?;
        eprint!("{}", message);
        return Ok(ExitCode::FAILURE);
    }

    if let Commands::Frameworks {
        select: Some(number),
    } = cli.command
    {
        let selected = match app.page_mut() {
            Page::Frameworks(page) => number
                .checked_sub(1)
                .map(|index| page.select(index))
                .unwrap_or(false),
            _ => false,
        };
        if !selected {
            bail!("No framework number {}", number);
        }
    }

    match cli.format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&render::app_json(&app))?);
        }
        OutputFormat::Text => {
            print!("{}", render::render_app(&app)?);
            if let Page::CaseStudy(page) = app.page() {
                if let Some(insight) = page
                    .state()
                    .data()
                    .and_then(|data| generate_insight(&data.case_study, &mut rand::rng()))
                {
                    println!();
                    println!("Insight: {}", insight);
                }
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

fn print_nav(app: &App, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&app.nav_items())?);
        }
        OutputFormat::Text => {
            let mut out = String::new();
            render::render_nav(&mut out, &app.nav_items())?;
            print!("{}", out);
        }
    }
    Ok(())
}
