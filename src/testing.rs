//! Test fixtures: sample documents, a scripted in-memory API, and an axum
//! mock of the backend served on an ephemeral port.

use async_trait::async_trait;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::api::{ApiError, GtmApi};
use crate::model::{
    CaseStudy, CaseStudyList, ChannelStrategy, CompanyType, CompetitiveAnalysis, Competitor,
    DashboardStats, Framework, FrameworkList, FrameworkPhase, KeyMetrics, MarketResearch,
    MetricList, MetricValue, PricingStrategy, PricingTier, PrimaryChannel, TimelinePhase,
};

pub fn case_study(id: &str, revenue_impact: &str) -> CaseStudy {
    CaseStudy {
        id: id.to_string(),
        company_name: format!("Company {}", id),
        company_type: CompanyType::Startup,
        industry: "SaaS/Cloud Storage".to_string(),
        product_category: "B2B Cloud Solutions".to_string(),
        solution_overview: "Focused GTM strategy for compliance-heavy mid-market".to_string(),
        challenge: "Zero brand recognition in a saturated market".to_string(),
        success_rate: 94.2,
        revenue_impact: revenue_impact.to_string(),
        key_metrics: KeyMetrics {
            customer_acquisition_cost: Some(MetricValue::from("$2,847")),
            customer_lifetime_value: Some(MetricValue::from("$28,450")),
            ltv_cac_ratio: None,
            churn_rate: Some(MetricValue::from("3.2%")),
            monthly_recurring_revenue: Some(MetricValue::from("$847K")),
            net_revenue_retention: None,
        },
        market_research: MarketResearch {
            total_addressable_market: "$47.2B".to_string(),
            serviceable_addressable_market: "$12.8B".to_string(),
            target_segment_size: "$2.1B".to_string(),
            key_insights: vec![],
            primary_research_methods: vec![],
        },
        channel_strategy: ChannelStrategy {
            primary_channels: vec![
                channel("Direct Sales", "65%", "Enterprise deals"),
                channel("Partner Network", "25%", "Compliance consultants"),
                channel("Inbound Marketing", "10%", "Content-driven leads"),
            ],
            sales_methodology: Some("MEDDIC".to_string()),
            average_sales_cycle: Some("4.2 months".to_string()),
        },
        competitive_analysis: CompetitiveAnalysis {
            positioning: "Compliance-first cloud storage".to_string(),
            direct_competitors: vec![
                competitor("Google Drive Business", "34%", "Limited compliance features"),
                competitor("Dropbox Business", "22%", "High enterprise pricing"),
                competitor("OneDrive", "28%", "Complex integration"),
            ],
            competitive_advantage: None,
        },
        execution_timeline: vec![
            TimelinePhase {
                phase: "Pre-Launch".to_string(),
                duration: "3 months".to_string(),
                activities: vec!["Market research".to_string(), "MVP development".to_string()],
            },
            TimelinePhase {
                phase: "Market Entry".to_string(),
                duration: "6 months".to_string(),
                activities: vec!["Full product launch".to_string()],
            },
        ],
        pricing_strategy: PricingStrategy {
            model: "Tiered SaaS".to_string(),
            pricing_tiers: vec![PricingTier {
                name: "Compliance Starter".to_string(),
                price: "$12/user/month".to_string(),
                target: "Small teams".to_string(),
            }],
            pricing_psychology: "15% premium".to_string(),
            discount_strategy: None,
        },
    }
}

fn channel(name: &str, contribution: &str, focus: &str) -> PrimaryChannel {
    PrimaryChannel {
        channel: name.to_string(),
        contribution: contribution.to_string(),
        focus: focus.to_string(),
    }
}

fn competitor(name: &str, share: &str, weakness: &str) -> Competitor {
    Competitor {
        name: name.to_string(),
        market_share: share.to_string(),
        key_weakness: weakness.to_string(),
    }
}

/// Three studies: `$45M`, `$2B` and a malformed `N/A` revenue string
pub fn sample_studies() -> Vec<CaseStudy> {
    let mut mnc = case_study("cs-3", "N/A");
    mnc.company_type = CompanyType::Mnc;
    mnc.success_rate = 91.8;

    vec![case_study("cs-1", "$45M"), case_study("cs-2", "$2B"), mnc]
}

pub fn sample_stats() -> DashboardStats {
    DashboardStats {
        total_case_studies: 3,
        startup_studies: 2,
        mnc_studies: 1,
        average_success_rate: 94.2,
    }
}

pub fn framework(name: &str, phase_count: usize) -> Framework {
    Framework {
        name: name.to_string(),
        description: format!("{} methodology", name),
        success_rate: 94.2,
        use_cases: vec!["B2B SaaS launches".to_string()],
        phases: (1..=phase_count)
            .map(|i| FrameworkPhase {
                phase_name: format!("Phase {}", i),
                duration: "4 weeks".to_string(),
                activities: vec![format!("Activity {}", i)],
                key_deliverables: vec![format!("Deliverable {}", i)],
                success_metrics: vec![format!("Metric {}", i)],
            })
            .collect(),
    }
}

pub fn sample_frameworks() -> Vec<Framework> {
    vec![
        framework("High-Velocity GTM", 4),
        framework("Enterprise Rollout", 5),
    ]
}

pub fn sample_metrics(case_id: &str) -> MetricList {
    MetricList {
        metrics: vec![json!({
            "id": format!("{}-cac", case_id),
            "case_study_id": case_id,
            "metric_name": "Customer Acquisition Cost",
            "metric_value": 2847.0,
            "metric_unit": "USD",
            "time_period": "Q4 2023",
            "category": "pricing"
        })],
    }
}

fn server_error() -> ApiError {
    ApiError::Status {
        status: 500,
        message: "scripted failure".to_string(),
    }
}

/// In-memory [`GtmApi`] with per-endpoint failure switches
///
/// `None` for a document means that endpoint fails with a 500.
pub struct FakeApi {
    pub stats: Option<DashboardStats>,
    pub studies: Option<Vec<CaseStudy>>,
    pub frameworks: Option<Vec<Framework>>,
    pub metrics_ok: bool,
    pub calls: AtomicUsize,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self {
            stats: Some(sample_stats()),
            studies: Some(sample_studies()),
            frameworks: Some(sample_frameworks()),
            metrics_ok: true,
            calls: AtomicUsize::new(0),
        }
    }
}

impl FakeApi {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl GtmApi for FakeApi {
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.hit();
        self.stats.clone().ok_or_else(server_error)
    }

    async fn case_studies(&self) -> Result<CaseStudyList, ApiError> {
        self.hit();
        self.studies
            .clone()
            .map(|case_studies| CaseStudyList { case_studies })
            .ok_or_else(server_error)
    }

    async fn case_study(&self, id: &str) -> Result<CaseStudy, ApiError> {
        self.hit();
        let studies = self.studies.as_ref().ok_or_else(server_error)?;
        studies
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound {
                path: format!("/api/case-studies/{}", id),
            })
    }

    async fn frameworks(&self) -> Result<FrameworkList, ApiError> {
        self.hit();
        self.frameworks
            .clone()
            .map(|frameworks| FrameworkList { frameworks })
            .ok_or_else(server_error)
    }

    async fn case_metrics(&self, id: &str) -> Result<MetricList, ApiError> {
        self.hit();
        if self.metrics_ok {
            Ok(sample_metrics(id))
        } else {
            Err(server_error())
        }
    }
}

/// Failure switches for the HTTP mock
#[derive(Debug, Clone, Default)]
pub struct MockBackend {
    pub fail_case_studies: bool,
    pub garbled_frameworks: bool,
    /// Hold the dashboard-stats response this long before answering
    pub stats_delay: Option<Duration>,
}

/// Serve the sample documents over HTTP; returns the base URL
pub async fn spawn_backend(backend: MockBackend) -> String {
    let app = Router::new()
        .route("/api/dashboard-stats", get(stats_handler))
        .route("/api/case-studies", get(case_studies_handler))
        .route("/api/case-studies/:id", get(case_study_handler))
        .route("/api/frameworks", get(frameworks_handler))
        .route("/api/metrics/:id", get(metrics_handler))
        .with_state(backend);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn stats_handler(State(backend): State<MockBackend>) -> Json<DashboardStats> {
    if let Some(delay) = backend.stats_delay {
        tokio::time::sleep(delay).await;
    }
    Json(sample_stats())
}

async fn case_studies_handler(State(backend): State<MockBackend>) -> Response {
    if backend.fail_case_studies {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "detail": "database unavailable" })),
        )
            .into_response();
    }
    Json(CaseStudyList {
        case_studies: sample_studies(),
    })
    .into_response()
}

async fn case_study_handler(Path(id): Path<String>) -> Response {
    match sample_studies().into_iter().find(|s| s.id == id) {
        Some(study) => Json(study).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "detail": "Case study not found" })),
        )
            .into_response(),
    }
}

async fn frameworks_handler(State(backend): State<MockBackend>) -> Response {
    if backend.garbled_frameworks {
        return (StatusCode::OK, "not json").into_response();
    }
    Json(FrameworkList {
        frameworks: sample_frameworks(),
    })
    .into_response()
}

async fn metrics_handler(Path(id): Path<String>) -> Json<MetricList> {
    Json(sample_metrics(&id))
}
