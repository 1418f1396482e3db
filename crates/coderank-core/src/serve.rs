// JSON payloads handed to the dashboard.
//
// These are the response bodies only; nothing in this crate listens on a
// socket. A host wraps them in whatever transport it uses.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{error, info};

use crate::catalog::Catalog;
use crate::mock::mock_models;
use crate::model::{enrich, EnrichedModel};
use crate::storage::{data_age, Store};

pub const LOAD_FAILED: &str = "Failed to load model data";

/// Envelope shared by every endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
            timestamp: Utc::now(),
        }
    }
}

/// One point on the price/score chart.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ChartDataPoint {
    pub name: String,
    pub display_name: String,
    pub input_price: f64,
    pub output_price: f64,
    pub score: i64,
    pub rank: u32,
}

impl From<&EnrichedModel> for ChartDataPoint {
    fn from(m: &EnrichedModel) -> Self {
        Self {
            name: m.name.clone(),
            display_name: m.display_name.clone(),
            input_price: m.pricing.input_price_per_million,
            output_price: m.pricing.output_price_per_million,
            score: m.score,
            rank: m.rank,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelsData {
    pub models: Vec<EnrichedModel>,
    pub chart_data: Vec<ChartDataPoint>,
    pub fetched_at: DateTime<Utc>,
    pub source: String,
}

/// The models payload: the stored bundle, or the mock leaderboard when
/// nothing usable is stored.
pub fn models_response(store: &Store, catalog: &Catalog) -> ApiResponse<ModelsData> {
    let stored = match store.load() {
        Ok(stored) => stored.filter(|b| !b.models.is_empty()),
        Err(e) => {
            error!(error = %e, "loading stored model data");
            return ApiResponse::failure(LOAD_FAILED);
        }
    };

    let (models, fetched_at, source) = match stored {
        Some(bundle) => (bundle.models, bundle.fetched_at, bundle.source_label),
        None => {
            info!("no stored data, serving mock leaderboard");
            let now = Utc::now();
            (
                enrich(&mock_models(), catalog, now),
                now,
                crate::refresh::MOCK_SOURCE_LABEL.to_string(),
            )
        }
    };

    let chart_data = models.iter().map(ChartDataPoint::from).collect();
    ApiResponse::ok(ModelsData {
        models,
        chart_data,
        fetched_at,
        source,
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
    pub data_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fetched_at: Option<DateTime<Utc>>,
    pub data_age: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthStatus {
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }
}

/// Healthy as long as the store can be read; stored data is optional.
pub fn health(store: &Store) -> HealthStatus {
    let now = Utc::now();
    match store.load() {
        Ok(bundle) => HealthStatus {
            status: "healthy",
            timestamp: now,
            data_available: bundle.is_some(),
            fetched_at: bundle.as_ref().map(|b| b.fetched_at),
            data_age: bundle.as_ref().map(|b| data_age(b.fetched_at, now)),
            error: None,
        },
        Err(e) => {
            error!(error = %e, "health check could not read store");
            HealthStatus {
                status: "unhealthy",
                timestamp: now,
                data_available: false,
                fetched_at: None,
                data_age: None,
                error: Some("Service unavailable".to_string()),
            }
        }
    }
}
