use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::display::title_case;
use crate::pricing::PricingRecord;
use crate::subscription::SubscriptionPlan;

pub const SCHEMA_VERSION: &str = "1.0.0";

/// A leaderboard model after ranking: contiguous rank, derived score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedModel {
    pub rank: u32,
    pub name: String,
    pub score: i64,
    pub organization: String,
    pub license: String,
}

/// A ranked model joined with its pricing and subscription data. This is
/// the unit that gets stored and served.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedModel {
    pub rank: u32,
    pub name: String,
    pub display_name: String,
    pub score: i64,
    pub organization: String,
    pub license: String,
    pub pricing: PricingRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<SubscriptionPlan>,
    pub last_updated: DateTime<Utc>,
}

/// Everything one refresh pass produced, as written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoredBundle {
    pub models: Vec<EnrichedModel>,
    pub fetched_at: DateTime<Utc>,
    pub source_label: String,
    pub schema_version: String,
}

/// License shown for an organization's models. Only DeepSeek publishes
/// its leaderboard models under an open license.
pub fn license_for(organization: &str) -> &'static str {
    match organization {
        "DeepSeek" => "MIT",
        _ => "Proprietary",
    }
}

/// `claude-3-opus` -> `Claude 3 Opus`.
pub fn display_name(name: &str) -> String {
    title_case(&name.replace('-', " "))
}

/// Attach pricing and subscription data. Misses degrade to the unknown
/// sentinel / no plan; nothing here fails.
pub fn enrich(models: &[ResolvedModel], catalog: &Catalog, now: DateTime<Utc>) -> Vec<EnrichedModel> {
    models
        .iter()
        .map(|m| EnrichedModel {
            rank: m.rank,
            name: m.name.clone(),
            display_name: display_name(&m.name),
            score: m.score,
            organization: m.organization.clone(),
            license: m.license.clone(),
            pricing: catalog.find_pricing(&m.name),
            subscription: catalog.find_subscription(&m.organization).cloned(),
            last_updated: now,
        })
        .collect()
}
