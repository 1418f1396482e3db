use serde::{Deserialize, Serialize};

use crate::error::{CoderankError, Result};

/// One paid (or free) tier of a consumer plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionTier {
    pub name: String,
    /// USD per month, 0 for the free tier.
    #[serde(alias = "price")]
    pub monthly_price: f64,
    pub features: Vec<String>,
}

/// Web subscription offered by an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionPlan {
    pub provider: String,
    #[serde(alias = "web_url")]
    pub web_url: String,
    pub tiers: Vec<SubscriptionTier>,
    #[serde(default, alias = "model_access")]
    pub model_access: Vec<String>,
}

impl SubscriptionPlan {
    pub fn free_tier(&self) -> Option<&SubscriptionTier> {
        self.tiers.iter().find(|t| t.monthly_price == 0.0)
    }

    /// Cheapest tier that costs money.
    pub fn cheapest_paid(&self) -> Option<&SubscriptionTier> {
        self.tiers
            .iter()
            .filter(|t| t.monthly_price > 0.0)
            .min_by(|a, b| {
                a.monthly_price
                    .partial_cmp(&b.monthly_price)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
    }
}

#[derive(Debug, Deserialize)]
struct SubscriptionFile {
    plan: Vec<SubscriptionPlan>,
}

/// Subscription plans keyed by organization label.
#[derive(Debug, Clone, Default)]
pub struct SubscriptionTable {
    plans: Vec<SubscriptionPlan>,
}

impl SubscriptionTable {
    pub fn new(plans: Vec<SubscriptionPlan>) -> Result<Self> {
        for plan in &plans {
            if let Some(tier) = plan.tiers.iter().find(|t| t.monthly_price < 0.0) {
                return Err(CoderankError::Data(format!(
                    "{}: tier {} has a negative price",
                    plan.provider, tier.name
                )));
            }
        }
        Ok(Self { plans })
    }

    pub fn plans(&self) -> &[SubscriptionPlan] {
        &self.plans
    }

    /// Plan for an organization. Exact match on the classifier's label.
    pub fn find(&self, organization: &str) -> Option<&SubscriptionPlan> {
        self.plans.iter().find(|p| p.provider == organization)
    }
}

/// Parse subscription plans from TOML (`[[plan]]` with nested `[[plan.tiers]]`).
pub fn parse_subscriptions(toml_str: &str) -> Result<SubscriptionTable> {
    let file: SubscriptionFile = toml::from_str(toml_str)
        .map_err(|e| CoderankError::Data(format!("bad subscriptions.toml: {e}")))?;
    SubscriptionTable::new(file.plan)
}

/// Load the bundled subscriptions.toml from the data/ directory.
pub fn load_bundled_subscriptions() -> Result<SubscriptionTable> {
    let toml_str = include_str!("../../../data/subscriptions.toml");
    parse_subscriptions(toml_str)
}
