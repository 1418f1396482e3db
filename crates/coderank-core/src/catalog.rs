use crate::error::Result;
use crate::pricing::{self, PricingRecord, PricingTable};
use crate::subscription::{self, SubscriptionPlan, SubscriptionTable};

/// The static reference data: pricing and subscription tables.
///
/// Loaded once at startup and passed by reference to whatever needs it;
/// nothing mutates it afterwards, so it can be shared across threads freely.
#[derive(Debug, Clone)]
pub struct Catalog {
    pub pricing: PricingTable,
    pub subscriptions: SubscriptionTable,
}

impl Catalog {
    pub fn new(pricing: PricingTable, subscriptions: SubscriptionTable) -> Self {
        Self {
            pricing,
            subscriptions,
        }
    }

    /// Catalog built from the tables in data/.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(
            pricing::load_bundled_pricing()?,
            subscription::load_bundled_subscriptions()?,
        ))
    }

    pub fn find_pricing(&self, model_name: &str) -> PricingRecord {
        self.pricing.find_pricing(model_name)
    }

    pub fn find_subscription(&self, organization: &str) -> Option<&SubscriptionPlan> {
        self.subscriptions.find(organization)
    }
}
