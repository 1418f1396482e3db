pub mod catalog;
pub mod classify;
pub mod config;
pub mod display;
pub mod error;
pub mod extract;
#[cfg(feature = "network")]
pub mod fetch;
pub mod mock;
pub mod model;
pub mod normalize;
pub mod pricing;
pub mod rank;
pub mod refresh;
pub mod serve;
pub mod storage;
pub mod subscription;

pub use catalog::Catalog;
pub use config::Settings;
pub use display::{resolve_label, ResolvedLabel};
pub use error::{CoderankError, Result};
pub use extract::{extract, RawLeaderboardEntry};
#[cfg(feature = "network")]
pub use fetch::LeaderboardClient;
pub use model::{EnrichedModel, ResolvedModel, StoredBundle};
pub use pricing::{MatchTier, PriceSource, PricingRecord, PricingTable};
pub use refresh::{refresh, RefreshReport, RefreshSource};
pub use storage::Store;
pub use subscription::{SubscriptionPlan, SubscriptionTable};
