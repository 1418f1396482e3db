use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::error::{CoderankError, Result};
use crate::extract::{extract, CODING_COLUMN};
#[cfg(feature = "network")]
use crate::fetch::LeaderboardClient;
use crate::mock::mock_models;
use crate::model::{enrich, EnrichedModel, ResolvedModel};
use crate::rank::top_n;
use crate::storage::Store;

/// Source label recorded for bundles built from the mock leaderboard.
pub const MOCK_SOURCE_LABEL: &str = "mock";

/// Where a refresh pass gets its leaderboard from.
pub enum RefreshSource<'a> {
    #[cfg(feature = "network")]
    Live(&'a LeaderboardClient),
    Mock,
    /// Already-fetched page HTML and the label to record for it.
    Html { html: &'a str, source_label: &'a str },
}

/// What a successful pass stored.
#[derive(Debug, Clone)]
pub struct RefreshReport {
    pub models: Vec<EnrichedModel>,
    pub priced: usize,
    pub source_label: String,
    pub fetched_at: DateTime<Utc>,
}

fn rank_page(html: &str, n: usize) -> Result<Vec<ResolvedModel>> {
    let entries = extract(html);
    if entries.is_empty() {
        return Err(CoderankError::ExtractionEmpty {
            column: CODING_COLUMN.to_string(),
        });
    }
    Ok(top_n(&entries, n))
}

/// One full pass: read the leaderboard, rank, enrich, save, verify.
///
/// Any failure before the save leaves the stored bundle untouched. Running
/// the pass twice on the same page stores the same models.
pub async fn refresh(
    source: RefreshSource<'_>,
    store: &Store,
    catalog: &Catalog,
    n: usize,
) -> Result<RefreshReport> {
    let (models, source_label) = match source {
        #[cfg(feature = "network")]
        RefreshSource::Live(client) => {
            let html = client.fetch_html().await?;
            (rank_page(&html, n)?, client.url().to_string())
        }
        RefreshSource::Mock => {
            let mut models = mock_models();
            models.truncate(n);
            (models, MOCK_SOURCE_LABEL.to_string())
        }
        RefreshSource::Html { html, source_label } => {
            (rank_page(html, n)?, source_label.to_string())
        }
    };

    if models.is_empty() {
        warn!(source = %source_label, "no models found, keeping existing data");
        return Err(CoderankError::ExtractionEmpty {
            column: CODING_COLUMN.to_string(),
        });
    }
    info!(source = %source_label, models = models.len(), "ranked leaderboard");

    let enriched = enrich(&models, catalog, Utc::now());
    let priced = enriched.iter().filter(|m| m.pricing.is_known()).count();
    for m in enriched.iter().filter(|m| !m.pricing.is_known()) {
        warn!(model = %m.name, "no pricing data");
    }
    info!(priced, total = enriched.len(), "pricing coverage");

    let bundle = store.save(&enriched, &source_label)?;

    match store.load()? {
        Some(saved) if saved.models.len() == enriched.len() => {}
        Some(saved) => {
            return Err(CoderankError::Verification(format!(
                "expected {} models, found {}",
                enriched.len(),
                saved.models.len()
            )))
        }
        None => {
            return Err(CoderankError::Verification(format!(
                "{} unreadable after save",
                store.path().display()
            )))
        }
    }

    Ok(RefreshReport {
        models: bundle.models,
        priced,
        source_label: bundle.source_label,
        fetched_at: bundle.fetched_at,
    })
}
