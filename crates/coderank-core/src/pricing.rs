// API pricing lookup.
//
// The table is matched in three tiers, each tried only when the previous one
// found nothing: exact key, substring containment in table order, then the
// ordered family patterns below. The first hit wins; there is no scoring
// across tiers.

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CoderankError, Result};
use crate::normalize::normalize;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PriceSource {
    Official,
    Estimated,
    Unknown,
}

/// USD per 1M tokens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingRecord {
    pub input_price_per_million: f64,
    pub output_price_per_million: f64,
    pub source: PriceSource,
}

impl PricingRecord {
    /// Returned when nothing matched. Shown as "N/A", never as a free model.
    pub const UNKNOWN: PricingRecord = PricingRecord {
        input_price_per_million: 0.0,
        output_price_per_million: 0.0,
        source: PriceSource::Unknown,
    };

    pub fn is_known(&self) -> bool {
        self.source != PriceSource::Unknown
    }

    /// `$2.5/$10` style label, or `N/A` for the sentinel.
    pub fn price_label(&self) -> String {
        if self.is_known() {
            format!(
                "${}/${}",
                self.input_price_per_million, self.output_price_per_million
            )
        } else {
            "N/A".to_string()
        }
    }
}

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTier {
    Exact,
    Substring,
    Family,
    Unmatched,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exact => write!(f, "exact"),
            Self::Substring => write!(f, "substring"),
            Self::Family => write!(f, "family"),
            Self::Unmatched => write!(f, "unmatched"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PricingMatch {
    pub key: Option<String>,
    pub record: PricingRecord,
    pub tier: MatchTier,
}

impl PricingMatch {
    fn unmatched() -> Self {
        Self {
            key: None,
            record: PricingRecord::UNKNOWN,
            tier: MatchTier::Unmatched,
        }
    }
}

/// Fallback spellings for whole model families, mapped to a table key.
/// Variant-qualified patterns ("gpt-5.2 high", "grok 4.1 thinking") sit above
/// their parent pattern; "deepseek.*coder" sits above the other DeepSeek
/// entries. First match wins, so reordering changes prices.
pub const FAMILY_PATTERNS: &[(&str, &str)] = &[
    // GPT-5.x
    (r"gpt-5\.2.*high", "gpt-5.2-high"),
    (r"gpt-5\.2", "gpt-5.2"),
    (r"gpt-5.*medium", "gpt-5-medium"),
    (r"gpt-5", "gpt-5"),
    // GPT-4.x
    (r"gpt-4o", "gpt-4o"),
    (r"gpt-4", "gpt-4-turbo"),
    // Claude 4.x
    (r"claude.*opus.*4\.5", "claude-opus-4.5"),
    (r"claude.*sonnet.*4\.5", "claude-sonnet-4.5"),
    (r"claude.*opus.*4\.1", "claude-opus-4.1"),
    (r"claude.*sonnet.*4\.1", "claude-sonnet-4.1"),
    // Claude 3.x
    (r"claude.*sonnet", "claude-3.5-sonnet"),
    (r"claude.*opus", "claude-3-opus"),
    (r"claude.*haiku", "claude-3-haiku"),
    // Gemini 3.x
    (r"gemini.*3.*pro", "gemini-3-pro"),
    (r"gemini.*3.*flash", "gemini-3-flash"),
    // Gemini 1.x / 2.x
    (r"gemini.*pro", "gemini-1.5-pro"),
    (r"gemini.*flash", "gemini-1.5-flash"),
    // DeepSeek
    (r"deepseek.*coder", "deepseek-coder"),
    (r"deepseek.*v3", "deepseek-v3"),
    (r"deepseek.*r1", "deepseek-r1"),
    // Llama
    (r"llama.*405", "llama-3.1-405b"),
    (r"llama.*70", "llama-3.1-70b"),
    // Qwen
    (r"qwen.*coder", "qwen-2.5-coder"),
    // OpenAI reasoning
    (r"o1-mini", "o1-mini"),
    (r"o1", "o1"),
    (r"o3-mini", "o3-mini"),
    // Grok 4.x
    (r"grok.*4\.1.*thinking", "grok-4.1-thinking"),
    (r"grok.*4\.1", "grok-4.1-thinking"),
    (r"grok.*4", "grok-4"),
    (r"grok", "grok-2"),
    // Chinese labs
    (r"ernie.*5", "ernie-5.0"),
    (r"ernie", "ernie-4.0"),
    (r"glm.*4\.7", "glm-4.7"),
    (r"glm", "glm-4"),
    (r"minimax.*m2|m2\.1", "minimax-m2.1"),
];

static COMPILED_FAMILY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    FAMILY_PATTERNS
        .iter()
        .map(|(pattern, key)| (Regex::new(pattern).expect("valid family pattern"), *key))
        .collect()
});

#[derive(Debug, Deserialize)]
struct PricingFile {
    model: Vec<PricingRow>,
}

#[derive(Debug, Deserialize)]
struct PricingRow {
    key: String,
    input: f64,
    output: f64,
    source: PriceSource,
}

/// Pricing records in declaration order. Declaration order is the tie-break
/// for the substring tier and is never changed after load.
#[derive(Debug, Clone)]
pub struct PricingTable {
    entries: Vec<(String, PricingRecord)>,
    index: HashMap<String, usize>,
}

impl PricingTable {
    pub fn from_entries(entries: Vec<(String, PricingRecord)>) -> Result<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        for (i, (key, record)) in entries.iter().enumerate() {
            if record.input_price_per_million < 0.0 || record.output_price_per_million < 0.0 {
                return Err(CoderankError::Data(format!("{key}: negative price")));
            }
            if index.insert(key.clone(), i).is_some() {
                return Err(CoderankError::Data(format!("{key}: duplicate pricing key")));
            }
        }
        Ok(Self { entries, index })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys and records in declaration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &PricingRecord)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }

    pub fn get(&self, key: &str) -> Option<&PricingRecord> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    /// Resolve a model name to a pricing record, reporting which tier hit.
    pub fn lookup(&self, model_name: &str) -> PricingMatch {
        let normalized = normalize(model_name);
        // Every key contains "", so the substring tier would match anything.
        if normalized.is_empty() {
            return PricingMatch::unmatched();
        }

        if let Some(record) = self.get(&normalized) {
            return self.hit(model_name, &normalized, *record, MatchTier::Exact);
        }

        if let Some((key, record)) = self
            .entries
            .iter()
            .find(|(key, _)| normalized.contains(key.as_str()) || key.contains(&normalized))
        {
            return self.hit(model_name, key, *record, MatchTier::Substring);
        }

        if let Some((_, key)) = COMPILED_FAMILY_PATTERNS
            .iter()
            .find(|(re, _)| re.is_match(&normalized))
        {
            return match self.get(key) {
                Some(record) => self.hit(model_name, key, *record, MatchTier::Family),
                None => {
                    debug!(model = model_name, key, "family key missing from pricing table");
                    PricingMatch::unmatched()
                }
            };
        }

        debug!(model = model_name, normalized = %normalized, "no pricing match");
        PricingMatch::unmatched()
    }

    /// Pricing for a model name; the unknown sentinel when nothing matches.
    pub fn find_pricing(&self, model_name: &str) -> PricingRecord {
        self.lookup(model_name).record
    }

    fn hit(&self, model_name: &str, key: &str, record: PricingRecord, tier: MatchTier) -> PricingMatch {
        debug!(model = model_name, key, %tier, "pricing match");
        PricingMatch {
            key: Some(key.to_string()),
            record,
            tier,
        }
    }
}

/// Parse a pricing table from TOML (`[[model]]` array, order preserved).
pub fn parse_pricing(toml_str: &str) -> Result<PricingTable> {
    let file: PricingFile = toml::from_str(toml_str)
        .map_err(|e| CoderankError::Data(format!("bad pricing.toml: {e}")))?;
    let entries = file
        .model
        .into_iter()
        .map(|row| {
            (
                row.key,
                PricingRecord {
                    input_price_per_million: row.input,
                    output_price_per_million: row.output,
                    source: row.source,
                },
            )
        })
        .collect();
    PricingTable::from_entries(entries)
}

/// Load the bundled pricing.toml from the data/ directory.
pub fn load_bundled_pricing() -> Result<PricingTable> {
    let toml_str = include_str!("../../../data/pricing.toml");
    parse_pricing(toml_str)
}
