use coderank_core::normalize::normalize;
use coderank_core::pricing::{load_bundled_pricing, MatchTier, PriceSource, PricingRecord};

#[test]
fn every_key_resolves_to_its_own_price() {
    let table = load_bundled_pricing().unwrap();
    for (key, record) in table.entries() {
        let found = table.find_pricing(key);
        assert_eq!(
            (found.input_price_per_million, found.output_price_per_million, found.source),
            (record.input_price_per_million, record.output_price_per_million, record.source),
            "key {key}"
        );
    }
}

#[test]
fn parenthetical_provider_is_ignored() {
    let table = load_bundled_pricing().unwrap();
    assert_eq!(normalize("GPT-4o (OpenAI)"), "gpt-4o");
    let m = table.lookup("GPT-4o (OpenAI)");
    assert_eq!(m.tier, MatchTier::Exact);
    assert_eq!(
        m.record,
        PricingRecord {
            input_price_per_million: 2.50,
            output_price_per_million: 10.00,
            source: PriceSource::Official,
        }
    );
}

#[test]
fn dated_claude_label() {
    let table = load_bundled_pricing().unwrap();
    let r = table.find_pricing("claude-3-5-sonnet-20241022");
    assert_eq!(r.input_price_per_million, 3.00);
    assert_eq!(r.output_price_per_million, 15.00);
    assert_eq!(r.source, PriceSource::Official);
}

#[test]
fn display_names_find_prices() {
    let table = load_bundled_pricing().unwrap();
    assert_eq!(table.lookup("Claude Opus 4.5 (Thinking)").key.as_deref(), Some("claude-opus-4.5"));
    assert_eq!(table.lookup("Gemini 3 Pro").key.as_deref(), Some("gemini-3-pro"));
    assert_eq!(table.lookup("GPT-5.2 High").key.as_deref(), Some("gpt-5.2-high"));
    assert_eq!(table.lookup("Grok 4.1 Thinking").key.as_deref(), Some("grok-4.1-thinking"));
}

#[test]
fn family_tier_catches_unlisted_versions() {
    let table = load_bundled_pricing().unwrap();

    let m = table.lookup("claude-3.7-sonnet");
    assert_eq!(m.tier, MatchTier::Family);
    assert_eq!(m.key.as_deref(), Some("claude-3.5-sonnet"));

    let m = table.lookup("gemini-2.5-pro");
    assert_eq!(m.tier, MatchTier::Family);
    assert_eq!(m.key.as_deref(), Some("gemini-1.5-pro"));
}

#[test]
fn substring_tier_prefers_earlier_keys() {
    let table = load_bundled_pricing().unwrap();
    let m = table.lookup("claude-opus-4.5-20251101");
    assert_eq!(m.tier, MatchTier::Substring);
    assert_eq!(m.key.as_deref(), Some("claude-opus-4.5"));
}

#[test]
fn unknown_models_get_the_sentinel() {
    let table = load_bundled_pricing().unwrap();
    for name in ["kimi-k2", "totally unknown model", "", "   ", "(beta)", "🤖"] {
        let r = table.find_pricing(name);
        assert_eq!(r, PricingRecord::UNKNOWN, "{name:?}");
        assert!(!r.is_known());
    }
}

#[test]
fn table_integrity() {
    let table = load_bundled_pricing().unwrap();
    assert!(table.len() >= 50);
    for (key, record) in table.entries() {
        assert!(record.input_price_per_million >= 0.0, "{key}");
        assert!(record.output_price_per_million >= 0.0, "{key}");
        assert_ne!(record.source, PriceSource::Unknown, "{key} carries the sentinel source");
    }
}
