// Turn raw leaderboard labels into stable display names.
//
// Leaderboard labels carry volatile noise (release date stamps, thinking
// budgets, `-preview`) that changes between snapshots of the same model. The
// noise is removed before classification so the same model always lands on
// the same name; the thinking variant is remembered and re-appended at the end.

use std::sync::LazyLock;

use regex::Regex;

use crate::classify::{infer_organization, match_provider_prefix, UNKNOWN_ORGANIZATION};

/// Whether a label described a thinking/reasoning variant of a model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThinkingVariant {
    None,
    Thinking,
    ThinkingMinimal,
}

impl ThinkingVariant {
    pub fn detect(raw: &str) -> Self {
        if THINKING_MINIMAL.is_match(raw) {
            Self::ThinkingMinimal
        } else if THINKING.is_match(raw) && !MINIMAL.is_match(raw) {
            Self::Thinking
        } else {
            Self::None
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            Self::None => "",
            Self::Thinking => " (Thinking)",
            Self::ThinkingMinimal => " (Thinking Minimal)",
        }
    }
}

static THINKING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)thinking").expect("valid thinking regex"));
static MINIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)minimal").expect("valid minimal regex"));
static THINKING_MINIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)thinking[-_]?minimal").expect("valid thinking-minimal regex"));

/// Volatile tokens, removed in this order. Each pattern is applied to every
/// occurrence.
const VOLATILE_TOKENS: &[&str] = &[
    // date stamps: claude-3-5-sonnet-20241022
    r"[-_]?\d{8,}[-_]?",
    r"(?i)[-_]?thinking[-_]?minimal",
    // thinking budgets: -thinking-32k, -thinking16k
    r"(?i)[-_]?thinking[-_]?\d*k?",
    r"(?i)[-_]?\d+k$",
    r"(?i)[-_]?preview$",
    r"(?i)[-_]?latest$",
    r"(?i)[-_]?pre$",
];

static COMPILED_VOLATILE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    VOLATILE_TOKENS
        .iter()
        .map(|p| Regex::new(p).expect("valid volatile token regex"))
        .collect()
});

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Known family spellings and their display form. First match replaces the
/// whole name, so longer version patterns must stay above their prefixes
/// ("Claude Opus 4.5" above anything that would also match "Claude Opus 4",
/// "GPT-5.2 High" above "GPT-5.2" above "GPT-5").
pub const DISPLAY_REWRITES: &[(&str, &str)] = &[
    // Claude
    (r"claude[-_]?opus[-_]?4[-_.]?5", "Claude Opus 4.5"),
    (r"claude[-_]?sonnet[-_]?4[-_.]?5", "Claude Sonnet 4.5"),
    (r"claude[-_]?opus[-_]?4[-_.]?1", "Claude Opus 4.1"),
    (r"claude[-_]?sonnet[-_]?4[-_.]?1", "Claude Sonnet 4.1"),
    (r"claude[-_]?3[-_.]?5[-_]?sonnet", "Claude 3.5 Sonnet"),
    (r"claude[-_]?3[-_]?opus", "Claude 3 Opus"),
    // GPT
    (r"gpt[-_]?5[-_.]?2[-_]?high", "GPT-5.2 High"),
    (r"gpt[-_]?5[-_.]?2\b", "GPT-5.2"),
    (r"gpt[-_]?5[-_.]?1[-_]?high", "GPT-5.1 High"),
    (r"gpt[-_]?5[-_]?medium", "GPT-5 Medium"),
    (r"gpt[-_]?5", "GPT-5"),
    (r"gpt[-_]?4[-_]?o[-_]?mini", "GPT-4o Mini"),
    (r"gpt[-_]?4[-_]?o", "GPT-4o"),
    (r"o1[-_]?mini", "o1-mini"),
    (r"\bo1\b", "o1"),
    // Gemini
    (r"gemini[-_]?3[-_]?pro", "Gemini 3 Pro"),
    (r"gemini[-_]?3[-_]?flash", "Gemini 3 Flash"),
    (r"gemini[-_]?2[-_.]?0[-_]?flash", "Gemini 2.0 Flash"),
    (r"gemini[-_]?1[-_.]?5[-_]?pro", "Gemini 1.5 Pro"),
    // Grok
    (r"grok[-_]?4[-_.]?1[-_]?thinking", "Grok 4.1 Thinking"),
    (r"grok[-_]?4[-_.]?1", "Grok 4.1"),
    (r"grok[-_]?4", "Grok 4"),
    // DeepSeek
    (r"deepseek[-_]?r1", "DeepSeek-R1"),
    (r"deepseek[-_]?v3", "DeepSeek-V3"),
    // Chinese labs
    (r"ernie[-_]?5[-_.]?0", "ERNIE 5.0"),
    (r"glm[-_]?4[-_.]?7", "GLM-4.7"),
    (r"glm[-_]?4", "GLM-4"),
    (r"minimax[-_]?m2", "MiniMax M2"),
    (r"qwen[-_]?2[-_.]?5", "Qwen 2.5"),
    // Llama
    (r"llama[-_]?3[-_.]?3", "Llama 3.3"),
];

static COMPILED_REWRITES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    DISPLAY_REWRITES
        .iter()
        .map(|(pattern, replacement)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("valid display rewrite");
            (re, *replacement)
        })
        .collect()
});

/// Remove date stamps, thinking markers and release-channel suffixes.
pub fn strip_volatile_tokens(raw: &str) -> String {
    let mut name = raw.trim().to_string();
    for re in COMPILED_VOLATILE.iter() {
        name = re.replace_all(&name, "").into_owned();
    }
    WHITESPACE.replace_all(&name, " ").trim().to_string()
}

/// First matching family rewrite, if any.
pub fn rewrite_family(name: &str) -> Option<&'static str> {
    COMPILED_REWRITES
        .iter()
        .find(|(re, _)| re.is_match(name))
        .map(|(_, replacement)| *replacement)
}

/// Uppercase the first character of every word (`\b\w`).
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_is_word = false;
    for c in name.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word && !prev_is_word {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
        prev_is_word = is_word;
    }
    out
}

/// A leaderboard label resolved to a display name and an owning organization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedLabel {
    pub name: String,
    pub organization: String,
}

impl ResolvedLabel {
    /// Identity used to drop repeated rows of the same model.
    pub fn dedup_key(&self) -> (String, String) {
        (self.name.to_lowercase(), self.organization.to_lowercase())
    }
}

/// Full label pipeline: strip volatile tokens, provider prefix rules, family
/// rewrites, title-case fallback, content sniffing, thinking suffix.
pub fn resolve_label(raw: &str) -> ResolvedLabel {
    let variant = ThinkingVariant::detect(raw);
    let mut name = strip_volatile_tokens(raw);

    let mut organization = UNKNOWN_ORGANIZATION;
    if let Some((org, cleaned)) = match_provider_prefix(&name) {
        organization = org;
        name = cleaned;
    }

    match rewrite_family(&name) {
        Some(display) => name = display.to_string(),
        None if name == name.to_lowercase() => name = title_case(&name),
        None => {}
    }

    if organization == UNKNOWN_ORGANIZATION {
        organization = infer_organization(&name).unwrap_or(UNKNOWN_ORGANIZATION);
    }

    name.push_str(variant.suffix());

    ResolvedLabel {
        name,
        organization: organization.to_string(),
    }
}

/// Display name for a raw or normalized model name.
pub fn clean_display_name(name: &str) -> String {
    resolve_label(name).name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rules_compile() {
        assert_eq!(COMPILED_VOLATILE.len(), VOLATILE_TOKENS.len());
        assert_eq!(COMPILED_REWRITES.len(), DISPLAY_REWRITES.len());
    }

    #[test]
    fn detects_thinking_variants() {
        assert_eq!(ThinkingVariant::detect("claude-opus-4-5-thinking-32k"), ThinkingVariant::Thinking);
        assert_eq!(ThinkingVariant::detect("gpt-5-thinking-minimal"), ThinkingVariant::ThinkingMinimal);
        assert_eq!(ThinkingVariant::detect("gpt-5-minimal-thinking"), ThinkingVariant::None);
        assert_eq!(ThinkingVariant::detect("gpt-4o"), ThinkingVariant::None);
    }

    #[test]
    fn strips_date_stamps_and_budgets() {
        assert_eq!(strip_volatile_tokens("claude-3-5-sonnet-20241022"), "claude-3-5-sonnet");
        assert_eq!(
            strip_volatile_tokens("claude-opus-4-5-20251101-thinking-32k"),
            "claude-opus-4-5"
        );
        assert_eq!(strip_volatile_tokens("gemini-2.5-pro-preview"), "gemini-2.5-pro");
        assert_eq!(strip_volatile_tokens("chatgpt-4o-latest"), "chatgpt-4o");
        assert_eq!(strip_volatile_tokens("gpt-5.1-high-thinking-minimal"), "gpt-5.1-high");
        assert_eq!(strip_volatile_tokens("qwen3-max-128k"), "qwen3-max");
    }

    #[test]
    fn longer_versions_rewrite_before_prefixes() {
        assert_eq!(rewrite_family("gpt-5.2-high"), Some("GPT-5.2 High"));
        assert_eq!(rewrite_family("gpt-5.2"), Some("GPT-5.2"));
        assert_eq!(rewrite_family("gpt-5-medium"), Some("GPT-5 Medium"));
        assert_eq!(rewrite_family("gpt-5"), Some("GPT-5"));
        assert_eq!(rewrite_family("gpt-4o-mini"), Some("GPT-4o Mini"));
        assert_eq!(rewrite_family("grok-4.1-thinking"), Some("Grok 4.1 Thinking"));
        assert_eq!(rewrite_family("kimi-k2"), None);
    }

    #[test]
    fn title_cases_word_starts() {
        assert_eq!(title_case("kimi-k2 instruct"), "Kimi-K2 Instruct");
        assert_eq!(title_case("qwen3-coder-480b"), "Qwen3-Coder-480b");
    }

    #[test]
    fn resolves_dated_thinking_label() {
        let r = resolve_label("claude-opus-4-5-20251101-thinking-32k");
        assert_eq!(r.name, "Claude Opus 4.5 (Thinking)");
        assert_eq!(r.organization, "Anthropic");
    }

    #[test]
    fn resolves_prefixed_label() {
        let r = resolve_label("anthropic-claude-sonnet-4-5");
        assert_eq!(r.name, "Claude Sonnet 4.5");
        assert_eq!(r.organization, "Anthropic");
    }

    #[test]
    fn mixed_case_without_rewrite_is_kept() {
        let r = resolve_label("Kimi-K2-Instruct");
        assert_eq!(r.name, "Kimi-K2-Instruct");
        assert_eq!(r.organization, UNKNOWN_ORGANIZATION);
    }

    #[test]
    fn minimal_thinking_suffix() {
        let r = resolve_label("gpt-5-thinking-minimal");
        assert_eq!(r.name, "GPT-5 (Thinking Minimal)");
        assert_eq!(r.organization, "OpenAI");
    }

    #[test]
    fn clean_display_name_drops_organization() {
        assert_eq!(clean_display_name("gemini-3-pro-preview"), "Gemini 3 Pro");
        assert_eq!(clean_display_name("kimi-k2"), "Kimi-K2");
    }

    #[test]
    fn dedup_key_is_case_insensitive() {
        let a = resolve_label("DeepSeek-V3");
        let b = resolve_label("deepseek-v3");
        assert_eq!(a.dedup_key(), b.dedup_key());
    }
}
