// Canonical form used as the join key between leaderboard names and the
// pricing table.

use std::sync::LazyLock;

use regex::Regex;

static PARENTHETICAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)").expect("valid parenthetical regex"));

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[-_\s]+").expect("valid separator regex"));

/// Trailing tokens that never distinguish one priced model from another.
const NOISE_SUFFIXES: &[&str] = &["-instruct", "-chat", "-preview", "-latest"];

/// Provider prefixes as they appear in API-style ids (`openai/gpt-4`, `anthropic-claude-3`).
const PROVIDER_PREFIXES: &[&str] = &[
    "openai-", "openai/",
    "anthropic-", "anthropic/",
    "google-", "google/",
    "meta-", "meta/",
];

/// Normalize a raw model name: lowercase, drop `(...)` notes, collapse
/// separators to a single `-`, strip noise suffixes and provider prefixes.
///
/// ```
/// use coderank_core::normalize::normalize;
/// assert_eq!(normalize("GPT-4o (OpenAI)"), "gpt-4o");
/// assert_eq!(normalize("openai/gpt-4"), "gpt-4");
/// assert_eq!(normalize("llama-3-70b-instruct"), "llama-3-70b");
/// ```
pub fn normalize(raw: &str) -> String {
    let lower = raw.to_lowercase();
    let no_notes = PARENTHETICAL.replace_all(&lower, "");
    let mut name = SEPARATORS.replace_all(&no_notes, "-").into_owned();

    // Stripping one token can expose another ("x-chat-instruct"), so run to a
    // fixed point. That keeps normalize(normalize(x)) == normalize(x).
    loop {
        let before = name.len();
        for suffix in NOISE_SUFFIXES {
            if let Some(rest) = name.strip_suffix(suffix) {
                name.truncate(rest.len());
            }
        }
        for prefix in PROVIDER_PREFIXES {
            if name.starts_with(prefix) {
                name.drain(..prefix.len());
            }
        }
        let trimmed = name.trim_matches('-').trim();
        if trimmed.len() != name.len() {
            name = trimmed.to_string();
        }
        if name.len() == before {
            return name;
        }
    }
}
