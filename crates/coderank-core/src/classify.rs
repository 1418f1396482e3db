// Map leaderboard labels to the organization that owns the model.
//
// Two passes: a provider-prefix pass (strong signal, optionally stripped from
// the name) and, when that finds nothing, a content-sniffing pass over the
// cleaned name.

use std::sync::LazyLock;

use regex::Regex;

pub const UNKNOWN_ORGANIZATION: &str = "Unknown";

/// A provider-prefix rule. `strip` removes the matched prefix from the name.
#[derive(Debug, Clone, Copy)]
pub struct ProviderRule {
    pub pattern: &'static str,
    pub organization: &'static str,
    pub strip: bool,
}

/// Evaluated top to bottom, first match wins. Order is part of the behavior:
/// do not sort or merge entries.
pub const PROVIDER_RULES: &[ProviderRule] = &[
    ProviderRule { pattern: r"^anthropic[-_]?",        organization: "Anthropic", strip: true },
    ProviderRule { pattern: r"^openai[-_]?",           organization: "OpenAI",    strip: true },
    ProviderRule { pattern: r"^google[-_]?",           organization: "Google",    strip: true },
    ProviderRule { pattern: r"^deepseek[-_]?",         organization: "DeepSeek",  strip: false },
    ProviderRule { pattern: r"^meta[-_]?",             organization: "Meta",      strip: true },
    ProviderRule { pattern: r"^mistral[-_]?",          organization: "Mistral",   strip: false },
    ProviderRule { pattern: r"^alibaba[-_]?|^qwen",    organization: "Alibaba",   strip: false },
    ProviderRule { pattern: r"^xai[-_]?|^grok",        organization: "xAI",       strip: false },
    ProviderRule { pattern: r"^cohere[-_]?",           organization: "Cohere",    strip: true },
    ProviderRule { pattern: r"^baidu[-_]?|^ernie",     organization: "Baidu",     strip: false },
    ProviderRule { pattern: r"^zhipu[-_]?|^glm",       organization: "Zhipu",     strip: false },
    ProviderRule { pattern: r"^minimax[-_]?",          organization: "MiniMax",   strip: true },
    ProviderRule { pattern: r"^01[-_]?ai[-_]?|^yi[-_]?", organization: "01.AI",   strip: false },
    ProviderRule { pattern: r"^bytedance[-_]?|^doubao", organization: "ByteDance", strip: false },
];

/// Family keywords that identify the owner when no prefix did. Same ordering
/// contract as [`PROVIDER_RULES`]: "claude" is checked before "gpt|o1|o3", so a
/// label mentioning both resolves to Anthropic.
pub const CONTENT_RULES: &[(&str, &str)] = &[
    (r"claude", "Anthropic"),
    (r"gpt|o1|o3", "OpenAI"),
    (r"gemini", "Google"),
    (r"deepseek", "DeepSeek"),
    (r"grok", "xAI"),
    (r"llama", "Meta"),
    (r"qwen", "Alibaba"),
    (r"mistral|mixtral", "Mistral"),
    (r"ernie", "Baidu"),
    (r"glm", "Zhipu"),
    (r"minimax", "MiniMax"),
];

static COMPILED_PROVIDER_RULES: LazyLock<Vec<(Regex, ProviderRule)>> = LazyLock::new(|| {
    PROVIDER_RULES
        .iter()
        .map(|rule| {
            let re = Regex::new(&format!("(?i){}", rule.pattern)).expect("valid provider rule");
            (re, *rule)
        })
        .collect()
});

static COMPILED_CONTENT_RULES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    CONTENT_RULES
        .iter()
        .map(|(pattern, org)| {
            let re = Regex::new(&format!("(?i){pattern}")).expect("valid content rule");
            (re, *org)
        })
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub cleaned_name: String,
    pub organization: String,
}

/// Apply the first matching provider-prefix rule. Returns the organization and
/// the name with the prefix removed when the rule strips it.
pub fn match_provider_prefix(name: &str) -> Option<(&'static str, String)> {
    COMPILED_PROVIDER_RULES.iter().find_map(|(re, rule)| {
        if !re.is_match(name) {
            return None;
        }
        let cleaned = if rule.strip {
            re.replace(name, "").trim().to_string()
        } else {
            name.to_string()
        };
        Some((rule.organization, cleaned))
    })
}

/// Infer the organization from family keywords anywhere in the name.
pub fn infer_organization(name: &str) -> Option<&'static str> {
    COMPILED_CONTENT_RULES
        .iter()
        .find(|(re, _)| re.is_match(name))
        .map(|(_, org)| *org)
}

/// Prefix rules first; content sniffing over the cleaned name as a fallback.
pub fn classify(raw_name: &str) -> Classification {
    let name = raw_name.trim();
    let (organization, cleaned_name) = match match_provider_prefix(name) {
        Some((org, cleaned)) => (org, cleaned),
        None => (
            infer_organization(name).unwrap_or(UNKNOWN_ORGANIZATION),
            name.to_string(),
        ),
    };
    Classification {
        cleaned_name,
        organization: organization.to_string(),
    }
}
