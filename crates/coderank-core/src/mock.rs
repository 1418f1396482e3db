// Fixed leaderboard used when live data is switched off or nothing has
// been stored yet.

use crate::model::{license_for, ResolvedModel};

pub struct MockEntry {
    pub name: &'static str,
    pub organization: &'static str,
}

/// In rank order, best first.
pub const MOCK_LEADERBOARD: &[MockEntry] = &[
    MockEntry {
        name: "Claude Opus 4.5",
        organization: "Anthropic",
    },
    MockEntry {
        name: "Claude Sonnet 4.5",
        organization: "Anthropic",
    },
    MockEntry {
        name: "Claude Opus 4.5 (Thinking)",
        organization: "Anthropic",
    },
    MockEntry {
        name: "Gemini 3 Pro",
        organization: "Google",
    },
    MockEntry {
        name: "Claude Opus 4.1",
        organization: "Anthropic",
    },
    MockEntry {
        name: "Grok 4.1 Thinking",
        organization: "xAI",
    },
    MockEntry {
        name: "Claude Sonnet 4.5 (Thinking)",
        organization: "Anthropic",
    },
    MockEntry {
        name: "Claude Opus 4.1 (Thinking)",
        organization: "Anthropic",
    },
    MockEntry {
        name: "Gemini 3 Flash",
        organization: "Google",
    },
    MockEntry {
        name: "GPT-5.2 High",
        organization: "OpenAI",
    },
];

pub fn mock_models() -> Vec<ResolvedModel> {
    MOCK_LEADERBOARD
        .iter()
        .zip(1u32..)
        .map(|(entry, rank)| ResolvedModel {
            rank,
            name: entry.name.to_string(),
            score: crate::rank::score_for_rank(rank),
            organization: entry.organization.to_string(),
            license: license_for(entry.organization).to_string(),
        })
        .collect()
}
