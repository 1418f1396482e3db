use coderank_core::extract::RawLeaderboardEntry;
use coderank_core::rank::top_n;

const LABELS: &[&str] = &[
    "claude-opus-4-5-20251101",
    "claude-sonnet-4-5",
    "gemini-3-pro",
    "grok-4.1-thinking",
    "gpt-5.2-high",
    "deepseek-r1",
    "glm-4.7",
    "qwen3-coder-480b",
    "minimax-m2.1",
    "gemini-3-flash",
    "o3-mini",
    "llama-3.3-70b",
    "mistral-large",
    "ernie-5.0",
    "kimi-k2",
];

fn synthetic(count: usize) -> Vec<RawLeaderboardEntry> {
    // Page order is the reverse of rank order.
    LABELS[..count]
        .iter()
        .enumerate()
        .rev()
        .map(|(i, label)| RawLeaderboardEntry {
            raw_label: label.to_string(),
            column_rank: i as u32 + 1,
        })
        .collect()
}

#[test]
fn fifteen_entries_top_ten() {
    let models = top_n(&synthetic(15), 10);
    assert_eq!(models.len(), 10);

    let ranks: Vec<u32> = models.iter().map(|m| m.rank).collect();
    assert_eq!(ranks, (1..=10).collect::<Vec<u32>>());

    let scores: Vec<i64> = models.iter().map(|m| m.score).collect();
    assert_eq!(
        scores,
        vec![1500, 1490, 1480, 1470, 1460, 1450, 1440, 1430, 1420, 1410]
    );

    assert_eq!(models[0].name, "Claude Opus 4.5");
    assert_eq!(models[0].organization, "Anthropic");
}

#[test]
fn fewer_entries_than_n() {
    let models = top_n(&synthetic(4), 10);
    assert_eq!(models.len(), 4);
    assert_eq!(models.last().map(|m| m.rank), Some(4));
}

#[test]
fn ranks_gap_free_and_scores_non_increasing() {
    let entries: Vec<RawLeaderboardEntry> = [(3, "gpt-5"), (40, "kimi-k2"), (9, "grok-4"), (3, "glm-4")]
        .into_iter()
        .map(|(rank, label)| RawLeaderboardEntry {
            raw_label: label.to_string(),
            column_rank: rank,
        })
        .collect();

    let models = top_n(&entries, 3);
    assert_eq!(models.len(), 3);
    for (i, m) in models.iter().enumerate() {
        assert_eq!(m.rank as usize, i + 1);
    }
    for w in models.windows(2) {
        assert!(w[0].score >= w[1].score);
    }
    assert_eq!(models[0].name, "GPT-5");
    assert_eq!(models[1].name, "GLM-4");
    assert_eq!(models[2].score, 1420);
}

#[test]
fn license_follows_organization() {
    let models = top_n(&synthetic(15), 15);
    for m in &models {
        let expected = if m.organization == "DeepSeek" { "MIT" } else { "Proprietary" };
        assert_eq!(m.license, expected, "{}", m.name);
    }
    assert!(models.iter().any(|m| m.license == "MIT"));
}
