use crate::display::resolve_label;
use crate::extract::RawLeaderboardEntry;
use crate::model::{license_for, ResolvedModel};

/// Score shown for the best-ranked model.
pub const SCORE_BASE: f64 = 1500.0;
/// Score drop per leaderboard position.
pub const SCORE_STEP: f64 = 10.0;

/// Display score derived from the rank a model had on the page. Not a real
/// rating; it only needs to fall as the rank grows.
pub fn score_for_rank(column_rank: u32) -> i64 {
    (SCORE_BASE - (f64::from(column_rank) - 1.0) * SCORE_STEP).round() as i64
}

/// Best `n` entries by page rank, renumbered `1..=k` without gaps.
///
/// Ties keep document order. The score comes from the original page rank,
/// so gaps in the page ranks show up as gaps in the scores.
pub fn top_n(entries: &[RawLeaderboardEntry], n: usize) -> Vec<ResolvedModel> {
    let mut sorted: Vec<&RawLeaderboardEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.column_rank);

    sorted
        .into_iter()
        .take(n)
        .zip(1u32..)
        .map(|(entry, rank)| {
            let label = resolve_label(&entry.raw_label);
            let license = license_for(&label.organization).to_string();
            ResolvedModel {
                rank,
                name: label.name,
                score: score_for_rank(entry.column_rank),
                organization: label.organization,
                license,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(label: &str, column_rank: u32) -> RawLeaderboardEntry {
        RawLeaderboardEntry {
            raw_label: label.to_string(),
            column_rank,
        }
    }

    #[test]
    fn score_formula() {
        assert_eq!(score_for_rank(1), 1500);
        assert_eq!(score_for_rank(2), 1490);
        assert_eq!(score_for_rank(10), 1410);
    }

    #[test]
    fn renumbers_across_gaps() {
        let models = top_n(&[entry("gpt-4o", 7), entry("deepseek-r1", 2), entry("grok-4", 30)], 10);
        let ranks: Vec<u32> = models.iter().map(|m| m.rank).collect();
        let scores: Vec<i64> = models.iter().map(|m| m.score).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
        assert_eq!(scores, vec![1490, 1440, 1210]);
        assert_eq!(models[0].name, "DeepSeek-R1");
        assert_eq!(models[0].license, "MIT");
        assert_eq!(models[2].organization, "xAI");
    }

    #[test]
    fn ties_keep_document_order() {
        let models = top_n(&[entry("gpt-4o", 1), entry("o1-mini", 1)], 10);
        assert_eq!(models[0].name, "GPT-4o");
        assert_eq!(models[1].name, "o1-mini");
        assert_eq!(models[0].score, models[1].score);
    }

    #[test]
    fn empty_and_zero() {
        assert!(top_n(&[], 10).is_empty());
        assert!(top_n(&[entry("gpt-4o", 1)], 0).is_empty());
    }
}
