// Pull per-model ranks out of the leaderboard page's HTML tables.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};

use crate::display::resolve_label;

/// Header label of the column we rank by.
pub const CODING_COLUMN: &str = "coding";

/// One data row as it appeared on the page, before ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLeaderboardEntry {
    pub raw_label: String,
    pub column_rank: u32,
}

static TABLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("table").expect("valid table selector"));
static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("th").expect("valid th selector"));
static BODY_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody tr").expect("valid row selector"));
static DATA_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("valid td selector"));

fn cell_text(el: ElementRef<'_>) -> String {
    el.text().collect::<String>().trim().to_string()
}

/// Leading unsigned integer of a cell, like `"12*"` -> 12. `None` when the
/// cell doesn't start with a digit or the value is 0. Values past `u32::MAX`
/// saturate.
pub fn parse_rank(text: &str) -> Option<u32> {
    let digits: String = text
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    if digits.is_empty() {
        return None;
    }
    let rank = digits.parse::<u32>().unwrap_or_else(|_| {
        debug!(cell = text, "rank overflows u32, saturating");
        u32::MAX
    });
    (rank > 0).then_some(rank)
}

/// First table with a `th` whose text equals `column_label`, and that
/// header's position.
fn find_column<'a>(document: &'a Html, column_label: &str) -> Option<(ElementRef<'a>, usize)> {
    document.select(&TABLE).find_map(|table| {
        table
            .select(&HEADER_CELL)
            .position(|th| cell_text(th).eq_ignore_ascii_case(column_label))
            .map(|index| (table, index))
    })
}

/// Extract `(label, rank)` rows from the first table that has a
/// `column_label` header, in document order.
///
/// Rows with too few cells, an empty label, or a rank that isn't a positive
/// integer are skipped. Rows resolving to the same model and organization
/// are collapsed; the first one wins.
pub fn extract_column(html: &str, column_label: &str) -> Vec<RawLeaderboardEntry> {
    let document = Html::parse_document(html);

    let Some((table, index)) = find_column(&document, column_label) else {
        warn!(column = column_label, "no table with the requested column");
        return Vec::new();
    };

    let mut seen = HashSet::new();
    let mut entries = Vec::new();

    for row in table.select(&BODY_ROW) {
        let cells: Vec<ElementRef<'_>> = row.select(&DATA_CELL).collect();
        if cells.len() <= index {
            continue;
        }

        let raw_label = cell_text(cells[0]);
        if raw_label.is_empty() {
            continue;
        }
        let Some(column_rank) = parse_rank(&cell_text(cells[index])) else {
            debug!(label = %raw_label, "skipping row without a usable rank");
            continue;
        };

        if !seen.insert(resolve_label(&raw_label).dedup_key()) {
            debug!(label = %raw_label, "duplicate model row");
            continue;
        }

        entries.push(RawLeaderboardEntry {
            raw_label,
            column_rank,
        });
    }

    debug!(rows = entries.len(), column = column_label, "extracted leaderboard rows");
    entries
}

/// Rows ranked by the coding column.
pub fn extract(html: &str) -> Vec<RawLeaderboardEntry> {
    extract_column(html, CODING_COLUMN)
}
