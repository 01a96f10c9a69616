use serde::{Deserialize, Serialize};

use crate::utils::with_sign;

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum CellKind {
    #[default]
    Plain,
    // Per round "math" cell drawn lighter and underlined above a running total
    Delta,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Cell<T> {
    pub text: String,
    // Round this cell opens in the edit dialog when tapped
    pub edit_target: Option<T>,
    pub kind: CellKind,
}

impl<T> Cell<T> {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            edit_target: None,
            kind: CellKind::Plain,
        }
    }

    pub fn blank() -> Self {
        Self::plain("")
    }

    pub fn editable(text: impl Into<String>, target: T, kind: CellKind) -> Self {
        Self {
            text: text.into(),
            edit_target: Some(target),
            kind,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scoreboard<T> {
    pub header_cells: Vec<String>,
    pub columns: Vec<Vec<Cell<T>>>,
}

impl<T> Scoreboard<T> {
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|column| column.len()).unwrap_or(0)
    }
}

/// One round's contribution to a scoreboard column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEntry {
    // Round finished, carries the round score
    Scored(i32),
    // Round still being played, carries the bid so far
    Pending(i32),
}

/// Lays out one column of a scoreboard. Round 0 is a single cell holding the
/// raw score; later rounds get a signed delta cell followed by the running
/// total. A pending round shows only its bid and no total.
pub fn running_total_column<T>(
    entries: &[ColumnEntry],
    target_for_round: impl Fn(usize) -> T,
) -> Vec<Cell<T>> {
    let mut cells = Vec::with_capacity(entries.len() * 2);
    let mut total: i32 = 0;
    for (round_index, entry) in entries.iter().enumerate() {
        let target = target_for_round(round_index);
        match *entry {
            ColumnEntry::Pending(bid) => {
                let kind = if round_index == 0 {
                    CellKind::Plain
                } else {
                    CellKind::Delta
                };
                cells.push(Cell::editable(bid.to_string(), target, kind));
            }
            ColumnEntry::Scored(score) => {
                total = total.saturating_add(score);
                if round_index == 0 {
                    cells.push(Cell::editable(score.to_string(), target, CellKind::Plain));
                } else {
                    cells.push(Cell::editable(with_sign(score), target, CellKind::Delta));
                    cells.push(Cell::plain(total.to_string()));
                }
            }
        }
    }
    cells
}
