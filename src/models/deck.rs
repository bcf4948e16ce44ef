use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use super::card::Card;
use super::meta::ApiMeta;
use crate::error::CatalogError;

// ---------------------------------------------------------------------------
// Board — closed enumeration of a deck's three partitions
// ---------------------------------------------------------------------------

/// One of the three named partitions of a deck's card references.
///
/// Internal callers select boards through this enum, so an unknown board is
/// unrepresentable past the single [`FromStr`] parse step for external input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Board {
    Mainboard,
    Sideboard,
    Commander,
}

impl Board {
    pub const ALL: [Board; 3] = [Board::Mainboard, Board::Sideboard, Board::Commander];

    pub fn as_str(&self) -> &'static str {
        match self {
            Board::Mainboard => "mainBoard",
            Board::Sideboard => "sideBoard",
            Board::Commander => "commander",
        }
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Board {
    type Err = CatalogError;

    /// Parse a board name (case-insensitive). Unrecognized names return
    /// [`BoardNotExist`](CatalogError::BoardNotExist) before any mutation is
    /// attempted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("mainboard") {
            Ok(Board::Mainboard)
        } else if s.eq_ignore_ascii_case("sideboard") {
            Ok(Board::Sideboard)
        } else if s.eq_ignore_ascii_case("commander") {
            Ok(Board::Commander)
        } else {
            Err(CatalogError::BoardNotExist(s.to_string()))
        }
    }
}

// ---------------------------------------------------------------------------
// DeckBoards — the persisted id -> quantity maps (source of truth)
// ---------------------------------------------------------------------------

/// The three quantity maps of one deck. A board never contains a zero or
/// negative entry: such entries are deleted, not stored, because a
/// present-but-zero key would be indistinguishable from "one copy" under
/// naive membership checks elsewhere.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DeckBoards {
    pub main_board: BTreeMap<String, i64>,
    pub side_board: BTreeMap<String, i64>,
    pub commander: BTreeMap<String, i64>,
}

impl DeckBoards {
    pub fn board(&self, board: Board) -> &BTreeMap<String, i64> {
        match board {
            Board::Mainboard => &self.main_board,
            Board::Sideboard => &self.side_board,
            Board::Commander => &self.commander,
        }
    }

    pub fn board_mut(&mut self, board: Board) -> &mut BTreeMap<String, i64> {
        match board {
            Board::Mainboard => &mut self.main_board,
            Board::Sideboard => &mut self.side_board,
            Board::Commander => &mut self.commander,
        }
    }

    /// All card ids referenced across the three boards, deduplicated.
    pub fn all_card_ids(&self) -> Vec<String> {
        let mut ids: BTreeSet<&str> = BTreeSet::new();
        for board in Board::ALL {
            ids.extend(self.board(board).keys().map(String::as_str));
        }
        ids.into_iter().map(str::to_string).collect()
    }

    /// Merge a quantity delta into one board: existing entries accumulate,
    /// new ids are inserted directly. Deltas here are additive; removal goes
    /// through [`subtract`](Self::subtract). Entries whose merged quantity
    /// ends non-positive are pruned, so the no-zero-entry invariant holds
    /// even for a misused negative delta. Quantities saturate at the `i64`
    /// bounds rather than overflowing.
    pub fn merge(&mut self, board: Board, delta: &BTreeMap<String, i64>) {
        let target = self.board_mut(board);
        for (id, quantity) in delta {
            let merged = {
                let entry = target.entry(id.clone()).or_insert(0);
                *entry = entry.saturating_add(*quantity);
                *entry
            };
            if merged <= 0 {
                target.remove(id);
            }
        }
    }

    /// Subtract a quantity delta from one board. Ids not currently present
    /// are ignored; entries whose result is zero or negative are pruned.
    pub fn subtract(&mut self, board: Board, delta: &BTreeMap<String, i64>) {
        let target = self.board_mut(board);
        for (id, quantity) in delta {
            if let Some(current) = target.get_mut(id) {
                *current = current.saturating_sub(*quantity);
                if *current <= 0 {
                    target.remove(id);
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Deck
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Deck {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub release_date: Option<String>,
    #[serde(default)]
    pub boards: DeckBoards,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtgjson_api_meta: Option<ApiMeta>,
}

impl Deck {
    /// Construct a deck with the given code and name and empty boards.
    pub fn new(code: &str, name: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            ..Self::default()
        }
    }
}

// ---------------------------------------------------------------------------
// DeckContents — hydrated view, derived and never persisted
// ---------------------------------------------------------------------------

/// One hydrated board entry: the referenced quantity plus the resolved card.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckContentEntry {
    pub quantity: i64,
    pub card: Card,
}

/// The hydrated counterpart of [`DeckBoards`]: card id -> `{quantity, card}`
/// per board. Produced by hydration, never the source of truth.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckContents {
    pub main_board: BTreeMap<String, DeckContentEntry>,
    pub side_board: BTreeMap<String, DeckContentEntry>,
    pub commander: BTreeMap<String, DeckContentEntry>,
}

impl DeckContents {
    pub fn board(&self, board: Board) -> &BTreeMap<String, DeckContentEntry> {
        match board {
            Board::Mainboard => &self.main_board,
            Board::Sideboard => &self.side_board,
            Board::Commander => &self.commander,
        }
    }

    pub(crate) fn board_mut(&mut self, board: Board) -> &mut BTreeMap<String, DeckContentEntry> {
        match board {
            Board::Mainboard => &mut self.main_board,
            Board::Sideboard => &mut self.side_board,
            Board::Commander => &mut self.commander,
        }
    }
}
