use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::meta::ApiMeta;

// ---------------------------------------------------------------------------
// Card — Immutable catalog entry keyed by its MTGJSON v4 id
// ---------------------------------------------------------------------------

/// A catalog card. Every nested substructure is non-nullable with a
/// zero-value default, so documents missing a block deserialize into empty
/// containers rather than `null` checks scattered across operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub identifiers: CardIdentifiers,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mana_cost: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Format name -> legality status (e.g. `"modern" -> "Legal"`).
    #[serde(default)]
    pub legalities: BTreeMap<String, String>,
    /// Vendor name -> purchase URL.
    #[serde(default)]
    pub purchase_urls: BTreeMap<String, String>,
    #[serde(default)]
    pub rulings: Vec<Ruling>,
    #[serde(default)]
    pub foreign_data: Vec<ForeignData>,
    #[serde(default)]
    pub leadership_skills: LeadershipSkills,
    #[serde(default)]
    pub related_cards: RelatedCards,
    #[serde(default)]
    pub source_products: SourceProducts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mtgjson_api_meta: Option<ApiMeta>,
}

impl Card {
    /// Construct a card with the given name and MTGJSON v4 id; every optional
    /// substructure starts as its empty container.
    pub fn new(name: &str, mtgjson_v4_id: &str) -> Self {
        Self {
            name: name.to_string(),
            identifiers: CardIdentifiers {
                mtgjson_v4_id: mtgjson_v4_id.to_string(),
                ..CardIdentifiers::default()
            },
            ..Self::default()
        }
    }

    /// The card's natural key.
    pub fn uuid(&self) -> &str {
        &self.identifiers.mtgjson_v4_id
    }
}

// ---------------------------------------------------------------------------
// Nested substructures
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardIdentifiers {
    #[serde(default)]
    pub mtgjson_v4_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scryfall_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiverse_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tcgplayer_product_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ruling {
    pub date: String,
    pub text: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForeignData {
    pub language: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadershipSkills {
    #[serde(default)]
    pub brawl: bool,
    #[serde(default)]
    pub commander: bool,
    #[serde(default)]
    pub oathbreaker: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelatedCards {
    #[serde(default)]
    pub reverse_related: Vec<String>,
    #[serde(default)]
    pub spellbook: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceProducts {
    #[serde(default)]
    pub foil: Vec<String>,
    #[serde(default)]
    pub nonfoil: Vec<String>,
    #[serde(default)]
    pub etched: Vec<String>,
}
