//! Bundled seed card lists.
//!
//! Two line-delimited UTF-8 resources ship with the crate, one phrase per
//! line, blank lines ignored. The trait seam lets a host substitute its own
//! lists (or none at all, degrading to the "no cards available" state).

use crate::domain::cards::DeckVariant;

const BASE_CARDS: &str = include_str!("../../assets/base_cards.txt");
const FAMILY_CARDS: &str = include_str!("../../assets/family_cards.txt");

/// Source of seed phrases for a deck variant.
pub trait SeedSource: Send + Sync {
    fn phrases(&self, variant: DeckVariant) -> Vec<String>;
}

/// The card lists bundled with the crate.
#[derive(Debug, Default, Clone)]
pub struct BundledSeeds;

impl SeedSource for BundledSeeds {
    fn phrases(&self, variant: DeckVariant) -> Vec<String> {
        let raw = match variant {
            DeckVariant::Base => BASE_CARDS,
            DeckVariant::Family => FAMILY_CARDS,
        };
        parse_seed_list(raw)
    }
}

/// One phrase per line; blank (or whitespace-only) lines are discarded.
pub fn parse_seed_list(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
