use crate::schema::CardEntry;
use anyhow::{anyhow, bail, Context};
use minikers_core::{Card, Difficulty};
use std::collections::BTreeSet;

const FAMILY_JSON: &str = include_str!("../catalogs/family.json");
const STANDARD_JSON: &str = include_str!("../catalogs/standard.json");

/// Built-in decks. Family is the kid-friendly list the game shipped
/// with; standard is the general-audience one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogKind {
    Family,
    Standard,
}

impl CatalogKind {
    pub const ALL: [CatalogKind; 2] = [CatalogKind::Family, CatalogKind::Standard];

    pub fn label(self) -> &'static str {
        match self {
            CatalogKind::Family => "Family",
            CatalogKind::Standard => "Standard",
        }
    }
}

pub fn load_catalog(kind: CatalogKind) -> anyhow::Result<Vec<Card>> {
    match kind {
        CatalogKind::Family => parse_catalog("family", FAMILY_JSON),
        CatalogKind::Standard => parse_catalog("standard", STANDARD_JSON),
    }
}

/// The pool a game draws from: the chosen catalog plus every card from
/// the studio, in that order.
pub fn game_pool(catalog: &[Card], custom: &[Card]) -> Vec<Card> {
    let mut pool = catalog.to_vec();
    pool.extend(custom.iter().cloned());
    pool
}

fn parse_catalog(name: &str, raw: &str) -> anyhow::Result<Vec<Card>> {
    let entries: Vec<CardEntry> =
        serde_json::from_str(raw).with_context(|| format!("parse {name} catalog"))?;
    let mut cards = Vec::with_capacity(entries.len());
    let mut seen = BTreeSet::new();
    for (index, entry) in entries.into_iter().enumerate() {
        let card =
            catalog_card(entry).with_context(|| format!("{name} catalog entry {index}"))?;
        if !seen.insert(card.id.clone()) {
            bail!("{name} catalog: duplicate id {}", card.id);
        }
        cards.push(card);
    }
    if cards.is_empty() {
        bail!("{name} catalog is empty");
    }
    Ok(cards)
}

fn catalog_card(entry: CardEntry) -> anyhow::Result<Card> {
    let Some(id) = entry.id else {
        bail!("missing id");
    };
    if entry.name.trim().is_empty() {
        bail!("missing name");
    }
    let Some(rank) = entry.difficulty else {
        bail!("missing difficulty");
    };
    let difficulty = Difficulty::try_from(rank).map_err(|err| anyhow!(err))?;
    Ok(Card {
        id,
        name: entry.name,
        difficulty,
        definition: entry.definition,
        team: None,
        created_by: None,
        custom: false,
    })
}
