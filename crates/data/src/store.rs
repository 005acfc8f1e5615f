use crate::schema::CardEntry;
use anyhow::{anyhow, bail, Context};
use minikers_core::{Card, CardId, Difficulty};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

pub const SHARED_KEY: &str = "shared";

/// Cards made in the studio, grouped by collection key ("team1".."team6"
/// or "shared").
///
/// Mutations only touch memory. Call [`CustomCardStore::persist`] after a
/// change; a failed write is a warning, the in-memory collections stay
/// authoritative for the session.
#[derive(Debug, Default)]
pub struct CustomCardStore {
    path: Option<PathBuf>,
    collections: BTreeMap<String, Vec<Card>>,
}

impl CustomCardStore {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Empty store that still knows where to persist. Lets a caller keep
    /// playing after an unreadable file without losing the save location.
    pub fn empty_at(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            collections: BTreeMap::new(),
        }
    }

    /// Reads the store from `path`. A missing file is just an empty store;
    /// the path is remembered either way so `persist` knows where to write.
    pub fn load(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        if !path.exists() {
            return Ok(Self {
                path: Some(path),
                collections: BTreeMap::new(),
            });
        }
        let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        let collections =
            parse_collections(&raw).with_context(|| format!("parse {}", path.display()))?;
        Ok(Self {
            path: Some(path),
            collections,
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn collection(&self, key: &str) -> &[Card] {
        self.collections.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every custom card across all collections, in key order.
    pub fn all_cards(&self) -> Vec<Card> {
        self.collections.values().flatten().cloned().collect()
    }

    pub fn total(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn add_card(
        &mut self,
        key: &str,
        name: &str,
        difficulty: Difficulty,
        definition: &str,
    ) -> anyhow::Result<Card> {
        if !valid_key(key) {
            bail!("invalid key format: expected \"team1\", \"team2\", etc., or \"shared\"");
        }
        let name = name.trim();
        if name.is_empty() {
            bail!("card name cannot be empty");
        }
        let card = Card {
            id: self.next_id(key),
            name: name.to_string(),
            difficulty,
            definition: normalize_definition(definition),
            team: Some(key.to_string()),
            created_by: Some(key.to_string()),
            custom: true,
        };
        self.collections
            .entry(key.to_string())
            .or_default()
            .push(card.clone());
        Ok(card)
    }

    /// Removes a card from a collection. Returns whether anything matched.
    pub fn delete_card(&mut self, key: &str, id: &CardId) -> bool {
        let Some(cards) = self.collections.get_mut(key) else {
            return false;
        };
        let before = cards.len();
        cards.retain(|card| card.id != *id);
        cards.len() != before
    }

    /// Replaces the whole store from exported JSON. Any validation failure
    /// leaves the current collections untouched.
    pub fn import(&mut self, raw: &str) -> anyhow::Result<usize> {
        let collections = parse_collections(raw)?;
        self.collections = collections;
        Ok(self.total())
    }

    pub fn export(&self) -> anyhow::Result<String> {
        let entries: BTreeMap<&str, Vec<CardEntry>> = self
            .collections
            .iter()
            .map(|(key, cards)| (key.as_str(), cards.iter().map(CardEntry::from).collect()))
            .collect();
        serde_json::to_string_pretty(&entries).context("render custom cards")
    }

    pub fn persist(&self) -> anyhow::Result<()> {
        let Some(path) = self.path.as_deref() else {
            bail!("no cards file configured");
        };
        fs::write(path, self.export()?).with_context(|| format!("write {}", path.display()))
    }

    /// Ids follow the exported shape other builds produce, uniquified in
    /// case two cards land on the same millisecond.
    fn next_id(&self, key: &str) -> CardId {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or(0);
        let mut candidate = format!("custom-{key}-{millis}");
        let mut bump = 1u32;
        while self.id_taken(&candidate) {
            candidate = format!("custom-{key}-{millis}-{bump}");
            bump += 1;
        }
        CardId::Text(candidate)
    }

    fn id_taken(&self, candidate: &str) -> bool {
        self.collections
            .values()
            .flatten()
            .any(|card| matches!(&card.id, CardId::Text(text) if text == candidate))
    }
}

pub fn valid_key(key: &str) -> bool {
    key == SHARED_KEY || key.starts_with("team")
}

fn normalize_definition(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        "Custom card".to_string()
    } else {
        trimmed.to_string()
    }
}

fn parse_collections(raw: &str) -> anyhow::Result<BTreeMap<String, Vec<Card>>> {
    let value: serde_json::Value =
        serde_json::from_str(raw).map_err(|_| anyhow!("invalid JSON structure"))?;
    let Some(object) = value.as_object() else {
        bail!("invalid JSON structure");
    };
    let mut collections = BTreeMap::new();
    let mut seen = BTreeSet::new();
    for (key, cards_value) in object {
        if !valid_key(key) {
            bail!("invalid key format: expected \"team1\", \"team2\", etc., or \"shared\"");
        }
        let Some(items) = cards_value.as_array() else {
            bail!("cards under {key:?} must be an array");
        };
        let mut cards = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            let entry: CardEntry = serde_json::from_value(item.clone())
                .map_err(|_| anyhow!("invalid JSON structure"))?;
            if entry.name.trim().is_empty() {
                bail!("each card must have a name");
            }
            let difficulty = match entry.difficulty {
                Some(rank) => Difficulty::try_from(rank).map_err(|err| anyhow!(err))?,
                None => Difficulty::Easy,
            };
            let id = match entry.id {
                Some(id) => id,
                None => CardId::Text(format!("custom-{key}-import-{index}")),
            };
            if !seen.insert(id.clone()) {
                bail!("duplicate card id {id}");
            }
            cards.push(Card {
                id,
                name: entry.name.trim().to_string(),
                difficulty,
                definition: normalize_definition(&entry.definition),
                team: Some(key.clone()),
                created_by: entry.created_by,
                custom: true,
            });
        }
        collections.insert(key.clone(), cards);
    }
    Ok(collections)
}
