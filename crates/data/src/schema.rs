use minikers_core::{Card, CardId};
use serde::{Deserialize, Serialize};

/// Card entry as written in catalog files and custom-card files. Every
/// field beyond the name is optional so exports from other builds keep
/// loading; validation decides what a given context requires.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CardId>,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<u8>,
    #[serde(default)]
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team: Option<String>,
    #[serde(default, rename = "createdBy", skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub custom: bool,
}

impl From<&Card> for CardEntry {
    fn from(card: &Card) -> Self {
        Self {
            id: Some(card.id.clone()),
            name: card.name.clone(),
            difficulty: Some(card.difficulty.rank()),
            definition: card.definition.clone(),
            team: card.team.clone(),
            created_by: card.created_by.clone(),
            custom: card.custom,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_tolerates_sparse_records() {
        let entry: CardEntry =
            serde_json::from_str(r#"{"name": "Llama drama"}"#).expect("sparse entry parses");
        assert_eq!(entry.name, "Llama drama");
        assert!(entry.id.is_none());
        assert!(entry.difficulty.is_none());
        assert!(!entry.custom);
    }

    #[test]
    fn entry_accepts_both_id_shapes() {
        let numeric: CardEntry =
            serde_json::from_str(r#"{"id": 12, "name": "x"}"#).expect("numeric id");
        assert_eq!(numeric.id, Some(CardId::from(12)));
        let text: CardEntry =
            serde_json::from_str(r#"{"id": "custom-shared-9", "name": "x"}"#).expect("string id");
        assert_eq!(text.id, Some(CardId::from("custom-shared-9")));
    }
}
