use serde::{Deserialize, Serialize};
use std::fmt;

/// Catalog cards carry numeric ids; cards made in the studio carry
/// generated string ids, so both shapes round-trip through JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(untagged)]
pub enum CardId {
    Num(u64),
    Text(String),
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CardId::Num(value) => write!(f, "{value}"),
            CardId::Text(value) => f.write_str(value),
        }
    }
}

impl From<u64> for CardId {
    fn from(value: u64) -> Self {
        CardId::Num(value)
    }
}

impl From<&str> for CardId {
    fn from(value: &str) -> Self {
        CardId::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    pub fn rank(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    /// Scoring weight: harder cards are worth more.
    pub fn points(self) -> u32 {
        self.rank() as u32
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn stars(self) -> &'static str {
        match self {
            Difficulty::Easy => "*",
            Difficulty::Medium => "**",
            Difficulty::Hard => "***",
        }
    }
}

impl TryFrom<u8> for Difficulty {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Difficulty::Easy),
            2 => Ok(Difficulty::Medium),
            3 => Ok(Difficulty::Hard),
            other => Err(format!("difficulty {other} out of range (1-3)")),
        }
    }
}

impl From<Difficulty> for u8 {
    fn from(value: Difficulty) -> Self {
        value.rank()
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    pub fn allows(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(wanted) => wanted == difficulty,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DifficultyFilter::All => "All",
            DifficultyFilter::Only(difficulty) => difficulty.label(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Card {
    pub id: CardId,
    pub name: String,
    pub difficulty: Difficulty,
    #[serde(default)]
    pub definition: String,
    /// Studio collection the card belongs to ("team1".."team6" or "shared").
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default, rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub custom: bool,
}

impl Card {
    pub fn catalog(id: u64, name: &str, difficulty: Difficulty, definition: &str) -> Self {
        Self {
            id: CardId::Num(id),
            name: name.to_string(),
            difficulty,
            definition: definition.to_string(),
            team: None,
            created_by: None,
            custom: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn difficulty_points_match_rank() {
        assert_eq!(Difficulty::Easy.points(), 1);
        assert_eq!(Difficulty::Medium.points(), 2);
        assert_eq!(Difficulty::Hard.points(), 3);
    }

    #[test]
    fn difficulty_rejects_out_of_range() {
        assert!(Difficulty::try_from(0).is_err());
        assert!(Difficulty::try_from(4).is_err());
        assert_eq!(Difficulty::try_from(2).expect("valid"), Difficulty::Medium);
    }

    #[test]
    fn filter_all_allows_everything() {
        for difficulty in Difficulty::ALL {
            assert!(DifficultyFilter::All.allows(difficulty));
        }
        let only_hard = DifficultyFilter::Only(Difficulty::Hard);
        assert!(only_hard.allows(Difficulty::Hard));
        assert!(!only_hard.allows(Difficulty::Easy));
    }

    #[test]
    fn card_id_orders_and_displays() {
        let numeric = CardId::from(7);
        let text = CardId::from("custom-shared-12");
        assert_eq!(numeric.to_string(), "7");
        assert_eq!(text.to_string(), "custom-shared-12");
        assert_ne!(numeric, text);
    }
}
