use crate::DifficultyFilter;
use serde::{Deserialize, Serialize};

pub const MIN_TEAMS: u8 = 2;
pub const MAX_TEAMS: u8 = 6;
pub const ROUNDS_PER_MATCH: u8 = 3;
pub const TURN_SECONDS: u32 = 60;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GameMode {
    Quick,
    Monikers,
}

impl GameMode {
    pub fn label(self) -> &'static str {
        match self {
            GameMode::Quick => "Quick Play",
            GameMode::Monikers => "Monikers",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatchConfig {
    pub teams: u8,
    pub filter: DifficultyFilter,
    pub turn_seconds: u32,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            teams: MIN_TEAMS,
            filter: DifficultyFilter::All,
            turn_seconds: TURN_SECONDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRules {
    pub title: &'static str,
    pub description: &'static str,
}

/// House rules per round; anything past the third falls back to the
/// free-play wording.
pub fn round_rules(round: u8) -> RoundRules {
    match round {
        1 => RoundRules {
            title: "Anything Goes",
            description: "Use any words, sounds, or gestures except the name itself.",
        },
        2 => RoundRules {
            title: "One Word Only",
            description: "Describe the card using only one word.",
        },
        3 => RoundRules {
            title: "Just Charades",
            description: "Act it out. No words allowed.",
        },
        _ => RoundRules {
            title: "Quick Play",
            description: "Endless cards, no scores. Practice your acting skills.",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_playable() {
        let config = MatchConfig::default();
        assert!(config.teams >= MIN_TEAMS && config.teams <= MAX_TEAMS);
        assert_eq!(config.turn_seconds, TURN_SECONDS);
    }

    #[test]
    fn each_round_has_distinct_rules() {
        let titles: Vec<&str> = (1..=ROUNDS_PER_MATCH).map(|r| round_rules(r).title).collect();
        assert_eq!(titles.len(), 3);
        assert!(titles.windows(2).all(|pair| pair[0] != pair[1]));
        assert_eq!(round_rules(9).title, "Quick Play");
    }
}
