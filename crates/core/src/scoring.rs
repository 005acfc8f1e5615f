use crate::Card;
use serde::{Deserialize, Serialize};

/// One team's results for one turn. `possible` is the full deck value for
/// the round, the score a team would reach by clearing every card alone.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TurnRecord {
    pub team: u8,
    pub scored: Vec<Card>,
    pub skipped: Vec<Card>,
    pub points: u32,
    pub possible: u32,
}

impl TurnRecord {
    pub fn new(team: u8, possible: u32) -> Self {
        Self {
            team,
            scored: Vec::new(),
            skipped: Vec::new(),
            points: 0,
            possible,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoundRecord {
    pub round: u8,
    pub possible: u32,
    /// Turn records in play order, one per team once the round is done.
    pub turns: Vec<TurnRecord>,
}

impl RoundRecord {
    pub fn points(&self) -> u32 {
        self.turns.iter().map(|turn| turn.points).sum()
    }

    /// Every card scored this round, team by team in play order. These are
    /// the cards that move on to the next round's deck.
    pub fn carryover(&self) -> Vec<Card> {
        let mut cards = Vec::new();
        for turn in &self.turns {
            cards.extend(turn.scored.iter().cloned());
        }
        cards
    }

    /// Share of the deck's value captured by all teams together.
    pub fn percent(&self) -> u32 {
        if self.possible == 0 {
            return 0;
        }
        self.points() * 100 / self.possible
    }

    pub fn team_points(&self, team: u8) -> u32 {
        self.turns
            .iter()
            .find(|turn| turn.team == team)
            .map(|turn| turn.points)
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TeamStanding {
    pub team: u8,
    pub points: u32,
    pub possible: u32,
    /// `(round, points)` pairs for the rounds this team has played.
    pub by_round: Vec<(u8, u32)>,
}

/// Totals per team over all recorded rounds, best first; ties keep team
/// order.
pub fn standings(rounds: &[RoundRecord]) -> Vec<TeamStanding> {
    let mut teams: Vec<u8> = Vec::new();
    for round in rounds {
        for turn in &round.turns {
            if !teams.contains(&turn.team) {
                teams.push(turn.team);
            }
        }
    }
    teams.sort_unstable();
    let mut entries: Vec<TeamStanding> = teams
        .into_iter()
        .map(|team| {
            let mut points = 0;
            let mut possible = 0;
            let mut by_round = Vec::new();
            for round in rounds {
                if let Some(turn) = round.turns.iter().find(|turn| turn.team == team) {
                    points += turn.points;
                    possible += turn.possible;
                    by_round.push((round.round, turn.points));
                }
            }
            TeamStanding {
                team,
                points,
                possible,
                by_round,
            }
        })
        .collect();
    entries.sort_by(|a, b| b.points.cmp(&a.points).then(a.team.cmp(&b.team)));
    entries
}

/// `None` when the lead is shared.
pub fn winning_team(entries: &[TeamStanding]) -> Option<u8> {
    let leader = entries.first()?;
    let tied = entries
        .iter()
        .filter(|entry| entry.points == leader.points)
        .count();
    if tied == 1 {
        Some(leader.team)
    } else {
        None
    }
}
