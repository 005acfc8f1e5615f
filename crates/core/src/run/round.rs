use super::*;
use crate::{deck_points, standings, winning_team, Event, EventBus, TeamStanding, ROUNDS_PER_MATCH};

impl MatchState {
    /// Closes the finished round. Scored cards from every team, in play
    /// order, become the next round's deck (reshuffled); an empty
    /// carryover ends the game early no matter the round number.
    pub fn complete_round(&mut self, events: &mut EventBus) -> Result<(), MatchError> {
        if self.phase != Phase::RoundComplete {
            return Err(MatchError::InvalidPhase(self.phase));
        }
        let Some(record) = self.rounds.last() else {
            return Err(MatchError::InvalidPhase(self.phase));
        };
        let finished = record.round;
        let carryover = record.carryover();
        events.push(Event::RoundEnded {
            round: finished,
            points: record.points(),
            possible: record.possible,
            carried: carryover.len(),
        });
        if finished >= ROUNDS_PER_MATCH || carryover.is_empty() {
            self.finish_match(events);
            return Ok(());
        }
        let mut deck = carryover;
        self.rng.shuffle(&mut deck);
        self.round = finished + 1;
        self.team = 1;
        self.deck = deck;
        self.round_used = BTreeSet::new();
        let possible = deck_points(&self.deck);
        self.rounds.push(RoundRecord {
            round: self.round,
            possible,
            turns: Vec::new(),
        });
        events.push(Event::RoundStarted {
            round: self.round,
            cards: self.deck.len(),
        });
        self.phase = Phase::Drawing;
        self.open_turn(events);
        Ok(())
    }

    pub fn standings(&self) -> Vec<TeamStanding> {
        standings(&self.rounds)
    }

    fn finish_match(&mut self, events: &mut EventBus) {
        self.phase = Phase::GameComplete;
        self.current = None;
        let entries = self.standings();
        let points = entries.first().map(|entry| entry.points).unwrap_or(0);
        events.push(Event::MatchEnded {
            winner: winning_team(&entries),
            points,
        });
    }
}
