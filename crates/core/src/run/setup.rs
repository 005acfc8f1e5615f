use super::*;
use crate::{build_deck, deck_points, Event, EventBus, MAX_TEAMS, MIN_TEAMS};

impl MatchState {
    /// Builds the round-1 deck (filter, then shuffle) and snapshots it.
    /// Nothing is dealt until `start`, so tools and tests may still swap
    /// the deck out first.
    pub fn new(config: MatchConfig, pool: &[Card], seed: u64) -> Self {
        let mut rng = RngState::from_seed(seed);
        let deck = build_deck(pool, config.filter, &mut rng);
        let original_deck = deck.clone();
        let timer = TurnTimer::new(config.turn_seconds);
        Self {
            config,
            rng,
            phase: Phase::Setup,
            round: 1,
            team: 1,
            deck,
            original_deck,
            round_used: BTreeSet::new(),
            turn_shown: BTreeSet::new(),
            rambo_shown: BTreeSet::new(),
            rambo_level: 0,
            current: None,
            draw_state: DrawState::Showing,
            turn: TurnRecord::new(1, 0),
            rounds: Vec::new(),
            timer,
        }
    }

    /// Validates the setup and deals the first card to team 1. On error
    /// the match stays in `Setup` untouched.
    pub fn start(&mut self, events: &mut EventBus) -> Result<(), MatchError> {
        if self.phase != Phase::Setup {
            return Err(MatchError::InvalidPhase(self.phase));
        }
        if self.config.teams < MIN_TEAMS || self.config.teams > MAX_TEAMS {
            return Err(MatchError::InvalidTeamCount(self.config.teams));
        }
        if self.deck.is_empty() {
            return Err(MatchError::EmptyDeck);
        }
        let possible = deck_points(&self.deck);
        self.rounds.push(RoundRecord {
            round: 1,
            possible,
            turns: Vec::new(),
        });
        events.push(Event::MatchStarted {
            teams: self.config.teams,
            cards: self.deck.len(),
            possible,
        });
        events.push(Event::RoundStarted {
            round: 1,
            cards: self.deck.len(),
        });
        self.phase = Phase::Drawing;
        self.open_turn(events);
        Ok(())
    }
}
