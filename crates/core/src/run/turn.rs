use super::*;
use crate::{next_eligible, Event, EventBus, TimerTick};

impl MatchState {
    pub fn score_current(&mut self, events: &mut EventBus) -> Result<(), MatchError> {
        if self.phase != Phase::Drawing {
            return Err(MatchError::InvalidPhase(self.phase));
        }
        let card = self.current.take().ok_or(MatchError::NoCurrentCard)?;
        let points = card.difficulty.points();
        self.round_used.insert(card.id.clone());
        self.turn.points += points;
        events.push(Event::CardScored {
            team: self.team,
            name: card.name.clone(),
            points,
        });
        // a replayed skip that lands counts as scored only
        self.turn.skipped.retain(|skipped| skipped.id != card.id);
        self.turn.scored.push(card);
        self.deal_next(events);
        Ok(())
    }

    pub fn skip_current(&mut self, events: &mut EventBus) -> Result<(), MatchError> {
        if self.phase != Phase::Drawing {
            return Err(MatchError::InvalidPhase(self.phase));
        }
        let card = self.current.take().ok_or(MatchError::NoCurrentCard)?;
        events.push(Event::CardSkipped {
            team: self.team,
            name: card.name.clone(),
        });
        if !self.turn.skipped.iter().any(|skipped| skipped.id == card.id) {
            self.turn.skipped.push(card);
        }
        self.deal_next(events);
        Ok(())
    }

    pub fn end_turn(&mut self, events: &mut EventBus) -> Result<(), MatchError> {
        if self.phase != Phase::Drawing {
            return Err(MatchError::InvalidPhase(self.phase));
        }
        self.finish_turn(events);
        Ok(())
    }

    /// Next team takes over after the hand-the-device break.
    pub fn begin_turn(&mut self, events: &mut EventBus) -> Result<(), MatchError> {
        if self.phase != Phase::TurnComplete {
            return Err(MatchError::InvalidPhase(self.phase));
        }
        self.phase = Phase::Drawing;
        self.open_turn(events);
        Ok(())
    }

    pub fn start_timer(&mut self) {
        self.timer.start();
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
    }

    /// One second of wall time. Expiry ends the active turn on the spot,
    /// card up or not.
    pub fn tick(&mut self, events: &mut EventBus) -> TimerTick {
        let tick = self.timer.tick();
        if tick == TimerTick::Expired {
            events.push(Event::TimeUp {
                round: self.round,
                team: self.team,
            });
            if self.phase == Phase::Drawing {
                self.finish_turn(events);
            }
        }
        tick
    }

    /// Cards of the round deck still undealt for the active team.
    pub fn cards_left(&self) -> usize {
        self.deck
            .iter()
            .filter(|card| {
                !self.round_used.contains(&card.id) && !self.turn_shown.contains(&card.id)
            })
            .count()
    }

    pub(super) fn open_turn(&mut self, events: &mut EventBus) {
        let possible = self.rounds.last().map(|round| round.possible).unwrap_or(0);
        self.turn = TurnRecord::new(self.team, possible);
        self.turn_shown.clear();
        self.rambo_shown.clear();
        self.rambo_level = 0;
        self.timer.reset();
        events.push(Event::TurnStarted {
            round: self.round,
            team: self.team,
        });
        self.deal_next(events);
    }

    pub(super) fn finish_turn(&mut self, events: &mut EventBus) {
        // everything shown this turn is spent for the round, resolved or not
        let shown = std::mem::take(&mut self.turn_shown);
        self.round_used.extend(shown);
        self.rambo_shown.clear();
        self.rambo_level = 0;
        self.current = None;
        self.draw_state = DrawState::Showing;
        self.timer.reset();
        let record = std::mem::replace(&mut self.turn, TurnRecord::new(0, 0));
        events.push(Event::TurnEnded {
            round: self.round,
            team: record.team,
            points: record.points,
            scored: record.scored.len(),
            skipped: record.skipped.len(),
        });
        if let Some(round) = self.rounds.last_mut() {
            round.turns.push(record);
        }
        if self.team < self.config.teams {
            self.team += 1;
            self.phase = Phase::TurnComplete;
        } else {
            self.phase = Phase::RoundComplete;
        }
    }

    /// Deals from whichever pool the rambo level selects. An empty pool
    /// moves to the escalation offer where one exists: never in round 1
    /// (the whole deck is fresh, there is nothing to fall back on) and
    /// never past level 2.
    pub(super) fn deal_next(&mut self, events: &mut EventBus) {
        let next = match self.rambo_level {
            0 => next_eligible(&self.deck, &self.round_used, &self.turn_shown).cloned(),
            1 => self.rambo_skip_pool().into_iter().next(),
            _ => self.rambo_cut_pool().into_iter().next(),
        };
        match next {
            Some(card) => {
                self.turn_shown.insert(card.id.clone());
                if self.rambo_level > 0 {
                    self.rambo_shown.insert(card.id.clone());
                }
                self.current = Some(card);
                self.draw_state = DrawState::Showing;
            }
            None => {
                self.current = None;
                events.push(Event::DeckEmpty {
                    round: self.round,
                    team: self.team,
                });
                let offer_left = match self.rambo_level {
                    0 => self.round > 1,
                    1 => true,
                    _ => false,
                };
                self.draw_state = if offer_left {
                    DrawState::RamboOffer
                } else {
                    DrawState::Exhausted
                };
            }
        }
    }
}
