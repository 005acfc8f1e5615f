use super::*;
use crate::{Event, EventBus};

impl MatchState {
    /// Level-1 pool: the active team's skips, minus any resolved this
    /// round and any already replayed since the pool was activated.
    pub fn rambo_skip_pool(&self) -> Vec<Card> {
        self.turn
            .skipped
            .iter()
            .filter(|card| {
                !self.round_used.contains(&card.id) && !self.rambo_shown.contains(&card.id)
            })
            .cloned()
            .collect()
    }

    /// Level-2 pool: cards of the opening deck that were cut from the
    /// current round's deck and have not been used this round. One
    /// definition, applied on every path.
    pub fn rambo_cut_pool(&self) -> Vec<Card> {
        let in_deck: BTreeSet<&CardId> = self.deck.iter().map(|card| &card.id).collect();
        self.original_deck
            .iter()
            .filter(|card| {
                !in_deck.contains(&card.id)
                    && !self.round_used.contains(&card.id)
                    && !self.rambo_shown.contains(&card.id)
            })
            .cloned()
            .collect()
    }

    /// Manual escalation from the offer screen. Level 0 goes to the skip
    /// replays, or straight to the cut cards when the team has nothing
    /// unresolved to replay; level 1 goes to the cut cards. An empty
    /// level-2 pool falls through to `Exhausted` via the deal.
    pub fn activate_rambo(&mut self, events: &mut EventBus) -> Result<(), MatchError> {
        if self.phase != Phase::Drawing || self.draw_state != DrawState::RamboOffer {
            return Err(MatchError::RamboUnavailable);
        }
        self.rambo_shown.clear();
        if self.rambo_level == 0 && !self.rambo_skip_pool().is_empty() {
            self.rambo_level = 1;
        } else {
            self.rambo_level = 2;
        }
        let pool = match self.rambo_level {
            1 => self.rambo_skip_pool(),
            _ => self.rambo_cut_pool(),
        };
        events.push(Event::RamboActivated {
            team: self.team,
            level: self.rambo_level,
            pool: pool.len(),
        });
        self.deal_next(events);
        Ok(())
    }
}
