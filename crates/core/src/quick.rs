use crate::{Card, CardId, DifficultyFilter, RngState, TimerTick, TurnTimer};
use std::collections::BTreeSet;

/// Free-play drawing with no teams and no scores: uniform random cards,
/// never repeating until the filtered pool runs dry, then the exclusion
/// set clears and the cycle restarts.
#[derive(Debug)]
pub struct QuickSession {
    pub filter: DifficultyFilter,
    pub rng: RngState,
    pub pool: Vec<Card>,
    pub shown: BTreeSet<CardId>,
    pub current: Option<Card>,
    pub timer: TurnTimer,
    /// Display-only tally; resets with the timer and never feeds back into
    /// drawing.
    pub cards_completed: u32,
}

impl QuickSession {
    pub fn new(pool: Vec<Card>, filter: DifficultyFilter, turn_seconds: u32, seed: u64) -> Self {
        Self {
            filter,
            rng: RngState::from_seed(seed),
            pool,
            shown: BTreeSet::new(),
            current: None,
            timer: TurnTimer::new(turn_seconds),
            cards_completed: 0,
        }
    }

    /// `None` only when no card in the pool matches the filter at all.
    pub fn draw(&mut self) -> Option<&Card> {
        let mut candidates = self.candidate_indices();
        if candidates.is_empty() && !self.shown.is_empty() {
            self.shown.clear();
            candidates = self.candidate_indices();
        }
        let slot = self.rng.pick(candidates.len())?;
        let card = self.pool[candidates[slot]].clone();
        self.shown.insert(card.id.clone());
        if self.timer.running && self.current.is_some() {
            self.cards_completed += 1;
        }
        self.current = Some(card);
        self.current.as_ref()
    }

    pub fn start_timer(&mut self) {
        self.timer.start();
        self.cards_completed = 0;
    }

    pub fn pause_timer(&mut self) {
        self.timer.pause();
    }

    pub fn reset_timer(&mut self) {
        self.timer.reset();
        self.cards_completed = 0;
    }

    pub fn tick(&mut self) -> TimerTick {
        self.timer.tick()
    }

    fn candidate_indices(&self) -> Vec<usize> {
        self.pool
            .iter()
            .enumerate()
            .filter(|(_, card)| {
                self.filter.allows(card.difficulty) && !self.shown.contains(&card.id)
            })
            .map(|(index, _)| index)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Difficulty;

    fn pool() -> Vec<Card> {
        vec![
            Card::catalog(1, "Sneezing", Difficulty::Easy, ""),
            Card::catalog(2, "Karaoke", Difficulty::Medium, ""),
            Card::catalog(3, "Black hole", Difficulty::Hard, ""),
        ]
    }

    #[test]
    fn draws_every_card_before_repeating() {
        let mut session = QuickSession::new(pool(), DifficultyFilter::All, 60, 5);
        let mut seen = BTreeSet::new();
        for _ in 0..3 {
            let card = session.draw().expect("pool not empty");
            seen.insert(card.id.clone());
        }
        assert_eq!(seen.len(), 3);
        // the exclusion set has cleared, a fourth draw still works
        let fourth = session.draw().expect("cycle restarts");
        assert!(seen.contains(&fourth.id));
    }

    #[test]
    fn filter_narrows_the_cycle() {
        let mut session =
            QuickSession::new(pool(), DifficultyFilter::Only(Difficulty::Hard), 60, 5);
        for _ in 0..5 {
            let card = session.draw().expect("one hard card");
            assert_eq!(card.difficulty, Difficulty::Hard);
        }
    }

    #[test]
    fn empty_filtered_pool_draws_nothing() {
        let easy_only = vec![Card::catalog(1, "Waving", Difficulty::Easy, "")];
        let mut session =
            QuickSession::new(easy_only, DifficultyFilter::Only(Difficulty::Hard), 60, 5);
        assert!(session.draw().is_none());
        assert!(session.current.is_none());
    }

    #[test]
    fn completed_counter_needs_a_running_timer_and_a_previous_card() {
        let mut session = QuickSession::new(pool(), DifficultyFilter::All, 60, 5);
        session.draw();
        assert_eq!(session.cards_completed, 0);
        session.start_timer();
        session.draw();
        // first draw after start had a card up already
        assert_eq!(session.cards_completed, 1);
        session.draw();
        assert_eq!(session.cards_completed, 2);
        session.pause_timer();
        session.draw();
        assert_eq!(session.cards_completed, 2);
        session.start_timer();
        assert_eq!(session.cards_completed, 0);
    }

    #[test]
    fn timer_reset_zeroes_the_counter() {
        let mut session = QuickSession::new(pool(), DifficultyFilter::All, 60, 5);
        session.start_timer();
        session.draw();
        session.draw();
        assert_eq!(session.cards_completed, 1);
        session.reset_timer();
        assert_eq!(session.cards_completed, 0);
        assert!(!session.timer.running);
    }
}
