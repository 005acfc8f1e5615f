use crate::{Card, CardId, DifficultyFilter, RngState};
use std::collections::BTreeSet;

/// Builds a fresh playing deck: the pool filtered by difficulty, then
/// shuffled. The pool itself is never mutated.
pub fn build_deck(pool: &[Card], filter: DifficultyFilter, rng: &mut RngState) -> Vec<Card> {
    let mut deck: Vec<Card> = pool
        .iter()
        .filter(|card| filter.allows(card.difficulty))
        .cloned()
        .collect();
    rng.shuffle(&mut deck);
    deck
}

/// Maximum score a deck can yield in one round.
pub fn deck_points(deck: &[Card]) -> u32 {
    deck.iter().map(|card| card.difficulty.points()).sum()
}

/// Next card in deck order that no team has seen this round and the
/// active team has not seen this turn.
pub fn next_eligible<'a>(
    deck: &'a [Card],
    round_used: &BTreeSet<CardId>,
    turn_shown: &BTreeSet<CardId>,
) -> Option<&'a Card> {
    deck.iter()
        .find(|card| !round_used.contains(&card.id) && !turn_shown.contains(&card.id))
}

/// Counts per difficulty rank, for catalog summaries.
pub fn difficulty_counts(pool: &[Card]) -> [usize; 3] {
    let mut counts = [0usize; 3];
    for card in pool {
        counts[(card.difficulty.rank() - 1) as usize] += 1;
    }
    counts
}
