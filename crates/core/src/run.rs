use crate::{Card, CardId, MatchConfig, RngState, RoundRecord, TurnRecord, TurnTimer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use thiserror::Error;

mod rambo;
mod round;
mod setup;
mod turn;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("team count {0} out of range (2-6)")]
    InvalidTeamCount(u8),
    #[error("no cards match the difficulty filter")]
    EmptyDeck,
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("no card is displayed")]
    NoCurrentCard,
    #[error("rambo not available")]
    RamboUnavailable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Drawing,
    TurnComplete,
    RoundComplete,
    GameComplete,
}

/// What the active team is looking at while `Phase::Drawing`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DrawState {
    /// A card is up; `current` is `Some`.
    Showing,
    /// The current pool ran dry and an escalation can be taken.
    RamboOffer,
    /// Nothing left to draw; ending the turn is the only move.
    Exhausted,
}

/// Whole state of a team match. One controller owns it and mutates it
/// only through the action methods, which either complete a transition or
/// return an error leaving everything untouched.
///
/// Card exclusion runs at three scopes: `turn_shown` covers the active
/// team's turn, `round_used` covers the round across teams, and
/// `original_deck` is the immutable game-scope snapshot the escalation
/// pools are computed against. Scored cards enter `round_used`
/// immediately; the rest of a turn's shown cards enter when that turn
/// ends, so a team's own skips stay replayable until it hands the device
/// over.
#[derive(Debug)]
pub struct MatchState {
    pub config: MatchConfig,
    pub rng: RngState,
    pub phase: Phase,
    pub round: u8,
    pub team: u8,
    /// Current round's deck in shuffle order; never reshuffled mid-round.
    pub deck: Vec<Card>,
    /// Snapshot of the round-1 deck, after filter and shuffle.
    pub original_deck: Vec<Card>,
    pub round_used: BTreeSet<CardId>,
    pub turn_shown: BTreeSet<CardId>,
    /// Cards dealt from an escalation pool since it was activated.
    pub rambo_shown: BTreeSet<CardId>,
    pub rambo_level: u8,
    pub current: Option<Card>,
    pub draw_state: DrawState,
    /// The active team's in-progress record.
    pub turn: TurnRecord,
    /// One record per started round; the last entry is the live one.
    pub rounds: Vec<RoundRecord>,
    pub timer: TurnTimer,
}
