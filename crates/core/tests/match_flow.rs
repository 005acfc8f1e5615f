use minikers_core::{
    Card, CardId, Difficulty, DrawState, EventBus, MatchConfig, MatchError, MatchState, Phase,
    TimerTick, Event,
};
use std::collections::BTreeSet;

fn card(id: u64, difficulty: Difficulty) -> Card {
    Card::catalog(id, &format!("card {id}"), difficulty, "a thing to act out")
}

/// Odd ids are easy (1 point), even ids medium (2 points).
fn pool_of(ids: &[u64]) -> Vec<Card> {
    ids.iter()
        .map(|&id| {
            card(
                id,
                if id % 2 == 0 {
                    Difficulty::Medium
                } else {
                    Difficulty::Easy
                },
            )
        })
        .collect()
}

fn two_team_match(ids: &[u64]) -> MatchState {
    MatchState::new(
        MatchConfig {
            teams: 2,
            ..MatchConfig::default()
        },
        &pool_of(ids),
        99,
    )
}

/// Forces the round-1 deck into a known order before dealing starts.
fn force_deck(state: &mut MatchState, order: &[u64]) {
    let pool = state.deck.clone();
    state.deck = order
        .iter()
        .map(|&id| {
            pool.iter()
                .find(|card| card.id == CardId::from(id))
                .cloned()
                .expect("card in deck")
        })
        .collect();
    state.original_deck = state.deck.clone();
}

fn current_id(state: &MatchState) -> CardId {
    state.current.as_ref().expect("card displayed").id.clone()
}

#[test]
fn two_team_round_one_walkthrough() {
    let mut state = two_team_match(&[1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
    force_deck(&mut state, &[3, 7, 1, 9, 2, 8, 4, 10, 5, 6]);
    let mut events = EventBus::default();
    state.start(&mut events).expect("match starts");

    // team 1 takes the first six in shuffle order
    for expected in [3u64, 7, 1, 9, 2, 8] {
        assert_eq!(current_id(&state), CardId::from(expected));
        state.score_current(&mut events).expect("score");
    }
    // 4 easy + 2 medium, points follow difficulty, not count
    assert_eq!(state.turn.points, 4 * 1 + 2 * 2);

    // the last four get skipped; the deck runs dry in round 1, where no
    // escalation exists
    for expected in [4u64, 10, 5, 6] {
        assert_eq!(current_id(&state), CardId::from(expected));
        state.skip_current(&mut events).expect("skip");
    }
    assert!(state.current.is_none());
    assert_eq!(state.draw_state, DrawState::Exhausted);
    assert!(matches!(
        state.activate_rambo(&mut events),
        Err(MatchError::RamboUnavailable)
    ));

    state.end_turn(&mut events).expect("turn ends");
    assert_eq!(state.phase, Phase::TurnComplete);
    assert_eq!(state.team, 2);
    assert_eq!(state.round_used.len(), 10);
    let team1 = &state.rounds[0].turns[0];
    assert_eq!(team1.team, 1);
    assert_eq!(team1.points, 8);
    assert_eq!(team1.scored.len(), 6);
    assert_eq!(team1.skipped.len(), 4);
    assert_eq!(team1.possible, 5 * 1 + 5 * 2);

    // team 2 finds every card already used and no pool to fall back on
    state.begin_turn(&mut events).expect("team 2 starts");
    assert!(state.current.is_none());
    assert_eq!(state.draw_state, DrawState::Exhausted);
    assert!(state.rambo_skip_pool().is_empty());
    assert!(state.rambo_cut_pool().is_empty());
    assert!(matches!(
        state.activate_rambo(&mut events),
        Err(MatchError::RamboUnavailable)
    ));
    state.end_turn(&mut events).expect("turn ends at once");

    // a scoreless team still gets a record
    assert_eq!(state.phase, Phase::RoundComplete);
    let team2 = &state.rounds[0].turns[1];
    assert_eq!(team2.team, 2);
    assert_eq!(team2.points, 0);

    // round 2 plays only what was scored, reshuffled, exclusions reset
    state.complete_round(&mut events).expect("round 2 opens");
    assert_eq!(state.phase, Phase::Drawing);
    assert_eq!(state.round, 2);
    assert_eq!(state.team, 1);
    assert_eq!(state.deck.len(), 6);
    let deck_ids: BTreeSet<CardId> = state.deck.iter().map(|card| card.id.clone()).collect();
    let scored_ids: BTreeSet<CardId> =
        [3u64, 7, 1, 9, 2, 8].iter().map(|&id| CardId::from(id)).collect();
    assert_eq!(deck_ids, scored_ids);
    assert_eq!(state.rounds[1].possible, 8);
    assert_eq!(state.round_used.len(), 0);
    assert!(state.current.is_some());
}

#[test]
fn no_card_reaches_two_teams_in_one_round() {
    let mut state = two_team_match(&[1, 2, 3, 4, 5, 6]);
    let mut events = EventBus::default();
    state.start(&mut events).expect("match starts");

    let mut team1_shown = BTreeSet::new();
    team1_shown.insert(current_id(&state));
    state.score_current(&mut events).expect("score");
    team1_shown.insert(current_id(&state));
    state.score_current(&mut events).expect("score");
    team1_shown.insert(current_id(&state));
    state.skip_current(&mut events).expect("skip");
    team1_shown.insert(current_id(&state));
    state.end_turn(&mut events).expect("turn over mid-deck");
    assert_eq!(team1_shown.len(), 4);

    state.begin_turn(&mut events).expect("team 2 starts");
    let mut team2_shown = BTreeSet::new();
    let mut used_before = state.round_used.clone();
    while state.current.is_some() {
        team2_shown.insert(current_id(&state));
        state.score_current(&mut events).expect("score");
        // the round-scope set only ever grows
        assert!(state.round_used.is_superset(&used_before));
        used_before = state.round_used.clone();
    }
    assert_eq!(team2_shown.len(), 2);
    assert!(team1_shown.is_disjoint(&team2_shown));
}

#[test]
fn rambo_replays_own_skips_then_escalates() {
    let mut state = two_team_match(&[1, 2, 3, 4]);
    let mut events = EventBus::default();
    state.start(&mut events).expect("match starts");

    // round 1: team 1 clears the whole deck so all four cards carry over
    while state.current.is_some() {
        state.score_current(&mut events).expect("score");
    }
    state.end_turn(&mut events).expect("turn over");
    state.begin_turn(&mut events).expect("team 2 starts");
    state.end_turn(&mut events).expect("nothing to play");
    state.complete_round(&mut events).expect("round 2 opens");
    assert_eq!(state.round, 2);

    // round 2, team 1: score, skip, skip, score, then the primary deck is
    // dry and the offer appears
    let first = current_id(&state);
    state.score_current(&mut events).expect("score");
    let skip_a = current_id(&state);
    state.skip_current(&mut events).expect("skip");
    let skip_b = current_id(&state);
    state.skip_current(&mut events).expect("skip");
    let last = current_id(&state);
    state.score_current(&mut events).expect("score");
    assert_eq!(state.draw_state, DrawState::RamboOffer);
    assert_eq!(state.rambo_level, 0);
    let pool: Vec<CardId> = state
        .rambo_skip_pool()
        .iter()
        .map(|card| card.id.clone())
        .collect();
    assert_eq!(pool, vec![skip_a.clone(), skip_b.clone()]);

    // level 1 walks the skip list in order
    state.activate_rambo(&mut events).expect("rambo");
    assert_eq!(state.rambo_level, 1);
    assert_eq!(current_id(&state), skip_a);
    state.score_current(&mut events).expect("replay lands");
    assert_eq!(current_id(&state), skip_b);
    // skipping a replay again does not loop it back immediately
    state.skip_current(&mut events).expect("skip again");
    assert_eq!(state.draw_state, DrawState::RamboOffer);
    assert_eq!(state.rambo_level, 1);

    // every original card survived into round 2, so level 2 has nothing
    state.activate_rambo(&mut events).expect("double rambo");
    assert_eq!(state.rambo_level, 2);
    assert_eq!(state.draw_state, DrawState::Exhausted);
    assert!(matches!(
        state.activate_rambo(&mut events),
        Err(MatchError::RamboUnavailable)
    ));

    state.end_turn(&mut events).expect("turn over");
    let record = &state.rounds[1].turns[0];
    // the landed replay moved from skipped to scored
    assert_eq!(record.skipped.len(), 1);
    assert_eq!(record.skipped[0].id, skip_b);
    assert_eq!(record.scored.len(), 3);
    assert!(record.scored.iter().any(|card| card.id == skip_a));
    assert!(record.scored.iter().any(|card| card.id == first));
    assert!(record.scored.iter().any(|card| card.id == last));
}

#[test]
fn rambo_jumps_straight_to_cut_cards_without_skips() {
    let mut state = two_team_match(&[1, 2, 3, 4, 5, 6]);
    let mut events = EventBus::default();
    state.start(&mut events).expect("match starts");

    // round 1: team 1 scores three, team 2 skips the rest, so round 2
    // cuts three cards from the deck
    let mut carried = BTreeSet::new();
    for _ in 0..3 {
        carried.insert(current_id(&state));
        state.score_current(&mut events).expect("score");
    }
    state.end_turn(&mut events).expect("turn over");
    state.begin_turn(&mut events).expect("team 2 starts");
    while state.current.is_some() {
        state.skip_current(&mut events).expect("skip");
    }
    state.end_turn(&mut events).expect("turn over");
    state.complete_round(&mut events).expect("round 2 opens");
    assert_eq!(state.deck.len(), 3);

    // team 1 clears the short deck with no skips; the offer must skip
    // level 1 entirely and surface the cut cards
    while state.current.is_some() {
        state.score_current(&mut events).expect("score");
    }
    assert_eq!(state.draw_state, DrawState::RamboOffer);
    assert!(state.rambo_skip_pool().is_empty());
    assert_eq!(state.rambo_cut_pool().len(), 3);
    state.activate_rambo(&mut events).expect("rambo");
    assert_eq!(state.rambo_level, 2);
    let mut replayed = BTreeSet::new();
    while state.current.is_some() {
        let id = current_id(&state);
        assert!(!carried.contains(&id));
        replayed.insert(id);
        state.score_current(&mut events).expect("last chance lands");
    }
    assert_eq!(replayed.len(), 3);
    assert_eq!(state.draw_state, DrawState::Exhausted);
    // all six cards resolved: the carried three plus the cut three
    assert_eq!(state.turn.points, 3 * 1 + 3 * 2);

    let activations: Vec<Event> = events
        .drain()
        .filter(|event| matches!(event, Event::RamboActivated { .. }))
        .collect();
    assert_eq!(
        activations,
        vec![Event::RamboActivated {
            team: 1,
            level: 2,
            pool: 3
        }]
    );
}

#[test]
fn empty_carryover_ends_the_game_early() {
    let mut state = two_team_match(&[1, 2, 3]);
    let mut events = EventBus::default();
    state.start(&mut events).expect("match starts");

    while state.current.is_some() {
        state.skip_current(&mut events).expect("skip");
    }
    state.end_turn(&mut events).expect("turn over");
    state.begin_turn(&mut events).expect("team 2 starts");
    state.end_turn(&mut events).expect("nothing left");
    state.complete_round(&mut events).expect("round closes");

    assert_eq!(state.phase, Phase::GameComplete);
    assert_eq!(state.rounds.len(), 1);
    let ended: Vec<Event> = events
        .drain()
        .filter(|event| matches!(event, Event::MatchEnded { .. }))
        .collect();
    assert_eq!(
        ended,
        vec![Event::MatchEnded {
            winner: None,
            points: 0
        }]
    );
}

#[test]
fn timer_expiry_ends_the_turn_exactly_once() {
    let mut state = MatchState::new(
        MatchConfig {
            teams: 2,
            turn_seconds: 3,
            ..MatchConfig::default()
        },
        &pool_of(&[1, 3, 5, 7]),
        7,
    );
    let mut events = EventBus::default();
    state.start(&mut events).expect("match starts");
    state.score_current(&mut events).expect("score");
    state.start_timer();

    assert_eq!(state.tick(&mut events), TimerTick::Running { remaining: 2 });
    assert_eq!(state.tick(&mut events), TimerTick::Running { remaining: 1 });
    // a card is still up when time runs out; the turn ends anyway
    assert!(state.current.is_some());
    assert_eq!(state.tick(&mut events), TimerTick::Expired);
    assert_eq!(state.phase, Phase::TurnComplete);
    assert!(state.current.is_none());

    // stopped timers stay silent
    assert_eq!(state.tick(&mut events), TimerTick::Idle);
    let drained: Vec<Event> = events.drain().collect();
    let time_ups = drained
        .iter()
        .filter(|event| matches!(event, Event::TimeUp { .. }))
        .count();
    let turn_ends = drained
        .iter()
        .filter(|event| matches!(event, Event::TurnEnded { .. }))
        .count();
    assert_eq!(time_ups, 1);
    assert_eq!(turn_ends, 1);
    assert_eq!(state.rounds[0].turns[0].points, 1);
}

#[test]
fn illegal_actions_fail_and_change_nothing() {
    let mut events = EventBus::default();

    let mut bad_teams = MatchState::new(
        MatchConfig {
            teams: 7,
            ..MatchConfig::default()
        },
        &pool_of(&[1, 2]),
        1,
    );
    assert!(matches!(
        bad_teams.start(&mut events),
        Err(MatchError::InvalidTeamCount(7))
    ));
    assert_eq!(bad_teams.phase, Phase::Setup);

    let mut empty = MatchState::new(
        MatchConfig {
            teams: 2,
            ..MatchConfig::default()
        },
        &[],
        1,
    );
    assert!(matches!(empty.start(&mut events), Err(MatchError::EmptyDeck)));
    assert_eq!(empty.phase, Phase::Setup);

    let mut state = two_team_match(&[1, 2, 3]);
    assert!(matches!(
        state.score_current(&mut events),
        Err(MatchError::InvalidPhase(Phase::Setup))
    ));
    state.start(&mut events).expect("match starts");
    assert!(matches!(
        state.start(&mut events),
        Err(MatchError::InvalidPhase(Phase::Drawing))
    ));
    assert!(matches!(
        state.begin_turn(&mut events),
        Err(MatchError::InvalidPhase(Phase::Drawing))
    ));
    assert!(matches!(
        state.activate_rambo(&mut events),
        Err(MatchError::RamboUnavailable)
    ));

    // run the deck dry, then resolving without a card is refused
    while state.current.is_some() {
        state.score_current(&mut events).expect("score");
    }
    assert!(matches!(
        state.score_current(&mut events),
        Err(MatchError::NoCurrentCard)
    ));
    assert!(matches!(
        state.skip_current(&mut events),
        Err(MatchError::NoCurrentCard)
    ));
}

#[test]
fn three_full_rounds_reach_the_standings() {
    let mut state = two_team_match(&[1, 2, 3, 4]);
    let mut events = EventBus::default();
    state.start(&mut events).expect("match starts");

    for round in 1..=3u8 {
        assert_eq!(state.round, round);
        while state.current.is_some() {
            state.score_current(&mut events).expect("score");
        }
        state.end_turn(&mut events).expect("team 1 done");
        state.begin_turn(&mut events).expect("team 2 starts");
        state.end_turn(&mut events).expect("team 2 done");
        state.complete_round(&mut events).expect("round closes");
    }

    assert_eq!(state.phase, Phase::GameComplete);
    assert_eq!(state.rounds.len(), 3);
    let entries = state.standings();
    assert_eq!(entries[0].team, 1);
    // two easy and two medium cards swept every round
    assert_eq!(entries[0].points, 3 * 6);
    assert_eq!(entries[0].by_round, vec![(1, 6), (2, 6), (3, 6)]);
    assert_eq!(entries[1].points, 0);

    let ended: Vec<Event> = events
        .drain()
        .filter(|event| matches!(event, Event::MatchEnded { .. }))
        .collect();
    assert_eq!(
        ended,
        vec![Event::MatchEnded {
            winner: Some(1),
            points: 18
        }]
    );
}

#[test]
fn seeded_matches_shuffle_identically() {
    let pool = pool_of(&[1, 2, 3, 4, 5, 6, 7, 8]);
    let config = MatchConfig {
        teams: 2,
        ..MatchConfig::default()
    };
    let a = MatchState::new(config.clone(), &pool, 42);
    let b = MatchState::new(config.clone(), &pool, 42);
    let c = MatchState::new(config, &pool, 43);
    let ids = |state: &MatchState| -> Vec<CardId> {
        state.deck.iter().map(|card| card.id.clone()).collect()
    };
    assert_eq!(ids(&a), ids(&b));
    assert_ne!(ids(&a), ids(&c));
    // a shuffle is a permutation: same cards, same counts
    let mut sorted_a = ids(&a);
    let mut sorted_c = ids(&c);
    sorted_a.sort();
    sorted_c.sort();
    assert_eq!(sorted_a, sorted_c);
}
