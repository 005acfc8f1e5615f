use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    MatchStarted {
        teams: u8,
        cards: usize,
        possible: u32,
    },
    RoundStarted { round: u8, cards: usize },
    TurnStarted { round: u8, team: u8 },
    CardScored {
        team: u8,
        name: String,
        points: u32,
    },
    CardSkipped { team: u8, name: String },
    DeckEmpty { round: u8, team: u8 },
    RamboActivated {
        team: u8,
        level: u8,
        pool: usize,
    },
    TurnEnded {
        round: u8,
        team: u8,
        points: u32,
        scored: usize,
        skipped: usize,
    },
    TimeUp { round: u8, team: u8 },
    RoundEnded {
        round: u8,
        points: u32,
        possible: u32,
        carried: usize,
    },
    MatchEnded { winner: Option<u8>, points: u32 },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }
}
