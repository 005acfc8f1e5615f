use crate::persistence::{self, default_exchange_path, read_cards_file, write_cards_file};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use minikers_core::{
    Card, Difficulty, DifficultyFilter, Event, EventBus, GameMode, MatchConfig, MatchState, Phase,
    QuickSession, TimerTick, MAX_TEAMS, MIN_TEAMS, TURN_SECONDS,
};
use minikers_data::{game_pool, load_catalog, CatalogKind, CustomCardStore, SHARED_KEY};
use std::collections::VecDeque;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

const MAX_EVENT_LOG: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Cards,
    Playing,
    TurnBreak,
    RoundBreak,
    Final,
}

/// A running game. Quick sessions never leave `Screen::Playing`; matches
/// move between screens as the core phase changes.
#[derive(Debug)]
pub enum Session {
    Quick(QuickSession),
    Match(MatchState),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuRow {
    Mode,
    Catalog,
    Teams,
    Difficulty,
    Start,
    Cards,
    HowTo,
    Quit,
}

pub const MENU_ROWS: [MenuRow; 8] = [
    MenuRow::Mode,
    MenuRow::Catalog,
    MenuRow::Teams,
    MenuRow::Difficulty,
    MenuRow::Start,
    MenuRow::Cards,
    MenuRow::HowTo,
    MenuRow::Quit,
];

impl MenuRow {
    pub fn label(self) -> &'static str {
        match self {
            MenuRow::Mode => "Mode",
            MenuRow::Catalog => "Catalog",
            MenuRow::Teams => "Teams",
            MenuRow::Difficulty => "Difficulty",
            MenuRow::Start => "Start game",
            MenuRow::Cards => "Card studio",
            MenuRow::HowTo => "How to play",
            MenuRow::Quit => "Quit",
        }
    }
}

/// Adding a card chains two prompts: name first, then the hint text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptMode {
    CardName,
    CardDefinition,
    ImportPath,
    ExportPath,
}

pub struct App {
    pub mode: GameMode,
    pub catalog: CatalogKind,
    pub teams: u8,
    pub filter: DifficultyFilter,
    pub seed: u64,
    pub family_cards: Vec<Card>,
    pub standard_cards: Vec<Card>,
    pub store: CustomCardStore,
    pub session: Option<Session>,
    pub events: EventBus,
    pub screen: Screen,
    pub menu_cursor: usize,
    pub studio_tab: usize,
    pub card_cursor: usize,
    /// Difficulty assigned to the next card made in the studio.
    pub studio_difficulty: Difficulty,
    pub show_hint: bool,
    pub show_help: bool,
    pub prompt_mode: Option<PromptMode>,
    pub prompt_input: String,
    pub pending_name: Option<String>,
    pub event_log: VecDeque<String>,
    pub status_line: String,
    pub should_quit: bool,
    pub last_tick: Instant,
    pub tick_budget: Duration,
}

impl App {
    pub fn bootstrap(seed: Option<u64>, cards_path: Option<PathBuf>) -> Result<Self> {
        let family_cards = load_catalog(CatalogKind::Family).context("load family catalog")?;
        let standard_cards =
            load_catalog(CatalogKind::Standard).context("load standard catalog")?;
        let mut startup_notes: Vec<String> = Vec::new();
        let store = match cards_path.or_else(persistence::default_cards_path) {
            Some(path) => match CustomCardStore::load(&path) {
                Ok(store) => store,
                Err(err) => {
                    startup_notes.push(format!("could not read {}: {err:#}", path.display()));
                    CustomCardStore::empty_at(path)
                }
            },
            None => {
                startup_notes
                    .push("no home directory found, custom cards will not persist".to_string());
                CustomCardStore::empty()
            }
        };
        let mut app = Self {
            mode: GameMode::Monikers,
            catalog: CatalogKind::Family,
            teams: MIN_TEAMS,
            filter: DifficultyFilter::All,
            seed: seed.unwrap_or_else(clock_seed),
            family_cards,
            standard_cards,
            store,
            session: None,
            events: EventBus::default(),
            screen: Screen::Menu,
            menu_cursor: 0,
            studio_tab: 0,
            card_cursor: 0,
            studio_difficulty: Difficulty::Easy,
            show_hint: false,
            show_help: false,
            prompt_mode: None,
            prompt_input: String::new(),
            pending_name: None,
            event_log: VecDeque::new(),
            status_line: String::new(),
            should_quit: false,
            last_tick: Instant::now(),
            tick_budget: Duration::ZERO,
        };
        app.push_status("welcome! enter starts a game, ? shows the rules");
        for note in startup_notes {
            app.push_status(note);
        }
        Ok(app)
    }

    // ----- navigation -----

    pub fn move_cursor(&mut self, down: bool) {
        match self.screen {
            Screen::Menu => move_index(&mut self.menu_cursor, MENU_ROWS.len(), down),
            Screen::Cards => {
                let len = self.store.collection(&self.active_studio_key()).len();
                move_index(&mut self.card_cursor, len, down);
            }
            _ => {}
        }
    }

    pub fn adjust_value(&mut self, forward: bool) {
        match self.screen {
            Screen::Menu => self.adjust_menu_row(forward),
            Screen::Cards => {
                self.studio_difficulty = cycle_difficulty(self.studio_difficulty, forward);
                self.push_status(format!(
                    "new cards start at {}",
                    self.studio_difficulty.label()
                ));
            }
            _ => {}
        }
    }

    fn adjust_menu_row(&mut self, forward: bool) {
        match MENU_ROWS[self.menu_cursor.min(MENU_ROWS.len() - 1)] {
            MenuRow::Mode => {
                self.mode = match self.mode {
                    GameMode::Quick => GameMode::Monikers,
                    GameMode::Monikers => GameMode::Quick,
                };
            }
            MenuRow::Catalog => {
                self.catalog = match self.catalog {
                    CatalogKind::Family => CatalogKind::Standard,
                    CatalogKind::Standard => CatalogKind::Family,
                };
            }
            MenuRow::Teams => {
                self.teams = if forward {
                    if self.teams >= MAX_TEAMS {
                        MIN_TEAMS
                    } else {
                        self.teams + 1
                    }
                } else if self.teams <= MIN_TEAMS {
                    MAX_TEAMS
                } else {
                    self.teams - 1
                };
            }
            MenuRow::Difficulty => self.filter = cycle_filter(self.filter, forward),
            MenuRow::Start | MenuRow::Cards | MenuRow::HowTo | MenuRow::Quit => {}
        }
    }

    pub fn cycle_tab(&mut self, forward: bool) {
        if self.screen != Screen::Cards {
            return;
        }
        let len = self.studio_keys().len();
        if forward {
            self.studio_tab = (self.studio_tab + 1) % len;
        } else {
            self.studio_tab = (self.studio_tab + len - 1) % len;
        }
        self.card_cursor = 0;
    }

    pub fn activate_primary(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.screen {
            Screen::Menu => match MENU_ROWS[self.menu_cursor.min(MENU_ROWS.len() - 1)] {
                MenuRow::Mode | MenuRow::Catalog | MenuRow::Teams | MenuRow::Difficulty => {
                    self.adjust_value(true)
                }
                MenuRow::Start => self.start_game(),
                MenuRow::Cards => self.open_cards(),
                MenuRow::HowTo => self.show_help = true,
                MenuRow::Quit => self.should_quit = true,
            },
            Screen::Cards => self.open_add_card_prompt(),
            Screen::Playing => match self.session {
                Some(Session::Quick(_)) => self.next_card(),
                Some(Session::Match(_)) => self.score_card(),
                None => {}
            },
            Screen::TurnBreak => self.begin_turn(),
            Screen::RoundBreak => self.next_round(),
            Screen::Final => self.to_menu(),
        }
    }

    pub fn go_back(&mut self) {
        if self.show_help {
            self.show_help = false;
            return;
        }
        match self.screen {
            Screen::Menu => {}
            Screen::Cards => {
                self.screen = Screen::Menu;
                self.push_status("back at the menu");
            }
            Screen::Playing | Screen::TurnBreak | Screen::RoundBreak | Screen::Final => {
                self.to_menu()
            }
        }
    }

    pub fn to_menu(&mut self) {
        self.session = None;
        self.screen = Screen::Menu;
        self.show_hint = false;
        self.push_status("back at the menu");
    }

    pub fn open_cards(&mut self) {
        self.screen = Screen::Cards;
        self.clamp_card_cursor();
        self.push_status("a adds a card, i imports, e exports");
    }

    // ----- starting games -----

    pub fn start_game(&mut self) {
        let pool = game_pool(self.catalog_cards(), &self.store.all_cards());
        let seed = self.next_seed();
        match self.mode {
            GameMode::Quick => {
                let mut session = QuickSession::new(pool, self.filter, TURN_SECONDS, seed);
                if session.draw().is_none() {
                    self.push_status("no cards match the difficulty filter");
                    return;
                }
                self.session = Some(Session::Quick(session));
                self.screen = Screen::Playing;
                self.show_hint = false;
                self.push_status("quick play: space for the next card, t runs the clock");
            }
            GameMode::Monikers => {
                let config = MatchConfig {
                    teams: self.teams,
                    filter: self.filter,
                    turn_seconds: TURN_SECONDS,
                };
                let mut state = MatchState::new(config, &pool, seed);
                let started = state.start(&mut self.events);
                match started {
                    Ok(()) => {
                        self.session = Some(Session::Match(state));
                        self.screen = Screen::Playing;
                        self.show_hint = false;
                        self.push_status("round 1: t starts the clock");
                    }
                    Err(err) => self.push_error(err),
                }
                self.flush_events();
            }
        }
    }

    fn next_seed(&mut self) -> u64 {
        let seed = self.seed;
        self.seed = self.seed.wrapping_add(1);
        seed
    }

    pub fn catalog_cards(&self) -> &[Card] {
        match self.catalog {
            CatalogKind::Family => &self.family_cards,
            CatalogKind::Standard => &self.standard_cards,
        }
    }

    pub fn menu_value(&self, row: MenuRow) -> String {
        match row {
            MenuRow::Mode => self.mode.label().to_string(),
            MenuRow::Catalog => format!(
                "{} ({} cards)",
                self.catalog.label(),
                self.catalog_cards().len()
            ),
            MenuRow::Teams => self.teams.to_string(),
            MenuRow::Difficulty => self.filter.label().to_string(),
            MenuRow::Cards => format!("{} cards", self.store.total()),
            MenuRow::Start | MenuRow::HowTo | MenuRow::Quit => String::new(),
        }
    }

    // ----- play actions -----

    pub fn score_card(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session {
            Session::Quick(_) => self.next_card(),
            Session::Match(state) => {
                let result = state.score_current(&mut self.events);
                match result {
                    Ok(()) => self.show_hint = false,
                    Err(err) => self.push_error(err),
                }
                self.flush_events();
                self.sync_screen();
            }
        }
    }

    pub fn skip_card(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session {
            Session::Quick(_) => self.next_card(),
            Session::Match(state) => {
                let result = state.skip_current(&mut self.events);
                match result {
                    Ok(()) => self.show_hint = false,
                    Err(err) => self.push_error(err),
                }
                self.flush_events();
                self.sync_screen();
            }
        }
    }

    pub fn next_card(&mut self) {
        let Some(Session::Quick(session)) = self.session.as_mut() else {
            return;
        };
        if session.draw().is_none() {
            self.push_status("no cards match the difficulty filter");
            return;
        }
        self.show_hint = false;
    }

    pub fn toggle_hint(&mut self) {
        let showing = match self.session.as_ref() {
            Some(Session::Quick(session)) => session.current.is_some(),
            Some(Session::Match(state)) => state.current.is_some(),
            None => false,
        };
        if showing {
            self.show_hint = !self.show_hint;
        }
    }

    pub fn toggle_timer(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let running = match session {
            Session::Quick(session) => {
                if session.timer.running {
                    session.pause_timer();
                } else {
                    session.start_timer();
                }
                session.timer.running
            }
            Session::Match(state) => {
                if state.timer.running {
                    state.pause_timer();
                } else {
                    state.start_timer();
                }
                state.timer.running
            }
        };
        if running {
            self.push_status("clock running");
        } else {
            self.push_status("clock paused");
        }
    }

    pub fn reset_timer(&mut self) {
        match self.session.as_mut() {
            Some(Session::Quick(session)) => session.reset_timer(),
            Some(Session::Match(state)) => state.reset_timer(),
            None => return,
        }
        self.push_status("clock reset");
    }

    pub fn end_turn(&mut self) {
        let Some(Session::Match(state)) = self.session.as_mut() else {
            return;
        };
        let result = state.end_turn(&mut self.events);
        if let Err(err) = result {
            self.push_error(err);
        } else {
            self.show_hint = false;
        }
        self.flush_events();
        self.sync_screen();
    }

    pub fn go_rambo(&mut self) {
        let Some(Session::Match(state)) = self.session.as_mut() else {
            return;
        };
        let result = state.activate_rambo(&mut self.events);
        if let Err(err) = result {
            self.push_error(err);
        } else {
            self.show_hint = false;
        }
        self.flush_events();
        self.sync_screen();
    }

    pub fn begin_turn(&mut self) {
        let Some(Session::Match(state)) = self.session.as_mut() else {
            return;
        };
        let result = state.begin_turn(&mut self.events);
        match result {
            Ok(()) => {
                self.show_hint = false;
                self.push_status("t starts the clock when you're ready");
            }
            Err(err) => self.push_error(err),
        }
        self.flush_events();
        self.sync_screen();
    }

    pub fn next_round(&mut self) {
        let Some(Session::Match(state)) = self.session.as_mut() else {
            return;
        };
        let result = state.complete_round(&mut self.events);
        match result {
            Ok(()) => self.show_hint = false,
            Err(err) => self.push_error(err),
        }
        self.flush_events();
        self.sync_screen();
    }

    /// Keeps the screen in step with the match phase. Quick sessions have
    /// no phases, so only matches are mapped.
    fn sync_screen(&mut self) {
        let Some(Session::Match(state)) = self.session.as_ref() else {
            return;
        };
        self.screen = match state.phase {
            Phase::Setup | Phase::Drawing => Screen::Playing,
            Phase::TurnComplete => Screen::TurnBreak,
            Phase::RoundComplete => Screen::RoundBreak,
            Phase::GameComplete => Screen::Final,
        };
    }

    // ----- wall clock -----

    /// Converts elapsed wall time into whole-second game ticks. Runs every
    /// loop pass, so held keys cannot stall the countdown.
    pub fn on_tick(&mut self) {
        let now = Instant::now();
        self.tick_budget += now.duration_since(self.last_tick);
        self.last_tick = now;
        while self.tick_budget >= Duration::from_secs(1) {
            self.tick_budget -= Duration::from_secs(1);
            self.advance_second();
        }
    }

    fn advance_second(&mut self) {
        let tick = match self.session.as_mut() {
            Some(Session::Quick(session)) => session.tick(),
            Some(Session::Match(state)) => state.tick(&mut self.events),
            None => return,
        };
        if tick == TimerTick::Expired {
            ring_bell();
            match self.session.as_ref() {
                Some(Session::Quick(session)) => {
                    let done = session.cards_completed;
                    self.push_status(format!("time's up! {done} cards this run"));
                }
                Some(Session::Match(_)) => self.push_status("time's up!"),
                None => {}
            }
        }
        self.flush_events();
        self.sync_screen();
    }

    // ----- card studio -----

    pub fn studio_keys(&self) -> Vec<String> {
        let mut keys = vec![SHARED_KEY.to_string()];
        for team in 1..=MAX_TEAMS {
            keys.push(format!("team{team}"));
        }
        keys
    }

    pub fn active_studio_key(&self) -> String {
        let keys = self.studio_keys();
        keys[self.studio_tab.min(keys.len() - 1)].clone()
    }

    fn clamp_card_cursor(&mut self) {
        let len = self.store.collection(&self.active_studio_key()).len();
        clamp_index(&mut self.card_cursor, len);
    }

    pub fn open_add_card_prompt(&mut self) {
        self.pending_name = None;
        self.prompt_input.clear();
        self.prompt_mode = Some(PromptMode::CardName);
    }

    pub fn open_import_prompt(&mut self) {
        self.prompt_input.clear();
        self.prompt_mode = Some(PromptMode::ImportPath);
    }

    pub fn open_export_prompt(&mut self) {
        self.prompt_input.clear();
        self.prompt_mode = Some(PromptMode::ExportPath);
    }

    pub fn delete_selected_card(&mut self) {
        let key = self.active_studio_key();
        let selected = self
            .store
            .collection(&key)
            .get(self.card_cursor)
            .map(|card| (card.id.clone(), card.name.clone()));
        let Some((id, name)) = selected else {
            self.push_status("no card selected");
            return;
        };
        if self.store.delete_card(&key, &id) {
            self.push_status(format!("deleted {name} from {key}"));
            self.save_store();
            self.clamp_card_cursor();
        }
    }

    /// Consumes the key when a prompt is open, so game keys cannot fire
    /// while typing.
    pub fn handle_prompt_key(&mut self, key: KeyEvent) -> bool {
        let Some(mode) = self.prompt_mode else {
            return false;
        };
        match key.code {
            KeyCode::Esc => {
                self.close_prompt();
                self.push_status("cancelled");
            }
            KeyCode::Enter => {
                let input = self.prompt_input.trim().to_string();
                match mode {
                    PromptMode::CardName => self.submit_card_name(input),
                    PromptMode::CardDefinition => self.submit_card_definition(input),
                    PromptMode::ImportPath => {
                        self.close_prompt();
                        self.import_cards_from(input);
                    }
                    PromptMode::ExportPath => {
                        self.close_prompt();
                        self.export_cards_to(input);
                    }
                }
            }
            KeyCode::Backspace => {
                self.prompt_input.pop();
            }
            KeyCode::Char(ch) => {
                if !key.modifiers.contains(KeyModifiers::CONTROL)
                    && !key.modifiers.contains(KeyModifiers::ALT)
                {
                    self.prompt_input.push(ch);
                }
            }
            _ => {}
        }
        true
    }

    fn close_prompt(&mut self) {
        self.prompt_mode = None;
        self.prompt_input.clear();
        self.pending_name = None;
    }

    fn submit_card_name(&mut self, input: String) {
        if input.is_empty() {
            self.close_prompt();
            self.push_status("please enter a card name");
            return;
        }
        self.pending_name = Some(input);
        self.prompt_mode = Some(PromptMode::CardDefinition);
        self.prompt_input.clear();
    }

    fn submit_card_definition(&mut self, input: String) {
        let pending = self.pending_name.take();
        self.close_prompt();
        let Some(name) = pending else {
            return;
        };
        let key = self.active_studio_key();
        let added = self
            .store
            .add_card(&key, &name, self.studio_difficulty, &input);
        match added {
            Ok(card) => {
                self.push_status(format!("added {} to {key}", card.name));
                self.save_store();
                self.clamp_card_cursor();
            }
            Err(err) => self.push_status(format!("{err:#}")),
        }
    }

    fn import_cards_from(&mut self, input: String) {
        let path = resolve_exchange_path(&input);
        let raw = match read_cards_file(&path) {
            Ok(raw) => raw,
            Err(err) => {
                self.push_status(format!("Import failed: {err}"));
                return;
            }
        };
        match self.store.import(&raw) {
            Ok(count) => {
                self.push_status(format!("imported {count} cards from {}", path.display()));
                self.save_store();
                self.clamp_card_cursor();
            }
            Err(err) => self.push_status(format!("Import failed: {err:#}")),
        }
    }

    fn export_cards_to(&mut self, input: String) {
        let path = resolve_exchange_path(&input);
        let body = match self.store.export() {
            Ok(body) => body,
            Err(err) => {
                self.push_status(format!("export failed: {err:#}"));
                return;
            }
        };
        match write_cards_file(&path, &body) {
            Ok(()) => self.push_status(format!(
                "exported {} cards to {}",
                self.store.total(),
                path.display()
            )),
            Err(err) => self.push_status(format!("export failed: {err}")),
        }
    }

    /// Saving is best effort. A full disk or read-only file costs the
    /// save, not the game in progress.
    fn save_store(&mut self) {
        if let Err(err) = self.store.persist() {
            self.push_status(format!("save failed: {err:#}"));
        }
    }

    // ----- status and log -----

    pub fn push_status(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.status_line = message.clone();
        self.log_line(message);
    }

    fn push_error(&mut self, err: impl std::fmt::Display) {
        self.push_status(format!("error: {err}"));
    }

    fn flush_events(&mut self) {
        let drained: Vec<Event> = self.events.drain().collect();
        for event in drained {
            self.log_line(format_event(&event));
        }
    }

    fn log_line(&mut self, line: String) {
        self.event_log.push_back(line);
        while self.event_log.len() > MAX_EVENT_LOG {
            self.event_log.pop_front();
        }
    }
}

fn format_event(event: &Event) -> String {
    match event {
        Event::MatchStarted {
            teams,
            cards,
            possible,
        } => format!("match started: {teams} teams, {cards} cards worth {possible} pts"),
        Event::RoundStarted { round, cards } => format!("round {round} started with {cards} cards"),
        Event::TurnStarted { round, team } => format!("round {round}: team {team} is up"),
        Event::CardScored { team, name, points } => format!("team {team} got {name} (+{points})"),
        Event::CardSkipped { team, name } => format!("team {team} skipped {name}"),
        Event::DeckEmpty { round: _, team } => format!("no deck cards left for team {team}"),
        Event::RamboActivated { team, level, pool } => {
            if *level >= 2 {
                format!("team {team} went double rambo: {pool} cut cards back in play")
            } else {
                format!("team {team} went rambo: {pool} skips back in play")
            }
        }
        Event::TurnEnded {
            round: _,
            team,
            points,
            scored,
            skipped,
        } => format!("team {team} turn over: {points} pts, {scored} got, {skipped} skipped"),
        Event::TimeUp { round: _, team } => format!("time up for team {team}"),
        Event::RoundEnded {
            round,
            points,
            possible,
            carried,
        } => format!("round {round} done: {points}/{possible} pts, {carried} cards carry over"),
        Event::MatchEnded { winner, points } => match winner {
            Some(team) => format!("team {team} wins with {points} pts"),
            None => format!("tied at {points} pts"),
        },
    }
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as u64)
        .unwrap_or(0xBADD_CAFE)
}

/// BEL through the terminal; some emulators stay silent and that is fine.
fn ring_bell() {
    let mut out = std::io::stdout();
    let _ = out.write_all(b"\x07");
    let _ = out.flush();
}

fn resolve_exchange_path(input: &str) -> PathBuf {
    if input.is_empty() {
        default_exchange_path()
    } else {
        PathBuf::from(input)
    }
}

const FILTER_ORDER: [DifficultyFilter; 4] = [
    DifficultyFilter::All,
    DifficultyFilter::Only(Difficulty::Easy),
    DifficultyFilter::Only(Difficulty::Medium),
    DifficultyFilter::Only(Difficulty::Hard),
];

fn cycle_filter(current: DifficultyFilter, forward: bool) -> DifficultyFilter {
    let position = FILTER_ORDER
        .iter()
        .position(|filter| *filter == current)
        .unwrap_or(0);
    let len = FILTER_ORDER.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    FILTER_ORDER[next]
}

fn cycle_difficulty(current: Difficulty, forward: bool) -> Difficulty {
    let position = Difficulty::ALL
        .iter()
        .position(|difficulty| *difficulty == current)
        .unwrap_or(0);
    let len = Difficulty::ALL.len();
    let next = if forward {
        (position + 1) % len
    } else {
        (position + len - 1) % len
    };
    Difficulty::ALL[next]
}

fn move_index(index: &mut usize, len: usize, down: bool) {
    if len == 0 {
        *index = 0;
        return;
    }
    if down {
        *index = (*index + 1) % len;
    } else {
        *index = (*index + len - 1) % len;
    }
}

fn clamp_index(index: &mut usize, len: usize) {
    if len == 0 {
        *index = 0;
    } else if *index >= len {
        *index = len - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn unique_temp_file() -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time")
            .as_nanos();
        std::env::temp_dir().join(format!(
            "minikers_cui_app_test_{}_{}.json",
            std::process::id(),
            nanos
        ))
    }

    fn test_app() -> App {
        App::bootstrap(Some(21), Some(unique_temp_file())).expect("bootstrap")
    }

    fn cleanup(app: &App) {
        if let Some(path) = app.store.path() {
            let _ = std::fs::remove_file(path);
        }
    }

    fn press(app: &mut App, code: KeyCode) {
        let handled = app.handle_prompt_key(KeyEvent::new(code, KeyModifiers::NONE));
        assert!(handled, "prompt should be open");
    }

    fn type_text(app: &mut App, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn bootstrap_lands_on_the_menu() {
        let app = test_app();
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.session.is_none());
        assert!(!app.family_cards.is_empty());
        assert!(!app.standard_cards.is_empty());
    }

    #[test]
    fn quick_play_starts_and_draws() {
        let mut app = test_app();
        app.mode = GameMode::Quick;
        app.start_game();
        assert_eq!(app.screen, Screen::Playing);
        let Some(Session::Quick(session)) = &app.session else {
            panic!("expected a quick session");
        };
        assert!(session.current.is_some());
        app.next_card();
        let Some(Session::Quick(session)) = &app.session else {
            panic!("expected a quick session");
        };
        assert!(session.current.is_some());
    }

    #[test]
    fn match_flow_reaches_the_turn_break() {
        let mut app = test_app();
        app.mode = GameMode::Monikers;
        app.teams = 2;
        app.start_game();
        assert_eq!(app.screen, Screen::Playing);
        app.score_card();
        app.end_turn();
        assert_eq!(app.screen, Screen::TurnBreak);
        app.activate_primary();
        assert_eq!(app.screen, Screen::Playing);
        assert!(!app.event_log.is_empty());
    }

    #[test]
    fn timer_expiry_ends_the_match_turn() {
        let mut app = test_app();
        app.mode = GameMode::Monikers;
        app.start_game();
        app.toggle_timer();
        for _ in 0..TURN_SECONDS {
            app.advance_second();
        }
        assert_eq!(app.screen, Screen::TurnBreak);
        assert_eq!(app.status_line, "time's up!");
    }

    #[test]
    fn add_card_runs_through_both_prompts() {
        let mut app = test_app();
        app.screen = Screen::Cards;
        app.open_add_card_prompt();
        type_text(&mut app, "Meerkat standoff");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.prompt_mode, Some(PromptMode::CardDefinition));
        type_text(&mut app, "Two meerkats, zero chill");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.prompt_mode, None);
        assert_eq!(app.store.total(), 1);
        assert_eq!(app.store.collection(SHARED_KEY)[0].name, "Meerkat standoff");
        cleanup(&app);
    }

    #[test]
    fn blank_card_name_is_rejected() {
        let mut app = test_app();
        app.open_add_card_prompt();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.prompt_mode, None);
        assert_eq!(app.store.total(), 0);
        assert!(app.status_line.contains("name"));
    }

    #[test]
    fn import_from_a_missing_file_reports_failure() {
        let mut app = test_app();
        app.import_cards_from("definitely-not-here.json".to_string());
        assert!(app.status_line.starts_with("Import failed:"));
        assert_eq!(app.store.total(), 0);
    }

    #[test]
    fn escape_closes_the_prompt() {
        let mut app = test_app();
        app.open_import_prompt();
        assert!(app.prompt_mode.is_some());
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.prompt_mode, None);
    }

    #[test]
    fn menu_wraps_both_ways() {
        let mut app = test_app();
        app.move_cursor(false);
        assert_eq!(app.menu_cursor, MENU_ROWS.len() - 1);
        app.move_cursor(true);
        assert_eq!(app.menu_cursor, 0);
    }

    #[test]
    fn filter_cycle_covers_all_options() {
        let mut filter = DifficultyFilter::All;
        let mut seen = Vec::new();
        for _ in 0..FILTER_ORDER.len() {
            seen.push(filter);
            filter = cycle_filter(filter, true);
        }
        assert_eq!(filter, DifficultyFilter::All);
        assert_eq!(seen.len(), FILTER_ORDER.len());
    }
}
