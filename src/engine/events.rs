use crate::Chips;
use crate::PlayerId;
use crate::cards::board::Board;
use crate::cards::hole::Hole;
use crate::engine::action::ActionType;
use crate::engine::action::PlayerAction;
use crate::engine::state::GameState;

/// what a seat looks like from the outside
#[derive(Debug, Clone)]
pub struct SeatSummary {
    pub id: PlayerId,
    pub name: String,
    pub strategy: String,
    pub chips: Chips,
}

/// everything the engine tells the outside world. events for one
/// hand arrive in strict chronological order; `on_hand_completed`
/// is always the last one. every method defaults to a no-op, so a
/// sink implements only what it cares about.
pub trait EventSink {
    fn on_game_initialized(&self, _gui_speed: u32) {}
    fn on_players_initialized(&self, _seats: &[SeatSummary]) {}
    fn on_betting_round_started(&self, _state: GameState) {}
    fn on_player_acted(&self, _action: &PlayerAction) {}
    fn on_player_chips_updated(&self, _player: PlayerId, _chips: Chips) {}
    fn on_pot_updated(&self, _pot: Chips) {}
    fn on_hole_cards_dealt(&self, _player: PlayerId, _hole: Hole) {}
    fn on_board_cards_dealt(&self, _board: &Board) {}
    fn on_awaiting_human_input(&self, _player: PlayerId, _legal: &[ActionType]) {}
    fn on_invalid_player_action(&self, _player: PlayerId, _attempted: &PlayerAction, _reason: &str) {
    }
    fn on_engine_error(&self, _message: &str) {}
    fn on_showdown_reveal_order(&self, _order: &[PlayerId]) {}
    fn on_hand_completed(&self, _winners: &[PlayerId], _pot: Chips) {}
    /// cooperative pump hook while the engine idles
    fn on_process_events(&self) {}
}

/// swallows everything
#[derive(Debug, Default)]
pub struct NullSink;
impl EventSink for NullSink {}

/// narrates the hand through the logging facade
#[derive(Debug, Default)]
pub struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn on_players_initialized(&self, seats: &[SeatSummary]) {
        for seat in seats {
            log::info!("seat {} {} [{}] {}", seat.id, seat.name, seat.strategy, seat.chips);
        }
    }
    fn on_betting_round_started(&self, state: GameState) {
        log::info!("--- {} ---", state);
    }
    fn on_player_acted(&self, action: &PlayerAction) {
        log::info!("{}", action);
    }
    fn on_pot_updated(&self, pot: Chips) {
        log::info!("pot {}", pot);
    }
    fn on_board_cards_dealt(&self, board: &Board) {
        log::info!("board {}", board);
    }
    fn on_invalid_player_action(&self, player: PlayerId, attempted: &PlayerAction, reason: &str) {
        log::warn!("invalid action from {}: {} ({})", player, attempted, reason);
    }
    fn on_engine_error(&self, message: &str) {
        log::error!("{}", message);
    }
    fn on_hand_completed(&self, winners: &[PlayerId], pot: Chips) {
        log::info!("hand complete: winners {:?} pot {}", winners, pot);
    }
}

/// records the event stream for assertions
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: std::cell::RefCell<Vec<RecordedEvent>>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedEvent {
    GameInitialized(u32),
    PlayersInitialized(usize),
    RoundStarted(GameState),
    Acted(PlayerAction),
    ChipsUpdated(PlayerId, Chips),
    PotUpdated(Chips),
    HoleCardsDealt(PlayerId),
    BoardCardsDealt(usize),
    AwaitingHumanInput(PlayerId, Vec<ActionType>),
    InvalidPlayerAction(PlayerId, String),
    EngineError(String),
    ShowdownRevealOrder(Vec<PlayerId>),
    HandCompleted(Vec<PlayerId>, Chips),
    ProcessEvents,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<RecordedEvent> {
        self.events.borrow_mut().drain(..).collect()
    }
    fn push(&self, event: RecordedEvent) {
        self.events.borrow_mut().push(event);
    }
}

impl EventSink for RecordingSink {
    fn on_game_initialized(&self, gui_speed: u32) {
        self.push(RecordedEvent::GameInitialized(gui_speed));
    }
    fn on_players_initialized(&self, seats: &[SeatSummary]) {
        self.push(RecordedEvent::PlayersInitialized(seats.len()));
    }
    fn on_betting_round_started(&self, state: GameState) {
        self.push(RecordedEvent::RoundStarted(state));
    }
    fn on_player_acted(&self, action: &PlayerAction) {
        self.push(RecordedEvent::Acted(*action));
    }
    fn on_player_chips_updated(&self, player: PlayerId, chips: Chips) {
        self.push(RecordedEvent::ChipsUpdated(player, chips));
    }
    fn on_pot_updated(&self, pot: Chips) {
        self.push(RecordedEvent::PotUpdated(pot));
    }
    fn on_hole_cards_dealt(&self, player: PlayerId, _hole: Hole) {
        self.push(RecordedEvent::HoleCardsDealt(player));
    }
    fn on_board_cards_dealt(&self, board: &Board) {
        self.push(RecordedEvent::BoardCardsDealt(board.cards().len()));
    }
    fn on_awaiting_human_input(&self, player: PlayerId, legal: &[ActionType]) {
        self.push(RecordedEvent::AwaitingHumanInput(player, legal.to_vec()));
    }
    fn on_invalid_player_action(&self, player: PlayerId, _attempted: &PlayerAction, reason: &str) {
        self.push(RecordedEvent::InvalidPlayerAction(player, reason.to_string()));
    }
    fn on_engine_error(&self, message: &str) {
        self.push(RecordedEvent::EngineError(message.to_string()));
    }
    fn on_showdown_reveal_order(&self, order: &[PlayerId]) {
        self.push(RecordedEvent::ShowdownRevealOrder(order.to_vec()));
    }
    fn on_hand_completed(&self, winners: &[PlayerId], pot: Chips) {
        self.push(RecordedEvent::HandCompleted(winners.to_vec(), pot));
    }
    fn on_process_events(&self) {
        self.push(RecordedEvent::ProcessEvents);
    }
}
