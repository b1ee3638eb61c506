use crate::Chips;
use crate::PlayerId;
use crate::cards::hole::Hole;
use crate::cards::street::Street;
use crate::engine::action::ActionType;
use crate::engine::history::HandHistory;
use crate::player::position::Position;
use crate::player::range::estimator::RangeEstimator;
use crate::player::stats::PlayerStatistics;
use crate::strategy::Strategy;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// how many recent hands feed the very-loose-mode detector
const LOOSE_WINDOW: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    Acting,
    Folded,
    AllIn,
}

/// a seated player. created when seated, mutated only by the hand
/// that owns the current round, never deleted mid-hand. the player
/// holds no back-pointer to the hand: everything a decision needs
/// arrives through the context.
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub strategy: Rc<RefCell<dyn Strategy>>,
    pub cash: Chips,
    /// cash at the start of the current hand; side pots key off it
    pub start_cash: Chips,
    pub hole: Option<Hole>,
    pub position: Position,
    pub state: SeatState,
    /// chips committed this betting round
    pub set: Chips,
    /// chips committed this hand
    pub total_bet: Chips,
    pub ranking: Option<u32>,
    /// own actions this hand, per street
    pub actions: HandHistory,
    /// this player's estimated holdings, as opponents see them
    pub range: RangeEstimator,
    /// lifetime statistics snapshot loaded from the store
    pub stats: PlayerStatistics,
    /// rolled once per hand
    pub can_bluff: bool,
    recent_vpip: VecDeque<bool>,
}

impl Player {
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        cash: Chips,
        strategy: Rc<RefCell<dyn Strategy>>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            strategy,
            cash,
            start_cash: cash,
            hole: None,
            position: Position::Button,
            state: SeatState::Acting,
            set: 0,
            total_bet: 0,
            ranking: None,
            actions: HandHistory::default(),
            range: RangeEstimator::new(id),
            stats: PlayerStatistics::default(),
            can_bluff: false,
            recent_vpip: VecDeque::with_capacity(LOOSE_WINDOW),
        }
    }

    pub fn strategy_label(&self) -> String {
        self.strategy.borrow().label().to_string()
    }
    pub fn is_human(&self) -> bool {
        self.strategy.borrow().is_human()
    }

    pub fn reset_for_hand(&mut self, position: Position, hole: Hole, can_bluff: bool) {
        self.position = position;
        self.hole = Some(hole);
        self.state = SeatState::Acting;
        self.start_cash = self.cash;
        self.set = 0;
        self.total_bet = 0;
        self.ranking = None;
        self.actions.clear();
        self.range.reset();
        self.can_bluff = can_bluff;
    }

    /// move chips from the stack into this round's set
    pub fn bet(&mut self, amount: Chips) {
        assert!(amount >= 0 && amount <= self.cash, "over-bet");
        self.cash -= amount;
        self.set += amount;
        self.total_bet += amount;
        if self.cash == 0 {
            self.state = SeatState::AllIn;
        }
    }
    pub fn fold(&mut self) {
        self.state = SeatState::Folded;
    }
    /// drain the per-round set into the pot
    pub fn collect_set(&mut self) -> Chips {
        std::mem::take(&mut self.set)
    }
    pub fn win(&mut self, amount: Chips) {
        self.cash += amount;
    }

    pub fn contribution(&self) -> Chips {
        self.start_cash - self.cash
    }
    pub fn is_acting(&self) -> bool {
        self.state == SeatState::Acting
    }
    pub fn is_live(&self) -> bool {
        self.state != SeatState::Folded
    }
    pub fn has_chips(&self) -> bool {
        self.cash > 0
    }
    pub fn m_ratio(&self, big_blind: Chips) -> f64 {
        if big_blind <= 0 {
            return 0.0;
        }
        self.cash as f64 / big_blind as f64
    }

    pub fn record(&mut self, street: Street, action: crate::engine::action::PlayerAction) {
        self.actions.push(street, action);
    }
    pub fn last_action(&self) -> ActionType {
        Street::all()
            .into_iter()
            .rev()
            .find_map(|s| self.actions.on(s).last())
            .map(|a| a.action)
            .unwrap_or(ActionType::None)
    }
    pub fn action_types(&self) -> [Vec<ActionType>; 4] {
        Street::all().map(|s| self.actions.on(s).iter().map(|a| a.action).collect())
    }

    /// short-term behavioral deviation: almost every recent hand
    /// played voluntarily
    pub fn in_very_loose_mode(&self) -> bool {
        let played = self.recent_vpip.iter().filter(|v| **v).count();
        self.recent_vpip.len() >= LOOSE_WINDOW - 2 && played * 4 >= self.recent_vpip.len() * 3
    }
    pub fn note_hand_vpip(&mut self, voluntary: bool) {
        if self.recent_vpip.len() == LOOSE_WINDOW {
            self.recent_vpip.pop_front();
        }
        self.recent_vpip.push_back(voluntary);
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("cash", &self.cash)
            .field("set", &self.set)
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::profiles::BotProfile;
    use crate::strategy::profiles::BotStrategy;

    fn player(cash: Chips) -> Player {
        Player::new(
            0,
            "tester",
            cash,
            Rc::new(RefCell::new(BotStrategy::new(BotProfile::TightAggressive))),
        )
    }

    #[test]
    fn betting_moves_chips_into_the_set() {
        let mut p = player(100);
        p.bet(30);
        assert_eq!(p.cash, 70);
        assert_eq!(p.set, 30);
        assert_eq!(p.total_bet, 30);
        assert_eq!(p.contribution(), 30);
        assert!(p.is_acting());
    }

    #[test]
    fn betting_the_stack_marks_all_in() {
        let mut p = player(50);
        p.bet(50);
        assert_eq!(p.state, SeatState::AllIn);
        assert!(!p.is_acting());
        assert!(p.is_live());
    }

    #[test]
    #[should_panic]
    fn cannot_bet_more_than_the_stack() {
        player(50).bet(51);
    }

    #[test]
    fn loose_mode_needs_a_pattern() {
        let mut p = player(100);
        assert!(!p.in_very_loose_mode());
        for _ in 0..8 {
            p.note_hand_vpip(true);
        }
        assert!(p.in_very_loose_mode());
        for _ in 0..8 {
            p.note_hand_vpip(false);
        }
        assert!(!p.in_very_loose_mode());
    }
}
