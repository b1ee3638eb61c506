use crate::PlayerId;
use crate::cards::street::Street;
use crate::engine::action::ActionType;
use crate::engine::action::PlayerAction;

/// chronological per-street action log for a single hand.
/// blind postings appear first in the preflop round.
#[derive(Debug, Clone, Default)]
pub struct HandHistory {
    rounds: [Vec<PlayerAction>; 4],
}

impl HandHistory {
    pub fn push(&mut self, street: Street, action: PlayerAction) {
        self.rounds[street as usize].push(action);
    }
    pub fn on(&self, street: Street) -> &[PlayerAction] {
        &self.rounds[street as usize]
    }
    pub fn all(&self) -> impl Iterator<Item = (Street, &PlayerAction)> {
        Street::all()
            .into_iter()
            .flat_map(move |s| self.on(s).iter().map(move |a| (s, a)))
    }
    pub fn clear(&mut self) {
        for round in self.rounds.iter_mut() {
            round.clear();
        }
    }

    /// raises preflop count shoves too; postflop, opening bets count
    pub fn raises_on(&self, street: Street) -> usize {
        self.on(street)
            .iter()
            .filter(|a| match street {
                Street::Preflop => matches!(a.action, ActionType::Raise | ActionType::Allin),
                _ => a.action.is_aggressive(),
            })
            .count()
    }
    pub fn calls_on(&self, street: Street) -> usize {
        self.on(street)
            .iter()
            .filter(|a| a.action == ActionType::Call)
            .count()
    }
    /// the last player to bet or raise this street
    pub fn aggressor_on(&self, street: Street) -> Option<PlayerId> {
        self.on(street)
            .iter()
            .rev()
            .find(|a| a.action.is_aggressive())
            .map(|a| a.player)
    }
    /// the last player who voluntarily put chips in, any street
    pub fn last_contributor(&self) -> Option<PlayerId> {
        Street::all()
            .into_iter()
            .rev()
            .find_map(|s| {
                self.on(s)
                    .iter()
                    .rev()
                    .find(|a| a.action.is_voluntary())
                    .map(|a| a.player)
            })
    }
}
