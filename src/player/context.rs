use crate::Chips;
use crate::PlayerId;
use crate::cards::card::Card;
use crate::cards::hole::Hole;
use crate::engine::action::ActionType;
use crate::engine::state::GameState;
use crate::player::position::Position;
use crate::player::stats::PlayerStatistics;
use crate::ports::evaluator::HandSimulationStats;
use crate::ports::evaluator::PostFlopAnalysisFlags;

/// everything a strategy may look at for one decision. assembled by
/// the hand just before the prompt; strategies never reach back into
/// engine state.
#[derive(Debug, Clone)]
pub struct CurrentHandContext {
    pub hero: HeroContext,
    pub table: TableContext,
    pub opponents: OpponentsContext,
    pub board: Vec<Card>,
    pub equity: HandSimulationStats,
    pub flags: PostFlopAnalysisFlags,
    pub legal: Vec<ActionType>,
}

#[derive(Debug, Clone)]
pub struct HeroContext {
    pub id: PlayerId,
    pub position: Position,
    pub cash: Chips,
    pub hole: Hole,
    /// chips committed this betting round
    pub set: Chips,
    /// chips committed this hand
    pub total_bet: Chips,
    pub ranking: Option<u32>,
    /// own action types so far, one vector per street
    pub actions: [Vec<ActionType>; 4],
    /// whether hero was the aggressor of each street
    pub is_aggressor: [bool; 4],
    /// rolled once per hand: whether bluffing is on the table at all
    pub can_bluff: bool,
    pub very_loose: bool,
    /// stack measured in big blinds
    pub m_ratio: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct TableContext {
    pub n_seats: usize,
    /// players neither folded nor all-in
    pub n_acting: usize,
    /// players not folded
    pub n_live: usize,
    pub state: GameState,
    pub pot: Chips,
    pub sets_sum: Chips,
    pub highest_set: Chips,
    pub min_raise: Chips,
    pub small_blind: Chips,
    pub raises_this_street: usize,
    pub calls_this_street: usize,
    /// call price as a percentage of the pot after calling
    pub pot_odds: f64,
    /// someone opened preflop for well over a standard raise
    pub is_preflop_big_bet: bool,
}

impl TableContext {
    pub fn big_blind(&self) -> Chips {
        self.small_blind * 2
    }
}

#[derive(Debug, Clone)]
pub struct OpponentContext {
    pub id: PlayerId,
    pub position: Position,
    pub cash: Chips,
    pub set: Chips,
    pub stats: PlayerStatistics,
    pub range: Option<String>,
    pub last_action: ActionType,
    /// fraction of their range that beats hero, when computed
    pub strength: Option<f64>,
}

#[derive(Debug, Clone, Default)]
pub struct OpponentsContext {
    pub live: Vec<OpponentContext>,
    pub preflop_last_raiser: Option<PlayerId>,
    pub flop_last_raiser: Option<PlayerId>,
    pub turn_last_raiser: Option<PlayerId>,
    pub river_last_raiser: Option<PlayerId>,
    pub last_contributor: Option<PlayerId>,
    pub max_strength: f64,
    pub strongest: Option<PlayerId>,
}

impl OpponentsContext {
    pub fn by_id(&self, id: PlayerId) -> Option<&OpponentContext> {
        self.live.iter().find(|o| o.id == id)
    }
}

impl CurrentHandContext {
    pub fn to_call(&self) -> Chips {
        self.table.highest_set - self.hero.set
    }
    pub fn may(&self, action: ActionType) -> bool {
        self.legal.contains(&action)
    }
    /// hero acts after every live opponent postflop
    pub fn has_position(&self) -> bool {
        self.opponents
            .live
            .iter()
            .all(|o| o.position < self.hero.position)
    }
    pub fn street_index(&self) -> usize {
        self.table.state.street().map(|s| s as usize).unwrap_or(0)
    }
    /// hero opened the betting on the current street
    pub fn is_current_aggressor(&self) -> bool {
        self.hero.is_aggressor[self.street_index()]
    }
}
