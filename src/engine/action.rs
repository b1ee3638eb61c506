use crate::Chips;
use crate::PlayerId;
use colored::Colorize;

/// what a player did. blind posts are engine-emitted,
/// never proposed by a strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ActionType {
    None,
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    Allin,
    PostSmallBlind,
    PostBigBlind,
}

impl ActionType {
    pub fn is_blind(&self) -> bool {
        matches!(self, Self::PostSmallBlind | Self::PostBigBlind)
    }
    pub fn is_aggressive(&self) -> bool {
        matches!(self, Self::Bet | Self::Raise | Self::Allin)
    }
    /// counts toward VPIP
    pub fn is_voluntary(&self) -> bool {
        matches!(self, Self::Call | Self::Bet | Self::Raise | Self::Allin)
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::Bet => write!(f, "bet"),
            Self::Raise => write!(f, "raise"),
            Self::Allin => write!(f, "all-in"),
            Self::PostSmallBlind => write!(f, "post small blind"),
            Self::PostBigBlind => write!(f, "post big blind"),
        }
    }
}

/// amount semantics:
/// zero for fold and check; the delta to match for a call;
/// the increment above the highest set for bet and raise;
/// the player's remaining chips for all-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlayerAction {
    pub player: PlayerId,
    pub action: ActionType,
    pub amount: Chips,
}

impl PlayerAction {
    pub fn new(player: PlayerId, action: ActionType, amount: Chips) -> Self {
        Self {
            player,
            action,
            amount,
        }
    }
    pub fn fold(player: PlayerId) -> Self {
        Self::new(player, ActionType::Fold, 0)
    }
    pub fn check(player: PlayerId) -> Self {
        Self::new(player, ActionType::Check, 0)
    }
}

impl std::fmt::Display for PlayerAction {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        let text = match self.action {
            ActionType::Fold => "FOLD".red().to_string(),
            ActionType::Check => "CHECK".cyan().to_string(),
            ActionType::Call => format!("CALL  {}", self.amount).yellow().to_string(),
            ActionType::Bet => format!("BET   {}", self.amount).green().to_string(),
            ActionType::Raise => format!("RAISE {}", self.amount).green().to_string(),
            ActionType::Allin => format!("SHOVE {}", self.amount).magenta().to_string(),
            ActionType::PostSmallBlind | ActionType::PostBigBlind => {
                format!("BLIND {}", self.amount).white().to_string()
            }
            ActionType::None => "NONE".to_string(),
        };
        write!(f, "{} {}", self.player, text)
    }
}
