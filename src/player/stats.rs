use serde::Deserialize;
use serde::Serialize;

/// which aggregate a player's history is persisted under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TableBucket {
    HeadsUp,
    ShortHanded,
    FullRing,
}

impl From<usize> for TableBucket {
    fn from(n_players: usize) -> Self {
        match n_players {
            0..=2 => Self::HeadsUp,
            3..=6 => Self::ShortHanded,
            _ => Self::FullRing,
        }
    }
}

impl std::fmt::Display for TableBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Self::HeadsUp => write!(f, "HU"),
            Self::ShortHanded => write!(f, "SH"),
            Self::FullRing => write!(f, "FR"),
        }
    }
}

/// raw counters for one street
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetStatistics {
    pub hands: u32,
    pub folds: u32,
    pub checks: u32,
    pub calls: u32,
    pub bets: u32,
    pub raises: u32,
    pub three_bets: u32,
    pub four_bets: u32,
    pub call_three_bets: u32,
    pub call_three_bet_opportunities: u32,
    pub limps: u32,
    pub continuation_bets: u32,
    pub continuation_bet_opportunities: u32,
}

impl StreetStatistics {
    pub fn merge(&mut self, other: &Self) {
        self.hands += other.hands;
        self.folds += other.folds;
        self.checks += other.checks;
        self.calls += other.calls;
        self.bets += other.bets;
        self.raises += other.raises;
        self.three_bets += other.three_bets;
        self.four_bets += other.four_bets;
        self.call_three_bets += other.call_three_bets;
        self.call_three_bet_opportunities += other.call_three_bet_opportunities;
        self.limps += other.limps;
        self.continuation_bets += other.continuation_bets;
        self.continuation_bet_opportunities += other.continuation_bet_opportunities;
    }
}

/// a player's accumulated behavioral profile. raw counters are
/// persisted; the derived frequencies below are what the range
/// estimator and the bots actually consume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatistics {
    pub preflop: StreetStatistics,
    pub flop: StreetStatistics,
    pub turn: StreetStatistics,
    pub river: StreetStatistics,
    pub hands: u32,
    pub vpip_hands: u32,
    pub pfr_hands: u32,
    pub went_to_showdown: u32,
    pub won_at_showdown: u32,
    pub saw_flop: u32,
    pub won_when_saw_flop: u32,
}

fn pct(num: u32, den: u32) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 * 100.0 / den as f64
    }
}

impl PlayerStatistics {
    pub fn merge(&mut self, other: &Self) {
        self.preflop.merge(&other.preflop);
        self.flop.merge(&other.flop);
        self.turn.merge(&other.turn);
        self.river.merge(&other.river);
        self.hands += other.hands;
        self.vpip_hands += other.vpip_hands;
        self.pfr_hands += other.pfr_hands;
        self.went_to_showdown += other.went_to_showdown;
        self.won_at_showdown += other.won_at_showdown;
        self.saw_flop += other.saw_flop;
        self.won_when_saw_flop += other.won_when_saw_flop;
    }

    /// % of hands where money went in voluntarily preflop
    pub fn vpip(&self) -> f64 {
        pct(self.vpip_hands, self.hands)
    }
    /// % of hands opened with a raise preflop
    pub fn pfr(&self) -> f64 {
        pct(self.pfr_hands, self.hands)
    }
    pub fn three_bet(&self) -> f64 {
        pct(self.preflop.three_bets, self.hands)
    }
    pub fn four_bet(&self) -> f64 {
        pct(self.preflop.four_bets, self.hands)
    }
    pub fn call_three_bet(&self) -> f64 {
        pct(
            self.preflop.call_three_bets,
            self.preflop.call_three_bet_opportunities,
        )
    }
    pub fn went_to_showdown_pct(&self) -> f64 {
        pct(self.went_to_showdown, self.saw_flop)
    }

    /// postflop (bets + raises) / calls
    pub fn aggression_factor(&self) -> f64 {
        let aggressive = self.flop.bets
            + self.flop.raises
            + self.turn.bets
            + self.turn.raises
            + self.river.bets
            + self.river.raises;
        let passive = self.flop.calls + self.turn.calls + self.river.calls;
        if passive == 0 {
            aggressive as f64
        } else {
            aggressive as f64 / passive as f64
        }
    }
    /// postflop (bets + raises) / all postflop actions, as a %
    pub fn aggression_frequency(&self) -> f64 {
        let aggressive = self.flop.bets
            + self.flop.raises
            + self.turn.bets
            + self.turn.raises
            + self.river.bets
            + self.river.raises;
        let total = aggressive
            + self.flop.calls
            + self.turn.calls
            + self.river.calls
            + self.flop.checks
            + self.turn.checks
            + self.river.checks
            + self.flop.folds
            + self.turn.folds
            + self.river.folds;
        pct(aggressive, total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frequencies_guard_division_by_zero() {
        let stats = PlayerStatistics::default();
        assert_eq!(stats.vpip(), 0.0);
        assert_eq!(stats.aggression_factor(), 0.0);
        assert_eq!(stats.aggression_frequency(), 0.0);
    }

    #[test]
    fn merge_accumulates() {
        let mut a = PlayerStatistics {
            hands: 10,
            vpip_hands: 3,
            ..Default::default()
        };
        let b = PlayerStatistics {
            hands: 10,
            vpip_hands: 2,
            ..Default::default()
        };
        a.merge(&b);
        assert_eq!(a.hands, 20);
        assert_eq!(a.vpip(), 25.0);
    }

    #[test]
    fn buckets_by_table_size() {
        assert_eq!(TableBucket::from(2), TableBucket::HeadsUp);
        assert_eq!(TableBucket::from(6), TableBucket::ShortHanded);
        assert_eq!(TableBucket::from(9), TableBucket::FullRing);
    }
}
