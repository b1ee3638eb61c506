use crate::Chips;
use crate::PlayerId;
use std::collections::BTreeMap;

/// per-game leaderboard used by the simulator: who won how many
/// hands, and how their stacks moved.
#[derive(Debug, Default)]
pub struct RankingBoard {
    rows: BTreeMap<PlayerId, RankingRow>,
}

#[derive(Debug, Clone, Default)]
pub struct RankingRow {
    pub name: String,
    pub strategy: String,
    pub hands_won: u32,
    pub chips: Chips,
}

impl RankingBoard {
    pub fn seat(&mut self, id: PlayerId, name: &str, strategy: &str, chips: Chips) {
        self.rows.insert(
            id,
            RankingRow {
                name: name.to_string(),
                strategy: strategy.to_string(),
                hands_won: 0,
                chips,
            },
        );
    }
    pub fn record(&mut self, winners: &[PlayerId], stacks: &[(PlayerId, Chips)]) {
        for id in winners {
            if let Some(row) = self.rows.get_mut(id) {
                row.hands_won += 1;
            }
        }
        for (id, chips) in stacks {
            if let Some(row) = self.rows.get_mut(id) {
                row.chips = *chips;
            }
        }
    }
    /// final standings, best stack first
    pub fn standings(&self) -> Vec<(PlayerId, RankingRow)> {
        let mut rows: Vec<_> = self.rows.iter().map(|(k, v)| (*k, v.clone())).collect();
        rows.sort_by(|a, b| b.1.chips.cmp(&a.1.chips));
        rows
    }
}
