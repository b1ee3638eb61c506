use crate::Chips;
use crate::MAX_PLAYERS;
use crate::MIN_PLAYERS;
use crate::PlayerId;
use crate::engine::error::EngineError;

/// the kind of table the strategy assigner should seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TableProfile {
    #[default]
    RandomOpponents,
    TightAggressiveOpponents,
    LargeAggressiveOpponents,
    ManiacOpponents,
}

/// table-wide parameters, fixed for the life of a game
#[derive(Debug, Clone, Copy)]
pub struct GameData {
    pub max_number_of_players: usize,
    pub start_money: Chips,
    pub first_small_blind: Chips,
    pub table_profile: TableProfile,
    /// advisory pacing hint; the engine ignores it, UIs consume it
    pub gui_speed: u32,
}

impl Default for GameData {
    fn default() -> Self {
        Self {
            max_number_of_players: 6,
            start_money: 1_000,
            first_small_blind: 10,
            table_profile: TableProfile::default(),
            gui_speed: 1,
        }
    }
}

/// per-game start parameters
#[derive(Debug, Clone, Copy)]
pub struct StartData {
    pub number_of_players: usize,
    /// fixed first dealer, or None to auto-select seat zero
    pub start_dealer_player_id: Option<PlayerId>,
}

impl GameData {
    pub fn big_blind(&self) -> Chips {
        self.first_small_blind * 2
    }

    pub fn validate(&self, start: &StartData) -> Result<(), EngineError> {
        if start.number_of_players < MIN_PLAYERS || start.number_of_players > MAX_PLAYERS {
            return Err(EngineError::Config(format!(
                "number of players must be within {}..={}, got {}",
                MIN_PLAYERS, MAX_PLAYERS, start.number_of_players
            )));
        }
        if start.number_of_players > self.max_number_of_players {
            return Err(EngineError::Config(format!(
                "{} players exceed the table maximum of {}",
                start.number_of_players, self.max_number_of_players
            )));
        }
        if self.start_money <= 0 {
            return Err(EngineError::Config(format!(
                "starting stacks must be positive, got {}",
                self.start_money
            )));
        }
        if self.first_small_blind <= 0 {
            return Err(EngineError::Config(format!(
                "small blind must be positive, got {}",
                self.first_small_blind
            )));
        }
        if self.big_blind() > self.start_money {
            return Err(EngineError::Config(
                "starting stacks do not cover the big blind".to_string(),
            ));
        }
        if let Some(dealer) = start.start_dealer_player_id {
            if dealer >= start.number_of_players {
                return Err(EngineError::Config(format!(
                    "dealer id {} out of range for {} players",
                    dealer, start.number_of_players
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn start(n: usize) -> StartData {
        StartData {
            number_of_players: n,
            start_dealer_player_id: None,
        }
    }

    #[test]
    fn default_config_is_valid() {
        assert!(GameData::default().validate(&start(6)).is_ok());
    }

    #[test]
    fn rejects_bad_player_counts() {
        assert!(GameData::default().validate(&start(1)).is_err());
        assert!(GameData::default().validate(&start(11)).is_err());
    }

    #[test]
    fn rejects_nonpositive_money() {
        let data = GameData {
            start_money: 0,
            ..Default::default()
        };
        assert!(data.validate(&start(4)).is_err());
    }

    #[test]
    fn rejects_out_of_range_dealer() {
        let start = StartData {
            number_of_players: 4,
            start_dealer_player_id: Some(4),
        };
        assert!(GameData::default().validate(&start).is_err());
    }
}
