use super::config::GameData;
use super::config::StartData;
use super::game::Game;
use crate::engine::error::EngineError;
use crate::engine::events::SeatSummary;
use crate::player::player::Player;
use crate::player::stats::TableBucket;
use crate::ports::Services;
use crate::ports::stats_store::StatsKey;
use crate::strategy::assigner::StrategyAssigner;
use crate::strategy::human::HumanInputSlot;
use crate::strategy::profiles::BotProfile;
use crate::strategy::profiles::BotStrategy;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

/// the outermost assembly: validates parameters, builds the seat
/// list by combining the strategy assigner with the player factory,
/// loads everyone's persistent statistics, and hands the finished
/// game to the caller.
pub struct Session {
    game: Game,
    human_slot: Option<Arc<HumanInputSlot>>,
}

impl Session {
    /// bot table seated according to the configured table profile;
    /// seat zero becomes a human bridge when requested
    pub fn new(
        data: GameData,
        start: StartData,
        services: Services,
        with_human: bool,
    ) -> Result<Self, EngineError> {
        data.validate(&start)?;
        let human_slot = with_human.then(HumanInputSlot::new);
        let assigner = StrategyAssigner::new(data.table_profile, human_slot.clone());
        let bucket = TableBucket::from(start.number_of_players);

        let mut players = Vec::with_capacity(start.number_of_players);
        let mut human_slots = HashMap::new();
        for seat in 0..start.number_of_players {
            let strategy = {
                let mut randomizer = services.randomizer.borrow_mut();
                assigner.assign(seat, &mut *randomizer)
            };
            let name = if strategy.borrow().is_human() {
                "You".to_string()
            } else {
                format!("Bot {}", seat)
            };
            let mut player = Player::new(seat, name, data.start_money, strategy);
            let key = StatsKey::new(player.strategy_label(), bucket);
            player.stats = services.stats.borrow().load(&key);
            if player.is_human() {
                if let Some(slot) = &human_slot {
                    human_slots.insert(seat, Arc::clone(slot));
                }
            }
            players.push(player);
        }

        Self::assemble(data, start, services, players, human_slots, human_slot)
    }

    /// explicit seating, used by the simulator: one bot per entry
    pub fn with_bots(
        data: GameData,
        profiles: Vec<BotProfile>,
        services: Services,
    ) -> Result<Self, EngineError> {
        let start = StartData {
            number_of_players: profiles.len(),
            start_dealer_player_id: None,
        };
        data.validate(&start)?;
        let bucket = TableBucket::from(profiles.len());
        let mut players = Vec::with_capacity(profiles.len());
        for (seat, profile) in profiles.into_iter().enumerate() {
            let strategy = Rc::new(RefCell::new(BotStrategy::new(profile)));
            let name = format!("{} {}", profile.label(), seat);
            let mut player = Player::new(seat, name, data.start_money, strategy);
            let key = StatsKey::new(player.strategy_label(), bucket);
            player.stats = services.stats.borrow().load(&key);
            players.push(player);
        }
        Self::assemble(data, start, services, players, HashMap::new(), None)
    }

    fn assemble(
        data: GameData,
        start: StartData,
        services: Services,
        players: Vec<Player>,
        human_slots: HashMap<usize, Arc<HumanInputSlot>>,
        human_slot: Option<Arc<HumanInputSlot>>,
    ) -> Result<Self, EngineError> {
        let summaries: Vec<SeatSummary> = players
            .iter()
            .map(|p| SeatSummary {
                id: p.id,
                name: p.name.clone(),
                strategy: p.strategy_label(),
                chips: p.cash,
            })
            .collect();
        services.events.on_game_initialized(data.gui_speed);
        services.events.on_players_initialized(&summaries);

        let dealer = start.start_dealer_player_id.unwrap_or(0);
        let game = Game::new(
            services,
            players,
            dealer,
            data.first_small_blind,
            human_slots,
        );
        Ok(Self { game, human_slot })
    }

    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
    /// the producer side of the human rendezvous, for the UI thread
    pub fn human_slot(&self) -> Option<Arc<HumanInputSlot>> {
        self.human_slot.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::events::NullSink;
    use crate::session::config::TableProfile;

    fn services() -> Services {
        Services::stock(Rc::new(NullSink))
    }

    #[test]
    fn session_rejects_bad_config() {
        let data = GameData {
            start_money: -5,
            ..Default::default()
        };
        let start = StartData {
            number_of_players: 4,
            start_dealer_player_id: None,
        };
        assert!(matches!(
            Session::new(data, start, services(), false),
            Err(EngineError::Config(_))
        ));
    }

    #[test]
    fn session_seats_the_requested_table() {
        let data = GameData {
            table_profile: TableProfile::TightAggressiveOpponents,
            ..Default::default()
        };
        let start = StartData {
            number_of_players: 5,
            start_dealer_player_id: Some(2),
        };
        let session = Session::new(data, start, services(), false).unwrap();
        assert_eq!(session.game().players().len(), 5);
        assert!(
            session
                .game()
                .players()
                .iter()
                .all(|p| p.strategy_label() == "TightAggressive")
        );
        assert_eq!(session.game().dealer(), 2);
    }

    #[test]
    fn human_seat_gets_a_slot() {
        let session = Session::new(
            GameData::default(),
            StartData {
                number_of_players: 3,
                start_dealer_player_id: None,
            },
            services(),
            true,
        )
        .unwrap();
        assert!(session.human_slot().is_some());
        assert!(session.game().players()[0].is_human());
        assert!(!session.game().players()[1].is_human());
    }
}
