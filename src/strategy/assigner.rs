use super::Strategy;
use super::human::HumanInputSlot;
use super::human::HumanStrategy;
use super::profiles::BotProfile;
use super::profiles::BotStrategy;
use crate::ports::randomizer::Randomizer;
use crate::session::config::TableProfile;
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

/// maps the table profile and a seat index to a concrete strategy.
/// seat zero becomes the human bridge when a slot is supplied.
pub struct StrategyAssigner {
    profile: TableProfile,
    human_slot: Option<Arc<HumanInputSlot>>,
}

impl StrategyAssigner {
    pub fn new(profile: TableProfile, human_slot: Option<Arc<HumanInputSlot>>) -> Self {
        Self {
            profile,
            human_slot,
        }
    }

    pub fn assign(
        &self,
        seat: usize,
        randomizer: &mut dyn Randomizer,
    ) -> Rc<RefCell<dyn Strategy>> {
        if seat == 0 {
            if let Some(slot) = &self.human_slot {
                return Rc::new(RefCell::new(HumanStrategy::new(Arc::clone(slot))));
            }
        }
        let profile = match self.profile {
            TableProfile::TightAggressiveOpponents => BotProfile::TightAggressive,
            TableProfile::LargeAggressiveOpponents => BotProfile::LooseAggressive,
            TableProfile::ManiacOpponents => BotProfile::Maniac,
            TableProfile::RandomOpponents => {
                let all = BotProfile::all();
                all[randomizer.rand_int(0, all.len() as i64 - 1) as usize]
            }
        };
        Rc::new(RefCell::new(BotStrategy::new(profile)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::randomizer::ScriptedRandomizer;

    #[test]
    fn fixed_profiles_ignore_the_roll() {
        let assigner = StrategyAssigner::new(TableProfile::ManiacOpponents, None);
        let mut randomizer = ScriptedRandomizer::default();
        for seat in 0..4 {
            assert_eq!(assigner.assign(seat, &mut randomizer).borrow().label(), "Maniac");
        }
    }

    #[test]
    fn random_profile_follows_the_roll() {
        let assigner = StrategyAssigner::new(TableProfile::RandomOpponents, None);
        let mut randomizer = ScriptedRandomizer::with_script([0, 3]);
        assert_eq!(
            assigner.assign(1, &mut randomizer).borrow().label(),
            "UltraTight"
        );
        assert_eq!(assigner.assign(2, &mut randomizer).borrow().label(), "Maniac");
    }

    #[test]
    fn seat_zero_goes_human_when_configured() {
        let slot = HumanInputSlot::new();
        let assigner = StrategyAssigner::new(TableProfile::RandomOpponents, Some(slot));
        let mut randomizer = ScriptedRandomizer::default();
        assert!(assigner.assign(0, &mut randomizer).borrow().is_human());
        assert!(!assigner.assign(1, &mut randomizer).borrow().is_human());
    }
}
