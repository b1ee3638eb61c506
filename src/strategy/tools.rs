use crate::Chips;
use crate::cards::street::Street;
use crate::engine::action::ActionType;
use crate::engine::action::PlayerAction;
use crate::player::context::CurrentHandContext;
use crate::ports::evaluator::PostFlopAnalysisFlags;
use crate::ports::randomizer::Randomizer;

/// shared arithmetic the bot profiles build their policies from

/// price of continuing, as a percentage of the pot after the call
pub fn pot_odds(to_call: Chips, pot_before_call: Chips) -> f64 {
    if to_call <= 0 {
        return 0.0;
    }
    to_call as f64 * 100.0 / (pot_before_call + to_call) as f64
}

/// rough drawing equity by the rule of two and four: is paying this
/// price to chase the draw profitable?
pub fn is_drawing_price_ok(
    flags: &PostFlopAnalysisFlags,
    pot_odds: f64,
    street: Street,
) -> bool {
    let outs = (flags.straight_outs + flags.flush_outs) as f64;
    if outs == 0.0 {
        return false;
    }
    let equity = match street {
        Street::Flop => outs * 4.0,
        Street::Turn => outs * 2.0,
        _ => 0.0,
    };
    equity >= pot_odds
}

/// whether to keep the pot small: out of position against multiple
/// players with a hand that cannot stand heavy action
pub fn should_pot_control(ctx: &CurrentHandContext) -> bool {
    !ctx.has_position()
        && ctx.table.n_live > 2
        && !ctx.flags.has_top_pair_or_better()
        && ctx.equity.win_ranged < 0.6
}

/// size an aggressive action between half pot and full pot, nudged
/// by the profile's aggression and a controlled random roll. the
/// returned amount is the increment above the current highest set,
/// clamped to the legal window; an amount at or beyond hero's
/// remaining stack becomes a shove.
pub fn sized_aggression(
    ctx: &CurrentHandContext,
    aggression: f64,
    randomizer: &mut dyn Randomizer,
) -> PlayerAction {
    let pot = ctx.table.pot + ctx.table.sets_sum;
    let roll = randomizer.rand_int(50, 100) as f64 / 100.0;
    let mut amount = (pot as f64 * roll * aggression) as Chips;
    amount = amount.max(ctx.table.min_raise);
    let all_in = ctx.hero.cash;
    if amount + ctx.to_call() >= all_in {
        return PlayerAction::new(ctx.hero.id, ActionType::Allin, all_in);
    }
    if ctx.may(ActionType::Bet) {
        PlayerAction::new(ctx.hero.id, ActionType::Bet, amount)
    } else if ctx.may(ActionType::Raise) {
        PlayerAction::new(ctx.hero.id, ActionType::Raise, amount)
    } else if ctx.may(ActionType::Allin) {
        PlayerAction::new(ctx.hero.id, ActionType::Allin, all_in)
    } else if ctx.may(ActionType::Call) {
        PlayerAction::new(ctx.hero.id, ActionType::Call, ctx.to_call())
    } else {
        passive(ctx)
    }
}

/// call when legal, else check, else fold
pub fn call_or_fall_back(ctx: &CurrentHandContext) -> PlayerAction {
    if ctx.may(ActionType::Call) {
        PlayerAction::new(ctx.hero.id, ActionType::Call, ctx.to_call())
    } else if ctx.may(ActionType::Allin) && ctx.to_call() > 0 {
        // calling for less than the price is an all-in call
        PlayerAction::new(ctx.hero.id, ActionType::Allin, ctx.hero.cash)
    } else {
        passive(ctx)
    }
}

/// check when legal, else fold
pub fn passive(ctx: &CurrentHandContext) -> PlayerAction {
    if ctx.may(ActionType::Check) {
        PlayerAction::check(ctx.hero.id)
    } else {
        PlayerAction::fold(ctx.hero.id)
    }
}

/// one-in-n chance, through the port
pub fn roll(randomizer: &mut dyn Randomizer, one_in: i64) -> bool {
    one_in > 0 && randomizer.rand_int(1, one_in) == 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pot_odds_basics() {
        assert_eq!(pot_odds(0, 100), 0.0);
        assert_eq!(pot_odds(50, 100), 50.0 * 100.0 / 150.0);
        assert_eq!(pot_odds(100, 100), 50.0);
    }

    #[test]
    fn draws_price_by_street() {
        let flags = PostFlopAnalysisFlags {
            flush_outs: 9,
            ..Default::default()
        };
        // nine outs: ~36% on the flop, ~18% on the turn
        assert!(is_drawing_price_ok(&flags, 30.0, Street::Flop));
        assert!(!is_drawing_price_ok(&flags, 30.0, Street::Turn));
        assert!(!is_drawing_price_ok(&PostFlopAnalysisFlags::default(), 5.0, Street::Flop));
    }
}
