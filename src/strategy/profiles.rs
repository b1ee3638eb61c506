use super::Strategy;
use super::tools;
use crate::cards::street::Street;
use crate::engine::action::ActionType;
use crate::engine::action::PlayerAction;
use crate::engine::state::GameState;
use crate::player::context::CurrentHandContext;
use crate::player::position::Position;
use crate::player::range::tables;
use crate::ports::randomizer::Randomizer;

/// the four bot temperaments. each is the same decision skeleton
/// (should-raise, then should-call, then check, then fold) driven by
/// a different parameter set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BotProfile {
    UltraTight,
    TightAggressive,
    LooseAggressive,
    Maniac,
}

impl BotProfile {
    pub const fn all() -> [Self; 4] {
        [
            Self::UltraTight,
            Self::TightAggressive,
            Self::LooseAggressive,
            Self::Maniac,
        ]
    }
    pub fn label(&self) -> &'static str {
        match self {
            Self::UltraTight => "UltraTight",
            Self::TightAggressive => "TightAggressive",
            Self::LooseAggressive => "LooseAggressive",
            Self::Maniac => "Maniac",
        }
    }
    pub fn from_label(label: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.label() == label)
    }

    fn params(&self) -> Params {
        match self {
            // folds everything but the top of the deck, never bluffs
            Self::UltraTight => Params {
                open: 8.0,
                call_bonus: 3.0,
                three_bet: 3.5,
                bluff_one_in: 0,
                value_equity: 0.75,
                call_margin: -8.0,
                aggression: 0.8,
            },
            // standard ranges, value-heavy, bluffs in position
            Self::TightAggressive => Params {
                open: 17.0,
                call_bonus: 8.0,
                three_bet: 7.0,
                bluff_one_in: 6,
                value_equity: 0.65,
                call_margin: 0.0,
                aggression: 1.0,
            },
            // wide opens and more three-bet bluffing
            Self::LooseAggressive => Params {
                open: 28.0,
                call_bonus: 13.0,
                three_bet: 12.0,
                bluff_one_in: 4,
                value_equity: 0.60,
                call_margin: 4.0,
                aggression: 1.15,
            },
            // bets and raises with nearly anything
            Self::Maniac => Params {
                open: 55.0,
                call_bonus: 25.0,
                three_bet: 28.0,
                bluff_one_in: 2,
                value_equity: 0.50,
                call_margin: 12.0,
                aggression: 1.4,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Params {
    open: f64,
    call_bonus: f64,
    three_bet: f64,
    bluff_one_in: i64,
    value_equity: f64,
    call_margin: f64,
    aggression: f64,
}

pub struct BotStrategy {
    profile: BotProfile,
}

impl BotStrategy {
    pub fn new(profile: BotProfile) -> Self {
        Self { profile }
    }
}

impl Strategy for BotStrategy {
    fn decide(
        &mut self,
        ctx: &CurrentHandContext,
        randomizer: &mut dyn Randomizer,
    ) -> PlayerAction {
        if ctx.legal.is_empty() {
            return PlayerAction::fold(ctx.hero.id);
        }
        match ctx.table.state {
            GameState::Preflop => preflop(self.profile, ctx, randomizer),
            _ => postflop(self.profile, ctx, randomizer),
        }
    }
    fn label(&self) -> &str {
        self.profile.label()
    }
}

fn position_factor(position: Position) -> f64 {
    if position.is_late() {
        1.4
    } else if position.is_early() {
        0.8
    } else if position.is_blind() {
        0.9
    } else {
        1.0
    }
}

fn preflop(
    profile: BotProfile,
    ctx: &CurrentHandContext,
    randomizer: &mut dyn Randomizer,
) -> PlayerAction {
    let params = profile.params();
    let percentile = tables::hand_percentile(ctx.table.n_seats, ctx.hero.hole);
    let open = params.open * position_factor(ctx.hero.position);
    let raises = ctx.table.raises_this_street;
    let bb = ctx.table.big_blind();

    // shallow stacks play shove-or-fold
    if ctx.hero.m_ratio < 5.0 && ctx.may(ActionType::Allin) {
        if percentile <= open * 1.5 {
            return PlayerAction::new(ctx.hero.id, ActionType::Allin, ctx.hero.cash);
        }
        return tools::passive(ctx);
    }

    if raises == 0 {
        if percentile <= open {
            // open for three big blinds plus one per limper
            let limpers = ctx.table.calls_this_street as i64;
            let amount = ((2 + limpers) as f64 * bb as f64 * params.aggression) as i64;
            let amount = amount.max(ctx.table.min_raise);
            if amount + ctx.to_call() >= ctx.hero.cash {
                return PlayerAction::new(ctx.hero.id, ActionType::Allin, ctx.hero.cash);
            }
            if ctx.may(ActionType::Raise) {
                return PlayerAction::new(ctx.hero.id, ActionType::Raise, amount);
            }
        }
        if percentile <= open + params.call_bonus && ctx.table.pot_odds < 50.0 {
            return tools::call_or_fall_back(ctx);
        }
        return tools::passive(ctx);
    }

    // facing one or more raises
    let mut reraise = params.three_bet * position_factor(ctx.hero.position) / raises as f64;
    if ctx.table.is_preflop_big_bet {
        reraise *= 0.5;
    }
    if percentile <= reraise {
        return tools::sized_aggression(ctx, params.aggression, randomizer);
    }
    if raises == 1
        && ctx.hero.can_bluff
        && ctx.has_position()
        && !ctx.table.is_preflop_big_bet
        && tools::roll(randomizer, params.bluff_one_in)
    {
        // light three-bet to steal the pot in position
        return tools::sized_aggression(ctx, params.aggression, randomizer);
    }
    let continuing = (open + params.call_bonus) / (raises as f64 + 1.0);
    if percentile <= continuing && ctx.table.pot_odds < 45.0 + params.call_margin {
        return tools::call_or_fall_back(ctx);
    }
    tools::passive(ctx)
}

fn postflop(
    profile: BotProfile,
    ctx: &CurrentHandContext,
    randomizer: &mut dyn Randomizer,
) -> PlayerAction {
    let params = profile.params();
    let street = ctx.table.state.street().unwrap_or(Street::River);
    let equity = ctx.equity.win_ranged;
    let odds = ctx.table.pot_odds;
    let raises = ctx.table.raises_this_street;

    if let Some(action) = should_raise(profile, ctx, street, randomizer) {
        return action;
    }

    if ctx.to_call() == 0 {
        return tools::passive(ctx);
    }
    // facing a bet: price it
    if equity * 100.0 >= odds - params.call_margin && ctx.equity.win < 0.94 {
        return tools::call_or_fall_back(ctx);
    }
    if ctx.equity.win >= 0.94 {
        // near lock: never fold, and the raise path already declined
        return tools::call_or_fall_back(ctx);
    }
    if tools::is_drawing_price_ok(&ctx.flags, odds, street) && raises < 2 {
        return tools::call_or_fall_back(ctx);
    }
    tools::passive(ctx)
}

fn should_raise(
    profile: BotProfile,
    ctx: &CurrentHandContext,
    street: Street,
    randomizer: &mut dyn Randomizer,
) -> Option<PlayerAction> {
    let params = profile.params();
    let equity = ctx.equity.win_ranged;
    let raises = ctx.table.raises_this_street;

    // multiway pots demand more equity to pile chips in
    let mut needed = params.value_equity + 0.05 * (ctx.table.n_live.saturating_sub(2) as f64);
    if raises >= 2 {
        needed = needed.max(0.85);
    }
    if tools::should_pot_control(ctx) && profile != BotProfile::Maniac {
        needed = needed.max(0.80);
    }
    if equity >= needed {
        return Some(tools::sized_aggression(ctx, params.aggression, randomizer));
    }
    // semi-bluff with a priced draw
    if street != Street::River
        && ctx.flags.has_strong_draw()
        && raises == 0
        && tools::roll(randomizer, 2)
        && params.bluff_one_in > 0
    {
        return Some(tools::sized_aggression(ctx, params.aggression, randomizer));
    }
    // continuation bet after preflop aggression
    if street == Street::Flop
        && ctx.hero.is_aggressor[Street::Preflop as usize]
        && raises == 0
        && ctx.table.n_live <= 3
        && (profile != BotProfile::UltraTight || ctx.flags.has_pair_or_better())
        && tools::roll(randomizer, 2)
    {
        return Some(tools::sized_aggression(ctx, params.aggression, randomizer));
    }
    // stone bluff in position against visible weakness
    if ctx.hero.can_bluff
        && ctx.has_position()
        && raises == 0
        && ctx.opponents.max_strength < 0.35
        && ctx.table.n_live == 2
        && tools::roll(randomizer, params.bluff_one_in)
    {
        return Some(tools::sized_aggression(ctx, params.aggression, randomizer));
    }
    None
}
