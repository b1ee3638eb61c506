use crate::Chips;
use crate::engine::action::ActionType;
use crate::engine::action::PlayerAction;
use crate::engine::state::GameState;
use crate::player::player::Player;

/// the per-round action processor: next-actor selection and the
/// legal-action set. stateless over the hand's players; the single
/// source of truth for legality, strategies never self-validate.

/// next non-folded, non-all-in seat clockwise after `from`
pub fn next_acting_after(players: &[Player], from: usize) -> Option<usize> {
    let n = players.len();
    (1..=n)
        .map(|step| (from + step) % n)
        .find(|seat| players[*seat].is_acting())
}

/// who opens the betting round. preflop it is the first acting
/// player clockwise from the big blind (which lands on the dealer in
/// heads-up play); postflop the first acting player clockwise from
/// the dealer.
pub fn first_to_act(
    players: &[Player],
    state: GameState,
    dealer: usize,
    bb_seat: usize,
) -> Option<usize> {
    match state {
        GameState::Preflop => next_acting_after(players, bb_seat),
        _ => next_acting_after(players, dealer),
    }
}

/// the actions open to the current actor. `raise_allowed` is false
/// when a short all-in reached this player after they had already
/// acted: they may call the difference but the betting is not
/// reopened.
pub fn legal_actions(
    player: &Player,
    state: GameState,
    highest_set: Chips,
    min_raise: Chips,
    raise_allowed: bool,
) -> Vec<ActionType> {
    let mut legal = Vec::with_capacity(5);
    let to_call = highest_set - player.set;
    legal.push(ActionType::Fold);
    if to_call == 0 {
        legal.push(ActionType::Check);
    }
    if to_call > 0 && player.cash > to_call {
        legal.push(ActionType::Call);
    }
    if state != GameState::Preflop && highest_set == 0 && player.cash >= min_raise {
        legal.push(ActionType::Bet);
    }
    if highest_set > 0
        && raise_allowed
        && player.cash >= to_call + min_raise
    {
        legal.push(ActionType::Raise);
    }
    if player.cash > 0 {
        legal.push(ActionType::Allin);
    }
    legal
}

/// amount constraints on top of the legal set; returns the reason a
/// submission is rejected
pub fn validate(
    action: &PlayerAction,
    player: &Player,
    state: GameState,
    highest_set: Chips,
    min_raise: Chips,
    raise_allowed: bool,
) -> Result<(), String> {
    let legal = legal_actions(player, state, highest_set, min_raise, raise_allowed);
    if action.player != player.id {
        return Err(format!("it is player {}'s turn", player.id));
    }
    if !legal.contains(&action.action) {
        return Err(match action.action {
            ActionType::Bet if state == GameState::Preflop => {
                "bet is never offered preflop; the opening action facing a blind is call or raise"
                    .to_string()
            }
            ActionType::Bet => "no prior bet is required to bet; one exists".to_string(),
            ActionType::Raise if highest_set == 0 => {
                "raise requires a prior bet; there is no prior bet".to_string()
            }
            other => format!("{} is not available", other),
        });
    }
    let to_call = highest_set - player.set;
    match action.action {
        ActionType::Fold | ActionType::Check => {
            if action.amount != 0 {
                return Err("fold and check carry no amount".to_string());
            }
        }
        ActionType::Call => {
            if action.amount != to_call {
                return Err(format!("call must match the price of {}", to_call));
            }
        }
        ActionType::Bet | ActionType::Raise => {
            if action.amount < min_raise {
                return Err(format!("minimum bet or raise is {}", min_raise));
            }
            if to_call + action.amount > player.cash {
                return Err("cannot bet more than the remaining stack".to_string());
            }
        }
        ActionType::Allin => {
            if action.amount != player.cash {
                return Err(format!("all-in must be the full stack of {}", player.cash));
            }
        }
        _ => return Err("not a player action".to_string()),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::player::SeatState;
    use crate::strategy::profiles::BotProfile;
    use crate::strategy::profiles::BotStrategy;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn player(id: usize, cash: Chips, set: Chips) -> Player {
        let mut p = Player::new(
            id,
            format!("p{}", id),
            cash + set,
            Rc::new(RefCell::new(BotStrategy::new(BotProfile::TightAggressive))),
        );
        if set > 0 {
            p.bet(set);
        }
        p
    }

    #[test]
    fn rotation_skips_folded_and_all_in() {
        let mut players = vec![player(0, 100, 0), player(1, 100, 0), player(2, 100, 0)];
        players[1].fold();
        assert_eq!(next_acting_after(&players, 0), Some(2));
        players[2].state = SeatState::AllIn;
        assert_eq!(next_acting_after(&players, 0), Some(0));
        players[0].fold();
        assert_eq!(next_acting_after(&players, 0), None);
    }

    #[test]
    fn preflop_first_actor_is_left_of_bb() {
        let players = vec![
            player(0, 100, 0), // dealer
            player(1, 90, 10), // sb
            player(2, 80, 20), // bb
            player(3, 100, 0),
        ];
        assert_eq!(
            first_to_act(&players, GameState::Preflop, 0, 2),
            Some(3)
        );
        assert_eq!(first_to_act(&players, GameState::Flop, 0, 2), Some(1));
    }

    #[test]
    fn heads_up_dealer_opens_preflop() {
        let players = vec![
            player(0, 90, 10), // dealer posts sb
            player(1, 80, 20), // bb
        ];
        assert_eq!(
            first_to_act(&players, GameState::Preflop, 0, 1),
            Some(0)
        );
        assert_eq!(first_to_act(&players, GameState::Flop, 0, 1), Some(1));
    }

    #[test]
    fn matched_set_checks_unmatched_calls() {
        let matched = player(0, 80, 20);
        let legal = legal_actions(&matched, GameState::Preflop, 20, 20, true);
        assert!(legal.contains(&ActionType::Check));
        assert!(!legal.contains(&ActionType::Call));
        assert!(!legal.contains(&ActionType::Bet));

        let behind = player(1, 100, 0);
        let legal = legal_actions(&behind, GameState::Preflop, 20, 20, true);
        assert!(!legal.contains(&ActionType::Check));
        assert!(legal.contains(&ActionType::Call));
        assert!(legal.contains(&ActionType::Raise));
    }

    #[test]
    fn bet_only_without_a_prior_bet_postflop() {
        let fresh = player(0, 100, 0);
        let legal = legal_actions(&fresh, GameState::Flop, 0, 20, true);
        assert!(legal.contains(&ActionType::Bet));
        assert!(!legal.contains(&ActionType::Raise));
        assert!(!legal.contains(&ActionType::Call));

        let facing = player(1, 100, 0);
        let legal = legal_actions(&facing, GameState::Flop, 30, 30, true);
        assert!(!legal.contains(&ActionType::Bet));
        assert!(legal.contains(&ActionType::Raise));
    }

    #[test]
    fn short_stacks_lose_the_raise_option() {
        let shorty = player(0, 25, 0);
        let legal = legal_actions(&shorty, GameState::Flop, 20, 20, true);
        // 25 < 20 + 20: cannot make a full raise, but can shove
        assert!(!legal.contains(&ActionType::Raise));
        assert!(legal.contains(&ActionType::Call));
        assert!(legal.contains(&ActionType::Allin));
    }

    #[test]
    fn short_all_in_does_not_reopen_raising() {
        let caller = player(0, 500, 20);
        let legal = legal_actions(&caller, GameState::Flop, 35, 20, false);
        assert!(legal.contains(&ActionType::Call));
        assert!(!legal.contains(&ActionType::Raise));
    }

    #[test]
    fn validation_pins_amounts() {
        let p = player(0, 100, 0);
        let ok = PlayerAction::new(0, ActionType::Call, 20);
        assert!(validate(&ok, &p, GameState::Preflop, 20, 20, true).is_ok());
        let bad = PlayerAction::new(0, ActionType::Call, 10);
        assert!(validate(&bad, &p, GameState::Preflop, 20, 20, true).is_err());
        let shove = PlayerAction::new(0, ActionType::Allin, 100);
        assert!(validate(&shove, &p, GameState::Preflop, 20, 20, true).is_ok());
        let short = PlayerAction::new(0, ActionType::Allin, 50);
        assert!(validate(&short, &p, GameState::Preflop, 20, 20, true).is_err());
    }

    #[test]
    fn preflop_raise_attempt_on_flop_names_the_reason() {
        let p = player(0, 100, 0);
        let raise = PlayerAction::new(0, ActionType::Raise, 50);
        let err = validate(&raise, &p, GameState::Flop, 0, 20, true).unwrap_err();
        assert!(err.contains("no prior bet"), "unexpected reason: {}", err);
    }
}
