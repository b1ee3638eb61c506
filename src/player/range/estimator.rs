use super::combo::ComboSet;
use super::grammar;
use super::tables;
use crate::MIN_HANDS_STATISTICS_ACCURATE;
use crate::PlayerId;
use crate::cards::board::Board;
use crate::cards::hand::Hand;
use crate::cards::street::Street;
use crate::engine::action::ActionType;
use crate::player::position::Position;
use crate::player::stats::PlayerStatistics;
use crate::ports::evaluator::HandEvaluationEngine;

/// what the table knew about a player when they acted preflop
#[derive(Debug, Clone, Copy)]
pub struct PreflopObservation<'a> {
    pub action: ActionType,
    pub n_players: usize,
    pub position: Position,
    /// pot odds the player faced, as a percentage
    pub pot_odds: f64,
    /// raises already in before this action
    pub raises_before: usize,
    pub stats: &'a PlayerStatistics,
    pub raiser_stats: Option<&'a PlayerStatistics>,
    pub raiser_very_loose: bool,
    pub very_loose: bool,
}

/// what the table knew about a player when they acted postflop
#[derive(Debug, Clone, Copy)]
pub struct PostflopObservation<'a> {
    pub action: ActionType,
    pub street: Street,
    pub board: &'a Board,
    pub n_players: usize,
    /// the actor checked earlier this street and is now raising
    pub check_raise: bool,
    /// bets and raises already in on this street
    pub bets_this_street: usize,
    pub pot_odds: f64,
    pub stats: &'a PlayerStatistics,
    pub very_loose: bool,
}

/// one player's estimated holdings, as their opponents see them.
/// materialized on the first voluntary preflop action and only ever
/// narrowed afterwards: an action no remaining combo can justify
/// keeps the previous range and records an anomaly instead.
#[derive(Debug, Clone)]
pub struct RangeEstimator {
    player: PlayerId,
    combos: Option<ComboSet>,
    anomalies: u32,
}

impl RangeEstimator {
    pub fn new(player: PlayerId) -> Self {
        Self {
            player,
            combos: None,
            anomalies: 0,
        }
    }

    pub fn reset(&mut self) {
        self.combos = None;
        self.anomalies = 0;
    }
    pub fn is_materialized(&self) -> bool {
        self.combos.is_some()
    }
    pub fn combos(&self) -> Option<&ComboSet> {
        self.combos.as_ref()
    }
    pub fn len(&self) -> usize {
        self.combos.as_ref().map_or(0, ComboSet::len)
    }
    pub fn anomalies(&self) -> u32 {
        self.anomalies
    }
    pub fn text(&self) -> Option<String> {
        self.combos.as_ref().map(grammar::serialize)
    }

    /// first materialization or preflop re-narrowing
    pub fn observe_preflop(&mut self, obs: &PreflopObservation, dead_cards: &Hand) {
        let percent = match obs.action {
            ActionType::Raise | ActionType::Bet | ActionType::Allin => raiser_percent(obs),
            ActionType::Call => caller_percent(obs),
            ActionType::Check => {
                // an unraised big blind check tells us nothing
                if self.combos.is_none() {
                    self.materialize(tables::standard_calling_range(obs.n_players), obs, dead_cards);
                }
                return;
            }
            _ => return,
        };
        log::debug!(
            "player {} estimated preflop range: {}%",
            self.player,
            percent
        );
        match self.combos {
            None => self.materialize(percent, obs, dead_cards),
            Some(_) => {
                // later streets of preflop aggression intersect down
                let narrowed =
                    grammar::parse_combos(tables::top_range(obs.n_players, percent))
                        .expect("generated tables parse");
                self.narrow(|combo| narrowed.contains(combo));
            }
        }
        if let Some(combos) = self.combos.as_mut() {
            combos.discard_conflicts(dead_cards);
        }
    }

    /// narrow by what the action implies against this board
    pub fn observe_postflop(
        &mut self,
        obs: &PostflopObservation,
        engine: &dyn HandEvaluationEngine,
    ) {
        if self.combos.is_none() {
            // the player got here without a voluntary preflop action
            let percent = tables::standard_calling_range(obs.n_players);
            self.combos = Some(
                grammar::parse_combos(tables::top_range(obs.n_players, percent))
                    .expect("generated tables parse"),
            );
        }
        let board = Hand::from(obs.board);
        if let Some(combos) = self.combos.as_mut() {
            combos.discard_conflicts(&board);
        }
        match obs.action {
            ActionType::Bet | ActionType::Raise | ActionType::Allin => {
                if obs.check_raise {
                    // check-raises need a real hand or a real draw
                    self.narrow(|combo| {
                        let flags = engine.analyze_postflop((*combo).into(), obs.board);
                        flags.has_pair_or_better() || flags.has_strong_draw()
                    });
                } else if !is_habitual_bluffer(obs.stats) && !obs.very_loose {
                    self.narrow(|combo| {
                        let flags = engine.analyze_postflop((*combo).into(), obs.board);
                        flags.has_pair_or_better() || flags.has_draw() || flags.is_over_cards
                    });
                }
            }
            ActionType::Call => {
                if obs.street == Street::River && obs.bets_this_street >= 2 {
                    // calling down a barrage without a pair is rare
                    if !is_calling_station(obs.stats) {
                        self.narrow(|combo| {
                            engine
                                .analyze_postflop((*combo).into(), obs.board)
                                .has_pair_or_better()
                        });
                    }
                } else if obs.pot_odds > 40.0 && obs.bets_this_street >= 1 {
                    // a big call needs at least a piece or a draw
                    self.narrow(|combo| {
                        let flags = engine.analyze_postflop((*combo).into(), obs.board);
                        flags.has_pair_or_better() || flags.has_draw() || flags.is_over_cards
                    });
                }
            }
            _ => {}
        }
    }

    fn materialize(&mut self, percent: f64, obs: &PreflopObservation, dead_cards: &Hand) {
        let mut combos = grammar::parse_combos(tables::top_range(obs.n_players, percent))
            .expect("generated tables parse");
        combos.discard_conflicts(dead_cards);
        self.combos = Some(combos);
    }

    /// remove combos failing the predicate; refuse to empty the range
    fn narrow(&mut self, keep: impl Fn(&super::combo::Combo) -> bool) {
        let Some(combos) = self.combos.as_mut() else {
            return;
        };
        let survivors: ComboSet = combos.iter().filter(|c| keep(c)).copied().collect();
        if survivors.is_empty() && !combos.is_empty() {
            self.anomalies += 1;
            log::debug!(
                "player {} did something no remaining combo justifies; keeping {} combos",
                self.player,
                combos.len()
            );
            return;
        }
        *combos = survivors;
    }
}

fn enough_hands(stats: &PlayerStatistics) -> bool {
    stats.hands >= MIN_HANDS_STATISTICS_ACCURATE
}

fn is_habitual_bluffer(stats: &PlayerStatistics) -> bool {
    enough_hands(stats) && stats.aggression_frequency() > 40.0
}

fn is_calling_station(stats: &PlayerStatistics) -> bool {
    enough_hands(stats) && stats.went_to_showdown_pct() > 40.0
}

/// percentile adjustment shared by the raiser and caller paths
fn adjust_for_position(mut percent: f64, position: Position, n_players: usize) -> f64 {
    if n_players > 3 {
        if position.is_early() {
            percent *= 0.9;
        } else if matches!(position, Position::Button | Position::Cutoff) {
            percent *= 1.4;
        }
    }
    percent.min(100.0)
}

fn adjust_for_pot_odds(percent: f64, pot_odds: f64) -> f64 {
    match pot_odds {
        p if p >= 99.0 => percent * 0.1,
        p if p >= 95.0 => percent * 0.3,
        p if p >= 85.0 => percent * 0.5,
        p if p > 70.0 => percent * 0.7,
        _ => percent,
    }
}

/// estimated opening percentile for a player who raised
fn raiser_percent(obs: &PreflopObservation) -> f64 {
    let stats = obs.stats;
    let mut percent = if enough_hands(stats) {
        stats.pfr()
    } else {
        tables::standard_raising_range(obs.n_players)
    };
    percent = adjust_for_position(percent, obs.position, obs.n_players);
    percent = match obs.raises_before {
        0 => percent,
        1 => {
            if enough_hands(stats) && stats.three_bet() > 0.0 {
                stats.three_bet()
            } else {
                percent * 0.3
            }
        }
        _ => {
            if enough_hands(stats) && stats.four_bet() > 0.0 {
                stats.four_bet()
            } else {
                percent * 0.15
            }
        }
    };
    percent = adjust_for_pot_odds(percent, obs.pot_odds);
    if obs.very_loose && percent < 40.0 {
        percent = 40.0;
    }
    (percent + 1.0).ceil().clamp(1.0, 100.0)
}

/// estimated percentile for a player who limped or called
fn caller_percent(obs: &PreflopObservation) -> f64 {
    let stats = obs.stats;
    let mut percent = if enough_hands(stats) {
        stats.vpip()
    } else {
        tables::standard_calling_range(obs.n_players)
    };
    percent = adjust_for_position(percent, obs.position, obs.n_players);
    if obs.pot_odds <= 20.0 && obs.raises_before < 2 {
        percent = 40.0;
    } else {
        percent = adjust_for_pot_odds(percent, obs.pot_odds);
    }
    percent = match obs.raises_before {
        0 => {
            // a limp is a hand worth calling but not raising
            if enough_hands(stats) {
                (percent - stats.pfr()).max(5.0)
            } else {
                percent
            }
        }
        1 => {
            let mut p = if enough_hands(stats) {
                (percent - stats.three_bet()).max(1.0)
            } else {
                percent
            };
            if enough_hands(stats) && stats.vpip() - stats.pfr() > 15.0 {
                p /= 2.0; // loose-passive callers call raises much tighter
            }
            p
        }
        2 => {
            if !enough_hands(stats) {
                percent / 3.0
            } else {
                let mut p = stats.pfr() * stats.call_three_bet() / 100.0;
                if let Some(raiser) = obs.raiser_stats {
                    // callers adapt to the raiser's 3-bet range
                    p = p.max(raiser.three_bet() * 0.8);
                }
                p
            }
        }
        _ => {
            if !enough_hands(stats) {
                percent / 5.0
            } else {
                stats.three_bet() * stats.call_three_bet() / 100.0
            }
        }
    };
    if obs.raises_before >= 2 {
        percent = adjust_for_pot_odds(percent, obs.pot_odds);
    }
    if obs.raiser_very_loose && obs.raises_before == 1 {
        let floor = match obs.n_players {
            n if n > 6 => 20.0,
            n if n > 4 => 30.0,
            _ => 40.0,
        };
        percent = percent.max(floor);
    }
    (percent + 1.0).ceil().clamp(1.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::evaluator::BitwiseEvaluationEngine;

    fn seasoned(vpip: u32, pfr: u32) -> PlayerStatistics {
        PlayerStatistics {
            hands: 100,
            vpip_hands: vpip,
            pfr_hands: pfr,
            ..Default::default()
        }
    }

    fn preflop_raise<'a>(stats: &'a PlayerStatistics, n_players: usize) -> PreflopObservation<'a> {
        PreflopObservation {
            action: ActionType::Raise,
            n_players,
            position: Position::Middle,
            pot_odds: 10.0,
            raises_before: 0,
            stats,
            raiser_stats: None,
            raiser_very_loose: false,
            very_loose: false,
        }
    }

    #[test]
    fn first_raise_materializes_a_range() {
        let stats = seasoned(25, 18);
        let mut estimator = RangeEstimator::new(1);
        assert!(!estimator.is_materialized());
        estimator.observe_preflop(&preflop_raise(&stats, 6), &Hand::empty());
        assert!(estimator.is_materialized());
        assert!(estimator.len() > 0);
        assert!(estimator.text().unwrap().contains("AA"));
    }

    #[test]
    fn reraise_narrows_monotonically() {
        let stats = seasoned(25, 18);
        let mut estimator = RangeEstimator::new(1);
        estimator.observe_preflop(&preflop_raise(&stats, 6), &Hand::empty());
        let open = estimator.len();
        let mut obs = preflop_raise(&stats, 6);
        obs.raises_before = 1;
        estimator.observe_preflop(&obs, &Hand::empty());
        assert!(estimator.len() <= open, "{} > {}", estimator.len(), open);
    }

    #[test]
    fn unknown_players_fall_back_to_standard_ranges() {
        let stats = PlayerStatistics::default();
        let mut estimator = RangeEstimator::new(1);
        estimator.observe_preflop(&preflop_raise(&stats, 2), &Hand::empty());
        // 39% + position + margin, a wide heads-up range
        assert!(estimator.len() > 300);
    }

    #[test]
    fn postflop_aggression_removes_air() {
        let engine = BitwiseEvaluationEngine;
        let stats = seasoned(25, 18);
        let mut estimator = RangeEstimator::new(1);
        estimator.observe_preflop(&preflop_raise(&stats, 4), &Hand::empty());
        let before = estimator.len();

        let mut board = Board::empty();
        board.reveal(&[
            crate::cards::card::Card::try_from("Ah").unwrap(),
            crate::cards::card::Card::try_from("7d").unwrap(),
            crate::cards::card::Card::try_from("2c").unwrap(),
        ]);
        let obs = PostflopObservation {
            action: ActionType::Bet,
            street: Street::Flop,
            board: &board,
            n_players: 4,
            check_raise: false,
            bets_this_street: 0,
            pot_odds: 0.0,
            stats: &stats,
            very_loose: false,
        };
        estimator.observe_postflop(&obs, &engine);
        assert!(estimator.len() < before);
        // board cards can no longer be in the range
        for combo in estimator.combos().unwrap().iter() {
            assert!(!combo.conflicts(&Hand::from(&board)));
        }
    }

    #[test]
    fn narrowing_never_empties_the_range() {
        let engine = BitwiseEvaluationEngine;
        let stats = seasoned(25, 18);
        let mut estimator = RangeEstimator::new(1);
        // a one-percent range: premium pairs only
        let mut obs = preflop_raise(&stats, 6);
        obs.pot_odds = 99.5;
        obs.raises_before = 3;
        estimator.observe_preflop(&obs, &Hand::empty());
        let held = estimator.len();
        assert!(held > 0);

        // a board that cracks every premium pair still leaves the range intact
        let mut board = Board::empty();
        board.reveal(&[
            crate::cards::card::Card::try_from("7h").unwrap(),
            crate::cards::card::Card::try_from("6h").unwrap(),
            crate::cards::card::Card::try_from("5h").unwrap(),
        ]);
        for _ in 0..3 {
            let post = PostflopObservation {
                action: ActionType::Call,
                street: Street::River,
                board: &board,
                n_players: 6,
                check_raise: false,
                bets_this_street: 3,
                pot_odds: 50.0,
                stats: &stats,
                very_loose: false,
            };
            estimator.observe_postflop(&post, &engine);
            assert!(estimator.len() > 0, "range emptied");
        }
    }

    #[test]
    fn monotonic_across_a_hand() {
        let engine = BitwiseEvaluationEngine;
        let stats = seasoned(30, 20);
        let mut estimator = RangeEstimator::new(2);
        estimator.observe_preflop(&preflop_raise(&stats, 6), &Hand::empty());
        let mut sizes = vec![estimator.len()];

        let mut board = Board::empty();
        board.reveal(&[
            crate::cards::card::Card::try_from("Kh").unwrap(),
            crate::cards::card::Card::try_from("8d").unwrap(),
            crate::cards::card::Card::try_from("3c").unwrap(),
        ]);
        for (street, cards) in [
            (Street::Flop, vec![]),
            (Street::Turn, vec!["Qs"]),
            (Street::River, vec!["2d"]),
        ] {
            for text in cards {
                board.reveal(&[crate::cards::card::Card::try_from(text).unwrap()]);
            }
            let obs = PostflopObservation {
                action: ActionType::Bet,
                street,
                board: &board,
                n_players: 6,
                check_raise: false,
                bets_this_street: 0,
                pot_odds: 0.0,
                stats: &stats,
                very_loose: false,
            };
            estimator.observe_postflop(&obs, &engine);
            sizes.push(estimator.len());
        }
        for pair in sizes.windows(2) {
            assert!(pair[1] <= pair[0], "range grew: {:?}", sizes);
        }
    }
}
