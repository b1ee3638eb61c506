use crate::EQUITY_ITERATIONS;
use crate::Equity;
use crate::MULTIWAY_ITERATIONS;
use crate::cards::board::Board;
use crate::cards::card::Card;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::cards::rank::Rank;
use crate::cards::ranking::Ranking;
use crate::cards::strength::Strength;
use crate::ports::randomizer::Randomizer;

/// headline result of a monte carlo equity run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct HandSimulationStats {
    pub win: Equity,
    pub tie: Equity,
    pub lose: Equity,
    /// chance of winning against the live opponent ranges,
    /// when the strength evaluator could narrow them
    pub win_ranged: Equity,
    pub win_sd: Equity,
    pub tie_sd: Equity,
    pub lose_sd: Equity,
    pub evaluations: u32,
}

/// structural facts about hero's hand against the current board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFlopAnalysisFlags {
    pub uses_first: bool,
    pub uses_second: bool,
    pub is_no_pair: bool,
    pub is_one_pair: bool,
    pub is_pocket_pair: bool,
    pub is_two_pair: bool,
    pub is_trips: bool,
    pub is_straight: bool,
    pub is_flush: bool,
    pub is_full_house: bool,
    pub is_quads: bool,
    pub is_straight_flush: bool,
    pub is_top_pair: bool,
    pub is_middle_pair: bool,
    pub is_bottom_pair: bool,
    pub is_over_pair: bool,
    pub is_over_cards: bool,
    pub is_flush_draw_possible: bool,
    pub is_open_ended_straight_draw_possible: bool,
    pub is_gutshot_possible: bool,
    pub straight_outs: u8,
    pub flush_outs: u8,
    pub better_outs: u8,
}

impl PostFlopAnalysisFlags {
    pub fn has_pair_or_better(&self) -> bool {
        !self.is_no_pair
    }
    pub fn has_draw(&self) -> bool {
        self.is_flush_draw_possible
            || self.is_open_ended_straight_draw_possible
            || self.is_gutshot_possible
    }
    pub fn has_strong_draw(&self) -> bool {
        self.is_flush_draw_possible || self.is_open_ended_straight_draw_possible
    }
    pub fn has_top_pair_or_better(&self) -> bool {
        self.is_top_pair
            || self.is_over_pair
            || self.is_two_pair
            || self.is_trips
            || self.is_straight
            || self.is_flush
            || self.is_full_house
            || self.is_quads
            || self.is_straight_flush
    }
}

/// ranks hands, runs equity simulations and derives postflop
/// structure. the engine only ever talks to this trait; the bitwise
/// implementation below is the stock one.
pub trait HandEvaluationEngine {
    /// monotone in hand strength; equal values are equal poker hands
    fn rank(&self, cards: Hand) -> u32;
    fn simulate_equity(
        &self,
        hole: Hole,
        board: &Board,
        nb_opponents: usize,
        max_opponents_strength: Equity,
        randomizer: &mut dyn Randomizer,
    ) -> HandSimulationStats;
    fn analyze_postflop(&self, hole: Hole, board: &Board) -> PostFlopAnalysisFlags;
    fn name(&self) -> &'static str;
}

/// stock implementation on top of the bitwise evaluator
#[derive(Debug, Default)]
pub struct BitwiseEvaluationEngine;

impl HandEvaluationEngine for BitwiseEvaluationEngine {
    fn rank(&self, cards: Hand) -> u32 {
        u32::from(Strength::from(cards))
    }

    fn simulate_equity(
        &self,
        hole: Hole,
        board: &Board,
        nb_opponents: usize,
        max_opponents_strength: Equity,
        randomizer: &mut dyn Randomizer,
    ) -> HandSimulationStats {
        let seen = Hand::add(Hand::from(hole), Hand::from(board));
        let pool = seen.complement().cards();
        let need = 5 - board.cards().len();

        let mut stats = self.rollout(hole, board, &pool, need, 1, EQUITY_ITERATIONS, randomizer);
        if nb_opponents > 1 {
            let multi = self.rollout(
                hole,
                board,
                &pool,
                need,
                nb_opponents,
                MULTIWAY_ITERATIONS,
                randomizer,
            );
            // headline win stays the heads-up figure; multiway refines the rest
            stats.tie = multi.tie;
            stats.lose = multi.lose;
            stats.tie_sd = multi.tie_sd;
            stats.lose_sd = multi.lose_sd;
            stats.evaluations += multi.evaluations;
        }
        stats.win_ranged = if max_opponents_strength > 0.0 && max_opponents_strength < 1.0 {
            1.0 - max_opponents_strength
        } else {
            stats.win / 4.0
        };
        stats
    }

    fn analyze_postflop(&self, hole: Hole, board: &Board) -> PostFlopAnalysisFlags {
        Analysis::new(hole, board).flags()
    }

    fn name(&self) -> &'static str {
        "bitwise"
    }
}

impl BitwiseEvaluationEngine {
    fn rollout(
        &self,
        hole: Hole,
        board: &Board,
        pool: &[Card],
        need: usize,
        nb_opponents: usize,
        iterations: usize,
        randomizer: &mut dyn Randomizer,
    ) -> HandSimulationStats {
        let mut wins = 0u32;
        let mut ties = 0u32;
        let mut losses = 0u32;
        for _ in 0..iterations {
            let mut draw = pool.to_vec();
            let mut community = Hand::from(board);
            for _ in 0..need {
                community = community.with(take(&mut draw, randomizer));
            }
            let hero = Strength::from(Hand::add(Hand::from(hole), community));
            let mut best = None::<Strength>;
            for _ in 0..nb_opponents {
                let a = take(&mut draw, randomizer);
                let b = take(&mut draw, randomizer);
                let villain =
                    Strength::from(Hand::add(Hand::from(Hole::from((a, b))), community));
                best = Some(best.map_or(villain, |prev| prev.max(villain)));
            }
            let best = best.expect("at least one opponent");
            match hero.cmp(&best) {
                std::cmp::Ordering::Greater => wins += 1,
                std::cmp::Ordering::Equal => ties += 1,
                std::cmp::Ordering::Less => losses += 1,
            }
        }
        let n = iterations as Equity;
        let sd = |p: Equity| (p * (1.0 - p) / n).sqrt();
        let win = wins as Equity / n;
        let tie = ties as Equity / n;
        let lose = losses as Equity / n;
        HandSimulationStats {
            win,
            tie,
            lose,
            win_ranged: 0.0,
            win_sd: sd(win),
            tie_sd: sd(tie),
            lose_sd: sd(lose),
            evaluations: iterations as u32,
        }
    }
}

fn take(pool: &mut Vec<Card>, randomizer: &mut dyn Randomizer) -> Card {
    let index = randomizer.rand_int(0, pool.len() as i64 - 1) as usize;
    pool.swap_remove(index)
}

/// one-shot postflop structure computation
struct Analysis {
    hole: Hole,
    combined: Hand,
    board_ranks: Vec<Rank>,
    strength: Strength,
}

impl Analysis {
    fn new(hole: Hole, board: &Board) -> Self {
        let combined = Hand::add(Hand::from(hole), Hand::from(board));
        let mut board_ranks: Vec<Rank> = board.cards().iter().map(|c| c.rank()).collect();
        board_ranks.sort_unstable();
        board_ranks.dedup();
        Self {
            hole,
            combined,
            board_ranks,
            strength: Strength::from(combined),
        }
    }

    fn flags(&self) -> PostFlopAnalysisFlags {
        let ranking = self.strength.ranking();
        let pair_rank = self.pair_rank();
        let mut flags = PostFlopAnalysisFlags {
            uses_first: self.uses(self.hole.first()),
            uses_second: self.uses(self.hole.second()),
            is_no_pair: matches!(ranking, Ranking::HighCard(_)),
            is_one_pair: matches!(ranking, Ranking::OnePair(_)),
            is_pocket_pair: self.hole.is_pocket_pair(),
            is_two_pair: matches!(ranking, Ranking::TwoPair(..)),
            is_trips: matches!(ranking, Ranking::Trips(_)),
            is_straight: matches!(ranking, Ranking::Straight(_)),
            is_flush: matches!(ranking, Ranking::Flush(_)),
            is_full_house: matches!(ranking, Ranking::FullHouse(..)),
            is_quads: matches!(ranking, Ranking::Quads(_)),
            is_straight_flush: matches!(ranking, Ranking::StraightFlush(_)),
            ..Default::default()
        };
        if let Some(high) = self.board_ranks.last().copied() {
            flags.is_over_cards =
                self.hole.first().rank() > high && self.hole.second().rank() > high;
            flags.is_over_pair = self.hole.is_pocket_pair() && self.hole.first().rank() > high;
            if let Some(paired) = pair_rank {
                flags.is_top_pair = paired == high;
                flags.is_bottom_pair = paired == *self.board_ranks.first().unwrap();
                flags.is_middle_pair = !flags.is_top_pair
                    && !flags.is_bottom_pair
                    && self.board_ranks.contains(&paired);
            }
        }
        self.fill_draws(&mut flags);
        flags
    }

    /// rank a hole card pairs with on the board, if any
    fn pair_rank(&self) -> Option<Rank> {
        [self.hole.first().rank(), self.hole.second().rank()]
            .into_iter()
            .filter(|r| self.board_ranks.contains(r))
            .max()
    }

    /// a card is in use if removing it weakens the made hand
    fn uses(&self, card: Card) -> bool {
        Strength::from(self.combined.without(card)) < self.strength
    }

    fn fill_draws(&self, flags: &mut PostFlopAnalysisFlags) {
        let unseen = self.combined.complement().cards();
        // flush draws: four of one suit, outs are the unseen fifth
        let mut suit_counts = [0u8; 4];
        for card in self.combined.cards() {
            suit_counts[card.suit() as usize] += 1;
        }
        if let Some(suit) = suit_counts.iter().position(|&n| n == 4) {
            flags.is_flush_draw_possible = !flags.is_flush;
            flags.flush_outs = unseen
                .iter()
                .filter(|c| c.suit() as usize == suit)
                .count() as u8;
        }
        // straight draws: ranks that would complete a straight
        if !flags.is_straight && !flags.is_straight_flush {
            let mask = self
                .combined
                .cards()
                .iter()
                .map(|c| u16::from(c.rank()))
                .fold(0u16, |acc, r| acc | r);
            let completing: Vec<Rank> = Rank::all()
                .into_iter()
                .filter(|r| mask & u16::from(*r) == 0)
                .filter(|r| straight_high(mask | u16::from(*r)).is_some())
                .collect();
            flags.is_open_ended_straight_draw_possible = completing.len() >= 2;
            flags.is_gutshot_possible = completing.len() == 1;
            flags.straight_outs = unseen
                .iter()
                .filter(|c| completing.contains(&c.rank()))
                .count() as u8;
        }
        // cards that lift hero into a better class outright
        let class = self.strength.ranking().class();
        flags.better_outs = unseen
            .iter()
            .filter(|c| {
                Strength::from(self.combined.with(**c)).ranking().class() > class
            })
            .count() as u8;
    }
}

fn straight_high(mask: u16) -> Option<Rank> {
    const WHEEL: u16 = 0b_1000000001111;
    let mut bits = mask;
    bits &= bits << 1;
    bits &= bits << 1;
    bits &= bits << 1;
    bits &= bits << 1;
    if bits != 0 {
        Some(Rank::from(bits))
    } else if WHEEL & mask == WHEEL {
        Some(Rank::Five)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::randomizer::DefaultRandomizer;

    fn board(cards: &[&str]) -> Board {
        let mut board = Board::empty();
        let cards: Vec<Card> = cards.iter().map(|s| Card::try_from(*s).unwrap()).collect();
        board.reveal(&cards);
        board
    }

    #[test]
    fn aces_are_a_favorite_heads_up() {
        let engine = BitwiseEvaluationEngine;
        let mut randomizer = DefaultRandomizer::seeded(7);
        let hole = Hole::try_from("AsAh").unwrap();
        let stats = engine.simulate_equity(hole, &Board::empty(), 1, 0.0, &mut randomizer);
        assert!(stats.win > 0.75, "aces won only {}", stats.win);
        assert!((stats.win + stats.tie + stats.lose - 1.0).abs() < 1e-9);
    }

    #[test]
    fn win_ranged_reflects_opponent_strength() {
        let engine = BitwiseEvaluationEngine;
        let mut randomizer = DefaultRandomizer::seeded(7);
        let hole = Hole::try_from("AsAh").unwrap();
        let stats = engine.simulate_equity(hole, &Board::empty(), 1, 0.3, &mut randomizer);
        assert!((stats.win_ranged - 0.7).abs() < 1e-9);
    }

    #[test]
    fn top_pair_is_detected() {
        let engine = BitwiseEvaluationEngine;
        let flags = engine.analyze_postflop(
            Hole::try_from("AsKh").unwrap(),
            &board(&["Ad", "7c", "2s"]),
        );
        assert!(flags.is_top_pair);
        assert!(flags.is_one_pair);
        assert!(!flags.is_no_pair);
        assert!(flags.uses_first);
    }

    #[test]
    fn over_pair_and_over_cards() {
        let engine = BitwiseEvaluationEngine;
        let flags = engine.analyze_postflop(
            Hole::try_from("QsQh").unwrap(),
            &board(&["Jd", "7c", "2s"]),
        );
        assert!(flags.is_over_pair);
        let flags = engine.analyze_postflop(
            Hole::try_from("AsKh").unwrap(),
            &board(&["Jd", "7c", "2s"]),
        );
        assert!(flags.is_over_cards);
        assert!(flags.is_no_pair);
    }

    #[test]
    fn flush_draw_has_nine_outs() {
        let engine = BitwiseEvaluationEngine;
        let flags = engine.analyze_postflop(
            Hole::try_from("Ah9h").unwrap(),
            &board(&["Kh", "7h", "2s"]),
        );
        assert!(flags.is_flush_draw_possible);
        assert_eq!(flags.flush_outs, 9);
    }

    #[test]
    fn open_ended_draw_has_eight_outs() {
        let engine = BitwiseEvaluationEngine;
        let flags = engine.analyze_postflop(
            Hole::try_from("9s8h").unwrap(),
            &board(&["7d", "6c", "2s"]),
        );
        assert!(flags.is_open_ended_straight_draw_possible);
        assert_eq!(flags.straight_outs, 8);
    }

    #[test]
    fn gutshot_has_four_outs() {
        let engine = BitwiseEvaluationEngine;
        let flags = engine.analyze_postflop(
            Hole::try_from("9s8h").unwrap(),
            &board(&["6d", "5c", "Ks"]),
        );
        assert!(flags.is_gutshot_possible);
        assert_eq!(flags.straight_outs, 4);
    }
}
