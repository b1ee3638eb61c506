use crate::PlayerId;
use crate::cards::board::Board;
use crate::cards::hand::Hand;
use crate::cards::hole::Hole;
use crate::player::range::combo::ComboSet;
use crate::ports::evaluator::HandEvaluationEngine;
use std::collections::BTreeMap;

/// how dangerous each live opponent's estimated range is to hero:
/// the fraction of their surviving combos that beat hero outright.
#[derive(Debug, Clone, Default)]
pub struct EvaluationResult {
    pub strengths: BTreeMap<PlayerId, f64>,
    pub max_strength: f64,
    pub strongest: Option<PlayerId>,
}

/// purely functional: no player state is touched. combos colliding
/// with hero's cards or the board are filtered before counting.
pub fn evaluate_opponents(
    hero_hole: Hole,
    hero_ranking: u32,
    board: &Board,
    opponents: &[(PlayerId, &ComboSet)],
    engine: &dyn HandEvaluationEngine,
) -> EvaluationResult {
    let dead = Hand::add(Hand::from(hero_hole), Hand::from(board));
    let community = Hand::from(board);
    let mut result = EvaluationResult::default();
    for (id, range) in opponents {
        let mut total = 0usize;
        let mut beats = 0usize;
        for combo in range.iter().filter(|c| !c.conflicts(&dead)) {
            total += 1;
            let ranking = engine.rank(Hand::add(Hand::from(*combo), community));
            if ranking > hero_ranking {
                beats += 1;
            }
        }
        let strength = if total == 0 {
            0.0
        } else {
            beats as f64 / total as f64
        };
        result.strengths.insert(*id, strength);
        if strength > result.max_strength || result.strongest.is_none() {
            result.max_strength = strength;
            result.strongest = Some(*id);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;
    use crate::player::range::grammar::parse_combos;
    use crate::ports::evaluator::BitwiseEvaluationEngine;

    fn board(cards: &[&str]) -> Board {
        let mut board = Board::empty();
        let cards: Vec<Card> = cards.iter().map(|s| Card::try_from(*s).unwrap()).collect();
        board.reveal(&cards);
        board
    }

    #[test]
    fn nut_hands_fear_nobody() {
        let engine = BitwiseEvaluationEngine;
        let board = board(&["Ad", "Ac", "7s", "7h", "2d"]);
        let hero = Hole::try_from("AsAh").unwrap(); // quad aces
        let ranking = engine.rank(Hand::add(Hand::from(hero), Hand::from(&board)));
        let range = parse_combos("KK,QQ,JJ").unwrap();
        let result = evaluate_opponents(hero, ranking, &board, &[(1, &range)], &engine);
        assert_eq!(result.strengths[&1], 0.0);
        assert_eq!(result.max_strength, 0.0);
    }

    #[test]
    fn dominated_hands_fear_everything() {
        let engine = BitwiseEvaluationEngine;
        let board = board(&["Kd", "Qc", "7s"]);
        let hero = Hole::try_from("2h3d").unwrap();
        let ranking = engine.rank(Hand::add(Hand::from(hero), Hand::from(&board)));
        let range = parse_combos("KK,QQ,AKs").unwrap();
        let result = evaluate_opponents(hero, ranking, &board, &[(1, &range)], &engine);
        assert_eq!(result.strengths[&1], 1.0);
        assert_eq!(result.strongest, Some(1));
    }

    #[test]
    fn conflicting_combos_are_excluded() {
        let engine = BitwiseEvaluationEngine;
        let board = board(&["Kd", "Qc", "7s"]);
        let hero = Hole::try_from("AsAh").unwrap();
        let ranking = engine.rank(Hand::add(Hand::from(hero), Hand::from(&board)));
        // AA has one combo left (AdAc) once hero holds two aces
        let range = parse_combos("AA").unwrap();
        let result = evaluate_opponents(hero, ranking, &board, &[(1, &range)], &engine);
        assert_eq!(result.strengths[&1], 0.0); // same rank does not beat hero
    }

    #[test]
    fn strongest_opponent_is_identified() {
        let engine = BitwiseEvaluationEngine;
        let board = board(&["Kd", "Qc", "7s"]);
        let hero = Hole::try_from("QdJc").unwrap();
        let ranking = engine.rank(Hand::add(Hand::from(hero), Hand::from(&board)));
        let strong = parse_combos("KK,AKs").unwrap();
        let weak = parse_combos("22,33").unwrap();
        let result =
            evaluate_opponents(hero, ranking, &board, &[(1, &weak), (2, &strong)], &engine);
        assert_eq!(result.strongest, Some(2));
        assert!(result.strengths[&2] > result.strengths[&1]);
    }
}
