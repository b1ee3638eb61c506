use super::combo::ComboSet;
use super::grammar;
use super::grammar::RangeParseError;
use crate::cards::hand::Hand;

/// text-level range algebra. ranges stay textual at the edges for
/// logs and test vectors; the set math happens on expanded combos.

/// remove every holding of `subtract` (and every holding colliding
/// with the given board cards) from `origin`
pub fn subtract_range(
    origin: &str,
    subtract: &str,
    board: &Hand,
) -> Result<String, RangeParseError> {
    let mut combos = grammar::parse_combos(origin)?;
    let minus = grammar::parse_combos(subtract)?;
    combos.subtract(&minus);
    combos.discard_conflicts(board);
    Ok(grammar::serialize(&combos))
}

/// keep only the holdings both ranges agree on
pub fn intersect_range(a: &str, b: &str, board: &Hand) -> Result<String, RangeParseError> {
    let left = grammar::parse_combos(a)?;
    let right = grammar::parse_combos(b)?;
    let mut out: ComboSet = left.intersection(&right);
    out.discard_conflicts(board);
    Ok(grammar::serialize(&out))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;

    #[test]
    fn subtraction_removes_the_top() {
        let text = subtract_range("99+", "QQ+", &Hand::empty()).unwrap();
        let combos = grammar::parse_combos(&text).unwrap();
        assert_eq!(combos.len(), 18); // 99 TT JJ
        assert!(!text.contains("AA"));
    }

    #[test]
    fn board_cards_are_dropped() {
        let board = Hand::from(Card::try_from("Ah").unwrap());
        let text = subtract_range("AA", "", &board).unwrap();
        let combos = grammar::parse_combos(&text).unwrap();
        assert_eq!(combos.len(), 3); // AsAd AsAc AdAc
    }

    #[test]
    fn intersection_keeps_common_holdings() {
        let text = intersect_range("TT+,AQs+", "JJ+,AKs,KQs", &Hand::empty()).unwrap();
        let combos = grammar::parse_combos(&text).unwrap();
        assert_eq!(combos.len(), 6 * 4 + 4); // JJ QQ KK AA + AKs
    }
}
