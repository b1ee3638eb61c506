use super::combo::Combo;
use super::combo::ComboSet;
use crate::cards::card::Card;
use crate::cards::rank::Rank;
use crate::cards::suit::Suit;
use thiserror::Error;

/// the textual range grammar: comma-separated atoms, each one of
/// "99", "99+", "AKs", "AKo", "AJo+", "AQs+", or a concrete holding
/// like "AhKh". parsing is total: every atom is recognized or
/// rejected with a specific error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Atom {
    Pair(Rank),
    PairPlus(Rank),
    Suited(Rank, Rank),
    SuitedPlus(Rank, Rank),
    Offsuit(Rank, Rank),
    OffsuitPlus(Rank, Rank),
    Exact(Combo),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RangeParseError {
    #[error("unrecognized rank {0:?} in atom {1:?}")]
    UnknownRank(char, String),
    #[error("unrecognized suit {0:?} in atom {1:?}")]
    UnknownSuit(char, String),
    #[error("atom {0:?} has no valid shape")]
    BadShape(String),
    #[error("two-character atom {0:?} must be a pair; use the s/o suffix")]
    AmbiguousCombo(String),
    #[error("atom {0:?} repeats a card")]
    DuplicateCards(String),
    #[error("pair atom {0:?} needs two equal ranks")]
    NotAPair(String),
}

pub fn parse(text: &str) -> Result<Vec<Atom>, RangeParseError> {
    text.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_atom)
        .collect()
}

/// parse then expand to the union of concrete combos
pub fn parse_combos(text: &str) -> Result<ComboSet, RangeParseError> {
    Ok(parse(text)?
        .into_iter()
        .flat_map(|atom| expand(&atom))
        .collect())
}

fn parse_atom(token: &str) -> Result<Atom, RangeParseError> {
    let chars: Vec<char> = token.chars().collect();
    let rank = |c: char| {
        Rank::try_from(c).map_err(|c| RangeParseError::UnknownRank(c, token.to_string()))
    };
    match chars.as_slice() {
        [a, b] => {
            let (hi, lo) = (rank(*a)?, rank(*b)?);
            if hi != lo {
                return Err(RangeParseError::AmbiguousCombo(token.to_string()));
            }
            Ok(Atom::Pair(hi))
        }
        [a, b, '+'] => {
            let (hi, lo) = (rank(*a)?, rank(*b)?);
            if hi != lo {
                return Err(RangeParseError::NotAPair(token.to_string()));
            }
            Ok(Atom::PairPlus(hi))
        }
        [a, b, 's'] => ordered(rank(*a)?, rank(*b)?, token).map(|(h, l)| Atom::Suited(h, l)),
        [a, b, 'o'] => ordered(rank(*a)?, rank(*b)?, token).map(|(h, l)| Atom::Offsuit(h, l)),
        [a, b, 's', '+'] => {
            ordered(rank(*a)?, rank(*b)?, token).map(|(h, l)| Atom::SuitedPlus(h, l))
        }
        [a, b, 'o', '+'] => {
            ordered(rank(*a)?, rank(*b)?, token).map(|(h, l)| Atom::OffsuitPlus(h, l))
        }
        [_, _, _, _] => {
            let combo = Combo::try_from(token).map_err(|_| exact_error(token))?;
            Ok(Atom::Exact(combo))
        }
        _ => Err(RangeParseError::BadShape(token.to_string())),
    }
}

/// pinpoint what went wrong with a four-character concrete holding
fn exact_error(token: &str) -> RangeParseError {
    let chars: Vec<char> = token.chars().collect();
    for pair in [[chars[0], chars[1]], [chars[2], chars[3]]] {
        if Rank::try_from(pair[0]).is_err() {
            return RangeParseError::UnknownRank(pair[0], token.to_string());
        }
        if Suit::try_from(pair[1]).is_err() {
            return RangeParseError::UnknownSuit(pair[1], token.to_string());
        }
    }
    RangeParseError::DuplicateCards(token.to_string())
}

fn ordered(a: Rank, b: Rank, token: &str) -> Result<(Rank, Rank), RangeParseError> {
    if a == b {
        return Err(RangeParseError::BadShape(token.to_string()));
    }
    Ok((a.max(b), a.min(b)))
}

pub fn expand(atom: &Atom) -> Vec<Combo> {
    match *atom {
        Atom::Pair(rank) => pair_combos(rank),
        Atom::PairPlus(rank) => (u8::from(rank)..13)
            .map(Rank::from)
            .flat_map(pair_combos)
            .collect(),
        Atom::Suited(hi, lo) => suited_combos(hi, lo),
        Atom::Offsuit(hi, lo) => offsuit_combos(hi, lo),
        Atom::SuitedPlus(hi, lo) => (u8::from(lo)..u8::from(hi))
            .map(Rank::from)
            .flat_map(|l| suited_combos(hi, l))
            .collect(),
        Atom::OffsuitPlus(hi, lo) => (u8::from(lo)..u8::from(hi))
            .map(Rank::from)
            .flat_map(|l| offsuit_combos(hi, l))
            .collect(),
        Atom::Exact(combo) => vec![combo],
    }
}

fn pair_combos(rank: Rank) -> Vec<Combo> {
    let suits = Suit::all();
    let mut out = Vec::with_capacity(6);
    for i in 0..4 {
        for j in (i + 1)..4 {
            out.push(Combo::new(
                Card::from((rank, suits[i])),
                Card::from((rank, suits[j])),
            ));
        }
    }
    out
}

fn suited_combos(hi: Rank, lo: Rank) -> Vec<Combo> {
    Suit::all()
        .into_iter()
        .map(|s| Combo::new(Card::from((hi, s)), Card::from((lo, s))))
        .collect()
}

fn offsuit_combos(hi: Rank, lo: Rank) -> Vec<Combo> {
    let mut out = Vec::with_capacity(12);
    for a in Suit::all() {
        for b in Suit::all() {
            if a != b {
                out.push(Combo::new(Card::from((hi, a)), Card::from((lo, b))));
            }
        }
    }
    out
}

/// reserialize a combo set, re-grouping complete classes and folding
/// runs back into "+" atoms where they reach the top of the ladder
pub fn serialize(set: &ComboSet) -> String {
    let mut pairs: Vec<Rank> = Vec::new();
    let mut suited: Vec<(Rank, Rank)> = Vec::new();
    let mut offsuit: Vec<(Rank, Rank)> = Vec::new();
    let mut exact: Vec<Combo> = Vec::new();

    for rank in Rank::all() {
        if pair_combos(rank).iter().all(|c| set.contains(c)) {
            pairs.push(rank);
        }
    }
    for hi in Rank::all() {
        for lo in Rank::all().into_iter().filter(|l| l < &hi) {
            if suited_combos(hi, lo).iter().all(|c| set.contains(c)) {
                suited.push((hi, lo));
            }
            if offsuit_combos(hi, lo).iter().all(|c| set.contains(c)) {
                offsuit.push((hi, lo));
            }
        }
    }
    let grouped: ComboSet = pairs
        .iter()
        .flat_map(|r| pair_combos(*r))
        .chain(suited.iter().flat_map(|(h, l)| suited_combos(*h, *l)))
        .chain(offsuit.iter().flat_map(|(h, l)| offsuit_combos(*h, *l)))
        .collect();
    exact.extend(set.iter().filter(|c| !grouped.contains(c)).copied());

    let mut atoms: Vec<String> = Vec::new();
    atoms.extend(fold_pairs(&pairs));
    atoms.extend(fold_connected(&suited, 's'));
    atoms.extend(fold_connected(&offsuit, 'o'));
    atoms.extend(exact.iter().map(|c| c.to_string()));
    atoms.join(",")
}

/// a contiguous pair run ending at aces folds into "XX+"
fn fold_pairs(pairs: &[Rank]) -> Vec<String> {
    let mut out = Vec::new();
    let mut index = 0;
    while index < pairs.len() {
        let start = pairs[index];
        let mut end = start;
        while index + 1 < pairs.len() && pairs[index + 1] as u8 == end as u8 + 1 {
            index += 1;
            end = pairs[index];
        }
        if end == Rank::Ace && start != Rank::Ace {
            out.push(format!("{}{}+", start, start));
        } else {
            for rank in (u8::from(start)..=u8::from(end)).map(Rank::from) {
                out.push(format!("{}{}", rank, rank));
            }
        }
        index += 1;
    }
    out
}

/// for a fixed high card, a run of low cards reaching one below it
/// folds into e.g. "AJs+"
fn fold_connected(entries: &[(Rank, Rank)], tag: char) -> Vec<String> {
    let mut out = Vec::new();
    for hi in Rank::all() {
        let mut lows: Vec<Rank> = entries
            .iter()
            .filter(|(h, _)| *h == hi)
            .map(|(_, l)| *l)
            .collect();
        lows.sort_unstable();
        let mut index = 0;
        while index < lows.len() {
            let start = lows[index];
            let mut end = start;
            while index + 1 < lows.len() && lows[index + 1] as u8 == end as u8 + 1 {
                index += 1;
                end = lows[index];
            }
            if end as u8 + 1 == hi as u8 && start != end {
                out.push(format!("{}{}{}+", hi, start, tag));
            } else {
                for low in (u8::from(start)..=u8::from(end)).map(Rank::from) {
                    out.push(format!("{}{}{}", hi, low, tag));
                }
            }
            index += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_expands_to_six() {
        assert_eq!(expand(&parse("99").unwrap()[0]).len(), 6);
    }

    #[test]
    fn suited_expands_to_four() {
        assert_eq!(expand(&parse("AKs").unwrap()[0]).len(), 4);
    }

    #[test]
    fn offsuit_expands_to_twelve() {
        assert_eq!(expand(&parse("AKo").unwrap()[0]).len(), 12);
    }

    #[test]
    fn pair_plus_walks_to_aces() {
        let combos = parse_combos("99+").unwrap();
        assert_eq!(combos.len(), 6 * 6); // 99 TT JJ QQ KK AA
    }

    #[test]
    fn offsuit_plus_stops_below_the_high_card() {
        let combos = parse_combos("AJo+").unwrap();
        assert_eq!(combos.len(), 12 * 3); // AJo AQo AKo
    }

    #[test]
    fn union_deduplicates() {
        let combos = parse_combos("99+,QQ+,AhKh,AKs").unwrap();
        assert_eq!(combos.len(), 36 + 4);
    }

    #[test]
    fn rejects_garbage_with_specific_errors() {
        assert!(matches!(
            parse("ZZ"),
            Err(RangeParseError::UnknownRank('Z', _))
        ));
        assert!(matches!(
            parse("AK"),
            Err(RangeParseError::AmbiguousCombo(_))
        ));
        assert!(matches!(
            parse("AhAh"),
            Err(RangeParseError::DuplicateCards(_))
        ));
        assert!(matches!(parse("AKx"), Err(RangeParseError::BadShape(_))));
        assert!(matches!(
            parse("AhKx"),
            Err(RangeParseError::UnknownSuit('x', _))
        ));
    }

    #[test]
    fn serialization_round_trips() {
        for text in ["QQ+", "AQs+", "AJo+,KQo", "77,AhKh"] {
            let combos = parse_combos(text).unwrap();
            let reparsed = parse_combos(&serialize(&combos)).unwrap();
            assert_eq!(combos, reparsed, "round trip failed for {}", text);
        }
    }

    #[test]
    fn serialization_folds_top_runs() {
        let combos = parse_combos("JJ,QQ,KK,AA").unwrap();
        assert_eq!(serialize(&combos), "JJ+");
    }
}
