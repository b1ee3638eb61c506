use super::card::Card;

/// Hand is a bitstring of 52 bits stored as a u64.
/// each bit represents a card in the (unordered) set.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Hand(u64);

impl Hand {
    pub const MASK: u64 = (1 << 52) - 1;

    pub fn empty() -> Self {
        Self(0)
    }
    pub fn size(&self) -> usize {
        self.0.count_ones() as usize
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 & u64::from(*card) != 0
    }
    pub fn add(lhs: Self, rhs: Self) -> Self {
        assert!(lhs.0 & rhs.0 == 0, "overlapping card sets");
        Self(lhs.0 | rhs.0)
    }
    pub fn with(&self, card: Card) -> Self {
        Self(self.0 | u64::from(card))
    }
    pub fn without(&self, card: Card) -> Self {
        Self(self.0 & !u64::from(card))
    }
    pub fn intersects(&self, other: &Self) -> bool {
        self.0 & other.0 != 0
    }
    pub fn complement(&self) -> Self {
        Self(!self.0 & Self::MASK)
    }
    pub fn cards(&self) -> Vec<Card> {
        Vec::<Card>::from(*self)
    }
}

/// u64 isomorphism
impl From<u64> for Hand {
    fn from(n: u64) -> Self {
        Self(n & Self::MASK)
    }
}
impl From<Hand> for u64 {
    fn from(hand: Hand) -> Self {
        hand.0
    }
}

/// we SUM/OR the cards to get the bitstring
impl From<Vec<Card>> for Hand {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().map(u64::from).fold(0, |a, b| a | b))
    }
}
impl From<Card> for Hand {
    fn from(card: Card) -> Self {
        Self(u64::from(card))
    }
}
/// we pluck the 1s out of the bitstring, low to high
impl From<Hand> for Vec<Card> {
    fn from(hand: Hand) -> Self {
        let mut bits = hand.0;
        let mut cards = Vec::with_capacity(hand.size());
        while bits != 0 {
            let index = bits.trailing_zeros() as u8;
            cards.push(Card::from(index));
            bits &= bits - 1;
        }
        cards
    }
}

impl std::fmt::Display for Hand {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in self.cards() {
            write!(f, "{} ", card)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_and_membership() {
        let a = Hand::from(Card::try_from("As").unwrap());
        let b = Hand::from(Card::try_from("Kd").unwrap());
        let both = Hand::add(a, b);
        assert_eq!(both.size(), 2);
        assert!(both.contains(&Card::try_from("As").unwrap()));
        assert!(!both.contains(&Card::try_from("2c").unwrap()));
    }

    #[test]
    fn complement_partitions_deck() {
        let hand = Hand::from(vec![
            Card::try_from("As").unwrap(),
            Card::try_from("Kd").unwrap(),
        ]);
        assert_eq!(hand.complement().size(), 50);
        assert!(!hand.complement().intersects(&hand));
    }

    #[test]
    #[should_panic]
    fn add_rejects_overlap() {
        let a = Hand::from(Card::try_from("As").unwrap());
        Hand::add(a, a);
    }
}
