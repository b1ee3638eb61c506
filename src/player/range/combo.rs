use crate::cards::card::Card;
use crate::cards::hand::Hand;
use std::collections::BTreeSet;

/// a concrete two-card holding, stored high card first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Combo(Card, Card);

impl Combo {
    pub fn new(a: Card, b: Card) -> Self {
        assert!(a != b, "duplicate cards in combo");
        if a >= b { Self(a, b) } else { Self(b, a) }
    }
    pub fn hi(&self) -> Card {
        self.0
    }
    pub fn lo(&self) -> Card {
        self.1
    }
    pub fn is_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }
    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }
    pub fn conflicts(&self, cards: &Hand) -> bool {
        cards.contains(&self.0) || cards.contains(&self.1)
    }
}

impl From<Combo> for Hand {
    fn from(combo: Combo) -> Self {
        Hand::add(Hand::from(combo.0), Hand::from(combo.1))
    }
}

impl From<Combo> for crate::cards::hole::Hole {
    fn from(combo: Combo) -> Self {
        Self::from((combo.0, combo.1))
    }
}

impl TryFrom<&str> for Combo {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.len() != 4 {
            return Err(format!("expected four characters: {:?}", s));
        }
        let a = Card::try_from(&s[0..2])?;
        let b = Card::try_from(&s[2..4])?;
        if a == b {
            return Err(format!("duplicate cards: {:?}", s));
        }
        Ok(Self::new(a, b))
    }
}

impl std::fmt::Display for Combo {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

/// an estimated holding set. deterministic iteration order keeps
/// narrowing and serialization reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboSet(BTreeSet<Combo>);

impl ComboSet {
    pub fn len(&self) -> usize {
        self.0.len()
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn contains(&self, combo: &Combo) -> bool {
        self.0.contains(combo)
    }
    pub fn insert(&mut self, combo: Combo) {
        self.0.insert(combo);
    }
    pub fn iter(&self) -> impl Iterator<Item = &Combo> {
        self.0.iter()
    }
    pub fn union(&mut self, other: &Self) {
        self.0.extend(other.0.iter().copied());
    }
    pub fn retain(&mut self, keep: impl FnMut(&Combo) -> bool) {
        self.0.retain(keep);
    }
    pub fn subtract(&mut self, other: &Self) {
        self.0.retain(|c| !other.contains(c));
    }
    /// drop combos using any of the given cards
    pub fn discard_conflicts(&mut self, cards: &Hand) {
        self.0.retain(|c| !c.conflicts(cards));
    }
    pub fn intersection(&self, other: &Self) -> Self {
        Self(self.0.intersection(&other.0).copied().collect())
    }
}

impl FromIterator<Combo> for ComboSet {
    fn from_iter<T: IntoIterator<Item = Combo>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combos_normalize_card_order() {
        let a = Combo::try_from("KdAs").unwrap();
        let b = Combo::try_from("AsKd").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "AsKd");
    }

    #[test]
    fn conflict_detection() {
        let combo = Combo::try_from("AsKd").unwrap();
        let board = Hand::from(Card::try_from("As").unwrap());
        assert!(combo.conflicts(&board));
        let other = Hand::from(Card::try_from("2c").unwrap());
        assert!(!combo.conflicts(&other));
    }

    #[test]
    fn discard_conflicts_shrinks_set() {
        let mut set: ComboSet = ["AsKd", "AhKh", "QdQc"]
            .iter()
            .map(|s| Combo::try_from(*s).unwrap())
            .collect();
        let board = Hand::from(Card::try_from("Qd").unwrap());
        set.discard_conflicts(&board);
        assert_eq!(set.len(), 2);
    }
}
