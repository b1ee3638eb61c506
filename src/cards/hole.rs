/// an ordered pair of distinct cards
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hole(Card, Card);

impl Hole {
    pub fn first(&self) -> Card {
        self.0
    }
    pub fn second(&self) -> Card {
        self.1
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.0 == *card || self.1 == *card
    }
    pub fn is_pocket_pair(&self) -> bool {
        self.0.rank() == self.1.rank()
    }
    pub fn is_suited(&self) -> bool {
        self.0.suit() == self.1.suit()
    }
}

impl From<(Card, Card)> for Hole {
    fn from((a, b): (Card, Card)) -> Self {
        assert!(a != b, "duplicate hole cards");
        Self(a, b)
    }
}

impl From<Hole> for Hand {
    fn from(hole: Hole) -> Self {
        Hand::add(Hand::from(hole.0), Hand::from(hole.1))
    }
}

/// "AsKd" style text
impl TryFrom<&str> for Hole {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        if s.len() != 4 {
            return Err(format!("expected two cards: {:?}", s));
        }
        let a = Card::try_from(&s[0..2])?;
        let b = Card::try_from(&s[2..4])?;
        if a == b {
            return Err(format!("duplicate hole cards: {:?}", s));
        }
        Ok(Self(a, b))
    }
}

impl Display for Hole {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}{}", self.0, self.1)
    }
}

use super::card::Card;
use super::hand::Hand;
use std::fmt::{Display, Formatter, Result as FmtResult};
