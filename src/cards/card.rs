/// a single card, identified by its 0..52 index (rank-major)
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    rank: Rank,
    suit: Suit,
}

impl Card {
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
}

// u8 isomorphism
impl From<Card> for u8 {
    fn from(c: Card) -> u8 {
        (c.rank as u8) * 4 + (c.suit as u8)
    }
}
impl From<u8> for Card {
    fn from(n: u8) -> Self {
        assert!(n < 52, "card index out of range");
        Self {
            rank: Rank::from(n / 4),
            suit: Suit::from(n % 4),
        }
    }
}

// u64 isomorphism
impl From<Card> for u64 {
    fn from(c: Card) -> u64 {
        1 << u8::from(c)
    }
}

impl From<(Rank, Suit)> for Card {
    fn from((rank, suit): (Rank, Suit)) -> Self {
        Self { rank, suit }
    }
}

/// two-character text, "As" "Td" "7c"
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.chars();
        let r = chars.next().ok_or_else(|| format!("empty card: {:?}", s))?;
        let u = chars.next().ok_or_else(|| format!("truncated card: {:?}", s))?;
        if chars.next().is_some() {
            return Err(format!("trailing characters in card: {:?}", s));
        }
        let rank = Rank::try_from(r).map_err(|c| format!("invalid rank char: {:?}", c))?;
        let suit = Suit::try_from(u).map_err(|c| format!("invalid suit char: {:?}", c))?;
        Ok(Self { rank, suit })
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

use super::rank::Rank;
use super::suit::Suit;
use std::fmt::{Display, Formatter, Result as FmtResult};
