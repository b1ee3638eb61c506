use super::rank::Rank;

/// a poker hand's class, ordered by strength.
/// kicker cards break ties within a class.
#[derive(Debug, Clone, Copy, Eq, PartialEq, PartialOrd, Ord)]
pub enum Ranking {
    HighCard(Rank),        // 4 kickers
    OnePair(Rank),         // 3 kickers
    TwoPair(Rank, Rank),   // 1 kicker
    Trips(Rank),           // 2 kickers
    Straight(Rank),        // 0 kickers
    Flush(Rank),           // 5 kickers (the flush ranks)
    FullHouse(Rank, Rank), // 0 kickers
    Quads(Rank),           // 1 kicker
    StraightFlush(Rank),   // 0 kickers
}

impl Ranking {
    pub fn n_kickers(&self) -> usize {
        match self {
            Ranking::HighCard(_) => 4,
            Ranking::OnePair(_) => 3,
            Ranking::Trips(_) => 2,
            Ranking::Quads(_) | Ranking::TwoPair(_, _) => 1,
            _ => 0,
        }
    }
    /// ranks consumed by the class itself, excluded from kicker search
    pub fn used_mask(&self) -> u16 {
        match *self {
            Ranking::TwoPair(hi, lo) => u16::from(hi) | u16::from(lo),
            Ranking::HighCard(hi)
            | Ranking::OnePair(hi)
            | Ranking::Trips(hi)
            | Ranking::Quads(hi) => u16::from(hi),
            _ => 0,
        }
    }
    pub fn class(&self) -> u8 {
        match self {
            Ranking::HighCard(_) => 0,
            Ranking::OnePair(_) => 1,
            Ranking::TwoPair(_, _) => 2,
            Ranking::Trips(_) => 3,
            Ranking::Straight(_) => 4,
            Ranking::Flush(_) => 5,
            Ranking::FullHouse(_, _) => 6,
            Ranking::Quads(_) => 7,
            Ranking::StraightFlush(_) => 8,
        }
    }
    pub fn primary(&self) -> Rank {
        match *self {
            Ranking::HighCard(r)
            | Ranking::OnePair(r)
            | Ranking::Trips(r)
            | Ranking::Straight(r)
            | Ranking::Flush(r)
            | Ranking::Quads(r)
            | Ranking::StraightFlush(r) => r,
            Ranking::TwoPair(hi, _) | Ranking::FullHouse(hi, _) => hi,
        }
    }
    pub fn secondary(&self) -> Option<Rank> {
        match *self {
            Ranking::TwoPair(_, lo) | Ranking::FullHouse(_, lo) => Some(lo),
            _ => None,
        }
    }
}

impl std::fmt::Display for Ranking {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Ranking::HighCard(r) => write!(f, "HighCard      {} ", r),
            Ranking::OnePair(r) => write!(f, "OnePair       {} ", r),
            Ranking::TwoPair(r1, r2) => write!(f, "TwoPair       {}{}", r1, r2),
            Ranking::Trips(r) => write!(f, "ThreeOfAKind  {} ", r),
            Ranking::Straight(r) => write!(f, "Straight      {} ", r),
            Ranking::Flush(r) => write!(f, "Flush         {} ", r),
            Ranking::FullHouse(r1, r2) => write!(f, "FullHouse     {}{}", r1, r2),
            Ranking::Quads(r) => write!(f, "FourOfAKind   {} ", r),
            Ranking::StraightFlush(r) => write!(f, "StraightFlush {} ", r),
        }
    }
}
