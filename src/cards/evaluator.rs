use super::hand::Hand;
use super::kicks::Kickers;
use super::rank::Rank;
use super::ranking::Ranking;
use super::suit::Suit;

/// finds the best five-card value inside a 5..7 card set.
///
/// works on the compact Hand bitstring: each rank occupies a
/// 4-bit nibble, so of-a-kind searches are popcounts over nibbles
/// and straight searches are shift-ANDs over the 13-bit rank mask.
pub struct Evaluator(Hand);

impl From<Hand> for Evaluator {
    fn from(h: Hand) -> Self {
        assert!(h.size() >= 1, "empty hand");
        Self(h)
    }
}

const WHEEL: u16 = 0b_1000000001111;

impl Evaluator {
    pub fn ranking(&self) -> Ranking {
        None.or_else(|| self.straight_flush())
            .or_else(|| self.quads())
            .or_else(|| self.full_house())
            .or_else(|| self.flush())
            .or_else(|| self.straight())
            .or_else(|| self.trips())
            .or_else(|| self.two_pair())
            .or_else(|| self.one_pair())
            .or_else(|| self.high_card())
            .expect("at least one card in hand")
    }

    pub fn kickers(&self, ranking: Ranking) -> Kickers {
        let n = ranking.n_kickers();
        if n == 0 {
            return match ranking {
                // flushes compare all five flush cards
                Ranking::Flush(_) => Kickers::from(self.flush_ranks()),
                _ => Kickers::default(),
            };
        }
        let mut bits = self.rank_mask() & !ranking.used_mask();
        while bits.count_ones() as usize > n {
            bits &= bits - 1; // drop the lowest
        }
        Kickers::from(bits)
    }

    //

    fn high_card(&self) -> Option<Ranking> {
        self.best_n_oak(1).map(Ranking::HighCard)
    }
    fn one_pair(&self) -> Option<Ranking> {
        self.best_n_oak(2).map(Ranking::OnePair)
    }
    fn two_pair(&self) -> Option<Ranking> {
        let hi = self.best_n_oak(2)?;
        self.best_n_oak_below(2, hi).map(|lo| Ranking::TwoPair(hi, lo))
    }
    fn trips(&self) -> Option<Ranking> {
        self.best_n_oak(3).map(Ranking::Trips)
    }
    fn full_house(&self) -> Option<Ranking> {
        let trips = self.best_n_oak(3)?;
        self.best_pair_excluding(trips)
            .map(|pair| Ranking::FullHouse(trips, pair))
    }
    fn quads(&self) -> Option<Ranking> {
        self.best_n_oak(4).map(Ranking::Quads)
    }
    fn straight(&self) -> Option<Ranking> {
        Self::straight_high(self.rank_mask()).map(Ranking::Straight)
    }
    fn flush(&self) -> Option<Ranking> {
        self.flush_suit()
            .map(|suit| Ranking::Flush(Rank::from(self.suit_masks()[suit as usize])))
    }
    fn straight_flush(&self) -> Option<Ranking> {
        let suit = self.flush_suit()?;
        Self::straight_high(self.suit_masks()[suit as usize]).map(Ranking::StraightFlush)
    }

    //

    /// five consecutive ranks, the wheel counting ace-low
    fn straight_high(mask: u16) -> Option<Rank> {
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

    /// highest rank held at least n times
    fn best_n_oak(&self, n: u8) -> Option<Rank> {
        (0..13u8)
            .rev()
            .map(Rank::from)
            .find(|rank| self.count_of(*rank) >= n)
    }

    /// highest rank strictly below `bound` held at least n times
    fn best_n_oak_below(&self, n: u8, bound: Rank) -> Option<Rank> {
        (0..u8::from(bound))
            .rev()
            .map(Rank::from)
            .find(|rank| self.count_of(*rank) >= n)
    }

    /// highest rank other than `skip` held at least twice (trips qualify)
    fn best_pair_excluding(&self, skip: Rank) -> Option<Rank> {
        (0..13u8)
            .rev()
            .map(Rank::from)
            .filter(|rank| *rank != skip)
            .find(|rank| self.count_of(*rank) >= 2)
    }

    fn count_of(&self, rank: Rank) -> u8 {
        let nibble = u64::from(self.0) >> (4 * u8::from(rank) as u64);
        (nibble & 0b1111).count_ones() as u8
    }

    fn flush_suit(&self) -> Option<Suit> {
        self.suit_masks()
            .iter()
            .position(|mask| mask.count_ones() >= 5)
            .map(|i| Suit::from(i as u8))
    }

    /// top five ranks of the flush suit, as a mask
    fn flush_ranks(&self) -> u16 {
        let suit = self.flush_suit().expect("flush present");
        let mut bits = self.suit_masks()[suit as usize];
        while bits.count_ones() > 5 {
            bits &= bits - 1;
        }
        bits
    }

    /// which ranks are present, neglecting suit
    fn rank_mask(&self) -> u16 {
        self.0
            .cards()
            .iter()
            .map(|c| u16::from(c.rank()))
            .fold(0, |acc, r| acc | r)
    }
    /// which ranks are present, grouped by suit
    fn suit_masks(&self) -> [u16; 4] {
        self.0
            .cards()
            .iter()
            .map(|c| (u8::from(c.suit()), u16::from(c.rank())))
            .fold([0u16; 4], |mut suits, (s, r)| {
                suits[s as usize] |= r;
                suits
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::card::Card;

    fn ranking(cards: &[&str]) -> Ranking {
        let hand = Hand::from(
            cards
                .iter()
                .map(|s| Card::try_from(*s).unwrap())
                .collect::<Vec<Card>>(),
        );
        Evaluator::from(hand).ranking()
    }

    #[test]
    fn high_card() {
        assert_eq!(
            ranking(&["As", "Kh", "Qd", "Jc", "9s"]),
            Ranking::HighCard(Rank::Ace)
        );
    }

    #[test]
    fn one_pair() {
        assert_eq!(
            ranking(&["As", "Ah", "Kd", "Qc", "Js"]),
            Ranking::OnePair(Rank::Ace)
        );
    }

    #[test]
    fn two_pair() {
        assert_eq!(
            ranking(&["As", "Ah", "Kd", "Kc", "Qs"]),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn three_pair_keeps_best_two() {
        assert_eq!(
            ranking(&["As", "Ah", "Kd", "Kc", "Qs", "Qh", "Jd"]),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn trips() {
        assert_eq!(
            ranking(&["As", "Ah", "Ad", "Kc", "Qs"]),
            Ranking::Trips(Rank::Ace)
        );
    }

    #[test]
    fn straight() {
        assert_eq!(
            ranking(&["Ts", "Jh", "Qd", "Kc", "As"]),
            Ranking::Straight(Rank::Ace)
        );
    }

    #[test]
    fn wheel_straight() {
        assert_eq!(
            ranking(&["As", "2h", "3d", "4c", "5s"]),
            Ranking::Straight(Rank::Five)
        );
    }

    #[test]
    fn six_high_straight_beats_wheel_reading() {
        assert_eq!(
            ranking(&["As", "2s", "3h", "4d", "5c", "6s"]),
            Ranking::Straight(Rank::Six)
        );
    }

    #[test]
    fn flush() {
        assert_eq!(
            ranking(&["As", "Ks", "Qs", "Js", "9s"]),
            Ranking::Flush(Rank::Ace)
        );
    }

    #[test]
    fn flush_beats_straight() {
        assert_eq!(
            ranking(&["4h", "6h", "7h", "8h", "9h", "Ts"]),
            Ranking::Flush(Rank::Nine)
        );
    }

    #[test]
    fn full_house() {
        assert_eq!(
            ranking(&["As", "Ah", "Ad", "Kc", "Ks"]),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn full_house_beats_flush() {
        assert_eq!(
            ranking(&["As", "Ah", "Ad", "Ks", "Kh", "Qs", "Js"]),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn double_trips_reads_full_house() {
        assert_eq!(
            ranking(&["As", "Ah", "Ad", "Kc", "Ks", "Kh", "Qd"]),
            Ranking::FullHouse(Rank::Ace, Rank::King)
        );
    }

    #[test]
    fn quads() {
        assert_eq!(
            ranking(&["As", "Ah", "Ad", "Ac", "Ks"]),
            Ranking::Quads(Rank::Ace)
        );
    }

    #[test]
    fn straight_flush() {
        assert_eq!(
            ranking(&["Ts", "Js", "Qs", "Ks", "As"]),
            Ranking::StraightFlush(Rank::Ace)
        );
    }

    #[test]
    fn wheel_straight_flush() {
        assert_eq!(
            ranking(&["As", "2s", "3s", "4s", "5s"]),
            Ranking::StraightFlush(Rank::Five)
        );
    }

    #[test]
    fn straight_flush_beats_quads() {
        assert_eq!(
            ranking(&["Ts", "Js", "Qs", "Ks", "As", "Ah", "Ad"]),
            Ranking::StraightFlush(Rank::Ace)
        );
    }

    #[test]
    fn seven_card_two_pair() {
        assert_eq!(
            ranking(&["As", "Ah", "Kd", "Kc", "Qs", "Jh", "9d"]),
            Ranking::TwoPair(Rank::Ace, Rank::King)
        );
    }
}
