use crate::cards::card::Card;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use std::collections::VecDeque;

/// the engine's single source of randomness. one instance serves a
/// whole session; it is only ever consumed from the engine loop, so
/// it need not be thread safe. tests substitute a scripted instance
/// for reproducible hands and decisions.
pub trait Randomizer {
    fn shuffle(&mut self, cards: &mut [Card]);
    /// uniform in lo..=hi
    fn rand_int(&mut self, lo: i64, hi: i64) -> i64;
    fn rand_ints(&mut self, lo: i64, hi: i64, out: &mut [i64]) {
        for slot in out.iter_mut() {
            *slot = self.rand_int(lo, hi);
        }
    }
}

pub struct DefaultRandomizer {
    rng: SmallRng,
}

impl DefaultRandomizer {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_os_rng(),
        }
    }
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for DefaultRandomizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Randomizer for DefaultRandomizer {
    fn shuffle(&mut self, cards: &mut [Card]) {
        cards.shuffle(&mut self.rng);
    }
    fn rand_int(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi);
        self.rng.random_range(lo..=hi)
    }
}

/// replays a fixed script of integers; shuffling is the identity
/// permutation so a test can lay out the deck by hand. an exhausted
/// script keeps returning the low bound.
#[derive(Debug, Default)]
pub struct ScriptedRandomizer {
    script: VecDeque<i64>,
}

impl ScriptedRandomizer {
    pub fn with_script(script: impl IntoIterator<Item = i64>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }
}

impl Randomizer for ScriptedRandomizer {
    fn shuffle(&mut self, _cards: &mut [Card]) {}
    fn rand_int(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi);
        match self.script.pop_front() {
            Some(n) => n.clamp(lo, hi),
            None => lo,
        }
    }
}

/// deals a prescribed card sequence: shuffling rewrites the deck so
/// draws come off in exactly the given order, and integers replay a
/// script like the scripted randomizer. lets a test pin every hole
/// card and board card of a hand.
#[derive(Debug, Default)]
pub struct RiggedRandomizer {
    order: Vec<Card>,
    script: VecDeque<i64>,
}

impl RiggedRandomizer {
    pub fn dealing(order: impl IntoIterator<Item = Card>) -> Self {
        Self {
            order: order.into_iter().collect(),
            script: VecDeque::new(),
        }
    }
    pub fn with_script(mut self, script: impl IntoIterator<Item = i64>) -> Self {
        self.script = script.into_iter().collect();
        self
    }
}

impl Randomizer for RiggedRandomizer {
    fn shuffle(&mut self, cards: &mut [Card]) {
        let mut arranged: Vec<Card> = cards
            .iter()
            .copied()
            .filter(|c| !self.order.contains(c))
            .collect();
        // draws pop off the back, so the first prescribed card goes last
        arranged.extend(self.order.iter().rev().copied());
        assert_eq!(arranged.len(), cards.len(), "rigged cards not in deck");
        cards.copy_from_slice(&arranged);
    }
    fn rand_int(&mut self, lo: i64, hi: i64) -> i64 {
        assert!(lo <= hi);
        match self.script.pop_front() {
            Some(n) => n.clamp(lo, hi),
            None => lo,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_randomizers_agree() {
        let mut a = DefaultRandomizer::seeded(42);
        let mut b = DefaultRandomizer::seeded(42);
        for _ in 0..100 {
            assert_eq!(a.rand_int(0, 1000), b.rand_int(0, 1000));
        }
    }

    #[test]
    fn scripted_replays_then_floors() {
        let mut r = ScriptedRandomizer::with_script([3, 99]);
        assert_eq!(r.rand_int(1, 4), 3);
        assert_eq!(r.rand_int(1, 4), 4); // clamped
        assert_eq!(r.rand_int(1, 4), 1); // exhausted
    }

    #[test]
    fn rigged_deck_deals_in_order() {
        let aces = ["As", "Ah", "Ad"]
            .map(|s| Card::try_from(s).unwrap());
        let mut rigged = RiggedRandomizer::dealing(aces);
        let mut cards: Vec<Card> = (0..52).map(Card::from).collect();
        rigged.shuffle(&mut cards);
        assert_eq!(cards[51], aces[0]);
        assert_eq!(cards[50], aces[1]);
        assert_eq!(cards[49], aces[2]);
    }
}
