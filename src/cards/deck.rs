/// the transient 52-card deck a hand deals from.
/// always a permutation of 0..52; all shuffling goes
/// through the Randomizer port so tests can script it.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self {
            cards: (0..52).map(Card::from).collect(),
        }
    }
    pub fn shuffled(randomizer: &mut dyn Randomizer) -> Self {
        let mut deck = Self::new();
        randomizer.shuffle(&mut deck.cards);
        deck
    }
    pub fn draw(&mut self) -> Card {
        self.cards.pop().expect("cards remain in deck")
    }
    pub fn draw_n(&mut self, n: usize) -> Vec<Card> {
        (0..n).map(|_| self.draw()).collect()
    }
    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
}

/// deck over an arbitrary remaining card set, for monte carlo rollouts
impl From<Hand> for Deck {
    fn from(hand: Hand) -> Self {
        Self {
            cards: hand.cards(),
        }
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

use super::card::Card;
use super::hand::Hand;
use crate::ports::randomizer::Randomizer;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::randomizer::ScriptedRandomizer;

    #[test]
    fn fresh_deck_is_permutation() {
        let deck = Deck::new();
        let hand = Hand::from(deck.cards.clone());
        assert_eq!(hand.size(), 52);
    }

    #[test]
    fn shuffled_deck_is_still_permutation() {
        let mut randomizer = ScriptedRandomizer::default();
        let deck = Deck::shuffled(&mut randomizer);
        let hand = Hand::from(deck.cards.clone());
        assert_eq!(hand.size(), 52);
        assert_eq!(deck.remaining(), 52);
    }
}
