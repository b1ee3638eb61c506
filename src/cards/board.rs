/// the community cards. transitions only ever add cards;
/// the street tag is derived from how many are showing.
#[derive(Debug, Clone, Default)]
pub struct Board {
    cards: Vec<Card>,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cards: Vec::with_capacity(5),
        }
    }
    pub fn street(&self) -> Street {
        Street::from(self.cards.len())
    }
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
    pub fn contains(&self, card: &Card) -> bool {
        self.cards.contains(card)
    }
    pub fn reveal(&mut self, cards: &[Card]) {
        assert!(self.cards.len() + cards.len() <= 5, "board overfull");
        self.cards.extend_from_slice(cards);
        let _ = self.street(); // 0, 3, 4, or 5 showing
    }
    pub fn reset(&mut self) {
        self.cards.clear();
    }
}

impl From<&Board> for Hand {
    fn from(board: &Board) -> Self {
        Hand::from(board.cards.clone())
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        for card in &self.cards {
            write!(f, "{} ", card)?;
        }
        Ok(())
    }
}

use super::card::Card;
use super::hand::Hand;
use super::street::Street;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn streets_follow_card_count() {
        let mut board = Board::empty();
        assert_eq!(board.street(), Street::Preflop);
        board.reveal(&[
            Card::try_from("As").unwrap(),
            Card::try_from("Kd").unwrap(),
            Card::try_from("7c").unwrap(),
        ]);
        assert_eq!(board.street(), Street::Flop);
        board.reveal(&[Card::try_from("2h").unwrap()]);
        assert_eq!(board.street(), Street::Turn);
        board.reveal(&[Card::try_from("9s").unwrap()]);
        assert_eq!(board.street(), Street::River);
    }

    #[test]
    #[should_panic]
    fn rejects_sixth_card() {
        let mut board = Board::empty();
        board.reveal(&[
            Card::try_from("As").unwrap(),
            Card::try_from("Kd").unwrap(),
            Card::try_from("7c").unwrap(),
            Card::try_from("2h").unwrap(),
            Card::try_from("9s").unwrap(),
        ]);
        board.reveal(&[Card::try_from("3d").unwrap()]);
    }
}
