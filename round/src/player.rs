use im::Vector;

use crate::card::Card;

/// One seat at the table: the cards held and whether uno has been called on them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    name: String,
    hand: Vector<Card>,
    uno_declared: bool,
}

impl Player {
    pub fn new(name: String) -> Self {
        Self {
            name,
            hand: Vector::new(),
            uno_declared: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hand(&self) -> &Vector<Card> {
        &self.hand
    }

    pub fn cards_count(&self) -> usize {
        self.hand.len()
    }

    pub fn uno_declared(&self) -> bool {
        self.uno_declared
    }

    pub fn hand_points(&self) -> u32 {
        self.hand.iter().map(Card::points).sum()
    }

    /// Taking a card withdraws any earlier uno declaration.
    pub(crate) fn add_card(&mut self, card: Card) {
        self.hand.push_back(card);
        self.uno_declared = false;
    }

    pub(crate) fn remove_card(&mut self, index: usize) -> Option<Card> {
        (index < self.hand.len()).then(|| self.hand.remove(index))
    }

    pub(crate) fn uno(&mut self) {
        self.uno_declared = true;
    }

    pub(crate) fn clear_uno(&mut self) {
        self.uno_declared = false;
    }

    #[cfg(test)]
    pub(crate) fn with_hand(mut self, cards: Vec<Card>) -> Self {
        self.hand = cards.into_iter().collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::{CardColor, ColoredCard};

    #[test]
    fn add_card_clears_uno() {
        let mut player = Player::new("Player 1".to_string());
        player.uno();
        assert!(player.uno_declared());

        player.add_card(Card::Wild);

        assert!(!player.uno_declared());
        assert_eq!(player.cards_count(), 1);
    }

    #[test]
    fn remove_card_out_of_bounds_is_none() {
        let mut player = Player::new("Player 1".to_string()).with_hand(vec![Card::Wild]);

        assert_eq!(player.remove_card(1), None);
        assert_eq!(player.remove_card(0), Some(Card::Wild));
        assert_eq!(player.cards_count(), 0);
    }

    #[test]
    fn hand_points_sums_card_values() {
        let player = Player::new("Player 1".to_string()).with_hand(vec![
            Card::Colored(CardColor::Red, ColoredCard::Number(7)),
            Card::Colored(CardColor::Blue, ColoredCard::Skip),
            Card::WildDraw,
        ]);

        assert_eq!(player.hand_points(), 77);
    }
}
