use im::Vector;
use strum::IntoEnumIterator;

use crate::{
    card::{Card, CardColor, ColoredCard},
    constants::*,
    error::{Result, UnoError},
};

/// An ordered stack of cards. The front is the top: the next card to draw, or the
/// most recently discarded one.
///
/// Piles are values. Every operation returns a new pile and leaves `self` as it was;
/// `im` keeps the copies cheap by sharing structure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pile(Vector<Card>);

impl Pile {
    pub fn new() -> Self {
        Self(Vector::new())
    }

    /// Takes the top card. An empty pile yields `None` and an unchanged pile.
    pub fn draw_top(&self) -> (Option<Card>, Pile) {
        let mut rest = self.0.clone();
        let card = rest.pop_front();
        (card, Pile(rest))
    }

    pub fn push_top(&self, card: Card) -> Pile {
        let mut cards = self.0.clone();
        cards.push_front(card);
        Pile(cards)
    }

    /// Looks at the top card. Only the discard pile is peeked, and it is never
    /// empty once a round has been dealt.
    pub fn peek_top(&self) -> Result<&Card> {
        self.0.front().ok_or(UnoError::EmptyPile)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.0.iter()
    }

    pub fn to_vec(&self) -> Vec<Card> {
        self.0.iter().copied().collect()
    }
}

impl From<Vec<Card>> for Pile {
    fn from(cards: Vec<Card>) -> Self {
        Self(cards.into_iter().collect())
    }
}

impl FromIterator<Card> for Pile {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// The unshuffled 108 card deck.
pub fn create_initial_deck() -> Pile {
    let mut cards = Vec::with_capacity(TOTAL_CARDS_IN_DECK.into());

    // Number Cards
    for color in CardColor::iter() {
        for number in NUMBER_CARDS_PER_COLOR {
            cards.push(Card::Colored(color, ColoredCard::Number(*number)));
        }
    }

    // Skip, Reverse and Draw Cards
    for color in CardColor::iter() {
        for _ in 0..ACTION_CARDS_PER_COLOR {
            cards.push(Card::Colored(color, ColoredCard::Skip));
            cards.push(Card::Colored(color, ColoredCard::Reverse));
            cards.push(Card::Colored(color, ColoredCard::Draw));
        }
    }

    for _ in 0..WILD_CARDS_IN_DECK {
        cards.push(Card::Wild);
    }

    for _ in 0..WILD_DRAW_CARDS_IN_DECK {
        cards.push(Card::WildDraw);
    }

    Pile::from(cards)
}
