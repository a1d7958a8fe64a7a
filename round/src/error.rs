use std::fmt::Debug;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnoError {
    #[error("Not enough players, at least 2 are required")]
    NotEnoughPlayers,
    #[error("Too many players, at most 10 are allowed")]
    TooManyPlayers,
    #[error("Dealer {dealer} is not one of the {player_count} players")]
    InvalidDealer { dealer: usize, player_count: usize },
    #[error("Cannot deal {cards_per_player} cards to each of {player_count} players")]
    InvalidCardsPerPlayer {
        cards_per_player: usize,
        player_count: usize,
    },
    #[error("Card {card_index} cannot be played")]
    IllegalPlay { card_index: usize },
    #[error("Cannot name a color on a colored card")]
    ColorOnColoredCard,
    #[error("A color must be named when playing a wild card")]
    MissingWildColor,
    #[error("Player index {0} out of bounds")]
    PlayerOutOfBounds(usize),
    #[error("The round has ended")]
    RoundEnded,
    #[error("Pile is empty")]
    EmptyPile,
    #[error("Shuffler kept putting a wild card on top after {0} attempts")]
    ShufflerStalled(usize),
}

pub type Result<T, E = UnoError> = std::result::Result<T, E>;
