//! Rules engine for a single round of uno: dealing, turn order, legal plays,
//! card effects, uno calls and scoring.

pub mod card;
pub mod config;
pub mod constants;
pub mod deck;
pub mod error;
pub mod event;
pub mod player;
pub mod round;
pub mod shuffler;
pub mod turn;

pub use card::{Card, CardColor, ColoredCard};
pub use config::{RoundConfig, UnoWindow};
pub use error::{Result, UnoError};
pub use event::{EndEvent, EndObserver};
pub use round::Round;
pub use shuffler::{SeededShuffler, Shuffler, StandardShuffler};
pub use turn::{Direction, PlayTurnResult, TurnAction, TurnActionResult};
