use core::fmt;
use std::fmt::Display;

use strum_macros::{Display, EnumCount as EnumCountMacro, EnumIter, EnumString};

use crate::constants::{ACTION_CARD_POINTS, WILD_CARD_POINTS};

#[derive(
    Clone, Copy, Debug, Display, EnumString, EnumCountMacro, EnumIter, PartialEq, Eq, Hash,
)]
pub enum CardColor {
    Blue,
    Green,
    Red,
    Yellow,
}

/// The face of a card that carries a color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColoredCard {
    Number(u8),
    Skip,
    Reverse,
    Draw,
}

impl ColoredCard {
    /// Whether both faces are the same action (Skip/Skip, Reverse/Reverse, Draw/Draw).
    pub fn same_action(&self, other: &ColoredCard) -> bool {
        matches!(
            (self, other),
            (ColoredCard::Skip, ColoredCard::Skip)
                | (ColoredCard::Reverse, ColoredCard::Reverse)
                | (ColoredCard::Draw, ColoredCard::Draw)
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Card {
    Colored(CardColor, ColoredCard),
    Wild,
    WildDraw,
}

impl Card {
    pub fn color(&self) -> Option<CardColor> {
        match self {
            Card::Colored(color, _) => Some(*color),
            Card::Wild | Card::WildDraw => None,
        }
    }

    pub fn is_wild(&self) -> bool {
        matches!(self, Card::Wild | Card::WildDraw)
    }

    /// Penalty value of the card when it is left in a hand at the end of a round.
    pub fn points(&self) -> u32 {
        match self {
            Card::Colored(_, ColoredCard::Number(number)) => u32::from(*number),
            Card::Colored(_, _) => ACTION_CARD_POINTS,
            Card::Wild | Card::WildDraw => WILD_CARD_POINTS,
        }
    }
}

/// The top of the discard pile as seen by the legality rules.
///
/// A wild card on top takes the color named when it was played; a colored card
/// takes the named color too and loses its number, so only color matches count.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EffectiveTop {
    pub color: Option<CardColor>,
    pub face: Option<ColoredCard>,
}

impl EffectiveTop {
    pub fn new(card: &Card, pending_color: Option<CardColor>) -> Self {
        let face = match card {
            Card::Colored(_, ColoredCard::Number(_)) if pending_color.is_some() => None,
            Card::Colored(_, face) => Some(*face),
            Card::Wild | Card::WildDraw => None,
        };

        Self {
            color: pending_color.or_else(|| card.color()),
            face,
        }
    }

    /// Color, number or action match against a colored card in hand.
    pub fn accepts(&self, color: CardColor, face: &ColoredCard) -> bool {
        if self.color == Some(color) {
            return true;
        }

        match (self.face, face) {
            (Some(ColoredCard::Number(top)), ColoredCard::Number(number)) => top == *number,
            (Some(top), face) => top.same_action(face),
            (None, _) => false,
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Card::Colored(color, card) => {
                write!(f, "{} {}", color, {
                    match card {
                        ColoredCard::Number(number) => number.to_string(),
                        ColoredCard::Skip => "Skip".to_string(),
                        ColoredCard::Reverse => "Reverse".to_string(),
                        ColoredCard::Draw => "Draw".to_string(),
                    }
                })
            }
            Card::Wild => write!(f, "Wild"),
            Card::WildDraw => write!(f, "Wild Draw"),
        }
    }
}
