use crate::constants::{DEFAULT_CARDS_PER_PLAYER, DEFAULT_UNO_PENALTY};

/// Who may still call uno, or be called out, once a player is down to one card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum UnoWindow {
    /// While it is the player's own turn, or the turn of the player right after them.
    #[default]
    TurnOrSuccessor,
    /// Only while it is the player's own turn.
    TurnOnly,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoundConfig {
    pub cards_per_player: usize,
    /// Cards drawn by a player caught without calling uno.
    pub uno_penalty: usize,
    pub uno_window: UnoWindow,
    /// Rebuild an empty draw pile from the discards under the top card.
    /// Without it, drawing from an empty pile deals nothing.
    pub reshuffle_discards: bool,
}

impl Default for RoundConfig {
    fn default() -> Self {
        Self {
            cards_per_player: DEFAULT_CARDS_PER_PLAYER,
            uno_penalty: DEFAULT_UNO_PENALTY,
            uno_window: UnoWindow::default(),
            reshuffle_discards: false,
        }
    }
}

impl RoundConfig {
    pub fn with_cards_per_player(mut self, cards_per_player: usize) -> Self {
        self.cards_per_player = cards_per_player;
        self
    }

    pub fn with_uno_penalty(mut self, uno_penalty: usize) -> Self {
        self.uno_penalty = uno_penalty;
        self
    }

    pub fn with_uno_window(mut self, uno_window: UnoWindow) -> Self {
        self.uno_window = uno_window;
        self
    }

    pub fn with_reshuffle_discards(mut self, reshuffle_discards: bool) -> Self {
        self.reshuffle_discards = reshuffle_discards;
        self
    }
}
