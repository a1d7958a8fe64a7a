use crate::card::CardColor;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    #[default]
    Forward,
    Reversed,
}

impl Direction {
    pub fn flipped(self) -> Self {
        match self {
            Direction::Forward => Direction::Reversed,
            Direction::Reversed => Direction::Forward,
        }
    }
}

/// Index of the seat after `from` (or after `override_index` when given) in the
/// given direction, wrapping around the table. `player_count` must not be zero.
pub fn advance(
    from: usize,
    direction: Direction,
    player_count: usize,
    override_index: Option<usize>,
) -> usize {
    debug_assert!(player_count > 0, "advance needs at least one player");
    let from = override_index.unwrap_or(from);
    match direction {
        Direction::Forward => (from + 1) % player_count,
        Direction::Reversed => (from + player_count - 1) % player_count,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnAction {
    Play {
        card_index: usize,
        color: Option<CardColor>,
    },
    Draw,
    Uno(usize),
    Callout { accuser: usize, accused: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnActionResult {
    Neutral,
    Skip,
    Reverse,
    Draw,
    Wild,
    WildDraw,
    SelfDraw,
    CalledOut(usize),
    CalloutFailed,
    UnoSuccessful,
    UnoIgnored,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayTurnResult {
    pub turn_action_result: TurnActionResult,
    pub won: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_player_turn_works_when_first_player() {
        assert_eq!(advance(0, Direction::Forward, 4, None), 1);
    }

    #[test]
    fn next_player_turn_works_when_last_player() {
        assert_eq!(advance(3, Direction::Forward, 4, None), 0);
    }

    #[test]
    fn reversed_turn_wraps_to_last_player() {
        assert_eq!(advance(0, Direction::Reversed, 4, None), 3);
        assert_eq!(advance(2, Direction::Reversed, 4, None), 1);
    }

    #[test]
    fn override_index_replaces_origin() {
        assert_eq!(advance(0, Direction::Forward, 4, Some(2)), 3);
        assert_eq!(advance(0, Direction::Reversed, 4, Some(2)), 1);
    }

    #[test]
    fn advance_stays_in_bounds_for_every_table_size() {
        for player_count in 2..=10 {
            for from in 0..player_count {
                for direction in [Direction::Forward, Direction::Reversed] {
                    let next = advance(from, direction, player_count, None);
                    assert!(next < player_count);
                    assert_ne!(next, from);
                    assert_eq!(advance(next, direction.flipped(), player_count, None), from);
                }
            }
        }
    }

    #[test]
    #[should_panic]
    fn advance_rejects_empty_table() {
        advance(0, Direction::Forward, 0, None);
    }

    #[test]
    fn two_players_alternate_in_both_directions() {
        assert_eq!(advance(0, Direction::Forward, 2, None), 1);
        assert_eq!(advance(0, Direction::Reversed, 2, None), 1);
        assert_eq!(advance(1, Direction::Reversed, 2, None), 0);
    }
}
