use std::{fmt, sync::Arc};

use im::Vector;
use tracing::{debug, trace, warn};

use crate::card::{Card, CardColor, ColoredCard, EffectiveTop};
use crate::config::{RoundConfig, UnoWindow};
use crate::constants::{
    DRAW_PENALTY, MAX_PLAYERS, MIN_PLAYERS, TOTAL_CARDS_IN_DECK, WILD_DRAW_PENALTY,
};
use crate::deck::{create_initial_deck, Pile};
use crate::error::{Result, UnoError};
use crate::event::{EndEvent, EndObserver, Observers};
use crate::player::Player;
use crate::shuffler::Shuffler;
use crate::turn::{advance, Direction, PlayTurnResult, TurnAction, TurnActionResult};

/// One hand of uno, from the deal until somebody runs out of cards.
///
/// A `Round` is a value. Every action borrows the current round and hands back the
/// next one, leaving the original untouched, so older rounds can be kept around as
/// snapshots. Failed actions return an error and no new round.
#[derive(Clone)]
pub struct Round {
    players: Vector<Player>,
    dealer: usize,
    draw_pile: Pile,
    discard_pile: Pile,
    player_in_turn: usize,
    direction: Direction,
    pending_color: Option<CardColor>,
    score: Option<u32>,
    config: RoundConfig,
    shuffler: Arc<dyn Shuffler + Send + Sync>,
    observers: Observers,
}

impl Round {
    pub fn new<S>(player_names: Vec<String>, dealer: usize, shuffler: S) -> Result<Self>
    where
        S: Shuffler + Send + Sync + 'static,
    {
        Self::with_config(player_names, dealer, shuffler, RoundConfig::default())
    }

    pub fn with_config<S>(
        player_names: Vec<String>,
        dealer: usize,
        shuffler: S,
        config: RoundConfig,
    ) -> Result<Self>
    where
        S: Shuffler + Send + Sync + 'static,
    {
        let player_count = player_names.len();
        if player_count < MIN_PLAYERS {
            return Err(UnoError::NotEnoughPlayers);
        }
        if player_count > MAX_PLAYERS {
            return Err(UnoError::TooManyPlayers);
        }
        if dealer >= player_count {
            return Err(UnoError::InvalidDealer {
                dealer,
                player_count,
            });
        }

        let cards_per_player = config.cards_per_player;
        // At least one card has to stay behind for the first discard.
        let leaves_a_card = player_count
            .checked_mul(cards_per_player)
            .is_some_and(|dealt| dealt < usize::from(TOTAL_CARDS_IN_DECK));
        if cards_per_player == 0 || !leaves_a_card {
            return Err(UnoError::InvalidCardsPerPlayer {
                cards_per_player,
                player_count,
            });
        }

        let mut round = Round {
            players: player_names.into_iter().map(Player::new).collect(),
            dealer,
            draw_pile: Pile::new(),
            discard_pile: Pile::new(),
            player_in_turn: dealer,
            direction: Direction::Forward,
            pending_color: None,
            score: None,
            config,
            shuffler: Arc::new(shuffler),
            observers: Observers::default(),
        };

        round.draw_pile = round.shuffled(&create_initial_deck());
        round.deal_hands();
        round.flip_first_card()?;
        round.player_in_turn = round.next_player();

        debug!(
            players = player_count,
            dealer,
            player_in_turn = round.player_in_turn,
            top = %round.get_top_card()?,
            "dealt new round"
        );

        Ok(round)
    }

    /// Registers an observer that hears about the end of the round.
    pub fn with_end_observer<O>(mut self, observer: O) -> Self
    where
        O: EndObserver + Send + Sync + 'static,
    {
        self.observers.push(Arc::new(observer));
        self
    }

    /// Whether the player in turn may play the card at `card_index` of their hand.
    pub fn can_play(&self, card_index: usize) -> bool {
        let Some(player) = self.players.get(self.player_in_turn) else {
            return false;
        };
        let Some(card) = player.hand().get(card_index) else {
            return false;
        };
        let Ok(top) = self.effective_top() else {
            return false;
        };

        let playable = match card {
            // Only legal without a card of the color to match.
            Card::WildDraw => !player
                .hand()
                .iter()
                .any(|held| held.color().is_some() && held.color() == top.color),
            Card::Wild => true,
            Card::Colored(color, face) => top.accepts(*color, face),
        };

        trace!(card = %card, ?top, playable, "checked card");

        playable
    }

    pub fn can_play_any(&self) -> bool {
        self.players
            .get(self.player_in_turn)
            .is_some_and(|player| {
                (0..player.cards_count()).any(|index| self.can_play(index))
            })
    }

    /// Plays a card of the player in turn. `color` names the color for a wild card
    /// and must be absent for any other card.
    pub fn play(&self, card_index: usize, color: Option<CardColor>) -> Result<Round> {
        if self.has_ended() {
            return Err(UnoError::RoundEnded);
        }
        if !self.can_play(card_index) {
            return Err(UnoError::IllegalPlay { card_index });
        }

        let card = self.card_in_turn(card_index)?;
        let pending_color = match (card.is_wild(), color) {
            (false, Some(_)) => return Err(UnoError::ColorOnColoredCard),
            (true, None) => return Err(UnoError::MissingWildColor),
            (_, color) => color,
        };

        let mut next = self.clone();
        let seat = next.player_in_turn;

        next.pending_color = pending_color;
        if let Some(player) = next.players.get_mut(seat) {
            player.remove_card(card_index);
        }
        next.discard_pile = next.discard_pile.push_top(card);
        next.apply_card_effect(&card);
        next.player_in_turn = next.next_player();

        debug!(
            player = seat,
            card = %card,
            ?pending_color,
            player_in_turn = next.player_in_turn,
            "played card"
        );

        next.finish_if_ended();

        Ok(next)
    }

    /// The player in turn draws a card. They keep the turn only if they can play
    /// something afterwards. Drawing withdraws their uno call even when the draw
    /// pile is empty and nothing is dealt.
    pub fn draw(&self) -> Result<Round> {
        if self.has_ended() {
            return Err(UnoError::RoundEnded);
        }

        let mut next = self.clone();
        let seat = next.player_in_turn;
        let dealt = next.deal_to(seat, 1);
        if let Some(player) = next.players.get_mut(seat) {
            player.clear_uno();
        }

        if !next.can_play_any() {
            next.player_in_turn = next.next_player();
        }

        debug!(
            player = seat,
            dealt,
            player_in_turn = next.player_in_turn,
            "drew card"
        );

        Ok(next)
    }

    /// Calls uno for `player_index`. Outside the player's uno window the call is
    /// accepted but changes nothing.
    pub fn say_uno(&self, player_index: usize) -> Result<Round> {
        if self.has_ended() {
            return Err(UnoError::RoundEnded);
        }
        self.check_player_index(player_index)?;

        let mut next = self.clone();
        let in_window = self.in_uno_window(player_index);
        if in_window {
            if let Some(player) = next.players.get_mut(player_index) {
                player.uno();
            }
        }

        debug!(player = player_index, in_window, "uno called");

        Ok(next)
    }

    /// `accuser` claims `accused` is sitting on one card without having called uno.
    /// When the claim holds inside the accused's uno window, they draw the penalty.
    pub fn check_uno_failure(&self, accuser: usize, accused: usize) -> Result<(bool, Round)> {
        if self.has_ended() {
            return Err(UnoError::RoundEnded);
        }
        self.check_player_index(accuser)?;
        let player = self.check_player_index(accused)?;

        let caught = accuser != accused
            && player.cards_count() == 1
            && !player.uno_declared()
            && self.in_uno_window(accused);

        let mut next = self.clone();
        if caught {
            let dealt = next.deal_to(accused, next.config.uno_penalty);
            debug!(accuser, accused, dealt, "caught missing uno");
        } else {
            debug!(accuser, accused, "uno accusation rejected");
        }

        Ok((caught, next))
    }

    /// Runs a single action and reports what it did.
    pub fn apply(&self, turn_action: TurnAction) -> Result<(PlayTurnResult, Round)> {
        let (turn_action_result, next) = match turn_action {
            TurnAction::Play { card_index, color } => {
                let next = self.play(card_index, color)?;
                let result = Self::play_result(next.get_top_card()?);
                (result, next)
            }
            TurnAction::Draw => (TurnActionResult::SelfDraw, self.draw()?),
            TurnAction::Uno(player_index) => {
                let next = self.say_uno(player_index)?;
                if self.in_uno_window(player_index) {
                    (TurnActionResult::UnoSuccessful, next)
                } else {
                    (TurnActionResult::UnoIgnored, next)
                }
            }
            TurnAction::Callout { accuser, accused } => {
                match self.check_uno_failure(accuser, accused)? {
                    (true, next) => (TurnActionResult::CalledOut(accused), next),
                    (false, next) => (TurnActionResult::CalloutFailed, next),
                }
            }
        };

        let won = next.has_ended();
        Ok((
            PlayTurnResult {
                turn_action_result,
                won,
            },
            next,
        ))
    }

    pub fn has_ended(&self) -> bool {
        self.winner().is_some()
    }

    pub fn winner(&self) -> Option<usize> {
        self.players
            .iter()
            .position(|player| player.cards_count() == 0)
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    /// Settles the score of an ended round. A score that is already set is kept.
    pub fn calculate_score(&self) -> Round {
        let mut next = self.clone();
        if let (Some(winner), None) = (next.winner(), next.score) {
            next.score = Some(next.score_against(winner));
        }
        next
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn get_players(&self) -> &Vector<Player> {
        &self.players
    }

    pub fn get_player(&self, player_index: usize) -> Option<&Player> {
        self.players.get(player_index)
    }

    pub fn get_hand(&self, player_index: usize) -> Result<&Vector<Card>> {
        Ok(self.check_player_index(player_index)?.hand())
    }

    pub fn hand_points(&self, player_index: usize) -> Result<u32> {
        Ok(self.check_player_index(player_index)?.hand_points())
    }

    pub fn is_uno_declared(&self, player_index: usize) -> Result<bool> {
        Ok(self.check_player_index(player_index)?.uno_declared())
    }

    pub fn get_dealer(&self) -> usize {
        self.dealer
    }

    pub fn get_player_in_turn(&self) -> usize {
        self.player_in_turn
    }

    pub fn get_direction(&self) -> Direction {
        self.direction
    }

    pub fn get_pending_color(&self) -> Option<CardColor> {
        self.pending_color
    }

    pub fn get_draw_pile(&self) -> &Pile {
        &self.draw_pile
    }

    pub fn get_discard_pile(&self) -> &Pile {
        &self.discard_pile
    }

    pub fn get_top_card(&self) -> Result<&Card> {
        self.discard_pile.peek_top()
    }

    pub fn get_config(&self) -> &RoundConfig {
        &self.config
    }

    /// The top discard as the legality rules see it.
    pub fn effective_top(&self) -> Result<EffectiveTop> {
        Ok(EffectiveTop::new(self.get_top_card()?, self.pending_color))
    }

    fn play_result(card: &Card) -> TurnActionResult {
        match card {
            Card::Colored(_, ColoredCard::Number(_)) => TurnActionResult::Neutral,
            Card::Colored(_, ColoredCard::Skip) => TurnActionResult::Skip,
            Card::Colored(_, ColoredCard::Reverse) => TurnActionResult::Reverse,
            Card::Colored(_, ColoredCard::Draw) => TurnActionResult::Draw,
            Card::Wild => TurnActionResult::Wild,
            Card::WildDraw => TurnActionResult::WildDraw,
        }
    }

    fn check_player_index(&self, player_index: usize) -> Result<&Player> {
        self.players
            .get(player_index)
            .ok_or(UnoError::PlayerOutOfBounds(player_index))
    }

    fn card_in_turn(&self, card_index: usize) -> Result<Card> {
        self.players
            .get(self.player_in_turn)
            .and_then(|player| player.hand().get(card_index))
            .copied()
            .ok_or(UnoError::IllegalPlay { card_index })
    }

    fn next_player(&self) -> usize {
        advance(
            self.player_in_turn,
            self.direction,
            self.players.len(),
            None,
        )
    }

    fn in_uno_window(&self, player_index: usize) -> bool {
        if self.player_in_turn == player_index {
            return true;
        }

        match self.config.uno_window {
            UnoWindow::TurnOnly => false,
            UnoWindow::TurnOrSuccessor => {
                self.player_in_turn
                    == advance(
                        self.player_in_turn,
                        self.direction,
                        self.players.len(),
                        Some(player_index),
                    )
            }
        }
    }

    fn shuffled(&self, pile: &Pile) -> Pile {
        let cards = self.shuffler.shuffle(pile.to_vec());
        debug_assert_eq!(cards.len(), pile.len(), "shuffler must keep every card");
        Pile::from(cards)
    }

    /// Hands out the cards one player at a time, starting left of the dealer.
    fn deal_hands(&mut self) {
        let mut seat = self.dealer;
        for _ in 0..self.players.len() {
            seat = advance(seat, Direction::Forward, self.players.len(), None);
            self.deal_to(seat, self.config.cards_per_player);
        }
    }

    fn flip_first_card(&mut self) -> Result<()> {
        let max_attempts = usize::from(TOTAL_CARDS_IN_DECK);

        for _ in 0..max_attempts {
            let (card, rest) = self.draw_pile.draw_top();
            let card = card.ok_or(UnoError::EmptyPile)?;

            if !card.is_wild() {
                self.draw_pile = rest;
                self.discard_pile = self.discard_pile.push_top(card);
                self.apply_card_effect(&card);
                return Ok(());
            }

            trace!(card = %card, "wild card flipped first, reshuffling");
            self.draw_pile = self.shuffled(&rest.push_top(card));
        }

        Err(UnoError::ShufflerStalled(max_attempts))
    }

    fn apply_card_effect(&mut self, card: &Card) {
        match card {
            Card::Colored(_, ColoredCard::Reverse) => {
                // Two players: the reverse comes straight back, so it acts as a skip.
                if self.players.len() == 2 {
                    self.player_in_turn = self.next_player();
                }
                self.direction = self.direction.flipped();
            }
            Card::Colored(_, ColoredCard::Skip) => {
                self.player_in_turn = self.next_player();
            }
            Card::Colored(_, ColoredCard::Draw) => self.penalize_next_player(DRAW_PENALTY),
            Card::WildDraw => self.penalize_next_player(WILD_DRAW_PENALTY),
            Card::Colored(_, ColoredCard::Number(_)) | Card::Wild => {}
        }
    }

    /// The next player draws `count` cards and loses their turn.
    fn penalize_next_player(&mut self, count: usize) {
        let next_player = self.next_player();
        self.deal_to(next_player, count);
        self.player_in_turn = next_player;
    }

    /// Deals up to `count` cards to `seat` and returns how many it got.
    fn deal_to(&mut self, seat: usize, count: usize) -> usize {
        let mut dealt = 0;
        for _ in 0..count {
            let Some(card) = self.take_from_draw_pile() else {
                warn!(seat, wanted = count, dealt, "draw pile is empty");
                break;
            };
            if let Some(player) = self.players.get_mut(seat) {
                player.add_card(card);
                dealt += 1;
            }
        }
        dealt
    }

    fn take_from_draw_pile(&mut self) -> Option<Card> {
        if self.draw_pile.is_empty() && self.config.reshuffle_discards {
            self.refill_draw_pile();
        }

        let (card, rest) = self.draw_pile.draw_top();
        self.draw_pile = rest;
        card
    }

    /// Turns every discard under the top card into a fresh draw pile.
    fn refill_draw_pile(&mut self) {
        let (top, rest) = self.discard_pile.draw_top();
        let Some(top) = top else {
            return;
        };
        if rest.is_empty() {
            return;
        }

        debug!(cards = rest.len(), "reshuffling discards into the draw pile");
        self.draw_pile = self.shuffled(&rest);
        self.discard_pile = Pile::new().push_top(top);
    }

    fn score_against(&self, winner: usize) -> u32 {
        self.players
            .iter()
            .enumerate()
            .filter(|(index, _)| *index != winner)
            .map(|(_, player)| player.hand_points())
            .sum()
    }

    fn finish_if_ended(&mut self) {
        let Some(winner) = self.winner() else {
            return;
        };
        if self.score.is_some() {
            return;
        }

        let score = self.score_against(winner);
        self.score = Some(score);

        debug!(winner, score, "round ended");
        self.observers.notify(&EndEvent { winner });
    }
}

impl fmt::Debug for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Round")
            .field("players", &self.players)
            .field("dealer", &self.dealer)
            .field("draw_pile", &self.draw_pile)
            .field("discard_pile", &self.discard_pile)
            .field("player_in_turn", &self.player_in_turn)
            .field("direction", &self.direction)
            .field("pending_color", &self.pending_color)
            .field("score", &self.score)
            .field("config", &self.config)
            .field("observers", &self.observers)
            .finish_non_exhaustive()
    }
}
