use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use tracing_subscriber::EnvFilter;
use uno_round::{
    card::{Card, CardColor, ColoredCard},
    deck::create_initial_deck,
    turn::{Direction, PlayTurnResult, TurnAction, TurnActionResult},
    EndEvent, Round, RoundConfig, UnoError,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn create_player_names(count: usize) -> Vec<String> {
    let mut player_names = Vec::new();
    for i in 0..count {
        player_names.push(format!("Player {}", i + 1));
    }
    player_names
}

fn number(color: CardColor, number: u8) -> Card {
    Card::Colored(color, ColoredCard::Number(number))
}

/// Moves `front` to the top of the deck in the given order and leaves the rest as
/// it came in. Hands are dealt from the top, one player at a time starting left of
/// the dealer, so `front` reads as the hands followed by the first discard.
fn stacked(front: Vec<Card>) -> impl Fn(Vec<Card>) -> Vec<Card> + Send + Sync + 'static {
    move |mut cards: Vec<Card>| {
        let mut top = Vec::with_capacity(cards.len());
        for card in &front {
            if let Some(position) = cards.iter().position(|x| x == card) {
                top.push(cards.remove(position));
            }
        }
        top.extend(cards);
        top
    }
}

fn total_cards(round: &Round) -> usize {
    round.get_draw_pile().len()
        + round.get_discard_pile().len()
        + round
            .get_players()
            .iter()
            .map(|player| player.cards_count())
            .sum::<usize>()
}

#[test]
fn identity_shuffler_deals_from_the_top() -> color_eyre::Result<()> {
    init_tracing();

    let round = Round::new(create_player_names(2), 0, |cards: Vec<Card>| cards)?;

    assert_eq!(round.get_hand(0)?.len(), 7);
    assert_eq!(round.get_hand(1)?.len(), 7);
    assert_eq!(round.get_draw_pile().len(), 108 - 1 - 2 * 7);
    assert_eq!(round.get_discard_pile().len(), 1);
    assert_eq!(total_cards(&round), 108);

    // Player 2 sits left of the dealer and gets the first seven cards.
    assert_eq!(round.get_hand(1)?[0], number(CardColor::Blue, 0));
    assert_eq!(round.get_top_card()?, &number(CardColor::Blue, 7));
    assert_eq!(round.get_player_in_turn(), 1);
    assert_eq!(round.get_direction(), Direction::Forward);

    Ok(())
}

#[test]
fn first_reverse_with_two_players_skips_first_player() -> color_eyre::Result<()> {
    init_tracing();

    let mut front = create_initial_deck().to_vec()[..14].to_vec();
    front.push(Card::Colored(CardColor::Red, ColoredCard::Reverse));

    let round = Round::new(create_player_names(2), 0, stacked(front))?;

    assert_eq!(
        round.get_top_card()?,
        &Card::Colored(CardColor::Red, ColoredCard::Reverse)
    );
    assert_eq!(round.get_direction(), Direction::Reversed);
    assert_eq!(round.get_player_in_turn(), 0);
    assert_eq!(total_cards(&round), 108);

    Ok(())
}

#[test]
fn first_draw_card_penalizes_player_left_of_dealer() -> color_eyre::Result<()> {
    let config = RoundConfig::default().with_cards_per_player(1);
    let round = Round::with_config(
        create_player_names(3),
        0,
        stacked(vec![
            number(CardColor::Red, 1),
            number(CardColor::Red, 2),
            number(CardColor::Red, 3),
            Card::Colored(CardColor::Green, ColoredCard::Draw),
        ]),
        config,
    )?;

    assert_eq!(round.get_hand(1)?.len(), 3);
    assert_eq!(round.get_player_in_turn(), 2);
    assert_eq!(total_cards(&round), 108);

    Ok(())
}

#[test]
fn wild_first_card_is_put_back_and_reshuffled() -> color_eyre::Result<()> {
    let shuffler = |mut cards: Vec<Card>| {
        if cards.first() == Some(&Card::Wild) {
            cards.rotate_left(1);
        } else if let Some(position) = cards.iter().position(|x| *x == Card::Wild) {
            let wild = cards.remove(position);
            cards.insert(14, wild);
        }
        cards
    };

    let round = Round::new(create_player_names(2), 0, shuffler)?;

    assert_eq!(round.get_top_card()?, &number(CardColor::Blue, 7));
    assert_eq!(round.get_draw_pile().to_vec().last(), Some(&Card::Wild));
    assert_eq!(total_cards(&round), 108);

    Ok(())
}

#[test]
fn shuffler_that_keeps_wild_on_top_fails_creation() {
    let shuffler = |mut cards: Vec<Card>| {
        if cards.first() != Some(&Card::Wild) {
            if let Some(position) = cards.iter().position(|x| *x == Card::Wild) {
                let wild = cards.remove(position);
                cards.insert(14, wild);
            }
        }
        cards
    };

    let error = Round::new(create_player_names(2), 0, shuffler).unwrap_err();

    assert_eq!(error, UnoError::ShufflerStalled(108));
}

#[test]
fn play_turn_skips_player_properly() -> color_eyre::Result<()> {
    init_tracing();

    let config = RoundConfig::default().with_cards_per_player(2);
    let round = Round::with_config(
        create_player_names(4),
        0,
        stacked(vec![
            Card::Colored(CardColor::Blue, ColoredCard::Skip),
            number(CardColor::Red, 1),
            number(CardColor::Red, 2),
            number(CardColor::Red, 3),
            number(CardColor::Red, 4),
            number(CardColor::Red, 5),
            number(CardColor::Red, 6),
            number(CardColor::Red, 7),
            number(CardColor::Blue, 7),
        ]),
        config,
    )?;
    assert_eq!(round.get_player_in_turn(), 1);

    let (turn_action_result, round) = round.apply(TurnAction::Play {
        card_index: 0,
        color: None,
    })?;

    assert_eq!(
        turn_action_result,
        PlayTurnResult {
            turn_action_result: TurnActionResult::Skip,
            won: false
        }
    );
    assert_eq!(round.get_player_in_turn(), 3);
    assert_eq!(round.get_hand(1)?.len(), 1);

    Ok(())
}

#[test]
fn wild_draw_is_illegal_while_holding_top_color() -> color_eyre::Result<()> {
    let config = RoundConfig::default().with_cards_per_player(2);

    let round = Round::with_config(
        create_player_names(2),
        0,
        stacked(vec![
            Card::WildDraw,
            number(CardColor::Blue, 2),
            number(CardColor::Red, 2),
            number(CardColor::Red, 3),
            number(CardColor::Blue, 7),
        ]),
        config.clone(),
    )?;
    assert!(!round.can_play(0));
    assert!(round.can_play(1));
    assert!(matches!(
        round.play(0, Some(CardColor::Green)),
        Err(UnoError::IllegalPlay { card_index: 0 })
    ));

    let round = Round::with_config(
        create_player_names(2),
        0,
        stacked(vec![
            Card::WildDraw,
            number(CardColor::Red, 2),
            number(CardColor::Red, 3),
            number(CardColor::Red, 4),
            number(CardColor::Blue, 7),
        ]),
        config,
    )?;
    assert!(round.can_play(0));

    let (turn_action_result, round) = round.apply(TurnAction::Play {
        card_index: 0,
        color: Some(CardColor::Yellow),
    })?;
    assert_eq!(
        turn_action_result.turn_action_result,
        TurnActionResult::WildDraw
    );
    assert_eq!(round.get_hand(0)?.len(), 6);
    assert_eq!(round.get_player_in_turn(), 1);
    assert_eq!(round.get_pending_color(), Some(CardColor::Yellow));

    Ok(())
}

fn three_player_uno_round() -> color_eyre::Result<Round> {
    let config = RoundConfig::default().with_cards_per_player(2);
    Ok(Round::with_config(
        create_player_names(3),
        0,
        stacked(vec![
            number(CardColor::Blue, 3),
            number(CardColor::Red, 4),
            number(CardColor::Green, 1),
            number(CardColor::Blue, 2),
            number(CardColor::Yellow, 1),
            number(CardColor::Yellow, 2),
            number(CardColor::Blue, 7),
        ]),
        config,
    )?)
}

#[test]
fn missing_uno_is_caught_by_next_player() -> color_eyre::Result<()> {
    init_tracing();

    let round = three_player_uno_round()?.play(0, None)?;
    assert_eq!(round.get_hand(1)?.len(), 1);
    assert_eq!(round.get_player_in_turn(), 2);

    let (caught, round) = round.check_uno_failure(2, 1)?;

    assert!(caught);
    assert_eq!(round.get_hand(1)?.len(), 5);
    assert_eq!(total_cards(&round), 108);

    Ok(())
}

#[test]
fn declared_uno_shields_from_accusation() -> color_eyre::Result<()> {
    let round = three_player_uno_round()?.play(0, None)?;

    let (turn_action_result, round) = round.apply(TurnAction::Uno(1))?;
    assert_eq!(
        turn_action_result.turn_action_result,
        TurnActionResult::UnoSuccessful
    );

    let (turn_action_result, round) = round.apply(TurnAction::Callout {
        accuser: 2,
        accused: 1,
    })?;

    assert_eq!(
        turn_action_result.turn_action_result,
        TurnActionResult::CalloutFailed
    );
    assert_eq!(round.get_hand(1)?.len(), 1);

    Ok(())
}

#[test]
fn accusation_after_window_closes_is_rejected() -> color_eyre::Result<()> {
    let round = three_player_uno_round()?.play(0, None)?.play(1, None)?;
    assert_eq!(round.get_player_in_turn(), 0);

    let (caught, round) = round.check_uno_failure(0, 1)?;

    assert!(!caught);
    assert_eq!(round.get_hand(1)?.len(), 1);

    Ok(())
}

#[test]
fn accusation_with_unknown_player_is_rejected() -> color_eyre::Result<()> {
    let round = three_player_uno_round()?;

    assert_eq!(
        round.check_uno_failure(3, 1).unwrap_err(),
        UnoError::PlayerOutOfBounds(3)
    );
    assert_eq!(
        round.check_uno_failure(0, 7).unwrap_err(),
        UnoError::PlayerOutOfBounds(7)
    );

    Ok(())
}

#[test]
fn empty_hand_ends_round_with_score_and_notification() -> color_eyre::Result<()> {
    init_tracing();

    let config = RoundConfig::default().with_cards_per_player(1);
    let winners = Arc::new(AtomicUsize::new(usize::MAX));
    let calls = Arc::new(AtomicUsize::new(0));
    let (observed_winner, observed_calls) = (Arc::clone(&winners), Arc::clone(&calls));

    let round = Round::with_config(
        create_player_names(3),
        0,
        stacked(vec![
            number(CardColor::Blue, 3),
            Card::Colored(CardColor::Red, ColoredCard::Skip),
            Card::Wild,
            number(CardColor::Blue, 7),
        ]),
        config,
    )?
    .with_end_observer(move |event: &EndEvent| {
        observed_winner.store(event.winner, Ordering::SeqCst);
        observed_calls.fetch_add(1, Ordering::SeqCst);
    });
    assert!(!round.has_ended());
    assert_eq!(round.winner(), None);

    let (turn_action_result, round) = round.apply(TurnAction::Play {
        card_index: 0,
        color: None,
    })?;

    assert!(turn_action_result.won);
    assert!(round.has_ended());
    assert_eq!(round.winner(), Some(1));
    assert_eq!(round.score(), Some(70));
    assert_eq!(round.calculate_score().score(), Some(70));
    assert_eq!(winners.load(Ordering::SeqCst), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    assert_eq!(round.draw().unwrap_err(), UnoError::RoundEnded);
    assert_eq!(round.say_uno(1).unwrap_err(), UnoError::RoundEnded);
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    Ok(())
}
