//! Plays a full round between bots that always play their first legal card.
//!
//! `RUST_LOG=uno_round=debug cargo run --example self_play -- 42`

use std::env;

use color_eyre::eyre::WrapErr;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uno_round::{
    CardColor, EndEvent, Round, RoundConfig, SeededShuffler, TurnAction, TurnActionResult,
};

const MAX_TURNS: usize = 1_000;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let seed = match env::args().nth(1) {
        Some(seed) => seed.parse::<u64>().wrap_err("seed must be a number")?,
        None => 0,
    };

    let players = vec!["Ada".to_string(), "Brian".to_string(), "Cleo".to_string()];
    let config = RoundConfig::default().with_reshuffle_discards(true);
    let mut round = Round::with_config(players, 0, SeededShuffler::new(seed), config)?
        .with_end_observer(|event: &EndEvent| info!(winner = event.winner, "round over"));

    for _ in 0..MAX_TURNS {
        let seat = round.get_player_in_turn();
        let hand = round.get_hand(seat)?.clone();

        let action = match (0..hand.len()).find(|index| round.can_play(*index)) {
            Some(card_index) => TurnAction::Play {
                card_index,
                color: hand[card_index].is_wild().then_some(CardColor::Blue),
            },
            None => TurnAction::Draw,
        };

        let (result, next) = round.apply(action)?;
        info!(
            player = round.get_players()[seat].name(),
            ?result,
            top = %next.get_top_card()?,
            "turn played"
        );
        round = next;

        if result.won {
            break;
        }

        if round.get_hand(seat)?.len() == 1 {
            let (result, next) = round.apply(TurnAction::Uno(seat))?;
            if result.turn_action_result == TurnActionResult::UnoSuccessful {
                info!(player = seat, "uno!");
            }
            round = next;
        }
    }

    match (round.winner(), round.score()) {
        (Some(winner), Some(score)) => {
            println!("{} wins with {score} points", round.get_players()[winner].name())
        }
        _ => println!("no winner after {MAX_TURNS} turns"),
    }

    Ok(())
}
