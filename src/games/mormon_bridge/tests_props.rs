//! Property tests for the Mormon Bridge engine.

use proptest::prelude::*;

use super::game::{MormonBridgeGame, Phase, PlayerRoundResult, RoundStyle};
use crate::scoreboard::{Cell, CellKind};
use crate::store::ScoreKeeper;
use crate::test_support::{init_logging, players};
use crate::utils::order_into_grid_circle;

fn started_game(count: usize, dealer: usize, style: usize) -> MormonBridgeGame {
    init_logging();
    let mut game = MormonBridgeGame::new(players(count)).unwrap();
    game.select_dealer(&format!("p{}", dealer + 1)).unwrap();
    game.select_round_style(style).unwrap();
    game
}

/// Plays one round where the first player takes every trick, then flips the
/// made flag for the players selected by `missed`.
fn play_round(game: &mut MormonBridgeGame, missed: &[bool]) {
    let cards = game.current_round_card_count();
    game.adjust_bid("p1", cards).unwrap();
    game.start_round();
    for (i, miss) in missed.iter().enumerate().take(game.players.len()) {
        if *miss {
            game.toggle_made_bid(&format!("p{}", i + 1)).unwrap();
        }
    }
    game.score_round();
}

fn totals_from_column(column: &[Cell<super::EditTarget>]) -> Vec<i32> {
    // Round 0 is its own total, later rounds put the total after the delta cell
    let mut totals = vec![];
    for (i, cell) in column.iter().enumerate() {
        if i == 0 || (cell.kind == CellKind::Plain && cell.edit_target.is_none()) {
            totals.push(cell.text.parse::<i32>().unwrap());
        }
    }
    totals
}

proptest! {
    /// Making the bid scores ten plus the bid, missing it loses the same.
    #[test]
    fn prop_score_formula(bid in 0i32..1000, made_bid in any::<bool>()) {
        let score = PlayerRoundResult { bid, made_bid }.score();
        if made_bid {
            prop_assert_eq!(score, 10 + bid);
        } else {
            prop_assert_eq!(score, -(10 + bid));
        }
    }

    /// Starting the round is allowed exactly when the bids add up to the
    /// number of cards dealt.
    #[test]
    fn prop_start_round_iff_bids_match(
        count in 2usize..=8,
        bids in prop::collection::vec(0i32..=7, 8),
        style in 0usize..3,
    ) {
        let mut game = started_game(count, 0, style);
        for (i, bid) in bids.iter().take(count).enumerate() {
            game.adjust_bid(&format!("p{}", i + 1), *bid).unwrap();
        }
        let total: i32 = bids.iter().take(count).sum();
        let cards = game.current_round_card_count();
        prop_assert_eq!(game.can_start_round(), total == cards);
        game.start_round();
        let expected = if total == cards { Phase::Score } else { Phase::Bid };
        prop_assert_eq!(game.state, expected);
    }

    /// Bids never leave the range zero to the round's card count.
    #[test]
    fn prop_bid_stays_in_range(deltas in prop::collection::vec(-10i32..10, 1..30)) {
        let mut game = started_game(3, 0, 0);
        for delta in deltas {
            game.adjust_bid("p2", delta).unwrap();
            let bid = game.current_result("p2").unwrap().unwrap().bid;
            prop_assert!((0..=game.current_round_card_count()).contains(&bid));
        }
    }

    /// Every running total on the scoreboard equals the sum of the round
    /// scores up to that row, including after arbitrary edits.
    #[test]
    fn prop_running_totals_match_sums(
        count in 2usize..=6,
        rounds in 1usize..=7,
        missed in prop::collection::vec(prop::collection::vec(any::<bool>(), 6), 7),
        edits in prop::collection::vec((0usize..6, 0usize..7, 0i32..10, any::<bool>()), 0..6),
    ) {
        let mut game = started_game(count, 0, 1);
        game.set_scoreboard_visible(true);
        for round in 0..rounds {
            play_round(&mut game, &missed[round]);
            if round + 1 < rounds {
                game.next_round();
            }
        }
        for (player, round, bid, made_bid) in edits {
            let player_id = format!("p{}", player % count + 1);
            game.edit_past_round(&player_id, round % rounds, bid, made_bid).unwrap();
        }

        let board = game.view().scoreboard.unwrap();
        for (player, column) in game.players.iter().zip(board.columns.iter()) {
            let scores: Vec<i32> = game.results[&player.id].iter().map(|r| r.score()).collect();
            let expected: Vec<i32> = scores
                .iter()
                .scan(0, |total, score| {
                    *total += score;
                    Some(*total)
                })
                .collect();
            prop_assert_eq!(totals_from_column(column), expected.clone());
            prop_assert_eq!(game.cumulative_score(&player.id).unwrap(), *expected.last().unwrap());
        }
    }

    /// The deal passes one seat to the left every round and the player after
    /// the dealer always bids first.
    #[test]
    fn prop_dealer_rotation(count in 2usize..=8, dealer in 0usize..8, rounds in 1usize..13) {
        let dealer = dealer % count;
        let mut game = started_game(count, dealer, 0);
        for round in 0..rounds {
            prop_assert_eq!(game.dealer, (dealer + round) % count);
            prop_assert_eq!(game.first_bidder(), (dealer + round + 1) % count);
            play_round(&mut game, &[]);
            game.next_round();
        }
        prop_assert_eq!(game.dealer, (dealer + rounds) % count);
    }

    /// The next round button is live only before the final scheduled round.
    #[test]
    fn prop_schedule_termination(style in 0usize..3) {
        let mut game = started_game(2, 0, style);
        let last = RoundStyle::from_index(style).unwrap().last_round_index();
        loop {
            play_round(&mut game, &[]);
            prop_assert_eq!(game.has_next_round(), game.round < last);
            prop_assert_eq!(game.available_actions().is_empty(), game.round == last);
            if game.round == last {
                break;
            }
            game.next_round();
        }
        prop_assert!(game.is_game_over());
    }

    /// Circle ordering is a permutation that starts with the first two seats
    /// and then takes the last seat.
    #[test]
    fn prop_grid_circle_is_permutation(len in 0usize..20) {
        let items: Vec<usize> = (0..len).collect();
        let ordered = order_into_grid_circle(&items);
        let mut sorted = ordered.clone();
        sorted.sort();
        prop_assert_eq!(&sorted, &items);
        if len >= 3 {
            prop_assert_eq!(&ordered[..3], &[0, 1, len - 1][..]);
        }
    }
}
