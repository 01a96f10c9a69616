//! Property tests for the Rook engine.

use proptest::prelude::*;

use super::game::{valid_points, ReadyRound, RookGame, Team, MAX_BID, MIN_BID};
use crate::error::GameError;
use crate::scoreboard::{Cell, CellKind};
use crate::store::ScoreKeeper;
use crate::test_support::{init_logging, players};

fn team(index: usize) -> Team {
    Team::from_index(index % 2).unwrap()
}

fn play_round(game: &mut RookGame, bid: i32, bidding_team: Team, points: i32) {
    game.set_bid(bid);
    game.select_bidding_team(bidding_team);
    game.finalize_bid();
    game.set_collected_points(points);
    game.confirm_score();
}

/// Score for one side of a round, worked out from the table's rules.
fn round_score(bid: i32, bidding: bool, points: i32) -> i32 {
    if !bidding {
        (180 - points).max(0)
    } else if points >= bid {
        points
    } else {
        -bid
    }
}

fn totals_from_column(column: &[Cell<usize>]) -> Vec<i32> {
    // Round 0 is its own total, later rounds put the total after the delta cell
    column
        .iter()
        .enumerate()
        .filter(|(i, cell)| *i == 0 || (cell.kind == CellKind::Plain && cell.edit_target.is_none()))
        .map(|(_, cell)| cell.text.parse::<i32>().unwrap())
        .collect()
}

fn round_points() -> impl Strategy<Value = i32> {
    prop_oneof![0i32..=180, Just(200)]
}

proptest! {
    /// The bidding team scores its points when it makes the bid and loses
    /// the bid otherwise. The other team always keeps what it collected.
    #[test]
    fn prop_score_formula(bid in MIN_BID..=MAX_BID, points in round_points(), bidder in 0usize..2) {
        let bidding_team = team(bidder);
        let round = ReadyRound { bid, bidding_team, bidding_team_points: points };
        let expected = if points >= bid { points } else { -bid };
        prop_assert_eq!(round.score(bidding_team), expected);
        prop_assert_eq!(round.score(bidding_team.other()), (180 - points).max(0));
    }

    /// Teams can only be confirmed with exactly two players on each side.
    #[test]
    fn prop_team_selection_guard(toggles in prop::collection::vec(0usize..4, 0..12)) {
        init_logging();
        let mut game = RookGame::new(players(4)).unwrap();
        for toggle in toggles {
            game.toggle_team(&format!("p{}", toggle + 1)).unwrap();
        }
        let balanced = game.team_players(Team::Team1).len() == 2;
        prop_assert_eq!(game.can_confirm_teams(), balanced);
        game.confirm_teams();
        prop_assert_eq!(game.rounds.len(), usize::from(balanced));
    }

    /// The running totals on the scoreboard equal the prefix sums of the
    /// round scores, recomputed from the rounds as played and edited.
    #[test]
    fn prop_scoreboard_totals_match_rounds_after_edits(
        rounds in prop::collection::vec((MIN_BID..=MAX_BID, 0usize..2, round_points()), 1..10),
        edits in prop::collection::vec((0usize..10, 0i32..300, 0usize..2, -20i32..220), 0..8),
    ) {
        init_logging();
        let mut game = RookGame::new(players(4)).unwrap();
        game.confirm_teams();
        game.set_scoreboard_visible(true);
        // (bid, bidding team index, points) as the table recorded them
        let mut played: Vec<(i32, usize, i32)> = rounds.clone();
        for (bid, bidder, points) in rounds.iter() {
            play_round(&mut game, *bid, team(*bidder), *points);
        }
        for (round_index, bid, bidder, points) in edits {
            let round_index = round_index % rounds.len();
            let result = game.edit_past_round(round_index, bid, team(bidder), points);
            if valid_points(points) {
                prop_assert_eq!(result, Ok(()));
                played[round_index] = (bid.clamp(MIN_BID, MAX_BID), bidder % 2, points);
            } else {
                prop_assert_eq!(result, Err(GameError::InvalidPoints(points)));
            }
        }

        let finished = game.finished_rounds();
        prop_assert_eq!(finished.len(), rounds.len());
        prop_assert!(finished.iter().all(|r| valid_points(r.bidding_team_points)));
        prop_assert!(finished.iter().all(|r| (MIN_BID..=MAX_BID).contains(&r.bid)));

        let board = game.view().scoreboard.unwrap();
        for (side, column) in [(0usize, &board.columns[0]), (1, &board.columns[2])] {
            let expected: Vec<i32> = played
                .iter()
                .map(|(bid, bidder, points)| round_score(*bid, *bidder == side, *points))
                .scan(0, |total, score| {
                    *total += score;
                    Some(*total)
                })
                .collect();
            prop_assert_eq!(totals_from_column(column), expected);
        }
    }
}
