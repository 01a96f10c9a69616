use enum_iterator::all;
use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::scoreboard::{running_total_column, ColumnEntry, Scoreboard};
use crate::utils::{order_into_grid_circle, rotate_from, saturating_sum};

use super::game::{EditTarget, MormonBridgeGame, Phase, PlayerRoundResult, RoundStyle};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MormonBridgeView {
    pub main: MainContent,
    // Present while the scoreboard sheet is open
    pub scoreboard: Option<Scoreboard<EditTarget>>,
    // Present while a scoreboard cell is being edited
    pub edit_dialog: Option<EditDialog>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "phase")]
pub enum MainContent {
    SelectDealer {
        grid_players: Vec<Player>,
    },
    SelectRoundStyle {
        cards: Vec<RoundStyleCard>,
    },
    Bidding {
        dealer_text: String,
        cards: Vec<BidCard>,
        total_bid: TotalBid,
        start_round_enabled: bool,
    },
    Scoring {
        first_player_text: String,
        total_bid: TotalBid,
        cards: Vec<ScoringCard>,
        cta_enabled: bool,
    },
    ShowScores {
        title: String,
        cards: Vec<ShowScoresCard>,
        cta_enabled: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RoundStyleCard {
    pub title: String,
    pub subtitle: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BidCard {
    pub player: Player,
    pub bid: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TotalBid {
    pub total: i32,
    pub card_count: i32,
    pub total_text: String,
    pub over_under_text: String,
    pub on_bid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScoringCard {
    pub player: Player,
    // Total of the rounds before this one
    pub score: i32,
    pub bid: i32,
    pub made_bid: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ShowScoresCard {
    pub player: Player,
    pub previous_score: i32,
    pub score_delta: String,
    pub new_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditDialog {
    pub subtitle: String,
    pub bid: i32,
    pub made_bid: bool,
}

fn results_for<'a>(game: &'a MormonBridgeGame, player: &Player) -> &'a [PlayerRoundResult] {
    game.results
        .get(&player.id)
        .map(|results| results.as_slice())
        .unwrap_or(&[])
}

fn current_for(game: &MormonBridgeGame, player: &Player) -> PlayerRoundResult {
    results_for(game, player)
        .last()
        .copied()
        .unwrap_or_default()
}

fn cards_text(count: i32) -> String {
    if count == 1 {
        format!("{} card", count)
    } else {
        format!("{} cards", count)
    }
}

impl MormonBridgeView {
    pub fn from_game(game: &MormonBridgeGame) -> Self {
        Self {
            main: main_content(game),
            scoreboard: if game.scoreboard_visible {
                Some(scoreboard(game))
            } else {
                None
            },
            edit_dialog: game
                .edit_target
                .as_ref()
                .and_then(|target| edit_dialog(game, target)),
        }
    }
}

fn main_content(game: &MormonBridgeGame) -> MainContent {
    let dealer_name = game
        .players
        .get(game.dealer)
        .map(|p| p.name.as_str())
        .unwrap_or_default();
    match game.state {
        Phase::SelectDealer => MainContent::SelectDealer {
            grid_players: order_into_grid_circle(&game.players),
        },
        Phase::SelectRoundStyle => MainContent::SelectRoundStyle {
            cards: all::<RoundStyle>()
                .map(|style| RoundStyleCard {
                    title: style.display_text().to_string(),
                    subtitle: style
                        .round_card_counts()
                        .iter()
                        .map(|c| c.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                })
                .collect(),
        },
        Phase::Bid => MainContent::Bidding {
            dealer_text: format!(
                "{} is dealing ({} cards)",
                dealer_name,
                game.current_round_card_count()
            ),
            cards: rotate_from(&game.players, game.first_bidder())
                .into_iter()
                .map(|player| BidCard {
                    bid: current_for(game, &player).bid,
                    player,
                })
                .collect(),
            total_bid: total_bid(game),
            start_round_enabled: game.can_start_round(),
        },
        Phase::Score => MainContent::Scoring {
            first_player_text: format!("{} leads the first trick", dealer_name),
            total_bid: total_bid(game),
            cards: game
                .players
                .iter()
                .map(|player| {
                    let results = results_for(game, player);
                    let current = current_for(game, player);
                    ScoringCard {
                        player: player.clone(),
                        score: saturating_sum(
                            results[..results.len().saturating_sub(1)]
                                .iter()
                                .map(|r| r.score()),
                        ),
                        bid: current.bid,
                        made_bid: current.made_bid,
                    }
                })
                .collect(),
            cta_enabled: true,
        },
        Phase::ShowScores => {
            let has_next_round = game.has_next_round();
            MainContent::ShowScores {
                title: if has_next_round {
                    format!("Round {} Scores", game.round + 1)
                } else {
                    "Final Scores".to_string()
                },
                cards: game
                    .players
                    .iter()
                    .map(|player| {
                        let results = results_for(game, player);
                        let new_score = saturating_sum(results.iter().map(|r| r.score()));
                        let delta = results.last().map(|r| r.score()).unwrap_or(0);
                        ShowScoresCard {
                            player: player.clone(),
                            previous_score: new_score.saturating_sub(delta),
                            // Spaced sign as shown on the score cards, not `with_sign`.
                            // A round score is never zero.
                            score_delta: format!(
                                "{} {}",
                                if delta > 0 { "+" } else { "-" },
                                delta.abs()
                            ),
                            new_score,
                        }
                    })
                    .collect(),
                cta_enabled: has_next_round,
            }
        }
    }
}

fn total_bid(game: &MormonBridgeGame) -> TotalBid {
    let total = game.total_bid();
    let card_count = game.current_round_card_count();
    let diff = total - card_count;
    let over_under = if diff == 0 {
        "on-bid".to_string()
    } else if diff > 0 {
        format!("{} over", diff.abs())
    } else {
        format!("{} under", diff.abs())
    };
    TotalBid {
        total,
        card_count,
        total_text: format!("Total Bid: {} / {}", total, card_count),
        over_under_text: format!("({})", over_under),
        on_bid: diff == 0,
    }
}

fn scoreboard(game: &MormonBridgeGame) -> Scoreboard<EditTarget> {
    let in_progress = game.round_in_progress();
    Scoreboard {
        header_cells: game.players.iter().map(|p| p.name.clone()).collect(),
        columns: game
            .players
            .iter()
            .map(|player| {
                let results = results_for(game, player);
                let entries: Vec<ColumnEntry> = results
                    .iter()
                    .enumerate()
                    .map(|(round_index, result)| {
                        if in_progress && round_index == results.len() - 1 {
                            ColumnEntry::Pending(result.bid)
                        } else {
                            ColumnEntry::Scored(result.score())
                        }
                    })
                    .collect();
                running_total_column(&entries, |round_index| EditTarget {
                    player_id: player.id.clone(),
                    round_index,
                })
            })
            .collect(),
    }
}

fn edit_dialog(game: &MormonBridgeGame, target: &EditTarget) -> Option<EditDialog> {
    let player = game.players.iter().find(|p| p.id == target.player_id)?;
    let result = results_for(game, player).get(target.round_index)?;
    let card_count = game
        .round_style
        .round_card_counts()
        .get(target.round_index)
        .copied()
        .unwrap_or_default();
    Some(EditDialog {
        subtitle: format!(
            "Round {} - {} - {}",
            target.round_index + 1,
            cards_text(card_count),
            player.name
        ),
        bid: result.bid,
        made_bid: result.made_bid,
    })
}
