use enum_iterator::all;
use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::scoreboard::{running_total_column, Cell, CellKind, ColumnEntry, Scoreboard};
use crate::utils::fill_with;

use super::game::{Phase, ReadyRound, RookGame, RoundData, Team, DEFAULT_BID};

const BID_HEADER: &str = "Bid";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RookView {
    // Running score header, shown once teams are chosen
    pub current_score: Option<CurrentScore>,
    pub main: MainContent,
    pub scoreboard: Option<Scoreboard<usize>>,
    pub edit_dialog: Option<EditDialog>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CurrentScore {
    pub round_number: usize,
    pub cards: Vec<TeamScoreCard>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamScoreCard {
    pub team_name: String,
    pub score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "phase")]
pub enum MainContent {
    SelectTeams {
        cards: Vec<PlayerTeamCard>,
        cta_enabled: bool,
    },
    EnterBid {
        bid: i32,
        team_cards: Vec<TeamCard>,
        cta_enabled: bool,
    },
    CollectScore {
        slider_value: i32,
        team_cards: Vec<CollectScoreCard>,
        cta_enabled: bool,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PlayerTeamCard {
    pub id: String,
    pub name: String,
    // Selected cards are on the first team
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TeamCard {
    pub name: String,
    pub is_selected: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CollectScoreCard {
    pub round_points_won_text: String,
    pub bid_text: String,
    pub proposed_round_score: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct EditDialog {
    pub subtitle: String,
    pub bid: i32,
    pub team_cards: Vec<TeamCard>,
    pub points: i32,
}

/// "Ann & Bob"
pub fn team_name(players: &[&Player]) -> String {
    players
        .iter()
        .map(|p| p.name.as_str())
        .collect::<Vec<_>>()
        .join(" & ")
}

/// Initials of each player's name, "Ann Lee & Bob" becomes "AL & B".
pub fn abbreviated_team_name(players: &[&Player]) -> String {
    players
        .iter()
        .map(|p| {
            p.name
                .split(' ')
                .filter_map(|word| word.chars().next())
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" & ")
}

impl RookView {
    pub fn from_game(game: &RookGame) -> Self {
        let rounds = game.finished_rounds();
        Self {
            current_score: if game.state > Phase::SelectTeams {
                Some(CurrentScore {
                    round_number: rounds.len() + 1,
                    cards: all::<Team>()
                        .map(|team| TeamScoreCard {
                            team_name: team_name(&game.team_players(team)),
                            score: rounds.iter().map(|r| r.score(team)).sum(),
                        })
                        .collect(),
                })
            } else {
                None
            },
            main: main_content(game),
            scoreboard: if game.scoreboard_visible {
                Some(scoreboard(game, &rounds))
            } else {
                None
            },
            edit_dialog: game
                .edit_target
                .and_then(|index| rounds.get(index).map(|round| (index, round)))
                .map(|(index, round)| EditDialog {
                    subtitle: format!("Edit round {}", index + 1),
                    bid: round.bid,
                    team_cards: team_cards(game, Some(round.bidding_team)),
                    points: round.bidding_team_points,
                }),
        }
    }
}

fn team_cards(game: &RookGame, selected: Option<Team>) -> Vec<TeamCard> {
    all::<Team>()
        .map(|team| TeamCard {
            name: team_name(&game.team_players(team)),
            is_selected: selected == Some(team),
        })
        .collect()
}

fn main_content(game: &RookGame) -> MainContent {
    match game.state {
        Phase::SelectTeams => MainContent::SelectTeams {
            cards: game
                .players
                .iter()
                .map(|player| PlayerTeamCard {
                    id: player.id.clone(),
                    name: player.name.clone(),
                    is_selected: game.teams.get(&player.id) == Some(&Team::Team1),
                })
                .collect(),
            cta_enabled: game.can_confirm_teams(),
        },
        Phase::EnterBid => {
            let (bid, bidding_team) = match game.current_round() {
                Some(round) => (round.bid(), round.bidding_team()),
                None => (DEFAULT_BID, None),
            };
            MainContent::EnterBid {
                bid,
                team_cards: team_cards(game, bidding_team),
                cta_enabled: game.can_finalize_bid(),
            }
        }
        Phase::CollectScore => match game.current_round() {
            Some(RoundData::Ready(round)) => {
                let mut teams: Vec<Team> = all::<Team>().collect();
                // Bidding team first
                teams.sort_by_key(|team| *team != round.bidding_team);
                MainContent::CollectScore {
                    slider_value: round.bidding_team_points,
                    team_cards: teams
                        .into_iter()
                        .map(|team| CollectScoreCard {
                            round_points_won_text: format!(
                                "{}: {}",
                                abbreviated_team_name(&game.team_players(team)),
                                round.points(team)
                            ),
                            bid_text: if team == round.bidding_team {
                                format!("Took bid at: {}", round.bid)
                            } else {
                                String::new()
                            },
                            proposed_round_score: round.score(team),
                        })
                        .collect(),
                    cta_enabled: game.can_confirm_score(),
                }
            }
            _ => MainContent::CollectScore {
                slider_value: 0,
                team_cards: vec![],
                cta_enabled: false,
            },
        },
    }
}

fn bid_cell(round_index: usize, round: &ReadyRound) -> Cell<usize> {
    Cell::editable(
        format!(
            "{} {} {}",
            if round.bidding_team == Team::Team1 { "<-" } else { "   " },
            round.bid,
            if round.bidding_team == Team::Team2 { "->" } else { "   " }
        ),
        round_index,
        CellKind::Plain,
    )
}

fn scoreboard(game: &RookGame, rounds: &[ReadyRound]) -> Scoreboard<usize> {
    let team_columns: Vec<Vec<Cell<usize>>> = all::<Team>()
        .map(|team| {
            let entries: Vec<ColumnEntry> = rounds
                .iter()
                .map(|r| ColumnEntry::Scored(r.score(team)))
                .collect();
            running_total_column(&entries, |round_index| round_index)
        })
        .collect();
    // Spacer keeps the bid aligned with the delta row of each round
    let bid_column: Vec<Cell<usize>> = rounds
        .iter()
        .enumerate()
        .flat_map(|(round_index, round)| {
            let mut cells = vec![bid_cell(round_index, round)];
            if round_index > 0 {
                cells.push(Cell::blank());
            }
            cells
        })
        .collect();
    Scoreboard {
        header_cells: fill_with(
            all::<Team>()
                .map(|team| team_name(&game.team_players(team)))
                .collect(),
            BID_HEADER.to_string(),
        ),
        columns: fill_with(team_columns, bid_column),
    }
}
