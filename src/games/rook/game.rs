/*
Game: Rook
Partnership bidding game for four players in two fixed teams. Each round
one team wins the bid and then needs to collect at least that many of the
180 counting points; the other team always keeps whatever it collected.
*/

use std::collections::HashMap;

use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::GameError;
use crate::player::{validate_roster, Player};
use crate::store::ScoreKeeper;

use super::view::RookView;

pub const GAME_NAME: &str = "Rook";
pub const PLAYER_COUNT: usize = 4;
pub const PLAYERS_PER_TEAM: usize = 2;
pub const DEFAULT_BID: i32 = 100;
pub const MIN_BID: i32 = 50;
pub const MAX_BID: i32 = 200;
pub const MAX_POINTS: i32 = 200;
const ROUND_POINTS: i32 = 180;
// Taking every trick is scored as 200 rather than 180
const ALL_TRICKS_POINTS: i32 = 200;
// Granularity of the bid and points options offered to random play
const POINT_STEP: usize = 5;

#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    Serialize,
    Deserialize,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Sequence,
)]
#[serde(rename_all = "camelCase")]
pub enum Team {
    #[default]
    Team1,
    Team2,
}

impl Team {
    pub fn from_index(index: usize) -> Option<Team> {
        all::<Team>().nth(index)
    }

    pub fn other(&self) -> Team {
        match self {
            Team::Team1 => Team::Team2,
            Team::Team2 => Team::Team1,
        }
    }
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord,
)]
#[serde(rename_all = "camelCase")]
pub enum Phase {
    #[default]
    SelectTeams,
    EnterBid,
    CollectScore,
}

/// Points collection for a round whose bidding team is known.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ReadyRound {
    pub bid: i32,
    pub bidding_team: Team,
    pub bidding_team_points: i32,
}

impl ReadyRound {
    pub fn made_bid(&self) -> bool {
        self.bidding_team_points >= self.bid
    }

    /// Whatever the bidding team did not collect, never below zero.
    pub fn non_bidding_team_points(&self) -> i32 {
        (ROUND_POINTS - self.bidding_team_points).max(0)
    }

    pub fn points(&self, team: Team) -> i32 {
        if team == self.bidding_team {
            self.bidding_team_points
        } else {
            self.non_bidding_team_points()
        }
    }

    pub fn score(&self, team: Team) -> i32 {
        if team != self.bidding_team {
            self.non_bidding_team_points()
        } else if self.made_bid() {
            self.bidding_team_points
        } else {
            -self.bid
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase", rename_all_fields = "camelCase", tag = "state")]
pub enum RoundData {
    SettingUp {
        bid: i32,
        bidding_team: Option<Team>,
    },
    Ready(ReadyRound),
}

impl RoundData {
    pub fn bid(&self) -> i32 {
        match self {
            RoundData::SettingUp { bid, .. } => *bid,
            RoundData::Ready(round) => round.bid,
        }
    }

    pub fn bidding_team(&self) -> Option<Team> {
        match self {
            RoundData::SettingUp { bidding_team, .. } => *bidding_team,
            RoundData::Ready(round) => Some(round.bidding_team),
        }
    }
}

/// Collected points are accepted anywhere from 0 to 180, or exactly 200.
pub fn valid_points(points: i32) -> bool {
    (0..=ROUND_POINTS).contains(&points) || points == ALL_TRICKS_POINTS
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    tag = "type",
    content = "value"
)]
pub enum RookAction {
    ToggleTeam(String),
    ConfirmTeams,
    SetBid(i32),
    SelectBiddingTeam(usize),
    FinalizeBid,
    SetCollectedPoints(i32),
    ConfirmScore,
    SetScoreboardVisible(bool),
    OpenEdit(usize),
    SaveEdit {
        bid: i32,
        bidding_team: usize,
        points: i32,
    },
    DismissEdit,
    EditPastRound {
        round_index: usize,
        bid: i32,
        bidding_team: usize,
        points: i32,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RookGame {
    pub players: Vec<Player>,
    // Team of every player id
    pub teams: HashMap<String, Team>,
    pub state: Phase,
    // Every round played so far, the last one is the round in progress
    pub rounds: Vec<RoundData>,
    pub scoreboard_visible: bool,
    // Completed round open in the edit dialog
    pub edit_target: Option<usize>,
}

impl RookGame {
    pub fn new(players: Vec<Player>) -> Result<Self, GameError> {
        validate_roster(GAME_NAME, &players, PLAYER_COUNT, PLAYER_COUNT)?;
        // First two seats start out as partners
        let teams = players
            .iter()
            .enumerate()
            .map(|(i, p)| {
                let team = if i < PLAYERS_PER_TEAM {
                    Team::Team1
                } else {
                    Team::Team2
                };
                (p.id.clone(), team)
            })
            .collect();
        Ok(Self {
            players,
            teams,
            ..Default::default()
        })
    }

    pub fn team_of(&self, player_id: &str) -> Result<Team, GameError> {
        self.teams
            .get(player_id)
            .copied()
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))
    }

    pub fn team_players(&self, team: Team) -> Vec<&Player> {
        self.players
            .iter()
            .filter(|p| self.teams.get(&p.id) == Some(&team))
            .collect()
    }

    pub fn can_confirm_teams(&self) -> bool {
        self.state == Phase::SelectTeams
            && self.teams.values().filter(|t| **t == Team::Team1).count() == PLAYERS_PER_TEAM
    }

    /// Rounds that count towards the score: everything but the round
    /// currently being bid or collected.
    pub fn finished_rounds(&self) -> Vec<ReadyRound> {
        let finished = self.rounds.len().saturating_sub(1);
        self.rounds[..finished]
            .iter()
            .filter_map(|round| match round {
                RoundData::Ready(ready) => Some(*ready),
                RoundData::SettingUp { .. } => None,
            })
            .collect()
    }

    pub fn team_score(&self, team: Team) -> i32 {
        self.finished_rounds().iter().map(|r| r.score(team)).sum()
    }

    pub fn current_round(&self) -> Option<&RoundData> {
        self.rounds.last()
    }

    pub fn can_finalize_bid(&self) -> bool {
        self.state == Phase::EnterBid
            && matches!(
                self.current_round(),
                Some(RoundData::SettingUp {
                    bidding_team: Some(_),
                    ..
                })
            )
    }

    pub fn can_confirm_score(&self) -> bool {
        self.state == Phase::CollectScore
            && matches!(
                self.current_round(),
                Some(RoundData::Ready(round)) if valid_points(round.bidding_team_points)
            )
    }

    pub fn toggle_team(&mut self, player_id: &str) -> Result<(), GameError> {
        let team = self.team_of(player_id)?;
        if self.state != Phase::SelectTeams {
            debug!(state = ?self.state, "ignoring team toggle");
            return Ok(());
        }
        self.teams.insert(player_id.to_string(), team.other());
        Ok(())
    }

    pub fn confirm_teams(&mut self) {
        if !self.can_confirm_teams() {
            debug!(state = ?self.state, "ignoring team confirmation");
            return;
        }
        self.start_new_round();
    }

    pub fn set_bid(&mut self, value: i32) {
        if self.state != Phase::EnterBid {
            debug!(state = ?self.state, "ignoring bid");
            return;
        }
        if let Some(RoundData::SettingUp { bid, .. }) = self.rounds.last_mut() {
            *bid = value.clamp(MIN_BID, MAX_BID);
        }
    }

    pub fn select_bidding_team(&mut self, team: Team) {
        if self.state != Phase::EnterBid {
            debug!(state = ?self.state, "ignoring bidding team");
            return;
        }
        if let Some(RoundData::SettingUp { bidding_team, .. }) = self.rounds.last_mut() {
            *bidding_team = Some(team);
        }
    }

    /// Locks in the bid. The bidding team's points start out at the bid.
    pub fn finalize_bid(&mut self) {
        if !self.can_finalize_bid() {
            debug!(state = ?self.state, "ignoring bid finalization");
            return;
        }
        if let Some(round) = self.rounds.last_mut() {
            if let RoundData::SettingUp {
                bid,
                bidding_team: Some(team),
            } = *round
            {
                *round = RoundData::Ready(ReadyRound {
                    bid,
                    bidding_team: team,
                    bidding_team_points: bid,
                });
                self.state = Phase::CollectScore;
                debug!(bid, team = ?team, "bid finalized");
            }
        }
    }

    pub fn set_collected_points(&mut self, value: i32) {
        if self.state != Phase::CollectScore {
            debug!(state = ?self.state, "ignoring collected points");
            return;
        }
        if let Some(RoundData::Ready(round)) = self.rounds.last_mut() {
            round.bidding_team_points = value.clamp(0, MAX_POINTS);
        }
    }

    pub fn confirm_score(&mut self) {
        if !self.can_confirm_score() {
            debug!(state = ?self.state, "ignoring score confirmation");
            return;
        }
        self.start_new_round();
        info!(
            round = self.rounds.len() - 1,
            team1 = self.team_score(Team::Team1),
            team2 = self.team_score(Team::Team2),
            "round scored"
        );
    }

    pub fn set_scoreboard_visible(&mut self, visible: bool) {
        self.scoreboard_visible = visible;
    }

    /// Replaces a completed round. Points outside the accepted range are
    /// refused and the round is left as it was.
    pub fn edit_past_round(
        &mut self,
        round_index: usize,
        bid: i32,
        bidding_team: Team,
        points: i32,
    ) -> Result<(), GameError> {
        if round_index >= self.finished_rounds().len() {
            return Err(GameError::UnknownRound(round_index));
        }
        if !valid_points(points) {
            warn!(round = round_index, points, "rejecting edit with invalid points");
            return Err(GameError::InvalidPoints(points));
        }
        self.rounds[round_index] = RoundData::Ready(ReadyRound {
            bid: bid.clamp(MIN_BID, MAX_BID),
            bidding_team,
            bidding_team_points: points,
        });
        debug!(round = round_index, bid, team = ?bidding_team, points, "round edited");
        Ok(())
    }

    pub fn open_edit(&mut self, round_index: usize) -> Result<(), GameError> {
        if round_index >= self.finished_rounds().len() {
            return Err(GameError::UnknownRound(round_index));
        }
        self.edit_target = Some(round_index);
        Ok(())
    }

    pub fn save_edit(&mut self, bid: i32, bidding_team: Team, points: i32) -> Result<(), GameError> {
        let Some(round_index) = self.edit_target else {
            debug!("ignoring save without an open edit");
            return Ok(());
        };
        self.edit_past_round(round_index, bid, bidding_team, points)?;
        self.edit_target = None;
        Ok(())
    }

    pub fn dismiss_edit(&mut self) {
        self.edit_target = None;
    }

    fn start_new_round(&mut self) {
        self.rounds.push(RoundData::SettingUp {
            bid: DEFAULT_BID,
            bidding_team: None,
        });
        self.state = Phase::EnterBid;
    }
}

fn team_from_index(index: usize) -> Result<Team, GameError> {
    Team::from_index(index).ok_or(GameError::UnknownTeam(index))
}

impl ScoreKeeper for RookGame {
    type Action = RookAction;
    type View = RookView;

    fn apply_action(&mut self, action: &RookAction) -> Result<(), GameError> {
        match action {
            RookAction::ToggleTeam(player_id) => return self.toggle_team(player_id),
            RookAction::ConfirmTeams => self.confirm_teams(),
            RookAction::SetBid(bid) => self.set_bid(*bid),
            RookAction::SelectBiddingTeam(index) => {
                self.select_bidding_team(team_from_index(*index)?)
            }
            RookAction::FinalizeBid => self.finalize_bid(),
            RookAction::SetCollectedPoints(points) => self.set_collected_points(*points),
            RookAction::ConfirmScore => self.confirm_score(),
            RookAction::SetScoreboardVisible(visible) => self.set_scoreboard_visible(*visible),
            RookAction::OpenEdit(round_index) => return self.open_edit(*round_index),
            RookAction::SaveEdit {
                bid,
                bidding_team,
                points,
            } => return self.save_edit(*bid, team_from_index(*bidding_team)?, *points),
            RookAction::DismissEdit => self.dismiss_edit(),
            RookAction::EditPastRound {
                round_index,
                bid,
                bidding_team,
                points,
            } => {
                return self.edit_past_round(
                    *round_index,
                    *bid,
                    team_from_index(*bidding_team)?,
                    *points,
                )
            }
        }
        Ok(())
    }

    fn available_actions(&self) -> Vec<RookAction> {
        let mut actions = vec![];
        match self.state {
            Phase::SelectTeams => {
                for player in self.players.iter() {
                    actions.push(RookAction::ToggleTeam(player.id.clone()));
                }
                if self.can_confirm_teams() {
                    actions.push(RookAction::ConfirmTeams);
                }
            }
            Phase::EnterBid => {
                for bid in (MIN_BID..=MAX_BID).step_by(POINT_STEP) {
                    actions.push(RookAction::SetBid(bid));
                }
                for index in 0..all::<Team>().count() {
                    actions.push(RookAction::SelectBiddingTeam(index));
                }
                if self.can_finalize_bid() {
                    actions.push(RookAction::FinalizeBid);
                }
            }
            Phase::CollectScore => {
                for points in (0..=MAX_POINTS).step_by(POINT_STEP) {
                    if valid_points(points) {
                        actions.push(RookAction::SetCollectedPoints(points));
                    }
                }
                if self.can_confirm_score() {
                    actions.push(RookAction::ConfirmScore);
                }
            }
        }
        actions
    }

    fn view(&self) -> RookView {
        RookView::from_game(self)
    }

    fn completed_rounds(&self) -> usize {
        self.finished_rounds().len()
    }

    fn is_finished(&self) -> bool {
        // Rook is played until the table decides to stop
        false
    }
}
