/*
Game: Mormon Bridge
An Oh Hell style bidding game. Each round every player bids the number of
tricks they will take; making your bid exactly scores 10 plus the bid,
missing it loses the same amount. Hand sizes follow a schedule chosen at
the start of the game.
*/

use std::collections::HashMap;

use enum_iterator::{all, Sequence};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::GameError;
use crate::player::{validate_roster, Player};
use crate::store::ScoreKeeper;
use crate::utils::{index_after, saturating_sum};

use super::view::MormonBridgeView;

pub const GAME_NAME: &str = "Mormon Bridge";
pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 8;
const MADE_BID_BONUS: i32 = 10;

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
pub enum Phase {
    #[default]
    SelectDealer,
    SelectRoundStyle,
    Bid,
    // Cards are being played, players are marked as made/missed afterwards
    Score,
    ShowScores,
}

#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, Sequence,
)]
#[serde(rename_all = "camelCase")]
pub enum RoundStyle {
    #[default]
    SevenDownAndUp,
    SevenDown,
    OddsDownEvensUp,
}

impl RoundStyle {
    pub fn from_index(index: usize) -> Option<RoundStyle> {
        all::<RoundStyle>().nth(index)
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            RoundStyle::SevenDownAndUp => "Seven Down & Up",
            RoundStyle::SevenDown => "Seven Down",
            RoundStyle::OddsDownEvensUp => "Seven Down (odds), Back Up (evens)",
        }
    }

    /// Cards dealt to each player, one entry per round.
    pub fn round_card_counts(&self) -> &'static [i32] {
        match self {
            RoundStyle::SevenDownAndUp => &[7, 6, 5, 4, 3, 2, 1, 2, 3, 4, 5, 6, 7],
            RoundStyle::SevenDown => &[7, 6, 5, 4, 3, 2, 1],
            RoundStyle::OddsDownEvensUp => &[7, 5, 3, 1, 2, 4, 6],
        }
    }

    pub fn last_round_index(&self) -> usize {
        self.round_card_counts().len() - 1
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct PlayerRoundResult {
    pub bid: i32,
    pub made_bid: bool,
}

impl Default for PlayerRoundResult {
    fn default() -> Self {
        Self {
            bid: 0,
            made_bid: true,
        }
    }
}

impl PlayerRoundResult {
    pub fn score(&self) -> i32 {
        let points = MADE_BID_BONUS.saturating_add(self.bid);
        if self.made_bid {
            points
        } else {
            points.saturating_neg()
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct EditTarget {
    pub player_id: String,
    pub round_index: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(
    rename_all = "camelCase",
    rename_all_fields = "camelCase",
    tag = "type",
    content = "value"
)]
pub enum MormonBridgeAction {
    SelectDealer(String),
    SelectRoundStyle(usize),
    IncreaseBid(String),
    DecreaseBid(String),
    AdjustBid { player_id: String, delta: i32 },
    StartRound,
    ToggleMadeBid(String),
    ScoreRound,
    NextRound,
    SetScoreboardVisible(bool),
    OpenEdit(EditTarget),
    SaveEdit { bid: i32, made_bid: bool },
    DismissEdit,
    EditPastRound {
        player_id: String,
        round_index: usize,
        bid: i32,
        made_bid: bool,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MormonBridgeGame {
    // Seating order around the table
    pub players: Vec<Player>,
    pub round_style: RoundStyle,
    // Index into players of the current dealer
    pub dealer: usize,
    // Index into the round style's card counts
    pub round: usize,
    pub state: Phase,
    // One entry per started round for every player, the last is the current round
    pub results: HashMap<String, Vec<PlayerRoundResult>>,
    pub scoreboard_visible: bool,
    pub edit_target: Option<EditTarget>,
}

impl MormonBridgeGame {
    pub fn new(players: Vec<Player>) -> Result<Self, GameError> {
        validate_roster(GAME_NAME, &players, MIN_PLAYERS, MAX_PLAYERS)?;
        let results = players
            .iter()
            .map(|player| (player.id.clone(), vec![]))
            .collect();
        Ok(Self {
            players,
            results,
            ..Default::default()
        })
    }

    pub fn current_round_card_count(&self) -> i32 {
        self.round_style.round_card_counts()[self.round]
    }

    pub fn has_next_round(&self) -> bool {
        self.round < self.round_style.last_round_index()
    }

    pub fn is_game_over(&self) -> bool {
        self.state == Phase::ShowScores && !self.has_next_round()
    }

    /// Player to the dealer's left bids first.
    pub fn first_bidder(&self) -> usize {
        index_after(self.dealer, self.players.len())
    }

    pub fn player_index(&self, player_id: &str) -> Result<usize, GameError> {
        self.players
            .iter()
            .position(|p| p.id == player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))
    }

    pub fn player_results(&self, player_id: &str) -> Result<&[PlayerRoundResult], GameError> {
        self.results
            .get(player_id)
            .map(|results| results.as_slice())
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))
    }

    pub fn current_result(&self, player_id: &str) -> Result<Option<PlayerRoundResult>, GameError> {
        Ok(self.player_results(player_id)?.last().copied())
    }

    pub fn total_bid(&self) -> i32 {
        saturating_sum(
            self.players
                .iter()
                .filter_map(|p| self.results.get(&p.id).and_then(|r| r.last()))
                .map(|r| r.bid),
        )
    }

    pub fn can_start_round(&self) -> bool {
        self.state == Phase::Bid && self.total_bid() == self.current_round_card_count()
    }

    /// Whether the last round is still being bid or played and so does not
    /// count towards totals yet.
    pub fn round_in_progress(&self) -> bool {
        self.state <= Phase::Score
    }

    /// Sum of every finished round for a player.
    pub fn cumulative_score(&self, player_id: &str) -> Result<i32, GameError> {
        let results = self.player_results(player_id)?;
        let finished = if self.round_in_progress() {
            &results[..results.len().saturating_sub(1)]
        } else {
            results
        };
        Ok(saturating_sum(finished.iter().map(|r| r.score())))
    }

    pub fn select_dealer(&mut self, player_id: &str) -> Result<(), GameError> {
        let dealer = self.player_index(player_id)?;
        if self.state != Phase::SelectDealer {
            debug!(state = ?self.state, "ignoring dealer selection");
            return Ok(());
        }
        self.dealer = dealer;
        self.state = Phase::SelectRoundStyle;
        debug!(dealer = %player_id, "dealer selected");
        Ok(())
    }

    pub fn select_round_style(&mut self, index: usize) -> Result<(), GameError> {
        let round_style = RoundStyle::from_index(index).ok_or(GameError::UnknownRoundStyle(index))?;
        if self.state != Phase::SelectRoundStyle {
            debug!(state = ?self.state, "ignoring round style selection");
            return Ok(());
        }
        self.round_style = round_style;
        self.round = 0;
        self.add_new_round();
        self.state = Phase::Bid;
        info!(
            style = round_style.display_text(),
            rounds = round_style.round_card_counts().len(),
            "game started"
        );
        Ok(())
    }

    /// Moves a player's bid for the current round by `delta`, kept within
    /// zero and the number of cards dealt this round.
    pub fn adjust_bid(&mut self, player_id: &str, delta: i32) -> Result<(), GameError> {
        self.player_index(player_id)?;
        if self.state != Phase::Bid {
            debug!(state = ?self.state, "ignoring bid adjustment");
            return Ok(());
        }
        let max_bid = self.current_round_card_count();
        self.update_current_result(player_id, |result| {
            result.bid = result.bid.saturating_add(delta).clamp(0, max_bid);
        })
    }

    pub fn increase_bid(&mut self, player_id: &str) -> Result<(), GameError> {
        self.adjust_bid(player_id, 1)
    }

    pub fn decrease_bid(&mut self, player_id: &str) -> Result<(), GameError> {
        self.adjust_bid(player_id, -1)
    }

    pub fn start_round(&mut self) {
        if !self.can_start_round() {
            debug!(
                state = ?self.state,
                total_bid = self.total_bid(),
                "ignoring start round"
            );
            return;
        }
        self.state = Phase::Score;
    }

    pub fn toggle_made_bid(&mut self, player_id: &str) -> Result<(), GameError> {
        self.player_index(player_id)?;
        if self.state != Phase::Score {
            debug!(state = ?self.state, "ignoring made bid toggle");
            return Ok(());
        }
        self.update_current_result(player_id, |result| result.made_bid = !result.made_bid)
    }

    pub fn score_round(&mut self) {
        if self.state != Phase::Score {
            debug!(state = ?self.state, "ignoring score round");
            return;
        }
        self.state = Phase::ShowScores;
        info!(round = self.round + 1, "round scored");
    }

    pub fn next_round(&mut self) {
        if self.state != Phase::ShowScores || !self.has_next_round() {
            debug!(state = ?self.state, round = self.round, "ignoring next round");
            return;
        }
        self.dealer = index_after(self.dealer, self.players.len());
        self.add_new_round();
        self.round += 1;
        self.state = Phase::Bid;
        info!(
            round = self.round + 1,
            cards = self.current_round_card_count(),
            "round started"
        );
    }

    pub fn set_scoreboard_visible(&mut self, visible: bool) {
        self.scoreboard_visible = visible;
    }

    /// Overwrites any started round for a player. Only negative bids are
    /// corrected; the round's card count is not enforced.
    pub fn edit_past_round(
        &mut self,
        player_id: &str,
        round_index: usize,
        bid: i32,
        made_bid: bool,
    ) -> Result<(), GameError> {
        let results = self
            .results
            .get_mut(player_id)
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))?;
        let result = results
            .get_mut(round_index)
            .ok_or(GameError::UnknownRound(round_index))?;
        *result = PlayerRoundResult {
            bid: bid.max(0),
            made_bid,
        };
        debug!(player = %player_id, round = round_index, bid, made_bid, "round edited");
        Ok(())
    }

    pub fn open_edit(&mut self, player_id: &str, round_index: usize) -> Result<(), GameError> {
        if round_index >= self.player_results(player_id)?.len() {
            return Err(GameError::UnknownRound(round_index));
        }
        self.edit_target = Some(EditTarget {
            player_id: player_id.to_string(),
            round_index,
        });
        Ok(())
    }

    pub fn save_edit(&mut self, bid: i32, made_bid: bool) -> Result<(), GameError> {
        let Some(target) = self.edit_target.clone() else {
            debug!("ignoring save without an open edit");
            return Ok(());
        };
        self.edit_past_round(&target.player_id, target.round_index, bid, made_bid)?;
        self.edit_target = None;
        Ok(())
    }

    pub fn dismiss_edit(&mut self) {
        self.edit_target = None;
    }

    fn add_new_round(&mut self) {
        for player in self.players.iter() {
            self.results
                .entry(player.id.clone())
                .or_default()
                .push(PlayerRoundResult::default());
        }
    }

    fn update_current_result(
        &mut self,
        player_id: &str,
        update: impl FnOnce(&mut PlayerRoundResult),
    ) -> Result<(), GameError> {
        let result = self
            .results
            .get_mut(player_id)
            .and_then(|results| results.last_mut())
            .ok_or_else(|| GameError::UnknownPlayer(player_id.to_string()))?;
        update(result);
        Ok(())
    }
}

impl ScoreKeeper for MormonBridgeGame {
    type Action = MormonBridgeAction;
    type View = MormonBridgeView;

    fn apply_action(&mut self, action: &MormonBridgeAction) -> Result<(), GameError> {
        match action {
            MormonBridgeAction::SelectDealer(player_id) => self.select_dealer(player_id),
            MormonBridgeAction::SelectRoundStyle(index) => self.select_round_style(*index),
            MormonBridgeAction::IncreaseBid(player_id) => self.increase_bid(player_id),
            MormonBridgeAction::DecreaseBid(player_id) => self.decrease_bid(player_id),
            MormonBridgeAction::AdjustBid { player_id, delta } => {
                self.adjust_bid(player_id, *delta)
            }
            MormonBridgeAction::StartRound => {
                self.start_round();
                Ok(())
            }
            MormonBridgeAction::ToggleMadeBid(player_id) => self.toggle_made_bid(player_id),
            MormonBridgeAction::ScoreRound => {
                self.score_round();
                Ok(())
            }
            MormonBridgeAction::NextRound => {
                self.next_round();
                Ok(())
            }
            MormonBridgeAction::SetScoreboardVisible(visible) => {
                self.set_scoreboard_visible(*visible);
                Ok(())
            }
            MormonBridgeAction::OpenEdit(target) => {
                self.open_edit(&target.player_id, target.round_index)
            }
            MormonBridgeAction::SaveEdit { bid, made_bid } => self.save_edit(*bid, *made_bid),
            MormonBridgeAction::DismissEdit => {
                self.dismiss_edit();
                Ok(())
            }
            MormonBridgeAction::EditPastRound {
                player_id,
                round_index,
                bid,
                made_bid,
            } => self.edit_past_round(player_id, *round_index, *bid, *made_bid),
        }
    }

    fn available_actions(&self) -> Vec<MormonBridgeAction> {
        match self.state {
            Phase::SelectDealer => self
                .players
                .iter()
                .map(|p| MormonBridgeAction::SelectDealer(p.id.clone()))
                .collect(),
            Phase::SelectRoundStyle => (0..all::<RoundStyle>().count())
                .map(MormonBridgeAction::SelectRoundStyle)
                .collect(),
            Phase::Bid => {
                let max_bid = self.current_round_card_count();
                let mut actions = vec![];
                for player in self.players.iter() {
                    let bid = self
                        .results
                        .get(&player.id)
                        .and_then(|r| r.last())
                        .map(|r| r.bid)
                        .unwrap_or(0);
                    if bid < max_bid {
                        actions.push(MormonBridgeAction::IncreaseBid(player.id.clone()));
                    }
                    if bid > 0 {
                        actions.push(MormonBridgeAction::DecreaseBid(player.id.clone()));
                    }
                }
                if self.can_start_round() {
                    actions.push(MormonBridgeAction::StartRound);
                }
                actions
            }
            Phase::Score => {
                let mut actions: Vec<MormonBridgeAction> = self
                    .players
                    .iter()
                    .map(|p| MormonBridgeAction::ToggleMadeBid(p.id.clone()))
                    .collect();
                actions.push(MormonBridgeAction::ScoreRound);
                actions
            }
            Phase::ShowScores => {
                if self.has_next_round() {
                    vec![MormonBridgeAction::NextRound]
                } else {
                    vec![]
                }
            }
        }
    }

    fn view(&self) -> MormonBridgeView {
        MormonBridgeView::from_game(self)
    }

    fn completed_rounds(&self) -> usize {
        let started = self
            .players
            .first()
            .and_then(|p| self.results.get(&p.id))
            .map(|r| r.len())
            .unwrap_or(0);
        if self.round_in_progress() {
            started.saturating_sub(1)
        } else {
            started
        }
    }

    fn is_finished(&self) -> bool {
        self.is_game_over()
    }
}
