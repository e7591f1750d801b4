//! Re-labels a cleaned replay into one independent first-person episode
//! per participant, for RL training consumption.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::event::{interpret, Perspective, Side, StructuredEvent};
use crate::replay_data::CleanedReplay;

#[derive(Debug, Error)]
pub enum PovError {
    #[error("expected exactly 2 players, got {0}")]
    PlayerCount(usize),
}

/// Running battle-state tracker. Fields are placeholders for downstream
/// consumers; the projector itself does not fill them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GameState {
    pub my_team: BTreeMap<String, JsonValue>,
    pub opponent_team: BTreeMap<String, JsonValue>,
    pub my_active_pokemon: Option<String>,
    pub opponent_active_pokemon: Option<String>,
    pub field_conditions: BTreeMap<String, JsonValue>,
    pub weather: Option<String>,
    pub my_side_conditions: BTreeMap<String, JsonValue>,
    pub opponent_side_conditions: BTreeMap<String, JsonValue>,
    pub turn_number: u32,
}

/// One turn as seen by one participant. `observations` is the union of the
/// three buckets in original log order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnView {
    pub turn_number: u32,
    pub my_actions: Vec<StructuredEvent>,
    pub opponent_actions: Vec<StructuredEvent>,
    pub game_events: Vec<StructuredEvent>,
    pub observations: Vec<StructuredEvent>,
}

/// The full match history re-labeled relative to a single participant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FirstPersonEpisode {
    pub player_name: String,
    pub player_id: Side,
    pub opponent_name: String,
    pub opponent_id: Side,
    pub format: String,
    pub replay_id: String,
    pub pre_battle: Vec<StructuredEvent>,
    pub turns: BTreeMap<u32, TurnView>,
    pub game_state: GameState,
    pub observations: Vec<StructuredEvent>,
}

/// Project a cleaned replay into one first-person episode per participant.
///
/// Requires exactly two participants. The two episodes are computed
/// independently and share nothing.
pub fn project(replay: &CleanedReplay) -> Result<BTreeMap<String, FirstPersonEpisode>, PovError> {
    if replay.players.len() != 2 {
        return Err(PovError::PlayerCount(replay.players.len()));
    }

    let mut episodes = BTreeMap::new();

    for (index, name) in replay.players.iter().enumerate() {
        let viewer = if index == 0 { Side::P1 } else { Side::P2 };
        let opponent_name = replay.players[1 - index].clone();

        let pre_battle = replay
            .pre_battle
            .iter()
            .flatten()
            .map(|line| interpret(line, viewer))
            .collect();

        let turns = replay
            .turns
            .iter()
            .flatten()
            .map(|(&turn_number, lines)| (turn_number, project_turn(lines, viewer, turn_number)))
            .collect();

        episodes.insert(
            name.clone(),
            FirstPersonEpisode {
                player_name: name.clone(),
                player_id: viewer,
                opponent_name,
                opponent_id: viewer.opponent(),
                format: replay.format.clone(),
                replay_id: replay.id.clone(),
                pre_battle,
                turns,
                game_state: GameState::default(),
                observations: Vec::new(),
            },
        );
    }

    Ok(episodes)
}

/// Bucket one turn's events by perspective. Every event also lands once in
/// `observations`, preserving the original order.
fn project_turn(lines: &[String], viewer: Side, turn_number: u32) -> TurnView {
    let mut view = TurnView {
        turn_number,
        my_actions: Vec::new(),
        opponent_actions: Vec::new(),
        game_events: Vec::new(),
        observations: Vec::new(),
    };

    for line in lines {
        let event = interpret(line, viewer);
        match event.perspective {
            Perspective::Own => view.my_actions.push(event.clone()),
            Perspective::Opponent => view.opponent_actions.push(event.clone()),
            Perspective::Neutral => view.game_events.push(event.clone()),
        }
        view.observations.push(event);
    }

    view
}
