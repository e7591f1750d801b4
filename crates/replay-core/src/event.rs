//! Parses a filtered log line into a typed event labeled relative to one
//! viewer.

use serde::Serialize;

/// One of the two match slots. Index 0 of `players` is p1, index 1 is p2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Side {
    #[serde(rename = "p1")]
    P1,
    #[serde(rename = "p2")]
    P2,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::P1 => "p1",
            Side::P2 => "p2",
        }
    }

    pub fn opponent(&self) -> Side {
        match self {
            Side::P1 => Side::P2,
            Side::P2 => Side::P1,
        }
    }

    pub fn from_index(index: usize) -> Option<Side> {
        match index {
            0 => Some(Side::P1),
            1 => Some(Side::P2),
            _ => None,
        }
    }

    /// Side of a position token like `p1a: Charizard` or a bare `p2`.
    pub fn from_position(position: &str) -> Option<Side> {
        if position.starts_with("p1") {
            Some(Side::P1)
        } else if position.starts_with("p2") {
            Some(Side::P2)
        } else {
            None
        }
    }
}

/// Viewer-relative classification of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Perspective {
    #[serde(rename = "self")]
    Own,
    Opponent,
    Neutral,
}

/// Typed payload, one variant per action kind. `Raw` is the fallback for
/// unrecognized tags and malformed lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum EventData {
    Move {
        user: String,
        #[serde(rename = "move")]
        move_name: String,
        target: Option<String>,
        user_pokemon: Option<String>,
        target_pokemon: Option<String>,
    },
    Switch {
        position: String,
        pokemon_info: String,
        hp_info: Option<String>,
        pokemon_name: String,
    },
    Faint {
        position: String,
        pokemon_name: Option<String>,
    },
    Effect {
        target: String,
        target_pokemon: Option<String>,
        effect_details: Vec<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        new_hp: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        status_condition: Option<String>,
    },
    PlayerInfo {
        name: String,
        id: String,
    },
    TeamSize {
        team_size: u32,
    },
    Raw {
        raw: String,
    },
}

/// A filtered log line parsed and labeled for one viewer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StructuredEvent {
    #[serde(rename = "type")]
    pub event_type: String,
    pub perspective: Perspective,
    pub data: EventData,
}

impl StructuredEvent {
    fn raw(event_type: &str, line: &str) -> StructuredEvent {
        StructuredEvent {
            event_type: event_type.to_string(),
            perspective: Perspective::Neutral,
            data: EventData::Raw { raw: line.to_string() },
        }
    }
}

/// Pokemon display name from a position token: the substring after `": "`.
fn pokemon_name(position: &str) -> Option<String> {
    let (_, name) = position.split_once(": ")?;
    Some(name.trim().to_string())
}

/// Pokemon display name from a details string like `Charizard, L50, M`.
fn pokemon_name_from_info(info: &str) -> String {
    info.split(',').next().unwrap_or("").trim().to_string()
}

/// Perspective of the side owning `position`, as seen by `viewer`.
/// Positions with no recognizable side resolve to neutral.
fn perspective_of(position: &str, viewer: Side) -> Perspective {
    match Side::from_position(position) {
        Some(side) if side == viewer => Perspective::Own,
        Some(_) => Perspective::Opponent,
        None => Perspective::Neutral,
    }
}

/// Parse one filtered log line into a structured event for `viewer`.
///
/// Lines shorter than their handler expects degrade to a neutral `Raw`
/// payload instead of failing; the pipeline never aborts on a bad line.
pub fn interpret(line: &str, viewer: Side) -> StructuredEvent {
    if !line.starts_with('|') {
        return StructuredEvent::raw("unknown", line);
    }

    let parts: Vec<&str> = line.split('|').collect();
    let tag = parts.get(1).copied().unwrap_or("");

    match tag {
        "move" => interpret_move(&parts, viewer, line),
        "switch" | "drag" | "replace" => interpret_switch(tag, &parts, viewer, line),
        "faint" => interpret_faint(&parts, viewer, line),
        "player" => interpret_player(&parts, viewer, line),
        "teamsize" => interpret_teamsize(&parts, viewer, line),
        t if t.starts_with('-') => interpret_effect(t, &parts, viewer, line),
        "" => StructuredEvent::raw("unknown", line),
        other => StructuredEvent::raw(other, line),
    }
}

/// `|move|p1a: Charizard|Flamethrower|p2a: Blastoise`
fn interpret_move(parts: &[&str], viewer: Side, line: &str) -> StructuredEvent {
    if parts.len() < 4 {
        return StructuredEvent::raw("move", line);
    }
    let user = parts[2];
    let target = parts.get(4).copied();

    StructuredEvent {
        event_type: "move".to_string(),
        perspective: perspective_of(user, viewer),
        data: EventData::Move {
            user: user.to_string(),
            move_name: parts[3].to_string(),
            target: target.map(str::to_string),
            user_pokemon: pokemon_name(user),
            target_pokemon: target.and_then(pokemon_name),
        },
    }
}

/// `|switch|p1a: Charizard|Charizard, L50, M|100/100` (drag and replace
/// share the shape)
fn interpret_switch(tag: &str, parts: &[&str], viewer: Side, line: &str) -> StructuredEvent {
    if parts.len() < 4 {
        return StructuredEvent::raw(tag, line);
    }
    let position = parts[2];

    StructuredEvent {
        event_type: tag.to_string(),
        perspective: perspective_of(position, viewer),
        data: EventData::Switch {
            position: position.to_string(),
            pokemon_info: parts[3].to_string(),
            hp_info: parts.get(4).map(|s| s.to_string()),
            pokemon_name: pokemon_name_from_info(parts[3]),
        },
    }
}

/// `|faint|p1a: Charizard`
fn interpret_faint(parts: &[&str], viewer: Side, line: &str) -> StructuredEvent {
    if parts.len() < 3 {
        return StructuredEvent::raw("faint", line);
    }
    let position = parts[2];

    StructuredEvent {
        event_type: "faint".to_string(),
        perspective: perspective_of(position, viewer),
        data: EventData::Faint {
            position: position.to_string(),
            pokemon_name: pokemon_name(position),
        },
    }
}

/// `|player|p1|Alice|avatar|rating`
fn interpret_player(parts: &[&str], viewer: Side, line: &str) -> StructuredEvent {
    if parts.len() < 4 {
        return StructuredEvent::raw("player", line);
    }
    StructuredEvent {
        event_type: "player".to_string(),
        perspective: perspective_of(parts[2], viewer),
        data: EventData::PlayerInfo {
            name: parts[3].to_string(),
            id: parts[2].to_string(),
        },
    }
}

/// `|teamsize|p1|6`
fn interpret_teamsize(parts: &[&str], viewer: Side, line: &str) -> StructuredEvent {
    let team_size = match parts.get(3).and_then(|s| s.parse::<u32>().ok()) {
        Some(n) => n,
        None => return StructuredEvent::raw("teamsize", line),
    };
    StructuredEvent {
        event_type: "teamsize".to_string(),
        perspective: perspective_of(parts[2], viewer),
        data: EventData::TeamSize { team_size },
    }
}

/// Battle effects (`-damage`, `-heal`, `-status`, `-boost`, ...): the tag is
/// stored with the effect marker stripped, and damage/heal/status surface
/// their well-known extra field.
fn interpret_effect(tag: &str, parts: &[&str], viewer: Side, line: &str) -> StructuredEvent {
    let effect_type = &tag[1..];
    if parts.len() < 3 {
        return StructuredEvent::raw(effect_type, line);
    }
    let target = parts[2];
    let details: Vec<String> = parts[3..].iter().map(|s| s.to_string()).collect();

    let new_hp = match effect_type {
        "damage" | "heal" => details.first().cloned(),
        _ => None,
    };
    let status_condition = match effect_type {
        "status" => details.first().cloned(),
        _ => None,
    };

    StructuredEvent {
        event_type: effect_type.to_string(),
        perspective: perspective_of(target, viewer),
        data: EventData::Effect {
            target: target.to_string(),
            target_pokemon: pokemon_name(target),
            effect_details: details,
            new_hp,
            status_condition,
        },
    }
}
