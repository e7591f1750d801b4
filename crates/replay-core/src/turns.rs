//! Partitions a filtered event stream into a pre-battle preamble and
//! per-turn event buckets.

use std::collections::BTreeMap;

use regex::Regex;

use crate::filter::tag_of;

/// Tags that belong to the pre-battle preamble when they occur before the
/// first turn marker. Position decides, not the tag alone: the same tags
/// appearing mid-battle stay in their turn.
const PRE_BATTLE_TAGS: &[&str] = &["start", "player", "teamsize", "gen", "tier"];

/// Result of segmenting a filtered log.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnLog {
    pub pre_battle: Vec<String>,
    pub turns: BTreeMap<u32, Vec<String>>,
}

/// Partition filtered events by turn.
///
/// Events before the first `|turn|N` marker go to `pre_battle` when they
/// carry a pre-battle tag, otherwise to turn 0. Malformed turn markers
/// (non-numeric) are treated as ordinary in-turn events.
pub fn segment<S: AsRef<str>>(events: &[S]) -> TurnLog {
    let marker_re = Regex::new(r"^\|turn\|(\d+)$").unwrap();

    let mut pre_battle: Vec<String> = Vec::new();
    let mut turns: BTreeMap<u32, Vec<String>> = BTreeMap::new();
    let mut current_turn: u32 = 0;
    let mut turn_opened = false;

    for event in events {
        let line = event.as_ref();

        let marker = marker_re
            .captures(line)
            .and_then(|cap| cap.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok());

        if let Some(n) = marker {
            current_turn = n;
            turn_opened = true;
            turns.entry(n).or_default();
        } else if !turn_opened && tag_of(line).is_some_and(|t| PRE_BATTLE_TAGS.contains(&t)) {
            pre_battle.push(line.to_string());
        } else {
            turns.entry(current_turn).or_default().push(line.to_string());
        }
    }

    TurnLog { pre_battle, turns }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_basic() {
        let events = vec![
            "|player|p1|Alice|1",
            "|player|p2|Bob|2",
            "|start",
            "|turn|1",
            "|move|p1a: X|Tackle|p2a: Y",
            "|turn|2",
            "|switch|p2a: Z|Z, M|100/100",
        ];
        let log = segment(&events);

        assert_eq!(log.pre_battle, vec!["|player|p1|Alice|1", "|player|p2|Bob|2", "|start"]);
        assert_eq!(log.turns[&1], vec!["|move|p1a: X|Tackle|p2a: Y"]);
        assert_eq!(log.turns[&2], vec!["|switch|p2a: Z|Z, M|100/100"]);
    }

    #[test]
    fn test_pre_turn_events_land_in_turn_zero() {
        let events = vec!["|move|p1a: X|Y|p2a: Z", "|turn|1"];
        let log = segment(&events);

        assert!(log.pre_battle.is_empty());
        assert_eq!(log.turns[&0], vec!["|move|p1a: X|Y|p2a: Z"]);
        assert_eq!(log.turns[&1], Vec::<String>::new());
    }

    #[test]
    fn test_pre_battle_tags_after_first_turn_stay_in_turn() {
        let events = vec!["|gen|9", "|turn|1", "|tier|[Gen 9] OU"];
        let log = segment(&events);

        assert_eq!(log.pre_battle, vec!["|gen|9"]);
        assert_eq!(log.turns[&1], vec!["|tier|[Gen 9] OU"]);
    }

    #[test]
    fn test_malformed_turn_marker_is_an_ordinary_event() {
        let events = vec!["|turn|1", "|turn|x", "|turn|2"];
        let log = segment(&events);

        assert_eq!(log.turns[&1], vec!["|turn|x"]);
        assert_eq!(log.turns[&2], Vec::<String>::new());
    }

    #[test]
    fn test_partition_is_complete() {
        let events = vec![
            "|player|p1|Alice|1",
            "|move|p1a: X|Y|p2a: Z",
            "|turn|1",
            "|-damage|p2a: Z|50/100",
            "|faint|p2a: Z",
            "|turn|2",
            "|win|Alice",
        ];
        let log = segment(&events);

        let mut reassembled: Vec<String> = log.pre_battle.clone();
        for lines in log.turns.values() {
            reassembled.extend(lines.iter().cloned());
        }
        let originals: Vec<String> = events
            .iter()
            .filter(|l| !l.starts_with("|turn|"))
            .map(|l| l.to_string())
            .collect();
        assert_eq!(reassembled, originals);
    }
}
