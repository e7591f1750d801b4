//! Runs filtering and turn segmentation over a raw replay record.

use crate::filter::filter_log;
use crate::replay_data::{CleanedReplay, RawReplay};
use crate::turns::segment;

/// Clean a raw replay record into the normalized turn-structured shape.
///
/// Identity fields are copied verbatim. When the record has no `log`, the
/// result carries identity fields only (`pre_battle`/`turns` omitted) —
/// the record is degraded, not rejected.
pub fn clean(raw: &RawReplay) -> CleanedReplay {
    let mut cleaned = CleanedReplay {
        id: raw.id.clone(),
        format: raw.format.clone(),
        players: raw.players.clone(),
        pre_battle: None,
        turns: None,
    };

    if let Some(log) = &raw.log {
        let filtered = filter_log(log);
        let turn_log = segment(&filtered);
        cleaned.pre_battle = Some(turn_log.pre_battle);
        cleaned.turns = Some(turn_log.turns);
    }

    cleaned
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(log: Option<&str>) -> RawReplay {
        RawReplay {
            id: "gen9ou-1001".to_string(),
            format: "[Gen 9] OU".to_string(),
            players: vec!["Alice".to_string(), "Bob".to_string()],
            log: log.map(str::to_string),
            rating: Some(1500),
        }
    }

    #[test]
    fn test_clean_full_record() {
        let record = raw(Some(
            "|player|p1|Alice|1\n|t:|123\n|turn|1\n|move|p1a: X|Tackle|p2a: Y",
        ));
        let cleaned = clean(&record);

        assert_eq!(cleaned.id, "gen9ou-1001");
        assert_eq!(cleaned.players, vec!["Alice", "Bob"]);
        assert_eq!(cleaned.pre_battle.as_deref(), Some(&["|player|p1|Alice|1".to_string()][..]));
        let turns = cleaned.turns.unwrap();
        assert_eq!(turns[&1], vec!["|move|p1a: X|Tackle|p2a: Y"]);
    }

    #[test]
    fn test_clean_without_log_keeps_identity_only() {
        let cleaned = clean(&raw(None));
        assert_eq!(cleaned.id, "gen9ou-1001");
        assert!(cleaned.pre_battle.is_none());
        assert!(cleaned.turns.is_none());
    }

    #[test]
    fn test_clean_is_idempotent() {
        let record = raw(Some("|turn|1\n|move|p1a: X|Tackle|p2a: Y"));
        assert_eq!(clean(&record), clean(&record));
    }

    #[test]
    fn test_turns_serialize_with_string_keys() {
        let record = raw(Some("|turn|1\n|move|p1a: X|Tackle|p2a: Y"));
        let json = serde_json::to_value(clean(&record)).unwrap();
        assert!(json["turns"]["1"].is_array());
    }
}
