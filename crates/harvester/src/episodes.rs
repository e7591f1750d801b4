//! First-person episode file output for downstream training consumers.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use replay_core::pov::FirstPersonEpisode;

use crate::error::HarvesterError;

/// File name for one participant's episode.
pub fn episode_filename(replay_id: &str, player_name: &str) -> String {
    format!("{replay_id}_{player_name}_fp.json")
}

/// Write every episode to `output_dir`, one pretty-printed JSON file per
/// participant. The directory is created on demand. Returns the written
/// paths.
pub fn write_episodes(
    output_dir: &Path,
    episodes: &BTreeMap<String, FirstPersonEpisode>,
) -> Result<Vec<PathBuf>, HarvesterError> {
    fs::create_dir_all(output_dir)?;

    let mut written = Vec::with_capacity(episodes.len());
    for (player_name, episode) in episodes {
        let path = output_dir.join(episode_filename(&episode.replay_id, player_name));
        fs::write(&path, serde_json::to_string_pretty(episode)?)?;
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::{SystemTime, UNIX_EPOCH};

    use replay_core::{cleaner, pov};
    use replay_core::replay_data::RawReplay;

    #[test]
    fn test_episode_filename() {
        assert_eq!(episode_filename("gen9ou-42", "Alice"), "gen9ou-42_Alice_fp.json");
    }

    #[test]
    fn test_write_episodes_round_trip_on_disk() {
        let raw = RawReplay {
            id: "gen9ou-42".to_string(),
            format: "[Gen 9] OU".to_string(),
            players: vec!["Alice".to_string(), "Bob".to_string()],
            log: Some("|player|p1|Alice|1\n|turn|1\n|move|p1a: X|Tackle|p2a: Y".to_string()),
            rating: None,
        };
        let episodes = pov::project(&cleaner::clean(&raw)).unwrap();

        let nanos = SystemTime::now().duration_since(UNIX_EPOCH).unwrap().as_nanos();
        let dir = std::env::temp_dir().join(format!("harvester-test-{nanos}"));

        let written = write_episodes(&dir, &episodes).unwrap();
        assert_eq!(written.len(), 2);
        assert!(written.iter().any(|p| p.ends_with("gen9ou-42_Alice_fp.json")));

        let contents = fs::read_to_string(&written[0]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["replay_id"], "gen9ou-42");

        fs::remove_dir_all(&dir).unwrap();
    }
}
