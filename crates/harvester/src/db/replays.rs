use sqlx::PgPool;

use replay_core::replay_data::{CleanedReplay, RawReplay};

use crate::error::HarvesterError;

/// Numeric rating summary for persistence: the upstream record's own
/// rating field, 0 when missing or out of range. Re-parsing ratings out
/// of `pre_battle` player lines is deliberately avoided; the upstream
/// format for those trailing fields is unconfirmed.
pub fn rating_or_default(raw: &RawReplay) -> i32 {
    raw.rating
        .and_then(|r| i32::try_from(r).ok())
        .unwrap_or(0)
}

/// Insert a cleaned replay keyed by game id, serialized as JSON.
/// Duplicate ids are ignored. Returns whether a new row was written.
pub async fn insert_cleaned(
    pool: &PgPool,
    replay: &CleanedReplay,
    rating: i32,
) -> Result<bool, HarvesterError> {
    let json = serde_json::to_value(replay)?;

    let result = sqlx::query(
        r#"INSERT INTO replays (game_id, json, rating)
           VALUES ($1, $2, $3)
           ON CONFLICT (game_id) DO NOTHING"#,
    )
    .bind(&replay.id)
    .bind(json)
    .bind(rating)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_with_rating(rating: Option<i64>) -> RawReplay {
        RawReplay {
            id: "gen9ou-1".to_string(),
            format: "[Gen 9] OU".to_string(),
            players: vec!["Alice".to_string(), "Bob".to_string()],
            log: None,
            rating,
        }
    }

    #[test]
    fn test_rating_or_default() {
        assert_eq!(rating_or_default(&raw_with_rating(Some(1734))), 1734);
        assert_eq!(rating_or_default(&raw_with_rating(None)), 0);
        assert_eq!(rating_or_default(&raw_with_rating(Some(i64::MAX))), 0);
    }
}
