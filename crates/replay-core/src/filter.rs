//! Battle-log filtering — strips chat, timestamps, and UI noise from the
//! raw event stream while keeping everything battle-relevant.

/// Verdict for a single raw log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Recognized battle-relevant tag.
    Keep,
    /// Recognized noise tag, or not an event line at all.
    Drop,
    /// Pipe-prefixed line with an unrecognized tag. Kept conservatively so
    /// new upstream tags are not silently lost.
    PassThrough,
}

/// Tags that carry battle state and must survive filtering.
const KEEP_TAGS: &[&str] = &[
    "switch",          // Pokemon switches
    "move",            // Move usage
    "turn",            // Turn markers
    "-damage",         // Damage dealt
    "-heal",           // Healing
    "-supereffective", // Super effective hits
    "-resisted",       // Resisted hits
    "-immune",         // Immunity
    "faint",           // Fainting
    "-status",         // Status conditions
    "-ability",        // Ability activations
    "-enditem",        // Items being consumed
    "-item",           // Items being revealed
    "start",           // Battle start
    "player",          // Player information
    "teamsize",        // Team size
    "gen",             // Generation info
    "tier",            // Tier/format info
    "win",             // Winner info
    "drag",            // Forced switches
    "replace",         // Pokemon replacement
    "-activate",       // Ability/move activations
    "-weather",        // Weather changes
    "-fieldstart",     // Field effects starting
    "-fieldend",       // Field effects ending
    "-sidestart",      // Side effects starting
    "-sideend",        // Side effects ending
    "-crit",           // Critical hits
    "-miss",           // Missed moves
    "-fail",           // Failed moves
    "-prepare",        // Move preparation
    "-boost",          // Stat boosts
    "-unboost",        // Stat decreases
    "-clearallboost",  // Clear all stat changes
    "-mega",           // Mega evolutions
    "-primal",         // Primal reversions
    "-terastallize",   // Terastallizing
];

/// Tags that are never battle-relevant and are always removed.
const REMOVE_TAGS: &[&str] = &[
    "t:",            // Timestamps
    "c",             // Chat messages
    "j",             // Join messages
    "l",             // Leave messages
    "upkeep",        // Upkeep messages
    "",              // Empty pipes
    "gametype",      // Game type (already in format)
    "rated",         // Rated marker
    "rule",          // Rules (already in format)
    "inactive",      // Inactivity warnings
    "inactiveoff",   // Inactivity timer off
    "html",          // HTML messages
    "raw",           // Raw HTML messages
    "uhtml",         // User HTML
    "uhtmlchange",   // User HTML changes
    "clearpoke",     // Clear Pokemon
    "poke",          // Pokemon in team preview
    "request",       // Request data
    "error",         // Error messages
    "popup",         // Popup messages
    "queryresponse", // Query responses
    "spectator",     // Spectator count
    "choice",        // Choice information
];

/// Extract the event tag: the first pipe-delimited field after the leading
/// pipe. `None` when the line is not pipe-prefixed.
pub(crate) fn tag_of(line: &str) -> Option<&str> {
    let rest = line.strip_prefix('|')?;
    Some(rest.split('|').next().unwrap_or(""))
}

/// Classify one raw log line. Pure function of the line text.
pub fn classify(line: &str) -> Classification {
    if line.is_empty() {
        return Classification::Drop;
    }
    match tag_of(line) {
        Some(tag) if REMOVE_TAGS.contains(&tag) => Classification::Drop,
        Some(tag) if KEEP_TAGS.contains(&tag) => Classification::Keep,
        Some(_) => Classification::PassThrough,
        None => Classification::Drop,
    }
}

/// Filter a raw battle log down to battle-relevant lines, preserving order.
pub fn filter_log(raw_log: &str) -> Vec<String> {
    raw_log
        .lines()
        .filter(|line| classify(line) != Classification::Drop)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_keep_tags() {
        assert_eq!(classify("|move|p1a: Pikachu|Thunderbolt|p2a: Gyarados"), Classification::Keep);
        assert_eq!(classify("|switch|p2a: Gyarados|Gyarados, M|100/100"), Classification::Keep);
        assert_eq!(classify("|turn|3"), Classification::Keep);
        assert_eq!(classify("|-damage|p2a: Gyarados|42/100"), Classification::Keep);
        assert_eq!(classify("|win|Alice"), Classification::Keep);
    }

    #[test]
    fn test_classify_remove_tags() {
        assert_eq!(classify("|t:|1715300000"), Classification::Drop);
        assert_eq!(classify("|c|%Alice|gg"), Classification::Drop);
        assert_eq!(classify("|j| Bob"), Classification::Drop);
        assert_eq!(classify("|rule|Sleep Clause Mod: ..."), Classification::Drop);
        assert_eq!(classify("|upkeep"), Classification::Drop);
        assert_eq!(classify("||"), Classification::Drop);
        assert_eq!(classify(""), Classification::Drop);
    }

    #[test]
    fn test_classify_unknown_tag_passes_through() {
        assert_eq!(classify("|-zpower|p1a: Pikachu"), Classification::PassThrough);
        assert_eq!(classify("|someFutureTag|x|y"), Classification::PassThrough);
        // Not pipe-prefixed at all
        assert_eq!(classify("plain text"), Classification::Drop);
    }

    #[test]
    fn test_filter_log_preserves_order() {
        let log = "|t:|123\n|move|p1a: X|Tackle|p2a: Y\n\n|c|Alice|hi\n|-damage|p2a: Y|90/100\n|turn|1";
        let filtered = filter_log(log);
        assert_eq!(
            filtered,
            vec![
                "|move|p1a: X|Tackle|p2a: Y",
                "|-damage|p2a: Y|90/100",
                "|turn|1",
            ]
        );
    }
}
