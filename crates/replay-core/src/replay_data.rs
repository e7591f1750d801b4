use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Replay record as served by the upstream replay host.
/// Only the fields the pipeline reads; everything else is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawReplay {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub players: Vec<String>,
    /// Newline-delimited event log. Absent in truncated/partial records.
    #[serde(default)]
    pub log: Option<String>,
    /// Room rating at upload time. Upstream sometimes omits it or sends null.
    #[serde(default)]
    pub rating: Option<i64>,
}

/// A replay with chat/UI noise stripped and events grouped by turn.
///
/// `turns` is a BTreeMap so JSON output keys by stringified turn number in
/// ascending order. `pre_battle`/`turns` are omitted entirely when the
/// source record had no `log` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CleanedReplay {
    pub id: String,
    pub format: String,
    pub players: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre_battle: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turns: Option<BTreeMap<u32, Vec<String>>>,
}
