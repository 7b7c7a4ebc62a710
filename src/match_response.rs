use serde::Deserialize;

/// Every ranked endpoint wraps its payload in `{"status": ..., "data": ...}`.
/// On failure `data` carries a message instead of the payload.
#[derive(Debug, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "lowercase")]
pub enum ApiResponse<T> {
    Success(T),
    Error(Option<String>),
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchData {
    pub id: u64,
    pub players: Vec<Player>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub forfeited: bool,
    #[serde(default)]
    pub vod: Vec<Vod>,
    #[serde(default)]
    pub completions: Vec<Completion>,
    #[serde(default)]
    pub timelines: Vec<Timeline>,
    pub date: i64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub uuid: String,
    pub nickname: String,
    #[serde(default)]
    pub elo_rate: Option<u32>,
    #[serde(default)]
    pub elo_rank: Option<u32>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchResult {
    pub uuid: Option<String>,
    pub time: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vod {
    pub uuid: String,
    pub url: String,
    pub starts_at: i64,
}

#[derive(Debug, Deserialize)]
pub struct Completion {
    pub uuid: String,
    pub time: u64,
}

#[derive(Debug, Deserialize)]
pub struct Timeline {
    pub uuid: String,
    pub time: u64,
    #[serde(rename = "type")]
    pub event_type: String,
}

impl MatchData {
    pub fn vod_for(&self, uuid: &str) -> Option<&Vod> {
        self.vod.iter().find(|vod| vod.uuid == uuid)
    }
}
