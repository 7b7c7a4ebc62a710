use serde::Deserialize;

use crate::match_response::MatchResult;

/// One prior match between the same two players. Only the outcome is kept.
#[derive(Debug, Deserialize)]
pub struct VersusMatch {
    pub id: u64,
    pub result: MatchResult,
}
