use std::fmt;

pub const CLIP_PADDING_SECS: i64 = 30;

/// Renders a millisecond duration as `H:MM:SS`, or `M:SS` below one hour.
pub fn format_duration(ms: u64) -> String {
    let total_seconds = ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipWindow {
    pub start: String,
    pub end: String,
}

impl ClipWindow {
    /// `vod_starts_at` and `match_date` are epoch seconds; the match date is
    /// the moment the race ended, so the finish sits at `match_date - vod_starts_at`
    /// into the recording.
    pub fn compute(vod_starts_at: i64, match_date: i64, completion_ms: u64) -> ClipWindow {
        let end_ms = (match_date - vod_starts_at) * 1000;
        let start_ms = end_ms - completion_ms as i64;

        ClipWindow {
            start: format_offset(start_ms - CLIP_PADDING_SECS * 1000),
            end: format_offset(end_ms + CLIP_PADDING_SECS * 1000),
        }
    }
}

impl fmt::Display for ClipWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

fn format_offset(ms: i64) -> String {
    format_duration(ms.max(0) as u64)
}
