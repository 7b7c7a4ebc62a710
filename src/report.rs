use anyhow::{anyhow, Result};
use chrono::{DateTime, TimeZone};
use log::warn;
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt::Display;

use crate::match_response::Player;
use crate::splits::{SplitTable, Splits};
use crate::timefmt::format_duration;
use crate::versus_response::VersusMatch;

pub const RECENT_MATCHES: usize = 5;

const DRAW: &str = "Draw";
const UNKNOWN: &str = "?";

/// A two-entry map keyed by upper-cased nickname, serialized in roster order.
#[derive(Debug, Clone, PartialEq)]
pub struct ByPlayer<T>(pub [(String, T); 2]);

impl<T> ByPlayer<T> {
    fn from_roster(roster: &[Player; 2], mut value: impl FnMut(&Player) -> T) -> ByPlayer<T> {
        ByPlayer([
            (roster[0].nickname.to_uppercase(), value(&roster[0])),
            (roster[1].nickname.to_uppercase(), value(&roster[1])),
        ])
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.0.iter().find(|(name, _)| name == key).map(|(_, v)| v)
    }
}

impl<T: Serialize> Serialize for ByPlayer<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSummary {
    pub elo: Option<u32>,
    pub leaderboard: Option<u32>,
    pub formatted: String,
}

impl PlayerSummary {
    fn new(player: &Player) -> PlayerSummary {
        PlayerSummary {
            elo: player.elo_rate,
            leaderboard: player.elo_rank,
            formatted: format!(
                "#{} – {}",
                or_unknown(player.elo_rank),
                or_unknown(player.elo_rate)
            ),
        }
    }
}

fn or_unknown(value: Option<u32>) -> String {
    value.map_or_else(|| UNKNOWN.to_owned(), |value| value.to_string())
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SplitSection {
    pub named: ByPlayer<SplitTable>,
    pub flat: ByPlayer<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecentMatch {
    pub winner: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub date: String,
    pub players: ByPlayer<PlayerSummary>,
    pub splits: SplitSection,
    pub matches: Vec<RecentMatch>,
    #[serde(rename = "matchesFormatted")]
    pub matches_formatted: String,
}

impl Report {
    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}

/// `January 1, 2024`
pub fn format_match_date<Tz: TimeZone>(date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    date.format("%B %-d, %Y").to_string()
}

pub fn build_report<Tz: TimeZone>(
    roster: &[Player; 2],
    date: &DateTime<Tz>,
    splits: &Splits,
    history: &[VersusMatch],
) -> Result<Report>
where
    Tz::Offset: Display,
{
    let table = |player: &Player| {
        splits
            .for_player(&player.uuid)
            .cloned()
            .unwrap_or_default()
    };

    let named = ByPlayer::from_roster(roster, &table);
    let flat = ByPlayer::from_roster(roster, |player| table(player).flatten());

    let matches = recent_matches(roster, history)?;
    let matches_formatted = matches
        .iter()
        .map(|m| format!("{} {}", m.winner.to_uppercase(), m.time))
        .collect::<Vec<_>>()
        .join("\n");

    Ok(Report {
        date: format_match_date(date),
        players: ByPlayer::from_roster(roster, PlayerSummary::new),
        splits: SplitSection { named, flat },
        matches,
        matches_formatted,
    })
}

fn recent_matches(roster: &[Player; 2], history: &[VersusMatch]) -> Result<Vec<RecentMatch>> {
    history
        .iter()
        .take(RECENT_MATCHES)
        .map(|versus| {
            let winner = match &versus.result.uuid {
                Some(uuid) => roster
                    .iter()
                    .find(|player| &player.uuid == uuid)
                    .map(|player| player.nickname.clone())
                    .ok_or_else(|| anyhow!("match {} won by unknown player {}", versus.id, uuid))?,
                None => {
                    warn!("match {} ended without a winner", versus.id);
                    DRAW.to_owned()
                }
            };

            Ok(RecentMatch {
                winner,
                time: format_duration(versus.result.time),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::match_response::{Completion, MatchData, MatchResult, Timeline};
    use crate::splits::extract_splits;
    use chrono::Utc;

    fn roster() -> [Player; 2] {
        [
            Player {
                uuid: "a".to_owned(),
                nickname: "Alice".to_owned(),
                elo_rate: Some(2500),
                elo_rank: Some(3),
            },
            Player {
                uuid: "b".to_owned(),
                nickname: "Bob".to_owned(),
                elo_rate: Some(2400),
                elo_rank: Some(7),
            },
        ]
    }

    fn versus(id: u64, winner: Option<&str>, time: u64) -> VersusMatch {
        VersusMatch {
            id,
            result: MatchResult {
                uuid: winner.map(str::to_owned),
                time,
            },
        }
    }

    fn splits() -> Splits {
        let data = MatchData {
            id: 9,
            players: roster().to_vec(),
            result: None,
            forfeited: false,
            vod: Vec::new(),
            completions: vec![Completion {
                uuid: "a".to_owned(),
                time: 125_000,
            }],
            timelines: vec![Timeline {
                uuid: "b".to_owned(),
                time: 61_000,
                event_type: "story.enter_the_nether".to_owned(),
            }],
            date: 1_704_110_400,
        };
        extract_splits(&data, &roster()).unwrap()
    }

    fn date() -> DateTime<Utc> {
        Utc.timestamp_opt(1_704_110_400, 0).unwrap()
    }

    #[test]
    fn summarises_players_and_splits() {
        let report = build_report(&roster(), &date(), &splits(), &[]).unwrap();

        assert_eq!(report.date, "January 1, 2024");
        let alice = report.players.get("ALICE").unwrap();
        assert_eq!(alice.elo, Some(2500));
        assert_eq!(alice.leaderboard, Some(3));
        assert_eq!(alice.formatted, "#3 – 2500");
        assert_eq!(report.players.get("BOB").unwrap().formatted, "#7 – 2400");
        assert_eq!(report.splits.flat.get("ALICE").unwrap(), "2:05");
        assert_eq!(report.splits.flat.get("BOB").unwrap(), "1:01");
        assert!(report.matches.is_empty());
        assert_eq!(report.matches_formatted, "");
    }

    #[test]
    fn keeps_five_most_recent_matches_in_order() {
        let history: Vec<_> = (0..8)
            .map(|i| versus(100 - i, Some(if i % 2 == 0 { "a" } else { "b" }), 600_000 + i * 1_000))
            .collect();

        let report = build_report(&roster(), &date(), &splits(), &history).unwrap();

        assert_eq!(report.matches.len(), RECENT_MATCHES);
        assert_eq!(report.matches[0].winner, "Alice");
        assert_eq!(report.matches[1].winner, "Bob");
        assert_eq!(report.matches[4].time, "10:04");
        assert_eq!(
            report.matches_formatted,
            "ALICE 10:00\nBOB 10:01\nALICE 10:02\nBOB 10:03\nALICE 10:04"
        );
    }

    #[test]
    fn unrated_player_keeps_null_elo() {
        let mut roster = roster();
        roster[1].elo_rate = None;
        roster[1].elo_rank = None;

        let report = build_report(&roster, &date(), &splits(), &[]).unwrap();
        let bob = report.players.get("BOB").unwrap();
        assert_eq!(bob.elo, None);
        assert_eq!(bob.leaderboard, None);
        assert_eq!(bob.formatted, "#? – ?");

        let value: serde_yaml::Value = serde_yaml::from_str(&report.to_yaml().unwrap()).unwrap();
        assert!(value["players"]["BOB"]["elo"].is_null());
        assert!(value["players"]["BOB"]["leaderboard"].is_null());
        assert_eq!(value["players"]["ALICE"]["elo"].as_u64(), Some(2500));
    }

    #[test]
    fn draws_are_named() {
        let history = vec![versus(1, None, 0)];
        let report = build_report(&roster(), &date(), &splits(), &history).unwrap();

        assert_eq!(report.matches_formatted, "DRAW 0:00");
    }

    #[test]
    fn unknown_winner_is_rejected() {
        let history = vec![versus(1, Some("z"), 0)];
        assert!(build_report(&roster(), &date(), &splits(), &history).is_err());
    }

    #[test]
    fn yaml_is_deterministic_and_ordered() {
        let history = vec![versus(1, Some("b"), 700_000)];
        let first = build_report(&roster(), &date(), &splits(), &history)
            .unwrap()
            .to_yaml()
            .unwrap();
        let second = build_report(&roster(), &date(), &splits(), &history)
            .unwrap()
            .to_yaml()
            .unwrap();
        assert_eq!(first, second);

        let value: serde_yaml::Value = serde_yaml::from_str(&first).unwrap();
        let top: Vec<_> = value
            .as_mapping()
            .unwrap()
            .keys()
            .map(|key| key.as_str().unwrap())
            .collect();
        assert_eq!(top, vec!["date", "players", "splits", "matches", "matchesFormatted"]);

        let players: Vec<_> = value["players"]
            .as_mapping()
            .unwrap()
            .keys()
            .map(|key| key.as_str().unwrap())
            .collect();
        assert_eq!(players, vec!["ALICE", "BOB"]);
        assert_eq!(value["players"]["ALICE"]["formatted"].as_str(), Some("#3 – 2500"));
        assert_eq!(value["splits"]["named"]["BOB"]["Enter Nether"].as_str(), Some("1:01"));
        assert_eq!(value["matches"][0]["winner"].as_str(), Some("Bob"));
    }
}
