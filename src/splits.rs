use anyhow::{anyhow, Result};
use log::debug;
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::match_response::{MatchData, Player};
use crate::timefmt::format_duration;

pub const COMPLETION_LABEL: &str = "Completion";

/// Timeline events worth a split, in display order.
pub static EVENT_LABELS: [(&str, &str); 6] = [
    ("story.enter_the_nether", "Enter Nether"),
    ("nether.find_bastion", "Find Bastion"),
    ("nether.find_fortress", "Find Fortress"),
    ("projectelo.timeline.blind_travel", "Blind"),
    ("story.follow_ender_eye", "Follow Ender Eye"),
    ("story.enter_the_end", "Enter End"),
];

pub fn event_label(event_type: &str) -> Option<&'static str> {
    EVENT_LABELS
        .iter()
        .find(|(kind, _)| *kind == event_type)
        .map(|(_, label)| *label)
}

/// Label to formatted time, kept in the order labels were first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitTable {
    entries: Vec<(&'static str, String)>,
}

impl SplitTable {
    pub fn set(&mut self, label: &'static str, time: String) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == label) {
            Some(entry) => entry.1 = time,
            None => self.entries.push((label, time)),
        }
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(existing, _)| *existing == label)
            .map(|(_, time)| time.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(label, _)| *label)
    }

    pub fn flatten(&self) -> String {
        self.entries
            .iter()
            .map(|(_, time)| time.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Serialize for SplitTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (label, time) in &self.entries {
            map.serialize_entry(label, time)?;
        }
        map.end()
    }
}

#[derive(Debug)]
pub struct Splits {
    tables: [(String, SplitTable); 2],
    pub last_completion_ms: Option<u64>,
}

impl Splits {
    pub fn for_player(&self, uuid: &str) -> Option<&SplitTable> {
        self.tables
            .iter()
            .find(|(owner, _)| owner == uuid)
            .map(|(_, table)| table)
    }

    fn table_mut(&mut self, uuid: &str) -> Result<&mut SplitTable> {
        self.tables
            .iter_mut()
            .find(|(owner, _)| owner == uuid)
            .map(|(_, table)| table)
            .ok_or_else(|| anyhow!("split entry for unknown player {}", uuid))
    }
}

/// Walks every completion, then every timeline event, of a two-player match.
pub fn extract_splits(data: &MatchData, roster: &[Player; 2]) -> Result<Splits> {
    let mut splits = Splits {
        tables: [
            (roster[0].uuid.clone(), SplitTable::default()),
            (roster[1].uuid.clone(), SplitTable::default()),
        ],
        last_completion_ms: None,
    };

    for completion in &data.completions {
        splits
            .table_mut(&completion.uuid)?
            .set(COMPLETION_LABEL, format_duration(completion.time));
        splits.last_completion_ms = Some(completion.time);
    }

    for event in &data.timelines {
        let label = match event_label(&event.event_type) {
            Some(label) => label,
            None => continue,
        };

        debug!("{} {} at {}ms", event.uuid, label, event.time);
        splits
            .table_mut(&event.uuid)?
            .set(label, format_duration(event.time));
    }

    Ok(splits)
}
