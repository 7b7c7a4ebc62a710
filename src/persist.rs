use anyhow::{Context, Result};
use chrono::{DateTime, TimeZone};
use log::info;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::match_response::Player;
use crate::report::Report;

pub const INFO_FILE: &str = "info.yaml";

/// `{player1}-{player2}-{YYYY-MM-DD-HH-mm-ss}`
pub fn dir_name<Tz: TimeZone>(roster: &[Player; 2], date: &DateTime<Tz>) -> String
where
    Tz::Offset: Display,
{
    format!(
        "{}-{}-{}",
        roster[0].nickname,
        roster[1].nickname,
        date.format("%Y-%m-%d-%H-%M-%S")
    )
}

pub fn clip_path(dir: &Path, player: &Player) -> PathBuf {
    dir.join(format!("{}.mp4", player.nickname))
}

pub async fn write_report(dir: &Path, report: &Report) -> Result<PathBuf> {
    let yaml = report.to_yaml().context("failed to serialize report")?;

    fs::create_dir_all(dir)
        .await
        .with_context(|| format!("failed to create {}", dir.display()))?;

    let path = dir.join(INFO_FILE);
    fs::write(&path, yaml)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("wrote {}", path.display());
    Ok(path)
}
