use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, TimeZone};
use futures::future;
use log::{info, warn};
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::downloader::{ClipDownloader, ClipRequest};
use crate::match_response::{MatchData, Player};
use crate::persist::{clip_path, dir_name, write_report};
use crate::ranked_api::RankedApi;
use crate::report::build_report;
use crate::splits::extract_splits;
use crate::timefmt::ClipWindow;

pub struct Pipeline<'a, Tz: TimeZone> {
    pub api: &'a dyn RankedApi,
    pub downloader: &'a dyn ClipDownloader,
    pub output_dir: &'a Path,
    pub tz: Tz,
}

#[derive(Debug)]
pub struct RunOutput {
    pub dir: PathBuf,
    pub info_file: PathBuf,
    pub clips: [ClipRequest; 2],
}

impl<'a, Tz> Pipeline<'a, Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    pub async fn run(&self, match_id: &str) -> Result<RunOutput> {
        let data = self
            .api
            .match_detail(match_id)
            .await
            .with_context(|| format!("failed to fetch match {}", match_id))?;

        let roster = roster_of(&data)?;
        info!(
            "match {}: {} vs {}",
            data.id, roster[0].nickname, roster[1].nickname
        );
        if data.forfeited {
            warn!("match {} was forfeited", data.id);
        }
        if let Some(winner) = data.result.as_ref().and_then(|result| result.uuid.as_deref()) {
            let name = roster
                .iter()
                .find(|player| player.uuid == winner)
                .map_or(winner, |player| player.nickname.as_str());
            info!("{} won", name);
        }

        let splits = extract_splits(&data, &roster)?;

        let history = self
            .api
            .versus_matches(&roster[0].uuid, &roster[1].uuid)
            .await
            .context("failed to fetch versus history")?;

        let date = self.match_date(data.date)?;
        let report = build_report(&roster, &date, &splits, &history)?;

        let completion_ms = splits
            .last_completion_ms
            .ok_or_else(|| anyhow!("match {} has no completions", data.id))?;

        let dir = self.output_dir.join(dir_name(&roster, &date));
        let clips = [
            clip_request(&data, &roster[0], &dir, completion_ms)?,
            clip_request(&data, &roster[1], &dir, completion_ms)?,
        ];

        println!("{}", dir.display());
        let info_file = write_report(&dir, &report).await?;

        let (first, second) = future::join(
            self.downloader.download(&clips[0]),
            self.downloader.download(&clips[1]),
        )
        .await;
        first?;
        second?;

        Ok(RunOutput {
            dir,
            info_file,
            clips,
        })
    }

    fn match_date(&self, epoch_secs: i64) -> Result<DateTime<Tz>> {
        self.tz
            .timestamp_opt(epoch_secs, 0)
            .single()
            .ok_or_else(|| anyhow!("match date {} is out of range", epoch_secs))
    }
}

fn roster_of(data: &MatchData) -> Result<[Player; 2]> {
    match data.players.as_slice() {
        [first, second] => Ok([first.clone(), second.clone()]),
        players => bail!(
            "match {} has {} players, expected 2",
            data.id,
            players.len()
        ),
    }
}

fn clip_request(
    data: &MatchData,
    player: &Player,
    dir: &Path,
    completion_ms: u64,
) -> Result<ClipRequest> {
    let vod = data
        .vod_for(&player.uuid)
        .ok_or_else(|| anyhow!("no vod for {} in match {}", player.nickname, data.id))?;

    Ok(ClipRequest {
        vod_url: vod.url.clone(),
        window: ClipWindow::compute(vod.starts_at, data.date, completion_ms),
        output: clip_path(dir, player),
    })
}
