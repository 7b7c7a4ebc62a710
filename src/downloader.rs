use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use log::info;
use std::path::PathBuf;
use tokio::process::Command;

use crate::timefmt::ClipWindow;

pub const DEFAULT_DOWNLOADER: &str = "bunx twitch-dlp";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRequest {
    pub vod_url: String,
    pub window: ClipWindow,
    pub output: PathBuf,
}

impl ClipRequest {
    pub fn args(&self) -> Vec<String> {
        vec![
            self.vod_url.clone(),
            "--download-sections".to_owned(),
            format!("*{}", self.window),
            "-o".to_owned(),
            self.output.display().to_string(),
        ]
    }
}

#[async_trait]
pub trait ClipDownloader: Send + Sync {
    async fn download(&self, clip: &ClipRequest) -> Result<()>;
}

/// Runs an external program such as `twitch-dlp` once per clip.
pub struct CommandDownloader {
    program: String,
    leading_args: Vec<String>,
}

impl CommandDownloader {
    /// `command` is split on whitespace: the first word is the program, the
    /// rest are passed before the clip arguments.
    pub fn from_command_line(command: &str) -> Result<CommandDownloader> {
        let mut words = command.split_whitespace().map(str::to_owned);
        let program = match words.next() {
            Some(program) => program,
            None => bail!("downloader command is empty"),
        };

        Ok(CommandDownloader {
            program,
            leading_args: words.collect(),
        })
    }

    pub fn command_line(&self, clip: &ClipRequest) -> Vec<String> {
        let mut line = vec![self.program.clone()];
        line.extend(self.leading_args.iter().cloned());
        line.extend(clip.args());
        line
    }
}

#[async_trait]
impl ClipDownloader for CommandDownloader {
    async fn download(&self, clip: &ClipRequest) -> Result<()> {
        let line = self.command_line(clip);
        info!("{}", line.join(" "));

        let status = Command::new(&line[0])
            .args(&line[1..])
            .status()
            .await
            .with_context(|| format!("failed to start {}", self.program))?;

        if !status.success() {
            bail!("{} exited with {} for {}", self.program, status, clip.output.display());
        }

        Ok(())
    }
}
