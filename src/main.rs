use anyhow::{bail, Result};
use chrono::Local;
use rankclip::config::Config;
use rankclip::downloader::CommandDownloader;
use rankclip::pipeline::Pipeline;
use rankclip::ranked_api::RankedClient;
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = env::args().skip(1);
    let match_id = match (args.next(), args.next()) {
        (Some(match_id), None) => match_id,
        _ => bail!("usage: rankclip <match-id>"),
    };

    let config = Config::from_env();
    let api = RankedClient::new(&config.api_url);
    let downloader = CommandDownloader::from_command_line(&config.downloader)?;

    let pipeline = Pipeline {
        api: &api,
        downloader: &downloader,
        output_dir: &config.output_dir,
        tz: Local,
    };
    pipeline.run(&match_id).await?;

    Ok(())
}
