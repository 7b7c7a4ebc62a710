use std::env;
use std::path::PathBuf;

use crate::downloader::DEFAULT_DOWNLOADER;
use crate::ranked_api::DEFAULT_API_URL;

/// Settings read from the environment. Unset or blank variables use defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub downloader: String,
    pub output_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Config {
        Config::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Config {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };

        Config {
            api_url: var("RANKED_API_URL", DEFAULT_API_URL),
            downloader: var("RANKED_DOWNLOADER", DEFAULT_DOWNLOADER),
            output_dir: PathBuf::from(var("RANKED_OUTPUT_DIR", ".")),
        }
    }
}
