pub mod config;
pub mod downloader;
pub mod match_response;
pub mod persist;
pub mod pipeline;
pub mod ranked_api;
pub mod report;
pub mod splits;
pub mod timefmt;
pub mod versus_response;
