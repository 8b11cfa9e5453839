use std::env;
use std::time::Duration;

use chrono::FixedOffset;

use crate::error::{AppError, AppResult};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
pub const DEFAULT_API_PATH: &str = "api/";
pub const DEFAULT_MEDIA_ROOT: &str = "/media/frigate/";

/// Zone used to interpret `datetime-local` style input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputZone {
    /// Whatever the host reports as local time
    System,
    Fixed(FixedOffset),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub base_url: String,
    pub api_path: String,
    pub media_root: String,
    pub http_timeout_secs: u64,
    pub input_zone: InputZone,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let input_zone = match env::var("EXPORTS_UTC_OFFSET_MINUTES") {
            Ok(raw) => InputZone::Fixed(parse_utc_offset(&raw)?),
            Err(_) => InputZone::System,
        };

        Ok(Config {
            base_url: with_trailing_slash(
                env::var("EXPORTS_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            ),
            api_path: with_trailing_slash(
                env::var("EXPORTS_API_PATH").unwrap_or_else(|_| DEFAULT_API_PATH.to_string()),
            ),
            media_root: env::var("EXPORTS_MEDIA_ROOT")
                .unwrap_or_else(|_| DEFAULT_MEDIA_ROOT.to_string()),
            http_timeout_secs: env::var("EXPORTS_HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),
            input_zone,
        })
    }

    /// API root every REST path is resolved against
    pub fn api_url(&self) -> String {
        format!("{}{}", self.base_url, self.api_path.trim_start_matches('/'))
    }

    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_path: DEFAULT_API_PATH.to_string(),
            media_root: DEFAULT_MEDIA_ROOT.to_string(),
            http_timeout_secs: 30,
            input_zone: InputZone::System,
        }
    }
}

/// Parses a signed minute offset such as `540` or `-300`
fn parse_utc_offset(raw: &str) -> AppResult<FixedOffset> {
    let minutes: i32 = raw.trim().parse().map_err(|_| {
        AppError::Config(format!("EXPORTS_UTC_OFFSET_MINUTES is not a number: {}", raw))
    })?;
    minutes
        .checked_mul(60)
        .and_then(FixedOffset::east_opt)
        .ok_or_else(|| AppError::Config(format!("UTC offset out of range: {} minutes", minutes)))
}

fn with_trailing_slash(mut value: String) -> String {
    if !value.ends_with('/') {
        value.push('/');
    }
    value
}
