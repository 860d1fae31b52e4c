use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub default_duration_secs: i64,
    pub payload_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self {
            default_duration_secs: env::var("ANNOUNCE_DEFAULT_DURATION_SECS")
                .unwrap_or_else(|_| "86400".into())
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid ANNOUNCE_DEFAULT_DURATION_SECS: {e}"))?,
            payload_path: env::var("ANNOUNCE_PAYLOAD_PATH")
                .ok()
                .filter(|s| !s.is_empty())
                .map(PathBuf::from),
        })
    }
}
