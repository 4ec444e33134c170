use std::{env, time::Duration};

use crate::types::MediaDownloadOptions;

/// Session-level knobs for the messaging adapter.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// File name reported for document sends that do not provide one.
    pub default_file_name: String,
    /// Timeout handed to the client for media downloads.
    pub media_timeout: Duration,
    /// User agent reported on media downloads.
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            default_file_name: "file".to_string(),
            media_timeout: Duration::from_millis(5000),
            user_agent: "zaplink".to_string(),
        }
    }
}

impl ClientConfig {
    /// Defaults overridden from the environment. Unset or unparsable values
    /// fall back silently.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let default_file_name =
            env::var("ZAPLINK_DEFAULT_FILE_NAME").unwrap_or(defaults.default_file_name);
        let user_agent = env::var("ZAPLINK_USER_AGENT").unwrap_or(defaults.user_agent);
        let media_timeout = env::var("ZAPLINK_MEDIA_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse::<u64>().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.media_timeout);

        Self {
            default_file_name,
            media_timeout,
            user_agent,
        }
    }

    pub fn download_options(&self) -> MediaDownloadOptions {
        MediaDownloadOptions {
            timeout: self.media_timeout,
            user_agent: self.user_agent.clone(),
        }
    }
}
