use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use tracing::{debug, info};

use crate::error::FetchError;

pub const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Where the delimited dataset comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    File(PathBuf),
    Http { url: String, timeout_ms: u64 },
}

impl DataSource {
    /// `http://` and `https://` locations are fetched over the network,
    /// everything else is treated as a local path.
    pub fn parse(location: &str, timeout_ms: u64) -> Self {
        let trimmed = location.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Self::Http {
                url: trimmed.to_string(),
                timeout_ms,
            }
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }

    pub fn location(&self) -> String {
        match self {
            Self::File(path) => path.display().to_string(),
            Self::Http { url, .. } => url.clone(),
        }
    }

    /// Raw body of the source. Decoding is left to the CSV reader so that
    /// malformed UTF-8 surfaces as a parse failure instead of being replaced.
    pub fn fetch_bytes(&self) -> Result<Vec<u8>, FetchError> {
        let bytes = match self {
            Self::File(path) => fs::read(path).map_err(|source| FetchError::Io {
                location: self.location(),
                source,
            })?,
            Self::Http { url, timeout_ms } => fetch_http(url, *timeout_ms)?,
        };

        info!(source = %self, bytes = bytes.len(), "fetched dataset source");
        Ok(bytes)
    }
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.location())
    }
}

fn fetch_http(url: &str, timeout_ms: u64) -> Result<Vec<u8>, FetchError> {
    let transport = |source: reqwest::Error| FetchError::Transport {
        location: url.to_string(),
        source,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(timeout_ms))
        .build()
        .map_err(transport)?;

    debug!(url, timeout_ms, "requesting dataset");
    let response = client.get(url).send().map_err(transport)?;

    let status = response.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            location: url.to_string(),
            status: status.as_u16(),
        });
    }

    response
        .bytes()
        .map(|body| body.to_vec())
        .map_err(transport)
}
