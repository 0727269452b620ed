use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read {location}: {source}")]
    Io {
        location: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to reach {location}: {source}")]
    Transport {
        location: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{location} responded with status {status}")]
    Status { location: String, status: u16 },
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Io { .. } | Self::Transport { .. } => None,
        }
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("failed to read header row of {location}: {source}")]
    Parse {
        location: String,
        #[source]
        source: csv::Error,
    },
}

impl LoadError {
    /// Single-line message shown in place of the result card.
    pub fn user_message(&self) -> String {
        match self {
            Self::Fetch(fetch) => match fetch.status() {
                Some(status) => format!("Datan lataus epäonnistui ({status}). {self}"),
                None => format!("Datan lataus epäonnistui. {self}"),
            },
            Self::Parse { .. } => format!("Datan lataus epäonnistui. {self}"),
        }
    }
}
