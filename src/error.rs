use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    InvalidRequest(String),

    #[error("Upstream returned non-JSON response (status {status})")]
    UpstreamNonJson { status: u16, body: String },

    #[error("Upstream returned status {status}")]
    Upstream {
        status: u16,
        details: serde_json::Value,
    },

    #[error("Upstream request timed out after {secs}s")]
    UpstreamTimeout { secs: u64 },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Address parse error: {0}")]
    AddrParse(#[from] std::net::AddrParseError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Maps a reqwest failure onto the taxonomy. Only failures on the wire
    /// are `Transport`/`UpstreamTimeout`; a request that could not be built
    /// (bad URL, bad scheme) is a configuration error.
    pub fn from_reqwest(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_timeout() {
            Self::UpstreamTimeout { secs: timeout_secs }
        } else if err.is_builder() {
            Self::Config(format!("Invalid request: {}", err))
        } else if err.is_redirect() || err.is_decode() {
            Self::Internal(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }

    /// Stable name of the failure class, used as a structured log field.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidRequest(_) => "InvalidRequest",
            Self::UpstreamNonJson { .. } => "UpstreamNonJSON",
            Self::Upstream { .. } => "UpstreamError",
            Self::UpstreamTimeout { .. } => "UpstreamTimeout",
            Self::Transport(_) => "TransportFailure",
            Self::Config(_) => "Config",
            Self::Serialization(_)
            | Self::Yaml(_)
            | Self::Io(_)
            | Self::AddrParse(_)
            | Self::Internal(_) => "InternalFailure",
        }
    }

    /// True when the outbound call never produced a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::UpstreamTimeout { .. })
    }
}
