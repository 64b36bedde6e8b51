use thiserror::Error;

/// Failure of a single call to the YouTube Data API.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("request to '{endpoint}' failed: {source}")]
    Transport {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("'{endpoint}' responded with status {status}: {body}")]
    Status {
        endpoint: &'static str,
        status: u16,
        body: String,
    },

    #[error("malformed '{endpoint}' payload: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("'{endpoint}' returned no items")]
    NoItems { endpoint: &'static str },

    #[error("invalid URL for '{endpoint}': {source}")]
    Url {
        endpoint: &'static str,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Error, Debug)]
pub enum AggregationError {
    #[error("lookback period of {0} days is out of range")]
    PeriodOutOfRange(u32),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrendingPath {
    /// Most-popular chart lookup.
    Chart,
    /// Keyword search followed by a details lookup.
    Search,
}

/// Trending lookup failure, tagged with the path that was taken.
#[derive(Error, Debug)]
#[error("{path:?} trending lookup failed: {source}")]
pub struct TrendingError {
    pub path: TrendingPath,
    #[source]
    pub source: UpstreamError,
}
