use thiserror::Error;

use crate::exchange::HttpExchange;

/// Errors raised by the session client and the manifest pipeline.
///
/// Every variant produced after an HTTP request was issued carries the
/// recorded exchange, so callers can print the full request and response
/// without issuing the request again.
#[derive(Error, Debug)]
pub enum Error {
    #[error("login failed: {message}")]
    Auth {
        message: String,
        exchange: Option<Box<HttpExchange>>,
    },
    #[error("api request failed: {message}")]
    Api {
        message: String,
        exchange: Option<Box<HttpExchange>>,
    },
    #[error("playlist download failed: {message}")]
    Fetch {
        message: String,
        exchange: Option<Box<HttpExchange>>,
    },
    #[error("invalid master playlist: {message}")]
    Parse {
        message: String,
        exchange: Option<Box<HttpExchange>>,
    },
    #[error("cannot assemble playlist: {0}")]
    Assemble(String),
    #[error("no quality with a bandwidth of exactly {bandwidth} bps")]
    Selection { bandwidth: u64 },
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http client error: {0}")]
    Client(String),
}

impl Error {
    pub(crate) fn auth(message: String, exchange: Option<HttpExchange>) -> Self {
        Self::Auth {
            message,
            exchange: exchange.map(Box::new),
        }
    }

    pub(crate) fn api(message: String, exchange: Option<HttpExchange>) -> Self {
        Self::Api {
            message,
            exchange: exchange.map(Box::new),
        }
    }

    pub(crate) fn fetch(message: String, exchange: Option<HttpExchange>) -> Self {
        Self::Fetch {
            message,
            exchange: exchange.map(Box::new),
        }
    }

    pub(crate) fn parse(message: String, exchange: Option<HttpExchange>) -> Self {
        Self::Parse {
            message,
            exchange: exchange.map(Box::new),
        }
    }

    /// The HTTP exchange that caused this error, if one took place.
    pub fn exchange(&self) -> Option<&HttpExchange> {
        match self {
            Self::Auth { exchange, .. }
            | Self::Api { exchange, .. }
            | Self::Fetch { exchange, .. }
            | Self::Parse { exchange, .. } => exchange.as_deref(),
            _ => None,
        }
    }

    /// Attach an exchange to an error raised before it was known.
    pub(crate) fn with_exchange(self, new: HttpExchange) -> Self {
        match self {
            Self::Parse { message, .. } => Self::parse(message, Some(new)),
            other => other,
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Client(err.to_string())
    }
}

impl From<rustls::Error> for Error {
    fn from(err: rustls::Error) -> Self {
        Error::Client(format!("tls configuration: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exchange_is_absent_for_local_errors() {
        assert!(Error::Assemble("empty selection".into()).exchange().is_none());
        assert!(Error::Selection { bandwidth: 1 }.exchange().is_none());
        assert!(Error::parse("bad".into(), None).exchange().is_none());
    }

    #[test]
    fn display_mentions_the_bandwidth() {
        let err = Error::Selection { bandwidth: 1_200_000 };
        assert_eq!(
            err.to_string(),
            "no quality with a bandwidth of exactly 1200000 bps"
        );
    }
}
