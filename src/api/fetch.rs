//! Purpose: Perform single blocking HTTP GETs for JSON endpoints.
//! Exports: `Fetcher`, `FetcherOptions`, `DEFAULT_USER_AGENT`.
//! Role: Transport layer between the consume driver and remote services.
//! Invariants: The agent is built explicitly per `Fetcher`; there is no shared global client.
//! Invariants: Non-2xx responses become `ErrorKind::Transport` and are never decoded.
//! Invariants: One request per call; no retries, timeouts stay at ureq defaults.
#![allow(clippy::result_large_err)]

use std::io::Read;

use tracing::debug;
use url::Url;

use super::endpoints::parse_http_url;
use super::records::Shape;
use crate::core::error::{Error, ErrorKind};
use crate::json::parse::decode;

type ApiResult<T> = Result<T, Error>;

pub const DEFAULT_USER_AGENT: &str = concat!("rest-consumer/", env!("CARGO_PKG_VERSION"));

#[derive(Clone, Debug, Default)]
pub struct FetcherOptions {
    pub proxy: Option<String>,
    pub user_agent: Option<String>,
}

impl FetcherOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_proxy(mut self, proxy: impl Into<String>) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

#[derive(Clone)]
pub struct Fetcher {
    agent: ureq::Agent,
}

impl Fetcher {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new()
                .user_agent(DEFAULT_USER_AGENT)
                .build(),
        }
    }

    pub fn with_options(options: FetcherOptions) -> ApiResult<Self> {
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        let mut builder = ureq::AgentBuilder::new().user_agent(user_agent);
        if let Some(proxy) = &options.proxy {
            let proxy = ureq::Proxy::new(proxy).map_err(|err| {
                Error::new(ErrorKind::Usage)
                    .with_message(format!("invalid proxy url: {err}"))
                    .with_url(proxy.clone())
            })?;
            builder = builder.proxy(proxy);
        }
        Ok(Self {
            agent: builder.build(),
        })
    }

    /// Uses a caller-built agent, e.g. one with custom TLS settings.
    pub fn from_agent(agent: ureq::Agent) -> Self {
        Self { agent }
    }

    pub fn fetch(&self, url: &str) -> ApiResult<Vec<u8>> {
        let url = parse_http_url(url)?;
        self.fetch_url(&url)
    }

    pub fn fetch_url(&self, url: &Url) -> ApiResult<Vec<u8>> {
        debug!(url = %url, "GET");
        let response = self
            .agent
            .get(url.as_str())
            .set("Accept", "application/json")
            .call();

        let response = match response {
            Ok(resp) => resp,
            Err(ureq::Error::Status(code, _resp)) => return Err(status_error(code, url)),
            Err(ureq::Error::Transport(err)) => {
                return Err(Error::new(ErrorKind::Transport)
                    .with_message("request failed")
                    .with_url(url.as_str())
                    .with_source(err));
            }
        };

        let status = response.status();
        if !(200..300).contains(&status) {
            return Err(status_error(status, url));
        }

        let mut body = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut body)
            .map_err(|err| {
                Error::new(ErrorKind::Io)
                    .with_message("failed to read response body")
                    .with_url(url.as_str())
                    .with_source(err)
            })?;
        debug!(url = %url, status, bytes = body.len(), "response received");
        Ok(body)
    }

    /// Fetches `url` and decodes the body into `T`.
    pub fn fetch_as<T: Shape>(&self, url: &Url) -> ApiResult<T> {
        let body = self.fetch_url(url)?;
        decode::<T>(&body).map_err(|err| err.with_url(url.as_str()))
    }
}

impl Default for Fetcher {
    fn default() -> Self {
        Self::new()
    }
}

fn status_error(status: u16, url: &Url) -> Error {
    Error::new(ErrorKind::Transport)
        .with_message(format!("remote error status {status}"))
        .with_status(status)
        .with_url(url.as_str())
}
