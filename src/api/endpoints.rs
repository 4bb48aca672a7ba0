//! Purpose: Resolve the quote and greeting endpoint URLs.
//! Exports: `Endpoints`, `NAME_PLACEHOLDER`, `DEFAULT_QUOTE_URL`, `DEFAULT_GREETING_URL`.
//! Role: Turns CLI/env configuration into concrete request URLs.
//! Invariants: The greeting name is percent-encoded as a URL component before substitution.
//! Invariants: Resolved URLs are absolute http(s) URLs.
#![allow(clippy::result_large_err)]

use url::Url;
use url::form_urlencoded::byte_serialize;

use crate::core::error::{Error, ErrorKind};

pub const NAME_PLACEHOLDER: &str = "{name}";
pub const DEFAULT_QUOTE_URL: &str = "http://localhost:8080/api/random";
pub const DEFAULT_GREETING_URL: &str = "http://localhost:8080/greeting?name={name}";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoints {
    pub quote_url: String,
    pub greeting_template: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            quote_url: DEFAULT_QUOTE_URL.to_string(),
            greeting_template: DEFAULT_GREETING_URL.to_string(),
        }
    }
}

impl Endpoints {
    pub fn new(quote_url: impl Into<String>, greeting_template: impl Into<String>) -> Self {
        Self {
            quote_url: quote_url.into(),
            greeting_template: greeting_template.into(),
        }
    }

    pub fn quote(&self) -> Result<Url, Error> {
        parse_http_url(&self.quote_url)
    }

    /// Substitutes every `{name}` in the template. A template without the
    /// placeholder is used as-is.
    pub fn greeting(&self, name: &str) -> Result<Url, Error> {
        let raw = self
            .greeting_template
            .replace(NAME_PLACEHOLDER, &encode_component(name));
        parse_http_url(&raw)
    }
}

/// Percent-encodes `value` so it is safe in a path segment or a query value.
/// Spaces become `%20`, never `+`.
fn encode_component(value: &str) -> String {
    // byte_serialize emits `%2B` for a literal plus, so every `+` left is a space.
    byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

pub(crate) fn parse_http_url(raw: &str) -> Result<Url, Error> {
    let url = Url::parse(raw).map_err(|err| {
        Error::new(ErrorKind::Usage)
            .with_message("invalid endpoint url")
            .with_url(raw)
            .with_source(err)
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message("endpoint url must use http or https scheme")
            .with_url(raw)),
    }
}
