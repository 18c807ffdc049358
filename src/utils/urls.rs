use anyhow::{Error, anyhow};
use url::{ParseError, Url};

pub fn to_url(host: &str) -> Result<Url, ParseError> {
    Url::parse(host)
}

/// Parses an endpoint and insists on an http(s) scheme.
pub fn to_endpoint(raw: &str) -> Result<Url, Error> {
    let url = to_url(raw).map_err(|e| anyhow!("invalid endpoint {}: {}", raw, e))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(anyhow!("unsupported scheme {} in {}", other, raw)),
    }
}
