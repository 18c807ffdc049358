use crate::utils::get_env::{env_var_to_vec, get_env_parsed};
use crate::utils::urls::to_url;
use axum::extract::ConnectInfo;
use axum::http::Request;
use std::net::SocketAddr;
use tower_governor::GovernorError;
use tower_governor::key_extractor::KeyExtractor;

pub const FORWARDED_FOR_HEADER: &str = "X-Forwarded-For";

/// Keys rate limits on the peer address. `X-Forwarded-For` is only read when
/// the server sits behind a proxy that overwrites it.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClientIpExtractor {
    pub trust_forwarded: bool,
}

impl ClientIpExtractor {
    pub fn from_env() -> Self {
        Self {
            trust_forwarded: get_env_parsed("TRUST_FORWARDED_FOR", false),
        }
    }
}

impl KeyExtractor for ClientIpExtractor {
    type Key = String;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        if self.trust_forwarded {
            let forwarded = req
                .headers()
                .get(FORWARDED_FOR_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty());

            if let Some(client) = forwarded {
                return Ok(client.to_owned());
            }
        }

        match req.extensions().get::<ConnectInfo<SocketAddr>>() {
            Some(ConnectInfo(addr)) => Ok(addr.ip().to_string()),
            None => Err(GovernorError::UnableToExtractKey),
        }
    }
}

pub fn allowed_origins() -> Vec<String> {
    env_var_to_vec("ALLOWED_ORIGINS")
}

/// An empty allow-list admits every origin.
pub fn is_allowed_origin(origin: Option<&str>, allowed_hosts: &[String]) -> bool {
    if allowed_hosts.is_empty() {
        return true;
    }
    match origin {
        None => false,
        Some(origin) => match to_url(origin) {
            Ok(url) => {
                let host = url.host_str().unwrap_or("");
                allowed_hosts.iter().any(|allowed| allowed == host)
            }
            Err(_) => false,
        },
    }
}
