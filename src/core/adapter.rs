use crate::core::error::GenerationError;
use crate::core::request::{DirectParams, GenerationRequest};
use crate::core::result::GenerationResult;
use crate::core::upstream::read_json_body;
use crate::utils::constants::{DEFAULT_PROXY_URL, DIRECT_API_URL};
use crate::utils::get_env::{get_env_or, get_env_var};
use crate::utils::urls::to_endpoint;
use anyhow::{Error, anyhow};
use reqwest::multipart::Form;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::fmt;
use url::Url;

#[derive(Clone)]
pub enum GenerationMode {
    Direct { endpoint: Url, api_key: String },
    Proxied { endpoint: Url },
}

impl GenerationMode {
    /// Reads `GENERATION_MODE` (`direct` | `proxied`, default `proxied`).
    pub fn from_env() -> Result<Self, Error> {
        match get_env_or("GENERATION_MODE", "proxied").to_lowercase().as_str() {
            "direct" => Ok(Self::Direct {
                endpoint: to_endpoint(&get_env_or("STABILITY_API_URL", DIRECT_API_URL))?,
                api_key: get_env_var("STABILITY_API_KEY")?,
            }),
            "proxied" => Ok(Self::Proxied {
                endpoint: to_endpoint(&get_env_or("PROXY_URL", DEFAULT_PROXY_URL))?,
            }),
            other => Err(anyhow!("unknown GENERATION_MODE {}", other)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Direct { .. } => "direct",
            Self::Proxied { .. } => "proxied",
        }
    }

    fn output_mime(&self) -> &'static str {
        match self {
            Self::Direct { .. } => "image/jpeg",
            Self::Proxied { .. } => "image/png",
        }
    }

    fn extract_image<'a>(&self, body: &'a Value) -> Option<&'a str> {
        let field = match self {
            Self::Direct { .. } => body.get("image"),
            Self::Proxied { .. } => body.pointer("/artifacts/0/base64"),
        };
        field.and_then(Value::as_str)
    }
}

impl fmt::Debug for GenerationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Direct { endpoint, .. } => f
                .debug_struct("Direct")
                .field("endpoint", &endpoint.as_str())
                .field("api_key", &"<redacted>")
                .finish(),
            Self::Proxied { endpoint } => f
                .debug_struct("Proxied")
                .field("endpoint", &endpoint.as_str())
                .finish(),
        }
    }
}

fn status_fallback(status: StatusCode) -> String {
    format!(
        "API 요청 실패: {}",
        status.canonical_reason().unwrap_or(status.as_str())
    )
}

#[derive(Clone, Debug)]
pub struct GenerationClient {
    http_client: Client,
    mode: GenerationMode,
}

impl GenerationClient {
    pub fn new(http_client: Client, mode: GenerationMode) -> Self {
        Self { http_client, mode }
    }

    pub fn mode(&self) -> &GenerationMode {
        &self.mode
    }

    /// Issues exactly one request. No retry, no timeout.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, GenerationError> {
        let image_part = request.image_part()?;

        let builder = match &self.mode {
            GenerationMode::Direct { endpoint, api_key } => {
                let params = DirectParams::default();
                let form = Form::new()
                    .part("image", image_part)
                    .text("prompt", request.prompt().to_string())
                    .text("strength", params.strength.to_string())
                    .text("output_format", params.output_format);
                self.http_client
                    .post(endpoint.clone())
                    .header("Accept", "application/json")
                    .header("Authorization", format!("Bearer {}", api_key))
                    .multipart(form)
            }
            GenerationMode::Proxied { endpoint } => {
                let form = Form::new()
                    .part("image", image_part)
                    .text("prompt", request.prompt().to_string());
                self.http_client.post(endpoint.clone()).multipart(form)
            }
        };

        tracing::info!(
            mode = self.mode.name(),
            bytes = request.image().len(),
            prompt = request.prompt(),
            "sending generation request"
        );

        let response = builder.send().await?;
        let (_, body) = read_json_body(response, status_fallback).await?;

        let base64_image = self.mode.extract_image(&body).ok_or_else(|| {
            GenerationError::MalformedResponse("response did not contain an image".into())
        })?;

        Ok(GenerationResult::from_base64(
            self.mode.output_mime(),
            base64_image,
        ))
    }
}
