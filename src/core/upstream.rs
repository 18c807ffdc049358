use crate::core::error::{GenerationError, extract_error_message};
use crate::core::request::LegacyParams;
use crate::utils::constants::MSG_UPSTREAM_FALLBACK;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::fmt;
use url::Url;

// non-success statuses become GenerationError::Upstream
pub(crate) async fn read_json_body(
    response: Response,
    fallback: impl FnOnce(StatusCode) -> String,
) -> Result<(Bytes, Value), GenerationError> {
    let status = response.status();
    let body = response.bytes().await?;
    let parsed = serde_json::from_slice::<Value>(&body);

    if !status.is_success() {
        let message = extract_error_message(parsed.as_ref().ok(), fallback(status));
        tracing::warn!(status = status.as_u16(), %message, "upstream rejected request");
        return Err(GenerationError::Upstream {
            status: status.as_u16(),
            message,
        });
    }

    let value = parsed.map_err(|e| GenerationError::MalformedResponse(e.to_string()))?;
    Ok((body, value))
}

#[derive(Clone)]
pub struct LegacyUpstream {
    http_client: Client,
    endpoint: Url,
    api_key: String,
    params: LegacyParams,
}

impl fmt::Debug for LegacyUpstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LegacyUpstream")
            .field("endpoint", &self.endpoint.as_str())
            .field("params", &self.params)
            .finish_non_exhaustive()
    }
}

impl LegacyUpstream {
    pub fn new(http_client: Client, endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            http_client,
            endpoint,
            api_key: api_key.into(),
            params: LegacyParams::default(),
        }
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    fn form(&self, init_image: Vec<u8>, prompt: &str) -> Result<Form, GenerationError> {
        let part = Part::bytes(init_image)
            .file_name("resized-image.jpeg")
            .mime_str("image/jpeg")?;

        Ok(Form::new()
            .part("init_image", part)
            .text("init_image_mode", self.params.init_image_mode)
            .text("image_strength", self.params.image_strength.to_string())
            .text("text_prompts[0][text]", prompt.to_string())
            .text("cfg_scale", self.params.cfg_scale.to_string())
            .text("samples", self.params.samples.to_string())
            .text("steps", self.params.steps.to_string()))
    }

    /// Sends an already resized JPEG and returns the upstream JSON body untouched.
    pub async fn image_to_image(
        &self,
        init_image: Vec<u8>,
        prompt: &str,
    ) -> Result<Bytes, GenerationError> {
        let form = self.form(init_image, prompt)?;

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header("Accept", "application/json")
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        let (body, _) = read_json_body(response, |_| MSG_UPSTREAM_FALLBACK.to_string()).await?;
        tracing::debug!(bytes = body.len(), "legacy upstream responded");
        Ok(body)
    }
}

#[cfg(test)]
mod cfg_tests {
    use super::*;
    use crate::testing::{FakeUpstream, Reply};
    use serde_json::json;

    fn upstream_for(fake: &FakeUpstream) -> LegacyUpstream {
        LegacyUpstream::new(Client::new(), fake.url(), "test-key")
    }

    #[tokio::test]
    async fn test_image_to_image_sends_legacy_fields() {
        let body = json!({"artifacts": [{"base64": "AAAA", "seed": 1}]});
        let fake = FakeUpstream::start(Reply::json(200, body.clone())).await;

        let bytes = upstream_for(&fake)
            .image_to_image(vec![0xFF, 0xD8, 0xFF], "sleeping")
            .await
            .unwrap();
        assert_eq!(serde_json::from_slice::<Value>(&bytes).unwrap(), body);

        let seen = fake.last_request().await.unwrap();
        assert_eq!(seen.authorization.as_deref(), Some("Bearer test-key"));
        assert!(seen.fields.contains(&"init_image".to_string()));
        assert_eq!(seen.text("init_image_mode"), Some("IMAGE_STRENGTH"));
        assert_eq!(seen.text("image_strength"), Some("0.35"));
        assert_eq!(seen.text("text_prompts[0][text]"), Some("sleeping"));
        assert_eq!(seen.text("cfg_scale"), Some("7"));
        assert_eq!(seen.text("samples"), Some("1"));
        assert_eq!(seen.text("steps"), Some("30"));
    }

    #[tokio::test]
    async fn test_image_to_image_error_message() {
        let fake = FakeUpstream::start(Reply::json(401, json!({"message": "bad key"}))).await;
        let err = upstream_for(&fake)
            .image_to_image(vec![1, 2, 3], "x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "bad key");

        let fake = FakeUpstream::start(Reply::text(502, "gateway down")).await;
        let err = upstream_for(&fake)
            .image_to_image(vec![1, 2, 3], "x")
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), MSG_UPSTREAM_FALLBACK);
    }
}
