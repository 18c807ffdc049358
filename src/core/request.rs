use crate::core::intake::UploadCandidate;
use crate::utils::constants::DEFAULT_PROMPT;
use bytes::Bytes;

/// Parameters for the current (v2) upstream, sent as-is from the client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectParams {
    pub strength: f64,
    pub output_format: &'static str,
}

impl Default for DirectParams {
    fn default() -> Self {
        Self {
            strength: 0.6,
            output_format: "jpeg",
        }
    }
}

/// Parameters for the legacy (v1) upstream, applied by the proxy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegacyParams {
    pub init_image_mode: &'static str,
    pub image_strength: f64,
    pub cfg_scale: u32,
    pub samples: u32,
    pub steps: u32,
}

impl Default for LegacyParams {
    fn default() -> Self {
        Self {
            init_image_mode: "IMAGE_STRENGTH",
            image_strength: 0.35,
            cfg_scale: 7,
            samples: 1,
            steps: 30,
        }
    }
}

// blank means "use the default"; anything else goes out exactly as typed
pub fn resolve_prompt(prompt: &str) -> String {
    if prompt.trim().is_empty() {
        DEFAULT_PROMPT.to_string()
    } else {
        prompt.to_string()
    }
}

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    file_name: String,
    mime_type: &'static str,
    image: Bytes,
    prompt: String,
}

impl GenerationRequest {
    pub fn new(candidate: &UploadCandidate, prompt: &str) -> Self {
        Self {
            file_name: candidate.file_name().to_string(),
            mime_type: candidate.mime_type(),
            image: candidate.bytes().clone(),
            prompt: resolve_prompt(prompt),
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime_type(&self) -> &'static str {
        self.mime_type
    }

    pub fn image(&self) -> &Bytes {
        &self.image
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    pub(crate) fn image_part(&self) -> Result<reqwest::multipart::Part, reqwest::Error> {
        reqwest::multipart::Part::bytes(self.image.to_vec())
            .file_name(self.file_name.clone())
            .mime_str(self.mime_type)
    }
}
