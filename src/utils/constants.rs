// 512x512
pub const MIN_PIXELS: u64 = 262_144;

// the legacy upstream only accepts SDXL-sized init images
pub const PROXY_IMAGE_SIZE: u32 = 1024;
pub const PROXY_JPEG_QUALITY: u8 = 80;

pub const DEFAULT_PROMPT: &str = "A cute pet";

pub const DIRECT_API_URL: &str = "https://api.stability.ai/v2/stable-image/generate/core";
pub const LEGACY_API_URL: &str =
    "https://api.stability.ai/v1/generation/stable-diffusion-xl-1024-v1-0/image-to-image";
pub const DEFAULT_PROXY_URL: &str = "http://localhost:3000/api/generate";
pub const GENERATE_ROUTE: &str = "/api/generate";

pub const SERVER_REQUEST_BODY_LIMIT: usize = 20 * 1024 * 1024;
pub const DEFAULT_RATE_LIMIT_BURST: u32 = 10;
pub const DEFAULT_PORT: u16 = 3000;

// user-facing messages
pub const MSG_IMAGE_TOO_SMALL: &str =
    "이미지가 너무 작습니다. 512x512 픽셀 이상의 사진을 올려주세요.";
pub const MSG_IMAGE_UNREADABLE: &str = "이미지를 읽을 수 없습니다.";
pub const MSG_NO_FILE: &str = "반려동물 사진을 먼저 업로드해주세요.";
pub const MSG_IMAGE_REQUIRED: &str = "이미지 파일이 필요합니다.";
pub const MSG_METHOD_NOT_ALLOWED: &str = "Method Not Allowed";
pub const MSG_UPSTREAM_FALLBACK: &str = "Stability AI API Error";
pub const LABEL_GENERATING: &str = "이미지 생성 중...";
pub const LABEL_GENERATE: &str = "이미지 생성하기";
