use crate::core::intake::{SelectedFile, UploadCandidate, validate};
use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use serde_json::Value;
use std::collections::HashMap;
use std::io::Cursor;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use url::Url;

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, Rgb([200, 120, 80])));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub async fn candidate() -> UploadCandidate {
    validate(SelectedFile::new("pet.png", png_bytes(512, 512)))
        .await
        .unwrap()
}

/// A URL nothing is listening on.
pub async fn closed_port_url() -> Url {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{}/generate", addr)).unwrap()
}

pub fn multipart_body(parts: &[(&str, Option<&str>, &[u8])]) -> (String, Vec<u8>) {
    let boundary = "pet-memorial-test-boundary";
    let mut body = Vec::new();
    for (name, file_name, data) in parts {
        body.extend_from_slice(format!("--{}\r\n", boundary).as_bytes());
        match file_name {
            Some(file_name) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: application/octet-stream\r\n\r\n",
                    name, file_name
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name).as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", boundary).as_bytes());
    (format!("multipart/form-data; boundary={}", boundary), body)
}

#[derive(Clone, Debug)]
pub enum Reply {
    Json(u16, Value),
    Text(u16, String),
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self::Json(status, body)
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self::Text(status, body.to_string())
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        match self {
            Reply::Json(status, body) => (
                StatusCode::from_u16(status).unwrap(),
                [(header::CONTENT_TYPE, "application/json")],
                body.to_string(),
            )
                .into_response(),
            Reply::Text(status, body) => {
                (StatusCode::from_u16(status).unwrap(), body).into_response()
            }
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct SeenRequest {
    pub authorization: Option<String>,
    pub accept: Option<String>,
    pub fields: Vec<String>,
    pub texts: HashMap<String, String>,
    pub files: HashMap<String, Vec<u8>>,
}

impl SeenRequest {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.texts.get(name).map(String::as_str)
    }
}

struct FakeState {
    reply: Reply,
    delay: Option<Duration>,
    seen: Mutex<Vec<SeenRequest>>,
}

pub struct FakeUpstream {
    addr: SocketAddr,
    state: Arc<FakeState>,
}

impl FakeUpstream {
    pub async fn start(reply: Reply) -> Self {
        Self::spawn(reply, None).await
    }

    /// Records the request immediately but holds the reply back for `delay`.
    pub async fn start_delayed(reply: Reply, delay: Duration) -> Self {
        Self::spawn(reply, Some(delay)).await
    }

    async fn spawn(reply: Reply, delay: Option<Duration>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let state = Arc::new(FakeState {
            reply,
            delay,
            seen: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(record)
            .layer(DefaultBodyLimit::disable())
            .with_state(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}/generate", self.addr)).unwrap()
    }

    pub async fn last_request(&self) -> Option<SeenRequest> {
        self.state.seen.lock().await.last().cloned()
    }

    pub async fn request_count(&self) -> usize {
        self.state.seen.lock().await.len()
    }
}

async fn record(
    State(state): State<Arc<FakeState>>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> Response {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
    };

    let mut seen = SeenRequest {
        authorization: header_value(header::AUTHORIZATION),
        accept: header_value(header::ACCEPT),
        ..Default::default()
    };

    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        let is_file = field.file_name().is_some();
        let data = field.bytes().await.unwrap_or_default();
        seen.fields.push(name.clone());
        if is_file {
            seen.files.insert(name, data.to_vec());
        } else {
            seen.texts
                .insert(name, String::from_utf8_lossy(&data).into_owned());
        }
    }

    state.seen.lock().await.push(seen);
    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }
    state.reply.clone().into_response()
}
