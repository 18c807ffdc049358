use crate::core::image_ops::prepare_init_image;
use crate::core::request::resolve_prompt;
use crate::server::types::{AppError, AppState};
use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

// server status handler
pub async fn server_status_handler() -> Json<Value> {
    Json(json!({"status": "running"}))
}

pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}

struct GenerateForm {
    image: Option<Bytes>,
    prompt: String,
}

async fn read_form(mut multipart: Multipart) -> Result<GenerateForm, AppError> {
    let mut form = GenerateForm {
        image: None,
        prompt: String::new(),
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Internal(e.body_text()))?
    {
        match field.name() {
            Some("image") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Internal(e.body_text()))?;
                if !data.is_empty() {
                    form.image = Some(data);
                }
            }
            Some("prompt") => {
                form.prompt = field
                    .text()
                    .await
                    .map_err(|e| AppError::Internal(e.body_text()))?;
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Resizes the upload and forwards it to the legacy upstream, relaying its JSON.
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    let start_time = std::time::Instant::now();

    // a body that is not multipart at all carries no image either
    let multipart = multipart.map_err(|e| {
        tracing::warn!(%request_id, rejection = %e.body_text(), "non-multipart generate request");
        AppError::MissingImage
    })?;

    let form = read_form(multipart).await?;
    let Some(image) = form.image else {
        tracing::warn!(%request_id, "generate request without image");
        return Err(AppError::MissingImage);
    };
    let prompt = resolve_prompt(&form.prompt);

    tracing::info!(%request_id, bytes = image.len(), %prompt, "generate request received");

    let init_image = tokio::task::spawn_blocking(move || prepare_init_image(&image))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body = state.upstream.image_to_image(init_image, &prompt).await?;

    tracing::info!(
        %request_id,
        bytes = body.len(),
        elapsed = ?start_time.elapsed(),
        "generate request completed"
    );

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        body,
    )
        .into_response())
}
