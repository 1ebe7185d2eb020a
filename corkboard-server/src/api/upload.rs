use actix_multipart::Multipart;
use actix_web::{http::header, post, web, HttpRequest, Responder};
use corkboard_api_schema::upload::{UploadResponse, UPLOAD_FIELD_NAME};
use corkboard_common::file_name::ConfinedName;
use futures_util::StreamExt as _;

use crate::api_state::ApiState;
use crate::error::ApiError;

fn is_multipart_form(req: &HttpRequest) -> bool {
    req.headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Stores the first `file` part that carries a filename. Other parts are
/// skipped.
#[post("/upload")]
pub async fn upload_image(
    state: web::Data<ApiState>,
    req: HttpRequest,
    payload: web::Payload,
) -> Result<impl Responder, ApiError> {
    if !is_multipart_form(&req) {
        return Err(ApiError::NoFilePart);
    }

    let mut multipart = Multipart::new(req.headers(), payload);
    while let Some(field) = multipart.next().await {
        let mut field = field?;
        let filename = match field.content_disposition() {
            Some(cd) if cd.get_name() == Some(UPLOAD_FIELD_NAME) => {
                cd.get_filename().map(str::to_string)
            }
            _ => None,
        };
        let Some(filename) = filename else {
            continue;
        };
        if filename.is_empty() {
            return Err(ApiError::NoSelectedFile);
        }
        let name = ConfinedName::new(&filename).map_err(|e| {
            log::warn!("rejected upload: {}", e);
            ApiError::InvalidFileName
        })?;

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            data.extend_from_slice(&chunk?);
        }

        let store = state.store.clone();
        let size = data.len();
        let stored = name.clone();
        let path = web::block(move || store.write_image(&stored, &data)).await??;
        log::info!("stored upload {} ({} bytes)", path.display(), size);

        return Ok(web::Json(UploadResponse {
            filename: name.to_string(),
        }));
    }

    Err(ApiError::NoFilePart)
}
