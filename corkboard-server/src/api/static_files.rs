use std::path::Path;

use actix_files::NamedFile;
use actix_web::{get, web};
use corkboard_common::file_name::resolve_relative;

use crate::api_state::ApiState;
use crate::error::ApiError;

/// Opens a regular file for streaming with a content type guessed from its
/// extension. Directories and missing files are both reported as not found.
pub async fn open_file(path: &Path) -> Result<NamedFile, ApiError> {
    if !path.is_file() {
        return Err(ApiError::NotFound);
    }
    match NamedFile::open_async(path).await {
        Ok(file) => Ok(file),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ApiError::NotFound),
        Err(e) => Err(ApiError::Io(e)),
    }
}

#[get("/")]
pub async fn organizer_page(state: web::Data<ApiState>) -> Result<NamedFile, ApiError> {
    let path = resolve_relative(&state.static_root, &state.organizer_page)
        .map_err(|_| ApiError::NotFound)?;
    open_file(&path).await
}

#[get("/{path:.*}")]
pub async fn static_file(
    state: web::Data<ApiState>,
    path: web::Path<String>,
) -> Result<NamedFile, ApiError> {
    let relative = path.into_inner();
    let path = resolve_relative(&state.static_root, &relative).map_err(|e| {
        log::warn!("rejected static path {:?}: {}", relative, e);
        ApiError::NotFound
    })?;
    open_file(&path).await
}
