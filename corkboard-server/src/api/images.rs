use actix_files::NamedFile;
use actix_web::{get, web};

use crate::api::static_files::open_file;
use crate::api_state::ApiState;
use crate::error::ApiError;

#[get("/images/{filename}")]
pub async fn get_image(
    state: web::Data<ApiState>,
    filename: web::Path<String>,
) -> Result<NamedFile, ApiError> {
    let filename = filename.into_inner();
    let path = state.store.image_path(&filename).map_err(|e| {
        log::warn!("rejected image name {:?}: {}", filename, e);
        ApiError::NotFound
    })?;
    open_file(&path).await
}
