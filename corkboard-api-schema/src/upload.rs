use serde::{Deserialize, Serialize};

pub const UPLOAD_FIELD_NAME: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
}
