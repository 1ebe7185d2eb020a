use serde::{Deserialize, Serialize};

pub const CHUNK_INDEX_FILE_NAME: &str = "index.json";

pub fn chunk_file_name(chunk_number: usize) -> String {
    format!("chunk-{}.json", chunk_number)
}

/// `index.json` written next to the chunk files by `split-assignments`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkIndex {
    pub total_images: usize,
    pub total_chunks: usize,
    pub images_per_chunk: usize,
    pub chunks: Vec<String>,
}

impl ChunkIndex {
    pub fn new(total_images: usize, images_per_chunk: usize) -> Self {
        let total_chunks = total_images.div_ceil(images_per_chunk);
        Self {
            total_images,
            total_chunks,
            images_per_chunk,
            chunks: (1..=total_chunks).map(chunk_file_name).collect(),
        }
    }
}
