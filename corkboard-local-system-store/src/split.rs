use std::path::Path;

use corkboard_api_schema::chunk_index::{chunk_file_name, ChunkIndex, CHUNK_INDEX_FILE_NAME};
use serde_json::{Map, Value};

use crate::{Error, LocalSystemStore};

pub const DEFAULT_IMAGES_PER_CHUNK: usize = 50;

impl LocalSystemStore {
    /// Splits the stored assignments object into `chunk-<n>.json` files of at
    /// most `images_per_chunk` entries each, plus an `index.json` listing them.
    pub fn split_assignments(
        &self,
        output_dir: &Path,
        images_per_chunk: usize,
    ) -> Result<ChunkIndex, Error> {
        if images_per_chunk == 0 {
            return Err(Error::InvalidChunkSize);
        }
        let document = self.read_assignments()?.unwrap_or_else(|| Value::Object(Map::new()));
        let Value::Object(entries) = document else {
            return Err(Error::NotAnObject);
        };

        let index = ChunkIndex::new(entries.len(), images_per_chunk);
        log::info!(
            "splitting {} images into {} chunks of {}",
            index.total_images,
            index.total_chunks,
            images_per_chunk
        );

        std::fs::create_dir_all(output_dir).map_err(Error::IOError)?;

        let mut entries = entries.into_iter();
        for chunk_name in &index.chunks {
            let chunk: Map<String, Value> = entries.by_ref().take(images_per_chunk).collect();
            let data = serde_json::to_vec(&Value::Object(chunk)).map_err(Error::Json)?;
            let path = output_dir.join(chunk_name);
            std::fs::write(&path, &data).map_err(Error::IOError)?;
            log::info!("created {} ({} bytes)", path.display(), data.len());
        }

        let data = serde_json::to_vec_pretty(&index).map_err(Error::Json)?;
        std::fs::write(output_dir.join(CHUNK_INDEX_FILE_NAME), data).map_err(Error::IOError)?;

        Ok(index)
    }
}
