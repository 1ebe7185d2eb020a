use std::path::PathBuf;

use corkboard_local_system_store::LocalSystemStore;

use crate::api::ServerConfig;

#[derive(Debug, Clone)]
pub struct ApiState {
    pub store: LocalSystemStore,
    pub static_root: PathBuf,
    pub organizer_page: String,
}

impl ApiState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            store: LocalSystemStore::new(
                config.upload_dir.clone(),
                config.assignments_file.clone(),
            ),
            static_root: config.static_root.clone(),
            organizer_page: config.organizer_page.clone(),
        }
    }
}
