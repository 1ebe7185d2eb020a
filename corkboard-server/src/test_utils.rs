use std::path::Path;

use tempfile::TempDir;

use crate::api::ServerConfig;
use crate::api_state::ApiState;

pub const ORGANIZER_PAGE: &str = "<!DOCTYPE html><title>organizer</title>";

pub const OUTSIDE_SECRET: &str = "secret.txt";

/// A scratch service root (`<tmp>/site`) holding the organizer page and one
/// stylesheet, next to a file that must never be served.
pub struct TestRoot {
    pub dir: TempDir,
    pub config: ServerConfig,
}

impl TestRoot {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(OUTSIDE_SECRET), "secret").unwrap();
        let site = dir.path().join("site");
        std::fs::create_dir_all(site.join("css")).unwrap();
        std::fs::write(site.join("image-organizer.html"), ORGANIZER_PAGE).unwrap();
        std::fs::write(site.join("css").join("app.css"), "body {}").unwrap();
        let config = test_config(&site);
        Self { dir, config }
    }

    pub fn site(&self) -> &Path {
        &self.config.static_root
    }

    pub fn state(&self) -> ApiState {
        let state = ApiState::new(&self.config);
        state.store.ensure_upload_dir().unwrap();
        state
    }
}

pub fn test_config(root: &Path) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        static_root: root.to_path_buf(),
        organizer_page: "image-organizer.html".to_string(),
        upload_dir: root.join("images"),
        assignments_file: root.join("image-assignments.json"),
        cors_permissive: true,
        max_assignments_bytes: 1024 * 1024,
    }
}

/// Builds the app for `$root` and runs `actix_web::test::init_service` on it.
macro_rules! init_test_app {
    ($root:expr) => {{
        let state = $root.state();
        let limit = $root.config.max_assignments_bytes;
        actix_web::test::init_service(
            actix_web::App::new()
                .configure(|cfg| crate::api::configure_app(cfg, state, limit)),
        )
        .await
    }};
}

pub(crate) use init_test_app;
