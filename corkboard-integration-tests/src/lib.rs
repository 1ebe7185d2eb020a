use std::time::Duration;

use corkboard_api_client::CorkboardApiClient;
use corkboard_server::api::{bind_server, ServerConfig};
use tempfile::TempDir;
use tokio::runtime::{Builder, Runtime};

pub const ORGANIZER_PAGE: &str = "<!DOCTYPE html>\n<title>Image Organizer</title>\n";

/// A running server on an ephemeral `127.0.0.1` port over a scratch service
/// root.
pub struct TestServer {
    pub root: TempDir,
    pub client: CorkboardApiClient,
    _runtime: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();

        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("image-organizer.html"), ORGANIZER_PAGE).unwrap();
        let config = ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            static_root: root.path().to_path_buf(),
            organizer_page: "image-organizer.html".to_string(),
            upload_dir: root.path().join("images"),
            assignments_file: root.path().join("image-assignments.json"),
            cors_permissive: true,
            max_assignments_bytes: 64 * 1024 * 1024,
        };

        let (server, addrs) = runtime.block_on(async { bind_server(config) }).unwrap();
        runtime.spawn(async {
            server.await.unwrap();
        });

        let client = CorkboardApiClient::new(format!("http://{}", addrs[0]));
        wait_until_ready(&client);

        Self {
            root,
            client,
            _runtime: runtime,
        }
    }
}

fn wait_until_ready(client: &CorkboardApiClient) {
    for _ in 0..50 {
        if client.get_assignments().is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(100));
    }
    panic!("server at {} did not come up", client.base_url);
}
