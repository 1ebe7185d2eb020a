use std::net::SocketAddr;
use std::path::PathBuf;

use actix_cors::Cors;
use actix_web::{dev::Server, middleware::Logger, web, App, HttpServer};
use corkboard_config_file::CorkboardConfigToml;

use crate::api_state::ApiState;
use crate::error::ServerError;

use self::assignments::{get_assignments, save_assignments};
use self::images::get_image;
use self::static_files::{organizer_page, static_file};
use self::upload::upload_image;

pub mod assignments;
pub mod images;
pub mod static_files;
pub mod upload;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_root: PathBuf,
    pub organizer_page: String,
    pub upload_dir: PathBuf,
    pub assignments_file: PathBuf,
    pub cors_permissive: bool,
    pub max_assignments_bytes: usize,
}

impl From<&CorkboardConfigToml> for ServerConfig {
    fn from(config: &CorkboardConfigToml) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            static_root: config.root.clone(),
            organizer_page: config.organizer_page.clone(),
            upload_dir: config.upload_dir_path(),
            assignments_file: config.assignments_file_path(),
            cors_permissive: config.cors_permissive,
            max_assignments_bytes: config.max_assignments_bytes,
        }
    }
}

/// Registers state and every route. The catch-all static route goes last so
/// it never shadows the API routes.
pub fn configure_app(cfg: &mut web::ServiceConfig, state: ApiState, max_assignments_bytes: usize) {
    cfg.app_data(web::Data::new(state))
        .app_data(web::PayloadConfig::new(max_assignments_bytes))
        .service(organizer_page)
        .service(get_image)
        .service(upload_image)
        .service(get_assignments)
        .service(save_assignments)
        .service(static_file);
}

/// `Cors::permissive()` lets any origin call the API; otherwise no
/// cross-origin request is allowed.
pub fn cors(permissive: bool) -> Cors {
    if permissive {
        Cors::permissive()
    } else {
        Cors::default()
    }
}

/// Creates the upload directory and binds the listener. Returns the server
/// future along with the addresses it is bound to, so a port of 0 can be
/// read back.
pub fn bind_server(config: ServerConfig) -> Result<(Server, Vec<SocketAddr>), ServerError> {
    let state = ApiState::new(&config);
    state
        .store
        .ensure_upload_dir()
        .map_err(ServerError::UploadDir)?;

    log::info!(
        "serving {} with uploads in {} and assignments in {}",
        config.static_root.display(),
        config.upload_dir.display(),
        config.assignments_file.display()
    );

    let cors_permissive = config.cors_permissive;
    let max_assignments_bytes = config.max_assignments_bytes;
    let addr = format!("{}:{}", config.host, config.port);

    let server = HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(cors(cors_permissive))
            .wrap(Logger::default())
            .configure(|cfg| configure_app(cfg, state, max_assignments_bytes))
    })
    .bind((config.host.as_str(), config.port))
    .map_err(|source| ServerError::Bind {
        addr: addr.clone(),
        source,
    })?;

    let addrs = server.addrs();
    for addr in &addrs {
        log::info!("listening on http://{}", addr);
    }
    Ok((server.run(), addrs))
}

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let (server, _) = bind_server(config)?;
    server.await.map_err(ServerError::Run)
}
