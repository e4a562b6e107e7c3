mod config;

use actix_files::Files;
use actix_web::{App, HttpServer, middleware};
use config::ServerConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = ServerConfig::from_env();
    if !config.index_file().is_file() {
        log::warn!(
            "{} not found; build the map client with `trunk build --release` first",
            config.index_file().display()
        );
    }

    log::info!("Serving journey map from {} on {}:{}", config.dist_dir.display(), config.bind_addr, config.port);

    let dist_dir = config.dist_dir.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Compress::default())
            .wrap(middleware::Logger::default())
            .service(Files::new("/", dist_dir.clone()).index_file("index.html"))
    })
    .bind((config.bind_addr, config.port))?
    .run()
    .await
}
