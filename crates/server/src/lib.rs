//! HTTP Server
//!
//! actix-web front for the query and upload-and-merge operations.
//!
//! ## Routes
//!
//! - `GET  /health` — Opens the default database and runs `SELECT 1`
//! - `POST /query`  — Ad-hoc SQL against a local, remote, or Parquet source
//! - `POST /upload` — Multipart CSV/Parquet upsert into a managed table
mod form;
pub mod handlers;

pub use form::Form;

use actix_cors::Cors;
use actix_web::App;
use actix_web::HttpResponse;
use actix_web::HttpServer;
use actix_web::error::InternalError;
use actix_web::middleware::Logger;
use actix_web::web;
use qd_auth::Tokens;
use qd_core::Config;
use qd_dto::ErrorDetail;

/// Registers every route plus the JSON error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        let body = HttpResponse::BadRequest().json(ErrorDetail::from(&err));
        InternalError::from_response(err, body).into()
    }))
    .route("/health", web::get().to(handlers::health))
    .route("/query", web::post().to(handlers::query))
    .route("/upload", web::post().to(handlers::upload));
}

#[rustfmt::skip]
pub async fn run(config: Config) -> Result<(), std::io::Error> {
    let tokens = web::Data::new(Tokens::from_config(&config));
    let bind = config.bind.clone();
    let workers = config.workers;
    log::info!("default database: {}", config.local());
    let config = web::Data::new(config);
    log::info!("starting server on {}", bind);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::new("%r %s %Ts"))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header(),
            )
            .app_data(config.clone())
            .app_data(tokens.clone())
            .configure(configure)
    })
    .workers(workers)
    .bind(bind)?
    .run()
    .await
}
