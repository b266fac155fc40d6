use actix_web::{middleware, web, App, HttpServer};
use actix_cors::Cors;
use color_eyre::Result;
use eyre::WrapErr;
use log::{debug, info};
use std::sync::Arc;
// I think we have to add crate here because
// of the other crate named "config" that we
// use as a dependency.
use crate::config::Config;
use crate::db::{self, SqliteStore, Store};
use error::{Error, MSG_INVALID_DATA};
mod handlers;
mod dtos;
mod error;
mod helpers;
mod validation;

// Served as-is by GET /api.
const ENDPOINTS_JSON: &str = include_str!("endpoints.json");
// Comments and votes are tiny, 64 KiB is plenty.
pub const MAX_BODY_SIZE: usize = 64 * 1024;

// Declare app state struct:
pub struct AppState {
  pub store: Arc<dyn Store>,
  pub endpoints: serde_json::Value
}

impl AppState {
  pub fn new(store: Arc<dyn Store>) -> Result<Self> {
    let endpoints = serde_json::from_str(ENDPOINTS_JSON)
      .context("Parsing endpoints metadata")?;
    Ok(Self { store, endpoints })
  }
}

// Function to start the server.
pub async fn run() -> Result<()> {
  let config = Config::from_env()?;
  debug!("Current config: {:?}", config);

  let pool = db::open_pool(&config.db_path, config.pool_max_size)?;
  if config.init_schema {
    info!("Creating missing tables in {}", config.db_path);
    db::init_schema(&pool)?;
  }

  let app_state = web::Data::new(
    AppState::new(Arc::new(SqliteStore::new(pool)))?
  );
  let allow_any_origin = config.cors_allow_any_origin;

  info!("Listening on {}", config.bind_address);
  HttpServer::new(move || {
    App::new()
      .app_data(app_state.clone())
      .wrap(cors(allow_any_origin))
      .wrap(middleware::Logger::default())
      .configure(api_config)
      .default_service(web::route().to(handlers::not_found))
  })
  .bind(&config.bind_address)?
  .run()
  .await
  .context("Start Actix web server")
}

fn cors(allow_any_origin: bool) -> Cors {
  if allow_any_origin {
    Cors::permissive()
  } else {
    Cors::default()
  }
}

// Route configuration:
pub fn api_config(cfg: &mut web::ServiceConfig) {
  cfg.app_data(web::QueryConfig::default().error_handler(|_, _| {
      Error::InvalidValue(MSG_INVALID_DATA).into()
    }))
    .app_data(web::PayloadConfig::new(MAX_BODY_SIZE))
    .route("/api", web::get().to(handlers::endpoints))
    .route("/api/topics", web::get().to(handlers::topics))
    .route("/api/articles", web::get().to(handlers::articles))
    .route("/api/articles/{article_id}", web::get().to(handlers::article))
    .route("/api/articles/{article_id}", web::patch().to(handlers::update_article_votes))
    .route("/api/articles/{article_id}/comments", web::get().to(handlers::article_comments))
    .route("/api/articles/{article_id}/comments", web::post().to(handlers::post_comment))
    .route("/api/comments/{comment_id}", web::delete().to(handlers::delete_comment))
    .route("/api/users", web::get().to(handlers::users));
}
