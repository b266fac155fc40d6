mod app;
mod config;
mod db;
mod utils;
use color_eyre::Result;
use dotenv::dotenv;

#[actix_web::main]
async fn main() -> Result<()> {
  color_eyre::install()?;
  dotenv().ok();
  // Log at info level when RUST_LOG is absent.
  env_logger::Builder::from_env(
    env_logger::Env::default().default_filter_or("info")
  ).init();

  app::run().await
}
