// Adding the context method to errors:
use eyre::WrapErr;
use color_eyre::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
  pub db_path: String,
  pub bind_address: String,
  pub pool_max_size: u32,
  // Creates the tables when they're missing. The
  // production database is supposed to already exist
  // so this is off by default.
  pub init_schema: bool,
  pub cors_allow_any_origin: bool
}

impl Config {

  pub fn from_env() -> Result<Config> {
    Self::defaults()
      .and_then(|b| b.add_source(config::Environment::default().try_parsing(true)).build())
      .and_then(|c| c.try_deserialize())
      // The error has to be given a context for
      // color_eyre to work here:
      .context("Loading configuration from env")
  }

  // RUST_LOG is handled in main.rs. Keys have to be
  // lowercase when compared to what's in the .env file.
  fn defaults() -> std::result::Result<
    config::ConfigBuilder<config::builder::DefaultState>,
    config::ConfigError
  > {
    config::Config::builder()
      .set_default("db_path", "./nc_news.db")?
      .set_default("bind_address", "127.0.0.1:9090")?
      .set_default("pool_max_size", 8)?
      .set_default("init_schema", false)?
      .set_default("cors_allow_any_origin", true)
  }

}
