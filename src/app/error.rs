use actix_web::{
  error::ResponseError,
  http::StatusCode,
  HttpResponse
};
use derive_more::Display;
use log::error;
use rusqlite::ErrorCode;
use serde::Serialize;

// Messages clients already depend on, don't touch them.
pub const MSG_INVALID_TYPE: &str = "bad request: invalid data type!";
pub const MSG_INVALID_DATA: &str = "ooops! bad request: invalid data!";
pub const MSG_MISSING_VALUES: &str = "required values missing!";
pub const MSG_MISSING_VALUE: &str = "required value missing!";

// The message for ServerFault is fixed, the actual cause
// only goes to the logs.
#[derive(Debug, Display)]
pub enum Error {
  #[display(fmt = "{}", _0)]
  InvalidValue(&'static str),
  #[display(fmt = "{}", _0)]
  MissingField(&'static str),
  #[display(fmt = "article not found!")]
  NotFoundArticle,
  #[display(fmt = "username not found!")]
  NotFoundUser,
  #[display(fmt = "comment not found!")]
  NotFoundComment,
  #[display(fmt = "path not found!")]
  NoRoute,
  #[display(fmt = "ooops! request body is too large!")]
  PayloadTooLarge,
  #[display(fmt = "Server error! We're very sorry!")]
  ServerFault(String)
}

#[derive(Serialize)]
struct ErrorBody {
  msg: String
}

impl ResponseError for Error {
  fn status_code(&self) -> StatusCode {
    match self {
      Error::InvalidValue(_) | Error::MissingField(_) => StatusCode::BAD_REQUEST,
      Error::NotFoundArticle
        | Error::NotFoundUser
        | Error::NotFoundComment
        | Error::NoRoute => StatusCode::NOT_FOUND,
      Error::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
      Error::ServerFault(_) => StatusCode::INTERNAL_SERVER_ERROR
    }
  }

  fn error_response(&self) -> HttpResponse {
    if let Error::ServerFault(cause) = self {
      error!("Responding with a server error - {}", cause);
    }
    HttpResponse::build(self.status_code())
      .json(ErrorBody { msg: self.to_string() })
  }
}

// Store errors come in as eyre reports. We look for the
// SQLite error underneath to decide what the client
// did wrong, if anything.
pub fn map_db_error(report: eyre::Report) -> Error {
  let code = report
    .downcast_ref::<rusqlite::Error>()
    .and_then(|e| match e {
      rusqlite::Error::SqliteFailure(ffi_error, _) => Some(*ffi_error),
      _ => None
    });
  match code {
    Some(e) if e.code == ErrorCode::TypeMismatch =>
      Error::InvalidValue(MSG_INVALID_TYPE),
    Some(e) if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
      Error::NotFoundUser,
    // Debug output has the whole chain of contexts.
    _ => Error::ServerFault(format!("{:?}", report))
  }
}
