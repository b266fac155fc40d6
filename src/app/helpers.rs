use actix_web::{http::StatusCode, web};
use super::error::{Error, MSG_INVALID_DATA};

// rusqlite is not async. Every request runs its whole chain
// of store calls in one go on the blocking thread pool so
// the checks still happen in order.
pub async fn run_blocking<F, T>(f: F) -> Result<T, Error>
  where
    F: FnOnce() -> Result<T, Error> + Send + 'static,
    T: Send + 'static
{
  web::block(f)
    .await
    .map_err(|e| Error::ServerFault(format!("Blocking task failed - {}", e)))?
}

// Bodies are taken as a Result so that actix's own plain
// text errors (mostly the size limit) never reach clients.
pub fn request_body(
  body: Result<web::Bytes, actix_web::Error>
) -> Result<web::Bytes, Error> {
  body.map_err(|e| {
    if e.as_response_error().status_code() == StatusCode::PAYLOAD_TOO_LARGE {
      Error::PayloadTooLarge
    } else {
      Error::InvalidValue(MSG_INVALID_DATA)
    }
  })
}
