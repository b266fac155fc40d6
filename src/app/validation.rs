use serde_json::{Map, Value};
use super::error::{
  Error,
  MSG_INVALID_DATA,
  MSG_INVALID_TYPE,
  MSG_MISSING_VALUE,
  MSG_MISSING_VALUES
};

pub type JsonBody = Map<String, Value>;

/// A single check in a request pipeline: `holds` has to return
/// true or the request stops there with `rejection`.
///
/// Predicates may hit the store, which is why they return a
/// `Result`: a store failure aborts the pipeline with its own
/// error instead of the rejection.
pub struct Rule<'a, T: ?Sized> {
  holds: Box<dyn Fn(&T) -> Result<bool, Error> + 'a>,
  rejection: fn() -> Error
}

impl<'a, T: ?Sized> Rule<'a, T> {
  pub fn new<F>(holds: F, rejection: fn() -> Error) -> Self
    where F: Fn(&T) -> Result<bool, Error> + 'a
  {
    Self {
      holds: Box::new(holds),
      rejection
    }
  }
}

/// Evaluates the rules in order and stops at the first one
/// that doesn't hold.
pub fn check_all<T: ?Sized>(subject: &T, rules: &[Rule<'_, T>]) -> Result<(), Error> {
  for rule in rules {
    if !(rule.holds)(subject)? {
      return Err((rule.rejection)());
    }
  }
  Ok(())
}

// Path identifiers are integers in the database. Anything
// else is refused before we go anywhere near it.
pub fn parse_id(segment: &str) -> Result<i64, Error> {
  segment.trim().parse::<i64>()
    .map_err(|_| Error::InvalidValue(MSG_INVALID_TYPE))
}

// An empty body is the same as an empty object, the
// field checks will complain about what's missing.
pub fn parse_json_body(raw: &[u8]) -> Result<JsonBody, Error> {
  if raw.iter().all(u8::is_ascii_whitespace) {
    return Ok(JsonBody::new());
  }
  match serde_json::from_slice::<Value>(raw) {
    Ok(Value::Object(map)) => Ok(map),
    _ => Err(Error::InvalidValue(MSG_INVALID_DATA))
  }
}

fn present(body: &JsonBody, key: &str) -> bool {
  body.get(key).map_or(false, |v| !v.is_null())
}

fn is_string(body: &JsonBody, key: &str) -> bool {
  body.get(key).map_or(false, Value::is_string)
}

fn string_field(body: &JsonBody, key: &str) -> String {
  body.get(key)
    .and_then(Value::as_str)
    .unwrap_or_default()
    .to_string()
}

#[derive(Debug, PartialEq)]
pub struct CommentInput {
  pub username: String,
  pub body: String
}

pub fn comment_input(body: &JsonBody) -> Result<CommentInput, Error> {
  check_all(body, &[
    Rule::new(
      |b: &JsonBody| Ok(present(b, "username") && present(b, "body")),
      || Error::MissingField(MSG_MISSING_VALUES)
    ),
    Rule::new(
      |b: &JsonBody| Ok(is_string(b, "username") && is_string(b, "body")),
      || Error::InvalidValue(MSG_INVALID_DATA)
    )
  ])?;
  Ok(CommentInput {
    username: string_field(body, "username"),
    body: string_field(body, "body")
  })
}

// Votes are a delta, positive or negative. Floats and
// numeric strings are refused.
pub fn vote_delta(body: &JsonBody) -> Result<i64, Error> {
  check_all(body, &[
    Rule::new(
      |b: &JsonBody| Ok(present(b, "inc_votes")),
      || Error::MissingField(MSG_MISSING_VALUE)
    ),
    Rule::new(
      |b: &JsonBody| Ok(b.get("inc_votes").map_or(false, Value::is_i64)),
      || Error::InvalidValue(MSG_INVALID_DATA)
    )
  ])?;
  body.get("inc_votes")
    .and_then(Value::as_i64)
    .ok_or(Error::InvalidValue(MSG_INVALID_DATA))
}
