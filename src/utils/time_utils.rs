use chrono::{DateTime, Local, SecondsFormat};

// JSON dates look like what Postgres and JavaScript would
// give out: 2020-07-09T20:11:00.000Z
pub fn timestamp_to_date_string(timestamp: i64) -> String {
  DateTime::from_timestamp(timestamp, 0)
    .map(|d| d.to_rfc3339_opts(SecondsFormat::Millis, true))
    .unwrap_or_default()
}

pub fn current_timestamp() -> i64 {
  Local::now().timestamp()
}
