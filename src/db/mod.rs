use rusqlite::{params, Connection, OptionalExtension, Params, Row};
use r2d2_sqlite::SqliteConnectionManager;
pub mod entities;
mod mappers;
#[cfg(test)]
pub mod fixtures;
use eyre::WrapErr;
use color_eyre::Result;
use entities::*;
use mappers::*;

// Type alias to make function signatures much clearer:
pub type Pool = r2d2::Pool<SqliteConnectionManager>;

const SCHEMA: &str = include_str!("schema.sql");

// Column lists shared by the queries and the mappers
// (mappers.rs reads them by position).
const ARTICLE_COLUMNS: &str = "article_id, title, topic, author, body, \
  created_at, votes, article_img_url";
const COMMENT_COLUMNS: &str = "comment_id, article_id, author, body, \
  created_at, votes";

// SQLite leaves foreign keys off unless asked, every
// connection the pool hands out has to turn them on.
fn enable_foreign_keys(conn: &mut Connection) -> Result<(), rusqlite::Error> {
  conn.execute_batch("PRAGMA foreign_keys = ON;")
}

pub fn open_pool(db_path: &str, max_size: u32) -> Result<Pool> {
  let manager = SqliteConnectionManager::file(db_path)
    .with_init(enable_foreign_keys);
  r2d2::Pool::builder()
    .max_size(max_size)
    .build(manager)
    .context("Opening database connection pool")
}

pub fn init_schema(pool: &Pool) -> Result<()> {
  let conn = pool.get()?;
  conn.execute_batch(SCHEMA)
    .context("Creating database schema")
}

/// Everything the handlers need from the relational store.
///
/// Handlers only ever see this trait through the application
/// state, which is how tests swap in a fake.
pub trait Store: Send + Sync {
  fn all_topics(&self) -> Result<Vec<Topic>>;
  fn all_users(&self) -> Result<Vec<User>>;
  fn user_exists(&self, username: &str) -> Result<bool>;
  fn article_by_id(&self, article_id: i64) -> Result<Option<Article>>;
  fn article_exists(&self, article_id: i64) -> Result<bool>;
  /// Newest first, articles without comments included.
  fn articles_with_comment_count(&self) -> Result<Vec<ArticleSummary>>;
  /// Adds `delta` to the current vote count. Nothing is written
  /// when the new total wouldn't fit in an i64.
  fn add_article_votes(&self, article_id: i64, delta: i64) -> Result<VoteUpdate>;
  /// Newest first.
  fn comments_for_article(&self, article_id: i64) -> Result<Vec<Comment>>;
  fn comment_exists(&self, comment_id: i64) -> Result<bool>;
  fn insert_comment(&self, comment: &NewComment) -> Result<Comment>;
  /// Returns false if there was nothing to delete.
  fn delete_comment(&self, comment_id: i64) -> Result<bool>;
}

pub struct SqliteStore {
  pool: Pool
}

impl SqliteStore {
  pub fn new(pool: Pool) -> Self {
    Self { pool }
  }
}

// Stole most of the signature from the rusqlite doc.
fn select_many<T, P, F>(
  pool: &Pool,
  query: &str,
  params: P,
  mapper: F
) -> Result<Vec<T>>
  where
    P: Params,
    F: FnMut(&Row<'_>) -> Result<T, rusqlite::Error>,
{
  let conn = pool.get()?;
  let mut stmt = conn.prepare(query)?;
  let rows = stmt.query_map(params, mapper)
    .and_then(Iterator::collect)
    .context("Generic select_many query")?;
  Ok(rows)
}

fn select_one<T, P, F>(
  pool: &Pool,
  query: &str,
  params: P,
  mapper: F
) -> Result<Option<T>>
  where
    P: Params,
    F: FnOnce(&Row<'_>) -> Result<T, rusqlite::Error>,
{
  let conn = pool.get()?;
  let row = conn.query_row(query, params, mapper)
    .optional()
    .context("Generic select_one query")?;
  Ok(row)
}

fn exists<P: Params>(pool: &Pool, query: &str, params: P) -> Result<bool> {
  let found: Option<i64> = select_one(pool, query, params, |row| row.get(0))?;
  Ok(found.is_some())
}

impl Store for SqliteStore {

  fn all_topics(&self) -> Result<Vec<Topic>> {
    select_many(
      &self.pool,
      "SELECT slug, description FROM topics",
      [],
      map_topic
    )
  }

  fn all_users(&self) -> Result<Vec<User>> {
    select_many(
      &self.pool,
      "SELECT username, name, avatar_url FROM users",
      [],
      map_user
    )
  }

  fn user_exists(&self, username: &str) -> Result<bool> {
    exists(
      &self.pool,
      "SELECT 1 FROM users WHERE username = ?",
      params![username]
    )
  }

  fn article_by_id(&self, article_id: i64) -> Result<Option<Article>> {
    select_one(
      &self.pool,
      &format!("SELECT {} FROM articles WHERE article_id = ?", ARTICLE_COLUMNS),
      params![article_id],
      map_article
    )
  }

  fn article_exists(&self, article_id: i64) -> Result<bool> {
    exists(
      &self.pool,
      "SELECT 1 FROM articles WHERE article_id = ?",
      params![article_id]
    )
  }

  fn articles_with_comment_count(&self) -> Result<Vec<ArticleSummary>> {
    // COUNT on the comments column (not *) so the LEFT JOIN
    // gives 0 to articles nobody commented.
    select_many(
      &self.pool,
      "SELECT articles.article_id, articles.title, articles.topic,
      articles.author, articles.created_at, articles.votes,
      articles.article_img_url, COUNT(comments.comment_id) AS comment_count
      FROM articles
      LEFT JOIN comments ON articles.article_id = comments.article_id
      GROUP BY articles.article_id
      ORDER BY articles.created_at DESC, articles.article_id DESC",
      [],
      map_article_summary
    )
  }

  fn add_article_votes(&self, article_id: i64, delta: i64) -> Result<VoteUpdate> {
    // Single statement so concurrent votes can't overwrite
    // each other. Integer overflow makes SQLite switch to a
    // REAL, the typeof guard keeps those rows untouched.
    let updated = select_one(
      &self.pool,
      &format!(
        "UPDATE articles SET votes = votes + ?1
        WHERE article_id = ?2 AND typeof(votes + ?1) = 'integer'
        RETURNING {}",
        ARTICLE_COLUMNS
      ),
      params![delta, article_id],
      map_article
    )?;
    match updated {
      Some(article) => Ok(VoteUpdate::Applied(article)),
      None if self.article_exists(article_id)? => Ok(VoteUpdate::OutOfRange),
      None => Ok(VoteUpdate::ArticleMissing)
    }
  }

  fn comments_for_article(&self, article_id: i64) -> Result<Vec<Comment>> {
    select_many(
      &self.pool,
      &format!(
        "SELECT {} FROM comments WHERE article_id = ?
        ORDER BY created_at DESC, comment_id DESC",
        COMMENT_COLUMNS
      ),
      params![article_id],
      map_comment
    )
  }

  fn comment_exists(&self, comment_id: i64) -> Result<bool> {
    exists(
      &self.pool,
      "SELECT 1 FROM comments WHERE comment_id = ?",
      params![comment_id]
    )
  }

  fn insert_comment(&self, comment: &NewComment) -> Result<Comment> {
    let conn = pool_conn(&self.pool)?;
    conn.query_row(
      &format!(
        "INSERT INTO comments (article_id, author, body, created_at)
        VALUES (?, ?, ?, ?) RETURNING {}",
        COMMENT_COLUMNS
      ),
      params![
        comment.article_id,
        comment.author,
        comment.body,
        crate::utils::time_utils::current_timestamp()
      ],
      map_comment
    ).context("Inserting a comment")
  }

  fn delete_comment(&self, comment_id: i64) -> Result<bool> {
    let conn = pool_conn(&self.pool)?;
    let deleted = conn.execute(
      "DELETE FROM comments WHERE comment_id = ?",
      params![comment_id]
    ).context("Deleting a comment")?;
    Ok(deleted > 0)
  }

}

fn pool_conn(pool: &Pool) -> Result<r2d2::PooledConnection<SqliteConnectionManager>> {
  pool.get().context("Getting a connection from the pool")
}
