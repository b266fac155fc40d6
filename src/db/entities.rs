use serde::{Deserialize, Serialize};

// Rows as they come out of SQLite. Dates are unix
// timestamps in there, the DTOs take care of turning
// them into something a browser can read.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Topic {
  pub slug: String,
  pub description: String
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
  pub username: String,
  pub name: String,
  pub avatar_url: String
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
  pub article_id: i64,
  pub title: String,
  pub topic: String,
  pub author: String,
  pub body: String,
  pub created_at: i64,
  pub votes: i64,
  pub article_img_url: String
}

// What the article listing shows. No body but
// we get the amount of comments.
#[derive(Debug, Clone, PartialEq)]
pub struct ArticleSummary {
  pub article_id: i64,
  pub title: String,
  pub topic: String,
  pub author: String,
  pub created_at: i64,
  pub votes: i64,
  pub article_img_url: String,
  pub comment_count: i64
}

#[derive(Debug, Clone, PartialEq)]
pub struct Comment {
  pub comment_id: i64,
  pub article_id: i64,
  pub author: String,
  pub body: String,
  pub created_at: i64,
  pub votes: i64
}

// What came out of a vote update. SQLite would quietly turn
// an overflowing total into a REAL, so that case never
// gets written.
#[derive(Debug, Clone, PartialEq)]
pub enum VoteUpdate {
  Applied(Article),
  ArticleMissing,
  OutOfRange
}

// Comment that doesn't exist in the database yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewComment {
  pub article_id: i64,
  pub author: String,
  pub body: String
}
