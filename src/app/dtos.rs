use serde::Serialize;
use crate::db::entities::*;
use crate::utils::time_utils;

// Entities are converted to DTOs with From so the date
// formatting happens in one place.

// Topics and users go out exactly as they are stored.
pub use crate::db::entities::Topic as TopicDto;
pub use crate::db::entities::User as UserDto;

#[derive(Debug, Serialize)]
pub struct ArticleDto {
  pub article_id: i64,
  pub title: String,
  pub topic: String,
  pub author: String,
  pub body: String,
  pub created_at: String,
  pub votes: i64,
  pub article_img_url: String
}

impl From<Article> for ArticleDto {
  fn from(article: Article) -> Self {
    Self {
      article_id: article.article_id,
      title: article.title,
      topic: article.topic,
      author: article.author,
      body: article.body,
      created_at: time_utils::timestamp_to_date_string(article.created_at),
      votes: article.votes,
      article_img_url: article.article_img_url
    }
  }
}

#[derive(Debug, Serialize)]
pub struct ArticleSummaryDto {
  pub author: String,
  pub title: String,
  pub article_id: i64,
  pub topic: String,
  pub created_at: String,
  pub votes: i64,
  pub article_img_url: String,
  pub comment_count: i64
}

impl From<ArticleSummary> for ArticleSummaryDto {
  fn from(article: ArticleSummary) -> Self {
    Self {
      author: article.author,
      title: article.title,
      article_id: article.article_id,
      topic: article.topic,
      created_at: time_utils::timestamp_to_date_string(article.created_at),
      votes: article.votes,
      article_img_url: article.article_img_url,
      comment_count: article.comment_count
    }
  }
}

#[derive(Debug, Serialize)]
pub struct CommentDto {
  pub comment_id: i64,
  pub votes: i64,
  pub created_at: String,
  pub author: String,
  pub body: String,
  pub article_id: i64
}

impl From<Comment> for CommentDto {
  fn from(comment: Comment) -> Self {
    Self {
      comment_id: comment.comment_id,
      votes: comment.votes,
      created_at: time_utils::timestamp_to_date_string(comment.created_at),
      author: comment.author,
      body: comment.body,
      article_id: comment.article_id
    }
  }
}

// What we echo back after a comment was posted. The
// author is called username on the way in so it's
// called username on the way out too.
#[derive(Debug, Serialize)]
pub struct PostedCommentDto {
  pub username: String,
  pub body: String
}

impl From<Comment> for PostedCommentDto {
  fn from(comment: Comment) -> Self {
    Self {
      username: comment.author,
      body: comment.body
    }
  }
}

/* --- Response envelopes --- */
#[derive(Serialize)]
pub struct TopicsResponse {
  pub topics: Vec<TopicDto>
}

#[derive(Serialize)]
pub struct UsersResponse {
  pub users: Vec<UserDto>
}

#[derive(Serialize)]
pub struct ArticlesResponse {
  pub articles: Vec<ArticleSummaryDto>
}

// Single article lookups have always answered with a
// one element array.
#[derive(Serialize)]
pub struct ArticleLookupResponse {
  pub result: Vec<ArticleDto>
}

#[derive(Serialize)]
pub struct UpdatedArticleResponse {
  pub result: ArticleDto
}

#[derive(Serialize)]
pub struct CommentsResponse {
  pub comments: Vec<CommentDto>
}

#[derive(Serialize)]
pub struct PostedCommentResponse {
  pub posted: PostedCommentDto
}

#[derive(Serialize)]
pub struct EndpointsResponse<'a> {
  pub endpoints: &'a serde_json::Value
}
/* --- End response envelopes --- */

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn article_dto_formats_date() {
    let dto = ArticleDto::from(Article {
      article_id: 1,
      title: "t".to_string(),
      topic: "mitch".to_string(),
      author: "butter_bridge".to_string(),
      body: "b".to_string(),
      created_at: 1594325460,
      votes: -3,
      article_img_url: String::new()
    });
    assert_eq!(dto.created_at, "2020-07-09T20:11:00.000Z");
    assert_eq!(dto.votes, -3);
  }

  #[test]
  fn posted_comment_renames_author() {
    let posted = PostedCommentDto::from(Comment {
      comment_id: 19,
      article_id: 1,
      author: "lurker".to_string(),
      body: "nice".to_string(),
      created_at: 0,
      votes: 0
    });
    let json = serde_json::to_value(PostedCommentResponse { posted }).unwrap();
    assert_eq!(json, serde_json::json!({ "posted": { "username": "lurker", "body": "nice" } }));
  }
}
