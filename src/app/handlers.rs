use actix_web::{
  web,
  HttpResponse,
  Result
};
use serde::Deserialize;
use log::debug;
use crate::db::entities::{NewComment, VoteUpdate};
use super::dtos::*;
use super::error::{Error, map_db_error, MSG_INVALID_DATA};
use super::helpers::{request_body, run_blocking};
use super::validation::{
  check_all,
  comment_input,
  parse_id,
  parse_json_body,
  vote_delta,
  Rule
};
use super::AppState;

// Module with all the API handler functions. Every handler
// validates what it can from the request first, then does
// all of its store work in a single blocking closure.

/* --- Request query objects --- */
// Clients send these but the order is always newest
// first for now.
#[derive(Debug, Deserialize)]
pub struct SortQuery {
  pub sort_by: Option<String>,
  pub order: Option<String>
}
/* --- End request query objects --- */

fn log_ignored_sort(query: &SortQuery) {
  if query.sort_by.is_some() || query.order.is_some() {
    debug!("Ignoring sort parameters {:?}", query);
  }
}

// Default response when no route matched the request:
pub async fn not_found() -> Result<HttpResponse, Error> {
  Err(Error::NoRoute)
}

pub async fn endpoints(
  app_state: web::Data<AppState>
) -> HttpResponse {
  HttpResponse::Ok().json(EndpointsResponse { endpoints: &app_state.endpoints })
}

pub async fn topics(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let store = app_state.store.clone();
  let topics = run_blocking(move || {
    store.all_topics().map_err(map_db_error)
  }).await?;
  Ok(HttpResponse::Ok().json(TopicsResponse { topics }))
}

pub async fn users(
  app_state: web::Data<AppState>
) -> Result<HttpResponse, Error> {
  let store = app_state.store.clone();
  let users = run_blocking(move || {
    store.all_users().map_err(map_db_error)
  }).await?;
  Ok(HttpResponse::Ok().json(UsersResponse { users }))
}

pub async fn articles(
  app_state: web::Data<AppState>,
  query: web::Query<SortQuery>
) -> Result<HttpResponse, Error> {
  log_ignored_sort(&query);
  let store = app_state.store.clone();
  let articles = run_blocking(move || {
    store.articles_with_comment_count().map_err(map_db_error)
  }).await?;
  Ok(HttpResponse::Ok().json(ArticlesResponse {
    articles: articles.into_iter().map(Into::into).collect()
  }))
}

// Path variables have to be in a tuple.
pub async fn article(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let article_id = parse_id(&path.into_inner().0)?;
  let store = app_state.store.clone();
  let article = run_blocking(move || {
    store.article_by_id(article_id).map_err(map_db_error)
  }).await?;
  match article {
    Some(a) => Ok(HttpResponse::Ok().json(ArticleLookupResponse {
      result: vec![a.into()]
    })),
    None => Err(Error::NotFoundArticle)
  }
}

pub async fn update_article_votes(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>,
  body: Result<web::Bytes, actix_web::Error>
) -> Result<HttpResponse, Error> {
  let article_id = parse_id(&path.into_inner().0)?;
  let delta = vote_delta(&parse_json_body(&request_body(body)?)?)?;
  let store = app_state.store.clone();
  let update = run_blocking(move || {
    store.add_article_votes(article_id, delta).map_err(map_db_error)
  }).await?;
  match update {
    VoteUpdate::Applied(a) => Ok(HttpResponse::Ok().json(UpdatedArticleResponse { result: a.into() })),
    VoteUpdate::ArticleMissing => Err(Error::NotFoundArticle),
    VoteUpdate::OutOfRange => Err(Error::InvalidValue(MSG_INVALID_DATA))
  }
}

// An article nobody commented yet gets an empty list, we
// only 404 when the article itself doesn't exist.
pub async fn article_comments(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>,
  query: web::Query<SortQuery>
) -> Result<HttpResponse, Error> {
  let article_id = parse_id(&path.into_inner().0)?;
  log_ignored_sort(&query);
  let store = app_state.store.clone();
  let comments = run_blocking(move || {
    let comments = store.comments_for_article(article_id).map_err(map_db_error)?;
    if comments.is_empty() && !store.article_exists(article_id).map_err(map_db_error)? {
      return Err(Error::NotFoundArticle);
    }
    Ok(comments)
  }).await?;
  Ok(HttpResponse::Ok().json(CommentsResponse {
    comments: comments.into_iter().map(Into::into).collect()
  }))
}

pub async fn post_comment(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>,
  body: Result<web::Bytes, actix_web::Error>
) -> Result<HttpResponse, Error> {
  let article_id = parse_id(&path.into_inner().0)?;
  let input = comment_input(&parse_json_body(&request_body(body)?)?)?;
  let store = app_state.store.clone();
  let comment = run_blocking(move || {
    let new_comment = NewComment {
      article_id,
      author: input.username,
      body: input.body
    };
    // User first, then article. The foreign keys would catch
    // both anyway but couldn't tell us which one was wrong.
    check_all(&new_comment, &[
      Rule::new(
        |c: &NewComment| store.user_exists(&c.author).map_err(map_db_error),
        || Error::NotFoundUser
      ),
      Rule::new(
        |c: &NewComment| store.article_exists(c.article_id).map_err(map_db_error),
        || Error::NotFoundArticle
      )
    ])?;
    store.insert_comment(&new_comment).map_err(map_db_error)
  }).await?;
  Ok(HttpResponse::Created().json(PostedCommentResponse { posted: comment.into() }))
}

pub async fn delete_comment(
  app_state: web::Data<AppState>,
  path: web::Path<(String,)>
) -> Result<HttpResponse, Error> {
  let comment_id = parse_id(&path.into_inner().0)?;
  let store = app_state.store.clone();
  run_blocking(move || {
    check_all(&comment_id, &[
      Rule::new(
        |id: &i64| store.comment_exists(*id).map_err(map_db_error),
        || Error::NotFoundComment
      )
    ])?;
    // Someone else could have deleted it in the meantime.
    if store.delete_comment(comment_id).map_err(map_db_error)? {
      Ok(())
    } else {
      Err(Error::NotFoundComment)
    }
  }).await?;
  Ok(HttpResponse::NoContent().finish())
}
