/// News Recommendation API Handlers
///
/// HTTP endpoints for personalized and related-article recommendations
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::{News, NewsDetail};
use crate::services::NewsRecommendationEngine;

pub const MAX_LIMIT: usize = 100;

/// Query parameters for GET /news/recommendation
#[derive(Debug, Deserialize)]
pub struct RecommendationQuery {
    /// Missing or empty means anonymous
    pub user_id: Option<String>,

    /// Number of recommendations to return (default: DEFAULT_TOP_N, max: 100)
    pub limit: Option<usize>,
}

/// Query parameters for GET /news/recommendation/info/{news_id}
#[derive(Debug, Deserialize)]
pub struct RelatedQuery {
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    /// News in ranked order
    pub news: Vec<News>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct NewsInfoResponse {
    #[serde(flatten)]
    pub detail: NewsDetail,

    #[serde(rename = "relatedNews")]
    pub related_news: Vec<News>,
}

#[derive(Debug, Serialize)]
pub struct UsersResponse {
    pub users: Vec<String>,
}

/// Handler state shared by all workers
pub struct HandlerState {
    pub engine: Arc<NewsRecommendationEngine>,
}

fn resolve_limit(limit: Option<usize>, default: usize) -> Result<usize> {
    match limit {
        None => Ok(default),
        Some(n) if (1..=MAX_LIMIT).contains(&n) => Ok(n),
        Some(n) => Err(AppError::BadRequest(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, n
        ))),
    }
}

/// GET /news/recommendation
pub async fn get_recommendations(
    query: web::Query<RecommendationQuery>,
    state: web::Data<HandlerState>,
) -> Result<HttpResponse> {
    let engine = state.engine.clone();
    let limit = resolve_limit(query.limit, engine.default_top_n())?;
    let user_id = query.into_inner().user_id;

    debug!(user_id = ?user_id, limit = limit, "Getting news recommendations");

    // Neighbour search is CPU-bound
    let news =
        tokio::task::spawn_blocking(move || engine.recommend_for_user(user_id.as_deref(), limit))
            .await?;

    let count = news.len();
    Ok(HttpResponse::Ok().json(RecommendationResponse { news, count }))
}

/// GET /news/recommendation/info/{news_id}
pub async fn get_news_info(
    path: web::Path<String>,
    query: web::Query<RelatedQuery>,
    state: web::Data<HandlerState>,
) -> Result<HttpResponse> {
    let engine = state.engine.clone();
    let limit = resolve_limit(query.limit, engine.default_top_n())?;
    let news_id = path.into_inner();

    debug!(news_id = %news_id, limit = limit, "Getting related news");

    let lookup_id = news_id.clone();
    let related = tokio::task::spawn_blocking(move || engine.recommend_related(&lookup_id, limit))
        .await?;

    let detail = related
        .detail
        .ok_or_else(|| AppError::NotFound(format!("news {} not found", news_id)))?;

    Ok(HttpResponse::Ok().json(NewsInfoResponse {
        detail,
        related_news: related.related,
    }))
}

/// GET /news/users
pub async fn get_users(state: web::Data<HandlerState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(UsersResponse {
        users: state.engine.list_users(),
    }))
}

/// GET /news/model-info
pub async fn get_model_info(state: web::Data<HandlerState>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.engine.model_info()))
}

pub async fn health() -> HttpResponse {
    HttpResponse::Ok().body("OK")
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health)).service(
        web::scope("/news")
            .route("/recommendation", web::get().to(get_recommendations))
            .route(
                "/recommendation/info/{news_id}",
                web::get().to(get_news_info),
            )
            .route("/users", web::get().to(get_users))
            .route("/model-info", web::get().to(get_model_info)),
    );
}
