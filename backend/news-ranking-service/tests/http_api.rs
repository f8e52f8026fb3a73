mod common;

use actix_web::{test, web, App};
use news_ranking_service::handlers::{self, HandlerState};
use serde_json::Value;
use std::sync::Arc;

macro_rules! app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(HandlerState {
                    engine: Arc::new(common::engine()),
                }))
                .configure(handlers::configure),
        )
        .await
    };
}

fn pages(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|n| n["page"].as_str().unwrap().to_string())
        .collect()
}

#[actix_web::test]
async fn test_health() {
    let app = app!();
    let req = test::TestRequest::get().uri("/health").to_request();
    let body = test::call_and_read_body(&app, req).await;
    assert_eq!(body, "OK");
}

#[actix_web::test]
async fn test_recommendation_for_known_user() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/news/recommendation?user_id=reader-1&limit=1")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["count"], 1);
    assert_eq!(pages(&body["news"]), vec!["a3"]);
    assert!(body["news"][0].get("body").is_none());
    assert_eq!(body["news"][0]["issued"], "2022-08-12T09:00:00Z");
}

#[actix_web::test]
async fn test_anonymous_recommendation_uses_default_limit() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/news/recommendation")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    // default limit is 10, the catalog only has 8 articles
    assert_eq!(body["count"], 8);
    assert_eq!(pages(&body["news"])[0], "c2");
}

#[actix_web::test]
async fn test_limit_out_of_range_is_rejected() {
    let app = app!();

    for uri in [
        "/news/recommendation?limit=0",
        "/news/recommendation?limit=101",
        "/news/recommendation/info/a1?limit=0",
    ] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400, "{}", uri);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], 400);
    }
}

#[actix_web::test]
async fn test_news_info_with_related() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/news/recommendation/info/a1?limit=2")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["page"], "a1");
    assert_eq!(body["body"], "Body of a1");
    assert_eq!(pages(&body["relatedNews"]), vec!["a2", "a3"]);
}

#[actix_web::test]
async fn test_news_info_unknown_id_is_404() {
    let app = app!();
    let req = test::TestRequest::get()
        .uri("/news/recommendation/info/does-not-exist")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 404);
}

#[actix_web::test]
async fn test_users_and_model_info() {
    let app = app!();

    let req = test::TestRequest::get().uri("/news/users").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["users"].as_array().unwrap().len(), 5);

    let req = test::TestRequest::get().uri("/news/model-info").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["catalog_items"], 8);
    assert_eq!(body["content_features"], 6);
    assert_eq!(body["interactions"], 10);
}
