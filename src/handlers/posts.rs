// src/handlers/posts.rs
// DOCUMENTATION: HTTP handlers for post operations
// PURPOSE: Derive the request deadline, call the store, return JSON

use crate::config::Config;
use crate::db::PostStore;
use crate::deadline::Deadline;
use crate::errors::PostsError;
use actix_web::{web, HttpResponse, Responder};

/// GET /posts
/// Newest posts first, at most 100.
///
/// If the client disconnects, actix drops this future and the in-flight
/// query with it.
pub async fn list_posts(
    store: web::Data<dyn PostStore>,
    config: web::Data<Config>,
) -> Result<impl Responder, PostsError> {
    let deadline = Deadline::after(config.request_timeout());
    let posts = store.recent_posts(&deadline).await?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Configuration for post routes
pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/posts", web::get().to(list_posts));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Post;
    use actix_web::{http::StatusCode, test, App};
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// In-memory store returning a canned outcome and recording the budget
    /// it was handed
    struct FakeStore {
        outcome: fn() -> Result<Vec<Post>, PostsError>,
        seen_budget: Mutex<Option<Duration>>,
    }

    impl FakeStore {
        fn new(outcome: fn() -> Result<Vec<Post>, PostsError>) -> Arc<Self> {
            Arc::new(Self {
                outcome,
                seen_budget: Mutex::new(None),
            })
        }
    }

    #[async_trait]
    impl PostStore for FakeStore {
        async fn recent_posts(&self, deadline: &Deadline) -> Result<Vec<Post>, PostsError> {
            *self.seen_budget.lock().unwrap() = Some(deadline.remaining());
            (self.outcome)()
        }
    }

    fn test_config() -> Config {
        Config::from_vars(|key| match key {
            "DATABASE_URL" => Some("postgres://localhost/blog".to_string()),
            _ => None,
        })
        .unwrap()
    }

    async fn get_posts(store: Arc<FakeStore>) -> (StatusCode, Value) {
        let store: Arc<dyn PostStore> = store;
        let app = test::init_service(
            App::new()
                .app_data(web::Data::from(store))
                .app_data(web::Data::new(test_config()))
                .configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/posts").to_request();
        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }

    fn two_posts() -> Result<Vec<Post>, PostsError> {
        Ok(vec![
            Post {
                id: 2,
                title: "Second".to_string(),
                body: "b2".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 2, 8, 0, 0).unwrap(),
            },
            Post {
                id: 1,
                title: "First".to_string(),
                body: "b1".to_string(),
                created_at: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            },
        ])
    }

    #[actix_rt::test]
    async fn test_list_posts_payload() {
        let (status, body) = get_posts(FakeStore::new(two_posts)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!([
                {"id": 2, "title": "Second", "body": "b2", "created_at": "2024-05-02T08:00:00Z"},
                {"id": 1, "title": "First", "body": "b1", "created_at": "2024-05-01T08:00:00Z"}
            ])
        );
    }

    #[actix_rt::test]
    async fn test_empty_store_returns_empty_array() {
        let (status, body) = get_posts(FakeStore::new(|| Ok(Vec::new()))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([]));
    }

    #[actix_rt::test]
    async fn test_failures_keep_their_stage() {
        let cases: [(fn() -> Result<Vec<Post>, PostsError>, &str); 3] = [
            (
                || Err(PostsError::QueryError("relation \"posts\" does not exist".into())),
                "query error",
            ),
            (
                || Err(PostsError::ScanError("mismatched types".into())),
                "scan error",
            ),
            (
                || Err(PostsError::RowsError("connection reset".into())),
                "rows error",
            ),
        ];

        for (outcome, tag) in cases {
            let (status, body) = get_posts(FakeStore::new(outcome)).await;

            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body["error"], tag);
            assert!(!body["detail"].as_str().unwrap().is_empty());
            assert_eq!(body.as_object().unwrap().len(), 2);
        }
    }

    #[actix_rt::test]
    async fn test_request_gets_full_budget() {
        let store = FakeStore::new(|| Ok(Vec::new()));
        get_posts(store.clone()).await;

        let budget = store.seen_budget.lock().unwrap().expect("store was called");
        assert!(budget <= Duration::from_secs(5));
        assert!(budget > Duration::from_secs(4));
    }
}
