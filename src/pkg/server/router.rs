use axum::http::Method;
use axum::routing::post;
use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers;
use super::handlers::probes::{healthz, livez};
use super::state::AppState;

pub fn build_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/jobs", get(handlers::jobs::list))
        .route("/jobs/{id}", get(handlers::jobs::retrieve))
        .route("/job-categories", get(handlers::jobs::categories))
        .route("/job-locations", get(handlers::jobs::locations))
        .route("/run-scraper", post(handlers::scraper::run))
        .route("/healthz", get(healthz))
        .route("/livez", get(livez))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Arc;

    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use chrono::{Duration, Utc};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;
    use tracing_test::traced_test;
    use uuid::Uuid;

    use super::*;
    use crate::prelude::Result;
    use crate::pkg::internal::{
        adaptors::jobs::spec::NewJob,
        scraper::{tests::defaults, Ingestor, ScraperCommand},
        store::{JobStore, MemoryJobStore},
    };

    fn state_with(store: Arc<MemoryJobStore>, scraper: ScraperCommand) -> AppState {
        let store: Arc<dyn JobStore> = store;
        AppState {
            ingestor: Arc::new(Ingestor::new(store.clone(), scraper, defaults())),
            store,
        }
    }

    fn idle_scraper(dir: &Path) -> ScraperCommand {
        ScraperCommand::new("true", vec![], dir.join("out.json"), None)
    }

    async fn seed(store: &MemoryJobStore, n: i64) -> Result<()> {
        let now = Utc::now();
        for i in 0..n {
            store
                .insert(NewJob {
                    title: format!("Software Engineer {i}"),
                    company: "Acme".into(),
                    location: if i % 3 == 0 { "Pune".into() } else { "Remote".into() },
                    experience: "Not specified".into(),
                    link: format!("http://x/{i}"),
                    source: if i == 0 { "linkedin2".into() } else { "LinkedIn".into() },
                    crawled_at: now - Duration::minutes(i),
                    searched_title: Some(if i % 2 == 0 { "Software Engineer".into() } else { "QA Engineer".into() }),
                    searched_location: Some(if i % 3 == 0 { "Pune".into() } else { "Remote".into() }),
                })
                .await?;
        }
        Ok(())
    }

    async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().method(method).uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    #[tokio::test]
    #[traced_test]
    async fn second_page_of_fifteen() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Arc::new(MemoryJobStore::new());
        seed(&store, 15).await?;
        let app = build_routes(state_with(store, idle_scraper(dir.path())));

        let (status, body) = call(app, Method::GET, "/jobs?page=2&limit=10").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 5);
        assert_eq!(body["currentPage"], 2);
        assert_eq!(body["totalPages"], 2);
        assert_eq!(body["totalJobs"], 15);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn huge_limit_is_a_single_page() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Arc::new(MemoryJobStore::new());
        seed(&store, 3).await?;
        let app = build_routes(state_with(store, idle_scraper(dir.path())));

        let (status, body) = call(app, Method::GET, "/jobs?limit=9223372036854775807").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["jobs"].as_array().unwrap().len(), 3);
        assert_eq!(body["totalPages"], 1);
        assert_eq!(body["totalJobs"], 3);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn list_defaults_and_newest_first() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Arc::new(MemoryJobStore::new());
        seed(&store, 12).await?;
        let app = build_routes(state_with(store, idle_scraper(dir.path())));

        let (status, body) = call(app, Method::GET, "/jobs?page=zero").await;
        assert_eq!(status, StatusCode::OK);
        let jobs = body["jobs"].as_array().unwrap();
        assert_eq!(jobs.len(), 10);
        assert_eq!(jobs[0]["title"], "Software Engineer 0");
        assert_eq!(jobs[9]["title"], "Software Engineer 9");
        assert_eq!(body["currentPage"], 1);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn filters_combine() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Arc::new(MemoryJobStore::new());
        seed(&store, 9).await?;
        let app = build_routes(state_with(store, idle_scraper(dir.path())));

        let (_, body) = call(app.clone(), Method::GET, "/jobs?title=software&location=PUNE&limit=50").await;
        assert_eq!(body["totalJobs"], 3);

        let (_, body) = call(app.clone(), Method::GET, "/jobs?source=LinkedIn&limit=50").await;
        assert_eq!(body["totalJobs"], 8);

        let (_, body) = call(app, Method::GET, "/jobs?source=linkedin&limit=50").await;
        assert_eq!(body["totalJobs"], 0);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn job_by_id() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Arc::new(MemoryJobStore::new());
        seed(&store, 2).await?;
        let app = build_routes(state_with(store, idle_scraper(dir.path())));

        let (_, body) = call(app.clone(), Method::GET, "/jobs?limit=1").await;
        let id = body["jobs"][0]["id"].as_str().unwrap().to_string();
        let (status, job) = call(app.clone(), Method::GET, &format!("/jobs/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(job["id"], id.as_str());

        let (status, body) = call(app.clone(), Method::GET, &format!("/jobs/{}", Uuid::new_v4())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "Job not found");

        let (status, _) = call(app, Method::GET, "/jobs/not-an-id").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn distinct_categories_and_locations() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let store = Arc::new(MemoryJobStore::new());
        seed(&store, 6).await?;
        let app = build_routes(state_with(store, idle_scraper(dir.path())));

        let (status, body) = call(app.clone(), Method::GET, "/job-categories").await;
        assert_eq!(status, StatusCode::OK);
        let mut categories: Vec<_> = body.as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
        categories.sort();
        assert_eq!(categories, vec!["QA Engineer", "Software Engineer"]);

        let (_, body) = call(app, Method::GET, "/job-locations").await;
        let mut locations: Vec<_> = body.as_array().unwrap().iter().map(|v| v.as_str().unwrap()).collect();
        locations.sort();
        assert_eq!(locations, vec!["Pune", "Remote"]);
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn run_scraper_reports_count_then_dedups() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let fixture = dir.path().join("fixture.json");
        tokio::fs::write(
            &fixture,
            r#"[{"title": "PM", "company": "Acme", "location": "Remote", "link": "http://x/1"}]"#,
        )
        .await?;
        let scraper = crate::pkg::internal::scraper::tests::copying_scraper(&fixture, &dir.path().join("out.json"));
        let store = Arc::new(MemoryJobStore::new());
        let app = build_routes(state_with(store, scraper));

        let (status, body) = call(app.clone(), Method::POST, "/run-scraper").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["count"], 1);
        assert_eq!(body["message"], "Scraper completed successfully. Added 1 new jobs.");

        let (_, body) = call(app.clone(), Method::POST, "/run-scraper").await;
        assert_eq!(body["count"], 0);

        let (_, body) = call(app, Method::GET, "/jobs?searched_title=product").await;
        assert_eq!(body["totalJobs"], 1);
        assert_eq!(body["jobs"][0]["source"], "LinkedIn");
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn run_scraper_failure_is_a_server_error() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let scraper = ScraperCommand::new("false", vec![], dir.path().join("out.json"), None);
        let app = build_routes(state_with(Arc::new(MemoryJobStore::new()), scraper));

        let (status, body) = call(app, Method::POST, "/run-scraper").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Error running scraper");
        assert!(body["error"].as_str().unwrap().contains("exited"));
        Ok(())
    }

    #[tokio::test]
    #[traced_test]
    async fn health_endpoints_respond() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let app = build_routes(state_with(Arc::new(MemoryJobStore::new()), idle_scraper(dir.path())));
        let (status, _) = call(app.clone(), Method::GET, "/livez").await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = call(app, Method::GET, "/healthz").await;
        assert_eq!(status, StatusCode::OK);
        Ok(())
    }
}
