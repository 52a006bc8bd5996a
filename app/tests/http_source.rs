use std::time::Duration;

use axum::{http::StatusCode, routing::get, Json, Router};
use job_core::FetchError;
use job_finder_lib::remote::{http_client::HttpJobSource, JobSource};
use serde_json::json;

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}/api/v1")
}

fn source_for(endpoint: String) -> HttpJobSource {
    let client = HttpJobSource::build_client(Duration::from_secs(5)).unwrap();
    HttpJobSource::new(client, endpoint)
}

#[tokio::test]
async fn normalizes_sparse_jobs() {
    let router = Router::new().route(
        "/api/v1",
        get(|| async {
            Json(json!({
                "jobs": [
                    { "title": "Engineer" },
                    { "id": "job-2", "title": "Designer", "companyName": "Studio", "companyLogo": "https://img/logo.png" }
                ]
            }))
        }),
    );
    let jobs = source_for(serve(router).await).fetch_jobs().await.unwrap();

    assert_eq!(jobs.len(), 2);
    assert_eq!(jobs[0].title, "Engineer");
    assert_eq!(jobs[0].company_name, "Unknown");
    assert_eq!(jobs[0].location, "Remote");
    assert_eq!(jobs[0].min_salary, "Not provided");
    assert!(!jobs[0].id.is_empty());
    assert_eq!(jobs[1].id, "job-2");
    assert_eq!(jobs[1].icon, "https://img/logo.png");
}

#[tokio::test]
async fn server_error_is_a_network_error() {
    let router = Router::new().route(
        "/api/v1",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let result = source_for(serve(router).await).fetch_jobs().await;
    assert!(matches!(result, Err(FetchError::NetworkError(_))));
}

#[tokio::test]
async fn non_json_body_is_malformed() {
    let router = Router::new().route("/api/v1", get(|| async { "<html>maintenance</html>" }));
    let result = source_for(serve(router).await).fetch_jobs().await;
    assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
}

#[tokio::test]
async fn missing_jobs_array_is_malformed() {
    let router = Router::new().route(
        "/api/v1",
        get(|| async { Json(json!({ "jobs": "none today" })) }),
    );
    let result = source_for(serve(router).await).fetch_jobs().await;
    assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
}

#[tokio::test]
async fn unreachable_host_is_a_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = source_for(format!("http://{addr}/api/v1")).fetch_jobs().await;
    assert!(matches!(result, Err(FetchError::NetworkError(_))));
}
