//! Router tests
//!
//! Exercise every route through `tower::ServiceExt::oneshot` with an
//! in-memory fetcher standing in for the upstream sources.

use std::sync::Arc;

use api::{create_router, AppState};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use metrics_store::{MemoryStore, MetricsStore};
use pipeline::{Fetcher, Ingestor, SourceUrls};
use serde_json::Value;
use tower::ServiceExt;
use types::errors::FetchError;

const ADS: &str = r#"{"external":{"ads":{"performance":[
    {"date":"2023-01-01","campaign_id":"C-1","channel":"google_ads","clicks":100,"impressions":10000,"cost":50.0,
     "utm_campaign":"spring","utm_source":"google","utm_medium":"cpc"},
    {"date":"2023-01-20","campaign_id":"C-2","channel":"meta_ads","clicks":10,"impressions":900,"cost":5.0,
     "utm_campaign":"summer","utm_source":"meta","utm_medium":"social"},
    {"date":"2023-02-01","campaign_id":"C-3","channel":"google_ads","clicks":20,"impressions":800,"cost":8.0,
     "utm_campaign":"autumn","utm_source":"google","utm_medium":"cpc"}
]}}}"#;

const CRM: &str = r#"{"external":{"crm":{"opportunities":[
    {"opportunity_id":"O-1","contact_email":"a@example.com","stage":"closed_won","amount":500.0,
     "created_at":"2023-01-03T10:00:00Z","utm_campaign":"spring","utm_source":"google","utm_medium":"cpc"}
]}}}"#;

struct StubFetcher {
    fail_crm: bool,
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match url {
            "http://ads.test" => Ok(ADS.as_bytes().to_vec()),
            "http://crm.test" if self.fail_crm => Err(FetchError::RetriesExhausted {
                url: url.to_string(),
                attempts: 3,
                last_error: "connection refused".to_string(),
            }),
            "http://crm.test" => Ok(CRM.as_bytes().to_vec()),
            _ => Err(FetchError::UnexpectedStatus {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

fn app(fail_crm: bool) -> (Router, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let ingestor = Ingestor::new(
        Arc::new(StubFetcher { fail_crm }),
        store.clone(),
        SourceUrls {
            ads: "http://ads.test".to_string(),
            crm: "http://crm.test".to_string(),
        },
    );
    (create_router(AppState::new(store.clone(), ingestor)), store)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

#[tokio::test]
async fn test_health_and_ready() {
    let (app, _) = app(false);

    let (status, body) = send(&app, "GET", "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, "GET", "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["rows"], 0);
}

#[tokio::test]
async fn test_ingest_then_query_channel() {
    let (app, store) = app(false);

    let (status, body) = send(&app, "POST", "/ingest/run").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 3);
    assert_eq!(body["message"], "Data ingestion completed successfully");
    assert!(body["batch_id"].is_string());
    assert_eq!(store.len(), 3);

    let (status, body) = send(&app, "GET", "/metrics/channel?channel=google_ads").await;
    assert_eq!(status, StatusCode::OK);
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r["channel"] == "google_ads"));

    let spring = rows.iter().find(|r| r["utm_campaign"] == "spring").unwrap();
    assert_eq!(spring["closed_won"], 1);
    assert_eq!(spring["revenue"], 500.0);
    assert_eq!(spring["cpc"], 0.5);
    assert_eq!(spring["roas"], 10.0);
}

#[tokio::test]
async fn test_ingest_with_since() {
    let (app, store) = app(false);

    let (status, body) = send(&app, "POST", "/ingest/run?since=2023-01-15").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 2);
    // The spring opportunity predates the bound, and so does its ad.
    assert!(store.snapshot().iter().all(|r| r.leads == 0));
}

#[tokio::test]
async fn test_ingest_rejects_bad_since() {
    let (app, store) = app(false);

    let (status, body) = send(&app, "POST", "/ingest/run?since=15-01-2023").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "BAD_REQUEST");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_ingest_fetch_failure_is_500() {
    let (app, store) = app(true);

    let (status, body) = send(&app, "POST", "/ingest/run").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "INGESTION_FAILED");
    assert_eq!(body["message"], "Failed to extract crm data");
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_ingest_requires_post() {
    let (app, _) = app(false);
    let (status, _) = send(&app, "GET", "/ingest/run").await;
    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_funnel_query_with_dates_and_pagination() {
    let (app, _) = app(false);
    send(&app, "POST", "/ingest/run").await;
    send(&app, "POST", "/ingest/run").await;

    let (_, body) = send(&app, "GET", "/metrics/funnel?utm_campaign=spring").await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    let (_, body) = send(&app, "GET", "/metrics/funnel?from=2023-01-20&to=2023-02-01").await;
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert!(rows.iter().all(|r| r["utm_campaign"] != "spring"));

    let (_, body) = send(&app, "GET", "/metrics/funnel?limit=1&offset=1").await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, "GET", "/metrics/funnel?offset=99").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_malformed_pagination_is_ignored() {
    let (app, _) = app(false);
    send(&app, "POST", "/ingest/run").await;

    let (status, body) = send(&app, "GET", "/metrics/channel?limit=lots&offset=-3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_row_shape() {
    let (app, _) = app(false);
    send(&app, "POST", "/ingest/run").await;

    let (_, body) = send(&app, "GET", "/metrics/channel?limit=1").await;
    let row = body[0].as_object().unwrap();
    for field in [
        "date", "channel", "campaign_id", "utm_campaign", "utm_source", "utm_medium",
        "clicks", "impressions", "cost", "leads", "opportunities", "closed_won",
        "revenue", "cpc", "cpa", "cvr_lead_to_opp", "cvr_opp_to_won", "roas",
    ] {
        assert!(row.contains_key(field), "missing {field}");
    }
    assert_eq!(row.len(), 18);
}
