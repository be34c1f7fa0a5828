//! Rutas del panel contra una sesión sin red.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chem_adapters::XLSX_MIME;
use chembl_dashboard::dashboard::create_router;
use chembl_dashboard::{AppConfig, DashboardSession};
use tower::ServiceExt;

fn app() -> Router {
    create_router(DashboardSession::offline(&AppConfig::default()).unwrap())
}

async fn get(uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app().oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let content_type = response.headers()
                               .get(header::CONTENT_TYPE)
                               .and_then(|v| v.to_str().ok())
                               .map(String::from);
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap().to_vec();
    (status, content_type, body)
}

async fn get_text(uri: &str) -> (StatusCode, String) {
    let (status, _, body) = get(uri).await;
    (status, String::from_utf8(body).unwrap())
}

#[tokio::test]
async fn index_shows_the_three_panels() {
    let (status, body) = get_text("/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Compound Explorer"));
    assert!(body.contains("Bioactivity Explorer"));
    assert!(body.contains("Similar Compounds"));
}

#[tokio::test]
async fn compound_panel_reports_found_and_missing_names() {
    let (status, body) = get_text("/compounds?names=aspirin%0Aunobtainium").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("CHEMBL25"));
    assert!(body.contains("<svg"));
    assert!(body.contains("No compound found for &#39;unobtainium&#39;."));
    assert!(body.contains("/compounds/export?names="));
}

#[tokio::test]
async fn bioactivity_without_data_is_not_an_error() {
    let (status, body) = get_text("/bioactivity?chembl_id=CHEMBL113").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("No bioactivity data found."));
}

#[tokio::test]
async fn invalid_smiles_renders_error_and_no_table() {
    let (status, body) = get_text("/similar?smiles=C1CC%28").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("Invalid SMILES"));
    assert!(!body.contains("<table>"));
}

#[tokio::test]
async fn similarity_table_lists_the_reference_set() {
    let (status, body) = get_text("/similar?smiles=CC%28%3DO%29Oc1ccccc1C%28%3DO%29O").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<td>aspirin</td>"));
    assert!(body.contains("<td>1</td>"));
}

#[tokio::test]
async fn exports_are_xlsx_attachments() {
    let (status, content_type, body) = get("/bioactivity/export?chembl_id=CHEMBL25").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(content_type.as_deref(), Some(XLSX_MIME));
    assert!(body.starts_with(b"PK"));

    let response = app().oneshot(Request::builder().uri("/compounds/export?names=caffeine").body(Body::empty()).unwrap())
                        .await
                        .unwrap();
    let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert_eq!(disposition, "attachment; filename=\"chembl_compound_data.xlsx\"");
}

#[tokio::test]
async fn empty_export_is_not_found() {
    let (status, _, _) = get("/bioactivity/export?chembl_id=CHEMBL113").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn json_api_reports_errors_with_status() {
    let (status, body) = get_text("/api/similar?smiles=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert!(json["error"].as_str().unwrap().starts_with("Estructura inválida"));

    let (status, body) = get_text("/api/bioactivity?chembl_id=CHEMBL25").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["records"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn similarity_export_is_an_attachment() {
    let uri = "/similar/export?smiles=CC%28%3DO%29OC1%3DCC%3DCC%3DC1C%28%3DO%29O";
    let response = app().oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get(header::CONTENT_TYPE).unwrap(), XLSX_MIME);
    let disposition = response.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap();
    assert_eq!(disposition, "attachment; filename=\"similar_compounds.xlsx\"");
    let body = hyper::body::to_bytes(response.into_body()).await.unwrap();
    assert!(body.starts_with(b"PK"));

    let (status, _, _) = get("/similar/export?smiles=C1CC%28").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn json_api_lists_compound_outcomes() {
    let (status, body) = get_text("/api/compounds?names=Aspirin%0A%0Aunobtainium").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    let entries = json["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["name"], "Aspirin");
    assert_eq!(entries[0]["outcome"]["status"], "found");
    assert_eq!(entries[0]["outcome"]["record"]["chembl_id"], "CHEMBL25");
    assert_eq!(entries[1]["outcome"]["status"], "not_found");

    let (status, _) = get_text("/api/compounds?names=%0A%20").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
