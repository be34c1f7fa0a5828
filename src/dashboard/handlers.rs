//! Manejadores HTTP. Cada petición es independiente: se consulta al
//! proveedor, se compone la respuesta y no queda nada guardado. La
//! exportación vuelve a ejecutar la consulta.

use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chem_adapters::{to_xlsx, Tabular, XLSX_MIME};
use chem_domain::DomainError;
use serde::Deserialize;
use serde_json::json;

use super::html::{self, PanelInputs};
use crate::session::DashboardSession;

#[derive(Debug, Default, Deserialize)]
pub struct CompoundParams {
    #[serde(default)]
    pub names: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct BioactivityParams {
    #[serde(default)]
    pub chembl_id: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SimilarParams {
    #[serde(default)]
    pub smiles: String,
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::InvalidStructure(_) | DomainError::ValidationError(_) => StatusCode::BAD_REQUEST,
        DomainError::ProviderUnavailable(_) => StatusCode::BAD_GATEWAY,
        DomainError::Engine(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn render(session: &DashboardSession, inputs: PanelInputs<'_>, status: StatusCode, results: String) -> Response {
    (status, Html(html::page(&inputs, session.candidates(), &results))).into_response()
}

pub async fn index(State(session): State<DashboardSession>) -> Response {
    render(&session, PanelInputs::default(), StatusCode::OK, String::new())
}

pub async fn health(State(session): State<DashboardSession>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "provider": session.provider().get_name(),
        "provider_version": session.provider().get_version(),
        "timestamp": chrono::Utc::now(),
    }))
}

pub async fn compounds(State(session): State<DashboardSession>, Query(params): Query<CompoundParams>) -> Response {
    let inputs = PanelInputs { names: &params.names, ..PanelInputs::default() };
    let names = chem_core::parse_names(&params.names);
    if names.is_empty() {
        return render(&session, inputs, StatusCode::OK, String::new());
    }
    match session.compounds(&names).await {
        Ok(report) => render(&session, inputs, StatusCode::OK, html::compounds(&report, &params.names)),
        Err(e) => render(&session, inputs, status_for(&e), html::error("Compound Explorer", &e.to_string())),
    }
}

pub async fn bioactivity(State(session): State<DashboardSession>, Query(params): Query<BioactivityParams>) -> Response {
    let inputs = PanelInputs { chembl_id: &params.chembl_id, ..PanelInputs::default() };
    if params.chembl_id.trim().is_empty() {
        return render(&session, inputs, StatusCode::OK, String::new());
    }
    match session.bioactivity(&params.chembl_id).await {
        Ok(report) => render(&session, inputs, StatusCode::OK, html::bioactivity(&report)),
        Err(e) => render(&session, inputs, status_for(&e), html::error("Bioactivity Explorer", &e.to_string())),
    }
}

pub async fn similar(State(session): State<DashboardSession>, Query(params): Query<SimilarParams>) -> Response {
    let inputs = PanelInputs { smiles: &params.smiles, ..PanelInputs::default() };
    if params.smiles.trim().is_empty() {
        return render(&session, inputs, StatusCode::OK, String::new());
    }
    match session.similar(&params.smiles).await {
        Ok(report) => render(&session, inputs, StatusCode::OK, html::similarity(&report)),
        Err(e @ DomainError::InvalidStructure(_)) => {
            let text = format!("Invalid SMILES. Please check your input. Error: {e}");
            render(&session, inputs, StatusCode::BAD_REQUEST, html::error("Similar Compounds", &text))
        }
        Err(e) => render(&session, inputs, status_for(&e), html::error("Similar Compounds", &e.to_string())),
    }
}

fn xlsx_response<T: Tabular>(report: &T) -> Response {
    let table = report.to_table();
    if table.is_empty() {
        return (StatusCode::NOT_FOUND, "nothing to export").into_response();
    }
    match to_xlsx(&table) {
        Ok(bytes) => {
            let disposition = format!("attachment; filename=\"{}\"", report.export_file_name());
            ([(header::CONTENT_TYPE, XLSX_MIME.to_string()), (header::CONTENT_DISPOSITION, disposition)], bytes).into_response()
        }
        Err(e) => {
            log::error!("exportación fallida: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
        }
    }
}

fn error_response(err: DomainError) -> Response {
    (status_for(&err), err.to_string()).into_response()
}

pub async fn compounds_export(State(session): State<DashboardSession>, Query(params): Query<CompoundParams>) -> Response {
    match session.compounds(&chem_core::parse_names(&params.names)).await {
        Ok(report) => xlsx_response(&report),
        Err(e) => error_response(e),
    }
}

pub async fn bioactivity_export(State(session): State<DashboardSession>,
                                Query(params): Query<BioactivityParams>)
                                -> Response {
    match session.bioactivity(&params.chembl_id).await {
        Ok(report) => xlsx_response(&report),
        Err(e) => error_response(e),
    }
}

pub async fn similar_export(State(session): State<DashboardSession>, Query(params): Query<SimilarParams>) -> Response {
    match session.similar(&params.smiles).await {
        Ok(report) => xlsx_response(&report),
        Err(e) => error_response(e),
    }
}

fn json_result<T: serde::Serialize>(result: Result<T, DomainError>) -> Response {
    match result {
        Ok(report) => Json(report).into_response(),
        Err(e) => (status_for(&e), Json(json!({ "error": e.to_string() }))).into_response(),
    }
}

pub async fn api_compounds(State(session): State<DashboardSession>, Query(params): Query<CompoundParams>) -> Response {
    json_result(session.compounds(&chem_core::parse_names(&params.names)).await)
}

pub async fn api_bioactivity(State(session): State<DashboardSession>, Query(params): Query<BioactivityParams>) -> Response {
    json_result(session.bioactivity(&params.chembl_id).await)
}

pub async fn api_similar(State(session): State<DashboardSession>, Query(params): Query<SimilarParams>) -> Response {
    json_result(session.similar(&params.smiles).await)
}
