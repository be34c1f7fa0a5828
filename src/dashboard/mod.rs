//! Panel web: tres paneles (compuestos, bioactividad, similitud), descargas
//! xlsx y una API JSON con los mismos informes.

pub mod handlers;
pub mod html;

use std::net::SocketAddr;

use axum::routing::get;
use axum::Router;

use crate::errors::CoreError;
use crate::session::DashboardSession;

pub fn create_router(session: DashboardSession) -> Router {
    Router::new().route("/", get(handlers::index))
                 .route("/health", get(handlers::health))
                 .route("/compounds", get(handlers::compounds))
                 .route("/compounds/export", get(handlers::compounds_export))
                 .route("/bioactivity", get(handlers::bioactivity))
                 .route("/bioactivity/export", get(handlers::bioactivity_export))
                 .route("/similar", get(handlers::similar))
                 .route("/similar/export", get(handlers::similar_export))
                 .route("/api/compounds", get(handlers::api_compounds))
                 .route("/api/bioactivity", get(handlers::api_bioactivity))
                 .route("/api/similar", get(handlers::api_similar))
                 .with_state(session)
}

pub async fn serve(addr: SocketAddr, session: DashboardSession) -> Result<(), CoreError> {
    let router = create_router(session);
    log::info!("panel disponible en http://{addr}");
    axum::Server::try_bind(&addr).map_err(|e| CoreError::Internal(format!("no se pudo abrir {addr}: {e}")))?
                                 .serve(router.into_make_service())
                                 .await
                                 .map_err(|e| CoreError::Internal(e.to_string()))
}
