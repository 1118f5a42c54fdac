//! Backend de captura de leads: formulários gravam leads, o dashboard
//! resume a base e uma integração de CRM simulada "sincroniza" os dados.

use axum::{
    Json, Router,
    routing::{get, patch, post},
};
use utoipa::OpenApi;

pub mod common;
pub mod config;
pub mod db;
pub mod docs;
pub mod handlers;
pub mod models;
pub mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;

/// Monta o router completo da API.
pub fn app(app_state: AppState) -> Router {
    let lead_routes = Router::new()
        .route("/"
               ,post(handlers::leads::capture_lead)
               .get(handlers::leads::list_leads)
        )
        .route("/export"
               ,get(handlers::leads::export_leads)
        )
        .route("/{id}"
               ,get(handlers::leads::get_lead)
               .delete(handlers::leads::delete_lead)
        )
        .route("/{id}/status"
               ,patch(handlers::leads::change_status)
        );

    let dashboard_routes = Router::new()
        .route("/summary", get(handlers::dashboard::get_summary))
        .route("/recent-leads", get(handlers::dashboard::get_recent_leads));

    let crm_routes = Router::new()
        .route("/providers", get(handlers::crm::list_providers))
        .route("/config", get(handlers::crm::get_config))
        .route("/connect", post(handlers::crm::connect))
        .route("/sync", post(handlers::crm::sync))
        .route("/disconnect", post(handlers::crm::disconnect));

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api-docs/openapi.json", get(|| async { Json(ApiDoc::openapi()) }))
        .nest("/api/leads", lead_routes)
        .nest("/api/dashboard", dashboard_routes)
        .nest("/api/crm", crm_routes)
        .with_state(app_state)
}
