// src/handlers/dashboard.rs

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::{
    common::error::AppError,
    config::AppState,
    // Importamos os models para referenciar no Swagger
    models::{dashboard::DashboardStats, lead::Lead},
};

// GET /api/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/dashboard/summary",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Indicadores dos leads (recalculados a cada chamada)", body = DashboardStats)
    )
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let summary = app_state.dashboard_service.get_summary().await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/dashboard/recent-leads
#[utoipa::path(
    get,
    path = "/api/dashboard/recent-leads",
    tag = "Dashboard",
    responses(
        (status = 200, description = "Leads mais recentes", body = Vec<Lead>)
    )
)]
pub async fn get_recent_leads(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state.dashboard_service.get_recent_leads().await?;

    Ok((StatusCode::OK, Json(leads)))
}
